//! Hash dataset storage

pub mod dataset;
pub mod store;

pub use dataset::{open, read};
pub use store::{LoadError, LoadReport, RecordStore};

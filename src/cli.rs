use clap::{builder::Styles, Parser, Subcommand};
use colored::Colorize;
use std::path::PathBuf;

use crate::config::DEFAULT_LIMIT;

fn parse_limit(s: &str) -> Result<usize, String> {
	let val: usize = s.parse().map_err(|_| format!("'{}' is not a valid number", s))?;
	if val == 0 {
		Err("limit must be at least 1".to_string())
	} else {
		Ok(val)
	}
}

fn styles() -> Styles {
	Styles::styled()
		.header(anstyle::Style::new().bold().fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Blue))))
		.usage(anstyle::Style::new().bold().fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Blue))))
		.literal(anstyle::Style::new().fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Blue))))
		.placeholder(anstyle::Style::new().fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Yellow))))
		.valid(anstyle::Style::new().fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Blue))))
		.invalid(anstyle::Style::new().fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Red))))
}

#[derive(Parser, Debug)]
#[command(
	name = "tlsh-cli",
	author,
	version,
	about = "Calculate, compare and look up TLSH fuzzy hashes",
	styles = styles(),
	disable_help_subcommand = true,
	after_help = format!(
		"{title}
  {bin} {hash}      {hash_args}              {hash_desc}
  {bin} {distance}  {distance_args}         {distance_desc}
  {bin} {check}     {check_args}     {check_desc}
  {bin} {check}     {check_file_args}  {check_file_desc}",
		title = "Examples:".bright_blue().bold(),
		bin = "tlsh-cli".bright_blue(),
		hash = "hash".yellow(),
		hash_args = "sample.exe",
		hash_desc = "TLSH of a file".dimmed(),
		distance = "distance".yellow(),
		distance_args = "<HASH1> <HASH2>",
		distance_desc = "Compare two hashes".dimmed(),
		check = "check".yellow(),
		check_args = "<HASH> --db hashes.csv",
		check_desc = "Closest known file".dimmed(),
		check_file_args = "-f sample.exe --csv",
		check_file_desc = "Hash and look up in one go".dimmed(),
	),
)]
pub struct Cli {
	/// Enable verbose debug output
	#[arg(short = 'v', long = "verbose", global = true)]
	pub verbose: bool,

	/// Output only the hash, distance, or SHA256 value
	#[arg(short = 'q', long = "quiet", global = true)]
	pub quiet: bool,

	#[command(subcommand)]
	pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
	/// Calculate the TLSH hash of one or more files
	#[command(visible_alias = "h")]
	Hash {
		/// Files (or directories with --recursive) to hash
		#[arg(value_name = "PATH", required = true)]
		paths: Vec<PathBuf>,

		/// Walk directories recursively
		#[arg(short = 'r', long = "recursive")]
		recursive: bool,

		/// Also print the SHA-256 of each file
		#[arg(long = "sha256")]
		sha256: bool,
	},

	/// Calculate the distance between two TLSH hashes
	#[command(visible_alias = "d")]
	Distance {
		/// First hash
		#[arg(value_name = "HASH1")]
		hash1: String,

		/// Second hash
		#[arg(value_name = "HASH2")]
		hash2: String,
	},

	/// Check a TLSH hash against the database
	#[command(visible_alias = "c")]
	Check {
		/// TLSH hash to look up
		#[arg(value_name = "HASH", required_unless_present = "file")]
		hash: Option<String>,

		/// Hash this file and look it up instead
		#[arg(short = 'f', long = "file", value_name = "PATH", conflicts_with = "hash")]
		file: Option<PathBuf>,

		/// Path to the CSV database file (default: tlsh_hashes.csv, or $TLSH_CLI_DB)
		#[arg(long = "db", value_name = "PATH")]
		db: Option<PathBuf>,

		/// Number of closest matches to show
		#[arg(short = 'n', long = "limit", default_value_t = DEFAULT_LIMIT, value_parser = parse_limit)]
		limit: usize,

		/// Output results in CSV format (tool,file,version,sha256,distance)
		#[arg(long = "csv")]
		csv: bool,

		/// Output results as JSON
		#[arg(long = "json")]
		json: bool,
	},

	/// Show help for a subcommand
	Help {
		/// Subcommand name
		subcommand: Option<String>,
	},
}

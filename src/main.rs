//! tlsh-cli - Calculate and compare TLSH hashes
//!
//! Hashes files, scores two hashes against each other, and finds the
//! closest match for a hash in a CSV database of known tools.

use anyhow::Result;
use clap::{CommandFactory, Parser};

use tlsh_cli::cli::{Cli, Command};
use tlsh_cli::commands;
use tlsh_cli::config;
use tlsh_cli::output::OutputFormat;
use tlsh_cli::ui::{self, Log};

fn main() {
	let cli = Cli::parse();

	Log::set_verbose(cli.verbose);
	Log::set_quiet(cli.quiet);
	ui::banner();

	if let Err(e) = run(cli) {
		ui::error(&format!("Error: {:#}", e));
		std::process::exit(1);
	}
}

fn run(cli: Cli) -> Result<()> {
	match cli.command {
		Command::Hash { paths, recursive, sha256 } => {
			commands::hash::run(&paths, recursive, sha256, cli.quiet)
		}
		Command::Distance { hash1, hash2 } => commands::distance::run(&hash1, &hash2, cli.quiet),
		Command::Check {
			hash,
			file,
			db,
			limit,
			csv,
			json,
		} => {
			if let Some(db) = db {
				config::set_db_path(db);
			}
			let format = OutputFormat::from_flags(cli.quiet, csv, json);
			commands::check::run(hash.as_deref(), file.as_deref(), limit, format)
		}
		Command::Help { subcommand } => {
			let mut cmd = Cli::command();
			if let Some(sub) = subcommand {
				if let Some(sub_cmd) = cmd.find_subcommand_mut(&sub) {
					sub_cmd.print_help()?;
				} else {
					ui::error(&format!("Unknown subcommand: {}", sub));
					cmd.print_help()?;
				}
			} else {
				cmd.print_help()?;
			}
			Ok(())
		}
	}
}

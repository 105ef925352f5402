//! Cohort - behavioral clusters and product recommendations
//!
//! A command-line tool that assigns a simulated user to a behavioral cluster
//! and lists the most viewed products for that cluster.

use clap::{CommandFactory, Parser};

use cohort::cli::{Cli, Command};
use cohort::{commands, config, ui};

fn main() {
	let cli = Cli::parse();

	ui::Log::set_verbose(cli.verbose);

	if let Some(dir) = cli.data_dir {
		config::set_data_dir(dir);
	}
	if let Some(path) = cli.scaler {
		config::set_scaler_path(path);
	}
	if let Some(path) = cli.population {
		config::set_population_path(path);
	}
	if let Some(path) = cli.log {
		config::set_log_path(path);
	}

	let result = match cli.command {
		Command::Assign {
			features,
			filters,
			top,
			clusters,
			labels,
			export,
		} => {
			if export.is_none() {
				ui::print_logo();
			}
			commands::assign::run(features, &filters, top, clusters, labels.as_deref(), export.as_deref())
		}
		Command::Options { filters, export } => commands::options::run(&filters, export.as_deref()),
		Command::Index { force } => commands::index::run(force),
		Command::Help { subcommand } => {
			let mut cmd = Cli::command();
			let printed = match subcommand {
				Some(sub) => match cmd.find_subcommand_mut(&sub) {
					Some(sub_cmd) => sub_cmd.print_help(),
					None => {
						ui::error(&format!("Unknown subcommand: {}", sub));
						cmd.print_help()
					}
				},
				None => cmd.print_help(),
			};
			printed.map_err(anyhow::Error::from)
		}
	};

	if let Err(e) = result {
		ui::error(&format!("{:#}", e));
		std::process::exit(1);
	}
}

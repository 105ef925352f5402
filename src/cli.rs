use clap::builder::styling::{AnsiColor, Style, Styles};
use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use std::path::PathBuf;

use crate::config::{DEFAULT_CLUSTERS, DEFAULT_TOP_N};

fn parse_finite(s: &str) -> Result<f64, String> {
	let val: f64 = s.parse().map_err(|_| format!("'{}' is not a valid number", s))?;
	if val.is_finite() {
		Ok(val)
	} else {
		Err(format!("value must be finite, got {}", val))
	}
}

fn styles() -> Styles {
	Styles::styled()
		.header(Style::new().bold().fg_color(Some(AnsiColor::Blue.into())))
		.usage(Style::new().bold().fg_color(Some(AnsiColor::Blue.into())))
		.literal(Style::new().fg_color(Some(AnsiColor::Blue.into())))
		.placeholder(Style::new().fg_color(Some(AnsiColor::Yellow.into())))
		.valid(Style::new().fg_color(Some(AnsiColor::Blue.into())))
		.invalid(Style::new().fg_color(Some(AnsiColor::Red.into())))
}

#[derive(Parser, Debug)]
#[command(
	name = "cohort",
	author,
	version,
	about = "Behavioral cluster assignment and product recommendations",
	styles = styles(),
	disable_help_subcommand = true,
	after_help = format!(
		"{title}
  {cohort} {assign}   {assign_args}   {assign_desc}
  {cohort} {assign}   {filter_args}   {filter_desc}
  {cohort} {options}  {options_args}           {options_desc}
  {cohort} {index}    {index_args}                        {index_desc}",
		title = "Examples:".bright_blue().bold(),
		cohort = "cohort".bright_blue(),
		assign = "assign".yellow(),
		assign_args = "-a 5 -c 2 -e 2 -p 6 -b 4 -s 900",
		assign_desc = "High engagement profile".dimmed(),
		filter_args = "--main-category electronics",
		filter_desc = "    Filtered recommendations".dimmed(),
		options = "options".yellow(),
		options_args = "-m electronics",
		options_desc = "List filter choices".dimmed(),
		index = "index".yellow(),
		index_args = "-f",
		index_desc = "Rebuild the index cache".dimmed(),
	),
)]
pub struct Cli {
	/// Enable verbose debug output
	#[arg(short = 'v', long = "verbose", global = true)]
	pub verbose: bool,

	/// Directory holding scaler.json, user_features.csv and merged_data.csv
	#[arg(short = 'd', long = "data-dir", global = true, value_name = "DIR")]
	pub data_dir: Option<PathBuf>,

	/// Scaling parameters file (overrides --data-dir)
	#[arg(long = "scaler", global = true, value_name = "PATH")]
	pub scaler: Option<PathBuf>,

	/// Reference population CSV (overrides --data-dir)
	#[arg(long = "population", global = true, value_name = "PATH")]
	pub population: Option<PathBuf>,

	/// Interaction log CSV (overrides --data-dir)
	#[arg(long = "log", global = true, value_name = "PATH")]
	pub log: Option<PathBuf>,

	#[command(subcommand)]
	pub command: Command,
}

/// The new user's six behavioral features
#[derive(Args, Debug, Clone, Copy)]
pub struct FeatureArgs {
	/// Activity frequency (UI range 0-6)
	#[arg(short = 'a', long = "activity-frequency", default_value_t = 1.0, value_parser = parse_finite)]
	pub activity_frequency: f64,

	/// Distinct categories touched (UI range 0-2)
	#[arg(short = 'c', long = "category-count", default_value_t = 1.0, value_parser = parse_finite)]
	pub category_count: f64,

	/// Distinct event types (UI range 0-2)
	#[arg(short = 'e', long = "event-type-count", default_value_t = 1.0, value_parser = parse_finite)]
	pub event_type_count: f64,

	/// Distinct products viewed (UI range 0-6)
	#[arg(short = 'p', long = "unique-products", default_value_t = 1.0, value_parser = parse_finite)]
	pub unique_products: f64,

	/// Distinct brands viewed (UI range 0-4)
	#[arg(short = 'b', long = "unique-brands", default_value_t = 1.0, value_parser = parse_finite)]
	pub unique_brands: f64,

	/// Average spend (UI range 0-1000)
	#[arg(short = 's', long = "average-spend", default_value_t = 100.0, value_parser = parse_finite)]
	pub average_spend: f64,
}

/// Category, sub-category and brand selection ("All" means unset)
#[derive(Args, Debug, Clone)]
pub struct FilterArgs {
	/// Main category filter
	#[arg(short = 'm', long = "main-category", value_name = "NAME")]
	pub main_category: Option<String>,

	/// Sub-category filter
	#[arg(long = "sub-category", value_name = "NAME")]
	pub sub_category: Option<String>,

	/// Brand filter
	#[arg(long = "brand", value_name = "NAME")]
	pub brand: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
	/// Assign a simulated user to a cluster and recommend products
	Assign {
		#[command(flatten)]
		features: FeatureArgs,

		#[command(flatten)]
		filters: FilterArgs,

		/// Number of recommendations
		#[arg(short = 'n', long = "top", default_value_t = DEFAULT_TOP_N)]
		top: usize,

		/// Number of flat clusters to cut the dendrogram into
		#[arg(short = 'k', long = "clusters", default_value_t = DEFAULT_CLUSTERS)]
		clusters: usize,

		/// JSON file with cluster interpretations, e.g. {"0": "Browsers"}
		#[arg(long = "labels", value_name = "PATH")]
		labels: Option<PathBuf>,

		/// Write the result as JSON to a file, or '-' for stdout
		#[arg(long = "export", value_name = "PATH")]
		export: Option<PathBuf>,
	},

	/// List filter choices for the current selection
	Options {
		#[command(flatten)]
		filters: FilterArgs,

		/// Write the options as JSON to a file, or '-' for stdout
		#[arg(long = "export", value_name = "PATH")]
		export: Option<PathBuf>,
	},

	/// Aggregate the interaction log into the index cache
	Index {
		/// Rebuild even if the cache is fresh
		#[arg(short = 'f', long = "force")]
		force: bool,
	},

	/// Show help for a subcommand
	Help {
		/// Subcommand name
		subcommand: Option<String>,
	},
}

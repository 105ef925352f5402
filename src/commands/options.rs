//! Options command - cascading filter choices

use std::path::Path;

use anyhow::{Context, Result};
use colored::*;

use crate::cli::FilterArgs;
use crate::config::{self, ALL_SENTINEL};
use crate::processing::{FilterOptions, Filters};
use crate::storage::index;
use crate::ui;

pub fn run(filter_args: &FilterArgs, export: Option<&Path>) -> Result<()> {
	let filters = Filters::from_selection(
		filter_args.main_category.as_deref(),
		filter_args.sub_category.as_deref(),
		filter_args.brand.as_deref(),
	);

	let log_path = config::interaction_log_path();
	let index = index::shared(&log_path, &config::index_cache_path())
		.with_context(|| format!("Failed to load recommendation index from {}", log_path.display()))?;

	let options = FilterOptions::resolve(index, &filters);

	if let Some(export_path) = export {
		return super::assign::write_export(&options, export_path);
	}

	print_level("Main Category", &options.main_categories, filters.main_category.as_deref());
	print_level("Sub Category", &options.sub_categories, filters.sub_category.as_deref());
	print_level("Brand", &options.brands, filters.brand.as_deref());

	for value in options.unknown_selections(&filters) {
		ui::warn(&format!("'{}' is not offered for the current selection", value));
	}

	Ok(())
}

fn print_level(title: &str, values: &[String], selected: Option<&str>) {
	ui::header(&format!("{} ({})", title, values.len()));

	let all = format!("{} {}", if selected.is_none() { "▸" } else { " " }, ALL_SENTINEL);
	println!("  {}", all.dimmed());

	for value in values {
		if Some(value.as_str()) == selected {
			println!("  {} {}", "▸".bright_green().bold(), value.bright_white());
		} else {
			println!("    {}", value);
		}
	}
}

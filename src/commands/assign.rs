//! Assign command - cluster a simulated user and show recommendations

use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};
use colored::*;
use serde::Serialize;

use crate::cli::{FeatureArgs, FilterArgs};
use crate::config;
use crate::core::{FeatureVector, Interpretations, RecommendationRecord};
use crate::processing::{assign_detailed, recommend, FilterOptions, Filters};
use crate::storage::{index, population, scaler};
use crate::ui;

#[derive(Debug, Serialize)]
struct AssignExport<'a> {
	timestamp: String,
	features: FeatureVector,
	cluster: usize,
	interpretation: &'a str,
	cluster_size: usize,
	total_points: usize,
	filters: &'a Filters,
	recommendations: Vec<&'a RecommendationRecord>,
}

impl From<FeatureArgs> for FeatureVector {
	fn from(args: FeatureArgs) -> Self {
		FeatureVector::new([
			args.activity_frequency,
			args.category_count,
			args.event_type_count,
			args.unique_products,
			args.unique_brands,
			args.average_spend,
		])
	}
}

pub fn run(
	features: FeatureArgs,
	filter_args: &FilterArgs,
	top: usize,
	clusters: usize,
	labels: Option<&Path>,
	export: Option<&Path>,
) -> Result<()> {
	let start = Instant::now();
	let new_user = FeatureVector::from(features);
	new_user.validate()?;

	let filters = Filters::from_selection(
		filter_args.main_category.as_deref(),
		filter_args.sub_category.as_deref(),
		filter_args.brand.as_deref(),
	);

	let interpretations = match labels {
		Some(path) => load_interpretations(path)?,
		None => Interpretations::default(),
	};

	let scaler_path = config::scaler_path();
	let scaling = scaler::load(&scaler_path)
		.with_context(|| format!("Failed to load scaling parameters from {}", scaler_path.display()))?;

	let population_path = config::population_path();
	let population = population::shared(&population_path)
		.with_context(|| format!("Failed to load reference population from {}", population_path.display()))?;

	let log_path = config::interaction_log_path();
	let index = index::shared(&log_path, &config::index_cache_path())
		.with_context(|| format!("Failed to load recommendation index from {}", log_path.display()))?;

	ui::debug(&format!(
		"Loaded {} reference users and {} index records",
		population.len(),
		index.len()
	));

	let assignment = assign_detailed(&new_user, population.vectors(), &scaling, clusters)?;
	let interpretation = interpretations.describe(assignment.label);
	let recommendations = recommend(assignment.label, index, &filters, top);

	if let Some(export_path) = export {
		let export_data = AssignExport {
			timestamp: chrono::Utc::now().to_rfc3339(),
			features: new_user,
			cluster: assignment.label.value(),
			interpretation,
			cluster_size: assignment.cluster_size,
			total_points: assignment.total_points,
			filters: &filters,
			recommendations,
		};
		return write_export(&export_data, export_path);
	}

	let options = FilterOptions::resolve(index, &filters);
	for value in options.unknown_selections(&filters) {
		ui::warn(&format!("'{}' is not offered for the current selection", value));
	}

	ui::success(&format!("Assigned to Cluster {}", assignment.label.to_string().bright_cyan()));
	ui::info(&format!("Interpretation: {}", interpretation));
	ui::debug(&format!(
		"Cluster holds {} of {} points",
		assignment.cluster_size, assignment.total_points
	));

	if recommendations.is_empty() {
		ui::warn("No products found matching your selection and cluster.");
	} else {
		ui::header(&format!("Top {} Recommended Products", recommendations.len()));
		print_recommendations(&recommendations);
	}

	eprintln!(
		"\n{}",
		format!("Completed in {:.1}s", start.elapsed().as_secs_f32()).dimmed()
	);

	Ok(())
}

fn load_interpretations(path: &Path) -> Result<Interpretations> {
	let json = std::fs::read_to_string(path)
		.with_context(|| format!("Failed to read cluster labels from {}", path.display()))?;
	serde_json::from_str(&json).context("Failed to parse cluster labels")
}

fn print_recommendations(records: &[&RecommendationRecord]) {
	let heading = format!(
		"{:>4}  {:<14} {:<18} {:<18} {:<16} {:>10}",
		"#", "Product ID", "Main Category", "Sub Category", "Brand", "Popularity"
	);
	println!("{}", heading.bright_white());

	for (i, record) in records.iter().enumerate() {
		println!(
			"{}  {:<14} {:<18} {:<18} {} {:>10}",
			format!("{:>4}", i + 1).bright_blue().bold(),
			record.product_id,
			record.main_category,
			record.sub_category,
			format!("{:<16}", record.brand).yellow(),
			record.popularity
		);
	}
}

pub(crate) fn write_export<T: Serialize>(data: &T, export_path: &Path) -> Result<()> {
	let json = serde_json::to_string_pretty(data)?;

	if export_path.to_str() == Some("-") || export_path.as_os_str().is_empty() {
		println!("{}", json);
	} else {
		std::fs::write(export_path, json)
			.with_context(|| format!("Failed to write {}", export_path.display()))?;
		ui::success(&format!("Exported to {}", export_path.display()));
	}

	Ok(())
}

//! Reference population table
//!
//! Loaded from a CSV with (at least) the six feature columns. Other columns
//! such as user ids are ignored. Row order is kept.

use std::io::Read;
use std::path::Path;
use std::sync::OnceLock;

use serde::Deserialize;

use crate::config::FEATURES;
use crate::core::{CohortError, FeatureVector, Result};
use crate::ui;

static SHARED: OnceLock<ReferencePopulation> = OnceLock::new();

#[derive(Debug, Deserialize)]
struct PopulationRow {
	activity_frequency: Option<f64>,
	category_count: Option<f64>,
	event_type_count: Option<f64>,
	unique_products: Option<f64>,
	unique_brands: Option<f64>,
	average_spend: Option<f64>,
}

impl PopulationRow {
	fn into_vector(self, row: usize) -> Result<FeatureVector> {
		let named = [
			("activity_frequency", self.activity_frequency),
			("category_count", self.category_count),
			("event_type_count", self.event_type_count),
			("unique_products", self.unique_products),
			("unique_brands", self.unique_brands),
			("average_spend", self.average_spend),
		];

		let mut pairs = Vec::with_capacity(named.len());
		for (name, value) in named {
			let value = value.ok_or_else(|| {
				CohortError::InvalidInput(format!("reference row {}: missing '{}'", row, name))
			})?;
			pairs.push((name, value));
		}

		FeatureVector::from_named(pairs)
			.map_err(|e| CohortError::InvalidInput(format!("reference row {}: {}", row, e)))
	}
}

/// Existing users' raw feature vectors, immutable after load
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReferencePopulation {
	vectors: Vec<FeatureVector>,
}

impl ReferencePopulation {
	pub fn new(vectors: Vec<FeatureVector>) -> Self {
		Self { vectors }
	}

	pub fn vectors(&self) -> &[FeatureVector] {
		&self.vectors
	}

	pub fn len(&self) -> usize {
		self.vectors.len()
	}

	pub fn is_empty(&self) -> bool {
		self.vectors.is_empty()
	}
}

/// Parse a population table from any CSV source
pub fn from_reader<R: Read>(reader: R) -> Result<ReferencePopulation> {
	let mut csv = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
	super::require_columns(csv.headers()?, &FEATURES)?;

	let mut vectors = Vec::new();

	for (idx, row) in csv.deserialize::<PopulationRow>().enumerate() {
		// 1-based data row, header excluded
		vectors.push(row?.into_vector(idx + 1)?);
	}

	Ok(ReferencePopulation::new(vectors))
}

/// Load the population table from disk
pub fn load(path: &Path) -> Result<ReferencePopulation> {
	let file = std::fs::File::open(path)?;
	let population = from_reader(std::io::BufReader::new(file))?;
	ui::debug(&format!("Loaded {} reference users from {}", population.len(), path.display()));
	Ok(population)
}

/// Process-wide population, loaded from `path` on first access
///
/// Later calls return the first snapshot regardless of `path`.
pub fn shared(path: &Path) -> Result<&'static ReferencePopulation> {
	if let Some(population) = SHARED.get() {
		return Ok(population);
	}
	let loaded = load(path)?;
	Ok(SHARED.get_or_init(|| loaded))
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn reads_rows_in_order_and_ignores_extra_columns() {
		let data = "user_id,activity_frequency,category_count,event_type_count,unique_products,unique_brands,average_spend,final_cluster\n\
			u1,1,1,1,1,1,10.5,0\n\
			u2,5,2,2,6,4,900,2\n";
		let population = from_reader(data.as_bytes()).unwrap();

		assert_eq!(population.len(), 2);
		assert_eq!(population.vectors()[0].average_spend, 10.5);
		assert_eq!(population.vectors()[1].values(), [5.0, 2.0, 2.0, 6.0, 4.0, 900.0]);
	}

	#[test]
	fn missing_value_names_row_and_feature() {
		let data = "activity_frequency,category_count,event_type_count,unique_products,unique_brands,average_spend\n\
			1,1,1,1,1,10\n\
			2,1,1,,1,20\n";
		let err = from_reader(data.as_bytes()).unwrap_err();
		let msg = err.to_string();
		assert!(msg.contains("row 2"), "{}", msg);
		assert!(msg.contains("unique_products"), "{}", msg);
	}

	#[test]
	fn missing_column_is_reported() {
		let data = "activity_frequency,category_count\n1,1\n";
		let err = from_reader(data.as_bytes()).unwrap_err();
		assert!(matches!(err, CohortError::MissingColumn(ref c) if c == "event_type_count"));
	}

	#[test]
	fn header_only_is_empty_population() {
		let data = "activity_frequency,category_count,event_type_count,unique_products,unique_brands,average_spend\n";
		assert!(from_reader(data.as_bytes()).unwrap().is_empty());
	}
}

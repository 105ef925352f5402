//! Reference data loading and caching

pub mod index;
pub mod population;
pub mod scaler;

pub use index::{IndexCache, IndexStats};
pub use population::ReferencePopulation;

use crate::core::{CohortError, Result};

/// Fail with the first required column absent from `headers`
fn require_columns(headers: &csv::StringRecord, required: &[&str]) -> Result<()> {
	for column in required {
		if !headers.iter().any(|h| h.trim() == *column) {
			return Err(CohortError::MissingColumn(column.to_string()));
		}
	}
	Ok(())
}

//! Behavioral feature vectors

use serde::{Deserialize, Serialize};

use super::error::{CohortError, Result};
use crate::config::{FEATURES, FEATURE_COUNT};

/// One user's six behavioral features, in canonical column order
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector {
	pub activity_frequency: f64,
	pub category_count: f64,
	pub event_type_count: f64,
	pub unique_products: f64,
	pub unique_brands: f64,
	pub average_spend: f64,
}

impl FeatureVector {
	pub fn new(values: [f64; FEATURE_COUNT]) -> Self {
		let [activity_frequency, category_count, event_type_count, unique_products, unique_brands, average_spend] =
			values;
		Self {
			activity_frequency,
			category_count,
			event_type_count,
			unique_products,
			unique_brands,
			average_spend,
		}
	}

	/// Build from `(name, value)` pairs, rejecting unknown, duplicate or missing features
	pub fn from_named<'a, I>(pairs: I) -> Result<Self>
	where
		I: IntoIterator<Item = (&'a str, f64)>,
	{
		let mut slots: [Option<f64>; FEATURE_COUNT] = [None; FEATURE_COUNT];

		for (name, value) in pairs {
			let idx = feature_index(name)
				.ok_or_else(|| CohortError::InvalidInput(format!("unknown feature '{}'", name)))?;
			if slots[idx].replace(value).is_some() {
				return Err(CohortError::InvalidInput(format!("feature '{}' given twice", name)));
			}
		}

		let mut values = [0.0; FEATURE_COUNT];
		for (idx, slot) in slots.iter().enumerate() {
			values[idx] = slot
				.ok_or_else(|| CohortError::InvalidInput(format!("missing feature '{}'", FEATURES[idx])))?;
		}

		let vector = Self::new(values);
		vector.validate()?;
		Ok(vector)
	}

	/// Values in canonical order
	pub fn values(&self) -> [f64; FEATURE_COUNT] {
		[
			self.activity_frequency,
			self.category_count,
			self.event_type_count,
			self.unique_products,
			self.unique_brands,
			self.average_spend,
		]
	}

	/// Every feature must be a finite real number; no other bounds apply
	pub fn validate(&self) -> Result<()> {
		for (name, value) in FEATURES.iter().zip(self.values()) {
			if !value.is_finite() {
				return Err(CohortError::InvalidInput(format!(
					"feature '{}' must be finite, got {}",
					name, value
				)));
			}
		}
		Ok(())
	}
}

pub fn feature_index(name: &str) -> Option<usize> {
	FEATURES.iter().position(|f| *f == name)
}

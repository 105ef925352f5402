//! Externally fitted per-feature standardization

use ndarray::{Array1, Array2};
use serde::{Deserialize, Serialize};

use super::error::{CohortError, Result};
use super::features::FeatureVector;
use crate::config::{FEATURES, FEATURE_COUNT};

/// Per-feature `(mean, scale)` pairs, applied as `(raw - mean) / scale`
///
/// These come from a scaler fitted elsewhere and are never refit here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScalingParameters {
	mean: [f64; FEATURE_COUNT],
	scale: [f64; FEATURE_COUNT],
}

impl ScalingParameters {
	pub fn new(mean: [f64; FEATURE_COUNT], scale: [f64; FEATURE_COUNT]) -> Result<Self> {
		for (idx, name) in FEATURES.iter().enumerate() {
			if !mean[idx].is_finite() {
				return Err(CohortError::InvalidScaling(format!("mean of '{}' is not finite", name)));
			}
			if !scale[idx].is_finite() || scale[idx] == 0.0 {
				return Err(CohortError::InvalidScaling(format!(
					"scale of '{}' must be finite and non-zero, got {}",
					name, scale[idx]
				)));
			}
		}
		Ok(Self { mean, scale })
	}

	/// Identity transform (mean 0, scale 1)
	pub fn identity() -> Self {
		Self {
			mean: [0.0; FEATURE_COUNT],
			scale: [1.0; FEATURE_COUNT],
		}
	}

	pub fn mean(&self) -> &[f64; FEATURE_COUNT] {
		&self.mean
	}

	pub fn scale(&self) -> &[f64; FEATURE_COUNT] {
		&self.scale
	}

	/// Scale a single vector
	pub fn apply(&self, vector: &FeatureVector) -> [f64; FEATURE_COUNT] {
		let mut out = vector.values();
		for (i, v) in out.iter_mut().enumerate() {
			*v = (*v - self.mean[i]) / self.scale[i];
		}
		out
	}

	/// Scale a whole combined set at once into an `n x 6` matrix
	pub fn transform<'a, I>(&self, vectors: I) -> Array2<f64>
	where
		I: IntoIterator<Item = &'a FeatureVector>,
	{
		let flat: Vec<f64> = vectors.into_iter().flat_map(|v| v.values()).collect();
		let rows = flat.len() / FEATURE_COUNT;
		let raw = Array2::from_shape_vec((rows, FEATURE_COUNT), flat)
			.unwrap_or_else(|_| Array2::zeros((0, FEATURE_COUNT)));

		let mean = Array1::from(self.mean.to_vec());
		let scale = Array1::from(self.scale.to_vec());
		(&raw - &mean) / &scale
	}
}

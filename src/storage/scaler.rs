//! Scaling parameter file format and I/O
//!
//! The scaler is fitted elsewhere and exported as JSON:
//! `{"features": [...], "mean": [...], "scale": [...]}`. The sklearn attribute
//! names `feature_names_in_`, `mean_` and `scale_` are accepted as well.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::config::{FEATURES, FEATURE_COUNT};
use crate::core::features::feature_index;
use crate::core::{CohortError, Result, ScalingParameters};

#[derive(Debug, Serialize, Deserialize)]
struct ScalerFile {
	#[serde(default, alias = "feature_names_in_", skip_serializing_if = "Option::is_none")]
	features: Option<Vec<String>>,
	#[serde(alias = "mean_")]
	mean: Vec<f64>,
	#[serde(alias = "scale_")]
	scale: Vec<f64>,
}

/// Parse scaling parameters, reordering columns when feature names are given
pub fn parse(json: &str) -> Result<ScalingParameters> {
	let file: ScalerFile = serde_json::from_str(json)?;

	if file.mean.len() != FEATURE_COUNT || file.scale.len() != FEATURE_COUNT {
		return Err(CohortError::InvalidScaling(format!(
			"expected {} means and scales, got {} and {}",
			FEATURE_COUNT,
			file.mean.len(),
			file.scale.len()
		)));
	}

	let order: Vec<usize> = match &file.features {
		None => (0..FEATURE_COUNT).collect(),
		Some(names) => {
			if names.len() != FEATURE_COUNT {
				return Err(CohortError::InvalidScaling(format!(
					"expected {} feature names, got {}",
					FEATURE_COUNT,
					names.len()
				)));
			}
			let mut seen = [false; FEATURE_COUNT];
			let mut order = Vec::with_capacity(FEATURE_COUNT);
			for name in names {
				let idx = feature_index(name)
					.ok_or_else(|| CohortError::InvalidScaling(format!("unknown feature '{}'", name)))?;
				if std::mem::replace(&mut seen[idx], true) {
					return Err(CohortError::InvalidScaling(format!("feature '{}' listed twice", name)));
				}
				order.push(idx);
			}
			order
		}
	};

	let mut mean = [0.0; FEATURE_COUNT];
	let mut scale = [1.0; FEATURE_COUNT];
	for (column, &idx) in order.iter().enumerate() {
		mean[idx] = file.mean[column];
		scale[idx] = file.scale[column];
	}

	ScalingParameters::new(mean, scale)
}

/// Load scaling parameters from disk
pub fn load(path: &Path) -> Result<ScalingParameters> {
	let json = fs::read_to_string(path)?;
	parse(&json)
}

/// Save scaling parameters in canonical feature order
pub fn save(params: &ScalingParameters, path: &Path) -> Result<()> {
	let file = ScalerFile {
		features: Some(FEATURES.iter().map(|f| f.to_string()).collect()),
		mean: params.mean().to_vec(),
		scale: params.scale().to_vec(),
	};
	if let Some(parent) = path.parent() {
		if !parent.as_os_str().is_empty() {
			fs::create_dir_all(parent)?;
		}
	}
	fs::write(path, serde_json::to_string_pretty(&file)?)?;
	Ok(())
}

//! Cluster assignment for a single new user
//!
//! The new vector is appended to the reference population, the combined set is
//! scaled with the externally fitted parameters, re-clustered from scratch, and
//! the label of the last row is returned.

use std::time::Instant;

use crate::core::{ClusterLabel, CohortError, FeatureVector, Result, ScalingParameters};
use crate::processing::linkage::Dendrogram;
use crate::ui;

/// Outcome of one assignment run
#[derive(Debug, Clone, PartialEq)]
pub struct Assignment {
	pub label: ClusterLabel,
	/// Members of the new user's cluster, the new user included
	pub cluster_size: usize,
	/// Rows that were clustered (population + 1)
	pub total_points: usize,
}

/// Assign `new_vector` to one of `k` clusters formed over `population + [new_vector]`
pub fn assign(
	new_vector: &FeatureVector,
	population: &[FeatureVector],
	scaling: &ScalingParameters,
	k: usize,
) -> Result<ClusterLabel> {
	assign_detailed(new_vector, population, scaling, k).map(|a| a.label)
}

pub fn assign_detailed(
	new_vector: &FeatureVector,
	population: &[FeatureVector],
	scaling: &ScalingParameters,
	k: usize,
) -> Result<Assignment> {
	new_vector.validate()?;

	if population.is_empty() {
		return Err(CohortError::InsufficientData("reference population is empty".to_string()));
	}

	let total_points = population.len() + 1;
	if k == 0 || k > total_points {
		return Err(CohortError::InsufficientData(format!(
			"cannot form {} clusters from {} points",
			k, total_points
		)));
	}

	let start = Instant::now();
	let scaled = scaling.transform(population.iter().chain(std::iter::once(new_vector)));
	let labels = Dendrogram::fit(&scaled).cut(k);
	ui::debug(&format!(
		"Clustered {} points into {} clusters in {}ms",
		total_points,
		k,
		start.elapsed().as_millis()
	));

	// One label per row, and there is always at least the new row
	debug_assert_eq!(labels.len(), total_points);
	let Some(&own) = labels.last() else {
		return Err(CohortError::InsufficientData("clustering produced no labels".to_string()));
	};
	let cluster_size = labels.iter().filter(|&&l| l == own).count();

	Ok(Assignment {
		label: ClusterLabel(own),
		cluster_size,
		total_points,
	})
}

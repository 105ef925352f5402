//! View-popularity aggregates per cluster

use serde::{Deserialize, Serialize};

use super::label::ClusterLabel;

/// One `(cluster, category, sub-category, brand, product)` group and its view count
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecommendationRecord {
	pub cluster: ClusterLabel,
	pub main_category: String,
	pub sub_category: String,
	pub brand: String,
	pub product_id: String,
	pub popularity: u64,
}

/// Immutable, ordered table of recommendation records
///
/// Record order is the tie-breaking order for equal popularity.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecommendationIndex {
	records: Vec<RecommendationRecord>,
}

impl RecommendationIndex {
	pub fn new(records: Vec<RecommendationRecord>) -> Self {
		Self { records }
	}

	pub fn records(&self) -> &[RecommendationRecord] {
		&self.records
	}

	pub fn len(&self) -> usize {
		self.records.len()
	}

	pub fn is_empty(&self) -> bool {
		self.records.is_empty()
	}

	/// Distinct cluster labels present, ascending
	pub fn clusters(&self) -> Vec<ClusterLabel> {
		let mut labels: Vec<ClusterLabel> = self.records.iter().map(|r| r.cluster).collect();
		labels.sort();
		labels.dedup();
		labels
	}

	/// Total view events represented by the index
	pub fn total_views(&self) -> u64 {
		self.records.iter().map(|r| r.popularity).sum()
	}
}

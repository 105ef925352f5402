//! Cluster labels and their human-readable interpretations

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::config::UNKNOWN_CLUSTER;

/// Flat cluster id produced by one clustering run
///
/// Ids are opaque per run: they come from the shape of the merge tree, so the
/// same archetype is not guaranteed to keep the same number when the combined
/// set changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClusterLabel(pub usize);

impl ClusterLabel {
	pub fn value(&self) -> usize {
		self.0
	}
}

impl std::fmt::Display for ClusterLabel {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", self.0)
	}
}

/// Externally authored label descriptions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Interpretations(BTreeMap<usize, String>);

impl Default for Interpretations {
	fn default() -> Self {
		let mut map = BTreeMap::new();
		map.insert(0, "💼 Cluster 0 – Occasional Explorers".to_string());
		map.insert(1, "🛒 Cluster 1 – Frequent Shoppers".to_string());
		map.insert(2, "💳 Cluster 2 – High Spenders".to_string());
		Self(map)
	}
}

impl Interpretations {
	pub fn new(map: BTreeMap<usize, String>) -> Self {
		Self(map)
	}

	/// Description for `label`, or "Unknown Cluster" when unmapped
	pub fn describe(&self, label: ClusterLabel) -> &str {
		self.0.get(&label.0).map(String::as_str).unwrap_or(UNKNOWN_CLUSTER)
	}

	pub fn len(&self) -> usize {
		self.0.len()
	}

	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}
}

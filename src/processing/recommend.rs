//! Recommendation selection and cascading filter options

use std::collections::BTreeSet;

use serde::Serialize;

use crate::config::ALL_SENTINEL;
use crate::core::{ClusterLabel, RecommendationIndex, RecommendationRecord};

/// Optional exact-match filters; `None` passes every record through
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Filters {
	pub main_category: Option<String>,
	pub sub_category: Option<String>,
	pub brand: Option<String>,
}

impl Filters {
	/// Build from raw selections, treating empty values and "All" as unset
	pub fn from_selection(main_category: Option<&str>, sub_category: Option<&str>, brand: Option<&str>) -> Self {
		Self {
			main_category: selection(main_category),
			sub_category: selection(sub_category),
			brand: selection(brand),
		}
	}

	pub fn is_empty(&self) -> bool {
		self.main_category.is_none() && self.sub_category.is_none() && self.brand.is_none()
	}

	pub fn matches(&self, record: &RecommendationRecord) -> bool {
		matches_opt(&self.main_category, &record.main_category)
			&& matches_opt(&self.sub_category, &record.sub_category)
			&& matches_opt(&self.brand, &record.brand)
	}
}

fn selection(value: Option<&str>) -> Option<String> {
	let value = value?.trim();
	if value.is_empty() || value.eq_ignore_ascii_case(ALL_SENTINEL) {
		None
	} else {
		Some(value.to_string())
	}
}

fn matches_opt(filter: &Option<String>, value: &str) -> bool {
	filter.as_deref().map_or(true, |f| f == value)
}

/// Top `top_n` records for `cluster`, most viewed first
///
/// Equal counts keep their index order. An empty result is a normal outcome.
pub fn recommend<'a>(
	cluster: ClusterLabel,
	index: &'a RecommendationIndex,
	filters: &Filters,
	top_n: usize,
) -> Vec<&'a RecommendationRecord> {
	let mut candidates: Vec<&RecommendationRecord> = index
		.records()
		.iter()
		.filter(|r| r.cluster == cluster && filters.matches(r))
		.collect();

	// sort_by is stable
	candidates.sort_by(|a, b| b.popularity.cmp(&a.popularity));
	candidates.truncate(top_n);
	candidates
}

/// Distinct main categories across the whole index
pub fn main_categories(index: &RecommendationIndex) -> Vec<String> {
	distinct(index, |_| true, |r| &r.main_category)
}

/// Sub-categories, restricted to `main_category` when set
pub fn sub_categories(index: &RecommendationIndex, main_category: Option<&str>) -> Vec<String> {
	let main = selection(main_category);
	distinct(index, |r| matches_opt(&main, &r.main_category), |r| &r.sub_category)
}

/// Brands, restricted by the selected main and sub category
pub fn brands(index: &RecommendationIndex, main_category: Option<&str>, sub_category: Option<&str>) -> Vec<String> {
	let main = selection(main_category);
	let sub = selection(sub_category);
	distinct(
		index,
		|r| matches_opt(&main, &r.main_category) && matches_opt(&sub, &r.sub_category),
		|r| &r.brand,
	)
}

fn distinct<P, F>(index: &RecommendationIndex, keep: P, field: F) -> Vec<String>
where
	P: Fn(&RecommendationRecord) -> bool,
	F: Fn(&RecommendationRecord) -> &String,
{
	index
		.records()
		.iter()
		.filter(|r| keep(r))
		.map(field)
		.filter(|v| !v.is_empty())
		.cloned()
		.collect::<BTreeSet<String>>()
		.into_iter()
		.collect()
}

/// Every option list for the current selection
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilterOptions {
	pub main_categories: Vec<String>,
	pub sub_categories: Vec<String>,
	pub brands: Vec<String>,
}

impl FilterOptions {
	pub fn resolve(index: &RecommendationIndex, filters: &Filters) -> Self {
		let main = filters.main_category.as_deref();
		let sub = filters.sub_category.as_deref();
		Self {
			main_categories: main_categories(index),
			sub_categories: sub_categories(index, main),
			brands: brands(index, main, sub),
		}
	}

	/// Selections that are not offered by the index
	pub fn unknown_selections<'a>(&self, filters: &'a Filters) -> Vec<&'a str> {
		let mut unknown = Vec::new();
		let checks = [
			(&filters.main_category, &self.main_categories),
			(&filters.sub_category, &self.sub_categories),
			(&filters.brand, &self.brands),
		];
		for (selected, offered) in checks {
			if let Some(value) = selected.as_deref() {
				if !offered.iter().any(|o| o == value) {
					unknown.push(value);
				}
			}
		}
		unknown
	}
}

// Shared fixtures for integration tests

#![allow(dead_code)]

use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use cohort::config::{FEATURES, FEATURE_COUNT};
use cohort::core::{FeatureVector, ScalingParameters};

/// 50 reference users in three well separated archetypes, in this row order:
/// 20 occasional explorers, 15 frequent shoppers, 15 high spenders.
/// Average spend spans 10 to 900. Spenders are the tightest group and explorers
/// the loosest, which numbers the three clusters 0, 1, 2 in archetype order.
pub fn reference_population() -> Vec<FeatureVector> {
	let mut rows = Vec::with_capacity(50);

	for i in 0..20 {
		rows.push(FeatureVector::new([1.0, 1.0, 1.0, 1.0 + (i % 2) as f64, 1.0, 10.0 + 2.0 * i as f64]));
	}
	for i in 0..15 {
		rows.push(FeatureVector::new([4.0, 2.0, 2.0, 4.0, 2.0, 200.0 + 10.0 * i as f64]));
	}
	for i in 0..15 {
		rows.push(FeatureVector::new([5.0, 2.0, 2.0, 6.0, 4.0, 850.0 + 50.0 * i as f64 / 14.0]));
	}

	rows
}

/// Standard scaler fitted on `population` (population std, like sklearn)
pub fn fitted_scaler(population: &[FeatureVector]) -> ScalingParameters {
	let n = population.len() as f64;
	let mut mean = [0.0; FEATURE_COUNT];
	let mut scale = [0.0; FEATURE_COUNT];

	for v in population {
		for (m, x) in mean.iter_mut().zip(v.values()) {
			*m += x / n;
		}
	}
	for v in population {
		for (i, x) in v.values().iter().enumerate() {
			scale[i] += (x - mean[i]).powi(2) / n;
		}
	}
	for s in scale.iter_mut() {
		*s = if *s > 0.0 { s.sqrt() } else { 1.0 };
	}

	ScalingParameters::new(mean, scale).unwrap()
}

/// Same users, archetypes interleaved with spenders first
pub fn interleaved_population() -> Vec<FeatureVector> {
	let rows = reference_population();
	let (explorers, rest) = rows.split_at(20);
	let (shoppers, spenders) = rest.split_at(15);

	let mut out = Vec::with_capacity(rows.len());
	for i in 0..explorers.len() {
		for group in [spenders, shoppers, explorers] {
			if let Some(v) = group.get(i) {
				out.push(*v);
			}
		}
	}
	out
}

pub fn high_engagement() -> FeatureVector {
	FeatureVector::new([5.0, 2.0, 2.0, 6.0, 4.0, 900.0])
}

pub fn population_csv(population: &[FeatureVector]) -> String {
	let mut out = format!("user_id,{}\n", FEATURES.join(","));
	for (i, v) in population.iter().enumerate() {
		let values: Vec<String> = v.values().iter().map(|x| x.to_string()).collect();
		let _ = writeln!(out, "u{},{}", i, values.join(","));
	}
	out
}

/// Interaction log with view counts per cluster, plus noise rows that must be ignored
pub fn interaction_log_csv() -> String {
	let mut out = String::from("event_time,event_type,product_id,category_code,brand,price,user_id,final_cluster,main_category,sub_category\n");
	let mut push = |event: &str, product: &str, brand: &str, cluster: &str, main: &str, sub: &str, times: usize| {
		for t in 0..times {
			let _ = writeln!(out, "2019-10-01 00:00:{:02},{},{},x,{},1.0,u1,{},{},{}", t, event, product, brand, cluster, main, sub);
		}
	};

	push("view", "1001", "apple", "2", "electronics", "smartphone", 7);
	push("view", "1002", "samsung", "2", "electronics", "smartphone", 4);
	push("view", "1003", "sony", "2", "electronics", "audio", 4);
	push("view", "1004", "bosch", "2", "appliances", "kitchen", 2);
	push("view", "1005", "lenovo", "2", "computers", "notebook", 1);
	push("view", "1006", "acer", "2", "computers", "notebook", 1);
	push("purchase", "1006", "acer", "2", "computers", "notebook", 9);
	push("view", "2001", "xiaomi", "1", "electronics", "smartphone", 3);
	push("view", "3001", "ikea", "0", "furniture", "bedroom", 2);

	out
}

/// Write scaler, population and interaction log into `dir`
pub fn write_data_dir(dir: &Path) {
	let population = reference_population();
	cohort::storage::scaler::save(&fitted_scaler(&population), &dir.join("scaler.json")).unwrap();
	fs::write(dir.join("user_features.csv"), population_csv(&population)).unwrap();
	fs::write(dir.join("merged_data.csv"), interaction_log_csv()).unwrap();
}

// Loading reference data from disk

mod common;

use std::fs;

use cohort::core::{CohortError, ScalingParameters};
use cohort::storage::index::{self, IndexCache};
use cohort::storage::{population, scaler};

use common::{fitted_scaler, interaction_log_csv, population_csv, reference_population, write_data_dir};

#[test]
fn test_scaler_round_trips_through_json() {
	let dir = tempfile::tempdir().unwrap();
	let path = dir.path().join("nested").join("scaler.json");
	let params = fitted_scaler(&reference_population());

	scaler::save(&params, &path).unwrap();
	let loaded: ScalingParameters = scaler::load(&path).unwrap();
	for (a, b) in loaded.mean().iter().chain(loaded.scale()).zip(params.mean().iter().chain(params.scale())) {
		assert!((a - b).abs() <= 1e-9 * b.abs().max(1.0));
	}
}

#[test]
fn test_missing_scaler_is_io_error() {
	let dir = tempfile::tempdir().unwrap();
	let err = scaler::load(&dir.path().join("absent.json")).unwrap_err();
	assert!(matches!(err, CohortError::Io(_)));
}

#[test]
fn test_population_file_keeps_row_order() {
	let dir = tempfile::tempdir().unwrap();
	let path = dir.path().join("user_features.csv");
	let expected = reference_population();
	fs::write(&path, population_csv(&expected)).unwrap();

	let loaded = population::load(&path).unwrap();
	assert_eq!(loaded.vectors(), expected.as_slice());
}

#[test]
fn test_shared_population_is_loaded_once() {
	let dir = tempfile::tempdir().unwrap();
	write_data_dir(dir.path());

	let first = population::shared(&dir.path().join("user_features.csv")).unwrap();
	// A second call returns the same snapshot without touching the path
	let second = population::shared(&dir.path().join("does-not-exist.csv")).unwrap();

	assert!(std::ptr::eq(first, second));
	assert_eq!(first.len(), 50);
}

#[test]
fn test_index_cache_round_trip() {
	let dir = tempfile::tempdir().unwrap();
	let log_path = dir.path().join("merged_data.csv");
	let cache_path = dir.path().join(".cohort").join("index.msgpack");
	fs::write(&log_path, interaction_log_csv()).unwrap();

	let (built, stats) = index::build(&log_path).unwrap();
	index::save_cache(&IndexCache::new(built.clone(), stats, &log_path), &cache_path).unwrap();

	let cache = index::load_cache(&cache_path).unwrap();
	assert!(cache.is_current_version());
	assert_eq!(cache.index, built);
	assert_eq!(cache.stats, stats);
	assert_eq!(stats.view_events, 24);
}

#[test]
fn test_fresh_cache_serves_without_log() {
	let dir = tempfile::tempdir().unwrap();
	let log_path = dir.path().join("merged_data.csv");
	let cache_path = dir.path().join("index.msgpack");
	fs::write(&log_path, interaction_log_csv()).unwrap();

	let (built, stats) = index::build(&log_path).unwrap();
	index::save_cache(&IndexCache::new(built.clone(), stats, &log_path), &cache_path).unwrap();
	fs::remove_file(&log_path).unwrap();

	assert_eq!(index::load(&log_path, &cache_path).unwrap(), built);
}

#[test]
fn test_corrupt_cache_falls_back_to_log() {
	let dir = tempfile::tempdir().unwrap();
	let log_path = dir.path().join("merged_data.csv");
	let cache_path = dir.path().join("index.msgpack");
	fs::write(&log_path, interaction_log_csv()).unwrap();
	fs::write(&cache_path, b"not msgpack").unwrap();

	let (expected, _) = index::aggregate(interaction_log_csv().as_bytes()).unwrap();
	assert_eq!(index::load(&log_path, &cache_path).unwrap(), expected);
}

#[test]
fn test_missing_log_and_cache_is_an_error() {
	let dir = tempfile::tempdir().unwrap();
	let result = index::load(&dir.path().join("merged_data.csv"), &dir.path().join("index.msgpack"));
	assert!(matches!(result, Err(CohortError::Io(_))));
}

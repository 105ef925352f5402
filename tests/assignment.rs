// End-to-end cluster assignment and recommendation

mod common;

use cohort::core::{ClusterLabel, CohortError, FeatureVector, Interpretations, RecommendationIndex};
use cohort::processing::{assign, assign_detailed, recommend, FilterOptions, Filters};
use cohort::storage::index;

use common::{fitted_scaler, high_engagement, interaction_log_csv, interleaved_population, reference_population};

fn sample_index() -> RecommendationIndex {
	index::aggregate(interaction_log_csv().as_bytes()).unwrap().0
}

#[test]
fn test_high_engagement_lands_with_high_spenders() {
	let population = reference_population();
	let scaler = fitted_scaler(&population);

	let label = assign(&high_engagement(), &population, &scaler, 3).unwrap();

	assert_eq!(label, ClusterLabel(2));
	assert!(Interpretations::default().describe(label).contains("High Spenders"));
}

#[test]
fn test_each_archetype_gets_its_own_label() {
	let population = reference_population();
	let scaler = fitted_scaler(&population);

	let explorer = FeatureVector::new([1.0, 1.0, 1.0, 1.0, 1.0, 20.0]);
	let shopper = FeatureVector::new([4.0, 2.0, 2.0, 4.0, 2.0, 240.0]);

	assert_eq!(assign(&explorer, &population, &scaler, 3).unwrap(), ClusterLabel(0));
	assert_eq!(assign(&shopper, &population, &scaler, 3).unwrap(), ClusterLabel(1));
}

#[test]
fn test_labels_ignore_row_order() {
	let explorer = FeatureVector::new([1.0, 1.0, 1.0, 1.0, 1.0, 20.0]);
	let shopper = FeatureVector::new([4.0, 2.0, 2.0, 4.0, 2.0, 240.0]);

	let mut reversed = reference_population();
	reversed.reverse();

	for population in [reversed, interleaved_population()] {
		let scaler = fitted_scaler(&population);
		assert_eq!(assign(&high_engagement(), &population, &scaler, 3).unwrap(), ClusterLabel(2));
		assert_eq!(assign(&explorer, &population, &scaler, 3).unwrap(), ClusterLabel(0));
		assert_eq!(assign(&shopper, &population, &scaler, 3).unwrap(), ClusterLabel(1));
	}
}

#[test]
fn test_huge_finite_features_are_accepted() {
	let population = reference_population();
	let scaler = fitted_scaler(&population);

	let outlier = FeatureVector::new([1.0, 1.0, 1.0, 1.0, 1.0, 1e200]);
	let result = assign_detailed(&outlier, &population, &scaler, 3).unwrap();
	assert_eq!(result.cluster_size, 1);
	assert_eq!(result.total_points, 51);

	let outlier = FeatureVector::new([1e300, 1.0, 1.0, 1.0, 1.0, 100.0]);
	assert!(assign(&outlier, &population, &scaler, 3).is_ok());
}

#[test]
fn test_assignment_is_deterministic() {
	let population = reference_population();
	let scaler = fitted_scaler(&population);
	let user = FeatureVector::new([3.0, 2.0, 1.0, 3.0, 2.0, 410.0]);

	let first = assign_detailed(&user, &population, &scaler, 3).unwrap();
	let second = assign_detailed(&user, &population, &scaler, 3).unwrap();
	assert_eq!(first, second);
}

#[test]
fn test_population_is_not_mutated() {
	let population = reference_population();
	let before = population.clone();
	let scaler = fitted_scaler(&population);

	assign(&high_engagement(), &population, &scaler, 3).unwrap();
	assert_eq!(population, before);
}

#[test]
fn test_invalid_vector_fails_before_clustering() {
	let population = reference_population();
	let scaler = fitted_scaler(&population);
	let bad = FeatureVector::new([5.0, 2.0, 2.0, 6.0, 4.0, f64::NAN]);

	assert!(matches!(assign(&bad, &population, &scaler, 3), Err(CohortError::InvalidInput(_))));
	// Validation happens before the population is even looked at
	assert!(matches!(assign(&bad, &[], &scaler, 3), Err(CohortError::InvalidInput(_))));
}

#[test]
fn test_missing_feature_is_invalid_input() {
	let pairs = [
		("activity_frequency", 5.0),
		("category_count", 2.0),
		("event_type_count", 2.0),
		("unique_products", 6.0),
		("unique_brands", 4.0),
	];
	assert!(matches!(FeatureVector::from_named(pairs), Err(CohortError::InvalidInput(_))));
}

#[test]
fn test_too_many_clusters_is_insufficient_data() {
	let population = reference_population();
	let scaler = fitted_scaler(&population);

	assert!(assign(&high_engagement(), &population, &scaler, 51).is_ok());
	assert!(matches!(
		assign(&high_engagement(), &population, &scaler, 52),
		Err(CohortError::InsufficientData(_))
	));
}

#[test]
fn test_parallel_assignments_agree() {
	let population = reference_population();
	let scaler = fitted_scaler(&population);

	let labels: Vec<ClusterLabel> = std::thread::scope(|scope| {
		let handles: Vec<_> = (0..4)
			.map(|_| scope.spawn(|| assign(&high_engagement(), &population, &scaler, 3).unwrap()))
			.collect();
		handles.into_iter().map(|h| h.join().unwrap()).collect()
	});

	assert!(labels.iter().all(|&l| l == ClusterLabel(2)));
}

#[test]
fn test_full_cycle_recommendations() {
	let population = reference_population();
	let scaler = fitted_scaler(&population);
	let index = sample_index();

	let label = assign(&high_engagement(), &population, &scaler, 3).unwrap();
	let recs = recommend(label, &index, &Filters::default(), 5);

	let products: Vec<&str> = recs.iter().map(|r| r.product_id.as_str()).collect();
	assert_eq!(products, vec!["1001", "1003", "1002", "1004", "1006"]);
	assert!(recs.iter().all(|r| r.cluster == label));
	assert_eq!(recs[0].popularity, 7);
}

#[test]
fn test_equal_popularity_keeps_index_order() {
	let index = sample_index();

	// sony/audio and samsung/smartphone both have 4 views; index order is audio first
	let filters = Filters::from_selection(Some("electronics"), None, None);
	let recs = recommend(ClusterLabel(2), &index, &filters, 5);
	let products: Vec<&str> = recs.iter().map(|r| r.product_id.as_str()).collect();
	assert_eq!(products, vec!["1001", "1003", "1002"]);

	let filters = Filters::from_selection(Some("computers"), Some("notebook"), None);
	let recs = recommend(ClusterLabel(2), &index, &filters, 5);
	let products: Vec<&str> = recs.iter().map(|r| r.product_id.as_str()).collect();
	assert_eq!(products, vec!["1006", "1005"]);
}

#[test]
fn test_cluster_without_records_is_empty() {
	let index = sample_index();
	assert!(recommend(ClusterLabel(5), &index, &Filters::default(), 5).is_empty());

	let filters = Filters::from_selection(Some("furniture"), None, None);
	assert!(recommend(ClusterLabel(2), &index, &filters, 5).is_empty());
}

#[test]
fn test_filter_options_cascade() {
	let index = sample_index();
	let filters = Filters::from_selection(Some("electronics"), Some("smartphone"), None);
	let options = FilterOptions::resolve(&index, &filters);

	assert_eq!(options.main_categories, vec!["appliances", "computers", "electronics", "furniture"]);
	assert_eq!(options.sub_categories, vec!["audio", "smartphone"]);
	assert_eq!(options.brands, vec!["apple", "samsung", "xiaomi"]);
	assert!(options.unknown_selections(&filters).is_empty());
}

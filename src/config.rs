//! Application configuration and constants

use std::path::PathBuf;
use std::sync::OnceLock;

static CUSTOM_DATA_DIR: OnceLock<PathBuf> = OnceLock::new();
static CUSTOM_SCALER: OnceLock<PathBuf> = OnceLock::new();
static CUSTOM_POPULATION: OnceLock<PathBuf> = OnceLock::new();
static CUSTOM_LOG: OnceLock<PathBuf> = OnceLock::new();

// === Features ===
pub const FEATURE_COUNT: usize = 6;
pub const FEATURES: [&str; FEATURE_COUNT] = [
    "activity_frequency",
    "category_count",
    "event_type_count",
    "unique_products",
    "unique_brands",
    "average_spend",
];

// === Data Files ===
pub const SCALER_FILE: &str = "scaler.json";
pub const POPULATION_FILE: &str = "user_features.csv";
pub const INTERACTION_LOG_FILE: &str = "merged_data.csv";

// === Storage ===
pub const CACHE_DIR: &str = ".cohort";
pub const INDEX_CACHE_FILE: &str = "index.msgpack";

// === Interaction Log ===
pub const VIEW_EVENT: &str = "view";

// === Clustering Defaults ===
pub const DEFAULT_CLUSTERS: usize = 3;

// === Recommendation Defaults ===
pub const DEFAULT_TOP_N: usize = 5;
pub const ALL_SENTINEL: &str = "All";
pub const UNKNOWN_CLUSTER: &str = "Unknown Cluster";

pub fn set_data_dir(path: PathBuf) {
    let _ = CUSTOM_DATA_DIR.set(path);
}

pub fn set_scaler_path(path: PathBuf) {
    let _ = CUSTOM_SCALER.set(path);
}

pub fn set_population_path(path: PathBuf) {
    let _ = CUSTOM_POPULATION.set(path);
}

pub fn set_log_path(path: PathBuf) {
    let _ = CUSTOM_LOG.set(path);
}

/// Get data directory (--data-dir, or COHORT_DATA_DIR env var, or current dir)
pub fn data_dir() -> PathBuf {
    if let Some(custom) = CUSTOM_DATA_DIR.get() {
        crate::ui::debug(&format!("Using custom data dir: {}", custom.display()));
        return custom.clone();
    }

    if let Ok(env_path) = std::env::var("COHORT_DATA_DIR") {
        let path = PathBuf::from(&env_path);
        if path.is_dir() {
            crate::ui::debug(&format!("Using COHORT_DATA_DIR: {}", env_path));
            return path;
        }
        crate::ui::debug(&format!("COHORT_DATA_DIR is not a directory: {}", env_path));
    }

    PathBuf::from(".")
}

pub fn scaler_path() -> PathBuf {
    if let Some(custom) = CUSTOM_SCALER.get() {
        return custom.clone();
    }
    data_dir().join(SCALER_FILE)
}

pub fn population_path() -> PathBuf {
    if let Some(custom) = CUSTOM_POPULATION.get() {
        return custom.clone();
    }
    data_dir().join(POPULATION_FILE)
}

pub fn interaction_log_path() -> PathBuf {
    if let Some(custom) = CUSTOM_LOG.get() {
        return custom.clone();
    }
    data_dir().join(INTERACTION_LOG_FILE)
}

/// Index cache lives next to the data, like `.cohort/index.msgpack`
pub fn index_cache_path() -> PathBuf {
    data_dir().join(CACHE_DIR).join(INDEX_CACHE_FILE)
}

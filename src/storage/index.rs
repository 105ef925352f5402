//! Recommendation index built from the raw interaction log
//!
//! Only `view` events count. Each `(final_cluster, main_category, sub_category,
//! brand, product_id)` group becomes one record whose popularity is the number
//! of matching events. Rows with an empty group key are dropped, and records are
//! ordered by key ascending. A MessagePack copy can be cached next to the data.

use std::collections::BTreeMap;
use std::fs;
use std::io::Read;
use std::path::Path;
use std::sync::OnceLock;
use std::time::Instant;

use serde::{Deserialize, Serialize};

use crate::config::VIEW_EVENT;
use crate::core::{ClusterLabel, CohortError, RecommendationIndex, RecommendationRecord, Result};
use crate::ui;

const VERSION: &str = env!("CARGO_PKG_VERSION");

static SHARED: OnceLock<RecommendationIndex> = OnceLock::new();

#[derive(Debug, Deserialize)]
struct LogRow {
	event_type: Option<String>,
	final_cluster: Option<String>,
	main_category: Option<String>,
	sub_category: Option<String>,
	brand: Option<String>,
	product_id: Option<String>,
}

const LOG_COLUMNS: [&str; 6] = [
	"event_type",
	"final_cluster",
	"main_category",
	"sub_category",
	"brand",
	"product_id",
];

type GroupKey = (usize, String, String, String, String);

impl LogRow {
	fn is_view(&self) -> bool {
		self.event_type.as_deref().map(str::trim) == Some(VIEW_EVENT)
	}

	fn group_key(self) -> Option<GroupKey> {
		Some((
			parse_cluster(self.final_cluster.as_deref()?)?,
			non_empty(self.main_category)?,
			non_empty(self.sub_category)?,
			non_empty(self.brand)?,
			non_empty(self.product_id)?,
		))
	}
}

fn non_empty(value: Option<String>) -> Option<String> {
	let value = value?;
	let trimmed = value.trim();
	if trimmed.is_empty() {
		None
	} else {
		Some(trimmed.to_string())
	}
}

/// Cluster ids may be written as `2` or `2.0`
fn parse_cluster(raw: &str) -> Option<usize> {
	let raw = raw.trim();
	if let Ok(id) = raw.parse::<usize>() {
		return Some(id);
	}
	let id: f64 = raw.parse().ok()?;
	if id.is_finite() && id >= 0.0 && id.fract() == 0.0 {
		Some(id as usize)
	} else {
		None
	}
}

/// Counters from one aggregation pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexStats {
	pub rows: usize,
	pub view_events: usize,
	/// View events dropped for an empty or invalid group key
	pub dropped: usize,
}

/// Aggregate an interaction log from any CSV source
pub fn aggregate<R: Read>(reader: R) -> Result<(RecommendationIndex, IndexStats)> {
	let mut csv = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
	super::require_columns(csv.headers()?, &LOG_COLUMNS)?;

	let mut groups: BTreeMap<GroupKey, u64> = BTreeMap::new();
	let mut stats = IndexStats::default();

	for row in csv.deserialize::<LogRow>() {
		let row = row?;
		stats.rows += 1;

		if !row.is_view() {
			continue;
		}
		stats.view_events += 1;

		match row.group_key() {
			Some(key) => *groups.entry(key).or_insert(0) += 1,
			None => stats.dropped += 1,
		}
	}

	let mut records: Vec<RecommendationRecord> = groups
		.into_iter()
		.map(|((cluster, main_category, sub_category, brand, product_id), popularity)| RecommendationRecord {
			cluster: ClusterLabel(cluster),
			main_category,
			sub_category,
			brand,
			product_id,
			popularity,
		})
		.collect();
	order_numeric_product_ids(&mut records);

	Ok((RecommendationIndex::new(records), stats))
}

/// When every product id is an integer, order ids within a group by value
/// (`20` before `100`) instead of as text
fn order_numeric_product_ids(records: &mut [RecommendationRecord]) {
	if !records.iter().all(|r| r.product_id.parse::<u64>().is_ok()) {
		return;
	}
	records.sort_by(|a, b| {
		(a.cluster, &a.main_category, &a.sub_category, &a.brand)
			.cmp(&(b.cluster, &b.main_category, &b.sub_category, &b.brand))
			.then_with(|| a.product_id.parse::<u64>().ok().cmp(&b.product_id.parse::<u64>().ok()))
	});
}

/// Aggregate the interaction log on disk
pub fn build(log_path: &Path) -> Result<(RecommendationIndex, IndexStats)> {
	let start = Instant::now();
	let file = fs::File::open(log_path)?;
	let (index, stats) = aggregate(std::io::BufReader::new(file))?;
	ui::debug(&format!(
		"Aggregated {} rows ({} views, {} dropped) into {} records in {}ms",
		stats.rows,
		stats.view_events,
		stats.dropped,
		index.len(),
		start.elapsed().as_millis()
	));
	Ok((index, stats))
}

/// On-disk index snapshot
#[derive(Debug, Serialize, Deserialize)]
pub struct IndexCache {
	pub version: String,
	pub built_at: String,
	pub source: String,
	pub stats: IndexStats,
	pub index: RecommendationIndex,
}

impl IndexCache {
	pub fn new(index: RecommendationIndex, stats: IndexStats, source: &Path) -> Self {
		Self {
			version: VERSION.to_string(),
			built_at: chrono::Utc::now().to_rfc3339(),
			source: source.display().to_string(),
			stats,
			index,
		}
	}

	pub fn is_current_version(&self) -> bool {
		self.version == VERSION
	}
}

pub fn save_cache(cache: &IndexCache, path: &Path) -> Result<()> {
	if let Some(parent) = path.parent() {
		fs::create_dir_all(parent)?;
	}
	let bytes = rmp_serde::to_vec(cache)?;
	fs::write(path, bytes)?;
	Ok(())
}

pub fn load_cache(path: &Path) -> Result<IndexCache> {
	let bytes = fs::read(path)?;
	Ok(rmp_serde::from_slice(&bytes)?)
}

/// Cached copy when it is current and not older than the log, else `None`
pub fn fresh_cache(log_path: &Path, cache_path: &Path) -> Option<IndexCache> {
	let cache_modified = fs::metadata(cache_path).and_then(|m| m.modified()).ok()?;

	if let Ok(log_modified) = fs::metadata(log_path).and_then(|m| m.modified()) {
		if log_modified > cache_modified {
			ui::debug("Index cache is older than the interaction log");
			return None;
		}
	}

	match load_cache(cache_path) {
		Ok(cache) if cache.is_current_version() => {
			ui::debug(&format!("Using index cache built at {}", cache.built_at));
			Some(cache)
		}
		Ok(cache) => {
			ui::debug(&format!("Ignoring index cache from v{}", cache.version));
			None
		}
		Err(e) => {
			ui::debug(&format!("Ignoring unreadable index cache: {}", e));
			None
		}
	}
}

/// Index from a fresh cache, or aggregated from the log
pub fn load(log_path: &Path, cache_path: &Path) -> Result<RecommendationIndex> {
	if let Some(cache) = fresh_cache(log_path, cache_path) {
		return Ok(cache.index);
	}
	if !log_path.exists() {
		return Err(CohortError::Io(std::io::Error::new(
			std::io::ErrorKind::NotFound,
			format!("interaction log not found: {}", log_path.display()),
		)));
	}
	build(log_path).map(|(index, _)| index)
}

/// Process-wide index, loaded on first access
///
/// Later calls return the first snapshot regardless of the paths given.
pub fn shared(log_path: &Path, cache_path: &Path) -> Result<&'static RecommendationIndex> {
	if let Some(index) = SHARED.get() {
		return Ok(index);
	}
	let loaded = load(log_path, cache_path)?;
	Ok(SHARED.get_or_init(|| loaded))
}

//! Index command - aggregate the interaction log into a cached index

use std::time::Instant;

use anyhow::{Context, Result};
use colored::*;

use crate::config;
use crate::storage::index::{self, IndexCache};
use crate::ui;

pub fn run(force: bool) -> Result<()> {
	let log_path = config::interaction_log_path();
	let cache_path = config::index_cache_path();

	if force {
		ui::debug("Force flag set, skipping cache check");
	} else if let Some(cache) = index::fresh_cache(&log_path, &cache_path) {
		ui::success(&format!(
			"Index cache is up to date ({} records, built {})",
			cache.index.len(),
			cache.built_at
		));
		ui::debug(&format!("{}", "Run with --force to rebuild".dimmed()));
		return Ok(());
	}

	ui::info(&format!(
		"Aggregating view events from {}",
		ui::path_display(&log_path, 50)
	));

	let start = Instant::now();
	let (built, stats) = index::build(&log_path)
		.with_context(|| format!("Failed to aggregate {}", log_path.display()))?;

	if stats.dropped > 0 {
		ui::warn(&format!("Dropped {} view events with an empty group key", stats.dropped));
	}

	ui::success(&format!(
		"{} records across {} clusters from {} view events ({} rows)",
		built.len(),
		built.clusters().len(),
		stats.view_events,
		stats.rows
	));

	let cache = IndexCache::new(built, stats, &log_path);
	index::save_cache(&cache, &cache_path)
		.with_context(|| format!("Failed to write index cache {}", cache_path.display()))?;
	ui::success(&format!("Saved index to {}", ui::path_display(&cache_path, 50)));

	eprintln!(
		"\n{}",
		format!("Completed in {:.1}s", start.elapsed().as_secs_f32()).dimmed()
	);

	Ok(())
}

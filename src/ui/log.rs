//! Unified logging system

use colored::*;
use std::sync::atomic::{AtomicBool, Ordering};

static VERBOSE: AtomicBool = AtomicBool::new(false);

const LOGO: &str = r#"
   ______      __               __
  / ____/___  / /_  ____  _____/ /_
 / /   / __ \/ __ \/ __ \/ ___/ __/
/ /___/ /_/ / / / / /_/ / /  / /_
\____/\____/_/ /_/\____/_/   \__/  "#;

pub fn print_logo() {
	println!("{}", LOGO.bright_blue().bold());
	println!(
		"{}",
		format!("v{} · behavioral clusters & recommendations", env!("CARGO_PKG_VERSION"))
			.dimmed()
			.italic()
	);
}

pub struct Log;

impl Log {
	pub fn set_verbose(enabled: bool) {
		VERBOSE.store(enabled, Ordering::Relaxed);
	}

	pub fn is_verbose() -> bool {
		VERBOSE.load(Ordering::Relaxed)
	}
}

pub fn info(msg: &str) {
	println!("{} {}", "ℹ".bright_blue().bold(), msg.bright_white());
}

pub fn success(msg: &str) {
	println!("{} {}", "✓".bright_green().bold(), msg.bright_white());
}

pub fn warn(msg: &str) {
	println!("{} {}", "⚠".bright_yellow().bold(), msg.bright_white());
}

pub fn error(msg: &str) {
	eprintln!("{} {}", "✗".bright_red().bold(), msg.bright_white());
}

pub fn debug(msg: &str) {
	if Log::is_verbose() {
		println!("{} {}", "⚙".bright_black().bold(), msg.dimmed());
	}
}

pub fn header(text: &str) {
	println!("\n{}", format!("─── {} ───", text).bright_blue().bold());
}

/// Shortened display for long file paths
pub fn path_display(path: &std::path::Path, max_len: usize) -> String {
	let full = path.display().to_string();
	if full.chars().count() <= max_len || max_len < 8 {
		return full;
	}

	let keep = max_len - 3;
	let tail: String = full
		.chars()
		.rev()
		.take(keep)
		.collect::<Vec<_>>()
		.into_iter()
		.rev()
		.collect();
	format!("...{}", tail)
}

//! Error types for cluster assignment and data loading

use thiserror::Error;

/// Result type alias for library operations
pub type Result<T> = std::result::Result<T, CohortError>;

#[derive(Error, Debug)]
pub enum CohortError {
	/// Malformed, missing or non-finite feature values
	#[error("invalid input: {0}")]
	InvalidInput(String),

	/// Reference population too small for the requested cluster count
	#[error("insufficient data: {0}")]
	InsufficientData(String),

	/// Tabular input lacks a required column
	#[error("missing column '{0}'")]
	MissingColumn(String),

	#[error("invalid scaling parameters: {0}")]
	InvalidScaling(String),

	#[error("I/O error: {0}")]
	Io(#[from] std::io::Error),

	#[error("CSV error: {0}")]
	Csv(#[from] csv::Error),

	#[error("JSON error: {0}")]
	Json(#[from] serde_json::Error),

	#[error("index cache error: {0}")]
	Cache(String),
}

impl From<rmp_serde::encode::Error> for CohortError {
	fn from(e: rmp_serde::encode::Error) -> Self {
		CohortError::Cache(e.to_string())
	}
}

impl From<rmp_serde::decode::Error> for CohortError {
	fn from(e: rmp_serde::decode::Error) -> Self {
		CohortError::Cache(e.to_string())
	}
}

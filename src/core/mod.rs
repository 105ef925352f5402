//! Core domain types

pub mod error;
pub mod features;
pub mod label;
pub mod recommendation;
pub mod scaling;

pub use error::{CohortError, Result};
pub use features::FeatureVector;
pub use label::{ClusterLabel, Interpretations};
pub use recommendation::{RecommendationIndex, RecommendationRecord};
pub use scaling::ScalingParameters;

//! # Cohort Library
//!
//! Behavioral cluster assignment with average-linkage hierarchical clustering.
//! A simulated user is appended to a reference population, the combined set is
//! re-clustered, and the user's cluster drives popularity-ranked product
//! recommendations.

pub mod cli;
pub mod commands;
pub mod config;
pub mod core;
pub mod processing;
pub mod storage;
pub mod ui;

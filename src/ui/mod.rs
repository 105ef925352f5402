//! # User Interface
//!
//! Colored terminal output.

pub mod log;

pub use log::{debug, error, header, info, path_display, print_logo, success, warn, Log};

//! # Command Implementations
//!
//! Each submodule handles one CLI command (assign, options, index).

pub mod assign;
pub mod index;
pub mod options;

//! Configuration module
//!
//! Handles loading and validating configuration from TOML files and environment
//! variables, and resolving the permission matrix the configuration points at.

pub mod loader;
pub mod types;

pub use loader::{
    load_config, load_config_from_str, load_matrix, load_matrix_from_str, validate_log_level,
};
pub use types::*;

//! Configuration management for pairwise-skill
//!
//! This module handles configuration loading from environment variables or
//! TOML files, validation, and default values.

pub mod app;

// Re-export commonly used types
pub use app::{validate_config, AppConfig, ServiceSettings};

//! Main application configuration
//!
//! This module defines the configuration structures for the pairwise-skill
//! tool: service settings plus the rating model parameters, loaded from
//! environment variables or a TOML file and validated.

use crate::rating::bradley_terry::BradleyTerryFull;
use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::Path;

/// Main application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub service: ServiceSettings,
    pub model: BradleyTerryFull,
}

/// Service-level settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceSettings {
    /// Service name for logging
    pub name: String,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self {
            name: "pairwise-skill".to_string(),
            log_level: "info".to_string(),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables with fallback to defaults
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from any key lookup with fallback to defaults
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        // Service settings
        if let Some(name) = lookup("SERVICE_NAME") {
            config.service.name = name;
        }
        if let Some(log_level) = lookup("LOG_LEVEL") {
            config.service.log_level = log_level;
        }

        // Model settings
        if let Some(mu) = lookup("BT_MU") {
            config.model.mu = mu
                .parse()
                .map_err(|_| anyhow!("Invalid BT_MU value: {}", mu))?;
        }
        if let Some(sigma) = lookup("BT_SIGMA") {
            config.model.sigma = sigma
                .parse()
                .map_err(|_| anyhow!("Invalid BT_SIGMA value: {}", sigma))?;
        }
        if let Some(beta) = lookup("BT_BETA") {
            config.model.beta = beta
                .parse()
                .map_err(|_| anyhow!("Invalid BT_BETA value: {}", beta))?;
        }
        if let Some(kappa) = lookup("BT_KAPPA") {
            config.model.kappa = kappa
                .parse()
                .map_err(|_| anyhow!("Invalid BT_KAPPA value: {}", kappa))?;
        }

        validate_config(&config)?;
        Ok(config)
    }

    /// Load configuration from a TOML file; missing keys keep their defaults
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;

        Self::from_toml(&contents)
            .with_context(|| format!("Invalid config file {}", path.display()))
    }

    /// Parse configuration from TOML text
    pub fn from_toml(contents: &str) -> Result<Self> {
        let config: AppConfig = toml::from_str(contents)?;
        validate_config(&config)?;
        Ok(config)
    }
}

/// Validate configuration values
pub fn validate_config(config: &AppConfig) -> Result<()> {
    // Validate log level
    match config.service.log_level.to_lowercase().as_str() {
        "trace" | "debug" | "info" | "warn" | "error" => {}
        _ => return Err(anyhow!("Invalid log level: {}", config.service.log_level)),
    }

    if config.service.name.is_empty() {
        return Err(anyhow!("Service name cannot be empty"));
    }

    config.model.validate()
}

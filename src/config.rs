//! Configuration management for TripCraft
//!
//! This module handles loading, parsing, validating, and managing
//! configuration from files, environment variables, and CLI overrides.

use crate::error::{Result, TripcraftError};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Itinerary service connection settings
    #[serde(default)]
    pub service: ServiceConfig,
    /// Planner behavior settings
    #[serde(default)]
    pub planner: PlannerConfig,
}

/// Itinerary service configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Base URL of the backend, without the `/api/itinerary` path
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,

    /// Optional bearer token sent with every request
    #[serde(default)]
    pub auth_token: Option<String>,
}

fn default_base_url() -> String {
    "http://localhost:8080".to_string()
}

fn default_timeout_seconds() -> u64 {
    30
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_seconds: default_timeout_seconds(),
            auth_token: None,
        }
    }
}

/// Planner behavior configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlannerConfig {
    /// How long the "saved" flag stays visible after a successful save
    #[serde(default = "default_success_display_seconds")]
    pub success_display_seconds: u64,
}

fn default_success_display_seconds() -> u64 {
    3
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            success_display_seconds: default_success_display_seconds(),
        }
    }
}

impl Config {
    /// Load configuration from file with environment and CLI overrides
    ///
    /// A missing file is not an error; defaults are used instead.
    ///
    /// # Errors
    ///
    /// Returns error if the file exists but cannot be read or parsed
    pub fn load(path: &str, cli: &crate::cli::Cli) -> Result<Self> {
        let mut config = if Path::new(path).exists() {
            Self::from_file(path)?
        } else {
            tracing::warn!("Config file not found at {}, using defaults", path);
            Self::default()
        };

        config.apply_env_vars();
        config.apply_cli_overrides(cli);

        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| TripcraftError::Config(format!("Failed to read config file: {}", e)))?;
        serde_yaml::from_str(&contents)
            .map_err(|e| TripcraftError::Config(format!("Failed to parse config: {}", e)).into())
    }

    fn apply_env_vars(&mut self) {
        if let Ok(url) = std::env::var("TRIPCRAFT_SERVICE_URL") {
            tracing::debug!(url = %url, "Env override: TRIPCRAFT_SERVICE_URL");
            self.service.base_url = url;
        }

        if let Ok(token) = std::env::var("TRIPCRAFT_SERVICE_TOKEN") {
            self.service.auth_token = Some(token).filter(|t| !t.is_empty());
        }

        if let Ok(timeout) = std::env::var("TRIPCRAFT_TIMEOUT_SECONDS") {
            match timeout.parse() {
                Ok(value) => self.service.timeout_seconds = value,
                Err(_) => tracing::warn!("Invalid TRIPCRAFT_TIMEOUT_SECONDS: {}", timeout),
            }
        }

        if let Ok(window) = std::env::var("TRIPCRAFT_SUCCESS_DISPLAY_SECONDS") {
            match window.parse() {
                Ok(value) => self.planner.success_display_seconds = value,
                Err(_) => {
                    tracing::warn!("Invalid TRIPCRAFT_SUCCESS_DISPLAY_SECONDS: {}", window)
                }
            }
        }
    }

    fn apply_cli_overrides(&mut self, cli: &crate::cli::Cli) {
        if let Some(url) = &cli.service_url {
            tracing::debug!(url = %url, "CLI override: --service-url");
            self.service.base_url = url.clone();
        }
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns error if the base URL is empty, unparseable or not http(s),
    /// or if the timeout is zero
    pub fn validate(&self) -> Result<()> {
        if self.service.base_url.trim().is_empty() {
            return Err(
                TripcraftError::Config("service.base_url cannot be empty".to_string()).into(),
            );
        }

        let url = url::Url::parse(&self.service.base_url).map_err(|e| {
            TripcraftError::Config(format!(
                "Invalid service.base_url '{}': {}",
                self.service.base_url, e
            ))
        })?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(TripcraftError::Config(format!(
                "service.base_url must use http or https, got: {}",
                url.scheme()
            ))
            .into());
        }

        if self.service.timeout_seconds == 0 {
            return Err(TripcraftError::Config(
                "service.timeout_seconds must be greater than 0".to_string(),
            )
            .into());
        }

        Ok(())
    }
}

//! Application configuration
//!
//! Host-side configuration for the command-line driver: service settings,
//! engine and prediction coefficients, and an optional custom rank ladder.
//! Loaded from a TOML file or environment variables, with fallback to
//! defaults, and validated before an engine is built.

use crate::config::{EngineConfig, PredictionConfig};
use crate::rating::{RankLadder, RatingEngine};
use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::Path;
use std::str::FromStr;

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub service: ServiceSettings,
    pub engine: EngineConfig,
    pub prediction: PredictionConfig,
    /// Custom ladder replacing the standard one
    pub ladder: Option<RankLadder>,
}

/// Service-level settings
#[derive(Debug, Clone, Serialize, Deserialize)]
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
            name: "cue-ladder".to_string(),
            log_level: "info".to_string(),
        }
    }
}

fn parse_env<T: FromStr>(key: &str, target: &mut T) -> Result<()> {
    if let Ok(value) = env::var(key) {
        *target = value
            .parse()
            .map_err(|_| anyhow!("Invalid {} value: {}", key, value))?;
    }
    Ok(())
}

impl AppConfig {
    /// Load configuration from environment variables with fallback to defaults
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();
        config.apply_env()?;
        validate_config(&config)?;
        Ok(config)
    }

    /// Load configuration from a TOML file, then apply environment overrides
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let mut config: AppConfig = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        config.apply_env()?;
        validate_config(&config)?;
        Ok(config)
    }

    fn apply_env(&mut self) -> Result<()> {
        // Service settings
        if let Ok(name) = env::var("SERVICE_NAME") {
            self.service.name = name;
        }
        if let Ok(log_level) = env::var("LOG_LEVEL") {
            self.service.log_level = log_level;
        }

        // Engine settings
        parse_env("BASE_K_FACTOR", &mut self.engine.base_k_factor)?;
        parse_env("TOURNAMENT_MULTIPLIER", &mut self.engine.tournament_multiplier)?;
        parse_env("UPSET_MULTIPLIER", &mut self.engine.upset_multiplier)?;
        parse_env("QUALITY_MATCH_BONUS", &mut self.engine.quality_match_bonus)?;
        parse_env(
            "PROVISIONAL_MATCH_THRESHOLD",
            &mut self.engine.provisional_match_threshold,
        )?;
        parse_env("RATING_FLOOR", &mut self.engine.rating_floor)?;
        parse_env("RATING_CEILING", &mut self.engine.rating_ceiling)?;

        Ok(())
    }

    /// The configured ladder, or the standard one
    pub fn ladder(&self) -> RankLadder {
        self.ladder.clone().unwrap_or_default()
    }

    /// Build a rating engine from this configuration
    pub fn build_engine(&self) -> Result<RatingEngine> {
        RatingEngine::new(self.engine, self.prediction, self.ladder())
            .context("Failed to build rating engine")
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

    config.engine.validate()?;
    config.prediction.validate()?;

    Ok(())
}

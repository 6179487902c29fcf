//! Configuration management for the rating engine
//!
//! Engine and prediction coefficients with documented defaults, plus the
//! host-side application configuration loaded from TOML files and
//! environment variables.

pub mod app;
pub mod engine;
pub mod prediction;

// Re-export commonly used types
pub use app::{validate_config, AppConfig, ServiceSettings};
pub use engine::EngineConfig;
pub use prediction::PredictionConfig;

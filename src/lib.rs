//! Cue Ladder - rating engine for head-to-head pool matches
//!
//! This crate turns match outcomes into Elo-style rating deltas, predicts
//! unplayed matches, places players on a named rank ladder and reports
//! form, consistency and progression. Every entry point is a pure function
//! of its inputs; persistence belongs to the host application.

pub mod analytics;
pub mod config;
pub mod error;
pub mod rating;
pub mod types;
pub mod utils;

// Re-export commonly used types and traits
pub use error::{EngineError, Result};
pub use types::*;

// Re-export key components
pub use config::{EngineConfig, PredictionConfig};
pub use rating::{RankLadder, RankTier, RatingCalculator, RatingEngine};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

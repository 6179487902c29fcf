//! Elo-style rating system for head-to-head matches
//!
//! This module provides the rank ladder, the logistic expected-score model,
//! K-factor and bonus policies, and the engine that combines them.

pub mod bonus;
pub mod engine;
pub mod expected;
pub mod k_factor;
pub mod ladder;

// Re-export commonly used types
pub use bonus::{bonus, BonusBreakdown};
pub use engine::{apply_match, scenarios, RatingCalculator, RatingEngine};
pub use expected::{expected_score, expected_score_for};
pub use k_factor::{experience_band, k_factor, ExperienceBand};
pub use ladder::{RankLadder, RankTier};

//! Secondary analytics built on the rating model
//!
//! Forward match prediction, progression towards the next tier, and the
//! small per-player metrics (form, consistency, efficiency, volatility)
//! both of those and display layers consume.

pub mod metrics;
pub mod prediction;
pub mod progression;

// Re-export commonly used types
pub use metrics::{
    consistency_score, next_streak, rating_efficiency, recent_form, rolling_volatility,
    smoothed_volatility, win_rate, MatchOutcome,
};
pub use prediction::MatchPredictor;
pub use progression::{progression, Progression};

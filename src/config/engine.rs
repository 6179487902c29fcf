//! Rating engine configuration
//!
//! Every coefficient the engine uses lives here with a documented default.
//! Configurations are validated once, when an engine is built or a free
//! entry point is called, never in the middle of a computation.

use crate::error::{EngineError, Result};
use crate::types::Rating;
use serde::{Deserialize, Serialize};

/// Tunable coefficients for rating updates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// K-factor for established mid-ladder players (20..=50)
    pub base_k_factor: f64,
    /// K scaling at international tournaments; lower tiers get a share (1.0..=3.0)
    pub tournament_multiplier: f64,
    /// Scaling of the upset bonus (1.0..=2.0)
    pub upset_multiplier: f64,
    /// Quality-match bonus as a fraction of the base K-factor (0.05..=0.30)
    pub quality_match_bonus: f64,

    /// Players with fewer matches than this are provisional
    pub provisional_match_threshold: u32,
    pub provisional_k_multiplier: f64,
    /// Rating where the stable top band starts, the floor of tier A+
    pub established_rating_threshold: Rating,
    pub established_match_threshold: u32,
    pub established_k_multiplier: f64,
    pub quick_match_k_multiplier: f64,

    /// Streak bonus per consecutive win, as a fraction of the base K-factor
    pub streak_bonus_per_win: f64,
    pub streak_bonus_cap: f64,
    /// Minimum rating deficit for a win to count as an upset
    pub upset_rating_gap: Rating,
    pub upset_bonus_per_point: f64,
    /// Weight of the caller's 0-5 upset hint
    pub upset_hint_weight: f64,

    pub rating_floor: Rating,
    pub rating_ceiling: Rating,
    /// Smoothing window for the volatility moving average
    pub volatility_window: u32,
    /// Combined match count at which confidence reaches 0.5
    pub confidence_half_matches: f64,
}

impl EngineConfig {
    pub const DEFAULT: EngineConfig = EngineConfig {
        base_k_factor: 32.0,
        tournament_multiplier: 1.5,
        upset_multiplier: 1.3,
        quality_match_bonus: 0.10,

        provisional_match_threshold: 30,
        provisional_k_multiplier: 1.25,
        established_rating_threshold: 2400,
        established_match_threshold: 100,
        established_k_multiplier: 0.5,
        quick_match_k_multiplier: 0.75,

        streak_bonus_per_win: 0.05,
        streak_bonus_cap: 0.25,
        upset_rating_gap: 200,
        upset_bonus_per_point: 0.025,
        upset_hint_weight: 0.05,

        rating_floor: 0,
        rating_ceiling: 3000,
        volatility_window: 10,
        confidence_half_matches: 50.0,
    };

    /// Slower-moving ratings, suited to long seasons
    pub fn conservative() -> Self {
        Self {
            base_k_factor: 24.0,
            tournament_multiplier: 1.25,
            upset_multiplier: 1.1,
            quality_match_bonus: 0.05,
            ..Self::DEFAULT
        }
    }

    /// Faster-moving ratings, suited to new ladders
    pub fn aggressive() -> Self {
        Self {
            base_k_factor: 40.0,
            tournament_multiplier: 2.0,
            upset_multiplier: 1.5,
            quality_match_bonus: 0.15,
            ..Self::DEFAULT
        }
    }

    /// Smallest K-factor any policy may produce
    pub fn min_k_factor(&self) -> f64 {
        self.base_k_factor * 0.5
    }

    /// Largest K-factor any policy may produce
    pub fn max_k_factor(&self) -> f64 {
        self.base_k_factor * 3.0
    }

    /// Clamp a rating into the configured floor and ceiling
    pub fn clamp_rating(&self, rating: i64) -> Rating {
        rating.clamp(i64::from(self.rating_floor), i64::from(self.rating_ceiling)) as Rating
    }

    /// Validate configuration parameters
    pub fn validate(&self) -> Result<()> {
        check_range("Base K-factor", self.base_k_factor, 20.0, 50.0)?;
        check_range("Tournament multiplier", self.tournament_multiplier, 1.0, 3.0)?;
        check_range("Upset multiplier", self.upset_multiplier, 1.0, 2.0)?;
        check_range("Quality match bonus", self.quality_match_bonus, 0.05, 0.30)?;

        if self.provisional_match_threshold == 0 {
            return Err(EngineError::config(
                "Provisional match threshold must be greater than 0",
            ));
        }
        check_range(
            "Provisional K multiplier",
            self.provisional_k_multiplier,
            1.0,
            3.0,
        )?;
        if self.established_match_threshold < self.provisional_match_threshold {
            return Err(EngineError::config(
                "Established match threshold must not be below the provisional threshold",
            ));
        }
        check_range(
            "Established K multiplier",
            self.established_k_multiplier,
            0.5,
            1.0,
        )?;
        check_range(
            "Quick match K multiplier",
            self.quick_match_k_multiplier,
            0.5,
            1.0,
        )?;

        check_range("Streak bonus per win", self.streak_bonus_per_win, 0.0, 0.2)?;
        check_range(
            "Streak bonus cap",
            self.streak_bonus_cap,
            self.streak_bonus_per_win,
            1.0,
        )?;
        if self.upset_rating_gap <= 0 {
            return Err(EngineError::config("Upset rating gap must be positive"));
        }
        check_range(
            "Upset bonus per point",
            self.upset_bonus_per_point,
            0.0,
            1.0,
        )?;
        check_range("Upset hint weight", self.upset_hint_weight, 0.0, 0.2)?;

        if self.rating_floor < 0 {
            return Err(EngineError::config("Rating floor cannot be negative"));
        }
        if self.rating_ceiling <= self.rating_floor {
            return Err(EngineError::config(
                "Rating ceiling must be above the rating floor",
            ));
        }
        if !(self.rating_floor..=self.rating_ceiling).contains(&self.established_rating_threshold)
        {
            return Err(EngineError::config(
                "Established rating threshold must lie between floor and ceiling",
            ));
        }
        if self.volatility_window == 0 {
            return Err(EngineError::config(
                "Volatility window must be greater than 0",
            ));
        }
        if !(self.confidence_half_matches.is_finite() && self.confidence_half_matches > 0.0) {
            return Err(EngineError::config(
                "Confidence half-matches must be positive",
            ));
        }

        Ok(())
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

fn check_range(name: &str, value: f64, min: f64, max: f64) -> Result<()> {
    if value.is_finite() && (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(EngineError::config(format!(
            "{} must be within {}..={}, got {}",
            name, min, max, value
        )))
    }
}

//! Match prediction configuration

use crate::error::{EngineError, Result};
use serde::{Deserialize, Serialize};

/// Weights used by the match predictor
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PredictionConfig {
    /// Rating points added per point of recent-form difference
    pub form_weight: f64,
    /// Rating points added per point of consistency difference
    pub consistency_weight: f64,
    /// Cap on the total form/consistency adjustment, in rating points
    pub max_adjustment: f64,
    /// Match count at which the experience factor reaches 0.5
    pub experience_half_matches: f64,
    /// Volatility at which the stability factor reaches 0.5
    pub volatility_scale: f64,
    pub base_stake: f64,
    pub stake_step: u32,
    /// Stakes are only suggested at or above this confidence (0-100)
    pub min_stake_confidence: f64,
}

impl PredictionConfig {
    pub const DEFAULT: PredictionConfig = PredictionConfig {
        form_weight: 0.5,
        consistency_weight: 0.3,
        max_adjustment: 100.0,
        experience_half_matches: 20.0,
        volatility_scale: 25.0,
        base_stake: 100.0,
        stake_step: 10,
        min_stake_confidence: 40.0,
    };

    pub fn validate(&self) -> Result<()> {
        let non_negative = [
            ("Form weight", self.form_weight),
            ("Consistency weight", self.consistency_weight),
            ("Max adjustment", self.max_adjustment),
            ("Base stake", self.base_stake),
        ];
        for (name, value) in non_negative {
            if !(value.is_finite() && value >= 0.0) {
                return Err(EngineError::config(format!(
                    "{} must be non-negative, got {}",
                    name, value
                )));
            }
        }

        // Keep the adjustment a perturbation rather than an override
        if self.max_adjustment > 400.0 {
            return Err(EngineError::config(
                "Max adjustment must not exceed 400 rating points",
            ));
        }
        if !(self.experience_half_matches.is_finite() && self.experience_half_matches > 0.0) {
            return Err(EngineError::config(
                "Experience half-matches must be positive",
            ));
        }
        if !(self.volatility_scale.is_finite() && self.volatility_scale > 0.0) {
            return Err(EngineError::config("Volatility scale must be positive"));
        }
        if self.stake_step == 0 {
            return Err(EngineError::config("Stake step must be greater than 0"));
        }
        if !(0.0..=100.0).contains(&self.min_stake_confidence) {
            return Err(EngineError::config(
                "Minimum stake confidence must be within 0..=100",
            ));
        }

        Ok(())
    }
}

impl Default for PredictionConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

//! Dynamic K-factor selection
//!
//! Provisional players move fast, established players at the top of the
//! ladder move slowly, everyone else uses the base coefficient. Tournament
//! and quick-match scaling apply on top, and the result is clamped so that
//! compounding multipliers cannot produce runaway swings.

use crate::config::EngineConfig;
use crate::types::{MatchContext, MatchKind, PlayerStats};
use serde::{Deserialize, Serialize};

/// Experience band a player falls into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExperienceBand {
    Provisional,
    Standard,
    Established,
}

/// Classify a player by matches played and rating
pub fn experience_band(stats: &PlayerStats, config: &EngineConfig) -> ExperienceBand {
    if stats.matches_played < config.provisional_match_threshold {
        ExperienceBand::Provisional
    } else if stats.current_rating >= config.established_rating_threshold
        && stats.matches_played >= config.established_match_threshold
    {
        ExperienceBand::Established
    } else {
        ExperienceBand::Standard
    }
}

/// Tournament scaling for the match, 1.0 outside tournaments
pub fn tournament_scale(ctx: &MatchContext, config: &EngineConfig) -> f64 {
    match ctx.effective_tournament_tier() {
        Some(tier) => 1.0 + (config.tournament_multiplier - 1.0) * tier.weight(),
        None => 1.0,
    }
}

/// Effective K-factor for `stats` in this match
pub fn k_factor(stats: &PlayerStats, ctx: &MatchContext, config: &EngineConfig) -> f64 {
    let band_multiplier = match experience_band(stats, config) {
        ExperienceBand::Provisional => config.provisional_k_multiplier,
        ExperienceBand::Standard => 1.0,
        ExperienceBand::Established => config.established_k_multiplier,
    };

    let mut k = config.base_k_factor * band_multiplier * tournament_scale(ctx, config);
    if ctx.match_kind == MatchKind::Quick {
        k *= config.quick_match_k_multiplier;
    }

    k.clamp(config.min_k_factor(), config.max_k_factor())
}

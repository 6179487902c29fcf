//! Winner bonuses
//!
//! Streak, quality and upset bonuses are independent, each toggled by the
//! match context and sized by the engine configuration. Only the winner
//! benefits; the loser total exists for symmetry and is always zero.

use crate::config::EngineConfig;
use crate::rating::expected::expected_score_for;
use crate::types::{MatchContext, PlayerStats, Rating};
use crate::utils::rating_difference;
use serde::{Deserialize, Serialize};

/// Individual bonus sources in rating points, before rounding
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct BonusBreakdown {
    pub streak: f64,
    pub quality: f64,
    pub upset: f64,
    /// Winner's pre-match expected score
    pub winner_expected: f64,
    pub winner_total: Rating,
    pub loser_total: Rating,
}

/// Fraction of the base K-factor earned by a win streak
pub fn streak_fraction(streak: i32, config: &EngineConfig) -> f64 {
    if streak <= 0 {
        return 0.0;
    }
    (f64::from(streak) * config.streak_bonus_per_win).min(config.streak_bonus_cap)
}

/// Whether a win by `winner` over `loser` counts as an upset
///
/// The winner must have been the underdog by at least the configured gap,
/// so their pre-match expected score sat well below 0.5.
pub fn is_upset(winner: &PlayerStats, loser: &PlayerStats, config: &EngineConfig) -> bool {
    i64::from(loser.current_rating) - i64::from(winner.current_rating)
        >= i64::from(config.upset_rating_gap)
}

/// Compute the winner's and loser's bonus points
pub fn bonus(
    winner: &PlayerStats,
    loser: &PlayerStats,
    ctx: &MatchContext,
    config: &EngineConfig,
) -> BonusBreakdown {
    let streak = if ctx.streak_bonus_eligible {
        streak_fraction(winner.current_streak, config) * config.base_k_factor
    } else {
        0.0
    };

    let quality = if ctx.is_quality_match {
        config.quality_match_bonus * config.base_k_factor
    } else {
        0.0
    };

    let upset = if is_upset(winner, loser, config) {
        let gap = f64::from(rating_difference(winner.current_rating, loser.current_rating));
        let hint = 1.0 + ctx.clamped_upset_factor() * config.upset_hint_weight;
        gap * config.upset_bonus_per_point * config.upset_multiplier * hint
    } else {
        0.0
    };

    BonusBreakdown {
        streak,
        quality,
        upset,
        winner_expected: expected_score_for(winner.current_rating, loser.current_rating),
        winner_total: (streak + quality + upset).round().max(0.0) as Rating,
        loser_total: 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn player(id: &str, rating: i32, streak: i32) -> PlayerStats {
        let mut stats = PlayerStats::new(id, rating);
        stats.matches_played = 50;
        stats.current_streak = streak;
        stats
    }

    #[test]
    fn test_no_bonus_by_default() {
        let config = EngineConfig::default();
        let ctx = MatchContext::regular("w", "l");
        let result = bonus(&player("w", 1500, 3), &player("l", 1500, 0), &ctx, &config);
        assert_eq!(result.winner_total, 0);
        assert_eq!(result.loser_total, 0);
        assert_eq!(result.streak + result.quality + result.upset, 0.0);
        assert!((result.winner_expected - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_streak_bonus_capped() {
        let config = EngineConfig::default();
        assert_eq!(streak_fraction(0, &config), 0.0);
        assert_eq!(streak_fraction(-4, &config), 0.0);
        assert!((streak_fraction(3, &config) - 0.15).abs() < 1e-12);
        assert!((streak_fraction(5, &config) - 0.25).abs() < 1e-12);
        assert_eq!(streak_fraction(12, &config), 0.25);

        let ctx = MatchContext::regular("w", "l").streak_bonus(true);
        let result = bonus(&player("w", 1500, 10), &player("l", 1500, 0), &ctx, &config);
        assert!((result.streak - 8.0).abs() < 1e-9);
        assert_eq!(result.winner_total, 8);
        assert_eq!(result.loser_total, 0);
    }

    #[test]
    fn test_quality_bonus() {
        let config = EngineConfig::default();
        let ctx = MatchContext::regular("w", "l").quality(9, true);
        let result = bonus(&player("w", 1500, 0), &player("l", 1500, 0), &ctx, &config);
        assert!((result.quality - 3.2).abs() < 1e-9);
        assert_eq!(result.winner_total, 3);
    }

    #[test]
    fn test_upset_threshold() {
        let config = EngineConfig::default();
        assert!(!is_upset(&player("w", 1500, 0), &player("l", 1699, 0), &config));
        assert!(is_upset(&player("w", 1500, 0), &player("l", 1700, 0), &config));
        // Favourite winning is never an upset
        assert!(!is_upset(&player("w", 1700, 0), &player("l", 1300, 0), &config));
        // Gaps wider than the i32 range still compare correctly
        assert!(is_upset(
            &player("w", -2_000_000_000, 0),
            &player("l", 2_000_000_000, 0),
            &config
        ));
        assert!(!is_upset(&player("w", i32::MAX, 0), &player("l", i32::MIN, 0), &config));

        let underdog = bonus(
            &player("w", 1500, 0),
            &player("l", 1700, 0),
            &MatchContext::regular("w", "l"),
            &config,
        );
        assert!(underdog.winner_expected < 0.25);
    }

    #[test]
    fn test_upset_bonus_scales_with_gap_and_hint() {
        let config = EngineConfig::default();
        let ctx = MatchContext::regular("w", "l");
        let small = bonus(&player("w", 1300, 0), &player("l", 1550, 0), &ctx, &config);
        let large = bonus(&player("w", 1300, 0), &player("l", 1700, 0), &ctx, &config);
        assert!(small.upset > 0.0);
        assert!(large.upset > small.upset);
        assert!((large.upset - 400.0 * 0.025 * 1.3).abs() < 1e-9);

        let hinted = bonus(
            &player("w", 1300, 0),
            &player("l", 1700, 0),
            &ctx.clone().upset_hint(5.0),
            &config,
        );
        assert!(hinted.upset > large.upset);
    }

    #[test]
    fn test_bonuses_combine() {
        let config = EngineConfig::default();
        let ctx = MatchContext::regular("w", "l")
            .streak_bonus(true)
            .quality(8, true);
        let result = bonus(&player("w", 1300, 5), &player("l", 1700, 0), &ctx, &config);
        let expected = (8.0_f64 + 3.2 + 13.0).round() as i32;
        assert_eq!(result.winner_total, expected);
        assert!(result.streak >= 0.0 && result.quality >= 0.0 && result.upset >= 0.0);
    }
}

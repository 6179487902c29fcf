//! Progression towards the next rank tier

use crate::analytics::metrics::rating_efficiency;
use crate::rating::ladder::{RankLadder, RankTier};
use crate::types::{Estimate, PlayerStats, Rating};
use serde::{Deserialize, Serialize};

/// Where a player stands on the ladder and how far the next tier is
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Progression {
    pub current_tier: RankTier,
    /// Equal to the current tier at the top of the ladder
    pub next_tier: RankTier,
    pub points_to_next: Rating,
    /// Matches needed at the player's historical gain rate
    pub estimated_matches: Estimate<u32>,
    pub gain_per_match: Estimate<f64>,
}

impl Progression {
    pub fn is_top_tier(&self) -> bool {
        self.current_tier == self.next_tier
    }
}

/// Compute progression for `stats` on `ladder`
pub fn progression(stats: &PlayerStats, ladder: &RankLadder) -> Progression {
    let current = ladder.tier_for(stats.current_rating);
    let next = ladder
        .tiers()
        .iter()
        .find(|tier| tier.min_rating > current.min_rating)
        .unwrap_or(current);

    let points_to_next = (i64::from(next.min_rating) - i64::from(stats.current_rating))
        .clamp(0, i64::from(Rating::MAX)) as Rating;
    let gain_per_match = rating_efficiency(stats);

    let estimated_matches = if points_to_next == 0 {
        Estimate::Value(0)
    } else {
        match gain_per_match {
            Estimate::Value(rate) if rate > 0.0 => {
                let matches = (f64::from(points_to_next) / rate).ceil();
                if matches <= f64::from(u32::MAX) {
                    Estimate::Value(matches as u32)
                } else {
                    Estimate::Indeterminate
                }
            }
            _ => Estimate::Indeterminate,
        }
    };

    Progression {
        current_tier: current.clone(),
        next_tier: next.clone(),
        points_to_next,
        estimated_matches,
        gain_per_match,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn player(rating: Rating, initial: Rating, matches: u32) -> PlayerStats {
        let mut stats = PlayerStats::new("p", rating);
        stats.initial_rating = initial;
        stats.matches_played = matches;
        stats.lowest_rating = rating.min(initial);
        stats.highest_rating = rating.max(initial);
        stats
    }

    #[test]
    fn test_progression_at_tier_boundary() {
        let ladder = RankLadder::standard();
        let result = progression(&player(1400, 1000, 40), &ladder);

        assert_eq!(result.current_tier.code, "C");
        assert_eq!(result.next_tier.code, "C+");
        assert_eq!(result.points_to_next, 200);
        // 400 points over 40 matches is 10 per match
        assert_eq!(result.gain_per_match, Estimate::Value(10.0));
        assert_eq!(result.estimated_matches, Estimate::Value(20));
    }

    #[test]
    fn test_progression_mid_tier_rounds_up() {
        let ladder = RankLadder::standard();
        let result = progression(&player(1530, 1000, 50), &ladder);
        assert_eq!(result.current_tier.code, "C");
        assert_eq!(result.points_to_next, 70);
        // 10.6 per match, 6.6 matches rounds up to 7
        assert_eq!(result.estimated_matches, Estimate::Value(7));
    }

    #[test]
    fn test_progression_top_tier() {
        let ladder = RankLadder::standard();
        let result = progression(&player(2900, 1000, 500), &ladder);
        assert!(result.is_top_tier());
        assert_eq!(result.next_tier.code, "S+");
        assert_eq!(result.points_to_next, 0);
        assert_eq!(result.estimated_matches, Estimate::Value(0));
    }

    #[test]
    fn test_progression_indeterminate_gain() {
        let ladder = RankLadder::standard();

        let newcomer = progression(&player(1000, 1000, 0), &ladder);
        assert_eq!(newcomer.points_to_next, 200);
        assert!(newcomer.estimated_matches.is_indeterminate());

        let declining = progression(&player(1100, 1300, 20), &ladder);
        assert!(declining.estimated_matches.is_indeterminate());

        let flat = progression(&player(1100, 1100, 20), &ladder);
        assert!(flat.estimated_matches.is_indeterminate());
    }

    #[test]
    fn test_progression_below_lowest_tier() {
        let ladder = RankLadder::standard();
        let result = progression(&player(150, 100, 10), &ladder);
        assert_eq!(result.current_tier.code, "G");
        assert_eq!(result.next_tier.code, "F");
        assert_eq!(result.points_to_next, 250);
    }

    #[test]
    fn test_progression_extreme_low_rating_saturates() {
        let ladder = RankLadder::standard();
        let result = progression(&player(i32::MIN, 1000, 10), &ladder);
        assert_eq!(result.current_tier.code, "G");
        assert_eq!(result.points_to_next, i32::MAX);
        assert!(result.estimated_matches.is_indeterminate());
    }
}

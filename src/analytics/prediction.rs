//! Match outcome prediction
//!
//! Starts from the logistic expected score and nudges it with recent form
//! and consistency. The nudge is applied as a bounded number of rating
//! points inside the logistic, so the probability never leaves (0, 1) and
//! swapping the players gives the complementary answer.

use crate::config::PredictionConfig;
use crate::error::Result;
use crate::rating::expected::expected_score;
use crate::types::{PlayerStats, PredictionResult};
use crate::utils::{rating_difference, round_to_step};
use std::cmp::Ordering;

/// Forward predictor; never touches a rating
#[derive(Debug, Clone, Default)]
pub struct MatchPredictor {
    config: PredictionConfig,
}

impl MatchPredictor {
    pub fn new(config: PredictionConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &PredictionConfig {
        &self.config
    }

    /// Form/consistency adjustment in rating points, in favour of `a`
    pub fn adjustment(&self, a: &PlayerStats, b: &PlayerStats) -> f64 {
        let form = self.config.form_weight * (a.recent_form - b.recent_form);
        let consistency =
            self.config.consistency_weight * (a.consistency_score - b.consistency_score);
        let total = form + consistency;
        if total.is_finite() {
            total.clamp(-self.config.max_adjustment, self.config.max_adjustment)
        } else {
            0.0
        }
    }

    /// Confidence in 0..=100 from history length and volatility
    pub fn confidence(&self, a: &PlayerStats, b: &PlayerStats) -> f64 {
        let fewest = f64::from(a.matches_played.min(b.matches_played));
        let experience = fewest / (fewest + self.config.experience_half_matches);

        let mean_volatility = (a.rating_volatility.max(0.0) + b.rating_volatility.max(0.0)) / 2.0;
        let stability = 1.0 / (1.0 + mean_volatility / self.config.volatility_scale);

        (100.0 * experience * stability).clamp(0.0, 100.0)
    }

    /// Predict a match between `a` (player 1) and `b` (player 2)
    ///
    /// Snapshots are taken as given; [`RatingEngine`](crate::rating::RatingEngine)
    /// validates them before calling this.
    pub fn predict(&self, a: &PlayerStats, b: &PlayerStats) -> PredictionResult {
        let rating_a = f64::from(a.current_rating);
        let rating_b = f64::from(b.current_rating);

        let expected = expected_score(rating_a + self.adjustment(a, b), rating_b);
        let confidence = self.confidence(a, b);

        PredictionResult {
            player1_win_probability: 100.0 * expected,
            player2_win_probability: 100.0 * (1.0 - expected),
            expected_score: expected,
            confidence,
            upset_potential: upset_potential(a, b, expected),
            recommended_stake: self.recommended_stake(
                confidence,
                f64::from(rating_difference(a.current_rating, b.current_rating)),
            ),
        }
    }

    fn recommended_stake(&self, confidence: f64, gap: f64) -> Option<u32> {
        if confidence < self.config.min_stake_confidence {
            return None;
        }

        // Lopsided pairings get smaller stakes
        let fairness = 1.0 - gap.min(400.0) / 800.0;
        let raw = self.config.base_stake * (confidence / 100.0) * fairness;
        let stake = round_to_step(raw, self.config.stake_step);
        if stake >= f64::from(self.config.stake_step) {
            Some(stake as u32)
        } else {
            None
        }
    }
}

/// Upset potential in 0..=100
///
/// The underdog is the lower-rated player, or on equal ratings the one the
/// adjusted model gives the lower chance. An exact tie scores both ways and
/// keeps the larger value, so argument order never matters.
fn upset_potential(a: &PlayerStats, b: &PlayerStats, expected_a: f64) -> f64 {
    let a_underdog = || upset_score(a, b, expected_a);
    let b_underdog = || upset_score(b, a, 1.0 - expected_a);

    match a.current_rating.cmp(&b.current_rating) {
        Ordering::Less => a_underdog(),
        Ordering::Greater => b_underdog(),
        Ordering::Equal => match expected_a.partial_cmp(&0.5) {
            Some(Ordering::Less) => a_underdog(),
            Some(Ordering::Greater) => b_underdog(),
            _ => a_underdog().max(b_underdog()),
        },
    }
}

/// Half comes from how likely the underdog is to win at all, the rest from
/// hot underdog form and cold favourite form.
fn upset_score(underdog: &PlayerStats, favourite: &PlayerStats, underdog_probability: f64) -> f64 {
    let base = (underdog_probability.min(0.5) / 0.5) * 50.0;
    let hot_underdog = underdog.recent_form.clamp(0.0, 100.0) / 100.0 * 25.0;
    let cold_favourite = (-favourite.recent_form).clamp(0.0, 100.0) / 100.0 * 25.0;

    (base + hot_underdog + cold_favourite).clamp(0.0, 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn player(id: &str, rating: i32, matches: u32) -> PlayerStats {
        let mut stats = PlayerStats::new(id, rating);
        stats.matches_played = matches;
        stats.lowest_rating = rating;
        stats.highest_rating = rating;
        stats.rating_volatility = 10.0;
        stats.consistency_score = 60.0;
        stats
    }

    #[test]
    fn test_equal_players() {
        let predictor = MatchPredictor::default();
        let result = predictor.predict(&player("a", 1500, 60), &player("b", 1500, 60));
        assert!((result.player1_win_probability - 50.0).abs() < 1e-9);
        assert!((result.expected_score - 0.5).abs() < 1e-12);
        assert!((result.upset_potential - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_complementary_probabilities() {
        let predictor = MatchPredictor::default();
        let mut a = player("a", 1620, 40);
        a.recent_form = 35.0;
        let mut b = player("b", 1480, 90);
        b.consistency_score = 85.0;

        let forward = predictor.predict(&a, &b);
        let backward = predictor.predict(&b, &a);

        let sum = forward.player1_win_probability + forward.player2_win_probability;
        assert!((sum - 100.0).abs() < 1e-9);
        assert!((forward.player1_win_probability - backward.player2_win_probability).abs() < 1e-9);
        assert!((forward.confidence - backward.confidence).abs() < 1e-9);
    }

    #[test]
    fn test_form_is_a_bounded_perturbation() {
        let predictor = MatchPredictor::default();
        let mut hot = player("hot", 1200, 50);
        hot.recent_form = 100.0;
        hot.consistency_score = 100.0;
        let mut cold = player("cold", 2000, 50);
        cold.recent_form = -100.0;
        cold.consistency_score = 0.0;

        assert_eq!(predictor.adjustment(&hot, &cold), 100.0);

        let result = predictor.predict(&hot, &cold);
        let unadjusted = expected_score(1200.0, 2000.0);
        assert!(result.expected_score > unadjusted);
        // Form alone cannot make an 800-point underdog the favourite
        assert!(result.expected_score < 0.1);
        assert!(result.expected_score > 0.0);
    }

    #[test]
    fn test_confidence_drops_with_volatility_and_short_history() {
        let predictor = MatchPredictor::default();
        let steady = predictor.confidence(&player("a", 1500, 200), &player("b", 1500, 200));

        let mut wild = player("a", 1500, 200);
        wild.rating_volatility = 60.0;
        let volatile = predictor.confidence(&wild, &player("b", 1500, 200));

        let rookie = predictor.confidence(&player("a", 1500, 3), &player("b", 1500, 200));

        assert!(steady > volatile);
        assert!(steady > rookie);
        assert_eq!(predictor.confidence(&player("a", 1500, 0), &player("b", 1500, 0)), 0.0);
    }

    #[test]
    fn test_upset_potential_ignores_argument_order_on_equal_ratings() {
        let predictor = MatchPredictor::default();
        let mut hot = player("hot", 1500, 50);
        hot.recent_form = 80.0;
        let mut cold = player("cold", 1500, 50);
        cold.recent_form = -80.0;

        let forward = predictor.predict(&hot, &cold);
        let backward = predictor.predict(&cold, &hot);
        assert!((forward.upset_potential - backward.upset_potential).abs() < 1e-9);
        // The cold player is the underdog: no hot-underdog or cold-favourite credit
        assert!(forward.upset_potential < 50.0);

        let a = player("a", 1500, 50);
        let b = player("b", 1500, 50);
        assert!((predictor.predict(&a, &b).upset_potential - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_upset_potential_rises_with_underdog_form() {
        let predictor = MatchPredictor::default();
        let underdog = player("u", 1400, 50);
        let favourite = player("f", 1700, 50);
        let baseline = predictor.predict(&underdog, &favourite).upset_potential;

        let mut hot_underdog = underdog.clone();
        hot_underdog.recent_form = 80.0;
        let hot = predictor.predict(&hot_underdog, &favourite).upset_potential;

        let mut cold_favourite = favourite.clone();
        cold_favourite.recent_form = -80.0;
        let cold = predictor.predict(&underdog, &cold_favourite).upset_potential;

        assert!(hot > baseline);
        assert!(cold > baseline);
        assert!(hot <= 100.0 && cold <= 100.0);
    }

    #[test]
    fn test_recommended_stake() {
        let predictor = MatchPredictor::default();
        let veterans = predictor.predict(&player("a", 1500, 400), &player("b", 1500, 400));
        let stake = veterans.recommended_stake.unwrap();
        assert_eq!(stake % 10, 0);
        assert!(stake > 0 && stake <= 100);

        let lopsided = predictor.predict(&player("a", 1100, 400), &player("b", 1900, 400));
        assert!(lopsided.recommended_stake.unwrap() < stake);

        let rookies = predictor.predict(&player("a", 1500, 2), &player("b", 1500, 2));
        assert_eq!(rookies.recommended_stake, None);
    }
}

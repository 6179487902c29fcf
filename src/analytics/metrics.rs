//! Auxiliary player metrics
//!
//! Small pure functions over a player's history. Histories are ordered
//! newest first. Undefined figures are reported as
//! [`Estimate::Indeterminate`] rather than as infinities or NaN.

use crate::types::{Estimate, PlayerStats, Rating};
use serde::{Deserialize, Serialize};

/// Decay applied per step back in time when weighting recent results
pub const FORM_DECAY: f64 = 0.8;

/// Standard deviation of rating deltas at which consistency bottoms out
pub const CONSISTENCY_MAX_STD_DEV: f64 = 50.0;

/// Result of a past match from the player's point of view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchOutcome {
    Win,
    Loss,
}

impl MatchOutcome {
    fn score(self) -> f64 {
        match self {
            MatchOutcome::Win => 1.0,
            MatchOutcome::Loss => -1.0,
        }
    }
}

/// Recency-weighted form in -100..=100 over the newest `window` results
///
/// An empty history is neutral form.
pub fn recent_form(results: &[MatchOutcome], window: usize) -> f64 {
    let mut weight = 1.0;
    let mut weighted = 0.0;
    let mut total_weight = 0.0;

    for outcome in results.iter().take(window) {
        weighted += weight * outcome.score();
        total_weight += weight;
        weight *= FORM_DECAY;
    }

    if total_weight == 0.0 {
        0.0
    } else {
        100.0 * weighted / total_weight
    }
}

/// Mean and population standard deviation
fn mean_and_std_dev(values: &[f64]) -> (f64, f64) {
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
    (mean, variance.max(0.0).sqrt())
}

/// Consistency in 0..=100 from the spread of recent rating deltas
pub fn consistency_score(deltas: &[Rating]) -> Estimate<f64> {
    if deltas.len() < 2 {
        return Estimate::Indeterminate;
    }

    let values: Vec<f64> = deltas.iter().map(|&d| f64::from(d)).collect();
    let (_, std_dev) = mean_and_std_dev(&values);
    Estimate::Value(100.0 * (1.0 - (std_dev / CONSISTENCY_MAX_STD_DEV).min(1.0)))
}

/// Net rating gained per match since ladder entry
pub fn rating_efficiency(stats: &PlayerStats) -> Estimate<f64> {
    if stats.matches_played == 0 {
        return Estimate::Indeterminate;
    }
    let net = f64::from(stats.current_rating) - f64::from(stats.initial_rating);
    Estimate::Value(net / f64::from(stats.matches_played))
}

/// One exponential-moving-average step of volatility
///
/// Volatility tracks the typical magnitude of rating changes; a player with
/// no prior matches simply takes the magnitude of this one.
pub fn smoothed_volatility(previous: f64, delta: Rating, matches_played: u32, window: u32) -> f64 {
    let magnitude = f64::from(delta.unsigned_abs());
    if matches_played == 0 {
        return magnitude;
    }
    let alpha = 2.0 / (f64::from(window.max(1)) + 1.0);
    previous + alpha * (magnitude - previous)
}

/// Volatility over a delta history, oldest delta seeding the average
pub fn rolling_volatility(deltas: &[Rating], window: u32) -> Estimate<f64> {
    let mut oldest_first = deltas.iter().rev();
    let Some(&seed) = oldest_first.next() else {
        return Estimate::Indeterminate;
    };

    let volatility = oldest_first.fold(f64::from(seed.unsigned_abs()), |vol, &delta| {
        smoothed_volatility(vol, delta, 1, window)
    });
    Estimate::Value(volatility)
}

/// Streak after a match: extends a same-signed streak or restarts it
pub fn next_streak(streak: i32, won: bool) -> i32 {
    match (won, streak) {
        (true, s) if s > 0 => s.saturating_add(1),
        (true, _) => 1,
        (false, s) if s < 0 => s.saturating_sub(1),
        (false, _) => -1,
    }
}

/// Win rate percentage from counts
pub fn win_rate(wins: u32, matches_played: u32) -> Estimate<f64> {
    if matches_played == 0 {
        Estimate::Indeterminate
    } else {
        Estimate::Value(100.0 * f64::from(wins.min(matches_played)) / f64::from(matches_played))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use MatchOutcome::{Loss, Win};

    #[test]
    fn test_recent_form_extremes() {
        assert_eq!(recent_form(&[], 10), 0.0);
        assert!((recent_form(&[Win, Win, Win], 10) - 100.0).abs() < 1e-9);
        assert!((recent_form(&[Loss, Loss], 10) + 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_recent_form_weights_newest_results() {
        let improving = recent_form(&[Win, Win, Loss, Loss], 10);
        let declining = recent_form(&[Loss, Loss, Win, Win], 10);
        assert!(improving > 0.0);
        assert!(declining < 0.0);
        assert!((improving + declining).abs() < 1e-9);
    }

    #[test]
    fn test_recent_form_window() {
        let form = recent_form(&[Win, Loss, Loss, Loss], 1);
        assert!((form - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_consistency_score() {
        assert!(consistency_score(&[]).is_indeterminate());
        assert!(consistency_score(&[12]).is_indeterminate());
        assert_eq!(consistency_score(&[10, 10, 10]), Estimate::Value(100.0));

        let steady = consistency_score(&[15, -14, 16, -15]).value().unwrap();
        let erratic = consistency_score(&[40, -60, 5, -2]).value().unwrap();
        assert!(steady > erratic);
        assert_eq!(consistency_score(&[200, -200]), Estimate::Value(0.0));
    }

    #[test]
    fn test_rating_efficiency() {
        let mut stats = PlayerStats::new("alice", 1000);
        assert!(rating_efficiency(&stats).is_indeterminate());

        stats.current_rating = 1200;
        stats.highest_rating = 1200;
        stats.matches_played = 40;
        assert_eq!(rating_efficiency(&stats), Estimate::Value(5.0));

        stats.current_rating = 900;
        stats.lowest_rating = 900;
        assert_eq!(rating_efficiency(&stats), Estimate::Value(-2.5));
    }

    #[test]
    fn test_smoothed_volatility() {
        assert_eq!(smoothed_volatility(0.0, -18, 0, 10), 18.0);

        // Window 10 gives alpha = 2/11
        let vol = smoothed_volatility(11.0, 22, 5, 10);
        assert!((vol - 13.0).abs() < 1e-9);

        let calmer = smoothed_volatility(20.0, 0, 5, 10);
        assert!(calmer < 20.0);
    }

    #[test]
    fn test_rolling_volatility() {
        assert!(rolling_volatility(&[], 10).is_indeterminate());
        assert_eq!(rolling_volatility(&[-16], 10), Estimate::Value(16.0));

        let steady = rolling_volatility(&[16, -16, 16, -16], 10).value().unwrap();
        assert!((steady - 16.0).abs() < 1e-9);
    }

    #[test]
    fn test_next_streak() {
        assert_eq!(next_streak(3, true), 4);
        assert_eq!(next_streak(3, false), -1);
        assert_eq!(next_streak(-2, false), -3);
        assert_eq!(next_streak(-2, true), 1);
        assert_eq!(next_streak(0, true), 1);
        assert_eq!(next_streak(0, false), -1);
    }

    #[test]
    fn test_win_rate() {
        assert!(win_rate(0, 0).is_indeterminate());
        assert_eq!(win_rate(3, 4), Estimate::Value(75.0));
    }
}

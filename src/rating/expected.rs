//! Logistic expected-score model

use crate::types::Rating;

/// Rating difference at which the favourite's odds are ten to one
pub const LOGISTIC_SCALE: f64 = 400.0;

/// Probability that a player rated `rating_a` beats one rated `rating_b`
pub fn expected_score(rating_a: f64, rating_b: f64) -> f64 {
    1.0 / (1.0 + 10f64.powf((rating_b - rating_a) / LOGISTIC_SCALE))
}

/// [`expected_score`] over integer ladder ratings
pub fn expected_score_for(rating_a: Rating, rating_b: Rating) -> f64 {
    expected_score(f64::from(rating_a), f64::from(rating_b))
}

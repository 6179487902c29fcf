//! Utility functions for the rating engine

use crate::types::Rating;

/// Calculate the absolute difference between two ratings
pub fn rating_difference(rating1: Rating, rating2: Rating) -> Rating {
    (i64::from(rating1) - i64::from(rating2))
        .unsigned_abs()
        .min(Rating::MAX as u64) as Rating
}

/// Check if two ratings are within the given tolerance
pub fn ratings_within_tolerance(rating1: Rating, rating2: Rating, tolerance: Rating) -> bool {
    rating_difference(rating1, rating2) <= tolerance
}

/// Round `value` to the nearest multiple of `step`
pub fn round_to_step(value: f64, step: u32) -> f64 {
    let step = f64::from(step.max(1));
    (value / step).round() * step
}

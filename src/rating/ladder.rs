//! Rank ladder
//!
//! An ordered table of (threshold, code, name) entries mapping ratings to
//! named tiers and back. The standard ladder is the 14-tier letter ladder
//! from G up to S+ at 200-point spacing; hosts may load their own.

use crate::error::{EngineError, Result};
use crate::types::Rating;
use serde::{Deserialize, Serialize};

/// Standard ladder, lowest tier first
const STANDARD_TIERS: [(Rating, &str, &str); 14] = [
    (200, "G", "Beginner"),
    (400, "F", "Novice"),
    (600, "E", "Amateur"),
    (800, "E+", "Amateur+"),
    (1000, "D", "Intermediate"),
    (1200, "D+", "Intermediate+"),
    (1400, "C", "Advanced"),
    (1600, "C+", "Advanced+"),
    (1800, "B", "Expert"),
    (2000, "B+", "Expert+"),
    (2200, "A", "Master"),
    (2400, "A+", "Master+"),
    (2600, "S", "Grandmaster"),
    (2800, "S+", "Legend"),
];

/// One rung of the ladder
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankTier {
    pub code: String,
    pub name: String,
    pub min_rating: Rating,
}

impl RankTier {
    pub fn new(code: impl Into<String>, name: impl Into<String>, min_rating: Rating) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
            min_rating,
        }
    }
}

impl std::fmt::Display for RankTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.code, self.name)
    }
}

/// Ordered, validated list of tiers
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RankLadder {
    tiers: Vec<RankTier>,
}

impl RankLadder {
    /// Build a ladder from tiers ordered lowest first
    ///
    /// Thresholds must be strictly increasing and codes unique.
    pub fn new(tiers: Vec<RankTier>) -> Result<Self> {
        if tiers.is_empty() {
            return Err(EngineError::config("Rank ladder must have at least one tier"));
        }

        for pair in tiers.windows(2) {
            if pair[1].min_rating <= pair[0].min_rating {
                return Err(EngineError::config(format!(
                    "Tier {} threshold {} must be above tier {} threshold {}",
                    pair[1].code, pair[1].min_rating, pair[0].code, pair[0].min_rating
                )));
            }
        }

        for (i, tier) in tiers.iter().enumerate() {
            if tier.code.is_empty() {
                return Err(EngineError::config("Tier code cannot be empty"));
            }
            if tiers[..i].iter().any(|other| other.code == tier.code) {
                return Err(EngineError::config(format!(
                    "Duplicate tier code: {}",
                    tier.code
                )));
            }
        }

        Ok(Self { tiers })
    }

    /// The canonical 14-tier ladder
    pub fn standard() -> Self {
        Self {
            tiers: STANDARD_TIERS
                .iter()
                .map(|&(min_rating, code, name)| RankTier::new(code, name, min_rating))
                .collect(),
        }
    }

    pub fn tiers(&self) -> &[RankTier] {
        &self.tiers
    }

    pub fn len(&self) -> usize {
        self.tiers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiers.is_empty()
    }

    pub fn lowest(&self) -> &RankTier {
        &self.tiers[0]
    }

    pub fn highest(&self) -> &RankTier {
        &self.tiers[self.tiers.len() - 1]
    }

    fn index_for(&self, rating: Rating) -> usize {
        self.tiers
            .partition_point(|tier| tier.min_rating <= rating)
            .saturating_sub(1)
    }

    fn index_of(&self, code: &str) -> Result<usize> {
        self.tiers
            .iter()
            .position(|tier| tier.code == code)
            .ok_or_else(|| EngineError::UnknownTier {
                code: code.to_string(),
            })
    }

    /// Highest tier whose threshold does not exceed `rating`
    ///
    /// Ratings below every threshold resolve to the lowest tier.
    pub fn tier_for(&self, rating: Rating) -> &RankTier {
        &self.tiers[self.index_for(rating)]
    }

    /// Minimum rating of the tier with the given code
    pub fn min_rating_for(&self, code: &str) -> Result<Rating> {
        Ok(self.tiers[self.index_of(code)?].min_rating)
    }

    pub fn get(&self, code: &str) -> Result<&RankTier> {
        Ok(&self.tiers[self.index_of(code)?])
    }

    /// Tier above `code`, or the same tier at the top of the ladder
    pub fn next_tier(&self, code: &str) -> Result<&RankTier> {
        let index = self.index_of(code)?;
        Ok(&self.tiers[(index + 1).min(self.tiers.len() - 1)])
    }

    /// Tier below `code`, or the same tier at the bottom of the ladder
    pub fn previous_tier(&self, code: &str) -> Result<&RankTier> {
        let index = self.index_of(code)?;
        Ok(&self.tiers[index.saturating_sub(1)])
    }
}

impl Default for RankLadder {
    fn default() -> Self {
        Self::standard()
    }
}

impl<'de> Deserialize<'de> for RankLadder {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Raw {
            tiers: Vec<RankTier>,
        }

        let raw = Raw::deserialize(deserializer)?;
        RankLadder::new(raw.tiers).map_err(serde::de::Error::custom)
    }
}

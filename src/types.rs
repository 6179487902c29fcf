//! Common types shared by the rating engine, predictor and analytics

use crate::error::{EngineError, Result};
use serde::{Deserialize, Serialize};

/// Unique identifier for players
pub type PlayerId = String;

/// Integer ladder rating. Ratings are rounded once per update.
pub type Rating = i32;

/// Default rating a player enters the ladder with
pub const DEFAULT_INITIAL_RATING: Rating = 1000;

fn default_initial_rating() -> Rating {
    DEFAULT_INITIAL_RATING
}

/// Snapshot of one player's ladder state at computation time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerStats {
    pub player_id: PlayerId,
    pub current_rating: Rating,
    pub highest_rating: Rating,
    pub lowest_rating: Rating,
    /// Rating the player entered the ladder with
    #[serde(default = "default_initial_rating")]
    pub initial_rating: Rating,
    pub matches_played: u32,
    /// Positive for a win streak, negative for a losing streak
    pub current_streak: i32,
    /// Percentage, 0-100
    pub win_rate: f64,
    pub average_opponent_rating: f64,
    pub rating_volatility: f64,
    /// Roughly -100..=100
    pub recent_form: f64,
    /// 0-100
    pub consistency_score: f64,
}

impl PlayerStats {
    /// Fresh player with no history at the given rating
    pub fn new(player_id: impl Into<PlayerId>, rating: Rating) -> Self {
        Self {
            player_id: player_id.into(),
            current_rating: rating,
            highest_rating: rating,
            lowest_rating: rating,
            initial_rating: rating,
            matches_played: 0,
            current_streak: 0,
            win_rate: 0.0,
            average_opponent_rating: rating as f64,
            rating_volatility: 0.0,
            recent_form: 0.0,
            consistency_score: 50.0,
        }
    }

    /// Check the snapshot invariants
    pub fn validate(&self) -> Result<()> {
        let invalid = |reason: String| EngineError::InvalidPlayerStats {
            player_id: self.player_id.clone(),
            reason,
        };

        if self.lowest_rating > self.current_rating || self.current_rating > self.highest_rating {
            return Err(invalid(format!(
                "rating {} outside lifetime range {}..={}",
                self.current_rating, self.lowest_rating, self.highest_rating
            )));
        }
        if !(0.0..=100.0).contains(&self.win_rate) {
            return Err(invalid(format!("win rate {} outside 0..=100", self.win_rate)));
        }
        if !(0.0..=100.0).contains(&self.consistency_score) {
            return Err(invalid(format!(
                "consistency {} outside 0..=100",
                self.consistency_score
            )));
        }
        if !self.rating_volatility.is_finite() || self.rating_volatility < 0.0 {
            return Err(invalid(format!(
                "volatility {} must be finite and non-negative",
                self.rating_volatility
            )));
        }
        if !self.recent_form.is_finite() {
            return Err(invalid("recent form must be finite".to_string()));
        }

        Ok(())
    }

    /// Check that the current rating lies within `floor..=ceiling`
    pub fn validate_rating_bounds(&self, floor: Rating, ceiling: Rating) -> Result<()> {
        if (floor..=ceiling).contains(&self.current_rating) {
            Ok(())
        } else {
            Err(EngineError::InvalidPlayerStats {
                player_id: self.player_id.clone(),
                reason: format!(
                    "rating {} outside configured bounds {}..={}",
                    self.current_rating, floor, ceiling
                ),
            })
        }
    }
}

/// Tournament level, ordered from least to most prestigious
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum TournamentTier {
    Local,
    Regional,
    National,
    International,
}

impl TournamentTier {
    /// Share of the configured tournament multiplier applied at this level
    pub fn weight(self) -> f64 {
        match self {
            TournamentTier::Local => 0.25,
            TournamentTier::Regional => 0.5,
            TournamentTier::National => 0.75,
            TournamentTier::International => 1.0,
        }
    }
}

impl std::fmt::Display for TournamentTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TournamentTier::Local => write!(f, "Local"),
            TournamentTier::Regional => write!(f, "Regional"),
            TournamentTier::National => write!(f, "National"),
            TournamentTier::International => write!(f, "International"),
        }
    }
}

/// Classification of a match
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MatchKind {
    #[default]
    Regular,
    Tournament,
    Challenge,
    Quick,
}

/// Description of the match being rated or predicted
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchContext {
    pub player1_id: PlayerId,
    pub player2_id: PlayerId,
    /// Empty when only predicting
    #[serde(default)]
    pub winner_id: Option<PlayerId>,
    #[serde(default)]
    pub is_tournament: bool,
    #[serde(default)]
    pub tournament_tier: Option<TournamentTier>,
    #[serde(default)]
    pub streak_bonus_eligible: bool,
    /// Externally adjudicated "good match" vote
    #[serde(default)]
    pub is_quality_match: bool,
    /// 1-10
    #[serde(default = "default_quality_score")]
    pub quality_score: u8,
    /// 0-5 hint scaling the upset bonus
    #[serde(default)]
    pub upset_factor: f64,
    #[serde(default)]
    pub challenge_stake: Option<u32>,
    #[serde(default)]
    pub match_kind: MatchKind,
}

fn default_quality_score() -> u8 {
    5
}

impl MatchContext {
    /// Regular, unrated-yet match between two players
    pub fn regular(player1_id: impl Into<PlayerId>, player2_id: impl Into<PlayerId>) -> Self {
        Self {
            player1_id: player1_id.into(),
            player2_id: player2_id.into(),
            winner_id: None,
            is_tournament: false,
            tournament_tier: None,
            streak_bonus_eligible: false,
            is_quality_match: false,
            quality_score: default_quality_score(),
            upset_factor: 0.0,
            challenge_stake: None,
            match_kind: MatchKind::Regular,
        }
    }

    pub fn with_winner(mut self, winner_id: impl Into<PlayerId>) -> Self {
        self.winner_id = Some(winner_id.into());
        self
    }

    pub fn tournament(mut self, tier: TournamentTier) -> Self {
        self.is_tournament = true;
        self.tournament_tier = Some(tier);
        self.match_kind = MatchKind::Tournament;
        self
    }

    pub fn challenge(mut self, stake: u32) -> Self {
        self.challenge_stake = Some(stake);
        self.match_kind = MatchKind::Challenge;
        self
    }

    pub fn quick(mut self) -> Self {
        self.match_kind = MatchKind::Quick;
        self
    }

    pub fn quality(mut self, score: u8, is_quality_match: bool) -> Self {
        self.quality_score = score;
        self.is_quality_match = is_quality_match;
        self
    }

    pub fn streak_bonus(mut self, eligible: bool) -> Self {
        self.streak_bonus_eligible = eligible;
        self
    }

    pub fn upset_hint(mut self, factor: f64) -> Self {
        self.upset_factor = factor;
        self
    }

    /// Whether tournament scaling applies
    pub fn is_tournament_match(&self) -> bool {
        self.is_tournament || self.match_kind == MatchKind::Tournament
    }

    /// Tournament level, falling back to local when unspecified
    pub fn effective_tournament_tier(&self) -> Option<TournamentTier> {
        if self.is_tournament_match() {
            Some(self.tournament_tier.unwrap_or(TournamentTier::Local))
        } else {
            None
        }
    }

    /// Quality score clamped into 1..=10
    pub fn clamped_quality_score(&self) -> f64 {
        f64::from(self.quality_score.clamp(1, 10))
    }

    /// Upset hint clamped into 0..=5
    pub fn clamped_upset_factor(&self) -> f64 {
        if self.upset_factor.is_finite() {
            self.upset_factor.clamp(0.0, 5.0)
        } else {
            0.0
        }
    }

    /// Resolve the declared winner to player 1 (`true`) or player 2 (`false`)
    pub fn player1_won(&self) -> Result<bool> {
        if self.player1_id == self.player2_id {
            return Err(EngineError::SelfMatch {
                player_id: self.player1_id.clone(),
            });
        }
        match self.winner_id.as_deref() {
            Some(winner) if winner == self.player1_id => Ok(true),
            Some(winner) if winner == self.player2_id => Ok(false),
            _ => Err(EngineError::InvalidWinner {
                winner: self.winner_id.clone(),
                player1: self.player1_id.clone(),
                player2: self.player2_id.clone(),
            }),
        }
    }
}

/// Per-player half of a rating update
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerUpdate {
    pub player_id: PlayerId,
    pub old_rating: Rating,
    pub new_rating: Rating,
    /// Signed change after clamping
    pub delta: Rating,
    pub k_factor: f64,
    pub bonus: Rating,
    /// Pre-match expected score, 0-1
    pub expected_score: f64,
    pub volatility: f64,
    pub streak: i32,
    pub highest_rating: Rating,
    pub lowest_rating: Rating,
}

/// Outcome of a completed rating computation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatingUpdateResult {
    pub player1: PlayerUpdate,
    pub player2: PlayerUpdate,
    /// Composite quality, 0-10
    pub match_quality: f64,
    /// How decisive the rating evidence is, 0-1
    pub confidence: f64,
}

/// Forward-looking prediction, no rating is touched
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    /// 0-100
    pub player1_win_probability: f64,
    /// 0-100, complement of player 1
    pub player2_win_probability: f64,
    /// Player 1 expected score, 0-1
    pub expected_score: f64,
    /// 0-100
    pub confidence: f64,
    /// 0-100
    pub upset_potential: f64,
    pub recommended_stake: Option<u32>,
}

/// What a single player stands to gain or lose in a pending match
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatingScenario {
    pub player_id: PlayerId,
    pub current_rating: Rating,
    pub rating_if_win: Rating,
    pub rating_if_loss: Rating,
    pub gain_if_win: Rating,
    pub loss_if_loss: Rating,
}

/// Scenario table for both players of a pending match
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatingScenariosTable {
    pub player1: RatingScenario,
    pub player2: RatingScenario,
}

/// A figure that may be undefined for the given inputs
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Estimate<T> {
    Value(T),
    Indeterminate,
}

impl<T> Estimate<T> {
    pub fn value(self) -> Option<T> {
        match self {
            Estimate::Value(v) => Some(v),
            Estimate::Indeterminate => None,
        }
    }

    pub fn is_indeterminate(&self) -> bool {
        matches!(self, Estimate::Indeterminate)
    }
}

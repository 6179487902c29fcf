//! Rating update engine
//!
//! Combines the expected-score model, the K-factor policy and the bonus
//! policy into a full per-match result. Everything here is a pure function
//! of its arguments; callers persist the returned ratings.

use crate::analytics::metrics::{next_streak, smoothed_volatility};
use crate::analytics::prediction::MatchPredictor;
use crate::analytics::progression::{progression, Progression};
use crate::config::{EngineConfig, PredictionConfig};
use crate::error::{EngineError, Result};
use crate::rating::bonus::bonus;
use crate::rating::expected::expected_score_for;
use crate::rating::k_factor::k_factor;
use crate::rating::ladder::RankLadder;
use crate::types::{
    MatchContext, PlayerStats, PlayerUpdate, PredictionResult, Rating, RatingScenario,
    RatingScenariosTable, RatingUpdateResult,
};
use tracing::{debug, warn};

/// Interface the host application rates and previews matches through
pub trait RatingCalculator: Send + Sync {
    /// Rate a completed match
    fn apply_match(
        &self,
        player1: &PlayerStats,
        player2: &PlayerStats,
        ctx: &MatchContext,
    ) -> Result<RatingUpdateResult>;

    /// Gains and losses each player faces in a pending match
    fn scenarios(
        &self,
        player1: &PlayerStats,
        player2: &PlayerStats,
        ctx: &MatchContext,
    ) -> Result<RatingScenariosTable>;

    /// Forward prediction for a pending match
    ///
    /// Both snapshots are validated first; no rating is changed.
    fn predict(&self, player1: &PlayerStats, player2: &PlayerStats) -> Result<PredictionResult>;

    /// Progress of a player towards the next tier
    fn progression(&self, player: &PlayerStats) -> Result<Progression>;

    fn ladder(&self) -> &RankLadder;

    fn config(&self) -> &EngineConfig;
}

/// Elo-style engine holding a validated configuration and ladder
#[derive(Debug, Clone)]
pub struct RatingEngine {
    config: EngineConfig,
    predictor: MatchPredictor,
    ladder: RankLadder,
}

impl RatingEngine {
    /// Create a new engine, rejecting invalid configuration up front
    pub fn new(
        config: EngineConfig,
        prediction: PredictionConfig,
        ladder: RankLadder,
    ) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            predictor: MatchPredictor::new(prediction)?,
            ladder,
        })
    }

    /// Engine with every default: configuration, prediction weights, ladder
    pub fn standard() -> Self {
        Self {
            config: EngineConfig::DEFAULT,
            predictor: MatchPredictor::default(),
            ladder: RankLadder::standard(),
        }
    }
}

impl Default for RatingEngine {
    fn default() -> Self {
        Self::standard()
    }
}

impl RatingCalculator for RatingEngine {
    fn apply_match(
        &self,
        player1: &PlayerStats,
        player2: &PlayerStats,
        ctx: &MatchContext,
    ) -> Result<RatingUpdateResult> {
        compute_update(player1, player2, ctx, &self.config)
    }

    fn scenarios(
        &self,
        player1: &PlayerStats,
        player2: &PlayerStats,
        ctx: &MatchContext,
    ) -> Result<RatingScenariosTable> {
        compute_scenarios(player1, player2, ctx, &self.config)
    }

    fn predict(&self, player1: &PlayerStats, player2: &PlayerStats) -> Result<PredictionResult> {
        player1.validate()?;
        player2.validate()?;
        Ok(self.predictor.predict(player1, player2))
    }

    fn progression(&self, player: &PlayerStats) -> Result<Progression> {
        player.validate()?;
        player.validate_rating_bounds(self.config.rating_floor, self.config.rating_ceiling)?;
        Ok(progression(player, &self.ladder))
    }

    fn ladder(&self) -> &RankLadder {
        &self.ladder
    }

    fn config(&self) -> &EngineConfig {
        &self.config
    }
}

/// Rate a completed match between `player1` and `player2`
///
/// Fails with [`EngineError::InvalidWinner`] when the context's winner is
/// missing or is neither player, with [`EngineError::SelfMatch`] when both
/// sides name the same player, with [`EngineError::InvalidPlayerStats`] when
/// a rating lies outside the configured floor and ceiling, and with
/// [`EngineError::InvalidConfig`] when `config` is out of bounds. No partial
/// result is ever produced.
pub fn apply_match(
    player1: &PlayerStats,
    player2: &PlayerStats,
    ctx: &MatchContext,
    config: &EngineConfig,
) -> Result<RatingUpdateResult> {
    config.validate()?;
    compute_update(player1, player2, ctx, config)
}

/// Preview the rating change each player faces for either outcome
pub fn scenarios(
    player1: &PlayerStats,
    player2: &PlayerStats,
    ctx: &MatchContext,
    config: &EngineConfig,
) -> Result<RatingScenariosTable> {
    config.validate()?;
    compute_scenarios(player1, player2, ctx, config)
}

fn check_players(
    player1: &PlayerStats,
    player2: &PlayerStats,
    ctx: &MatchContext,
    config: &EngineConfig,
) -> Result<()> {
    for stats in [player1, player2] {
        stats.validate()?;
        stats.validate_rating_bounds(config.rating_floor, config.rating_ceiling)?;
    }

    for (stats, expected) in [(player1, &ctx.player1_id), (player2, &ctx.player2_id)] {
        if &stats.player_id != expected {
            return Err(EngineError::PlayerMismatch {
                expected: expected.clone(),
                actual: stats.player_id.clone(),
            });
        }
    }
    Ok(())
}

/// `round(k * (actual - expected))`
fn base_delta(k: f64, actual: f64, expected: f64) -> Rating {
    (k * (actual - expected)).round() as Rating
}

fn compute_update(
    player1: &PlayerStats,
    player2: &PlayerStats,
    ctx: &MatchContext,
    config: &EngineConfig,
) -> Result<RatingUpdateResult> {
    check_players(player1, player2, ctx, config)?;
    let player1_won = ctx.player1_won()?;

    let expected1 = expected_score_for(player1.current_rating, player2.current_rating);
    let expected2 = 1.0 - expected1;

    let k1 = k_factor(player1, ctx, config);
    let k2 = k_factor(player2, ctx, config);

    let (actual1, actual2) = if player1_won { (1.0, 0.0) } else { (0.0, 1.0) };
    let mut delta1 = base_delta(k1, actual1, expected1);
    let mut delta2 = base_delta(k2, actual2, expected2);

    let (winner, loser) = if player1_won {
        (player1, player2)
    } else {
        (player2, player1)
    };
    let bonuses = bonus(winner, loser, ctx, config);
    let (bonus1, bonus2) = if player1_won {
        (bonuses.winner_total, bonuses.loser_total)
    } else {
        (bonuses.loser_total, bonuses.winner_total)
    };
    delta1 += bonus1;
    delta2 += bonus2;

    let update1 = finish_player(player1, delta1, k1, bonus1, expected1, player1_won, config);
    let update2 = finish_player(player2, delta2, k2, bonus2, expected2, !player1_won, config);

    let balance = 1.0 - 2.0 * (expected1 - 0.5).abs();
    let match_quality = (ctx.clamped_quality_score() + 10.0 * balance) / 2.0;

    let total_matches = f64::from(player1.matches_played) + f64::from(player2.matches_played);
    let confidence = total_matches / (total_matches + config.confidence_half_matches);

    debug!(
        player1 = %update1.player_id,
        player2 = %update2.player_id,
        delta1 = update1.delta,
        delta2 = update2.delta,
        k1,
        k2,
        winner_bonus = bonuses.winner_total,
        "rated match"
    );

    Ok(RatingUpdateResult {
        player1: update1,
        player2: update2,
        match_quality,
        confidence,
    })
}

fn finish_player(
    stats: &PlayerStats,
    unclamped_delta: Rating,
    k: f64,
    bonus: Rating,
    expected: f64,
    won: bool,
    config: &EngineConfig,
) -> PlayerUpdate {
    let unclamped = i64::from(stats.current_rating) + i64::from(unclamped_delta);
    let new_rating = config.clamp_rating(unclamped);
    if i64::from(new_rating) != unclamped {
        warn!(
            player = %stats.player_id,
            unclamped,
            new_rating,
            "rating clamped to configured bounds"
        );
    }
    let delta = new_rating - stats.current_rating;

    PlayerUpdate {
        player_id: stats.player_id.clone(),
        old_rating: stats.current_rating,
        new_rating,
        delta,
        k_factor: k,
        bonus,
        expected_score: expected,
        volatility: smoothed_volatility(
            stats.rating_volatility,
            delta,
            stats.matches_played,
            config.volatility_window,
        ),
        streak: next_streak(stats.current_streak, won),
        highest_rating: stats.highest_rating.max(new_rating),
        lowest_rating: stats.lowest_rating.min(new_rating),
    }
}

fn scenario_for(stats: &PlayerStats, if_win: &PlayerUpdate, if_loss: &PlayerUpdate) -> RatingScenario {
    RatingScenario {
        player_id: stats.player_id.clone(),
        current_rating: stats.current_rating,
        rating_if_win: if_win.new_rating,
        rating_if_loss: if_loss.new_rating,
        gain_if_win: if_win.delta,
        loss_if_loss: if_loss.delta,
    }
}

fn compute_scenarios(
    player1: &PlayerStats,
    player2: &PlayerStats,
    ctx: &MatchContext,
    config: &EngineConfig,
) -> Result<RatingScenariosTable> {
    let player1_wins = ctx.clone().with_winner(ctx.player1_id.clone());
    let player2_wins = ctx.clone().with_winner(ctx.player2_id.clone());

    let first = compute_update(player1, player2, &player1_wins, config)?;
    let second = compute_update(player1, player2, &player2_wins, config)?;

    Ok(RatingScenariosTable {
        player1: scenario_for(player1, &first.player1, &second.player1),
        player2: scenario_for(player2, &second.player2, &first.player2),
    })
}

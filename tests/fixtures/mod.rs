//! Test fixtures: player snapshots and match contexts

#![allow(dead_code)]

use cue_ladder::types::{MatchContext, PlayerStats, Rating};

/// Builder for player snapshots with consistent lifetime ranges
pub struct PlayerBuilder {
    stats: PlayerStats,
}

impl PlayerBuilder {
    pub fn new(id: &str, rating: Rating) -> Self {
        Self {
            stats: PlayerStats::new(id, rating),
        }
    }

    pub fn matches(mut self, matches: u32) -> Self {
        self.stats.matches_played = matches;
        self
    }

    pub fn streak(mut self, streak: i32) -> Self {
        self.stats.current_streak = streak;
        self
    }

    pub fn initial(mut self, initial: Rating) -> Self {
        self.stats.initial_rating = initial;
        self
    }

    pub fn form(mut self, form: f64) -> Self {
        self.stats.recent_form = form;
        self
    }

    pub fn volatility(mut self, volatility: f64) -> Self {
        self.stats.rating_volatility = volatility;
        self
    }

    pub fn consistency(mut self, consistency: f64) -> Self {
        self.stats.consistency_score = consistency;
        self
    }

    pub fn build(mut self) -> PlayerStats {
        let s = &mut self.stats;
        s.lowest_rating = s.lowest_rating.min(s.current_rating).min(s.initial_rating);
        s.highest_rating = s.highest_rating.max(s.current_rating).max(s.initial_rating);
        self.stats
    }
}

/// Established mid-ladder player
pub fn regular_player(id: &str, rating: Rating) -> PlayerStats {
    PlayerBuilder::new(id, rating)
        .matches(50)
        .volatility(14.0)
        .consistency(60.0)
        .build()
}

/// Completed regular match won by `winner`
pub fn won_by(player1: &PlayerStats, player2: &PlayerStats, winner: &PlayerStats) -> MatchContext {
    MatchContext::regular(player1.player_id.clone(), player2.player_id.clone())
        .with_winner(winner.player_id.clone())
}

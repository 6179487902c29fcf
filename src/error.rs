//! Error types for the rating engine
//!
//! Library calls return [`EngineError`] through the [`Result`] alias. Host
//! code (configuration loading, the command-line driver) wraps these in
//! `anyhow` errors with context.

use crate::types::PlayerId;

/// Result type alias for engine operations
pub type Result<T> = std::result::Result<T, EngineError>;

/// Failure modes of the rating engine
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EngineError {
    #[error("Invalid winner {winner:?}: expected {player1} or {player2}")]
    InvalidWinner {
        winner: Option<PlayerId>,
        player1: PlayerId,
        player2: PlayerId,
    },

    #[error("Unknown tier: {code}")]
    UnknownTier { code: String },

    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },

    #[error("Invalid stats for player {player_id}: {reason}")]
    InvalidPlayerStats { player_id: PlayerId, reason: String },

    #[error("Player {actual} does not match context player {expected}")]
    PlayerMismatch { expected: PlayerId, actual: PlayerId },

    #[error("Player {player_id} cannot play against themselves")]
    SelfMatch { player_id: PlayerId },
}

impl EngineError {
    pub(crate) fn config(message: impl Into<String>) -> Self {
        EngineError::InvalidConfig {
            message: message.into(),
        }
    }
}

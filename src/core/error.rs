//! Error types for the turn engine.
//!
//! Every rejected input leaves the game state untouched: validation runs
//! before any mutation, so callers can retry the same operation with
//! corrected parameters. Only `Configuration` is fatal, and it can only be
//! produced while a game is being created.
//!
//! There is no deck exhaustion error: decks reshuffle their discard
//! piles and never run out.

use thiserror::Error;

use super::player::PlayerId;
use crate::account::{AssetId, LiabilityId};
use crate::rules::{GamePhase, TurnPhase};

/// Main error type for engine operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Insufficient funds: required {required}, available {available}")]
    InsufficientFunds { required: i64, available: i64 },

    #[error("Invalid move: cannot {action} during {phase:?}")]
    InvalidMove { phase: TurnPhase, action: &'static str },

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Game is not in progress (phase {phase:?})")]
    NotInProgress { phase: GamePhase },

    #[error("Unknown player: {0}")]
    UnknownPlayer(PlayerId),

    #[error("Unknown asset: {0}")]
    UnknownAsset(AssetId),

    #[error("Unknown liability: {0}")]
    UnknownLiability(LiabilityId),

    #[error("Out of time: action needs {required}h, {remaining}h left this turn")]
    OutOfTime { required: u32, remaining: u32 },
}

impl GameError {
    /// Shorthand for a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        GameError::Configuration(msg.into())
    }

    /// Shorthand for an invalid-input error.
    pub fn input(msg: impl Into<String>) -> Self {
        GameError::InvalidInput(msg.into())
    }

    /// Whether this error prevents the game from being created.
    #[must_use]
    pub fn is_fatal(&self) -> bool {
        matches!(self, GameError::Configuration(_))
    }
}

/// Result type alias for engine operations.
pub type Result<T> = std::result::Result<T, GameError>;

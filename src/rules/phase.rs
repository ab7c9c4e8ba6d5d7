//! Game-level and turn-level phases.

use serde::{Deserialize, Serialize};

/// Lifecycle of the whole game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GamePhase {
    /// Created, not started.
    Waiting,
    InProgress,
    /// Turn processing suspended; state intact.
    Paused,
    Ended,
}

/// Where the active player's turn stands.
///
/// ```text
/// AwaitingRoll → Moving → ResolvingSquare ─┬─────────────────────────→ TurnComplete
///                                           ├→ ResolvingCardDecision ─→ TurnComplete
///                                           ├→ MarketPhase ───────────→ TurnComplete
///                                           └→ LayerTransition ───────→ TurnComplete
/// ```
///
/// `Moving` and `ResolvingSquare` are passed through within a single
/// `submit_roll`; the engine only ever rests in the other phases.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TurnPhase {
    AwaitingRoll,
    Moving,
    ResolvingSquare,
    ResolvingCardDecision,
    MarketPhase,
    LayerTransition,
    TurnComplete,
    GameOver,
}

impl TurnPhase {
    /// Phases in which the engine waits for input.
    #[must_use]
    pub fn awaits_input(self) -> bool {
        matches!(
            self,
            TurnPhase::AwaitingRoll
                | TurnPhase::ResolvingCardDecision
                | TurnPhase::MarketPhase
                | TurnPhase::LayerTransition
                | TurnPhase::TurnComplete
        )
    }
}

impl std::fmt::Display for TurnPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{self:?}")
    }
}

//! Event log and presentation notifications.
//!
//! `EventRecord`s form the append-only audit trail of a game, kept in an
//! `im::Vector` so snapshots of a state share it. `Notification`s are the
//! advisory messages a front end drains to know what to redraw.

use serde::{Deserialize, Serialize};

use super::player::PlayerId;
use crate::account::{AssetId, LiabilityId};
use crate::board::{BoardPosition, Layer};
use crate::cards::{CardId, CardType};
use crate::rules::{BranchChoice, DeclineReason, GameResult, MarketAction, TurnPhase};
use crate::squares::SquareOutcome;

/// A state change.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    GameStarted { players: usize },
    Paused,
    Resumed,
    PhaseChanged { from: TurnPhase, to: TurnPhase },
    DiceRolled { value: u32 },
    Moved { from: BoardPosition, to: BoardPosition, laps: u32 },
    LapCompleted { layer: Layer, paycheck: Option<i64> },
    LayerTransitioned { from: BoardPosition, to: BoardPosition },
    SquareResolved { at: BoardPosition, outcome: SquareOutcome },
    /// A lap paycheck or landing effect failed after the move; the turn
    /// continues without it.
    EffectFailed { at: BoardPosition, reason: String },
    CardDrawn { card_type: CardType, card: CardId },
    CardAccepted { card: CardId, asset: AssetId, liability: Option<LiabilityId> },
    CardDeclined { card: CardId, reason: DeclineReason },
    MarketTrade { action: MarketAction },
    BranchChosen { choice: BranchChoice },
    DownsizingTicked { turns_left: u32 },
    TurnAbandoned,
    TurnEnded { next: PlayerId },
    GameOver { result: GameResult },
}

/// A logged event with its position in the game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventRecord {
    /// Position in the log, from 0.
    pub sequence: u64,
    pub turn: u32,
    /// Active player when the event happened.
    pub player: PlayerId,
    pub event: GameEvent,
}

/// Advisory message for the presentation layer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Notification {
    TurnPhaseChanged { player: PlayerId, phase: TurnPhase },
    PlayerStateChanged { player: PlayerId },
    CardDrawn { player: PlayerId, card: CardId, card_type: CardType },
    LayerTransitioned { player: PlayerId, from: BoardPosition, to: BoardPosition },
    GameOver { result: GameResult },
}

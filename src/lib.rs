//! # cashflow-engine
//!
//! A deterministic turn engine for a three-ring personal finance board game.
//!
//! ## Design Principles
//!
//! 1. **Input-driven**: The engine never advances on its own. A front end
//!    (or a `PlayerAgent`) submits a roll, a card decision, a market action
//!    or a branch choice, and the state machine answers with the new phase.
//!
//! 2. **N-Player First**: Per-player data lives in `PlayerMap`; nothing
//!    assumes two players.
//!
//! 3. **Configuration Over Convention**: Board, cards, professions and
//!    policy constants come from `GameConfig`, validated once at startup.
//!
//! 4. **Deterministic**: One seed drives dice, doodad costs, card-type
//!    selection and deck shuffles. Same seed and same inputs give the same
//!    game.
//!
//! ## Modules
//!
//! - `core`: players, RNG, configuration, errors, event log
//! - `account`: cash, assets, liabilities and the ledger
//! - `cards`: card templates, registry and decks
//! - `board`: layers, positions and movement
//! - `squares`: landing effects
//! - `rules`: the turn state machine, market actions and drivers
//! - `games`: the standard preset
//!
//! ```
//! use cashflow_engine::{run_game, CautiousAgent, PlayerAgent, PlayerMap};
//! use cashflow_engine::games::standard::StandardGameBuilder;
//!
//! let mut state = StandardGameBuilder::new().player_count(2).build(42).unwrap();
//! let mut agents = PlayerMap::new(2, |_| Box::new(CautiousAgent::default()) as Box<dyn PlayerAgent>);
//! let result = run_game(&mut state, &mut agents, 50).unwrap();
//! println!("{result:?}");
//! ```

pub mod account;
pub mod board;
pub mod cards;
pub mod core;
pub mod games;
pub mod rules;
pub mod squares;

// Re-export commonly used types
pub use crate::core::{
    CardCatalog, CardTypeWeights, EventRecord, GameConfig, GameError, GameEvent, GameRng, GameRngState,
    Notification, PlayerId, PlayerMap, PlayerSetup, ProfessionPreset, Result, RulesConfig,
};

pub use crate::account::{
    Account, AcquisitionTerms, Asset, AssetId, AssetKind, EntryKind, LedgerEntry, Liability, LiabilityCause,
    LiabilityId,
};

pub use crate::cards::{Card, CardId, CardKind, CardRegistry, CardType, DeckManager, PurchaseTerms};

pub use crate::board::{Board, BoardLayout, BoardPosition, Layer, MovePath, Movement, Square, SquareKind, SquareType};

pub use crate::squares::{resolve_landing, LandingContext, ProfileChange, SquareOutcome};

pub use crate::rules::{
    play_turn, run_game, BranchChoice, CardDecision, CardResolution, CautiousAgent, DeclineReason, GamePhase,
    GameResult, GameState, MarketAction, PlayerAgent, RollReport, TurnPhase,
};

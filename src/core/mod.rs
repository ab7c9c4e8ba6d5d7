//! Core engine types: players, RNG, configuration, errors and the event log.
//!
//! Nothing in here knows about a particular board or card set. Games
//! configure the engine through `GameConfig` rather than modifying the core.

pub mod config;
pub mod error;
pub mod event;
pub mod player;
pub mod rng;

pub use config::{CardCatalog, CardTypeWeights, GameConfig, PlayerSetup, ProfessionPreset, RulesConfig};
pub use error::{GameError, Result};
pub use event::{EventRecord, GameEvent, Notification};
pub use player::{PlayerId, PlayerMap};
pub use rng::{GameRng, GameRngState};

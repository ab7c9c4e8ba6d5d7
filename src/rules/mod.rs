//! Turn engine: phases, inputs, the `GameState` state machine and drivers.
//!
//! Front ends call the `submit_*` operations on `GameState`; the engine never
//! advances on its own. `PlayerAgent` + `play_turn` script those calls for
//! tests, benchmarks and the simulator.

pub mod driver;
pub mod engine;
pub mod market;
pub mod phase;
pub mod result;

pub use driver::{play_turn, run_game, CautiousAgent, PlayerAgent};
pub use engine::{GameState, RollReport, Seat, TurnState};
pub use market::{BranchChoice, CardDecision, CardResolution, DeclineReason, MarketAction};
pub use phase::{GamePhase, TurnPhase};
pub use result::GameResult;

//! Driving a game with scripted players.
//!
//! A `PlayerAgent` answers the engine's questions; `play_turn` feeds those
//! answers through the ordinary input operations until the turn has passed
//! to the next player. Any front end can do the same by hand.

use log::debug;

use super::engine::GameState;
use super::market::{BranchChoice, CardDecision, MarketAction};
use super::phase::TurnPhase;
use super::result::GameResult;
use crate::cards::{Card, CardKind};
use crate::core::{GameError, PlayerMap, Result};

/// Decision maker for one seat.
pub trait PlayerAgent {
    /// Accept or decline a drawn card.
    fn decide_card(&mut self, state: &GameState, card: &Card) -> CardDecision;

    /// Next market action; return `MarketAction::Exit` when done.
    fn market_action(&mut self, state: &GameState) -> MarketAction;

    /// Stay on the inner layer or leave for the middle layer.
    fn choose_branch(&mut self, state: &GameState) -> BranchChoice;
}

/// Play the active player's turn to the end.
///
/// Rolls with the game RNG. A rejected card decision falls back to
/// declining; a rejected market action leaves the market. Returns without
/// error when the game ends mid-turn.
pub fn play_turn(state: &mut GameState, agent: &mut dyn PlayerAgent) -> Result<()> {
    if state.turn_phase() == TurnPhase::AwaitingRoll {
        let roll = state.roll_dice();
        state.submit_roll(roll)?;
    }

    loop {
        match state.turn_phase() {
            TurnPhase::ResolvingCardDecision => {
                let Some(card) = state.pending_card().cloned() else {
                    return Err(GameError::input("no card is pending"));
                };
                let decision = agent.decide_card(state, &card);
                if let Err(e) = state.submit_card_decision(decision) {
                    debug!("card decision rejected ({e}); declining");
                    state.submit_card_decision(CardDecision::Decline)?;
                }
            }
            TurnPhase::MarketPhase => {
                let action = agent.market_action(state);
                if let Err(e) = state.submit_market_action(action) {
                    debug!("market action rejected ({e}); leaving the market");
                    state.submit_market_action(MarketAction::Exit)?;
                }
            }
            TurnPhase::LayerTransition => {
                let choice = agent.choose_branch(state);
                if state.submit_layer_choice(choice).is_err() {
                    state.submit_layer_choice(BranchChoice::Stay)?;
                }
            }
            TurnPhase::TurnComplete => {
                state.end_turn()?;
                return Ok(());
            }
            TurnPhase::GameOver => return Ok(()),
            phase => {
                return Err(GameError::InvalidMove {
                    phase,
                    action: "continue the turn",
                })
            }
        }
    }
}

/// Play whole turns until someone wins or `max_turns` turns have passed.
///
/// Hitting the turn limit yields `GameResult::Draw`.
pub fn run_game(
    state: &mut GameState,
    agents: &mut PlayerMap<Box<dyn PlayerAgent>>,
    max_turns: u32,
) -> Result<GameResult> {
    while !state.is_over() && state.turn_number() <= max_turns {
        let player = state.active_player();
        play_turn(state, agents[player].as_mut())?;
    }
    Ok(state.result().cloned().unwrap_or(GameResult::Draw))
}

/// Buys only what it can pay for while keeping a cash reserve, pays off
/// debt in the market and never leaves the inner layer.
#[derive(Clone, Debug)]
pub struct CautiousAgent {
    /// Cash kept back from every purchase.
    pub reserve: i64,
}

impl CautiousAgent {
    #[must_use]
    pub fn new(reserve: i64) -> Self {
        Self { reserve }
    }
}

impl Default for CautiousAgent {
    fn default() -> Self {
        Self::new(1_000)
    }
}

impl PlayerAgent for CautiousAgent {
    fn decide_card(&mut self, state: &GameState, card: &Card) -> CardDecision {
        let budget = state.account(state.active_player()).cash() - self.reserve;

        let shares = match card.kind {
            CardKind::Financial {
                price_per_share,
                min_shares,
                max_shares,
                ..
            } if price_per_share > 0 => {
                let affordable = (budget / price_per_share).clamp(0, i64::from(max_shares));
                let count = u32::try_from(affordable).unwrap_or(0);
                if count < min_shares {
                    return CardDecision::Decline;
                }
                Some(count)
            }
            _ => None,
        };

        match card.terms(shares) {
            Ok(terms) if terms.cash_flow > 0 && terms.upfront <= budget => CardDecision::Accept { shares },
            _ => CardDecision::Decline,
        }
    }

    fn market_action(&mut self, state: &GameState) -> MarketAction {
        let account = state.account(state.active_player());
        let spare = account.cash() - self.reserve;
        account
            .liabilities()
            .iter()
            .filter(|l| l.balance <= spare)
            .max_by_key(|l| l.monthly_payment)
            .map_or(MarketAction::Exit, |l| MarketAction::PayOffLiability { liability: l.id })
    }

    fn choose_branch(&mut self, _state: &GameState) -> BranchChoice {
        BranchChoice::Stay
    }
}

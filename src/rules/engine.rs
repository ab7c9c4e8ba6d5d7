//! The turn engine.
//!
//! `GameState` owns every player, the board and the decks, and advances only
//! when a front end submits an input: a roll, a card decision, a market
//! action, a branch choice or the end of the turn. Each input is checked
//! against the current phase first; a rejected input leaves the state (and
//! the phase) exactly as it was so the same call can be retried.
//!
//! ## Example
//!
//! ```
//! use cashflow_engine::games::standard::StandardGameBuilder;
//! use cashflow_engine::rules::TurnPhase;
//!
//! let mut game = StandardGameBuilder::new().player_count(2).build(7).unwrap();
//! assert_eq!(game.turn_phase(), TurnPhase::AwaitingRoll);
//!
//! // Dice are external input; `roll_dice` is a convenience for drivers.
//! let roll = game.roll_dice();
//! game.submit_roll(roll).unwrap();
//! assert!(game.turn_phase().awaits_input());
//! ```

use std::sync::Arc;

use im::Vector;
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use super::market::{BranchChoice, CardDecision, CardResolution, DeclineReason, MarketAction};
use super::phase::{GamePhase, TurnPhase};
use super::result::GameResult;
use crate::account::{
    transfer_asset, AcquisitionTerms, Account, Asset, AssetKind, IdAllocator, Liability, LiabilityCause,
};
use crate::board::{Board, BoardPosition, Layer, MovePath, MIDDLE_LEN};
use crate::cards::{Card, CardKind, DeckManager};
use crate::core::{
    EventRecord, GameConfig, GameError, GameEvent, GameRng, GameRngState, Notification, PlayerId, PlayerMap, PlayerSetup,
    Result, RulesConfig,
};
use crate::squares::{pay_paycheck, resolve_landing, LandingContext, ProfileChange, SquareOutcome};

/// Who sits in a seat and where their token is.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Seat {
    pub name: String,
    pub profession: String,
    pub position: BoardPosition,
}

/// Scratch state of the active turn, reset by `end_turn`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TurnState {
    pub roll: Option<u32>,
    pub path: Option<MovePath>,
    pub pending_card: Option<Card>,
    /// Hours left for side businesses and market actions.
    pub time_remaining: u32,
    /// The downsizing counter does not tick on the turn it was set.
    pub downsized_this_turn: bool,
}

/// What a roll did.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RollReport {
    pub roll: u32,
    pub path: MovePath,
    /// Paycheck credited for completing a lap, if any.
    pub lap_paycheck: Option<i64>,
    pub outcome: SquareOutcome,
    /// The card drawn, if the square asked for one.
    pub card: Option<Card>,
}

/// Complete state of one game.
#[derive(Clone, Debug)]
pub struct GameState {
    rules: Arc<RulesConfig>,
    board: Arc<Board>,
    deck: DeckManager,

    seats: PlayerMap<Seat>,
    accounts: PlayerMap<Account>,
    ids: IdAllocator,

    game_phase: GamePhase,
    turn_phase: TurnPhase,
    active: PlayerId,
    turn_number: u32,
    round: u32,
    turn: TurnState,

    rng: GameRng,
    events: Vector<EventRecord>,
    notifications: Vec<Notification>,
    result: Option<GameResult>,
}

impl GameState {
    /// Create a game in the `Waiting` phase.
    ///
    /// Fails with `GameError::Configuration` on invalid configuration, an
    /// unknown profession or a player count outside the configured range.
    pub fn new(config: &GameConfig, players: &[PlayerSetup], seed: u64) -> Result<Self> {
        config.validate()?;
        config.validate_players(players)?;

        let rules = config.rules.clone();
        let board = Board::from_layout(config.board.clone())?;
        let registry = config.catalog.to_registry()?;
        let rng = GameRng::new(seed);
        let deck = DeckManager::new(Arc::new(registry), &rng)?;

        let mut accounts = Vec::with_capacity(players.len());
        let mut seats = Vec::with_capacity(players.len());
        for (setup, id) in players.iter().zip(PlayerId::all(players.len())) {
            let preset = config.profession(&setup.profession)?;
            accounts.push(
                Account::new(id, preset.salary, preset.starting_cash, preset.starting_expenses)
                    .with_per_dependent_expense(rules.per_child_expense)
                    .with_negative_cash(rules.allow_negative_cash),
            );
            seats.push(Seat {
                name: setup.name.clone(),
                profession: preset.name.clone(),
                position: rules.starting_position,
            });
        }

        let turn = TurnState {
            time_remaining: rules.turn_time_budget,
            ..TurnState::default()
        };

        Ok(Self {
            rules: Arc::new(rules),
            board: Arc::new(board),
            deck,
            seats: PlayerMap::from_vec(seats),
            accounts: PlayerMap::from_vec(accounts),
            ids: IdAllocator::new(),
            game_phase: GamePhase::Waiting,
            turn_phase: TurnPhase::AwaitingRoll,
            active: PlayerId::new(0),
            turn_number: 1,
            round: 1,
            turn,
            rng,
            events: Vector::new(),
            notifications: Vec::new(),
            result: None,
        })
    }

    // === Game lifecycle ===

    /// Move from `Waiting` to `InProgress`.
    pub fn start(&mut self) -> Result<()> {
        if self.game_phase != GamePhase::Waiting {
            return Err(GameError::input(format!("cannot start a game in phase {:?}", self.game_phase)));
        }
        self.game_phase = GamePhase::InProgress;
        info!("game started with {} players", self.player_count());
        self.record(GameEvent::GameStarted {
            players: self.player_count(),
        });
        self.notify(Notification::TurnPhaseChanged {
            player: self.active,
            phase: self.turn_phase,
        });
        self.check_game_over();
        Ok(())
    }

    /// Suspend turn processing.
    pub fn pause(&mut self) -> Result<()> {
        self.ensure_in_progress()?;
        self.game_phase = GamePhase::Paused;
        info!("game paused during {}", self.turn_phase);
        self.record(GameEvent::Paused);
        Ok(())
    }

    /// Continue a paused game where it stopped.
    pub fn resume(&mut self) -> Result<()> {
        if self.game_phase != GamePhase::Paused {
            return Err(GameError::NotInProgress {
                phase: self.game_phase,
            });
        }
        self.game_phase = GamePhase::InProgress;
        info!("game resumed");
        self.record(GameEvent::Resumed);
        Ok(())
    }

    // === Inputs ===

    /// Roll a value with the configured dice from the game RNG.
    ///
    /// Does not advance the game; pass the value to `submit_roll`.
    pub fn roll_dice(&mut self) -> u32 {
        self.rng.roll_dice(self.rules.dice_count, self.rules.dice_sides)
    }

    /// Move the active player by `value` and resolve where they land.
    pub fn submit_roll(&mut self, value: u32) -> Result<RollReport> {
        self.ensure_in_progress()?;
        self.expect_phase(TurnPhase::AwaitingRoll, "roll")?;

        let min = u32::from(self.rules.dice_count);
        let max = min * u32::from(self.rules.dice_sides);
        if value < min || value > max {
            return Err(GameError::input(format!("roll {value} outside {min}..={max}")));
        }

        let player = self.active;
        let from = self.seats[player].position;
        let path = self.board.plan_move(from, value)?;

        self.turn.roll = Some(value);
        self.record(GameEvent::DiceRolled { value });
        self.set_phase(TurnPhase::Moving);

        // Walk to the landing square; pay for any completed lap on the way.
        let landing = path.stops[0];
        self.seats[player].position = landing;
        self.record(GameEvent::Moved {
            from,
            to: landing,
            laps: path.movement.laps,
        });

        let mut lap_paycheck = None;
        if path.movement.laps > 0 {
            if self.rules.lap_pays_paycheck {
                match pay_paycheck(&mut self.accounts[player], &mut self.ids, &self.rules, self.turn_number) {
                    Ok(paid) => lap_paycheck = paid,
                    Err(err) => self.effect_failed(player, landing, &err),
                }
            }
            self.record(GameEvent::LapCompleted {
                layer: landing.layer,
                paycheck: lap_paycheck,
            });
        }

        // Transition squares relocate before anything resolves.
        let resting = path.final_position();
        if path.transitioned() {
            self.relocate(player, resting);
        }

        // The move is committed; a failing effect is logged and skipped so
        // the turn can still end.
        self.set_phase(TurnPhase::ResolvingSquare);
        let outcome = match self.resolve_square(player, resting) {
            Ok(outcome) => outcome,
            Err(err) => {
                self.effect_failed(player, resting, &err);
                SquareOutcome::NoOp
            }
        };

        let mut card = None;
        let next_phase = match &outcome {
            SquareOutcome::CardDraw { card_type } => {
                let drawn = self.deck.draw(*card_type, player, self.turn_number);
                debug!("{player} drew {} ({})", drawn.name, card_type);
                self.record(GameEvent::CardDrawn {
                    card_type: *card_type,
                    card: drawn.id,
                });
                self.notify(Notification::CardDrawn {
                    player,
                    card: drawn.id,
                    card_type: *card_type,
                });
                self.turn.pending_card = Some(drawn.clone());
                card = Some(drawn);
                TurnPhase::ResolvingCardDecision
            }
            SquareOutcome::MarketOpened => TurnPhase::MarketPhase,
            SquareOutcome::BranchOffered => TurnPhase::LayerTransition,
            SquareOutcome::ProfileChanged(ProfileChange::Downsized { .. }) => {
                self.turn.downsized_this_turn = true;
                TurnPhase::TurnComplete
            }
            _ => TurnPhase::TurnComplete,
        };

        self.turn.path = Some(path.clone());
        self.notify(Notification::PlayerStateChanged { player });
        self.set_phase(next_phase);
        self.check_game_over();

        Ok(RollReport {
            roll: value,
            path,
            lap_paycheck,
            outcome,
            card,
        })
    }

    /// Accept or decline the pending card.
    ///
    /// An unaffordable card, or a side business that needs more hours than
    /// are left, is declined automatically. An invalid share count is
    /// rejected and the decision can be made again.
    pub fn submit_card_decision(&mut self, decision: CardDecision) -> Result<CardResolution> {
        self.ensure_in_progress()?;
        self.expect_phase(TurnPhase::ResolvingCardDecision, "decide on a card")?;
        let card = self
            .turn
            .pending_card
            .clone()
            .ok_or_else(|| GameError::input("no card is pending"))?;

        let shares = match decision {
            CardDecision::Decline => {
                return Ok(self.decline_card(&card, DeclineReason::Declined));
            }
            CardDecision::Accept { shares } => shares,
        };

        let terms = card.terms(shares)?;
        let player = self.active;
        let available = self.accounts[player].cash();
        if terms.time_cost > self.turn.time_remaining {
            let reason = DeclineReason::OutOfTime {
                required: terms.time_cost,
                remaining: self.turn.time_remaining,
            };
            return Ok(self.decline_card(&card, reason));
        }
        if terms.upfront > available {
            let reason = DeclineReason::Unaffordable {
                required: terms.upfront,
                available,
            };
            return Ok(self.decline_card(&card, reason));
        }

        // Ids are only consumed once the purchase has gone through.
        let asset_id = self.ids.peek_asset();
        let asset = match card.kind {
            CardKind::Financial {
                price_per_share,
                dividend_per_share,
                ..
            } => Asset::shares(
                asset_id,
                card.name.clone(),
                terms.shares.unwrap_or(0),
                price_per_share,
                dividend_per_share,
            ),
            _ => Asset::new(
                asset_id,
                card.name.clone(),
                AssetKind::from(card.card_type()),
                AcquisitionTerms {
                    cost: terms.cost,
                    down_payment: terms.upfront,
                    cash_flow: terms.cash_flow,
                },
            ),
        }
        .with_source_card(card.id);

        let loan = if terms.loan_amount > 0 {
            Some(Liability::loan(
                self.ids.peek_liability(),
                format!("{} loan", card.name),
                terms.loan_amount,
                self.rules.loan_rate_bps,
                LiabilityCause::PurchaseLoan { asset: asset_id },
            )?)
        } else {
            None
        };
        let liability = loan.as_ref().map(|l| l.id);

        self.accounts[player].purchase(asset, terms.upfront, loan)?;
        self.ids.asset();
        if liability.is_some() {
            self.ids.liability();
        }
        self.turn.time_remaining -= terms.time_cost;
        self.turn.pending_card = None;

        debug!("{player} bought {} for {} down", card.name, terms.upfront);
        self.record(GameEvent::CardAccepted {
            card: card.id,
            asset: asset_id,
            liability,
        });
        self.notify(Notification::PlayerStateChanged { player });
        self.set_phase(TurnPhase::TurnComplete);
        self.check_game_over();

        Ok(CardResolution::Accepted {
            asset: asset_id,
            liability,
        })
    }

    /// Apply one market action for the active player.
    ///
    /// Trades keep the game in `MarketPhase`; `Exit` completes the turn.
    pub fn submit_market_action(&mut self, action: MarketAction) -> Result<()> {
        self.ensure_in_progress()?;
        self.expect_phase(TurnPhase::MarketPhase, "trade")?;

        if action == MarketAction::Exit {
            self.record(GameEvent::MarketTrade { action });
            self.set_phase(TurnPhase::TurnComplete);
            return Ok(());
        }

        let cost = self.rules.market_action_time;
        if cost > self.turn.time_remaining {
            return Err(GameError::OutOfTime {
                required: cost,
                remaining: self.turn.time_remaining,
            });
        }

        let player = self.active;
        match action {
            MarketAction::SellToBank { asset, price } => {
                self.accounts[player].sell_asset(asset, price)?;
            }
            MarketAction::SellToPlayer { asset, buyer, price } => {
                transfer_asset(&mut self.accounts, player, buyer, asset, price)?;
                self.notify(Notification::PlayerStateChanged { player: buyer });
            }
            MarketAction::SellShares {
                asset,
                count,
                price_per_share,
            } => {
                self.accounts[player].sell_shares(asset, count, price_per_share)?;
            }
            MarketAction::PayOffLiability { liability } => {
                self.accounts[player].pay_off_liability(liability)?;
            }
            MarketAction::TakeLoan { amount } => {
                if amount <= 0 {
                    return Err(GameError::input("loan amount must be positive"));
                }
                let loan = Liability::bank_loan(self.ids.peek_liability(), amount, self.rules.loan_rate_bps)?;
                self.accounts[player].take_loan(loan)?;
                self.ids.liability();
            }
            MarketAction::Exit => {}
        }

        self.turn.time_remaining -= cost;
        debug!("{player} market action {action:?}");
        self.record(GameEvent::MarketTrade { action });
        self.notify(Notification::PlayerStateChanged { player });
        self.check_game_over();
        Ok(())
    }

    /// Answer the branch offer on the inner layer.
    ///
    /// Leaving for the middle layer does not resolve the square arrived at.
    pub fn submit_layer_choice(&mut self, choice: BranchChoice) -> Result<()> {
        self.ensure_in_progress()?;
        self.expect_phase(TurnPhase::LayerTransition, "choose a branch")?;

        if let BranchChoice::ExitToMiddle { position } = choice {
            if position >= MIDDLE_LEN {
                return Err(GameError::input(format!(
                    "middle layer has {MIDDLE_LEN} squares, not {}",
                    position + 1
                )));
            }
            self.relocate(self.active, BoardPosition::new(Layer::Middle, position));
        }

        self.record(GameEvent::BranchChosen { choice });
        self.set_phase(TurnPhase::TurnComplete);
        Ok(())
    }

    /// Finish the turn and pass play to the next player.
    ///
    /// Returns the new active player.
    pub fn end_turn(&mut self) -> Result<PlayerId> {
        self.ensure_in_progress()?;
        self.expect_phase(TurnPhase::TurnComplete, "end the turn")?;
        Ok(self.advance_turn())
    }

    /// Drop whatever the active player still has pending and pass play on.
    ///
    /// Allowed only while the engine waits for input.
    pub fn abandon_turn(&mut self) -> Result<PlayerId> {
        self.ensure_in_progress()?;
        if !self.turn_phase.awaits_input() {
            return Err(GameError::InvalidMove {
                phase: self.turn_phase,
                action: "abandon the turn",
            });
        }

        if let Some(card) = self.turn.pending_card.clone() {
            self.decline_card(&card, DeclineReason::Abandoned);
        }
        info!("{} abandoned turn {}", self.active, self.turn_number);
        self.record(GameEvent::TurnAbandoned);
        self.set_phase(TurnPhase::TurnComplete);
        Ok(self.advance_turn())
    }

    /// Hand all queued notifications to the caller.
    pub fn drain_notifications(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.notifications)
    }

    // === Queries ===

    #[must_use]
    pub fn rules(&self) -> &RulesConfig {
        &self.rules
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[must_use]
    pub fn deck(&self) -> &DeckManager {
        &self.deck
    }

    #[must_use]
    pub fn player_count(&self) -> usize {
        self.accounts.player_count()
    }

    #[must_use]
    pub fn accounts(&self) -> &PlayerMap<Account> {
        &self.accounts
    }

    /// A player's account. Panics on an out-of-range id, like `PlayerMap`.
    #[must_use]
    pub fn account(&self, player: PlayerId) -> &Account {
        &self.accounts[player]
    }

    #[must_use]
    pub fn seat(&self, player: PlayerId) -> &Seat {
        &self.seats[player]
    }

    #[must_use]
    pub fn position(&self, player: PlayerId) -> BoardPosition {
        self.seats[player].position
    }

    #[must_use]
    pub fn game_phase(&self) -> GamePhase {
        self.game_phase
    }

    #[must_use]
    pub fn turn_phase(&self) -> TurnPhase {
        self.turn_phase
    }

    #[must_use]
    pub fn active_player(&self) -> PlayerId {
        self.active
    }

    /// Global turn counter, starting at 1.
    #[must_use]
    pub fn turn_number(&self) -> u32 {
        self.turn_number
    }

    /// Completed trips around the table, starting at 1.
    #[must_use]
    pub fn round(&self) -> u32 {
        self.round
    }

    #[must_use]
    pub fn turn_state(&self) -> &TurnState {
        &self.turn
    }

    #[must_use]
    pub fn pending_card(&self) -> Option<&Card> {
        self.turn.pending_card.as_ref()
    }

    #[must_use]
    pub fn time_remaining(&self) -> u32 {
        self.turn.time_remaining
    }

    #[must_use]
    pub fn events(&self) -> &Vector<EventRecord> {
        &self.events
    }

    /// Position of the game RNG, for checkpoints.
    #[must_use]
    pub fn rng_state(&self) -> GameRngState {
        self.rng.state()
    }

    #[must_use]
    pub fn result(&self) -> Option<&GameResult> {
        self.result.as_ref()
    }

    #[must_use]
    pub fn is_over(&self) -> bool {
        self.game_phase == GamePhase::Ended
    }

    // === Internals ===

    fn ensure_in_progress(&self) -> Result<()> {
        if self.game_phase != GamePhase::InProgress {
            return Err(GameError::NotInProgress {
                phase: self.game_phase,
            });
        }
        Ok(())
    }

    fn expect_phase(&self, phase: TurnPhase, action: &'static str) -> Result<()> {
        if self.turn_phase != phase {
            return Err(GameError::InvalidMove {
                phase: self.turn_phase,
                action,
            });
        }
        Ok(())
    }

    fn set_phase(&mut self, to: TurnPhase) {
        let from = self.turn_phase;
        if from == to {
            return;
        }
        debug!("{} {from} -> {to}", self.active);
        self.turn_phase = to;
        self.record(GameEvent::PhaseChanged { from, to });
        self.notify(Notification::TurnPhaseChanged {
            player: self.active,
            phase: to,
        });
    }

    fn relocate(&mut self, player: PlayerId, to: BoardPosition) {
        let from = self.seats[player].position;
        self.seats[player].position = to;
        debug!("{player} moved {from} -> {to}");
        self.record(GameEvent::LayerTransitioned { from, to });
        self.notify(Notification::LayerTransitioned { player, from, to });
    }

    fn resolve_square(&mut self, player: PlayerId, at: BoardPosition) -> Result<SquareOutcome> {
        let board = Arc::clone(&self.board);
        let square = board
            .square(at)
            .ok_or_else(|| GameError::input(format!("no square at {at}")))?;

        let mut ctx = LandingContext {
            player,
            position: at,
            square,
            accounts: &mut self.accounts,
            ids: &mut self.ids,
            rng: &mut self.rng,
            rules: &self.rules,
            turn: self.turn_number,
        };
        let outcome = resolve_landing(&mut ctx)?;

        debug!("{player} landed on {} at {at}: {outcome:?}", square.name);
        if let SquareOutcome::CharityDonated { recipients, .. } = &outcome {
            for &p in recipients {
                self.notify(Notification::PlayerStateChanged { player: p });
            }
        }
        self.record(GameEvent::SquareResolved {
            at,
            outcome: outcome.clone(),
        });
        Ok(outcome)
    }

    fn effect_failed(&mut self, player: PlayerId, at: BoardPosition, err: &GameError) {
        warn!("{player}: effect at {at} failed: {err}");
        self.record(GameEvent::EffectFailed {
            at,
            reason: err.to_string(),
        });
    }

    fn decline_card(&mut self, card: &Card, reason: DeclineReason) -> CardResolution {
        debug!("{} declined {}: {reason:?}", self.active, card.name);
        self.turn.pending_card = None;
        self.record(GameEvent::CardDeclined { card: card.id, reason });
        self.set_phase(TurnPhase::TurnComplete);
        CardResolution::Declined(reason)
    }

    fn advance_turn(&mut self) -> PlayerId {
        let player = self.active;
        if !self.turn.downsized_this_turn && self.accounts[player].is_downsized() {
            let turns_left = self.accounts[player].tick_downsizing();
            self.record(GameEvent::DownsizingTicked { turns_left });
        }

        let next = player.next(self.player_count());
        self.record(GameEvent::TurnEnded { next });
        self.turn_number += 1;
        if next.index() == 0 {
            self.round += 1;
        }
        self.active = next;
        self.turn = TurnState {
            time_remaining: self.rules.turn_time_budget,
            ..TurnState::default()
        };
        self.set_phase(TurnPhase::AwaitingRoll);
        next
    }

    fn check_game_over(&mut self) {
        if self.game_phase == GamePhase::Ended {
            return;
        }
        let winners: Vec<PlayerId> = self
            .accounts
            .iter()
            .filter(|(_, a)| a.is_financially_free())
            .map(|(p, _)| p)
            .collect();
        if winners.is_empty() {
            return;
        }

        let result = GameResult::from_winners(winners);
        info!("game over after {} turns: {result:?}", self.turn_number);
        self.game_phase = GamePhase::Ended;
        self.set_phase(TurnPhase::GameOver);
        self.record(GameEvent::GameOver {
            result: result.clone(),
        });
        self.notify(Notification::GameOver {
            result: result.clone(),
        });
        self.result = Some(result);
    }

    fn record(&mut self, event: GameEvent) {
        let record = EventRecord {
            sequence: self.events.len() as u64,
            turn: self.turn_number,
            player: self.active,
            event,
        };
        self.events.push_back(record);
    }

    fn notify(&mut self, notification: Notification) {
        self.notifications.push(notification);
    }
}

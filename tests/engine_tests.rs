//! Turn engine scenarios.
//!
//! Each test builds a small game from the standard preset, adjusts rules,
//! cards or professions where the scenario needs it, and drives the engine
//! through its input operations with fixed rolls.

use cashflow_engine::games::standard::standard_config;
use cashflow_engine::{
    AssetId, BoardPosition, BranchChoice, Card, CardDecision, CardId, CardKind, CardResolution, CardType, CardTypeWeights,
    DeclineReason, GameConfig, GameError, GameEvent, GamePhase, GameResult, GameState, Layer, LiabilityCause,
    MarketAction, Notification, PlayerId, PlayerSetup, ProfessionPreset, ProfileChange, SquareOutcome, TurnPhase,
};

const P0: PlayerId = PlayerId(0);
const P1: PlayerId = PlayerId(1);

fn start_game(config: &GameConfig, players: &[(&str, &str)], seed: u64) -> GameState {
    let seats: Vec<_> = players.iter().map(|(n, p)| PlayerSetup::new(*n, *p)).collect();
    let mut state = GameState::new(config, &seats, seed).unwrap();
    state.start().unwrap();
    state
}

fn config_with(edit: impl FnOnce(&mut GameConfig)) -> GameConfig {
    let mut config = standard_config();
    edit(&mut config);
    config
}

fn starting_at(layer: Layer, index: usize) -> GameConfig {
    config_with(|c| c.rules.starting_position = BoardPosition::new(layer, index))
}

fn only_cards(card_type: CardType) -> GameConfig {
    config_with(|c| c.rules.card_type_weights = CardTypeWeights::only(card_type))
}

/// Salary 3000 with no assets: a paycheck adds exactly 3000.
#[test]
fn test_paycheck_scenario() {
    let config = config_with(|c| c.professions.push(ProfessionPreset::new("clerk", 3_000, 5_000, 2_000)));
    let mut state = start_game(&config, &[("Ann", "clerk"), ("Bo", "teacher")], 1);

    let report = state.submit_roll(1).unwrap();
    assert_eq!(state.position(P0), BoardPosition::new(Layer::Middle, 1));
    assert_eq!(report.outcome, SquareOutcome::Income { amount: 3_000 });
    assert_eq!(state.account(P0).cash(), 8_000);
    assert!(!state.account(P0).is_financially_free());
    assert_eq!(state.turn_phase(), TurnPhase::TurnComplete);
}

/// Declining a drawn card changes nothing but is still in the draw history.
#[test]
fn test_declined_card_scenario() {
    let config = config_with(|c| {
        c.rules.card_type_weights = CardTypeWeights::only(CardType::Opportunity);
        c.catalog.cards.retain(|card| card.card_type() != CardType::Opportunity);
        c.catalog.cards.push(Card::new(
            CardId::new(100),
            "Duplex",
            CardKind::Opportunity {
                cost: 20_000,
                down_payment: 2_000,
                cash_flow: 300,
            },
        ));
    });
    let mut state = start_game(&config, &[("Ann", "engineer"), ("Bo", "teacher")], 2);
    let cash = state.account(P0).cash();

    let report = state.submit_roll(2).unwrap();
    assert_eq!(report.card.as_ref().map(|c| c.id), Some(CardId::new(100)));
    assert_eq!(state.turn_phase(), TurnPhase::ResolvingCardDecision);

    let resolution = state.submit_card_decision(CardDecision::Decline).unwrap();
    assert_eq!(resolution, CardResolution::Declined(DeclineReason::Declined));
    assert_eq!(state.account(P0).cash(), cash);
    assert!(state.account(P0).assets().is_empty());
    assert_eq!(state.turn_phase(), TurnPhase::TurnComplete);

    let history = state.deck().history();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].card_id, CardId::new(100));
    assert_eq!(history[0].player, P0);
    assert_eq!(history[0].turn, 1);
}

/// Inner 3 rolling 4 lands on 7 with no branch; only an exact landing on 5
/// offers one.
#[test]
fn test_inner_branch_scenario() {
    let config = starting_at(Layer::Inner, 3);
    let mut state = start_game(&config, &[("A", "engineer"), ("B", "teacher"), ("C", "nurse")], 3);

    let report = state.submit_roll(4).unwrap();
    assert_eq!(state.position(P0), BoardPosition::new(Layer::Inner, 7));
    assert!(!report.path.movement.branch_available);
    assert_ne!(state.turn_phase(), TurnPhase::LayerTransition);
    if state.turn_phase() == TurnPhase::TurnComplete {
        state.end_turn().unwrap();
    } else {
        state.abandon_turn().unwrap();
    }

    // Exact landing on the branch square.
    state.submit_roll(2).unwrap();
    assert_eq!(state.turn_phase(), TurnPhase::LayerTransition);
    let err = state
        .submit_layer_choice(BranchChoice::ExitToMiddle { position: 30 })
        .unwrap_err();
    assert!(matches!(err, GameError::InvalidInput(_)));
    assert_eq!(state.turn_phase(), TurnPhase::LayerTransition);

    state
        .submit_layer_choice(BranchChoice::ExitToMiddle { position: 8 })
        .unwrap();
    assert_eq!(state.position(P1), BoardPosition::new(Layer::Middle, 8));
    assert_eq!(state.turn_phase(), TurnPhase::TurnComplete);
    assert!(state.pending_card().is_none());
    state.end_turn().unwrap();

    // Passing through index 5 lands on 6 and offers nothing.
    state.submit_roll(3).unwrap();
    assert_eq!(state.position(PlayerId::new(2)), BoardPosition::new(Layer::Inner, 6));
    assert_eq!(state.turn_phase(), TurnPhase::ResolvingCardDecision);
}

/// Staying on the inner layer keeps the player on the branch square.
#[test]
fn test_branch_stay() {
    let config = starting_at(Layer::Inner, 0);
    let mut state = start_game(&config, &[("A", "engineer"), ("B", "teacher")], 4);

    state.submit_roll(5).unwrap();
    state.submit_layer_choice(BranchChoice::Stay).unwrap();
    assert_eq!(state.position(P0), BoardPosition::new(Layer::Inner, 5));
    assert!(state
        .events()
        .iter()
        .any(|r| r.event == GameEvent::BranchChosen { choice: BranchChoice::Stay }));
}

/// A transition square relocates first; the target square then resolves.
#[test]
fn test_transition_resolves_destination() {
    let config = starting_at(Layer::Middle, 4);
    let mut state = start_game(&config, &[("A", "engineer"), ("B", "teacher")], 5);
    let cash = state.account(P0).cash();

    let report = state.submit_roll(2).unwrap();
    assert!(report.path.transitioned());
    assert_eq!(state.position(P0), BoardPosition::new(Layer::Inner, 9));
    // Inner 9 is charity; without dependents it does nothing.
    assert_eq!(report.outcome, SquareOutcome::NoOp);
    assert_eq!(state.account(P0).cash(), cash);

    let notes = state.drain_notifications();
    assert!(notes.iter().any(|n| matches!(
        n,
        Notification::LayerTransitioned {
            player: P0,
            to: BoardPosition {
                layer: Layer::Inner,
                index: 9
            },
            ..
        }
    )));
}

/// Passing the start square pays one paycheck even when landing on a
/// paycheck square in the same turn.
#[test]
fn test_lap_paycheck_paid_once() {
    let config = starting_at(Layer::Middle, 22);
    let mut state = start_game(&config, &[("A", "engineer"), ("B", "teacher")], 6);
    let cash = state.account(P0).cash();

    let report = state.submit_roll(3).unwrap();
    assert_eq!(state.position(P0), BoardPosition::new(Layer::Middle, 1));
    assert_eq!(report.path.movement.laps, 1);
    assert_eq!(report.lap_paycheck, Some(5_000));
    assert_eq!(report.outcome, SquareOutcome::NoOp);
    assert_eq!(state.account(P0).cash(), cash + 5_000);
}

/// Cards whose down payment exceeds cash are declined automatically.
#[test]
fn test_unaffordable_card_auto_declined() {
    let config = only_cards(CardType::Opportunity);
    let mut state = start_game(&config, &[("A", "nurse"), ("B", "teacher")], 7);

    state.submit_roll(2).unwrap();
    let resolution = state.submit_card_decision(CardDecision::ACCEPT).unwrap();
    assert!(matches!(
        resolution,
        CardResolution::Declined(DeclineReason::Unaffordable { available: 7_000, .. })
    ));
    assert!(state.account(P0).assets().is_empty());
    assert_eq!(state.account(P0).cash(), 7_000);
    assert_eq!(state.turn_phase(), TurnPhase::TurnComplete);
}

/// Accepting a financed card adds the asset and its purchase loan.
#[test]
fn test_financed_purchase() {
    let config = only_cards(CardType::Enterprise);
    let mut state = start_game(&config, &[("A", "doctor"), ("B", "teacher")], 8);

    let report = state.submit_roll(2).unwrap();
    let card = report.card.unwrap();
    let terms = card.terms(None).unwrap();

    let resolution = state.submit_card_decision(CardDecision::ACCEPT).unwrap();
    let CardResolution::Accepted { asset, liability } = resolution else {
        panic!("expected a purchase, got {resolution:?}");
    };

    let account = state.account(P0);
    assert_eq!(account.cash(), 15_000 - terms.upfront);
    assert_eq!(account.passive_income(), terms.cash_flow);
    let loan = account.liability(liability.unwrap()).unwrap();
    assert_eq!(loan.balance, terms.loan_amount);
    assert_eq!(loan.cause, LiabilityCause::PurchaseLoan { asset });
    assert_eq!(loan.monthly_payment, (terms.loan_amount * 100 + 9_999) / 10_000);
    assert_eq!(account.asset(asset).and_then(|a| a.source_card()), Some(card.id));
}

/// A bad share count is rejected and the decision can be retried.
#[test]
fn test_share_count_validated() {
    let config = only_cards(CardType::Financial);
    let mut state = start_game(&config, &[("A", "engineer"), ("B", "teacher")], 9);

    state.submit_roll(2).unwrap();
    let err = state
        .submit_card_decision(CardDecision::Accept { shares: Some(5) })
        .unwrap_err();
    assert!(matches!(err, GameError::InvalidInput(_)));
    assert_eq!(state.turn_phase(), TurnPhase::ResolvingCardDecision);
    assert!(state.pending_card().is_some());

    let resolution = state
        .submit_card_decision(CardDecision::Accept { shares: Some(20) })
        .unwrap();
    let CardResolution::Accepted { asset, liability } = resolution else {
        panic!("expected a purchase, got {resolution:?}");
    };
    assert!(liability.is_none());
    assert_eq!(state.account(P0).asset(asset).and_then(|a| a.share_count()), Some(20));
}

/// A side business needing more hours than are left is declined.
#[test]
fn test_side_business_time_cost() {
    let config = config_with(|c| {
        c.rules.card_type_weights = CardTypeWeights::only(CardType::SideBusiness);
        c.rules.turn_time_budget = 5;
    });
    let mut state = start_game(&config, &[("A", "engineer"), ("B", "teacher")], 10);

    state.submit_roll(2).unwrap();
    let resolution = state.submit_card_decision(CardDecision::ACCEPT).unwrap();
    assert!(matches!(
        resolution,
        CardResolution::Declined(DeclineReason::OutOfTime { remaining: 5, .. })
    ));
}

/// Market actions spend time; running out is rejected without leaving the
/// market.
#[test]
fn test_market_loans_and_time() {
    let config = config_with(|c| {
        c.rules.starting_position = BoardPosition::new(Layer::Middle, 4);
        c.rules.turn_time_budget = 3;
    });
    let mut state = start_game(&config, &[("A", "engineer"), ("B", "teacher")], 11);

    state.submit_roll(1).unwrap();
    assert_eq!(state.turn_phase(), TurnPhase::MarketPhase);

    state.submit_market_action(MarketAction::TakeLoan { amount: 5_000 }).unwrap();
    assert_eq!(state.account(P0).cash(), 15_000);
    assert_eq!(state.account(P0).total_debt(), 5_000);
    assert_eq!(state.time_remaining(), 1);

    let loan = state.account(P0).liabilities()[0].id;
    let err = state
        .submit_market_action(MarketAction::PayOffLiability { liability: loan })
        .unwrap_err();
    assert_eq!(err, GameError::OutOfTime { required: 2, remaining: 1 });
    assert_eq!(state.turn_phase(), TurnPhase::MarketPhase);
    assert_eq!(state.account(P0).total_debt(), 5_000);

    state.submit_market_action(MarketAction::Exit).unwrap();
    assert_eq!(state.turn_phase(), TurnPhase::TurnComplete);
}

/// Paying off a loan in the market removes it and its payment.
#[test]
fn test_market_pay_off() {
    let config = starting_at(Layer::Middle, 4);
    let mut state = start_game(&config, &[("A", "engineer"), ("B", "teacher")], 12);

    state.submit_roll(1).unwrap();
    state.submit_market_action(MarketAction::TakeLoan { amount: 3_000 }).unwrap();
    let loan = state.account(P0).liabilities()[0].id;
    state
        .submit_market_action(MarketAction::PayOffLiability { liability: loan })
        .unwrap();
    assert_eq!(state.account(P0).cash(), 10_000);
    assert!(state.account(P0).liabilities().is_empty());
    assert_eq!(state.account(P0).total_expense(), 2_500);
}

/// A doodad the player cannot pay is covered by a rounded-up forced loan.
#[test]
fn test_doodad_forces_loan() {
    let config = config_with(|c| c.professions.push(ProfessionPreset::new("intern", 1_000, 0, 500)));
    let mut state = start_game(&config, &[("A", "intern"), ("B", "teacher")], 13);

    let report = state.submit_roll(3).unwrap();
    let SquareOutcome::Expense { amount, forced_loan, .. } = report.outcome else {
        panic!("expected an expense, got {:?}", report.outcome);
    };
    assert!((800..=1_500).contains(&amount));

    let (id, loan) = forced_loan.unwrap();
    assert_eq!(loan % 1_000, 0);
    assert!(loan >= amount);
    let account = state.account(P0);
    assert_eq!(account.cash(), loan - amount);
    assert_eq!(account.liability(id).map(|l| l.cause), Some(LiabilityCause::ForcedLoan));
}

/// Charity with no dependents leaves cash alone.
#[test]
fn test_charity_without_dependents() {
    let config = starting_at(Layer::Middle, 5);
    let mut state = start_game(&config, &[("A", "engineer"), ("B", "teacher")], 14);
    let before = state.accounts().clone();

    let report = state.submit_roll(2).unwrap();
    assert_eq!(report.outcome, SquareOutcome::NoOp);
    assert_eq!(state.accounts(), &before);
}

/// A baby raises expenses; charity then pays base × dependents to the others.
#[test]
fn test_baby_then_charity() {
    let config = starting_at(Layer::Middle, 12);
    let mut state = start_game(&config, &[("A", "engineer"), ("B", "teacher")], 15);

    let report = state.submit_roll(2).unwrap();
    assert_eq!(
        report.outcome,
        SquareOutcome::ProfileChanged(ProfileChange::DependentAdded { dependents: 1 })
    );
    assert_eq!(state.account(P0).total_expense(), 2_800);
    state.end_turn().unwrap();

    state.submit_roll(1).unwrap();
    state.abandon_turn().unwrap();

    let (a, b) = (state.account(P0).cash(), state.account(P1).cash());
    let report = state.submit_roll(6).unwrap();
    assert_eq!(state.position(P0), BoardPosition::new(Layer::Middle, 20));
    assert_eq!(
        report.outcome,
        SquareOutcome::CharityDonated {
            share: 100,
            recipients: vec![P1]
        }
    );
    assert_eq!(state.account(P0).cash(), a - 100);
    assert_eq!(state.account(P1).cash(), b + 100);
}

/// Downsizing zeroes salary for two of the player's later turns.
#[test]
fn test_downsizing_expires() {
    let config = starting_at(Layer::Middle, 5);
    let mut state = start_game(&config, &[("A", "engineer"), ("B", "teacher")], 16);

    state.submit_roll(6).unwrap();
    assert!(state.account(P0).is_downsized());
    assert_eq!(state.account(P0).effective_salary(), 0);
    state.end_turn().unwrap();
    assert_eq!(state.account(P0).downsized_turns(), 2);

    // P1 somewhere harmless.
    state.submit_roll(2).unwrap();
    if state.turn_phase() == TurnPhase::TurnComplete {
        state.end_turn().unwrap();
    } else {
        state.abandon_turn().unwrap();
    }

    // Middle 12 is a paycheck: no salary while downsized.
    let report = state.submit_roll(1).unwrap();
    assert_eq!(report.outcome, SquareOutcome::Income { amount: 0 });
    state.end_turn().unwrap();
    assert_eq!(state.account(P0).downsized_turns(), 1);

    state.submit_roll(1).unwrap();
    state.abandon_turn().unwrap();

    state.submit_roll(1).unwrap();
    state.abandon_turn().unwrap();
    assert_eq!(state.account(P0).downsized_turns(), 0);
    assert_eq!(state.account(P0).effective_salary(), 5_000);
}

/// Covering expenses with passive income ends the game.
#[test]
fn test_game_over_on_financial_freedom() {
    let config = config_with(|c| {
        c.rules.card_type_weights = CardTypeWeights::only(CardType::SideBusiness);
        c.professions.push(ProfessionPreset::new("retiree", 0, 5_000, 300));
    });
    let mut state = start_game(&config, &[("A", "retiree"), ("B", "teacher")], 17);

    state.submit_roll(2).unwrap();
    state.submit_card_decision(CardDecision::ACCEPT).unwrap();

    assert!(state.account(P0).is_financially_free());
    assert!(state.is_over());
    assert_eq!(state.game_phase(), GamePhase::Ended);
    assert_eq!(state.turn_phase(), TurnPhase::GameOver);
    assert_eq!(state.result(), Some(&GameResult::Winner(P0)));
    assert_eq!(
        state.end_turn().unwrap_err(),
        GameError::NotInProgress {
            phase: GamePhase::Ended
        }
    );
    assert!(state
        .drain_notifications()
        .iter()
        .any(|n| matches!(n, Notification::GameOver { .. })));
}

/// Inputs for the wrong phase are rejected and leave the phase alone.
#[test]
fn test_out_of_phase_inputs() {
    let config = standard_config();
    let mut state = start_game(&config, &[("A", "engineer"), ("B", "teacher")], 18);

    assert!(matches!(
        state.submit_card_decision(CardDecision::Decline),
        Err(GameError::InvalidMove {
            phase: TurnPhase::AwaitingRoll,
            ..
        })
    ));
    assert!(matches!(
        state.submit_market_action(MarketAction::Exit),
        Err(GameError::InvalidMove { .. })
    ));
    assert!(matches!(
        state.submit_layer_choice(BranchChoice::Stay),
        Err(GameError::InvalidMove { .. })
    ));
    assert_eq!(state.turn_phase(), TurnPhase::AwaitingRoll);
}

/// Configuration problems are fatal at creation.
#[test]
fn test_bad_configuration_rejected() {
    let config = config_with(|c| {
        c.board.inner.pop();
    });
    let seats = [PlayerSetup::new("A", "engineer"), PlayerSetup::new("B", "teacher")];
    assert!(GameState::new(&config, &seats, 0).unwrap_err().is_fatal());

    let seats = [PlayerSetup::new("A", "engineer"), PlayerSetup::new("B", "astronaut")];
    assert!(GameState::new(&standard_config(), &seats, 0).unwrap_err().is_fatal());
}

/// The standard configuration survives a JSON round trip.
#[test]
fn test_config_json_round_trip() {
    let config = standard_config();
    let json = config.to_json_string().unwrap();
    let parsed = GameConfig::from_json_str(&json).unwrap();
    assert_eq!(parsed, config);
}

/// P0 buys a 20-share lot on middle 2, P1 passes on middle 4, and P0 then
/// stops at the middle 5 market holding the shares.
fn holding_shares_at_market(seed: u64) -> (GameState, AssetId) {
    let config = only_cards(CardType::Financial);
    let mut state = start_game(&config, &[("A", "engineer"), ("B", "teacher")], seed);

    state.submit_roll(2).unwrap();
    let resolution = state
        .submit_card_decision(CardDecision::Accept { shares: Some(20) })
        .unwrap();
    let CardResolution::Accepted { asset, .. } = resolution else {
        panic!("expected a purchase, got {resolution:?}");
    };
    state.end_turn().unwrap();

    state.submit_roll(4).unwrap();
    state.submit_card_decision(CardDecision::Decline).unwrap();
    state.end_turn().unwrap();

    state.submit_roll(3).unwrap();
    assert_eq!(state.turn_phase(), TurnPhase::MarketPhase);
    assert_eq!(state.time_remaining(), 20);
    (state, asset)
}

/// Selling part of a share lot keeps the rest and lowers passive income.
#[test]
fn test_market_sell_shares_partial() {
    let (mut state, asset) = holding_shares_at_market(21);
    let dividend = state.account(P0).asset(asset).and_then(|a| a.holding()).unwrap().dividend_per_share;
    let cash = state.account(P0).cash();
    assert_eq!(state.account(P0).passive_income(), 20 * dividend);

    state
        .submit_market_action(MarketAction::SellShares {
            asset,
            count: 5,
            price_per_share: 80,
        })
        .unwrap();

    let account = state.account(P0);
    assert_eq!(account.asset(asset).and_then(|a| a.share_count()), Some(15));
    assert_eq!(account.passive_income(), 15 * dividend);
    assert_eq!(account.cash(), cash + 400);
    assert_eq!(state.time_remaining(), 18);
    assert_eq!(state.turn_phase(), TurnPhase::MarketPhase);
}

/// Selling a whole asset to the bank credits the price and drops its income.
#[test]
fn test_market_sell_to_bank() {
    let (mut state, asset) = holding_shares_at_market(22);
    let cash = state.account(P0).cash();

    state
        .submit_market_action(MarketAction::SellToBank { asset, price: 2_500 })
        .unwrap();

    assert!(state.account(P0).asset(asset).is_none());
    assert_eq!(state.account(P0).cash(), cash + 2_500);
    assert_eq!(state.account(P0).passive_income(), 0);
    assert_eq!(state.time_remaining(), 18);
}

/// A sale the buyer cannot afford changes nothing; an affordable one moves
/// cash and the asset and tells the buyer.
#[test]
fn test_market_sell_to_player() {
    let (mut state, asset) = holding_shares_at_market(23);
    let before = state.accounts().clone();
    let buyer_cash = state.account(P1).cash();
    state.drain_notifications();

    let err = state
        .submit_market_action(MarketAction::SellToPlayer {
            asset,
            buyer: P1,
            price: 1_000_000,
        })
        .unwrap_err();
    assert_eq!(
        err,
        GameError::InsufficientFunds {
            required: 1_000_000,
            available: buyer_cash
        }
    );
    assert_eq!(state.accounts(), &before);
    assert_eq!(state.turn_phase(), TurnPhase::MarketPhase);
    assert_eq!(state.time_remaining(), 20);

    state
        .submit_market_action(MarketAction::SellToPlayer {
            asset,
            buyer: P1,
            price: 1_500,
        })
        .unwrap();

    assert_eq!(state.account(P0).cash(), before[P0].cash() + 1_500);
    assert_eq!(state.account(P1).cash(), buyer_cash - 1_500);
    assert!(state.account(P0).asset(asset).is_none());
    assert_eq!(state.account(P1).asset(asset).and_then(|a| a.owner()), Some(P1));
    assert_eq!(state.account(P0).passive_income(), 0);
    assert_eq!(state.time_remaining(), 18);
    assert!(state
        .drain_notifications()
        .contains(&Notification::PlayerStateChanged { player: P1 }));
}

/// Amounts too large to represent are rejected as input and can be retried.
#[test]
fn test_market_rejects_out_of_range_amounts() {
    let (mut state, asset) = holding_shares_at_market(24);
    let before = state.accounts().clone();

    let attempts = [
        MarketAction::TakeLoan { amount: i64::MAX },
        MarketAction::TakeLoan { amount: i64::MAX / 50 },
        MarketAction::SellToBank { asset, price: i64::MAX },
        MarketAction::SellShares {
            asset,
            count: 10,
            price_per_share: i64::MAX,
        },
    ];
    for action in attempts {
        let err = state.submit_market_action(action).unwrap_err();
        assert!(matches!(err, GameError::InvalidInput(_)), "{action:?}: {err:?}");
        assert_eq!(state.turn_phase(), TurnPhase::MarketPhase);
        assert_eq!(state.time_remaining(), 20);
        assert_eq!(state.accounts(), &before);
    }

    state.submit_market_action(MarketAction::TakeLoan { amount: 5_000 }).unwrap();
    assert_eq!(state.account(P0).total_debt(), 5_000);
}

/// A landing effect that cannot be applied is logged and the turn still
/// completes.
#[test]
fn test_failed_landing_effect_completes_turn() {
    let config = config_with(|c| c.professions.push(ProfessionPreset::new("tycoon", i64::MAX, 1, 1)));
    let mut state = start_game(&config, &[("A", "tycoon"), ("B", "teacher")], 25);

    let report = state.submit_roll(1).unwrap();
    assert_eq!(state.position(P0), BoardPosition::new(Layer::Middle, 1));
    assert_eq!(report.outcome, SquareOutcome::NoOp);
    assert_eq!(state.turn_phase(), TurnPhase::TurnComplete);
    assert_eq!(state.account(P0).cash(), 1);
    assert!(state
        .events()
        .iter()
        .any(|r| matches!(r.event, GameEvent::EffectFailed { .. })));

    assert_eq!(state.end_turn().unwrap(), P1);
}

//! The standard game: a 10/24/32 board, two cards of every type and six
//! professions.
//!
//! ```
//! use cashflow_engine::games::standard::StandardGameBuilder;
//!
//! let state = StandardGameBuilder::new().player_count(3).build(7).unwrap();
//! assert_eq!(state.player_count(), 3);
//! ```

mod builder;

pub use builder::StandardGameBuilder;

use crate::board::{BoardLayout, BoardPosition, Layer, Square, SquareKind};
use crate::cards::{Card, CardId, CardKind, CardType};
use crate::core::{CardCatalog, GameConfig, ProfessionPreset, RulesConfig};

/// Default rules with the standard board, cards and professions.
#[must_use]
pub fn standard_config() -> GameConfig {
    GameConfig {
        rules: RulesConfig::default(),
        board: standard_board(),
        catalog: CardCatalog {
            cards: standard_cards(),
        },
        professions: standard_professions(),
    }
}

// === Board ===

/// The three standard layers.
///
/// The middle layer is the main track. Middle 6 and middle 18 lead onto
/// the inner layer; the branch at inner 5 leads back out. Middle 21 climbs
/// to outer 2 and outer 16 drops back to middle 12.
#[must_use]
pub fn standard_board() -> BoardLayout {
    BoardLayout {
        inner: inner_layer(),
        middle: middle_layer(),
        outer: outer_layer(),
    }
}

fn inner_layer() -> Vec<Square> {
    vec![
        Square::paycheck(),
        pinned(CardType::Enterprise),
        Square::market(),
        Square::opportunity(),
        Square::doodad("Party", 300, 800),
        Square::branch(),
        pinned(CardType::Financial),
        Square::new("Bonus Paycheck", SquareKind::Paycheck { bonus: 1_000 }),
        Square::opportunity(),
        Square::charity(),
    ]
}

fn middle_layer() -> Vec<Square> {
    vec![
        Square::start(),
        Square::paycheck(),
        Square::opportunity(),
        Square::doodad("Car Repair", 800, 1_500),
        Square::opportunity(),
        Square::market(),
        Square::transition(BoardPosition::new(Layer::Inner, 9)),
        Square::charity(),
        Square::opportunity(),
        Square::doodad("Medical Bill", 500, 2_000),
        Square::opportunity(),
        Square::downsized(),
        Square::paycheck(),
        Square::opportunity(),
        Square::baby(),
        Square::opportunity(),
        Square::doodad("New Appliance", 300, 800),
        Square::market(),
        Square::transition(BoardPosition::new(Layer::Inner, 1)),
        Square::opportunity(),
        Square::charity(),
        Square::transition(BoardPosition::new(Layer::Outer, 2)),
        Square::doodad("House Repair", 1_000, 3_000),
        Square::opportunity(),
    ]
}

fn outer_layer() -> Vec<Square> {
    vec![
        Square::start(),
        Square::paycheck(),
        Square::opportunity(),
        Square::doodad("Pet Care", 400, 1_200),
        Square::opportunity(),
        Square::market(),
        pinned(CardType::SideBusiness),
        Square::doodad("Traffic Fine", 200, 600),
        Square::opportunity(),
        Square::baby(),
        Square::paycheck(),
        Square::opportunity(),
        Square::doodad("Shopping Spree", 500, 1_200),
        Square::charity(),
        Square::opportunity(),
        Square::market(),
        Square::transition(BoardPosition::new(Layer::Middle, 12)),
        Square::opportunity(),
        Square::paycheck(),
        Square::doodad("Party", 300, 800),
        Square::opportunity(),
        Square::downsized(),
        pinned(CardType::SideBusiness),
        Square::opportunity(),
        Square::paycheck(),
        Square::doodad("Car Repair", 800, 1_500),
        Square::opportunity(),
        Square::market(),
        Square::baby(),
        Square::opportunity(),
        Square::doodad("Medical Bill", 500, 2_000),
        Square::charity(),
    ]
}

fn pinned(card_type: CardType) -> Square {
    Square::new(
        format!("{card_type} deal"),
        SquareKind::Opportunity {
            card_type: Some(card_type),
        },
    )
}

// === Cards ===

/// Two templates of every card type.
#[must_use]
pub fn standard_cards() -> Vec<Card> {
    vec![
        Card::new(
            CardId::new(1),
            "Small Restaurant",
            CardKind::Enterprise {
                cost: 50_000,
                down_payment: 10_000,
                cash_flow: 1_200,
                employee_count: 3,
                management_required: true,
            },
        )
        .with_description("A neighbourhood restaurant with a small staff."),
        Card::new(
            CardId::new(2),
            "Car Wash",
            CardKind::Enterprise {
                cost: 30_000,
                down_payment: 6_000,
                cash_flow: 800,
                employee_count: 1,
                management_required: false,
            },
        ),
        Card::new(
            CardId::new(3),
            "Rental Apartment",
            CardKind::Opportunity {
                cost: 80_000,
                down_payment: 16_000,
                cash_flow: 800,
            },
        ),
        Card::new(
            CardId::new(4),
            "Retail Shop",
            CardKind::Opportunity {
                cost: 120_000,
                down_payment: 24_000,
                cash_flow: 1_500,
            },
        ),
        Card::new(
            CardId::new(5),
            "Tech Growth Fund",
            CardKind::Financial {
                price_per_share: 100,
                dividend_per_share: 2,
                min_shares: 10,
                max_shares: 1_000,
            },
        ),
        Card::new(
            CardId::new(6),
            "Blue Chip Stock",
            CardKind::Financial {
                price_per_share: 50,
                dividend_per_share: 1,
                min_shares: 20,
                max_shares: 2_000,
            },
        ),
        Card::new(
            CardId::new(7),
            "Online Sales",
            CardKind::SideBusiness {
                cost: 2_000,
                cash_flow: 400,
                time_cost: 10,
            },
        ),
        Card::new(
            CardId::new(8),
            "Self-Media Channel",
            CardKind::SideBusiness {
                cost: 1_000,
                cash_flow: 300,
                time_cost: 15,
            },
        ),
    ]
}

// === Professions ===

/// Salary, starting cash and base expense for each profession.
#[must_use]
pub fn standard_professions() -> Vec<ProfessionPreset> {
    vec![
        ProfessionPreset::new("engineer", 5_000, 10_000, 2_500),
        ProfessionPreset::new("teacher", 4_000, 8_000, 2_000),
        ProfessionPreset::new("doctor", 8_000, 15_000, 4_000),
        ProfessionPreset::new("lawyer", 7_000, 12_000, 3_500),
        ProfessionPreset::new("manager", 6_000, 11_000, 3_000),
        ProfessionPreset::new("nurse", 3_500, 7_000, 1_800),
    ]
}

//! Game configuration types.
//!
//! Front ends configure the engine at startup by providing:
//! - `RulesConfig`: policy constants (dice, loans, family, time budget)
//! - `BoardLayout`: the three layers of squares
//! - `CardCatalog`: every investment card template
//! - `ProfessionPreset`: starting salary, cash and expenses per profession
//!
//! `GameConfig` combines them. It is validated once, before a game is
//! created; any problem is a fatal `GameError::Configuration`.

use std::collections::BTreeSet;
use std::io::Read;

use serde::{Deserialize, Serialize};

use super::error::{GameError, Result};
use crate::account::ShortfallPolicy;
use crate::board::{BoardLayout, BoardPosition};
use crate::cards::{Card, CardRegistry, CardType};

/// Relative weights for drawing a card type on an unpinned opportunity square.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CardTypeWeights {
    pub enterprise: f32,
    pub opportunity: f32,
    pub financial: f32,
    pub side_business: f32,
}

impl CardTypeWeights {
    /// Weights in `CardType::ALL` order.
    #[must_use]
    pub fn as_array(&self) -> [f32; 4] {
        [self.enterprise, self.opportunity, self.financial, self.side_business]
    }

    /// Weight that always picks `card_type`.
    #[must_use]
    pub fn only(card_type: CardType) -> Self {
        let mut w = [0.0; 4];
        w[card_type.index()] = 1.0;
        Self {
            enterprise: w[0],
            opportunity: w[1],
            financial: w[2],
            side_business: w[3],
        }
    }
}

impl Default for CardTypeWeights {
    fn default() -> Self {
        Self {
            enterprise: 0.2,
            opportunity: 0.4,
            financial: 0.3,
            side_business: 0.1,
        }
    }
}

/// Policy constants. Every field has a default, so a JSON document only
/// lists what it changes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RulesConfig {
    pub dice_count: u8,
    pub dice_sides: u8,

    /// Monthly loan payment in basis points of the principal.
    pub loan_rate_bps: u32,
    /// Forced loans are rounded up to a multiple of this.
    pub loan_increment: i64,
    pub allow_negative_cash: bool,
    /// Cover any shortfall with a forced bank loan instead of going negative.
    pub auto_loan_on_shortfall: bool,

    pub per_child_expense: i64,
    pub max_dependents: Option<u32>,
    pub charity_base_amount: i64,
    /// Turns without salary after landing on a downsized square.
    pub downsize_turns: u32,

    pub lap_pays_paycheck: bool,
    /// Also debit total monthly expense whenever a paycheck is paid.
    pub settle_expenses_on_paycheck: bool,

    pub card_type_weights: CardTypeWeights,

    /// Hours available each turn.
    pub turn_time_budget: u32,
    /// Hours spent by each market action.
    pub market_action_time: u32,

    pub min_players: usize,
    pub max_players: usize,
    pub starting_position: BoardPosition,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            dice_count: 1,
            dice_sides: 6,
            loan_rate_bps: 100,
            loan_increment: 1_000,
            allow_negative_cash: true,
            auto_loan_on_shortfall: true,
            per_child_expense: 300,
            max_dependents: None,
            charity_base_amount: 100,
            downsize_turns: 2,
            lap_pays_paycheck: true,
            settle_expenses_on_paycheck: false,
            card_type_weights: CardTypeWeights::default(),
            turn_time_budget: 20,
            market_action_time: 2,
            min_players: 2,
            max_players: 6,
            starting_position: BoardPosition::default(),
        }
    }
}

impl RulesConfig {
    /// How involuntary expenses are covered under these rules.
    #[must_use]
    pub fn shortfall_policy(&self) -> ShortfallPolicy {
        ShortfallPolicy {
            auto_loan: self.auto_loan_on_shortfall,
            loan_increment: self.loan_increment,
            loan_rate_bps: self.loan_rate_bps,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.dice_count == 0 || self.dice_sides == 0 {
            return Err(GameError::config("dice_count and dice_sides must be positive"));
        }
        if self.loan_increment <= 0 {
            return Err(GameError::config("loan_increment must be positive"));
        }
        if !self.allow_negative_cash && !self.auto_loan_on_shortfall {
            return Err(GameError::config(
                "expenses could not be paid: enable allow_negative_cash or auto_loan_on_shortfall",
            ));
        }
        if self.per_child_expense < 0 || self.charity_base_amount < 0 {
            return Err(GameError::config("family amounts cannot be negative"));
        }

        let weights = self.card_type_weights.as_array();
        if weights.iter().any(|w| !w.is_finite() || *w < 0.0) {
            return Err(GameError::config("card type weights must be finite and non-negative"));
        }
        if weights.iter().all(|w| *w == 0.0) {
            return Err(GameError::config("at least one card type weight must be positive"));
        }

        if self.min_players == 0 || self.min_players > self.max_players || self.max_players > 255 {
            return Err(GameError::config(format!(
                "player range {}..={} is invalid",
                self.min_players, self.max_players
            )));
        }
        if !self.starting_position.is_valid() {
            return Err(GameError::config(format!(
                "starting position {} is off the board",
                self.starting_position
            )));
        }
        Ok(())
    }
}

/// Every card template in the game.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardCatalog {
    pub cards: Vec<Card>,
}

impl CardCatalog {
    /// Validate and index the catalog.
    ///
    /// Ids must be unique and every card type needs at least one template.
    pub fn to_registry(&self) -> Result<CardRegistry> {
        let registry = CardRegistry::from_cards(self.cards.iter().cloned())?;
        let missing = registry.missing_types();
        if !missing.is_empty() {
            return Err(GameError::config(format!("card catalog has no {missing:?} cards")));
        }
        Ok(registry)
    }
}

/// Starting finances for a profession.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfessionPreset {
    pub name: String,
    pub salary: i64,
    pub starting_cash: i64,
    /// Base monthly living expense.
    pub starting_expenses: i64,
}

impl ProfessionPreset {
    #[must_use]
    pub fn new(name: impl Into<String>, salary: i64, starting_cash: i64, starting_expenses: i64) -> Self {
        Self {
            name: name.into(),
            salary,
            starting_cash,
            starting_expenses,
        }
    }
}

/// A seat at the table.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerSetup {
    pub name: String,
    pub profession: String,
}

impl PlayerSetup {
    #[must_use]
    pub fn new(name: impl Into<String>, profession: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            profession: profession.into(),
        }
    }
}

/// Complete game configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    #[serde(default)]
    pub rules: RulesConfig,
    pub board: BoardLayout,
    pub catalog: CardCatalog,
    pub professions: Vec<ProfessionPreset>,
}

impl GameConfig {
    /// Parse and validate a JSON document.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: GameConfig = serde_json::from_str(json).map_err(|e| GameError::config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Parse and validate JSON from a reader.
    pub fn from_reader(reader: impl Read) -> Result<Self> {
        let config: GameConfig = serde_json::from_reader(reader).map_err(|e| GameError::config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize back to pretty JSON.
    pub fn to_json_string(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| GameError::config(e.to_string()))
    }

    /// Check every part of the configuration.
    pub fn validate(&self) -> Result<()> {
        self.rules.validate()?;
        self.board.validate()?;
        self.catalog.to_registry()?;

        if self.professions.is_empty() {
            return Err(GameError::config("no professions configured"));
        }
        let mut names = BTreeSet::new();
        for p in &self.professions {
            if !names.insert(p.name.as_str()) {
                return Err(GameError::config(format!("duplicate profession {}", p.name)));
            }
            if p.salary < 0 || p.starting_expenses < 0 {
                return Err(GameError::config(format!("profession {} has negative salary or expenses", p.name)));
            }
        }
        Ok(())
    }

    /// Look up a profession by name.
    pub fn profession(&self, name: &str) -> Result<&ProfessionPreset> {
        self.professions
            .iter()
            .find(|p| p.name == name)
            .ok_or_else(|| GameError::config(format!("unknown profession {name}")))
    }

    /// Check a seating list against the player range and profession list.
    pub fn validate_players(&self, players: &[PlayerSetup]) -> Result<()> {
        let n = players.len();
        if n < self.rules.min_players || n > self.rules.max_players {
            return Err(GameError::config(format!(
                "{n} players; this game seats {}..={}",
                self.rules.min_players, self.rules.max_players
            )));
        }
        for setup in players {
            self.profession(&setup.profession)?;
        }
        Ok(())
    }
}

//! Squares: static, typed board positions.

use serde::{Deserialize, Serialize};

use super::topology::BoardPosition;
use crate::cards::CardType;

/// Type tag of a square, used to dispatch landing handlers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SquareType {
    Start,
    Paycheck,
    Opportunity,
    Doodad,
    Market,
    Charity,
    Downsized,
    Baby,
    LayerTransition,
    Branch,
}

impl SquareType {
    pub const ALL: [SquareType; 10] = [
        SquareType::Start,
        SquareType::Paycheck,
        SquareType::Opportunity,
        SquareType::Doodad,
        SquareType::Market,
        SquareType::Charity,
        SquareType::Downsized,
        SquareType::Baby,
        SquareType::LayerTransition,
        SquareType::Branch,
    ];
}

/// Type-specific square parameters.
///
/// Serialized with an internal `"type"` tag:
/// `{"type": "doodad", "label": "Car repair", "min": 800, "max": 1500}`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SquareKind {
    Start,
    Paycheck {
        /// Paid on top of the regular paycheck.
        #[serde(default)]
        bonus: i64,
    },
    Opportunity {
        /// Pinned card type; `None` draws one by the configured weights.
        #[serde(default)]
        card_type: Option<CardType>,
    },
    /// An unplanned expense drawn uniformly from `[min, max]`.
    Doodad { label: String, min: i64, max: i64 },
    Market,
    Charity {
        /// Overrides the configured per-dependent amount.
        #[serde(default)]
        base_amount: Option<i64>,
    },
    Downsized,
    Baby,
    LayerTransition { target: BoardPosition },
    Branch,
}

/// One position on a layer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Square {
    #[serde(default)]
    pub name: String,
    #[serde(flatten)]
    pub kind: SquareKind,
}

impl Square {
    #[must_use]
    pub fn new(name: impl Into<String>, kind: SquareKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }

    #[must_use]
    pub fn square_type(&self) -> SquareType {
        match self.kind {
            SquareKind::Start => SquareType::Start,
            SquareKind::Paycheck { .. } => SquareType::Paycheck,
            SquareKind::Opportunity { .. } => SquareType::Opportunity,
            SquareKind::Doodad { .. } => SquareType::Doodad,
            SquareKind::Market => SquareType::Market,
            SquareKind::Charity { .. } => SquareType::Charity,
            SquareKind::Downsized => SquareType::Downsized,
            SquareKind::Baby => SquareType::Baby,
            SquareKind::LayerTransition { .. } => SquareType::LayerTransition,
            SquareKind::Branch => SquareType::Branch,
        }
    }

    /// Where a transition square sends the player.
    #[must_use]
    pub fn transition_target(&self) -> Option<BoardPosition> {
        match self.kind {
            SquareKind::LayerTransition { target } => Some(target),
            _ => None,
        }
    }

    // === Shorthand constructors ===

    #[must_use]
    pub fn start() -> Self {
        Self::new("Start", SquareKind::Start)
    }

    #[must_use]
    pub fn paycheck() -> Self {
        Self::new("Paycheck", SquareKind::Paycheck { bonus: 0 })
    }

    #[must_use]
    pub fn opportunity() -> Self {
        Self::new("Opportunity", SquareKind::Opportunity { card_type: None })
    }

    #[must_use]
    pub fn doodad(label: impl Into<String>, min: i64, max: i64) -> Self {
        let label = label.into();
        Self::new(label.clone(), SquareKind::Doodad { label, min, max })
    }

    #[must_use]
    pub fn market() -> Self {
        Self::new("Market", SquareKind::Market)
    }

    #[must_use]
    pub fn charity() -> Self {
        Self::new("Charity", SquareKind::Charity { base_amount: None })
    }

    #[must_use]
    pub fn downsized() -> Self {
        Self::new("Downsized", SquareKind::Downsized)
    }

    #[must_use]
    pub fn baby() -> Self {
        Self::new("Baby", SquareKind::Baby)
    }

    #[must_use]
    pub fn transition(target: BoardPosition) -> Self {
        Self::new("Transition", SquareKind::LayerTransition { target })
    }

    #[must_use]
    pub fn branch() -> Self {
        Self::new("Branch", SquareKind::Branch)
    }
}

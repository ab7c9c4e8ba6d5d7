//! Card definitions - immutable investment templates.
//!
//! A `Card` is never owned by anyone. Accepting one materializes an
//! `Asset` (and possibly a `Liability`) on the player from the terms
//! returned by `Card::terms`.

use serde::{Deserialize, Serialize};

use crate::account::money;
use crate::core::{GameError, Result};

/// Unique identifier for a card template.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CardId(pub u32);

impl CardId {
    /// Create a new card ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Card({})", self.0)
    }
}

/// The four investment card families.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CardType {
    Enterprise,
    Opportunity,
    Financial,
    SideBusiness,
}

impl CardType {
    /// All card types, in weight/draw-pile order.
    pub const ALL: [CardType; 4] = [
        CardType::Enterprise,
        CardType::Opportunity,
        CardType::Financial,
        CardType::SideBusiness,
    ];

    /// Position in `ALL`.
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            CardType::Enterprise => 0,
            CardType::Opportunity => 1,
            CardType::Financial => 2,
            CardType::SideBusiness => 3,
        }
    }
}

impl std::fmt::Display for CardType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            CardType::Enterprise => "enterprise",
            CardType::Opportunity => "opportunity",
            CardType::Financial => "financial",
            CardType::SideBusiness => "side business",
        };
        f.write_str(name)
    }
}

/// Type-specific card data.
///
/// Serialized with an internal `"type"` tag so a catalog entry reads
/// `{"id": 1, "name": "...", "type": "opportunity", "cost": ...}`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CardKind {
    Enterprise {
        cost: i64,
        down_payment: i64,
        cash_flow: i64,
        #[serde(default)]
        employee_count: u32,
        #[serde(default)]
        management_required: bool,
    },
    Opportunity {
        cost: i64,
        down_payment: i64,
        cash_flow: i64,
    },
    Financial {
        price_per_share: i64,
        dividend_per_share: i64,
        min_shares: u32,
        max_shares: u32,
    },
    /// Paid in full; no financing.
    SideBusiness {
        cost: i64,
        cash_flow: i64,
        /// Hours taken from the current turn's budget.
        time_cost: u32,
    },
}

/// What accepting a card costs and yields.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PurchaseTerms {
    /// Total price.
    pub cost: i64,
    /// Cash due now.
    pub upfront: i64,
    /// Amount financed by a purchase loan (0 if none).
    pub loan_amount: i64,
    /// Monthly cash flow of the resulting asset.
    pub cash_flow: i64,
    /// Share count for financial cards.
    pub shares: Option<u32>,
    pub time_cost: u32,
}

/// An immutable investment template.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    pub id: CardId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(flatten)]
    pub kind: CardKind,
}

impl Card {
    /// Create a card with no description.
    #[must_use]
    pub fn new(id: CardId, name: impl Into<String>, kind: CardKind) -> Self {
        Self {
            id,
            name: name.into(),
            description: String::new(),
            kind,
        }
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    #[must_use]
    pub fn card_type(&self) -> CardType {
        match self.kind {
            CardKind::Enterprise { .. } => CardType::Enterprise,
            CardKind::Opportunity { .. } => CardType::Opportunity,
            CardKind::Financial { .. } => CardType::Financial,
            CardKind::SideBusiness { .. } => CardType::SideBusiness,
        }
    }

    /// Time cost in hours (side businesses only).
    #[must_use]
    pub fn time_cost(&self) -> u32 {
        match self.kind {
            CardKind::SideBusiness { time_cost, .. } => time_cost,
            _ => 0,
        }
    }

    /// Compute purchase terms.
    ///
    /// `shares` is only meaningful for financial cards; `None` buys the
    /// minimum lot. Passing a share count for any other card, or one outside
    /// `[min_shares, max_shares]`, is `InvalidInput`.
    pub fn terms(&self, shares: Option<u32>) -> Result<PurchaseTerms> {
        if shares.is_some() && self.card_type() != CardType::Financial {
            return Err(GameError::input(format!("{} is not sold by the share", self.name)));
        }

        let terms = match self.kind {
            CardKind::Enterprise {
                cost,
                down_payment,
                cash_flow,
                ..
            }
            | CardKind::Opportunity {
                cost,
                down_payment,
                cash_flow,
            } => PurchaseTerms {
                cost,
                upfront: down_payment,
                loan_amount: money::sub(cost, down_payment)?.max(0),
                cash_flow,
                shares: None,
                time_cost: 0,
            },
            CardKind::Financial {
                price_per_share,
                dividend_per_share,
                min_shares,
                max_shares,
            } => {
                let count = shares.unwrap_or(min_shares);
                if count < min_shares || count > max_shares {
                    return Err(GameError::input(format!(
                        "{} sells {min_shares}..={max_shares} shares, not {count}",
                        self.name
                    )));
                }
                let n = i64::from(count);
                let cost = money::mul(n, price_per_share)?;
                PurchaseTerms {
                    cost,
                    upfront: cost,
                    loan_amount: 0,
                    cash_flow: money::mul(n, dividend_per_share)?,
                    shares: Some(count),
                    time_cost: 0,
                }
            }
            CardKind::SideBusiness {
                cost,
                cash_flow,
                time_cost,
            } => PurchaseTerms {
                cost,
                upfront: cost,
                loan_amount: 0,
                cash_flow,
                shares: None,
                time_cost,
            },
        };
        Ok(terms)
    }

    /// Check the template's own numbers.
    pub fn validate(&self) -> Result<()> {
        let bad = |what: &str| Err(GameError::config(format!("{} ({}): {what}", self.name, self.id)));
        match self.kind {
            CardKind::Enterprise {
                cost, down_payment, ..
            }
            | CardKind::Opportunity {
                cost, down_payment, ..
            } => {
                if cost < 0 || down_payment < 0 {
                    return bad("negative cost or down payment");
                }
                if down_payment > cost {
                    return bad("down payment exceeds cost");
                }
            }
            CardKind::Financial {
                price_per_share,
                dividend_per_share,
                min_shares,
                max_shares,
            } => {
                if price_per_share < 0 || dividend_per_share < 0 {
                    return bad("negative share price or dividend");
                }
                if min_shares == 0 || min_shares > max_shares {
                    return bad("share range must satisfy 0 < min_shares <= max_shares");
                }
                let most = i64::from(max_shares);
                if most.checked_mul(price_per_share).is_none() || most.checked_mul(dividend_per_share).is_none() {
                    return bad("max_shares lot is out of range");
                }
            }
            CardKind::SideBusiness { cost, .. } => {
                if cost < 0 {
                    return bad("negative cost");
                }
            }
        }
        Ok(())
    }
}

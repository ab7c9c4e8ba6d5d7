//! Assets held on a player's balance sheet.
//!
//! An `Asset` couples immutable acquisition terms (what was paid, how it was
//! financed, what it yields each month) with mutable ownership state: the
//! current owner and, for financial assets, the number of shares still held.

use serde::{Deserialize, Serialize};

use crate::cards::{CardId, CardType};
use crate::core::PlayerId;

/// Unique identifier for an asset, allocated by the game state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AssetId(pub u32);

impl AssetId {
    /// Create a new asset ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for AssetId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Asset({})", self.0)
    }
}

/// What kind of holding an asset is.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AssetKind {
    Enterprise,
    Opportunity,
    Financial,
    SideBusiness,
    /// Anything granted outside the card system (starting holdings, tests).
    Other,
}

impl From<CardType> for AssetKind {
    fn from(card_type: CardType) -> Self {
        match card_type {
            CardType::Enterprise => AssetKind::Enterprise,
            CardType::Opportunity => AssetKind::Opportunity,
            CardType::Financial => AssetKind::Financial,
            CardType::SideBusiness => AssetKind::SideBusiness,
        }
    }
}

/// Terms fixed at acquisition time.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AcquisitionTerms {
    /// Total price of the asset.
    pub cost: i64,
    /// Cash paid upfront (equals `cost` when not financed).
    pub down_payment: i64,
    /// Monthly cash flow at acquisition.
    pub cash_flow: i64,
}

impl AcquisitionTerms {
    /// Terms for an asset bought outright.
    #[must_use]
    pub const fn outright(cost: i64, cash_flow: i64) -> Self {
        Self {
            cost,
            down_payment: cost,
            cash_flow,
        }
    }

    /// Amount financed by a loan.
    #[must_use]
    pub fn financed_amount(&self) -> i64 {
        self.cost.saturating_sub(self.down_payment).max(0)
    }
}

/// Divisible share holding for financial assets.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShareHolding {
    pub shares: u32,
    pub price_per_share: i64,
    pub dividend_per_share: i64,
}

/// An asset on a player's balance sheet.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Asset {
    id: AssetId,
    name: String,
    kind: AssetKind,
    terms: AcquisitionTerms,
    holding: Option<ShareHolding>,
    owner: Option<PlayerId>,
    source_card: Option<CardId>,
}

impl Asset {
    /// Create an indivisible asset.
    #[must_use]
    pub fn new(id: AssetId, name: impl Into<String>, kind: AssetKind, terms: AcquisitionTerms) -> Self {
        Self {
            id,
            name: name.into(),
            kind,
            terms,
            holding: None,
            owner: None,
            source_card: None,
        }
    }

    /// Create a financial asset holding `shares` shares.
    #[must_use]
    pub fn shares(
        id: AssetId,
        name: impl Into<String>,
        shares: u32,
        price_per_share: i64,
        dividend_per_share: i64,
    ) -> Self {
        let count = i64::from(shares);
        Self {
            id,
            name: name.into(),
            kind: AssetKind::Financial,
            terms: AcquisitionTerms::outright(
                count.saturating_mul(price_per_share),
                count.saturating_mul(dividend_per_share),
            ),
            holding: Some(ShareHolding {
                shares,
                price_per_share,
                dividend_per_share,
            }),
            owner: None,
            source_card: None,
        }
    }

    /// Record the card this asset was materialized from.
    #[must_use]
    pub fn with_source_card(mut self, card: CardId) -> Self {
        self.source_card = Some(card);
        self
    }

    #[must_use]
    pub fn id(&self) -> AssetId {
        self.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn kind(&self) -> AssetKind {
        self.kind
    }

    #[must_use]
    pub fn terms(&self) -> &AcquisitionTerms {
        &self.terms
    }

    /// Current owner, if the asset has been placed on a balance sheet.
    #[must_use]
    pub fn owner(&self) -> Option<PlayerId> {
        self.owner
    }

    #[must_use]
    pub fn source_card(&self) -> Option<CardId> {
        self.source_card
    }

    /// Shares still held, for divisible assets.
    #[must_use]
    pub fn share_count(&self) -> Option<u32> {
        self.holding.map(|h| h.shares)
    }

    #[must_use]
    pub fn holding(&self) -> Option<&ShareHolding> {
        self.holding.as_ref()
    }

    /// Current monthly cash flow.
    ///
    /// For share holdings this tracks the shares still held.
    #[must_use]
    pub fn cash_flow(&self) -> i64 {
        match self.holding {
            Some(h) => i64::from(h.shares).saturating_mul(h.dividend_per_share),
            None => self.terms.cash_flow,
        }
    }

    /// Book value: acquisition cost of what is still held.
    #[must_use]
    pub fn book_value(&self) -> i64 {
        match self.holding {
            Some(h) => i64::from(h.shares).saturating_mul(h.price_per_share),
            None => self.terms.cost,
        }
    }

    pub(crate) fn set_owner(&mut self, owner: Option<PlayerId>) {
        self.owner = owner;
    }

    /// Reduce the share count. Caller guarantees `0 < count < shares`.
    pub(crate) fn reduce_shares(&mut self, count: u32) {
        if let Some(h) = self.holding.as_mut() {
            h.shares -= count;
        }
    }
}

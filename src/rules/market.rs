//! Player inputs beyond the dice: card decisions, market actions and the
//! inner-layer branch choice.

use serde::{Deserialize, Serialize};

use crate::account::{AssetId, LiabilityId};
use crate::core::PlayerId;

/// Answer to a drawn card.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CardDecision {
    /// Buy the card. `shares` picks the lot size for financial cards.
    Accept { shares: Option<u32> },
    Decline,
}

impl CardDecision {
    /// Accept a non-financial card, or the minimum lot of a financial one.
    pub const ACCEPT: CardDecision = CardDecision::Accept { shares: None };
}

/// Why a card did not turn into an asset.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeclineReason {
    /// The player said no.
    Declined,
    Unaffordable { required: i64, available: i64 },
    OutOfTime { required: u32, remaining: u32 },
    /// The turn was abandoned with the card pending.
    Abandoned,
}

/// What became of a card decision.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CardResolution {
    Accepted {
        asset: AssetId,
        liability: Option<LiabilityId>,
    },
    Declined(DeclineReason),
}

/// One market-phase action by the active player.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MarketAction {
    /// Sell a whole asset to the bank.
    SellToBank { asset: AssetId, price: i64 },
    /// Sell a whole asset to another player; cash and asset cross atomically.
    SellToPlayer {
        asset: AssetId,
        buyer: PlayerId,
        price: i64,
    },
    /// Sell part of a share holding to the bank.
    SellShares {
        asset: AssetId,
        count: u32,
        price_per_share: i64,
    },
    PayOffLiability { liability: LiabilityId },
    /// Borrow from the bank at the configured rate.
    TakeLoan { amount: i64 },
    /// Leave the market and complete the turn.
    Exit,
}

impl MarketAction {
    /// Whether the action uses up market time.
    #[must_use]
    pub fn costs_time(&self) -> bool {
        !matches!(self, MarketAction::Exit)
    }
}

/// Choice offered on the inner branch square.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum BranchChoice {
    Stay,
    /// Leave for the given middle-layer index.
    ExitToMiddle { position: usize },
}

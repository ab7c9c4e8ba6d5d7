//! Liabilities: debts with a monthly payment.
//!
//! A liability only disappears through an explicit payoff.

use serde::{Deserialize, Serialize};

use super::asset::AssetId;
use super::money;
use crate::core::Result;

/// Unique identifier for a liability, allocated by the game state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct LiabilityId(pub u32);

impl LiabilityId {
    /// Create a new liability ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for LiabilityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Liability({})", self.0)
    }
}

/// Why a debt exists.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum LiabilityCause {
    /// Loan taken to finance a card purchase.
    PurchaseLoan { asset: AssetId },
    /// Loan requested by the player in the market.
    BankLoan,
    /// Loan forced by the engine to cover a shortfall.
    ForcedLoan,
    /// Debt carried from the profession preset or set up by hand.
    Starting,
}

/// A debt on a player's balance sheet.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Liability {
    pub id: LiabilityId,
    pub name: String,
    /// Outstanding principal.
    pub balance: i64,
    /// Monthly payment counted in total expense.
    pub monthly_payment: i64,
    pub cause: LiabilityCause,
}

impl Liability {
    /// Create a liability with an explicit payment.
    #[must_use]
    pub fn new(
        id: LiabilityId,
        name: impl Into<String>,
        balance: i64,
        monthly_payment: i64,
        cause: LiabilityCause,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            balance,
            monthly_payment,
            cause,
        }
    }

    /// Create a loan whose payment follows the configured monthly rate.
    ///
    /// Fails with `InvalidInput` if the payment is out of range.
    pub fn loan(
        id: LiabilityId,
        name: impl Into<String>,
        amount: i64,
        rate_bps: u32,
        cause: LiabilityCause,
    ) -> Result<Self> {
        let payment = monthly_payment_for(amount, rate_bps)?;
        Ok(Self::new(id, name, amount, payment, cause))
    }

    /// A bank loan requested by the player.
    pub fn bank_loan(id: LiabilityId, amount: i64, rate_bps: u32) -> Result<Self> {
        Self::loan(id, "Bank loan", amount, rate_bps, LiabilityCause::BankLoan)
    }
}

/// Monthly payment for `amount` at `rate_bps` basis points per month,
/// rounded up to the next whole unit.
pub fn monthly_payment_for(amount: i64, rate_bps: u32) -> Result<i64> {
    if amount <= 0 || rate_bps == 0 {
        return Ok(0);
    }
    let scaled = money::mul(amount, i64::from(rate_bps))?;
    Ok(scaled / 10_000 + i64::from(scaled % 10_000 != 0))
}

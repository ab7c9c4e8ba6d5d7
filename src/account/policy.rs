//! Id allocation and the shortfall policy for involuntary expenses.

use serde::{Deserialize, Serialize};

use super::asset::AssetId;
use super::ledger::Account;
use super::liability::{Liability, LiabilityCause, LiabilityId};
use super::money;
use crate::core::Result;

/// Hands out asset and liability ids, unique for the whole game.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdAllocator {
    next_asset: u32,
    next_liability: u32,
}

impl IdAllocator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn asset(&mut self) -> AssetId {
        let id = AssetId::new(self.next_asset);
        self.next_asset += 1;
        id
    }

    pub fn liability(&mut self) -> LiabilityId {
        let id = LiabilityId::new(self.next_liability);
        self.next_liability += 1;
        id
    }

    /// The id the next `asset()` call hands out.
    #[must_use]
    pub fn peek_asset(&self) -> AssetId {
        AssetId::new(self.next_asset)
    }

    /// The id the next `liability()` call hands out.
    #[must_use]
    pub fn peek_liability(&self) -> LiabilityId {
        LiabilityId::new(self.next_liability)
    }
}

/// How an expense larger than the cash on hand is covered.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShortfallPolicy {
    /// Borrow the shortfall instead of going negative.
    pub auto_loan: bool,
    /// Forced loans are rounded up to a multiple of this.
    pub loan_increment: i64,
    pub loan_rate_bps: u32,
}

impl ShortfallPolicy {
    /// Size of the forced loan needed to pay `amount` from `cash`.
    pub fn loan_for(&self, cash: i64, amount: i64) -> Result<i64> {
        if !self.auto_loan || amount <= 0 {
            return Ok(0);
        }
        let shortfall = money::sub(amount, cash)?;
        if shortfall <= 0 {
            return Ok(0);
        }
        let inc = self.loan_increment.max(1);
        let steps = shortfall / inc + i64::from(shortfall % inc != 0);
        money::mul(steps, inc)
    }
}

/// What an involuntary charge did to an account.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Charge {
    pub paid: i64,
    pub forced_loan: Option<(LiabilityId, i64)>,
}

/// Debit an involuntary expense under `policy`.
///
/// A forced loan, if needed, is taken first so the debit never leaves cash
/// negative.
pub fn charge(
    account: &mut Account,
    ids: &mut IdAllocator,
    policy: ShortfallPolicy,
    amount: i64,
    memo: &str,
) -> Result<Charge> {
    let loan_amount = policy.loan_for(account.cash(), amount)?;
    let mut forced_loan = None;
    if loan_amount > 0 {
        let id = ids.peek_liability();
        let loan = Liability::loan(id, "Forced loan", loan_amount, policy.loan_rate_bps, LiabilityCause::ForcedLoan)?;
        account.take_loan(loan)?;
        ids.liability();
        forced_loan = Some((id, loan_amount));
    }
    account.pay_expense(amount, memo)?;
    Ok(Charge {
        paid: amount,
        forced_loan,
    })
}

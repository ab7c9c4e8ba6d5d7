//! Per-player financial account.
//!
//! ## Invariants
//!
//! - `passive_income` always equals the sum of asset cash flows.
//! - `total_expense` = base living expense + liability payments
//!   + dependents × per-dependent expense.
//! - The financial-freedom flag is recomputed after every mutation.
//! - Cash never moves without a `LedgerEntry`; every public operation
//!   validates first and mutates second, so a rejected call changes nothing.
//! - Amounts that would overflow are rejected with `InvalidInput`; the
//!   derived totals saturate rather than wrap.

use log::trace;
use serde::{Deserialize, Serialize};

use super::asset::{Asset, AssetId};
use super::liability::{Liability, LiabilityId};
use super::money;
use crate::core::{GameError, PlayerId, Result};

/// Category of a cash movement.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntryKind {
    Opening,
    Paycheck,
    Bonus,
    Expense,
    Purchase,
    Sale,
    TransferIn,
    TransferOut,
    LoanProceeds,
    LoanPayoff,
    CharityGiven,
    CharityReceived,
}

/// One journal line: a signed cash movement and the balance it left.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerEntry {
    pub kind: EntryKind,
    /// Positive for credits, negative for debits.
    pub amount: i64,
    pub balance_after: i64,
    pub memo: String,
}

/// A player's ledger: cash, income, balance sheet and journal.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    owner: PlayerId,
    cash: i64,
    salary: i64,
    base_expense: i64,
    per_dependent_expense: i64,
    dependents: u32,
    assets: Vec<Asset>,
    liabilities: Vec<Liability>,

    // Derived, refreshed after every mutation.
    passive_income: i64,
    financially_free: bool,

    downsized_turns: u32,
    last_paycheck_turn: Option<u32>,
    allow_negative_cash: bool,
    journal: Vec<LedgerEntry>,
}

impl Account {
    /// Open an account with a salary, starting cash and base living expense.
    #[must_use]
    pub fn new(owner: PlayerId, salary: i64, starting_cash: i64, base_expense: i64) -> Self {
        let mut account = Self {
            owner,
            cash: 0,
            salary,
            base_expense,
            per_dependent_expense: 0,
            dependents: 0,
            assets: Vec::new(),
            liabilities: Vec::new(),
            passive_income: 0,
            financially_free: false,
            downsized_turns: 0,
            last_paycheck_turn: None,
            allow_negative_cash: true,
            journal: Vec::new(),
        };
        account.post(EntryKind::Opening, starting_cash, starting_cash, "opening balance");
        account.refresh();
        account
    }

    /// Set the monthly expense added per dependent.
    #[must_use]
    pub fn with_per_dependent_expense(mut self, amount: i64) -> Self {
        self.per_dependent_expense = amount;
        self.refresh();
        self
    }

    /// Choose whether expenses may drive cash below zero.
    #[must_use]
    pub fn with_negative_cash(mut self, allowed: bool) -> Self {
        self.allow_negative_cash = allowed;
        self
    }

    // === Queries ===

    #[must_use]
    pub fn owner(&self) -> PlayerId {
        self.owner
    }

    #[must_use]
    pub fn cash(&self) -> i64 {
        self.cash
    }

    /// Contracted salary, regardless of downsizing.
    #[must_use]
    pub fn salary(&self) -> i64 {
        self.salary
    }

    /// Salary actually paid this month (zero while downsized).
    #[must_use]
    pub fn effective_salary(&self) -> i64 {
        if self.is_downsized() {
            0
        } else {
            self.salary
        }
    }

    #[must_use]
    pub fn base_expense(&self) -> i64 {
        self.base_expense
    }

    #[must_use]
    pub fn per_dependent_expense(&self) -> i64 {
        self.per_dependent_expense
    }

    #[must_use]
    pub fn dependents(&self) -> u32 {
        self.dependents
    }

    #[must_use]
    pub fn assets(&self) -> &[Asset] {
        &self.assets
    }

    #[must_use]
    pub fn liabilities(&self) -> &[Liability] {
        &self.liabilities
    }

    #[must_use]
    pub fn asset(&self, id: AssetId) -> Option<&Asset> {
        self.assets.iter().find(|a| a.id() == id)
    }

    #[must_use]
    pub fn liability(&self, id: LiabilityId) -> Option<&Liability> {
        self.liabilities.iter().find(|l| l.id == id)
    }

    /// Sum of all asset cash flows.
    #[must_use]
    pub fn passive_income(&self) -> i64 {
        self.passive_income
    }

    #[must_use]
    pub fn liability_payments(&self) -> i64 {
        self.liabilities
            .iter()
            .fold(0_i64, |sum, l| sum.saturating_add(l.monthly_payment))
    }

    #[must_use]
    pub fn dependent_expense(&self) -> i64 {
        i64::from(self.dependents).saturating_mul(self.per_dependent_expense)
    }

    /// Base living expense + liability payments + dependent expense.
    #[must_use]
    pub fn total_expense(&self) -> i64 {
        self.base_expense
            .saturating_add(self.liability_payments())
            .saturating_add(self.dependent_expense())
    }

    /// Effective salary plus passive income.
    #[must_use]
    pub fn total_income(&self) -> i64 {
        self.effective_salary().saturating_add(self.passive_income)
    }

    #[must_use]
    pub fn monthly_cash_flow(&self) -> i64 {
        self.total_income().saturating_sub(self.total_expense())
    }

    #[must_use]
    pub fn total_asset_cost(&self) -> i64 {
        self.assets
            .iter()
            .fold(0_i64, |sum, a| sum.saturating_add(a.book_value()))
    }

    #[must_use]
    pub fn total_debt(&self) -> i64 {
        self.liabilities.iter().fold(0_i64, |sum, l| sum.saturating_add(l.balance))
    }

    #[must_use]
    pub fn net_worth(&self) -> i64 {
        self.cash
            .saturating_add(self.total_asset_cost())
            .saturating_sub(self.total_debt())
    }

    /// Passive income covers total expense.
    #[must_use]
    pub fn is_financially_free(&self) -> bool {
        self.financially_free
    }

    #[must_use]
    pub fn can_cover(&self, amount: i64) -> bool {
        self.cash >= amount
    }

    #[must_use]
    pub fn allows_negative_cash(&self) -> bool {
        self.allow_negative_cash
    }

    #[must_use]
    pub fn downsized_turns(&self) -> u32 {
        self.downsized_turns
    }

    #[must_use]
    pub fn is_downsized(&self) -> bool {
        self.downsized_turns > 0
    }

    #[must_use]
    pub fn last_paycheck_turn(&self) -> Option<u32> {
        self.last_paycheck_turn
    }

    /// Every cash movement in order.
    #[must_use]
    pub fn journal(&self) -> &[LedgerEntry] {
        &self.journal
    }

    // === Income and expenses ===

    /// Credit effective salary plus passive income.
    ///
    /// Pays at most once per `turn`; a second call in the same turn returns
    /// `None` and changes nothing.
    pub fn receive_paycheck(&mut self, turn: u32) -> Result<Option<i64>> {
        if self.last_paycheck_turn == Some(turn) {
            return Ok(None);
        }
        let amount = money::add(self.effective_salary(), self.passive_income)?;
        self.credit(EntryKind::Paycheck, amount, "paycheck")?;
        self.last_paycheck_turn = Some(turn);
        Ok(Some(amount))
    }

    /// Credit an arbitrary non-negative amount.
    pub fn receive(&mut self, amount: i64, kind: EntryKind, memo: &str) -> Result<()> {
        if amount < 0 {
            return Err(GameError::input(format!("cannot receive a negative amount ({amount})")));
        }
        self.credit(kind, amount, memo)
    }

    /// Debit an expense.
    ///
    /// Cash may go negative unless the account was opened with
    /// `with_negative_cash(false)`, in which case an uncovered expense fails
    /// with `InsufficientFunds` and nothing is recorded.
    pub fn pay_expense(&mut self, amount: i64, memo: &str) -> Result<()> {
        if amount < 0 {
            return Err(GameError::input(format!("cannot pay a negative expense ({amount})")));
        }
        if !self.allow_negative_cash && self.cash < amount {
            return Err(GameError::InsufficientFunds {
                required: amount,
                available: self.cash,
            });
        }
        self.debit(EntryKind::Expense, amount, memo)
    }

    // === Balance sheet ===

    /// Place an asset on the balance sheet.
    pub fn add_asset(&mut self, mut asset: Asset) -> Result<()> {
        if self.asset(asset.id()).is_some() {
            return Err(GameError::input(format!("{} is already held", asset.id())));
        }
        self.check_room(&asset, None)?;
        asset.set_owner(Some(self.owner));
        self.assets.push(asset);
        self.refresh();
        Ok(())
    }

    /// Take an asset off the balance sheet without any cash movement.
    pub fn remove_asset(&mut self, id: AssetId) -> Result<Asset> {
        let pos = self
            .assets
            .iter()
            .position(|a| a.id() == id)
            .ok_or(GameError::UnknownAsset(id))?;
        let mut asset = self.assets.remove(pos);
        asset.set_owner(None);
        self.refresh();
        Ok(asset)
    }

    /// Record a liability without cash movement.
    pub fn add_liability(&mut self, liability: Liability) -> Result<()> {
        if self.liability(liability.id).is_some() {
            return Err(GameError::input(format!("{} is already recorded", liability.id)));
        }
        self.check_debt_room(&liability)?;
        self.liabilities.push(liability);
        self.refresh();
        Ok(())
    }

    /// Pay a debt off in full.
    ///
    /// Returns the amount paid.
    pub fn pay_off_liability(&mut self, id: LiabilityId) -> Result<i64> {
        let pos = self
            .liabilities
            .iter()
            .position(|l| l.id == id)
            .ok_or(GameError::UnknownLiability(id))?;
        let balance = self.liabilities[pos].balance;
        if self.cash < balance {
            return Err(GameError::InsufficientFunds {
                required: balance,
                available: self.cash,
            });
        }

        let name = self.liabilities[pos].name.clone();
        self.debit(EntryKind::LoanPayoff, balance, &name)?;
        self.liabilities.remove(pos);
        self.refresh();
        Ok(balance)
    }

    /// Borrow: credit the loan principal and record the debt.
    pub fn take_loan(&mut self, liability: Liability) -> Result<()> {
        if liability.balance <= 0 {
            return Err(GameError::input("loan amount must be positive"));
        }
        if self.liability(liability.id).is_some() {
            return Err(GameError::input(format!("{} is already recorded", liability.id)));
        }
        self.check_debt_room(&liability)?;
        self.credit(EntryKind::LoanProceeds, liability.balance, &liability.name)?;
        self.liabilities.push(liability);
        self.refresh();
        Ok(())
    }

    /// Buy an asset: pay `upfront`, hold the asset and record the financing
    /// loan if there is one.
    ///
    /// All-or-nothing. Purchases never dip into negative cash.
    pub fn purchase(&mut self, asset: Asset, upfront: i64, loan: Option<Liability>) -> Result<()> {
        if upfront < 0 {
            return Err(GameError::input("upfront payment cannot be negative"));
        }
        if self.cash < upfront {
            return Err(GameError::InsufficientFunds {
                required: upfront,
                available: self.cash,
            });
        }
        if self.asset(asset.id()).is_some() {
            return Err(GameError::input(format!("{} is already held", asset.id())));
        }
        if let Some(l) = &loan {
            if self.liability(l.id).is_some() {
                return Err(GameError::input(format!("{} is already recorded", l.id)));
            }
        }
        self.check_room(&asset, loan.as_ref())?;

        let memo = format!("buy {}", asset.name());
        self.debit(EntryKind::Purchase, upfront, &memo)?;
        let mut asset = asset;
        asset.set_owner(Some(self.owner));
        self.assets.push(asset);
        if let Some(l) = loan {
            self.liabilities.push(l);
        }
        self.refresh();
        Ok(())
    }

    /// Sell a whole asset to the bank for `price`.
    ///
    /// Any loan that financed it stays on the books.
    pub fn sell_asset(&mut self, id: AssetId, price: i64) -> Result<Asset> {
        if price < 0 {
            return Err(GameError::input("sale price cannot be negative"));
        }
        let name = self.asset(id).ok_or(GameError::UnknownAsset(id))?.name().to_string();
        self.credit(EntryKind::Sale, price, &format!("sell {name}"))?;
        self.remove_asset(id)
    }

    /// Sell part (or all) of a share holding to the bank.
    ///
    /// Returns the proceeds.
    pub fn sell_shares(&mut self, id: AssetId, count: u32, price_per_share: i64) -> Result<i64> {
        if price_per_share < 0 {
            return Err(GameError::input("share price cannot be negative"));
        }
        let held = self
            .asset(id)
            .ok_or(GameError::UnknownAsset(id))?
            .share_count()
            .ok_or_else(|| GameError::input(format!("{id} is not divisible")))?;
        if count == 0 || count > held {
            return Err(GameError::input(format!("cannot sell {count} of {held} shares")));
        }

        let proceeds = money::mul(i64::from(count), price_per_share)?;
        let name = self.asset(id).ok_or(GameError::UnknownAsset(id))?.name().to_string();
        self.credit(EntryKind::Sale, proceeds, &format!("sell {count} x {name}"))?;

        if count == held {
            self.remove_asset(id)?;
        } else if let Some(asset) = self.assets.iter_mut().find(|a| a.id() == id) {
            asset.reduce_shares(count);
        }
        self.refresh();
        Ok(proceeds)
    }

    // === Profile ===

    /// Add a dependent unless `max` is reached.
    ///
    /// Returns whether the dependent was added.
    pub fn add_dependent(&mut self, max: Option<u32>) -> bool {
        if max.is_some_and(|m| self.dependents >= m) {
            return false;
        }
        self.dependents = self.dependents.saturating_add(1);
        self.refresh();
        true
    }

    /// Suspend salary for `turns` more turns.
    pub fn downsize(&mut self, turns: u32) {
        self.downsized_turns = self.downsized_turns.saturating_add(turns);
    }

    /// Count down one downsized turn. Returns the turns left.
    pub fn tick_downsizing(&mut self) -> u32 {
        self.downsized_turns = self.downsized_turns.saturating_sub(1);
        self.downsized_turns
    }

    // === Internals ===

    /// Fails with `InvalidInput`, leaving cash untouched, on overflow.
    pub(super) fn credit(&mut self, kind: EntryKind, amount: i64, memo: &str) -> Result<()> {
        let cash = money::add(self.cash, amount)?;
        self.post(kind, amount, cash, memo);
        Ok(())
    }

    pub(super) fn debit(&mut self, kind: EntryKind, amount: i64, memo: &str) -> Result<()> {
        let signed = money::sub(0, amount)?;
        let cash = money::sub(self.cash, amount)?;
        self.post(kind, signed, cash, memo);
        Ok(())
    }

    /// Whether `amount` can be credited without overflowing cash.
    pub(super) fn check_credit(&self, amount: i64) -> Result<()> {
        money::add(self.cash, amount).map(|_| ())
    }

    /// Check that holding `asset` (and owing `loan`) keeps every total in range.
    pub(super) fn check_room(&self, asset: &Asset, loan: Option<&Liability>) -> Result<()> {
        let passive = money::add(self.passive_income, asset.cash_flow())?;
        money::add(self.effective_salary(), passive)?;
        money::add(self.total_asset_cost(), asset.book_value())?;
        match loan {
            Some(l) => self.check_debt_room(l),
            None => Ok(()),
        }
    }

    fn check_debt_room(&self, liability: &Liability) -> Result<()> {
        money::add(self.total_debt(), liability.balance)?;
        let payments = money::add(self.liability_payments(), liability.monthly_payment)?;
        money::add(money::add(self.base_expense, payments)?, self.dependent_expense())?;
        Ok(())
    }

    fn post(&mut self, kind: EntryKind, amount: i64, cash: i64, memo: &str) {
        self.cash = cash;
        trace!("{} {:?} {:+} -> {}", self.owner, kind, amount, self.cash);
        self.journal.push(LedgerEntry {
            kind,
            amount,
            balance_after: self.cash,
            memo: memo.to_string(),
        });
    }

    fn refresh(&mut self) {
        self.passive_income = self
            .assets
            .iter()
            .fold(0_i64, |sum, a| sum.saturating_add(a.cash_flow()));
        self.financially_free = self.passive_income >= self.total_expense();
    }
}

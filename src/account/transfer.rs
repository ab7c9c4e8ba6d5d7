//! Operations that move cash or assets between two or more accounts.
//!
//! Both operations check every precondition on every account involved before
//! touching any of them.

use log::debug;
use serde::{Deserialize, Serialize};

use super::asset::AssetId;
use super::ledger::{Account, EntryKind};
use crate::core::{GameError, PlayerId, PlayerMap, Result};

/// Sell `asset` from `seller` to `buyer` for `price`.
///
/// Cash and ownership cross in one step. On any error neither account has
/// changed. A loan that financed the asset stays with the seller.
pub fn transfer_asset(
    accounts: &mut PlayerMap<Account>,
    seller: PlayerId,
    buyer: PlayerId,
    asset: AssetId,
    price: i64,
) -> Result<()> {
    if !accounts.contains(seller) {
        return Err(GameError::UnknownPlayer(seller));
    }
    if !accounts.contains(buyer) {
        return Err(GameError::UnknownPlayer(buyer));
    }
    if seller == buyer {
        return Err(GameError::input("cannot sell an asset to its owner"));
    }
    if price < 0 {
        return Err(GameError::input("sale price cannot be negative"));
    }

    let (from, to) = accounts
        .get_pair_mut(seller, buyer)
        .ok_or_else(|| GameError::input("seller and buyer must differ"))?;

    let Some(held) = from.asset(asset) else {
        return Err(GameError::UnknownAsset(asset));
    };
    if to.asset(asset).is_some() {
        return Err(GameError::input(format!("{buyer} already holds {asset}")));
    }
    if !to.can_cover(price) {
        return Err(GameError::InsufficientFunds {
            required: price,
            available: to.cash(),
        });
    }
    from.check_credit(price)?;
    to.check_room(held, None)?;

    // Validated: nothing below can fail.
    let name = held.name().to_string();
    from.credit(EntryKind::TransferIn, price, &format!("{name} to {buyer}"))?;
    to.debit(EntryKind::TransferOut, price, &format!("{name} from {seller}"))?;
    let moved = from.remove_asset(asset)?;
    to.add_asset(moved)?;

    debug!("{seller} sold {asset} to {buyer} for {price}");
    Ok(())
}

/// Result of a charity donation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Donation {
    pub donor: PlayerId,
    /// Amount each other player received.
    pub share: i64,
    pub recipients: Vec<PlayerId>,
}

impl Donation {
    /// Total debited from the donor.
    #[must_use]
    pub fn total(&self) -> i64 {
        self.share * self.recipients.len() as i64
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.share == 0 || self.recipients.is_empty()
    }
}

/// Split `amount` evenly among everyone except `donor`.
///
/// The donor pays `share × recipients`, where `share` is the integer part of
/// the split. When the donor's cash cannot cover that, or the share rounds to
/// zero, nothing moves and an empty donation is returned.
pub fn donate(accounts: &mut PlayerMap<Account>, donor: PlayerId, amount: i64) -> Result<Donation> {
    if !accounts.contains(donor) {
        return Err(GameError::UnknownPlayer(donor));
    }
    if amount < 0 {
        return Err(GameError::input("donation cannot be negative"));
    }

    let recipients: Vec<PlayerId> = accounts.player_ids().filter(|&p| p != donor).collect();
    let mut donation = Donation {
        donor,
        share: 0,
        recipients: Vec::new(),
    };
    if recipients.is_empty() {
        return Ok(donation);
    }

    let share = amount / recipients.len() as i64;
    let total = share * recipients.len() as i64;
    if share == 0 || !accounts[donor].can_cover(total) {
        return Ok(donation);
    }
    for &p in &recipients {
        accounts[p].check_credit(share)?;
    }

    accounts[donor].debit(EntryKind::CharityGiven, total, "charity")?;
    for &p in &recipients {
        let memo = format!("charity from {donor}");
        accounts[p].credit(EntryKind::CharityReceived, share, &memo)?;
    }

    donation.share = share;
    donation.recipients = recipients;
    Ok(donation)
}

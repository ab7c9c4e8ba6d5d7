//! Financial account model.
//!
//! - `Asset` / `Liability`: balance-sheet entries
//! - `Account`: cash, income, expenses and the ledger journal
//! - `transfer_asset` / `donate`: atomic multi-account operations
//! - `charge`: involuntary expenses under the shortfall policy

mod asset;
mod ledger;
mod liability;
pub(crate) mod money;
mod policy;
mod transfer;

pub use asset::{AcquisitionTerms, Asset, AssetId, AssetKind, ShareHolding};
pub use ledger::{Account, EntryKind, LedgerEntry};
pub use policy::{charge, Charge, IdAllocator, ShortfallPolicy};
pub use liability::{monthly_payment_for, Liability, LiabilityCause, LiabilityId};
pub use transfer::{donate, transfer_asset, Donation};

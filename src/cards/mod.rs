//! Card subsystem: investment templates, registry and decks.
//!
//! ## Key Types
//!
//! - `CardId`, `CardType`: identity and family of a template
//! - `Card` / `CardKind`: immutable template with type-specific terms
//! - `CardRegistry`: template lookup and per-type index
//! - `DeckManager`: shuffled per-type piles with draw history

pub mod deck;
pub mod definition;
pub mod registry;

pub use deck::{DeckManager, DrawRecord};
pub use definition::{Card, CardId, CardKind, CardType, PurchaseTerms};
pub use registry::CardRegistry;

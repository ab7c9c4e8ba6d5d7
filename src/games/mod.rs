//! Ready-made game content.
//!
//! - `standard`: the classic three-layer board, card set and professions

pub mod standard;

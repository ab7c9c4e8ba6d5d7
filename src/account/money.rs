//! Checked arithmetic on cash amounts.
//!
//! Overflow surfaces as `InvalidInput`, so the call that would have caused it
//! is rejected before anything is mutated.

use crate::core::{GameError, Result};

pub(crate) fn add(a: i64, b: i64) -> Result<i64> {
    a.checked_add(b).ok_or_else(|| out_of_range(a, '+', b))
}

pub(crate) fn sub(a: i64, b: i64) -> Result<i64> {
    a.checked_sub(b).ok_or_else(|| out_of_range(a, '-', b))
}

pub(crate) fn mul(a: i64, b: i64) -> Result<i64> {
    a.checked_mul(b).ok_or_else(|| out_of_range(a, '*', b))
}

fn out_of_range(a: i64, op: char, b: i64) -> GameError {
    GameError::input(format!("amount out of range: {a} {op} {b}"))
}

//! Index type requirements and base-shift helpers

use std::fmt::Debug;

use num_traits::PrimInt;
use sprs::SpIndex;

use crate::error::{CsrError, Result};

/// Integer types usable as row pointers and column/row indices
///
/// Any index type accepted by sprs qualifies (`usize`, `u32`, `i32`,
/// `i64`, ...), which keeps the raw arrays exchangeable with `CsMat`.
pub trait CsrIndex: SpIndex + PrimInt + Debug + Send + Sync {}

impl<T> CsrIndex for T where T: SpIndex + PrimInt + Debug + Send + Sync {}

/// Converts a `usize` into `Ti`, failing if it does not fit
#[inline]
pub(crate) fn checked_index<Ti: CsrIndex>(value: usize) -> Result<Ti> {
    num_traits::cast::<usize, Ti>(value).ok_or(CsrError::IndexOverflow { value })
}

/// Converts a stored index back to `usize`, `None` when negative
#[inline]
pub(crate) fn to_usize<Ti: CsrIndex>(value: Ti) -> Option<usize> {
    value.to_usize()
}

/// Widens any index for error reporting
#[inline]
pub(crate) fn widen<Ti: CsrIndex>(value: Ti) -> i128 {
    value.to_i128().unwrap_or(i128::MAX)
}

/// Adds `offset` to every element in place
pub(crate) fn shift_up<Ti: CsrIndex>(indices: &mut [Ti], offset: usize) -> Result<()> {
    if offset == 0 {
        return Ok(());
    }
    let off: Ti = checked_index(offset)?;
    for idx in indices.iter_mut() {
        *idx = idx
            .checked_add(&off)
            .ok_or(CsrError::IndexOverflow {
                value: to_usize(*idx).unwrap_or(0).saturating_add(offset),
            })?;
    }
    Ok(())
}

/// Returns a copy of `indices` with `offset` subtracted from every element
///
/// Only called on arrays that were shifted up by the same offset.
pub(crate) fn shifted_down<Ti: CsrIndex>(indices: &[Ti], offset: usize) -> Vec<Ti> {
    if offset == 0 {
        return indices.to_vec();
    }
    let off = Ti::from_usize(offset);
    indices.iter().map(|&idx| idx - off).collect()
}

/// Validates coordinates in base `base` against `bound` and returns them
/// 0-based
pub(crate) fn zero_based<Ti: CsrIndex>(
    indices: &[Ti],
    base: usize,
    bound: usize,
) -> std::result::Result<Vec<usize>, usize> {
    let mut out = Vec::with_capacity(indices.len());
    for (k, &idx) in indices.iter().enumerate() {
        match to_usize(idx) {
            Some(v) if v >= base && v - base < bound => out.push(v - base),
            _ => return Err(k),
        }
    }
    Ok(out)
}

/*
    Copyright Michael Lodder. All Rights Reserved.
    SPDX-License-Identifier: Apache-2.0
*/
//! Scalar `GF(2^8)` arithmetic: the four operations `split`/`combine` are
//! built from. `mul` is the fast table-driven path used by the (non
//! secret-dependent) hot loop in `split`; `mul_logexp` and `div` are the
//! constant-time-guarded variants `combine`'s Lagrange interpolation uses.

use super::tables::tables;
use crate::util::CtIsZero;
use subtle::{Choice, ConditionallySelectable};

/// `a + b` in `GF(2^8)`, i.e. `a ^ b`. Addition and subtraction coincide in
/// characteristic 2.
#[inline]
pub fn add(a: u8, b: u8) -> u8 {
    a ^ b
}

/// `a - b` in `GF(2^8)`. Identical to [`add`].
#[inline]
pub fn sub(a: u8, b: u8) -> u8 {
    a ^ b
}

/// `a * b` using the precomputed 256x256 table. Not constant-time with
/// respect to `a`/`b` (a cache-timing adversary could learn the table
/// index), which is acceptable here: `split`'s coefficients are random, not
/// secret-shaped, so there is nothing to leak.
#[inline]
pub fn mul(a: u8, b: u8) -> u8 {
    tables().mul[a as usize][b as usize]
}

/// `a * b` via log/exp tables with a constant-time zero guard, avoiding the
/// modular reduction `mul` hides in its table by indexing the doubled
/// (512-entry) exp table directly.
#[inline]
pub fn mul_logexp(a: u8, b: u8) -> u8 {
    let t = tables();
    let log_a = t.log[a as usize] as usize;
    let log_b = t.log[b as usize] as usize;
    let raw = t.exp[log_a + log_b];
    let zero = (a.ct_is_zero() | b.ct_is_zero()).unwrap_u8();
    u8::conditional_select(&raw, &0, Choice::from(zero))
}

/// `a / b` in `GF(2^8)`. Panics if `b == 0`; this is a programmer error
/// documented at the API boundary (callers only ever divide by pairwise
/// distinct, non-zero share tags, so an honest caller can never trigger it).
#[inline]
pub fn div(a: u8, b: u8) -> u8 {
    assert!(b != 0, "gf256::div: division by zero");
    let t = tables();
    let log_a = t.log[a as usize] as i32;
    let log_b = t.log[b as usize] as i32;
    let mut diff = (log_a - log_b) % 255;
    if diff < 0 {
        diff += 255;
    }
    let raw = t.exp[diff as usize];
    u8::conditional_select(&raw, &0, Choice::from(a.ct_is_zero().unwrap_u8()))
}

/// `a ^ n` in `GF(2^8)`. `1` when `n == 0` regardless of `a` (including
/// `a == 0`, by the usual `x^0 = 1` convention); `0` when `a == 0` and `n >
/// 0`.
pub fn exp(a: u8, n: u32) -> u8 {
    if n == 0 {
        return 1;
    }
    if a == 0 {
        return 0;
    }
    let t = tables();
    let log_a = t.log[a as usize] as u64;
    let log_result = (log_a * n as u64) % 255;
    t.exp[log_result as usize]
}

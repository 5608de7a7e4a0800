/*
    Copyright Michael Lodder. All Rights Reserved.
    SPDX-License-Identifier: Apache-2.0
*/
//! Cross-checks the dispatched (possibly SIMD) `gf256::mul_const_vec`
//! against an independently-implemented `GF(2^8)` (mod `0x11d`) multiply,
//! over every constant and a spread of buffer lengths that exercise the
//! 32/16-byte SIMD chunking and its scalar tail on whatever target this
//! runs on. Mirrors the independent-oracle pattern used for Lagrange
//! interpolation in `tests/sss.rs`: built from scratch rather than reusing
//! anything from `shamir_krawczyk_core::gf256`.

use shamir_krawczyk_core::gf256;

const REDUCTION: u16 = 0x11d;

fn build_tables() -> ([u8; 256], [u8; 512]) {
    let mut log = [0u8; 256];
    let mut exp = [0u8; 512];
    let mut x: u16 = 1;
    for i in 0..255usize {
        exp[i] = x as u8;
        log[x as usize] = i as u8;
        x <<= 1;
        if x & 0x100 != 0 {
            x ^= REDUCTION;
        }
    }
    for i in 255..512 {
        exp[i] = exp[i - 255];
    }
    (log, exp)
}

fn oracle_mul(log: &[u8; 256], exp: &[u8; 512], a: u8, b: u8) -> u8 {
    if a == 0 || b == 0 {
        0
    } else {
        exp[log[a as usize] as usize + log[b as usize] as usize]
    }
}

#[test]
fn mul_const_vec_matches_independent_oracle_for_every_constant_and_several_lengths() {
    let (log, exp) = build_tables();
    let lengths = [0usize, 1, 7, 15, 16, 17, 31, 32, 33, 63, 64, 255, 256, 257, 1031];

    for &len in &lengths {
        let input: Vec<u8> = (0..len).map(|i| (i * 37 + 11) as u8).collect();
        for c in 0u16..256 {
            let c = c as u8;
            let mut dispatched = input.clone();
            gf256::mul_const_vec(c, &mut dispatched);

            let expected: Vec<u8> = input.iter().map(|&byte| oracle_mul(&log, &exp, c, byte)).collect();
            assert_eq!(dispatched, expected, "constant {c}, length {len} diverged");
        }
    }
}

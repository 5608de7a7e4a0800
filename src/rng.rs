/*
    Copyright Michael Lodder. All Rights Reserved.
    SPDX-License-Identifier: Apache-2.0
*/
//! A CSPRNG backed by an AES-128-CTR keystream, seeded once from OS entropy
//! and then reused for every draw a [`crate::worker::Worker`] or a single
//! `split` call makes. Matches `original_source/csprng/csprng.go`'s shape
//! (a keyed block-cipher-in-counter-mode instance wrapped around `Read`,
//! `Perm`, and a unique-byte drawer) with the stream mode upgraded from the
//! original's implicit byte-XOR construction to the explicit `ctr` crate,
//! and with the key/IV seeded from the OS rather than `math/rand`-over-time.

use aes::Aes128;
use ctr::cipher::{KeyIvInit, StreamCipher};
use rand_core::RngCore;
use tracing::trace;

type Aes128Ctr = ctr::Ctr128BE<Aes128>;

/// A single-producer, non-thread-shared source of secret-sharing
/// randomness: polynomial coefficients, share tag permutations, and the
/// random 16-byte data-encryption key SSMS draws.
///
/// Not `Clone`, not `Sync`: the intended usage is one CSPRNG per worker,
/// reused serially across many `split` calls, never shared across threads.
pub struct Csprng {
    cipher: Aes128Ctr,
}

impl Csprng {
    /// Seeds a fresh instance from 32 bytes of OS entropy: the first 16
    /// bytes become the AES-128 key, the last 16 the initial counter block.
    pub fn new() -> Self {
        let mut seed = [0u8; 32];
        rand::rngs::OsRng.fill_bytes(&mut seed);
        trace!("csprng seeded from OS entropy");
        Self::new_with_seed(seed)
    }

    /// Seeds a deterministic instance from a caller-supplied 32-byte seed
    /// (16-byte key followed by 16-byte initial counter block). Exists for
    /// reproducible tests; production callers should use [`Csprng::new`].
    pub fn new_with_seed(seed: [u8; 32]) -> Self {
        let (key, iv) = seed.split_at(16);
        let cipher = Aes128Ctr::new(key.into(), iv.into());
        Self { cipher }
    }

    /// Fills `buf` with keystream bytes, advancing the internal counter.
    /// Implemented as XOR-ing the keystream into a zeroed buffer, so the
    /// output is exactly the keystream itself.
    pub fn read(&mut self, buf: &mut [u8]) {
        buf.fill(0);
        self.cipher.apply_keystream(buf);
    }

    /// Returns a uniformly random permutation of `0..n` using a
    /// Fisher-Yates shuffle driven by [`Csprng::read`].
    pub fn perm(&mut self, n: u8) -> Vec<u8> {
        let n = n as usize;
        let mut result: Vec<u8> = (0..n as u8).collect();
        if n <= 1 {
            return result;
        }
        let mut draws = vec![0u8; n - 1];
        self.read(&mut draws);
        for i in 0..n - 1 {
            let j = i + (draws[i] as usize % (n - i));
            result.swap(i, j);
        }
        result
    }

    /// Draws `n` (`n <= 255`) pairwise-distinct bytes from `0..=254`. For `n
    /// >= 20` this takes the first `n` entries of a full permutation of
    /// `0..255` (cheaper than rejection sampling once a meaningful fraction
    /// of the byte space is needed); for smaller `n` it rejection-samples
    /// single bytes, which is cheaper when `n` is small relative to 255.
    ///
    /// The domain is capped at 254 (not 255) rather than the full `u8`
    /// range so that callers needing non-zero tags can add 1 to every
    /// drawn byte without ever wrapping back to 0, matching
    /// `original_source/shamir/shamir.go`'s `rand.Perm(255)` (which
    /// likewise yields values `0..254`).
    pub fn unique_bytes(&mut self, n: usize) -> Vec<u8> {
        assert!(n <= 255, "unique_bytes: n must be <= 255, got {n}");
        if n >= 20 {
            let mut perm = self.perm(255);
            perm.truncate(n);
            perm
        } else {
            let mut seen = [false; 255];
            let mut result = Vec::with_capacity(n);
            let mut one = [0u8; 1];
            while result.len() < n {
                self.read(&mut one);
                let b = one[0];
                if b != 255 && !seen[b as usize] {
                    seen[b as usize] = true;
                    result.push(b);
                }
            }
            result
        }
    }
}

impl Default for Csprng {
    fn default() -> Self {
        Self::new()
    }
}

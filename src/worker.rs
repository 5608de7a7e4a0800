/*
    Copyright Michael Lodder. All Rights Reserved.
    SPDX-License-Identifier: Apache-2.0
*/
//! A façade binding one [`Csprng`] across many `split`/`combine` calls,
//! dispatching on an algorithm tag. Grounded in
//! `original_source/worker/worker.go`'s `Worker`, which does exactly this
//! with a `*rand.Rand` in place of this crate's AES-CTR [`Csprng`].

use crate::error::{Error, SharingResult};
use crate::rng::Csprng;
use crate::ssms;
use crate::sss;

/// The Shamir (SSS) algorithm tag.
pub const ALG_SHAMIR: &str = "shamir";
/// The SSMS (Krawczyk) algorithm tag.
pub const ALG_KRAWCZYK: &str = "krawczyk";

/// Owns a single [`Csprng`], reused across every `split` call it makes.
/// Single-producer: a `Worker` is not `Sync` and is not meant to be shared
/// across threads. Give each thread its own.
pub struct Worker {
    rng: Csprng,
}

impl Worker {
    /// Builds a worker with a freshly OS-seeded CSPRNG.
    pub fn new() -> Self {
        Self { rng: Csprng::new() }
    }

    /// Splits `input` into `n` shares of `algorithm`, using this worker's
    /// CSPRNG. `algorithm` must be [`ALG_SHAMIR`] or [`ALG_KRAWCZYK`].
    pub fn split(&mut self, algorithm: &str, input: &[u8], n: u8, k: u8) -> SharingResult<Vec<Vec<u8>>> {
        match algorithm {
            ALG_SHAMIR => {
                let shares = sss::split_with_rng(input, n, k, &mut self.rng)?;
                Ok(shares.into_iter().map(Into::into).collect())
            }
            ALG_KRAWCZYK => ssms::split_with_rng(input, n, k, &mut self.rng),
            other => Err(Error::InvalidAlgorithm { tag: other.to_string() }),
        }
    }

    /// Reconstructs a secret of `algorithm` from `data`. `algorithm` must
    /// be [`ALG_SHAMIR`] or [`ALG_KRAWCZYK`].
    pub fn combine(&self, algorithm: &str, data: &[Vec<u8>], n: u8, k: u8) -> SharingResult<Vec<u8>> {
        match algorithm {
            ALG_SHAMIR => {
                let shares: Vec<crate::share::Share> =
                    data.iter().map(|b| crate::share::Share::from_bytes(b.clone())).collect();
                sss::combine(&shares)
            }
            ALG_KRAWCZYK => ssms::combine(data, n, k),
            other => Err(Error::InvalidAlgorithm { tag: other.to_string() }),
        }
    }
}

impl Default for Worker {
    fn default() -> Self {
        Self::new()
    }
}

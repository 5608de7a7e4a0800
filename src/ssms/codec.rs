/*
    Copyright Michael Lodder. All Rights Reserved.
    SPDX-License-Identifier: Apache-2.0
*/
//! The systematic erasure codec SSMS uses to turn `k` data shards into `n`
//! recoverable ones. A small collaborator interface
//! (`split`/`encode`/`reconstruct_data`/`join`) matching the shape of
//! `reed-solomon-erasure`'s `ReedSolomon` (and, in the original this crate
//! is modeled on, `klauspost/reedsolomon`'s `Encoder`).

use crate::error::{Error, SharingResult};
use reed_solomon_erasure::galois_8::ReedSolomon;

/// A systematic `(data_shards, parity_shards)` erasure codec.
pub trait ErasureCodec {
    /// Splits `data` into `data_shards` equally sized shards (zero-padding
    /// the last one if needed) plus `parity_shards` empty shards ready for
    /// [`ErasureCodec::encode`].
    fn split(&self, data: &[u8]) -> SharingResult<Vec<Vec<u8>>>;
    /// Fills the parity shards in place from the data shards.
    fn encode(&self, shards: &mut [Vec<u8>]) -> SharingResult<()>;
    /// Reconstructs missing data shards (entries that are `None`) from
    /// however many shards (data or parity) are present. Requires at least
    /// `data_shards` entries to be `Some`.
    fn reconstruct_data(&self, shards: &mut [Option<Vec<u8>>]) -> SharingResult<()>;
    /// Concatenates the (now-reconstructed) data shards and trims the
    /// result to `out_len`, undoing `split`'s zero-padding.
    fn join(&self, data_shards: &[Vec<u8>], out_len: usize) -> SharingResult<Vec<u8>>;
}

/// Reed-Solomon over `GF(2^8)`, wiring [`ErasureCodec`] to the
/// `reed-solomon-erasure` crate.
pub struct ReedSolomonCodec {
    data_shards: usize,
    parity_shards: usize,
    rs: ReedSolomon,
}

impl ReedSolomonCodec {
    /// Builds a codec for `data_shards` data and `parity_shards` parity
    /// shards.
    pub fn new(data_shards: usize, parity_shards: usize) -> SharingResult<Self> {
        let rs = ReedSolomon::new(data_shards, parity_shards).map_err(|e| Error::CodecFailure {
            reason: format!("{e:?}"),
        })?;
        Ok(Self {
            data_shards,
            parity_shards,
            rs,
        })
    }
}

impl ErasureCodec for ReedSolomonCodec {
    fn split(&self, data: &[u8]) -> SharingResult<Vec<Vec<u8>>> {
        let shard_len = data.len().div_ceil(self.data_shards).max(1);
        let mut shards = vec![vec![0u8; shard_len]; self.data_shards + self.parity_shards];
        for (chunk, shard) in data.chunks(shard_len).zip(shards.iter_mut()) {
            shard[..chunk.len()].copy_from_slice(chunk);
        }
        Ok(shards)
    }

    fn encode(&self, shards: &mut [Vec<u8>]) -> SharingResult<()> {
        self.rs.encode(shards).map_err(|e| Error::CodecFailure {
            reason: format!("{e:?}"),
        })
    }

    fn reconstruct_data(&self, shards: &mut [Option<Vec<u8>>]) -> SharingResult<()> {
        self.rs.reconstruct_data(shards).map_err(|e| Error::CodecFailure {
            reason: format!("{e:?}"),
        })
    }

    fn join(&self, data_shards: &[Vec<u8>], out_len: usize) -> SharingResult<Vec<u8>> {
        if data_shards.len() < self.data_shards {
            return Err(Error::CodecFailure {
                reason: "not enough data shards to join".to_string(),
            });
        }
        let mut out = Vec::with_capacity(out_len);
        for shard in &data_shards[..self.data_shards] {
            out.extend_from_slice(shard);
        }
        out.truncate(out_len);
        Ok(out)
    }
}

/*
    Copyright Michael Lodder. All Rights Reserved.
    SPDX-License-Identifier: Apache-2.0
*/
//! Krawczyk's "Secret Sharing Made Short" (SSMS): encrypt the secret,
//! erasure-code the ciphertext, and share the data-encryption key (plus
//! its length) with classical SSS. Produces shares far shorter than plain
//! SSS's `L`-byte-per-share cost once `n` grows, at the price of needing
//! `k` (not just any 2) shares of the *erasure-coded* ciphertext.
//!
//! Grounded in `original_source/krawczyk/{krawczyk.go,aes.go}`, with the
//! stream cipher upgraded to AES-CTR (from the original's AES-OFB) and the
//! key/length framing fixed at 16 bytes of key plus 4 bytes of length
//! (from the original's 24+2).

pub mod cipher;
pub mod codec;

use crate::error::{Error, SharingResult};
use crate::rng::Csprng;
use crate::share::Share;
use crate::sss;
use cipher::{Aes128CtrCipher, StreamCipher};
use codec::{ErasureCodec, ReedSolomonCodec};
use tracing::debug;

/// Data-encryption key length, in bytes. Fixed by this crate at 16; the
/// original this is modeled on used 24.
const KEY_LEN: usize = 16;
/// Length-of-secret field width, in bytes, little-endian. Fixed at 4; the
/// original used 2.
const LEN_LEN: usize = 4;
/// `metadata = key ++ length`, SSS-shared as a unit; its share overhead
/// (the metadata share) is `KEY_LEN + LEN_LEN + 1` bytes.
const METADATA_LEN: usize = KEY_LEN + LEN_LEN;
const METADATA_SHARE_LEN: usize = METADATA_LEN + 1;

fn check_params(secret_len: usize, n: u8, k: u8) -> SharingResult<()> {
    if secret_len == 0 {
        return Err(Error::InvalidParameters {
            reason: "secret must not be empty",
        });
    }
    if u64::try_from(secret_len).unwrap_or(u64::MAX) > u32::from(u32::MAX) as u64 {
        return Err(Error::InvalidParameters {
            reason: "secret too large for a 4-byte length field",
        });
    }
    if k < 2 {
        return Err(Error::InvalidParameters {
            reason: "threshold must be at least 2",
        });
    }
    if n < k {
        return Err(Error::InvalidParameters {
            reason: "share count must be at least the threshold",
        });
    }
    Ok(())
}

/// Splits `secret` into `n` SSMS shares, any `k` of which reconstruct it.
/// Draws its own [`Csprng`]; use [`split_with_rng`] to supply one.
pub fn split(secret: &[u8], n: u8, k: u8) -> SharingResult<Vec<Vec<u8>>> {
    let mut rng = Csprng::new();
    split_with_rng(secret, n, k, &mut rng)
}

/// As [`split`], but with a caller-supplied CSPRNG. When `n == k` this
/// degenerates to plain SSS (there would be zero parity shards to erasure
/// code, which the Reed-Solomon codec cannot represent), so it delegates
/// to [`sss::split_with_rng`] directly rather than constructing a
/// zero-parity codec.
pub fn split_with_rng(secret: &[u8], n: u8, k: u8, rng: &mut Csprng) -> SharingResult<Vec<Vec<u8>>> {
    check_params(secret.len(), n, k)?;

    if n == k {
        debug!("ssms split degenerate case (n == k), delegating to sss");
        let shares = sss::split_with_rng(secret, n, k, rng)?;
        return Ok(shares.into_iter().map(Share::into_bytes).collect());
    }

    let mut key = [0u8; KEY_LEN];
    rng.read(&mut key);

    let mut ciphertext = secret.to_vec();
    Aes128CtrCipher.xor_keystream(&key, &mut ciphertext)?;

    let codec = ReedSolomonCodec::new(k as usize, (n - k) as usize)?;
    let mut shards = codec.split(&ciphertext)?;
    codec.encode(&mut shards)?;

    let mut metadata = Vec::with_capacity(METADATA_LEN);
    metadata.extend_from_slice(&key);
    metadata.extend_from_slice(&(secret.len() as u32).to_le_bytes());
    let metadata_shares = sss::split_with_rng(&metadata, n, k, rng)?;
    debug_assert_eq!(metadata_shares[0].as_bytes().len(), METADATA_SHARE_LEN);

    let out = metadata_shares
        .into_iter()
        .zip(shards)
        .enumerate()
        .map(|(part_id, (meta_share, shard))| {
            let mut buf = Vec::with_capacity(METADATA_SHARE_LEN + 1 + shard.len());
            buf.extend_from_slice(meta_share.as_bytes());
            buf.push(part_id as u8);
            buf.extend_from_slice(&shard);
            buf
        })
        .collect();
    Ok(out)
}

/// Reconstructs the secret from `shares`, `n` and `k` matching the values
/// `split` was called with. A share that is empty (zero-length) signals a
/// hole in the set (e.g. a part known to be unavailable) rather than being
/// omitted from `shares` entirely, so `shares.len()` is expected to equal
/// `n`. Requires at least `k` non-empty shares.
pub fn combine(shares: &[Vec<u8>], n: u8, k: u8) -> SharingResult<Vec<u8>> {
    if k < 2 || n < k {
        return Err(Error::InvalidParameters {
            reason: "invalid n/k for combine",
        });
    }

    if n == k {
        debug!("ssms combine degenerate case (n == k), delegating to sss");
        let sss_shares: Vec<Share> = shares
            .iter()
            .filter(|s| !s.is_empty())
            .map(|bytes| Share::from_bytes(bytes.clone()))
            .collect();
        return sss::combine(&sss_shares);
    }

    let present: Vec<(usize, &Vec<u8>)> = shares.iter().enumerate().filter(|(_, s)| !s.is_empty()).collect();
    if present.len() < k as usize {
        return Err(Error::MismatchedShares {
            expected: "at least k non-empty shares",
        });
    }

    let mut metadata_shares = Vec::with_capacity(present.len());
    let mut data_shards: Vec<Option<Vec<u8>>> = vec![None; n as usize];

    for (_, bytes) in &present {
        if bytes.len() <= METADATA_SHARE_LEN + 1 {
            return Err(Error::MismatchedShares {
                expected: "share longer than the metadata-plus-part-id prefix",
            });
        }
        let metadata_prefix = bytes[..METADATA_SHARE_LEN].to_vec();
        let part_id = bytes[METADATA_SHARE_LEN];
        let chunk = bytes[METADATA_SHARE_LEN + 1..].to_vec();

        if part_id as usize >= n as usize {
            return Err(Error::InvalidParameters {
                reason: "part id out of range",
            });
        }

        metadata_shares.push(Share::from_bytes(metadata_prefix));
        data_shards[part_id as usize] = Some(chunk);
    }

    let metadata = sss::combine(&metadata_shares)?;
    if metadata.len() != METADATA_LEN {
        return Err(Error::MismatchedShares {
            expected: "metadata of key-length plus length-length bytes",
        });
    }
    let key = &metadata[..KEY_LEN];
    let secret_len = u32::from_le_bytes(metadata[KEY_LEN..METADATA_LEN].try_into().unwrap()) as usize;

    let codec = ReedSolomonCodec::new(k as usize, (n - k) as usize)?;
    codec.reconstruct_data(&mut data_shards)?;
    let data_shards: Vec<Vec<u8>> = data_shards[..k as usize]
        .iter()
        .cloned()
        .map(|s| s.expect("reconstructed"))
        .collect();

    let mut plaintext = codec.join(&data_shards, secret_len)?;
    Aes128CtrCipher.xor_keystream(key, &mut plaintext)?;
    Ok(plaintext)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_with_all_shares_present() {
        let mut rng = Csprng::new_with_seed([11u8; 32]);
        let secret = b"a moderately sized secret payload for testing".to_vec();
        let shares = split_with_rng(&secret, 5, 2, &mut rng).unwrap();
        assert_eq!(shares.len(), 5);
        let recovered = combine(&shares, 5, 2).unwrap();
        assert_eq!(recovered, secret);
    }

    #[test]
    fn round_trips_with_exactly_k_present() {
        let mut rng = Csprng::new_with_seed([12u8; 32]);
        let secret = vec![0x42u8; 5000];
        let shares = split_with_rng(&secret, 5, 2, &mut rng).unwrap();

        let mut with_holes = shares.clone();
        with_holes[1] = Vec::new();
        with_holes[3] = Vec::new();
        with_holes[4] = Vec::new();

        let recovered = combine(&with_holes, 5, 2).unwrap();
        assert_eq!(recovered, secret);
    }

    #[test]
    fn share_length_matches_formula() {
        let mut rng = Csprng::new_with_seed([13u8; 32]);
        let secret = vec![0u8; 1_000_000];
        let shares = split_with_rng(&secret, 5, 2, &mut rng).unwrap();
        let expected_len = secret.len().div_ceil(2) + 22;
        for s in &shares {
            assert_eq!(s.len(), expected_len);
        }
    }

    #[test]
    fn degenerate_n_equals_k_produces_sss_shares() {
        let mut rng = Csprng::new_with_seed([14u8; 32]);
        let secret = vec![0xabu8; 88];
        let shares = split_with_rng(&secret, 4, 4, &mut rng).unwrap();
        for s in &shares {
            assert_eq!(s.len(), 89);
        }
        let recovered = combine(&shares, 4, 4).unwrap();
        assert_eq!(recovered, secret);
    }

    #[test]
    fn rejects_too_few_present_shares() {
        let mut rng = Csprng::new_with_seed([15u8; 32]);
        let secret = vec![1u8; 100];
        let shares = split_with_rng(&secret, 5, 3, &mut rng).unwrap();
        let mut with_holes = shares.clone();
        with_holes[0] = Vec::new();
        with_holes[1] = Vec::new();
        with_holes[2] = Vec::new();
        assert!(combine(&with_holes, 5, 3).is_err());
    }
}

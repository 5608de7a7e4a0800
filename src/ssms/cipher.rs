/*
    Copyright Michael Lodder. All Rights Reserved.
    SPDX-License-Identifier: Apache-2.0
*/
//! The stream cipher SSMS uses to mask the secret before erasure coding.
//! Unauthenticated by design: the shares' own threshold structure, not the
//! cipher, is what protects the secret, so there is no MAC to verify here.
//! A corrupted share is caught by the erasure codec or surfaces as garbage
//! plaintext, not by this layer.

use crate::error::{Error, SharingResult};
use aes::Aes128;
use ctr::cipher::{KeyIvInit, StreamCipher as _};

type Aes128Ctr = ctr::Ctr128BE<Aes128>;

/// A collaborator interface the SSMS engine assumes: XOR a keystream
/// derived from `key` into `buf` in place. Zero IV is this crate's fixed
/// convention (the key itself is never reused across splits, so a zero IV
/// does not cause keystream reuse).
pub trait StreamCipher {
    /// XORs a keystream derived from `key` into `buf`, in place.
    fn xor_keystream(&self, key: &[u8], buf: &mut [u8]) -> SharingResult<()>;
}

/// AES-128 in CTR mode with an all-zero initial counter block.
pub struct Aes128CtrCipher;

impl StreamCipher for Aes128CtrCipher {
    fn xor_keystream(&self, key: &[u8], buf: &mut [u8]) -> SharingResult<()> {
        if key.len() != 16 {
            return Err(Error::CipherFailure {
                reason: format!("expected a 16-byte key, got {}", key.len()),
            });
        }
        let iv = [0u8; 16];
        let mut cipher = Aes128Ctr::new(key.into(), (&iv).into());
        cipher.apply_keystream(buf);
        Ok(())
    }
}

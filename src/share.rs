/*
    Copyright Michael Lodder. All Rights Reserved.
    SPDX-License-Identifier: Apache-2.0
*/
//! The SSS share wire format: `L` value bytes followed by a one-byte tag
//! (the polynomial's x-coordinate), tag **last** rather than first: the
//! opposite convention from the teacher's own `(SmallArray, Vec<u8>)` and
//! `GenericArray` share impls, which all put the identifier at index 0. The
//! newtype shape (wrap a byte buffer, expose `identifier`/`value`
//! accessors, derive `Zeroize`) is kept; the byte layout is not.

use subtle::{Choice, ConstantTimeEq};

#[cfg(feature = "zeroize")]
use zeroize::Zeroize;

/// One share of a split secret: `value() ++ [identifier()]`.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "zeroize", derive(Zeroize))]
pub struct Share(pub(crate) Vec<u8>);

impl Share {
    /// Builds a share from a value and a tag, placing the tag in the last
    /// byte.
    pub fn with_identifier_and_value(identifier: u8, value: &[u8]) -> Self {
        let mut bytes = Vec::with_capacity(value.len() + 1);
        bytes.extend_from_slice(value);
        bytes.push(identifier);
        Self(bytes)
    }

    /// Wraps raw wire bytes (`value() ++ [identifier()]`) as a share
    /// without re-deriving them. Used when a share's bytes arrive already
    /// framed, e.g. the metadata prefix sliced out of an SSMS share.
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }

    /// The tag (x-coordinate) this share was evaluated at: the last byte.
    pub fn identifier(&self) -> u8 {
        *self.0.last().expect("share is never empty")
    }

    /// The `L` value bytes, excluding the trailing tag.
    pub fn value(&self) -> &[u8] {
        &self.0[..self.0.len() - 1]
    }

    /// True (in constant time) if every value byte is zero. A share built
    /// this way never carries secret information and signals a hole in an
    /// SSMS share set.
    pub fn is_zero(&self) -> Choice {
        self.value().ct_eq(&vec![0u8; self.value().len()])
    }

    /// The full wire bytes (`value() ++ [identifier()]`).
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Consumes the share, returning the full wire bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.0
    }
}

impl From<Share> for Vec<u8> {
    fn from(share: Share) -> Self {
        share.0
    }
}

impl AsRef<[u8]> for Share {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

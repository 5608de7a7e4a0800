/*
    Copyright Michael Lodder. All Rights Reserved.
    SPDX-License-Identifier: Apache-2.0
*/
use std::fmt::{self, Display, Formatter};

/// Errors produced while splitting or combining shares.
///
/// Variants carry enough context to produce an actionable [`Display`]
/// message; none of them are meant to be matched on for control flow beyond
/// distinguishing the seven broad kinds the library's error model names.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Error {
    /// `n`/`k` out of range, `k > n`, empty secret, or a secret too large
    /// for SSMS (longer than `u32::MAX` bytes).
    InvalidParameters {
        /// Human-readable reason for the rejection.
        reason: &'static str,
    },
    /// Two or more shares passed to `combine` carry the same tag/x-coordinate.
    DuplicateShare,
    /// Shares passed to `combine` differ in length, number fewer than two,
    /// or are individually too short to contain a tag.
    MismatchedShares {
        /// What was expected.
        expected: &'static str,
    },
    /// An unrecognized algorithm tag was given to [`crate::worker::Worker`].
    InvalidAlgorithm {
        /// The tag that was rejected.
        tag: String,
    },
    /// The erasure codec reported an unrecoverable condition (SSMS only).
    CodecFailure {
        /// The codec's own error message.
        reason: String,
    },
    /// The stream cipher failed to initialize or seek (SSMS only).
    CipherFailure {
        /// The cipher's own error message.
        reason: String,
    },
    /// The OS entropy source or the instance CSPRNG failed to produce bytes.
    RandomFailure {
        /// The underlying failure, if one was reported.
        reason: String,
    },
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidParameters { reason } => write!(f, "invalid parameters: {reason}"),
            Error::DuplicateShare => write!(f, "duplicate share tag detected during combine"),
            Error::MismatchedShares { expected } => {
                write!(f, "mismatched shares: expected {expected}")
            }
            Error::InvalidAlgorithm { tag } => {
                write!(f, "invalid secret-sharing algorithm: {tag}")
            }
            Error::CodecFailure { reason } => write!(f, "erasure codec failure: {reason}"),
            Error::CipherFailure { reason } => write!(f, "stream cipher failure: {reason}"),
            Error::RandomFailure { reason } => write!(f, "random generation failure: {reason}"),
        }
    }
}

impl std::error::Error for Error {}

/// Convenience alias used throughout this crate.
pub type SharingResult<T> = Result<T, Error>;

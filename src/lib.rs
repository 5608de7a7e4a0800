/*
    Copyright Michael Lodder. All Rights Reserved.
    SPDX-License-Identifier: Apache-2.0
*/
//! Threshold secret sharing over `GF(2^8)`: classical Shamir Secret
//! Sharing ([`sss`]) and Krawczyk's "Secret Sharing Made Short"
//! ([`ssms`]), which shares a short encryption key instead of the whole
//! secret and erasure-codes the rest, trading plain SSS's "any 2 shares
//! reconstruct" guarantee for much smaller shares once `n` grows.
//!
//! [`worker::Worker`] binds a single CSPRNG across many calls and
//! dispatches on an algorithm tag (`"shamir"` / `"krawczyk"`) for callers
//! that select the scheme at runtime.
#![deny(
    missing_docs,
    unused_import_braces,
    unused_qualifications,
    trivial_casts,
    trivial_numeric_casts
)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod error;
pub mod gf256;
pub mod polynomial;
mod pool;
pub mod rng;
pub mod share;
pub mod ssms;
pub mod sss;
mod util;
pub mod worker;

pub use error::{Error, SharingResult};
pub use rng::Csprng;
pub use share::Share;
pub use worker::{Worker, ALG_KRAWCZYK, ALG_SHAMIR};

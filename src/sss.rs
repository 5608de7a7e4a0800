/*
    Copyright Michael Lodder. All Rights Reserved.
    SPDX-License-Identifier: Apache-2.0
*/
//! Classical Shamir Secret Sharing over `GF(2^8)`: `split`/`combine`, share
//! regeneration, and a chunked parallel variant of `split`. Grounded in
//! `original_source/shamir/shamir.go` (itself HashiCorp Vault's
//! `shamir.go`), restructured around this crate's batched
//! [`crate::polynomial`] layer instead of the original's per-chunk
//! goroutines, and around the teacher's `check_params`-then-act shape from
//! `mikelodder7-vsss-rs`'s `src/shamir.rs`.

use crate::error::{Error, SharingResult};
use crate::gf256;
use crate::polynomial::{evaluate_batched_into, interpolate_at, make_polynomials, transpose_to_column_major};
use crate::rng::Csprng;
use crate::share::Share;
use tracing::warn;

/// Byte count above which [`split_parallel`] chunks the secret across
/// worker threads instead of evaluating it as a single batch.
const PARALLEL_CHUNK_THRESHOLD: usize = 8 * 1024;

fn check_params(secret_len: usize, n: u8, k: u8) -> SharingResult<()> {
    if secret_len == 0 {
        return Err(Error::InvalidParameters {
            reason: "secret must not be empty",
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

/// Draws `n` pairwise-distinct, non-zero share tags: `n` distinct bytes
/// from `0..=254` via [`Csprng::unique_bytes`], each incremented by one.
fn draw_tags(n: u8, rng: &mut Csprng) -> Vec<u8> {
    rng.unique_bytes(n as usize)
        .into_iter()
        .map(|b| b + 1)
        .collect()
}

/// Draws `num_new` tags disjoint from `existing` and from each other, all
/// non-zero. Used by [`regenerate`], which must not reissue a tag already
/// in circulation.
fn draw_disjoint_tags(existing: &[u8], num_new: u8, rng: &mut Csprng) -> Vec<u8> {
    let mut result = Vec::with_capacity(num_new as usize);
    let mut one = [0u8; 1];
    while result.len() < num_new as usize {
        rng.read(&mut one);
        if one[0] == 255 {
            continue;
        }
        let tag = one[0] + 1;
        if !existing.contains(&tag) && !result.contains(&tag) {
            result.push(tag);
        }
    }
    result
}

/// Splits `secret` into `n` shares, any `k` of which reconstruct it.
/// Draws its own [`Csprng`] seeded from OS entropy; use [`split_with_rng`]
/// to supply one (e.g. a [`crate::worker::Worker`]'s).
pub fn split(secret: &[u8], n: u8, k: u8) -> SharingResult<Vec<Share>> {
    let mut rng = Csprng::new();
    split_with_rng(secret, n, k, &mut rng)
}

/// As [`split`], but evaluates with the supplied CSPRNG instead of seeding
/// a fresh one. Preconditions: `2 <= k <= n <= 255`, `secret` non-empty.
pub fn split_with_rng(secret: &[u8], n: u8, k: u8, rng: &mut Csprng) -> SharingResult<Vec<Share>> {
    check_params(secret.len(), n, k)?;

    let l = secret.len();
    let k = k as usize;
    let tags = draw_tags(n, rng);
    let row_major = make_polynomials(secret, k, rng);
    let col_major = transpose_to_column_major(&row_major, l, k);

    let mut shares = Vec::with_capacity(tags.len());
    let pool = crate::pool::shared();
    for tag in tags {
        // Claim the Horner-evaluation scratch buffer from the pool instead
        // of allocating fresh each iteration, and hand it back once its
        // bytes are copied into the share, so later iterations (and later
        // `split` calls on similarly sized secrets) reuse the allocation.
        let mut value = pool.get(l);
        evaluate_batched_into(&col_major, k, l, tag, &mut value);
        shares.push(Share::with_identifier_and_value(tag, &value));
        pool.put(value);
    }
    Ok(shares)
}

/// As [`split`], but evaluates the polynomial matrix in parallel chunks of
/// the secret once it exceeds 8 KiB. All coefficients (and therefore all
/// randomness) are drawn from `rng` up front on the calling thread; only
/// the (non secret-dependent, data-independent) Horner evaluation loop is
/// farmed out, so splitting across threads changes nothing about what is
/// random versus what is derived from it. Mirrors
/// `original_source/shamir/shamir.go`'s `SplitP`.
pub fn split_parallel(secret: &[u8], n: u8, k: u8, rng: &mut Csprng) -> SharingResult<Vec<Share>> {
    check_params(secret.len(), n, k)?;
    if secret.len() <= PARALLEL_CHUNK_THRESHOLD {
        return split_with_rng(secret, n, k, rng);
    }

    let l = secret.len();
    let k_usize = k as usize;
    let tags = draw_tags(n, rng);
    let row_major = make_polynomials(secret, k_usize, rng);
    let col_major = transpose_to_column_major(&row_major, l, k_usize);

    let num_chunks = std::thread::available_parallelism().map(|p| p.get()).unwrap_or(1).max(1);
    let chunk_len = l.div_ceil(num_chunks);

    let mut values = vec![vec![0u8; l]; tags.len()];
    // Each thread owns a disjoint byte range across every tag's output
    // vector, so the `values` scratch can be carved into non-overlapping
    // mutable slices up front.
    let mut remaining: Vec<&mut [u8]> = values.iter_mut().map(|v| v.as_mut_slice()).collect();

    std::thread::scope(|scope| {
        let mut offset = 0usize;
        let mut chunk_slices: Vec<(usize, usize, Vec<&mut [u8]>)> = Vec::new();
        while offset < l {
            let this_len = chunk_len.min(l - offset);
            let mut per_tag = Vec::with_capacity(remaining.len());
            let mut next_remaining = Vec::with_capacity(remaining.len());
            for slice in remaining.drain(..) {
                let (head, tail) = slice.split_at_mut(this_len);
                per_tag.push(head);
                next_remaining.push(tail);
            }
            remaining = next_remaining;
            chunk_slices.push((offset, this_len, per_tag));
            offset += this_len;
        }

        for (offset, this_len, mut per_tag) in chunk_slices {
            let col_major = &col_major;
            let tags = &tags;
            scope.spawn(move || {
                for (tag_idx, &tag) in tags.iter().enumerate() {
                    let chunk = evaluate_batched_range(col_major, k_usize, l, tag, offset, this_len);
                    per_tag[tag_idx].copy_from_slice(&chunk);
                }
            });
        }
    });

    let shares = tags
        .into_iter()
        .zip(values)
        .map(|(tag, value)| Share::with_identifier_and_value(tag, &value))
        .collect();
    Ok(shares)
}

/// Evaluates only `[offset, offset + len)` of the `l`-wide batch at `x`,
/// for [`split_parallel`]'s per-chunk worker threads.
fn evaluate_batched_range(
    column_major: &[u8],
    k: usize,
    l: usize,
    x: u8,
    offset: usize,
    len: usize,
) -> Vec<u8> {
    assert!(x != 0, "evaluate_batched_range: x must be non-zero");
    let mut out = column_major[(k - 1) * l + offset..(k - 1) * l + offset + len].to_vec();
    for d in (0..k - 1).rev() {
        gf256::mul_const_vec(x, &mut out);
        gf256::add_vec(&column_major[d * l + offset..d * l + offset + len], &mut out);
    }
    out
}

/// Reconstructs the secret from `shares`. Requires at least 2 shares, all
/// the same length (at least 2 bytes: one value byte plus the tag), and
/// pairwise-distinct tags.
pub fn combine(shares: &[Share]) -> SharingResult<Vec<u8>> {
    if shares.len() < 2 {
        return Err(Error::MismatchedShares {
            expected: "at least 2 shares",
        });
    }
    let total_len = shares[0].as_bytes().len();
    if total_len < 2 {
        return Err(Error::MismatchedShares {
            expected: "share length of at least 2 bytes",
        });
    }
    if shares.iter().any(|s| s.as_bytes().len() != total_len) {
        return Err(Error::MismatchedShares {
            expected: "all shares the same length",
        });
    }

    let tags: Vec<u8> = shares.iter().map(|s| s.identifier()).collect();
    for i in 0..tags.len() {
        for j in (i + 1)..tags.len() {
            if tags[i] == tags[j] {
                return Err(Error::DuplicateShare);
            }
        }
    }

    let l = total_len - 1;
    let mut secret = vec![0u8; l];
    for (byte_idx, out) in secret.iter_mut().enumerate() {
        let ys: Vec<u8> = shares.iter().map(|s| s.value()[byte_idx]).collect();
        *out = interpolate_at(&tags, &ys, 0);
    }
    Ok(secret)
}

/// Produces `num_new` fresh shares from an existing share set, at tags
/// disjoint from those already in use, without ever reconstructing the
/// secret. The caller is responsible for ensuring `shares` numbers at
/// least the original threshold `k`: that precondition cannot be checked
/// from the shares alone, since a share carries no record of `k`.
pub fn regenerate(shares: &[Share], num_new: u8, rng: &mut Csprng) -> SharingResult<Vec<Share>> {
    if shares.len() < 2 {
        return Err(Error::MismatchedShares {
            expected: "at least 2 shares",
        });
    }
    if shares.len() == 2 {
        // Valid (threshold could genuinely be 2), but `k` is not recoverable
        // from a share set, so this is the only signal available that the
        // caller might be regenerating from fewer shares than the original
        // threshold (spec open question: `len(shares) >= k` is assumed, not
        // checked).
        warn!("regenerate called with the minimum of 2 shares; verify this meets the original threshold");
    }
    let total_len = shares[0].as_bytes().len();
    if total_len < 2 {
        return Err(Error::MismatchedShares {
            expected: "share length of at least 2 bytes",
        });
    }
    if shares.iter().any(|s| s.as_bytes().len() != total_len) {
        return Err(Error::MismatchedShares {
            expected: "all shares the same length",
        });
    }

    let tags: Vec<u8> = shares.iter().map(|s| s.identifier()).collect();
    for i in 0..tags.len() {
        for j in (i + 1)..tags.len() {
            if tags[i] == tags[j] {
                return Err(Error::DuplicateShare);
            }
        }
    }

    let new_tags = draw_disjoint_tags(&tags, num_new, rng);
    let l = total_len - 1;
    let mut new_values = vec![vec![0u8; l]; new_tags.len()];
    for byte_idx in 0..l {
        let ys: Vec<u8> = shares.iter().map(|s| s.value()[byte_idx]).collect();
        for (new_idx, &new_tag) in new_tags.iter().enumerate() {
            new_values[new_idx][byte_idx] = interpolate_at(&tags, &ys, new_tag);
        }
    }

    Ok(new_tags
        .into_iter()
        .zip(new_values)
        .map(|(tag, value)| Share::with_identifier_and_value(tag, &value))
        .collect())
}

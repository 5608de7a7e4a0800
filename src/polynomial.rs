/*
    Copyright Michael Lodder. All Rights Reserved.
    SPDX-License-Identifier: Apache-2.0
*/
//! Byte-batched polynomial construction and evaluation over [`crate::gf256`].
//!
//! Rather than one polynomial per secret byte evaluated independently (as
//! the teacher's generic, `PrimeField`-typed `Polynomial<F>` does one
//! element at a time), `split`/`combine` need `L` independent degree-`k-1`
//! polynomials (one per secret byte) evaluated at the same `x` together.
//! Storing their coefficients column-major lets Horner's method run as `k-1`
//! vector XORs and vector constant-multiplies instead of `L*(k-1)` scalar
//! ones.

use crate::gf256;
use crate::rng::Csprng;

/// Builds the row-major coefficient matrix for `intercepts.len()` degree
/// `k - 1` polynomials: row `i` is `[intercepts[i], r_1, r_2, ..., r_{k-1}]`.
/// All `intercepts.len() * (k - 1)` random coefficients are drawn from `rng`
/// in a single call: the whole random region is filled in one shot rather
/// than one `read` per coefficient.
///
/// Returns a flat buffer of length `intercepts.len() * k`; row `i` occupies
/// `data[i * k .. (i + 1) * k]`.
pub fn make_polynomials(intercepts: &[u8], k: usize, rng: &mut Csprng) -> Vec<u8> {
    assert!(k >= 1, "polynomial degree must allow at least an intercept");
    let l = intercepts.len();
    let mut data = vec![0u8; l * k];

    for (i, &intercept) in intercepts.iter().enumerate() {
        data[i * k] = intercept;
    }

    if k > 1 {
        let mut random_region = vec![0u8; l * (k - 1)];
        rng.read(&mut random_region);
        for i in 0..l {
            let dst = &mut data[i * k + 1..(i + 1) * k];
            let src = &random_region[i * (k - 1)..(i + 1) * (k - 1)];
            dst.copy_from_slice(src);
        }
    }

    data
}

/// Transposes the `rows x cols` row-major matrix `m` into a `cols x rows`
/// column-major matrix: row `d` of the output holds coefficient `d` for
/// every one of the `rows` polynomials, contiguous, ready for
/// [`evaluate_batched`]'s vector ops.
pub fn transpose_to_column_major(m: &[u8], rows: usize, cols: usize) -> Vec<u8> {
    assert_eq!(m.len(), rows * cols, "matrix dimensions do not match buffer length");
    let mut out = vec![0u8; rows * cols];
    for r in 0..rows {
        for c in 0..cols {
            out[c * rows + r] = m[r * cols + c];
        }
    }
    out
}

/// Evaluates `l` degree `k - 1` polynomials, stored column-major in
/// `column_major` (`k` rows of `l` bytes each, coefficient `d` in row `d`),
/// all at the same point `x`, via Horner's method in descending degree
/// order.
///
/// Precondition: `x != 0`. Shares are always assigned non-zero tags, and
/// evaluating a secret-sharing polynomial at `x == 0` would just return the
/// intercepts, i.e. the secret itself. This is a programmer-error
/// precondition, not a user-facing one: callers within this crate never
/// construct a zero tag.
pub fn evaluate_batched(column_major: &[u8], k: usize, l: usize, x: u8) -> Vec<u8> {
    let mut out = vec![0u8; l];
    evaluate_batched_into(column_major, k, l, x, &mut out);
    out
}

/// As [`evaluate_batched`], but writes into a caller-supplied `out` buffer
/// instead of allocating one. `out.len()` must equal `l`; lets callers
/// reuse scratch space (e.g. a pooled buffer) across many evaluations
/// instead of allocating one per call.
pub fn evaluate_batched_into(column_major: &[u8], k: usize, l: usize, x: u8, out: &mut [u8]) {
    assert!(x != 0, "evaluate_batched_into: x must be non-zero");
    assert_eq!(column_major.len(), k * l, "matrix dimensions do not match buffer length");
    assert_eq!(out.len(), l, "output buffer length does not match l");

    out.copy_from_slice(&column_major[(k - 1) * l..k * l]);
    for d in (0..k - 1).rev() {
        gf256::mul_const_vec(x, out);
        gf256::add_vec(&column_major[d * l..(d + 1) * l], out);
    }
}

/// Lagrange-interpolates the value at `x` of the unique degree `< n`
/// polynomial passing through `(x_samples[i], y_samples[i])` for each `i`,
/// using the constant-time [`gf256::mul_logexp`]/[`gf256::div`] pair. Used
/// both by `combine` (always at `x == 0`) and by `regenerate` (at each new,
/// non-zero tag).
///
/// `x_samples` and `y_samples` must be the same length and `x_samples` must
/// contain no duplicates; callers are responsible for both (SSS's `combine`
/// checks tag distinctness before calling this).
pub fn interpolate_at(x_samples: &[u8], y_samples: &[u8], x: u8) -> u8 {
    assert_eq!(x_samples.len(), y_samples.len());
    let mut result = 0u8;
    for i in 0..x_samples.len() {
        let mut basis = y_samples[i];
        for j in 0..x_samples.len() {
            if i == j {
                continue;
            }
            let num = gf256::sub(x, x_samples[j]);
            let den = gf256::sub(x_samples[i], x_samples[j]);
            basis = gf256::mul_logexp(basis, gf256::div(num, den));
        }
        result = gf256::add(result, basis);
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transpose_round_trips() {
        let rows = 3;
        let cols = 4;
        let m: Vec<u8> = (0..(rows * cols) as u8).collect();
        let t = transpose_to_column_major(&m, rows, cols);
        let back = transpose_to_column_major(&t, cols, rows);
        assert_eq!(m, back);
    }

    #[test]
    fn evaluate_batched_recovers_intercepts_via_interpolation() {
        let mut rng = Csprng::new_with_seed([7u8; 32]);
        let secret = b"hello world, this is the secret".to_vec();
        let k = 3usize;
        let row_major = make_polynomials(&secret, k, &mut rng);
        let col_major = transpose_to_column_major(&row_major, secret.len(), k);

        let xs = [10u8, 20, 30];
        let ys: Vec<Vec<u8>> = xs
            .iter()
            .map(|&x| evaluate_batched(&col_major, k, secret.len(), x))
            .collect();

        for byte_idx in 0..secret.len() {
            let y_samples: Vec<u8> = ys.iter().map(|y| y[byte_idx]).collect();
            let recovered = interpolate_at(&xs, &y_samples, 0);
            assert_eq!(recovered, secret[byte_idx]);
        }
    }

    #[test]
    fn single_row_matrix_transposes_to_itself_shape() {
        let m = vec![1u8, 2, 3];
        let t = transpose_to_column_major(&m, 1, 3);
        assert_eq!(t, vec![1, 2, 3]);
    }
}

/*
    Copyright Michael Lodder. All Rights Reserved.
    SPDX-License-Identifier: Apache-2.0
*/
//! End-to-end scenarios for Krawczyk's "Secret Sharing Made Short".

use shamir_krawczyk_core::rng::Csprng;
use shamir_krawczyk_core::ssms;

fn seeded_rng(byte: u8) -> Csprng {
    Csprng::new_with_seed([byte; 32])
}

#[test]
fn e3_one_million_byte_secret_has_exact_chunk_length() {
    let mut rng = seeded_rng(20);
    let secret = vec![0x7eu8; 1_000_000];
    let shares = ssms::split_with_rng(&secret, 5, 2, &mut rng).unwrap();
    assert_eq!(shares.len(), 5);
    for s in &shares {
        assert_eq!(s.len(), 500_022);
    }
    assert_eq!(ssms::combine(&shares, 5, 2).unwrap(), secret);
}

#[test]
fn e4_round_trip_with_missing_shares_up_to_n_minus_k() {
    let mut rng = seeded_rng(21);
    let secret = b"a payload that survives the loss of some shares".to_vec();
    let shares = ssms::split_with_rng(&secret, 6, 3, &mut rng).unwrap();

    let mut with_holes = shares.clone();
    with_holes[0] = Vec::new();
    with_holes[5] = Vec::new();
    with_holes[4] = Vec::new();

    assert_eq!(ssms::combine(&with_holes, 6, 3).unwrap(), secret);
}

#[test]
fn e5_degenerate_n_equals_k_produces_89_byte_sss_shares() {
    let mut rng = seeded_rng(22);
    let secret = vec![0x33u8; 88];
    let shares = ssms::split_with_rng(&secret, 4, 4, &mut rng).unwrap();
    for s in &shares {
        assert_eq!(s.len(), 89);
    }
    assert_eq!(ssms::combine(&shares, 4, 4).unwrap(), secret);
}

#[test]
fn rejects_fewer_than_k_present_shares() {
    let mut rng = seeded_rng(23);
    let secret = vec![0u8; 2048];
    let shares = ssms::split_with_rng(&secret, 5, 3, &mut rng).unwrap();
    let mut with_holes = shares.clone();
    with_holes[0] = Vec::new();
    with_holes[1] = Vec::new();
    with_holes[2] = Vec::new();
    assert!(ssms::combine(&with_holes, 5, 3).is_err());
}

#[test]
fn shares_are_much_smaller_than_plain_sss_once_n_grows() {
    let mut rng = seeded_rng(24);
    let secret = vec![0xaau8; 100_000];
    let shares = ssms::split_with_rng(&secret, 20, 4, &mut rng).unwrap();
    // Each share holds roughly secret_len / k bytes of payload, far less
    // than the full secret plain SSS would replicate into every share.
    for s in &shares {
        assert!(s.len() < secret.len() / 2);
    }
}

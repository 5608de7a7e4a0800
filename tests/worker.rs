/*
    Copyright Michael Lodder. All Rights Reserved.
    SPDX-License-Identifier: Apache-2.0
*/
//! `Worker` façade dispatch tests: both algorithm tags round-trip, and an
//! unrecognized tag is rejected without touching either engine.

use shamir_krawczyk_core::{Error, Worker, ALG_KRAWCZYK, ALG_SHAMIR};

#[test]
fn shamir_tag_round_trips() {
    let mut worker = Worker::new();
    let secret = b"dispatched through the worker facade".to_vec();
    let shares = worker.split(ALG_SHAMIR, &secret, 5, 3).unwrap();
    assert_eq!(shares.len(), 5);
    let recovered = worker.combine(ALG_SHAMIR, &shares[0..3], 5, 3).unwrap();
    assert_eq!(recovered, secret);
}

#[test]
fn krawczyk_tag_round_trips() {
    let mut worker = Worker::new();
    let secret = vec![0x17u8; 50_000];
    let shares = worker.split(ALG_KRAWCZYK, &secret, 7, 3).unwrap();
    let recovered = worker.combine(ALG_KRAWCZYK, &shares, 7, 3).unwrap();
    assert_eq!(recovered, secret);
}

#[test]
fn unknown_algorithm_is_rejected_on_split_and_combine() {
    let mut worker = Worker::new();
    match worker.split("not-a-real-algorithm", b"x", 3, 2) {
        Err(Error::InvalidAlgorithm { tag }) => assert_eq!(tag, "not-a-real-algorithm"),
        other => panic!("expected InvalidAlgorithm, got {other:?}"),
    }
    match worker.combine("not-a-real-algorithm", &[], 3, 2) {
        Err(Error::InvalidAlgorithm { tag }) => assert_eq!(tag, "not-a-real-algorithm"),
        other => panic!("expected InvalidAlgorithm, got {other:?}"),
    }
}

#[test]
fn worker_rng_advances_so_repeated_splits_of_the_same_input_differ() {
    let mut worker = Worker::new();
    let first = worker.split(ALG_SHAMIR, b"identical plaintext", 4, 2).unwrap();
    let second = worker.split(ALG_SHAMIR, b"identical plaintext", 4, 2).unwrap();
    assert_ne!(first, second);
}

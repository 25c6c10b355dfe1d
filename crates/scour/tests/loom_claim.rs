//! Loom tests for the claiming primitives' atomic orderings.
//!
//! These tests verify the exactly-once guarantees of the claim
//! primitives under modeled thread interleavings.

use std::sync::Arc;

use scour::{IndexCursor, OnceClaim};

/// Exactly one of two racing claimers wins the one-shot flag.
#[test]
#[ignore = "loom test - run with cargo test --test loom_claim --release -- --ignored"]
fn test_once_claim_single_winner() {
    loom::model(|| {
        let flag = Arc::new(OnceClaim::new());

        let first = loom::thread::spawn({
            let flag = Arc::clone(&flag);
            move || flag.try_claim()
        });
        let second = loom::thread::spawn({
            let flag = Arc::clone(&flag);
            move || flag.try_claim()
        });

        let first_won = first.join().unwrap();
        let second_won = second.join().unwrap();

        assert!(first_won ^ second_won, "exactly one claimer must win");
        assert!(flag.is_claimed());
    });
}

/// A one-item range is delivered to exactly one of two racing claimers.
#[test]
#[ignore = "loom test - run with cargo test --test loom_claim --release -- --ignored"]
fn test_index_cursor_single_item_race() {
    loom::model(|| {
        let cursor = Arc::new(IndexCursor::new());

        let first = loom::thread::spawn({
            let cursor = Arc::clone(&cursor);
            move || cursor.claim_next(1)
        });
        let second = loom::thread::spawn({
            let cursor = Arc::clone(&cursor);
            move || cursor.claim_next(1)
        });

        let a = first.join().unwrap();
        let b = second.join().unwrap();

        assert!(
            (a == Some(0) && b.is_none()) || (a.is_none() && b == Some(0)),
            "index 0 must be delivered exactly once"
        );
        assert_eq!(cursor.claimed(), 1);
    });
}

/// Racing claimers never receive the same index and never run past the
/// end of the range.
#[test]
#[ignore = "loom test - run with cargo test --test loom_claim --release -- --ignored"]
fn test_index_cursor_no_duplicates() {
    loom::model(|| {
        let cursor = Arc::new(IndexCursor::new());

        let claim_two = |cursor: Arc<IndexCursor>| {
            loom::thread::spawn(move || {
                let mut got = Vec::new();
                for _ in 0..2 {
                    if let Some(idx) = cursor.claim_next(3) {
                        got.push(idx);
                    }
                }
                got
            })
        };

        let first = claim_two(Arc::clone(&cursor));
        let second = claim_two(Arc::clone(&cursor));

        let mut indices = first.join().unwrap();
        indices.extend(second.join().unwrap());

        indices.sort_unstable();
        let before = indices.len();
        indices.dedup();
        assert_eq!(indices.len(), before, "an index was delivered twice");
        assert!(indices.iter().all(|&idx| idx < 3));
    });
}

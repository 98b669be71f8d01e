//! Property-based invariant tests for the producers and the player.
//!
//! 1. Every algorithm sorts any input, with counters that never decrease
//! 2. Stepping back k times then forward k times restores the exact state
//!    without adding comparisons or swaps
//! 3. Advancing after stepping back discards the future and continues from
//!    the producer's frontier
//! 4. History never exceeds its cap and keeps the newest snapshots
//! 5. An arena of two identical competitors always goes to the left side

use proptest::prelude::*;
use sortty::algorithms::{Algorithm, Value};
use sortty::arena::{Arena, Side};
use sortty::config::PlaybackConfig;
use sortty::counters::CounterRegistry;
use sortty::playback::{Player, StepOutcome};
use std::time::Duration;

// ── Strategies ──────────────────────────────────────────────────────────

fn algorithm_strategy() -> impl Strategy<Value = Algorithm> {
    prop_oneof![
        Just(Algorithm::Selection),
        Just(Algorithm::BinaryInsertion),
        Just(Algorithm::Quick),
        Just(Algorithm::Pancake),
    ]
}

fn array_strategy(max_len: usize) -> impl Strategy<Value = Vec<Value>> {
    prop::collection::vec(10i64..=400, 0..max_len)
}

/// Player started on `array`, advanced `n` times or until completion
fn advanced(array: Vec<Value>, algorithm: Algorithm, seed: u64, n: usize, cap: usize) -> (Player, usize) {
    let mut player = Player::new(
        PlaybackConfig::default()
            .with_delay(Duration::ZERO)
            .with_history_limit(cap),
    );
    player.start(array, algorithm, seed);
    let mut pulled = 0;
    while pulled < n {
        match player.advance().unwrap() {
            StepOutcome::Advanced => pulled += 1,
            _ => break,
        }
    }
    (player, pulled)
}

// ═══════════════════════════════════════════════════════════════════════
// 1. Sortedness and monotone counters
// ═══════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn every_algorithm_sorts(
        algorithm in algorithm_strategy(),
        array in array_strategy(80),
        seed in any::<u64>(),
    ) {
        let mut counters = CounterRegistry::new();
        let mut producer = algorithm.producer(array.clone(), seed);
        let mut last = counters.read(None);

        while producer.step(&mut counters).unwrap().is_some() {
            let now = counters.read(None);
            prop_assert!(now.comparisons >= last.comparisons);
            prop_assert!(now.swaps >= last.swaps);
            last = now;
        }

        let mut expected = array;
        expected.sort();
        prop_assert_eq!(producer.array(), expected.as_slice());
        prop_assert!(producer.is_exhausted());
    }
}

// ═══════════════════════════════════════════════════════════════════════
// 2. Replay determinism
// ═══════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn back_then_forward_restores_state(
        algorithm in algorithm_strategy(),
        array in array_strategy(40),
        seed in any::<u64>(),
        n in 0usize..60,
        k in 0usize..60,
    ) {
        let (mut player, pulled) = advanced(array, algorithm, seed, n, 500);
        let k = k.min(pulled);
        let before = player.capture();
        let counts = player.counts();

        for _ in 0..k {
            prop_assert_eq!(player.step_back(), StepOutcome::SteppedBack);
        }
        prop_assert_eq!(player.future().len(), k);
        for _ in 0..k {
            prop_assert_eq!(player.step_forward().unwrap(), StepOutcome::Replayed);
        }

        prop_assert_eq!(player.capture(), before);
        prop_assert_eq!(player.counts(), counts);
        prop_assert!(player.is_at_frontier());
    }
}

// ═══════════════════════════════════════════════════════════════════════
// 3. Future invalidation
// ═══════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn advance_discards_future(
        array in prop::collection::vec(10i64..=400, 20..40),
        n in 1usize..50,
        k in 1usize..50,
    ) {
        // Selection on 20+ elements yields well over 50 frames
        let (mut player, pulled) = advanced(array.clone(), Algorithm::Selection, 0, n, 500);
        prop_assert_eq!(pulled, n);
        let k = k.min(n);
        for _ in 0..k {
            player.step_back();
        }
        let before_advance = player.capture();

        prop_assert_eq!(player.advance().unwrap(), StepOutcome::Advanced);
        prop_assert!(player.future().is_empty());

        let (reference, _) = advanced(array, Algorithm::Selection, 0, n + 1, 500);
        prop_assert_eq!(player.array(), reference.array());
        prop_assert_eq!(player.counts(), reference.counts());
        prop_assert_eq!(player.highlights(), reference.highlights());
        prop_assert_eq!(player.heat(), reference.heat());

        // Stepping back lands on the state the advance started from
        prop_assert_eq!(player.step_back(), StepOutcome::SteppedBack);
        prop_assert_eq!(player.capture(), before_advance);
    }
}

// ═══════════════════════════════════════════════════════════════════════
// 4. History cap
// ═══════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn history_is_bounded(
        array in prop::collection::vec(10i64..=400, 20..40),
        cap in 1usize..20,
        n in 0usize..60,
    ) {
        let (player, pulled) = advanced(array.clone(), Algorithm::Selection, 0, n, cap);
        prop_assert_eq!(player.history().len(), pulled.min(cap));

        if pulled > cap {
            let (reference, _) = advanced(array, Algorithm::Selection, 0, pulled - cap, 500);
            let oldest = player.history().oldest().unwrap();
            prop_assert_eq!(&oldest.array, &reference.array().to_vec());
            prop_assert_eq!(oldest.counts, reference.counts());
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════
// 5. Deterministic tie-break
// ═══════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn identical_competitors_tie_to_left(
        algorithm in algorithm_strategy(),
        array in array_strategy(40),
        seed in any::<u64>(),
    ) {
        let mut arena = Arena::new(algorithm, algorithm, array, seed, Duration::ZERO);
        prop_assert_eq!(arena.run_to_completion(), Some(Side::Left));
        prop_assert_eq!(arena.counts(Side::Left), arena.counts(Side::Right));
        prop_assert_eq!(arena.registry().current(), None);
    }
}

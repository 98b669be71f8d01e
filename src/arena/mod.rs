//! Arena mode: two algorithms race on copies of the same array
//!
//! Each [`Competitor`] owns its own producer and a deep copy of the seed
//! array, and counts into its own named instance of the arena's
//! [`CounterRegistry`]. On every tick the left competitor is advanced to its
//! next yield point under its instance scope, then the right one under its
//! own, and the ambient selector is clear again before the tick returns.
//!
//! The first competitor to exhaust wins. When both exhaust on the same tick
//! the left one wins, because it is always checked first.

use crate::algorithms::{Algorithm, Highlights, SortError, StepProducer, Value};
use crate::counters::{CounterRegistry, Counts};
use std::fmt;
use std::time::{Duration, Instant};

/// Which half of the arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    /// Counter instance the competitor on this side counts into
    pub fn instance(self) -> &'static str {
        match self {
            Side::Left => "algo1",
            Side::Right => "algo2",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Left => f.pad("left"),
            Side::Right => f.pad("right"),
        }
    }
}

/// What one arena tick did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArenaTick {
    /// The delay has not elapsed yet
    Waiting,
    /// At least one competitor advanced
    Stepped,
    /// Both competitors are done; the arena no longer ticks
    Finished { winner: Option<Side> },
}

/// One side of the race
pub struct Competitor {
    side: Side,
    producer: Box<dyn StepProducer>,
    array: Vec<Value>,
    highlights: Highlights,
    frames: usize,
    finished: bool,
    fault: Option<SortError>,
}

impl Competitor {
    fn new(side: Side, producer: Box<dyn StepProducer>) -> Self {
        Competitor {
            side,
            array: producer.array().to_vec(),
            producer,
            highlights: Highlights::none(),
            frames: 0,
            finished: false,
            fault: None,
        }
    }

    pub fn side(&self) -> Side {
        self.side
    }

    pub fn algorithm(&self) -> Algorithm {
        self.producer.algorithm()
    }

    pub fn array(&self) -> &[Value] {
        &self.array
    }

    pub fn highlights(&self) -> Highlights {
        self.highlights
    }

    /// Frames yielded so far
    pub fn frames(&self) -> usize {
        self.frames
    }

    /// Exhausted or eliminated by a fault
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn fault(&self) -> Option<&SortError> {
        self.fault.as_ref()
    }

    /// Advance to the next yield point, counting into whatever the registry
    /// currently targets. Returns true if this pull exhausted the producer.
    fn advance(&mut self, counters: &mut CounterRegistry) -> bool {
        match self.producer.step(counters) {
            Ok(Some(highlights)) => {
                self.highlights = highlights;
                self.frames += 1;
                self.sync_array();
                false
            }
            Ok(None) => {
                self.highlights = Highlights::none();
                self.finished = true;
                self.sync_array();
                true
            }
            Err(fault) => {
                tracing::error!(side = %self.side, error = %fault, "competitor eliminated by fault");
                self.highlights = Highlights::none();
                self.finished = true;
                self.fault = Some(fault);
                false
            }
        }
    }

    fn sync_array(&mut self) {
        self.array.clear();
        self.array.extend_from_slice(self.producer.array());
    }
}

/// Coordinator for a two-algorithm race
pub struct Arena {
    registry: CounterRegistry,
    competitors: [Competitor; 2],
    seed_array: Vec<Value>,
    winner: Option<Side>,
    delay: Duration,
    last_tick: Option<Instant>,
}

impl Arena {
    /// Set up a race of `left` against `right`, each on its own copy of
    /// `seed_array`. `seed` drives randomized pivots on both sides alike.
    pub fn new(left: Algorithm, right: Algorithm, seed_array: Vec<Value>, seed: u64, delay: Duration) -> Self {
        Self::with_producers(
            left.producer(seed_array.clone(), seed),
            right.producer(seed_array.clone(), seed),
            seed_array,
            delay,
        )
    }

    /// Set up a race between two already-built producers
    pub fn with_producers(
        left: Box<dyn StepProducer>,
        right: Box<dyn StepProducer>,
        seed_array: Vec<Value>,
        delay: Duration,
    ) -> Self {
        let mut registry = CounterRegistry::new();
        registry.reset(Some(Side::Left.instance()));
        registry.reset(Some(Side::Right.instance()));

        tracing::info!(
            left = %left.algorithm(),
            right = %right.algorithm(),
            size = seed_array.len(),
            "arena started"
        );

        Arena {
            registry,
            competitors: [
                Competitor::new(Side::Left, left),
                Competitor::new(Side::Right, right),
            ],
            seed_array,
            winner: None,
            delay,
            last_tick: None,
        }
    }

    /// Step both competitors if the delay has elapsed since the last tick
    pub fn tick(&mut self, now: Instant) -> ArenaTick {
        if self.is_finished() {
            return ArenaTick::Finished {
                winner: self.winner,
            };
        }
        if let Some(last) = self.last_tick {
            if now.saturating_duration_since(last) < self.delay {
                return ArenaTick::Waiting;
            }
        }
        self.last_tick = Some(now);
        self.step()
    }

    /// Step both competitors once, left first, ignoring the delay
    pub fn step(&mut self) -> ArenaTick {
        if self.is_finished() {
            return ArenaTick::Finished {
                winner: self.winner,
            };
        }

        for competitor in self.competitors.iter_mut() {
            if competitor.finished {
                continue;
            }
            let side = competitor.side;
            let exhausted = {
                let mut scope = self.registry.scope(side.instance());
                competitor.advance(&mut scope)
            };

            if exhausted && self.winner.is_none() {
                self.winner = Some(side);
                let counts = self.registry.read(Some(side.instance()));
                tracing::info!(
                    winner = %competitor.algorithm(),
                    %side,
                    comparisons = counts.comparisons,
                    swaps = counts.swaps,
                    "arena winner"
                );
            }
        }
        debug_assert!(self.registry.current().is_none());

        if self.is_finished() {
            ArenaTick::Finished {
                winner: self.winner,
            }
        } else {
            ArenaTick::Stepped
        }
    }

    /// Step until both competitors are done
    pub fn run_to_completion(&mut self) -> Option<Side> {
        while let ArenaTick::Stepped = self.step() {}
        self.winner
    }

    pub fn competitor(&self, side: Side) -> &Competitor {
        match side {
            Side::Left => &self.competitors[0],
            Side::Right => &self.competitors[1],
        }
    }

    pub fn counts(&self, side: Side) -> Counts {
        self.registry.read(Some(side.instance()))
    }

    pub fn winner(&self) -> Option<Side> {
        self.winner
    }

    /// Label announcing the winner, e.g. "Quick Sort WINS!"
    pub fn winner_label(&self) -> Option<String> {
        self.winner
            .map(|side| format!("{} WINS!", self.competitor(side).algorithm()))
    }

    pub fn is_finished(&self) -> bool {
        self.competitors.iter().all(|c| c.finished)
    }

    pub fn seed_array(&self) -> &[Value] {
        &self.seed_array
    }

    pub fn registry(&self) -> &CounterRegistry {
        &self.registry
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub fn set_delay(&mut self, delay: Duration) {
        self.delay = delay;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Faults on its first pull
    struct Broken(Vec<Value>);

    impl StepProducer for Broken {
        fn algorithm(&self) -> Algorithm {
            Algorithm::Pancake
        }

        fn array(&self) -> &[Value] {
            &self.0
        }

        fn is_exhausted(&self) -> bool {
            false
        }

        fn step(&mut self, _counters: &mut CounterRegistry) -> Result<Option<Highlights>, SortError> {
            Err(SortError::InvariantViolated {
                algorithm: Algorithm::Pancake,
                detail: "spatula slipped".to_string(),
            })
        }
    }

    fn seed() -> Vec<Value> {
        vec![42, 17, 300, 5, 99, 64, 12, 250, 180, 33]
    }

    #[test]
    fn test_simultaneous_finish_goes_to_left() {
        for algorithm in Algorithm::ALL {
            let mut arena = Arena::new(algorithm, algorithm, seed(), 7, Duration::ZERO);
            assert_eq!(arena.run_to_completion(), Some(Side::Left), "{algorithm}");
            assert_eq!(arena.counts(Side::Left), arena.counts(Side::Right));
        }
    }

    #[test]
    fn test_faster_algorithm_wins_from_right() {
        let mut arena = Arena::new(
            Algorithm::Selection,
            Algorithm::BinaryInsertion,
            seed(),
            0,
            Duration::ZERO,
        );
        assert_eq!(arena.run_to_completion(), Some(Side::Right));
        assert_eq!(arena.winner_label().unwrap(), "Binary Insertion Sort WINS!");
    }

    #[test]
    fn test_counts_are_isolated() {
        let mut arena = Arena::new(Algorithm::Selection, Algorithm::Pancake, seed(), 0, Duration::ZERO);
        arena.run_to_completion();

        // 10 + 9 + ... + 2 comparisons for selection, 10 + 9 + ... + 1 for pancake
        assert_eq!(arena.counts(Side::Left).comparisons, 54);
        assert_eq!(arena.counts(Side::Right), Counts::new(55, 20));
        assert_eq!(arena.registry().read(None), Counts::default());
        assert_eq!(arena.registry().current(), None);
    }

    #[test]
    fn test_each_side_sorts_its_own_copy() {
        let mut arena = Arena::new(Algorithm::Quick, Algorithm::Pancake, seed(), 3, Duration::ZERO);
        arena.step();
        arena.run_to_completion();

        let mut sorted = seed();
        sorted.sort();
        assert_eq!(arena.competitor(Side::Left).array(), sorted.as_slice());
        assert_eq!(arena.competitor(Side::Right).array(), sorted.as_slice());
        assert_eq!(arena.seed_array(), seed().as_slice());
    }

    #[test]
    fn test_finished_arena_stops_ticking() {
        let mut arena = Arena::new(Algorithm::Quick, Algorithm::Quick, vec![2, 1], 0, Duration::ZERO);
        arena.run_to_completion();
        let before = arena.counts(Side::Left);

        assert_eq!(
            arena.tick(Instant::now()),
            ArenaTick::Finished {
                winner: Some(Side::Left)
            }
        );
        assert_eq!(arena.counts(Side::Left), before);
    }

    #[test]
    fn test_tick_waits_for_delay() {
        let mut arena = Arena::new(
            Algorithm::Selection,
            Algorithm::Selection,
            seed(),
            0,
            Duration::from_millis(100),
        );
        let t0 = Instant::now();
        assert_eq!(arena.tick(t0), ArenaTick::Stepped);
        assert_eq!(arena.tick(t0 + Duration::from_millis(10)), ArenaTick::Waiting);
        assert_eq!(arena.tick(t0 + Duration::from_millis(100)), ArenaTick::Stepped);
        assert_eq!(arena.competitor(Side::Left).frames(), 2);
    }

    #[test]
    fn test_faulted_competitor_cannot_win() {
        let mut arena = Arena::with_producers(
            Box::new(Broken(seed())),
            Algorithm::Selection.producer(seed(), 0),
            seed(),
            Duration::ZERO,
        );
        assert_eq!(arena.run_to_completion(), Some(Side::Right));
        assert!(arena.competitor(Side::Left).fault().is_some());
        assert!(arena.competitor(Side::Left).is_finished());
    }

    #[test]
    fn test_empty_arrays_finish_on_first_tick() {
        let mut arena = Arena::new(Algorithm::Pancake, Algorithm::Quick, vec![], 0, Duration::ZERO);
        assert_eq!(
            arena.step(),
            ArenaTick::Finished {
                winner: Some(Side::Left)
            }
        );
    }
}

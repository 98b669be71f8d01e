//! Instrumented, resumable sorting algorithms
//!
//! Each algorithm is a [`StepProducer`]: an explicit state machine that owns the
//! array it sorts and advances to its next yield point on every call to
//! [`StepProducer::step`]. Between calls a producer does no work at all, so a
//! driver can pause it indefinitely, interleave it with another producer, or
//! drop it mid-run with no side effects.
//!
//! - [`selection`]: selection sort, one frame per comparison
//! - [`insertion`]: binary-insertion sort and the [`binary_search`] helper
//! - [`quick`]: randomized-pivot quicksort with Lomuto partitioning
//! - [`pancake`]: pancake sort, one frame per comparison and per flip
//! - [`errors`]: producer fault type
//!
//! # Instrumentation
//!
//! Producers report every comparison of two elements and every relocation of
//! an element through the [`CounterRegistry`] handed to `step`, always using the
//! unqualified increment calls. Which tally receives them is decided by the
//! caller's ambient selector.
//!
//! # Frames
//!
//! A yielded step is described by [`Highlights`]: two "active" indices (the
//! elements being compared or moved) and two "boundary" indices (pivot,
//! partition or sorted-region markers). [`StepProducer::next_frame`] pairs them
//! with a view of the array as a [`Frame`].

pub mod errors;
pub mod insertion;
pub mod pancake;
pub mod quick;
pub mod selection;

pub use errors::{ParseAlgorithmError, SortError};
pub use insertion::{binary_search, BinaryInsertionSort};
pub use pancake::PancakeSort;
pub use quick::QuickSort;
pub use selection::SelectionSort;

use crate::counters::CounterRegistry;
use rand::rngs::SmallRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Element type of the arrays being sorted
pub type Value = i64;

/// Indices highlighted by one step
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Highlights {
    /// Elements being compared or moved
    pub active: [Option<usize>; 2],
    /// Pivot, partition or sorted-region boundaries
    pub boundary: [Option<usize>; 2],
}

impl Highlights {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn new(
        active_a: Option<usize>,
        active_b: Option<usize>,
        boundary_a: Option<usize>,
        boundary_b: Option<usize>,
    ) -> Self {
        Highlights {
            active: [active_a, active_b],
            boundary: [boundary_a, boundary_b],
        }
    }

    pub fn is_active(&self, index: usize) -> bool {
        self.active.contains(&Some(index))
    }

    pub fn is_boundary(&self, index: usize) -> bool {
        self.boundary.contains(&Some(index))
    }

    pub fn is_empty(&self) -> bool {
        self.active.iter().chain(self.boundary.iter()).all(Option::is_none)
    }
}

/// One yielded step: the array as it stands plus the highlighted indices
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Frame<'a> {
    pub array: &'a [Value],
    pub highlights: Highlights,
}

/// A sorting algorithm that can be advanced one yield point at a time.
///
/// Every producer is built over an inclusive index range `[left, right]` of
/// the array it owns (see [`Algorithm::producer_in_range`]) and is exhausted
/// once that range is sorted ascending.
pub trait StepProducer {
    /// Which algorithm this producer runs
    fn algorithm(&self) -> Algorithm;

    /// The array in its current, partially sorted state
    fn array(&self) -> &[Value];

    /// True once the producer has reported exhaustion
    fn is_exhausted(&self) -> bool;

    /// Run to the next yield point.
    ///
    /// Returns `Ok(None)` once the array is fully sorted; every call after
    /// that also returns `Ok(None)` without touching the array or counters.
    fn step(&mut self, counters: &mut CounterRegistry) -> Result<Option<Highlights>, SortError>;

    /// [`step`](Self::step), pairing the highlights with a view of the array
    fn next_frame(&mut self, counters: &mut CounterRegistry) -> Result<Option<Frame<'_>>, SortError> {
        let highlights = self.step(counters)?;
        Ok(highlights.map(|highlights| Frame {
            array: self.array(),
            highlights,
        }))
    }
}

/// The selectable sorting algorithms
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Algorithm {
    Selection,
    BinaryInsertion,
    Quick,
    Pancake,
}

impl Algorithm {
    pub const ALL: [Algorithm; 4] = [
        Algorithm::Selection,
        Algorithm::BinaryInsertion,
        Algorithm::Quick,
        Algorithm::Pancake,
    ];

    /// Display name, also used in finalize records
    pub fn name(self) -> &'static str {
        match self {
            Algorithm::Selection => "Selection Sort",
            Algorithm::BinaryInsertion => "Binary Insertion Sort",
            Algorithm::Quick => "Quick Sort",
            Algorithm::Pancake => "Pancake Sort",
        }
    }

    /// Next algorithm in menu order, wrapping around
    pub fn next(self) -> Self {
        match self {
            Algorithm::Selection => Algorithm::BinaryInsertion,
            Algorithm::BinaryInsertion => Algorithm::Quick,
            Algorithm::Quick => Algorithm::Pancake,
            Algorithm::Pancake => Algorithm::Selection,
        }
    }

    /// Build a producer over the whole of `array`.
    ///
    /// `seed` drives quicksort's pivot choice and is ignored by the
    /// deterministic algorithms.
    pub fn producer(self, array: Vec<Value>, seed: u64) -> Box<dyn StepProducer> {
        let right = array.len().saturating_sub(1);
        self.producer_in_range(array, 0, right, seed)
    }

    /// Build a producer that sorts only `array[left..=right]`.
    ///
    /// Elements outside the range are never compared or moved. A range with
    /// `left >= right` or `right` past the end exhausts on the first pull.
    pub fn producer_in_range(
        self,
        array: Vec<Value>,
        left: usize,
        right: usize,
        seed: u64,
    ) -> Box<dyn StepProducer> {
        match self {
            Algorithm::Selection => Box::new(SelectionSort::with_range(array, left, right)),
            Algorithm::BinaryInsertion => {
                Box::new(BinaryInsertionSort::with_range(array, left, right))
            }
            Algorithm::Quick => Box::new(QuickSort::with_range(
                array,
                left,
                right,
                SmallRng::seed_from_u64(seed),
            )),
            Algorithm::Pancake => Box::new(PancakeSort::with_range(array, left, right)),
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Algorithm {
    type Err = ParseAlgorithmError;

    /// Accepts display names and short forms, ignoring case, spaces, dashes and
    /// underscores ("Quick Sort", "quick-sort", "quick").
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .chars()
            .filter(|c| !matches!(c, ' ' | '-' | '_'))
            .collect::<String>()
            .to_ascii_lowercase();
        let key = key.strip_suffix("sort").unwrap_or(&key);

        match key {
            "selection" => Ok(Algorithm::Selection),
            "binaryinsertion" | "insertion" => Ok(Algorithm::BinaryInsertion),
            "quick" => Ok(Algorithm::Quick),
            "pancake" => Ok(Algorithm::Pancake),
            _ => Err(ParseAlgorithmError {
                input: s.to_string(),
            }),
        }
    }
}

//! Randomized quicksort
//!
//! Each partition picks a uniformly random pivot in `[left, right]` and swaps
//! it into `right`, then runs a Lomuto scan of `j` over `[left, right-1]`,
//! yielding a frame before each comparison (active: `j`, `right`; boundary: the
//! running partition index). Afterwards the pivot is swapped into place and the
//! right subrange is sorted before the left one.
//!
//! Recursion is replaced by an explicit stack of pending ranges; pushing the
//! left range before the right one reproduces the depth-first order of the
//! recursive formulation exactly.

use super::{Algorithm, Highlights, SortError, StepProducer, Value};
use crate::counters::CounterRegistry;
use rand::rngs::SmallRng;
use rand::Rng;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Partition {
    left: usize,
    right: usize,
    index: usize,
    j: usize,
}

impl Partition {
    fn highlights(&self) -> Highlights {
        Highlights::new(Some(self.j), Some(self.right), Some(self.index), None)
    }
}

#[derive(Debug, Clone)]
pub struct QuickSort {
    array: Vec<Value>,
    rng: SmallRng,
    /// Inclusive ranges still to sort, each with `left < right`
    pending: Vec<(usize, usize)>,
    /// Partition whose frame for `j` has been yielded
    active: Option<Partition>,
    done: bool,
}

impl QuickSort {
    pub fn new(array: Vec<Value>, rng: SmallRng) -> Self {
        let right = array.len().saturating_sub(1);
        Self::with_range(array, 0, right, rng)
    }

    /// Sort only `array[left..=right]`. Empty or out-of-range spans yield nothing.
    pub fn with_range(array: Vec<Value>, left: usize, right: usize, rng: SmallRng) -> Self {
        let mut pending = Vec::new();
        if left < right && right < array.len() {
            pending.push((left, right));
        }
        QuickSort {
            array,
            rng,
            pending,
            active: None,
            done: false,
        }
    }

    fn begin_partition(&mut self, left: usize, right: usize, counters: &mut CounterRegistry) -> Highlights {
        let pivot = self.rng.random_range(left..=right);
        self.array.swap(right, pivot);
        counters.increment_swaps(None);

        let partition = Partition {
            left,
            right,
            index: left,
            j: left,
        };
        self.active = Some(partition);
        partition.highlights()
    }

    /// Compare and place `array[j]`, returning the partition if it is unfinished
    fn scan(&mut self, mut p: Partition, counters: &mut CounterRegistry) -> Option<Partition> {
        counters.increment_comparisons(None);
        if self.array[p.j] < self.array[p.right] {
            self.array.swap(p.j, p.index);
            counters.increment_swaps(None);
            p.index += 1;
        }
        p.j += 1;
        if p.j < p.right {
            return Some(p);
        }

        self.array.swap(p.index, p.right);
        counters.increment_swaps(None);

        if p.index > p.left + 1 {
            self.pending.push((p.left, p.index - 1));
        }
        if p.index + 1 < p.right {
            self.pending.push((p.index + 1, p.right));
        }
        None
    }
}

impl StepProducer for QuickSort {
    fn algorithm(&self) -> Algorithm {
        Algorithm::Quick
    }

    fn array(&self) -> &[Value] {
        &self.array
    }

    fn is_exhausted(&self) -> bool {
        self.done
    }

    fn step(&mut self, counters: &mut CounterRegistry) -> Result<Option<Highlights>, SortError> {
        if self.done {
            return Ok(None);
        }

        if let Some(p) = self.active.take() {
            if let Some(p) = self.scan(p, counters) {
                self.active = Some(p);
                return Ok(Some(p.highlights()));
            }
        }

        match self.pending.pop() {
            Some((left, right)) => {
                if right >= self.array.len() {
                    return Err(SortError::IndexOutOfRange {
                        algorithm: Algorithm::Quick,
                        index: right,
                        len: self.array.len(),
                    });
                }
                Ok(Some(self.begin_partition(left, right, counters)))
            }
            None => {
                self.done = true;
                Ok(None)
            }
        }
    }
}

//! Selection sort
//!
//! For each position `i` the unsorted tail is scanned for its minimum, yielding
//! a frame before every comparison (active: `j`, boundary: `i`). The minimum is
//! swapped into place once per pass, and only if it is not already there.
//! [`SelectionSort::with_range`] restricts all of this to `[left, right]`.

use super::{Algorithm, Highlights, SortError, StepProducer, Value};
use crate::counters::CounterRegistry;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Resume {
    Start,
    Compare,
    Done,
}

#[derive(Debug, Clone)]
pub struct SelectionSort {
    array: Vec<Value>,
    left: usize,
    right: usize,
    i: usize,
    j: usize,
    smallest: usize,
    resume: Resume,
}

impl SelectionSort {
    pub fn new(array: Vec<Value>) -> Self {
        let right = array.len().saturating_sub(1);
        Self::with_range(array, 0, right)
    }

    /// Sort only `array[left..=right]`. Empty or out-of-range spans yield nothing.
    pub fn with_range(array: Vec<Value>, left: usize, right: usize) -> Self {
        SelectionSort {
            array,
            left,
            right,
            i: left,
            j: left,
            smallest: left,
            resume: Resume::Start,
        }
    }

    fn begin_pass(&mut self, i: usize) -> Highlights {
        self.i = i;
        self.j = i;
        self.smallest = i;
        self.highlights()
    }

    fn highlights(&self) -> Highlights {
        Highlights::new(Some(self.j), None, Some(self.i), None)
    }
}

impl StepProducer for SelectionSort {
    fn algorithm(&self) -> Algorithm {
        Algorithm::Selection
    }

    fn array(&self) -> &[Value] {
        &self.array
    }

    fn is_exhausted(&self) -> bool {
        self.resume == Resume::Done
    }

    fn step(&mut self, counters: &mut CounterRegistry) -> Result<Option<Highlights>, SortError> {
        match self.resume {
            Resume::Start => {
                if self.left >= self.right || self.right >= self.array.len() {
                    self.resume = Resume::Done;
                    return Ok(None);
                }
                self.resume = Resume::Compare;
                Ok(Some(self.begin_pass(self.left)))
            }
            Resume::Compare => {
                counters.increment_comparisons(None);
                if self.array[self.j] < self.array[self.smallest] {
                    self.smallest = self.j;
                }

                self.j += 1;
                if self.j <= self.right {
                    return Ok(Some(self.highlights()));
                }

                // Pass complete
                if self.smallest != self.i {
                    self.array.swap(self.i, self.smallest);
                    counters.increment_swaps(None);
                }

                if self.i + 1 < self.right {
                    Ok(Some(self.begin_pass(self.i + 1)))
                } else {
                    self.resume = Resume::Done;
                    Ok(None)
                }
            }
            Resume::Done => Ok(None),
        }
    }
}

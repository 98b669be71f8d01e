//! Binary-insertion sort
//!
//! For each `i` the insertion point of `array[i]` within the sorted prefix
//! `[0, i-1]` is found with [`binary_search`], then one frame is yielded
//! showing the search bounds (active: `0`, `i-1`) and the provisional insertion
//! point (boundary: `j`, `i`). The shift that opens the gap at `j` runs on the
//! following pull; every element moved one slot to the right counts as a swap.
//! With [`BinaryInsertionSort::with_range`] the sorted prefix starts at `left`
//! instead of `0`.

use super::{Algorithm, Highlights, SortError, StepProducer, Value};
use crate::counters::CounterRegistry;
use std::cmp::Ordering;

/// Find where `val` belongs in the sorted slice `arr[start..=end]`.
///
/// Every element examined counts one comparison. The interval is halved at
/// `round((start + end) / 2)` with ties rounding to even. When the interval
/// narrows to one element a final comparison places `val` before that element
/// if it is greater, otherwise after it, so equal values insert after existing
/// ones. The result always lies in `[start, end + 1]`.
pub fn binary_search(
    arr: &[Value],
    val: Value,
    start: usize,
    end: usize,
    counters: &mut CounterRegistry,
) -> usize {
    let mut start = start as isize;
    let mut end = end as isize;

    loop {
        if start > end {
            return start as usize;
        }

        if start == end {
            counters.increment_comparisons(None);
            return if arr[start as usize] > val {
                start as usize
            } else {
                start as usize + 1
            };
        }

        let mid = midpoint(start, end);
        counters.increment_comparisons(None);
        match arr[mid as usize].cmp(&val) {
            Ordering::Less => start = mid + 1,
            Ordering::Greater => end = mid - 1,
            Ordering::Equal => return mid as usize,
        }
    }
}

/// `(start + end) / 2` rounded half to even
fn midpoint(start: isize, end: isize) -> isize {
    let sum = start + end;
    let half = sum.div_euclid(2);
    if sum.rem_euclid(2) == 1 && half.rem_euclid(2) == 1 {
        half + 1
    } else {
        half
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Resume {
    Start,
    /// Shift `[j, i-1]` right and drop the held value at `j`
    Insert { j: usize, val: Value },
    Done,
}

#[derive(Debug, Clone)]
pub struct BinaryInsertionSort {
    array: Vec<Value>,
    left: usize,
    right: usize,
    i: usize,
    resume: Resume,
}

impl BinaryInsertionSort {
    pub fn new(array: Vec<Value>) -> Self {
        let right = array.len().saturating_sub(1);
        Self::with_range(array, 0, right)
    }

    /// Sort only `array[left..=right]`. Empty or out-of-range spans yield nothing.
    pub fn with_range(array: Vec<Value>, left: usize, right: usize) -> Self {
        BinaryInsertionSort {
            array,
            left,
            right,
            i: left + 1,
            resume: Resume::Start,
        }
    }

    /// Search for the insertion point of `array[i]` and yield the pre-shift frame
    fn search(&mut self, counters: &mut CounterRegistry) -> Result<Option<Highlights>, SortError> {
        let i = self.i;
        let val = self.array[i];
        let j = binary_search(&self.array, val, self.left, i - 1, counters);
        if j > i {
            return Err(SortError::IndexOutOfRange {
                algorithm: Algorithm::BinaryInsertion,
                index: j,
                len: i + 1,
            });
        }

        self.resume = Resume::Insert { j, val };
        Ok(Some(Highlights::new(Some(self.left), Some(i - 1), Some(j), Some(i))))
    }
}

impl StepProducer for BinaryInsertionSort {
    fn algorithm(&self) -> Algorithm {
        Algorithm::BinaryInsertion
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
                self.search(counters)
            }
            Resume::Insert { j, val } => {
                for k in (j + 1..=self.i).rev() {
                    self.array[k] = self.array[k - 1];
                    counters.increment_swaps(None);
                }
                self.array[j] = val;

                self.i += 1;
                if self.i <= self.right {
                    self.search(counters)
                } else {
                    self.resume = Resume::Done;
                    Ok(None)
                }
            }
            Resume::Done => Ok(None),
        }
    }
}

//! Pancake sort
//!
//! Pass `i` scans the unsorted prefix `[0, n-1-i]` for its maximum, yielding a
//! frame before each comparison (active: the scanned index and the current
//! maximum candidate). Two flips follow: reversing `[0, max]` brings the
//! maximum to the front, reversing `[0, n-1-i]` sends it to its final slot.
//! Each flip counts as one swap whatever its length and yields one frame once
//! it completes. [`PancakeSort::with_range`] treats `left` as the front of the
//! stack, so flips never reach outside `[left, right]`.

use super::{Algorithm, Highlights, SortError, StepProducer, Value};
use crate::counters::CounterRegistry;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Resume {
    Start,
    Scan,
    FlipToFront,
    FlipIntoPlace,
    Done,
}

#[derive(Debug, Clone)]
pub struct PancakeSort {
    array: Vec<Value>,
    left: usize,
    right: usize,
    pass: usize,
    j: usize,
    max_index: usize,
    resume: Resume,
}

impl PancakeSort {
    pub fn new(array: Vec<Value>) -> Self {
        let right = array.len().saturating_sub(1);
        Self::with_range(array, 0, right)
    }

    /// Sort only `array[left..=right]`. Empty or out-of-range spans yield nothing.
    pub fn with_range(array: Vec<Value>, left: usize, right: usize) -> Self {
        PancakeSort {
            array,
            left,
            right,
            pass: 0,
            j: left,
            max_index: left,
            resume: Resume::Start,
        }
    }

    /// Last index of the unsorted prefix in the current pass
    fn bound(&self) -> usize {
        self.right - self.pass
    }

    fn begin_pass(&mut self, pass: usize) -> Highlights {
        self.pass = pass;
        self.j = self.left;
        self.max_index = self.left;
        self.resume = Resume::Scan;
        self.scan_highlights()
    }

    fn scan_highlights(&self) -> Highlights {
        Highlights::new(Some(self.j), Some(self.max_index), None, None)
    }

    fn flip(&mut self, end: usize, counters: &mut CounterRegistry) {
        self.array[self.left..=end].reverse();
        counters.increment_swaps(None);
    }
}

impl StepProducer for PancakeSort {
    fn algorithm(&self) -> Algorithm {
        Algorithm::Pancake
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
                Ok(Some(self.begin_pass(0)))
            }
            Resume::Scan => {
                counters.increment_comparisons(None);
                if self.array[self.j] > self.array[self.max_index] {
                    self.max_index = self.j;
                }

                self.j += 1;
                if self.j <= self.bound() {
                    return Ok(Some(self.scan_highlights()));
                }

                self.flip(self.max_index, counters);
                self.resume = Resume::FlipToFront;
                Ok(Some(Highlights::new(Some(self.left), None, None, None)))
            }
            Resume::FlipToFront => {
                let bound = self.bound();
                self.flip(bound, counters);
                self.resume = Resume::FlipIntoPlace;
                Ok(Some(Highlights::new(None, None, Some(bound), None)))
            }
            Resume::FlipIntoPlace => {
                if self.pass < self.right - self.left {
                    Ok(Some(self.begin_pass(self.pass + 1)))
                } else {
                    self.resume = Resume::Done;
                    Ok(None)
                }
            }
            Resume::Done => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithms::test_support::drain;
    use crate::counters::Counts;

    #[test]
    fn test_hand_counted_small_input() {
        let mut counters = CounterRegistry::new();
        let mut sort = PancakeSort::new(vec![3, 1, 2]);
        let frames = drain(&mut sort, &mut counters);

        assert_eq!(sort.array(), &[1, 2, 3]);
        // (3 + 2) + (2 + 2) + (1 + 2)
        assert_eq!(frames, 12);
        // 3 + 2 + 1 comparisons, two flips per pass
        assert_eq!(counters.read(None), Counts::new(6, 6));
    }

    #[test]
    fn test_first_pass_frames() {
        let mut counters = CounterRegistry::new();
        let mut sort = PancakeSort::new(vec![1, 3, 2]);

        let scan: Vec<_> = (0..3)
            .map(|_| sort.step(&mut counters).unwrap().unwrap())
            .collect();
        assert_eq!(scan[0], Highlights::new(Some(0), Some(0), None, None));
        assert_eq!(scan[1], Highlights::new(Some(1), Some(0), None, None));
        assert_eq!(scan[2], Highlights::new(Some(2), Some(1), None, None));

        // Maximum flipped to the front
        let h = sort.step(&mut counters).unwrap().unwrap();
        assert_eq!(h, Highlights::new(Some(0), None, None, None));
        assert_eq!(sort.array(), &[3, 1, 2]);

        // Then into its final slot
        let h = sort.step(&mut counters).unwrap().unwrap();
        assert_eq!(h, Highlights::new(None, None, Some(2), None));
        assert_eq!(sort.array(), &[2, 1, 3]);
    }

    #[test]
    fn test_range_flips_stay_inside() {
        let mut counters = CounterRegistry::new();
        let mut sort = PancakeSort::with_range(vec![9, 1, 3, 2, 0], 1, 3);
        let frames = drain(&mut sort, &mut counters);

        assert_eq!(sort.array(), &[9, 1, 2, 3, 0]);
        assert_eq!(frames, 12);
        assert_eq!(counters.read(None), Counts::new(6, 6));
    }

    #[test]
    fn test_flip_counts_once_regardless_of_length() {
        let mut counters = CounterRegistry::new();
        let mut sort = PancakeSort::new((0..10).rev().collect());
        drain(&mut sort, &mut counters);
        assert_eq!(counters.read(None).swaps, 20);
        assert_eq!(counters.read(None).comparisons, 55);
    }
}

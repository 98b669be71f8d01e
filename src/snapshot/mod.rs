// Snapshot management for stepping backward and forward through a run

use crate::algorithms::{Highlights, Value};
use crate::counters::Counts;
use std::collections::VecDeque;
use std::time::Duration;

/// Captured state of a run at one step
///
/// Owns copies of everything it holds; later mutation of the live array never
/// reaches a snapshot already taken.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub array: Vec<Value>,
    pub highlights: Highlights,
    pub counts: Counts,
    pub elapsed: Duration,
    /// Accumulated swap activity per index
    pub heat: Vec<u32>,
}

impl Snapshot {
    /// Estimate the memory usage of this snapshot in bytes
    pub fn estimated_size(&self) -> usize {
        std::mem::size_of::<Self>()
            + self.array.len() * std::mem::size_of::<Value>()
            + self.heat.len() * std::mem::size_of::<u32>()
    }
}

/// Bounded stack of snapshots
///
/// Used for both the history and the future of a run. Pushing beyond the
/// limit evicts the oldest entry, never the newest.
#[derive(Debug, Clone)]
pub struct SnapshotStack {
    snapshots: VecDeque<Snapshot>,
    limit: usize,
    current_memory: usize,
    evicted: usize,
}

impl SnapshotStack {
    /// Create a stack retaining at most `limit` snapshots (minimum 1)
    pub fn new(limit: usize) -> Self {
        SnapshotStack {
            snapshots: VecDeque::new(),
            limit: limit.max(1),
            current_memory: 0,
            evicted: 0,
        }
    }

    /// Push onto the top, evicting from the bottom when full
    pub fn push(&mut self, snapshot: Snapshot) {
        self.current_memory += snapshot.estimated_size();
        self.snapshots.push_back(snapshot);

        while self.snapshots.len() > self.limit {
            if let Some(oldest) = self.snapshots.pop_front() {
                self.current_memory -= oldest.estimated_size();
                self.evicted += 1;
                tracing::debug!(limit = self.limit, "evicted oldest snapshot");
            }
        }
    }

    /// Pop the most recent snapshot
    pub fn pop(&mut self) -> Option<Snapshot> {
        let snapshot = self.snapshots.pop_back()?;
        self.current_memory -= snapshot.estimated_size();
        Some(snapshot)
    }

    /// Most recent snapshot
    pub fn top(&self) -> Option<&Snapshot> {
        self.snapshots.back()
    }

    /// Oldest retained snapshot
    pub fn oldest(&self) -> Option<&Snapshot> {
        self.snapshots.front()
    }

    /// Snapshot by age, 0 being the oldest retained
    pub fn get(&self, index: usize) -> Option<&Snapshot> {
        self.snapshots.get(index)
    }

    pub fn clear(&mut self) {
        self.snapshots.clear();
        self.current_memory = 0;
        self.evicted = 0;
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Number of snapshots dropped to stay within the limit since the last clear
    pub fn evicted(&self) -> usize {
        self.evicted
    }

    /// Get current memory usage
    pub fn memory_usage(&self) -> usize {
        self.current_memory
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snap(marker: Value) -> Snapshot {
        Snapshot {
            array: vec![marker],
            highlights: Highlights::none(),
            counts: Counts::new(marker as u64, 0),
            elapsed: Duration::ZERO,
            heat: vec![0],
        }
    }

    #[test]
    fn test_push_pop_order() {
        let mut stack = SnapshotStack::new(10);
        stack.push(snap(1));
        stack.push(snap(2));

        assert_eq!(stack.top().unwrap().array, vec![2]);
        assert_eq!(stack.pop().unwrap().array, vec![2]);
        assert_eq!(stack.pop().unwrap().array, vec![1]);
        assert!(stack.pop().is_none());
        assert_eq!(stack.memory_usage(), 0);
    }

    #[test]
    fn test_eviction_drops_oldest() {
        let mut stack = SnapshotStack::new(3);
        for i in 0..8 {
            stack.push(snap(i));
        }

        assert_eq!(stack.len(), 3);
        assert_eq!(stack.evicted(), 5);
        assert_eq!(stack.oldest().unwrap().array, vec![5]);
        assert_eq!(stack.top().unwrap().array, vec![7]);
        assert_eq!(stack.memory_usage(), 3 * snap(0).estimated_size());
    }

    #[test]
    fn test_zero_limit_keeps_one() {
        let mut stack = SnapshotStack::new(0);
        stack.push(snap(1));
        stack.push(snap(2));
        assert_eq!(stack.limit(), 1);
        assert_eq!(stack.len(), 1);
        assert_eq!(stack.get(0).unwrap().array, vec![2]);
    }

    #[test]
    fn test_snapshot_is_independent_copy() {
        let mut live = vec![3, 2, 1];
        let mut stack = SnapshotStack::new(4);
        stack.push(Snapshot {
            array: live.clone(),
            highlights: Highlights::none(),
            counts: Counts::default(),
            elapsed: Duration::ZERO,
            heat: vec![0; 3],
        });
        live.sort();
        assert_eq!(stack.top().unwrap().array, vec![3, 2, 1]);
    }
}

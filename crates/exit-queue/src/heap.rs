use std::collections::HashMap;

use plasma_primitives::Timestamp;
use serde::{Deserialize, Serialize};

use crate::{ExitQueueError, ExitQueueResult};

/// Queued exit.  Field order gives the ordering: maturity first, then the
/// priority key as tie-break.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
pub struct QueueEntry {
    pub exitable_at: Timestamp,
    pub priority: u64,
}

impl QueueEntry {
    pub const fn new(exitable_at: Timestamp, priority: u64) -> Self {
        Self {
            exitable_at,
            priority,
        }
    }

    /// Whether the entry can be processed at `now`.
    pub const fn is_mature(&self, now: Timestamp) -> bool {
        self.exitable_at <= now
    }
}

/// Binary min-heap of [`QueueEntry`] with a priority → slot index.
#[derive(Clone, Debug, Default)]
pub struct ExitQueue {
    heap: Vec<QueueEntry>,
    slots: HashMap<u64, usize>,
}

impl ExitQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    pub fn contains(&self, priority: u64) -> bool {
        self.slots.contains_key(&priority)
    }

    pub fn peek_min(&self) -> Option<&QueueEntry> {
        self.heap.first()
    }

    /// Entries in heap order, not sorted.
    pub fn iter(&self) -> impl Iterator<Item = &QueueEntry> + '_ {
        self.heap.iter()
    }

    pub fn insert(&mut self, entry: QueueEntry) -> ExitQueueResult<()> {
        if self.contains(entry.priority) {
            return Err(ExitQueueError::DuplicatePriority(entry.priority));
        }

        let idx = self.heap.len();
        self.heap.push(entry);
        self.slots.insert(entry.priority, idx);
        self.sift_up(idx);
        Ok(())
    }

    pub fn extract_min(&mut self) -> ExitQueueResult<QueueEntry> {
        if self.heap.is_empty() {
            return Err(ExitQueueError::EmptyQueue);
        }
        Ok(self.take_at(0))
    }

    /// Removes the entry with `priority` wherever it sits in the heap.
    pub fn remove(&mut self, priority: u64) -> ExitQueueResult<QueueEntry> {
        let idx = *self
            .slots
            .get(&priority)
            .ok_or(ExitQueueError::NotQueued(priority))?;
        Ok(self.take_at(idx))
    }

    /// Caller guarantees `idx` is in bounds.
    fn take_at(&mut self, idx: usize) -> QueueEntry {
        let last = self.heap.len() - 1;
        self.swap(idx, last);

        let entry = self.heap.swap_remove(last);
        self.slots.remove(&entry.priority);

        if idx < self.heap.len() {
            // The moved entry may belong above or below its new slot.
            self.sift_down(idx);
            self.sift_up(idx);
        }

        entry
    }

    fn sift_up(&mut self, mut idx: usize) {
        while idx > 0 {
            let parent = (idx - 1) / 2;
            if self.heap[idx] >= self.heap[parent] {
                break;
            }
            self.swap(idx, parent);
            idx = parent;
        }
    }

    fn sift_down(&mut self, mut idx: usize) {
        let len = self.heap.len();
        loop {
            let left = 2 * idx + 1;
            let right = left + 1;
            let mut smallest = idx;

            if left < len && self.heap[left] < self.heap[smallest] {
                smallest = left;
            }
            if right < len && self.heap[right] < self.heap[smallest] {
                smallest = right;
            }
            if smallest == idx {
                break;
            }

            self.swap(idx, smallest);
            idx = smallest;
        }
    }

    fn swap(&mut self, a: usize, b: usize) {
        if a == b {
            return;
        }
        self.heap.swap(a, b);
        self.slots.insert(self.heap[a].priority, a);
        self.slots.insert(self.heap[b].priority, b);
    }
}

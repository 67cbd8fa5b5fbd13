use std::collections::VecDeque;

use alu::{FlagUpdate, Operation};
use serde::{Deserialize, Serialize};

/// A fixed-capacity log that keeps the most recent N entries.
///
/// New entries go to the front, so iteration goes from newest to oldest,
/// which is the order a history panel shows them in. Once full, the oldest
/// entry is dropped.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct History<T> {
    capacity: usize,
    entries: VecDeque<T>,
}

impl<T> History<T> {
    /// Storage grows with use, so `capacity` is only an upper bound.
    #[must_use]
    pub const fn new(capacity: usize) -> Self {
        Self {
            capacity,
            entries: VecDeque::new(),
        }
    }

    /// Records `entry` as the newest one.
    pub fn push(&mut self, entry: T) {
        if self.capacity == 0 {
            return;
        }
        if self.entries.len() == self.capacity {
            self.entries.pop_back();
        }
        self.entries.push_front(entry);
    }

    /// Newest to oldest.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.entries.iter()
    }

    #[must_use]
    pub fn latest(&self) -> Option<&T> {
        self.entries.front()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

/// One executed operation, as shown in the history tab.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// Local wall-clock time, `HH:MM:SS`.
    pub time: String,
    pub operation: Operation,
    /// The operands the operation read, e.g. `r0=5, r1=7, C=0`.
    pub input: String,
    pub result: i32,
    pub flags: FlagUpdate,
}

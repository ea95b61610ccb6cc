use crate::catalog::Transition;
use serde::Serialize;
use std::collections::{HashSet, VecDeque};

pub const DEFAULT_HISTORY_CAPACITY: usize = 8;

/// Most recent selections, oldest first. Appending past capacity drops
/// the oldest entry.
#[derive(Debug, Clone)]
pub struct History {
    entries: VecDeque<Transition>,
    capacity: usize,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryStats {
    pub total: usize,
    pub history: Vec<Transition>,
    pub variety: usize,
    pub most_recent: Option<Transition>,
}

impl Default for History {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_HISTORY_CAPACITY)
    }
}

impl History {
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(capacity + 1),
            capacity,
        }
    }

    pub fn push(&mut self, t: Transition) {
        self.entries.push_back(t);
        while self.entries.len() > self.capacity {
            self.entries.pop_front();
        }
    }

    pub fn last(&self) -> Option<Transition> {
        self.entries.back().copied()
    }

    pub fn contains(&self, t: Transition) -> bool {
        self.entries.contains(&t)
    }

    /// Oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = Transition> + '_ {
        self.entries.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn stats(&self) -> HistoryStats {
        let variety = self.entries.iter().collect::<HashSet<_>>().len();
        HistoryStats {
            total: self.entries.len(),
            history: self.entries.iter().copied().collect(),
            variety,
            most_recent: self.last(),
        }
    }
}

use std::collections::VecDeque;

use crate::graph::{Edge, Weight};

/// Anything ordered by a single integer priority, smallest first.
pub trait Prioritized {
    fn priority(&self) -> Weight;
}

impl Prioritized for Edge {
    fn priority(&self) -> Weight {
        self.weight
    }
}

/// Priority list kept fully sorted by linear-scan insertion.
///
/// Equal priorities keep insertion order: a new item goes right before the first
/// item with a strictly greater priority. The whole ordered content stays
/// observable, which the worklist display needs and a heap would not give.
#[derive(Debug, Clone)]
pub struct PriorityList<T> {
    items: VecDeque<T>,
}

impl<T> Default for PriorityList<T> {
    fn default() -> Self {
        Self {
            items: VecDeque::new(),
        }
    }
}

impl<T: Prioritized> PriorityList<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, item: T) {
        let p = item.priority();
        let pos = self
            .items
            .iter()
            .position(|e| e.priority() > p)
            .unwrap_or(self.items.len());
        self.items.insert(pos, item);
    }

    /// Removes and returns the item with the smallest priority.
    pub fn pop(&mut self) -> Option<T> {
        self.items.pop_front()
    }

    pub fn peek(&self) -> Option<&T> {
        self.items.front()
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<T: Prioritized> FromIterator<T> for PriorityList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut list = Self::new();
        for item in iter {
            list.insert(item);
        }
        list
    }
}

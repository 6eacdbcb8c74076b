//! Fixed-capacity, unordered entity storage
//!
//! Push appends; removal swaps the target with the last live element. Removal
//! is O(1) but reorders the pool, so loops that remove while iterating must
//! revisit the index they just removed from.

use std::ops::{Index, IndexMut};

use serde::{Deserialize, Serialize};

use crate::error::PoolFull;

/// Dense array of live entities with a hard capacity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pool<T> {
    capacity: usize,
    items: Vec<T>,
}

impl<T> Pool<T> {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity,
            items: Vec::with_capacity(capacity),
        }
    }

    /// Append an item, or hand back `PoolFull` without touching the pool
    pub fn push(&mut self, item: T) -> Result<&mut T, PoolFull> {
        if self.items.len() >= self.capacity {
            return Err(PoolFull {
                capacity: self.capacity,
            });
        }
        self.items.push(item);
        let last = self.items.len() - 1;
        Ok(&mut self.items[last])
    }

    /// Swap-remove the item at `index`.
    ///
    /// The element that was last now lives at `index`.
    ///
    /// # Panics
    /// If `index >= len()`.
    pub fn remove(&mut self, index: usize) -> T {
        assert!(
            index < self.items.len(),
            "pool index {index} out of range (len {})",
            self.items.len()
        );
        self.items.swap_remove(index)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, T> {
        self.items.iter_mut()
    }

    /// Remove every item for which `remove` returns true.
    ///
    /// Walks the pool with swap-removal, re-checking the swapped-in element.
    pub fn remove_where(&mut self, mut remove: impl FnMut(&T) -> bool) -> usize {
        let mut removed = 0;
        let mut i = 0;
        while i < self.items.len() {
            if remove(&self.items[i]) {
                self.remove(i);
                removed += 1;
            } else {
                i += 1;
            }
        }
        removed
    }
}

impl<T> Index<usize> for Pool<T> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        &self.items[index]
    }
}

impl<T> IndexMut<usize> for Pool<T> {
    fn index_mut(&mut self, index: usize) -> &mut T {
        &mut self.items[index]
    }
}

//! Sparse per-root accumulator storage

use std::ops::Index;

/// One accumulator per toplevel root index, created lazily.
///
/// Slots between the highest visited index and a newly requested one are
/// filled with `T::default()`, so iterating yields the accumulators in
/// root order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PerRoot<T> {
    slots: Vec<T>,
}

impl<T> Default for PerRoot<T> {
    fn default() -> Self {
        Self { slots: Vec::new() }
    }
}

impl<T: Default> PerRoot<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Accumulator for the given root index, creating it if needed.
    pub fn get_mut(&mut self, index: usize) -> &mut T {
        if self.slots.len() <= index {
            self.slots.resize_with(index + 1, T::default);
        }
        &mut self.slots[index]
    }
}

impl<T> PerRoot<T> {
    /// Whether any accumulator was ever created.
    pub fn visited(&self) -> bool {
        !self.slots.is_empty()
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.slots.get(index)
    }

    /// Accumulators in root order.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.slots.iter()
    }
}

impl<T> Index<usize> for PerRoot<T> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        &self.slots[index]
    }
}

impl<T> IntoIterator for PerRoot<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.slots.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a PerRoot<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.slots.iter()
    }
}

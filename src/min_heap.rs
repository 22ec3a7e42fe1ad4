//! Array-backed binary min-heap used as the open set of both search engines.
//!
//! Unlike [std::collections::BinaryHeap] it supports removing an arbitrary element, which the
//! search needs when a cheaper route to a node that is already on the frontier is found, and
//! it is stable: items that compare equal are extracted in insertion order. The latter keeps
//! the choice between equally expensive paths reproducible.

struct Slot<T> {
    item: T,
    sequence: u64,
}

pub struct MinHeap<T> {
    items: Vec<Slot<T>>,
    next_sequence: u64,
}

impl<T: Ord> Default for MinHeap<T> {
    fn default() -> MinHeap<T> {
        MinHeap::new()
    }
}

impl<T: Ord> MinHeap<T> {
    pub fn new() -> MinHeap<T> {
        MinHeap {
            items: Vec::new(),
            next_sequence: 0,
        }
    }

    pub fn with_capacity(capacity: usize) -> MinHeap<T> {
        MinHeap {
            items: Vec::with_capacity(capacity),
            next_sequence: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn clear(&mut self) {
        self.items.clear();
        self.next_sequence = 0;
    }

    pub fn peek(&self) -> Option<&T> {
        self.items.first().map(|slot| &slot.item)
    }

    /// Iterates the items in heap order, which is not sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.items.iter().map(|slot| &slot.item)
    }

    pub fn insert(&mut self, item: T) {
        let sequence = self.next_sequence;
        self.next_sequence += 1;
        self.items.push(Slot { item, sequence });
        self.sift_up(self.items.len() - 1);
    }

    pub fn extract_min(&mut self) -> Option<T> {
        if self.items.is_empty() {
            return None;
        }
        let min = self.items.swap_remove(0);
        self.sift_down(0);
        Some(min.item)
    }

    /// Removes the first item, in heap order, matching `predicate`. Locating it is a linear
    /// scan.
    pub fn remove_where<F>(&mut self, mut predicate: F) -> Option<T>
    where
        F: FnMut(&T) -> bool,
    {
        let index = self.items.iter().position(|slot| predicate(&slot.item))?;
        if self.items.len() < 2 {
            return self.items.pop().map(|slot| slot.item);
        }
        let removed = self.items.swap_remove(index);
        if index < self.items.len() {
            // The former last item can belong either above or below its new slot.
            self.sift_down(index);
            self.sift_up(index);
        }
        Some(removed.item)
    }

    pub fn remove(&mut self, item: &T) -> Option<T>
    where
        T: PartialEq,
    {
        self.remove_where(|other| other == item)
    }

    fn less(&self, a: usize, b: usize) -> bool {
        let (a, b) = (&self.items[a], &self.items[b]);
        match a.item.cmp(&b.item) {
            core::cmp::Ordering::Equal => a.sequence < b.sequence,
            ordering => ordering.is_lt(),
        }
    }

    fn sift_up(&mut self, mut index: usize) {
        while index > 0 {
            let parent = (index - 1) / 2;
            if !self.less(index, parent) {
                break;
            }
            self.items.swap(index, parent);
            index = parent;
        }
    }

    fn sift_down(&mut self, mut index: usize) {
        let n = self.items.len();
        loop {
            let left = 2 * index + 1;
            let right = left + 1;
            let mut best = index;
            if left < n && self.less(left, best) {
                best = left;
            }
            if right < n && self.less(right, best) {
                best = right;
            }
            if best == index {
                break;
            }
            self.items.swap(index, best);
            index = best;
        }
    }
}

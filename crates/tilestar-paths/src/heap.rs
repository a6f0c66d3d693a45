//! Indexable binary min-heap.
//!
//! [`PriorityHeap`] owns `(item, priority)` pairs in an array-backed binary
//! heap ordered by a caller-supplied strict `less` predicate over priorities.
//! Alongside the array it keeps a position index (item → array slot), updated
//! on every swap, so an item already in the heap can be found and re-settled
//! in O(log n) after its priority drops ([`decrease_key`](PriorityHeap::decrease_key)).
//!
//! Items are identities, not payloads: small `Copy` keys such as arena
//! indices. An item may be present at most once.

use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;

/// Error returned by [`PriorityHeap::extract_min`] on an empty heap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmptyHeapError;

impl fmt::Display for EmptyHeapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("extract from an empty heap")
    }
}

impl std::error::Error for EmptyHeapError {}

/// Capacity of a heap created with [`PriorityHeap::new`].
pub const INITIAL_CAPACITY: usize = 16;

#[derive(Debug, Clone)]
struct Slot<T, P> {
    item: T,
    priority: P,
}

/// An array-backed binary min-heap with a position index.
///
/// `less(a, b)` must be a strict weak ordering: the item whose priority is
/// "least" sits at the root. The backing array starts with room for
/// [`INITIAL_CAPACITY`] entries and doubles whenever
/// an insertion would overflow it.
pub struct PriorityHeap<T, P, F> {
    slots: Vec<Slot<T, P>>,
    positions: HashMap<T, usize>,
    less: F,
}

impl<T, P, F> PriorityHeap<T, P, F>
where
    T: Copy + Eq + Hash,
    F: Fn(&P, &P) -> bool,
{
    /// Create an empty heap ordered by `less`.
    pub fn new(less: F) -> Self {
        Self::with_capacity(INITIAL_CAPACITY, less)
    }

    /// Create an empty heap with room for `capacity` entries.
    pub fn with_capacity(capacity: usize, less: F) -> Self {
        let capacity = capacity.max(1);
        Self {
            slots: Vec::with_capacity(capacity),
            positions: HashMap::with_capacity(capacity),
            less,
        }
    }

    /// Build a heap from an arbitrary sequence in O(n).
    ///
    /// Every internal node is sifted down, from the last parent back to the
    /// root. Items must be distinct.
    pub fn heapify(items: impl IntoIterator<Item = (T, P)>, less: F) -> Self {
        let slots: Vec<Slot<T, P>> = items
            .into_iter()
            .map(|(item, priority)| Slot { item, priority })
            .collect();
        let mut positions = HashMap::with_capacity(slots.len());
        for (i, slot) in slots.iter().enumerate() {
            let previous = positions.insert(slot.item, i);
            debug_assert!(previous.is_none(), "heapify given a duplicate item");
        }
        let mut heap = Self {
            slots,
            positions,
            less,
        };
        if heap.slots.len() > 1 {
            for i in (0..=parent(heap.slots.len() - 1)).rev() {
                heap.repair_at(i);
            }
        }
        heap
    }

    /// Number of entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Whether the heap is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Current capacity of the backing array.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.slots.capacity()
    }

    /// Whether `item` is in the heap.
    #[inline]
    pub fn contains(&self, item: T) -> bool {
        self.positions.contains_key(&item)
    }

    /// Array slot currently holding `item`, or `None` if it is not in the heap.
    #[inline]
    pub fn position(&self, item: T) -> Option<usize> {
        self.positions.get(&item).copied()
    }

    /// Priority stored for `item`.
    pub fn priority(&self, item: T) -> Option<&P> {
        self.position(item).map(|i| &self.slots[i].priority)
    }

    /// The minimum entry without removing it.
    pub fn peek(&self) -> Option<(T, &P)> {
        self.slots.first().map(|s| (s.item, &s.priority))
    }

    /// Entries in backing-array order.
    pub fn iter(&self) -> impl Iterator<Item = (T, &P)> + '_ {
        self.slots.iter().map(|s| (s.item, &s.priority))
    }

    /// Remove every entry, keeping the allocation.
    pub fn clear(&mut self) {
        self.slots.clear();
        self.positions.clear();
    }

    /// Insert `item` with `priority`.
    ///
    /// The item is appended and sifted up while it is less than its parent.
    /// Inserting an item that is already present is a logic error.
    pub fn push(&mut self, item: T, priority: P) {
        debug_assert!(!self.contains(item), "item pushed twice");
        if self.slots.len() == self.slots.capacity() {
            let extra = self.slots.capacity().max(1);
            self.slots.reserve_exact(extra);
        }
        let idx = self.slots.len();
        self.slots.push(Slot { item, priority });
        self.positions.insert(item, idx);
        self.sift_up(idx);
    }

    /// Remove and return the minimum entry, or `None` when empty.
    pub fn pop_min(&mut self) -> Option<(T, P)> {
        if self.slots.is_empty() {
            return None;
        }
        let last = self.slots.len() - 1;
        self.swap(0, last);
        let slot = self.slots.pop()?;
        self.positions.remove(&slot.item);
        if !self.slots.is_empty() {
            self.sift_down(0);
        }
        Some((slot.item, slot.priority))
    }

    /// Remove and return the minimum entry.
    ///
    /// Unlike [`pop_min`](Self::pop_min), an empty heap is an error: use this
    /// where emptiness means broken call discipline.
    pub fn extract_min(&mut self) -> Result<(T, P), EmptyHeapError> {
        self.pop_min().ok_or(EmptyHeapError)
    }

    /// Replace the priority of `item` with a lower one and restore order.
    ///
    /// The entry is sifted up from its own slot. If `priority` is not actually
    /// lower, the entry is sifted down instead so the heap stays valid.
    /// Returns `false` (and changes nothing) when `item` is not in the heap.
    pub fn decrease_key(&mut self, item: T, priority: P) -> bool {
        let Some(idx) = self.position(item) else {
            return false;
        };
        let lowered = (self.less)(&priority, &self.slots[idx].priority);
        self.slots[idx].priority = priority;
        if lowered {
            self.sift_up(idx);
        } else {
            self.sift_down(idx);
        }
        true
    }

    /// Re-establish heap order below `index` by sifting its entry down.
    ///
    /// Out-of-range indices are ignored.
    pub fn repair_at(&mut self, index: usize) {
        if index < self.slots.len() {
            self.sift_down(index);
        }
    }

    // -----------------------------------------------------------------------
    // Internals
    // -----------------------------------------------------------------------

    #[inline]
    fn is_less(&self, a: usize, b: usize) -> bool {
        (self.less)(&self.slots[a].priority, &self.slots[b].priority)
    }

    fn swap(&mut self, a: usize, b: usize) {
        if a == b {
            return;
        }
        self.slots.swap(a, b);
        self.positions.insert(self.slots[a].item, a);
        self.positions.insert(self.slots[b].item, b);
    }

    /// Move the entry at `idx` toward the root.
    fn sift_up(&mut self, mut idx: usize) {
        while idx > 0 {
            let p = parent(idx);
            if !self.is_less(idx, p) {
                break;
            }
            self.swap(idx, p);
            idx = p;
        }
    }

    /// Move the entry at `idx` toward the leaves.
    fn sift_down(&mut self, mut idx: usize) {
        let len = self.slots.len();
        loop {
            let left = first_child(idx);
            if left >= len {
                break;
            }
            let right = left + 1;
            let smaller = if right < len && !self.is_less(left, right) {
                right
            } else {
                left
            };
            if !self.is_less(smaller, idx) {
                break;
            }
            self.swap(idx, smaller);
            idx = smaller;
        }
    }
}

impl<T, P, F> fmt::Debug for PriorityHeap<T, P, F>
where
    T: fmt::Debug,
    P: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.slots.iter().map(|s| (&s.item, &s.priority)))
            .finish()
    }
}

#[inline]
fn parent(child: usize) -> usize {
    (child - 1) / 2
}

#[inline]
fn first_child(parent: usize) -> usize {
    2 * parent + 1
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    /// Priority as `(f, h)`: lower `f` first, ties go to lower `h`.
    fn cost_less(a: &(i32, i32), b: &(i32, i32)) -> bool {
        if a.0 != b.0 { a.0 < b.0 } else { a.1 < b.1 }
    }

    type CostLess = fn(&(i32, i32), &(i32, i32)) -> bool;
    type CostHeap = PriorityHeap<u32, (i32, i32), CostLess>;

    const LESS: CostLess = cost_less;

    fn cost_heap() -> CostHeap {
        PriorityHeap::new(LESS)
    }

    /// Check the heap property and the position index in one pass.
    fn assert_valid<T, P, F>(heap: &PriorityHeap<T, P, F>)
    where
        T: Copy + Eq + Hash + fmt::Debug,
        F: Fn(&P, &P) -> bool,
    {
        assert_eq!(heap.positions.len(), heap.slots.len());
        for i in 1..heap.slots.len() {
            assert!(
                !heap.is_less(i, parent(i)),
                "slot {i} is less than its parent"
            );
        }
        for (i, slot) in heap.slots.iter().enumerate() {
            assert_eq!(heap.position(slot.item), Some(i), "stale position for {:?}", slot.item);
        }
    }

    #[test]
    fn pops_in_priority_order() {
        let mut h = PriorityHeap::new(|a: &i32, b: &i32| a < b);
        for (item, p) in [(1u32, 5), (2, 3), (3, 9), (4, 1), (5, 7)] {
            h.push(item, p);
            assert_valid(&h);
        }
        let order: Vec<u32> = std::iter::from_fn(|| h.pop_min().map(|(i, _)| i)).collect();
        assert_eq!(order, vec![4, 2, 1, 5, 3]);
        assert!(h.is_empty());
    }

    #[test]
    fn ties_on_f_prefer_lower_h() {
        let mut h = cost_heap();
        h.push(1, (40, 30));
        h.push(2, (40, 10));
        h.push(3, (40, 20));
        h.push(4, (50, 0));
        assert_eq!(h.pop_min(), Some((2, (40, 10))));
        assert_eq!(h.pop_min(), Some((3, (40, 20))));
        assert_eq!(h.pop_min(), Some((1, (40, 30))));
        assert_eq!(h.pop_min(), Some((4, (50, 0))));
    }

    #[test]
    fn extract_min_on_empty_is_error() {
        let mut h = cost_heap();
        assert_eq!(h.extract_min(), Err(EmptyHeapError));
        h.push(7, (1, 1));
        assert_eq!(h.extract_min(), Ok((7, (1, 1))));
        assert_eq!(h.extract_min(), Err(EmptyHeapError));
        assert_eq!(h.pop_min(), None);
    }

    #[test]
    fn decrease_key_bubbles_above_grandparent() {
        let mut h = cost_heap();
        for i in 0..15u32 {
            h.push(i, (10 * i as i32 + 10, 0));
        }
        // Item 14 sits on the deepest level; drop it below everything.
        assert!(h.position(14).unwrap() >= 7);
        assert!(h.decrease_key(14, (1, 0)));
        assert_valid(&h);
        assert_eq!(h.position(14), Some(0));
        assert_eq!(h.peek(), Some((14, &(1, 0))));
    }

    #[test]
    fn decrease_key_with_higher_priority_sinks() {
        let mut h = cost_heap();
        for i in 0..7u32 {
            h.push(i, (i as i32, 0));
        }
        assert!(h.decrease_key(0, (100, 0)));
        assert_valid(&h);
        assert_eq!(h.peek().map(|(i, _)| i), Some(1));
    }

    #[test]
    fn decrease_key_missing_item_is_noop() {
        let mut h = cost_heap();
        h.push(1, (5, 5));
        assert!(!h.decrease_key(2, (0, 0)));
        assert_eq!(h.len(), 1);
        assert_eq!(h.priority(1), Some(&(5, 5)));
    }

    #[test]
    fn repair_at_sinks_entry() {
        let mut h = cost_heap();
        for i in 0..10u32 {
            h.push(i, (i as i32, 0));
        }
        // Raise the root in place, then repair from it.
        h.slots[0].priority = (99, 0);
        h.repair_at(0);
        assert_valid(&h);
        h.repair_at(1000);
        assert_valid(&h);
    }

    #[test]
    fn heapify_builds_valid_heap() {
        let items: Vec<(u32, (i32, i32))> = (0..40u32)
            .map(|i| (i, ((i as i32 * 37) % 17, (i as i32 * 11) % 5)))
            .collect();
        let mut h: CostHeap = PriorityHeap::heapify(items, LESS);
        assert_eq!(h.len(), 40);
        assert_valid(&h);
        let mut prev = h.pop_min().unwrap().1;
        while let Some((_, p)) = h.pop_min() {
            assert!(!cost_less(&p, &prev), "{p:?} popped after {prev:?}");
            prev = p;
        }
    }

    #[test]
    fn heapify_small_inputs() {
        let h: CostHeap = PriorityHeap::heapify(Vec::new(), LESS);
        assert!(h.is_empty());
        let h: CostHeap = PriorityHeap::heapify(vec![(3, (1, 1))], LESS);
        assert_eq!(h.peek(), Some((3, &(1, 1))));
    }

    #[test]
    fn capacity_doubles_from_initial() {
        let mut h = cost_heap();
        let initial = h.capacity();
        assert!(initial >= INITIAL_CAPACITY);
        for i in 0..=initial as u32 {
            h.push(i, (0, i as i32));
        }
        assert!(h.capacity() >= 2 * initial);
        assert_valid(&h);
    }

    #[test]
    fn clear_resets_positions() {
        let mut h = cost_heap();
        h.push(1, (1, 1));
        h.push(2, (2, 2));
        h.clear();
        assert!(h.is_empty());
        assert!(!h.contains(1));
        h.push(1, (3, 3));
        assert_eq!(h.position(1), Some(0));
    }

    #[test]
    fn random_operations_keep_invariants() {
        let mut rng = StdRng::seed_from_u64(0x5eed);
        let mut h = cost_heap();
        let mut next_id = 0u32;
        for _ in 0..2000 {
            match rng.random_range(0..3) {
                0 => {
                    h.push(next_id, (rng.random_range(0..500), rng.random_range(0..50)));
                    next_id += 1;
                }
                1 => {
                    if let Some((_, p)) = h.pop_min() {
                        if let Some((_, root)) = h.peek() {
                            assert!(!cost_less(root, &p));
                        }
                    }
                }
                _ => {
                    if !h.is_empty() {
                        let slot = rng.random_range(0..h.len());
                        let item = h.slots[slot].item;
                        let (f, hc) = h.slots[slot].priority;
                        let drop = rng.random_range(0..=f.max(0));
                        assert!(h.decrease_key(item, (f - drop, hc)));
                    }
                }
            }
            assert_valid(&h);
        }
        let mut prev: Option<(i32, i32)> = None;
        while let Some((_, p)) = h.pop_min() {
            if let Some(q) = prev {
                assert!(!cost_less(&p, &q));
            }
            prev = Some(p);
        }
    }
}

/*!
A max heap over a fixed range of indices, with a value (score) for each index.

The heap is backed by a vector of values, a vector of heap positions, and the heap itself.
Values persist for indices which are not on the heap, and so the structure doubles as a store of scores for variables.

```rust
# use otter_arena::generic::index_heap::IndexHeap;
let mut heap = IndexHeap::default();
heap.resize(601);

heap.revalue(600, 10.0);
heap.revalue(0, 70.0);

heap.activate(600);
heap.activate(0);

assert_eq!(heap.count(), 601);
assert!(heap.perturbed());

assert_eq!(heap.pop_max(), Some(0));
assert_eq!(heap.pop_max(), Some(600));
assert!(heap.pop_max().is_none());
```

# Remapping

When the indices of a context are renumbered, the heap is [remapped](IndexHeap::remap): each kept index keeps its membership of the heap and (if the heap was ever perturbed) its value.
An unperturbed heap holds only default values, and so the values are not copied.
*/

use std::cmp::Ordering;

/// The index heap struct.
pub struct IndexHeap<V: PartialOrd + Default + Clone> {
    values: Vec<V>,
    position_in_heap: Vec<Option<usize>>,
    heap: Vec<usize>,
    limit: usize,

    /// True once some value has been set to anything other than the default.
    perturbed: bool,
}

impl<V: PartialOrd + Default + Clone> Default for IndexHeap<V> {
    fn default() -> Self {
        IndexHeap {
            values: Vec::default(),
            position_in_heap: Vec::default(),
            heap: Vec::default(),
            limit: 0,
            perturbed: false,
        }
    }
}

impl<V: PartialOrd + Default + Clone> IndexHeap<V> {
    /// Sets the count of indices to `count`.
    ///
    /// Fresh indices have the default value and are not on the heap.
    /// Dropped indices are removed from the heap.
    pub fn resize(&mut self, count: usize) {
        let shrinking = count < self.values.len();
        for index in count..self.values.len() {
            self.remove(index);
        }
        self.values.resize(count, V::default());
        self.position_in_heap.resize(count, None);
        self.heap.resize(count, usize::MAX);
        if shrinking {
            self.values.shrink_to(count);
            self.position_in_heap.shrink_to(count);
            self.heap.shrink_to(count);
        }
    }

    /// Reserves capacity for `count` indices in total.
    pub fn reserve(&mut self, count: usize) -> Result<(), std::collections::TryReserveError> {
        let additional = count.saturating_sub(self.values.len());
        self.values.try_reserve_exact(additional)?;
        self.position_in_heap.try_reserve_exact(additional)?;
        self.heap.try_reserve_exact(additional)
    }

    /// Remove `index` from the heap, if present.
    /// Returns true if `index` was removed, false otherwise.
    pub fn remove(&mut self, index: usize) -> bool {
        let Some(heap_index) = self.position_in_heap[index] else {
            return false;
        };

        self.limit -= 1;
        if heap_index != self.limit {
            let last = self.heap[self.limit];
            self.heap[heap_index] = last;
            self.position_in_heap[last] = Some(heap_index);
            self.heapify_down(heap_index);
            self.heapify_up(heap_index);
        }
        self.position_in_heap[index] = None;
        true
    }

    /// Places `index` on the heap, if not already present.
    /// Returns true if `index` was placed on the heap.
    pub fn activate(&mut self, index: usize) -> bool {
        match self.position_in_heap[index] {
            None => {
                self.position_in_heap[index] = Some(self.limit);
                self.heap[self.limit] = index;
                self.limit += 1;
                self.heapify_up(self.limit - 1);
                true
            }
            Some(heap_index) => {
                self.heapify_up(heap_index);
                self.heapify_down(heap_index);
                false
            }
        }
    }

    /// True if `index` is on the heap.
    pub fn contains(&self, index: usize) -> bool {
        self.position_in_heap[index].is_some()
    }

    /// Peek at the maximum index of the heap.
    pub fn peek_max(&self) -> Option<usize> {
        match self.limit {
            0 => None,
            _ => Some(self.heap[0]),
        }
    }

    /// Pop the maximum index off the heap.
    pub fn pop_max(&mut self) -> Option<usize> {
        let max = self.peek_max()?;
        self.remove(max);
        Some(max)
    }

    /// Restores the heap property over every index on the heap.
    pub fn heapify(&mut self) {
        for heap_index in (0..self.limit / 2).rev() {
            self.heapify_down(heap_index)
        }
    }

    /// The value of `index`.
    pub fn value_at(&self, index: usize) -> &V {
        &self.values[index]
    }

    /// Sets the value of `index` to `value`, restoring the heap property if `index` is on the heap.
    pub fn revalue(&mut self, index: usize, value: V) {
        if value != V::default() {
            self.perturbed = true;
        }
        self.values[index] = value;
        if let Some(heap_index) = self.position_in_heap[index] {
            self.heapify_up(heap_index);
            self.heapify_down(heap_index);
        }
    }

    /// True if some value has been set to anything other than the default.
    pub fn perturbed(&self) -> bool {
        self.perturbed
    }

    /// A count of indices.
    pub fn count(&self) -> usize {
        self.values.len()
    }

    /// A count of indices on the heap.
    pub fn len(&self) -> usize {
        self.limit
    }

    /// True if no index is on the heap.
    pub fn is_empty(&self) -> bool {
        self.limit == 0
    }

    /// Renumbers indices by `map`, to a total of `count` indices.
    ///
    /// Indices mapped to `None` are dropped.
    /// If several indices map to the same index, the value of the first is kept.
    pub fn remap(&mut self, count: usize, map: impl Fn(usize) -> Option<usize>) {
        let mut remapped = IndexHeap::default();
        remapped.resize(count);

        if self.perturbed {
            let mut written = vec![false; count];
            for index in 0..self.values.len() {
                let Some(mapped) = map(index) else {
                    continue;
                };
                if !written[mapped] {
                    written[mapped] = true;
                    remapped.values[mapped] = self.values[index].clone();
                }
            }
        }
        remapped.perturbed = self.perturbed;

        // Heap order is rebuilt from scratch, so placement order is irrelevant.
        for heap_index in 0..self.limit {
            if let Some(mapped) = map(self.heap[heap_index]) {
                remapped.activate(mapped);
            }
        }

        *self = remapped;
    }
}

impl<V: PartialOrd + Default + Clone> IndexHeap<V> {
    fn heap_left(heap_index: usize) -> usize {
        (2 * heap_index) + 1
    }

    fn heap_right(heap_index: usize) -> usize {
        (2 * heap_index) + 2
    }

    fn heap_parent(heap_index: usize) -> usize {
        heap_index.saturating_sub(1) / 2
    }

    fn value_on_heap(&self, heap_index: usize) -> &V {
        &self.values[self.heap[heap_index]]
    }

    fn swap(&mut self, a: usize, b: usize) {
        self.position_in_heap.swap(self.heap[a], self.heap[b]);
        self.heap.swap(a, b);
    }

    /// Shuffles the index at `heap_index` down into the heap, if required.
    fn heapify_down(&mut self, mut heap_index: usize) {
        loop {
            let left_index = Self::heap_left(heap_index);
            if left_index >= self.limit {
                break;
            }

            let mut update_index = heap_index;
            if self.value_on_heap(left_index) > self.value_on_heap(update_index) {
                update_index = left_index;
            }

            let right_index = Self::heap_right(heap_index);
            if right_index < self.limit
                && self.value_on_heap(right_index) > self.value_on_heap(update_index)
            {
                update_index = right_index;
            }

            if update_index == heap_index {
                break;
            }
            self.swap(heap_index, update_index);
            heap_index = update_index;
        }
    }

    /// Shuffles the index at `heap_index` up the heap, if required.
    fn heapify_up(&mut self, mut heap_index: usize) {
        while heap_index > 0 {
            let parent_index = Self::heap_parent(heap_index);
            match self
                .value_on_heap(parent_index)
                .partial_cmp(self.value_on_heap(heap_index))
            {
                Some(Ordering::Less) => {
                    self.swap(heap_index, parent_index);
                    heap_index = parent_index;
                }
                _ => break,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn heap_with(values: &[(usize, f64)], count: usize) -> IndexHeap<f64> {
        let mut heap = IndexHeap::default();
        heap.resize(count);
        for (index, value) in values {
            heap.revalue(*index, *value);
            heap.activate(*index);
        }
        heap
    }

    #[test]
    fn heap_simple() {
        let mut heap = heap_with(&[(6, 10.0), (5, 20.0), (4, 30.0), (1, 60.0), (0, 70.0)], 7);

        assert_eq!(heap.pop_max(), Some(0));
        assert_eq!(heap.pop_max(), Some(1));
        assert_eq!(heap.pop_max(), Some(4));
        assert_eq!(heap.pop_max(), Some(5));
        assert_eq!(heap.pop_max(), Some(6));
    }

    #[test]
    fn heap_update() {
        let mut heap = heap_with(&[(6, 10.0), (4, 30.0), (1, 60.0), (0, 70.0)], 7);

        heap.revalue(0, 0.0);
        heap.revalue(1, 1.0);
        heap.revalue(4, 4.0);
        heap.revalue(6, 6.0);

        assert_eq!(heap.pop_max(), Some(6));
        assert_eq!(heap.pop_max(), Some(4));
        assert_eq!(heap.pop_max(), Some(1));
        assert_eq!(heap.pop_max(), Some(0));
        assert!(heap.pop_max().is_none());
    }

    #[test]
    fn heap_remove() {
        let mut heap = heap_with(&[(6, 6.0), (5, 5.0), (4, 4.0), (1, 1.0), (0, 0.0)], 7);

        assert!(heap.remove(4));
        assert!(!heap.remove(4));
        assert!(heap.remove(6));
        heap.revalue(4, 1.5);
        assert!(heap.activate(4));

        assert_eq!(heap.pop_max(), Some(5));
        assert_eq!(heap.pop_max(), Some(4));
        assert_eq!(heap.pop_max(), Some(1));
        assert_eq!(heap.pop_max(), Some(0));
    }

    #[test]
    fn heap_remap() {
        let mut heap = heap_with(&[(0, 3.0), (2, 1.0), (3, 2.0)], 4);

        // Drop index 2, and shift index 3 to 1.
        heap.remap(3, |index| match index {
            0 => Some(0),
            1 => Some(2),
            3 => Some(1),
            _ => None,
        });

        assert_eq!(heap.count(), 3);
        assert_eq!(*heap.value_at(1), 2.0);
        assert!(!heap.contains(2));
        assert_eq!(heap.pop_max(), Some(0));
        assert_eq!(heap.pop_max(), Some(1));
        assert!(heap.is_empty());
    }

    #[test]
    fn shared_targets_keep_the_first_value() {
        let mut heap = heap_with(&[(1, 4.0)], 4);
        heap.revalue(3, 9.0);

        // Indices 1 and 3 fold into index 0.
        heap.remap(2, |index| match index {
            1 | 3 => Some(0),
            2 => Some(1),
            _ => None,
        });

        assert_eq!(*heap.value_at(0), 4.0);
        assert_eq!(*heap.value_at(1), 0.0);
        assert_eq!(heap.len(), 1);
    }

    #[test]
    fn unperturbed_values_are_default() {
        let mut heap: IndexHeap<f64> = IndexHeap::default();
        heap.resize(3);
        heap.activate(2);
        heap.remap(2, |index| index.checked_sub(1));

        assert!(!heap.perturbed());
        assert!(heap.contains(1));
        assert_eq!(*heap.value_at(1), 0.0);
    }
}

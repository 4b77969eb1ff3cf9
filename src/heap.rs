//! Array-backed binary min-heap used as the priority queue of the graph algorithms.
//!
//! The heap is stored as a complete binary tree laid out in a vector: the
//! children of the node at position `i` live at `2i + 1` and `2i + 2`, its
//! parent at `(i - 1) / 2`. Every node's key is less than or equal to the keys
//! of both of its children.
use std::cmp::Ordering;
use std::ops::Add;

use thiserror::Error;

/// Strategy used to restore the heap property of a single subtree.
///
/// Both strategies produce identical heaps; they only differ in whether the
/// sift-down is written as recursion or as a loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Heapify {
    #[default]
    Recursive,
    Iterative,
}

/// Binary min-heap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MinHeap<T> {
    array: Vec<T>,
}

impl<T: Ord> Default for MinHeap<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[inline(always)]
const fn parent(i: usize) -> usize {
    (i - 1) / 2
}

#[inline(always)]
const fn left_child(i: usize) -> usize {
    2 * i + 1
}

#[inline(always)]
const fn right_child(i: usize) -> usize {
    2 * i + 2
}

impl<T: Ord> MinHeap<T> {
    /// Creates an empty heap.
    pub fn new() -> Self {
        Self { array: Vec::new() }
    }

    /// Creates an empty heap with room for `capacity` keys.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            array: Vec::with_capacity(capacity),
        }
    }

    /// Builds a heap from an unordered vector in linear time.
    ///
    /// # Example
    ///
    /// ```
    /// # use adjgraph::MinHeap;
    /// let heap = MinHeap::from_vec(vec![5, 3, 8, 1, 9, 2]);
    /// assert!(heap.is_min_heap());
    /// assert_eq!(heap.peek_min(), Some(&1));
    /// ```
    pub fn from_vec(array: Vec<T>) -> Self {
        Self::from_vec_with(array, Heapify::Recursive)
    }

    /// Builds a heap from an unordered vector using the given sift-down strategy.
    pub fn from_vec_with(mut array: Vec<T>, heapify: Heapify) -> Self {
        build_heap(&mut array, heapify);
        Self { array }
    }

    /// Number of keys in the heap.
    #[inline]
    pub fn len(&self) -> usize {
        self.array.len()
    }

    /// Whether the heap holds no keys.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.array.is_empty()
    }

    /// The underlying array in heap order.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.array
    }

    /// The smallest key, if any.
    #[inline]
    pub fn peek_min(&self) -> Option<&T> {
        self.array.first()
    }

    /// Inserts a key in `O(log n)`.
    pub fn insert(&mut self, key: T) {
        self.array.push(key);
        self.sift_up(self.array.len() - 1);
    }

    /// Removes and returns the smallest key in `O(log n)`.
    ///
    /// # Example
    ///
    /// ```
    /// # use adjgraph::MinHeap;
    /// let mut heap = MinHeap::new();
    /// for key in [4, 1, 3] {
    ///     heap.insert(key);
    /// }
    /// assert_eq!(heap.extract_min(), Some(1));
    /// assert_eq!(heap.extract_min(), Some(3));
    /// assert_eq!(heap.extract_min(), Some(4));
    /// assert_eq!(heap.extract_min(), None);
    /// ```
    pub fn extract_min(&mut self) -> Option<T> {
        if self.array.is_empty() {
            return None;
        }

        let last = self.array.len() - 1;
        self.array.swap(0, last);
        let min = self.array.pop();
        heapify_recursive(&mut self.array, 0);
        min
    }

    /// Removes and returns the key at position `i` of the heap array.
    ///
    /// Returns `None` when `i` is out of bounds.
    pub fn remove(&mut self, i: usize) -> Option<T> {
        if i >= self.array.len() {
            return None;
        }

        let last = self.array.len() - 1;
        self.array.swap(i, last);
        let removed = self.array.pop();

        if i < self.array.len() {
            self.sift_up(i);
            heapify_iterative(&mut self.array, i);
        }

        removed
    }

    /// Replaces the key at position `i` by a key that is not smaller.
    ///
    /// # Errors
    ///
    ///  - When `i` is out of bounds.
    ///  - When the new key is smaller than the current one.
    ///
    /// In the case of an error, the heap is unchanged.
    pub fn increase_key(&mut self, i: usize, key: T) -> Result<(), HeapError> {
        let current = self.array.get(i).ok_or(HeapError::OutOfRange {
            index: i,
            len: self.array.len(),
        })?;

        if key < *current {
            return Err(HeapError::KeyDecrease);
        }

        self.array[i] = key;
        heapify_iterative(&mut self.array, i);
        Ok(())
    }

    /// Replaces the key at position `i` by a key that is not larger.
    ///
    /// # Errors
    ///
    ///  - When `i` is out of bounds.
    ///  - When the new key is larger than the current one.
    ///
    /// In the case of an error, the heap is unchanged.
    pub fn decrease_key(&mut self, i: usize, key: T) -> Result<(), HeapError> {
        let current = self.array.get(i).ok_or(HeapError::OutOfRange {
            index: i,
            len: self.array.len(),
        })?;

        if key > *current {
            return Err(HeapError::KeyIncrease);
        }

        self.array[i] = key;
        self.sift_up(i);
        Ok(())
    }

    /// Checks that every key is smaller than or equal to the keys of its children.
    pub fn is_min_heap(&self) -> bool {
        let len = self.array.len();
        (0..len).all(|i| {
            let left = left_child(i);
            let right = right_child(i);
            (left >= len || self.array[i] <= self.array[left])
                && (right >= len || self.array[i] <= self.array[right])
        })
    }

    /// Consumes the heap and returns its keys in non-decreasing order.
    pub fn heap_sort(mut self) -> Vec<T> {
        let mut sorted = Vec::with_capacity(self.array.len());
        while let Some(key) = self.extract_min() {
            sorted.push(key);
        }
        sorted
    }

    /// Merges two heaps into a new heap in linear time.
    pub fn merge(mut self, other: Self) -> Self {
        self.array.extend(other.array);
        build_heap(&mut self.array, Heapify::Recursive);
        self
    }

    fn sift_up(&mut self, mut i: usize) {
        while i > 0 && self.array[i] < self.array[parent(i)] {
            self.array.swap(i, parent(i));
            i = parent(i);
        }
    }
}

impl<T> MinHeap<T>
where
    T: Ord + Clone + Add<Output = T>,
{
    /// Adds `amount` to the first key equal to `key` and moves it to its new
    /// place in `O(n)`. A negative amount moves the key towards the root.
    ///
    /// Returns `false` and leaves the heap unchanged when no key equals `key`.
    ///
    /// # Example
    ///
    /// ```
    /// # use adjgraph::MinHeap;
    /// let mut heap = MinHeap::from_vec(vec![1, 4, 7]);
    /// assert!(heap.increment(&1, 5));
    /// assert_eq!(heap.peek_min(), Some(&4));
    /// assert!(!heap.increment(&1, 5));
    /// ```
    pub fn increment(&mut self, key: &T, amount: T) -> bool {
        let Some(i) = self.array.iter().position(|current| current == key) else {
            return false;
        };

        self.array[i] = self.array[i].clone() + amount;
        self.sift_up(i);
        heapify_iterative(&mut self.array, i);
        true
    }
}

impl<T: Ord> FromIterator<T> for MinHeap<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::from_vec(iter.into_iter().collect())
    }
}

impl<T: Ord> Extend<T> for MinHeap<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for key in iter {
            self.insert(key);
        }
    }
}

/// Restores the heap property bottom up, starting at the last internal node.
fn build_heap<T: Ord>(array: &mut [T], heapify: Heapify) {
    for i in (0..array.len() / 2).rev() {
        match heapify {
            Heapify::Recursive => heapify_recursive(array, i),
            Heapify::Iterative => heapify_iterative(array, i),
        }
    }
}

/// Sifts the key at `i` down, assuming both subtrees of `i` are heaps.
fn heapify_recursive<T: Ord>(array: &mut [T], i: usize) {
    let left = left_child(i);
    let right = right_child(i);
    let mut smallest = i;

    if left < array.len() && array[left] < array[smallest] {
        smallest = left;
    }
    if right < array.len() && array[right] < array[smallest] {
        smallest = right;
    }

    if smallest != i {
        array.swap(i, smallest);
        heapify_recursive(array, smallest);
    }
}

/// Loop form of [`heapify_recursive`].
fn heapify_iterative<T: Ord>(array: &mut [T], mut i: usize) {
    loop {
        let left = left_child(i);
        let right = right_child(i);
        let mut smallest = i;

        if left < array.len() && array[left] < array[smallest] {
            smallest = left;
        }
        if right < array.len() && array[right] < array[smallest] {
            smallest = right;
        }

        if smallest == i {
            return;
        }

        array.swap(i, smallest);
        i = smallest;
    }
}

/// A priority paired with a payload.
///
/// Equality and ordering only consider the key, so that arbitrary payloads
/// such as vertices or edges can be stored in a [`MinHeap`].
#[derive(Debug, Clone, Copy)]
pub struct Association<K, V> {
    key: K,
    value: V,
}

impl<K, V> Association<K, V> {
    pub fn new(key: K, value: V) -> Self {
        Self { key, value }
    }

    #[inline]
    pub fn key(&self) -> &K {
        &self.key
    }

    #[inline]
    pub fn value(&self) -> &V {
        &self.value
    }

    #[inline]
    pub fn into_value(self) -> V {
        self.value
    }

    #[inline]
    pub fn into_parts(self) -> (K, V) {
        (self.key, self.value)
    }
}

impl<K: PartialEq, V> PartialEq for Association<K, V> {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl<K: Eq, V> Eq for Association<K, V> {}

impl<K: PartialOrd, V> PartialOrd for Association<K, V> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.key.partial_cmp(&other.key)
    }
}

impl<K: Ord, V> Ord for Association<K, V> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key.cmp(&other.key)
    }
}

/// Error returned by [`MinHeap::increase_key`] and [`MinHeap::decrease_key`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HeapError {
    #[error("heap position {index} is out of range for a heap of length {len}")]
    OutOfRange { index: usize, len: usize },
    #[error("new key is smaller than the current key")]
    KeyDecrease,
    #[error("new key is larger than the current key")]
    KeyIncrease,
}

#[cfg(test)]
mod test {
    use super::*;
    use proptest::prelude::*;
    use rstest::rstest;

    #[test]
    fn index_arithmetic() {
        assert_eq!(parent(1), 0);
        assert_eq!(parent(2), 0);
        assert_eq!(parent(5), 2);
        assert_eq!(left_child(0), 1);
        assert_eq!(right_child(0), 2);
        assert_eq!(left_child(3), 7);
        assert_eq!(right_child(3), 8);
    }

    #[test]
    fn build_known_heap() {
        let heap = MinHeap::from_vec(vec![9, 8, 7, 6, 5, 4, 3, 2, 1]);
        assert!(heap.is_min_heap());
        assert_eq!(heap.peek_min(), Some(&1));
        assert_eq!(heap.len(), 9);
    }

    #[rstest]
    #[case::recursive(Heapify::Recursive)]
    #[case::iterative(Heapify::Iterative)]
    fn build_strategies(#[case] heapify: Heapify) {
        let heap = MinHeap::from_vec_with(vec![12, 3, 17, 8, 34, 25, 1, 7], heapify);
        assert!(heap.is_min_heap());
        assert_eq!(heap.heap_sort(), vec![1, 3, 7, 8, 12, 17, 25, 34]);
    }

    #[test]
    fn remove_inner_position() {
        let mut heap = MinHeap::from_vec(vec![1, 5, 2, 9, 6, 3, 4]);
        let removed = heap.remove(1);
        assert_eq!(removed, Some(5));
        assert!(heap.is_min_heap());
        assert_eq!(heap.len(), 6);
        assert_eq!(heap.remove(17), None);
    }

    #[test]
    fn remove_last_position() {
        let mut heap = MinHeap::from_vec(vec![1, 2, 3]);
        let last = heap.len() - 1;
        assert!(heap.remove(last).is_some());
        assert!(heap.is_min_heap());
        assert_eq!(heap.len(), 2);
    }

    #[test]
    fn increase_key_moves_down() {
        let mut heap = MinHeap::from_vec(vec![1, 2, 3, 4, 5]);
        heap.increase_key(0, 10).unwrap();
        assert!(heap.is_min_heap());
        assert_eq!(heap.peek_min(), Some(&2));
        assert_eq!(heap.increase_key(0, 0), Err(HeapError::KeyDecrease));
        assert_eq!(
            heap.increase_key(5, 0),
            Err(HeapError::OutOfRange { index: 5, len: 5 })
        );
    }

    #[test]
    fn decrease_key_moves_up() {
        let mut heap = MinHeap::from_vec(vec![1, 2, 3, 4, 5]);
        let last = heap.len() - 1;
        heap.decrease_key(last, 0).unwrap();
        assert!(heap.is_min_heap());
        assert_eq!(heap.peek_min(), Some(&0));
        assert_eq!(heap.decrease_key(0, 7), Err(HeapError::KeyIncrease));
    }

    #[test]
    fn merge_heaps() {
        let a = MinHeap::from_vec(vec![4, 8, 15]);
        let b = MinHeap::from_vec(vec![16, 23, 42, 1]);
        let merged = a.merge(b);
        assert!(merged.is_min_heap());
        assert_eq!(merged.heap_sort(), vec![1, 4, 8, 15, 16, 23, 42]);
    }

    #[rstest]
    #[case(2, 19, [1, 3, 5, 8, 9, 13, 21])]
    #[case(9, -8, [1, 1, 2, 3, 5, 8, 13])]
    #[case(1, 0, [1, 2, 3, 5, 8, 9, 13])]
    fn increment_moves_key(#[case] key: i32, #[case] amount: i32, #[case] sorted: [i32; 7]) {
        let mut heap = MinHeap::from_vec(vec![13, 8, 5, 3, 2, 1, 9]);
        assert!(heap.increment(&key, amount));
        assert!(heap.is_min_heap());
        assert_eq!(heap.heap_sort(), sorted);
    }

    #[test]
    fn increment_missing_key() {
        let mut heap = MinHeap::from_vec(vec![3, 1, 2]);
        let before = heap.clone();
        assert!(!heap.increment(&7, 1));
        assert_eq!(heap, before);
    }

    #[test]
    fn debug_lists_the_array() {
        let heap = MinHeap::from_vec(vec![2, 1]);
        assert_eq!(format!("{heap:?}"), "MinHeap { array: [1, 2] }");
    }

    #[test]
    fn associations_order_by_key_only() {
        let mut heap = MinHeap::new();
        heap.insert(Association::new(3, "c"));
        heap.insert(Association::new(1, "a"));
        heap.insert(Association::new(2, "b"));

        let values: Vec<_> = std::iter::from_fn(|| heap.extract_min())
            .map(Association::into_value)
            .collect();
        assert_eq!(values, ["a", "b", "c"]);
        assert_eq!(Association::new(1, "x"), Association::new(1, "y"));
    }

    proptest! {
        #[test]
        fn increment_keeps_heap_order(
            keys in prop::collection::vec(-1000i32..1000, 1..100),
            pick in any::<prop::sample::Index>(),
            amount in -1000i32..1000,
        ) {
            let key = keys[pick.index(keys.len())];
            let mut heap = MinHeap::from_vec(keys.clone());
            prop_assert!(heap.increment(&key, amount));
            prop_assert!(heap.is_min_heap());

            let mut expected = keys;
            let position = expected.iter().position(|&k| k == key).unwrap();
            expected[position] += amount;
            expected.sort_unstable();
            prop_assert_eq!(heap.heap_sort(), expected);
        }

        #[test]
        fn extraction_is_sorted(keys in prop::collection::vec(any::<i32>(), 0..200)) {
            let mut heap = MinHeap::new();
            heap.extend(keys.iter().copied());
            prop_assert!(heap.is_min_heap());

            let extracted: Vec<_> = std::iter::from_fn(|| heap.extract_min()).collect();
            let mut expected = keys;
            expected.sort_unstable();
            prop_assert_eq!(extracted, expected);
        }

        #[test]
        fn build_strategies_agree(keys in prop::collection::vec(any::<i16>(), 0..200)) {
            let recursive = MinHeap::from_vec_with(keys.clone(), Heapify::Recursive);
            let iterative = MinHeap::from_vec_with(keys, Heapify::Iterative);
            prop_assert!(recursive.is_min_heap());
            prop_assert_eq!(recursive, iterative);
        }
    }
}

//! Disjoint-set forest with union by rank and path compression.
use std::collections::HashMap;
use std::hash::Hash;

use thiserror::Error;
use tracing::trace;

/// A partition of keys into disjoint sets.
///
/// Every set is represented by a tree whose root is the set's representative.
/// [`Partition::find`] compresses the path it walks, and [`Partition::union`]
/// attaches the shallower tree below the deeper one, which keeps all
/// operations amortised near-constant.
///
/// # Example
///
/// ```
/// # use adjgraph::Partition;
/// let mut partition: Partition<char> = "abcd".chars().collect();
///
/// partition.union(&'a', &'b').unwrap();
/// partition.union(&'c', &'d').unwrap();
///
/// assert!(partition.same_set(&'a', &'b').unwrap());
/// assert!(!partition.same_set(&'b', &'c').unwrap());
/// ```
#[derive(Debug, Clone)]
pub struct Partition<K> {
    elements: HashMap<K, Element<K>>,
}

impl<K: Hash + Eq> PartialEq for Partition<K> {
    fn eq(&self, other: &Self) -> bool {
        self.elements == other.elements
    }
}

impl<K: Hash + Eq> Eq for Partition<K> {}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Element<K> {
    /// The parent key, or the key itself when the element is a root.
    parent: K,
    /// Upper bound on the height of the tree below this element.
    rank: u32,
}

impl<K> Default for Partition<K> {
    fn default() -> Self {
        Self {
            elements: HashMap::new(),
        }
    }
}

impl<K> Partition<K>
where
    K: Hash + Eq + Clone,
{
    /// Creates an empty partition.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty partition with room for `capacity` keys.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            elements: HashMap::with_capacity(capacity),
        }
    }

    /// Number of keys in the partition.
    #[inline]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Whether the partition holds no keys.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Whether `key` was inserted with [`Partition::make_set`].
    #[inline]
    pub fn contains(&self, key: &K) -> bool {
        self.elements.contains_key(key)
    }

    /// The rank of `key`, or `None` if the key is unknown.
    pub fn rank(&self, key: &K) -> Option<u32> {
        self.elements.get(key).map(|element| element.rank)
    }

    /// Inserts `key` as a singleton set of rank zero.
    ///
    /// Returns `false` and leaves the partition unchanged when the key is already present.
    pub fn make_set(&mut self, key: K) -> bool {
        if self.elements.contains_key(&key) {
            return false;
        }

        self.elements.insert(
            key.clone(),
            Element {
                parent: key,
                rank: 0,
            },
        );
        true
    }

    /// Returns the representative of the set containing `key`.
    ///
    /// Every element on the walked path is re-pointed directly at the root.
    ///
    /// # Errors
    ///
    /// When `key` was never inserted.
    pub fn find(&mut self, key: &K) -> Result<K, PartitionError> {
        let mut root = self
            .elements
            .get(key)
            .ok_or(PartitionError::UnknownElement)?
            .parent
            .clone();

        loop {
            let parent = &self.elements[&root].parent;
            if *parent == root {
                break;
            }
            root = parent.clone();
        }

        let mut current = key.clone();
        while current != root {
            let Some(element) = self.elements.get_mut(&current) else {
                break;
            };
            current = std::mem::replace(&mut element.parent, root.clone());
        }

        Ok(root)
    }

    /// Returns the representative of the set containing `key`, compressing
    /// the walked path on the way back from the root.
    ///
    /// Agrees with [`Partition::find`]. The recursion depth is the height of
    /// the tree, which union by rank bounds by `log n`.
    ///
    /// # Errors
    ///
    /// When `key` was never inserted.
    pub fn find_recursive(&mut self, key: &K) -> Result<K, PartitionError> {
        let parent = self
            .elements
            .get(key)
            .ok_or(PartitionError::UnknownElement)?
            .parent
            .clone();
        if parent == *key {
            return Ok(parent);
        }

        let root = self.find_recursive(&parent)?;
        if let Some(element) = self.elements.get_mut(key) {
            element.parent = root.clone();
        }
        Ok(root)
    }

    /// Merges the sets containing `a` and `b`.
    ///
    /// The root of lower rank is attached below the root of higher rank. On a
    /// tie the root of `b` is attached below the root of `a`, whose rank grows
    /// by one.
    ///
    /// Returns `true` if two distinct sets were merged and `false` if both
    /// keys already shared a set.
    ///
    /// # Errors
    ///
    /// When either key was never inserted. The partition is unchanged in that case.
    pub fn union(&mut self, a: &K, b: &K) -> Result<bool, PartitionError> {
        let root_a = self.find(a)?;
        let root_b = self.find(b)?;

        if root_a == root_b {
            return Ok(false);
        }

        let rank_a = self.elements[&root_a].rank;
        let rank_b = self.elements[&root_b].rank;

        let (root, child) = if rank_a < rank_b {
            (root_b, root_a)
        } else {
            (root_a, root_b)
        };

        if rank_a == rank_b {
            if let Some(element) = self.elements.get_mut(&root) {
                element.rank += 1;
            }
        }

        if let Some(element) = self.elements.get_mut(&child) {
            element.parent = root;
        }

        trace!(rank_a, rank_b, "merged two sets");
        Ok(true)
    }

    /// Whether `a` and `b` belong to the same set.
    ///
    /// # Errors
    ///
    /// When either key was never inserted.
    pub fn same_set(&mut self, a: &K, b: &K) -> Result<bool, PartitionError> {
        Ok(self.find(a)? == self.find(b)?)
    }

    /// Number of disjoint sets in the partition.
    pub fn set_count(&self) -> usize {
        self.elements
            .iter()
            .filter(|(key, element)| element.parent == **key)
            .count()
    }
}

impl<K> FromIterator<K> for Partition<K>
where
    K: Hash + Eq + Clone,
{
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        let mut partition = Self::new();
        for key in iter {
            partition.make_set(key);
        }
        partition
    }
}

/// Error returned by [`Partition::find`] and the operations built on it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PartitionError {
    #[error("element is not part of the partition")]
    UnknownElement,
}

#[cfg(test)]
mod test {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn singletons() {
        let mut partition: Partition<u32> = (0..4).collect();
        assert_eq!(partition.len(), 4);
        assert_eq!(partition.set_count(), 4);
        for key in 0..4 {
            assert_eq!(partition.find(&key), Ok(key));
            assert_eq!(partition.rank(&key), Some(0));
        }
    }

    #[test]
    fn make_set_twice_is_rejected() {
        let mut partition = Partition::new();
        assert!(partition.make_set("x"));
        partition.make_set("y");
        partition.union(&"x", &"y").unwrap();
        assert!(!partition.make_set("x"));
        assert!(partition.same_set(&"x", &"y").unwrap());
    }

    #[test]
    fn unknown_elements() {
        let mut partition: Partition<u32> = (0..2).collect();
        assert_eq!(partition.find(&7), Err(PartitionError::UnknownElement));
        assert_eq!(partition.union(&0, &7), Err(PartitionError::UnknownElement));
        assert_eq!(partition.same_set(&7, &0), Err(PartitionError::UnknownElement));
        assert_eq!(partition.set_count(), 2);
    }

    #[test]
    fn union_by_rank() {
        let mut partition: Partition<u32> = (0..4).collect();

        assert_eq!(partition.union(&0, &1), Ok(true));
        assert_eq!(partition.find(&1), Ok(0));
        assert_eq!(partition.rank(&0), Some(1));

        // Lower rank root goes below the higher rank root regardless of argument order.
        assert_eq!(partition.union(&2, &0), Ok(true));
        assert_eq!(partition.find(&2), Ok(0));
        assert_eq!(partition.rank(&0), Some(1));

        assert_eq!(partition.union(&1, &2), Ok(false));
        assert_eq!(partition.set_count(), 2);
    }

    #[test]
    fn path_compression() {
        let mut partition: Partition<u32> = (0..8).collect();
        partition.union(&0, &1).unwrap();
        partition.union(&2, &3).unwrap();
        partition.union(&0, &2).unwrap();
        partition.union(&4, &5).unwrap();
        partition.union(&6, &7).unwrap();
        partition.union(&4, &6).unwrap();
        partition.union(&0, &4).unwrap();

        assert_eq!(partition.rank(&0), Some(3));
        assert_eq!(partition.find(&7), Ok(0));
        // After compression 7 hangs directly below the root.
        assert_eq!(partition.elements[&7].parent, 0);
        assert_eq!(partition.set_count(), 1);
    }

    #[test]
    fn recursive_find_compresses_paths() {
        let mut partition: Partition<u32> = (0..8).collect();
        partition.union(&0, &1).unwrap();
        partition.union(&2, &3).unwrap();
        partition.union(&0, &2).unwrap();
        partition.union(&4, &5).unwrap();
        partition.union(&6, &7).unwrap();
        partition.union(&4, &6).unwrap();
        partition.union(&0, &4).unwrap();
        assert_eq!(partition.elements[&7].parent, 6);

        assert_eq!(partition.find_recursive(&7), Ok(0));
        assert_eq!(partition.elements[&7].parent, 0);
        assert_eq!(partition.elements[&6].parent, 0);
        assert_eq!(partition.find_recursive(&0), Ok(0));
        assert_eq!(partition.find_recursive(&9), Err(PartitionError::UnknownElement));
    }

    #[test]
    fn partitions_compare_by_structure() {
        let mut left: Partition<&str> = ["a", "b", "c"].into_iter().collect();
        let right: Partition<&str> = ["c", "b", "a"].into_iter().collect();
        assert_eq!(left, right);

        left.union(&"a", &"b").unwrap();
        assert_ne!(left, right);

        let before = left.clone();
        assert_eq!(left.union(&"b", &"a"), Ok(false));
        assert_eq!(left, before);
    }

    proptest! {
        #[test]
        fn recursive_find_agrees_with_find(
            pairs in prop::collection::vec((0u8..32, 0u8..32), 0..64),
        ) {
            let mut iterative: Partition<u8> = (0..32).collect();
            for (x, y) in &pairs {
                iterative.union(x, y).unwrap();
            }
            let mut recursive = iterative.clone();

            for key in 0..32 {
                prop_assert_eq!(recursive.find_recursive(&key), iterative.find(&key));
            }
            prop_assert_eq!(recursive, iterative);
        }

        #[test]
        fn union_is_idempotent(
            pairs in prop::collection::vec((0u8..32, 0u8..32), 0..64),
            a in 0u8..32,
            b in 0u8..32,
        ) {
            let mut partition: Partition<u8> = (0..32).collect();
            for (x, y) in &pairs {
                partition.union(x, y).unwrap();
            }

            partition.union(&a, &b).unwrap();
            prop_assert!(partition.same_set(&a, &b).unwrap());

            let mut roots: Vec<_> = (0..32).map(|key| partition.find(&key).unwrap()).collect();
            let sets = partition.set_count();
            let before = partition.clone();

            prop_assert_eq!(partition.union(&a, &b), Ok(false));
            prop_assert_eq!(&partition, &before);
            prop_assert_eq!(partition.set_count(), sets);
            let mut after: Vec<_> = (0..32).map(|key| partition.find(&key).unwrap()).collect();
            roots.sort_unstable();
            after.sort_unstable();
            prop_assert_eq!(roots, after);
        }
    }
}

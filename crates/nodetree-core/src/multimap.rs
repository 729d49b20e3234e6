//! Ordered multimap used for the idname → nodes index.

#[cfg(not(feature = "std"))]
use alloc::{collections::BTreeMap, vec::Vec};
#[cfg(feature = "std")]
use std::collections::BTreeMap;

use core::borrow::Borrow;

/// Map from keys to lists of values.
///
/// Keys iterate in sorted order; values under one key keep insertion order.
/// Looking up a missing key yields an empty slice.
#[derive(Debug, Clone)]
pub struct MultiMap<K, V> {
    map: BTreeMap<K, Vec<V>>,
}

impl<K: Ord, V> MultiMap<K, V> {
    /// Creates an empty multimap.
    pub fn new() -> Self {
        Self {
            map: BTreeMap::new(),
        }
    }

    /// Appends `value` to the list under `key`.
    pub fn add(&mut self, key: K, value: V) {
        self.map.entry(key).or_default().push(value);
    }

    /// Returns the values under `key`, empty if the key is absent.
    pub fn lookup<Q>(&self, key: &Q) -> &[V]
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.map.get(key).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Iterates over the distinct keys in sorted order.
    pub fn keys(&self) -> impl ExactSizeIterator<Item = &K> {
        self.map.keys()
    }

    /// Number of distinct keys.
    pub fn key_count(&self) -> usize {
        self.map.len()
    }
}

impl<K: Ord, V> Default for MultiMap<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_preserves_insertion_order() {
        let mut map = MultiMap::new();
        map.add("Add", 0);
        map.add("Mul", 1);
        map.add("Add", 2);

        assert_eq!(map.lookup("Add"), &[0, 2]);
        assert_eq!(map.lookup("Mul"), &[1]);
        assert_eq!(map.key_count(), 2);
    }

    #[test]
    fn test_missing_key_is_empty() {
        let map: MultiMap<&str, u32> = MultiMap::new();
        assert!(map.lookup("Sub").is_empty());
        assert_eq!(map.key_count(), 0);
    }

    #[test]
    fn test_keys_sorted() {
        let mut map = MultiMap::new();
        map.add("b", ());
        map.add("a", ());
        map.add("c", ());
        assert_eq!(map.keys().copied().collect::<Vec<_>>(), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_borrowed_lookup_on_owned_keys() {
        let mut map: MultiMap<String, usize> = MultiMap::new();
        map.add("Add".to_string(), 7);
        assert_eq!(map.lookup("Add"), &[7]);
        assert_eq!(map.keys().collect::<Vec<_>>(), vec!["Add"]);
    }
}

//! Insertion-ordered multimap
//!
//! This module provides the adjacency storage used by [`Dag`](super::Dag):
//! a mapping from keys to sets of values where both the keys and the values
//! within each bucket iterate in the order they were first inserted.
//!
//! # Design
//!
//! A vertex with no edges still needs to be *registered* so that queries
//! like "all keys" and "keys with an empty bucket" are well-defined. The
//! multimap therefore separates two notions explicitly:
//!
//! - key presence ("registered"): [`OrderedMultimap::insert_key`],
//!   [`OrderedMultimap::contains_key`]
//! - bindings ("has values"): [`OrderedMultimap::insert`],
//!   [`OrderedMultimap::get`]
//!
//! There is no `Option`-shaped ambiguity between "key absent" and "key
//! present with no values": [`OrderedMultimap::get`] yields an empty
//! iterator in both cases, and [`OrderedMultimap::contains_key`] tells the
//! two apart when the distinction matters.

use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};
use std::hash::Hash;

/// A mapping from keys to insertion-ordered sets of values.
///
/// Keys iterate in first-insertion order, and so do the values within each
/// bucket. Removals preserve the order of everything that remains (shift
/// removal, not swap removal).
///
/// # Examples
///
/// ```
/// use taxis::OrderedMultimap;
///
/// let mut map = OrderedMultimap::new();
/// map.insert("a", 1);
/// map.insert("a", 2);
/// map.insert_key("b");
///
/// assert_eq!(map.get(&"a").copied().collect::<Vec<_>>(), vec![1, 2]);
/// assert_eq!(map.get(&"b").count(), 0);
/// assert!(map.contains_key(&"b"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderedMultimap<K, V>
where
    K: Eq + Hash,
    V: Eq + Hash,
{
    map: IndexMap<K, IndexSet<V>>,
}

impl<K, V> OrderedMultimap<K, V>
where
    K: Eq + Hash,
    V: Eq + Hash,
{
    /// Creates an empty multimap.
    pub fn new() -> Self {
        Self {
            map: IndexMap::new(),
        }
    }

    /// Adds `value` to the bucket of `key`, creating the bucket if the key
    /// was not registered yet.
    ///
    /// Returns `true` if the value was not already bound to the key
    /// (buckets are sets, so duplicates are absorbed).
    pub fn insert(&mut self, key: K, value: V) -> bool {
        self.map.entry(key).or_default().insert(value)
    }

    /// Registers `key` with an empty bucket if it is not present.
    ///
    /// No-op for keys that already exist, whether or not they have values.
    pub fn insert_key(&mut self, key: K) {
        self.map.entry(key).or_default();
    }

    /// Returns the values bound to `key` in insertion order.
    ///
    /// Yields nothing for unregistered keys and for keys with an empty
    /// bucket; use [`contains_key`](Self::contains_key) to tell the two
    /// apart.
    pub fn get(&self, key: &K) -> impl Iterator<Item = &V> + '_ {
        self.map.get(key).into_iter().flatten()
    }

    /// Returns `true` if `key` is registered, with or without values.
    pub fn contains_key(&self, key: &K) -> bool {
        self.map.contains_key(key)
    }

    /// Returns all registered keys in first-insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.map.keys()
    }

    /// Removes `key` and returns everything that was bound to it.
    ///
    /// Returns an empty set if the key was not registered. The insertion
    /// order of the remaining keys is preserved.
    pub fn remove_key(&mut self, key: &K) -> IndexSet<V> {
        self.map.shift_remove(key).unwrap_or_default()
    }

    /// Removes a single binding, keeping `key` registered.
    ///
    /// Returns `true` if the binding existed. The insertion order of the
    /// remaining values in the bucket is preserved.
    pub fn remove(&mut self, key: &K, value: &V) -> bool {
        self.map
            .get_mut(key)
            .is_some_and(|bucket| bucket.shift_remove(value))
    }

    /// Returns the number of registered keys.
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Returns `true` if no keys are registered.
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

impl<K, V> Default for OrderedMultimap<K, V>
where
    K: Eq + Hash,
    V: Eq + Hash,
{
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_creates_bucket() {
        let mut map = OrderedMultimap::new();
        assert!(map.insert("a", 1));
        assert!(map.insert("a", 2));
        assert!(!map.insert("a", 1)); // duplicate absorbed

        assert_eq!(map.get(&"a").copied().collect::<Vec<_>>(), vec![1, 2]);
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn test_insert_key_is_idempotent() {
        let mut map: OrderedMultimap<&str, i32> = OrderedMultimap::new();
        map.insert_key("a");
        map.insert_key("a");

        assert_eq!(map.len(), 1);
        assert!(map.contains_key(&"a"));
        assert_eq!(map.get(&"a").count(), 0);
    }

    #[test]
    fn test_insert_key_keeps_existing_values() {
        let mut map = OrderedMultimap::new();
        map.insert("a", 1);
        map.insert_key("a");

        assert_eq!(map.get(&"a").copied().collect::<Vec<_>>(), vec![1]);
    }

    #[test]
    fn test_get_absent_key_is_empty() {
        let map: OrderedMultimap<&str, i32> = OrderedMultimap::new();
        assert_eq!(map.get(&"missing").count(), 0);
        assert!(!map.contains_key(&"missing"));
    }

    #[test]
    fn test_keys_in_insertion_order() {
        let mut map = OrderedMultimap::new();
        map.insert("c", 1);
        map.insert_key("a");
        map.insert("b", 2);

        assert_eq!(map.keys().copied().collect::<Vec<_>>(), vec!["c", "a", "b"]);
    }

    #[test]
    fn test_remove_key_returns_bindings() {
        let mut map = OrderedMultimap::new();
        map.insert("a", 1);
        map.insert("a", 2);
        map.insert("b", 3);

        let removed = map.remove_key(&"a");
        assert_eq!(removed.iter().copied().collect::<Vec<_>>(), vec![1, 2]);
        assert!(!map.contains_key(&"a"));
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn test_remove_key_absent_is_safe() {
        let mut map: OrderedMultimap<&str, i32> = OrderedMultimap::new();
        assert!(map.remove_key(&"missing").is_empty());
    }

    #[test]
    fn test_remove_single_binding_keeps_key() {
        let mut map = OrderedMultimap::new();
        map.insert("a", 1);
        map.insert("a", 2);
        map.insert("a", 3);

        assert!(map.remove(&"a", &2));
        assert!(!map.remove(&"a", &2));

        assert!(map.contains_key(&"a"));
        assert_eq!(map.get(&"a").copied().collect::<Vec<_>>(), vec![1, 3]);
    }

    #[test]
    fn test_key_order_preserved_after_interior_removal() {
        let mut map = OrderedMultimap::new();
        map.insert("a", 1);
        map.insert("b", 2);
        map.insert("c", 3);

        map.remove_key(&"b");
        assert_eq!(map.keys().copied().collect::<Vec<_>>(), vec!["a", "c"]);
    }
}

use std::borrow::Borrow;
use std::collections::hash_map::RandomState;
use std::collections::HashMap;
use std::fmt::{self, Debug, Display, Formatter};
use std::hash::{BuildHasher, Hash};
use std::iter::{self, FromIterator};
use std::mem;
use std::ops::Index;

use itertools::Itertools;

use super::order_list::{self, NodeHandle, OrderList};

/// The value of an index entry, together with the position of its key in the order list.
#[derive(Clone)]
struct Slot<V> {
    node: NodeHandle,
    value: V,
}

/// A hash map that remembers the order in which its keys were first inserted.
///
/// The keys are indexed by a `HashMap`, which also stores a handle
/// to their node in a linked list recording insertion order.
/// Since removal just unlinks the node behind that handle,
/// `insert`, `get` and `remove` are all amortized `O(1)`.
///
/// Re-inserting a key that's already present only replaces its value,
/// so the key keeps its original position.
/// Every key is stored twice (once in the index and once in the list),
/// so insertion requires `K: Clone`.
///
/// The map isn't internally synchronized,
/// so concurrent access needs to be guarded by a lock.
#[derive(Clone)]
pub struct OrderedMap<K, V, S = RandomState> {
    index: HashMap<K, Slot<V>, S>,
    order: OrderList<K>,
}
impl<K: Eq + Hash, V> OrderedMap<K, V> {
    #[inline]
    pub fn new() -> Self {
        OrderedMap::with_hasher(RandomState::new())
    }
    /// Create an empty map with room for the specified number of keys.
    ///
    /// This is only a hint, and doesn't affect behavior.
    #[inline]
    pub fn with_capacity(capacity: usize) -> Self {
        OrderedMap::with_capacity_and_hasher(capacity, RandomState::new())
    }
}
impl<K: Eq + Hash + Clone, V> OrderedMap<K, V> {
    /// Create a map from the specified pairs, as if by repeatedly calling `insert`.
    ///
    /// If a key is repeated, the later value wins but the key keeps its first position.
    pub fn from_pairs<I>(pairs: I) -> Self where I: IntoIterator<Item = (K, V)> {
        pairs.into_iter().collect()
    }
}
impl<K, V, S> OrderedMap<K, V, S> {
    #[inline]
    pub fn with_hasher(hash_builder: S) -> Self {
        OrderedMap::with_capacity_and_hasher(0, hash_builder)
    }
    #[inline]
    pub fn with_capacity_and_hasher(capacity: usize, hash_builder: S) -> Self {
        OrderedMap {
            index: HashMap::with_capacity_and_hasher(capacity, hash_builder),
            order: OrderList::with_capacity(capacity),
        }
    }
    #[inline]
    pub fn len(&self) -> usize {
        self.index.len()
    }
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }
    #[inline]
    pub fn hasher(&self) -> &S {
        self.index.hasher()
    }
    /// Remove every entry from the map, resetting both the index and the insertion order.
    #[inline]
    pub fn clear(&mut self) {
        self.index.clear();
        self.order.clear();
    }
}
impl<K, V, S> OrderedMap<K, V, S> where K: Eq + Hash, S: BuildHasher {
    #[inline]
    pub fn reserve(&mut self, additional: usize) {
        self.index.reserve(additional);
        self.order.reserve(additional);
    }
    /// Lookup the value associated with the specified key.
    ///
    /// This doesn't affect the insertion order.
    #[inline]
    pub fn get<Q: ?Sized>(&self, key: &Q) -> Option<&V> where K: Borrow<Q>, Q: Hash + Eq {
        self.index.get(key).map(|slot| &slot.value)
    }
    #[inline]
    pub fn get_mut<Q: ?Sized>(&mut self, key: &Q) -> Option<&mut V> where K: Borrow<Q>, Q: Hash + Eq {
        self.index.get_mut(key).map(|slot| &mut slot.value)
    }
    /// Lookup the value associated with the specified key,
    /// falling back to `default` if it's missing.
    #[inline]
    pub fn get_or<'a, Q: ?Sized>(&'a self, key: &Q, default: &'a V) -> &'a V where K: Borrow<Q>, Q: Hash + Eq {
        self.get(key).unwrap_or(default)
    }
    #[inline]
    pub fn contains_key<Q: ?Sized>(&self, key: &Q) -> bool where K: Borrow<Q>, Q: Hash + Eq {
        self.index.contains_key(key)
    }
    /// Remove the specified key from this map, returning its value if it was present.
    ///
    /// The relative order of the remaining keys is unchanged.
    pub fn remove<Q: ?Sized>(&mut self, key: &Q) -> Option<V> where K: Borrow<Q>, Q: Hash + Eq {
        let slot = self.index.remove(key)?;
        debug_assert!(self.order.get(slot.node).is_some(), "Index referenced a vacant node");
        self.order.remove(slot.node);
        Some(slot.value)
    }
    /// Iterate over the entries of the map in insertion order, oldest first.
    #[inline]
    pub fn iter(&self) -> Iter<K, V, S> {
        Iter {
            keys: self.order.iter(),
            index: &self.index,
        }
    }
    /// Invoke the visitor on every entry in insertion order.
    ///
    /// The visitor only receives shared references,
    /// so it can't mutate the map while it's being visited.
    #[inline]
    pub fn for_each<F>(&self, mut visitor: F) where F: FnMut(&K, &V) {
        for (key, value) in self.iter() {
            visitor(key, value);
        }
    }
}
impl<K, V, S> OrderedMap<K, V, S> where K: Eq + Hash + Clone, S: BuildHasher {
    /// Inserts a key-value pair into the map.
    ///
    /// If the key is new, it's appended to the back of the insertion order.
    /// Otherwise only the value is replaced and the previous value is returned,
    /// leaving the key in its original position.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        if let Some(slot) = self.index.get_mut(&key) {
            return Some(mem::replace(&mut slot.value, value));
        }
        let node = self.order.push_back(key.clone());
        self.index.insert(key, Slot { node, value });
        None
    }
    /// A snapshot of the keys in insertion order.
    ///
    /// This is a copy, so later changes to the map don't affect it.
    #[inline]
    pub fn keys(&self) -> Vec<K> {
        self.order.iter().cloned().collect()
    }
}
impl<K, V, S> OrderedMap<K, V, S> where K: Eq + Hash, V: Clone, S: BuildHasher {
    /// A snapshot of the values in the insertion order of their keys.
    #[inline]
    pub fn values(&self) -> Vec<V> {
        self.iter().map(|(_, value)| value.clone()).collect()
    }
}
impl<K, V, S> OrderedMap<K, V, S> where K: Eq + Hash + Clone, V: Clone, S: BuildHasher {
    /// A snapshot of the entries in insertion order.
    #[inline]
    pub fn key_values(&self) -> Vec<(K, V)> {
        self.iter().map(|(key, value)| (key.clone(), value.clone())).collect()
    }
}
impl<K, V, S: Default> Default for OrderedMap<K, V, S> {
    #[inline]
    fn default() -> Self {
        OrderedMap::with_hasher(S::default())
    }
}
/// Two maps are equal if they contain the same entries in the same order.
impl<K, V, S> PartialEq for OrderedMap<K, V, S> where K: Eq + Hash, V: PartialEq, S: BuildHasher {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}
impl<K, V, S> Eq for OrderedMap<K, V, S> where K: Eq + Hash, V: Eq, S: BuildHasher {}
impl<K, V, S> Debug for OrderedMap<K, V, S> where K: Eq + Hash + Debug, V: Debug, S: BuildHasher {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}
/// Renders the map as `map{k1:v1 k2:v2}` in insertion order.
impl<K, V, S> Display for OrderedMap<K, V, S> where K: Eq + Hash + Display, V: Display, S: BuildHasher {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "map{{{}}}", self.iter().format_with(" ", |(key, value), f| {
            f(&format_args!("{}:{}", key, value))
        }))
    }
}
/// Lookup the value of the specified key, panicking if it's missing.
impl<'a, K, Q: ?Sized, V, S> Index<&'a Q> for OrderedMap<K, V, S>
    where K: Eq + Hash + Borrow<Q>, Q: Eq + Hash, S: BuildHasher {
    type Output = V;

    #[inline]
    fn index(&self, key: &Q) -> &V {
        self.get(key).expect("Missing key")
    }
}
impl<K, V, S> FromIterator<(K, V)> for OrderedMap<K, V, S>
    where K: Eq + Hash + Clone, S: BuildHasher + Default {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iterable: I) -> Self {
        let iter = iterable.into_iter();
        let mut result = OrderedMap::with_capacity_and_hasher(iter.size_hint().0, S::default());
        result.extend(iter);
        result
    }
}
impl<K, V, S> Extend<(K, V)> for OrderedMap<K, V, S> where K: Eq + Hash + Clone, S: BuildHasher {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iterable: I) {
        for (key, value) in iterable {
            self.insert(key, value);
        }
    }
}
impl<'a, K, V, S> IntoIterator for &'a OrderedMap<K, V, S> where K: Eq + Hash, S: BuildHasher {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V, S>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
impl<K, V, S> IntoIterator for OrderedMap<K, V, S> where K: Eq + Hash, S: BuildHasher {
    type Item = (K, V);
    type IntoIter = IntoIter<K, V, S>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        IntoIter(self)
    }
}

pub struct Iter<'a, K: 'a, V: 'a, S: 'a> {
    keys: order_list::Iter<'a, K>,
    index: &'a HashMap<K, Slot<V>, S>,
}
impl<'a, K, V, S> Iterator for Iter<'a, K, V, S> where K: Eq + Hash, S: BuildHasher {
    type Item = (&'a K, &'a V);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let key = self.keys.next()?;
        let slot = self.index.get(key)?;
        Some((key, &slot.value))
    }
    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.keys.size_hint()
    }
}
impl<'a, K, V, S> DoubleEndedIterator for Iter<'a, K, V, S> where K: Eq + Hash, S: BuildHasher {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        let key = self.keys.next_back()?;
        let slot = self.index.get(key)?;
        Some((key, &slot.value))
    }
}
impl<'a, K, V, S> ExactSizeIterator for Iter<'a, K, V, S> where K: Eq + Hash, S: BuildHasher {}
impl<'a, K, V, S> iter::FusedIterator for Iter<'a, K, V, S> where K: Eq + Hash, S: BuildHasher {}

/// Consumes the map, yielding its entries oldest first.
pub struct IntoIter<K, V, S>(OrderedMap<K, V, S>);
impl<K, V, S> Iterator for IntoIter<K, V, S> where K: Eq + Hash, S: BuildHasher {
    type Item = (K, V);

    #[inline]
    fn next(&mut self) -> Option<(K, V)> {
        let key = self.0.order.pop_front()?;
        let slot = self.0.index.remove(&key)?;
        Some((key, slot.value))
    }
    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.0.len(), Some(self.0.len()))
    }
}
impl<K, V, S> ExactSizeIterator for IntoIter<K, V, S> where K: Eq + Hash, S: BuildHasher {}
impl<K, V, S> iter::FusedIterator for IntoIter<K, V, S> where K: Eq + Hash, S: BuildHasher {}

#[cfg(test)]
mod test {
    use super::*;
    use crate::collect::SeaHashOrderedMap;

    #[derive(Copy, Clone, Debug, PartialEq)]
    struct Point {
        x: i32,
        y: i32,
    }
    impl Display for Point {
        fn fmt(&self, f: &mut Formatter) -> fmt::Result {
            write!(f, "{{{} {}}}", self.x, self.y)
        }
    }

    fn assert_consistent<K, V, S>(map: &OrderedMap<K, V, S>) where K: Eq + Hash + Clone, V: Clone, S: BuildHasher {
        assert_eq!(map.len(), map.order.len());
        assert_eq!(map.len(), map.keys().len());
        assert_eq!(map.len(), map.values().len());
        assert_eq!(map.len(), map.iter().rev().count());
        assert!(map.order.iter().all(|key| map.index.contains_key(key)));
    }

    #[test]
    fn reinsertion_keeps_position() {
        let mut map = OrderedMap::new();
        assert_eq!(map.insert("p1", Point { x: 1, y: 2 }), None);
        assert_eq!(map.insert("p2", Point { x: 2, y: 4 }), None);
        assert_eq!(map.insert("p3", Point { x: 3, y: 6 }), None);
        assert_eq!(map.insert("p1", Point { x: 0, y: 0 }), Some(Point { x: 1, y: 2 }));
        assert_eq!(map.key_values(), vec![
            ("p1", Point { x: 0, y: 0 }),
            ("p2", Point { x: 2, y: 4 }),
            ("p3", Point { x: 3, y: 6 }),
        ]);
        assert_eq!(map.to_string(), "map{p1:{0 0} p2:{2 4} p3:{3 6}}");
        assert_consistent(&map);
    }

    #[test]
    fn lookup() {
        let map = OrderedMap::from_pairs(vec![("food", 10), ("tacos", 4)]);
        assert_eq!(map.get("food"), Some(&10));
        assert_eq!(map.get("shells"), None);
        assert_eq!(*map.get_or("tacos", &0), 4);
        assert_eq!(*map.get_or("shells", &-1), -1);
        assert!(map.contains_key("tacos"));
        assert!(!map.contains_key("school"));
        // Lookups don't affect the order
        assert_eq!(map.keys(), vec!["food", "tacos"]);
    }

    #[test]
    fn owned_keys_borrowed_lookup() {
        let mut map: OrderedMap<String, u32> = OrderedMap::new();
        map.insert("one".to_owned(), 1);
        map.insert("two".to_owned(), 2);
        *map.get_mut("one").unwrap() += 10;
        assert_eq!(map.get("one"), Some(&11));
        assert_eq!(map.remove("two"), Some(2));
        assert_eq!(map.keys(), vec!["one".to_owned()]);
    }

    #[test]
    fn removal_preserves_relative_order() {
        let mut map: OrderedMap<u32, u32> = (0..10).map(|i| (i, i * i)).collect();
        assert_eq!(map.remove(&0), Some(0));
        assert_eq!(map.remove(&5), Some(25));
        assert_eq!(map.remove(&9), Some(81));
        assert_eq!(map.remove(&5), None);
        assert_eq!(map.keys(), vec![1, 2, 3, 4, 6, 7, 8]);
        assert_eq!(map.values(), vec![1, 4, 9, 16, 36, 49, 64]);
        assert_consistent(&map);
        // Removed keys go to the back when they're re-inserted
        map.insert(5, 0);
        assert_eq!(map.keys(), vec![1, 2, 3, 4, 6, 7, 8, 5]);
        assert_consistent(&map);
    }

    #[test]
    fn missing_removal_is_noop() {
        let mut map = OrderedMap::from_pairs(vec![(1, "a"), (2, "b")]);
        assert_eq!(map.remove(&3), None);
        assert_eq!(map.key_values(), vec![(1, "a"), (2, "b")]);
    }

    #[test]
    fn snapshots_are_detached() {
        let mut map = OrderedMap::from_pairs(vec![("a", 1), ("b", 2)]);
        let keys = map.keys();
        let values = map.values();
        map.insert("c", 3);
        map.remove("a");
        assert_eq!(keys, vec!["a", "b"]);
        assert_eq!(values, vec![1, 2]);
    }

    #[test]
    fn for_each_matches_key_values() {
        let map = OrderedMap::from_pairs(vec![(3, 'c'), (1, 'a'), (2, 'b')]);
        let mut visited = Vec::new();
        map.for_each(|&key, &value| visited.push((key, value)));
        assert_eq!(visited, map.key_values());
    }

    #[test]
    fn clear() {
        let mut map = OrderedMap::from_pairs(vec![("a", 1), ("b", 2)]);
        map.clear();
        assert_eq!(map.len(), 0);
        assert!(map.is_empty());
        assert!(map.keys().is_empty());
        assert!(map.values().is_empty());
        assert!(map.key_values().is_empty());
        assert_eq!(map.to_string(), "map{}");
        map.insert("b", 3);
        assert_eq!(map.key_values(), vec![("b", 3)]);
        assert_consistent(&map);
    }

    #[test]
    fn duplicate_pairs() {
        let map = OrderedMap::from_pairs(vec![("x", 1), ("y", 2), ("x", 3)]);
        assert_eq!(map.key_values(), vec![("x", 3), ("y", 2)]);
    }

    #[test]
    fn equality_is_ordered() {
        let first = OrderedMap::from_pairs(vec![(1, 1), (2, 2)]);
        let second = OrderedMap::from_pairs(vec![(2, 2), (1, 1)]);
        assert_ne!(first, second);
        assert_eq!(first, first.clone());
    }

    #[test]
    fn into_iter_is_ordered() {
        let mut map = OrderedMap::from_pairs(vec![("c", 3), ("a", 1), ("b", 2)]);
        map.remove("a");
        let entries = map.into_iter().collect::<Vec<_>>();
        assert_eq!(entries, vec![("c", 3), ("b", 2)]);
    }

    #[test]
    fn seahash() {
        let mut map = SeaHashOrderedMap::default();
        for i in (0..100u64).rev() {
            map.insert(i, i.to_string());
        }
        assert_eq!(map.keys(), (0..100u64).rev().collect::<Vec<_>>());
        assert_consistent(&map);
    }

    #[test]
    fn debug() {
        let map = OrderedMap::from_pairs(vec![("b", 1), ("a", 2)]);
        assert_eq!(format!("{:?}", map), r#"{"b": 1, "a": 2}"#);
    }
}

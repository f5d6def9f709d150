use std::borrow::Borrow;
use std::collections::hash_map::RandomState;
use std::fmt::{self, Debug, Display, Formatter};
use std::hash::{BuildHasher, Hash};
use std::iter::{self, FromIterator};

use itertools::Itertools;

use super::ordered_map::{self, OrderedMap};

/// A hash set that remembers the order in which its elements were first inserted.
///
/// This is a thin wrapper around an `OrderedMap` with unit values.
#[derive(Clone)]
pub struct OrderedSet<T, S = RandomState>(OrderedMap<T, (), S>);
impl<T: Eq + Hash> OrderedSet<T> {
    #[inline]
    pub fn new() -> Self {
        OrderedSet(OrderedMap::new())
    }
    #[inline]
    pub fn with_capacity(capacity: usize) -> Self {
        OrderedSet(OrderedMap::with_capacity(capacity))
    }
}
impl<T: Eq + Hash + Clone> OrderedSet<T> {
    /// Create a set from the specified elements, ignoring duplicates.
    pub fn from_elements<I>(elements: I) -> Self where I: IntoIterator<Item = T> {
        elements.into_iter().collect()
    }
}
impl<T, S> OrderedSet<T, S> {
    #[inline]
    pub fn with_hasher(hash_builder: S) -> Self {
        OrderedSet(OrderedMap::with_hasher(hash_builder))
    }
    #[inline]
    pub fn with_capacity_and_hasher(capacity: usize, hash_builder: S) -> Self {
        OrderedSet(OrderedMap::with_capacity_and_hasher(capacity, hash_builder))
    }
    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
    #[inline]
    pub fn clear(&mut self) {
        self.0.clear()
    }
}
impl<T: Eq + Hash, S: BuildHasher> OrderedSet<T, S> {
    #[inline]
    pub fn reserve(&mut self, additional: usize) {
        self.0.reserve(additional)
    }
    /// Check if the set contains the specified element.
    #[inline]
    pub fn contains<Q: ?Sized>(&self, value: &Q) -> bool where T: Borrow<Q>, Q: Hash + Eq {
        self.0.contains_key(value)
    }
    /// Remove the specified element from the set,
    /// returning `true` if it was present.
    #[inline]
    pub fn remove<Q: ?Sized>(&mut self, value: &Q) -> bool where T: Borrow<Q>, Q: Hash + Eq {
        self.0.remove(value).is_some()
    }
    /// Iterate over the elements in insertion order, oldest first.
    #[inline]
    pub fn iter(&self) -> Iter<T, S> {
        Iter(self.0.iter())
    }
}
impl<T: Eq + Hash + Clone, S: BuildHasher> OrderedSet<T, S> {
    /// Insert the specified element into the set,
    /// returning `true` if it was successfully added,
    /// and `false` if it was already present.
    ///
    /// Adding a duplicate doesn't change its position.
    #[inline]
    pub fn insert(&mut self, value: T) -> bool {
        self.0.insert(value, ()).is_none()
    }
    /// A snapshot of the elements in insertion order.
    #[inline]
    pub fn elements(&self) -> Vec<T> {
        self.0.keys()
    }
}
impl<T, S: Default> Default for OrderedSet<T, S> {
    #[inline]
    fn default() -> Self {
        OrderedSet::with_hasher(S::default())
    }
}
impl<T: Eq + Hash, S: BuildHasher> PartialEq for OrderedSet<T, S> {
    #[inline]
    fn eq(&self, other: &OrderedSet<T, S>) -> bool {
        self.0 == other.0
    }
}
impl<T: Eq + Hash, S: BuildHasher> Eq for OrderedSet<T, S> {}
impl<T: Eq + Hash + Debug, S: BuildHasher> Debug for OrderedSet<T, S> {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.debug_set()
            .entries(self.iter())
            .finish()
    }
}
/// Renders the set as `set{e1 e2}` in insertion order.
impl<T: Eq + Hash + Display, S: BuildHasher> Display for OrderedSet<T, S> {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "set{{{}}}", self.iter().format(" "))
    }
}
impl<T: Eq + Hash + Clone, S: BuildHasher + Default> FromIterator<T> for OrderedSet<T, S> {
    #[inline]
    fn from_iter<I: IntoIterator<Item = T>>(iterable: I) -> Self {
        OrderedSet(iterable.into_iter().map(|value| (value, ())).collect())
    }
}
impl<T: Eq + Hash + Clone, S: BuildHasher> Extend<T> for OrderedSet<T, S> {
    #[inline]
    fn extend<I: IntoIterator<Item = T>>(&mut self, iterable: I) {
        self.0.extend(iterable.into_iter().map(|value| (value, ())))
    }
}
impl<'a, T: Eq + Hash + 'a, S: BuildHasher + 'a> IntoIterator for &'a OrderedSet<T, S> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T, S>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
impl<T: Eq + Hash, S: BuildHasher> IntoIterator for OrderedSet<T, S> {
    type Item = T;
    type IntoIter = IntoIter<T, S>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        IntoIter(self.0.into_iter())
    }
}

pub struct Iter<'a, T: 'a, S: 'a>(ordered_map::Iter<'a, T, (), S>);
impl<'a, T: Eq + Hash, S: BuildHasher> Iterator for Iter<'a, T, S> {
    type Item = &'a T;

    #[inline]
    fn next(&mut self) -> Option<&'a T> {
        self.0.next().map(|(value, _)| value)
    }
    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.0.size_hint()
    }
}
impl<'a, T: Eq + Hash, S: BuildHasher> DoubleEndedIterator for Iter<'a, T, S> {
    #[inline]
    fn next_back(&mut self) -> Option<&'a T> {
        self.0.next_back().map(|(value, _)| value)
    }
}
impl<'a, T: Eq + Hash, S: BuildHasher> ExactSizeIterator for Iter<'a, T, S> {}
impl<'a, T: Eq + Hash, S: BuildHasher> iter::FusedIterator for Iter<'a, T, S> {}

pub struct IntoIter<T, S>(ordered_map::IntoIter<T, (), S>);
impl<T: Eq + Hash, S: BuildHasher> Iterator for IntoIter<T, S> {
    type Item = T;

    #[inline]
    fn next(&mut self) -> Option<T> {
        self.0.next().map(|(value, ())| value)
    }
    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.0.size_hint()
    }
}
impl<T: Eq + Hash, S: BuildHasher> ExactSizeIterator for IntoIter<T, S> {}
impl<T: Eq + Hash, S: BuildHasher> iter::FusedIterator for IntoIter<T, S> {}

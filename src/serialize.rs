//! Serde support for the ordered collections.
//!
//! Maps serialize as serde maps and sets as serde sequences,
//! both with their length known up front and their contents in insertion order.
//! Deserializing goes through `insert`, so the source order becomes the insertion order.
//!
//! Decoding into an existing container is done with the `DeserializeSeed`
//! implementations on `&mut OrderedMap` and `&mut OrderedSet`.
//! Entries are inserted as soon as they're decoded,
//! so a failure may leave the target partially populated.
use std::fmt::{self, Formatter};
use std::hash::{BuildHasher, Hash};

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde::de::{DeserializeSeed, MapAccess, SeqAccess, Visitor};
use serde::ser::{SerializeMap, SerializeSeq};

use crate::collect::{OrderedMap, OrderedSet};

/// The maximum capacity we'll reserve because of a size hint.
///
/// Binary streams can claim arbitrary lengths,
/// so we only trust them as far as this and grow normally afterwards.
const MAX_RESERVED: usize = 4096;

#[inline]
fn cautious(size_hint: Option<usize>) -> usize {
    size_hint.unwrap_or(0).min(MAX_RESERVED)
}

impl<K, V, H> Serialize for OrderedMap<K, V, H>
    where K: Eq + Hash + Serialize, V: Serialize, H: BuildHasher {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error> where S: Serializer {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (key, value) in self {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}
impl<T, H> Serialize for OrderedSet<T, H> where T: Eq + Hash + Serialize, H: BuildHasher {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error> where S: Serializer {
        let mut seq = serializer.serialize_seq(Some(self.len()))?;
        for item in self {
            seq.serialize_element(item)?;
        }
        seq.end()
    }
}

struct InsertEntries<'a, K: 'a, V: 'a, H: 'a>(&'a mut OrderedMap<K, V, H>);
impl<'de, 'a, K, V, H> Visitor<'de> for InsertEntries<'a, K, V, H>
    where K: Eq + Hash + Clone + Deserialize<'de>, V: Deserialize<'de>, H: BuildHasher {
    type Value = ();

    fn expecting(&self, formatter: &mut Formatter) -> fmt::Result {
        formatter.write_str("an ordered map")
    }
    #[inline]
    fn visit_map<A>(self, mut access: A) -> Result<(), A::Error> where A: MapAccess<'de> {
        self.0.reserve(cautious(access.size_hint()));
        while let Some((key, value)) = access.next_entry()? {
            self.0.insert(key, value);
        }
        Ok(())
    }
}
impl<'de, 'a, K, V, H> DeserializeSeed<'de> for &'a mut OrderedMap<K, V, H>
    where K: Eq + Hash + Clone + Deserialize<'de>, V: Deserialize<'de>, H: BuildHasher {
    type Value = ();

    #[inline]
    fn deserialize<D>(self, deserializer: D) -> Result<(), D::Error> where D: Deserializer<'de> {
        deserializer.deserialize_map(InsertEntries(self))
    }
}
impl<'de, K, V, H> Deserialize<'de> for OrderedMap<K, V, H>
    where K: Eq + Hash + Clone + Deserialize<'de>, V: Deserialize<'de>, H: BuildHasher + Default {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error> where D: Deserializer<'de> {
        let mut result = OrderedMap::default();
        (&mut result).deserialize(deserializer)?;
        Ok(result)
    }
}

struct InsertElements<'a, T: 'a, H: 'a>(&'a mut OrderedSet<T, H>);
impl<'de, 'a, T, H> Visitor<'de> for InsertElements<'a, T, H>
    where T: Eq + Hash + Clone + Deserialize<'de>, H: BuildHasher {
    type Value = ();

    fn expecting(&self, formatter: &mut Formatter) -> fmt::Result {
        formatter.write_str("an ordered set")
    }
    #[inline]
    fn visit_seq<A>(self, mut seq: A) -> Result<(), A::Error> where A: SeqAccess<'de> {
        self.0.reserve(cautious(seq.size_hint()));
        while let Some(element) = seq.next_element()? {
            self.0.insert(element);
        }
        Ok(())
    }
}
impl<'de, 'a, T, H> DeserializeSeed<'de> for &'a mut OrderedSet<T, H>
    where T: Eq + Hash + Clone + Deserialize<'de>, H: BuildHasher {
    type Value = ();

    #[inline]
    fn deserialize<D>(self, deserializer: D) -> Result<(), D::Error> where D: Deserializer<'de> {
        deserializer.deserialize_seq(InsertElements(self))
    }
}
impl<'de, T, H> Deserialize<'de> for OrderedSet<T, H>
    where T: Eq + Hash + Clone + Deserialize<'de>, H: BuildHasher + Default {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error> where D: Deserializer<'de> {
        let mut result = OrderedSet::default();
        (&mut result).deserialize(deserializer)?;
        Ok(result)
    }
}

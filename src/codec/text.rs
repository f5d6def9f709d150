//! The textual codec, which uses JSON objects for maps and JSON arrays for sets.
//!
//! Encoding writes members and elements in insertion order,
//! and decoding inserts them in the order they appear in the source,
//! so the order always survives a round trip.
//! Values are handled by `serde_json`, while map keys go through `TextKey`
//! since object member names always have to be text.
//!
//! Decoding walks the source incrementally, capturing the raw text of each member
//! before decoding it into the value type.
//! When decoding a map the first bad key or value aborts the whole decode,
//! while decoding a set attempts every element before reporting any failures.
//! In both cases whatever was decoded before the failure stays in the target.
use std::fmt::{self, Formatter};
use std::hash::{BuildHasher, Hash};

use serde::{Deserializer, Serialize};
use serde::de::{self, DeserializeOwned, MapAccess, SeqAccess, Visitor};
use serde_json::value::RawValue;

use crate::collect::{OrderedMap, OrderedSet};
use super::{CodecError, TextKey};

/// A container that can be encoded as text and decoded back in place.
pub trait TextCodec {
    fn encode_text(&self) -> Result<String, CodecError>;
    /// Decode the specified text into this container,
    /// inserting its contents after any existing ones.
    fn decode_text(&mut self, text: &str) -> Result<(), CodecError>;
}

/// Encode the container as text.
#[inline]
pub fn to_string<C: TextCodec + ?Sized>(container: &C) -> Result<String, CodecError> {
    container.encode_text()
}
/// Decode a fresh container from the specified text.
#[inline]
pub fn from_str<C: TextCodec + Default>(text: &str) -> Result<C, CodecError> {
    let mut result = C::default();
    result.decode_text(text)?;
    Ok(result)
}
/// Decode the specified text into an existing container.
#[inline]
pub fn decode_into<C: TextCodec + ?Sized>(text: &str, target: &mut C) -> Result<(), CodecError> {
    target.decode_text(text)
}

impl<K, V, S> TextCodec for OrderedMap<K, V, S>
    where K: TextKey + Eq + Hash + Clone, V: Serialize + DeserializeOwned, S: BuildHasher {
    fn encode_text(&self) -> Result<String, CodecError> {
        let mut result = String::with_capacity(2 + self.len() * 16);
        result.push('{');
        for (position, (key, value)) in self.iter().enumerate() {
            if position > 0 {
                result.push(',');
            }
            let member = key.encode_key().map_err(CodecError::InvalidKeyType)?;
            let encoded_value = match ::serde_json::to_string(value) {
                Ok(encoded) => encoded,
                Err(cause) => return Err(CodecError::Member { member: member.into_owned(), cause }),
            };
            match ::serde_json::to_string(&*member) {
                Ok(encoded) => result.push_str(&encoded),
                Err(cause) => return Err(CodecError::Member { member: member.into_owned(), cause }),
            }
            result.push(':');
            result.push_str(&encoded_value);
        }
        result.push('}');
        Ok(result)
    }
    fn decode_text(&mut self, text: &str) -> Result<(), CodecError> {
        let mut failure = None;
        let mut deserializer = ::serde_json::Deserializer::from_str(text);
        let outcome = deserializer.deserialize_map(Members {
            target: self,
            failure: &mut failure,
        }).and_then(|count| deserializer.end().map(|()| count));
        match outcome {
            Ok(count) => {
                trace!("Decoded {} members into an ordered map", count);
                Ok(())
            }
            Err(cause) => Err(failure.unwrap_or(CodecError::Malformed(cause))),
        }
    }
}

/// Inserts the members of an object into a map, in the order they appear.
struct Members<'a, K: 'a, V: 'a, S: 'a> {
    target: &'a mut OrderedMap<K, V, S>,
    /// The key or value failure which aborted the decode, as opposed to a syntax error
    failure: &'a mut Option<CodecError>,
}
impl<'a, K, V, S> Members<'a, K, V, S> {
    fn abort<E: de::Error>(&mut self, failure: CodecError) -> E {
        let error = E::custom(&failure);
        *self.failure = Some(failure);
        error
    }
}
impl<'de, 'a, K, V, S> Visitor<'de> for Members<'a, K, V, S>
    where K: TextKey + Eq + Hash + Clone, V: DeserializeOwned, S: BuildHasher {
    type Value = usize;

    fn expecting(&self, formatter: &mut Formatter) -> fmt::Result {
        formatter.write_str("a JSON object")
    }
    fn visit_map<A>(mut self, mut access: A) -> Result<usize, A::Error> where A: MapAccess<'de> {
        let mut count = 0;
        while let Some(member) = access.next_key::<String>()? {
            let raw = access.next_value::<Box<RawValue>>()?;
            let key = match K::decode_key(&member) {
                Ok(key) => key,
                Err(cause) => return Err(self.abort(CodecError::InvalidKeyType(cause))),
            };
            let value = match ::serde_json::from_str::<V>(raw.get()) {
                Ok(value) => value,
                Err(cause) => return Err(self.abort(CodecError::Member { member, cause })),
            };
            self.target.insert(key, value);
            count += 1;
        }
        Ok(count)
    }
}

impl<T, S> TextCodec for OrderedSet<T, S>
    where T: Eq + Hash + Clone + Serialize + DeserializeOwned, S: BuildHasher {
    fn encode_text(&self) -> Result<String, CodecError> {
        let mut result = String::with_capacity(2 + self.len() * 8);
        result.push('[');
        for (index, element) in self.iter().enumerate() {
            if index > 0 {
                result.push(',');
            }
            match ::serde_json::to_string(element) {
                Ok(encoded) => result.push_str(&encoded),
                Err(cause) => return Err(CodecError::Element { index, cause }),
            }
        }
        result.push(']');
        Ok(result)
    }
    fn decode_text(&mut self, text: &str) -> Result<(), CodecError> {
        let mut rejected = Rejected::default();
        let mut deserializer = ::serde_json::Deserializer::from_str(text);
        let outcome = deserializer.deserialize_seq(Elements {
            target: self,
            rejected: &mut rejected,
        }).and_then(|count| deserializer.end().map(|()| count));
        // Structural errors take precedence over element failures
        let count = outcome.map_err(CodecError::Malformed)?;
        match rejected.first {
            Some((index, cause)) => Err(CodecError::Elements {
                failed: rejected.failed,
                index,
                cause,
            }),
            None => {
                trace!("Decoded {} elements into an ordered set", count);
                Ok(())
            }
        }
    }
}

#[derive(Default)]
struct Rejected {
    failed: usize,
    first: Option<(usize, ::serde_json::Error)>,
}

/// Inserts every element of an array that decodes successfully into a set,
/// recording the ones that don't.
struct Elements<'a, T: 'a, S: 'a> {
    target: &'a mut OrderedSet<T, S>,
    rejected: &'a mut Rejected,
}
impl<'de, 'a, T, S> Visitor<'de> for Elements<'a, T, S>
    where T: Eq + Hash + Clone + DeserializeOwned, S: BuildHasher {
    type Value = usize;

    fn expecting(&self, formatter: &mut Formatter) -> fmt::Result {
        formatter.write_str("a JSON array")
    }
    fn visit_seq<A>(self, mut seq: A) -> Result<usize, A::Error> where A: SeqAccess<'de> {
        let mut index = 0;
        while let Some(raw) = seq.next_element::<Box<RawValue>>()? {
            match ::serde_json::from_str::<T>(raw.get()) {
                Ok(element) => {
                    self.target.insert(element);
                }
                Err(cause) => {
                    debug!("Rejecting element {} of an ordered set: {}", index, cause);
                    self.rejected.failed += 1;
                    if self.rejected.first.is_none() {
                        self.rejected.first = Some((index, cause));
                    }
                }
            }
            index += 1;
        }
        Ok(index)
    }
}

//! Structured logging support for the ordered collections.
//!
//! Both collections are `slog::Value`s, logged in their human-readable form
//! (`map{k:v}` and `set{e}`), which is meant for diagnostics rather than parsing.
//! Wrap a collection in `SerializeValue` to log its serde representation instead.
use std::fmt::{Debug, Display};
use std::hash::{BuildHasher, Hash};

use serde::Serialize;

use crate::collect::{OrderedMap, OrderedSet};

impl<K, V, S> ::slog::Value for OrderedMap<K, V, S>
    where K: Eq + Hash + Display, V: Display, S: BuildHasher {
    #[inline]
    fn serialize(&self, _record: &::slog::Record, key: ::slog::Key, serializer: &mut dyn (::slog::Serializer)) -> ::slog::Result {
        serializer.emit_arguments(key, &format_args!("{}", self))
    }
}
impl<T, S> ::slog::Value for OrderedSet<T, S> where T: Eq + Hash + Display, S: BuildHasher {
    #[inline]
    fn serialize(&self, _record: &::slog::Record, key: ::slog::Key, serializer: &mut dyn (::slog::Serializer)) -> ::slog::Result {
        serializer.emit_arguments(key, &format_args!("{}", self))
    }
}

/// A `slog::Value` which logs its contents as serde data instead of their `Display` form.
///
/// Wrapping a `&OrderedMap` logs it as an object with its keys in insertion order,
/// the same shape the text codec writes, which debug scripts can parse back.
#[derive(Copy, Clone, Debug, serde_derive::Serialize)]
pub struct SerializeValue<T: Debug + Serialize>(pub T);

impl<T: Debug + Serialize> ::slog::Value for SerializeValue<T> {
    #[inline]
    fn serialize(&self, _record: &::slog::Record, key: ::slog::Key, serializer: &mut dyn (::slog::Serializer)) -> ::slog::Result {
        serializer.emit_serde(key, self)
    }
}
impl<T: Debug + Serialize> ::slog::SerdeValue for SerializeValue<T> {
    fn serialize_fallback(&self, key: ::slog::Key, serializer: &mut dyn (::slog::Serializer)) -> ::slog::Result {
        serializer.emit_str(key, &format!("{:?}", self.0))
    }

    #[inline]
    fn as_serde(&self) -> &dyn (::erased_serde::Serialize) {
        self
    }

    fn to_sendable(&self) -> Box<dyn (::slog::SerdeValue) + Send + 'static> {
        let value = ::serde_json::to_value(&self.0)
            .unwrap_or_else(|cause| ::serde_json::Value::String(cause.to_string()));
        Box::new(SerializeValue(value))
    }
}

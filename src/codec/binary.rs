//! The binary stream codec, backed by bincode.
//!
//! A container is written as its length (a `u64`) followed by its contents in insertion order,
//! each key and value (or element) encoded by bincode in turn.
//! Decoding reads exactly that many entries, inserting each one as soon as it's read.
//! This isn't transactional, so a failed decode may leave the target partially populated.
//!
//! The format isn't self-describing, so decoding into a container with different key or value types
//! only fails when the stream doesn't line up with them.
//! Decoding from a slice requires the stream to fill it exactly,
//! which catches the common case of a narrower target type.
//!
//! Lengths are read from the stream before the data behind them,
//! so untrusted input should always be decoded with a `limit`.
use std::io::{ErrorKind as IoErrorKind, Read, Write};

use bincode::{DefaultOptions, Options};
use serde::Serialize;
use serde::de::{DeserializeOwned, DeserializeSeed};

use super::CodecError;

/// The bincode options we always use, before any limit is applied.
///
/// Slices must be consumed entirely.
#[inline]
fn base_options() -> impl Options {
    DefaultOptions::new()
        .with_fixint_encoding()
        .reject_trailing_bytes()
}
/// Readers may have more data behind the container.
#[inline]
fn reader_options() -> impl Options {
    DefaultOptions::new()
        .with_fixint_encoding()
        .allow_trailing_bytes()
}

fn classify(cause: ::bincode::Error) -> CodecError {
    match *cause {
        ::bincode::ErrorKind::Io(io) => {
            if io.kind() == IoErrorKind::UnexpectedEof {
                CodecError::Truncated
            } else {
                io.into()
            }
        }
        other => CodecError::Binary(Box::new(other)),
    }
}

/// Configures the binary codec.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Binary {
    limit: Option<u64>,
}
impl Binary {
    #[inline]
    pub fn new() -> Self {
        Binary { limit: None }
    }
    /// Limit the number of bytes that may be encoded or decoded.
    ///
    /// Exceeding the limit fails with a `Binary` error.
    /// A slice longer than the limit is rejected before anything is decoded.
    #[inline]
    pub fn with_limit(self, limit: u64) -> Self {
        Binary { limit: Some(limit) }
    }
    #[inline]
    pub fn limit(&self) -> Option<u64> {
        self.limit
    }
    pub fn encode<T: Serialize + ?Sized>(&self, value: &T) -> Result<Vec<u8>, CodecError> {
        let result = match self.limit {
            Some(limit) => base_options().with_limit(limit).serialize(value),
            None => base_options().serialize(value),
        };
        let bytes = result.map_err(classify)?;
        trace!("Encoded {} bytes of bincode", bytes.len());
        Ok(bytes)
    }
    pub fn encode_into<W: Write, T: Serialize + ?Sized>(&self, writer: W, value: &T) -> Result<(), CodecError> {
        let result = match self.limit {
            Some(limit) => base_options().with_limit(limit).serialize_into(writer, value),
            None => base_options().serialize_into(writer, value),
        };
        result.map_err(classify)
    }
    fn check_length(&self, bytes: &[u8]) -> Result<(), CodecError> {
        match self.limit {
            Some(limit) if bytes.len() as u64 > limit => {
                debug!("Rejecting {} bytes of bincode over the limit of {}", bytes.len(), limit);
                Err(CodecError::Binary(Box::new(::bincode::ErrorKind::SizeLimit)))
            }
            _ => Ok(()),
        }
    }
    /// Decode a freshly constructed value from the specified bytes.
    pub fn decode<T: DeserializeOwned>(&self, bytes: &[u8]) -> Result<T, CodecError> {
        self.check_length(bytes)?;
        let result = match self.limit {
            Some(limit) => base_options().with_limit(limit).deserialize(bytes),
            None => base_options().deserialize(bytes),
        };
        result.map_err(classify)
    }
    /// Decode the specified bytes into an existing container,
    /// given as a `&mut OrderedMap` or `&mut OrderedSet`.
    pub fn decode_into<'de, C>(&self, bytes: &'de [u8], target: C) -> Result<(), CodecError>
        where C: DeserializeSeed<'de, Value = ()> {
        self.check_length(bytes)?;
        let result = match self.limit {
            Some(limit) => base_options().with_limit(limit).deserialize_seed(target, bytes),
            None => base_options().deserialize_seed(target, bytes),
        };
        result.map_err(classify)
    }
    /// Decode from the specified reader into an existing container,
    /// leaving anything after it unread.
    ///
    /// Without a limit, a hostile stream can claim lengths large enough
    /// to exhaust memory before any data behind them is read.
    pub fn decode_from<R: Read, C>(&self, reader: R, target: C) -> Result<(), CodecError>
        where C: for<'de> DeserializeSeed<'de, Value = ()> {
        let result = match self.limit {
            Some(limit) => reader_options().with_limit(limit).deserialize_from_seed(target, reader),
            None => reader_options().deserialize_from_seed(target, reader),
        };
        result.map_err(classify)
    }
}

/// Encode the value with the default configuration.
#[inline]
pub fn encode<T: Serialize + ?Sized>(value: &T) -> Result<Vec<u8>, CodecError> {
    Binary::new().encode(value)
}
/// Decode a fresh value with the default configuration.
#[inline]
pub fn decode<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, CodecError> {
    Binary::new().decode(bytes)
}
/// Decode into an existing container with the default configuration.
#[inline]
pub fn decode_into<'de, C>(bytes: &'de [u8], target: C) -> Result<(), CodecError>
    where C: DeserializeSeed<'de, Value = ()> {
    Binary::new().decode_into(bytes, target)
}

//! Encoding the ordered collections into textual and binary formats.
//!
//! Both codecs only rely on the public iteration order and on `insert`,
//! so whatever order a container is encoded in is the order it's decoded in.
use std::io::Error as IoError;

pub mod key;
pub mod text;
#[cfg(feature = "bincode")]
pub mod binary;

pub use self::key::{InvalidKey, KeyKind, TextKey};
pub use self::text::TextCodec;
#[cfg(feature = "bincode")]
pub use self::binary::Binary;

#[derive(Debug, Fail)]
pub enum CodecError {
    /// A key couldn't be converted to or from an object member name
    #[fail(display = "invalid key type: {}", _0)]
    InvalidKeyType(#[cause] InvalidKey),
    /// The value of the named member couldn't be encoded or decoded
    #[fail(display = "invalid value for member {:?}: {}", member, cause)]
    Member {
        member: String,
        #[cause]
        cause: ::serde_json::Error,
    },
    /// An element of a set couldn't be encoded
    #[fail(display = "invalid element at index {}: {}", index, cause)]
    Element {
        index: usize,
        #[cause]
        cause: ::serde_json::Error,
    },
    /// Some of the elements of a set couldn't be decoded,
    /// although every element was attempted.
    #[fail(display = "failed to decode {} element(s), first at index {}: {}", failed, index, cause)]
    Elements {
        failed: usize,
        index: usize,
        #[cause]
        cause: ::serde_json::Error,
    },
    /// The text isn't a syntactically valid object or array
    #[fail(display = "malformed text: {}", _0)]
    Malformed(#[cause] ::serde_json::Error),
    /// The binary stream ended before all the entries it claimed were read
    #[fail(display = "premature end of binary stream")]
    Truncated,
    /// The binary stream doesn't match the target's types, has bytes left over,
    /// or exceeds the configured limit
    #[cfg(feature = "bincode")]
    #[fail(display = "invalid binary stream: {}", _0)]
    Binary(#[cause] ::bincode::Error),
    /// The reader behind a binary stream failed
    #[fail(display = "{}", _0)]
    Io(#[cause] IoError),
}
impl CodecError {
    /// Whether the input itself was syntactically invalid,
    /// as opposed to containing a key or value that couldn't be converted.
    #[inline]
    pub fn is_malformed(&self) -> bool {
        match *self {
            CodecError::Malformed(_) | CodecError::Truncated => true,
            _ => false,
        }
    }
}
impl From<IoError> for CodecError {
    #[inline]
    fn from(cause: IoError) -> Self {
        CodecError::Io(cause)
    }
}

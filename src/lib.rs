//! Hash maps and sets that remember the order their keys were first inserted in.
//!
//! Lookups are hash-based, while iteration, display, and both codecs follow insertion order.
//! Overwriting an existing key keeps its original position,
//! and a removed key loses its position entirely.
#[macro_use]
extern crate log;
#[macro_use]
extern crate failure_derive;

#[macro_use]
mod macros;
pub mod collect;
pub mod codec;
pub mod logging;
mod serialize;

pub use self::collect::{OrderedMap, OrderedSet, SeaHashOrderedMap, SeaHashOrderedSet};
pub use self::codec::{CodecError, InvalidKey, KeyKind, TextCodec, TextKey};
#[cfg(feature = "bincode")]
pub use self::codec::Binary;

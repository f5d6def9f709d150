//! The keys which the textual codec can use as object member names.
use std::borrow::Cow;
use std::fmt::{self, Display, Formatter};
use std::rc::Rc;
use std::sync::Arc;

/// The kind of conversion a `TextKey` uses.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum KeyKind {
    /// Native text, used as the member name verbatim
    Text,
    /// A signed or unsigned integer primitive, written as decimal text
    Integer,
    /// Any other type that converts to and from text
    TextConvertible,
}
impl Display for KeyKind {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.write_str(match *self {
            KeyKind::Text => "text",
            KeyKind::Integer => "integer",
            KeyKind::TextConvertible => "text-convertible",
        })
    }
}

/// A key whose text conversion failed.
#[derive(Debug, Fail)]
#[fail(display = "can't convert {:?} as a {} key: {}", text, kind, reason)]
pub struct InvalidKey {
    pub text: String,
    pub kind: KeyKind,
    pub reason: String,
}
impl InvalidKey {
    pub fn new<R: Display>(text: &str, kind: KeyKind, reason: R) -> Self {
        InvalidKey {
            text: text.to_owned(),
            kind,
            reason: reason.to_string(),
        }
    }
}

/// A type that can be used as the key of an ordered map in the textual codec.
///
/// Object member names are always text, so keys need to convert to and from it.
/// This is implemented for the string types and every integer primitive,
/// and `text_key_via_str!` implements it for anything with `Display` and `FromStr`.
pub trait TextKey: Sized {
    const KIND: KeyKind = KeyKind::TextConvertible;

    fn encode_key(&self) -> Result<Cow<str>, InvalidKey>;
    fn decode_key(text: &str) -> Result<Self, InvalidKey>;
}

impl TextKey for String {
    const KIND: KeyKind = KeyKind::Text;

    #[inline]
    fn encode_key(&self) -> Result<Cow<str>, InvalidKey> {
        Ok(Cow::Borrowed(self))
    }
    #[inline]
    fn decode_key(text: &str) -> Result<Self, InvalidKey> {
        Ok(text.to_owned())
    }
}
macro_rules! text_keys {
    ($($target:ty),*) => {$(
        impl TextKey for $target {
            const KIND: KeyKind = KeyKind::Text;

            #[inline]
            fn encode_key(&self) -> Result<Cow<str>, InvalidKey> {
                Ok(Cow::Borrowed(&**self))
            }
            #[inline]
            fn decode_key(text: &str) -> Result<Self, InvalidKey> {
                Ok(text.into())
            }
        }
    )*};
}
text_keys!(Box<str>, Rc<str>, Arc<str>);

macro_rules! integer_keys {
    ($($target:ty),*) => {$(
        impl TextKey for $target {
            const KIND: KeyKind = KeyKind::Integer;

            #[inline]
            fn encode_key(&self) -> Result<Cow<str>, InvalidKey> {
                Ok(Cow::Owned(::itoa::Buffer::new().format(*self).to_owned()))
            }
            #[inline]
            fn decode_key(text: &str) -> Result<Self, InvalidKey> {
                text.parse::<$target>().map_err(|cause| InvalidKey::new(text, KeyKind::Integer, cause))
            }
        }
    )*};
}
integer_keys!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);

/// Implements `TextKey` for the specified types using their `Display` and `FromStr` implementations.
///
/// This is how types other than strings and integers become usable as keys in the textual codec.
#[macro_export]
macro_rules! text_key_via_str {
    ($($target:ty),* $(,)*) => {$(
        impl $crate::codec::TextKey for $target {
            #[inline]
            fn encode_key(&self) -> ::std::result::Result<::std::borrow::Cow<str>, $crate::codec::InvalidKey> {
                ::std::result::Result::Ok(::std::borrow::Cow::Owned(::std::string::ToString::to_string(self)))
            }
            #[inline]
            fn decode_key(text: &str) -> ::std::result::Result<Self, $crate::codec::InvalidKey> {
                text.parse::<$target>().map_err(|cause| $crate::codec::InvalidKey::new(
                    text, $crate::codec::KeyKind::TextConvertible, cause
                ))
            }
        }
    )*};
}

//! `FixedLen`: a key buffer holding exactly its characters.

use core::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::key_string::{terminated_len, KeyString, KeyStringError};
use crate::collections::trie::KeyChar;

/// A key stored as an exact-length slice, with no terminator.
#[derive(Clone, PartialEq, Eq, Hash, Default)]
pub struct FixedLen<C: KeyChar> {
    buf: Vec<C>,
}

impl<C: KeyChar> FixedLen<C> {
    /// Creates an empty key.
    #[inline]
    pub fn new() -> Self {
        Self { buf: Vec::new() }
    }

    /// Copies the first `len` characters of `buf`.
    ///
    /// Returns `None` if `buf` is shorter than `len`.
    pub fn from_prefix(buf: &[C], len: usize) -> Option<Self> {
        buf.get(..len).map(Self::from)
    }

    /// Copies a zero-terminated buffer, failing if it has no terminator.
    pub fn try_from_terminated(buf: &[C]) -> Result<Self, KeyStringError> {
        let len = terminated_len(buf);
        if len == buf.len() {
            return Err(KeyStringError::MissingTerminator);
        }
        Ok(Self::from(&buf[..len]))
    }

    /// Consumes the key, returning its characters.
    #[inline]
    pub fn into_vec(self) -> Vec<C> {
        self.buf
    }
}

impl<C: KeyChar> KeyString<C> for FixedLen<C> {
    fn clear(&mut self) {
        self.buf.clear();
    }

    fn reserve(&mut self, additional: usize) {
        self.buf.reserve_exact(additional);
    }

    fn assign(&mut self, chars: &[C]) {
        self.buf.clear();
        self.buf.extend_from_slice(chars);
    }

    #[inline]
    fn append_char(&mut self, ch: C) {
        self.buf.push(ch);
    }

    #[inline]
    fn as_slice(&self) -> &[C] {
        &self.buf
    }
}

impl<C: KeyChar> AsRef<[C]> for FixedLen<C> {
    #[inline]
    fn as_ref(&self) -> &[C] {
        &self.buf
    }
}

impl<C: KeyChar> From<&[C]> for FixedLen<C> {
    fn from(chars: &[C]) -> Self {
        Self {
            buf: chars.to_vec(),
        }
    }
}

impl<C: KeyChar> From<Vec<C>> for FixedLen<C> {
    fn from(buf: Vec<C>) -> Self {
        Self { buf }
    }
}

impl From<&str> for FixedLen<u8> {
    fn from(s: &str) -> Self {
        Self::from(s.as_bytes())
    }
}

impl From<&str> for FixedLen<char> {
    fn from(s: &str) -> Self {
        s.chars().collect()
    }
}

impl<C: KeyChar> FromIterator<C> for FixedLen<C> {
    fn from_iter<I: IntoIterator<Item = C>>(iter: I) -> Self {
        Self {
            buf: iter.into_iter().collect(),
        }
    }
}

impl<C: KeyChar> fmt::Debug for FixedLen<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("FixedLen").field(&self.buf).finish()
    }
}

impl<C: KeyChar> fmt::Display for FixedLen<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        C::write_key(&self.buf, f)
    }
}

impl<C: KeyChar + Serialize> Serialize for FixedLen<C> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.buf.serialize(serializer)
    }
}

impl<'de, C: KeyChar + Deserialize<'de>> Deserialize<'de> for FixedLen<C> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Vec::<C>::deserialize(deserializer).map(Self::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_len_basic() {
        let mut key = FixedLen::<u8>::new();
        assert!(key.is_empty());
        key.append_char(b'o');
        key.append_char(b'k');
        assert_eq!(key.as_slice(), b"ok");
        assert_eq!(key.len(), 2);

        key.assign(b"replaced");
        assert_eq!(key.at(0), Some(b'r'));
        key.clear();
        assert_eq!(key.len(), 0);
    }

    #[test]
    fn test_fixed_len_from_prefix() {
        let key = FixedLen::from_prefix(b"prefix-and-more", 6).unwrap();
        assert_eq!(key.as_slice(), b"prefix");
        assert!(FixedLen::<u8>::from_prefix(b"ab", 3).is_none());
    }

    #[test]
    fn test_fixed_len_terminated() {
        let key = FixedLen::try_from_terminated(b"head\0junk").unwrap();
        assert_eq!(key.as_slice(), b"head");
        assert_eq!(
            FixedLen::<u8>::try_from_terminated(b"open"),
            Err(KeyStringError::MissingTerminator)
        );
    }
}

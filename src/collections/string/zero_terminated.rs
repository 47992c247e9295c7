//! `ZeroTerminated`: a growable key buffer with a trailing `NUL`.
//!
//! The terminator is part of the backing storage at all times, so
//! [`as_slice_with_nul`](ZeroTerminated::as_slice_with_nul) can hand the
//! buffer to code that expects C-style strings without copying, as long as
//! the key has no interior `NUL`. Cursors reconstruct keys into this shape.

use core::fmt;
use core::hash::{Hash, Hasher};

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::key_string::KeyString;
use super::FixedLen;
use crate::collections::trie::KeyChar;

/// A growable, implicitly zero-terminated key.
#[derive(Clone)]
pub struct ZeroTerminated<C: KeyChar> {
    /// Characters, then a final `C::NUL`. The characters themselves may
    /// contain `NUL`.
    buf: Vec<C>,
}

impl<C: KeyChar> ZeroTerminated<C> {
    /// Creates an empty key.
    #[inline]
    pub fn new() -> Self {
        Self { buf: vec![C::NUL] }
    }

    /// Creates an empty key with room for `capacity` characters.
    pub fn with_capacity(capacity: usize) -> Self {
        let mut buf = Vec::with_capacity(capacity + 1);
        buf.push(C::NUL);
        Self { buf }
    }

    /// Builds a key from `buf` up to its first `NUL`.
    pub fn from_terminated(buf: &[C]) -> Self {
        let mut key = Self::new();
        key.assign_terminated(buf);
        key
    }

    /// The characters followed by the terminator.
    ///
    /// Keys built from a `Vec`, an iterator or a trie path keep any `NUL`
    /// they contain, so the first `NUL` here is not necessarily the end.
    #[inline]
    pub fn as_slice_with_nul(&self) -> &[C] {
        &self.buf
    }

    /// Number of characters the key can hold without reallocating.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.buf.capacity() - 1
    }

    /// Removes and returns the last character.
    pub fn pop_char(&mut self) -> Option<C> {
        if self.buf.len() < 2 {
            return None;
        }
        let end = self.buf.len() - 2;
        let ch = self.buf.remove(end);
        Some(ch)
    }

    /// Consumes the key, returning the characters without the terminator.
    pub fn into_vec(mut self) -> Vec<C> {
        self.buf.pop();
        self.buf
    }
}

impl<C: KeyChar> KeyString<C> for ZeroTerminated<C> {
    fn clear(&mut self) {
        self.buf.clear();
        self.buf.push(C::NUL);
    }

    fn reserve(&mut self, additional: usize) {
        self.buf.reserve(additional);
    }

    fn assign(&mut self, chars: &[C]) {
        self.buf.clear();
        self.buf.reserve(chars.len() + 1);
        self.buf.extend_from_slice(chars);
        self.buf.push(C::NUL);
    }

    #[inline]
    fn append_char(&mut self, ch: C) {
        let end = self.buf.len() - 1;
        self.buf[end] = ch;
        self.buf.push(C::NUL);
    }

    #[inline]
    fn as_slice(&self) -> &[C] {
        &self.buf[..self.buf.len() - 1]
    }
}

impl<C: KeyChar> Default for ZeroTerminated<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: KeyChar> AsRef<[C]> for ZeroTerminated<C> {
    #[inline]
    fn as_ref(&self) -> &[C] {
        self.as_slice()
    }
}

impl<C: KeyChar> PartialEq for ZeroTerminated<C> {
    fn eq(&self, other: &Self) -> bool {
        self.buf == other.buf
    }
}

impl<C: KeyChar> Eq for ZeroTerminated<C> {}

impl<C: KeyChar> PartialEq<[C]> for ZeroTerminated<C> {
    fn eq(&self, other: &[C]) -> bool {
        self.as_slice() == other
    }
}

impl<C: KeyChar> PartialEq<FixedLen<C>> for ZeroTerminated<C> {
    fn eq(&self, other: &FixedLen<C>) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl PartialEq<str> for ZeroTerminated<u8> {
    fn eq(&self, other: &str) -> bool {
        self.as_slice() == other.as_bytes()
    }
}

impl PartialEq<&str> for ZeroTerminated<u8> {
    fn eq(&self, other: &&str) -> bool {
        self.as_slice() == other.as_bytes()
    }
}

impl PartialEq<&str> for ZeroTerminated<char> {
    fn eq(&self, other: &&str) -> bool {
        self.as_slice().iter().copied().eq(other.chars())
    }
}

impl<C: KeyChar> Hash for ZeroTerminated<C> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_slice().hash(state);
    }
}

impl<C: KeyChar> From<&[C]> for ZeroTerminated<C> {
    fn from(chars: &[C]) -> Self {
        let mut key = Self::new();
        key.assign(chars);
        key
    }
}

impl<C: KeyChar> From<Vec<C>> for ZeroTerminated<C> {
    fn from(mut buf: Vec<C>) -> Self {
        buf.push(C::NUL);
        Self { buf }
    }
}

impl<C: KeyChar> From<FixedLen<C>> for ZeroTerminated<C> {
    fn from(key: FixedLen<C>) -> Self {
        Self::from(key.into_vec())
    }
}

impl From<&str> for ZeroTerminated<u8> {
    fn from(s: &str) -> Self {
        Self::from(s.as_bytes())
    }
}

impl From<&str> for ZeroTerminated<char> {
    fn from(s: &str) -> Self {
        s.chars().collect()
    }
}

impl From<&str> for ZeroTerminated<u16> {
    fn from(s: &str) -> Self {
        s.encode_utf16().collect()
    }
}

impl<C: KeyChar> FromIterator<C> for ZeroTerminated<C> {
    fn from_iter<I: IntoIterator<Item = C>>(iter: I) -> Self {
        Self::from(iter.into_iter().collect::<Vec<C>>())
    }
}

impl<C: KeyChar> fmt::Debug for ZeroTerminated<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ZeroTerminated").field(&self.as_slice()).finish()
    }
}

impl<C: KeyChar> fmt::Display for ZeroTerminated<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        C::write_key(self.as_slice(), f)
    }
}

impl<C: KeyChar + Serialize> Serialize for ZeroTerminated<C> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.as_slice())
    }
}

impl<'de, C: KeyChar + Deserialize<'de>> Deserialize<'de> for ZeroTerminated<C> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Vec::<C>::deserialize(deserializer).map(Self::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_terminated_append() {
        let mut key = ZeroTerminated::<u8>::new();
        assert!(key.is_empty());
        assert_eq!(key.as_slice_with_nul(), &[0]);

        key.append_char(b'a');
        key.append_char(b'b');
        assert_eq!(key.len(), 2);
        assert_eq!(key.as_slice(), b"ab");
        assert_eq!(key.as_slice_with_nul(), b"ab\0");
        assert_eq!(key.at(1), Some(b'b'));
        assert_eq!(key.at(2), None);

        assert_eq!(key.pop_char(), Some(b'b'));
        assert_eq!(key.as_slice_with_nul(), b"a\0");
    }

    #[test]
    fn test_zero_terminated_assign() {
        let mut key = ZeroTerminated::<u8>::from("first");
        key.assign(b"second");
        assert_eq!(key, "second");

        key.assign_terminated(b"cut\0tail");
        assert_eq!(key, "cut");

        key.clear();
        assert!(key.is_empty());
        assert_eq!(key.as_slice_with_nul(), &[0]);
    }

    #[test]
    fn test_zero_terminated_try_at() {
        let key = ZeroTerminated::<char>::from("ёж");
        assert_eq!(key.try_at(0), Ok('ё'));
        assert_eq!(
            key.try_at(5),
            Err(crate::collections::string::KeyStringError::IndexOutOfBounds { index: 5, len: 2 })
        );
    }

    #[test]
    fn test_zero_terminated_display() {
        assert_eq!(ZeroTerminated::<char>::from("альфа").to_string(), "альфа");
        assert_eq!(ZeroTerminated::<u16>::from("beta").to_string(), "beta");
        assert_eq!(ZeroTerminated::<u8>::from("gamma").to_string(), "gamma");
    }

    #[test]
    fn test_zero_terminated_into_vec() {
        let key = ZeroTerminated::<u8>::from("xy");
        assert_eq!(key.into_vec(), b"xy".to_vec());
    }

    #[test]
    fn test_zero_terminated_interior_nul() {
        let key = ZeroTerminated::<u8>::from(b"a\0b".to_vec());
        assert_eq!(key.len(), 3);
        assert_eq!(key.as_slice_with_nul(), b"a\0b\0");
        assert_eq!(key.at(1), Some(0));
    }
}

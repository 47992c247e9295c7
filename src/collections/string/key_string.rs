//! The `KeyString` capability shared by both key buffer shapes.

use core::fmt;

use crate::collections::trie::KeyChar;

/// Errors reported by the checked key buffer accessors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyStringError {
    /// `index` was not below the key length.
    IndexOutOfBounds {
        /// The requested position.
        index: usize,
        /// The key length at the time of the request.
        len: usize,
    },
    /// A zero-terminated source buffer contained no `NUL`.
    MissingTerminator,
}

impl fmt::Display for KeyStringError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::IndexOutOfBounds { index, len } => {
                write!(f, "key index {index} out of bounds for length {len}")
            }
            Self::MissingTerminator => f.write_str("buffer has no NUL terminator"),
        }
    }
}

impl std::error::Error for KeyStringError {}

/// A mutable sequence of key characters.
///
/// Implemented by [`ZeroTerminated`](super::ZeroTerminated) (growable, always
/// followed by a hidden `NUL`) and [`FixedLen`](super::FixedLen) (exact
/// length). The trie itself only reads keys through `AsRef<[C]>`, so either
/// shape, a slice, or a string literal can be passed to its operations.
pub trait KeyString<C: KeyChar>: AsRef<[C]> {
    /// Removes every character.
    fn clear(&mut self);

    /// Reserves room for at least `additional` more characters.
    fn reserve(&mut self, additional: usize);

    /// Replaces the contents with `chars`.
    fn assign(&mut self, chars: &[C]);

    /// Appends one character.
    fn append_char(&mut self, ch: C);

    /// The characters, without any terminator.
    fn as_slice(&self) -> &[C];

    /// Replaces the contents with `buf` up to, not including, its first `NUL`.
    ///
    /// A buffer without a `NUL` is taken whole.
    fn assign_terminated(&mut self, buf: &[C]) {
        self.assign(&buf[..terminated_len(buf)]);
    }

    /// Number of characters.
    #[inline]
    fn len(&self) -> usize {
        self.as_slice().len()
    }

    /// Returns `true` if there are no characters.
    #[inline]
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The character at `index`, if any.
    #[inline]
    fn at(&self, index: usize) -> Option<C> {
        self.as_slice().get(index).copied()
    }

    /// Like [`at`](KeyString::at), reporting the failing index.
    fn try_at(&self, index: usize) -> Result<C, KeyStringError> {
        self.at(index).ok_or(KeyStringError::IndexOutOfBounds {
            index,
            len: self.len(),
        })
    }
}

/// Length of `buf` up to its first `NUL`, or the whole buffer.
#[inline]
pub(crate) fn terminated_len<C: KeyChar>(buf: &[C]) -> usize {
    buf.iter().position(|&ch| ch == C::NUL).unwrap_or(buf.len())
}

//! Character types and ordering strategies for [`CharTrie`](super::CharTrie).
//!
//! Every place the trie orders two characters, or asks whether two characters
//! land in the same slot of a sibling chain, goes through a [`CharOrder`]. Two
//! characters are *equivalent* when neither orders before the other, so a
//! case-insensitive order makes `'a'` and `'A'` share one node.

use core::cmp::Ordering;
use core::fmt::{self, Debug, Write};
use core::hash::Hash;

/// A single code unit of a trie key.
///
/// `NUL` is reserved: the synthetic root node carries it and key reconstruction
/// skips it.
pub trait KeyChar: Copy + Ord + Hash + Debug {
    /// The zero code unit.
    const NUL: Self;

    /// Simple lowercase mapping used by [`CaseInsensitive`].
    ///
    /// Characters whose lowercase form does not fit in a single code unit are
    /// returned unchanged.
    fn fold_case(self) -> Self;

    /// Renders a key made of these code units.
    fn write_key(key: &[Self], f: &mut fmt::Formatter<'_>) -> fmt::Result;
}

impl KeyChar for u8 {
    const NUL: Self = 0;

    #[inline]
    fn fold_case(self) -> Self {
        self.to_ascii_lowercase()
    }

    fn write_key(key: &[Self], f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&String::from_utf8_lossy(key))
    }
}

impl KeyChar for u16 {
    const NUL: Self = 0;

    fn fold_case(self) -> Self {
        if self < 0x80 {
            return u16::from((self as u8).to_ascii_lowercase());
        }
        match char::from_u32(u32::from(self)).map(single_lowercase) {
            Some(Some(lower)) => u16::try_from(u32::from(lower)).unwrap_or(self),
            _ => self,
        }
    }

    fn write_key(key: &[Self], f: &mut fmt::Formatter<'_>) -> fmt::Result {
        char::decode_utf16(key.iter().copied())
            .try_for_each(|r| f.write_char(r.unwrap_or(char::REPLACEMENT_CHARACTER)))
    }
}

impl KeyChar for char {
    const NUL: Self = '\0';

    fn fold_case(self) -> Self {
        if self.is_ascii() {
            return self.to_ascii_lowercase();
        }
        single_lowercase(self).unwrap_or(self)
    }

    fn write_key(key: &[Self], f: &mut fmt::Formatter<'_>) -> fmt::Result {
        key.iter().try_for_each(|&ch| f.write_char(ch))
    }
}

fn single_lowercase(ch: char) -> Option<char> {
    let mut lower = ch.to_lowercase();
    match (lower.next(), lower.next()) {
        (Some(l), None) => Some(l),
        _ => None,
    }
}

/// A strict weak ordering over key characters.
///
/// Implementors only provide [`less`](CharOrder::less); equivalence and the
/// three-way comparison are derived from it.
pub trait CharOrder<C: KeyChar> {
    /// Returns `true` if `a` orders strictly before `b`.
    fn less(&self, a: C, b: C) -> bool;

    /// Like [`less`](CharOrder::less), but identical code units are never less.
    #[inline]
    fn is_less(&self, a: C, b: C) -> bool {
        a != b && self.less(a, b)
    }

    /// Returns `true` if `a` and `b` occupy the same trie slot.
    #[inline]
    fn is_equivalent(&self, a: C, b: C) -> bool {
        a == b || (!self.less(a, b) && !self.less(b, a))
    }

    /// Three-way comparison derived from [`less`](CharOrder::less).
    #[inline]
    fn compare(&self, a: C, b: C) -> Ordering {
        if self.is_less(a, b) {
            Ordering::Less
        } else if self.is_equivalent(a, b) {
            Ordering::Equal
        } else {
            Ordering::Greater
        }
    }

    /// Lexicographic comparison of two keys under this ordering.
    fn compare_keys(&self, a: &[C], b: &[C]) -> Ordering {
        for (&x, &y) in a.iter().zip(b) {
            match self.compare(x, y) {
                Ordering::Equal => continue,
                other => return other,
            }
        }
        a.len().cmp(&b.len())
    }
}

/// Orders characters by their lowercase form. The default strategy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CaseInsensitive;

impl<C: KeyChar> CharOrder<C> for CaseInsensitive {
    #[inline]
    fn less(&self, a: C, b: C) -> bool {
        a.fold_case() < b.fold_case()
    }
}

/// Orders characters by code unit value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CaseSensitive;

impl<C: KeyChar> CharOrder<C> for CaseSensitive {
    #[inline]
    fn less(&self, a: C, b: C) -> bool {
        a < b
    }
}

/// Adapts a `less(a, b)` closure into a [`CharOrder`].
///
/// ```rust
/// use chartrie::collections::trie::{CharOrder, FnOrder};
///
/// // Reverse code unit order.
/// let order = FnOrder(|a: u8, b: u8| a > b);
/// assert!(order.is_less(b'z', b'a'));
/// ```
#[derive(Clone, Copy, Default)]
pub struct FnOrder<F>(pub F);

impl<C, F> CharOrder<C> for FnOrder<F>
where
    C: KeyChar,
    F: Fn(C, C) -> bool,
{
    #[inline]
    fn less(&self, a: C, b: C) -> bool {
        (self.0)(a, b)
    }
}

impl<F> Debug for FnOrder<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("FnOrder(..)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fold_case() {
        assert_eq!(b'Q'.fold_case(), b'q');
        assert_eq!(b'7'.fold_case(), b'7');
        assert_eq!('Ж'.fold_case(), 'ж');
        assert_eq!(0x0416u16.fold_case(), 0x0436u16);
        assert_eq!(u16::from(b'A').fold_case(), u16::from(b'a'));
        // 'İ' lowercases to two chars; left alone.
        assert_eq!('İ'.fold_case(), 'İ');
    }

    #[test]
    fn test_case_insensitive_equivalence() {
        let order = CaseInsensitive;
        assert!(order.is_equivalent(b'a', b'A'));
        assert!(!order.is_less(b'a', b'A'));
        assert!(!order.is_less(b'A', b'a'));
        assert!(order.is_less(b'A', b'b'));
        assert_eq!(order.compare('Л', 'л'), Ordering::Equal);
        assert_eq!(order.compare('м', 'Л'), Ordering::Greater);
    }

    #[test]
    fn test_case_sensitive() {
        let order = CaseSensitive;
        assert!(order.is_less(b'A', b'a'));
        assert!(!order.is_equivalent(b'A', b'a'));
    }

    #[test]
    fn test_compare_keys() {
        let order = CaseInsensitive;
        assert_eq!(order.compare_keys(b"alfa", b"ALFA"), Ordering::Equal);
        assert_eq!(order.compare_keys(b"alf", b"alfa"), Ordering::Less);
        assert_eq!(order.compare_keys(b"beta", b"Alfb"), Ordering::Greater);
    }

    #[test]
    fn test_fn_order() {
        let order = FnOrder(|a: char, b: char| a > b);
        assert!(order.is_less('z', 'a'));
        assert_eq!(order.compare('a', 'a'), Ordering::Equal);
    }
}

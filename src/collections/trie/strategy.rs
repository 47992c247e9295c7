//! `proptest` strategies for trie keys.
//!
//! Keys drawn from a small alphabet share prefixes often, which is where the
//! sibling-chain and cascade-removal paths get exercised.

use proptest::collection::vec;
use proptest::prelude::*;

use crate::collections::string::ZeroTerminated;

/// Byte keys of up to `max_len` characters over `a`..=`d` in both cases.
pub fn mixed_case_bytes(max_len: usize) -> impl Strategy<Value = Vec<u8>> {
    vec(
        prop_oneof![b'a'..=b'd', b'A'..=b'D'],
        0..=max_len,
    )
}

/// Byte keys of up to `max_len` characters over the full printable ASCII range.
pub fn printable_bytes(max_len: usize) -> impl Strategy<Value = Vec<u8>> {
    vec(0x20u8..0x7f, 0..=max_len)
}

/// `char` keys over a few Latin and Cyrillic letters, both cases.
pub fn cyrillic_chars(max_len: usize) -> impl Strategy<Value = Vec<char>> {
    vec(
        prop_oneof![
            Just('а'),
            Just('А'),
            Just('б'),
            Just('Б'),
            Just('ё'),
            Just('я'),
            Just('a'),
            Just('Z'),
        ],
        0..=max_len,
    )
}

/// Zero-terminated byte keys built from [`mixed_case_bytes`].
pub fn zero_terminated_bytes(max_len: usize) -> impl Strategy<Value = ZeroTerminated<u8>> {
    mixed_case_bytes(max_len).prop_map(ZeroTerminated::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collections::string::KeyString;
    use crate::collections::trie::CharTrie;

    proptest! {
        #[test]
        fn test_generated_keys_round_trip(keys in vec(zero_terminated_bytes(6), 0..20)) {
            let trie: CharTrie<u8, usize> = keys.iter().enumerate().map(|(i, k)| (k, i)).collect();
            for key in &keys {
                prop_assert!(key.len() <= 6);
                prop_assert!(trie.get(key).is_some() || key.is_empty());
            }
        }

        #[test]
        fn test_cyrillic_keys_fold(key in cyrillic_chars(8)) {
            let mut trie = CharTrie::<char, i32>::new();
            trie.insert(&key, 1);
            let upper: Vec<char> = key.iter().flat_map(|c| c.to_uppercase()).collect();
            if !key.is_empty() && upper.len() == key.len() {
                prop_assert_eq!(trie.find(&upper), 1);
            }
        }

        #[test]
        fn test_printable_bytes_sorted(keys in vec(printable_bytes(4), 1..20)) {
            let trie: CharTrie<u8, ()> = keys.iter().map(|k| (k, ())).collect();
            let listed: Vec<Vec<u8>> = trie.keys().map(|k| k.as_slice().to_ascii_lowercase()).collect();
            let mut sorted = listed.clone();
            sorted.sort();
            sorted.dedup();
            prop_assert_eq!(listed, sorted);
        }
    }
}

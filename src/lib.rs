//! # `chartrie` - Ordered Character Trie
//!
//! An ordered map from character sequences to values, stored as a
//! first-child/next-sibling trie whose sibling order and key-character
//! equivalence are set by a pluggable strategy.
//!
//! ## Key Features
//!
//! - **Pluggable ordering**: case-insensitive by default, case-sensitive, or any
//!   strict weak ordering supplied as a closure
//! - **Generic characters**: keys over `u8`, `u16` or `char`
//! - **Arena nodes**: no recursion on teardown, freed slots are reused, and
//!   node handles detect when they have gone stale
//! - **Cursors**: ordered depth-first traversal that skips value-less path nodes
//!   and rebuilds keys on demand
//!
//! ## Architecture
//!
//! ### Core Abstractions
//!
//! 1. **Key strings** (`ZeroTerminated<C>`, `FixedLen<C>`):
//!    - Two buffer shapes behind one `KeyString` trait
//!    - Interchangeable as trie keys through `AsRef<[C]>`
//!
//! 2. **Ordering** (`CharOrder<C>`):
//!    - One required `less` predicate
//!    - Equivalence and three-way comparison derived from it
//!
//! 3. **Trie** (`CharTrie<C, V, O>`):
//!    - Sorted sibling chains per level
//!    - Rotate-and-relabel of the level head, so a parent's child link never moves
//!    - Prefix removal drops the whole subtree
//!
//! ## Example
//!
//! ```rust
//! use chartrie::CharTrie;
//!
//! let mut trie = CharTrie::<char, i32>::new();
//! trie.insert(['б', 'е', 'т', 'а'], 2);
//! trie.insert(['А', 'л', 'ь', 'ф', 'а'], 1);
//!
//! assert_eq!(trie.find(['а', 'Л', 'Ь', 'Ф', 'А']), 1);
//! assert!(trie.remove(['б', 'е', 'т']));
//! assert_eq!(trie.len(), 1);
//! ```

#![warn(missing_docs, clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

#[macro_use]
mod macros;

pub mod collections;

pub use collections::string::{FixedLen, KeyString, KeyStringError, ZeroTerminated};
pub use collections::trie::{
    CaseInsensitive, CaseSensitive, CharOrder, CharTrie, Cursor, CursorMut, FnOrder, KeyChar, NodeId, NodeRef,
    Sentinel,
};

// Layout checks for the types every trie operation touches.
const _: () = {
    use core::mem;

    // Handles are two words of u32.
    assert!(mem::size_of::<NodeId>() == 8);

    // Ordering strategies are ZSTs.
    assert!(mem::size_of::<CaseInsensitive>() == 0);
    assert!(mem::size_of::<CaseSensitive>() == 0);
};

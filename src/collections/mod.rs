//! Collections provided by the crate.
//!
//! - `string`: key buffers in zero-terminated and fixed-length shapes
//! - `trie`: the character trie and its cursors

pub mod string;
pub mod trie;

pub use string::{FixedLen, KeyString, KeyStringError, ZeroTerminated};
pub use trie::{CaseInsensitive, CaseSensitive, CharOrder, CharTrie, FnOrder, KeyChar};

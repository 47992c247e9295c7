//! Character trie with first-child/next-sibling nodes.
//!
//! Every level of the trie is a sorted sibling chain. The order of a chain,
//! and which characters count as the same key character, is decided by a
//! [`CharOrder`] strategy; the default is [`CaseInsensitive`].
//!
//! Nodes live in an arena and are addressed by index, so teardown of large
//! subtrees never recurses and freed slots are reused by later inserts.

pub mod iter;
pub mod map;
pub mod node;
pub mod order;
pub mod sentinel;
#[cfg(feature = "proptest")]
pub mod strategy;

pub use iter::{Cursor, CursorMut, Iter, Keys, Values};
pub use map::CharTrie;
pub use node::{NodeId, NodeRef};
pub use order::{CaseInsensitive, CaseSensitive, CharOrder, FnOrder, KeyChar};
pub use sentinel::Sentinel;

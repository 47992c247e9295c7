//! Key buffers consumed and produced by the trie.
//!
//! Two independent shapes implement the [`KeyString`] capability; callers pick
//! the one that suits them:
//! - [`ZeroTerminated`]: growable, backed by a buffer that always ends in `NUL`.
//! - [`FixedLen`]: exact-length storage with no terminator.

pub mod fixed_len;
pub mod key_string;
pub mod zero_terminated;

pub use fixed_len::FixedLen;
pub use key_string::{KeyString, KeyStringError};
pub use zero_terminated::ZeroTerminated;

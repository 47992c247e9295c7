//! Cursors and iterators over a [`CharTrie`](super::CharTrie).

use core::cell::OnceCell;
use core::cmp::Ordering;
use core::fmt;

use super::map::CharTrie;
use super::node::{Link, NodeArena, NodeId, NodeRef};
use super::order::{CaseInsensitive, CharOrder, KeyChar};
use crate::collections::string::{KeyString, ZeroTerminated};

/// One level of a cursor path.
#[derive(Debug, Clone, Copy)]
struct Frame {
    index: u32,
    /// Whether the walk still has to try this node's children.
    descend: bool,
}

impl Frame {
    #[inline]
    fn fresh(index: u32) -> Self {
        Self {
            index,
            descend: true,
        }
    }

    #[inline]
    fn visited(index: u32) -> Self {
        Self {
            index,
            descend: false,
        }
    }
}

/// Stack of nodes from the root to the cursor position; empty means end.
///
/// Both cursor flavors drive the same walk through this type.
#[derive(Debug, Clone, Default)]
pub(crate) struct Path {
    frames: Vec<Frame>,
}

impl Path {
    /// Positioned on the smallest valued key under `root`.
    pub(crate) fn begin<C: KeyChar, V>(nodes: &NodeArena<C, V>, root: Link) -> Self {
        let mut path = Self {
            frames: root.map(Frame::fresh).into_iter().collect(),
        };
        path.advance(nodes);
        path
    }

    /// Positioned on the last node of `indices` (root first). Ancestors are
    /// marked as visited so advancing continues after the last node's subtree
    /// instead of walking back into it.
    pub(crate) fn from_nodes(indices: Vec<u32>) -> Self {
        let last = indices.len().saturating_sub(1);
        let frames = indices
            .into_iter()
            .enumerate()
            .map(|(depth, index)| Frame {
                index,
                descend: depth == last,
            })
            .collect();
        Self { frames }
    }

    /// Positioned on the first valued key not less than `key`.
    pub(crate) fn seek<C: KeyChar, V, O: CharOrder<C>>(trie: &CharTrie<C, V, O>, key: &[C]) -> Self {
        let nodes = &trie.nodes;
        let Some(root) = trie.root else {
            return Self::default();
        };
        let mut path = Self {
            frames: vec![Frame::visited(root)],
        };

        let mut current = root;
        for &ch in key {
            let mut last_smaller = None;
            let mut found = None;
            for index in nodes.siblings(nodes.node(current).child) {
                match trie.order.compare(nodes.node(index).ch, ch) {
                    Ordering::Less => last_smaller = Some(index),
                    ordering => {
                        found = Some((index, ordering));
                        break;
                    }
                }
            }

            match found {
                Some((index, Ordering::Equal)) => {
                    path.frames.push(Frame::visited(index));
                    current = index;
                }
                Some((index, _)) => {
                    // Everything from `index` on sorts after `key`.
                    path.frames.push(Frame::fresh(index));
                    path.settle(nodes);
                    return path;
                }
                None => {
                    // Everything at this level sorts before `key`.
                    path.frames.extend(last_smaller.map(Frame::visited));
                    path.advance(nodes);
                    return path;
                }
            }
        }

        // `key` itself is on the path; it counts only if it holds a value.
        if let Some(top) = path.frames.last_mut() {
            top.descend = true;
        }
        path.settle(nodes);
        path
    }

    #[inline]
    pub(crate) fn is_end(&self) -> bool {
        self.frames.is_empty()
    }

    #[inline]
    pub(crate) fn top(&self) -> Option<u32> {
        self.frames.last().map(|frame| frame.index)
    }

    /// Stays put on a valued node, otherwise advances.
    fn settle<C: KeyChar, V>(&mut self, nodes: &NodeArena<C, V>) {
        match self.top() {
            Some(index) if nodes.node(index).value.is_some() => {}
            Some(_) => self.advance(nodes),
            None => {}
        }
    }

    /// Moves to the next valued node in depth-first pre-order.
    ///
    /// Value-less nodes are walked through but never stopped on. A node left
    /// by climbing back to it is not stopped on either, since it was already
    /// passed on the way down.
    pub(crate) fn advance<C: KeyChar, V>(&mut self, nodes: &NodeArena<C, V>) {
        loop {
            let Some(top) = self.frames.last_mut() else {
                return;
            };
            let node = nodes.node(top.index);

            let reached = if let Some(child) = node.child.filter(|_| top.descend) {
                top.descend = false;
                self.frames.push(Frame::fresh(child));
                child
            } else if let Some(next) = node.next {
                *top = Frame::fresh(next);
                next
            } else {
                self.frames.pop();
                continue;
            };

            if nodes.node(reached).value.is_some() {
                return;
            }
        }
    }

    /// Concatenates the characters on the path, skipping the root.
    pub(crate) fn key<C: KeyChar, V>(&self, nodes: &NodeArena<C, V>) -> ZeroTerminated<C> {
        let mut key = ZeroTerminated::with_capacity(self.frames.len());
        for frame in self.frames.iter().skip(1) {
            key.append_char(nodes.node(frame.index).ch);
        }
        key
    }

    fn same_nodes(&self, other: &Self) -> bool {
        self.frames.len() == other.frames.len()
            && self
                .frames
                .iter()
                .zip(&other.frames)
                .all(|(a, b)| a.index == b.index)
    }
}

/// A read-only position in a [`CharTrie`].
///
/// Obtained from [`CharTrie::begin`], [`CharTrie::lower_bound`] or
/// [`CharTrie::seek`]. The key at the position is rebuilt from the path on
/// first request and cached until the cursor moves.
pub struct Cursor<'a, C: KeyChar, V, O = CaseInsensitive> {
    trie: &'a CharTrie<C, V, O>,
    path: Path,
    key: OnceCell<ZeroTerminated<C>>,
}

impl<'a, C: KeyChar, V, O: CharOrder<C>> Cursor<'a, C, V, O> {
    pub(crate) fn new(trie: &'a CharTrie<C, V, O>, path: Path) -> Self {
        Self {
            trie,
            path,
            key: OnceCell::new(),
        }
    }

    /// Returns true past the last key.
    #[inline]
    pub fn is_end(&self) -> bool {
        self.path.is_end()
    }

    /// Moves to the next key holding a value.
    pub fn advance(&mut self) {
        self.path.advance(&self.trie.nodes);
        self.key.take();
    }

    /// The key at the cursor.
    pub fn key(&self) -> Option<&ZeroTerminated<C>> {
        if self.is_end() {
            return None;
        }
        Some(self.key.get_or_init(|| self.path.key(&self.trie.nodes)))
    }

    /// The value at the cursor. `None` at the end, and on a value-less node a
    /// [`lower_bound`](CharTrie::lower_bound) cursor may start on.
    pub fn value(&self) -> Option<&'a V> {
        let trie = self.trie;
        trie.nodes.node(self.path.top()?).value.as_ref()
    }

    /// The node at the cursor.
    pub fn node(&self) -> Option<NodeRef<'a, C, V>> {
        let trie = self.trie;
        let index = self.path.top()?;
        Some(NodeRef {
            id: trie.nodes.id_of(index),
            node: trie.nodes.node(index),
        })
    }

    /// Handle of the node at the cursor.
    pub fn node_id(&self) -> Option<NodeId> {
        self.path.top().map(|index| self.trie.nodes.id_of(index))
    }

    fn take_key(&mut self) -> ZeroTerminated<C> {
        match self.key.take() {
            Some(key) => key,
            None => self.path.key(&self.trie.nodes),
        }
    }
}

impl<C: KeyChar, V, O> Clone for Cursor<'_, C, V, O> {
    fn clone(&self) -> Self {
        Self {
            trie: self.trie,
            path: self.path.clone(),
            key: self.key.clone(),
        }
    }
}

/// Cursors are equal when they sit on the same nodes, whatever the values.
impl<C: KeyChar, V, O> PartialEq for Cursor<'_, C, V, O> {
    fn eq(&self, other: &Self) -> bool {
        self.path.same_nodes(&other.path)
    }
}

impl<C: KeyChar, V, O> Eq for Cursor<'_, C, V, O> {}

impl<C: KeyChar, V: fmt::Debug, O: CharOrder<C>> fmt::Debug for Cursor<'_, C, V, O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.key() {
            Some(key) => f
                .debug_struct("Cursor")
                .field("key", &format_args!("{key}"))
                .field("value", &self.value())
                .finish(),
            None => f.write_str("Cursor(end)"),
        }
    }
}

impl<'a, C: KeyChar, V, O: CharOrder<C>> IntoIterator for Cursor<'a, C, V, O> {
    type Item = (ZeroTerminated<C>, &'a V);
    type IntoIter = Iter<'a, C, V, O>;

    fn into_iter(self) -> Self::IntoIter {
        Iter { cursor: self }
    }
}

/// A position in a [`CharTrie`] that can update values in place.
///
/// Walks exactly like [`Cursor`]; the structure of the trie cannot change
/// while it is alive.
pub struct CursorMut<'a, C: KeyChar, V, O = CaseInsensitive> {
    trie: &'a mut CharTrie<C, V, O>,
    path: Path,
    key: OnceCell<ZeroTerminated<C>>,
}

impl<'a, C: KeyChar, V, O: CharOrder<C>> CursorMut<'a, C, V, O> {
    pub(crate) fn new(trie: &'a mut CharTrie<C, V, O>, path: Path) -> Self {
        Self {
            trie,
            path,
            key: OnceCell::new(),
        }
    }

    /// Returns true past the last key.
    #[inline]
    pub fn is_end(&self) -> bool {
        self.path.is_end()
    }

    /// Moves to the next key holding a value.
    pub fn advance(&mut self) {
        self.path.advance(&self.trie.nodes);
        self.key.take();
    }

    /// The key at the cursor.
    pub fn key(&self) -> Option<&ZeroTerminated<C>> {
        if self.is_end() {
            return None;
        }
        Some(self.key.get_or_init(|| self.path.key(&self.trie.nodes)))
    }

    pub(crate) fn key_owned(&mut self) -> ZeroTerminated<C> {
        match self.key.take() {
            Some(key) => key,
            None => self.path.key(&self.trie.nodes),
        }
    }

    /// The value at the cursor.
    pub fn value(&self) -> Option<&V> {
        self.trie.nodes.node(self.path.top()?).value.as_ref()
    }

    /// A mutable reference to the value at the cursor.
    pub fn value_mut(&mut self) -> Option<&mut V> {
        let index = self.path.top()?;
        self.trie.nodes.node_mut(index).value.as_mut()
    }

    /// Stores `value` on the node at the cursor, returning the previous one.
    ///
    /// Returns `Err(value)` at the end.
    pub fn set_value(&mut self, value: V) -> Result<Option<V>, V> {
        let Some(index) = self.path.top() else {
            return Err(value);
        };
        if Some(index) == self.trie.root {
            return Err(value);
        }
        let old = self.trie.nodes.node_mut(index).value.replace(value);
        if old.is_none() {
            self.trie.len += 1;
        }
        Ok(old)
    }

    /// Takes the value off the node at the cursor, leaving the path in place.
    pub fn take_value(&mut self) -> Option<V> {
        let index = self.path.top()?;
        let old = self.trie.nodes.node_mut(index).value.take();
        if old.is_some() {
            self.trie.len -= 1;
        }
        old
    }

    /// Handle of the node at the cursor.
    pub fn node_id(&self) -> Option<NodeId> {
        self.path.top().map(|index| self.trie.nodes.id_of(index))
    }

    /// A read-only cursor at the same position.
    pub fn as_cursor(&self) -> Cursor<'_, C, V, O> {
        Cursor::new(&*self.trie, self.path.clone())
    }
}

/// Iterator over the `(key, value)` pairs of a [`CharTrie`] in key order.
pub struct Iter<'a, C: KeyChar, V, O = CaseInsensitive> {
    cursor: Cursor<'a, C, V, O>,
}

impl<'a, C: KeyChar, V, O: CharOrder<C>> Iterator for Iter<'a, C, V, O> {
    type Item = (ZeroTerminated<C>, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if self.cursor.is_end() {
                return None;
            }
            match self.cursor.value() {
                Some(value) => {
                    let key = self.cursor.take_key();
                    self.cursor.advance();
                    return Some((key, value));
                }
                None => self.cursor.advance(),
            }
        }
    }
}

/// Iterator over the keys of a [`CharTrie`] in order.
pub struct Keys<'a, C: KeyChar, V, O = CaseInsensitive> {
    inner: Iter<'a, C, V, O>,
}

impl<'a, C: KeyChar, V, O> Keys<'a, C, V, O> {
    pub(crate) fn new(inner: Iter<'a, C, V, O>) -> Self {
        Self { inner }
    }
}

impl<C: KeyChar, V, O: CharOrder<C>> Iterator for Keys<'_, C, V, O> {
    type Item = ZeroTerminated<C>;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(key, _)| key)
    }
}

/// Iterator over the values of a [`CharTrie`] in key order.
///
/// Does not rebuild keys.
pub struct Values<'a, C: KeyChar, V, O = CaseInsensitive> {
    cursor: Cursor<'a, C, V, O>,
}

impl<'a, C: KeyChar, V, O> Values<'a, C, V, O> {
    pub(crate) fn new(cursor: Cursor<'a, C, V, O>) -> Self {
        Self { cursor }
    }
}

impl<'a, C: KeyChar, V, O: CharOrder<C>> Iterator for Values<'a, C, V, O> {
    type Item = &'a V;

    fn next(&mut self) -> Option<&'a V> {
        while !self.cursor.is_end() {
            let value = self.cursor.value();
            self.cursor.advance();
            if value.is_some() {
                return value;
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> CharTrie<u8, i32> {
        let mut trie = CharTrie::new();
        for (i, key) in ["app", "apple", "banana", "ban", "b"].iter().enumerate() {
            trie.insert(key, i as i32);
        }
        trie
    }

    #[test]
    fn test_cursor_walks_in_order() {
        let trie = sample();
        let mut cursor = trie.begin();
        let mut keys = Vec::new();
        while !cursor.is_end() {
            keys.push(cursor.key().unwrap().to_string());
            cursor.advance();
        }
        assert_eq!(keys, ["app", "apple", "b", "ban", "banana"]);
        assert!(cursor == trie.end());
        assert!(cursor.key().is_none());
        assert!(cursor.value().is_none());
    }

    #[test]
    fn test_lower_bound_exact_path() {
        let trie = sample();

        // "ap" is a bare prefix: the cursor sits on a value-less node.
        let cursor = trie.lower_bound("ap");
        assert!(!cursor.is_end());
        assert_eq!(cursor.key().unwrap(), &"ap");
        assert!(cursor.value().is_none());

        let rest: Vec<String> = cursor.into_iter().map(|(k, _)| k.to_string()).collect();
        assert_eq!(rest, ["app", "apple", "b", "ban", "banana"]);

        let exact = trie.lower_bound("BAN");
        assert_eq!(exact.value(), Some(&3));
        let rest: Vec<i32> = exact.into_iter().map(|(_, v)| *v).collect();
        assert_eq!(rest, [3, 2]);

        assert!(trie.lower_bound("bz") == trie.end());
    }

    #[test]
    fn test_cursor_equality_ignores_values() {
        let trie = sample();
        let mut a = trie.begin();
        let b = trie.lower_bound("app");
        assert!(a == b);
        a.advance();
        assert!(a != b);
        assert!(a == trie.lower_bound("apple"));
    }

    #[test]
    fn test_seek_lower_bound() {
        let trie = sample();
        let key_at = |probe: &str| trie.seek(probe).key().map(|k| k.to_string());

        assert_eq!(key_at(""), Some("app".to_string()));
        assert_eq!(key_at("a"), Some("app".to_string()));
        assert_eq!(key_at("app"), Some("app".to_string()));
        assert_eq!(key_at("appl"), Some("apple".to_string()));
        assert_eq!(key_at("apples"), Some("b".to_string()));
        assert_eq!(key_at("aq"), Some("b".to_string()));
        assert_eq!(key_at("ba"), Some("ban".to_string()));
        assert_eq!(key_at("BANANA"), Some("banana".to_string()));
        assert_eq!(key_at("bananas"), None);
        assert_eq!(key_at("c"), None);
    }

    #[test]
    fn test_cursor_mut_updates() {
        let mut trie = sample();
        {
            let mut cursor = trie.begin_mut();
            while !cursor.is_end() {
                if let Some(value) = cursor.value_mut() {
                    *value += 10;
                }
                cursor.advance();
            }
        }
        assert_eq!(trie.find("ban"), 13);

        let mut cursor = trie.lower_bound_mut("ap");
        assert_eq!(cursor.set_value(7), Ok(None));
        assert_eq!(cursor.as_cursor().key().unwrap(), &"ap");
        assert_eq!(trie.len(), 6);

        let mut cursor = trie.lower_bound_mut("apple");
        assert_eq!(cursor.take_value(), Some(11));
        assert_eq!(trie.len(), 5);
        assert_eq!(trie.find("ap"), 7);

        let mut end = trie.lower_bound_mut("zzz");
        assert_eq!(end.set_value(1), Err(1));
    }

    #[test]
    fn test_values_and_keys() {
        let trie = sample();
        let values: Vec<i32> = trie.values().copied().collect();
        assert_eq!(values, [0, 1, 4, 3, 2]);
        let keys: Vec<String> = trie.keys().map(|k| k.to_string()).collect();
        assert_eq!(keys, ["app", "apple", "b", "ban", "banana"]);
    }
}

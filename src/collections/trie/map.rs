//! The trie map.

use core::fmt;

use super::iter::{Cursor, CursorMut, Iter, Keys, Path, Values};
use super::node::{Link, NodeArena, NodeId, NodeRef};
use super::order::{CaseInsensitive, CharOrder, KeyChar};
use super::sentinel::Sentinel;
use crate::collections::string::{KeyString as _, ZeroTerminated};

/// An ordered map from character sequences to values.
///
/// Nodes form a first-child/next-sibling graph stored in an arena: each node
/// holds one character, an optional value, a link to its next sibling at the
/// same depth and a link to its first child. Siblings are kept in ascending
/// order under the strategy `O`; characters that `O` considers equivalent
/// share a node, so with the default [`CaseInsensitive`] order `"alfa"` and
/// `"ALFA"` are the same key.
///
/// Keys are anything that is `AsRef<[C]>`: string literals and byte strings
/// for `C = u8`, or the key buffers from [`collections::string`](crate::collections::string).
///
/// ```rust
/// use chartrie::CharTrie;
///
/// let mut trie = CharTrie::<u8, i32>::new();
/// trie.insert("alfa", 1);
/// trie.insert("alfb", 2);
/// trie.insert("beta", 3);
///
/// assert_eq!(trie.find("ALFA"), 1);
/// assert_eq!(trie.find("gamma"), -1);
///
/// let keys: Vec<String> = trie.keys().map(|k| k.to_string()).collect();
/// assert_eq!(keys, ["alfa", "alfb", "beta"]);
/// ```
#[derive(Clone)]
pub struct CharTrie<C: KeyChar, V, O = CaseInsensitive> {
    /// Arena of nodes.
    pub(crate) nodes: NodeArena<C, V>,
    /// Synthetic root (character `NUL`, never valued), created on first insert.
    pub(crate) root: Link,
    /// Number of nodes holding a value.
    pub(crate) len: usize,
    pub(crate) order: O,
}

impl<C: KeyChar, V> CharTrie<C, V> {
    /// Creates an empty trie with case-insensitive ordering.
    pub fn new() -> Self {
        Self::with_order(CaseInsensitive)
    }

    /// Creates an empty trie with case-insensitive ordering and room for
    /// `capacity` nodes.
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity_and_order(capacity, CaseInsensitive)
    }
}

impl<C: KeyChar, V, O: CharOrder<C>> CharTrie<C, V, O> {
    /// Creates an empty trie ordered by `order`.
    pub fn with_order(order: O) -> Self {
        Self::with_capacity_and_order(0, order)
    }

    /// Creates an empty trie ordered by `order` with room for `capacity` nodes.
    pub fn with_capacity_and_order(capacity: usize, order: O) -> Self {
        Self {
            nodes: NodeArena::with_capacity(capacity),
            root: None,
            len: 0,
            order,
        }
    }

    /// The ordering strategy.
    #[inline]
    pub fn order(&self) -> &O {
        &self.order
    }

    /// Returns the number of keys holding a value.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true if no key holds a value.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of live nodes, including the root and value-less path nodes.
    #[inline]
    pub fn node_count(&self) -> usize {
        self.nodes.live()
    }

    /// Number of arena slots ever allocated. Freed slots are reused, so this
    /// only grows when more nodes are live than at any earlier point.
    #[inline]
    pub fn slot_count(&self) -> usize {
        self.nodes.slot_count()
    }

    /// Removes everything, including the root.
    pub fn clear(&mut self) {
        trace_event!(nodes = self.nodes.live(), "clearing trie");
        self.nodes.clear();
        self.root = None;
        self.len = 0;
    }

    fn root_or_create(&mut self) -> u32 {
        match self.root {
            Some(root) => root,
            None => {
                let root = self.nodes.alloc_root(C::NUL);
                self.root = Some(root);
                root
            }
        }
    }

    /// Walks `key`, creating every missing node, and returns the terminal node.
    fn descend_or_create(&mut self, key: &[C]) -> u32 {
        let mut current = self.root_or_create();
        for &ch in key {
            let (child, created) = self.nodes.get_or_create_child(current, true);
            let head = child.expect("child is created on demand");
            if created {
                self.nodes.node_mut(head).ch = ch;
            }
            let (sibling, _) = self.nodes.get_or_create_sibling(head, ch, true, &self.order);
            current = sibling.expect("sibling is created on demand");
        }
        current
    }

    /// Walks `key` without creating anything.
    pub(crate) fn locate(&self, key: &[C]) -> Option<u32> {
        let mut current = self.root?;
        for &ch in key {
            let head = self.nodes.node(current).child?;
            current = self.find_sibling(head, ch)?;
        }
        Some(current)
    }

    /// Like [`locate`](Self::locate), recording every node on the way.
    pub(crate) fn locate_path(&self, key: &[C]) -> Option<Vec<u32>> {
        let mut current = self.root?;
        let mut path = Vec::with_capacity(key.len() + 1);
        path.push(current);
        for &ch in key {
            let head = self.nodes.node(current).child?;
            current = self.find_sibling(head, ch)?;
            path.push(current);
        }
        Some(path)
    }

    fn find_sibling(&self, head: u32, ch: C) -> Option<u32> {
        self.nodes
            .siblings(Some(head))
            .take_while(|&index| !self.order.is_less(ch, self.nodes.node(index).ch))
            .find(|&index| self.order.is_equivalent(self.nodes.node(index).ch, ch))
    }

    /// Stores `value` under `key`, overwriting any previous value, and returns
    /// the handle of the terminal node.
    ///
    /// The empty key addresses the root, which never holds a value: `value`
    /// is dropped and the root's handle is returned.
    pub fn insert<K: AsRef<[C]>>(&mut self, key: K, value: V) -> NodeId {
        let (index, _) = self.store(key.as_ref(), value);
        self.nodes.id_of(index)
    }

    /// Stores `value` under `key`, returning the value it replaced.
    pub fn replace<K: AsRef<[C]>>(&mut self, key: K, value: V) -> Option<V> {
        self.store(key.as_ref(), value).1
    }

    fn store(&mut self, key: &[C], value: V) -> (u32, Option<V>) {
        let index = self.descend_or_create(key);
        if key.is_empty() {
            return (index, None);
        }
        trace_event!(len = key.len(), "insert");
        let old = self.nodes.node_mut(index).value.replace(value);
        if old.is_none() {
            self.len += 1;
        }
        (index, old)
    }

    /// Removes the node for `key` together with everything below it.
    ///
    /// Removal works on paths, not values: removing a proper prefix of stored
    /// keys removes all of them, whether or not the prefix itself holds a
    /// value. The empty key clears the whole trie and always succeeds.
    ///
    /// Returns `false` if no node exists for `key`.
    pub fn remove<K: AsRef<[C]>>(&mut self, key: K) -> bool {
        let Some((&last, prefix)) = key.as_ref().split_last() else {
            self.clear();
            return true;
        };
        let Some(parent) = self.locate(prefix) else {
            return false;
        };
        let Some(detached) = self.nodes.remove_sibling(parent, last, &self.order) else {
            return false;
        };
        let dropped = self.nodes.free_subtree(detached);
        debug_event!(dropped, live = self.nodes.live(), "removed subtree");
        self.len -= dropped;
        true
    }

    /// Returns the value stored for `key`, or `V::sentinel()` when there is
    /// none.
    ///
    /// ```rust
    /// use chartrie::CharTrie;
    ///
    /// let mut trie = CharTrie::<u8, i64>::new();
    /// trie.insert("alpha", 10);
    /// assert_eq!(trie.find("alpha"), 10);
    /// assert_eq!(trie.find("alp"), -1);
    /// ```
    pub fn find<K: AsRef<[C]>>(&self, key: K) -> V
    where
        V: Sentinel + Clone,
    {
        self.get(key).cloned().unwrap_or_else(V::sentinel)
    }

    /// Returns a reference to the value stored for `key`.
    pub fn get<K: AsRef<[C]>>(&self, key: K) -> Option<&V> {
        let index = self.locate(key.as_ref())?;
        self.nodes.node(index).value.as_ref()
    }

    /// Returns a mutable reference to the value stored for `key`.
    pub fn get_mut<K: AsRef<[C]>>(&mut self, key: K) -> Option<&mut V> {
        let index = self.locate(key.as_ref())?;
        self.nodes.node_mut(index).value.as_mut()
    }

    /// Returns true if a value is stored for `key`.
    pub fn contains_key<K: AsRef<[C]>>(&self, key: K) -> bool {
        self.get(key).is_some()
    }

    /// Inspects the node behind a handle, if the handle is still current.
    pub fn node(&self, id: NodeId) -> Option<NodeRef<'_, C, V>> {
        let index = self.nodes.resolve(id)?;
        Some(NodeRef {
            id,
            node: self.nodes.node(index),
        })
    }

    /// Returns a cursor on the node whose path spells exactly `key`, or the
    /// end cursor if there is no such path.
    ///
    /// The node may hold no value when `key` is only a prefix of stored keys.
    /// Advancing the cursor visits every greater key in order. For the first
    /// key not less than `key`, use [`seek`](Self::seek).
    pub fn lower_bound<K: AsRef<[C]>>(&self, key: K) -> Cursor<'_, C, V, O> {
        match self.locate_path(key.as_ref()) {
            Some(path) => Cursor::new(self, Path::from_nodes(path)),
            None => self.end(),
        }
    }

    /// Mutable variant of [`lower_bound`](Self::lower_bound).
    pub fn lower_bound_mut<K: AsRef<[C]>>(&mut self, key: K) -> CursorMut<'_, C, V, O> {
        let path = self
            .locate_path(key.as_ref())
            .map(Path::from_nodes)
            .unwrap_or_default();
        CursorMut::new(self, path)
    }

    /// Returns a cursor on the first key that is not less than `key` under the
    /// trie's ordering.
    ///
    /// ```rust
    /// use chartrie::CharTrie;
    ///
    /// let trie: CharTrie<u8, i32> =
    ///     [("alpha", 1), ("beta", 2), ("gamma", 3), ("delta", 4)].into_iter().collect();
    ///
    /// let after_beta: Vec<i32> = trie.seek("bf").into_iter().map(|(_, v)| *v).collect();
    /// assert_eq!(after_beta, [4, 3]);
    /// ```
    pub fn seek<K: AsRef<[C]>>(&self, key: K) -> Cursor<'_, C, V, O> {
        Cursor::new(self, Path::seek(self, key.as_ref()))
    }

    /// Returns a cursor on the smallest key.
    pub fn begin(&self) -> Cursor<'_, C, V, O> {
        Cursor::new(self, Path::begin(&self.nodes, self.root))
    }

    /// Returns a mutable cursor on the smallest key.
    pub fn begin_mut(&mut self) -> CursorMut<'_, C, V, O> {
        let path = Path::begin(&self.nodes, self.root);
        CursorMut::new(self, path)
    }

    /// The past-the-end cursor.
    pub fn end(&self) -> Cursor<'_, C, V, O> {
        Cursor::new(self, Path::default())
    }

    /// Iterates `(key, value)` pairs in ascending key order.
    pub fn iter(&self) -> Iter<'_, C, V, O> {
        self.begin().into_iter()
    }

    /// Iterates keys in ascending order.
    pub fn keys(&self) -> Keys<'_, C, V, O> {
        Keys::new(self.iter())
    }

    /// Iterates values in ascending key order.
    pub fn values(&self) -> Values<'_, C, V, O> {
        Values::new(self.begin())
    }

    /// Calls `f` with every key and value in ascending key order.
    pub fn for_each<F>(&self, mut f: F)
    where
        F: FnMut(&[C], &V),
    {
        let mut cursor = self.begin();
        while let Some(value) = cursor.value() {
            if let Some(key) = cursor.key() {
                f(key.as_slice(), value);
            }
            cursor.advance();
        }
    }

    /// Calls `f` with every key and a mutable reference to its value.
    pub fn for_each_mut<F>(&mut self, mut f: F)
    where
        F: FnMut(&[C], &mut V),
    {
        let mut cursor = self.begin_mut();
        while !cursor.is_end() {
            let key = cursor.key_owned();
            if let Some(value) = cursor.value_mut() {
                f(key.as_slice(), value);
            }
            cursor.advance();
        }
    }
}

impl<C: KeyChar, V, O: CharOrder<C> + Default> Default for CharTrie<C, V, O> {
    fn default() -> Self {
        Self::with_order(O::default())
    }
}

impl<C: KeyChar, V: fmt::Debug, O: CharOrder<C>> fmt::Debug for CharTrie<C, V, O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.iter().map(|(k, v)| (k.to_string(), v)))
            .finish()
    }
}

impl<'a, C: KeyChar, V, O: CharOrder<C>> IntoIterator for &'a CharTrie<C, V, O> {
    type Item = (ZeroTerminated<C>, &'a V);
    type IntoIter = Iter<'a, C, V, O>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<C: KeyChar, V, O: CharOrder<C>, K: AsRef<[C]>> Extend<(K, V)> for CharTrie<C, V, O> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<C: KeyChar, V, K: AsRef<[C]>> FromIterator<(K, V)> for CharTrie<C, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut trie = Self::new();
        trie.extend(iter);
        trie
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collections::trie::CaseSensitive;

    fn scenario() -> CharTrie<u8, i32> {
        let mut trie = CharTrie::new();
        trie.insert("alfa", 1);
        trie.insert("alfb", 2);
        trie.insert("beta", 3);
        trie
    }

    fn entries<O: CharOrder<u8>>(trie: &CharTrie<u8, i32, O>) -> Vec<(String, i32)> {
        trie.iter().map(|(k, v)| (k.to_string(), *v)).collect()
    }

    #[test]
    fn test_char_trie_basic() {
        let trie = scenario();
        assert_eq!(trie.len(), 3);
        assert_eq!(trie.find("alfa"), 1);
        assert_eq!(trie.find("ALFA"), 1);
        assert_eq!(trie.find("alfb"), 2);
        assert_eq!(trie.find("beta"), 3);
        assert_eq!(trie.find("gamma"), -1);
        assert_eq!(trie.find("alf"), -1);
        assert_eq!(trie.get("alf"), None);
        assert!(trie.contains_key("Beta"));
        assert_eq!(
            entries(&trie),
            [("alfa".to_string(), 1), ("alfb".to_string(), 2), ("beta".to_string(), 3)]
        );
    }

    #[test]
    fn test_char_trie_prefix_removal_cascades() {
        let mut trie = scenario();
        assert!(trie.remove("alf"));
        assert_eq!(trie.find("alfa"), -1);
        assert_eq!(trie.find("alfb"), -1);
        assert_eq!(trie.len(), 1);
        assert_eq!(entries(&trie), [("beta".to_string(), 3)]);

        assert!(!trie.remove("alf"));
        assert!(!trie.remove("zeta"));
    }

    #[test]
    fn test_char_trie_overwrite() {
        let mut trie = scenario();
        let nodes = trie.node_count();
        assert_eq!(trie.replace("ALFA", 10), Some(1));
        assert_eq!(trie.node_count(), nodes);
        assert_eq!(trie.len(), 3);
        assert_eq!(trie.find("alfa"), 10);
    }

    #[test]
    fn test_char_trie_empty_key() {
        let mut trie = scenario();
        trie.insert("", 99);
        assert_eq!(trie.len(), 3);
        assert_eq!(trie.find(""), -1);

        assert!(trie.remove(""));
        assert!(trie.is_empty());
        assert_eq!(trie.node_count(), 0);
        assert!(trie.remove(""));
        assert!(trie.begin() == trie.end());
    }

    #[test]
    fn test_char_trie_clear_retires_handles() {
        let mut trie = CharTrie::<u8, i32>::new();
        let old = trie.insert("a", 1);
        assert!(trie.remove(""));
        let new = trie.insert("z", 99);

        assert!(trie.node(old).is_none());
        assert_eq!(trie.node(new).and_then(|n| n.value().copied()), Some(99));

        trie.clear();
        assert!(trie.node(new).is_none());
        assert_eq!(trie.find("z"), -1);
    }

    #[test]
    fn test_char_trie_case_sensitive() {
        let mut trie = CharTrie::<u8, i32, _>::with_order(CaseSensitive);
        trie.insert("b", 1);
        trie.insert("B", 2);
        trie.insert("a", 3);
        assert_eq!(trie.len(), 3);
        assert_eq!(
            entries(&trie),
            [("B".to_string(), 2), ("a".to_string(), 3), ("b".to_string(), 1)]
        );
    }

    #[test]
    fn test_char_trie_stale_handles() {
        let mut trie = CharTrie::<u8, i32>::new();
        let m = trie.insert("m", 1);
        assert_eq!(trie.node(m).map(|n| n.ch()), Some(b'm'));

        // "a" takes over the level head slot that "m" lived in.
        let a = trie.insert("a", 2);
        assert!(trie.node(m).is_none());
        assert_eq!(trie.node(a).and_then(|n| n.value().copied()), Some(2));

        let m = trie.insert("m", 3);
        assert!(trie.remove("m"));
        assert!(trie.node(m).is_none());
    }

    #[test]
    fn test_char_trie_get_mut_and_for_each() {
        let mut trie = scenario();
        *trie.get_mut("beta").unwrap() += 100;
        trie.for_each_mut(|key, value| {
            if key.starts_with(b"alf") {
                *value *= 2;
            }
        });

        let mut seen = Vec::new();
        trie.for_each(|key, value| seen.push((key.to_vec(), *value)));
        assert_eq!(
            seen,
            [(b"alfa".to_vec(), 2), (b"alfb".to_vec(), 4), (b"beta".to_vec(), 103)]
        );
    }

    #[test]
    fn test_char_trie_debug() {
        let trie = scenario();
        assert_eq!(format!("{trie:?}"), r#"{"alfa": 1, "alfb": 2, "beta": 3}"#);
    }
}

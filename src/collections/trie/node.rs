//! Arena-backed trie nodes and sibling-chain maintenance.

use core::fmt;
use core::mem;

use super::order::{CharOrder, KeyChar};

/// Index of a node slot inside a [`NodeArena`].
pub(crate) type Link = Option<u32>;

/// A handle to a trie node, returned by [`CharTrie::insert`](super::CharTrie::insert).
///
/// Handles carry the generation of the slot they were issued for. Removing a
/// node, or relabeling a level head when a smaller character is inserted in
/// front of it, retires the handle: [`CharTrie::node`](super::CharTrie::node)
/// then returns `None` instead of some unrelated node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId {
    index: u32,
    generation: u32,
}

/// A node in the first-child/next-sibling graph.
///
/// Each node contains:
/// - The character of its edge, compared through the trie's [`CharOrder`].
/// - An optional value (if a key terminates here).
/// - `next`: the following node at the same depth, in ascending order.
/// - `child`: the first (smallest) node one level down.
#[derive(Debug, Clone)]
pub(crate) struct Node<C, V> {
    pub(crate) ch: C,
    pub(crate) value: Option<V>,
    pub(crate) next: Link,
    pub(crate) child: Link,
}

impl<C, V> Node<C, V> {
    fn new(ch: C, next: Link) -> Self {
        Self {
            ch,
            value: None,
            next,
            child: None,
        }
    }
}

/// A slot in the node arena.
/// Can be either an occupied node or a pointer to the next free slot.
#[derive(Debug, Clone)]
pub(crate) enum NodeSlot<C, V> {
    Occupied { generation: u32, node: Node<C, V> },
    Free { generation: u32, next_free: Link },
}

/// Owner of every node of one trie.
///
/// Ownership edges are the `child` and `next` links: every live node except
/// the root is reachable through exactly one of them. Nodes detached by
/// [`remove_sibling`](NodeArena::remove_sibling) are owner-less until passed to
/// [`free_subtree`](NodeArena::free_subtree).
#[derive(Clone)]
pub(crate) struct NodeArena<C, V> {
    slots: Vec<NodeSlot<C, V>>,
    free_head: Link,
    live: usize,
}

impl<C: KeyChar, V> NodeArena<C, V> {
    #[cfg(test)]
    pub(crate) fn new() -> Self {
        Self::with_capacity(0)
    }

    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            free_head: None,
            live: 0,
        }
    }

    /// Number of live nodes.
    #[inline]
    pub(crate) fn live(&self) -> usize {
        self.live
    }

    /// Number of slots ever allocated, live or free.
    #[inline]
    pub(crate) fn slot_count(&self) -> usize {
        self.slots.len()
    }

    /// Frees every node but keeps the slots, so handles issued before the
    /// clear stay retired instead of matching a later node.
    pub(crate) fn clear(&mut self) {
        let mut free_head = None;
        for (index, slot) in self.slots.iter_mut().enumerate().rev() {
            let generation = match slot {
                NodeSlot::Occupied { generation, .. } => generation.wrapping_add(1),
                NodeSlot::Free { generation, .. } => *generation,
            };
            *slot = NodeSlot::Free {
                generation,
                next_free: free_head,
            };
            // `alloc` never hands out an index beyond u32.
            free_head = Some(index as u32);
        }
        self.free_head = free_head;
        self.live = 0;
    }

    /// Allocates a bare node with character `ch` and no links.
    pub(crate) fn alloc_root(&mut self, ch: C) -> u32 {
        self.alloc(Node::new(ch, None))
    }

    fn alloc(&mut self, node: Node<C, V>) -> u32 {
        self.live += 1;
        match self.free_head {
            Some(index) => {
                let slot = &mut self.slots[index as usize];
                let (generation, next_free) = match slot {
                    NodeSlot::Free {
                        generation,
                        next_free,
                    } => (*generation, *next_free),
                    NodeSlot::Occupied { .. } => panic!("free list points at live node {index}"),
                };
                self.free_head = next_free;
                *slot = NodeSlot::Occupied {
                    generation: generation.wrapping_add(1),
                    node,
                };
                index
            }
            None => {
                let index = u32::try_from(self.slots.len()).expect("node arena exceeds u32 slots");
                self.slots.push(NodeSlot::Occupied {
                    generation: 0,
                    node,
                });
                index
            }
        }
    }

    /// Returns the slot to the free list and hands back the node it held.
    fn release(&mut self, index: u32) -> Node<C, V> {
        let slot = &mut self.slots[index as usize];
        let generation = match slot {
            NodeSlot::Occupied { generation, .. } => *generation,
            NodeSlot::Free { .. } => panic!("double free of node {index}"),
        };
        let old = mem::replace(
            slot,
            NodeSlot::Free {
                generation: generation.wrapping_add(1),
                next_free: self.free_head,
            },
        );
        self.free_head = Some(index);
        self.live -= 1;
        match old {
            NodeSlot::Occupied { node, .. } => node,
            NodeSlot::Free { .. } => unreachable!(),
        }
    }

    #[inline]
    pub(crate) fn node(&self, index: u32) -> &Node<C, V> {
        match &self.slots[index as usize] {
            NodeSlot::Occupied { node, .. } => node,
            NodeSlot::Free { .. } => panic!("dangling link to node {index}"),
        }
    }

    #[inline]
    pub(crate) fn node_mut(&mut self, index: u32) -> &mut Node<C, V> {
        match &mut self.slots[index as usize] {
            NodeSlot::Occupied { node, .. } => node,
            NodeSlot::Free { .. } => panic!("dangling link to node {index}"),
        }
    }

    /// Issues a handle for a live node.
    pub(crate) fn id_of(&self, index: u32) -> NodeId {
        match &self.slots[index as usize] {
            NodeSlot::Occupied { generation, .. } => NodeId {
                index,
                generation: *generation,
            },
            NodeSlot::Free { .. } => panic!("dangling link to node {index}"),
        }
    }

    /// Resolves a handle, if it is still current.
    pub(crate) fn resolve(&self, id: NodeId) -> Option<u32> {
        match self.slots.get(id.index as usize)? {
            NodeSlot::Occupied { generation, .. } if *generation == id.generation => Some(id.index),
            _ => None,
        }
    }

    fn retire_handles(&mut self, index: u32) {
        if let NodeSlot::Occupied { generation, .. } = &mut self.slots[index as usize] {
            *generation = generation.wrapping_add(1);
        }
    }

    /// Returns the first child of `parent`, creating an unlabeled one if
    /// `create` is set and there is none. The flag reports a creation; the
    /// caller is expected to set the new child's character.
    pub(crate) fn get_or_create_child(&mut self, parent: u32, create: bool) -> (Link, bool) {
        if let Some(child) = self.node(parent).child {
            return (Some(child), false);
        }
        if !create {
            return (None, false);
        }
        let child = self.alloc(Node::new(C::NUL, None));
        self.node_mut(parent).child = Some(child);
        (Some(child), true)
    }

    /// Finds the node equivalent to `ch` in the chain starting at `head`,
    /// optionally creating it in ascending position.
    ///
    /// When `ch` orders before `head`, `head` keeps its slot but is relabeled:
    /// its character, value and child move into a new node spliced in as
    /// `next`, and `head` becomes `ch` with no value and no child. The parent's
    /// `child` link therefore never changes.
    pub(crate) fn get_or_create_sibling<O: CharOrder<C>>(
        &mut self,
        head: u32,
        ch: C,
        create: bool,
        order: &O,
    ) -> (Link, bool) {
        let head_ch = self.node(head).ch;

        if order.is_less(ch, head_ch) {
            if !create {
                return (None, false);
            }
            let head_node = self.node_mut(head);
            let moved = Node {
                ch: head_node.ch,
                value: head_node.value.take(),
                next: head_node.next,
                child: head_node.child.take(),
            };
            let moved = self.alloc(moved);
            let head_node = self.node_mut(head);
            head_node.ch = ch;
            head_node.next = Some(moved);
            self.retire_handles(head);
            trace_event!(head, moved, "relabeled level head");
            return (Some(head), true);
        }

        if order.is_equivalent(ch, head_ch) {
            return (Some(head), false);
        }

        let mut prev = head;
        let mut cursor = self.node(head).next;
        while let Some(index) = cursor {
            let node = self.node(index);
            if !order.is_less(node.ch, ch) {
                if order.is_equivalent(node.ch, ch) {
                    return (Some(index), false);
                }
                break;
            }
            prev = index;
            cursor = node.next;
        }

        if !create {
            return (None, false);
        }
        // `cursor` is the first greater sibling, or `None` to append.
        let created = self.alloc(Node::new(ch, cursor));
        self.node_mut(prev).next = Some(created);
        (Some(created), true)
    }

    /// Detaches the node equivalent to `ch` from the chain hanging off
    /// `parent`'s child link. The detached node's `next` is cleared; its child
    /// subtree stays attached to it and the caller must free it.
    pub(crate) fn remove_sibling<O: CharOrder<C>>(
        &mut self,
        parent: u32,
        ch: C,
        order: &O,
    ) -> Link {
        let head = self.node(parent).child?;

        if order.is_equivalent(self.node(head).ch, ch) {
            let next = self.node_mut(head).next.take();
            self.node_mut(parent).child = next;
            return Some(head);
        }

        let mut prev = head;
        let mut cursor = self.node(head).next;
        while let Some(index) = cursor {
            let node_ch = self.node(index).ch;
            if order.is_equivalent(node_ch, ch) {
                let next = self.node_mut(index).next.take();
                self.node_mut(prev).next = next;
                return Some(index);
            }
            if order.is_less(ch, node_ch) {
                break;
            }
            prev = index;
            cursor = self.node(index).next;
        }
        None
    }

    /// Frees `index` together with everything reachable from it through
    /// `child` and `next` links. Returns how many values were dropped.
    ///
    /// Uses an explicit worklist, so arbitrarily deep or wide subtrees cannot
    /// overflow the call stack.
    pub(crate) fn free_subtree(&mut self, index: u32) -> usize {
        let mut dropped = 0;
        let mut pending = vec![index];
        while let Some(index) = pending.pop() {
            let node = self.release(index);
            if node.value.is_some() {
                dropped += 1;
            }
            pending.extend(node.child);
            pending.extend(node.next);
        }
        dropped
    }

    /// Iterates the indices of one sibling chain, starting at `head`.
    pub(crate) fn siblings(&self, head: Link) -> Siblings<'_, C, V> {
        Siblings {
            arena: self,
            cursor: head,
        }
    }
}

pub(crate) struct Siblings<'a, C, V> {
    arena: &'a NodeArena<C, V>,
    cursor: Link,
}

impl<C: KeyChar, V> Iterator for Siblings<'_, C, V> {
    type Item = u32;

    fn next(&mut self) -> Option<u32> {
        let index = self.cursor?;
        self.cursor = self.arena.node(index).next;
        Some(index)
    }
}

/// A read-only view of one trie node.
pub struct NodeRef<'a, C, V> {
    pub(crate) id: NodeId,
    pub(crate) node: &'a Node<C, V>,
}

impl<'a, C: KeyChar, V> NodeRef<'a, C, V> {
    /// The handle of this node.
    #[inline]
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// The character on the edge leading to this node.
    #[inline]
    pub fn ch(&self) -> C {
        self.node.ch
    }

    /// The value stored here, if a key terminates at this node.
    #[inline]
    pub fn value(&self) -> Option<&'a V> {
        self.node.value.as_ref()
    }

    /// Returns `true` if a key terminates at this node.
    #[inline]
    pub fn has_value(&self) -> bool {
        self.node.value.is_some()
    }

    /// Returns `true` if longer keys continue below this node.
    #[inline]
    pub fn has_children(&self) -> bool {
        self.node.child.is_some()
    }
}

impl<C: KeyChar, V: fmt::Debug> fmt::Debug for NodeRef<'_, C, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeRef")
            .field("ch", &self.node.ch)
            .field("value", &self.node.value)
            .finish()
    }
}

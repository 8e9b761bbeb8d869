use core::borrow::Borrow;
use core::cmp::Ordering;

use alloc::vec::Vec;

use super::arena::Arena;
use super::handle::Handle;
use super::node::{Color, Direction, Link, Node};
use super::size::Size;
use crate::error::AllocError;
use crate::tracing_helpers::{debug_log, warn_log};

/// The core red-black tree backing `OSRBTreeMap`.
///
/// Slot `Handle::HEADER` of the arena is the sentinel: its parent is the root
/// (or itself when empty) and its size is the number of entries.
#[derive(Clone)]
pub(crate) struct RawOSRBTreeMap<K, V> {
    nodes: Arena<Node<K, V>>,
}

/// Result of a key search.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum SearchResult {
    /// The key is stored at this node.
    Found(Handle),
    /// The key is absent; it belongs in the empty `dir` slot of `parent`.
    NotFound { parent: Handle, dir: Direction },
}

/// Outcome of a unique-key insertion.
pub(crate) enum Inserted<K, V> {
    /// A new node was linked in.
    New(Handle),
    /// The key was already present at this node; the rejected entry is handed back.
    Occupied(Handle, K, V),
}

impl<K, V> RawOSRBTreeMap<K, V> {
    /// Creates a new, empty tree.
    pub(crate) fn new() -> Self {
        let mut nodes = Arena::new();
        nodes.alloc(Node::header());
        Self { nodes }
    }

    /// Creates a new tree with room for `capacity` entries.
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        let mut nodes = Arena::with_capacity(capacity.saturating_add(1));
        let header = nodes.alloc(Node::header());
        debug_assert_eq!(header, Handle::HEADER);
        Self { nodes }
    }

    /// Number of entries, read from the sentinel's size.
    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.link(Handle::HEADER).size.to_usize()
    }

    #[inline]
    pub(crate) fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of entries the tree can hold before its storage must grow.
    pub(crate) fn capacity(&self) -> usize {
        self.nodes.capacity().saturating_sub(1)
    }

    /// Drops every entry and resets the sentinel.
    #[cfg_attr(feature = "tracing", tracing::instrument(level = "debug", skip_all))]
    pub(crate) fn clear(&mut self) {
        debug_log!(len = self.len(), "clearing tree");
        self.nodes.clear();
        self.nodes.alloc(Node::header());
    }

    #[inline]
    pub(crate) fn has_root(&self) -> bool {
        self.link(Handle::HEADER).parent != Handle::HEADER
    }

    #[inline]
    pub(crate) fn root(&self) -> Option<Handle> {
        self.has_root().then(|| self.link(Handle::HEADER).parent)
    }

    /// First entry in key order, or the sentinel when empty.
    pub(crate) fn first(&self) -> Handle {
        self.advance(Handle::HEADER, Direction::Right)
    }

    /// Last entry in key order, or the sentinel when empty.
    pub(crate) fn last(&self) -> Handle {
        self.advance(Handle::HEADER, Direction::Left)
    }

    #[inline]
    pub(crate) fn node(&self, handle: Handle) -> &Node<K, V> {
        self.nodes.get(handle)
    }

    #[inline]
    pub(crate) fn node_mut(&mut self, handle: Handle) -> &mut Node<K, V> {
        self.nodes.get_mut(handle)
    }

    #[inline]
    pub(crate) fn link(&self, handle: Handle) -> &Link {
        &self.nodes.get(handle).link
    }

    #[inline]
    pub(crate) fn link_mut(&mut self, handle: Handle) -> &mut Link {
        &mut self.nodes.get_mut(handle).link
    }

    /// Resets `h` to a red single-node subtree hanging from `parent`.
    pub(crate) fn init_node(&mut self, h: Handle, parent: Handle) {
        *self.link_mut(h) = Link::detached(parent);
    }

    /// Makes `h` the black root of a tree that was empty.
    pub(crate) fn init_root(&mut self, h: Handle) {
        *self.link_mut(h) = Link {
            color: Color::Black,
            ..Link::detached(Handle::HEADER)
        };
        let header = self.link_mut(Handle::HEADER);
        header.parent = h;
        header.size = Size::ONE;
    }

    /// Descends from `start`, steering by `cmp(stored_key)`: `Less` goes left,
    /// `Greater` goes right, `Equal` stops.
    pub(crate) fn locate_key<F>(&self, start: Handle, mut cmp: F) -> SearchResult
    where
        F: FnMut(&K) -> Ordering,
    {
        let mut node = start;
        loop {
            let dir = match cmp(self.node(node).key()) {
                Ordering::Less => Direction::Left,
                Ordering::Greater => Direction::Right,
                Ordering::Equal => return SearchResult::Found(node),
            };
            match self.child(node, dir) {
                Some(next) => node = next,
                None => return SearchResult::NotFound { parent: node, dir },
            }
        }
    }

    /// Handle of the node holding `key`, if any.
    pub(crate) fn search<Q>(&self, key: &Q) -> Option<Handle>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        match self.locate_key(self.root()?, |stored| key.cmp(stored.borrow())) {
            SearchResult::Found(h) => Some(h),
            SearchResult::NotFound { .. } => None,
        }
    }

    /// Inserts `key` unless it is already present.
    ///
    /// On allocation failure the tree is unchanged.
    pub(crate) fn try_insert(&mut self, key: K, value: V) -> Result<Inserted<K, V>, AllocError>
    where
        K: Ord,
    {
        let Some(root) = self.root() else {
            let h = self.alloc_node(key, value)?;
            self.init_root(h);
            return Ok(Inserted::New(h));
        };

        let (parent, dir) = match self.locate_key(root, |stored| key.cmp(stored)) {
            SearchResult::Found(h) => return Ok(Inserted::Occupied(h, key, value)),
            SearchResult::NotFound { parent, dir } => (parent, dir),
        };

        let h = self.alloc_node(key, value)?;
        self.init_node(h, parent);
        self.link_child(parent, dir, h);
        self.update_sizes_to_header(parent, Size::increment);
        self.insert_fixup(h);
        Ok(Inserted::New(h))
    }

    #[cfg_attr(not(feature = "tracing"), allow(unused_variables))]
    fn alloc_node(&mut self, key: K, value: V) -> Result<Handle, AllocError> {
        self.nodes.try_alloc(Node::new(Link::detached(Handle::HEADER), key, value)).inspect_err(|err| {
            warn_log!(%err, len = self.len(), "node allocation failed");
        })
    }

    /// Unlinks the entry at `h`, rebalances, and releases its slot.
    ///
    /// Handles of all other entries stay valid.
    pub(crate) fn erase_at(&mut self, h: Handle) -> (K, V) {
        assert!(h != Handle::HEADER, "`RawOSRBTreeMap::erase_at()` - cannot erase the sentinel!");

        if self.child(h, Direction::Left).is_some() && self.child(h, Direction::Right).is_some() {
            self.swap_with_successor(h);
        }

        let link = *self.link(h);
        let head = link.parent;
        let vacated = if self.is_header(head) {
            None
        } else {
            Some(self.direction(h))
        };

        match link.child(Direction::Left).or(link.child(Direction::Right)) {
            Some(child) => {
                self.relink_parent(h, child);
                self.link_mut(child).color = Color::Black;
                self.update_sizes_to_header(head, Size::decrement);
            }
            None => {
                self.detach(h);
                self.update_sizes_to_header(head, Size::decrement);
                if let (Color::Black, Some(dir)) = (link.color, vacated) {
                    self.erase_fixup(head, dir);
                }
            }
        }

        self.nodes.take(h).into_entry()
    }

    /// Entry handles in key order.
    pub(crate) fn in_order_handles(&self) -> Vec<Handle> {
        let mut handles = Vec::with_capacity(self.len());
        let mut h = self.first();
        while h != Handle::HEADER {
            handles.push(h);
            h = self.advance(h, Direction::Right);
        }
        handles
    }

    /// Removes every entry, returning them in key order.
    pub(crate) fn drain_to_vec(&mut self) -> Vec<(K, V)> {
        let handles = self.in_order_handles();
        let entries = handles.into_iter().map(|h| self.nodes.take(h).into_entry()).collect();
        self.clear();
        entries
    }

    /// Entry references in key order, values mutable.
    pub(crate) fn entries_mut(&mut self) -> Vec<(&K, &mut V)> {
        let order = self.in_order_handles();
        let mut by_slot: Vec<Option<(&K, &mut V)>> = Vec::new();
        by_slot.resize_with(self.nodes.slot_count(), || None);
        for (h, node) in self.nodes.iter_mut() {
            by_slot[h.to_index()] = node.split_mut().1;
        }
        order
            .into_iter()
            .map(|h| by_slot[h.to_index()].take().expect("`entries_mut()` - entry visited twice!"))
            .collect()
    }

    /// Zero-based position of the entry at `h` in key order.
    pub(crate) fn rank_of_handle(&self, h: Handle) -> usize {
        let mut rank = self.size_of(self.child(h, Direction::Left)).to_usize();
        let mut node = h;
        loop {
            let head = self.parent(node);
            if self.is_header(head) {
                return rank;
            }
            if self.direction(node) == Direction::Right {
                rank += self.size_of(self.child(head, Direction::Left)).to_usize() + 1;
            }
            node = head;
        }
    }

    /// Zero-based position of `key` in key order.
    pub(crate) fn rank_of<Q>(&self, key: &Q) -> Option<usize>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.search(key).map(|h| self.rank_of_handle(h))
    }

    /// Handle of the entry at position `rank` in key order.
    pub(crate) fn handle_by_rank(&self, rank: usize) -> Option<Handle> {
        if rank >= self.len() {
            return None;
        }

        let mut node = self.root()?;
        let mut remaining = rank;
        loop {
            let left = self.size_of(self.child(node, Direction::Left)).to_usize();
            match remaining.cmp(&left) {
                Ordering::Less => {
                    node = self.child(node, Direction::Left)?;
                }
                Ordering::Equal => return Some(node),
                Ordering::Greater => {
                    remaining -= left + 1;
                    debug_assert!(
                        self.child(node, Direction::Right).is_some(),
                        "handle_by_rank: subtree size invariant violated at rank {rank}"
                    );
                    node = self.child(node, Direction::Right)?;
                }
            }
        }
    }
}

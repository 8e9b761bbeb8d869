//! Pointer rewiring on the node arena.
//!
//! Nothing here looks at colors or sizes except `swap_with_successor`, which
//! exchanges them together with the slots so every position keeps its own.

use super::handle::Handle;
use super::node::{Color, Direction};
use super::raw_osrbtree_map::RawOSRBTreeMap;

impl<K, V> RawOSRBTreeMap<K, V> {
    /// True for the sentinel: its parent points back at it and it carries the header color.
    #[inline]
    pub(crate) fn is_header(&self, h: Handle) -> bool {
        let link = self.link(h);
        link.color == Color::Header && self.link(link.parent).parent == h
    }

    #[inline]
    pub(crate) fn parent(&self, h: Handle) -> Handle {
        self.link(h).parent
    }

    #[inline]
    pub(crate) fn child(&self, h: Handle, dir: Direction) -> Option<Handle> {
        self.link(h).child(dir)
    }

    /// Which side of its parent `h` hangs from. Not meaningful for the root.
    #[inline]
    pub(crate) fn direction(&self, h: Handle) -> Direction {
        if self.child(self.parent(h), Direction::Left) == Some(h) {
            Direction::Left
        } else {
            Direction::Right
        }
    }

    /// The other child of `h`'s parent.
    #[inline]
    pub(crate) fn sibling(&self, h: Handle) -> Option<Handle> {
        self.child(self.parent(h), !self.direction(h))
    }

    /// Hangs `child` under `parent` on side `dir`.
    #[inline]
    pub(crate) fn link_child(&mut self, parent: Handle, dir: Direction, child: Handle) {
        self.link_mut(parent).child[dir.index()] = Some(child);
        self.link_mut(child).parent = parent;
    }

    /// Like [`link_child`](Self::link_child), for a subtree that may be empty.
    #[inline]
    pub(crate) fn try_link_child(&mut self, parent: Handle, dir: Direction, child: Option<Handle>) {
        self.link_mut(parent).child[dir.index()] = child;
        if let Some(child) = child {
            self.link_mut(child).parent = parent;
        }
    }

    /// Points the slot that holds `node` at `next` instead, and adopts `next` into it.
    pub(crate) fn relink_parent(&mut self, node: Handle, next: Handle) {
        let head = self.parent(node);
        if self.is_header(head) {
            self.link_mut(head).parent = next;
        } else {
            let dir = self.direction(node);
            self.link_mut(head).child[dir.index()] = Some(next);
        }
        self.link_mut(next).parent = head;
    }

    /// Empties the slot that holds the childless `node`.
    pub(crate) fn detach(&mut self, node: Handle) {
        let head = self.parent(node);
        if self.is_header(head) {
            self.link_mut(head).parent = head;
        } else {
            let dir = self.direction(node);
            self.link_mut(head).child[dir.index()] = None;
        }
    }

    /// The last node reached by following `dir` from `h`.
    pub(crate) fn extreme(&self, mut h: Handle, dir: Direction) -> Handle {
        while let Some(next) = self.child(h, dir) {
            h = next;
        }
        h
    }

    /// In-order neighbour of `h`: successor for `Right`, predecessor for `Left`.
    ///
    /// Stepping off either end yields the sentinel. Stepping from the sentinel
    /// wraps around to the first (`Right`) or last (`Left`) entry.
    ///
    /// # Panics
    /// If the climb toward the root visits more nodes than the tree holds,
    /// which means the parent links are corrupt.
    pub(crate) fn advance(&self, h: Handle, dir: Direction) -> Handle {
        if h == Handle::HEADER {
            return match self.root() {
                Some(root) => self.extreme(root, !dir),
                None => Handle::HEADER,
            };
        }

        if let Some(next) = self.child(h, dir) {
            return self.extreme(next, !dir);
        }

        let limit = self.len();
        let mut node = h;
        for _ in 0..=limit {
            let head = self.parent(node);
            if self.is_header(head) || self.child(head, dir) != Some(node) {
                return head;
            }
            node = head;
        }
        panic!("`RawOSRBTreeMap::advance()` - climbed past the root without reaching the header!");
    }

    /// Moves `node` (which has two children) into the slot of its in-order
    /// successor and the successor into `node`'s slot. Entries stay in their
    /// arena slots, so handles held elsewhere remain valid.
    ///
    /// Afterwards `node` has no left child.
    pub(crate) fn swap_with_successor(&mut self, node: Handle) {
        let left = self.child(node, Direction::Left).expect("`swap_with_successor()` - node has no left child!");
        let right = self.child(node, Direction::Right).expect("`swap_with_successor()` - node has no right child!");
        let next = self.extreme(right, Direction::Left);
        let next_right = self.child(next, Direction::Right);

        let a = *self.link(node);
        let b = *self.link(next);
        let node_link = self.link_mut(node);
        node_link.color = b.color;
        node_link.size = b.size;
        let next_link = self.link_mut(next);
        next_link.color = a.color;
        next_link.size = a.size;

        if next == right {
            self.relink_parent(node, next);
            self.link_child(next, Direction::Left, left);
            self.link_child(next, Direction::Right, node);
        } else {
            let next_parent = self.parent(next);
            self.relink_parent(node, next);
            self.link_child(next_parent, Direction::Left, node);
            self.link_child(next, Direction::Left, left);
            self.link_child(next, Direction::Right, right);
        }
        self.link_mut(node).child[Direction::Left.index()] = None;
        self.try_link_child(node, Direction::Right, next_right);
    }
}

use core::ops::Not;

use super::handle::Handle;
use super::size::Size;

/// Balance marker of a node.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Color {
    Red,
    Black,
    /// Carried by the sentinel only, so it is neither red nor black to the fixups.
    Header,
}

/// Side of a parent a child hangs from; also the index into `Link::child`.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Direction {
    Left = 0,
    Right = 1,
}

impl Direction {
    #[inline]
    pub(crate) const fn index(self) -> usize {
        self as usize
    }
}

impl Not for Direction {
    type Output = Direction;

    #[inline]
    fn not(self) -> Direction {
        match self {
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }
}

/// The structural part of a node: everything the balancing engine reads or writes.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct Link {
    pub(crate) color: Color,
    pub(crate) size: Size,
    pub(crate) parent: Handle,
    pub(crate) child: [Option<Handle>; 2],
}

impl Link {
    /// A red, single-node subtree hanging from `parent`.
    pub(crate) const fn detached(parent: Handle) -> Self {
        Link {
            color: Color::Red,
            size: Size::ONE,
            parent,
            child: [None, None],
        }
    }

    /// The sentinel of an empty tree: parent of itself, size zero.
    pub(crate) const fn header() -> Self {
        Link {
            color: Color::Header,
            size: Size::ZERO,
            parent: Handle::HEADER,
            child: [None, None],
        }
    }

    #[inline]
    pub(crate) const fn child(&self, dir: Direction) -> Option<Handle> {
        self.child[dir.index()]
    }

    #[inline]
    pub(crate) const fn is_red(&self) -> bool {
        matches!(self.color, Color::Red)
    }
}

/// A tree node with its entry stored inline.
///
/// Only the sentinel has no entry.
#[derive(Clone)]
pub(crate) struct Node<K, V> {
    pub(crate) link: Link,
    entry: Option<(K, V)>,
}

impl<K, V> Node<K, V> {
    pub(crate) const fn new(link: Link, key: K, value: V) -> Self {
        Node {
            link,
            entry: Some((key, value)),
        }
    }

    pub(crate) const fn header() -> Self {
        Node {
            link: Link::header(),
            entry: None,
        }
    }

    /// The stored entry.
    ///
    /// # Panics
    /// If called on the sentinel, which means a handle escaped its tree.
    #[inline]
    pub(crate) fn entry(&self) -> (&K, &V) {
        match &self.entry {
            Some((key, value)) => (key, value),
            None => panic!("`Node::entry()` - the sentinel has no entry!"),
        }
    }

    #[inline]
    pub(crate) fn entry_mut(&mut self) -> (&K, &mut V) {
        match &mut self.entry {
            Some((key, value)) => (&*key, value),
            None => panic!("`Node::entry_mut()` - the sentinel has no entry!"),
        }
    }

    #[inline]
    pub(crate) fn key(&self) -> &K {
        self.entry().0
    }

    pub(crate) fn into_entry(self) -> (K, V) {
        self.entry.expect("`Node::into_entry()` - the sentinel has no entry!")
    }

    /// Splits the node into its links and its entry, if it has one.
    pub(crate) fn split_mut(&mut self) -> (&Link, Option<(&K, &mut V)>) {
        match &mut self.entry {
            Some((key, value)) => (&self.link, Some((&*key, value))),
            None => (&self.link, None),
        }
    }
}

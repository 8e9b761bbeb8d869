use core::fmt;
use core::ptr;

use super::OSRBTreeMap;
use crate::raw::{Direction, Handle, RawOSRBTreeMap};

/// A cursor over an `OSRBTreeMap`.
///
/// A cursor points at an entry or at the "end" position, which sits between
/// the last and the first entry. Moving forward from the end reaches the
/// first entry; moving backward from it reaches the last one.
///
/// Two cursors compare equal when they point at the same position of the same map.
///
/// # Examples
///
/// ```
/// use osrb_tree::OSRBTreeMap;
///
/// let map = OSRBTreeMap::from([(1, "a"), (2, "b")]);
/// let mut cursor = map.cursor_end();
/// cursor.move_next();
/// assert_eq!(cursor.key(), Some(&1));
/// cursor.move_prev();
/// assert!(cursor.is_end());
/// cursor.move_prev();
/// assert_eq!(cursor.key(), Some(&2));
/// ```
pub struct Cursor<'a, K, V> {
    tree: &'a RawOSRBTreeMap<K, V>,
    current: Handle,
}

/// A cursor over an `OSRBTreeMap` with editing operations.
///
/// Besides mutable access to the current value, a `CursorMut` can remove the
/// entry it points at with [`remove_current`](CursorMut::remove_current).
pub struct CursorMut<'a, K, V> {
    tree: &'a mut RawOSRBTreeMap<K, V>,
    current: Handle,
}

impl<'a, K, V> Cursor<'a, K, V> {
    pub(super) fn new(tree: &'a RawOSRBTreeMap<K, V>, current: Handle) -> Self {
        Cursor { tree, current }
    }

    /// Moves to the next entry in key order, or from the last entry to the end.
    ///
    /// # Complexity
    ///
    /// O(log n) worst case, amortized O(1).
    pub fn move_next(&mut self) {
        self.current = self.tree.advance(self.current, Direction::Right);
    }

    /// Moves to the previous entry in key order, or from the first entry to the end.
    pub fn move_prev(&mut self) {
        self.current = self.tree.advance(self.current, Direction::Left);
    }

    /// Returns `true` if the cursor is at the end position.
    #[must_use]
    pub fn is_end(&self) -> bool {
        self.current == Handle::HEADER
    }

    /// The key at the cursor, or `None` at the end position.
    #[must_use]
    pub fn key(&self) -> Option<&'a K> {
        self.key_value().map(|(k, _)| k)
    }

    /// The value at the cursor, or `None` at the end position.
    #[must_use]
    pub fn value(&self) -> Option<&'a V> {
        self.key_value().map(|(_, v)| v)
    }

    /// The entry at the cursor, or `None` at the end position.
    #[must_use]
    pub fn key_value(&self) -> Option<(&'a K, &'a V)> {
        let tree = self.tree;
        (!self.is_end()).then(|| tree.node(self.current).entry())
    }

    /// Zero-based position of the cursor in key order. The end position
    /// reports the map's length.
    ///
    /// This is an order-statistic extension.
    ///
    /// # Examples
    ///
    /// ```
    /// use osrb_tree::OSRBTreeMap;
    ///
    /// let map = OSRBTreeMap::from([(10, ()), (20, ()), (30, ())]);
    /// assert_eq!(map.find(&20).rank(), 1);
    /// assert_eq!(map.cursor_end().rank(), 3);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n)
    #[must_use]
    pub fn rank(&self) -> usize {
        if self.is_end() {
            self.tree.len()
        } else {
            self.tree.rank_of_handle(self.current)
        }
    }
}

impl<K, V> Clone for Cursor<'_, K, V> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K, V> Copy for Cursor<'_, K, V> {}

impl<K, V> PartialEq for Cursor<'_, K, V> {
    fn eq(&self, other: &Self) -> bool {
        ptr::eq(self.tree, other.tree) && self.current == other.current
    }
}

impl<K, V> Eq for Cursor<'_, K, V> {}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for Cursor<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Cursor").field(&self.key_value()).finish()
    }
}

impl<'a, K, V> CursorMut<'a, K, V> {
    pub(super) fn new(tree: &'a mut RawOSRBTreeMap<K, V>, current: Handle) -> Self {
        CursorMut { tree, current }
    }

    /// Moves to the next entry in key order, or from the last entry to the end.
    pub fn move_next(&mut self) {
        self.current = self.tree.advance(self.current, Direction::Right);
    }

    /// Moves to the previous entry in key order, or from the first entry to the end.
    pub fn move_prev(&mut self) {
        self.current = self.tree.advance(self.current, Direction::Left);
    }

    /// Returns `true` if the cursor is at the end position.
    #[must_use]
    pub fn is_end(&self) -> bool {
        self.current == Handle::HEADER
    }

    #[must_use]
    pub fn key(&self) -> Option<&K> {
        self.as_cursor().key()
    }

    #[must_use]
    pub fn value(&self) -> Option<&V> {
        self.as_cursor().value()
    }

    /// A mutable reference to the value at the cursor, or `None` at the end position.
    pub fn value_mut(&mut self) -> Option<&mut V> {
        self.key_value_mut().map(|(_, v)| v)
    }

    /// The entry at the cursor with its value mutable. The key stays shared
    /// because changing it could break the map's ordering.
    pub fn key_value_mut(&mut self) -> Option<(&K, &mut V)> {
        if self.is_end() {
            return None;
        }
        Some(self.tree.node_mut(self.current).entry_mut())
    }

    /// Zero-based position of the cursor in key order. The end position
    /// reports the map's length.
    #[must_use]
    pub fn rank(&self) -> usize {
        self.as_cursor().rank()
    }

    /// A read-only cursor at the same position, borrowing this one.
    #[must_use]
    pub fn as_cursor(&self) -> Cursor<'_, K, V> {
        Cursor::new(self.tree, self.current)
    }

    /// Removes the entry at the cursor and moves to the entry after it.
    ///
    /// Returns `None` and does nothing at the end position.
    ///
    /// # Examples
    ///
    /// ```
    /// use osrb_tree::OSRBTreeMap;
    ///
    /// let mut map: OSRBTreeMap<i32, i32> = (1..=6).map(|k| (k, k)).collect();
    /// let mut cursor = map.cursor_front_mut();
    /// while let Some(&key) = cursor.key() {
    ///     if key % 2 == 0 {
    ///         cursor.remove_current();
    ///     } else {
    ///         cursor.move_next();
    ///     }
    /// }
    /// assert!(map.keys().copied().eq([1, 3, 5]));
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n)
    pub fn remove_current(&mut self) -> Option<(K, V)> {
        if self.is_end() {
            return None;
        }
        let next = self.tree.advance(self.current, Direction::Right);
        let entry = self.tree.erase_at(self.current);
        self.current = next;
        Some(entry)
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for CursorMut<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("CursorMut").field(&self.as_cursor().key_value()).finish()
    }
}

impl<K, V> OSRBTreeMap<K, V> {
    /// Returns a cursor at the first entry, or the end position if the map is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use osrb_tree::OSRBTreeMap;
    ///
    /// let map = OSRBTreeMap::from([(2, "b"), (1, "a")]);
    /// assert_eq!(map.cursor_front().key(), Some(&1));
    /// assert!(OSRBTreeMap::<i32, i32>::new().cursor_front().is_end());
    /// ```
    pub fn cursor_front(&self) -> Cursor<'_, K, V> {
        Cursor::new(&self.raw, self.raw.first())
    }

    /// Returns a cursor at the last entry, or the end position if the map is empty.
    pub fn cursor_back(&self) -> Cursor<'_, K, V> {
        Cursor::new(&self.raw, self.raw.last())
    }

    /// Returns a cursor at the end position.
    pub fn cursor_end(&self) -> Cursor<'_, K, V> {
        Cursor::new(&self.raw, Handle::HEADER)
    }

    /// Returns a mutable cursor at the first entry, or the end position if the map is empty.
    pub fn cursor_front_mut(&mut self) -> CursorMut<'_, K, V> {
        let first = self.raw.first();
        CursorMut::new(&mut self.raw, first)
    }

    /// Returns a mutable cursor at the last entry, or the end position if the map is empty.
    pub fn cursor_back_mut(&mut self) -> CursorMut<'_, K, V> {
        let last = self.raw.last();
        CursorMut::new(&mut self.raw, last)
    }

    /// Returns a mutable cursor at the end position.
    pub fn cursor_end_mut(&mut self) -> CursorMut<'_, K, V> {
        CursorMut::new(&mut self.raw, Handle::HEADER)
    }
}

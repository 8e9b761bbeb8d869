use super::OSRBTreeMap;
use crate::raw::RawOSRBTreeMap;

impl<K, V> OSRBTreeMap<K, V> {
    /// Creates an empty map with room for at least `capacity` entries before
    /// its node storage has to grow.
    ///
    /// This is an extension and is not part of the standard `BTreeMap` API.
    ///
    /// # Examples
    ///
    /// ```
    /// use osrb_tree::OSRBTreeMap;
    ///
    /// let map: OSRBTreeMap<i32, i32> = OSRBTreeMap::with_capacity(32);
    /// assert!(map.is_empty());
    /// ```
    ///
    /// # Complexity
    ///
    /// O(capacity) for memory allocation.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        OSRBTreeMap {
            raw: RawOSRBTreeMap::with_capacity(capacity),
        }
    }

    /// Returns the number of entries the map can hold without growing its
    /// node storage.
    ///
    /// This is an extension and is not part of the standard `BTreeMap` API.
    ///
    /// # Examples
    ///
    /// ```
    /// use osrb_tree::OSRBTreeMap;
    ///
    /// let map: OSRBTreeMap<i32, i32> = OSRBTreeMap::with_capacity(32);
    /// assert!(map.capacity() >= 32);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(1)
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.raw.capacity()
    }
}

use alloc::vec::Vec;

use super::handle::Handle;
use crate::error::AllocError;

/// Slot storage for tree nodes, addressed by [`Handle`].
///
/// Freed slots are recycled before the backing vector grows, so handles stay
/// dense and a handle is only ever reused after its node has been released.
#[derive(Clone)]
pub(crate) struct Arena<T> {
    slots: Vec<Option<T>>,
    free: Vec<Handle>,
}

impl<T> Arena<T> {
    pub(crate) const fn new() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
        }
    }

    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            free: Vec::new(),
        }
    }

    pub(crate) fn capacity(&self) -> usize {
        self.slots.capacity()
    }

    pub(crate) const fn len(&self) -> usize {
        self.slots.len().saturating_sub(self.free.len())
    }

    /// Stores `element`, panicking if the arena cannot grow.
    pub(crate) fn alloc(&mut self, element: T) -> Handle {
        match self.try_alloc(element) {
            Ok(handle) => handle,
            Err(err) => panic!("`Arena::alloc()` - {err}"),
        }
    }

    /// Stores `element` in a free slot, or a new one.
    ///
    /// On failure nothing has been modified and `element` is dropped.
    pub(crate) fn try_alloc(&mut self, element: T) -> Result<Handle, AllocError> {
        if let Some(h) = self.free.pop() {
            // Reuse a free slot/handle.
            self.slots[h.to_index()] = Some(element);
            return Ok(h);
        }

        // Slot indices run from 0 to `Handle::MAX`; slot 0 is the sentinel, so
        // `max` counts the slots left for entries.
        if self.slots.len() > Handle::MAX {
            return Err(AllocError::CapacityExceeded { max: Handle::MAX });
        }
        // Reserve first so a refused allocation leaves the arena untouched.
        self.slots.try_reserve(1)?;
        // Make sure a later `take` can record the slot without allocating.
        self.free.try_reserve(self.slots.len() + 1)?;
        self.slots.push(Some(element));
        Ok(Handle::from_index(self.slots.len() - 1))
    }

    #[inline]
    pub(crate) fn get(&self, handle: Handle) -> &T {
        self.slots[handle.to_index()].as_ref().expect("`Arena::get()` - `handle` is invalid!")
    }

    #[inline]
    pub(crate) fn get_mut(&mut self, handle: Handle) -> &mut T {
        self.slots[handle.to_index()].as_mut().expect("`Arena::get_mut()` - `handle` is invalid!")
    }

    /// Iterates over every live element with its handle, in slot order.
    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = (Handle, &mut T)> {
        self.slots
            .iter_mut()
            .enumerate()
            .filter_map(|(index, slot)| slot.as_mut().map(|element| (Handle::from_index(index), element)))
    }

    /// Number of slots ever handed out, live or free.
    pub(crate) fn slot_count(&self) -> usize {
        self.slots.len()
    }

    pub(crate) fn take(&mut self, handle: Handle) -> T {
        let element = self.slots[handle.to_index()].take().expect("`Arena::take()` - `handle` is invalid!");
        self.free.push(handle);
        element
    }

    pub(crate) fn clear(&mut self) {
        self.slots.clear();
        self.free.clear();
    }
}

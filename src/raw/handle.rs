use core::num::NonZero;

#[cfg(test)]
pub(super) type RawHandle = u16;
#[cfg(not(test))]
pub(super) type RawHandle = u32;

/// Stable index of a node slot in the tree's arena.
///
/// Children are stored as `Option<Handle>`; the `NonZero` niche keeps that
/// the same width as the handle itself.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
#[repr(transparent)]
pub(crate) struct Handle(NonZero<RawHandle>);

impl Handle {
    /// Largest addressable slot index. The sentinel takes slot 0, so a tree
    /// holds at most `MAX` entries.
    pub(crate) const MAX: usize = (RawHandle::MAX - 1) as usize;

    /// The sentinel/header slot. Allocated first by every tree, never freed.
    pub(crate) const HEADER: Self = Self::from_index(0);

    #[inline]
    pub(crate) const fn from_index(index: usize) -> Self {
        assert!(index <= Self::MAX, "`Handle::from_index()` - `index` > `Handle::MAX`!");
        // `index + 1` cannot be zero and cannot overflow.
        #[allow(clippy::cast_possible_truncation)]
        match NonZero::new((index + 1) as RawHandle) {
            Some(raw) => Self(raw),
            None => unreachable!(),
        }
    }

    #[inline]
    pub(crate) const fn to_index(self) -> usize {
        (self.0.get() - 1) as usize
    }
}

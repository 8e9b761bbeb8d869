use super::handle::{Handle, RawHandle};

/// Number of entries in a subtree, inclusive of its root.
///
/// Stored at handle width: a subtree can never hold more nodes than the
/// arena can address.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Ord, PartialOrd)]
#[repr(transparent)]
pub(crate) struct Size(RawHandle);

impl Size {
    pub(crate) const MAX: usize = Handle::MAX;
    pub(crate) const ZERO: Self = Self(0);
    pub(crate) const ONE: Self = Self(1);

    #[inline]
    pub(crate) const fn from_usize(size: usize) -> Self {
        assert!(size <= Self::MAX, "`Size::from_usize()` - `size` > `Size::MAX`!");
        #[allow(clippy::cast_possible_truncation)]
        Self(size as RawHandle)
    }

    #[inline]
    pub(crate) const fn to_usize(self) -> usize {
        self.0 as usize
    }

    #[inline]
    pub(crate) const fn increment(self) -> Self {
        Self::from_usize(self.to_usize() + 1)
    }

    #[inline]
    pub(crate) const fn decrement(self) -> Self {
        assert!(self.0 > 0, "`Size::decrement()` - subtree size underflow!");
        Self(self.0 - 1)
    }

    /// Size of a node whose children have the given sizes.
    #[inline]
    pub(crate) const fn of_children(left: Self, right: Self) -> Self {
        Self::from_usize(1 + left.to_usize() + right.to_usize())
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use static_assertions::assert_eq_size;

    assert_eq_size!(Size, RawHandle);

    #[test]
    #[should_panic(expected = "`Size::from_usize()` - `size` > `Size::MAX`!")]
    fn invalid_size() {
        let _ = Size::from_usize(Size::MAX + 1);
    }

    #[test]
    #[should_panic(expected = "`Size::decrement()` - subtree size underflow!")]
    fn decrement_below_zero() {
        let _ = Size::ZERO.decrement();
    }

    #[test]
    fn of_children_counts_the_parent() {
        assert_eq!(Size::of_children(Size::ZERO, Size::ZERO), Size::ONE);
        assert_eq!(Size::of_children(Size::from_usize(3), Size::from_usize(4)).to_usize(), 8);
    }

    proptest! {
        #[test]
        fn size_round_trip(size in 0..=Size::MAX) {
            prop_assert_eq!(Size::from_usize(size).to_usize(), size);
        }

        #[test]
        fn increment_then_decrement(size in 0..Size::MAX) {
            let s = Size::from_usize(size);
            prop_assert_eq!(s.increment().decrement(), s);
        }
    }
}

//! Errors reported by fallible map operations.

use alloc::collections::TryReserveError;
use core::fmt;

/// Node storage for a new entry could not be obtained.
///
/// Returned by [`OSRBTreeMap::try_insert`](crate::OSRBTreeMap::try_insert).
/// The map is left exactly as it was before the call.
#[derive(Clone, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum AllocError {
    /// Every addressable node slot is in use.
    CapacityExceeded {
        /// The largest number of entries a single map can hold.
        max: usize,
    },

    /// The global allocator refused to grow the node storage.
    OutOfMemory(TryReserveError),
}

impl fmt::Display for AllocError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CapacityExceeded { max } => write!(f, "node storage is full ({max} entries)"),
            Self::OutOfMemory(err) => write!(f, "node allocation failed: {err}"),
        }
    }
}

impl core::error::Error for AllocError {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        match self {
            Self::CapacityExceeded { .. } => None,
            Self::OutOfMemory(err) => Some(err),
        }
    }
}

impl From<TryReserveError> for AllocError {
    fn from(err: TryReserveError) -> Self {
        Self::OutOfMemory(err)
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;
    use alloc::vec::Vec;

    use super::*;

    #[test]
    fn display_names_the_limit() {
        let err = AllocError::CapacityExceeded { max: 42 };
        assert_eq!(err.to_string(), "node storage is full (42 entries)");
        assert!(core::error::Error::source(&err).is_none());
    }

    #[test]
    fn reserve_failure_converts() {
        let mut v: Vec<u64> = Vec::new();
        let reserve = v.try_reserve(usize::MAX).expect_err("reserving usize::MAX elements must fail");
        let err = AllocError::from(reserve.clone());
        assert_eq!(err, AllocError::OutOfMemory(reserve));
        assert!(err.to_string().starts_with("node allocation failed: "));
        assert!(core::error::Error::source(&err).is_some());
    }
}

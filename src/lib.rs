//! Order-statistic red-black tree map for Rust.
//!
//! This crate provides [`OSRBTreeMap`], an ordered map over a red-black tree
//! whose nodes also record the size of their subtree. Besides the usual
//! ordered-map operations it answers order-statistic queries in O(log n):
//!
//! - [`get_by_rank`](OSRBTreeMap::get_by_rank) - Get the element at a given sorted position
//! - [`rank_of`](OSRBTreeMap::rank_of) - Get the sorted position of a key
//! - Indexing by [`Rank`] - e.g., `map[Rank(0)]` for the first element
//!
//! # Example
//!
//! ```
//! use osrb_tree::{OSRBTreeMap, Rank};
//!
//! let mut scores = OSRBTreeMap::new();
//! scores.insert("Alice", 100);
//! scores.insert("Bob", 85);
//! scores.insert("Carol", 92);
//!
//! assert_eq!(scores.get(&"Bob"), Some(&85));
//! assert_eq!(scores.len(), 3);
//!
//! // Get the median (rank 1 = second element in sorted order)
//! let (name, score) = scores.get_by_rank(1).unwrap();
//! assert_eq!((*name, *score), ("Bob", 85));
//!
//! // Find the rank of a key
//! assert_eq!(scores.rank_of(&"Carol"), Some(2));
//!
//! // Index by rank
//! assert_eq!(scores[Rank(0)], 100);
//!
//! // Walk with a cursor and remove in place
//! let mut cursor = scores.find_mut(&"Bob");
//! assert_eq!(cursor.remove_current(), Some(("Bob", 85)));
//! assert_eq!(cursor.key(), Some(&"Carol"));
//! ```
//!
//! # Features
//!
//! - **`no_std` compatible** - Only requires `alloc`, no standard library dependency
//! - **Stable entries** - Removing an entry never moves another, so cursors keep working
//! - **Fallible insertion** - [`try_insert`](OSRBTreeMap::try_insert) reports an [`AllocError`]
//!   and leaves the map untouched when node storage cannot grow
//! - **`tracing`** (optional cargo feature) - Emits rebalancing and lifecycle events
//!
//! # Implementation
//!
//! Nodes live in an arena and refer to each other by index. Slot 0 holds a
//! sentinel that acts as the parent of the root and as the end position of
//! every cursor; its size field doubles as the element count. Insertion and
//! removal repair the red-black invariants bottom-up with single rotations and
//! "zigzag" double rotations, keeping the subtree sizes exact along the way.

#![no_std]
// These forbid rules and lint groups are meant to be very restrictive.
#![forbid(unsafe_code)]
#![forbid(keyword_idents)]
#![forbid(non_ascii_idents)]
#![forbid(unreachable_pub)]
#![warn(clippy::all)]
#![warn(clippy::cargo)]
#![warn(clippy::pedantic)]
// Enable coverage attributes for nightly builds.
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

extern crate alloc;

mod error;
mod order_statistic;
mod raw;
mod tracing_helpers;

pub mod osrbtree_map;

pub use error::AllocError;
pub use order_statistic::Rank;
pub use osrbtree_map::OSRBTreeMap;

mod arena;
mod handle;
mod link;
mod node;
mod raw_osrbtree_map;
mod rebalance;
mod size;

pub(crate) use handle::Handle;
pub(crate) use node::Direction;
pub(crate) use raw_osrbtree_map::{Inserted, RawOSRBTreeMap};

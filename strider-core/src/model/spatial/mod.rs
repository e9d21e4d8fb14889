mod rtree;
mod rtree_node;
mod spatial_item;

pub use rtree::RTree;
pub use rtree_node::{NodeLimits, ABSOLUTE_MIN_MAX_ENTRIES, DEFAULT_MAX_ENTRIES};
pub use spatial_item::SpatialItem;

use crate::model::geometry::Rect;

/// one indexed entry: an integer key, the rectangle it is indexed under,
/// and an arbitrary payload carried back out of range queries
#[derive(Clone, Debug)]
pub struct SpatialItem<D> {
    pub key: u64,
    pub bounds: Rect,
    pub data: D,
}

impl<D> SpatialItem<D> {
    pub fn new(key: u64, bounds: Rect, data: D) -> SpatialItem<D> {
        SpatialItem { key, bounds, data }
    }
}

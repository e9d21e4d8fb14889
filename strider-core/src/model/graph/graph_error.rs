use crate::model::geometry::PointKey;

use super::LinkId;

#[derive(thiserror::Error, Debug)]
pub enum GraphError {
    #[error("link not found in graph: {0}")]
    LinkNotFound(LinkId),
    #[error("node not found in graph: {0}")]
    NodeNotFound(PointKey),
    #[error("link {0} has no recorded owning platform")]
    OwnerNotFound(LinkId),
}

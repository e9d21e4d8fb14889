mod graph_error;
mod link;
mod link_id;
mod nav_graph;
mod node;

pub use graph_error::GraphError;
pub use link::NavLink;
pub use link_id::LinkId;
pub use nav_graph::{NavGraph, PlatformRecord};
pub use node::NavNode;

mod a_star;
mod backtrack;
mod search_error;
mod trace;

pub use a_star::run_link_oriented;
pub use backtrack::link_oriented_route;
pub use search_error::SearchError;
pub use trace::{Trace, TraceStep};

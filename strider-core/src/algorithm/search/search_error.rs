use crate::model::graph::{GraphError, LinkId};

#[derive(thiserror::Error, Debug)]
pub enum SearchError {
    #[error("the search failed due to a graph error: {source}")]
    GraphFailure {
        #[from]
        source: GraphError,
    },
    #[error("loop detected in search result at link {0}")]
    LoopInSearchResult(LinkId),
    #[error("internal error due to search logic: {0}")]
    InternalError(String),
}

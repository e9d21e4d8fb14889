use crate::algorithm::search::SearchError;

#[derive(thiserror::Error, Debug)]
pub enum PlannerError {
    #[error("invalid planner configuration: {0}")]
    InvalidConfiguration(String),
    #[error("the planner failed during path search: {source}")]
    SearchFailure {
        #[from]
        source: SearchError,
    },
}

use crate::model::graph::LinkId;
use crate::model::scene::PlatformId;

/// one step of a solved route: a link paired with the platform that owns
/// it. steering walks the trace by matching the agent's standing
/// platform against the step platforms.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct TraceStep {
    pub link: LinkId,
    pub platform: PlatformId,
}

/// an ordered route from origin to destination, inclusive. empty when
/// the destination is unreachable.
pub type Trace = Vec<TraceStep>;

use crate::model::geometry::Rect;

use super::PlatformId;

/// the two characters the engine cares about: the navigating agent and
/// the platform target it chases
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Body {
    Agent,
    Target,
}

/// host-side character controller queries. `standing_platform` is backed
/// by the host's ground raycast and returns `None` while airborne.
pub trait BodyProvider: Send + Sync {
    fn standing_platform(&self, body: Body) -> Option<PlatformId>;

    /// current world-space bounding rectangle of the character collider
    fn bounds(&self, body: Body) -> Rect;
}

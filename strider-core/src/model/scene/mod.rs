mod arc_provider;
mod body;
mod platform;
mod scene_provider;
mod steering;

pub use arc_provider::{ArcProvider, DEFAULT_ARC_SAMPLES, DEFAULT_ARC_SAMPLE_INTERVAL};
pub use body::{Body, BodyProvider};
pub use platform::{Platform, PlatformId};
pub use scene_provider::{SceneFilter, SceneProvider};
pub use steering::SteeringSink;

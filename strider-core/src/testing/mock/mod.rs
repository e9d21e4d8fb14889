mod arcs;
mod scene;
mod steering;

pub use arcs::ParabolicArcProvider;
pub use scene::MockScene;
pub use steering::RecordingSteering;

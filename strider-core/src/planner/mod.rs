mod arc_anchor;
mod fall_linker;
mod jump_linker;
mod navigator;
mod planner_config;
mod planner_error;
mod segment;

pub use navigator::{LockDiagnostics, Navigator};
pub use planner_config::PlannerConfig;
pub use planner_error::PlannerError;
pub use segment::{SegmentData, SEGMENT_RECT_INFLATION};

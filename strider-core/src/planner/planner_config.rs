use serde::Deserialize;

use crate::model::scene::SceneFilter;
use crate::model::spatial::DEFAULT_MAX_ENTRIES;

use super::PlannerError;

/// planner tuning options. hosts typically deserialize this from their
/// settings store; every field has a default matching the shipped
/// behavior.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct PlannerConfig {
    /// top-face split target length, in multiples of the agent width.
    /// accepted range is 1 to 10.
    pub segment_width_multiplier: f64,
    /// minimum game-time seconds between graph maintenance ticks
    pub graph_update_interval: f64,
    /// rebuild the whole graph every tick instead of diffing the scene
    pub full_graph_rebuild: bool,
    /// layer mask and tag filter applied to scene enumeration
    pub scene_filter: SceneFilter,
    /// spatial index fan-out
    pub max_rtree_entries: usize,
    /// reader lock acquisition timeout, milliseconds
    pub read_timeout_ms: u64,
    /// writer lock acquisition timeout, milliseconds
    pub write_timeout_ms: u64,
}

impl Default for PlannerConfig {
    fn default() -> PlannerConfig {
        PlannerConfig {
            segment_width_multiplier: 5.0,
            graph_update_interval: 0.25,
            full_graph_rebuild: false,
            scene_filter: SceneFilter::default(),
            max_rtree_entries: DEFAULT_MAX_ENTRIES,
            read_timeout_ms: 10,
            write_timeout_ms: 20,
        }
    }
}

impl PlannerConfig {
    pub fn validate(&self) -> Result<(), PlannerError> {
        if !(1.0..=10.0).contains(&self.segment_width_multiplier) {
            return Err(PlannerError::InvalidConfiguration(format!(
                "segment_width_multiplier must be in [1, 10], got {}",
                self.segment_width_multiplier
            )));
        }
        if self.graph_update_interval < 0.0 {
            return Err(PlannerError::InvalidConfiguration(format!(
                "graph_update_interval must be non-negative, got {}",
                self.graph_update_interval
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = PlannerConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.segment_width_multiplier, 5.0);
        assert_eq!(config.graph_update_interval, 0.25);
        assert!(!config.full_graph_rebuild);
    }

    #[test]
    fn test_deserialize_with_defaults() {
        let config: PlannerConfig = serde_json::from_str(
            r#"{"segment_width_multiplier": 3.0, "full_graph_rebuild": true}"#,
        )
        .unwrap();
        assert_eq!(config.segment_width_multiplier, 3.0);
        assert!(config.full_graph_rebuild);
        // untouched fields keep their defaults
        assert_eq!(config.graph_update_interval, 0.25);
        assert_eq!(config.read_timeout_ms, 10);
        assert_eq!(config.scene_filter.layer_mask, u32::MAX);
    }

    #[test]
    fn test_multiplier_out_of_range_rejected() {
        let config = PlannerConfig {
            segment_width_multiplier: 0.5,
            ..PlannerConfig::default()
        };
        assert!(config.validate().is_err());
        let config = PlannerConfig {
            segment_width_multiplier: 11.0,
            ..PlannerConfig::default()
        };
        assert!(config.validate().is_err());
    }
}

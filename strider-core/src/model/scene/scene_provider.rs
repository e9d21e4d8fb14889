use serde::{Deserialize, Serialize};

use super::Platform;

/// filters applied when enumerating the scene. layers outside the mask
/// and objects failing the tag filter are invisible to the engine.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneFilter {
    pub layer_mask: u32,
    pub tag_filter: Option<String>,
}

impl Default for SceneFilter {
    fn default() -> SceneFilter {
        SceneFilter {
            layer_mask: u32::MAX,
            tag_filter: None,
        }
    }
}

/// host-side enumeration of scene platforms, called once per maintenance
/// tick. implementations return snapshots; the engine holds no references
/// into the host scene.
pub trait SceneProvider: Send + Sync {
    fn platforms(&self, filter: &SceneFilter) -> Vec<Platform>;
}

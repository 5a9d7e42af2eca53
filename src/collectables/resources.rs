use bevy::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Resource, Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CollectableTuning {
    /// Length of the collect animation before the pickup is removed
    pub collect_time: f32,
    /// Purple diamonds needed when a level does not set its own goal
    pub purple_goal: u32,
}

impl Default for CollectableTuning {
    fn default() -> Self {
        Self {
            collect_time: 0.35,
            purple_goal: 6,
        }
    }
}

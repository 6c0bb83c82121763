/// Runtime options for the visualization, loaded from JSON by the host.

use serde::{Deserialize, Serialize};

use crate::animation::DEFAULT_PHASE_RATE;
use crate::interaction::DispatchPolicy;
use crate::model::ModelFlags;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrreryConfig {
    /// Add Venus and its orbit.
    pub venus: bool,
    /// Show a measurement overlay after each model change.
    pub overlays: bool,
    /// Flags at startup.
    pub initial_flags: ModelFlags,
    /// Orbit phase per elapsed millisecond.
    pub phase_rate: f64,
    pub dispatch: DispatchPolicy,
}

impl Default for OrreryConfig {
    fn default() -> Self {
        Self {
            venus: false,
            overlays: true,
            initial_flags: ModelFlags::default(),
            phase_rate: DEFAULT_PHASE_RATE,
            dispatch: DispatchPolicy::AllHits,
        }
    }
}

impl OrreryConfig {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

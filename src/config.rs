//! Run configuration, supplied once before the first frame.

use serde::{Deserialize, Serialize};

use crate::counter::CounterConfig;
use crate::error::ConfigError;
use crate::integration::DetectionFilter;
use crate::tracker::TrackerConfig;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub tracker: TrackerConfig,
    pub counter: CounterConfig,
    pub filter: DetectionFilter,
    /// Drop trajectories of deregistered tracks after every frame.
    pub evict_stale_history: bool,
    /// Run detection on every Nth frame only; frames in between pass through.
    pub frame_stride: u64,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            tracker: TrackerConfig::default(),
            counter: CounterConfig::default(),
            filter: DetectionFilter::default(),
            evict_stale_history: true,
            frame_stride: 1,
        }
    }
}

impl PipelineConfig {
    /// Parse a JSON document; missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: PipelineConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.frame_stride == 0 {
            return Err(ConfigError::InvalidFrameStride);
        }
        self.tracker.validate()?;
        self.counter.validate()
    }
}

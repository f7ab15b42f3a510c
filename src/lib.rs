//! Centroid tracking and exactly-once line-crossing counting.
//!
//! Per frame, an external detector produces bounding boxes, the
//! [`CentroidTracker`] turns them into stable identities, and the
//! [`CrossingCounter`] credits each identity once when its latest movement
//! crosses the counting line.

pub mod config;
pub mod counter;
pub mod error;
pub mod integration;
pub mod tracker;

pub use config::PipelineConfig;
pub use counter::{CounterConfig, CountingLine, CrossingCounter, CrossingRule, TrajectoryHistory};
pub use error::ConfigError;
pub use integration::{
    CountingPipeline, Detection, DetectionBuilder, DetectionFilter, DetectionSource, Frame,
    FrameReport,
};
pub use tracker::{BoundingBox, CentroidTracker, Point, TrackId, TrackedObject, TrackerConfig};

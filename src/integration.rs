//! Integration module for connecting object detection backends with the
//! tracker and the crossing counter.
//!
//! Detection itself is external: any backend implementing `DetectionSource`
//! can drive a `CountingPipeline`.

mod builder;
mod classifier;
mod detector;
mod pipeline;

pub use builder::DetectionBuilder;
pub use classifier::{ClassifierDetector, FrameClassifier, center_detection};
pub use detector::{Detection, DetectionFilter, DetectionSource};
pub use pipeline::{CountingPipeline, Frame, FrameReport};

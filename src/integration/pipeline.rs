//! CountingPipeline: detection, tracking and crossing counting over a frame
//! stream.

use tracing::{trace, warn};

use super::{DetectionFilter, DetectionSource};
use crate::config::PipelineConfig;
use crate::counter::CrossingCounter;
use crate::error::ConfigError;
use crate::tracker::{CentroidTracker, TrackId, TrackedObject};

/// One decoded frame as raw bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub data: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

impl Frame {
    pub fn new(data: Vec<u8>, width: u32, height: u32) -> Self {
        Self {
            data,
            width,
            height,
        }
    }
}

/// Result of processing one frame.
#[derive(Debug, Clone)]
pub struct FrameReport {
    pub frame: Frame,
    /// 1-based position of the frame in the stream
    pub frame_index: u64,
    /// Running count after this frame
    pub count: u64,
    /// Fraction of the stream processed, when its length is known
    pub progress: Option<f32>,
    /// Live tracks after this frame, ordered by id
    pub objects: Vec<TrackedObject>,
    /// Identities first counted on this frame
    pub newly_counted: Vec<TrackId>,
    /// False for frames skipped by the frame stride
    pub detected: bool,
}

/// Pull-based pipeline bundling a `DetectionSource` with the tracker and the
/// crossing counter.
///
/// Each call to `next` reads one frame, runs detection and advances tracking
/// and counting in frame order. Dropping the pipeline abandons the run; a new
/// run needs a new pipeline over a re-opened frame source.
pub struct CountingPipeline<D: DetectionSource, I: Iterator<Item = Frame>> {
    detector: D,
    frames: I,
    filter: DetectionFilter,
    tracker: CentroidTracker,
    counter: CrossingCounter,
    evict_stale_history: bool,
    frame_stride: u64,
    frame_index: u64,
    total_frames: Option<u64>,
}

impl<D: DetectionSource, I: Iterator<Item = Frame>> CountingPipeline<D, I> {
    pub fn new(detector: D, frames: I, config: PipelineConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let PipelineConfig {
            tracker,
            counter,
            filter,
            evict_stale_history,
            frame_stride,
        } = config;

        Ok(Self {
            detector,
            frames,
            filter,
            tracker: CentroidTracker::new(tracker),
            counter: CrossingCounter::new(counter),
            evict_stale_history,
            frame_stride,
            frame_index: 0,
            total_frames: None,
        })
    }

    /// Set the stream length used for progress reporting.
    pub fn with_total_frames(mut self, total_frames: u64) -> Self {
        self.total_frames = (total_frames > 0).then_some(total_frames);
        self
    }

    /// Running count so far.
    pub fn count(&self) -> u64 {
        self.counter.count()
    }

    pub fn frame_index(&self) -> u64 {
        self.frame_index
    }

    pub fn detector(&self) -> &D {
        &self.detector
    }

    pub fn detector_mut(&mut self) -> &mut D {
        &mut self.detector
    }

    pub fn tracker(&self) -> &CentroidTracker {
        &self.tracker
    }

    pub fn counter(&self) -> &CrossingCounter {
        &self.counter
    }

    /// Run detection, tracking and counting on one frame and return the
    /// running count. Tracking state is untouched when detection fails.
    pub fn process_frame(&mut self, frame: &Frame) -> Result<u64, D::Error> {
        let detections = self.detector.detect(&frame.data, frame.width, frame.height)?;
        let boxes = self.filter.apply(&detections);

        let objects = self.tracker.update(&boxes);
        let count = self
            .counter
            .on_frame(objects.iter().map(|(&id, obj)| (id, obj.centroid)));
        if self.evict_stale_history {
            self.counter.prune(|id| objects.contains_key(&id));
        }

        trace!(
            detections = detections.len(),
            kept = boxes.len(),
            live = objects.len(),
            count,
            "processed frame"
        );
        Ok(count)
    }

    /// Whether the current frame is one the stride runs detection on.
    fn is_detection_frame(&self) -> bool {
        (self.frame_index - 1) % self.frame_stride == 0
    }

    fn progress(&self) -> Option<f32> {
        self.total_frames
            .map(|total| (self.frame_index as f32 / total as f32).min(1.0))
    }
}

impl<D: DetectionSource, I: Iterator<Item = Frame>> Iterator for CountingPipeline<D, I> {
    type Item = Result<FrameReport, D::Error>;

    fn next(&mut self) -> Option<Self::Item> {
        let frame = self.frames.next()?;
        self.frame_index += 1;

        if !self.is_detection_frame() {
            return Some(Ok(FrameReport {
                frame,
                frame_index: self.frame_index,
                count: self.counter.count(),
                progress: self.progress(),
                objects: self.tracker.objects().values().cloned().collect(),
                newly_counted: vec![],
                detected: false,
            }));
        }

        let count = match self.process_frame(&frame) {
            Ok(count) => count,
            Err(err) => {
                warn!(frame_index = self.frame_index, "detection failed");
                return Some(Err(err));
            }
        };

        Some(Ok(FrameReport {
            frame,
            frame_index: self.frame_index,
            count,
            progress: self.progress(),
            objects: self.tracker.objects().values().cloned().collect(),
            newly_counted: self.counter.last_crossings().to_vec(),
            detected: true,
        }))
    }
}

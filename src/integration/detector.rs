//! Trait for object detection inference backends.

use serde::{Deserialize, Serialize};

use crate::tracker::BoundingBox;

/// Detection produced by a backend, before class and confidence filtering.
#[derive(Debug, Clone, PartialEq)]
pub struct Detection {
    pub bbox: BoundingBox,
    /// Detection confidence score
    pub score: f32,
    /// Class index in the backend's vocabulary, when it has one
    pub class_id: Option<usize>,
}

impl Detection {
    pub fn new(x1: i32, y1: i32, x2: i32, y2: i32, score: f32) -> Self {
        Self {
            bbox: BoundingBox::new(x1, y1, x2, y2),
            score,
            class_id: None,
        }
    }

    pub fn from_bbox(bbox: BoundingBox, score: f32) -> Self {
        Self {
            bbox,
            score,
            class_id: None,
        }
    }

    pub fn with_class(mut self, class_id: usize) -> Self {
        self.class_id = Some(class_id);
        self
    }
}

/// Trait for object detection inference backends.
///
/// Implement this trait to connect any detection model to the counting
/// pipeline.
///
/// # Example
///
/// ```ignore
/// use linecount_rs::{Detection, DetectionSource};
///
/// struct MyDetector {
///     // Your model here
/// }
///
/// impl DetectionSource for MyDetector {
///     type Error = std::io::Error;
///
///     fn detect(&mut self, input: &[u8], width: u32, height: u32) -> Result<Vec<Detection>, Self::Error> {
///         Ok(vec![])
///     }
/// }
/// ```
pub trait DetectionSource {
    /// Error type for detection failures.
    type Error;

    /// Run inference on raw image data and return detections.
    fn detect(
        &mut self,
        input: &[u8],
        width: u32,
        height: u32,
    ) -> Result<Vec<Detection>, Self::Error>;
}

/// Selects the detections the tracker should see.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectionFilter {
    /// Only keep this class. `None` keeps every class.
    pub class_id: Option<usize>,
    /// Scores must be strictly greater than this.
    pub min_confidence: f32,
}

impl Default for DetectionFilter {
    fn default() -> Self {
        Self {
            class_id: None,
            min_confidence: 0.5,
        }
    }
}

impl DetectionFilter {
    pub fn accepts(&self, det: &Detection) -> bool {
        if det.score <= self.min_confidence {
            return false;
        }
        match self.class_id {
            Some(class_id) => det.class_id == Some(class_id),
            None => true,
        }
    }

    pub fn apply(&self, detections: &[Detection]) -> Vec<BoundingBox> {
        detections
            .iter()
            .filter(|d| self.accepts(d))
            .map(|d| d.bbox)
            .collect()
    }
}

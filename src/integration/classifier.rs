//! Adapter turning a whole-frame binary classifier into a detection source.

use super::{Detection, DetectionBuilder, DetectionSource};

/// Whole-frame classifier returning the probability that the object of
/// interest is present.
pub trait FrameClassifier {
    type Error;

    fn score(&mut self, input: &[u8], width: u32, height: u32) -> Result<f32, Self::Error>;
}

/// Reports a single fixed box over the central half of the frame whenever the
/// wrapped classifier's score exceeds the threshold.
pub struct ClassifierDetector<C: FrameClassifier> {
    classifier: C,
    threshold: f32,
}

impl<C: FrameClassifier> ClassifierDetector<C> {
    /// Wrap a classifier with the default 0.5 threshold.
    pub fn new(classifier: C) -> Self {
        Self {
            classifier,
            threshold: 0.5,
        }
    }

    /// Set the score the classifier must exceed.
    pub fn with_threshold(mut self, threshold: f32) -> Self {
        self.threshold = threshold;
        self
    }

    /// Get a reference to the wrapped classifier.
    pub fn classifier(&self) -> &C {
        &self.classifier
    }
}

/// Detection over the central box `(w/4, h/4, 3w/4, 3h/4)`.
pub fn center_detection(width: u32, height: u32, score: f32) -> Detection {
    let (w, h) = (width as f32, height as f32);
    DetectionBuilder::new()
        .tlbr(w * 0.25, h * 0.25, w * 0.75, h * 0.75)
        .score(score)
        .build()
}

impl<C: FrameClassifier> DetectionSource for ClassifierDetector<C> {
    type Error = C::Error;

    fn detect(
        &mut self,
        input: &[u8],
        width: u32,
        height: u32,
    ) -> Result<Vec<Detection>, Self::Error> {
        let score = self.classifier.score(input, width, height)?;
        if score > self.threshold {
            Ok(vec![center_detection(width, height, score)])
        } else {
            Ok(vec![])
        }
    }
}

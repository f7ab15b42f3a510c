//! A single persistent object identity.

use serde::Serialize;

use crate::tracker::geometry::{BoundingBox, Point};

/// Identity assigned by a tracker. Monotonic, never reused within one tracker.
pub type TrackId = u64;

/// Live state of one tracked object.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrackedObject {
    /// Unique track identifier
    pub track_id: TrackId,
    /// Midpoint of the most recently matched box
    pub centroid: Point,
    /// Most recently matched box
    pub bbox: Option<BoundingBox>,
    /// Consecutive frames without a matching detection
    pub disappeared: u32,
}

impl TrackedObject {
    pub(crate) fn new(track_id: TrackId, centroid: Point, bbox: Option<BoundingBox>) -> Self {
        Self {
            track_id,
            centroid,
            bbox,
            disappeared: 0,
        }
    }

    /// Replace position with a matched detection and reset the miss counter.
    pub(crate) fn update(&mut self, centroid: Point, bbox: Option<BoundingBox>) {
        self.centroid = centroid;
        self.bbox = bbox;
        self.disappeared = 0;
    }

    /// Record a frame without a match. Returns true when the track has
    /// exceeded `max_disappeared` and must be forgotten.
    pub(crate) fn mark_missed(&mut self, max_disappeared: u32) -> bool {
        self.disappeared = self.disappeared.saturating_add(1);
        self.disappeared > max_disappeared
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_resets_disappeared() {
        let mut track = TrackedObject::new(3, Point::new(1, 1), None);
        assert!(!track.mark_missed(2));
        assert!(!track.mark_missed(2));
        assert_eq!(track.disappeared, 2);

        let bbox = BoundingBox::new(0, 0, 10, 10);
        track.update(bbox.centroid(), Some(bbox));
        assert_eq!(track.disappeared, 0);
        assert_eq!(track.centroid, Point::new(5, 5));
        assert_eq!(track.bbox, Some(bbox));
    }

    #[test]
    fn test_mark_missed_past_threshold() {
        let mut track = TrackedObject::new(0, Point::new(0, 0), None);
        assert!(!track.mark_missed(1));
        assert!(track.mark_missed(1));
    }
}

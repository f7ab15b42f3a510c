//! Centroid tracker: greedy nearest-centroid association with bounded
//! disappearance patience.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::ConfigError;
use crate::tracker::geometry::{BoundingBox, Point};
use crate::tracker::matching::{self, AssignmentResult};
use crate::tracker::track::{TrackId, TrackedObject};

/// Configuration for the CentroidTracker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackerConfig {
    /// Consecutive unmatched frames tolerated before a track is forgotten.
    pub max_disappeared: u32,
    /// Distance gate in pixels. `None` disables the gate.
    pub max_distance: Option<f64>,
    /// Whether tracks keep the geometry of their last matched box.
    pub keep_boxes: bool,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            max_disappeared: 50,
            max_distance: Some(75.0),
            keep_boxes: true,
        }
    }
}

impl TrackerConfig {
    /// The ungated, box-less configuration.
    pub fn ungated(max_disappeared: u32) -> Self {
        Self {
            max_disappeared,
            max_distance: None,
            keep_boxes: false,
        }
    }

    /// Reject a negative or non-finite distance gate.
    pub fn validate(&self) -> Result<(), ConfigError> {
        match self.max_distance {
            Some(d) if !d.is_finite() || d < 0.0 => Err(ConfigError::InvalidMaxDistance(d)),
            _ => Ok(()),
        }
    }
}

/// Multi-object tracker keyed by stable integer identities.
///
/// Live tracks are kept ordered by id, which is also their registration
/// order; the greedy matcher relies on that order for tie-breaking.
#[derive(Debug, Clone)]
pub struct CentroidTracker {
    objects: BTreeMap<TrackId, TrackedObject>,
    next_track_id: TrackId,
    config: TrackerConfig,
}

impl Default for CentroidTracker {
    fn default() -> Self {
        Self::new(TrackerConfig::default())
    }
}

impl CentroidTracker {
    /// Create a tracker. An invalid distance gate is kept but logged; a NaN
    /// or negative gate never matches, so every detection spawns a track.
    pub fn new(config: TrackerConfig) -> Self {
        if let Err(err) = config.validate() {
            warn!(%err, "tracker configuration is invalid");
        }
        Self {
            objects: BTreeMap::new(),
            next_track_id: 0,
            config,
        }
    }

    /// Configuration the tracker was built with.
    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    /// Currently live tracks, ordered by id.
    pub fn objects(&self) -> &BTreeMap<TrackId, TrackedObject> {
        &self.objects
    }

    /// `(id, centroid)` pairs of the live tracks, the crossing counter's input.
    pub fn centroids(&self) -> impl Iterator<Item = (TrackId, Point)> + '_ {
        self.objects.iter().map(|(&id, obj)| (id, obj.centroid))
    }

    /// Number of live tracks.
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Whether no track is live.
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Id the next registered track will receive.
    pub fn next_track_id(&self) -> TrackId {
        self.next_track_id
    }

    /// Associate one frame of detections with the live tracks.
    ///
    /// Returns the live set after the update; deregistered tracks are absent.
    pub fn update(&mut self, boxes: &[BoundingBox]) -> &BTreeMap<TrackId, TrackedObject> {
        if boxes.is_empty() {
            let ids: Vec<TrackId> = self.objects.keys().copied().collect();
            for id in ids {
                self.mark_missed(id);
            }
            return &self.objects;
        }

        let centroids: Vec<Point> = boxes.iter().map(BoundingBox::centroid).collect();

        if self.objects.is_empty() {
            for (bbox, &centroid) in boxes.iter().zip(&centroids) {
                self.register(centroid, *bbox);
            }
            return &self.objects;
        }

        let track_ids: Vec<TrackId> = self.objects.keys().copied().collect();
        let track_points: Vec<Point> = self.objects.values().map(|t| t.centroid).collect();
        let dists = matching::distance_matrix(&track_points, &centroids);

        let AssignmentResult {
            matches,
            unmatched_tracks,
            unmatched_detections,
        } = matching::greedy_assignment(&dists, self.config.max_distance);

        let keep_boxes = self.config.keep_boxes;
        for (row, col) in matches {
            if let Some(track) = self.objects.get_mut(&track_ids[row]) {
                track.update(centroids[col], keep_boxes.then_some(boxes[col]));
            }
        }

        for row in unmatched_tracks {
            self.mark_missed(track_ids[row]);
        }

        for col in unmatched_detections {
            self.register(centroids[col], boxes[col]);
        }

        &self.objects
    }

    fn register(&mut self, centroid: Point, bbox: BoundingBox) {
        let track_id = self.next_track_id;
        self.next_track_id += 1;
        let bbox = self.config.keep_boxes.then_some(bbox);
        debug!(track_id, x = centroid.x, y = centroid.y, "registered track");
        self.objects
            .insert(track_id, TrackedObject::new(track_id, centroid, bbox));
    }

    fn mark_missed(&mut self, track_id: TrackId) {
        let expired = match self.objects.get_mut(&track_id) {
            Some(track) => track.mark_missed(self.config.max_disappeared),
            None => false,
        };
        if expired {
            self.objects.remove(&track_id);
            debug!(track_id, "deregistered track");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn box_at(cx: i32, cy: i32) -> BoundingBox {
        BoundingBox::new(cx - 10, cy - 10, cx + 10, cy + 10)
    }

    #[test]
    fn test_registers_all_when_empty() {
        let mut tracker = CentroidTracker::default();
        let objects = tracker.update(&[box_at(10, 10), box_at(100, 100), box_at(200, 50)]);
        let ids: Vec<TrackId> = objects.keys().copied().collect();
        assert_eq!(ids, vec![0, 1, 2]);
        assert_eq!(objects[&1].centroid, Point::new(100, 100));
        assert_eq!(objects[&1].bbox, Some(box_at(100, 100)));
    }

    #[test]
    fn test_identity_persists_across_small_motion() {
        let mut tracker = CentroidTracker::default();
        tracker.update(&[box_at(100, 100)]);
        let objects = tracker.update(&[box_at(104, 103)]);
        assert_eq!(objects.len(), 1);
        assert_eq!(objects[&0].centroid, Point::new(104, 103));
        assert_eq!(objects[&0].disappeared, 0);
    }

    #[test]
    fn test_gated_match_and_new_registration() {
        let mut tracker = CentroidTracker::default();
        tracker.update(&[box_at(105, 98)]);

        let objects = tracker.update(&[box_at(100, 100), box_at(500, 500)]);
        assert_eq!(objects.len(), 2);
        assert_eq!(objects[&0].centroid, Point::new(100, 100));
        assert_eq!(objects[&1].centroid, Point::new(500, 500));
    }

    #[test]
    fn test_rejected_track_counts_a_miss() {
        let mut tracker = CentroidTracker::default();
        tracker.update(&[box_at(0, 0)]);
        let objects = tracker.update(&[box_at(400, 400)]);
        assert_eq!(objects[&0].disappeared, 1);
        assert_eq!(objects[&0].centroid, Point::new(0, 0));
        assert_eq!(objects[&1].centroid, Point::new(400, 400));
    }

    #[test]
    fn test_ungated_forces_distant_match() {
        let mut tracker = CentroidTracker::new(TrackerConfig::ungated(50));
        tracker.update(&[box_at(0, 0)]);
        let objects = tracker.update(&[box_at(400, 400)]);
        assert_eq!(objects.len(), 1);
        assert_eq!(objects[&0].centroid, Point::new(400, 400));
        assert_eq!(objects[&0].bbox, None);
    }

    #[test]
    fn test_deregisters_after_patience() {
        let mut tracker = CentroidTracker::new(TrackerConfig {
            max_disappeared: 2,
            ..TrackerConfig::default()
        });
        tracker.update(&[box_at(10, 10)]);
        assert_eq!(tracker.update(&[]).len(), 1);
        assert_eq!(tracker.update(&[]).len(), 1);
        assert_eq!(tracker.update(&[]).len(), 0);
    }

    #[test]
    fn test_ids_never_reused() {
        let mut tracker = CentroidTracker::new(TrackerConfig {
            max_disappeared: 0,
            ..TrackerConfig::default()
        });
        tracker.update(&[box_at(10, 10)]);
        tracker.update(&[]);
        assert!(tracker.is_empty());
        let objects = tracker.update(&[box_at(10, 10)]);
        assert_eq!(objects.keys().copied().collect::<Vec<_>>(), vec![1]);
        assert_eq!(tracker.next_track_id(), 2);
    }

    #[test]
    fn test_contested_detection_spawns_new_track() {
        // Two tracks both nearest to the first detection: the closer one wins,
        // the loser misses and the leftover detection becomes a new track.
        let mut tracker = CentroidTracker::new(TrackerConfig::ungated(50));
        tracker.update(&[box_at(100, 100), box_at(130, 100)]);
        let objects = tracker.update(&[box_at(102, 100), box_at(300, 300)]);
        assert_eq!(objects[&0].centroid, Point::new(102, 100));
        assert_eq!(objects[&1].disappeared, 1);
        assert_eq!(objects[&2].centroid, Point::new(300, 300));
    }

    #[test]
    fn test_nan_gate_never_matches() {
        let mut tracker = CentroidTracker::new(TrackerConfig {
            max_distance: Some(f64::NAN),
            ..TrackerConfig::default()
        });
        tracker.update(&[box_at(100, 100)]);
        let objects = tracker.update(&[box_at(1100, 1100)]);
        assert_eq!(objects.len(), 2);
        assert_eq!(objects[&0].centroid, Point::new(100, 100));
        assert_eq!(objects[&0].disappeared, 1);
    }

    #[test]
    fn test_validate_rejects_bad_distance() {
        let config = TrackerConfig {
            max_distance: Some(-1.0),
            ..TrackerConfig::default()
        };
        assert!(config.validate().is_err());
        assert!(TrackerConfig::default().validate().is_ok());
        assert!(TrackerConfig::ungated(5).validate().is_ok());
    }
}

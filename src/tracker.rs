mod centroid_tracker;
mod geometry;
mod matching;
mod track;

pub use centroid_tracker::{CentroidTracker, TrackerConfig};
pub use geometry::{BoundingBox, Point};
pub use matching::{AssignmentResult, distance_matrix, greedy_assignment};
pub use track::{TrackId, TrackedObject};

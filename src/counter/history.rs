use std::collections::VecDeque;

use crate::tracker::Point;

/// Fixed-capacity ring of the most recent centroids of one track, oldest first.
#[derive(Debug, Clone, PartialEq)]
pub struct TrajectoryHistory {
    points: VecDeque<Point>,
    capacity: usize,
}

impl TrajectoryHistory {
    #[inline]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            points: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Append a centroid, returning the evicted oldest one when full.
    pub fn push(&mut self, point: Point) -> Option<Point> {
        if self.capacity == 0 {
            return Some(point);
        }
        let evicted = if self.is_full() {
            self.points.pop_front()
        } else {
            None
        };
        self.points.push_back(point);
        evicted
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.points.len() == self.capacity
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    #[inline]
    pub fn last(&self) -> Option<Point> {
        self.points.back().copied()
    }

    /// The latest movement: second-to-last and last centroid.
    pub fn last_segment(&self) -> Option<(Point, Point)> {
        let n = self.points.len();
        if n < 2 {
            return None;
        }
        Some((self.points[n - 2], self.points[n - 1]))
    }

    /// Oldest to newest.
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = &'_ Point> {
        self.points.iter()
    }
}

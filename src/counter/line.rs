//! Counting line geometry and the segment-intersection predicate.

use serde::{Deserialize, Serialize};

use crate::tracker::Point;

/// Turn direction of an ordered point triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Collinear,
    Clockwise,
    CounterClockwise,
}

/// Orientation of `(p, q, r)` from the sign of the cross product.
///
/// Computed in `i128`: coordinate differences need 33 bits, their products 66.
pub fn orientation(p: Point, q: Point, r: Point) -> Orientation {
    let val = (q.y as i128 - p.y as i128) * (r.x as i128 - q.x as i128)
        - (q.x as i128 - p.x as i128) * (r.y as i128 - q.y as i128);
    match val {
        0 => Orientation::Collinear,
        v if v > 0 => Orientation::Clockwise,
        _ => Orientation::CounterClockwise,
    }
}

/// For collinear `p, q, r`: whether `q` lies within the bounding box of `pr`.
#[inline]
pub fn on_segment(p: Point, q: Point, r: Point) -> bool {
    q.x <= p.x.max(r.x) && q.x >= p.x.min(r.x) && q.y <= p.y.max(r.y) && q.y >= p.y.min(r.y)
}

/// Whether segment `p1q1` intersects segment `p2q2`, touching included.
pub fn segments_intersect(p1: Point, q1: Point, p2: Point, q2: Point) -> bool {
    let o1 = orientation(p1, q1, p2);
    let o2 = orientation(p1, q1, q2);
    let o3 = orientation(p2, q2, p1);
    let o4 = orientation(p2, q2, q1);

    if o1 != o2 && o3 != o4 {
        return true;
    }

    (o1 == Orientation::Collinear && on_segment(p1, p2, q1))
        || (o2 == Orientation::Collinear && on_segment(p1, q2, q1))
        || (o3 == Orientation::Collinear && on_segment(p2, p1, q2))
        || (o4 == Orientation::Collinear && on_segment(p2, q1, q2))
}

/// Counting line between two endpoints in frame pixel space, any orientation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountingLine {
    pub p1: Point,
    pub p2: Point,
}

impl CountingLine {
    pub const fn new(p1: Point, p2: Point) -> Self {
        Self { p1, p2 }
    }

    /// Horizontal line at `y` spanning a frame of the given width.
    pub const fn horizontal(y: i32, width: i32) -> Self {
        Self::new(Point::new(0, y), Point::new(width, y))
    }

    /// Vertical line at `x` spanning a frame of the given height.
    pub const fn vertical(x: i32, height: i32) -> Self {
        Self::new(Point::new(x, 0), Point::new(x, height))
    }

    #[inline]
    pub fn is_degenerate(&self) -> bool {
        self.p1 == self.p2
    }

    /// Whether the movement `prev -> curr` touches or crosses the line.
    /// A zero-length line is never crossed.
    pub fn crossed_by(&self, prev: Point, curr: Point) -> bool {
        !self.is_degenerate() && segments_intersect(prev, curr, self.p1, self.p2)
    }
}

/// How a movement segment is judged against the counting line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CrossingRule {
    /// General segment intersection against a line of any orientation.
    Segment { line: CountingLine },
    /// Threshold on the y coordinate: the movement must leave one side and
    /// reach or pass `y`.
    Horizontal { y: i32 },
    /// Threshold on the x coordinate.
    Vertical { x: i32 },
}

impl Default for CrossingRule {
    fn default() -> Self {
        CrossingRule::Segment {
            line: CountingLine::horizontal(240, 640),
        }
    }
}

impl From<CountingLine> for CrossingRule {
    fn from(line: CountingLine) -> Self {
        CrossingRule::Segment { line }
    }
}

impl CrossingRule {
    pub fn crossed(&self, prev: Point, curr: Point) -> bool {
        match *self {
            CrossingRule::Segment { line } => line.crossed_by(prev, curr),
            CrossingRule::Horizontal { y } => crosses_threshold(prev.y, curr.y, y),
            CrossingRule::Vertical { x } => crosses_threshold(prev.x, curr.x, x),
        }
    }
}

#[inline]
fn crosses_threshold(prev: i32, curr: i32, at: i32) -> bool {
    (prev < at && curr >= at) || (prev > at && curr <= at)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(x: i32, y: i32) -> Point {
        Point::new(x, y)
    }

    #[test]
    fn test_orientation() {
        assert_eq!(orientation(p(0, 0), p(1, 1), p(2, 2)), Orientation::Collinear);
        assert_eq!(orientation(p(0, 0), p(4, 4), p(1, 2)), Orientation::CounterClockwise);
        assert_eq!(orientation(p(0, 0), p(4, 4), p(2, 1)), Orientation::Clockwise);
    }

    #[test]
    fn test_vertical_movement_crosses_horizontal_line() {
        let line = CountingLine::new(p(0, 50), p(100, 50));
        assert!(line.crossed_by(p(10, 40), p(10, 60)));
        assert!(!line.crossed_by(p(10, 40), p(10, 49)));
        // Outside the line's extent
        assert!(!line.crossed_by(p(150, 40), p(150, 60)));
    }

    #[test]
    fn test_diagonal_line() {
        let line = CountingLine::new(p(0, 0), p(100, 100));
        assert!(line.crossed_by(p(20, 60), p(60, 20)));
        assert!(!line.crossed_by(p(10, 60), p(20, 70)));
    }

    #[test]
    fn test_vertical_segment_line() {
        let line = CountingLine::vertical(320, 480);
        assert_eq!(line, CountingLine::new(p(320, 0), p(320, 480)));
        assert!(line.crossed_by(p(300, 200), p(340, 210)));
        assert!(line.crossed_by(p(340, 210), p(300, 200)));
        assert!(!line.crossed_by(p(300, 200), p(319, 260)));
        // Beyond the bottom edge of the frame
        assert!(!line.crossed_by(p(300, 500), p(340, 500)));
    }

    #[test]
    fn test_extreme_coordinates_do_not_overflow() {
        let min = p(i32::MIN, i32::MIN);
        let max = p(i32::MAX, i32::MAX);
        let anti_min = p(i32::MIN, i32::MAX);
        let anti_max = p(i32::MAX, i32::MIN);
        assert_eq!(orientation(min, max, anti_max), Orientation::Clockwise);
        assert!(segments_intersect(min, max, anti_min, anti_max));
        assert!(segments_intersect(anti_min, anti_max, min, max));
        let line = CountingLine::new(anti_min, anti_max);
        assert!(line.crossed_by(min, max));
        assert!(!line.crossed_by(min, p(i32::MIN + 1, i32::MIN)));
    }

    #[test]
    fn test_touching_endpoint_counts() {
        let line = CountingLine::horizontal(50, 100);
        assert!(line.crossed_by(p(10, 40), p(10, 50)));
    }

    #[test]
    fn test_collinear_overlap_and_gap() {
        assert!(segments_intersect(p(0, 0), p(10, 0), p(5, 0), p(20, 0)));
        assert!(!segments_intersect(p(0, 0), p(10, 0), p(11, 0), p(20, 0)));
    }

    #[test]
    fn test_intersection_is_symmetric() {
        let segments = [
            (p(0, 0), p(10, 10)),
            (p(0, 10), p(10, 0)),
            (p(5, 5), p(5, 5)),
            (p(20, 0), p(30, 0)),
            (p(0, 0), p(30, 0)),
            (p(-5, 3), p(7, -2)),
        ];
        for &(a1, a2) in &segments {
            for &(b1, b2) in &segments {
                assert_eq!(
                    segments_intersect(a1, a2, b1, b2),
                    segments_intersect(b1, b2, a1, a2),
                    "{a1:?}-{a2:?} vs {b1:?}-{b2:?}"
                );
            }
        }
    }

    #[test]
    fn test_degenerate_line_never_crossed() {
        let line = CountingLine::new(p(10, 50), p(10, 50));
        assert!(line.is_degenerate());
        assert!(!line.crossed_by(p(10, 40), p(10, 60)));
        assert!(!line.crossed_by(p(10, 50), p(10, 50)));
    }

    #[test]
    fn test_threshold_rules() {
        let rule = CrossingRule::Horizontal { y: 100 };
        assert!(rule.crossed(p(0, 95), p(0, 105)));
        assert!(rule.crossed(p(0, 105), p(0, 100)));
        assert!(!rule.crossed(p(0, 95), p(0, 99)));
        // Starting on the line is not a crossing for the threshold rule.
        assert!(!rule.crossed(p(0, 100), p(0, 105)));

        let rule = CrossingRule::Vertical { x: 10 };
        assert!(rule.crossed(p(5, 0), p(15, 0)));
        assert!(!rule.crossed(p(11, 0), p(15, 0)));
    }

    #[test]
    fn test_rule_deserializes() {
        let rule: CrossingRule = serde_json::from_str(
            r#"{"type":"segment","line":{"p1":{"x":0,"y":50},"p2":{"x":100,"y":50}}}"#,
        )
        .unwrap();
        assert_eq!(rule, CountingLine::horizontal(50, 100).into());

        let rule: CrossingRule = serde_json::from_str(r#"{"type":"vertical","x":320}"#).unwrap();
        assert_eq!(rule, CrossingRule::Vertical { x: 320 });
    }
}

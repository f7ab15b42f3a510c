mod crossing_counter;
mod history;
mod line;

pub use crossing_counter::{CounterConfig, CrossingCounter};
pub use history::TrajectoryHistory;
pub use line::{CountingLine, CrossingRule, Orientation, on_segment, orientation, segments_intersect};

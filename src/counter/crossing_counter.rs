//! Exactly-once line-crossing counter over tracker output.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::counter::history::TrajectoryHistory;
use crate::counter::line::CrossingRule;
use crate::error::ConfigError;
use crate::tracker::{Point, TrackId};

/// Configuration for the CrossingCounter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CounterConfig {
    /// Centroids kept per identity.
    pub history_capacity: usize,
    pub rule: CrossingRule,
}

impl Default for CounterConfig {
    fn default() -> Self {
        Self {
            history_capacity: 30,
            rule: CrossingRule::default(),
        }
    }
}

impl CounterConfig {
    /// Default capacity with the given rule.
    pub fn new(rule: impl Into<CrossingRule>) -> Self {
        Self {
            rule: rule.into(),
            ..Self::default()
        }
    }

    /// Reject a history too short to hold one movement segment.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.history_capacity < 2 {
            return Err(ConfigError::InvalidHistoryCapacity(self.history_capacity));
        }
        Ok(())
    }
}

/// Keeps a bounded trajectory per identity and credits each identity at most
/// once when its latest movement crosses the counting line.
///
/// `on_frame` must be called once per processed frame. Feeding the same
/// frame's states twice appends them twice.
#[derive(Debug, Clone)]
pub struct CrossingCounter {
    histories: HashMap<TrackId, TrajectoryHistory>,
    counted: HashSet<TrackId>,
    count: u64,
    last_crossings: Vec<TrackId>,
    config: CounterConfig,
}

impl CrossingCounter {
    /// Create a counter. A history capacity below 2 could never hold a
    /// movement segment and is raised to 2.
    pub fn new(mut config: CounterConfig) -> Self {
        if config.history_capacity < 2 {
            warn!(
                history_capacity = config.history_capacity,
                "history capacity raised to 2"
            );
            config.history_capacity = 2;
        }
        Self {
            histories: HashMap::new(),
            counted: HashSet::new(),
            count: 0,
            last_crossings: Vec::new(),
            config,
        }
    }

    /// Effective configuration, after capacity clamping.
    pub fn config(&self) -> &CounterConfig {
        &self.config
    }

    /// Running total of counted identities.
    pub fn count(&self) -> u64 {
        self.count
    }

    /// Whether the identity has already been credited.
    pub fn is_counted(&self, track_id: TrackId) -> bool {
        self.counted.contains(&track_id)
    }

    /// Retained trajectory of an identity, oldest first.
    pub fn history(&self, track_id: TrackId) -> Option<&TrajectoryHistory> {
        self.histories.get(&track_id)
    }

    /// Number of identities with a retained trajectory.
    pub fn tracked_histories(&self) -> usize {
        self.histories.len()
    }

    /// Identities credited by the most recent `on_frame` call.
    pub fn last_crossings(&self) -> &[TrackId] {
        &self.last_crossings
    }

    /// Feed one frame of `(id, centroid)` states and return the running count.
    pub fn on_frame<I>(&mut self, states: I) -> u64
    where
        I: IntoIterator<Item = (TrackId, Point)>,
    {
        self.last_crossings.clear();
        let capacity = self.config.history_capacity;

        for (track_id, centroid) in states {
            let history = self
                .histories
                .entry(track_id)
                .or_insert_with(|| TrajectoryHistory::with_capacity(capacity));
            history.push(centroid);

            let Some((prev, curr)) = history.last_segment() else {
                continue;
            };
            if !self.config.rule.crossed(prev, curr) {
                continue;
            }

            if self.counted.insert(track_id) {
                self.count += 1;
                self.last_crossings.push(track_id);
                info!(track_id, count = self.count, "object crossed counting line");
            } else {
                debug!(track_id, "already counted, crossing ignored");
            }
        }

        self.count
    }

    /// Drop trajectories of identities for which `is_live` returns false.
    /// Counted flags are kept.
    pub fn prune<F>(&mut self, mut is_live: F)
    where
        F: FnMut(TrackId) -> bool,
    {
        self.histories.retain(|&id, _| is_live(id));
    }
}

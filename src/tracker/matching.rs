//! Matching utilities for centroid tracking.

use std::cmp::Ordering;

use ndarray::Array2;
use tracing::debug;

use crate::tracker::geometry::Point;

/// Compute the Euclidean distance matrix between track centroids (rows) and
/// detection centroids (columns).
pub fn distance_matrix(track_points: &[Point], det_points: &[Point]) -> Array2<f64> {
    let mut dists = Array2::zeros((track_points.len(), det_points.len()));
    for (i, t) in track_points.iter().enumerate() {
        for (j, d) in det_points.iter().enumerate() {
            dists[[i, j]] = t.distance(d);
        }
    }
    dists
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AssignmentResult {
    pub matches: Vec<(usize, usize)>,
    pub unmatched_tracks: Vec<usize>,
    pub unmatched_detections: Vec<usize>,
}

/// Greedy nearest-centroid assignment.
///
/// Rows are visited in ascending order of their smallest distance, ties kept
/// in row order. Each row only ever proposes its arg-min column; the proposal
/// is committed when neither side has been consumed yet. A row whose proposal
/// loses is left unmatched, it never falls back to its second-best column.
///
/// With `max_distance` set, a proposal farther than the gate is rejected and
/// both the row and the column stay available as unmatched. A NaN gate
/// rejects every proposal.
pub fn greedy_assignment(cost_matrix: &Array2<f64>, max_distance: Option<f64>) -> AssignmentResult {
    let (num_rows, num_cols) = cost_matrix.dim();

    if num_rows == 0 {
        return AssignmentResult {
            matches: vec![],
            unmatched_tracks: vec![],
            unmatched_detections: (0..num_cols).collect(),
        };
    }

    if num_cols == 0 {
        return AssignmentResult {
            matches: vec![],
            unmatched_tracks: (0..num_rows).collect(),
            unmatched_detections: vec![],
        };
    }

    // (min distance, arg-min column) per row; first column wins ties
    let best: Vec<(f64, usize)> = cost_matrix
        .rows()
        .into_iter()
        .map(|row| {
            row.iter()
                .enumerate()
                .fold((f64::INFINITY, 0), |acc, (j, &d)| if d < acc.0 { (d, j) } else { acc })
        })
        .collect();

    let mut order: Vec<usize> = (0..num_rows).collect();
    order.sort_by(|&a, &b| best[a].0.total_cmp(&best[b].0));

    let mut row_used = vec![false; num_rows];
    let mut col_used = vec![false; num_cols];
    let mut matches = Vec::with_capacity(num_rows.min(num_cols));

    for row in order {
        let (dist, col) = best[row];
        if row_used[row] || col_used[col] {
            continue;
        }
        if let Some(max) = max_distance {
            if !matches!(dist.partial_cmp(&max), Some(Ordering::Less | Ordering::Equal)) {
                debug!(row, col, dist, max, "rejected match beyond distance gate");
                continue;
            }
        }
        matches.push((row, col));
        row_used[row] = true;
        col_used[col] = true;
    }

    let unmatched_tracks = row_used
        .iter()
        .enumerate()
        .filter_map(|(i, &used)| if used { None } else { Some(i) })
        .collect();
    let unmatched_detections = col_used
        .iter()
        .enumerate()
        .filter_map(|(j, &used)| if used { None } else { Some(j) })
        .collect();

    AssignmentResult {
        matches,
        unmatched_tracks,
        unmatched_detections,
    }
}

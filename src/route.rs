// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use crate::{Coord, Graph};

/// Assumed walking speed, in meters per hour.
pub const WALKING_SPEED: f64 = 5000.0;

/// Stitches geometries of consecutive edges along `path` into a single polyline,
/// and sums their weights into the total distance (in meters).
///
/// Consecutive edges normally share an endpoint - the shared point is only emitted once.
/// The returned polyline never contains the same point twice in a row.
/// Missing edges contribute no geometry and zero distance.
pub fn assemble(g: &Graph, path: &[i64]) -> (Vec<Coord>, f64) {
    let mut coords: Vec<Coord> = Vec::new();
    let mut total_distance = 0.0;

    for pair in path.windows(2) {
        let (from_id, to_id) = (pair[0], pair[1]);

        match g.get_edge(from_id, to_id) {
            Some(weight) => total_distance += weight,
            None => log::warn!("route uses unknown edge {} -> {}", from_id, to_id),
        }

        for &point in g.edge_geometry(from_id, to_id) {
            if coords.last() != Some(&point) {
                coords.push(point);
            }
        }
    }

    (coords, total_distance)
}

/// Converts a distance in meters into the number of seconds it takes to walk it
/// at [WALKING_SPEED].
pub fn walking_time_seconds(distance: f64) -> f64 {
    distance / (WALKING_SPEED / 3600.0)
}

/// Formats the time needed to walk `distance` meters: `"<s>s"` under a minute,
/// `"<m>min"` under an hour and `"<h>h <m>min"` otherwise. All parts are truncated.
pub fn format_walking_time(distance: f64) -> String {
    let seconds = walking_time_seconds(distance);

    if seconds < 60.0 {
        format!("{}s", seconds as u64)
    } else if seconds < 3600.0 {
        format!("{}min", (seconds / 60.0) as u64)
    } else {
        let hours = (seconds / 3600.0) as u64;
        let minutes = ((seconds % 3600.0) / 60.0) as u64;
        format!("{}h {}min", hours, minutes)
    }
}

/// Rounds a distance to one decimal place.
pub fn round_distance(distance: f64) -> f64 {
    (distance * 10.0).round() / 10.0
}

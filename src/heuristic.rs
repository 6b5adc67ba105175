// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use crate::{earth_distance, Graph};

/// Estimates the remaining cost from a node to the search target.
///
/// Implementations must be admissible: the estimate may never exceed the true
/// shortest-path distance between the two nodes, otherwise [find_path](crate::find_path)
/// may return suboptimal routes.
pub trait Heuristic {
    fn estimate(&self, g: &Graph, node_id: i64, target_id: i64) -> f64;
}

/// Great-circle (crow-flies) distance between the two nodes, in meters.
///
/// Edge weights are real-world path lengths, which can't be shorter than the
/// straight-line distance between their endpoints. Unknown nodes are estimated at 0.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct GreatCircle;

impl Heuristic for GreatCircle {
    fn estimate(&self, g: &Graph, node_id: i64, target_id: i64) -> f64 {
        match (g.get_node(node_id), g.get_node(target_id)) {
            (Some(a), Some(b)) => earth_distance(a.position, b.position),
            _ => 0.0,
        }
    }
}

/// Always estimates 0, which turns A* into Dijkstra's algorithm.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Zero;

impl Heuristic for Zero {
    #[inline]
    fn estimate(&self, _: &Graph, _: i64, _: i64) -> f64 {
        0.0
    }
}

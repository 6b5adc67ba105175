// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use std::fmt;
use std::str::FromStr;

use super::{find_path_with, Path};
use crate::{Graph, GreatCircle, Zero};

/// Selects how [find_path] orders its search frontier.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Algorithm {
    /// Uninformed search - the frontier is ordered by the cost from the start.
    Dijkstra,

    /// Frontier ordered by the cost from the start plus the [great-circle](GreatCircle)
    /// distance to the target. Expands fewer nodes than [Algorithm::Dijkstra]
    /// while returning routes of the same length.
    #[default]
    AStar,
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Dijkstra => f.write_str("dijkstra"),
            Self::AStar => f.write_str("astar"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown search algorithm: {0:?} (expected \"dijkstra\" or \"astar\")")]
pub struct ParseAlgorithmError(String);

impl FromStr for Algorithm {
    type Err = ParseAlgorithmError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "dijkstra" => Ok(Self::Dijkstra),
            "astar" | "a*" | "a-star" => Ok(Self::AStar),
            _ => Err(ParseAlgorithmError(s.to_string())),
        }
    }
}

/// Finds the shortest path between two nodes with the given [Algorithm].
///
/// Returns [None] if either node doesn't exist in the graph, or if
/// there is no route between them. Both algorithms return paths of the same
/// total cost, although they may differ in the node sequence when multiple
/// shortest paths exist.
pub fn find_path(g: &Graph, from_id: i64, to_id: i64, algorithm: Algorithm) -> Option<Path> {
    match algorithm {
        Algorithm::Dijkstra => find_path_with(g, from_id, to_id, &Zero),
        Algorithm::AStar => find_path_with(g, from_id, to_id, &GreatCircle),
    }
}

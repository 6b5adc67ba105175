// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use serde::Serialize;

use crate::{
    assemble, find_path, format_walking_time, round_distance, Algorithm, Coord, Graph, Node,
    NodeDirectory,
};

/// Client-facing reasons why a route can't be provided.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RouteError {
    /// A node identifier supplied by the client is missing or not an integer.
    #[error("invalid node id: {0:?}")]
    InvalidIdentifier(String),

    /// Search exhausted all options without reaching the target,
    /// or one of the endpoints is not a part of the graph.
    #[error("no route found between {start} and {end}")]
    NoRoute { start: i64, end: i64 },
}

/// Parses a client-supplied node identifier.
pub fn parse_node_id(s: &str) -> Result<i64, RouteError> {
    s.trim()
        .parse()
        .map_err(|_| RouteError::InvalidIdentifier(s.to_string()))
}

/// Node description attached to a [Route].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NodeRecord {
    pub id: i64,
    pub lat: f64,
    pub lng: f64,
    pub name: String,
}

impl From<&Node> for NodeRecord {
    fn from(n: &Node) -> Self {
        Self {
            id: n.id,
            lat: n.position.lat,
            lng: n.position.lon,
            name: n.display_name(),
        }
    }
}

/// Result of a route query.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Route {
    /// Ids of nodes along the route, start and end inclusive.
    pub path: Vec<i64>,

    /// Polyline of the route, as `[lat, lng]` pairs.
    pub coords: Vec<Coord>,

    /// Length of the route in meters, rounded to 1 decimal place.
    pub distance: f64,

    /// Estimated walking time, see [format_walking_time].
    pub walking_time: String,

    pub start_info: Option<NodeRecord>,
    pub end_info: Option<NodeRecord>,
}

/// Answers route queries over a loaded campus map.
///
/// The Router never mutates its data, so a single instance may be shared
/// between threads serving concurrent queries.
#[derive(Debug, Clone)]
pub struct Router {
    graph: Graph,
    directory: NodeDirectory,
    algorithm: Algorithm,
}

impl Router {
    pub fn new(graph: Graph, directory: NodeDirectory, algorithm: Algorithm) -> Self {
        Self {
            graph,
            directory,
            algorithm,
        }
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    pub fn directory(&self) -> &NodeDirectory {
        &self.directory
    }

    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    /// Finds the shortest walking [Route] between two nodes.
    pub fn route(&self, start: i64, end: i64) -> Result<Route, RouteError> {
        let path = find_path(&self.graph, start, end, self.algorithm)
            .ok_or(RouteError::NoRoute { start, end })?
            .into_nodes();

        let (coords, distance) = assemble(&self.graph, &path);

        Ok(Route {
            path,
            coords,
            distance: round_distance(distance),
            walking_time: format_walking_time(distance),
            start_info: self.directory.get(start).map(NodeRecord::from),
            end_info: self.directory.get(end).map(NodeRecord::from),
        })
    }

    /// Same as [Router::route], but parses client-supplied node identifiers first.
    pub fn route_str(&self, start: &str, end: &str) -> Result<Route, RouteError> {
        let start = parse_node_id(start)?;
        let end = parse_node_id(end)?;
        self.route(start, end)
    }
}

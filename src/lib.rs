// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

//! Shortest walking routes between named locations on a campus.
//!
//! A campus map is loaded from two tables (edges with [WKT](https://en.wikipedia.org/wiki/Well-known_text_representation_of_geometry)
//! geometries, and nodes with optional names) into an immutable weighted directed [Graph].
//! Routes are found with Dijkstra's algorithm or A* (using great-circle distance as the heuristic),
//! and turned into a continuous polyline with a total distance and a walking time estimate.
//!
//! # Example
//!
//! ```no_run
//! let dataset = campus_router::loader::load_from_files(
//!     "data/graph.csv",
//!     "data/nodes.csv",
//!     &campus_router::loader::Options::default(),
//! ).expect("failed to load the campus map");
//!
//! let router = campus_router::Router::new(
//!     dataset.graph,
//!     dataset.directory,
//!     campus_router::Algorithm::AStar,
//! );
//!
//! match router.route_str("1", "42") {
//!     Ok(route) => println!("{} m, {}", route.distance, route.walking_time),
//!     Err(e) => eprintln!("{}", e),
//! }
//! ```

mod directory;
mod distance;
mod graph;
mod heuristic;
mod kd;
pub mod loader;
mod route;
mod router;
mod search;

pub use directory::{NodeDirectory, DEFAULT_SEARCH_LIMIT};
pub use distance::earth_distance;
pub use graph::{Graph, GraphBuilder};
pub use heuristic::{GreatCircle, Heuristic, Zero};
pub use kd::KDTree;
pub use route::{
    assemble, format_walking_time, round_distance, walking_time_seconds, WALKING_SPEED,
};
pub use router::{parse_node_id, NodeRecord, Route, RouteError, Router};
pub use search::{find_path, find_path_with, Algorithm, ParseAlgorithmError, Path};

/// A position on Earth, in degrees.
///
/// At the serialization boundary a Coord is written as a `[lat, lng]` pair.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
#[serde(into = "[f64; 2]")]
pub struct Coord {
    pub lat: f64,
    pub lon: f64,
}

impl Coord {
    pub const fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

impl From<Coord> for [f64; 2] {
    fn from(c: Coord) -> Self {
        [c.lat, c.lon]
    }
}

/// Represents an element of the [Graph] - a campus location or a street intersection.
///
/// Nodes without a `name` are displayed with a synthetic `"Node <id>"` label.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub id: i64,
    pub position: Coord,
    pub name: Option<String>,
}

impl Node {
    /// Returns the name of the node, or `"Node <id>"` if the node is unnamed.
    pub fn display_name(&self) -> String {
        match &self.name {
            Some(name) => name.clone(),
            None => format!("Node {}", self.id),
        }
    }

    /// Returns true if the node carries an explicit name.
    pub fn is_named(&self) -> bool {
        self.name.is_some()
    }
}

/// Represents an outgoing (one-way) connection from a specific [Node].
///
/// `weight` is the real-world length of the connection, in meters, and is never negative.
/// `geometry` describes the physical path from the source node to `to`, and may be empty.
#[derive(Debug, Clone, PartialEq)]
pub struct Edge {
    pub to: i64,
    pub weight: f64,
    pub geometry: Vec<Coord>,
}

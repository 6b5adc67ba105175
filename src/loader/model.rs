// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use serde::Deserialize;

/// A row of the edge table.
///
/// `geometry` is a WKT `LINESTRING` with `lon lat` coordinate pairs.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub(super) struct EdgeRow {
    pub from: i64,
    pub to: i64,
    pub weight: f64,
    #[serde(default)]
    pub geometry: Option<String>,
}

/// A row of the node table. `x` is the longitude and `y` the latitude.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub(super) struct NodeRow {
    pub node_id: i64,
    pub x: f64,
    pub y: f64,
    #[serde(default)]
    pub name: Option<String>,
}

pub(super) const EDGE_COLUMNS: &[&str] = &["from", "to", "weight"];
pub(super) const NODE_COLUMNS: &[&str] = &["node_id", "x", "y"];

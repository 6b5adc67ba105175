// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use std::collections::btree_map::{BTreeMap, Entry};

use crate::{Coord, Edge, Node};

/// Represents a campus walking network as a set of [Nodes](Node)
/// and directed [Edges](Edge) between them.
///
/// A Graph can only be created with a [GraphBuilder] and is immutable afterwards,
/// so it can be freely shared between concurrent route queries.
/// Every edge in a Graph points to an existing node.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Graph(BTreeMap<i64, (Node, Vec<Edge>)>);

impl Graph {
    /// Returns the number of nodes in the graph.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if the graph has no nodes.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the number of directed edges in the graph.
    pub fn edge_count(&self) -> usize {
        self.0.values().map(|(_, edges)| edges.len()).sum()
    }

    /// Returns an iterator over all [Nodes](Node) in the graph, ordered by id.
    pub fn iter(&self) -> impl Iterator<Item = &Node> {
        self.0.values().map(|(node, _)| node)
    }

    /// Retrieves a [Node] with the provided id.
    pub fn get_node(&self, id: i64) -> Option<&Node> {
        self.0.get(&id).map(|(node, _)| node)
    }

    /// Returns true if a [Node] with the provided id exists.
    pub fn has_node(&self, id: i64) -> bool {
        self.0.contains_key(&id)
    }

    /// Gets all outgoing [Edges](Edge) from a node with a given id, in load order.
    /// Unknown nodes have no edges.
    pub fn get_edges(&self, from_id: i64) -> &[Edge] {
        self.0
            .get(&from_id)
            .map(|(_, e)| e.as_slice())
            .unwrap_or_default()
    }

    fn find_edge(&self, from_id: i64, to_id: i64) -> Option<&Edge> {
        self.get_edges(from_id).iter().find(|e| e.to == to_id)
    }

    /// Gets the weight of an [Edge] from one node to another,
    /// or [None] if no such edge exists.
    pub fn get_edge(&self, from_id: i64, to_id: i64) -> Option<f64> {
        self.find_edge(from_id, to_id).map(|e| e.weight)
    }

    /// Gets the geometry of an [Edge] from one node to another.
    /// Returns an empty slice if there is no such edge or it has no recorded shape.
    pub fn edge_geometry(&self, from_id: i64, to_id: i64) -> &[Coord] {
        self.find_edge(from_id, to_id)
            .map(|e| e.geometry.as_slice())
            .unwrap_or_default()
    }
}

/// Collects [Nodes](Node) and [Edges](Edge) and turns them into an immutable [Graph].
///
/// Duplicate nodes and duplicate `(from, to)` edges are resolved in favor of the last
/// one added. A replaced edge keeps its original position among the outgoing edges.
#[derive(Debug, Default)]
pub struct GraphBuilder {
    nodes: BTreeMap<i64, Node>,
    edges: BTreeMap<i64, Vec<Edge>>,
}

impl GraphBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates or replaces a [Node] with `node.id`.
    pub fn add_node(&mut self, node: Node) {
        match self.nodes.entry(node.id) {
            Entry::Vacant(e) => {
                e.insert(node);
            }
            Entry::Occupied(mut e) => {
                log::debug!("node {} defined more than once, keeping the last one", node.id);
                e.insert(node);
            }
        }
    }

    /// Creates or replaces an [Edge] from a node with a given id.
    ///
    /// Returns false (and drops the edge) if the weight is negative or not finite,
    /// as such edges would break route finding.
    pub fn add_edge(&mut self, from_id: i64, edge: Edge) -> bool {
        if !edge.weight.is_finite() || edge.weight < 0.0 {
            log::warn!(
                "edge {} -> {} has invalid weight {}, skipping",
                from_id,
                edge.to,
                edge.weight
            );
            return false;
        }

        let edges = self.edges.entry(from_id).or_default();
        if let Some(candidate) = edges.iter_mut().find(|e| e.to == edge.to) {
            log::debug!("edge {} -> {} defined more than once, keeping the last one", from_id, edge.to);
            *candidate = edge;
        } else {
            edges.push(edge);
        }
        true
    }

    /// Consumes the builder and creates the [Graph].
    ///
    /// Edges referring to nodes which were never added are dropped.
    pub fn build(self) -> Graph {
        let mut g: BTreeMap<i64, (Node, Vec<Edge>)> = self
            .nodes
            .into_iter()
            .map(|(id, node)| (id, (node, Vec::default())))
            .collect();

        let mut dangling = 0usize;
        for (from_id, edges) in self.edges {
            if !g.contains_key(&from_id) {
                log::warn!("{} edge(s) start at unknown node {}, skipping", edges.len(), from_id);
                dangling += edges.len();
                continue;
            }

            let (known, unknown): (Vec<Edge>, Vec<Edge>) =
                edges.into_iter().partition(|e| g.contains_key(&e.to));
            for e in &unknown {
                log::warn!("edge {} -> {} ends at an unknown node, skipping", from_id, e.to);
            }
            dangling += unknown.len();

            if let Some((_, outgoing)) = g.get_mut(&from_id) {
                *outgoing = known;
            }
        }

        let graph = Graph(g);
        log::info!(
            "built graph with {} nodes and {} edges ({} dangling edges dropped)",
            graph.len(),
            graph.edge_count(),
            dangling
        );
        graph
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(id: i64, lat: f64, lon: f64) -> Node {
        Node {
            id,
            position: Coord::new(lat, lon),
            name: None,
        }
    }

    fn edge(to: i64, weight: f64) -> Edge {
        Edge {
            to,
            weight,
            geometry: vec![],
        }
    }

    #[test]
    fn lookups() {
        let mut b = GraphBuilder::new();
        b.add_node(node(1, 0.0, 0.0));
        b.add_node(node(2, 0.0, 0.001));
        b.add_node(node(3, 0.001, 0.0));
        b.add_edge(
            1,
            Edge {
                to: 2,
                weight: 111.0,
                geometry: vec![Coord::new(0.0, 0.0), Coord::new(0.0, 0.001)],
            },
        );
        b.add_edge(2, edge(1, 111.0));
        let g = b.build();

        assert_eq!(g.len(), 3);
        assert_eq!(g.edge_count(), 2);
        assert!(g.has_node(3));
        assert!(!g.has_node(4));

        assert_eq!(g.get_edge(1, 2), Some(111.0));
        assert_eq!(g.get_edge(1, 3), None);
        assert_eq!(g.edge_geometry(1, 2).len(), 2);
        assert!(g.edge_geometry(2, 1).is_empty());
        assert!(g.edge_geometry(3, 1).is_empty());

        // Isolated and unknown nodes simply have no neighbors
        assert!(g.get_edges(3).is_empty());
        assert!(g.get_edges(42).is_empty());
    }

    #[test]
    fn duplicate_edge_last_wins_in_place() {
        let mut b = GraphBuilder::new();
        for id in 1..=3 {
            b.add_node(node(id, 0.0, 0.0));
        }
        b.add_edge(1, edge(2, 5.0));
        b.add_edge(1, edge(3, 7.0));
        b.add_edge(1, edge(2, 4.0));
        let g = b.build();

        let targets: Vec<i64> = g.get_edges(1).iter().map(|e| e.to).collect();
        assert_eq!(targets, vec![2, 3]);
        assert_eq!(g.get_edge(1, 2), Some(4.0));
    }

    #[test]
    fn duplicate_node_last_wins() {
        let mut b = GraphBuilder::new();
        b.add_node(node(1, 0.0, 0.0));
        b.add_node(Node {
            id: 1,
            position: Coord::new(1.0, 1.0),
            name: Some("Gate".to_string()),
        });
        let g = b.build();

        assert_eq!(g.len(), 1);
        assert_eq!(g.get_node(1).unwrap().name.as_deref(), Some("Gate"));
    }

    #[test]
    fn invalid_weights_are_rejected() {
        let mut b = GraphBuilder::new();
        b.add_node(node(1, 0.0, 0.0));
        b.add_node(node(2, 0.0, 0.0));
        assert!(!b.add_edge(1, edge(2, -1.0)));
        assert!(!b.add_edge(1, edge(2, f64::NAN)));
        assert!(!b.add_edge(1, edge(2, f64::INFINITY)));
        assert!(b.add_edge(1, edge(2, 0.0)));
        let g = b.build();

        assert_eq!(g.get_edge(1, 2), Some(0.0));
    }

    #[test]
    fn dangling_edges_are_dropped() {
        let mut b = GraphBuilder::new();
        b.add_node(node(1, 0.0, 0.0));
        b.add_node(node(2, 0.0, 0.0));
        b.add_edge(1, edge(2, 1.0));
        b.add_edge(1, edge(9, 1.0));
        b.add_edge(8, edge(1, 1.0));
        let g = b.build();

        assert_eq!(g.edge_count(), 1);
        assert_eq!(g.get_edge(1, 9), None);
        assert!(!g.has_node(8));
    }
}

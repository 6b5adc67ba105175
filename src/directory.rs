// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use std::collections::{BTreeMap, HashMap};

use crate::{Coord, Graph, KDTree, Node};

/// Default number of results returned by [NodeDirectory::search].
pub const DEFAULT_SEARCH_LIMIT: usize = 10;

/// Lookup of [Nodes](Node) by id, name and position, used for presenting
/// locations to the user and resolving their choices into node ids.
///
/// Nodes are kept in display order: named locations first, then unnamed nodes
/// (shown as `"Node <id>"`), alphabetically by display name within each group.
#[derive(Debug, Clone)]
pub struct NodeDirectory {
    nodes: Vec<Node>,
    by_id: HashMap<i64, usize>,
    tree: Option<KDTree>,
}

impl NodeDirectory {
    /// Creates a directory from the provided nodes. If an id appears more than once,
    /// the last node wins.
    pub fn new<I: IntoIterator<Item = Node>>(nodes: I) -> Self {
        let unique: BTreeMap<i64, Node> = nodes.into_iter().map(|n| (n.id, n)).collect();

        let mut nodes: Vec<(bool, String, Node)> = unique
            .into_values()
            .map(|n| (!n.is_named(), n.display_name(), n))
            .collect();
        nodes.sort_by(|a, b| (a.0, &a.1, a.2.id).cmp(&(b.0, &b.1, b.2.id)));
        let nodes: Vec<Node> = nodes.into_iter().map(|(_, _, n)| n).collect();

        let by_id = nodes.iter().enumerate().map(|(idx, n)| (n.id, idx)).collect();
        let tree = KDTree::build(nodes.iter().map(|n| (n.id, n.position)));

        Self { nodes, by_id, tree }
    }

    /// Creates a directory of all nodes of a [Graph].
    pub fn from_graph(g: &Graph) -> Self {
        Self::new(g.iter().cloned())
    }

    /// Returns the number of nodes in the directory.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Retrieves a [Node] with the provided id.
    pub fn get(&self, id: i64) -> Option<&Node> {
        self.by_id.get(&id).map(|&idx| &self.nodes[idx])
    }

    /// All nodes, in display order.
    pub fn list(&self) -> &[Node] {
        &self.nodes
    }

    /// Only the named nodes, in display order.
    pub fn named_locations(&self) -> &[Node] {
        let unnamed_start = self.nodes.partition_point(|n| n.is_named());
        &self.nodes[..unnamed_start]
    }

    /// Finds named locations matching a free-text query.
    ///
    /// The query is split on whitespace, and every term must appear (case-insensitively)
    /// in the location's name. An empty query matches all named locations.
    /// At most `limit` results are returned, in display order.
    pub fn search(&self, query: &str, limit: usize) -> Vec<&Node> {
        let terms: Vec<String> = query.split_whitespace().map(str::to_lowercase).collect();

        self.named_locations()
            .iter()
            .filter(|n| {
                let name = n.display_name().to_lowercase();
                terms.iter().all(|t| name.contains(t.as_str()))
            })
            .take(limit)
            .collect()
    }

    /// Finds the node closest to the given position, together with the distance to it in meters.
    /// Returns [None] only if the directory is empty.
    pub fn find_nearest(&self, position: Coord) -> Option<(&Node, f64)> {
        let (id, distance) = self.tree.as_ref()?.find_nearest(position);
        self.get(id).map(|n| (n, distance))
    }
}

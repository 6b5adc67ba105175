// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use std::collections::{BinaryHeap, HashMap, HashSet};

use crate::{Edge, Graph, Heuristic};

/// A route through the [Graph], from start to end (both inclusive).
///
/// `costs[i]` is the accumulated cost from the start to `nodes[i]`,
/// so the first cost is always zero. A Path never visits a node twice.
#[derive(Debug, Clone, PartialEq)]
pub struct Path {
    nodes: Vec<i64>,
    costs: Vec<f64>,
}

impl Path {
    /// Node ids along the path.
    pub fn nodes(&self) -> &[i64] {
        &self.nodes
    }

    /// Accumulated cost at every node along the path.
    pub fn costs(&self) -> &[f64] {
        &self.costs
    }

    /// Total cost of the path - the accumulated cost at the last node.
    pub fn total_cost(&self) -> f64 {
        self.costs.last().copied().unwrap_or(0.0)
    }

    /// Number of nodes in the path. Always at least 1.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn into_nodes(self) -> Vec<i64> {
        self.nodes
    }
}

#[derive(Debug, Clone, Copy)]
struct QueueItem {
    at: i64,
    cost: f64,
    score: f64,
    seq: u64,
}

impl PartialEq for QueueItem {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other).is_eq()
    }
}

impl Eq for QueueItem {}

impl PartialOrd for QueueItem {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for QueueItem {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        // NOTE: We revert the order of comparison,
        // as lower scores are considered better ("higher"),
        // and Rust's BinaryHeap is a max-heap.
        // Equal scores are popped in insertion order.
        other
            .score
            .total_cmp(&self.score)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

fn reconstruct_path(
    came_from: &HashMap<i64, i64>,
    known_costs: &HashMap<i64, f64>,
    mut last: i64,
) -> Path {
    let mut nodes = vec![last];

    while let Some(&nd) = came_from.get(&last) {
        nodes.push(nd);
        last = nd;
    }

    nodes.reverse();
    let costs = nodes
        .iter()
        .map(|id| known_costs.get(id).copied().unwrap_or(0.0))
        .collect();
    Path { nodes, costs }
}

/// Best-first search for the shortest path between two nodes in the provided graph,
/// with the frontier ordered by `cost + heuristic.estimate(node, to)`.
///
/// With [Zero](crate::Zero) this is [Dijkstra's algorithm](https://en.wikipedia.org/wiki/Dijkstra%27s_algorithm),
/// with [GreatCircle](crate::GreatCircle) this is [A*](https://en.wikipedia.org/wiki/A*_search_algorithm).
/// The returned path is optimal as long as the heuristic is admissible.
///
/// Returns [None] if either node doesn't exist, or if there is no route between them.
/// Equal-score candidates are expanded in the order they were discovered, so the
/// result is deterministic for a given graph.
pub fn find_path_with<H: Heuristic + ?Sized>(
    g: &Graph,
    from_id: i64,
    to_id: i64,
    heuristic: &H,
) -> Option<Path> {
    if !g.has_node(from_id) || !g.has_node(to_id) {
        log::debug!("no path {} -> {}: unknown endpoint", from_id, to_id);
        return None;
    }

    let mut queue: BinaryHeap<QueueItem> = BinaryHeap::default();
    let mut came_from: HashMap<i64, i64> = HashMap::default();
    let mut known_costs: HashMap<i64, f64> = HashMap::default();
    let mut closed: HashSet<i64> = HashSet::default();
    let mut seq: u64 = 0;

    queue.push(QueueItem {
        at: from_id,
        cost: 0.0,
        score: heuristic.estimate(g, from_id, to_id),
        seq,
    });
    known_costs.insert(from_id, 0.0);

    while let Some(item) = queue.pop() {
        if item.at == to_id {
            log::debug!(
                "found path {} -> {} of cost {:.1} after expanding {} nodes",
                from_id,
                to_id,
                item.cost,
                closed.len()
            );
            return Some(reconstruct_path(&came_from, &known_costs, to_id));
        }

        // Stale entries are left in the queue - skip nodes which were already expanded.
        if !closed.insert(item.at) {
            continue;
        }

        for &Edge {
            to: neighbor_id,
            weight,
            ..
        } in g.get_edges(item.at)
        {
            if closed.contains(&neighbor_id) {
                continue;
            }

            // Check if this is the cheapest way to the neighbor
            let neighbor_cost = item.cost + weight;
            if neighbor_cost
                >= known_costs
                    .get(&neighbor_id)
                    .copied()
                    .unwrap_or(f64::INFINITY)
            {
                continue;
            }

            // Push the new item into the queue
            came_from.insert(neighbor_id, item.at);
            known_costs.insert(neighbor_id, neighbor_cost);
            seq += 1;
            queue.push(QueueItem {
                at: neighbor_id,
                cost: neighbor_cost,
                score: neighbor_cost + heuristic.estimate(g, neighbor_id, to_id),
                seq,
            });
        }
    }

    log::debug!(
        "no path {} -> {} after expanding {} nodes",
        from_id,
        to_id,
        closed.len()
    );
    None
}

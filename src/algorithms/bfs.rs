//! Breadth-first traversal.
//!
//! Nodes come out in non-decreasing edge-count distance from the start. The
//! frontier is a FIFO queue; a node may be enqueued once per parent that
//! discovers it before it is dequeued, and the extra copies are dropped when
//! they reach the front.

use crate::graph::{Graph, NodeId};
use std::collections::VecDeque;

/// Visit every node reachable from `start` in breadth-first order.
///
/// Nodes at equal distance appear in the order their parents were processed,
/// and in neighbor-list order within one parent.
///
/// ```
/// use algo_graph_wasm::{breadth_first, Graph};
///
/// let graph = Graph::from_adjacency([
///     ("A", vec!["B", "C"]),
///     ("B", vec!["D"]),
///     ("C", vec!["E"]),
///     ("D", vec![]),
///     ("E", vec![]),
/// ]);
/// assert_eq!(breadth_first(&graph, &"A"), vec!["A", "B", "C", "D", "E"]);
/// ```
#[tracing::instrument(level = "debug", skip_all, fields(start = ?start, nodes = graph.node_count()))]
pub fn breadth_first<N: NodeId>(graph: &Graph<N>, start: &N) -> Vec<N> {
    levels_from(graph, start)
        .into_iter()
        .map(|(node, _)| node)
        .collect()
}

/// Breadth-first order paired with each node's edge-count distance from `start`.
#[tracing::instrument(level = "debug", skip_all, fields(start = ?start, nodes = graph.node_count()))]
pub fn bfs_levels<N: NodeId>(graph: &Graph<N>, start: &N) -> Vec<(N, usize)> {
    levels_from(graph, start)
}

fn levels_from<N: NodeId>(graph: &Graph<N>, start: &N) -> Vec<(N, usize)> {
    let Some(root) = graph.node_idx(start) else {
        tracing::debug!("start node not in graph");
        return vec![(start.clone(), 0)];
    };

    let levels = bfs_order(graph, root);
    tracing::debug!(visited = levels.len(), "breadth-first traversal complete");

    levels
        .into_iter()
        .filter_map(|(idx, depth)| graph.node_id(idx).map(|id| (id.clone(), depth)))
        .collect()
}

/// Breadth-first order over node indices, with depths.
fn bfs_order<N: NodeId>(graph: &Graph<N>, root: usize) -> Vec<(usize, usize)> {
    let mut visited = vec![false; graph.node_count()];
    let mut result = Vec::new();
    let mut queue = VecDeque::new();

    queue.push_back((root, 0usize));

    while let Some((v, depth)) = queue.pop_front() {
        if visited[v] {
            continue; // Duplicate discovery
        }
        visited[v] = true;
        result.push((v, depth));
        if !graph.is_declared_idx(v) {
            tracing::trace!(node = v, "node has no entry, treating as dead end");
        }

        for &w in graph.successors_slice(v) {
            if !visited[w] {
                queue.push_back((w, depth + 1));
            }
        }
    }

    result
}

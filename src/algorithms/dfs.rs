//! Depth-first traversal.
//!
//! Pre-order: a node is recorded when first reached, then each of its
//! unvisited neighbors is explored completely, in neighbor-list order, before
//! the next one. The recursion is replaced by an explicit stack of frames so
//! arbitrarily deep graphs do not exhaust the call stack.

use crate::graph::{Graph, NodeId};

/// One suspended "call": the node being expanded and the position of the
/// next neighbor to try.
struct Frame {
    node: usize,
    cursor: usize,
}

/// Visit every node reachable from `start` in depth-first pre-order.
///
/// A start node unknown to the graph yields `[start]`. Already-visited
/// neighbors are skipped, so cycles terminate.
///
/// ```
/// use algo_graph_wasm::{depth_first, Graph};
///
/// let graph = Graph::from_adjacency([
///     ("A", vec!["B", "C"]),
///     ("B", vec!["D"]),
///     ("C", vec!["E"]),
///     ("D", vec![]),
///     ("E", vec![]),
/// ]);
/// assert_eq!(depth_first(&graph, &"A"), vec!["A", "B", "D", "C", "E"]);
/// ```
#[tracing::instrument(level = "debug", skip_all, fields(start = ?start, nodes = graph.node_count()))]
pub fn depth_first<N: NodeId>(graph: &Graph<N>, start: &N) -> Vec<N> {
    let Some(root) = graph.node_idx(start) else {
        tracing::debug!("start node not in graph");
        return vec![start.clone()];
    };

    let order = dfs_order(graph, root);
    tracing::debug!(visited = order.len(), "depth-first traversal complete");

    order
        .into_iter()
        .filter_map(|idx| graph.node_id(idx).cloned())
        .collect()
}

/// Depth-first pre-order over node indices.
fn dfs_order<N: NodeId>(graph: &Graph<N>, root: usize) -> Vec<usize> {
    let mut visited = vec![false; graph.node_count()];
    let mut order = Vec::new();
    let mut stack = vec![Frame {
        node: root,
        cursor: 0,
    }];

    visited[root] = true;
    order.push(root);

    while let Some(frame) = stack.last_mut() {
        let succs = graph.successors_slice(frame.node);

        // Advance past neighbors visited since this frame was suspended
        while frame.cursor < succs.len() && visited[succs[frame.cursor]] {
            frame.cursor += 1;
        }

        match succs.get(frame.cursor) {
            Some(&next) => {
                frame.cursor += 1;
                visited[next] = true;
                order.push(next);
                if !graph.is_declared_idx(next) {
                    tracing::trace!(node = next, "node has no entry, treating as dead end");
                }
                stack.push(Frame {
                    node: next,
                    cursor: 0,
                });
            }
            None => {
                stack.pop();
            }
        }
    }

    order
}

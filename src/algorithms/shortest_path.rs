//! Single-source shortest paths (Dijkstra) on non-negatively weighted graphs.
//!
//! The frontier is a binary heap of `(tentative distance, node)` entries. A
//! node's distance is never decreased in place: a better path pushes a fresh
//! entry and the outdated one is dropped when it is popped after the node has
//! been finalized. Complexity is O((V + E) log V).

use crate::error::Result;
use crate::graph::{NodeId, WeightedGraph};
use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap};

/// Shortest distance to a node, or the explicit absence of any path.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Distance {
    Finite(f64),
    Unreachable,
}

impl Distance {
    /// The distance, or `None` when unreachable.
    pub fn value(self) -> Option<f64> {
        match self {
            Distance::Finite(d) => Some(d),
            Distance::Unreachable => None,
        }
    }

    pub fn is_reachable(self) -> bool {
        matches!(self, Distance::Finite(_))
    }
}

/// Serialized as a number, or `null` when unreachable.
impl Serialize for Distance {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Distance::Finite(d) => serializer.serialize_f64(*d),
            Distance::Unreachable => serializer.serialize_none(),
        }
    }
}

/// One row of a [`DistanceTable`].
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceEntry<N> {
    pub node: N,
    pub distance: Distance,
    /// Previous node on one shortest path from the start
    pub predecessor: Option<N>,
}

/// Result of [`shortest_paths`]: a distance for every node of the graph.
///
/// Rows follow the graph's node order; a start node unknown to the graph is
/// appended last. Nodes that only appear as edge targets are listed only when
/// reached.
#[derive(Debug, Clone)]
pub struct DistanceTable<N> {
    entries: Vec<DistanceEntry<N>>,
    index: HashMap<N, usize>,
}

impl<N: NodeId> DistanceTable<N> {
    fn with_capacity(capacity: usize) -> Self {
        DistanceTable {
            entries: Vec::with_capacity(capacity),
            index: HashMap::with_capacity(capacity),
        }
    }

    fn push(&mut self, node: N, distance: Distance, predecessor: Option<N>) {
        self.index.insert(node.clone(), self.entries.len());
        self.entries.push(DistanceEntry {
            node,
            distance,
            predecessor,
        });
    }

    fn entry(&self, node: &N) -> Option<&DistanceEntry<N>> {
        self.index.get(node).map(|&i| &self.entries[i])
    }

    /// Distance to `node`; `None` if the node is not in the table at all.
    pub fn get(&self, node: &N) -> Option<Distance> {
        self.entry(node).map(|e| e.distance)
    }

    pub fn predecessor(&self, node: &N) -> Option<&N> {
        self.entry(node).and_then(|e| e.predecessor.as_ref())
    }

    pub fn entries(&self) -> &[DistanceEntry<N>] {
        &self.entries
    }

    pub fn iter(&self) -> impl Iterator<Item = (&N, Distance)> + '_ {
        self.entries.iter().map(|e| (&e.node, e.distance))
    }

    /// Reachable nodes with their finite distances.
    pub fn reachable(&self) -> impl Iterator<Item = (&N, f64)> + '_ {
        self.entries
            .iter()
            .filter_map(|e| e.distance.value().map(|d| (&e.node, d)))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Nodes along one shortest path from the start to `target`, both ends
    /// included. `None` if `target` is unreachable or unknown.
    pub fn path_to(&self, target: &N) -> Option<Vec<N>> {
        let mut current = self.entry(target)?;
        if !current.distance.is_reachable() {
            return None;
        }

        let mut path = vec![current.node.clone()];
        while let Some(prev) = &current.predecessor {
            // Predecessor chains are acyclic; the bound only guards corrupt tables
            if path.len() > self.entries.len() {
                return None;
            }
            current = self.entry(prev)?;
            path.push(current.node.clone());
        }
        path.reverse();
        Some(path)
    }
}

impl<N: NodeId + Serialize> Serialize for DistanceTable<N> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for entry in &self.entries {
            map.serialize_entry(&entry.node, &entry.distance)?;
        }
        map.end()
    }
}

/// Frontier entry. Ordered so `BinaryHeap` pops the smallest distance first;
/// equal distances pop in insertion order.
#[derive(Debug, Clone, Copy)]
struct FrontierEntry {
    distance: f64,
    node: usize,
    seq: u64,
}

impl Ord for FrontierEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .distance
            .total_cmp(&self.distance)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for FrontierEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for FrontierEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for FrontierEntry {}

/// Compute the minimum-weight distance from `start` to every node.
///
/// Fails with [`GraphError::NegativeWeight`](crate::GraphError::NegativeWeight)
/// or [`GraphError::InvalidWeight`](crate::GraphError::InvalidWeight) before
/// doing any work if a weight is negative, NaN or infinite.
///
/// ```
/// use algo_graph_wasm::{shortest_paths, Distance, WeightedGraph};
///
/// let graph = WeightedGraph::from_adjacency([
///     ("A", vec![("B", 1.0), ("C", 4.0)]),
///     ("B", vec![("C", 2.0), ("D", 6.0)]),
///     ("C", vec![("D", 3.0)]),
///     ("D", vec![]),
/// ]);
/// let table = shortest_paths(&graph, &"A").unwrap();
/// assert_eq!(table.get(&"D"), Some(Distance::Finite(6.0)));
/// ```
#[tracing::instrument(level = "debug", skip_all, fields(start = ?start, nodes = graph.node_count(), edges = graph.edge_count()))]
pub fn shortest_paths<N: NodeId>(graph: &WeightedGraph<N>, start: &N) -> Result<DistanceTable<N>> {
    if let Err(err) = graph.validate() {
        tracing::warn!(%err, "rejecting weighted graph");
        return Err(err);
    }

    let n = graph.node_count();
    let root = graph.node_idx(start);

    let mut dist = vec![f64::INFINITY; n];
    let mut pred: Vec<Option<usize>> = vec![None; n];
    let mut finalized = vec![false; n];
    let mut heap = BinaryHeap::new();
    let mut seq = 0u64;
    let mut stale = 0usize;

    if let Some(root) = root {
        dist[root] = 0.0;
        heap.push(FrontierEntry {
            distance: 0.0,
            node: root,
            seq,
        });
        seq += 1;
    }

    while let Some(FrontierEntry { distance, node, .. }) = heap.pop() {
        if finalized[node] {
            stale += 1;
            tracing::trace!(node, distance, "discarding stale frontier entry");
            continue;
        }
        finalized[node] = true;
        if !graph.is_declared_idx(node) {
            tracing::trace!(node, "node has no entry, treating as dead end");
        }

        // Relax outgoing edges
        for &(next, weight) in graph.successors_slice(node) {
            if finalized[next] {
                continue;
            }
            let candidate = distance + weight;
            if candidate < dist[next] {
                dist[next] = candidate;
                pred[next] = Some(node);
                heap.push(FrontierEntry {
                    distance: candidate,
                    node: next,
                    seq,
                });
                seq += 1;
            }
        }
    }

    let mut table = DistanceTable::with_capacity(n + 1);
    for (idx, &d) in dist.iter().enumerate() {
        let reached = d.is_finite();
        if !reached && !graph.is_declared_idx(idx) && Some(idx) != root {
            continue;
        }
        let Some(node) = graph.node_id(idx) else {
            continue;
        };
        let distance = if reached {
            Distance::Finite(d)
        } else {
            Distance::Unreachable
        };
        let predecessor = pred[idx].and_then(|p| graph.node_id(p).cloned());
        table.push(node.clone(), distance, predecessor);
    }
    if root.is_none() {
        tracing::debug!("start node not in graph");
        table.push(start.clone(), Distance::Finite(0.0), None);
    }

    tracing::debug!(
        finalized = finalized.iter().filter(|&&f| f).count(),
        stale,
        "shortest paths complete"
    );
    Ok(table)
}

//! Directed graph models with adjacency lists.
//!
//! [`Graph`] keeps an ordered neighbor list per node; [`WeightedGraph`] keeps a
//! neighbor -> weight mapping per node. Both intern node identifiers to dense
//! indices so the traversals work on `usize` and only clone identifiers when
//! building their results.
//!
//! A node is *declared* when it was added as a key (explicitly, or as the
//! source of an edge). A node that only appears as an edge target is still
//! interned, but it has no outgoing edges: traversals reach it and stop there.

use crate::error::{GraphError, Result};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;

/// Anything usable as a node identifier: strings, integers, small enums.
pub trait NodeId: Clone + Eq + Hash + Debug {}

impl<T: Clone + Eq + Hash + Debug> NodeId for T {}

/// Interned node identifiers shared by both graph variants.
#[derive(Debug, Clone)]
struct NodeTable<N> {
    /// Identifiers in insertion order
    nodes: Vec<N>,

    /// Reverse lookup: identifier -> index
    node_index: HashMap<N, usize>,

    /// declared[i] is false for nodes only referenced as an edge target
    declared: Vec<bool>,
}

impl<N: NodeId> NodeTable<N> {
    fn with_capacity(capacity: usize) -> Self {
        NodeTable {
            nodes: Vec::with_capacity(capacity),
            node_index: HashMap::with_capacity(capacity),
            declared: Vec::with_capacity(capacity),
        }
    }

    /// Returns the index of `id` and whether it was newly inserted.
    fn intern(&mut self, id: N) -> (usize, bool) {
        if let Some(&idx) = self.node_index.get(&id) {
            return (idx, false);
        }
        let idx = self.nodes.len();
        self.node_index.insert(id.clone(), idx);
        self.nodes.push(id);
        self.declared.push(false);
        (idx, true)
    }

    fn declare(&mut self, idx: usize) {
        if let Some(flag) = self.declared.get_mut(idx) {
            *flag = true;
        }
    }

    fn undeclare(&mut self, idx: usize) {
        if let Some(flag) = self.declared.get_mut(idx) {
            *flag = false;
        }
    }

    fn get(&self, idx: usize) -> Option<&N> {
        self.nodes.get(idx)
    }

    fn index_of(&self, id: &N) -> Option<usize> {
        self.node_index.get(id).copied()
    }

    fn is_declared(&self, idx: usize) -> bool {
        self.declared.get(idx).copied().unwrap_or(false)
    }

    fn len(&self) -> usize {
        self.nodes.len()
    }

    fn referenced_only(&self) -> Vec<usize> {
        self.declared
            .iter()
            .enumerate()
            .filter_map(|(i, &declared)| if declared { None } else { Some(i) })
            .collect()
    }
}

/// Serializable snapshot of an unweighted graph.
#[derive(Serialize, Deserialize)]
pub struct GraphSnapshot<N> {
    pub nodes: Vec<N>,
    pub edges: Vec<(usize, usize)>,
    /// Indices of nodes that are only referenced as edge targets
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub referenced: Vec<usize>,
}

/// Serializable snapshot of a weighted graph.
#[derive(Serialize, Deserialize)]
pub struct WeightedGraphSnapshot<N> {
    pub nodes: Vec<N>,
    pub edges: Vec<(usize, usize, f64)>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub referenced: Vec<usize>,
}

/// Directed graph with ordered neighbor lists.
///
/// Neighbor order is the order edges were added, which is the order DFS and
/// BFS explore them in.
#[derive(Debug, Clone)]
pub struct Graph<N> {
    table: NodeTable<N>,

    /// Forward adjacency: adj[u] = nodes that u points to, in insertion order
    adj: Vec<Vec<usize>>,

    edge_count: usize,
}

impl<N: NodeId> Graph<N> {
    /// Create an empty graph.
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Create a graph with pre-allocated node capacity.
    pub fn with_capacity(node_capacity: usize) -> Self {
        Graph {
            table: NodeTable::with_capacity(node_capacity),
            adj: Vec::with_capacity(node_capacity),
            edge_count: 0,
        }
    }

    /// Build a graph from `(node, neighbors)` pairs, keeping the caller's order.
    ///
    /// ```
    /// use algo_graph_wasm::Graph;
    ///
    /// let graph = Graph::from_adjacency([("A", vec!["B", "C"]), ("B", vec![]), ("C", vec![])]);
    /// assert_eq!(graph.node_count(), 3);
    /// assert_eq!(graph.neighbors(&"A").collect::<Vec<_>>(), vec![&"B", &"C"]);
    /// ```
    pub fn from_adjacency<I, J>(adjacency: I) -> Self
    where
        I: IntoIterator<Item = (N, J)>,
        J: IntoIterator<Item = N>,
    {
        let mut graph = Graph::new();
        for (node, neighbors) in adjacency {
            let from = graph.add_node(node);
            for neighbor in neighbors {
                let to = graph.intern(neighbor);
                graph.add_edge(from, to);
            }
        }
        graph
    }

    fn intern(&mut self, id: N) -> usize {
        let (idx, inserted) = self.table.intern(id);
        if inserted {
            self.adj.push(Vec::new());
        }
        idx
    }

    /// Add a node, returns its index. Idempotent - returns existing index if already present.
    pub fn add_node(&mut self, id: N) -> usize {
        let idx = self.intern(id);
        self.table.declare(idx);
        idx
    }

    /// Add a directed edge from -> to by index. Idempotent.
    pub fn add_edge(&mut self, from: usize, to: usize) {
        if from >= self.adj.len() || to >= self.adj.len() {
            return; // Silently ignore invalid edges
        }
        self.table.declare(from);

        if self.adj[from].contains(&to) {
            return;
        }
        self.adj[from].push(to);
        self.edge_count += 1;
    }

    /// Add a directed edge by identifier. `from` becomes a declared node;
    /// `to` is interned if it is new.
    pub fn connect(&mut self, from: N, to: N) {
        let from = self.add_node(from);
        let to = self.intern(to);
        self.add_edge(from, to);
    }

    /// Number of nodes, including nodes only referenced as edge targets.
    pub fn node_count(&self) -> usize {
        self.table.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// Get node identifier by index.
    pub fn node_id(&self, idx: usize) -> Option<&N> {
        self.table.get(idx)
    }

    /// Get node index by identifier.
    pub fn node_idx(&self, id: &N) -> Option<usize> {
        self.table.index_of(id)
    }

    pub fn contains(&self, id: &N) -> bool {
        self.table.index_of(id).is_some()
    }

    /// Whether `id` has its own entry, as opposed to only being an edge target.
    pub fn is_declared(&self, id: &N) -> bool {
        self.table
            .index_of(id)
            .is_some_and(|idx| self.table.is_declared(idx))
    }

    /// All node identifiers in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = &N> + '_ {
        self.table.nodes.iter()
    }

    /// Neighbors of `id` in insertion order. Unknown nodes have none.
    pub fn neighbors<'a>(&'a self, id: &N) -> impl Iterator<Item = &'a N> + 'a {
        let succs = self
            .table
            .index_of(id)
            .map_or(&[][..], |idx| self.successors_slice(idx));
        succs.iter().map(move |&to| &self.table.nodes[to])
    }

    pub fn out_degree(&self, id: &N) -> usize {
        self.table
            .index_of(id)
            .map_or(0, |idx| self.successors_slice(idx).len())
    }

    /// Get successors slice (internal use).
    pub(crate) fn successors_slice(&self, node: usize) -> &[usize] {
        self.adj.get(node).map_or(&[], |v| v.as_slice())
    }

    /// Whether node `idx` has its own entry (internal use).
    pub(crate) fn is_declared_idx(&self, idx: usize) -> bool {
        self.table.is_declared(idx)
    }

    /// Iterate over all edges (internal use).
    pub(crate) fn edges(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.adj
            .iter()
            .enumerate()
            .flat_map(|(from, tos)| tos.iter().map(move |&to| (from, to)))
    }
}

impl<N: NodeId + Serialize> Graph<N> {
    /// Export graph as JSON snapshot.
    pub fn to_json(&self) -> Result<String> {
        let snapshot = GraphSnapshot {
            nodes: self.table.nodes.clone(),
            edges: self.edges().collect(),
            referenced: self.table.referenced_only(),
        };
        Ok(serde_json::to_string(&snapshot)?)
    }
}

impl<N: NodeId + DeserializeOwned> Graph<N> {
    /// Import graph from JSON snapshot.
    pub fn from_json(json: &str) -> Result<Self> {
        let snapshot: GraphSnapshot<N> = serde_json::from_str(json)?;

        let mut graph = Graph::with_capacity(snapshot.nodes.len());
        let indices: Vec<usize> = snapshot
            .nodes
            .into_iter()
            .map(|id| graph.add_node(id))
            .collect();
        for idx in snapshot.referenced {
            if let Some(&idx) = indices.get(idx) {
                graph.table.undeclare(idx);
            }
        }
        for (from, to) in snapshot.edges {
            match (indices.get(from), indices.get(to)) {
                (Some(&f), Some(&t)) => graph.add_edge(f, t),
                _ => {
                    return Err(GraphError::EdgeOutOfRange {
                        from,
                        to,
                        nodes: indices.len(),
                    })
                }
            }
        }
        Ok(graph)
    }
}

impl Graph<String> {
    /// Build from a JSON adjacency object such as `{"A": ["B", "C"], "B": []}`.
    pub fn from_adjacency_json(json: &str) -> Result<Self> {
        let object: serde_json::Map<String, serde_json::Value> = serde_json::from_str(json)?;
        let mut adjacency = Vec::with_capacity(object.len());
        for (node, neighbors) in object {
            let neighbors: Vec<String> = serde_json::from_value(neighbors)?;
            adjacency.push((node, neighbors));
        }
        Ok(Graph::from_adjacency(adjacency))
    }
}

impl<N: NodeId> Default for Graph<N> {
    fn default() -> Self {
        Self::new()
    }
}

/// Directed graph whose edges carry a weight.
///
/// Each node maps neighbors to weights; adding an edge that already exists
/// replaces its weight. Weights are only checked by [`WeightedGraph::validate`],
/// which the shortest-path computation runs before doing any work.
#[derive(Debug, Clone)]
pub struct WeightedGraph<N> {
    table: NodeTable<N>,

    /// adj[u] = (neighbor, weight) pairs in insertion order
    adj: Vec<Vec<(usize, f64)>>,

    edge_count: usize,
}

impl<N: NodeId> WeightedGraph<N> {
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    pub fn with_capacity(node_capacity: usize) -> Self {
        WeightedGraph {
            table: NodeTable::with_capacity(node_capacity),
            adj: Vec::with_capacity(node_capacity),
            edge_count: 0,
        }
    }

    /// Build a graph from `(node, [(neighbor, weight)])` pairs.
    ///
    /// ```
    /// use algo_graph_wasm::WeightedGraph;
    ///
    /// let graph = WeightedGraph::from_adjacency([("A", vec![("B", 1.0)]), ("B", vec![])]);
    /// assert_eq!(graph.weight(&"A", &"B"), Some(1.0));
    /// ```
    pub fn from_adjacency<I, J>(adjacency: I) -> Self
    where
        I: IntoIterator<Item = (N, J)>,
        J: IntoIterator<Item = (N, f64)>,
    {
        let mut graph = WeightedGraph::new();
        for (node, neighbors) in adjacency {
            let from = graph.add_node(node);
            for (neighbor, weight) in neighbors {
                let to = graph.intern(neighbor);
                graph.add_edge(from, to, weight);
            }
        }
        graph
    }

    fn intern(&mut self, id: N) -> usize {
        let (idx, inserted) = self.table.intern(id);
        if inserted {
            self.adj.push(Vec::new());
        }
        idx
    }

    /// Add a node, returns its index. Idempotent.
    pub fn add_node(&mut self, id: N) -> usize {
        let idx = self.intern(id);
        self.table.declare(idx);
        idx
    }

    /// Add or re-weight the directed edge from -> to.
    pub fn add_edge(&mut self, from: usize, to: usize, weight: f64) {
        if from >= self.adj.len() || to >= self.adj.len() {
            return;
        }
        self.table.declare(from);

        if let Some(edge) = self.adj[from].iter_mut().find(|(t, _)| *t == to) {
            edge.1 = weight;
            return;
        }
        self.adj[from].push((to, weight));
        self.edge_count += 1;
    }

    pub fn connect(&mut self, from: N, to: N, weight: f64) {
        let from = self.add_node(from);
        let to = self.intern(to);
        self.add_edge(from, to, weight);
    }

    pub fn node_count(&self) -> usize {
        self.table.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    pub fn node_id(&self, idx: usize) -> Option<&N> {
        self.table.get(idx)
    }

    pub fn node_idx(&self, id: &N) -> Option<usize> {
        self.table.index_of(id)
    }

    pub fn contains(&self, id: &N) -> bool {
        self.table.index_of(id).is_some()
    }

    pub fn is_declared(&self, id: &N) -> bool {
        self.table
            .index_of(id)
            .is_some_and(|idx| self.table.is_declared(idx))
    }

    pub fn nodes(&self) -> impl Iterator<Item = &N> + '_ {
        self.table.nodes.iter()
    }

    /// Outgoing `(neighbor, weight)` pairs of `id`.
    pub fn neighbors<'a>(&'a self, id: &N) -> impl Iterator<Item = (&'a N, f64)> + 'a {
        let succs = self
            .table
            .index_of(id)
            .map_or(&[][..], |idx| self.successors_slice(idx));
        succs
            .iter()
            .map(move |&(to, weight)| (&self.table.nodes[to], weight))
    }

    /// Weight of the edge from -> to, if present.
    pub fn weight(&self, from: &N, to: &N) -> Option<f64> {
        let from = self.table.index_of(from)?;
        let to = self.table.index_of(to)?;
        self.successors_slice(from)
            .iter()
            .find(|(t, _)| *t == to)
            .map(|&(_, weight)| weight)
    }

    /// Check every weight is a finite, non-negative number.
    pub fn validate(&self) -> Result<()> {
        for (from, to, weight) in self.edges() {
            if weight.is_nan() || weight == f64::INFINITY {
                return Err(GraphError::InvalidWeight {
                    from: format!("{:?}", self.table.nodes[from]),
                    to: format!("{:?}", self.table.nodes[to]),
                    weight,
                });
            }
            if weight < 0.0 {
                return Err(GraphError::NegativeWeight {
                    from: format!("{:?}", self.table.nodes[from]),
                    to: format!("{:?}", self.table.nodes[to]),
                    weight,
                });
            }
        }
        Ok(())
    }

    pub(crate) fn successors_slice(&self, node: usize) -> &[(usize, f64)] {
        self.adj.get(node).map_or(&[], |v| v.as_slice())
    }

    pub(crate) fn edges(&self) -> impl Iterator<Item = (usize, usize, f64)> + '_ {
        self.adj.iter().enumerate().flat_map(|(from, tos)| {
            tos.iter().map(move |&(to, weight)| (from, to, weight))
        })
    }

    /// Whether node `idx` has its own entry (internal use).
    pub(crate) fn is_declared_idx(&self, idx: usize) -> bool {
        self.table.is_declared(idx)
    }
}

impl<N: NodeId + Serialize> WeightedGraph<N> {
    /// Export graph as JSON snapshot. JSON has no infinity or NaN, so a graph
    /// that fails [`WeightedGraph::validate`] is refused rather than written
    /// with `null` weights.
    pub fn to_json(&self) -> Result<String> {
        self.validate()?;
        let snapshot = WeightedGraphSnapshot {
            nodes: self.table.nodes.clone(),
            edges: self.edges().collect(),
            referenced: self.table.referenced_only(),
        };
        Ok(serde_json::to_string(&snapshot)?)
    }
}

impl<N: NodeId + DeserializeOwned> WeightedGraph<N> {
    pub fn from_json(json: &str) -> Result<Self> {
        let snapshot: WeightedGraphSnapshot<N> = serde_json::from_str(json)?;

        let mut graph = WeightedGraph::with_capacity(snapshot.nodes.len());
        let indices: Vec<usize> = snapshot
            .nodes
            .into_iter()
            .map(|id| graph.add_node(id))
            .collect();
        for idx in snapshot.referenced {
            if let Some(&idx) = indices.get(idx) {
                graph.table.undeclare(idx);
            }
        }
        for (from, to, weight) in snapshot.edges {
            match (indices.get(from), indices.get(to)) {
                (Some(&f), Some(&t)) => graph.add_edge(f, t, weight),
                _ => {
                    return Err(GraphError::EdgeOutOfRange {
                        from,
                        to,
                        nodes: indices.len(),
                    })
                }
            }
        }
        Ok(graph)
    }
}

impl WeightedGraph<String> {
    /// Build from a JSON object such as `{"A": {"B": 1, "C": 4}, "B": {}}`.
    pub fn from_adjacency_json(json: &str) -> Result<Self> {
        let object: serde_json::Map<String, serde_json::Value> = serde_json::from_str(json)?;
        let mut adjacency = Vec::with_capacity(object.len());
        for (node, neighbors) in object {
            let neighbors: serde_json::Map<String, serde_json::Value> =
                serde_json::from_value(neighbors)?;
            let mut weighted = Vec::with_capacity(neighbors.len());
            for (neighbor, weight) in neighbors {
                weighted.push((neighbor, serde_json::from_value::<f64>(weight)?));
            }
            adjacency.push((node, weighted));
        }
        Ok(WeightedGraph::from_adjacency(adjacency))
    }
}

impl<N: NodeId> Default for WeightedGraph<N> {
    fn default() -> Self {
        Self::new()
    }
}

//! JavaScript bindings over string-keyed graphs.

use crate::algorithms::{bfs, dfs, shortest_path};
use crate::error::GraphError;
use crate::graph::{Graph, WeightedGraph};
use serde::Serialize;
use wasm_bindgen::prelude::*;

fn js_error(err: GraphError) -> JsError {
    JsError::new(&err.to_string())
}

fn to_array(ids: &[String]) -> js_sys::Array {
    ids.iter().map(|id| JsValue::from_str(id)).collect()
}

/// Unweighted directed graph with string node IDs.
#[wasm_bindgen]
pub struct DiGraph {
    inner: Graph<String>,
}

#[wasm_bindgen]
impl DiGraph {
    /// Create an empty graph.
    #[wasm_bindgen(constructor)]
    pub fn new() -> DiGraph {
        DiGraph {
            inner: Graph::new(),
        }
    }

    /// Add a node, returns its index. Idempotent.
    #[wasm_bindgen(js_name = addNode)]
    pub fn add_node(&mut self, id: &str) -> usize {
        self.inner.add_node(id.to_string())
    }

    /// Add a directed edge from -> to by index. Idempotent.
    #[wasm_bindgen(js_name = addEdge)]
    pub fn add_edge(&mut self, from: usize, to: usize) {
        self.inner.add_edge(from, to);
    }

    /// Add a directed edge by node ID, creating nodes as needed.
    pub fn connect(&mut self, from: &str, to: &str) {
        self.inner.connect(from.to_string(), to.to_string());
    }

    #[wasm_bindgen(js_name = nodeCount)]
    pub fn node_count(&self) -> usize {
        self.inner.node_count()
    }

    #[wasm_bindgen(js_name = edgeCount)]
    pub fn edge_count(&self) -> usize {
        self.inner.edge_count()
    }

    #[wasm_bindgen(js_name = nodeId)]
    pub fn node_id(&self, idx: usize) -> Option<String> {
        self.inner.node_id(idx).cloned()
    }

    /// Export graph as JSON snapshot.
    #[wasm_bindgen(js_name = toJson)]
    pub fn to_json(&self) -> Result<String, JsError> {
        self.inner.to_json().map_err(js_error)
    }

    /// Import graph from JSON snapshot.
    #[wasm_bindgen(js_name = fromJson)]
    pub fn from_json(json: &str) -> Result<DiGraph, JsError> {
        let inner = Graph::from_json(json).map_err(js_error)?;
        Ok(DiGraph { inner })
    }

    /// Build from an adjacency object, e.g. `{"A": ["B", "C"], "B": [], "C": []}`.
    #[wasm_bindgen(js_name = fromAdjacency)]
    pub fn from_adjacency(json: &str) -> Result<DiGraph, JsError> {
        let inner = Graph::from_adjacency_json(json).map_err(js_error)?;
        Ok(DiGraph { inner })
    }

    /// Depth-first pre-order from `start` as an array of node IDs.
    #[wasm_bindgen(js_name = depthFirst)]
    pub fn depth_first(&self, start: &str) -> js_sys::Array {
        to_array(&dfs::depth_first(&self.inner, &start.to_string()))
    }

    /// Breadth-first order from `start` as an array of node IDs.
    #[wasm_bindgen(js_name = breadthFirst)]
    pub fn breadth_first(&self, start: &str) -> js_sys::Array {
        to_array(&bfs::breadth_first(&self.inner, &start.to_string()))
    }

    /// Breadth-first order as `[id, depth]` pairs.
    #[wasm_bindgen(js_name = bfsLevels)]
    pub fn bfs_levels(&self, start: &str) -> JsValue {
        let levels = bfs::bfs_levels(&self.inner, &start.to_string());
        serde_wasm_bindgen::to_value(&levels).unwrap_or(JsValue::NULL)
    }
}

impl Default for DiGraph {
    fn default() -> Self {
        Self::new()
    }
}

/// Directed graph with string node IDs and numeric edge weights.
#[wasm_bindgen]
pub struct WeightedDiGraph {
    inner: WeightedGraph<String>,
}

#[wasm_bindgen]
impl WeightedDiGraph {
    #[wasm_bindgen(constructor)]
    pub fn new() -> WeightedDiGraph {
        WeightedDiGraph {
            inner: WeightedGraph::new(),
        }
    }

    #[wasm_bindgen(js_name = addNode)]
    pub fn add_node(&mut self, id: &str) -> usize {
        self.inner.add_node(id.to_string())
    }

    /// Add or re-weight the edge from -> to by index.
    #[wasm_bindgen(js_name = addEdge)]
    pub fn add_edge(&mut self, from: usize, to: usize, weight: f64) {
        self.inner.add_edge(from, to, weight);
    }

    pub fn connect(&mut self, from: &str, to: &str, weight: f64) {
        self.inner.connect(from.to_string(), to.to_string(), weight);
    }

    #[wasm_bindgen(js_name = nodeCount)]
    pub fn node_count(&self) -> usize {
        self.inner.node_count()
    }

    #[wasm_bindgen(js_name = edgeCount)]
    pub fn edge_count(&self) -> usize {
        self.inner.edge_count()
    }

    #[wasm_bindgen(js_name = toJson)]
    pub fn to_json(&self) -> Result<String, JsError> {
        self.inner.to_json().map_err(js_error)
    }

    #[wasm_bindgen(js_name = fromJson)]
    pub fn from_json(json: &str) -> Result<WeightedDiGraph, JsError> {
        let inner = WeightedGraph::from_json(json).map_err(js_error)?;
        Ok(WeightedDiGraph { inner })
    }

    /// Build from an adjacency object, e.g. `{"A": {"B": 1, "C": 4}, "B": {}}`.
    #[wasm_bindgen(js_name = fromAdjacency)]
    pub fn from_adjacency(json: &str) -> Result<WeightedDiGraph, JsError> {
        let inner = WeightedGraph::from_adjacency_json(json).map_err(js_error)?;
        Ok(WeightedDiGraph { inner })
    }

    /// Shortest distances from `start` as a plain object.
    /// Unreachable nodes map to `null`; negative weights throw.
    #[wasm_bindgen(js_name = shortestPaths)]
    pub fn shortest_paths(&self, start: &str) -> Result<JsValue, JsError> {
        let table =
            shortest_path::shortest_paths(&self.inner, &start.to_string()).map_err(js_error)?;
        table
            .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
            .map_err(|e| JsError::new(&e.to_string()))
    }

    /// One minimum-weight path from `start` to `target`, or `null`.
    #[wasm_bindgen(js_name = shortestPath)]
    pub fn shortest_path(&self, start: &str, target: &str) -> Result<JsValue, JsError> {
        let table =
            shortest_path::shortest_paths(&self.inner, &start.to_string()).map_err(js_error)?;
        Ok(table
            .path_to(&target.to_string())
            .map_or(JsValue::NULL, |path| to_array(&path).into()))
    }
}

impl Default for WeightedDiGraph {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Methods returning JS values need a wasm runtime; see tests/web.rs.

    #[test]
    fn test_digraph_from_adjacency() {
        let Ok(g) = DiGraph::from_adjacency(r#"{"A": ["B", "C"], "B": ["D"], "C": [], "D": []}"#)
        else {
            panic!("adjacency should parse");
        };
        assert_eq!(g.node_count(), 4);
        assert_eq!(g.edge_count(), 3);
        assert_eq!(g.node_id(0), Some("A".to_string()));
    }

    #[test]
    fn test_digraph_connect() {
        let mut g = DiGraph::new();
        g.connect("a", "b");
        g.connect("a", "b");
        let c = g.add_node("c");
        g.add_edge(0, c);
        assert_eq!(g.node_count(), 3);
        assert_eq!(g.edge_count(), 2);
    }

    #[test]
    fn test_digraph_json_roundtrip() {
        let mut g = DiGraph::new();
        g.connect("a", "b");
        let Ok(json) = g.to_json() else {
            panic!("snapshot should serialize");
        };
        let Ok(g2) = DiGraph::from_json(&json) else {
            panic!("snapshot should load");
        };
        assert_eq!(g2.node_count(), 2);
        assert_eq!(g2.edge_count(), 1);
    }

    #[test]
    fn test_weighted_digraph_from_adjacency() {
        let Ok(g) = WeightedDiGraph::from_adjacency(r#"{"A": {"B": 1, "C": 4}, "B": {"C": 2}}"#)
        else {
            panic!("adjacency should parse");
        };
        assert_eq!(g.node_count(), 3);
        assert_eq!(g.edge_count(), 3);
    }
}

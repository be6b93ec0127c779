//! Graph traversal and shortest paths for Rust and WebAssembly.
//!
//! - [`depth_first`] - pre-order DFS with an explicit stack
//! - [`breadth_first`] / [`bfs_levels`] - level-order BFS
//! - [`shortest_paths`] - Dijkstra over non-negative weights
//!
//! Graphs are built with [`Graph`] and [`WeightedGraph`] for any hashable
//! node type; [`DiGraph`] and [`WeightedDiGraph`] expose the same operations
//! to JavaScript with string node IDs.

pub mod algorithms;
pub mod bindings;
pub mod error;
pub mod graph;

pub use algorithms::bfs::{bfs_levels, breadth_first};
pub use algorithms::dfs::depth_first;
pub use algorithms::shortest_path::{shortest_paths, Distance, DistanceEntry, DistanceTable};
pub use bindings::{DiGraph, WeightedDiGraph};
pub use error::{GraphError, Result};
pub use graph::{Graph, NodeId, WeightedGraph};

use wasm_bindgen::prelude::*;

/// Route Rust panics to the browser console. Safe to call more than once.
#[wasm_bindgen(js_name = initPanicHook)]
pub fn init_panic_hook() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

//! Graph traversal algorithms.
//!
//! Each call owns its visited set and frontier; nothing is shared between
//! calls, so concurrent traversals of the same graph are independent.

pub mod bfs;
pub mod dfs;
pub mod shortest_path;

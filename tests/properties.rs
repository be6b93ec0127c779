use algo_graph_wasm::{
    bfs_levels, breadth_first, depth_first, shortest_paths, Distance, Graph, GraphError,
    WeightedGraph,
};
use proptest::prelude::*;
use std::collections::HashSet;

const MAX_NODES: u32 = 12;

fn build_graph(n: u32, edges: &[(u32, u32)]) -> Graph<u32> {
    let mut graph = Graph::new();
    for v in 0..n {
        graph.add_node(v);
    }
    for &(from, to) in edges {
        graph.connect(from % n, to % n);
    }
    graph
}

fn build_weighted(n: u32, edges: &[(u32, u32, u8)]) -> WeightedGraph<u32> {
    let mut graph = WeightedGraph::new();
    for v in 0..n {
        graph.add_node(v);
    }
    for &(from, to, weight) in edges {
        graph.connect(from % n, to % n, f64::from(weight));
    }
    graph
}

fn reachable(graph: &Graph<u32>, start: u32) -> HashSet<u32> {
    let mut seen = HashSet::from([start]);
    let mut pending = vec![start];
    while let Some(v) = pending.pop() {
        for &w in graph.neighbors(&v) {
            if seen.insert(w) {
                pending.push(w);
            }
        }
    }
    seen
}

/// Bellman-Ford relaxation, used as the reference for both hop counts
/// (unit weights) and weighted distances.
fn bellman_ford(n: u32, start: u32, edges: &[(u32, u32, f64)]) -> Vec<Option<f64>> {
    let mut dist = vec![None; n as usize];
    dist[start as usize] = Some(0.0);
    for _ in 0..n {
        for &(from, to, weight) in edges {
            if let Some(d) = dist[from as usize] {
                let candidate = d + weight;
                if dist[to as usize].is_none_or(|cur| candidate < cur) {
                    dist[to as usize] = Some(candidate);
                }
            }
        }
    }
    dist
}

fn unit_edges(graph: &Graph<u32>) -> Vec<(u32, u32, f64)> {
    graph
        .nodes()
        .flat_map(|&v| graph.neighbors(&v).map(move |&w| (v, w, 1.0)))
        .collect()
}

fn weighted_edges(graph: &WeightedGraph<u32>) -> Vec<(u32, u32, f64)> {
    graph
        .nodes()
        .flat_map(|&v| graph.neighbors(&v).map(move |(&w, weight)| (v, w, weight)))
        .collect()
}

/// Textbook recursive DFS, small inputs only.
fn recursive_dfs(graph: &Graph<u32>, node: u32, visited: &mut HashSet<u32>, out: &mut Vec<u32>) {
    if !visited.insert(node) {
        return;
    }
    out.push(node);
    for &next in graph.neighbors(&node) {
        recursive_dfs(graph, next, visited, out);
    }
}

fn edge_list() -> impl Strategy<Value = Vec<(u32, u32)>> {
    proptest::collection::vec((0..MAX_NODES, 0..MAX_NODES), 0..40)
}

fn weighted_edge_list() -> impl Strategy<Value = Vec<(u32, u32, u8)>> {
    proptest::collection::vec((0..MAX_NODES, 0..MAX_NODES, 0u8..20), 0..40)
}

proptest! {
    #[test]
    fn dfs_visits_exactly_the_reachable_set(n in 1..=MAX_NODES, edges in edge_list(), start in 0..MAX_NODES) {
        let graph = build_graph(n, &edges);
        let start = start % n;
        let order = depth_first(&graph, &start);

        let unique: HashSet<u32> = order.iter().copied().collect();
        prop_assert_eq!(unique.len(), order.len(), "duplicate in {:?}", order);
        prop_assert_eq!(unique, reachable(&graph, start));
        prop_assert_eq!(order[0], start);
    }

    #[test]
    fn dfs_matches_recursive_order(n in 1..=MAX_NODES, edges in edge_list(), start in 0..MAX_NODES) {
        let graph = build_graph(n, &edges);
        let start = start % n;

        let mut expected = Vec::new();
        recursive_dfs(&graph, start, &mut HashSet::new(), &mut expected);
        prop_assert_eq!(depth_first(&graph, &start), expected);
    }

    #[test]
    fn bfs_distances_never_decrease(n in 1..=MAX_NODES, edges in edge_list(), start in 0..MAX_NODES) {
        let graph = build_graph(n, &edges);
        let start = start % n;
        let hops = bellman_ford(n, start, &unit_edges(&graph));

        let order = breadth_first(&graph, &start);
        let unique: HashSet<u32> = order.iter().copied().collect();
        prop_assert_eq!(unique.len(), order.len());
        prop_assert_eq!(unique, reachable(&graph, start));

        let dists: Vec<f64> = order
            .iter()
            .map(|&v| hops[v as usize].unwrap_or(f64::INFINITY))
            .collect();
        for pair in dists.windows(2) {
            prop_assert!(pair[0] <= pair[1], "order {:?} has hops {:?}", order, dists);
        }

        for (node, depth) in bfs_levels(&graph, &start) {
            prop_assert_eq!(Some(depth as f64), hops[node as usize]);
        }
    }

    #[test]
    fn dijkstra_matches_bellman_ford(n in 1..=MAX_NODES, edges in weighted_edge_list(), start in 0..MAX_NODES) {
        let graph = build_weighted(n, &edges);
        let start = start % n;
        let expected = bellman_ford(n, start, &weighted_edges(&graph));

        let table = shortest_paths(&graph, &start).unwrap();
        prop_assert_eq!(table.len(), n as usize);
        for v in 0..n {
            let got = table.get(&v);
            match expected[v as usize] {
                Some(d) => prop_assert_eq!(got, Some(Distance::Finite(d))),
                None => prop_assert_eq!(got, Some(Distance::Unreachable)),
            }
        }
    }

    #[test]
    fn dijkstra_paths_have_reported_weight(n in 1..=MAX_NODES, edges in weighted_edge_list(), start in 0..MAX_NODES) {
        let graph = build_weighted(n, &edges);
        let start = start % n;
        let table = shortest_paths(&graph, &start).unwrap();

        for (node, distance) in table.reachable() {
            let path = table.path_to(node).unwrap();
            prop_assert_eq!(path[0], start);
            let total: f64 = path
                .windows(2)
                .map(|hop| graph.weight(&hop[0], &hop[1]).unwrap())
                .sum();
            prop_assert_eq!(total, distance);
        }
    }

    #[test]
    fn negative_weight_is_rejected(n in 2..=MAX_NODES, edges in weighted_edge_list(), bad in (0..MAX_NODES, 0..MAX_NODES, 1u8..50)) {
        let mut graph = build_weighted(n, &edges);
        let (from, to, magnitude) = bad;
        graph.connect(from % n, to % n, -f64::from(magnitude));

        let result = shortest_paths(&graph, &0);
        let rejected = matches!(result, Err(GraphError::NegativeWeight { .. }));
        prop_assert!(rejected, "expected rejection, got {:?}", result);
    }

    #[test]
    fn traversals_are_idempotent(n in 1..=MAX_NODES, edges in weighted_edge_list(), start in 0..MAX_NODES) {
        let start = start % n;
        let plain: Vec<(u32, u32)> = edges.iter().map(|&(a, b, _)| (a, b)).collect();
        let graph = build_graph(n, &plain);
        let weighted = build_weighted(n, &edges);

        prop_assert_eq!(depth_first(&graph, &start), depth_first(&graph, &start));
        prop_assert_eq!(breadth_first(&graph, &start), breadth_first(&graph, &start));

        let first = shortest_paths(&weighted, &start).unwrap();
        let second = shortest_paths(&weighted, &start).unwrap();
        prop_assert_eq!(first.entries(), second.entries());
    }
}

#[test]
fn scenario_tables() {
    let graph = Graph::from_adjacency([
        ("A", vec!["B", "C"]),
        ("B", vec!["D"]),
        ("C", vec!["E"]),
        ("D", vec![]),
        ("E", vec![]),
    ]);
    assert_eq!(depth_first(&graph, &"A"), vec!["A", "B", "D", "C", "E"]);
    assert_eq!(breadth_first(&graph, &"A"), vec!["A", "B", "C", "D", "E"]);

    let cycle = Graph::from_adjacency([("A", vec!["B"]), ("B", vec!["A"])]);
    assert_eq!(depth_first(&cycle, &"A"), vec!["A", "B"]);
    assert_eq!(breadth_first(&cycle, &"A"), vec!["A", "B"]);

    let weighted = WeightedGraph::from_adjacency([
        ("A", vec![("B", 1.0), ("C", 4.0)]),
        ("B", vec![("C", 2.0), ("D", 6.0)]),
        ("C", vec![("D", 3.0)]),
        ("D", vec![]),
    ]);
    let table = shortest_paths(&weighted, &"A").unwrap();
    let distances: Vec<(&str, Option<f64>)> = table.iter().map(|(n, d)| (*n, d.value())).collect();
    assert_eq!(
        distances,
        vec![("A", Some(0.0)), ("B", Some(1.0)), ("C", Some(3.0)), ("D", Some(6.0))]
    );

    let partial = WeightedGraph::from_adjacency([
        ("A", vec![("B", 1.0)]),
        ("B", vec![]),
        ("C", vec![]),
    ]);
    let table = shortest_paths(&partial, &"A").unwrap();
    assert_eq!(table.get(&"C"), Some(Distance::Unreachable));
}

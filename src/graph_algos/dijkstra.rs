use crate::collections::{FxIndexMap, PriorityQueue};
use crate::errors::PathPlannerError;
use crate::graph::StoreGraph;
use super::{GraphNodeMap, trace_path};

use std::{hash::Hash, fmt::Debug};
use indexmap::map::Entry::{Occupied, Vacant};




/// Identify the shortest path using Dijkstra's Algorithm
/// https://en.wikipedia.org/wiki/Dijkstra%27s_algorithm
/// From start Node, traverse through graph until node meets goal criteria
/// Returns the path from start to goal along with its cost, None if no node meets the goal
pub fn dijkstra<N, IT, NN, G>(start: N, neighbors: NN, goal: G) -> Option<(Vec<N>, f64)>
where
    N: Eq + Hash + Clone + Debug,
    NN: Fn(&N) -> IT, // returns iterator of neighbors + costs
    IT: IntoIterator<Item = (N, f64)>, // Iterator of neighbors + edge cost to neighbor node
    G: Fn(&N) -> bool, // node qualifier for goal
    {

    // Build the graph - terminates when the goal is met
    let (node_map, goal_index) = build_dijkstra_graph(start, neighbors, goal);

    let goal_index = goal_index?;
    let cost = node_map.get_index(goal_index)?.1.1;
    let path = trace_path(&node_map, goal_index)?;
    Some((path, cost))
}


/// Returns a full map of the graph, includes all (reachable) nodes and costs
pub fn dijkstra_nodes_full<N, IT, NN>(start: N, neighbors: NN) -> GraphNodeMap<N>
where
    N: Eq + Hash + Clone + Debug,
    NN: Fn(&N) -> IT,
    IT: IntoIterator<Item = (N, f64)>,
    {

    let (node_map, _) = build_dijkstra_graph(start, neighbors, |_| false);
    node_map
}


/// Traverses the graph using Dijkstra's algorithm
/// Returns a map of nodes with their smallest costs along with the index of the goal node
/// Costs must be non-negative
fn build_dijkstra_graph<N, IT, NN, G>(start: N, neighbors: NN, goal_fn: G) -> (GraphNodeMap<N>, Option<usize>)
where
    N: Eq + Hash + Clone + Debug,
    NN: Fn(&N) -> IT,
    IT: IntoIterator<Item = (N, f64)>,
    G: Fn(&N) -> bool // Returns true if goal is met
    {

    // Nodes to visit, least costly first, ties in insertion order
    // A node is pushed again whenever a cheaper path to it is found
    let mut nodes_to_visit: PriorityQueue<usize> = PriorityQueue::new();

    // The tuple contains (parent_index, cost) where parent_index is the index of the parent node in the map
    // for the start node, parent_index is set to usize::MAX to indicate it has no parent
    let mut nodes_map: GraphNodeMap<N> = FxIndexMap::default();

    let start_index = nodes_map.insert_full(start, (usize::MAX, 0.0)).0;
    nodes_to_visit.insert(start_index, 0.0);

    while let Some((index, cost)) = nodes_to_visit.extract_min() {

        // fetch current best cost for node
        let Some((node, &(_, c))) = nodes_map.get_index(index) else {
            continue;
        };

        // Stale entry - a cheaper path to this node was already expanded
        if cost > c {
            continue;
        }

        if goal_fn(node) {
            return (nodes_map, Some(index));
        }

        let node = node.clone();
        for (neighbor, edge_cost) in neighbors(&node) {

            let new_cost = c + edge_cost;

            let neighbor_index = match nodes_map.entry(neighbor) {
                Vacant(e) => {
                    let i = e.index();
                    e.insert((index, new_cost));
                    i
                }
                Occupied(mut e) => {
                    // only strictly shorter paths replace the known one
                    if new_cost < e.get().1 {
                        e.insert((index, new_cost));
                        e.index()
                    } else {
                        continue;
                    }
                }
            };

            nodes_to_visit.insert(neighbor_index, new_cost);
        }
    }

    (nodes_map, None)
}


fn check_vertex(graph: &StoreGraph, vertex: &str) -> Result<(), PathPlannerError> {
    if graph.contains(vertex) {
        Ok(())
    } else {
        Err(PathPlannerError::UnknownVertex(vertex.to_string()))
    }
}

fn search<'a>(graph: &'a StoreGraph, start: &'a str, end: &str) -> Result<(Vec<&'a str>, f64), PathPlannerError> {
    check_vertex(graph, start)?;
    check_vertex(graph, end)?;

    dijkstra(start, |node: &&'a str| graph.neighbors(node), |node| *node == end)
        .ok_or_else(|| PathPlannerError::Unreachable {
            from: start.to_string(),
            to: end.to_string(),
        })
}


/// Length of the shortest walk between two vertices of the store graph
/// The search stops as soon as `end` is the cheapest unexpanded node
pub fn shortest_distance(graph: &StoreGraph, start: &str, end: &str) -> Result<f64, PathPlannerError> {
    search(graph, start, end).map(|(_, cost)| cost)
}


/// Vertices of the shortest walk between two vertices, `start` first and `end` last
pub fn shortest_path(graph: &StoreGraph, start: &str, end: &str) -> Result<Vec<String>, PathPlannerError> {
    search(graph, start, end).map(|(path, _)| path.into_iter().map(str::to_string).collect())
}


/// Shortest distance from `start` to every vertex it can reach
pub fn distances_from<'a>(graph: &'a StoreGraph, start: &'a str) -> Result<FxIndexMap<String, f64>, PathPlannerError> {
    check_vertex(graph, start)?;

    let node_map = dijkstra_nodes_full(start, |node: &&'a str| graph.neighbors(node));
    Ok(node_map
        .into_iter()
        .map(|(node, (_, cost))| (node.to_string(), cost))
        .collect())
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{Point, Segment};
    use crate::graph::{EdgeRecord, VertexPolicy};
    use crate::graph::tests::{edge, grocery_graph};
    use rand::{Rng, SeedableRng, rngs::StdRng};
    use std::collections::HashMap;

    // Helper function to create a directed test graph
    fn create_test_graph() -> HashMap<String, Vec<(String, f64)>> {
        let mut graph = HashMap::new();

        // Diamond-shaped graph: A -> B -> D and A -> C -> D
        graph.insert("A".to_string(), vec![
            ("B".to_string(), 1.0),
            ("C".to_string(), 3.0),
        ]);
        graph.insert("B".to_string(), vec![("D".to_string(), 5.0)]);
        graph.insert("C".to_string(), vec![("D".to_string(), 1.0)]);
        graph.insert("D".to_string(), vec![]);

        graph
    }

    // Helper function to create a neighbor function from a graph
    fn create_neighbor_fn(graph: &HashMap<String, Vec<(String, f64)>>) -> impl Fn(&String) -> Vec<(String, f64)> + '_ {
        move |node: &String| {
            graph.get(node).cloned().unwrap_or_default()
        }
    }

    /// Connected random geometric graph: a spanning chain plus random shortcuts
    fn random_store_graph(rng: &mut StdRng, size: usize) -> StoreGraph {
        let names: Vec<String> = (0..size).map(|i| format!("V{i}")).collect();
        let points: Vec<Point> = (0..size)
            .map(|_| Point::new(rng.random_range(0.0..100.0), rng.random_range(0.0..100.0)))
            .collect();

        let mut edges = Vec::new();
        for i in 1..size {
            let j = rng.random_range(0..i);
            edges.push(EdgeRecord::new(
                names[i].clone(),
                names[j].clone(),
                Segment::new(points[i], points[j]),
            ));
        }
        for _ in 0..size {
            let (i, j) = (rng.random_range(0..size), rng.random_range(0..size));
            if i != j {
                edges.push(EdgeRecord::new(
                    names[i].clone(),
                    names[j].clone(),
                    Segment::new(points[i], points[j]),
                ));
            }
        }

        StoreGraph::build(names, edges, VertexPolicy::Reject).unwrap()
    }

    #[test]
    fn test_build_dijkstra_graph_simple() {
        let graph = create_test_graph();
        let neighbors = create_neighbor_fn(&graph);

        let (result, goal) = build_dijkstra_graph("A".to_string(), neighbors, |node| node == "D");
        assert!(goal.is_some());

        let costs: HashMap<_, _> = result.iter().map(|(node, (_, cost))| (node.clone(), *cost)).collect();
        assert_eq!(costs["A"], 0.0);
        assert_eq!(costs["B"], 1.0);
        assert_eq!(costs["C"], 3.0);
        assert_eq!(costs["D"], 4.0); // A->C->D
    }

    #[test]
    fn test_dijkstra_finds_optimal_path() {
        let graph = create_test_graph();
        let (path, cost) = dijkstra("A".to_string(), create_neighbor_fn(&graph), |node| node == "D").unwrap();
        assert_eq!(path, vec!["A", "C", "D"]);
        assert_eq!(cost, 4.0);
    }

    #[test]
    fn test_dijkstra_handles_unreachable_goal() {
        let mut graph = HashMap::new();
        graph.insert("A".to_string(), vec![("B".to_string(), 1.0)]);
        graph.insert("B".to_string(), vec![("C".to_string(), 1.0)]);
        graph.insert("C".to_string(), vec![]);
        graph.insert("D".to_string(), vec![]);

        let result = dijkstra("A".to_string(), create_neighbor_fn(&graph), |node| node == "D");
        assert!(result.is_none());
    }

    #[test]
    fn test_search_stops_at_goal() {
        // C and its descendants cost more than the goal and are never expanded
        let mut graph = HashMap::new();
        graph.insert("A".to_string(), vec![("B".to_string(), 1.0), ("C".to_string(), 10.0)]);
        graph.insert("B".to_string(), vec![("D".to_string(), 1.0)]);
        graph.insert("C".to_string(), vec![("E".to_string(), 5.0)]);
        graph.insert("D".to_string(), vec![]);
        graph.insert("E".to_string(), vec![]);

        let (node_map, _) = build_dijkstra_graph("A".to_string(), create_neighbor_fn(&graph), |node| node == "D");
        assert!(node_map.contains_key("C"));
        assert!(!node_map.contains_key("E"));
    }

    #[test]
    fn test_store_graph_distance_and_path() {
        let graph = grocery_graph();

        assert_eq!(shortest_distance(&graph, "Entrance", "Dairy").unwrap(), 5.0);
        assert_eq!(shortest_distance(&graph, "Dairy", "Entrance").unwrap(), 5.0);
        assert_eq!(shortest_distance(&graph, "Entrance", "Checkout").unwrap(), 9.0);
        assert_eq!(shortest_distance(&graph, "Produce", "Produce").unwrap(), 0.0);

        assert_eq!(shortest_path(&graph, "Dairy", "Entrance").unwrap(), vec!["Dairy", "Produce", "Entrance"]);
        assert_eq!(shortest_path(&graph, "Checkout", "Entrance").unwrap(), vec!["Checkout", "Dairy", "Produce", "Entrance"]);
        assert_eq!(shortest_path(&graph, "Dairy", "Dairy").unwrap(), vec!["Dairy"]);
    }

    #[test]
    fn test_store_graph_disconnected() {
        let graph = StoreGraph::build(
            ["Entrance", "Produce", "Checkout"],
            [edge("Entrance", "Produce", 3.0)],
            VertexPolicy::Reject,
        ).unwrap();

        assert_eq!(
            shortest_distance(&graph, "Entrance", "Checkout"),
            Err(PathPlannerError::Unreachable { from: "Entrance".into(), to: "Checkout".into() })
        );
        assert!(matches!(
            shortest_path(&graph, "Checkout", "Entrance"),
            Err(PathPlannerError::Unreachable { .. })
        ));
    }

    #[test]
    fn test_store_graph_unknown_vertex() {
        let graph = grocery_graph();
        assert_eq!(
            shortest_distance(&graph, "Entrance", "Bakery"),
            Err(PathPlannerError::UnknownVertex("Bakery".into()))
        );
        assert_eq!(
            shortest_path(&graph, "Bakery", "Entrance"),
            Err(PathPlannerError::UnknownVertex("Bakery".into()))
        );
    }

    #[test]
    fn test_distances_from() {
        let graph = grocery_graph();
        let distances = distances_from(&graph, "Entrance").unwrap();
        assert_eq!(distances.len(), 4);
        assert_eq!(distances["Entrance"], 0.0);
        assert_eq!(distances["Produce"], 3.0);
        assert_eq!(distances["Dairy"], 5.0);
        assert_eq!(distances["Checkout"], 9.0);
    }

    #[test]
    fn test_random_graphs_distance_is_symmetric_and_matches_path() {
        let mut rng = StdRng::seed_from_u64(7);

        for _ in 0..20 {
            let size = rng.random_range(2..25);
            let graph = random_store_graph(&mut rng, size);
            let vertices: Vec<String> = graph.vertices().map(str::to_string).collect();

            for _ in 0..10 {
                let a = &vertices[rng.random_range(0..size)];
                let b = &vertices[rng.random_range(0..size)];

                let forward = shortest_distance(&graph, a, b).unwrap();
                let backward = shortest_distance(&graph, b, a).unwrap();
                assert!((forward - backward).abs() < 1e-9, "{a} <-> {b}: {forward} != {backward}");

                let path = shortest_path(&graph, a, b).unwrap();
                assert_eq!(path.first(), Some(a));
                assert_eq!(path.last(), Some(b));
                let walked = graph.walk_cost(&path).unwrap();
                assert!((walked - forward).abs() < 1e-9, "path {path:?} costs {walked}, expected {forward}");
            }
        }
    }
}

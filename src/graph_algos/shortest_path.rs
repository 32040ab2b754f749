use super::GraphNodeMap;

/// Construct the shortest path from the goal node to the start node
/// Returns the ordered path as a vector of nodes from start to goal
/// node_map: GraphNodeMap<N> - map of nodes with their parent index and cost
/// goal_index: usize - index of the goal node in the node_map
pub(crate) fn trace_path<N>(node_map: &GraphNodeMap<N>, goal_index: usize) -> Option<Vec<N>>
where
    N: Clone,
{

    let mut path = Vec::new();
    let mut current_index = goal_index;

    // Trace back from goal to start, the start node has no parent
    while current_index != usize::MAX {
        let (node, &(parent_index, _)) = node_map.get_index(current_index)?;
        path.push(node.clone());
        current_index = parent_index;

        // a parent chain longer than the map means a cycle
        if path.len() > node_map.len() {
            return None;
        }
    }

    path.reverse();

    if path.is_empty() {
        return None;
    }

    Some(path)
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_reconstruction() {
        let mut node_map: GraphNodeMap<String> = GraphNodeMap::default();

        let a_index = node_map.insert_full("A".to_string(), (usize::MAX, 0.0)).0;
        let b_index = node_map.insert_full("B".to_string(), (a_index, 1.0)).0;
        let c_index = node_map.insert_full("C".to_string(), (a_index, 3.0)).0;
        let d_index = node_map.insert_full("D".to_string(), (c_index, 4.0)).0;

        assert_eq!(trace_path(&node_map, d_index).unwrap(), vec!["A", "C", "D"]);
        assert_eq!(trace_path(&node_map, b_index).unwrap(), vec!["A", "B"]);
        assert_eq!(trace_path(&node_map, a_index).unwrap(), vec!["A"]);
    }

    #[test]
    fn test_broken_parent_chain() {
        let mut node_map: GraphNodeMap<&str> = GraphNodeMap::default();
        node_map.insert("A", (7, 1.0));
        assert_eq!(trace_path(&node_map, 0), None);

        let mut cyclic: GraphNodeMap<&str> = GraphNodeMap::default();
        cyclic.insert("A", (1, 1.0));
        cyclic.insert("B", (0, 1.0));
        assert_eq!(trace_path(&cyclic, 0), None);
    }
}

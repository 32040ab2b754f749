pub mod dijkstra;
pub mod nearest_neighbor;
pub mod exhaustive;
mod shortest_path;

use shortest_path::trace_path;

use crate::collections::{FxIndexMap, FxIndexSet};
use crate::errors::PlanError;
use crate::graph::StoreGraph;

/// Type alias for the node map used in path planning algorithms
/// N: Node - space on a graph
/// The tuple contains (parent_index, cost) where:
/// - parent_index is the index of the parent node in the map
/// - cost is the total cost to reach this node from the start
pub type GraphNodeMap<N> = FxIndexMap<N, (usize, f64)>;


/// Collect the required stops into an ordered set
/// Duplicates collapse onto their first appearance, the start node is dropped
/// since every route already begins there
/// Fails on a start or stop that is not a vertex of the graph
pub(crate) fn required_stops<'a, I, S>(graph: &StoreGraph, start: &str, stops: I) -> Result<FxIndexSet<String>, PlanError>
where
    I: IntoIterator<Item = &'a S>,
    S: AsRef<str> + ?Sized + 'a,
{
    if !graph.contains(start) {
        return Err(PlanError::UnknownStart(start.to_string()));
    }

    let mut remaining = FxIndexSet::default();
    for stop in stops {
        let stop = stop.as_ref();
        if !graph.contains(stop) {
            return Err(PlanError::UnknownStop(stop.to_string()));
        }
        if stop != start {
            remaining.insert(stop.to_string());
        }
    }
    Ok(remaining)
}

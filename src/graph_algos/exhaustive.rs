use std::collections::VecDeque;
use tracing::debug;

use crate::collections::FxIndexSet;
use crate::errors::PlanError;
use crate::graph::StoreGraph;
use super::required_stops;


/// Cheapest simple walk found by the exhaustive search
#[derive(Clone, Debug, PartialEq)]
pub struct Walk {
    /// Vertices from the start, every consecutive pair is a direct edge
    pub vertices: Vec<String>,
    pub cost: f64,
    /// Number of frontier states expanded to find it
    pub expansions: usize,
}


/// Search state - one partial walk on the frontier
struct State<'a> {
    node: &'a str,
    path: Vec<&'a str>,
    cost: f64,
    remaining: FxIndexSet<&'a str>,
}


/// Breadth-first search over every simple walk starting at `start`
///
/// A walk only follows direct edges and never enters a vertex twice. Among the
/// walks that reach every required stop the cheapest one is returned, ties go to
/// the one found first. Unlike the nearest neighbor tour the result is the true
/// minimum over simple walks, but the search is exponential in the graph size
/// and fails when no single simple walk covers every stop (for example stops on
/// two separate dead ends), even if each stop is reachable.
///
/// `max_expansions` bounds the number of frontier states taken off the queue.
pub fn exhaustive_walk<'a, I, S>(
    graph: &StoreGraph,
    start: &str,
    stops: I,
    max_expansions: Option<usize>,
) -> Result<Walk, PlanError>
where
    I: IntoIterator<Item = &'a S>,
    S: AsRef<str> + ?Sized + 'a,
{
    let required = required_stops(graph, start, stops)?;

    let mut frontier: VecDeque<State> = VecDeque::new();
    frontier.push_back(State {
        node: start,
        path: vec![start],
        cost: 0.0,
        remaining: required.iter().map(String::as_str).collect(),
    });

    let mut best: Option<(Vec<&str>, f64)> = None;
    let mut expansions = 0;

    while let Some(state) = frontier.pop_front() {
        if let Some(limit) = max_expansions {
            if expansions >= limit {
                return Err(PlanError::SearchLimit(limit));
            }
        }
        expansions += 1;

        // extending a walk never makes it cheaper
        if best.as_ref().is_some_and(|(_, best_cost)| state.cost >= *best_cost) {
            continue;
        }

        if state.remaining.is_empty() {
            let covers_all = required.iter().all(|stop| state.path.contains(&stop.as_str()));
            if covers_all {
                debug!(cost = state.cost, length = state.path.len(), "better complete walk");
                best = Some((state.path, state.cost));
            }
            continue;
        }

        for (neighbor, edge_cost) in graph.neighbors(state.node) {
            if state.path.contains(&neighbor) {
                continue;
            }

            let mut path = state.path.clone();
            path.push(neighbor);
            let mut remaining = state.remaining.clone();
            remaining.shift_remove(neighbor);

            frontier.push_back(State {
                node: neighbor,
                path,
                cost: state.cost + edge_cost,
                remaining,
            });
        }
    }

    match best {
        Some((path, cost)) => Ok(Walk {
            vertices: path.into_iter().map(str::to_string).collect(),
            cost,
            expansions,
        }),
        None => Err(PlanError::NoCompleteWalk),
    }
}

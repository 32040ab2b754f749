use tracing::debug;

use crate::errors::PlanError;
use crate::graph::StoreGraph;
use super::dijkstra::{shortest_distance, shortest_path};
use super::required_stops;


/// Closed tour produced by the nearest neighbor heuristic
#[derive(Clone, Debug, PartialEq)]
pub struct Tour {
    /// Start followed by every required stop, in visiting order
    pub visits: Vec<String>,
    /// Shortest walk from the last visit back to the start, last visit excluded
    pub return_leg: Vec<String>,
    /// Cost of the visits using shortest paths between them
    pub outbound_cost: f64,
    pub return_cost: f64,
}

impl Tour {

    /// Visits followed by the return leg
    pub fn sequence(&self) -> Vec<String> {
        self.visits.iter().chain(&self.return_leg).cloned().collect()
    }

    pub fn cost(&self) -> f64 {
        self.outbound_cost + self.return_cost
    }
}


/// Greedy nearest neighbor tour
/// https://en.wikipedia.org/wiki/Nearest_neighbour_algorithm
///
/// Starting at `start`, repeatedly moves to the required stop with the shortest
/// walking distance from the current position. Distances use shortest paths, so
/// the walk between two consecutive visits may pass through other vertices.
/// Ties go to the stop listed first. Once every stop is visited the shortest path
/// back to `start` closes the tour.
///
/// The result is a fast approximation with no optimality guarantee.
pub fn nearest_neighbor_tour<'a, I, S>(graph: &StoreGraph, start: &str, stops: I) -> Result<Tour, PlanError>
where
    I: IntoIterator<Item = &'a S>,
    S: AsRef<str> + ?Sized + 'a,
{
    let mut remaining = required_stops(graph, start, stops)?;

    let mut visits = vec![start.to_string()];
    let mut outbound_cost = 0.0;
    let mut current = start.to_string();

    while !remaining.is_empty() {
        let mut closest: Option<(usize, f64)> = None;

        for (index, stop) in remaining.iter().enumerate() {
            let distance = shortest_distance(graph, &current, stop).map_err(|source| PlanError::Sequencing {
                from: current.clone(),
                source,
            })?;

            // strict comparison keeps the first stop among equals
            if closest.is_none_or(|(_, best)| distance < best) {
                closest = Some((index, distance));
            }
        }

        let Some((index, distance)) = closest else {
            break;
        };
        let Some(next) = remaining.shift_remove_index(index) else {
            break;
        };

        debug!(from = %current, to = %next, distance, "next closest stop");
        outbound_cost += distance;
        visits.push(next.clone());
        current = next;
    }

    let back = shortest_path(graph, &current, start).map_err(|source| PlanError::ReturnLeg {
        from: current.clone(),
        source,
    })?;
    let return_cost = graph.walk_cost(&back).unwrap_or_default();

    Ok(Tour {
        visits,
        // first element of the path back is the current position
        return_leg: back.into_iter().skip(1).collect(),
        outbound_cost,
        return_cost,
    })
}

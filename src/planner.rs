//! Route planning entry point.
//!
//! Builds the store graph from a [`LayoutSource`] and orders the required stops
//! with the configured [`Strategy`].

use serde::Serialize;
use tracing::{info, instrument};

use crate::collections::FxIndexSet;
use crate::config::{PlannerConfig, Report, Strategy};
use crate::errors::{GraphError, PlanError};
use crate::graph::{EdgeRecord, StoreGraph};
use crate::graph_algos::dijkstra::shortest_path;
use crate::graph_algos::exhaustive::exhaustive_walk;
use crate::graph_algos::nearest_neighbor::nearest_neighbor_tour;
use crate::layout::{LayoutSource, StoreLayout};


/// Planned walk through the store
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Route {
    pub strategy: Strategy,
    /// Start followed by the visits chosen by the strategy
    pub visits: Vec<String>,
    /// Walk back to the start, empty when no return was requested
    pub return_leg: Vec<String>,
    /// Required stops in the order the route reaches them
    pub stops: Vec<String>,
    /// Walking distance of the visits and the return leg
    pub cost: f64,
}

impl Route {

    /// Every vertex of the route in walking order
    pub fn sequence(&self) -> Vec<String> {
        self.visits.iter().chain(&self.return_leg).cloned().collect()
    }

    pub fn report(&self, report: Report) -> Vec<String> {
        match report {
            Report::RequiredOnly => self.stops.clone(),
            Report::FullWalk => self.sequence(),
        }
    }
}


/// Plans routes over the layout provided by `L`
/// The graph is rebuilt from the layout for every plan
pub struct RoutePlanner<L> {
    layout: L,
    config: PlannerConfig,
}

impl<L: LayoutSource> RoutePlanner<L> {

    pub fn new(layout: L, config: PlannerConfig) -> Self {
        Self { layout, config }
    }

    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    pub fn layout(&self) -> &L {
        &self.layout
    }

    /// Fetch the layout and build the store graph from it
    pub fn build_graph(&self) -> Result<StoreGraph, PlanError> {
        let vertices = self.layout.fetch_vertices()?;
        let edges = self.layout.fetch_edges()?;

        let records = edges
            .iter()
            .map(|(id, geometry)| geometry.to_record(id))
            .collect::<Result<Vec<EdgeRecord>, GraphError>>()?;

        Ok(StoreGraph::build(vertices, records, self.config.vertex_policy)?)
    }

    /// Plan a route visiting every required stop
    #[instrument(skip_all, fields(stops = stops.len(), strategy = ?self.config.strategy))]
    pub fn plan_route<S: AsRef<str>>(&self, stops: &[S]) -> Result<Route, PlanError> {
        let graph = self.build_graph()?;
        plan_on_graph(&graph, stops, &self.config)
    }
}

impl RoutePlanner<StoreLayout> {

    /// Plan a route through the departments stocking a shopping list
    pub fn plan_for_products<S: AsRef<str>>(&self, products: &[S]) -> Result<Route, PlanError> {
        let departments = self.layout.catalog().departments_for_products(products)?;
        self.plan_route(&departments)
    }
}


/// Shortest walk from the last visit back to `start`, last visit excluded
fn walk_back(graph: &StoreGraph, visits: &[String], start: &str) -> Result<(Vec<String>, f64), PlanError> {
    let last = visits.last().map(String::as_str).unwrap_or(start);
    let back = shortest_path(graph, last, start).map_err(|source| PlanError::ReturnLeg {
        from: last.to_string(),
        source,
    })?;
    let cost = graph.walk_cost(&back).unwrap_or_default();
    Ok((back.into_iter().skip(1).collect(), cost))
}


/// Plan a route on an already built graph
pub fn plan_on_graph<S: AsRef<str>>(graph: &StoreGraph, stops: &[S], config: &PlannerConfig) -> Result<Route, PlanError> {
    let start = config.start.as_str();

    // the tour already carries its way back, a walk still needs one
    let (visits, outbound_cost, tour_return) = match config.strategy {
        Strategy::NearestNeighbor => {
            let tour = nearest_neighbor_tour(graph, start, stops)?;
            (tour.visits, tour.outbound_cost, Some((tour.return_leg, tour.return_cost)))
        }
        Strategy::Exhaustive => {
            let walk = exhaustive_walk(graph, start, stops, config.max_expansions)?;
            info!(expansions = walk.expansions, "exhaustive search finished");
            (walk.vertices, walk.cost, None)
        }
    };

    let (return_leg, return_cost) = match tour_return {
        _ if !config.return_to_start => (Vec::new(), 0.0),
        Some(leg) => leg,
        None => walk_back(graph, &visits, start)?,
    };
    let cost = outbound_cost + return_cost;

    let required: FxIndexSet<&str> = stops.iter().map(|stop| stop.as_ref()).collect();
    let mut reached: FxIndexSet<String> = FxIndexSet::default();
    for vertex in visits.iter().chain(&return_leg) {
        if required.contains(vertex.as_str()) {
            reached.insert(vertex.clone());
        }
    }

    info!(stops = reached.len(), vertices = visits.len() + return_leg.len(), cost, "route planned");

    Ok(Route {
        strategy: config.strategy,
        visits,
        return_leg,
        stops: reached.into_iter().collect(),
        cost,
    })
}

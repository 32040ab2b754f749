use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::collections::FxIndexMap;
use crate::errors::GraphError;
use crate::geometry::Segment;


/// Separator between the two endpoint names of an edge identifier
pub const EDGE_ID_SEPARATOR: char = '&';


/// What to do with an edge endpoint missing from the vertex set
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VertexPolicy {
    /// The endpoint becomes a new vertex
    #[default]
    AutoCreate,
    /// The edge is rejected with `GraphError::UnknownVertex`
    Reject,
}


/// One walkway between two departments
#[derive(Clone, Debug, PartialEq)]
pub struct EdgeRecord {
    pub from: String,
    pub to: String,
    pub segment: Segment,
}

impl EdgeRecord {

    pub fn new(from: impl Into<String>, to: impl Into<String>, segment: Segment) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            segment,
        }
    }

    /// Build a record from an `"A&B"` identifier and its point-pair text
    pub fn parse(id: &str, geometry: &str) -> Result<Self, GraphError> {
        let (from, to) = split_edge_id(id)?;
        let segment = geometry.parse::<Segment>().map_err(|source| GraphError::Geometry {
            edge: id.to_string(),
            source,
        })?;
        Ok(Self::new(from, to, segment))
    }

    /// Identifier in `"A&B"` form
    pub fn id(&self) -> String {
        format!("{}{}{}", self.from, EDGE_ID_SEPARATOR, self.to)
    }

    pub fn cost(&self) -> f64 {
        self.segment.length()
    }
}


/// Split `"A&B"` into its two endpoint names
pub fn split_edge_id(id: &str) -> Result<(&str, &str), GraphError> {
    match id.split_once(EDGE_ID_SEPARATOR) {
        Some((from, to)) => {
            let (from, to) = (from.trim(), to.trim());
            if from.is_empty() || to.is_empty() || to.contains(EDGE_ID_SEPARATOR) {
                return Err(GraphError::MalformedEdgeId(id.to_string()));
            }
            Ok((from, to))
        }
        None => Err(GraphError::MalformedEdgeId(id.to_string())),
    }
}


/// Undirected weighted graph of the store
/// Every vertex is a key, isolated vertices map to an empty neighbor map
/// Costs are symmetric: `A -> B` and `B -> A` always carry the same value
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StoreGraph {
    adjacency: FxIndexMap<String, FxIndexMap<String, f64>>,
}

impl StoreGraph {

    pub fn new() -> Self {
        Self::default()
    }

    /// Build the graph from a vertex set and the walkways between them
    /// Later records for the same pair of vertices overwrite earlier ones
    pub fn build<V, E>(vertices: V, edges: E, policy: VertexPolicy) -> Result<Self, GraphError>
    where
        V: IntoIterator,
        V::Item: Into<String>,
        E: IntoIterator<Item = EdgeRecord>,
    {
        let mut graph = StoreGraph::new();
        for vertex in vertices {
            graph.add_vertex(vertex);
        }
        if graph.vertex_count() == 0 {
            return Err(GraphError::EmptyInput);
        }

        for edge in edges {
            for endpoint in [&edge.from, &edge.to] {
                if graph.contains(endpoint) {
                    continue;
                }
                match policy {
                    VertexPolicy::AutoCreate => {
                        warn!(edge = %edge.id(), vertex = %endpoint, "edge endpoint missing from vertex set, adding it");
                        graph.add_vertex(endpoint.as_str());
                    }
                    VertexPolicy::Reject => {
                        return Err(GraphError::UnknownVertex {
                            edge: edge.id(),
                            vertex: endpoint.clone(),
                        });
                    }
                }
            }

            let cost = edge.cost();
            if let Some(previous) = graph.add_edge(&edge.from, &edge.to, cost) {
                warn!(edge = %edge.id(), previous, cost, "duplicate edge, keeping the last cost");
            }
        }

        debug!(vertices = graph.vertex_count(), edges = graph.edge_count(), "store graph built");
        Ok(graph)
    }

    /// Add a vertex without neighbors, existing vertices are left untouched
    pub fn add_vertex(&mut self, name: impl Into<String>) {
        self.adjacency.entry(name.into()).or_default();
    }

    /// Insert an undirected edge, creating both endpoints when needed
    /// Returns the cost previously stored for the pair
    pub fn add_edge(&mut self, a: &str, b: &str, cost: f64) -> Option<f64> {
        let previous = self.adjacency
            .entry(a.to_string())
            .or_default()
            .insert(b.to_string(), cost);
        self.adjacency
            .entry(b.to_string())
            .or_default()
            .insert(a.to_string(), cost);
        previous
    }

    pub fn contains(&self, vertex: &str) -> bool {
        self.adjacency.contains_key(vertex)
    }

    /// Neighbors of a vertex with the cost of reaching them
    /// Unknown vertices have no neighbors
    pub fn neighbors<'a>(&'a self, vertex: &str) -> impl Iterator<Item = (&'a str, f64)> + use<'a> {
        self.adjacency
            .get(vertex)
            .into_iter()
            .flat_map(|neighbors| neighbors.iter().map(|(name, cost)| (name.as_str(), *cost)))
    }

    pub fn edge_cost(&self, a: &str, b: &str) -> Option<f64> {
        self.adjacency.get(a).and_then(|neighbors| neighbors.get(b)).copied()
    }

    pub fn vertices(&self) -> impl Iterator<Item = &str> {
        self.adjacency.keys().map(String::as_str)
    }

    pub fn vertex_count(&self) -> usize {
        self.adjacency.len()
    }

    /// Number of undirected edges
    pub fn edge_count(&self) -> usize {
        let mut directed = 0;
        let mut loops = 0;
        for (vertex, neighbors) in &self.adjacency {
            directed += neighbors.len();
            if neighbors.contains_key(vertex) {
                loops += 1;
            }
        }
        (directed - loops) / 2 + loops
    }

    /// Total cost of walking the given sequence of vertices
    /// None if two consecutive vertices are not directly connected
    pub fn walk_cost<S: AsRef<str>>(&self, walk: &[S]) -> Option<f64> {
        walk.windows(2)
            .map(|pair| self.edge_cost(pair[0].as_ref(), pair[1].as_ref()))
            .sum()
    }
}

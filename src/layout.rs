//! Store layout data access.
//!
//! The planner only sees the [`LayoutSource`] trait. [`StoreLayout`] is the
//! JSON document implementation used by the command line tool and the tests.

use std::{fs, path::Path};
use serde::{Deserialize, Serialize};

use crate::catalog::Catalog;
use crate::collections::FxIndexMap;
use crate::errors::{GeometryError, GraphError, LayoutError};
use crate::geometry::{Point, Segment};
use crate::graph::{EdgeRecord, split_edge_id};


/// Provider of the vertex and edge sets a graph is built from
pub trait LayoutSource {
    fn fetch_vertices(&self) -> Result<Vec<String>, LayoutError>;

    /// Edge geometries keyed by `"A&B"` identifiers
    fn fetch_edges(&self) -> Result<FxIndexMap<String, EdgeGeometry>, LayoutError>;
}

impl<T: LayoutSource + ?Sized> LayoutSource for &T {
    fn fetch_vertices(&self) -> Result<Vec<String>, LayoutError> {
        (**self).fetch_vertices()
    }

    fn fetch_edges(&self) -> Result<FxIndexMap<String, EdgeGeometry>, LayoutError> {
        (**self).fetch_edges()
    }
}


/// Stored geometry of an edge
/// Either the `{(x1, y1), (x2, y2)}` text form or a pair of `[x, y]` arrays
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EdgeGeometry {
    Points([[f64; 2]; 2]),
    Text(String),
}

impl EdgeGeometry {

    pub fn segment(&self) -> Result<Segment, GeometryError> {
        match self {
            EdgeGeometry::Points([start, end]) => {
                if start.iter().chain(end).all(|v| v.is_finite()) {
                    Ok(Segment::new(Point::from(*start), Point::from(*end)))
                } else {
                    Err(GeometryError::malformed(&format!("{start:?}, {end:?}"), "coordinates must be finite"))
                }
            }
            EdgeGeometry::Text(text) => text.parse(),
        }
    }

    /// Edge record for the `"A&B"` identifier this geometry is stored under
    pub fn to_record(&self, id: &str) -> Result<EdgeRecord, GraphError> {
        let (from, to) = split_edge_id(id)?;
        let segment = self.segment().map_err(|source| GraphError::Geometry {
            edge: id.to_string(),
            source,
        })?;
        Ok(EdgeRecord::new(from, to, segment))
    }
}

impl From<Segment> for EdgeGeometry {
    fn from(segment: Segment) -> Self {
        EdgeGeometry::Points([
            [segment.start.x, segment.start.y],
            [segment.end.x, segment.end.y],
        ])
    }
}


/// Complete store layout document
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct StoreLayout {
    pub vertices: Vec<String>,
    pub edges: FxIndexMap<String, EdgeGeometry>,
    #[serde(default)]
    pub departments: Catalog,
}

impl StoreLayout {

    pub fn from_json_str(json: &str) -> Result<Self, LayoutError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, LayoutError> {
        let json = fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    pub fn catalog(&self) -> &Catalog {
        &self.departments
    }
}

impl LayoutSource for StoreLayout {
    fn fetch_vertices(&self) -> Result<Vec<String>, LayoutError> {
        Ok(self.vertices.clone())
    }

    fn fetch_edges(&self) -> Result<FxIndexMap<String, EdgeGeometry>, LayoutError> {
        Ok(self.edges.clone())
    }
}

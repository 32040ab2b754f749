//! Shopping route planning over a store layout.
//!
//! A store is a weighted undirected graph of departments. Edge weights are the
//! Euclidean length of the aisle segment joining two departments. Given the
//! departments that must be visited, [`RoutePlanner`] orders them into a walk
//! from the entrance and back.

pub mod catalog;
pub mod collections;
pub mod config;
pub mod errors;
pub mod geometry;
pub mod graph;
pub mod graph_algos;
pub mod layout;
pub mod planner;

pub use catalog::Catalog;
pub use config::{PlannerConfig, Report, Strategy};
pub use errors::{ConfigError, GeometryError, GraphError, LayoutError, PathPlannerError, PlanError};
pub use graph::{StoreGraph, VertexPolicy};
pub use layout::{EdgeGeometry, LayoutSource, StoreLayout};
pub use planner::{Route, RoutePlanner, plan_on_graph};

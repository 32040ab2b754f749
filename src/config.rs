use std::{fs, path::Path};
use serde::{Deserialize, Serialize};

use crate::errors::ConfigError;
use crate::graph::VertexPolicy;


/// Name of the vertex every route starts and ends at
pub const DEFAULT_START: &str = "Entrance";


/// How the required stops are put in order
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    /// Greedy tour over shortest paths, always succeeds on a connected graph,
    /// no optimality guarantee
    #[default]
    NearestNeighbor,
    /// Cheapest simple walk over direct edges, exponential and may find nothing
    Exhaustive,
}


/// Which vertices of the planned walk are reported back
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Report {
    /// Only the required stops, in the order the walk reaches them
    #[default]
    RequiredOnly,
    /// Every vertex of the walk including pass-through vertices
    FullWalk,
}


/// Route planner settings
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PlannerConfig {
    pub start: String,
    pub strategy: Strategy,
    pub vertex_policy: VertexPolicy,
    pub return_to_start: bool,
    pub report: Report,
    /// Only used by the exhaustive strategy
    pub max_expansions: Option<usize>,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            start: DEFAULT_START.to_string(),
            strategy: Strategy::default(),
            vertex_policy: VertexPolicy::default(),
            return_to_start: true,
            report: Report::default(),
            max_expansions: None,
        }
    }
}

impl PlannerConfig {

    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: PlannerConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.start.trim().is_empty() {
            return Err(ConfigError::EmptyStart);
        }
        Ok(())
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = PlannerConfig::default();
        assert_eq!(config.start, "Entrance");
        assert_eq!(config.strategy, Strategy::NearestNeighbor);
        assert_eq!(config.vertex_policy, VertexPolicy::AutoCreate);
        assert!(config.return_to_start);
        assert_eq!(config.report, Report::RequiredOnly);
        assert_eq!(config.max_expansions, None);
    }

    #[test]
    fn test_partial_document() {
        let config = PlannerConfig::from_json_str(
            r#"{ "strategy": "exhaustive", "max_expansions": 5000, "report": "full_walk" }"#,
        ).unwrap();
        assert_eq!(config.start, "Entrance");
        assert_eq!(config.strategy, Strategy::Exhaustive);
        assert_eq!(config.max_expansions, Some(5000));
        assert_eq!(config.report, Report::FullWalk);

        let empty = PlannerConfig::from_json_str("{}").unwrap();
        assert_eq!(empty, PlannerConfig::default());
    }

    #[test]
    fn test_invalid_documents() {
        assert!(matches!(
            PlannerConfig::from_json_str(r#"{ "strategy": "random" }"#),
            Err(ConfigError::Decode(_))
        ));
        assert!(matches!(
            PlannerConfig::from_json_str(r#"{ "unknown_field": 1 }"#),
            Err(ConfigError::Decode(_))
        ));
        assert!(matches!(
            PlannerConfig::from_json_str(r#"{ "start": "  " }"#),
            Err(ConfigError::EmptyStart)
        ));
    }
}

use thiserror::Error;


/// Failure to decode a point-pair geometry
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeometryError {
    #[error("malformed geometry `{text}`: {reason}")]
    Malformed { text: String, reason: String },
}

impl GeometryError {
    pub(crate) fn malformed(text: &str, reason: impl Into<String>) -> Self {
        GeometryError::Malformed {
            text: text.to_string(),
            reason: reason.into(),
        }
    }
}


/// Pathfinding stage failures
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PathPlannerError {
    #[error("vertex `{0}` is not part of the graph")]
    UnknownVertex(String),
    #[error("no path from `{from}` to `{to}`")]
    Unreachable { from: String, to: String },
}


/// Graph building stage failures
#[derive(Debug, Error)]
pub enum GraphError {
    #[error("no vertices supplied")]
    EmptyInput,
    #[error("edge identifier `{0}` does not name two vertices")]
    MalformedEdgeId(String),
    #[error("edge `{edge}` has unusable geometry")]
    Geometry {
        edge: String,
        #[source]
        source: GeometryError,
    },
    #[error("edge `{edge}` references unknown vertex `{vertex}`")]
    UnknownVertex { edge: String, vertex: String },
}


/// Data-access boundary failures
#[derive(Debug, Error)]
pub enum LayoutError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("layout document is not valid: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("product `{0}` is not stocked in any department")]
    UnknownProduct(String),
    #[error("department `{0}` does not exist")]
    UnknownDepartment(String),
}


/// Planner configuration failures
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("planner configuration is not valid: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("start vertex name must not be empty")]
    EmptyStart,
}


/// Top-level planning failure, tagged with the stage that failed
#[derive(Debug, Error)]
pub enum PlanError {
    #[error("failed to load store layout")]
    Layout(#[from] LayoutError),
    #[error("failed to build store graph")]
    Graph(#[from] GraphError),
    #[error("start `{0}` is not a vertex of the store graph")]
    UnknownStart(String),
    #[error("required stop `{0}` is not a vertex of the store graph")]
    UnknownStop(String),
    #[error("sequencing failed after reaching `{from}`")]
    Sequencing {
        from: String,
        #[source]
        source: PathPlannerError,
    },
    #[error("no way back to the start from `{from}`")]
    ReturnLeg {
        from: String,
        #[source]
        source: PathPlannerError,
    },
    #[error("no simple walk from the start covers every required stop")]
    NoCompleteWalk,
    #[error("exhaustive search exceeded {0} expansions")]
    SearchLimit(usize),
}

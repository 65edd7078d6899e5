use crate::{
    graph::{Edge, Node, NumEdges, NumNodes},
    problem::{ProblemKind, RuleFamily},
};
use std::error::Error;
use thiserror::Error;

/// Trait for checking invariants in datastructures
pub trait InvariantCheck<E: Error> {
    fn is_correct(&self) -> std::result::Result<(), E>;
}

/// Violations of the simple-undirected-graph invariants
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GraphError {
    #[error("self-loop at node {0}")]
    SelfLoop(Node),

    #[error("edge ({0}, {1}) has an endpoint outside of 0..{2}")]
    NodeOutOfRange(Node, Node, NumNodes),

    #[error("edge ({0}, {1}) is not stored at both endpoints")]
    Asymmetric(Node, Node),

    #[error("edge ({0}, {1}) is incident to a removed node")]
    DanglingEdge(Node, Node),

    #[error("node counter reports {stored} nodes, but {counted} are present")]
    NodeCount { stored: NumNodes, counted: NumNodes },

    #[error("edge counter reports {stored} edges, but adjacency holds {counted}")]
    EdgeCount { stored: NumEdges, counted: NumEdges },
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigurationError {
    #[error("malformed graph: {0}")]
    Graph(#[from] GraphError),

    #[error("{rules} rules cannot reduce a {problem} problem")]
    RuleFamilyMismatch {
        problem: ProblemKind,
        rules: RuleFamily,
    },

    #[error("invalid value for {name}: {reason}")]
    InvalidParameter { name: &'static str, reason: String },
}

/// Failures of a correlation oracle. The reduction engine never retries.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum OracleError {
    #[error("correlation backend failed: {0}")]
    Backend(String),

    #[error("exact enumeration supports at most {limit} nodes, graph has {nodes}")]
    TooLarge { nodes: NumNodes, limit: NumNodes },

    #[error("no correlation score known for {0}")]
    MissingScore(Edge),

    #[error("malformed correlation entries: {0}")]
    Malformed(String),

    #[error("invalid oracle configuration: {0}")]
    Configuration(String),
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum QiroError {
    #[error("invalid problem configuration: {0}")]
    InvalidProblemConfiguration(#[from] ConfigurationError),

    #[error(transparent)]
    Oracle(#[from] OracleError),

    #[error("no applicable simplification rule among {entries} ranked correlation entries")]
    NoApplicableRule { entries: usize },

    #[error("reduction round {round} did not remove any node")]
    Stalled { round: usize },
}

impl From<GraphError> for QiroError {
    fn from(value: GraphError) -> Self {
        QiroError::InvalidProblemConfiguration(value.into())
    }
}

pub type Result<T> = std::result::Result<T, QiroError>;

use crate::graph::NodeId;
use crate::port::{PortSide, PortType};
use thiserror::Error;

/// Reasons a candidate connection is refused by the graph.
///
/// Rejection is a normal negative answer, not a failure: `Graph::can_connect`
/// folds every variant into `false`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConnectionError {
    #[error("Connections must run from an output port to an input port (got {from} -> {to})")]
    WrongDirection { from: PortSide, to: PortSide },

    #[error("Node {0} does not exist in this workflow")]
    UnknownNode(NodeId),

    #[error("Node {node} has no {side} port at index {index}")]
    PortOutOfRange {
        node: NodeId,
        side: PortSide,
        index: usize,
    },

    #[error("A node cannot be connected to itself")]
    SelfLoop,

    #[error("This connection already exists")]
    Duplicate,

    #[error("A '{from}' output cannot feed a '{to}' input")]
    IncompatibleTypes { from: PortType, to: PortType },
}

/// Batch-level failures that stop a run before any node executes.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExecutionError {
    #[error("Circular dependency detected! Cannot execute workflow with loops.")]
    CycleDetected,
}

/// Errors returned by a `Calculator` implementation.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CalculationError {
    #[error("{0}")]
    Failed(String),

    #[error("Invalid input '{field}': {message}")]
    InvalidInput { field: String, message: String },

    #[error("Calculation service unavailable: {0}")]
    Unavailable(String),
}

impl CalculationError {
    pub fn failed(message: impl Into<String>) -> Self {
        CalculationError::Failed(message.into())
    }
}

/// A failure isolated to a single node during a run.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum NodeError {
    #[error("Missing required inputs: {}", .0.join(", "))]
    MissingInputs(Vec<String>),

    #[error("Calculator {0} not available")]
    CalculatorUnavailable(String),

    #[error(transparent)]
    Calculation(#[from] CalculationError),
}

/// Errors raised while reading or writing workflow documents and libraries.
#[derive(Error, Debug)]
pub enum PersistenceError {
    #[error("Failed to parse workflow JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Could not access '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Example '{0}' not found")]
    ExampleNotFound(String),
}

/// Errors raised while loading calculator catalogs or editor configuration.
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Failed to parse catalog JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Could not read '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Module '{0}' not found")]
    ModuleNotFound(String),

    #[error("Calculator '{calc_key}' not found in module '{module_key}'")]
    CalculatorNotFound {
        module_key: String,
        calc_key: String,
    },
}

/// Errors raised by report renderers.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReportError {
    #[error("Report service rejected the request: {0}")]
    Rejected(String),

    #[error("Report service unavailable: {0}")]
    Unavailable(String),

    #[error("Report service returned no document")]
    EmptyResponse,
}

/// Errors raised while loading editor configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to parse editor configuration: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Could not read '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

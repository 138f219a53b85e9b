//! Prelude module for convenient imports
//!
//! Re-exports the types needed to build, edit, run and persist a workflow.
//!
//! # Example
//!
//! ```rust,no_run
//! use calcflow::prelude::*;
//!
//! # fn run_example() -> Result<()> {
//! let catalog = CalculatorCatalog::builtin();
//! let doc = WorkflowDocument::from_file("path/to/workflow.json")?;
//! let graph = Graph::from_document(&doc, &catalog);
//!
//! match graph.execution_order() {
//!     Some(order) => println!("{} nodes ready to run", order.len()),
//!     None => println!("Workflow contains a cycle"),
//! }
//! # Ok(())
//! # }
//! ```

// Graph model
pub use crate::graph::{Connection, Graph, Node, NodeId, PortRef, Position};
pub use crate::port::{CalculatorDefinition, FieldDefinition, OutputDefinition, PortSide, PortType};
pub use crate::value::{Inputs, Outputs, Value};

// Catalog, calculators and execution
pub use crate::calculator::{Calculator, CalculatorRegistry};
pub use crate::catalog::CalculatorCatalog;
pub use crate::executor::{ExecutionReport, Executor, NodeOutcome, RunStatus};

// Persistence, libraries and reports
pub use crate::document::{IntoWorkflow, WorkflowDocument};
pub use crate::library::WorkflowLibrary;
pub use crate::report::{ReportRenderer, WorkflowReport};

// Editing
pub use crate::editor::{EditorConfig, Notice, NoticeLevel, WorkflowEditor};

// Error types
pub use crate::error::{
    CalculationError, CatalogError, ConnectionError, ExecutionError, NodeError, PersistenceError,
};

// Result type alias for convenience
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;

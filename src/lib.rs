//! # calcflow - Visual Workflow Engine for Engineering Calculators
//!
//! **calcflow** chains engineering calculators into a directed graph: the
//! output of one calculator (a load calculation's current, say) feeds the input
//! of the next (a cable sizing). It checks port types as connections are drawn,
//! refuses cyclic graphs, orders nodes topologically and runs them one after
//! another against pluggable calculators.
//!
//! ## Core Workflow
//!
//! 1.  **Describe your calculators**: A `CalculatorCatalog` holds each calculator's
//!     fields and outputs. `CalculatorCatalog::builtin()` ships the default set;
//!     catalogs can also be loaded from JSON.
//! 2.  **Build a graph**: Add `Node`s and connect output ports to input ports with
//!     `Graph::create_connection`, or load a saved `WorkflowDocument`. Implement
//!     `IntoWorkflow` to import graphs from your own format.
//! 3.  **Provide implementations**: Register a `Calculator` per calculator key in a
//!     `CalculatorRegistry`. Calculators are async and usually call a remote
//!     service.
//! 4.  **Execute**: `Executor::execute` runs every node in dependency order,
//!     feeding upstream outputs into downstream inputs. A failing node is marked
//!     and the run continues.
//!
//! For interactive use, `WorkflowEditor` wraps all of this with undo/redo,
//! selection, a viewport and user notices.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use calcflow::prelude::*;
//!
//! fn main() -> Result<()> {
//!     let catalog = CalculatorCatalog::builtin();
//!     let registry = CalculatorRegistry::new()
//!         .with_fn("loadCalculation", |inputs| {
//!             let power = inputs.get("power").and_then(Value::as_f64).unwrap_or(0.0);
//!             let voltage = inputs.get("voltage").and_then(Value::as_f64).unwrap_or(1.0);
//!             let mut out = Outputs::new();
//!             out.insert("current".to_string(), Value::from(power / voltage));
//!             Ok(out)
//!         })
//!         .with_fn("cableSizing", |inputs| {
//!             let mut out = Outputs::new();
//!             out.insert("cableSize".to_string(), Value::from("16mm²"));
//!             out.insert("voltageDrop".to_string(), inputs.get("current").cloned().unwrap_or_default());
//!             Ok(out)
//!         });
//!
//!     let mut editor = WorkflowEditor::builder(catalog).registry(registry).build();
//!     let load = editor.add_calculator_node("electrical", "loadCalculation", 100.0, 200.0)?;
//!     let cable = editor.add_calculator_node("electrical", "cableSizing", 400.0, 200.0)?;
//!     editor.set_input(load, "power", 10_000.0);
//!     editor.set_input(load, "voltage", 400.0);
//!     editor.set_input(cable, "length", 50.0);
//!     editor.set_input(cable, "voltageSystem", 400.0);
//!     editor.connect(PortRef::output(load, 0), PortRef::input(cable, 0))?;
//!
//!     // The executor is runtime-agnostic; any async runtime can drive it.
//!     let report = tokio_test::block_on(editor.execute())?;
//!     println!("{}", report.summary());
//!     Ok(())
//! }
//! ```

pub mod calculator;
pub mod catalog;
pub mod document;
pub mod editor;
pub mod error;
pub mod executor;
pub mod graph;
pub mod history;
pub mod library;
pub mod port;
pub mod prelude;
pub mod report;
pub mod schedule;
pub mod value;

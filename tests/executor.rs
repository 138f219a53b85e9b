//! Executor tests
//!
//! Runs graphs against stub calculators and checks ordering, data flow and
//! per-node error isolation.
//!
mod common;
use async_trait::async_trait;
use calcflow::executor::assemble_inputs;
use calcflow::prelude::*;
use common::*;
use std::sync::{Arc, Mutex};
use tokio_test::block_on;
use tokio_util::sync::CancellationToken;

/// Records the order in which nodes are calculated.
struct Recording {
    log: Arc<Mutex<Vec<f64>>>,
}

#[async_trait]
impl Calculator for Recording {
    async fn calculate(&self, inputs: &Inputs) -> std::result::Result<Outputs, CalculationError> {
        let x = inputs.get("x").and_then(Value::as_f64).unwrap_or_default();
        self.log.lock().unwrap().push(x);
        let mut out = Outputs::new();
        out.insert("y".to_string(), Value::from(x + 1.0));
        Ok(out)
    }
}

#[cfg(test)]
mod executor_tests {
    use super::*;

    #[test]
    fn test_empty_graph_has_nothing_to_execute() {
        let executor = Executor::new(test_registry());
        let mut graph = Graph::new();
        let report = block_on(executor.execute(&mut graph)).unwrap();
        assert_eq!(report.status, RunStatus::NothingToExecute);
        assert_eq!(report.summary(), "No nodes to execute");
    }

    #[test]
    fn test_cycle_processes_no_nodes() {
        let catalog = test_catalog();
        let mut graph = num_chain(&catalog, 3);
        graph.connect(NodeId(3), 0, NodeId(1), 0).unwrap();
        graph.node_mut(NodeId(1)).unwrap().set_input("x", 1.0);
        let before = graph.clone();

        let result = block_on(Executor::new(test_registry()).execute(&mut graph));
        assert_eq!(result.unwrap_err(), ExecutionError::CycleDetected);
        assert_eq!(graph, before);
    }

    #[test]
    fn test_values_flow_downstream_in_order() {
        let catalog = test_catalog();
        let mut graph = num_chain(&catalog, 3);
        graph.node_mut(NodeId(1)).unwrap().set_input("x", 1.0);
        // Local value on a connected input is overridden by the upstream output.
        graph.node_mut(NodeId(2)).unwrap().set_input("x", 100.0);

        let log = Arc::new(Mutex::new(Vec::new()));
        let mut registry = CalculatorRegistry::new();
        registry.register("num", Arc::new(Recording { log: Arc::clone(&log) }));

        let report = block_on(Executor::new(registry).execute(&mut graph)).unwrap();
        assert!(report.is_success());
        assert_eq!(report.order, vec![NodeId(1), NodeId(2), NodeId(3)]);
        assert_eq!(*log.lock().unwrap(), vec![1.0, 2.0, 3.0]);
        assert_eq!(graph.node(NodeId(3)).unwrap().output_values["y"], Value::from(4.0));
        assert_eq!(report.summary(), "Workflow completed! Processed 3 calculators.");
    }

    #[test]
    fn test_connected_input_takes_upstream_value() {
        let catalog = CalculatorCatalog::builtin();
        let mut graph = Graph::new();
        let load = add_builtin_node(&mut graph, &catalog, 1, "electrical", "loadCalculation");
        let cable = add_builtin_node(&mut graph, &catalog, 2, "electrical", "cableSizing");
        {
            let node = graph.node_mut(load).unwrap();
            node.set_input("power", 40.0);
            node.set_input("voltage", 400.0);
        }
        {
            let node = graph.node_mut(cable).unwrap();
            node.set_input("current", 1.0);
            node.set_input("length", 50.0);
            node.set_input("voltageSystem", 400.0);
        }
        graph.connect(load, 0, cable, 0).unwrap();

        let report = block_on(Executor::new(electrical_registry()).execute(&mut graph)).unwrap();
        assert!(report.is_success());

        let computed = graph.node(load).unwrap().output_values["current"].clone();
        assert_eq!(computed, Value::from(100.0));
        assert_eq!(report.run(cable).unwrap().inputs["current"], computed);
        // The node's own stored value is left alone.
        assert_eq!(graph.node(cable).unwrap().input_values["current"], Value::from(1.0));
    }

    #[test]
    fn test_missing_input_is_isolated_to_its_node() {
        let catalog = CalculatorCatalog::builtin();
        let mut graph = Graph::new();
        let load = add_builtin_node(&mut graph, &catalog, 1, "electrical", "loadCalculation");
        let cable = add_builtin_node(&mut graph, &catalog, 2, "electrical", "cableSizing");
        let transformer = add_builtin_node(&mut graph, &catalog, 3, "electrical", "transformerSizing");
        {
            let node = graph.node_mut(load).unwrap();
            node.set_input("power", 40.0);
            node.set_input("voltage", 400.0);
        }
        // Cable length left unset.
        graph.node_mut(cable).unwrap().set_input("voltageSystem", 400.0);
        graph.connect(load, 0, cable, 0).unwrap();
        graph.connect(cable, 1, transformer, 0).unwrap();

        let report = block_on(Executor::new(electrical_registry()).execute(&mut graph)).unwrap();

        assert_eq!(report.status, RunStatus::CompletedWithErrors);
        assert_eq!(report.processed(), 3);
        assert_eq!(report.completed(), 1);
        assert_eq!(report.failed(), 2);

        assert!(!graph.node(load).unwrap().has_error);
        assert!(!graph.node(load).unwrap().output_values.is_empty());

        let cable_node = graph.node(cable).unwrap();
        assert!(cable_node.has_error);
        assert_eq!(cable_node.error_message, "Missing required inputs: Cable Length(m)");
        assert!(cable_node.output_values.is_empty());

        let transformer_node = graph.node(transformer).unwrap();
        assert!(transformer_node.has_error);
        assert_eq!(
            transformer_node.error_message,
            "Missing required inputs: Total Load(kVA)"
        );
        assert!(!report.run(transformer).unwrap().inputs.contains_key("totalLoad"));
        assert_eq!(report.summary(), "Workflow completed with 2 error(s).");
    }

    #[test]
    fn test_failed_rerun_clears_previous_outputs() {
        let catalog = test_catalog();
        let mut graph = num_chain(&catalog, 2);
        graph.node_mut(NodeId(1)).unwrap().set_input("x", 2.0);
        let executor = Executor::new(test_registry());

        block_on(executor.execute(&mut graph)).unwrap();
        assert_eq!(graph.node(NodeId(2)).unwrap().output_values["y"], Value::from(8.0));

        graph.node_mut(NodeId(1)).unwrap().set_input("x", Value::Null);
        let report = block_on(executor.execute(&mut graph)).unwrap();

        assert_eq!(report.failed(), 2);
        assert!(graph.node(NodeId(1)).unwrap().output_values.is_empty());
        assert!(graph.node(NodeId(2)).unwrap().output_values.is_empty());
    }

    #[test]
    fn test_unregistered_calculator_fails_its_node() {
        let catalog = test_catalog();
        let mut graph = num_chain(&catalog, 1);
        graph.node_mut(NodeId(1)).unwrap().set_input("x", 2.0);

        let report = block_on(Executor::default().execute(&mut graph)).unwrap();
        let run = report.run(NodeId(1)).unwrap();
        assert_eq!(
            run.error(),
            Some(&NodeError::CalculatorUnavailable("num".to_string()))
        );
        assert_eq!(
            graph.node(NodeId(1)).unwrap().error_message,
            "Calculator num not available"
        );
    }

    #[test]
    fn test_calculator_error_is_recorded() {
        let catalog = test_catalog();
        let mut graph = num_chain(&catalog, 2);
        graph.node_mut(NodeId(1)).unwrap().set_input("x", 2.0);
        let registry = test_registry().with_fn("num", |_| Err(CalculationError::failed("Calculation service error")));

        let report = block_on(Executor::new(registry).execute(&mut graph)).unwrap();
        assert_eq!(report.failed(), 2);
        assert_eq!(
            graph.node(NodeId(1)).unwrap().error_message,
            "Calculation service error"
        );
        assert!(report.errors().all(|(_, e)| matches!(e, NodeError::Calculation(_) | NodeError::MissingInputs(_))));
    }

    #[test]
    fn test_cancelled_run_skips_remaining_nodes() {
        let catalog = test_catalog();
        let mut graph = num_chain(&catalog, 3);
        graph.node_mut(NodeId(1)).unwrap().set_input("x", 1.0);
        let before = graph.clone();

        let token = CancellationToken::new();
        token.cancel();
        let report = block_on(Executor::new(test_registry()).execute_with_cancel(&mut graph, &token)).unwrap();

        assert_eq!(report.status, RunStatus::Cancelled);
        assert_eq!(report.skipped(), 3);
        assert_eq!(report.summary(), "Workflow cancelled after 0 of 3 calculators.");
        assert_eq!(graph, before);
    }

    #[test]
    fn test_assemble_inputs_keeps_local_value_until_upstream_runs() {
        let catalog = test_catalog();
        let mut graph = num_chain(&catalog, 2);
        graph.node_mut(NodeId(2)).unwrap().set_input("x", 7.0);

        let node = graph.node(NodeId(2)).unwrap();
        assert_eq!(assemble_inputs(&graph, node)["x"], Value::from(7.0));
    }
}

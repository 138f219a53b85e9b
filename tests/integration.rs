//! Integration tests for calcflow
//!
//! End-to-end tests that verify the complete functionality works together.
//!
mod common;
use calcflow::prelude::*;
use calcflow::report::NodeStatus;
use common::*;
use tokio_test::block_on;

#[cfg(test)]
mod integration_tests {
    use super::*;

    fn node_named<'a>(graph: &'a Graph, name: &str) -> &'a Node {
        graph
            .nodes()
            .iter()
            .find(|n| n.name == name)
            .unwrap_or_else(|| panic!("no node named {}", name))
    }

    #[test]
    fn test_featured_example_end_to_end() {
        let mut editor = WorkflowEditor::builder(CalculatorCatalog::builtin())
            .registry(electrical_registry())
            .build();
        editor
            .load_example(&WorkflowLibrary::builtin(), "electrical_power_distribution")
            .unwrap();

        let ids: Vec<_> = editor.graph().nodes().iter().map(|n| n.id).collect();
        let (load, cable) = (ids[0], ids[1]);
        editor.set_input(load, "power", 80.0);
        editor.set_input(load, "voltage", 400.0);
        editor.set_input_raw(cable, "length", "25");
        editor.set_input_raw(cable, "voltageSystem", "400");

        let report = block_on(editor.execute()).unwrap();
        assert!(report.is_success(), "{}", report.summary());
        assert_eq!(report.order[0], load);

        let graph = editor.graph();
        let current = node_named(graph, "Load Calculation").output_values["current"].clone();
        assert_eq!(current, Value::from(200.0));
        assert_eq!(report.run(cable).unwrap().inputs["current"], current);
        assert_eq!(
            node_named(graph, "Transformer Sizing").output_values["requiredKVA"],
            Value::from(100.0)
        );

        let workflow_report = editor.report("Distribution");
        assert_eq!(workflow_report.count(NodeStatus::Completed), 3);
        assert_eq!(workflow_report.execution_order.len(), 3);
    }

    #[test]
    fn test_results_survive_save_and_reload() {
        let mut editor = WorkflowEditor::builder(CalculatorCatalog::builtin())
            .registry(electrical_registry())
            .build();
        let load = editor
            .add_calculator_node("electrical", "loadCalculation", 100.0, 200.0)
            .unwrap();
        editor.set_input(load, "power", 10.0);
        editor.set_input(load, "voltage", 400.0);
        block_on(editor.execute()).unwrap();

        let json = editor.to_document().to_json_pretty().unwrap();
        let mut reloaded = WorkflowEditor::builder(CalculatorCatalog::builtin()).build();
        reloaded.load_json(&json).unwrap();

        let node = reloaded.graph().node(load).unwrap();
        assert_eq!(node.output_values["current"], Value::from(25.0));
        assert_eq!(node.position, Position::new(100.0, 200.0));
    }

    #[test]
    fn test_custom_format_through_into_workflow() {
        struct Pipeline(Vec<(&'static str, &'static str)>);

        impl IntoWorkflow for Pipeline {
            fn into_workflow(self) -> std::result::Result<WorkflowDocument, PersistenceError> {
                let catalog = CalculatorCatalog::builtin();
                let mut graph = Graph::new();
                let mut previous: Option<NodeId> = None;
                for (i, (module_key, calc_key)) in self.0.into_iter().enumerate() {
                    let id = add_builtin_node(&mut graph, &catalog, i as u64 + 1, module_key, calc_key);
                    if let Some(prev) = previous {
                        graph.connect(prev, 0, id, 0).map_err(|e| PersistenceError::Io {
                            path: calc_key.to_string(),
                            source: std::io::Error::other(e.to_string()),
                        })?;
                    }
                    previous = Some(id);
                }
                Ok(graph.to_document())
            }
        }

        let mut editor = WorkflowEditor::builder(CalculatorCatalog::builtin()).build();
        editor
            .load(Pipeline(vec![
                ("mechanical", "pipeSizing"),
                ("mechanical", "pumpSizing"),
            ]))
            .unwrap();

        assert_eq!(editor.graph().nodes().len(), 2);
        assert_eq!(editor.graph().connections().len(), 1);
        assert_eq!(editor.execution_order(), Some(vec![NodeId(1), NodeId(2)]));
    }
}

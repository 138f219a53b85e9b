//! Persistence tests
//!
//! Workflow documents, file round-trips and the template libraries.
//!
mod common;
use calcflow::document::ConnectionRecord;
use calcflow::prelude::*;
use common::*;
use std::fs;

#[cfg(test)]
mod document_tests {
    use super::*;

    fn sample_graph(catalog: &CalculatorCatalog) -> Graph {
        let mut graph = Graph::new();
        let load = add_builtin_node(&mut graph, catalog, 1001, "electrical", "loadCalculation");
        let cable = add_builtin_node(&mut graph, catalog, 1002, "electrical", "cableSizing");
        let transformer = add_builtin_node(&mut graph, catalog, 1003, "electrical", "transformerSizing");
        {
            let node = graph.node_mut(load).unwrap();
            node.set_input("power", 40.0);
            node.set_input("voltage", 400.0);
            node.set_input("systemType", "3phase");
            node.output_values.insert("current".to_string(), Value::from(57.7));
        }
        graph.node_mut(cable).unwrap().set_input("length", 120.5);
        graph.connect(load, 0, cable, 0).unwrap();
        graph.connect(load, 1, transformer, 0).unwrap();
        graph
    }

    #[test]
    fn test_round_trip_preserves_graph() {
        let catalog = CalculatorCatalog::builtin();
        let graph = sample_graph(&catalog);

        let json = graph.to_document().to_json().unwrap();
        let doc = WorkflowDocument::from_json(&json).unwrap();
        let restored = Graph::from_document(&doc, &catalog);

        assert_eq!(restored.nodes().len(), 3);
        assert_eq!(restored.connections().len(), 2);
        assert_eq!(restored, graph);
    }

    #[test]
    fn test_document_uses_camel_case_keys() {
        let catalog = CalculatorCatalog::builtin();
        let json = sample_graph(&catalog).to_document().to_json().unwrap();
        for key in ["\"moduleKey\"", "\"calcKey\"", "\"inputValues\"", "\"fromNodeId\"", "\"toPort\""] {
            assert!(json.contains(key), "missing {} in {}", key, json);
        }
    }

    #[test]
    fn test_unresolvable_connections_are_dropped() {
        let json = r#"{
            "nodes": [
                {"id": 1, "name": "Load", "moduleKey": "electrical", "calcKey": "loadCalculation", "x": 0, "y": 0},
                {"id": 2, "name": "Cable", "moduleKey": "electrical", "calcKey": "cableSizing", "x": 300, "y": 0}
            ],
            "connections": [
                {"fromNodeId": 1, "fromPort": 0, "toNodeId": 2, "toPort": 0},
                {"fromNodeId": 1, "fromPort": 0, "toNodeId": 99, "toPort": 0},
                {"fromNodeId": 1, "fromPort": 7, "toNodeId": 2, "toPort": 1},
                {"fromNodeId": 2, "fromPort": 0, "toNodeId": 2, "toPort": 1}
            ]
        }"#;
        let doc = WorkflowDocument::from_json(json).unwrap();
        let graph = Graph::from_document(&doc, &CalculatorCatalog::builtin());

        assert_eq!(graph.nodes().len(), 2);
        assert_eq!(graph.connections().len(), 1);
        assert!(graph.node(NodeId(1)).unwrap().input_values.is_empty());
    }

    #[test]
    fn test_last_feed_wins_on_restore() {
        let catalog = test_catalog();
        let mut doc = num_chain(&catalog, 3).to_document();
        doc.connections.push(ConnectionRecord {
            from_node_id: NodeId(1),
            from_port: 0,
            to_node_id: NodeId(3),
            to_port: 0,
        });

        let graph = Graph::from_document(&doc, &catalog);
        let feeds: Vec<_> = graph.incoming(NodeId(3)).collect();
        assert_eq!(feeds.len(), 1);
        assert_eq!(feeds[0].from_node, NodeId(1));
    }

    #[test]
    fn test_duplicate_node_ids_keep_first_record() {
        let json = r#"{
            "nodes": [
                {"id": 7, "name": "A", "moduleKey": "test", "calcKey": "num", "x": 0, "y": 0, "inputValues": {"x": 1}},
                {"id": 7, "name": "B", "moduleKey": "test", "calcKey": "num", "x": 300, "y": 0, "inputValues": {"x": 2}}
            ]
        }"#;
        let doc = WorkflowDocument::from_json(json).unwrap();
        let mut graph = Graph::from_document(&doc, &test_catalog());

        assert_eq!(graph.nodes().len(), 1);
        assert_eq!(graph.node(NodeId(7)).unwrap().name, "A");
        assert_eq!(graph.execution_order(), Some(vec![NodeId(7)]));

        let report = tokio_test::block_on(Executor::new(test_registry()).execute(&mut graph)).unwrap();
        assert_eq!(report.order, vec![NodeId(7)]);
        assert_eq!(graph.node(NodeId(7)).unwrap().output_values["y"], Value::from(2.0));
    }

    #[test]
    fn test_save_and_load_file() {
        let catalog = CalculatorCatalog::builtin();
        let graph = sample_graph(&catalog);
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("workflow.json");

        graph.to_document().save(&path).unwrap();
        let loaded = WorkflowDocument::from_file(&path).unwrap();
        assert_eq!(Graph::from_document(&loaded, &catalog), graph);
    }

    #[test]
    fn test_load_errors() {
        assert!(matches!(
            WorkflowDocument::from_json("{ not json"),
            Err(PersistenceError::Parse(_))
        ));
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            WorkflowDocument::from_file(dir.path().join("missing.json")),
            Err(PersistenceError::Io { .. })
        ));
    }

    #[test]
    fn test_missing_sections_default_to_empty() {
        let doc = WorkflowDocument::from_json("{}").unwrap();
        assert!(doc.nodes.is_empty());
        assert!(doc.connections.is_empty());
    }
}

#[cfg(test)]
mod library_tests {
    use super::*;

    const WORKFLOWS_JSON: &str = r#"{
        "workflows": [
            {
                "id": "wf-electrical-01",
                "title": "Feeder Design",
                "domain": "electrical",
                "description": "Size a feeder from load to cable",
                "steps": ["Load calculation", "Cable sizing"]
            },
            {
                "id": "wf-civil-01",
                "title": "Slab Quantities",
                "domain": "civil",
                "description": "Concrete and rebar take-off"
            }
        ]
    }"#;

    const EXAMPLES_JSON: &str = r#"{
        "examples": [
            {
                "id": "ex-pump-01",
                "title": "Booster Pump",
                "domain": "mechanical",
                "scenario": "Domestic water booster for a 10 storey building",
                "inputs": {"flowRate": 12.5, "head": 45},
                "outputs": {"power": 2.2}
            }
        ]
    }"#;

    #[test]
    fn test_builtin_featured_examples() {
        let library = WorkflowLibrary::builtin();
        assert_eq!(library.featured.len(), 3);

        let electrical = library.featured("electrical_power_distribution").unwrap();
        assert_eq!(electrical.workflow.nodes.len(), 3);
        assert_eq!(electrical.workflow.connections.len(), 2);
        assert!(library.featured("unknown").is_none());
    }

    #[test]
    fn test_featured_examples_restore_cleanly() {
        let catalog = CalculatorCatalog::builtin();
        for example in WorkflowLibrary::builtin().featured {
            let graph = Graph::from_document(&example.workflow, &catalog);
            assert_eq!(graph.connections().len(), example.workflow.connections.len());
            assert!(!graph.has_cycle());
        }
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let library = WorkflowLibrary::builtin()
            .with_workflows_json(WORKFLOWS_JSON)
            .unwrap()
            .with_examples_json(EXAMPLES_JSON)
            .unwrap();

        let results = library.search("PUMP");
        assert_eq!(results.featured.len(), 1);
        assert_eq!(results.featured[0].key, "piping_system");
        assert_eq!(results.examples.len(), 1);
        assert!(results.workflows.is_empty());

        let results = library.search("civil");
        assert_eq!(results.workflows.len(), 1);
        assert_eq!(results.workflows[0].id, "wf-civil-01");

        assert!(library.search("no such thing").is_empty());
        let all = library.search("");
        assert_eq!(all.featured.len(), 3);
        assert_eq!(all.workflows.len(), 2);
    }

    #[test]
    fn test_lookup_by_id() {
        let library = WorkflowLibrary::default()
            .with_examples_json(EXAMPLES_JSON)
            .unwrap();
        let example = library.example("ex-pump-01").unwrap();
        assert_eq!(example.inputs["head"], serde_json::json!(45));
        assert!(library.workflow("ex-pump-01").is_none());
    }

    #[test]
    fn test_load_dir_degrades_to_empty_lists() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("workflows.json"), WORKFLOWS_JSON).unwrap();
        fs::write(dir.path().join("examples.json"), "{ broken").unwrap();

        let library = WorkflowLibrary::load_dir(dir.path());
        assert_eq!(library.featured.len(), 3);
        assert_eq!(library.workflows.len(), 2);
        assert!(library.examples.is_empty());
        assert_eq!(library.workflow("wf-electrical-01").unwrap().steps.len(), 2);
    }
}

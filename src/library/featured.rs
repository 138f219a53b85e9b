use super::FeaturedExample;
use crate::document::{ConnectionRecord, NodeRecord, WorkflowDocument};
use crate::graph::NodeId;
use crate::value::{Inputs, Outputs};

fn node(id: u64, name: &str, module_key: &str, calc_key: &str, x: f64, y: f64) -> NodeRecord {
    NodeRecord {
        id: NodeId(id),
        name: name.to_string(),
        module_key: module_key.to_string(),
        calc_key: calc_key.to_string(),
        x,
        y,
        input_values: Inputs::new(),
        output_values: Outputs::new(),
    }
}

fn link(from: u64, from_port: usize, to: u64, to_port: usize) -> ConnectionRecord {
    ConnectionRecord {
        from_node_id: NodeId(from),
        from_port,
        to_node_id: NodeId(to),
        to_port,
    }
}

/// The example graphs offered on first use.
pub fn featured_examples() -> Vec<FeaturedExample> {
    vec![
        FeaturedExample {
            key: "electrical_power_distribution".to_string(),
            name: "Electrical Power Distribution System".to_string(),
            description: "Load calculation → Cable sizing → Transformer sizing".to_string(),
            workflow: WorkflowDocument {
                nodes: vec![
                    node(1001, "Load Calculation", "electrical", "loadCalculation", 100.0, 200.0),
                    node(1002, "Cable Sizing", "electrical", "cableSizing", 400.0, 200.0),
                    node(1003, "Transformer Sizing", "electrical", "transformerSizing", 700.0, 200.0),
                ],
                connections: vec![link(1001, 0, 1002, 0), link(1001, 1, 1003, 0)],
            },
        },
        FeaturedExample {
            key: "piping_system".to_string(),
            name: "Piping & Pump System Design".to_string(),
            description: "Pipe sizing → Pump sizing with shared flow rate".to_string(),
            workflow: WorkflowDocument {
                nodes: vec![
                    node(2001, "Pipe Sizing", "mechanical", "pipeSizing", 200.0, 250.0),
                    node(2002, "Pump Sizing", "mechanical", "pumpSizing", 550.0, 250.0),
                ],
                connections: vec![link(2001, 0, 2002, 0)],
            },
        },
        FeaturedExample {
            key: "concrete_structure".to_string(),
            name: "Concrete Structure Design".to_string(),
            description: "Concrete volume calculation → Steel reinforcement".to_string(),
            workflow: WorkflowDocument {
                nodes: vec![
                    node(4001, "Concrete Volume", "civil", "concreteVolume", 200.0, 200.0),
                    node(4002, "Steel Weight", "civil", "steelWeight", 550.0, 200.0),
                ],
                connections: Vec::new(),
            },
        },
    ]
}

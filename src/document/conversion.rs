use super::definition::{ConnectionRecord, NodeRecord, WorkflowDocument};
use crate::catalog::CalculatorCatalog;
use crate::error::PersistenceError;
use crate::graph::{Connection, Graph, Node, Position};

/// A trait for workflow formats that can be converted into a `WorkflowDocument`.
///
/// Implement it on your own structs to load graphs authored elsewhere (another
/// editor's export, a template service) without going through JSON.
pub trait IntoWorkflow {
    fn into_workflow(self) -> Result<WorkflowDocument, PersistenceError>;
}

impl IntoWorkflow for WorkflowDocument {
    fn into_workflow(self) -> Result<WorkflowDocument, PersistenceError> {
        Ok(self)
    }
}

impl Graph {
    /// Captures node identity, position and values plus connection endpoints.
    pub fn to_document(&self) -> WorkflowDocument {
        WorkflowDocument {
            nodes: self
                .nodes
                .iter()
                .map(|n| NodeRecord {
                    id: n.id,
                    name: n.name.clone(),
                    module_key: n.module_key.clone(),
                    calc_key: n.calc_key.clone(),
                    x: n.position.x,
                    y: n.position.y,
                    input_values: n.input_values.clone(),
                    output_values: n.output_values.clone(),
                })
                .collect(),
            connections: self
                .connections
                .iter()
                .map(|c| ConnectionRecord {
                    from_node_id: c.from_node,
                    from_port: c.from_port,
                    to_node_id: c.to_node,
                    to_port: c.to_port,
                })
                .collect(),
        }
    }

    /// Rebuilds a graph from a document, re-deriving every node's ports from
    /// the catalog.
    ///
    /// A node record repeating an earlier id is skipped. Connections whose
    /// endpoints cannot be resolved (unknown node ids, port indices past the
    /// derived ports, self-loops) are dropped. When several connections feed
    /// the same input, the last one wins.
    pub fn from_document(doc: &WorkflowDocument, catalog: &CalculatorCatalog) -> Self {
        let mut graph = Graph::new();
        for record in &doc.nodes {
            if graph.node(record.id).is_some() {
                tracing::warn!("Skipping node '{}' with duplicate id {}", record.name, record.id);
                continue;
            }
            let mut node = Node::new(
                record.id,
                &record.name,
                &record.module_key,
                &record.calc_key,
                Position::new(record.x, record.y),
                catalog.definition_or_default(&record.calc_key),
            );
            node.input_values = record.input_values.clone();
            node.output_values = record.output_values.clone();
            graph.add_node(node);
        }

        for record in &doc.connections {
            let resolvable = record.from_node_id != record.to_node_id
                && graph
                    .node(record.from_node_id)
                    .is_some_and(|n| n.output_port(record.from_port).is_some())
                && graph
                    .node(record.to_node_id)
                    .is_some_and(|n| n.input_port(record.to_port).is_some());
            if !resolvable {
                tracing::warn!(
                    "Dropping unresolvable connection {}[{}] -> {}[{}]",
                    record.from_node_id,
                    record.from_port,
                    record.to_node_id,
                    record.to_port
                );
                continue;
            }

            graph
                .connections
                .retain(|c| !c.feeds(record.to_node_id, record.to_port));
            graph.connections.push(Connection {
                from_node: record.from_node_id,
                from_port: record.from_port,
                to_node: record.to_node_id,
                to_port: record.to_port,
            });
        }

        graph
    }
}

use crate::graph::NodeId;
use crate::value::{Inputs, Outputs};
use serde::{Deserialize, Serialize};

/// The persisted form of a workflow: exactly what is written by save, read by
/// load, and used by template libraries.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WorkflowDocument {
    #[serde(default)]
    pub nodes: Vec<NodeRecord>,
    #[serde(default)]
    pub connections: Vec<ConnectionRecord>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeRecord {
    pub id: NodeId,
    pub name: String,
    pub module_key: String,
    pub calc_key: String,
    pub x: f64,
    pub y: f64,
    #[serde(default)]
    pub input_values: Inputs,
    #[serde(default)]
    pub output_values: Outputs,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionRecord {
    pub from_node_id: NodeId,
    pub from_port: usize,
    pub to_node_id: NodeId,
    pub to_port: usize,
}

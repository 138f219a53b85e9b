use crate::error::ReportError;
use crate::graph::{Graph, Node};
use crate::value::Value;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

mod html;

pub use html::{escape_html, render_html};

/// Status of a node as shown in a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeStatus {
    Completed,
    Error,
    Pending,
}

impl NodeStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeStatus::Completed => "completed",
            NodeStatus::Error => "error",
            NodeStatus::Pending => "pending",
        }
    }
}

/// One labelled row of a node's input or output table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportField {
    pub label: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportNode {
    pub name: String,
    /// `"<module>-<calculator>"`.
    #[serde(rename = "type")]
    pub node_type: String,
    pub status: NodeStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub inputs: Vec<ReportField>,
    pub outputs: Vec<ReportField>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportConnection {
    pub from: String,
    pub to: String,
}

/// A flattened view of the graph and its last results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkflowReport {
    pub title: String,
    pub generated_at: DateTime<Utc>,
    pub nodes: Vec<ReportNode>,
    pub connections: Vec<ReportConnection>,
    pub execution_order: Vec<String>,
    pub error: Option<String>,
}

impl WorkflowReport {
    /// Flattens `graph`. Nodes are listed in execution order; when the graph
    /// has a cycle they are listed in insertion order and `error` explains why
    /// no order is given.
    pub fn from_graph(graph: &Graph, title: &str) -> Self {
        let (ordered, execution_order, error): (Vec<&Node>, Vec<String>, Option<String>) =
            match graph.execution_order() {
                Some(order) => {
                    let nodes: Vec<&Node> = order.iter().filter_map(|id| graph.node(*id)).collect();
                    let names = nodes.iter().map(|n| n.name.clone()).collect();
                    (nodes, names, None)
                }
                None => (
                    graph.nodes().iter().collect(),
                    Vec::new(),
                    Some("Circular dependency detected; no execution order could be determined".to_string()),
                ),
            };

        let nodes = ordered.into_iter().map(report_node).collect();

        let connections = graph
            .connections()
            .iter()
            .filter_map(|c| {
                let from = graph.node(c.from_node)?;
                let to = graph.node(c.to_node)?;
                Some(ReportConnection {
                    from: format!("{} [{}]", from.name, from.output_port(c.from_port)?.label),
                    to: format!("{} [{}]", to.name, to.input_port(c.to_port)?.label),
                })
            })
            .collect();

        Self {
            title: title.to_string(),
            generated_at: Utc::now(),
            nodes,
            connections,
            execution_order,
            error,
        }
    }

    /// Identifier of the form `RPT-YYYYMMDD-HHMMSS`.
    pub fn report_id(&self) -> String {
        self.generated_at.format("RPT-%Y%m%d-%H%M%S").to_string()
    }

    pub fn count(&self, status: NodeStatus) -> usize {
        self.nodes.iter().filter(|n| n.status == status).count()
    }

    /// Wraps the report in the request shape the report service expects.
    pub fn to_request(&self) -> ReportRequest {
        ReportRequest {
            report_type: "workflow".to_string(),
            format: "html".to_string(),
            content: self.clone(),
        }
    }
}

fn display_value(value: Option<&Value>, missing: &str) -> String {
    match value {
        None => missing.to_string(),
        Some(Value::Null) => "N/A".to_string(),
        Some(v) => v.to_string(),
    }
}

fn report_node(node: &Node) -> ReportNode {
    let status = if node.has_error {
        NodeStatus::Error
    } else if !node.output_values.is_empty() {
        NodeStatus::Completed
    } else {
        NodeStatus::Pending
    };

    ReportNode {
        name: node.name.clone(),
        node_type: format!("{}-{}", node.module_key, node.calc_key),
        status,
        error: node.has_error.then(|| node.error_message.clone()),
        inputs: node
            .input_ports()
            .iter()
            .map(|p| ReportField {
                label: p.label.clone(),
                value: display_value(node.input_values.get(&p.name), "Not set"),
            })
            .collect(),
        outputs: node
            .output_ports()
            .iter()
            .map(|p| ReportField {
                label: p.label.clone(),
                value: display_value(node.output_values.get(&p.name), "Not calculated"),
            })
            .collect(),
    }
}

/// Payload posted to a report rendering service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportRequest {
    pub report_type: String,
    pub format: String,
    pub content: WorkflowReport,
}

/// A rendered report document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderedReport {
    pub report_id: String,
    pub html: String,
}

/// A remote service that turns a report into HTML.
#[async_trait]
pub trait ReportRenderer: Send + Sync {
    async fn render(&self, request: &ReportRequest) -> Result<RenderedReport, ReportError>;
}

/// Renders `report` through `renderer` when one is given, falling back to the
/// local static HTML when the service fails or returns an empty document.
pub async fn generate(report: &WorkflowReport, renderer: Option<&dyn ReportRenderer>) -> RenderedReport {
    if let Some(renderer) = renderer {
        match renderer.render(&report.to_request()).await {
            Ok(rendered) if !rendered.html.trim().is_empty() => return rendered,
            Ok(_) => tracing::warn!("{}; rendering locally", ReportError::EmptyResponse),
            Err(e) => tracing::warn!("Report service failed ({}); rendering locally", e),
        }
    }
    RenderedReport {
        report_id: report.report_id(),
        html: render_html(report),
    }
}

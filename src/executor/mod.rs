use crate::calculator::CalculatorRegistry;
use crate::error::{ExecutionError, NodeError};
use crate::graph::{Graph, Node, NodeId};
use crate::schedule::topological_sort;
use crate::value::{Inputs, Outputs};
use tokio_util::sync::CancellationToken;

mod outcome;

pub use outcome::*;

/// Runs a workflow graph node by node in dependency order.
///
/// Nodes run strictly one after another: each calculation is awaited before
/// the next node's inputs are assembled, so connection-fed values always come
/// from completed upstream results.
#[derive(Debug, Clone, Default)]
pub struct Executor {
    registry: CalculatorRegistry,
}

impl Executor {
    pub fn new(registry: CalculatorRegistry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &CalculatorRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut CalculatorRegistry {
        &mut self.registry
    }

    /// Executes every node of `graph`.
    ///
    /// # Returns
    ///
    /// * `Ok(ExecutionReport)`: the run happened (or the graph was empty). Node
    ///   failures are recorded on the nodes and in the report; they never abort
    ///   the run.
    /// * `Err(ExecutionError::CycleDetected)`: the graph contains a cycle. No
    ///   node was touched.
    pub async fn execute(&self, graph: &mut Graph) -> Result<ExecutionReport, ExecutionError> {
        self.execute_with_cancel(graph, &CancellationToken::new())
            .await
    }

    /// Like [`execute`](Self::execute), but stops starting new nodes once
    /// `cancel` fires. Nodes not yet started are reported as skipped and keep
    /// their previous state.
    pub async fn execute_with_cancel(
        &self,
        graph: &mut Graph,
        cancel: &CancellationToken,
    ) -> Result<ExecutionReport, ExecutionError> {
        if graph.is_empty() {
            tracing::info!("No nodes to execute");
            return Ok(ExecutionReport::empty());
        }

        let order = topological_sort(graph).ok_or_else(|| {
            tracing::warn!("Refusing to execute: workflow contains a cycle");
            ExecutionError::CycleDetected
        })?;

        tracing::info!("Executing workflow with {} nodes", order.len());

        let mut runs = Vec::with_capacity(order.len());
        let mut cancelled = false;
        for &id in &order {
            if !cancelled && cancel.is_cancelled() {
                tracing::info!("Workflow run cancelled before node {}", id);
                cancelled = true;
            }
            if cancelled {
                if let Some(node) = graph.node(id) {
                    runs.push(NodeRun {
                        node: id,
                        name: node.name.clone(),
                        inputs: Inputs::new(),
                        outcome: NodeOutcome::Skipped,
                    });
                }
                continue;
            }
            if let Some(run) = self.run_node(graph, id).await {
                runs.push(run);
            }
        }

        let failed = runs.iter().filter(|r| r.error().is_some()).count();
        let status = if cancelled {
            RunStatus::Cancelled
        } else if failed > 0 {
            RunStatus::CompletedWithErrors
        } else {
            RunStatus::Completed
        };
        let report = ExecutionReport { status, order, runs };

        match status {
            RunStatus::Completed => tracing::info!("{}", report.summary()),
            _ => tracing::warn!("{}", report.summary()),
        }
        Ok(report)
    }

    async fn run_node(&self, graph: &mut Graph, id: NodeId) -> Option<NodeRun> {
        let node = graph.node(id)?;
        let name = node.name.clone();
        let inputs = assemble_inputs(graph, node);

        let result = match missing_required(node, &inputs) {
            Some(missing) => Err(NodeError::MissingInputs(missing)),
            None => self.calculate(&node.calc_key, &inputs).await,
        };

        let node = graph.node_mut(id)?;
        let outcome = match result {
            Ok(outputs) => {
                tracing::debug!("Node '{}' ({}) completed", node.name, id);
                node.output_values = outputs.clone();
                node.clear_error();
                NodeOutcome::Completed(outputs)
            }
            Err(error) => {
                tracing::warn!("Error in node '{}' ({}): {}", node.name, id, error);
                node.mark_error(error.to_string());
                node.output_values.clear();
                NodeOutcome::Failed(error)
            }
        };

        Some(NodeRun {
            node: id,
            name,
            inputs,
            outcome,
        })
    }

    async fn calculate(&self, calc_key: &str, inputs: &Inputs) -> Result<Outputs, NodeError> {
        let calculator = self
            .registry
            .get(calc_key)
            .ok_or_else(|| NodeError::CalculatorUnavailable(calc_key.to_string()))?;
        Ok(calculator.calculate(inputs).await?)
    }
}

/// Starts from the node's own values and overwrites each connected input with
/// the upstream output, when the upstream node has produced one.
pub fn assemble_inputs(graph: &Graph, node: &Node) -> Inputs {
    let mut inputs = node.input_values.clone();
    for conn in graph.incoming(node.id) {
        let Some(source) = graph.node(conn.from_node) else {
            continue;
        };
        let (Some(from_port), Some(to_port)) =
            (source.output_port(conn.from_port), node.input_port(conn.to_port))
        else {
            continue;
        };
        if let Some(value) = source.output_values.get(&from_port.name) {
            inputs.insert(to_port.name.clone(), value.clone());
        }
    }
    inputs
}

/// Labels of required inputs that have no usable value, in port order.
fn missing_required(node: &Node, inputs: &Inputs) -> Option<Vec<String>> {
    let missing: Vec<String> = node
        .input_ports()
        .iter()
        .filter(|port| {
            node.definition()
                .field(&port.name)
                .is_some_and(|field| field.required)
                && !inputs.get(&port.name).is_some_and(|v| v.is_present())
        })
        .map(|port| port.label.clone())
        .collect();

    if missing.is_empty() { None } else { Some(missing) }
}

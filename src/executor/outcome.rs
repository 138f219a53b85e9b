use crate::error::NodeError;
use crate::graph::NodeId;
use crate::value::{Inputs, Outputs};

/// Overall result class of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStatus {
    /// The graph had no nodes.
    NothingToExecute,
    /// Every node produced outputs.
    Completed,
    /// The run finished but at least one node failed.
    CompletedWithErrors,
    /// The run was cancelled before every node ran.
    Cancelled,
}

/// What happened to a single node.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeOutcome {
    Completed(Outputs),
    Failed(NodeError),
    /// Not attempted because the run was cancelled first.
    Skipped,
}

/// One node's step in a run: the input set it was given and its outcome.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeRun {
    pub node: NodeId,
    pub name: String,
    /// Local values overlaid with upstream outputs, as handed to the calculator.
    pub inputs: Inputs,
    pub outcome: NodeOutcome,
}

impl NodeRun {
    pub fn is_completed(&self) -> bool {
        matches!(self.outcome, NodeOutcome::Completed(_))
    }

    pub fn error(&self) -> Option<&NodeError> {
        match &self.outcome {
            NodeOutcome::Failed(e) => Some(e),
            _ => None,
        }
    }
}

/// The result of `Executor::execute`.
#[derive(Debug, Clone, PartialEq)]
pub struct ExecutionReport {
    pub status: RunStatus,
    /// Execution order that was used.
    pub order: Vec<NodeId>,
    /// One entry per node in `order`.
    pub runs: Vec<NodeRun>,
}

impl ExecutionReport {
    pub(super) fn empty() -> Self {
        Self {
            status: RunStatus::NothingToExecute,
            order: Vec::new(),
            runs: Vec::new(),
        }
    }

    pub fn completed(&self) -> usize {
        self.runs.iter().filter(|r| r.is_completed()).count()
    }

    pub fn failed(&self) -> usize {
        self.runs.iter().filter(|r| r.error().is_some()).count()
    }

    pub fn skipped(&self) -> usize {
        self.runs
            .iter()
            .filter(|r| matches!(r.outcome, NodeOutcome::Skipped))
            .count()
    }

    /// Nodes that were actually attempted.
    pub fn processed(&self) -> usize {
        self.completed() + self.failed()
    }

    pub fn run(&self, node: NodeId) -> Option<&NodeRun> {
        self.runs.iter().find(|r| r.node == node)
    }

    pub fn errors(&self) -> impl Iterator<Item = (&NodeRun, &NodeError)> {
        self.runs.iter().filter_map(|r| r.error().map(|e| (r, e)))
    }

    pub fn is_success(&self) -> bool {
        self.status == RunStatus::Completed
    }

    /// A one-line, human-readable summary of the run.
    pub fn summary(&self) -> String {
        match self.status {
            RunStatus::NothingToExecute => "No nodes to execute".to_string(),
            RunStatus::Completed => format!(
                "Workflow completed! Processed {} calculators.",
                self.completed()
            ),
            RunStatus::CompletedWithErrors => {
                format!("Workflow completed with {} error(s).", self.failed())
            }
            RunStatus::Cancelled => format!(
                "Workflow cancelled after {} of {} calculators.",
                self.processed(),
                self.runs.len()
            ),
        }
    }
}

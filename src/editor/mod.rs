use crate::calculator::CalculatorRegistry;
use crate::catalog::CalculatorCatalog;
use crate::document::{IntoWorkflow, WorkflowDocument};
use crate::error::{CatalogError, ConnectionError, ExecutionError, PersistenceError};
use crate::executor::{ExecutionReport, Executor, RunStatus};
use crate::graph::{Connection, ConnectionOutcome, Graph, Node, NodeId, NodeIdGenerator, PortRef, Position};
use crate::history::History;
use crate::library::WorkflowLibrary;
use crate::report::{RenderedReport, ReportRenderer, WorkflowReport, generate};
use crate::value::Value;
use std::path::Path;
use tokio_util::sync::CancellationToken;

mod config;
mod notice;
mod viewport;

pub use config::EditorConfig;
pub use notice::{Notice, NoticeLevel};
pub use viewport::Viewport;

/// Owns one workflow being edited: its graph, undo history, viewport and the
/// executor used to run it.
///
/// Every structural change (adding or deleting nodes and connections, moves,
/// renames, clearing) records the graph as it was before the change, so
/// `undo` always returns to the previous state. Input edits are not recorded.
///
/// Editor actions queue `Notice`s for the user; drain them with
/// [`take_notices`](Self::take_notices).
pub struct WorkflowEditor {
    graph: Graph,
    history: History,
    viewport: Viewport,
    catalog: CalculatorCatalog,
    executor: Executor,
    ids: NodeIdGenerator,
    config: EditorConfig,
    selected: Option<NodeId>,
    drag_origin: Option<Graph>,
    notices: Vec<Notice>,
}

pub struct EditorBuilder {
    catalog: CalculatorCatalog,
    config: EditorConfig,
    registry: CalculatorRegistry,
}

impl EditorBuilder {
    pub fn new(catalog: CalculatorCatalog) -> Self {
        Self {
            catalog,
            config: EditorConfig::default(),
            registry: CalculatorRegistry::new(),
        }
    }

    pub fn config(mut self, config: EditorConfig) -> Self {
        self.config = config;
        self
    }

    pub fn registry(mut self, registry: CalculatorRegistry) -> Self {
        self.registry = registry;
        self
    }

    pub fn build(self) -> WorkflowEditor {
        WorkflowEditor {
            graph: Graph::new(),
            history: History::new(self.config.history_capacity),
            viewport: Viewport::new(&self.config),
            catalog: self.catalog,
            executor: Executor::new(self.registry),
            ids: NodeIdGenerator::new(),
            config: self.config,
            selected: None,
            drag_origin: None,
            notices: Vec::new(),
        }
    }
}

impl WorkflowEditor {
    pub fn builder(catalog: CalculatorCatalog) -> EditorBuilder {
        EditorBuilder::new(catalog)
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn viewport_mut(&mut self) -> &mut Viewport {
        &mut self.viewport
    }

    pub fn catalog(&self) -> &CalculatorCatalog {
        &self.catalog
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn registry_mut(&mut self) -> &mut CalculatorRegistry {
        self.executor.registry_mut()
    }

    pub fn selected(&self) -> Option<&Node> {
        self.selected.and_then(|id| self.graph.node(id))
    }

    pub fn select(&mut self, node: Option<NodeId>) {
        self.selected = node.filter(|id| self.graph.contains(*id));
    }

    /// Returns and clears the pending notices.
    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    fn notify(&mut self, level: NoticeLevel, message: impl Into<String>) {
        self.notices.push(Notice::new(level, message));
    }

    fn checkpoint(&mut self) {
        self.history.record(self.graph.clone());
    }

    fn node_name(&self, id: NodeId) -> String {
        self.graph
            .node(id)
            .map(|n| n.name.clone())
            .unwrap_or_default()
    }

    // --- Structural edits (undoable) ---

    /// Places a new calculator node at canvas position `(x, y)` and selects it.
    pub fn add_calculator_node(
        &mut self,
        module_key: &str,
        calc_key: &str,
        x: f64,
        y: f64,
    ) -> Result<NodeId, CatalogError> {
        let name = match self.catalog.lookup(module_key, calc_key) {
            Ok(entry) => entry.name.clone(),
            Err(e) => {
                tracing::error!("{}", e);
                self.notify(NoticeLevel::Error, e.to_string());
                return Err(e);
            }
        };

        // The generator saturates at u64::MAX; step down to a free id then.
        let mut id = self.ids.next_id();
        while self.graph.contains(id) {
            id = NodeId(id.0.saturating_sub(1));
        }

        let node = Node::new(
            id,
            &name,
            module_key,
            calc_key,
            Position::new(x, y),
            self.catalog.definition_or_default(calc_key),
        )
        .with_size(self.config.node_size());

        self.checkpoint();
        let id = self.graph.add_node(node);
        self.selected = Some(id);
        tracing::info!("Added node {} ({}/{})", id, module_key, calc_key);
        self.notify(NoticeLevel::Success, format!("Added {} node", name));
        Ok(id)
    }

    /// Deletes a node and every connection touching it.
    pub fn delete_node(&mut self, id: NodeId) -> bool {
        if !self.graph.contains(id) {
            return false;
        }
        self.checkpoint();
        self.graph.remove_node(id);
        if self.selected == Some(id) {
            self.selected = None;
        }
        tracing::info!("Removed node {}", id);
        true
    }

    /// Connects an output port to an input port.
    ///
    /// Refused connections leave the graph and history untouched. A connection
    /// into an occupied input replaces the existing one and raises a warning.
    pub fn connect(&mut self, from: PortRef, to: PortRef) -> Result<ConnectionOutcome, ConnectionError> {
        self.graph.check_connection(from, to)?;
        if self.graph.input_occupied(to) {
            self.notify(NoticeLevel::Warning, "Input already connected - will replace");
        }

        let before = self.graph.clone();
        let outcome = self.graph.create_connection(from, to)?;
        self.history.record(before);

        if let Some(replaced) = outcome.replaced {
            tracing::warn!(
                "Replaced connection {}[{}] -> {}[{}]",
                replaced.from_node,
                replaced.from_port,
                replaced.to_node,
                replaced.to_port
            );
        }

        let (from_name, to_name) = (self.node_name(from.node), self.node_name(to.node));
        let message = if outcome.fan_out > 1 {
            format!(
                "Connected {} → {} (Fan-out: {} targets)",
                from_name, to_name, outcome.fan_out
            )
        } else {
            format!("Connected {} → {}", from_name, to_name)
        };
        tracing::info!("{}", message);
        self.notify(NoticeLevel::Success, message);
        Ok(outcome)
    }

    pub fn delete_connection(&mut self, connection: &Connection) -> bool {
        if !self.graph.connections().contains(connection) {
            return false;
        }
        self.checkpoint();
        self.graph.remove_connection(connection);
        self.notify(NoticeLevel::Info, "Connection removed");
        true
    }

    /// Moves a node in one undoable step.
    pub fn move_node(&mut self, id: NodeId, position: Position) -> bool {
        if !self.graph.contains(id) {
            return false;
        }
        self.checkpoint();
        if let Some(node) = self.graph.node_mut(id) {
            node.position = position;
        }
        true
    }

    /// Live position update while dragging. The pre-drag state is captured on
    /// the first call and recorded by [`finish_drag`](Self::finish_drag).
    pub fn drag_node(&mut self, id: NodeId, position: Position) -> bool {
        if !self.graph.contains(id) {
            return false;
        }
        if self.drag_origin.is_none() {
            self.drag_origin = Some(self.graph.clone());
        }
        if let Some(node) = self.graph.node_mut(id) {
            node.position = position;
        }
        true
    }

    /// Drops a dragged node at `position`. Records one undo step holding the
    /// pre-drag state if anything moved.
    pub fn finish_drag(&mut self, id: NodeId, position: Position) -> bool {
        let before = self.drag_origin.take().unwrap_or_else(|| self.graph.clone());
        let Some(node) = self.graph.node_mut(id) else {
            return false;
        };
        node.position = position;
        if before == self.graph {
            return false;
        }
        self.history.record(before);
        true
    }

    pub fn rename_node(&mut self, id: NodeId, name: &str) -> bool {
        let name = name.trim();
        if name.is_empty() || !self.graph.contains(id) {
            return false;
        }
        self.checkpoint();
        if let Some(node) = self.graph.node_mut(id) {
            node.name = name.to_string();
        }
        self.notify(NoticeLevel::Success, "Node renamed");
        true
    }

    /// Removes every node and connection.
    pub fn clear(&mut self) {
        if self.graph.is_empty() {
            return;
        }
        self.checkpoint();
        self.graph.clear();
        self.selected = None;
        tracing::info!("Workflow cleared");
        self.notify(NoticeLevel::Info, "Workflow cleared");
    }

    // --- Value edits (not undoable) ---

    pub fn set_input(&mut self, id: NodeId, name: &str, value: impl Into<Value>) -> bool {
        match self.graph.node_mut(id) {
            Some(node) => {
                node.set_input(name, value);
                true
            }
            None => false,
        }
    }

    /// Property-panel entry: the raw text is coerced to the field's type.
    pub fn set_input_raw(&mut self, id: NodeId, name: &str, raw: &str) -> bool {
        match self.graph.node_mut(id) {
            Some(node) => {
                node.set_input_raw(name, raw);
                true
            }
            None => false,
        }
    }

    // --- History ---

    pub fn undo(&mut self) -> bool {
        match self.history.undo(&self.graph) {
            Some(previous) => {
                self.replace_graph(previous);
                self.notify(NoticeLevel::Info, "Undo");
                true
            }
            None => {
                self.notify(NoticeLevel::Info, "Nothing to undo");
                false
            }
        }
    }

    pub fn redo(&mut self) -> bool {
        match self.history.redo(&self.graph) {
            Some(next) => {
                self.replace_graph(next);
                self.notify(NoticeLevel::Info, "Redo");
                true
            }
            None => {
                self.notify(NoticeLevel::Info, "Nothing to redo");
                false
            }
        }
    }

    fn replace_graph(&mut self, graph: Graph) {
        self.graph = graph;
        self.drag_origin = None;
        self.selected = None;
    }

    // --- Execution ---

    pub fn execution_order(&self) -> Option<Vec<NodeId>> {
        self.graph.execution_order()
    }

    pub async fn execute(&mut self) -> Result<ExecutionReport, ExecutionError> {
        self.execute_with_cancel(&CancellationToken::new()).await
    }

    pub async fn execute_with_cancel(
        &mut self,
        cancel: &CancellationToken,
    ) -> Result<ExecutionReport, ExecutionError> {
        let result = self
            .executor
            .execute_with_cancel(&mut self.graph, cancel)
            .await;
        match &result {
            Ok(report) => {
                let level = match report.status {
                    RunStatus::Completed => NoticeLevel::Success,
                    _ => NoticeLevel::Warning,
                };
                self.notify(level, report.summary());
            }
            Err(e) => self.notify(NoticeLevel::Error, e.to_string()),
        }
        result
    }

    // --- Reports ---

    pub fn report(&self, title: &str) -> WorkflowReport {
        WorkflowReport::from_graph(&self.graph, title)
    }

    /// Builds and renders a report, preferring `renderer` when given.
    pub async fn generate_report(
        &mut self,
        title: &str,
        renderer: Option<&dyn ReportRenderer>,
    ) -> Option<RenderedReport> {
        if self.graph.is_empty() {
            self.notify(NoticeLevel::Warning, "No workflow to report");
            return None;
        }
        let report = self.report(title);
        let rendered = generate(&report, renderer).await;
        self.notify(NoticeLevel::Success, "Workflow report generated");
        Some(rendered)
    }

    // --- Persistence ---

    pub fn to_document(&self) -> WorkflowDocument {
        self.graph.to_document()
    }

    pub fn save(&mut self, path: impl AsRef<Path>) -> Result<(), PersistenceError> {
        match self.graph.to_document().save(path) {
            Ok(()) => {
                self.notify(NoticeLevel::Success, "Workflow saved");
                Ok(())
            }
            Err(e) => {
                tracing::error!("Error saving workflow: {}", e);
                self.notify(NoticeLevel::Error, "Error saving workflow");
                Err(e)
            }
        }
    }

    /// Replaces the current graph with `workflow` and resets the history.
    pub fn load(&mut self, workflow: impl IntoWorkflow) -> Result<(), PersistenceError> {
        let doc = workflow.into_workflow()?;
        let mut graph = Graph::from_document(&doc, &self.catalog);
        for node in graph.nodes.iter_mut() {
            node.size = self.config.node_size();
            self.ids.observe(node.id);
        }
        tracing::info!(
            "Loaded workflow with {} nodes and {} connections",
            graph.nodes().len(),
            graph.connections().len()
        );
        self.replace_graph(graph);
        self.history.clear();
        Ok(())
    }

    /// Loads a workflow from JSON text. On a parse failure the current graph is
    /// kept and an error notice is raised.
    pub fn load_json(&mut self, json: &str) -> Result<(), PersistenceError> {
        self.load_parsed(WorkflowDocument::from_json(json))
    }

    pub fn load_file(&mut self, path: impl AsRef<Path>) -> Result<(), PersistenceError> {
        self.load_parsed(WorkflowDocument::from_file(path))
    }

    fn load_parsed(&mut self, doc: Result<WorkflowDocument, PersistenceError>) -> Result<(), PersistenceError> {
        match doc {
            Ok(doc) => {
                self.load(doc)?;
                self.notify(NoticeLevel::Success, "Workflow loaded");
                Ok(())
            }
            Err(e) => {
                tracing::error!("Error loading workflow: {}", e);
                self.notify(NoticeLevel::Error, "Error loading workflow file");
                Err(e)
            }
        }
    }

    /// Loads one of the library's featured example graphs.
    pub fn load_example(&mut self, library: &WorkflowLibrary, key: &str) -> Result<(), PersistenceError> {
        let Some(example) = library.featured(key).cloned() else {
            self.notify(NoticeLevel::Error, "Example not found");
            return Err(PersistenceError::ExampleNotFound(key.to_string()));
        };
        let name = example.name.clone();
        self.load(example)?;
        tracing::info!("Loaded example: {}", name);
        self.notify(NoticeLevel::Success, format!("Loaded: {}", name));
        Ok(())
    }

    pub fn fit_to_screen(&mut self, width: f64, height: f64) {
        self.viewport.fit_to_screen(self.graph.nodes(), width, height);
    }
}

use crate::port::{CalculatorDefinition, Port, PortSide, PortType};
use crate::value::{Inputs, Outputs, Value};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Hit radius around a port centre, in canvas units.
pub const PORT_RADIUS: f64 = 12.0;

/// Stable node identity. Connections refer to nodes only through this id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub u64);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Issues time-based ids (epoch milliseconds) that never repeat, even when
/// several nodes are created within the same millisecond. Once `u64::MAX` has
/// been observed the generator keeps returning it.
#[derive(Debug, Clone, Default)]
pub struct NodeIdGenerator {
    last: u64,
}

impl NodeIdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_id(&mut self) -> NodeId {
        let now = Utc::now().timestamp_millis().max(0) as u64;
        self.last = now.max(self.last.saturating_add(1));
        NodeId(self.last)
    }

    /// Ensures ids issued later are greater than `id`. Called for every node
    /// restored from a document.
    pub fn observe(&mut self, id: NodeId) {
        self.last = self.last.max(id.0);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Default for Size {
    fn default() -> Self {
        Self {
            width: 220.0,
            height: 100.0,
        }
    }
}

/// A calculator placed in the workflow.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub id: NodeId,
    pub name: String,
    pub module_key: String,
    pub calc_key: String,
    pub position: Position,
    pub size: Size,
    definition: Arc<CalculatorDefinition>,
    input_ports: Vec<Port>,
    output_ports: Vec<Port>,
    pub input_values: Inputs,
    pub output_values: Outputs,
    pub has_error: bool,
    pub error_message: String,
}

impl Node {
    pub fn new(
        id: NodeId,
        name: &str,
        module_key: &str,
        calc_key: &str,
        position: Position,
        definition: Arc<CalculatorDefinition>,
    ) -> Self {
        let input_ports = definition.input_ports();
        let output_ports = definition.output_ports();
        Self {
            id,
            name: name.to_string(),
            module_key: module_key.to_string(),
            calc_key: calc_key.to_string(),
            position,
            size: Size::default(),
            definition,
            input_ports,
            output_ports,
            input_values: Inputs::new(),
            output_values: Outputs::new(),
            has_error: false,
            error_message: String::new(),
        }
    }

    pub fn with_size(mut self, size: Size) -> Self {
        self.size = size;
        self
    }

    pub fn definition(&self) -> &CalculatorDefinition {
        &self.definition
    }

    pub fn input_ports(&self) -> &[Port] {
        &self.input_ports
    }

    pub fn output_ports(&self) -> &[Port] {
        &self.output_ports
    }

    pub fn input_port(&self, index: usize) -> Option<&Port> {
        self.input_ports.get(index)
    }

    pub fn output_port(&self, index: usize) -> Option<&Port> {
        self.output_ports.get(index)
    }

    pub fn port(&self, side: PortSide, index: usize) -> Option<&Port> {
        match side {
            PortSide::Input => self.input_port(index),
            PortSide::Output => self.output_port(index),
        }
    }

    /// Stores a value for an input port and clears any previous error.
    pub fn set_input(&mut self, name: &str, value: impl Into<Value>) {
        self.input_values.insert(name.to_string(), value.into());
        self.clear_error();
    }

    /// Stores a raw text entry, coerced according to the field's declared type.
    ///
    /// Number fields fall back to `0` when the text does not parse.
    pub fn set_input_raw(&mut self, name: &str, raw: &str) {
        let value = match self.definition.field(name).map(|f| f.field_type) {
            Some(PortType::Number) => Value::Number(raw.trim().parse::<f64>().unwrap_or(0.0)),
            Some(PortType::Checkbox) => Value::Bool(raw.trim() == "true"),
            _ => Value::Text(raw.to_string()),
        };
        self.set_input(name, value);
    }

    pub fn mark_error(&mut self, message: impl Into<String>) {
        self.has_error = true;
        self.error_message = message.into();
    }

    pub fn clear_error(&mut self) {
        self.has_error = false;
        self.error_message.clear();
    }

    pub fn is_at(&self, x: f64, y: f64) -> bool {
        x >= self.position.x
            && x <= self.position.x + self.size.width
            && y >= self.position.y
            && y <= self.position.y + self.size.height
    }

    pub fn input_port_position(&self, index: usize) -> Position {
        let spacing = self.size.height / (self.input_ports.len() + 1) as f64;
        Position::new(self.position.x, self.position.y + spacing * (index + 1) as f64)
    }

    pub fn output_port_position(&self, index: usize) -> Position {
        let spacing = self.size.height / (self.output_ports.len() + 1) as f64;
        Position::new(
            self.position.x + self.size.width,
            self.position.y + spacing * (index + 1) as f64,
        )
    }

    /// Finds the port under a canvas point. Inputs are checked first.
    pub fn port_at(&self, x: f64, y: f64) -> Option<(PortSide, usize)> {
        let hit = |p: Position| ((x - p.x).powi(2) + (y - p.y).powi(2)).sqrt() < PORT_RADIUS;
        (0..self.input_ports.len())
            .find(|&i| hit(self.input_port_position(i)))
            .map(|i| (PortSide::Input, i))
            .or_else(|| {
                (0..self.output_ports.len())
                    .find(|&i| hit(self.output_port_position(i)))
                    .map(|i| (PortSide::Output, i))
            })
    }
}

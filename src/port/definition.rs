use super::types::{Port, PortType};
use serde::{Deserialize, Serialize};

/// One choice of a `select` field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldOption {
    pub value: String,
    pub label: String,
}

/// A calculator input field as declared by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDefinition {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, rename = "type")]
    pub field_type: PortType,
    #[serde(default)]
    pub required: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<FieldOption>,
}

impl FieldDefinition {
    pub fn new(name: &str, label: &str, field_type: PortType, required: bool) -> Self {
        Self {
            name: name.to_string(),
            label: Some(label.to_string()),
            field_type,
            required,
            options: Vec::new(),
        }
    }

    pub fn select(name: &str, label: &str, options: &[(&str, &str)]) -> Self {
        Self {
            name: name.to_string(),
            label: Some(label.to_string()),
            field_type: PortType::Select,
            required: false,
            options: options
                .iter()
                .map(|(value, label)| FieldOption {
                    value: value.to_string(),
                    label: label.to_string(),
                })
                .collect(),
        }
    }

    pub fn display_label(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.name)
    }
}

/// A calculator output as declared by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputDefinition {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, rename = "type")]
    pub output_type: PortType,
}

impl OutputDefinition {
    pub fn new(name: &str, label: &str, output_type: PortType) -> Self {
        Self {
            name: name.to_string(),
            label: Some(label.to_string()),
            output_type,
        }
    }

    pub fn display_label(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.name)
    }
}

/// Field and output metadata for one calculator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculatorDefinition {
    #[serde(default)]
    pub fields: Vec<FieldDefinition>,
    #[serde(default)]
    pub outputs: Vec<OutputDefinition>,
}

impl Default for CalculatorDefinition {
    /// Used for calculators the catalog knows nothing about: a single required
    /// numeric `value` input feeding a generic `result` output.
    fn default() -> Self {
        Self {
            fields: vec![FieldDefinition::new("value", "Value", PortType::Number, true)],
            outputs: Vec::new(),
        }
    }
}

impl CalculatorDefinition {
    pub fn input_ports(&self) -> Vec<Port> {
        derive_input_ports(&self.fields)
    }

    pub fn output_ports(&self) -> Vec<Port> {
        derive_output_ports(&self.outputs)
    }

    pub fn field(&self, name: &str) -> Option<&FieldDefinition> {
        self.fields.iter().find(|f| f.name == name)
    }
}

/// Derives input ports 1:1 from field declarations, preserving order.
pub fn derive_input_ports(fields: &[FieldDefinition]) -> Vec<Port> {
    fields
        .iter()
        .enumerate()
        .map(|(index, field)| Port {
            name: field.name.clone(),
            label: field.display_label().to_string(),
            port_type: field.field_type,
            index,
        })
        .collect()
}

/// Derives output ports 1:1 from output declarations.
///
/// A calculator that declares no outputs exposes a single `result` port of type
/// `object`.
pub fn derive_output_ports(outputs: &[OutputDefinition]) -> Vec<Port> {
    if outputs.is_empty() {
        return vec![Port {
            name: "result".to_string(),
            label: "Result".to_string(),
            port_type: PortType::Object,
            index: 0,
        }];
    }
    outputs
        .iter()
        .enumerate()
        .map(|(index, output)| Port {
            name: output.name.clone(),
            label: output.display_label().to_string(),
            port_type: output.output_type,
            index,
        })
        .collect()
}

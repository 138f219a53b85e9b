use serde::{Deserialize, Serialize};
use std::fmt;

/// The declared type of a port.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PortType {
    #[default]
    Number,
    #[serde(alias = "text")]
    String,
    Select,
    Checkbox,
    Object,
    Any,
}

impl PortType {
    /// Whether an output of this type may feed an input of type `to`.
    ///
    /// Identical types always link, `Any` links with everything, and numbers
    /// widen into string inputs. The reverse (`String -> Number`) is refused.
    pub fn can_feed(self, to: PortType) -> bool {
        self == to
            || self == PortType::Any
            || to == PortType::Any
            || (self == PortType::Number && to == PortType::String)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PortType::Number => "number",
            PortType::String => "string",
            PortType::Select => "select",
            PortType::Checkbox => "checkbox",
            PortType::Object => "object",
            PortType::Any => "any",
        }
    }
}

impl fmt::Display for PortType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which edge of a node a port sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PortSide {
    Input,
    Output,
}

impl fmt::Display for PortSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PortSide::Input => f.write_str("input"),
            PortSide::Output => f.write_str("output"),
        }
    }
}

/// A named, typed connection point on a node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Port {
    pub name: String,
    pub label: String,
    #[serde(rename = "type")]
    pub port_type: PortType,
    pub index: usize,
}

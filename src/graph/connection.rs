use super::node::NodeId;
use crate::port::PortSide;
use serde::{Deserialize, Serialize};

/// A directed edge from an output port to an input port.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Connection {
    pub from_node: NodeId,
    pub from_port: usize,
    pub to_node: NodeId,
    pub to_port: usize,
}

impl Connection {
    pub fn source(&self) -> PortRef {
        PortRef::output(self.from_node, self.from_port)
    }

    pub fn destination(&self) -> PortRef {
        PortRef::input(self.to_node, self.to_port)
    }

    pub fn feeds(&self, node: NodeId, port: usize) -> bool {
        self.to_node == node && self.to_port == port
    }

    pub fn touches(&self, node: NodeId) -> bool {
        self.from_node == node || self.to_node == node
    }
}

/// Addresses one port of one node, typically produced by hit-testing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PortRef {
    pub node: NodeId,
    pub index: usize,
    pub side: PortSide,
}

impl PortRef {
    pub fn output(node: NodeId, index: usize) -> Self {
        Self {
            node,
            index,
            side: PortSide::Output,
        }
    }

    pub fn input(node: NodeId, index: usize) -> Self {
        Self {
            node,
            index,
            side: PortSide::Input,
        }
    }
}

/// What `Graph::create_connection` did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionOutcome {
    pub connection: Connection,
    /// The connection that previously fed the destination port, if any.
    pub replaced: Option<Connection>,
    /// Number of connections now leaving the same source port.
    pub fan_out: usize,
}

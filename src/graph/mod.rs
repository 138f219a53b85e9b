use crate::error::ConnectionError;
use crate::port::PortSide;

mod connection;
mod node;

pub use connection::*;
pub use node::*;

/// The workflow graph: nodes and connections held in two insertion-ordered
/// collections. Connections refer to nodes by `NodeId` only.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Graph {
    pub(crate) nodes: Vec<Node>,
    pub(crate) connections: Vec<Connection>,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn connections(&self) -> &[Connection] {
        &self.connections
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.iter().find(|n| n.id == id)
    }

    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.iter_mut().find(|n| n.id == id)
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.node(id).is_some()
    }

    /// Topmost node under a canvas point (later nodes draw above earlier ones).
    pub fn node_at(&self, x: f64, y: f64) -> Option<&Node> {
        self.nodes.iter().rev().find(|n| n.is_at(x, y))
    }

    pub fn add_node(&mut self, node: Node) -> NodeId {
        let id = node.id;
        self.nodes.push(node);
        id
    }

    /// Removes a node together with every connection touching it.
    pub fn remove_node(&mut self, id: NodeId) -> Option<Node> {
        let pos = self.nodes.iter().position(|n| n.id == id)?;
        self.connections.retain(|c| !c.touches(id));
        Some(self.nodes.remove(pos))
    }

    pub fn clear(&mut self) {
        self.nodes.clear();
        self.connections.clear();
    }

    pub fn incoming(&self, node: NodeId) -> impl Iterator<Item = &Connection> {
        self.connections.iter().filter(move |c| c.to_node == node)
    }

    pub fn outgoing(&self, node: NodeId) -> impl Iterator<Item = &Connection> {
        self.connections.iter().filter(move |c| c.from_node == node)
    }

    /// Number of connections leaving `(node, port)`.
    pub fn fan_out(&self, node: NodeId, port: usize) -> usize {
        self.connections
            .iter()
            .filter(|c| c.from_node == node && c.from_port == port)
            .count()
    }

    /// Whether some connection already feeds the destination port.
    pub fn input_occupied(&self, to: PortRef) -> bool {
        self.connections.iter().any(|c| c.feeds(to.node, to.index))
    }

    /// Validates a candidate connection from `from` to `to`.
    pub fn check_connection(&self, from: PortRef, to: PortRef) -> Result<(), ConnectionError> {
        if from.side != PortSide::Output || to.side != PortSide::Input {
            return Err(ConnectionError::WrongDirection {
                from: from.side,
                to: to.side,
            });
        }
        let source = self
            .node(from.node)
            .ok_or(ConnectionError::UnknownNode(from.node))?;
        let destination = self
            .node(to.node)
            .ok_or(ConnectionError::UnknownNode(to.node))?;
        if from.node == to.node {
            return Err(ConnectionError::SelfLoop);
        }

        let from_port = source
            .output_port(from.index)
            .ok_or(ConnectionError::PortOutOfRange {
                node: from.node,
                side: PortSide::Output,
                index: from.index,
            })?;
        let to_port = destination
            .input_port(to.index)
            .ok_or(ConnectionError::PortOutOfRange {
                node: to.node,
                side: PortSide::Input,
                index: to.index,
            })?;

        let duplicate = self.connections.iter().any(|c| {
            c.from_node == from.node
                && c.from_port == from.index
                && c.to_node == to.node
                && c.to_port == to.index
        });
        if duplicate {
            return Err(ConnectionError::Duplicate);
        }

        if !from_port.port_type.can_feed(to_port.port_type) {
            return Err(ConnectionError::IncompatibleTypes {
                from: from_port.port_type,
                to: to_port.port_type,
            });
        }
        Ok(())
    }

    pub fn can_connect(&self, from: PortRef, to: PortRef) -> bool {
        self.check_connection(from, to).is_ok()
    }

    /// Links `from` to `to`, replacing whatever previously fed `to`.
    pub fn create_connection(
        &mut self,
        from: PortRef,
        to: PortRef,
    ) -> Result<ConnectionOutcome, ConnectionError> {
        self.check_connection(from, to)?;

        let replaced = self
            .connections
            .iter()
            .position(|c| c.feeds(to.node, to.index))
            .map(|pos| self.connections.remove(pos));

        let connection = Connection {
            from_node: from.node,
            from_port: from.index,
            to_node: to.node,
            to_port: to.index,
        };
        self.connections.push(connection);
        let fan_out = self.fan_out(from.node, from.index);

        tracing::debug!(
            "Connected {}[{}] -> {}[{}] (fan-out {})",
            from.node,
            from.index,
            to.node,
            to.index,
            fan_out
        );

        Ok(ConnectionOutcome {
            connection,
            replaced,
            fan_out,
        })
    }

    /// Shorthand for `create_connection` with output/input port indices.
    pub fn connect(
        &mut self,
        from_node: NodeId,
        from_port: usize,
        to_node: NodeId,
        to_port: usize,
    ) -> Result<ConnectionOutcome, ConnectionError> {
        self.create_connection(
            PortRef::output(from_node, from_port),
            PortRef::input(to_node, to_port),
        )
    }

    pub fn remove_connection(&mut self, connection: &Connection) -> bool {
        let before = self.connections.len();
        self.connections.retain(|c| c != connection);
        self.connections.len() != before
    }
}

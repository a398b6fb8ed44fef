//! The mutable node/connection graph.
//!
//! Nodes are kept in id order, which is also insertion order since ids are
//! never reused. Every connection runs from an output port to an input port,
//! and an input port has at most one incoming connection.

use crate::pipeline::error::{PipelineError, PipelineResult};
use crate::pipeline::id::NodeId;
use crate::pipeline::node::{Node, Position};
use crate::pipeline::node_type::NodeKind;
use crate::pipeline::port::{PortAddress, PortDescriptor, PortDirection};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A directed edge from an output port to an input port.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Connection {
    pub from: PortAddress,
    pub to: PortAddress,
}

impl Connection {
    pub fn new(from: PortAddress, to: PortAddress) -> Self {
        Self { from, to }
    }

    /// True if either endpoint is on `node_id`.
    pub fn touches(&self, node_id: NodeId) -> bool {
        self.from.node_id == node_id || self.to.node_id == node_id
    }
}

impl std::fmt::Display for Connection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -> {}", self.from, self.to)
    }
}

/// A byte-transform graph.
#[derive(Debug, Clone, Default)]
pub struct Graph {
    nodes: BTreeMap<NodeId, Node>,
    connections: Vec<Connection>,
    next_id: NodeId,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    // ── Nodes ──

    /// Add a node of `kind` named after the kind.
    pub fn add_node(&mut self, kind: NodeKind) -> NodeId {
        self.add_named_node(kind, kind.display_name())
    }

    /// Add a node of `kind`. The name is made unique within the graph.
    pub fn add_named_node(&mut self, kind: NodeKind, name: &str) -> NodeId {
        let id = self.next_id;
        self.next_id = id.next();

        let name = self.unique_name(name, None);
        tracing::debug!("Added node {:?} '{}' of kind {:?}", id, name, kind);
        self.nodes.insert(id, Node::new(id, kind, name));
        id
    }

    /// Remove a node and every connection touching it.
    pub fn remove_node(&mut self, node_id: NodeId) -> PipelineResult<Node> {
        if !self.nodes.contains_key(&node_id) {
            return Err(PipelineError::NodeNotFound(node_id));
        }

        let before = self.connections.len();
        self.connections.retain(|c| !c.touches(node_id));
        let dropped = before - self.connections.len();

        let node = self
            .nodes
            .remove(&node_id)
            .ok_or(PipelineError::NodeNotFound(node_id))?;
        tracing::debug!(
            "Removed node {:?} '{}' and {} connection(s)",
            node_id,
            node.name(),
            dropped
        );
        Ok(node)
    }

    pub fn node(&self, node_id: NodeId) -> Option<&Node> {
        self.nodes.get(&node_id)
    }

    pub fn node_mut(&mut self, node_id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(&node_id)
    }

    fn require(&self, node_id: NodeId) -> PipelineResult<&Node> {
        self.node(node_id)
            .ok_or(PipelineError::NodeNotFound(node_id))
    }

    fn require_mut(&mut self, node_id: NodeId) -> PipelineResult<&mut Node> {
        self.node_mut(node_id)
            .ok_or(PipelineError::NodeNotFound(node_id))
    }

    /// All nodes in id order.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }

    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes.keys().copied()
    }

    pub fn node_by_name(&self, name: &str) -> Option<&Node> {
        self.nodes.values().find(|n| n.name() == name)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Source nodes in id order.
    pub fn sources(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values().filter(|n| n.kind().is_source())
    }

    /// Sink nodes in id order.
    pub fn sinks(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values().filter(|n| n.kind().is_sink())
    }

    /// Rename a node. Returns the name actually assigned, which may carry a
    /// numeric suffix if `name` is taken.
    pub fn rename_node(&mut self, node_id: NodeId, name: &str) -> PipelineResult<String> {
        self.require(node_id)?;
        let name = self.unique_name(name, Some(node_id));
        self.require_mut(node_id)?.set_name(name.clone());
        tracing::debug!("Renamed node {:?} to '{}'", node_id, name);
        Ok(name)
    }

    pub fn set_position(&mut self, node_id: NodeId, position: Position) -> PipelineResult<()> {
        let node = self.require_mut(node_id)?;
        if !position.is_finite() {
            return Err(PipelineError::InvalidPosition {
                node_id,
                x: position.x,
                y: position.y,
            });
        }
        node.set_position(position);
        Ok(())
    }

    // ── Parameters ──

    pub fn param(&self, node_id: NodeId, name: &str) -> Option<&str> {
        self.node(node_id)?.param(name)
    }

    pub fn set_param(
        &mut self,
        node_id: NodeId,
        name: &str,
        value: impl Into<String>,
    ) -> PipelineResult<()> {
        let value = value.into();
        tracing::debug!("Set {:?}.{} = {:?}", node_id, name, value);
        self.require_mut(node_id)?.set_param(name, value)
    }

    /// True when the input port that shadows `param` is connected, i.e. the
    /// parameter is currently ignored.
    pub fn is_parameter_shadowed(&self, node_id: NodeId, param: &str) -> bool {
        let Some(node) = self.node(node_id) else {
            return false;
        };
        node.kind()
            .input_ports()
            .filter(|p| p.shadows == Some(param))
            .any(|p| self.input_connection(node_id, p.name).is_some())
    }

    // ── Connections ──

    pub fn connections(&self) -> &[Connection] {
        &self.connections
    }

    fn port(
        &self,
        node_id: NodeId,
        port: &str,
        expected: PortDirection,
    ) -> PipelineResult<&'static PortDescriptor> {
        let node = self.require(node_id)?;
        let descriptor = node
            .kind()
            .port(port)
            .ok_or_else(|| PipelineError::PortNotFound {
                node_id,
                port: port.to_string(),
            })?;
        if descriptor.direction != expected {
            return Err(PipelineError::PortDirection {
                node_id,
                port: port.to_string(),
                expected,
            });
        }
        Ok(descriptor)
    }

    /// Connect `from.from_port` (an output) to `to.to_port` (an input).
    ///
    /// Any existing connection into `to_port` is replaced and returned.
    pub fn connect(
        &mut self,
        from: NodeId,
        from_port: &str,
        to: NodeId,
        to_port: &str,
    ) -> PipelineResult<Option<Connection>> {
        let from_desc = self.port(from, from_port, PortDirection::Output)?;
        let to_desc = self.port(to, to_port, PortDirection::Input)?;

        let replaced = self.disconnect_input(to, to_desc.name);
        let connection = Connection::new(
            PortAddress::new(from, from_desc.name),
            PortAddress::new(to, to_desc.name),
        );
        tracing::debug!("Connected {}", connection);
        self.connections.push(connection);
        Ok(replaced)
    }

    /// Remove a specific connection.
    pub fn disconnect(&mut self, connection: &Connection) -> PipelineResult<()> {
        let index = self
            .connections
            .iter()
            .position(|c| c == connection)
            .ok_or_else(|| PipelineError::ConnectionNotFound {
                from: connection.from.clone(),
                to: connection.to.clone(),
            })?;
        self.connections.remove(index);
        tracing::debug!("Disconnected {}", connection);
        Ok(())
    }

    /// Remove whatever is connected into an input port.
    pub fn disconnect_input(&mut self, node_id: NodeId, port: &str) -> Option<Connection> {
        let index = self
            .connections
            .iter()
            .position(|c| c.to.node_id == node_id && c.to.port_name == port)?;
        let removed = self.connections.remove(index);
        tracing::debug!("Disconnected {}", removed);
        Some(removed)
    }

    /// The connection feeding an input port, if any.
    pub fn input_connection(&self, node_id: NodeId, port: &str) -> Option<&Connection> {
        self.connections
            .iter()
            .find(|c| c.to.node_id == node_id && c.to.port_name == port)
    }

    /// Connections leaving an output port.
    pub fn output_connections<'a>(
        &'a self,
        node_id: NodeId,
        port: &'a str,
    ) -> impl Iterator<Item = &'a Connection> + 'a {
        self.connections
            .iter()
            .filter(move |c| c.from.node_id == node_id && c.from.port_name == port)
    }

    pub fn is_port_connected(&self, node_id: NodeId, port: &str) -> bool {
        self.input_connection(node_id, port).is_some()
            || self.output_connections(node_id, port).next().is_some()
    }

    /// Collapse whitespace and append ` 1`, ` 2`, ... until no other node
    /// carries the name.
    fn unique_name(&self, requested: &str, exclude: Option<NodeId>) -> String {
        let collapsed = requested.split_whitespace().collect::<Vec<_>>().join(" ");
        let taken = |candidate: &str| {
            self.nodes
                .values()
                .any(|n| Some(n.id()) != exclude && n.name() == candidate)
        };
        if !taken(&collapsed) {
            return collapsed;
        }

        let base = match collapsed.rsplit_once(' ') {
            Some((head, tail)) if tail.chars().all(|c| c.is_ascii_digit()) => head,
            _ => collapsed.as_str(),
        };
        (1u32..)
            .map(|i| format!("{base} {i}"))
            .find(|candidate| !taken(candidate))
            .unwrap_or(collapsed.clone())
    }

    /// `Input Text -> XOR Encrypt -> Result`, the graph a new editor opens with.
    pub fn demo() -> Self {
        let mut graph = Graph::new();
        let input = graph.add_named_node(NodeKind::TextInput, "Input Text");
        let xor = graph.add_named_node(NodeKind::Xor, "XOR Encrypt");
        let output = graph.add_named_node(NodeKind::Output, "Result");

        if let Err(e) = wire_demo(&mut graph, input, xor, output) {
            tracing::warn!("Demo graph is incomplete: {}", e);
        }
        graph
    }
}

fn wire_demo(graph: &mut Graph, input: NodeId, xor: NodeId, output: NodeId) -> PipelineResult<()> {
    graph.set_param(input, "text_data", "Hello ByteFlow!")?;
    graph.set_param(xor, "key_hex", "FF")?;
    graph.set_position(input, Position::new(-300.0, 0.0))?;
    graph.set_position(xor, Position::new(0.0, 0.0))?;
    graph.set_position(output, Position::new(300.0, 0.0))?;
    graph.connect(input, "output", xor, "data")?;
    graph.connect(xor, "output", output, "input")?;
    Ok(())
}

//! Node instances and the context handed to transforms.
//!
//! A [`Node`] is one instance of a catalog [`NodeKind`]: it owns the current
//! parameter values, the editor position, and (for sinks) the last buffer
//! captured by a full resolution pass. Transforms never see the node
//! directly; the engine wraps it in a [`NodeContext`] together with the
//! buffers gathered from its inputs.

use crate::pipeline::error::{PipelineError, PipelineResult};
use crate::pipeline::id::NodeId;
use crate::pipeline::node_type::{NodeKind, NodeRole};
use serde::{Deserialize, Serialize};

/// Editor position. Carried through save/load, never interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// NaN and infinities have no JSON form, so only finite positions are
    /// stored.
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// Presentation cache kept by sink nodes.
///
/// Written after each full resolution pass; never read by the engine.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SinkState {
    data: Vec<u8>,
    preview: Vec<u8>,
}

impl SinkState {
    pub(crate) fn capture(data: Vec<u8>, preview_len: usize) -> Self {
        let preview = data[..data.len().min(preview_len)].to_vec();
        Self { data, preview }
    }

    /// The full buffer from the last pass.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// The first `preview_len` bytes of the buffer.
    pub fn preview(&self) -> &[u8] {
        &self.preview
    }

    pub fn is_truncated(&self) -> bool {
        self.preview.len() < self.data.len()
    }
}

/// A node in a graph.
#[derive(Debug, Clone)]
pub struct Node {
    id: NodeId,
    kind: NodeKind,
    name: String,
    /// Values parallel to `kind.parameters()`.
    values: Vec<String>,
    position: Position,
    sink: Option<SinkState>,
}

impl Node {
    /// Instantiate `kind` with catalog defaults.
    pub(crate) fn new(id: NodeId, kind: NodeKind, name: String) -> Self {
        Self {
            id,
            kind,
            name,
            values: kind
                .parameters()
                .iter()
                .map(|p| p.default.to_string())
                .collect(),
            position: Position::default(),
            sink: None,
        }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    pub fn role(&self) -> NodeRole {
        self.kind.role()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn set_name(&mut self, name: String) {
        self.name = name;
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub(crate) fn set_position(&mut self, position: Position) {
        self.position = position;
    }

    /// Current value of a parameter.
    pub fn param(&self, name: &str) -> Option<&str> {
        self.param_index(name).map(|i| self.values[i].as_str())
    }

    /// Set a parameter. Values are stored verbatim; parsing happens at
    /// evaluation time and falls back to defaults.
    pub fn set_param(&mut self, name: &str, value: impl Into<String>) -> PipelineResult<()> {
        let index = self
            .param_index(name)
            .ok_or_else(|| PipelineError::UnknownParameter {
                node_id: self.id,
                name: name.to_string(),
            })?;
        self.values[index] = value.into();
        Ok(())
    }

    /// Reset a parameter to its catalog default.
    pub fn reset_param(&mut self, name: &str) -> PipelineResult<()> {
        let default = self
            .kind
            .parameter(name)
            .map(|p| p.default)
            .ok_or_else(|| PipelineError::UnknownParameter {
                node_id: self.id,
                name: name.to_string(),
            })?;
        self.set_param(name, default)
    }

    /// `(name, value)` pairs in catalog order.
    pub fn params(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.kind
            .parameters()
            .iter()
            .zip(self.values.iter())
            .map(|(p, v)| (p.name, v.as_str()))
    }

    /// Last captured buffer, for sink nodes that have been resolved.
    pub fn sink_state(&self) -> Option<&SinkState> {
        self.sink.as_ref()
    }

    pub(crate) fn capture_sink(&mut self, data: Vec<u8>, preview_len: usize) {
        if self.kind.is_sink() {
            self.sink = Some(SinkState::capture(data, preview_len));
        }
    }

    fn param_index(&self, name: &str) -> Option<usize> {
        self.kind.parameters().iter().position(|p| p.name == name)
    }
}

/// Buffers gathered for a node's input ports.
///
/// `None` marks a disconnected port; it reads as an empty buffer.
#[derive(Debug, Default)]
pub struct InputBuffers {
    entries: Vec<(&'static str, Option<Vec<u8>>)>,
}

impl InputBuffers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, port: &'static str, buffer: Option<Vec<u8>>) {
        self.entries.push((port, buffer));
    }

    /// Builder-style `push` for a connected port.
    pub fn with(mut self, port: &'static str, buffer: impl Into<Vec<u8>>) -> Self {
        self.push(port, Some(buffer.into()));
        self
    }

    pub fn get(&self, port: &str) -> &[u8] {
        self.entries
            .iter()
            .find(|(name, _)| *name == port)
            .and_then(|(_, buf)| buf.as_deref())
            .unwrap_or(&[])
    }
}

/// Context passed to a transform invocation.
pub struct NodeContext<'a> {
    /// The node being evaluated.
    pub node: &'a Node,
    /// Resolved buffers for the node's input ports.
    pub inputs: &'a InputBuffers,
}

impl<'a> NodeContext<'a> {
    pub fn new(node: &'a Node, inputs: &'a InputBuffers) -> Self {
        Self { node, inputs }
    }

    pub fn kind(&self) -> NodeKind {
        self.node.kind()
    }

    /// Buffer on an input port; empty when disconnected.
    pub fn input(&self, port: &str) -> &'a [u8] {
        self.inputs.get(port)
    }

    /// Current parameter value; empty when the kind has no such parameter.
    pub fn param(&self, name: &str) -> &'a str {
        self.node.param(name).unwrap_or("")
    }
}

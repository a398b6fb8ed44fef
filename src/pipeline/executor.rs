//! Evaluation engine: recursive, unmemoized pull resolution.
//!
//! Resolving a node resolves every connected input from scratch and then
//! runs the node's transform. Nothing is cached, not even within one pass:
//! a node feeding two consumers runs twice, and a File Input is re-read each
//! time it is pulled.
//!
//! Transform failures never escape. The failing node yields an empty buffer
//! and a [`Diagnostic`] goes to the injected [`DiagnosticSink`]. The only
//! error that unwinds a resolution is a cycle: a node reached again while it
//! is still on the current resolution path. [`Evaluator::resolve_sink`] turns
//! it into an empty buffer plus a structural diagnostic. Acyclic graphs are
//! never cut short, however deep.

use crate::config::EngineConfig;
use crate::pipeline::diagnostics::{Diagnostic, DiagnosticKind, DiagnosticSink};
use crate::pipeline::error::{PipelineError, PipelineResult};
use crate::pipeline::graph::Graph;
use crate::pipeline::id::NodeId;
use crate::pipeline::node::{InputBuffers, Node, NodeContext};
use crate::pipeline::nodes;
use crate::pipeline::port::{PortAddress, PortDirection};

/// Resolves buffers on a borrowed graph.
pub struct Evaluator<'a> {
    graph: &'a Graph,
    diagnostics: &'a mut dyn DiagnosticSink,
    /// Nodes whose resolution is in progress, outermost first.
    path: Vec<NodeId>,
}

impl<'a> Evaluator<'a> {
    pub fn new(graph: &'a Graph, diagnostics: &'a mut dyn DiagnosticSink) -> Self {
        Self {
            graph,
            diagnostics,
            path: Vec::new(),
        }
    }

    /// Compute the buffer on an output port.
    pub fn resolve_port(&mut self, address: &PortAddress) -> PipelineResult<Vec<u8>> {
        let node = self
            .graph
            .node(address.node_id)
            .ok_or(PipelineError::NodeNotFound(address.node_id))?;
        let port = node
            .kind()
            .port(&address.port_name)
            .ok_or_else(|| PipelineError::PortNotFound {
                node_id: address.node_id,
                port: address.port_name.clone(),
            })?;
        if !port.is_output() {
            return Err(PipelineError::PortDirection {
                node_id: address.node_id,
                port: address.port_name.clone(),
                expected: PortDirection::Output,
            });
        }
        self.run_node(address.node_id)
    }

    /// Compute the buffer a node produces. For a sink this is the buffer it
    /// would capture.
    pub fn resolve_node(&mut self, node_id: NodeId) -> PipelineResult<Vec<u8>> {
        self.run_node(node_id)
    }

    /// Resolve a sink, converting a detected cycle into an empty buffer and a
    /// structural diagnostic.
    pub fn resolve_sink(&mut self, node_id: NodeId) -> Vec<u8> {
        match self.run_node(node_id) {
            Ok(data) => data,
            Err(e) => {
                let name = self
                    .graph
                    .node(node_id)
                    .map(|n| n.name().to_string())
                    .unwrap_or_default();
                tracing::warn!("Resolution of '{}' ({}) aborted: {}", name, node_id, e);
                self.diagnostics.record(Diagnostic {
                    node_id,
                    node_name: name,
                    kind: DiagnosticKind::Structural,
                    message: e.to_string(),
                });
                Vec::new()
            }
        }
    }

    fn run_node(&mut self, node_id: NodeId) -> PipelineResult<Vec<u8>> {
        if self.path.contains(&node_id) {
            return Err(PipelineError::Cycle { node_id });
        }
        let node = self
            .graph
            .node(node_id)
            .ok_or(PipelineError::NodeNotFound(node_id))?;

        self.path.push(node_id);
        let inputs = self.gather_inputs(node);
        self.path.pop();

        Ok(self.invoke(node, &inputs?))
    }

    fn gather_inputs(&mut self, node: &Node) -> PipelineResult<InputBuffers> {
        let mut inputs = InputBuffers::new();
        if node.kind().is_source() {
            return Ok(inputs);
        }
        for port in node.kind().input_ports() {
            let buffer = match self.graph.input_connection(node.id(), port.name) {
                Some(conn) => Some(self.run_node(conn.from.node_id)?),
                None => None,
            };
            inputs.push(port.name, buffer);
        }
        Ok(inputs)
    }

    fn invoke(&mut self, node: &Node, inputs: &InputBuffers) -> Vec<u8> {
        let ctx = NodeContext::new(node, inputs);
        match nodes::transform(&ctx) {
            Ok(data) => {
                tracing::trace!("{} '{}' produced {} bytes", node.id(), node.name(), data.len());
                data
            }
            Err(e) => {
                tracing::warn!("{} '{}' failed: {}", node.id(), node.name(), e);
                self.diagnostics.record(Diagnostic {
                    node_id: node.id(),
                    node_name: node.name().to_string(),
                    kind: e.diagnostic_kind(),
                    message: e.to_string(),
                });
                Vec::new()
            }
        }
    }
}

impl Graph {
    /// Resolve every sink in node order, each independently, and refresh
    /// each sink's cached buffer and preview.
    pub fn resolve_all_sinks(
        &mut self,
        diagnostics: &mut dyn DiagnosticSink,
        config: &EngineConfig,
    ) -> Vec<(NodeId, Vec<u8>)> {
        let sink_ids: Vec<NodeId> = self.sinks().map(Node::id).collect();

        let results: Vec<(NodeId, Vec<u8>)> = {
            let mut evaluator = Evaluator::new(self, diagnostics);
            sink_ids
                .into_iter()
                .map(|id| (id, evaluator.resolve_sink(id)))
                .collect()
        };

        for (id, data) in &results {
            if let Some(node) = self.node_mut(*id) {
                node.capture_sink(data.clone(), config.preview_len);
            }
        }
        tracing::debug!("Resolved {} sink(s)", results.len());
        results
    }
}

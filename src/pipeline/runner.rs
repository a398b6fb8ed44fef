//! Headless pipeline runner.
//!
//! [`Pipeline`] wraps a [`Graph`] for scripted use: load a document, feed
//! named source nodes, resolve every sink and collect the results by sink
//! name.
//!
//! ```ignore
//! let mut pipeline = Pipeline::open("graph.json")?;
//! let results = pipeline.execute(Some("Hello".as_bytes()), &[("Key", [0xffu8].as_slice())])?;
//! for (name, data) in &results {
//!     println!("{name}: {}", hex::encode(data));
//! }
//! ```

use crate::config::EngineConfig;
use crate::pipeline::diagnostics::DiagnosticLog;
use crate::pipeline::error::{PipelineError, PipelineResult};
use crate::pipeline::graph::Graph;
use crate::pipeline::id::NodeId;
use crate::pipeline::node::Node;
use crate::pipeline::node_type::NodeKind;
use std::collections::BTreeMap;
use std::path::Path;

/// A graph plus the state needed to run it headlessly.
#[derive(Debug, Default)]
pub struct Pipeline {
    graph: Graph,
    config: EngineConfig,
    diagnostics: DiagnosticLog,
}

impl Pipeline {
    /// An empty pipeline with default engine settings.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: EngineConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn from_graph(graph: Graph) -> Self {
        Self {
            graph,
            ..Self::default()
        }
    }

    /// Open a saved graph.
    pub fn open(path: impl AsRef<Path>) -> PipelineResult<Self> {
        Ok(Self::from_graph(Graph::load(path)?))
    }

    /// Replace the current graph with one loaded from `path`. On error the
    /// current graph is left untouched.
    pub fn load(&mut self, path: impl AsRef<Path>) -> PipelineResult<()> {
        let graph = Graph::load(path)?;
        self.graph = graph;
        self.diagnostics.clear();
        Ok(())
    }

    pub fn save(&self, path: impl AsRef<Path>) -> PipelineResult<()> {
        self.graph.save(path)
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    pub fn graph_mut(&mut self) -> &mut Graph {
        &mut self.graph
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: EngineConfig) {
        self.config = config;
    }

    /// Diagnostics from the most recent [`execute`](Self::execute).
    pub fn diagnostics(&self) -> &DiagnosticLog {
        &self.diagnostics
    }

    /// Names of source nodes, in node order.
    pub fn input_nodes(&self) -> Vec<&str> {
        self.graph.sources().map(Node::name).collect()
    }

    /// Names of sink nodes, in node order.
    pub fn output_nodes(&self) -> Vec<&str> {
        self.graph.sinks().map(Node::name).collect()
    }

    /// Feed bytes to a source node by name.
    ///
    /// Hex Input receives the bytes as hex text, Text Input as UTF-8 text,
    /// and File Input as a path.
    pub fn set_input(&mut self, name: &str, data: &[u8]) -> PipelineResult<()> {
        let node = self
            .graph
            .node_by_name(name)
            .ok_or_else(|| PipelineError::UnknownInput {
                name: name.to_string(),
                available: self.input_nodes().into_iter().map(String::from).collect(),
            })?;
        let node_id = node.id();
        let kind = node.kind();
        let param = kind
            .input_parameter()
            .ok_or_else(|| PipelineError::NotASource(name.to_string()))?;

        let value = match kind {
            NodeKind::HexInput => hex::encode(data),
            _ => String::from_utf8(data.to_vec()).map_err(|e| PipelineError::InvalidInput {
                name: name.to_string(),
                message: format!("{} expects UTF-8: {}", kind.display_name(), e),
            })?,
        };
        self.graph.set_param(node_id, param, value)
    }

    /// Feed several inputs. A name with no exact match is retried with
    /// underscores read as spaces, so `input_text` reaches `Input Text`.
    pub fn set_inputs(&mut self, inputs: &[(&str, &[u8])]) -> PipelineResult<()> {
        for (name, data) in inputs {
            let resolved = self.resolve_input_name(name);
            self.set_input(&resolved, data)?;
        }
        Ok(())
    }

    fn resolve_input_name(&self, name: &str) -> String {
        if self.graph.node_by_name(name).is_some() {
            return name.to_string();
        }
        let spaced = name.replace('_', " ");
        if self.graph.node_by_name(&spaced).is_some() {
            spaced
        } else {
            name.to_string()
        }
    }

    /// First Text Input in node order.
    fn default_input(&self) -> Option<NodeId> {
        self.graph
            .sources()
            .find(|n| n.kind() == NodeKind::TextInput)
            .map(Node::id)
    }

    /// Run the graph and return every sink's buffer keyed by sink name.
    ///
    /// Named inputs are applied first. `default` then goes to the first Text
    /// Input as UTF-8 text; with no Text Input it is ignored.
    pub fn execute(
        &mut self,
        default: Option<&[u8]>,
        inputs: &[(&str, &[u8])],
    ) -> PipelineResult<BTreeMap<String, Vec<u8>>> {
        self.set_inputs(inputs)?;

        if let Some(data) = default {
            match self.default_input() {
                Some(id) => {
                    let text = String::from_utf8(data.to_vec()).map_err(|e| {
                        PipelineError::InvalidInput {
                            name: "default input".to_string(),
                            message: e.to_string(),
                        }
                    })?;
                    self.graph.set_param(id, "text_data", text)?;
                }
                None => tracing::warn!("Default input given but the graph has no Text Input"),
            }
        }

        self.diagnostics.clear();
        let results = self
            .graph
            .resolve_all_sinks(&mut self.diagnostics, &self.config);
        if !self.diagnostics.is_empty() {
            tracing::info!("Run finished with {} diagnostic(s)", self.diagnostics.len());
        }

        Ok(results
            .into_iter()
            .filter_map(|(id, data)| {
                self.graph
                    .node(id)
                    .map(|node| (node.name().to_string(), data))
            })
            .collect())
    }
}

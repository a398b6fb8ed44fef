//! Persisted graph documents.
//!
//! A document is a JSON object listing nodes and connections:
//!
//! ```json
//! {
//!   "version": 1,
//!   "nodes": [
//!     { "id": 0, "kind": "byteflow.io.TextInputNode", "name": "Text Input",
//!       "parameters": { "text_data": "Test" }, "position": { "x": 0.0, "y": 0.0 } }
//!   ],
//!   "connections": [
//!     { "from": { "nodeId": 0, "portName": "output" },
//!       "to": { "nodeId": 1, "portName": "data" } }
//!   ]
//! }
//! ```
//!
//! Loading is all-or-nothing: the graph is built off to the side and only
//! returned once every node and connection has been accepted.

use crate::pipeline::error::{PipelineError, PipelineResult};
use crate::pipeline::graph::{Connection, Graph};
use crate::pipeline::id::NodeId;
use crate::pipeline::node::Position;
use crate::pipeline::node_type::NodeKind;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap, HashSet};
use std::path::Path;

/// Current document format version.
pub const DOCUMENT_VERSION: u32 = 1;

fn default_document_version() -> u32 {
    DOCUMENT_VERSION
}

/// One node in a persisted graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeRecord {
    pub id: u32,
    /// Catalog type id, e.g. `byteflow.crypto.XORNode`.
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub parameters: BTreeMap<String, String>,
    #[serde(default)]
    pub position: Position,
}

/// A persisted graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphDocument {
    #[serde(default = "default_document_version")]
    pub version: u32,
    #[serde(default)]
    pub nodes: Vec<NodeRecord>,
    #[serde(default)]
    pub connections: Vec<Connection>,
}

impl GraphDocument {
    /// Snapshot a graph.
    pub fn from_graph(graph: &Graph) -> Self {
        let nodes = graph
            .nodes()
            .map(|node| NodeRecord {
                id: node.id().0,
                kind: node.kind().type_id().to_string(),
                name: Some(node.name().to_string()),
                parameters: node
                    .params()
                    .map(|(k, v)| (k.to_string(), v.to_string()))
                    .collect(),
                position: node.position(),
            })
            .collect();

        Self {
            version: DOCUMENT_VERSION,
            nodes,
            connections: graph.connections().to_vec(),
        }
    }

    /// Build a graph from this document.
    ///
    /// Parameters missing from a record keep their catalog defaults; unknown
    /// parameters are skipped with a warning. Node ids are renumbered.
    pub fn into_graph(self) -> PipelineResult<Graph> {
        if self.version > DOCUMENT_VERSION {
            return Err(PipelineError::IncompatibleVersion {
                found: self.version,
                supported: DOCUMENT_VERSION,
            });
        }

        // Validate everything structural before building anything.
        let mut kinds = Vec::with_capacity(self.nodes.len());
        let mut seen = HashSet::with_capacity(self.nodes.len());
        for record in &self.nodes {
            let kind = NodeKind::from_type_id(&record.kind)
                .ok_or_else(|| PipelineError::UnknownNodeKind(record.kind.clone()))?;
            if !seen.insert(record.id) {
                return Err(PipelineError::DuplicateNodeId(record.id));
            }
            kinds.push(kind);
        }
        for conn in &self.connections {
            for end in [&conn.from, &conn.to] {
                if !seen.contains(&end.node_id.0) {
                    return Err(PipelineError::DanglingConnection(end.node_id.0));
                }
            }
        }

        let mut graph = Graph::new();
        let mut remap: HashMap<u32, NodeId> = HashMap::with_capacity(self.nodes.len());
        for (record, kind) in self.nodes.into_iter().zip(kinds) {
            let name = record.name.as_deref().unwrap_or(kind.display_name());
            let id = graph.add_named_node(kind, name);
            remap.insert(record.id, id);

            for (param, value) in record.parameters {
                if kind.parameter(&param).is_some() {
                    graph.set_param(id, &param, value)?;
                } else {
                    tracing::warn!(
                        "Ignoring unknown parameter '{}' on {} node {}",
                        param,
                        kind.type_id(),
                        record.id
                    );
                }
            }
            graph.set_position(id, record.position)?;
        }

        for conn in self.connections {
            let from = remap
                .get(&conn.from.node_id.0)
                .copied()
                .ok_or(PipelineError::DanglingConnection(conn.from.node_id.0))?;
            let to = remap
                .get(&conn.to.node_id.0)
                .copied()
                .ok_or(PipelineError::DanglingConnection(conn.to.node_id.0))?;
            graph.connect(from, &conn.from.port_name, to, &conn.to.port_name)?;
        }

        Ok(graph)
    }

    pub fn to_json(&self) -> PipelineResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> PipelineResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: impl AsRef<Path>) -> PipelineResult<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_json(&content)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> PipelineResult<()> {
        std::fs::write(path.as_ref(), self.to_json()?)?;
        Ok(())
    }
}

impl Graph {
    /// Load a graph document from disk.
    pub fn load(path: impl AsRef<Path>) -> PipelineResult<Graph> {
        let path = path.as_ref();
        let graph = GraphDocument::load(path)?.into_graph()?;
        tracing::info!(
            "Loaded graph from {} ({} nodes, {} connections)",
            path.display(),
            graph.len(),
            graph.connections().len()
        );
        Ok(graph)
    }

    /// Save this graph as a document.
    pub fn save(&self, path: impl AsRef<Path>) -> PipelineResult<()> {
        let path = path.as_ref();
        GraphDocument::from_graph(self).save(path)?;
        tracing::info!("Saved graph to {}", path.display());
        Ok(())
    }
}

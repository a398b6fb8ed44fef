//! Pipeline-specific error types.
//!
//! [`PipelineError`] covers structural problems (bad wiring, unknown kinds,
//! malformed documents) and is returned to callers. [`TransformError`] is a
//! failure inside a single node; the engine turns it into an empty output
//! plus a diagnostic and it never leaves a resolution pass.

use crate::pipeline::diagnostics::DiagnosticKind;
use crate::pipeline::id::NodeId;
use crate::pipeline::port::{PortAddress, PortDirection};
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur within the pipeline system.
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Unknown node kind: {0}")]
    UnknownNodeKind(String),

    #[error("Node {0} not found")]
    NodeNotFound(NodeId),

    #[error("Node {node_id} has no port named '{port}'")]
    PortNotFound { node_id: NodeId, port: String },

    #[error("Port '{port}' on node {node_id} is not an {expected} port")]
    PortDirection {
        node_id: NodeId,
        port: String,
        expected: PortDirection,
    },

    #[error("No connection {from} -> {to}")]
    ConnectionNotFound { from: PortAddress, to: PortAddress },

    #[error("Node {node_id} has no parameter named '{name}'")]
    UnknownParameter { node_id: NodeId, name: String },

    #[error("Connection references node id {0}, which is not in the document")]
    DanglingConnection(u32),

    #[error("Node id {0} appears more than once in the document")]
    DuplicateNodeId(u32),

    #[error("No input node named '{name}'. Available: {available:?}")]
    UnknownInput { name: String, available: Vec<String> },

    #[error("Node '{0}' is not a source node")]
    NotASource(String),

    #[error("Invalid input for '{name}': {message}")]
    InvalidInput { name: String, message: String },

    #[error("Document version {found} is newer than supported version {supported}")]
    IncompatibleVersion { found: u32, supported: u32 },

    #[error("Position ({x}, {y}) for node {node_id} is not finite")]
    InvalidPosition { node_id: NodeId, x: f64, y: f64 },

    #[error("Node {node_id} depends on its own output")]
    Cycle { node_id: NodeId },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Document error: {0}")]
    Document(#[from] serde_json::Error),
}

pub type PipelineResult<T> = std::result::Result<T, PipelineError>;

/// A failure inside one node's transform.
#[derive(Error, Debug)]
pub enum TransformError {
    #[error("Decode error: {0}")]
    Decode(String),

    #[error("Cipher error: {0}")]
    Cipher(String),

    #[error("Compression error: {0}")]
    Compression(#[source] std::io::Error),

    #[error("Output of {0} bytes exceeds the size limit")]
    OutputTooLarge(u128),

    #[error("Failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl TransformError {
    /// Which diagnostic bucket this failure is reported under.
    pub fn diagnostic_kind(&self) -> DiagnosticKind {
        match self {
            TransformError::Io { .. } => DiagnosticKind::Io,
            _ => DiagnosticKind::Transform,
        }
    }
}

/// Result of running one node's transform.
pub type TransformResult = std::result::Result<Vec<u8>, TransformError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = PipelineError::PortDirection {
            node_id: NodeId(3),
            port: "output".to_string(),
            expected: PortDirection::Input,
        };
        assert_eq!(
            err.to_string(),
            "Port 'output' on node #3 is not an input port"
        );
    }

    #[test]
    fn test_unknown_input_lists_available() {
        let err = PipelineError::UnknownInput {
            name: "Key".to_string(),
            available: vec!["Input".to_string()],
        };
        assert!(err.to_string().contains("Key"));
        assert!(err.to_string().contains("Input"));
    }

    #[test]
    fn test_transform_error_kind() {
        let io = TransformError::Io {
            path: PathBuf::from("/nope"),
            source: std::io::Error::from(std::io::ErrorKind::NotFound),
        };
        assert_eq!(io.diagnostic_kind(), DiagnosticKind::Io);
        assert_eq!(
            TransformError::Decode("bad".into()).diagnostic_kind(),
            DiagnosticKind::Transform
        );
    }
}

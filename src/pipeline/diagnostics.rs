//! Side channel for fail-soft errors.
//!
//! Transforms that fail produce an empty buffer; what went wrong is recorded
//! here instead. The engine writes to whatever [`DiagnosticSink`] it is given,
//! so callers can collect, count or ignore diagnostics independently of the
//! buffers they get back.

use crate::pipeline::id::NodeId;
use std::fmt;

/// Category of a recorded diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagnosticKind {
    /// Invalid encoded input, corrupt stream, cipher failure.
    Transform,
    /// A file source could not be read.
    Io,
    /// Resolution was aborted, e.g. on cyclic wiring.
    Structural,
}

/// One fail-soft error, attributed to the node it happened in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub node_id: NodeId,
    pub node_name: String,
    pub kind: DiagnosticKind,
    pub message: String,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{:?}] {} ({}): {}",
            self.kind, self.node_name, self.node_id, self.message
        )
    }
}

/// Receiver for diagnostics emitted during resolution.
#[cfg_attr(test, mockall::automock)]
pub trait DiagnosticSink {
    fn record(&mut self, diagnostic: Diagnostic);
}

/// In-memory diagnostic collector.
#[derive(Debug, Clone, Default)]
pub struct DiagnosticLog {
    entries: Vec<Diagnostic>,
}

impl DiagnosticLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[Diagnostic] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Drain all collected diagnostics.
    pub fn take(&mut self) -> Vec<Diagnostic> {
        std::mem::take(&mut self.entries)
    }

    /// Diagnostics recorded for one node.
    pub fn for_node(&self, node_id: NodeId) -> impl Iterator<Item = &Diagnostic> {
        self.entries.iter().filter(move |d| d.node_id == node_id)
    }
}

impl DiagnosticSink for DiagnosticLog {
    fn record(&mut self, diagnostic: Diagnostic) {
        self.entries.push(diagnostic);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn diag(id: u32, kind: DiagnosticKind) -> Diagnostic {
        Diagnostic {
            node_id: NodeId(id),
            node_name: format!("node {id}"),
            kind,
            message: "boom".to_string(),
        }
    }

    #[test]
    fn test_log_collects_and_filters() {
        let mut log = DiagnosticLog::new();
        log.record(diag(1, DiagnosticKind::Transform));
        log.record(diag(2, DiagnosticKind::Io));
        log.record(diag(1, DiagnosticKind::Structural));

        assert_eq!(log.len(), 3);
        assert_eq!(log.for_node(NodeId(1)).count(), 2);

        let drained = log.take();
        assert_eq!(drained.len(), 3);
        assert!(log.is_empty());
    }

    #[test]
    fn test_display() {
        let text = diag(4, DiagnosticKind::Io).to_string();
        assert_eq!(text, "[Io] node 4 (#4): boom");
    }
}

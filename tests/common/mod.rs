//! Common test utilities and helpers

#![allow(dead_code)] // Test utilities may not all be used in every test file

pub mod builders;

use byteflow::pipeline::{DiagnosticLog, Graph, NodeId};
use byteflow::EngineConfig;

/// Resolve every sink and return the buffer captured by the named sink.
pub fn resolve_sink(graph: &mut Graph, name: &str) -> Vec<u8> {
    let mut log = DiagnosticLog::new();
    resolve_sink_with_log(graph, name, &mut log)
}

/// Like [`resolve_sink`], collecting diagnostics into `log`.
pub fn resolve_sink_with_log(graph: &mut Graph, name: &str, log: &mut DiagnosticLog) -> Vec<u8> {
    let id = sink_id(graph, name);
    graph
        .resolve_all_sinks(log, &EngineConfig::default())
        .into_iter()
        .find(|(sink, _)| *sink == id)
        .map(|(_, data)| data)
        .unwrap_or_else(|| panic!("sink '{}' was not resolved", name))
}

/// Id of the node with this name; panics if there is none.
pub fn sink_id(graph: &Graph, name: &str) -> NodeId {
    graph
        .node_by_name(name)
        .unwrap_or_else(|| panic!("no node named '{}'", name))
        .id()
}

/// Assert two byte buffers are equal, printing both as hex on failure
pub fn assert_bytes_eq(actual: &[u8], expected: &[u8]) {
    assert!(
        actual == expected,
        "Expected {} but got {}",
        hex::encode(expected),
        hex::encode(actual)
    );
}

//! Saving and loading graph documents.

mod common;

use byteflow::pipeline::{
    Graph, GraphDocument, NodeKind, Pipeline, PipelineError, Position, DOCUMENT_VERSION,
};
use common::builders::GraphBuilder;
use common::resolve_sink;
use proptest::prelude::*;

fn sample_graph() -> Graph {
    let mut graph = GraphBuilder::new()
        .text("Plain", "attack at dawn")
        .hex("Key", "2b7e151628aed2a6abf7158809cf4f3c")
        .node(NodeKind::Aes, "Encrypt", &[("mode", "CTR Encrypt")])
        .node(NodeKind::Sha1, "Digest", &[("format", "Raw")])
        .node(NodeKind::Base64, "Armor", &[])
        .output("Cipher")
        .output("Hash")
        .chain(&["Plain", "Encrypt", "Armor", "Cipher"])
        .chain(&["Plain", "Digest", "Hash"])
        .wire("Key", "Encrypt", "key")
        .build();

    for (i, id) in graph.node_ids().collect::<Vec<_>>().into_iter().enumerate() {
        graph
            .set_position(id, Position::new(i as f64 * 120.0, -40.5))
            .unwrap();
    }
    graph
}

/// Node name -> (kind, params, position), for comparing graphs with
/// renumbered ids.
fn shape(graph: &Graph) -> Vec<(String, NodeKind, Vec<(String, String)>, Position)> {
    graph
        .nodes()
        .map(|n| {
            (
                n.name().to_string(),
                n.kind(),
                n.params()
                    .map(|(k, v)| (k.to_string(), v.to_string()))
                    .collect(),
                n.position(),
            )
        })
        .collect()
}

/// Connections as (from name, port, to name, port).
fn wiring(graph: &Graph) -> Vec<(String, String, String, String)> {
    let name = |id| graph.node(id).unwrap().name().to_string();
    let mut wires: Vec<_> = graph
        .connections()
        .iter()
        .map(|c| {
            (
                name(c.from.node_id),
                c.from.port_name.clone(),
                name(c.to.node_id),
                c.to.port_name.clone(),
            )
        })
        .collect();
    wires.sort();
    wires
}

#[test]
fn test_file_round_trip_preserves_graph() {
    let original = sample_graph();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("graph.json");

    original.save(&path).unwrap();
    let loaded = Graph::load(&path).unwrap();

    assert_eq!(loaded.len(), original.len());
    assert_eq!(loaded.connections().len(), original.connections().len());
    assert_eq!(shape(&loaded), shape(&original));
    assert_eq!(wiring(&loaded), wiring(&original));
}

#[test]
fn test_round_trip_resolves_the_same() {
    let mut original = sample_graph();
    let doc = GraphDocument::from_graph(&original).to_json().unwrap();
    let mut loaded = GraphDocument::from_json(&doc).unwrap().into_graph().unwrap();

    for sink in ["Cipher", "Hash"] {
        assert_eq!(resolve_sink(&mut loaded, sink), resolve_sink(&mut original, sink));
    }
}

#[test]
fn test_document_shape() {
    let json = GraphDocument::from_graph(&sample_graph()).to_json().unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();

    assert_eq!(value["version"], DOCUMENT_VERSION);
    assert_eq!(value["nodes"].as_array().unwrap().len(), 7);
    assert_eq!(value["nodes"][2]["kind"], "byteflow.crypto.AESNode");
    assert_eq!(value["nodes"][2]["parameters"]["mode"], "CTR Encrypt");
    assert_eq!(value["connections"][0]["from"]["portName"], "output");
}

#[test]
fn test_hand_written_document_loads() {
    let json = r#"{
        "nodes": [
            { "id": 7, "kind": "byteflow.io.TextInputNode",
              "parameters": { "text_data": "Test" } },
            { "id": 3, "kind": "byteflow.crypto.Base64Node" },
            { "id": 9, "kind": "byteflow.io.OutputNode", "name": "Out" }
        ],
        "connections": [
            { "from": { "nodeId": 7, "portName": "output" },
              "to": { "nodeId": 3, "portName": "data" } },
            { "from": { "nodeId": 3, "portName": "output" },
              "to": { "nodeId": 9, "portName": "input" } }
        ]
    }"#;

    let mut graph = GraphDocument::from_json(json).unwrap().into_graph().unwrap();
    assert_eq!(graph.node_by_name("Text Input").unwrap().kind(), NodeKind::TextInput);
    assert_eq!(resolve_sink(&mut graph, "Out"), b"VGVzdA==".to_vec());
}

#[test]
fn test_failed_load_keeps_current_graph() {
    let dir = tempfile::tempdir().unwrap();
    let good = dir.path().join("good.json");
    let bad = dir.path().join("bad.json");

    sample_graph().save(&good).unwrap();
    std::fs::write(
        &bad,
        r#"{ "version": 1, "nodes": [ { "id": 0, "kind": "byteflow.misc.TeleportNode" } ] }"#,
    )
    .unwrap();

    let mut pipeline = Pipeline::open(&good).unwrap();
    let before = shape(pipeline.graph());

    let err = pipeline.load(&bad).unwrap_err();
    assert!(matches!(err, PipelineError::UnknownNodeKind(ref k) if k == "byteflow.misc.TeleportNode"));
    assert_eq!(shape(pipeline.graph()), before);

    let results = pipeline.execute(None, &[]).unwrap();
    assert_eq!(results.len(), 2);
}

#[test]
fn test_missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = Graph::load(dir.path().join("nope.json")).unwrap_err();
    assert!(matches!(err, PipelineError::Io(_)));
}

fn finite_f64() -> impl Strategy<Value = f64> {
    any::<f64>().prop_filter("finite", |v| v.is_finite())
}

proptest! {
    #[test]
    fn test_positions_survive_round_trip(x in finite_f64(), y in finite_f64()) {
        let mut graph = Graph::new();
        let id = graph.add_node(NodeKind::Reverse);
        graph.set_position(id, Position::new(x, y)).unwrap();

        let json = GraphDocument::from_graph(&graph).to_json().unwrap();
        let loaded = GraphDocument::from_json(&json).unwrap().into_graph().unwrap();

        let position = loaded.nodes().next().unwrap().position();
        prop_assert_eq!(position.x.to_bits(), x.to_bits());
        prop_assert_eq!(position.y.to_bits(), y.to_bits());
    }
}

//! Test graph builders

use byteflow::pipeline::{Graph, NodeId, NodeKind};

/// Builder for wiring test graphs by node name.
///
/// Panics on any wiring mistake, which is what a test wants.
pub struct GraphBuilder {
    graph: Graph,
}

impl GraphBuilder {
    pub fn new() -> Self {
        Self {
            graph: Graph::new(),
        }
    }

    /// Add a named node with parameter overrides.
    pub fn node(mut self, kind: NodeKind, name: &str, params: &[(&str, &str)]) -> Self {
        let id = self.graph.add_named_node(kind, name);
        for (param, value) in params {
            self.graph
                .set_param(id, param, *value)
                .unwrap_or_else(|e| panic!("{}: {}", name, e));
        }
        self
    }

    pub fn text(self, name: &str, text: &str) -> Self {
        self.node(NodeKind::TextInput, name, &[("text_data", text)])
    }

    pub fn hex(self, name: &str, hex: &str) -> Self {
        self.node(NodeKind::HexInput, name, &[("hex_data", hex)])
    }

    pub fn output(self, name: &str) -> Self {
        self.node(NodeKind::Output, name, &[])
    }

    /// Connect `from`'s output port to `to.port`. Hash nodes output on `hash`,
    /// everything else on `output`.
    pub fn wire(mut self, from: &str, to: &str, port: &str) -> Self {
        let from_id = self.id(from);
        let to_id = self.id(to);
        let out_port = self
            .graph
            .node(from_id)
            .and_then(|n| n.kind().output_ports().next())
            .map(|p| p.name)
            .unwrap_or("output");
        self.graph
            .connect(from_id, out_port, to_id, port)
            .unwrap_or_else(|e| panic!("{} -> {}.{}: {}", from, to, port, e));
        self
    }

    /// Wire a linear chain: each node's output into the next node's first input.
    pub fn chain(mut self, names: &[&str]) -> Self {
        for pair in names.windows(2) {
            let to_id = self.id(pair[1]);
            let port = self
                .graph
                .node(to_id)
                .and_then(|n| n.kind().input_ports().next())
                .map(|p| p.name)
                .unwrap_or("data");
            self = self.wire(pair[0], pair[1], port);
        }
        self
    }

    pub fn id(&self, name: &str) -> NodeId {
        self.graph
            .node_by_name(name)
            .unwrap_or_else(|| panic!("no node named '{}'", name))
            .id()
    }

    pub fn build(self) -> Graph {
        self.graph
    }
}

impl Default for GraphBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_graph_builder() {
        let graph = GraphBuilder::new()
            .text("In", "abc")
            .node(NodeKind::Md5, "Hash", &[])
            .output("Out")
            .chain(&["In", "Hash", "Out"])
            .build();

        assert_eq!(graph.len(), 3);
        assert_eq!(graph.connections().len(), 2);
        assert_eq!(graph.connections()[1].from.port_name, "hash");
    }
}

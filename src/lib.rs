//! # ByteFlow: byte transform graphs
//!
//! Wire byte-level operations (ciphers, hashes, text encodings, compression,
//! slicing) into a directed graph and read the bytes that arrive at each
//! sink. Graphs are saved as JSON documents and can be run headlessly.
//!
//! ## Architecture
//!
//! - **Catalog**: `pipeline::NodeKind` lists every operator with its ports,
//!   parameters and type id; `pipeline::nodes` holds the transforms
//! - **Graph**: `pipeline::Graph` owns nodes and connections
//! - **Engine**: recursive pull resolution with no caching, fail-soft
//!   diagnostics and cycle detection on the resolution path
//! - **Runner**: `pipeline::Pipeline` loads a document, feeds named inputs and
//!   collects sink buffers by name
//!
//! ## Configuration
//!
//! Engine limits and the log filter are read from
//! `<config dir>/byteflow/config.toml` (see [`config`]).
//!
//! ## Example
//!
//! ```ignore
//! use byteflow::pipeline::{Graph, NodeKind, Pipeline};
//!
//! let mut graph = Graph::new();
//! let input = graph.add_node(NodeKind::TextInput);
//! let b64 = graph.add_node(NodeKind::Base64);
//! let out = graph.add_node(NodeKind::Output);
//! graph.connect(input, "output", b64, "data")?;
//! graph.connect(b64, "output", out, "input")?;
//!
//! let mut pipeline = Pipeline::from_graph(graph);
//! let results = pipeline.execute(Some("Test".as_bytes()), &[])?;
//! assert_eq!(results["Output"], b"VGVzdA==");
//! ```

pub mod config;
pub mod display;
pub mod error;
pub mod pipeline;

// Re-export commonly used types
pub use config::{AppConfig, EngineConfig};
pub use error::{ByteflowError, Result};
pub use pipeline::{Graph, NodeKind, Pipeline};

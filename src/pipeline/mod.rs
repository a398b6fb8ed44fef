//! Node-based byte transform pipeline.
//!
//! Bytes flow through typed nodes: Source (text, hex, file) → Transform
//! (ciphers, hashes, encodings, compression, slicing) → Sink (captured for
//! inspection). Evaluation is pull-based: each sink asks its upstream for a
//! buffer, recursively, every time it is resolved.
//!
//! # Architecture
//!
//! ```text
//! [Text Input] ──► [XOR] ──► [Base64] ──► [Output]
//! [Hex Input] ──────┘ (key)        └────► [Output 1]
//! ```
//!
//! # Design
//!
//! - **Enum dispatch** — every catalog kind is a `NodeKind` variant mapped to
//!   one transform function.
//! - **Capability tags** — the runner and engine classify nodes by
//!   `NodeRole`, never by concrete kind.
//! - **Port-shadows-parameter** — key/IV ports name the hex parameter they
//!   override when connected.
//! - **Fail-soft** — transform failures become empty buffers plus a
//!   `Diagnostic`; only structural problems surface as `PipelineError`.
//! - **No memoization** — shared upstream nodes run once per consumer.

pub mod diagnostics;
pub mod document;
pub mod error;
pub mod executor;
pub mod graph;
pub mod id;
pub mod node;
pub mod node_type;
pub mod nodes;
pub mod port;
pub mod runner;

pub use diagnostics::{Diagnostic, DiagnosticKind, DiagnosticLog, DiagnosticSink};
pub use document::{GraphDocument, NodeRecord, DOCUMENT_VERSION};
pub use error::{PipelineError, PipelineResult, TransformError, TransformResult};
pub use executor::Evaluator;
pub use graph::{Connection, Graph};
pub use id::NodeId;
pub use node::{InputBuffers, Node, NodeContext, Position, SinkState};
pub use node_type::{NodeCategory, NodeKind, NodeRole};
pub use port::{ParamDescriptor, PortAddress, PortDescriptor, PortDirection};
pub use runner::Pipeline;

//! Source nodes and the output sink.

use crate::pipeline::error::{TransformError, TransformResult};
use crate::pipeline::node::NodeContext;
use crate::pipeline::nodes::params::parse_hex;
use std::path::PathBuf;

/// Malformed hex yields an empty buffer without a diagnostic.
pub(super) fn hex_input(ctx: &NodeContext) -> TransformResult {
    Ok(parse_hex(ctx.param("hex_data")).unwrap_or_default())
}

pub(super) fn text_input(ctx: &NodeContext) -> TransformResult {
    Ok(ctx.param("text_data").as_bytes().to_vec())
}

/// Reads the file on every evaluation. An empty path is an empty buffer.
pub(super) fn file_input(ctx: &NodeContext) -> TransformResult {
    let path = ctx.param("file_path");
    if path.is_empty() {
        return Ok(Vec::new());
    }
    std::fs::read(path).map_err(|source| TransformError::Io {
        path: PathBuf::from(path),
        source,
    })
}

pub(super) fn output(ctx: &NodeContext) -> TransformResult {
    Ok(ctx.input("input").to_vec())
}

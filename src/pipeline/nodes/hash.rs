//! Digest nodes. Empty input is hashed like any other input.

use crate::pipeline::error::TransformResult;
use crate::pipeline::node::NodeContext;
use crate::pipeline::node_type::HASH_FORMATS;
use crate::pipeline::nodes::params::Choice;
use sha2::Digest;

/// How a digest is written to the output port.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HashFormat {
    /// Lowercase hex text.
    #[default]
    Hex,
    /// The digest bytes themselves.
    Raw,
}

impl Choice for HashFormat {
    const LABELS: &'static [&'static str] = HASH_FORMATS;

    fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(HashFormat::Hex),
            1 => Some(HashFormat::Raw),
            _ => None,
        }
    }
}

impl HashFormat {
    pub fn render(self, digest: &[u8]) -> Vec<u8> {
        match self {
            HashFormat::Hex => hex::encode(digest).into_bytes(),
            HashFormat::Raw => digest.to_vec(),
        }
    }
}

pub fn md5_digest(data: &[u8]) -> Vec<u8> {
    md5::compute(data).0.to_vec()
}

pub fn sha1_digest(data: &[u8]) -> Vec<u8> {
    sha1::Sha1::digest(data).to_vec()
}

pub fn sha256_digest(data: &[u8]) -> Vec<u8> {
    sha2::Sha256::digest(data).to_vec()
}

fn hash_with(ctx: &NodeContext, digest: fn(&[u8]) -> Vec<u8>) -> TransformResult {
    let format = HashFormat::parse_or_default(ctx.param("format"));
    Ok(format.render(&digest(ctx.input("data"))))
}

pub(super) fn md5(ctx: &NodeContext) -> TransformResult {
    hash_with(ctx, md5_digest)
}

pub(super) fn sha1(ctx: &NodeContext) -> TransformResult {
    hash_with(ctx, sha1_digest)
}

pub(super) fn sha256(ctx: &NodeContext) -> TransformResult {
    hash_with(ctx, sha256_digest)
}

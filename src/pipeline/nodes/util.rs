//! Compression and byte-slicing utilities.

use crate::pipeline::error::{TransformError, TransformResult};
use crate::pipeline::node::NodeContext;
use crate::pipeline::node_type::{GZIP_MODES, TAKE_MODES, ZLIB_MODES};
use crate::pipeline::nodes::params::{parse_int, parse_optional_int, signed_slice, Choice};
use flate2::read::{DeflateDecoder, MultiGzDecoder, ZlibDecoder};
use flate2::write::{DeflateEncoder, GzEncoder, ZlibEncoder};
use flate2::Compression;
use std::io::{Read, Write};

/// Largest buffer Repeat will build.
pub const MAX_REPEAT_OUTPUT: u128 = 1 << 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ZlibMode {
    #[default]
    Decompress,
    Compress,
    /// Headerless deflate stream in.
    RawInflate,
    /// Headerless deflate stream out.
    RawDeflate,
}

impl Choice for ZlibMode {
    const LABELS: &'static [&'static str] = ZLIB_MODES;

    fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(ZlibMode::Decompress),
            1 => Some(ZlibMode::Compress),
            2 => Some(ZlibMode::RawInflate),
            3 => Some(ZlibMode::RawDeflate),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GzipMode {
    #[default]
    Decompress,
    Compress,
}

impl Choice for GzipMode {
    const LABELS: &'static [&'static str] = GZIP_MODES;

    fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(GzipMode::Decompress),
            1 => Some(GzipMode::Compress),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TakeMode {
    #[default]
    StartLength,
    StartEnd,
}

impl Choice for TakeMode {
    const LABELS: &'static [&'static str] = TAKE_MODES;

    fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(TakeMode::StartLength),
            1 => Some(TakeMode::StartEnd),
            _ => None,
        }
    }
}

fn encode_with<W: Write>(
    mut encoder: W,
    data: &[u8],
    finish: impl FnOnce(W) -> std::io::Result<Vec<u8>>,
) -> TransformResult {
    encoder.write_all(data).map_err(TransformError::Compression)?;
    finish(encoder).map_err(TransformError::Compression)
}

fn decode_with<R: Read>(mut decoder: R) -> TransformResult {
    let mut out = Vec::new();
    decoder
        .read_to_end(&mut out)
        .map_err(TransformError::Compression)?;
    Ok(out)
}

pub fn zlib_apply(data: &[u8], mode: ZlibMode) -> TransformResult {
    match mode {
        ZlibMode::Decompress => decode_with(ZlibDecoder::new(data)),
        ZlibMode::Compress => encode_with(
            ZlibEncoder::new(Vec::new(), Compression::default()),
            data,
            ZlibEncoder::finish,
        ),
        ZlibMode::RawInflate => decode_with(DeflateDecoder::new(data)),
        ZlibMode::RawDeflate => encode_with(
            DeflateEncoder::new(Vec::new(), Compression::default()),
            data,
            DeflateEncoder::finish,
        ),
    }
}

pub fn gzip_apply(data: &[u8], mode: GzipMode) -> TransformResult {
    match mode {
        GzipMode::Decompress => decode_with(MultiGzDecoder::new(data)),
        GzipMode::Compress => encode_with(
            GzEncoder::new(Vec::new(), Compression::default()),
            data,
            GzEncoder::finish,
        ),
    }
}

pub(super) fn zlib(ctx: &NodeContext) -> TransformResult {
    let data = ctx.input("data");
    if data.is_empty() {
        return Ok(Vec::new());
    }
    zlib_apply(data, ZlibMode::parse_or_default(ctx.param("mode")))
}

pub(super) fn gzip(ctx: &NodeContext) -> TransformResult {
    let data = ctx.input("data");
    if data.is_empty() {
        return Ok(Vec::new());
    }
    gzip_apply(data, GzipMode::parse_or_default(ctx.param("mode")))
}

pub(super) fn reverse(ctx: &NodeContext) -> TransformResult {
    let mut out = ctx.input("data").to_vec();
    out.reverse();
    Ok(out)
}

pub(super) fn substring(ctx: &NodeContext) -> TransformResult {
    let data = ctx.input("data");
    let start = parse_int(ctx.param("start")).unwrap_or(0);
    let end = parse_optional_int(ctx.param("end"));
    Ok(signed_slice(data, Some(start), end).to_vec())
}

/// `data` concatenated `count` times; counts below one mean once.
pub fn repeat_bytes(data: &[u8], count: i64) -> TransformResult {
    let count = count.max(1) as u64;
    let total = data.len() as u128 * count as u128;
    if total > MAX_REPEAT_OUTPUT {
        return Err(TransformError::OutputTooLarge(total));
    }
    Ok(data.repeat(count as usize))
}

pub(super) fn repeat(ctx: &NodeContext) -> TransformResult {
    let data = ctx.input("data");
    if data.is_empty() {
        return Ok(Vec::new());
    }
    repeat_bytes(data, parse_int(ctx.param("count")).unwrap_or(1))
}

/// Take a window of `data`.
///
/// In start + length mode a negative start is resolved against the buffer
/// length first and the window is `[start, start + length)`; without a
/// length it runs to the end. In start + end mode the arguments are plain
/// slice bounds.
pub fn take_bytes(data: &[u8], mode: TakeMode, start: Option<i64>, second: Option<i64>) -> &[u8] {
    match mode {
        TakeMode::StartLength => {
            let start = start.unwrap_or(0);
            match second {
                None => signed_slice(data, Some(start), None),
                Some(length) => {
                    let actual = if start < 0 {
                        start.saturating_add(data.len() as i64)
                    } else {
                        start
                    };
                    signed_slice(data, Some(actual), Some(actual.saturating_add(length)))
                }
            }
        }
        TakeMode::StartEnd => signed_slice(data, start, second),
    }
}

pub(super) fn take(ctx: &NodeContext) -> TransformResult {
    let data = ctx.input("data");
    let mode = TakeMode::parse_or_default(ctx.param("mode"));
    let start_text = ctx.param("start");
    let start = if start_text.trim().is_empty() {
        None
    } else {
        Some(parse_int(start_text).unwrap_or(0))
    };
    let second = parse_optional_int(ctx.param("param2"));
    Ok(take_bytes(data, mode, start, second).to_vec())
}

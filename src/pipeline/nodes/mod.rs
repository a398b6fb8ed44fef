//! Built-in transform implementations.
//!
//! Every catalog kind maps to one pure function from a [`NodeContext`] to a
//! [`TransformResult`]. Failures are returned, never logged here; the engine
//! decides how to report them.

pub mod crypto;
pub mod encoding;
pub mod hash;
mod io;
pub mod params;
pub mod util;

pub use crypto::AesMode;
pub use hash::HashFormat;
pub use params::{Choice, CodecMode};
pub use util::{GzipMode, TakeMode, ZlibMode};

use crate::pipeline::error::TransformResult;
use crate::pipeline::node::NodeContext;
use crate::pipeline::node_type::NodeKind;

/// Run the transform for the context's node kind.
pub fn transform(ctx: &NodeContext) -> TransformResult {
    match ctx.kind() {
        NodeKind::Xor => crypto::xor(ctx),
        NodeKind::Rc4 => crypto::rc4(ctx),
        NodeKind::Aes => crypto::aes(ctx),
        NodeKind::Base64 => crypto::base64(ctx),
        NodeKind::Md5 => hash::md5(ctx),
        NodeKind::Sha1 => hash::sha1(ctx),
        NodeKind::Sha256 => hash::sha256(ctx),
        NodeKind::UrlEncode => encoding::url(ctx),
        NodeKind::Hex => encoding::hex(ctx),
        NodeKind::Rot => encoding::rot_n(ctx),
        NodeKind::Atbash => encoding::atbash_node(ctx),
        NodeKind::Reverse => util::reverse(ctx),
        NodeKind::Zlib => util::zlib(ctx),
        NodeKind::Gzip => util::gzip(ctx),
        NodeKind::Substring => util::substring(ctx),
        NodeKind::Repeat => util::repeat(ctx),
        NodeKind::TakeBytes => util::take(ctx),
        NodeKind::HexInput => io::hex_input(ctx),
        NodeKind::TextInput => io::text_input(ctx),
        NodeKind::FileInput => io::file_input(ctx),
        NodeKind::Output => io::output(ctx),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::id::NodeId;
    use crate::pipeline::node::{InputBuffers, Node};

    fn run(kind: NodeKind, params: &[(&str, &str)], inputs: InputBuffers) -> TransformResult {
        let mut node = Node::new(NodeId(1), kind, kind.display_name().to_string());
        for (name, value) in params {
            node.set_param(name, *value).unwrap();
        }
        transform(&NodeContext::new(&node, &inputs))
    }

    fn data(bytes: &[u8]) -> InputBuffers {
        InputBuffers::new().with("data", bytes.to_vec())
    }

    #[test]
    fn test_xor_key_port_overrides_param() {
        let out = run(NodeKind::Xor, &[("key_hex", "01")], data(b"\x10\x20")).unwrap();
        assert_eq!(out, vec![0x11, 0x21]);

        let inputs = data(b"\x10\x20").with("key", vec![0xff]);
        let out = run(NodeKind::Xor, &[("key_hex", "01")], inputs).unwrap();
        assert_eq!(out, vec![0xef, 0xdf]);
    }

    #[test]
    fn test_xor_malformed_key_uses_zero() {
        let out = run(NodeKind::Xor, &[("key_hex", "not hex")], data(b"abc")).unwrap();
        assert_eq!(out, b"abc".to_vec());
    }

    #[test]
    fn test_empty_data_is_empty_output() {
        for kind in [
            NodeKind::Xor,
            NodeKind::Rc4,
            NodeKind::Aes,
            NodeKind::Base64,
            NodeKind::UrlEncode,
            NodeKind::Hex,
            NodeKind::Rot,
            NodeKind::Atbash,
            NodeKind::Reverse,
            NodeKind::Zlib,
            NodeKind::Gzip,
            NodeKind::Substring,
            NodeKind::Repeat,
            NodeKind::TakeBytes,
        ] {
            let out = run(kind, &[], InputBuffers::new()).unwrap();
            assert!(out.is_empty(), "{kind} produced output from nothing");
        }
    }

    #[test]
    fn test_hash_of_disconnected_input() {
        let out = run(NodeKind::Md5, &[], InputBuffers::new()).unwrap();
        assert_eq!(out, b"d41d8cd98f00b204e9800998ecf8427e".to_vec());
    }

    #[test]
    fn test_base64_modes() {
        let out = run(NodeKind::Base64, &[], data(b"Test")).unwrap();
        assert_eq!(out, b"VGVzdA==".to_vec());
        let out = run(NodeKind::Base64, &[("mode", "Decode")], data(b"VGVzdA==")).unwrap();
        assert_eq!(out, b"Test".to_vec());
    }

    #[test]
    fn test_rot_bad_shift_defaults_to_13() {
        let out = run(NodeKind::Rot, &[("shift", "lots")], data(b"abc")).unwrap();
        assert_eq!(out, b"nop".to_vec());
    }

    #[test]
    fn test_substring_params() {
        let out = run(NodeKind::Substring, &[("start", "1"), ("end", "-1")], data(b"Hello")).unwrap();
        assert_eq!(out, b"ell".to_vec());
        let out = run(NodeKind::Substring, &[("start", "x"), ("end", "y")], data(b"Hello")).unwrap();
        assert_eq!(out, b"Hello".to_vec());
    }

    #[test]
    fn test_take_bytes_params() {
        let params = [("start", "-5"), ("param2", "3")];
        let out = run(NodeKind::TakeBytes, &params, data(b"0123456789")).unwrap();
        assert_eq!(out, b"567".to_vec());

        let params = [("mode", "Start + End"), ("start", ""), ("param2", "4")];
        let out = run(NodeKind::TakeBytes, &params, data(b"0123456789")).unwrap();
        assert_eq!(out, b"0123".to_vec());
    }

    #[test]
    fn test_aes_uses_iv_port() {
        let inputs = data(b"secret").with("iv", vec![1u8; 16]);
        let with_port = run(NodeKind::Aes, &[], inputs).unwrap();
        let params = [("iv_hex", "01010101010101010101010101010101")];
        let with_param = run(NodeKind::Aes, &params, data(b"secret")).unwrap();
        assert_eq!(with_port, with_param);
    }

    #[test]
    fn test_output_passthrough() {
        let inputs = InputBuffers::new().with("input", b"done".to_vec());
        assert_eq!(run(NodeKind::Output, &[], inputs).unwrap(), b"done".to_vec());
    }
}

//! Node kind enumeration: the transform catalog.
//!
//! Every node in a graph is an instance of one `NodeKind`. The kind fixes the
//! node's ports, its parameters and their defaults, and which transform the
//! engine invokes. Kinds are identified in saved documents by their type id
//! (e.g. `byteflow.crypto.XORNode`).

use crate::pipeline::port::{ParamDescriptor, PortDescriptor};

/// Capability tag used by the engine and runner to classify nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeRole {
    /// No inputs; manufactures bytes from its own parameters.
    Source,
    /// Maps input buffers to an output buffer.
    Transform,
    /// Terminal node that captures a buffer for inspection.
    Sink,
}

/// Menu grouping for the editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeCategory {
    InputOutput,
    Crypto,
    Hash,
    Encoding,
    Utility,
}

impl NodeCategory {
    pub fn display_name(&self) -> &'static str {
        match self {
            NodeCategory::InputOutput => "Input/Output",
            NodeCategory::Crypto => "Crypto",
            NodeCategory::Hash => "Hash",
            NodeCategory::Encoding => "Encoding",
            NodeCategory::Utility => "Utility",
        }
    }
}

/// Types of nodes that can be instantiated in a graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    // Crypto
    Xor,
    Rc4,
    Aes,
    Base64,

    // Hash
    Md5,
    Sha1,
    Sha256,

    // Encoding
    UrlEncode,
    Hex,
    Rot,
    Atbash,

    // Utility
    Reverse,
    Zlib,
    Gzip,
    Substring,
    Repeat,
    TakeBytes,

    // Sources and sinks
    HexInput,
    TextInput,
    FileInput,
    Output,
}

pub const MODE_ENCODE_DECODE: &[&str] = &["Encode", "Decode"];
pub const HASH_FORMATS: &[&str] = &["Hex", "Raw"];
pub const AES_MODES: &[&str] = &[
    "CBC Encrypt",
    "CBC Decrypt",
    "ECB Encrypt",
    "ECB Decrypt",
    "CTR Encrypt",
    "CTR Decrypt",
];
pub const ZLIB_MODES: &[&str] = &["Decompress", "Compress", "Raw Inflate", "Raw Deflate"];
pub const GZIP_MODES: &[&str] = &["Decompress", "Compress"];
pub const TAKE_MODES: &[&str] = &["Start + Length", "Start + End"];

const ZERO_BLOCK_HEX: &str = "00000000000000000000000000000000";

static DATA_TO_OUTPUT: &[PortDescriptor] = &[
    PortDescriptor::input("data"),
    PortDescriptor::output("output"),
];

static KEYED_PORTS: &[PortDescriptor] = &[
    PortDescriptor::input("data"),
    PortDescriptor::shadowing("key", "key_hex"),
    PortDescriptor::output("output"),
];

static AES_PORTS: &[PortDescriptor] = &[
    PortDescriptor::input("data"),
    PortDescriptor::shadowing("key", "key_hex"),
    PortDescriptor::shadowing("iv", "iv_hex"),
    PortDescriptor::output("output"),
];

static HASH_PORTS: &[PortDescriptor] = &[
    PortDescriptor::input("data"),
    PortDescriptor::output("hash"),
];

static SOURCE_PORTS: &[PortDescriptor] = &[PortDescriptor::output("output")];

static SINK_PORTS: &[PortDescriptor] = &[PortDescriptor::input("input")];

static KEY_PARAMS: &[ParamDescriptor] = &[ParamDescriptor::text("key_hex", "Key (hex)", "00")];

static AES_PARAMS: &[ParamDescriptor] = &[
    ParamDescriptor::text("key_hex", "Key (hex, 16/24/32 bytes)", ZERO_BLOCK_HEX),
    ParamDescriptor::text("iv_hex", "IV (hex, 16 bytes)", ZERO_BLOCK_HEX),
    ParamDescriptor::choice("mode", "Mode", "CBC Encrypt", AES_MODES),
];

static CODEC_PARAMS: &[ParamDescriptor] =
    &[ParamDescriptor::choice("mode", "Mode", "Encode", MODE_ENCODE_DECODE)];

static HASH_PARAMS: &[ParamDescriptor] =
    &[ParamDescriptor::choice("format", "Output", "Hex", HASH_FORMATS)];

static ROT_PARAMS: &[ParamDescriptor] = &[ParamDescriptor::text("shift", "Shift (0-25)", "13")];

static ZLIB_PARAMS: &[ParamDescriptor] =
    &[ParamDescriptor::choice("mode", "Mode", "Decompress", ZLIB_MODES)];

static GZIP_PARAMS: &[ParamDescriptor] =
    &[ParamDescriptor::choice("mode", "Mode", "Decompress", GZIP_MODES)];

static SUBSTRING_PARAMS: &[ParamDescriptor] = &[
    ParamDescriptor::text("start", "Start", "0"),
    ParamDescriptor::text("end", "End (empty=all)", ""),
];

static REPEAT_PARAMS: &[ParamDescriptor] = &[ParamDescriptor::text("count", "Count", "2")];

static TAKE_PARAMS: &[ParamDescriptor] = &[
    ParamDescriptor::choice("mode", "Mode", "Start + Length", TAKE_MODES),
    ParamDescriptor::text("start", "Start (empty=0)", ""),
    ParamDescriptor::text("param2", "Length / End (empty=all)", ""),
];

static HEX_INPUT_PARAMS: &[ParamDescriptor] =
    &[ParamDescriptor::text("hex_data", "Hex Data", "48656c6c6f")];

static TEXT_INPUT_PARAMS: &[ParamDescriptor] =
    &[ParamDescriptor::text("text_data", "Text", "Hello")];

static FILE_INPUT_PARAMS: &[ParamDescriptor] =
    &[ParamDescriptor::text("file_path", "File Path", "")];

static NO_PARAMS: &[ParamDescriptor] = &[];

impl NodeKind {
    /// Get all available node kinds, in menu order.
    pub fn all() -> &'static [NodeKind] {
        &[
            NodeKind::HexInput,
            NodeKind::TextInput,
            NodeKind::FileInput,
            NodeKind::Output,
            NodeKind::Xor,
            NodeKind::Rc4,
            NodeKind::Aes,
            NodeKind::Base64,
            NodeKind::Md5,
            NodeKind::Sha1,
            NodeKind::Sha256,
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
        ]
    }

    /// Stable identifier used in saved documents.
    pub fn type_id(&self) -> &'static str {
        match self {
            NodeKind::Xor => "byteflow.crypto.XORNode",
            NodeKind::Rc4 => "byteflow.crypto.RC4Node",
            NodeKind::Aes => "byteflow.crypto.AESNode",
            NodeKind::Base64 => "byteflow.crypto.Base64Node",
            NodeKind::Md5 => "byteflow.hash.MD5Node",
            NodeKind::Sha1 => "byteflow.hash.SHA1Node",
            NodeKind::Sha256 => "byteflow.hash.SHA256Node",
            NodeKind::UrlEncode => "byteflow.encoding.URLEncodeNode",
            NodeKind::Hex => "byteflow.encoding.HexEncodeNode",
            NodeKind::Rot => "byteflow.encoding.ROTNode",
            NodeKind::Atbash => "byteflow.encoding.AtbashNode",
            NodeKind::Reverse => "byteflow.util.ReverseNode",
            NodeKind::Zlib => "byteflow.util.ZlibNode",
            NodeKind::Gzip => "byteflow.util.GzipNode",
            NodeKind::Substring => "byteflow.util.SubstringNode",
            NodeKind::Repeat => "byteflow.util.RepeatNode",
            NodeKind::TakeBytes => "byteflow.util.TakeBytesNode",
            NodeKind::HexInput => "byteflow.io.HexInputNode",
            NodeKind::TextInput => "byteflow.io.TextInputNode",
            NodeKind::FileInput => "byteflow.io.FileInputNode",
            NodeKind::Output => "byteflow.io.OutputNode",
        }
    }

    /// Look up a kind by its type id.
    pub fn from_type_id(type_id: &str) -> Option<NodeKind> {
        Self::all().iter().copied().find(|k| k.type_id() == type_id)
    }

    /// Get the display name for this node kind.
    pub fn display_name(&self) -> &'static str {
        match self {
            NodeKind::Xor => "XOR",
            NodeKind::Rc4 => "RC4",
            NodeKind::Aes => "AES",
            NodeKind::Base64 => "Base64",
            NodeKind::Md5 => "MD5",
            NodeKind::Sha1 => "SHA1",
            NodeKind::Sha256 => "SHA256",
            NodeKind::UrlEncode => "URL Encode",
            NodeKind::Hex => "Hex",
            NodeKind::Rot => "ROT",
            NodeKind::Atbash => "Atbash",
            NodeKind::Reverse => "Reverse",
            NodeKind::Zlib => "Zlib",
            NodeKind::Gzip => "Gzip",
            NodeKind::Substring => "Substring",
            NodeKind::Repeat => "Repeat",
            NodeKind::TakeBytes => "Take Bytes",
            NodeKind::HexInput => "Hex Input",
            NodeKind::TextInput => "Text Input",
            NodeKind::FileInput => "File Input",
            NodeKind::Output => "Output",
        }
    }

    pub fn category(&self) -> NodeCategory {
        match self {
            NodeKind::Xor | NodeKind::Rc4 | NodeKind::Aes | NodeKind::Base64 => {
                NodeCategory::Crypto
            }
            NodeKind::Md5 | NodeKind::Sha1 | NodeKind::Sha256 => NodeCategory::Hash,
            NodeKind::UrlEncode | NodeKind::Hex | NodeKind::Rot | NodeKind::Atbash => {
                NodeCategory::Encoding
            }
            NodeKind::Reverse
            | NodeKind::Zlib
            | NodeKind::Gzip
            | NodeKind::Substring
            | NodeKind::Repeat
            | NodeKind::TakeBytes => NodeCategory::Utility,
            NodeKind::HexInput | NodeKind::TextInput | NodeKind::FileInput | NodeKind::Output => {
                NodeCategory::InputOutput
            }
        }
    }

    pub fn role(&self) -> NodeRole {
        match self {
            NodeKind::HexInput | NodeKind::TextInput | NodeKind::FileInput => NodeRole::Source,
            NodeKind::Output => NodeRole::Sink,
            _ => NodeRole::Transform,
        }
    }

    /// Check if this node kind is a source node.
    pub fn is_source(&self) -> bool {
        self.role() == NodeRole::Source
    }

    /// Check if this node kind is a sink node.
    pub fn is_sink(&self) -> bool {
        self.role() == NodeRole::Sink
    }

    /// Port descriptors, inputs first.
    pub fn ports(&self) -> &'static [PortDescriptor] {
        match self {
            NodeKind::Xor | NodeKind::Rc4 => KEYED_PORTS,
            NodeKind::Aes => AES_PORTS,
            NodeKind::Md5 | NodeKind::Sha1 | NodeKind::Sha256 => HASH_PORTS,
            NodeKind::HexInput | NodeKind::TextInput | NodeKind::FileInput => SOURCE_PORTS,
            NodeKind::Output => SINK_PORTS,
            _ => DATA_TO_OUTPUT,
        }
    }

    pub fn input_ports(&self) -> impl Iterator<Item = &'static PortDescriptor> {
        self.ports().iter().filter(|p| p.is_input())
    }

    pub fn output_ports(&self) -> impl Iterator<Item = &'static PortDescriptor> {
        self.ports().iter().filter(|p| p.is_output())
    }

    pub fn port(&self, name: &str) -> Option<&'static PortDescriptor> {
        self.ports().iter().find(|p| p.name == name)
    }

    /// Parameter descriptors with their defaults.
    pub fn parameters(&self) -> &'static [ParamDescriptor] {
        match self {
            NodeKind::Xor | NodeKind::Rc4 => KEY_PARAMS,
            NodeKind::Aes => AES_PARAMS,
            NodeKind::Base64 | NodeKind::UrlEncode | NodeKind::Hex => CODEC_PARAMS,
            NodeKind::Md5 | NodeKind::Sha1 | NodeKind::Sha256 => HASH_PARAMS,
            NodeKind::Rot => ROT_PARAMS,
            NodeKind::Zlib => ZLIB_PARAMS,
            NodeKind::Gzip => GZIP_PARAMS,
            NodeKind::Substring => SUBSTRING_PARAMS,
            NodeKind::Repeat => REPEAT_PARAMS,
            NodeKind::TakeBytes => TAKE_PARAMS,
            NodeKind::HexInput => HEX_INPUT_PARAMS,
            NodeKind::TextInput => TEXT_INPUT_PARAMS,
            NodeKind::FileInput => FILE_INPUT_PARAMS,
            NodeKind::Atbash | NodeKind::Reverse | NodeKind::Output => NO_PARAMS,
        }
    }

    pub fn parameter(&self, name: &str) -> Option<&'static ParamDescriptor> {
        self.parameters().iter().find(|p| p.name == name)
    }

    /// The source parameter a runner writes to when feeding this node.
    pub fn input_parameter(&self) -> Option<&'static str> {
        match self {
            NodeKind::HexInput => Some("hex_data"),
            NodeKind::TextInput => Some("text_data"),
            NodeKind::FileInput => Some("file_path"),
            _ => None,
        }
    }

    /// Get a detailed description of what this node does.
    pub fn description(&self) -> &'static str {
        match self {
            NodeKind::Xor => "XORs data with a repeating key.\n\
                 Key comes from the key port, or from Key (hex).",
            NodeKind::Rc4 => "RC4 stream cipher.\n\
                 Encryption and decryption are the same operation.",
            NodeKind::Aes => "AES in CBC, ECB or CTR mode.\n\
                 Keys that are not 16/24/32 bytes are fitted to 16.\n\
                 CBC/ECB encryption adds PKCS#7 padding.",
            NodeKind::Base64 => "Base64 encode or decode.",
            NodeKind::Md5 => "MD5 digest, as hex text or raw bytes.",
            NodeKind::Sha1 => "SHA-1 digest, as hex text or raw bytes.",
            NodeKind::Sha256 => "SHA-256 digest, as hex text or raw bytes.",
            NodeKind::UrlEncode => "Percent-encode or decode text.\n\
                 Only unreserved characters are left as-is.",
            NodeKind::Hex => "Convert bytes to hex text and back.\n\
                 Decoding ignores whitespace.",
            NodeKind::Rot => "Caesar shift over ASCII letters.",
            NodeKind::Atbash => "Mirror ASCII letters across the alphabet.",
            NodeKind::Reverse => "Reverse byte order.",
            NodeKind::Zlib => "Zlib compress/decompress, or raw deflate/inflate.",
            NodeKind::Gzip => "Gzip compress/decompress.",
            NodeKind::Substring => "Slice data[start:end].\n\
                 Negative indices count from the end.",
            NodeKind::Repeat => "Repeat data Count times (at least once).",
            NodeKind::TakeBytes => "Take bytes by Start + Length or Start + End.\n\
                 Negative indices count from the end.",
            NodeKind::HexInput => "Bytes from hex text.",
            NodeKind::TextInput => "Bytes from UTF-8 text.",
            NodeKind::FileInput => "Bytes read from a file at evaluation time.",
            NodeKind::Output => "Captures its input for inspection.",
        }
    }
}

impl std::fmt::Display for NodeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

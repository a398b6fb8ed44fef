//! Text-level codecs and classical letter ciphers.

use crate::pipeline::error::{TransformError, TransformResult};
use crate::pipeline::node::NodeContext;
use crate::pipeline::nodes::params::{parse_hex, parse_int, Choice, CodecMode};

const DEFAULT_SHIFT: i64 = 13;

/// Percent-encode the UTF-8 text in `data`; nothing but unreserved
/// characters is left as-is.
pub fn url_encode(data: &[u8]) -> Vec<u8> {
    let text = String::from_utf8_lossy(data);
    urlencoding::encode(&text).into_owned().into_bytes()
}

/// Decode percent escapes. Malformed escapes are kept literally and
/// invalid UTF-8 in the result is replaced.
pub fn url_decode(data: &[u8]) -> Vec<u8> {
    let text = String::from_utf8_lossy(data);
    let raw = urlencoding::decode_binary(text.as_bytes());
    String::from_utf8_lossy(&raw).into_owned().into_bytes()
}

pub(super) fn url(ctx: &NodeContext) -> TransformResult {
    let data = ctx.input("data");
    if data.is_empty() {
        return Ok(Vec::new());
    }
    Ok(match CodecMode::parse_or_default(ctx.param("mode")) {
        CodecMode::Encode => url_encode(data),
        CodecMode::Decode => url_decode(data),
    })
}

pub fn hex_decode(data: &[u8]) -> TransformResult {
    let text = String::from_utf8_lossy(data);
    parse_hex(&text).ok_or_else(|| TransformError::Decode("invalid hex text".to_string()))
}

pub(super) fn hex(ctx: &NodeContext) -> TransformResult {
    let data = ctx.input("data");
    if data.is_empty() {
        return Ok(Vec::new());
    }
    match CodecMode::parse_or_default(ctx.param("mode")) {
        CodecMode::Encode => Ok(hex::encode(data).into_bytes()),
        CodecMode::Decode => hex_decode(data),
    }
}

fn rotate_letter(byte: u8, shift: u8) -> u8 {
    match byte {
        b'a'..=b'z' => (byte - b'a' + shift) % 26 + b'a',
        b'A'..=b'Z' => (byte - b'A' + shift) % 26 + b'A',
        _ => byte,
    }
}

/// Caesar shift over ASCII letters. `shift` may be any integer.
pub fn rot(data: &[u8], shift: i64) -> Vec<u8> {
    let shift = shift.rem_euclid(26) as u8;
    data.iter().map(|&b| rotate_letter(b, shift)).collect()
}

pub(super) fn rot_n(ctx: &NodeContext) -> TransformResult {
    let shift = parse_int(ctx.param("shift")).unwrap_or(DEFAULT_SHIFT);
    Ok(rot(ctx.input("data"), shift))
}

pub fn atbash(data: &[u8]) -> Vec<u8> {
    data.iter()
        .map(|&b| match b {
            b'a'..=b'z' => b'z' - (b - b'a'),
            b'A'..=b'Z' => b'Z' - (b - b'A'),
            _ => b,
        })
        .collect()
}

pub(super) fn atbash_node(ctx: &NodeContext) -> TransformResult {
    Ok(atbash(ctx.input("data")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_url_encode_reserves_everything() {
        assert_eq!(url_encode(b"a b/c?d=e&f"), b"a%20b%2Fc%3Fd%3De%26f".to_vec());
        assert_eq!(url_encode(b"-_.~"), b"-_.~".to_vec());
        assert_eq!(url_encode("é".as_bytes()), b"%C3%A9".to_vec());
    }

    #[test]
    fn test_url_decode() {
        assert_eq!(url_decode(b"a%20b%2Fc"), b"a b/c".to_vec());
        assert_eq!(url_decode(b"100%"), b"100%".to_vec());
        assert_eq!(url_decode(b"%ff"), "\u{fffd}".as_bytes().to_vec());
    }

    #[test]
    fn test_hex_decode() {
        assert_eq!(hex_decode(b"48 65\n6c6c6f").unwrap(), b"Hello".to_vec());
        assert!(matches!(hex_decode(b"4"), Err(TransformError::Decode(_))));
        assert!(hex_decode(b"zz").is_err());
    }

    #[test]
    fn test_rot_shifts() {
        assert_eq!(rot(b"Hello, World!", 13), b"Uryyb, Jbeyq!".to_vec());
        assert_eq!(rot(b"abc", -1), b"zab".to_vec());
        assert_eq!(rot(b"abc", 27), b"bcd".to_vec());
    }

    #[test]
    fn test_atbash() {
        assert_eq!(atbash(b"Hello, World!"), b"Svool, Dliow!".to_vec());
    }

    proptest! {
        #[test]
        fn test_rot13_is_involution(data in prop::collection::vec(any::<u8>(), 0..128)) {
            prop_assert_eq!(rot(&rot(&data, 13), 13), data);
        }

        #[test]
        fn test_atbash_is_involution(data in prop::collection::vec(any::<u8>(), 0..128)) {
            prop_assert_eq!(atbash(&atbash(&data)), data);
        }

        #[test]
        fn test_rot_inverse(data in "[a-zA-Z ]{0,64}", shift in -100i64..100) {
            let bytes = data.as_bytes();
            prop_assert_eq!(rot(&rot(bytes, shift), -shift), bytes.to_vec());
        }
    }
}

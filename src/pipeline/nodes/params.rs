//! Fail-soft parameter parsing shared by the catalog.
//!
//! Parameters arrive as free text typed into an editor. None of these helpers
//! report errors: a malformed value yields `None` and the caller substitutes
//! its documented default.

/// Parse hex text, ignoring any whitespace. `""` parses to an empty vector.
pub fn parse_hex(text: &str) -> Option<Vec<u8>> {
    let compact: String = text.chars().filter(|c| !c.is_whitespace()).collect();
    hex::decode(compact).ok()
}

/// Parse a signed integer, ignoring surrounding whitespace.
pub fn parse_int(text: &str) -> Option<i64> {
    text.trim().parse().ok()
}

/// Parse an optional integer: blank means "not given".
pub fn parse_optional_int(text: &str) -> Option<i64> {
    if text.trim().is_empty() {
        None
    } else {
        parse_int(text)
    }
}

/// Slice with signed bounds: negative indices count from the end and
/// out-of-range bounds clamp instead of failing.
pub fn signed_slice(data: &[u8], start: Option<i64>, end: Option<i64>) -> &[u8] {
    let len = data.len() as i64;
    let clamp = |i: i64| {
        if i < 0 {
            i.saturating_add(len).max(0)
        } else {
            i.min(len)
        }
    };
    let start = start.map_or(0, clamp);
    let end = end.map_or(len, clamp);
    if start >= end {
        &[]
    } else {
        &data[start as usize..end as usize]
    }
}

/// Combo-style parameter values.
pub trait Choice: Sized + Copy + Default {
    /// Labels in the same order as the variants.
    const LABELS: &'static [&'static str];

    fn from_index(index: usize) -> Option<Self>;

    /// Parse a label, falling back to the default on anything unknown.
    fn parse_or_default(text: &str) -> Self {
        Self::LABELS
            .iter()
            .position(|label| *label == text.trim())
            .and_then(Self::from_index)
            .unwrap_or_default()
    }
}

/// Plain encode/decode switch used by several codecs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CodecMode {
    #[default]
    Encode,
    Decode,
}

impl Choice for CodecMode {
    const LABELS: &'static [&'static str] = crate::pipeline::node_type::MODE_ENCODE_DECODE;

    fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(CodecMode::Encode),
            1 => Some(CodecMode::Decode),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_parse_hex() {
        assert_eq!(parse_hex("48 65\n6c6C 6f"), Some(b"Hello".to_vec()));
        assert_eq!(parse_hex(""), Some(Vec::new()));
        assert_eq!(parse_hex("abc"), None);
        assert_eq!(parse_hex("zz"), None);
    }

    #[test]
    fn test_parse_int() {
        assert_eq!(parse_int(" 42 "), Some(42));
        assert_eq!(parse_int("-5"), Some(-5));
        assert_eq!(parse_int("+7"), Some(7));
        assert_eq!(parse_int("4.5"), None);
        assert_eq!(parse_optional_int("  "), None);
        assert_eq!(parse_optional_int("x"), None);
        assert_eq!(parse_optional_int("3"), Some(3));
    }

    #[test]
    fn test_signed_slice() {
        let data = b"0123456789";
        assert_eq!(signed_slice(data, Some(2), Some(5)), b"234");
        assert_eq!(signed_slice(data, Some(-3), None), b"789");
        assert_eq!(signed_slice(data, None, Some(-8)), b"01");
        assert_eq!(signed_slice(data, Some(-100), Some(2)), b"01");
        assert_eq!(signed_slice(data, Some(8), Some(100)), b"89");
        assert_eq!(signed_slice(data, Some(5), Some(2)), b"");
        assert_eq!(signed_slice(data, Some(i64::MIN), Some(i64::MAX)), data);
    }

    #[test]
    fn test_choice_fallback() {
        assert_eq!(CodecMode::parse_or_default("Decode"), CodecMode::Decode);
        assert_eq!(CodecMode::parse_or_default("decode?"), CodecMode::Encode);
    }

    proptest! {
        #[test]
        fn test_signed_slice_never_panics(
            data in prop::collection::vec(any::<u8>(), 0..64),
            start in prop::option::of(any::<i64>()),
            end in prop::option::of(any::<i64>()),
        ) {
            let out = signed_slice(&data, start, end);
            prop_assert!(out.len() <= data.len());
        }
    }
}

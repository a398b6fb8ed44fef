//! Presentation of sink buffers.

use std::fmt::Write as _;
use std::str::FromStr;

const HEXDUMP_WIDTH: usize = 16;

/// How a buffer is rendered as text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewMode {
    /// One char per byte, Latin-1 style.
    Raw,
    /// Lowercase hex, no separators.
    #[default]
    Hex,
    /// Offset, hex bytes and printable ASCII, 16 bytes per row.
    HexDump,
}

impl ViewMode {
    pub fn all() -> &'static [ViewMode] {
        &[ViewMode::Raw, ViewMode::Hex, ViewMode::HexDump]
    }

    pub fn label(&self) -> &'static str {
        match self {
            ViewMode::Raw => "raw",
            ViewMode::Hex => "hex",
            ViewMode::HexDump => "hexdump",
        }
    }
}

impl std::fmt::Display for ViewMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ViewMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ViewMode::all()
            .iter()
            .copied()
            .find(|m| m.label().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown view '{s}', expected raw, hex or hexdump"))
    }
}

/// Render `data` in the given view.
pub fn render(data: &[u8], mode: ViewMode) -> String {
    match mode {
        ViewMode::Raw => data.iter().map(|&b| b as char).collect(),
        ViewMode::Hex => hex::encode(data),
        ViewMode::HexDump => hexdump(data),
    }
}

fn hexdump(data: &[u8]) -> String {
    let mut out = String::new();
    for (row, chunk) in data.chunks(HEXDUMP_WIDTH).enumerate() {
        let hex = chunk
            .iter()
            .map(|b| format!("{b:02x}"))
            .collect::<Vec<_>>()
            .join(" ");
        let ascii: String = chunk
            .iter()
            .map(|&b| if b.is_ascii_graphic() || b == b' ' { b as char } else { '.' })
            .collect();
        let _ = writeln!(out, "{:08x}  {:<48}  {}", row * HEXDUMP_WIDTH, hex, ascii);
    }
    out
}

/// One-line summary, e.g. `Result: 15 bytes`.
pub fn summary(name: &str, data: &[u8]) -> String {
    match data.len() {
        0 => format!("{name}: empty"),
        1 => format!("{name}: 1 byte"),
        n => format!("{name}: {n} bytes"),
    }
}

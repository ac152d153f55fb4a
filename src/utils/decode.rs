// src/utils/decode.rs

//! Byte-to-text decoding for report bodies.
//!
//! Encodings are tried in a fixed order and the first strict decode wins.
//! Decoding never fails: the last resort is a lossy Windows-1252 pass.

use std::borrow::Cow;

use encoding_rs::{Encoding, UTF_8, UTF_16BE, UTF_16LE, WINDOWS_1252};

const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];

/// Bytes with no mapping in Windows-1252.
const UNDEFINED_1252: [u8; 5] = [0x81, 0x8D, 0x8F, 0x90, 0x9D];

/// Encodings the decoder can report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextEncoding {
    Utf8,
    /// UTF-16 with a byte order mark
    Utf16,
    Utf16Le,
    Utf16Be,
    Windows1252,
    /// Windows-1252 with undefined bytes dropped
    Windows1252Lossy,
}

/// Strict decode attempts, in order.
pub const DECODE_ORDER: [TextEncoding; 5] = [
    TextEncoding::Utf8,
    TextEncoding::Utf16,
    TextEncoding::Utf16Le,
    TextEncoding::Utf16Be,
    TextEncoding::Windows1252,
];

impl TextEncoding {
    pub fn label(self) -> &'static str {
        match self {
            TextEncoding::Utf8 => "utf-8",
            TextEncoding::Utf16 => "utf-16",
            TextEncoding::Utf16Le => "utf-16le",
            TextEncoding::Utf16Be => "utf-16be",
            TextEncoding::Windows1252 => "windows-1252",
            TextEncoding::Windows1252Lossy => "windows-1252 (lossy)",
        }
    }

    fn decode_strict(self, bytes: &[u8]) -> Option<String> {
        match self {
            // BOM-less UTF-16 ASCII is also valid UTF-8; defer to the UTF-16 steps.
            TextEncoding::Utf8 if utf16_high_byte(bytes).is_some() => None,
            TextEncoding::Utf8 => strict(UTF_8, bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes)),
            TextEncoding::Utf16 => match bytes {
                [0xFF, 0xFE, rest @ ..] => strict(UTF_16LE, rest),
                [0xFE, 0xFF, rest @ ..] => strict(UTF_16BE, rest),
                _ => None,
            },
            TextEncoding::Utf16Le if utf16_high_byte(bytes) == Some(1) => strict(UTF_16LE, bytes),
            TextEncoding::Utf16Be if utf16_high_byte(bytes) == Some(0) => strict(UTF_16BE, bytes),
            TextEncoding::Utf16Le | TextEncoding::Utf16Be => None,
            TextEncoding::Windows1252 => {
                if bytes.iter().any(|b| UNDEFINED_1252.contains(b)) {
                    None
                } else {
                    strict(WINDOWS_1252, bytes)
                }
            }
            TextEncoding::Windows1252Lossy => Some(decode_lossy(bytes)),
        }
    }
}

/// Decode report bytes into text.
pub fn decode_report_bytes(bytes: &[u8]) -> String {
    decode_with_encoding(bytes).0
}

/// Decode report bytes, also returning the encoding that succeeded.
pub fn decode_with_encoding(bytes: &[u8]) -> (String, TextEncoding) {
    for encoding in DECODE_ORDER {
        if let Some(text) = encoding.decode_strict(bytes) {
            return (text, encoding);
        }
    }
    (decode_lossy(bytes), TextEncoding::Windows1252Lossy)
}

fn strict(encoding: &'static Encoding, bytes: &[u8]) -> Option<String> {
    encoding
        .decode_without_bom_handling_and_without_replacement(bytes)
        .map(Cow::into_owned)
}

fn decode_lossy(bytes: &[u8]) -> String {
    let kept: Vec<u8> = bytes
        .iter()
        .copied()
        .filter(|b| !UNDEFINED_1252.contains(b))
        .collect();
    WINDOWS_1252.decode_without_bom_handling(&kept).0.into_owned()
}

/// Parity of the high byte when the input is shaped like BOM-less UTF-16.
///
/// Plausible only for even-length input where at least half of the code
/// units carry a zero byte in the same slot, as Latin text does. A stray NUL
/// in ordinary text does not qualify.
fn utf16_high_byte(bytes: &[u8]) -> Option<usize> {
    if bytes.is_empty() || bytes.len() % 2 != 0 {
        return None;
    }
    let mut zeros = [0usize; 2];
    for (i, b) in bytes.iter().enumerate() {
        if *b == 0 {
            zeros[i % 2] += 1;
        }
    }
    let units = bytes.len() / 2;
    let high = if zeros[1] > zeros[0] { 1 } else { 0 };
    (zeros[high] > zeros[1 - high] && zeros[high] * 2 >= units).then_some(high)
}

//! Text encoding detection by ordered fallback.
//!
//! CMS exports are not consistently encoded. Files are tried against
//! UTF-8, UTF-8 with BOM, Windows-1252 and Latin-1 in that order; the first
//! encoding that decodes the whole file without error wins.

use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

use encoding_rs::{UTF_8, WINDOWS_1252};

use crate::error::IngestError;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Code points Windows-1252 leaves undefined. `encoding_rs` maps them to C1
/// controls, so they are rejected here to keep cp1252 strict.
const CP1252_UNDEFINED: [char; 5] = ['\u{81}', '\u{8D}', '\u{8F}', '\u{90}', '\u{9D}'];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextEncoding {
    Utf8,
    Utf8Sig,
    Windows1252,
    Latin1,
}

impl TextEncoding {
    /// Auto-detection order.
    pub const FALLBACK_ORDER: [TextEncoding; 4] = [
        TextEncoding::Utf8,
        TextEncoding::Utf8Sig,
        TextEncoding::Windows1252,
        TextEncoding::Latin1,
    ];

    pub fn label(self) -> &'static str {
        match self {
            TextEncoding::Utf8 => "utf-8",
            TextEncoding::Utf8Sig => "utf-8-sig",
            TextEncoding::Windows1252 => "cp1252",
            TextEncoding::Latin1 => "latin1",
        }
    }

    /// Decode `bytes` strictly, returning `None` on any malformed sequence.
    pub fn decode(self, bytes: &[u8]) -> Option<String> {
        match self {
            TextEncoding::Utf8 => UTF_8
                .decode_without_bom_handling_and_without_replacement(bytes)
                .map(Cow::into_owned),
            TextEncoding::Utf8Sig => {
                let body = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
                UTF_8
                    .decode_without_bom_handling_and_without_replacement(body)
                    .map(Cow::into_owned)
            }
            TextEncoding::Windows1252 => {
                let text = WINDOWS_1252.decode_without_bom_handling_and_without_replacement(bytes)?;
                if text.contains(CP1252_UNDEFINED) {
                    None
                } else {
                    Some(text.into_owned())
                }
            }
            TextEncoding::Latin1 => Some(bytes.iter().copied().map(char::from).collect()),
        }
    }
}

impl fmt::Display for TextEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for TextEncoding {
    type Err = IngestError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let key = value.trim().to_ascii_lowercase().replace('_', "-");
        match key.as_str() {
            "utf-8" | "utf8" => Ok(TextEncoding::Utf8),
            "utf-8-sig" | "utf8-sig" => Ok(TextEncoding::Utf8Sig),
            "cp1252" | "windows-1252" => Ok(TextEncoding::Windows1252),
            "latin1" | "latin-1" | "iso-8859-1" => Ok(TextEncoding::Latin1),
            _ => Err(IngestError::UnknownEncoding {
                name: value.to_string(),
            }),
        }
    }
}

/// Encodings to attempt: only the explicit one when given, else the full order.
pub fn encodings_to_try(explicit: Option<TextEncoding>) -> Vec<TextEncoding> {
    match explicit {
        Some(encoding) => vec![encoding],
        None => TextEncoding::FALLBACK_ORDER.to_vec(),
    }
}

/// Decode with the first encoding that succeeds.
pub fn decode_with_fallback(
    bytes: &[u8],
    explicit: Option<TextEncoding>,
) -> Option<(String, TextEncoding)> {
    encodings_to_try(explicit)
        .into_iter()
        .find_map(|encoding| encoding.decode(bytes).map(|text| (text, encoding)))
}

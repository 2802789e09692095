//! Named character sets for the encoding functions

use log::debug;

use crate::evaluator::{EvaluationError, EvaluationResult};

/// Character set a string is encoded into before base64 or URL encoding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Charset {
    /// UTF-8
    Utf8,
    /// 7-bit US-ASCII
    UsAscii,
    /// ISO-8859-1 (Latin-1)
    Latin1,
    /// UTF-16, big-endian with a byte order mark
    Utf16,
    /// UTF-16 big-endian, no byte order mark
    Utf16Be,
    /// UTF-16 little-endian, no byte order mark
    Utf16Le,
}

impl Charset {
    /// Resolve a charset name on behalf of `function`.
    ///
    /// A syntactically illegal name is an encoding failure; a legal name that is
    /// not supported is reported as an unsupported charset.
    pub fn resolve(name: &str, function: &'static str) -> EvaluationResult<Self> {
        if !is_legal_name(name) {
            return Err(EvaluationError::Encoding { function });
        }

        let charset = match name.to_ascii_lowercase().as_str() {
            "utf-8" | "utf8" => Charset::Utf8,
            "us-ascii" | "ascii" => Charset::UsAscii,
            "iso-8859-1" | "iso8859-1" | "iso_8859_1" | "latin1" => Charset::Latin1,
            "utf-16" | "utf16" => Charset::Utf16,
            "utf-16be" | "utf16be" => Charset::Utf16Be,
            "utf-16le" | "utf16le" => Charset::Utf16Le,
            _ => {
                return Err(EvaluationError::UnsupportedCharset {
                    function,
                    charset: name.to_string(),
                });
            }
        };
        debug!("{function}: resolved charset {name} to {charset:?}");
        Ok(charset)
    }

    /// Encode text; characters the charset cannot represent become `?`
    pub fn encode(&self, text: &str) -> Vec<u8> {
        match self {
            Charset::Utf8 => text.as_bytes().to_vec(),
            Charset::UsAscii => encode_single_byte(text, 0x7F),
            Charset::Latin1 => encode_single_byte(text, 0xFF),
            Charset::Utf16 => {
                let mut bytes = vec![0xFE, 0xFF];
                bytes.extend(text.encode_utf16().flat_map(u16::to_be_bytes));
                bytes
            }
            Charset::Utf16Be => text.encode_utf16().flat_map(u16::to_be_bytes).collect(),
            Charset::Utf16Le => text.encode_utf16().flat_map(u16::to_le_bytes).collect(),
        }
    }
}

fn encode_single_byte(text: &str, max: u32) -> Vec<u8> {
    text.chars()
        .map(|c| match u8::try_from(c as u32) {
            Ok(byte) if u32::from(byte) <= max => byte,
            _ => b'?',
        })
        .collect()
}

fn is_legal_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphanumeric() => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '+' | ':' | '_' | '.'))
}

// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Text encodings supported for log files.

use serde::{Deserialize, Serialize};

/// Encoding used to turn entry text into file bytes.
///
/// The preamble (byte order mark) is written once at the start of every
/// new file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TextEncoding {
    #[default]
    Utf8,
    Utf8Bom,
    Utf16Le,
    Utf16Be,
}

impl TextEncoding {
    pub fn preamble(self) -> &'static [u8] {
        match self {
            TextEncoding::Utf8 => &[],
            TextEncoding::Utf8Bom => &[0xEF, 0xBB, 0xBF],
            TextEncoding::Utf16Le => &[0xFF, 0xFE],
            TextEncoding::Utf16Be => &[0xFE, 0xFF],
        }
    }

    /// Number of bytes `text` occupies once encoded (preamble excluded).
    pub fn byte_count(self, text: &str) -> u64 {
        match self {
            TextEncoding::Utf8 | TextEncoding::Utf8Bom => text.len() as u64,
            TextEncoding::Utf16Le | TextEncoding::Utf16Be => {
                text.encode_utf16().count() as u64 * 2
            }
        }
    }

    /// Append the encoded form of `text` to `buf`.
    pub fn encode_into(self, text: &str, buf: &mut Vec<u8>) {
        match self {
            TextEncoding::Utf8 | TextEncoding::Utf8Bom => buf.extend_from_slice(text.as_bytes()),
            TextEncoding::Utf16Le => {
                buf.reserve(text.len() * 2);
                for unit in text.encode_utf16() {
                    buf.extend_from_slice(&unit.to_le_bytes());
                }
            }
            TextEncoding::Utf16Be => {
                buf.reserve(text.len() * 2);
                for unit in text.encode_utf16() {
                    buf.extend_from_slice(&unit.to_be_bytes());
                }
            }
        }
    }
}

#[cfg(test)]
#[path = "encoding_tests.rs"]
mod tests;

//! Opaque pagination cursors for suggestion results.
//!
//! A cursor is the fixed `cursor:` tag followed by the base64 of the
//! decimal offset. Decoding is forgiving: anything malformed falls back to
//! offset 0 instead of failing the request.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use log::warn;

const CURSOR_PREFIX: &str = "cursor:";

/// Encodes a zero-based offset as an opaque cursor.
///
/// # Examples
///
/// ```
/// use stationcast::{decode_cursor, encode_cursor};
///
/// let cursor = encode_cursor(8);
/// assert!(cursor.starts_with("cursor:"));
/// assert_eq!(decode_cursor(&cursor), 8);
/// ```
pub fn encode_cursor(offset: usize) -> String {
    format!("{}{}", CURSOR_PREFIX, STANDARD.encode(offset.to_string()))
}

/// Decodes a cursor back to its offset.
///
/// A missing tag is tolerated (the remainder is decoded as-is); bad
/// base64, non-UTF-8 bytes or a non-numeric payload all fall back to 0.
pub fn decode_cursor(cursor: &str) -> usize {
    let raw = cursor.strip_prefix(CURSOR_PREFIX).unwrap_or(cursor);
    let decoded = match STANDARD.decode(raw) {
        Ok(bytes) => bytes,
        Err(_) => {
            warn!("Invalid cursor provided: {}", cursor);
            return 0;
        }
    };
    match std::str::from_utf8(&decoded)
        .ok()
        .and_then(|text| text.parse::<usize>().ok())
    {
        Some(offset) => offset,
        None => {
            warn!("Invalid cursor provided: {}", cursor);
            0
        }
    }
}

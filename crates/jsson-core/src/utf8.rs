//! UTF-8 validation, encoding and decoding over raw bytes.
//!
//! All three operations apply the same well-formedness rules:
//!
//! - the lead byte determines the sequence length (1–4 bytes)
//! - every continuation byte lies in `0x80..=0xBF`
//! - sequences must not be truncated
//! - overlong forms are rejected (a code point must use its shortest encoding)
//! - code points above `U+10FFFF` and surrogates `U+D800..=U+DFFF` are rejected

use crate::error::{ErrorCode, JsonError, Result};

/// Highest Unicode code point.
pub const MAX_CODE_POINT: i32 = 0x10FFFF;

/// Sequence length implied by a lead byte, or `None` if the byte cannot start one.
fn sequence_len(lead: u8) -> Option<usize> {
    match lead {
        0x00..=0x7F => Some(1),
        0xC0..=0xDF => Some(2),
        0xE0..=0xEF => Some(3),
        0xF0..=0xF4 => Some(4),
        _ => None,
    }
}

/// Decode the sequence starting at `start`, returning the code point and its length.
fn decode_at(bytes: &[u8], start: usize) -> Option<(u32, usize)> {
    let lead = *bytes.get(start)?;
    let len = sequence_len(lead)?;
    let seq = bytes.get(start..start + len)?;

    if seq[1..].iter().any(|b| !(0x80..=0xBF).contains(b)) {
        return None;
    }

    let cp = match len {
        1 => u32::from(lead),
        2 => u32::from(lead & 0x1F),
        3 => u32::from(lead & 0x0F),
        _ => u32::from(lead & 0x07),
    };
    let cp = seq[1..]
        .iter()
        .fold(cp, |acc, b| (acc << 6) | u32::from(b & 0x3F));

    let min = match len {
        1 => 0,
        2 => 0x80,
        3 => 0x800,
        _ => 0x10000,
    };
    if cp < min || cp > MAX_CODE_POINT as u32 || (0xD800..=0xDFFF).contains(&cp) {
        return None;
    }
    Some((cp, len))
}

/// Check that `bytes` is a complete, well-formed UTF-8 sequence.
///
/// Returns a plain boolean; the failure position is not reported.
pub fn is_valid(bytes: &[u8]) -> bool {
    let mut i = 0;
    while i < bytes.len() {
        match decode_at(bytes, i) {
            Some((_, len)) => i += len,
            None => return false,
        }
    }
    true
}

/// Append the UTF-8 encoding of `code_point` to `out`, returning the number of
/// bytes written (1–4).
///
/// Fails with `InvalidArgument` when the code point is negative or above
/// `U+10FFFF`, and with `InvalidUTF8` for surrogates, which have no UTF-8 form.
pub fn encode(code_point: i32, out: &mut Vec<u8>) -> Result<usize> {
    if !(0..=MAX_CODE_POINT).contains(&code_point) {
        return Err(JsonError::new(
            ErrorCode::InvalidArgument,
            format!("code point {code_point:#x} out of range"),
        ));
    }
    let cp = code_point as u32;
    if (0xD800..=0xDFFF).contains(&cp) {
        return Err(JsonError::new(
            ErrorCode::InvalidUTF8,
            format!("surrogate code point {cp:#06x} cannot be encoded"),
        ));
    }

    let written = if cp < 0x80 {
        out.push(cp as u8);
        1
    } else if cp < 0x800 {
        out.push(0xC0 | (cp >> 6) as u8);
        out.push(0x80 | (cp & 0x3F) as u8);
        2
    } else if cp < 0x10000 {
        out.push(0xE0 | (cp >> 12) as u8);
        out.push(0x80 | ((cp >> 6) & 0x3F) as u8);
        out.push(0x80 | (cp & 0x3F) as u8);
        3
    } else {
        out.push(0xF0 | (cp >> 18) as u8);
        out.push(0x80 | ((cp >> 12) & 0x3F) as u8);
        out.push(0x80 | ((cp >> 6) & 0x3F) as u8);
        out.push(0x80 | (cp & 0x3F) as u8);
        4
    };
    Ok(written)
}

/// Decode one code point starting at `*index`.
///
/// On success `*index` moves past the consumed bytes. On any malformation, or when
/// `*index` is at or beyond the end, returns `None` and leaves `*index` untouched.
pub fn decode(bytes: &[u8], index: &mut usize) -> Option<char> {
    let (cp, len) = decode_at(bytes, *index)?;
    let ch = char::from_u32(cp)?;
    *index += len;
    Some(ch)
}

// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Binary encoding primitives: fixed-width integers and short strings.
//!
//! Every reader takes the buffer and a caller-owned cursor. Nothing is stored
//! between calls, so any number of decoders can walk the same buffer at once
//! without aliasing each other's position. Integers are little-endian.
//!
//! Strings are a one-byte length followed by UTF-8 bytes. A length of `0xFF`
//! encodes "no string" (a missing prefix, for example), which is different
//! from the empty string.

use crate::error::{DictionaryError, Result};

/// Length byte marking an absent string.
pub const NULL_STRING: u8 = 0xFF;

/// Longest encodable string, in UTF-8 bytes.
pub const MAX_STRING_BYTES: usize = 254;

// ============================================================================
// READERS
// ============================================================================

#[inline]
fn take<'a>(buf: &'a [u8], pos: &mut usize, len: usize, what: &str) -> Result<&'a [u8]> {
    let start = *pos;
    let end = start
        .checked_add(len)
        .filter(|&end| end <= buf.len())
        .ok_or_else(|| {
            DictionaryError::corrupt(
                start,
                format!(
                    "truncated {} (need {} bytes, {} left)",
                    what,
                    len,
                    buf.len().saturating_sub(start)
                ),
            )
        })?;
    *pos = end;
    Ok(&buf[start..end])
}

/// Read a little-endian `i32` and advance `pos` by 4.
pub fn read_i32(buf: &[u8], pos: &mut usize) -> Result<i32> {
    let bytes = take(buf, pos, 4, "i32")?;
    Ok(i32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
}

/// Read a little-endian `i16` and advance `pos` by 2.
pub fn read_i16(buf: &[u8], pos: &mut usize) -> Result<i16> {
    let bytes = take(buf, pos, 2, "i16")?;
    Ok(i16::from_le_bytes([bytes[0], bytes[1]]))
}

/// Read a little-endian `u16` and advance `pos` by 2.
pub fn read_u16(buf: &[u8], pos: &mut usize) -> Result<u16> {
    let bytes = take(buf, pos, 2, "u16")?;
    Ok(u16::from_le_bytes([bytes[0], bytes[1]]))
}

/// Read an `i32` that must be a valid offset into `buf`.
///
/// Offsets equal to `buf.len()` are allowed: the last record ends there.
pub fn read_offset(buf: &[u8], pos: &mut usize) -> Result<usize> {
    let at = *pos;
    let raw = read_i32(buf, pos)?;
    if raw < 0 || raw as usize > buf.len() {
        return Err(DictionaryError::corrupt(
            at,
            format!("offset {} outside buffer of {} bytes", raw, buf.len()),
        ));
    }
    Ok(raw as usize)
}

/// Read a length-prefixed string. `None` for the null marker.
pub fn read_string(buf: &[u8], pos: &mut usize) -> Result<Option<String>> {
    let at = *pos;
    let len = take(buf, pos, 1, "string length")?[0];
    if len == NULL_STRING {
        return Ok(None);
    }
    let bytes = take(buf, pos, len as usize, "string")?;
    let text = std::str::from_utf8(bytes)
        .map_err(|e| DictionaryError::corrupt(at, format!("invalid UTF-8 in string: {}", e)))?;
    Ok(Some(text.to_string()))
}

// ============================================================================
// WRITERS
// ============================================================================

pub fn write_i32(buf: &mut Vec<u8>, value: i32) {
    buf.extend_from_slice(&value.to_le_bytes());
}

pub fn write_i16(buf: &mut Vec<u8>, value: i16) {
    buf.extend_from_slice(&value.to_le_bytes());
}

pub fn write_u16(buf: &mut Vec<u8>, value: u16) {
    buf.extend_from_slice(&value.to_le_bytes());
}

/// Write a length-prefixed string (`None` writes the null marker).
///
/// Returns an error for strings longer than [`MAX_STRING_BYTES`].
pub fn write_string(buf: &mut Vec<u8>, value: Option<&str>) -> Result<()> {
    match value {
        None => buf.push(NULL_STRING),
        Some(s) => {
            if s.len() > MAX_STRING_BYTES {
                return Err(DictionaryError::InvalidEntry(format!(
                    "string of {} bytes exceeds {} byte limit",
                    s.len(),
                    MAX_STRING_BYTES
                )));
            }
            buf.push(s.len() as u8);
            buf.extend_from_slice(s.as_bytes());
        }
    }
    Ok(())
}

/// Reserve an `i32` slot to be filled later with [`patch_i32`].
pub fn reserve_i32(buf: &mut Vec<u8>) -> usize {
    let at = buf.len();
    write_i32(buf, 0);
    at
}

/// Overwrite a slot reserved by [`reserve_i32`].
pub fn patch_i32(buf: &mut [u8], at: usize, value: i32) {
    buf[at..at + 4].copy_from_slice(&value.to_le_bytes());
}

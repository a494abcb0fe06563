// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Binary format for derivation dictionary resources.
//!
//! A resource is a compressed container (gzip or brotli) around a flat body.
//! The body is laid out so that a loader can skip anything it doesn't need yet:
//! every group entry and every trie edge carries the offset where it ends, so
//! a lazy load records "this starts here" and jumps straight past it.
//!
//! # Security Considerations
//!
//! Resources are parsed as untrusted input:
//! - Offsets are validated against the buffer length before use
//! - Counts are checked against the bytes that remain
//! - Reads never run past the buffer end
//! - Decompressed size is capped (see [`MAX_BUFFER_SIZE`])
//!
//! # Body Layout
//!
//! All integers are little-endian.
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────┐
//! │ group_count: i32                                           │
//! ├────────────────────────────────────────────────────────────┤
//! │ GROUP ENTRY × group_count                                  │
//! │   entry_end: i32        (offset just past this entry)      │
//! │   attrs: u16            (1 dummy, 2 not-generate, 4 gen.)  │
//! │   lang: u16                                                │
//! │   prefix: string                                           │
//! │   word_count: u16                                          │
//! │   WORD × word_count                                        │
//! │     spelling: string, class: u16, lang: u16, attrs: u16    │
//! ├────────────────────────────────────────────────────────────┤
//! │ ROOT NODE                                                  │
//! │   group_id_count: u16                                      │
//! │   group_id: i32 × group_id_count   (1-based)               │
//! │   child_count: u16                                         │
//! │   CHILD × child_count                                      │
//! │     code_unit: i16      (UTF-16 code unit of the edge)     │
//! │     child_end: i32      (offset just past the subtree)     │
//! │     NODE                (child body, same layout)          │
//! └────────────────────────────────────────────────────────────┘
//! ```
//!
//! `string` is a one-byte length (`0xFF` = absent) followed by UTF-8 bytes.

mod container;
mod encoding;

pub use container::{compress, decompress, Compression, GZIP_MAGIC, MAX_BUFFER_SIZE};
pub use encoding::{
    patch_i32, read_i16, read_i32, read_offset, read_string, read_u16, reserve_i32, write_i16,
    write_i32, write_string, write_u16, MAX_STRING_BYTES, NULL_STRING,
};

use crate::error::{DictionaryError, Result};

/// Smallest possible group entry: `entry_end` + attrs + lang + prefix + word count.
pub const MIN_GROUP_ENTRY_SIZE: usize = 4 + 2 + 2 + 1 + 2;

/// Read a record count and check the remaining bytes could hold that many
/// records of at least `min_record_size` bytes.
pub(crate) fn read_count_i32(buf: &[u8], pos: &mut usize, min_record_size: usize) -> Result<usize> {
    let at = *pos;
    let count = read_i32(buf, pos)?;
    if count < 0 {
        return Err(DictionaryError::corrupt(at, format!("negative count {}", count)));
    }
    check_count(buf, *pos, at, count as usize, min_record_size)
}

/// `u16` flavour of [`read_count_i32`].
pub(crate) fn read_count_u16(buf: &[u8], pos: &mut usize, min_record_size: usize) -> Result<usize> {
    let at = *pos;
    let count = read_u16(buf, pos)? as usize;
    check_count(buf, *pos, at, count, min_record_size)
}

fn check_count(
    buf: &[u8],
    pos: usize,
    at: usize,
    count: usize,
    min_record_size: usize,
) -> Result<usize> {
    let remaining = buf.len().saturating_sub(pos);
    if count.saturating_mul(min_record_size) > remaining {
        return Err(DictionaryError::corrupt(
            at,
            format!(
                "count {} exceeds available bytes {} (min record {} bytes)",
                count, remaining, min_record_size
            ),
        ));
    }
    Ok(count)
}

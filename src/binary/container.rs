// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Compressed container around the dictionary body.
//!
//! Shipped resources are gzip streams. Brotli is accepted too because it packs
//! the trie noticeably tighter and the build tool can emit either. Gzip has a
//! magic number and brotli does not, so anything that doesn't start with
//! `1f 8b` is handed to the brotli decoder.
//!
//! Decompressed output is capped at [`MAX_BUFFER_SIZE`]. A crafted resource
//! that inflates past it is rejected rather than allowed to exhaust memory.

use std::io::{Read, Write};

use flate2::read::GzDecoder;
use flate2::write::GzEncoder;

use crate::error::{DictionaryError, Result};

/// Gzip magic bytes.
pub const GZIP_MAGIC: [u8; 2] = [0x1F, 0x8B];

/// Maximum decompressed body: 256 MB.
pub const MAX_BUFFER_SIZE: usize = 256 * 1024 * 1024;

/// Container compression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Compression {
    #[default]
    Gzip,
    Brotli,
}

impl Compression {
    /// Identify the container kind from its leading bytes.
    pub fn sniff(raw: &[u8]) -> Self {
        if raw.starts_with(&GZIP_MAGIC) {
            Compression::Gzip
        } else {
            Compression::Brotli
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Compression::Gzip => "gzip",
            Compression::Brotli => "brotli",
        }
    }
}

impl std::str::FromStr for Compression {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "gzip" | "gz" => Ok(Compression::Gzip),
            "brotli" | "br" => Ok(Compression::Brotli),
            other => Err(format!("unknown compression '{}'", other)),
        }
    }
}

/// Inflate a container into a flat buffer.
pub fn decompress(raw: &[u8]) -> Result<Vec<u8>> {
    if raw.is_empty() {
        return Err(DictionaryError::corrupt(0, "empty container"));
    }

    let kind = Compression::sniff(raw);
    let limit = MAX_BUFFER_SIZE as u64 + 1;
    let mut out = Vec::new();
    let read = match kind {
        Compression::Gzip => GzDecoder::new(raw).take(limit).read_to_end(&mut out),
        Compression::Brotli => brotli::Decompressor::new(raw, 4096)
            .take(limit)
            .read_to_end(&mut out),
    };

    read.map_err(|e| DictionaryError::corrupt(0, format!("{:?} container: {}", kind, e)))?;

    if out.len() > MAX_BUFFER_SIZE {
        return Err(DictionaryError::corrupt(
            0,
            format!("decompressed body exceeds {} bytes", MAX_BUFFER_SIZE),
        ));
    }

    log::debug!(
        "inflated {:?} container: {} -> {} bytes",
        kind,
        raw.len(),
        out.len()
    );
    Ok(out)
}

/// Wrap a dictionary body in a container.
pub fn compress(body: &[u8], kind: Compression) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    match kind {
        Compression::Gzip => {
            let mut encoder = GzEncoder::new(&mut out, flate2::Compression::best());
            encoder.write_all(body)?;
            encoder.finish()?;
        }
        Compression::Brotli => {
            let mut encoder = brotli::CompressorWriter::new(&mut out, 4096, 11, 22);
            encoder.write_all(body)?;
            drop(encoder);
        }
    }
    Ok(out)
}

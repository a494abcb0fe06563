// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Container sniffing and decompression on arbitrary bytes.
//!
//! Covers the gzip and brotli paths plus the size cap. Whatever decodes
//! must go through the body parser without panicking.

#![no_main]

use derivate::binary::decompress;
use derivate::Dictionary;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(body) = decompress(data) {
        let _ = Dictionary::default().load_body(body, true);
    }
    let _ = Dictionary::default().load(data, false);
});

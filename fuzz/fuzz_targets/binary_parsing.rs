// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Dictionary body parsing under adversarial input.
//!
//! A damaged `.dat` resource must surface as `CorruptData`, never as a
//! panic or a hang. Lazy loads defer most decoding to lookup time, so the
//! target walks every sample query after a successful load.

#![no_main]

use derivate::testing::SAMPLE_QUERIES;
use derivate::{Dictionary, Lang};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    for lazy in [true, false] {
        let dict = Dictionary::default();
        match dict.load_body(data.to_vec(), lazy) {
            Ok(()) => {
                for word in SAMPLE_QUERIES {
                    if let Ok(Some(groups)) = dict.find(word, true, Lang::UNDEFINED) {
                        // Every group handed out carries a positional id.
                        for group in groups.iter() {
                            assert!(group.id > 0, "group id must be 1-based");
                        }
                    }
                }
                if dict.materialize_all().is_ok() {
                    let summary = dict.summary().expect("still loaded");
                    assert_eq!(summary.pending_nodes, 0, "materialize_all left pending nodes");
                }
            }
            Err(err) => {
                assert!(err.is_corrupt(), "unexpected error kind: {err}");
                assert!(!dict.is_initialized());
            }
        }
    }
});

//! Arbitrary and damaged input must fail cleanly.

use proptest::prelude::*;

use derivate::{Dictionary, Lang};

use crate::common::{sample_body, SAMPLE_QUERIES};

/// Load `body`; if that works, walk every sample query. Nothing may panic.
fn exercise(body: Vec<u8>, lazy: bool) {
    let dict = Dictionary::default();
    if dict.load_body(body, lazy).is_ok() {
        for word in SAMPLE_QUERIES {
            let _ = dict.find(word, true, Lang::UNDEFINED);
        }
        let _ = dict.materialize_all();
        let _ = dict.summary();
    } else {
        assert!(!dict.is_initialized());
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn prop_arbitrary_bodies_never_panic(
        bytes in prop::collection::vec(any::<u8>(), 0..512),
        lazy in any::<bool>(),
    ) {
        exercise(bytes, lazy);
    }

    #[test]
    fn prop_arbitrary_containers_never_panic(bytes in prop::collection::vec(any::<u8>(), 0..256)) {
        let dict = Dictionary::default();
        let _ = dict.load(&bytes, true);
    }

    /// Flip bytes in a valid body.
    #[test]
    fn prop_damaged_bodies_never_panic(
        flips in prop::collection::vec((any::<prop::sample::Index>(), any::<u8>()), 1..8),
        lazy in any::<bool>(),
    ) {
        let mut body = sample_body().unwrap();
        for (index, value) in flips {
            let at = index.index(body.len());
            body[at] = value;
        }
        exercise(body, lazy);
    }

    #[test]
    fn prop_truncated_bodies_are_rejected(cut in any::<prop::sample::Index>(), lazy in any::<bool>()) {
        let body = sample_body().unwrap();
        let cut = cut.index(body.len());
        let dict = Dictionary::default();
        prop_assert!(dict.load_body(body[..cut].to_vec(), lazy).is_err());
    }
}

//! Lookup behavior on the sample dictionary, under both load modes.

use crate::common::{find_ids, ids, sample_dictionary};
use derivate::{DerivateWord, Dictionary, DictionaryBuilder, GroupSpec, Lang, WordClass};

fn both() -> [Dictionary; 2] {
    [
        sample_dictionary(false).unwrap(),
        sample_dictionary(true).unwrap(),
    ]
}

// ============================================================================
// EXACT MATCHES
// ============================================================================

#[test]
fn test_exact_match() {
    for dict in both() {
        assert_eq!(find_ids(&dict, "КРАСНЫЙ", false, Lang::RU), vec![ids::RED]);
        assert_eq!(find_ids(&dict, "УЧИТЕЛЬ", true, Lang::UNDEFINED), vec![ids::TEACH]);
    }
}

/// A single-group dictionary with the word under К→Р→А→С→Н→Ы→Й.
#[test]
fn test_exact_match_single_group() {
    let mut builder = DictionaryBuilder::new(Lang::RU);
    let id = builder
        .add_group(GroupSpec::new(vec![DerivateWord::new(
            "КРАСНЫЙ",
            WordClass::ADJECTIVE,
            Lang::RU,
        )]))
        .unwrap();
    assert_eq!(id, 1);

    let dict = Dictionary::default();
    dict.load_body(builder.to_bytes().unwrap(), true).unwrap();
    let found = dict.find("КРАСНЫЙ", false, Lang::RU).unwrap().unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].id, 1);
    assert!(!found[0].is_generated);
}

#[test]
fn test_partial_path_is_not_a_match() {
    for dict in both() {
        // ДОМ is indexed, ДО is only a path prefix.
        assert!(dict.find("ДО", true, Lang::UNDEFINED).unwrap().is_none());
        assert!(dict.find("КРАСН", true, Lang::UNDEFINED).unwrap().is_none());
    }
}

// ============================================================================
// TIE-BREAK AND LANGUAGE FILTER
// ============================================================================

#[test]
fn test_generated_groups_yield_to_primary() {
    for dict in both() {
        // КРАСНОТА belongs to RED and RED_GENERATED.
        assert_eq!(find_ids(&dict, "КРАСНОТА", false, Lang::UNDEFINED), vec![ids::RED]);
    }
}

#[test]
fn test_generated_group_alone_is_returned() {
    for dict in both() {
        let found = dict.find("ПЕРЕКРАСИТЬ", false, Lang::RU).unwrap().unwrap();
        assert_eq!(found.len(), 1);
        assert!(found[0].is_generated);
        assert_eq!(found[0].prefix.as_deref(), Some("ПЕРЕ"));
    }
}

#[test]
fn test_language_filter() {
    for dict in both() {
        assert_eq!(find_ids(&dict, "ЧЕРВОНИЙ", false, Lang::UNDEFINED), vec![ids::RED_UA]);
        assert_eq!(find_ids(&dict, "ЧЕРВОНИЙ", false, Lang::UA), vec![ids::RED_UA]);
        assert_eq!(
            find_ids(&dict, "ЧЕРВОНИЙ", false, Lang::RU | Lang::UA),
            vec![ids::RED_UA]
        );
        assert!(find_ids(&dict, "ЧЕРВОНИЙ", false, Lang::RU).is_empty());
        assert!(find_ids(&dict, "КРАСНЫЙ", false, Lang::EN).is_empty());
    }
}

// ============================================================================
// SUFFIX REWRITES
// ============================================================================

#[test]
fn test_oi_rewrites_to_yi() {
    for dict in both() {
        assert_eq!(find_ids(&dict, "КРАСНОЙ", false, Lang::UNDEFINED), vec![ids::RED]);
        assert_eq!(find_ids(&dict, "БЫСТРОЙ", false, Lang::RU), vec![ids::FAST]);
    }
}

#[test]
fn test_adverb_rewrites_to_adjective() {
    for dict in both() {
        assert_eq!(find_ids(&dict, "КРАСНО", false, Lang::RU), vec![ids::RED]);
        assert_eq!(find_ids(&dict, "БЫСТРО", false, Lang::RU), vec![ids::FAST]);
    }
}

#[test]
fn test_reflexive_particle() {
    for dict in both() {
        assert_eq!(find_ids(&dict, "УЧИТЬСЯ", false, Lang::RU), vec![ids::TEACH]);
        assert_eq!(find_ids(&dict, "ПЕРЕКРАСИТЬСЯ", false, Lang::RU), vec![ids::REPAINT]);
        assert!(find_ids(&dict, "ЯТЬСЯ", true, Lang::RU).is_empty());
    }
}

#[test]
fn test_soft_sign_noun() {
    for dict in both() {
        assert_eq!(find_ids(&dict, "ВЕСЕЛЬЕ", false, Lang::RU), vec![ids::MERRY]);
    }
}

#[test]
fn test_double_n_requires_try_create() {
    for dict in both() {
        assert_eq!(find_ids(&dict, "ДЛИНЫЙ", true, Lang::RU), vec![ids::LONG]);
        assert!(find_ids(&dict, "ДЛИНЫЙ", false, Lang::RU).is_empty());
    }
}

#[test]
fn test_rewrite_result_is_language_filtered() {
    for dict in both() {
        // КРАСНЫЙ is Russian only.
        assert!(find_ids(&dict, "КРАСНОЙ", false, Lang::UA).is_empty());
    }
}

// ============================================================================
// BOUNDARIES
// ============================================================================

#[test]
fn test_empty_word() {
    for dict in both() {
        assert!(dict.find("", true, Lang::RU).unwrap().is_none());
        assert!(dict.find("", false, Lang::UNDEFINED).unwrap().is_none());
    }
}

#[test]
fn test_short_words_skip_rewrites() {
    for dict in both() {
        // Indexed short word still matches.
        assert_eq!(find_ids(&dict, "ДОМ", false, Lang::RU), vec![ids::HOUSE]);
        // Ends in О but has three letters: no adverb rewrite.
        assert!(find_ids(&dict, "ДНО", true, Lang::RU).is_empty());
        assert!(find_ids(&dict, "КОТ", true, Lang::RU).is_empty());
    }
}

#[test]
fn test_find_words() {
    for dict in both() {
        let words = dict.find_words("КРАСНОТА", Lang::RU).unwrap();
        assert_eq!(words.len(), 1);
        assert_eq!(words[0].spelling, "КРАСНОТА");
        assert!(words[0].class.is_noun());
        assert!(dict.find_words("ЗЕЛЕНЫЙ", Lang::RU).unwrap().is_empty());
    }
}

#[test]
fn test_unknown_words() {
    for dict in both() {
        assert!(dict.find("ЗЕЛЕНЫЙ", true, Lang::RU).unwrap().is_none());
        assert!(dict.find("HOUSE", true, Lang::UNDEFINED).unwrap().is_none());
    }
}

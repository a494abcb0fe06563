//! Build → serialize → load, compared against the builder's own view.

use std::collections::BTreeMap;

use proptest::prelude::*;

use derivate::{
    Compression, DerivateWord, Dictionary, DictionaryBuilder, GroupSpec, Lang, WordClass,
};

// ============================================================================
// STRATEGIES
// ============================================================================

/// Upper-case Cyrillic word, including the letters the rewrites key on.
fn word_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[АБВДЕИЙКЛМНОРСТЫЬЯ]{1,9}").unwrap()
}

fn group_strategy() -> impl Strategy<Value = (Vec<String>, bool)> {
    (prop::collection::vec(word_strategy(), 1..4), any::<bool>())
}

fn groups_strategy() -> impl Strategy<Value = Vec<(Vec<String>, bool)>> {
    prop::collection::vec(group_strategy(), 1..16)
}

fn build(groups: &[(Vec<String>, bool)]) -> DictionaryBuilder {
    let mut builder = DictionaryBuilder::new(Lang::RU);
    for (words, generated) in groups {
        let words = words
            .iter()
            .map(|w| DerivateWord::new(w.clone(), WordClass::NOUN, Lang::RU))
            .collect();
        builder
            .add_group(GroupSpec::new(words).generated(*generated))
            .unwrap();
    }
    builder
}

fn load(builder: &DictionaryBuilder, lazy: bool) -> Dictionary {
    let dict = Dictionary::default();
    dict.load(&builder.to_container(Compression::Gzip).unwrap(), lazy)
        .unwrap();
    dict
}

/// What an exact lookup must return: ids per spelling in first-link order,
/// with generated groups dropped when primary ones share the spelling.
fn expected(groups: &[(Vec<String>, bool)]) -> BTreeMap<String, Vec<u32>> {
    let mut by_word: BTreeMap<String, Vec<(u32, bool)>> = BTreeMap::new();
    for (i, (words, generated)) in groups.iter().enumerate() {
        let id = i as u32 + 1;
        for word in words {
            let ids = by_word.entry(word.clone()).or_default();
            if !ids.iter().any(|(existing, _)| *existing == id) {
                ids.push((id, *generated));
            }
        }
    }
    by_word
        .into_iter()
        .map(|(word, ids)| {
            let has_primary = ids.iter().any(|(_, generated)| !generated);
            let kept = ids
                .into_iter()
                .filter(|(_, generated)| !has_primary || !generated)
                .map(|(id, _)| id)
                .collect();
            (word, kept)
        })
        .collect()
}

fn ids(dict: &Dictionary, word: &str, try_create: bool) -> Vec<u32> {
    dict.find(word, try_create, Lang::UNDEFINED)
        .unwrap()
        .unwrap_or_default()
        .iter()
        .map(|g| g.id)
        .collect()
}

// ============================================================================
// PROPERTIES
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Every indexed spelling finds exactly the expected groups, and every
    /// returned group carries the id it was built with.
    #[test]
    fn prop_exact_lookup_matches_builder(groups in groups_strategy()) {
        let builder = build(&groups);
        let expected = expected(&groups);
        for lazy in [false, true] {
            let dict = load(&builder, lazy);
            for (word, want) in &expected {
                let found = dict.find(word, false, Lang::UNDEFINED).unwrap().unwrap();
                let got: Vec<u32> = found.iter().map(|g| g.id).collect();
                prop_assert_eq!(&got, want, "word {} lazy={}", word, lazy);
                for group in found.iter() {
                    let (words, _) = &groups[group.id as usize - 1];
                    prop_assert_eq!(group.words.len(), words.len());
                    prop_assert!(group.words.iter().any(|w| &w.spelling == word));
                }
            }
        }
    }

    /// Every slot of the group table carries its 1-based position as id.
    #[test]
    fn prop_group_ids_are_positional(groups in groups_strategy(), lazy in any::<bool>()) {
        let dict = load(&build(&groups), lazy);
        dict.materialize_all().unwrap();
        let table = dict.groups().unwrap();
        prop_assert_eq!(table.len(), groups.len());
        for (i, group) in table.iter().enumerate() {
            prop_assert_eq!(group.id, i as u32 + 1);
            let (words, generated) = &groups[i];
            prop_assert_eq!(group.is_generated, *generated);
            let spellings: Vec<&str> = group.words.iter().map(|w| w.spelling.as_str()).collect();
            prop_assert_eq!(spellings, words.iter().map(String::as_str).collect::<Vec<_>>());
        }
    }

    /// Lazy and eager loads agree on arbitrary queries, rewrites included.
    #[test]
    fn prop_lazy_and_eager_agree(
        groups in groups_strategy(),
        queries in prop::collection::vec(word_strategy(), 1..24),
    ) {
        let builder = build(&groups);
        let eager = load(&builder, false);
        let lazy = load(&builder, true);
        for query in &queries {
            for try_create in [false, true] {
                prop_assert_eq!(
                    ids(&eager, query, try_create),
                    ids(&lazy, query, try_create),
                    "query {} try_create={}", query, try_create
                );
            }
        }
    }

    /// A repeated lookup returns the same groups and decodes nothing new.
    #[test]
    fn prop_find_is_idempotent(
        groups in groups_strategy(),
        queries in prop::collection::vec(word_strategy(), 1..12),
    ) {
        let dict = load(&build(&groups), true);
        for query in &queries {
            let first = ids(&dict, query, true);
            let stats = dict.stats();
            let second = ids(&dict, query, true);
            prop_assert_eq!(first, second);
            prop_assert_eq!(dict.stats(), stats);
        }
    }

    /// Results are never both generated and primary.
    #[test]
    fn prop_tie_break_never_mixes(
        groups in groups_strategy(),
        queries in prop::collection::vec(word_strategy(), 1..12),
    ) {
        let dict = load(&build(&groups), false);
        for query in &queries {
            if let Some(found) = dict.find(query, true, Lang::UNDEFINED).unwrap() {
                let generated = found.iter().filter(|g| g.is_generated).count();
                prop_assert!(generated == 0 || generated == found.len());
            }
        }
    }

    /// Words under four characters that aren't indexed never match.
    #[test]
    fn prop_short_unindexed_words_miss(
        groups in groups_strategy(),
        query in prop::string::string_regex("[АБВДЕИЙКЛМНОРСТЫЬЯ]{1,3}").unwrap(),
    ) {
        let expected = expected(&groups);
        prop_assume!(!expected.contains_key(&query));
        let dict = load(&build(&groups), true);
        prop_assert!(dict.find(&query, true, Lang::UNDEFINED).unwrap().is_none());
    }
}

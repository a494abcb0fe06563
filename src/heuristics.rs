// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Suffix rewrites tried when a word form is not in the trie.
//!
//! The dictionary stores lemmas and a handful of derived forms, not every
//! inflection. When a lookup misses, the ending of the word is rewritten into
//! a form that is more likely to be indexed (КРАСНОЙ → КРАСНЫЙ, БЫСТРО →
//! БЫСТРЫЙ, УЧИТЬСЯ → УЧИТЬ) and the lookup retried.
//!
//! The literals and their order decide which group a form resolves to, so the
//! table is fixed. Within a rule, candidates are tried in order and the first
//! hit wins. The first four rules are mutually exclusive (the first one whose
//! condition matches is the only one applied); the `ОЙ` rule is considered
//! after whichever of them fired.

/// Words shorter than this (in characters) never go through the rewrites.
pub const MIN_HEURISTIC_LEN: usize = 4;

/// Bound on nested rewrites of rewrites.
pub const MAX_HEURISTIC_DEPTH: usize = 8;

/// Rule that produced a candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    /// Trailing `О`, or `КИ`: adverb or short form to full adjective.
    AdjectiveFromAdverb,
    /// Trailing `СЯ` / `СЬ`: drop the reflexive particle.
    Reflexive,
    /// Trailing `ЬЕ` → `ИЕ`.
    SoftSignNoun,
    /// `…НЫЙ`-style endings: toggle single and double `Н`.
    DoubleN,
    /// Trailing `ОЙ` → `ИЙ` / `ЫЙ`.
    AdjectiveEnding,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rewrite {
    pub rule: Rule,
    pub candidate: String,
}

/// Cyrillic vowels, upper and lower case.
pub fn is_cyrillic_vowel(ch: char) -> bool {
    matches!(
        ch,
        'А' | 'Е' | 'Ё' | 'И' | 'О' | 'У' | 'Ы' | 'Э' | 'Ю' | 'Я' | 'Є' | 'І' | 'Ї'
            | 'а' | 'е' | 'ё' | 'и' | 'о' | 'у' | 'ы' | 'э' | 'ю' | 'я' | 'є' | 'і' | 'ї'
    )
}

fn join(head: &[char], tail: &str) -> String {
    let mut s: String = head.iter().collect();
    s.push_str(tail);
    s
}

fn push(out: &mut Vec<Rewrite>, rule: Rule, candidate: String) {
    out.push(Rewrite { rule, candidate });
}

/// Candidate rewrites of `word`, in the order they must be tried.
///
/// Empty for words shorter than [`MIN_HEURISTIC_LEN`]. The `DoubleN` rule is
/// only produced when `try_create` is set.
pub fn rewrites(word: &str, try_create: bool) -> Vec<Rewrite> {
    let chars: Vec<char> = word.chars().collect();
    let len = chars.len();
    let mut out = Vec::new();
    if len < MIN_HEURISTIC_LEN {
        return out;
    }

    let c0 = chars[len - 1];
    let c1 = chars[len - 2];
    let c2 = chars[len - 3];

    if c0 == 'О' || (c0 == 'И' && c1 == 'К') {
        let stem = &chars[..len - 1];
        push(&mut out, Rule::AdjectiveFromAdverb, join(stem, "ИЙ"));
        push(&mut out, Rule::AdjectiveFromAdverb, join(stem, "ЫЙ"));
        if c0 == 'О' && c1 == 'Н' {
            push(&mut out, Rule::AdjectiveFromAdverb, join(stem, "СКИЙ"));
        }
    } else if (c0 == 'Я' || c0 == 'Ь') && c1 == 'С' {
        let stem = &chars[..len - 2];
        if stem.iter().copied().eq("ЯТЬ".chars()) {
            return out;
        }
        push(&mut out, Rule::Reflexive, stem.iter().collect());
    } else if c0 == 'Е' && c1 == 'Ь' {
        push(&mut out, Rule::SoftSignNoun, join(&chars[..len - 2], "ИЕ"));
    } else if c0 == 'Й' && c2 == 'Н' && try_create {
        let c3 = chars[len - 4];
        let tail: String = chars[len - 3..].iter().collect();
        if c3 != 'Н' {
            if is_cyrillic_vowel(c3) {
                push(&mut out, Rule::DoubleN, join(&chars[..len - 3], &format!("Н{}", tail)));
            }
        } else {
            push(&mut out, Rule::DoubleN, join(&chars[..len - 4], &tail));
        }
    }

    if c0 == 'Й' && c1 == 'О' {
        let stem = &chars[..len - 2];
        push(&mut out, Rule::AdjectiveEnding, join(stem, "ИЙ"));
        push(&mut out, Rule::AdjectiveEnding, join(stem, "ЫЙ"));
    }

    out
}

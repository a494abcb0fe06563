// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The records a dictionary hands out: groups of derived words.
//!
//! A `DerivateGroup` is a family of related word forms (КРАСНЫЙ, КРАСНОТА,
//! КРАСНЕТЬ...). Each word carries its part of speech, its language and a few
//! explanatory attributes. All three are small bit sets stored as `u16` on the
//! wire, so they are newtypes over `u16` with named constants, in the style of
//! the format flags used elsewhere in this crate.
//!
//! # Invariants
//!
//! - **DerivateGroup**: `id >= 1` and equals its 1-based position in the group
//!   table of the dictionary that produced it.
//! - **Lang**: `Lang::UNDEFINED` (no bits) is the "any language" sentinel.
//!   Filters treat it as matching everything.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Declares a `u16` bit set with a table of lowercase names.
///
/// Names are used for `Display`, `FromStr` and serde, so a value round-trips
/// through JSON sources as `"ru"` or `["noun", "adjective"]`.
macro_rules! bit_set {
    (
        $(#[$meta:meta])*
        $name:ident { $($flag:ident = $value:expr => $label:literal,)+ }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name(pub u16);

        impl $name {
            $(pub const $flag: $name = $name($value);)+

            /// Every named flag with its label, in declaration order.
            pub const NAMED: &'static [($name, &'static str)] = &[$(($name::$flag, $label),)+];

            pub fn bits(self) -> u16 {
                self.0
            }

            pub fn is_empty(self) -> bool {
                self.0 == 0
            }

            pub fn contains(self, other: $name) -> bool {
                self.0 & other.0 == other.0
            }

            pub fn intersects(self, other: $name) -> bool {
                self.0 & other.0 != 0
            }

            pub fn union(self, other: $name) -> $name {
                $name(self.0 | other.0)
            }

            /// Labels of the named flags set in this value.
            pub fn names(self) -> Vec<&'static str> {
                Self::NAMED
                    .iter()
                    .filter(|(flag, _)| self.contains(*flag))
                    .map(|(_, label)| *label)
                    .collect()
            }
        }

        impl std::ops::BitOr for $name {
            type Output = $name;

            fn bitor(self, rhs: $name) -> $name {
                self.union(rhs)
            }
        }

        impl std::ops::BitOrAssign for $name {
            fn bitor_assign(&mut self, rhs: $name) {
                self.0 |= rhs.0;
            }
        }

        impl FromStr for $name {
            type Err = String;

            /// Parses labels separated by `,`, `;` or whitespace.
            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let mut value = $name::default();
                for part in s.split(|c: char| c == ',' || c == ';' || c.is_whitespace()) {
                    let part = part.trim();
                    if part.is_empty() {
                        continue;
                    }
                    let flag = Self::NAMED
                        .iter()
                        .find(|(_, label)| label.eq_ignore_ascii_case(part))
                        .map(|(flag, _)| *flag)
                        .ok_or_else(|| format!("unknown {} '{}'", stringify!($name), part))?;
                    value |= flag;
                }
                Ok(value)
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                self.names().serialize(serializer)
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                match NamesRepr::deserialize(deserializer)? {
                    NamesRepr::Joined(s) => s.parse().map_err(serde::de::Error::custom),
                    NamesRepr::List(items) => {
                        let mut value = $name::default();
                        for item in items {
                            value |= item.parse::<$name>().map_err(serde::de::Error::custom)?;
                        }
                        Ok(value)
                    }
                }
            }
        }
    };
}

#[derive(Deserialize)]
#[serde(untagged)]
enum NamesRepr {
    Joined(String),
    List(Vec<String>),
}

bit_set! {
    /// Language bit set. Bit values match the serialized resources.
    Lang {
        RU = 0x01 => "ru",
        UA = 0x02 => "ua",
        BY = 0x04 => "by",
        EN = 0x08 => "en",
        IT = 0x10 => "it",
        KZ = 0x20 => "kz",
    }
}

impl Lang {
    pub const UNDEFINED: Lang = Lang(0);

    pub fn is_undefined(self) -> bool {
        self.is_empty()
    }

    /// The single-language components of this set, in declaration order.
    pub fn languages(self) -> impl Iterator<Item = Lang> {
        Self::NAMED
            .iter()
            .map(|(flag, _)| *flag)
            .filter(move |flag| self.contains(*flag))
    }

    /// True when either side is undefined or the sets share a language.
    pub fn compatible(self, other: Lang) -> bool {
        self.is_undefined() || other.is_undefined() || self.intersects(other)
    }
}

impl fmt::Display for Lang {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_undefined() {
            return f.write_str("undefined");
        }
        f.write_str(&self.names().join(";"))
    }
}

bit_set! {
    /// Part of speech.
    WordClass {
        NOUN = 0x0001 => "noun",
        ADJECTIVE = 0x0002 => "adjective",
        VERB = 0x0004 => "verb",
        ADVERB = 0x0008 => "adverb",
        PRONOUN = 0x0010 => "pronoun",
        MISC = 0x0020 => "misc",
        PREPOSITION = 0x0040 => "preposition",
        CONJUNCTION = 0x0080 => "conjunction",
        PROPER = 0x0100 => "proper",
        PROPER_SURNAME = 0x0200 => "surname",
        PROPER_NAME = 0x0400 => "name",
        PROPER_GEO = 0x0800 => "geo",
        PERSONAL_PRONOUN = 0x1000 => "personal-pronoun",
    }
}

impl WordClass {
    pub fn is_noun(self) -> bool {
        self.contains(WordClass::NOUN)
    }

    pub fn is_adjective(self) -> bool {
        self.contains(WordClass::ADJECTIVE)
    }

    pub fn is_verb(self) -> bool {
        self.contains(WordClass::VERB)
    }
}

bit_set! {
    /// Explanatory attributes of a word within its group.
    WordAttrs {
        ANIMATED = 0x0001 => "animated",
        ANIMAL = 0x0002 => "animal",
        MAN = 0x0004 => "man",
        VERB_NOUN = 0x0008 => "verb-noun",
        PERFECTIVE = 0x0010 => "perfective",
        IMPERFECTIVE = 0x0020 => "imperfective",
        REFLEXIVE = 0x0040 => "reflexive",
        PLURAL_ONLY = 0x0080 => "plural-only",
    }
}

/// One word form inside a group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DerivateWord {
    /// Upper-case spelling, as indexed in the trie.
    pub spelling: String,
    #[serde(default)]
    pub class: WordClass,
    #[serde(default)]
    pub lang: Lang,
    #[serde(default)]
    pub attrs: WordAttrs,
}

impl DerivateWord {
    pub fn new(spelling: impl Into<String>, class: WordClass, lang: Lang) -> Self {
        Self {
            spelling: spelling.into(),
            class,
            lang,
            attrs: WordAttrs::default(),
        }
    }
}

/// A family of related word forms.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DerivateGroup {
    /// 1-based position in the group table.
    pub id: u32,
    /// Synthesized rather than a primary dictionary entry.
    pub is_generated: bool,
    /// Placeholder group carrying no usable words.
    pub is_dummy: bool,
    /// Must not be used as a source for generating further forms.
    pub not_generate: bool,
    pub prefix: Option<String>,
    pub lang: Lang,
    pub words: Vec<DerivateWord>,
}

impl DerivateGroup {
    /// True when a word of this group spells `word` in a language compatible
    /// with `lang`.
    pub fn contains_word(&self, word: &str, lang: Lang) -> bool {
        self.words
            .iter()
            .any(|w| w.spelling == word && w.lang.compatible(lang))
    }

    /// Words of this group spelling `word` in a language compatible with `lang`.
    pub fn words_spelled<'a>(
        &'a self,
        word: &'a str,
        lang: Lang,
    ) -> impl Iterator<Item = &'a DerivateWord> + 'a {
        self.words
            .iter()
            .filter(move |w| w.spelling == word && w.lang.compatible(lang))
    }
}

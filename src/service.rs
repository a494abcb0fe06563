// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! One dictionary per language behind a single entry point.

use std::sync::Arc;

use parking_lot::RwLock;

use crate::dictionary::{Dictionary, Groups};
use crate::error::Result;
use crate::resources::ResourceLocator;
use crate::types::{DerivateWord, Lang};

pub struct DerivateService {
    locator: Arc<dyn ResourceLocator>,
    /// Registration order is query order.
    dictionaries: RwLock<Vec<(Lang, Arc<Dictionary>)>>,
}

impl DerivateService {
    pub fn new(locator: Arc<dyn ResourceLocator>) -> Self {
        Self {
            locator,
            dictionaries: RwLock::new(Vec::new()),
        }
    }

    /// Initialize a dictionary for every language in `langs`.
    ///
    /// Returns the languages that are loaded afterwards. Languages without a
    /// resource are skipped with a warning; decode errors are returned.
    pub fn initialize(&self, langs: Lang, lazy: bool) -> Result<Lang> {
        let mut loaded = Lang::UNDEFINED;
        for lang in langs.languages() {
            let dict = self.dictionary_for(lang);
            if dict.init(lang, lazy)? {
                loaded |= lang;
            } else {
                log::warn!("no derivation dictionary for {}", lang);
            }
        }
        Ok(loaded)
    }

    /// The dictionary registered for `lang`, created on first use.
    fn dictionary_for(&self, lang: Lang) -> Arc<Dictionary> {
        if let Some(dict) = self.lookup(lang) {
            return dict;
        }
        let mut dictionaries = self.dictionaries.write();
        if let Some((_, dict)) = dictionaries.iter().find(|(l, _)| *l == lang) {
            return Arc::clone(dict);
        }
        let dict = Arc::new(Dictionary::new(Arc::clone(&self.locator)));
        dictionaries.push((lang, Arc::clone(&dict)));
        dict
    }

    fn lookup(&self, lang: Lang) -> Option<Arc<Dictionary>> {
        self.dictionaries
            .read()
            .iter()
            .find(|(l, _)| *l == lang)
            .map(|(_, dict)| Arc::clone(dict))
    }

    /// Initialized dictionaries serving `lang`, in registration order.
    fn candidates(&self, lang: Lang) -> Vec<Arc<Dictionary>> {
        self.dictionaries
            .read()
            .iter()
            .filter(|(l, dict)| l.compatible(lang) && dict.is_initialized())
            .map(|(_, dict)| Arc::clone(dict))
            .collect()
    }

    /// Languages with an initialized dictionary.
    pub fn languages(&self) -> Lang {
        self.dictionaries
            .read()
            .iter()
            .filter(|(_, dict)| dict.is_initialized())
            .fold(Lang::UNDEFINED, |acc, (l, _)| acc | *l)
    }

    pub fn dictionary(&self, lang: Lang) -> Option<Arc<Dictionary>> {
        self.lookup(lang)
    }

    /// Groups for `word` from the first dictionary serving `lang` that has any.
    pub fn find_derivates(
        &self,
        word: Option<&str>,
        try_create: bool,
        lang: Lang,
    ) -> Result<Option<Groups>> {
        let Some(word) = word.filter(|w| !w.is_empty()) else {
            return Ok(None);
        };
        for dict in self.candidates(lang) {
            if let Some(found) = dict.find(word, try_create, lang)? {
                return Ok(Some(found));
            }
        }
        Ok(None)
    }

    pub fn find_words(&self, word: Option<&str>, lang: Lang) -> Result<Vec<DerivateWord>> {
        let Some(word) = word.filter(|w| !w.is_empty()) else {
            return Ok(Vec::new());
        };
        for dict in self.candidates(lang) {
            let words = dict.find_words(word, lang)?;
            if !words.is_empty() {
                return Ok(words);
            }
        }
        Ok(Vec::new())
    }

    pub fn unload(&self) {
        for (_, dict) in self.dictionaries.read().iter() {
            dict.unload();
        }
    }
}

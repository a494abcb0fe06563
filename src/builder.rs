// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Produces dictionary resources from group definitions.
//!
//! Every spelling of every group is indexed under its own trie path, and extra
//! paths can be added with [`DictionaryBuilder::link`]. The output is
//! deterministic: groups keep their insertion order, children are written in
//! ascending code unit order, and ids at a node keep their first-link order.
//!
//! ```ignore
//! let mut builder = DictionaryBuilder::new(Lang::RU);
//! let id = builder.add_group(GroupSpec::new(vec![
//!     DerivateWord::new("КРАСНЫЙ", WordClass::ADJECTIVE, Lang::RU),
//! ]))?;
//! builder.link("КРАСН", id)?;
//! fs::write("d_ru.dat", builder.to_container(Compression::Gzip)?)?;
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::binary::{
    compress, patch_i32, reserve_i32, write_i16, write_i32, write_u16, Compression,
    MAX_STRING_BYTES,
};
use crate::error::{DictionaryError, Result};
use crate::group::encode_group;
use crate::types::{DerivateGroup, DerivateWord, Lang};

/// A group as written in a JSON source, before it gets an id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GroupSpec {
    pub generated: bool,
    pub dummy: bool,
    pub not_generate: bool,
    pub prefix: Option<String>,
    /// Group language. Undefined means "union of the word languages".
    pub lang: Lang,
    pub words: Vec<DerivateWord>,
}

impl GroupSpec {
    pub fn new(words: Vec<DerivateWord>) -> Self {
        Self {
            words,
            ..Self::default()
        }
    }

    pub fn generated(mut self, generated: bool) -> Self {
        self.generated = generated;
        self
    }

    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }
}

/// JSON source file for `derivate build`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceDictionary {
    pub language: Lang,
    #[serde(default)]
    pub groups: Vec<GroupSpec>,
}

impl SourceDictionary {
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json)
            .map_err(|e| DictionaryError::InvalidEntry(format!("invalid source JSON: {}", e)))
    }

    pub fn into_builder(self) -> Result<DictionaryBuilder> {
        let mut builder = DictionaryBuilder::new(self.language);
        for group in self.groups {
            builder.add_group(group)?;
        }
        Ok(builder)
    }
}

#[derive(Debug, Default)]
struct BuildNode {
    ids: Vec<u32>,
    children: BTreeMap<u16, BuildNode>,
}

#[derive(Debug)]
pub struct DictionaryBuilder {
    language: Lang,
    groups: Vec<DerivateGroup>,
    root: BuildNode,
}

impl DictionaryBuilder {
    pub fn new(language: Lang) -> Self {
        Self {
            language,
            groups: Vec::new(),
            root: BuildNode::default(),
        }
    }

    pub fn language(&self) -> Lang {
        self.language
    }

    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    /// Add a group and index its spellings. Returns the group's id.
    ///
    /// Words without a language inherit the builder's language.
    pub fn add_group(&mut self, spec: GroupSpec) -> Result<u32> {
        if spec.words.len() > u16::MAX as usize {
            return Err(DictionaryError::InvalidEntry(format!(
                "group has {} words (max {})",
                spec.words.len(),
                u16::MAX
            )));
        }
        if let Some(prefix) = &spec.prefix {
            check_length(prefix)?;
        }

        let mut words = spec.words;
        for word in &mut words {
            check_spelling(&word.spelling)?;
            if word.lang.is_undefined() {
                word.lang = self.language;
            }
        }

        let lang = if spec.lang.is_undefined() {
            words
                .iter()
                .fold(Lang::UNDEFINED, |acc, w| acc | w.lang)
        } else {
            spec.lang
        };

        let id = u32::try_from(self.groups.len() + 1)
            .ok()
            .filter(|&id| id <= i32::MAX as u32)
            .ok_or_else(|| DictionaryError::InvalidEntry("too many groups".to_string()))?;

        let spellings: Vec<String> = words.iter().map(|w| w.spelling.clone()).collect();
        self.groups.push(DerivateGroup {
            id,
            is_generated: spec.generated,
            is_dummy: spec.dummy,
            not_generate: spec.not_generate,
            prefix: spec.prefix,
            lang,
            words,
        });
        for spelling in spellings {
            self.link(&spelling, id)?;
        }
        Ok(id)
    }

    /// Index `word` as an entry point into group `group_id`.
    pub fn link(&mut self, word: &str, group_id: u32) -> Result<()> {
        check_spelling(word)?;
        if group_id == 0 || group_id as usize > self.groups.len() {
            return Err(DictionaryError::InvalidEntry(format!(
                "group id {} outside 1..={}",
                group_id,
                self.groups.len()
            )));
        }
        let mut node = &mut self.root;
        for unit in word.encode_utf16() {
            node = node.children.entry(unit).or_default();
        }
        if !node.ids.contains(&group_id) {
            node.ids.push(group_id);
        }
        Ok(())
    }

    /// The decompressed body.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut buf = Vec::new();
        write_i32(&mut buf, self.groups.len() as i32);
        for group in &self.groups {
            let slot = reserve_i32(&mut buf);
            encode_group(group, &mut buf)?;
            patch_offset(&mut buf, slot)?;
        }
        encode_node(&self.root, &mut buf)?;
        log::debug!(
            "encoded {} groups into {} bytes",
            self.groups.len(),
            buf.len()
        );
        Ok(buf)
    }

    /// The body wrapped in a compressed container, ready to ship as
    /// `d_<lang>.dat`.
    pub fn to_container(&self, kind: Compression) -> Result<Vec<u8>> {
        compress(&self.to_bytes()?, kind)
    }
}

fn check_length(s: &str) -> Result<()> {
    if s.len() > MAX_STRING_BYTES {
        return Err(DictionaryError::InvalidEntry(format!(
            "'{}' is {} bytes (max {})",
            s,
            s.len(),
            MAX_STRING_BYTES
        )));
    }
    Ok(())
}

fn check_spelling(spelling: &str) -> Result<()> {
    if spelling.is_empty() {
        return Err(DictionaryError::InvalidEntry("empty spelling".to_string()));
    }
    check_length(spelling)
}

/// Write the current length into the reserved slot at `slot`.
fn patch_offset(buf: &mut [u8], slot: usize) -> Result<()> {
    let end = i32::try_from(buf.len())
        .map_err(|_| DictionaryError::InvalidEntry("body exceeds 2 GiB".to_string()))?;
    patch_i32(buf, slot, end);
    Ok(())
}

fn encode_node(node: &BuildNode, buf: &mut Vec<u8>) -> Result<()> {
    let id_count = u16::try_from(node.ids.len())
        .map_err(|_| DictionaryError::InvalidEntry(format!("{} ids at one node", node.ids.len())))?;
    write_u16(buf, id_count);
    for &id in &node.ids {
        write_i32(buf, id as i32);
    }

    let child_count = u16::try_from(node.children.len()).map_err(|_| {
        DictionaryError::InvalidEntry(format!("{} children at one node", node.children.len()))
    })?;
    write_u16(buf, child_count);
    for (&unit, child) in &node.children {
        write_i16(buf, unit as i16);
        let slot = reserve_i32(buf);
        encode_node(child, buf)?;
        patch_offset(buf, slot)?;
    }
    Ok(())
}

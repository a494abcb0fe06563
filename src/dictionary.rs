// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The dictionary facade: load a resource, answer `find`, unload.
//!
//! # Locking
//!
//! Everything loaded lives behind one `parking_lot::RwLock`. A lookup walks the
//! trie under the read guard. If the walk hits a pending node, the read guard
//! is dropped, the write guard is taken, every pending node along the word's
//! path is decoded, and the walk is retried under a fresh read guard. Decoding
//! is idempotent, so two threads racing for the same path just find the work
//! already done.
//!
//! Groups are handed out as `Arc`s. A result stays valid after the guard is
//! released, and even after `unload`.
//!
//! # Lookup
//!
//! ```text
//! find(word)
//!   ├─ exact trie hit with terminal groups?
//!   │    ├─ drop generated groups if primary ones are also present
//!   │    ├─ keep groups containing `word` in `lang` (unless lang undefined)
//!   │    └─ non-empty → done
//!   ├─ fewer than 4 chars → None
//!   └─ suffix rewrites, each a recursive find with try_create = false
//! ```

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::RwLock;
use serde::Serialize;

use crate::binary::{decompress, read_count_i32, read_offset, MIN_GROUP_ENTRY_SIZE};
use crate::error::{DictionaryError, Result};
use crate::group::{decode_group, GroupSlot, GroupStore};
use crate::heuristics::{self, MAX_HEURISTIC_DEPTH};
use crate::resources::{resource_name, ResourceLocator};
use crate::trie::{decode_node, Descent, NodeBody};
use crate::types::{DerivateGroup, DerivateWord, Lang};

/// Groups returned by a lookup.
pub type Groups = Vec<Arc<DerivateGroup>>;

/// Everything a successful load produces.
struct Loaded {
    language: Lang,
    lazy: bool,
    /// Decompressed body. Empty once nothing is pending.
    buffer: Vec<u8>,
    groups: GroupStore,
    root: NodeBody,
}

impl Loaded {
    fn parse(language: Lang, buffer: Vec<u8>, lazy: bool) -> Result<Self> {
        let buf = buffer.as_slice();
        let mut pos = 0;

        let count = read_count_i32(buf, &mut pos, MIN_GROUP_ENTRY_SIZE)?;
        let mut groups = GroupStore::with_capacity(count);
        for i in 0..count {
            let at = pos;
            let end = read_offset(buf, &mut pos)?;
            if end < pos {
                return Err(DictionaryError::corrupt(
                    at,
                    format!("group entry {} ends at {} before its record", i + 1, end),
                ));
            }
            if lazy {
                groups.push_pending(pos);
                pos = end;
            } else {
                let group = decode_group(buf, &mut pos, i as u32 + 1)?;
                if pos != end {
                    return Err(DictionaryError::corrupt(
                        at,
                        format!("group record ends at {} but entry says {}", pos, end),
                    ));
                }
                groups.push_materialized(group);
            }
        }

        let root = decode_node(buf, &mut groups, lazy, &mut pos)?;
        if pos != buf.len() {
            log::debug!("ignoring {} trailing bytes after the trie", buf.len() - pos);
        }

        log::debug!(
            "loaded {} groups ({} pending), {} bytes, lazy={}",
            groups.len(),
            groups.pending_count(),
            buf.len(),
            lazy
        );

        let buffer = if lazy { buffer } else { Vec::new() };
        Ok(Self {
            language,
            lazy,
            buffer,
            groups,
            root,
        })
    }

    /// Groups at a terminal node after the tie-break and language filter.
    fn terminal_groups(&self, node: &NodeBody, word: &str, lang: Lang) -> Option<Groups> {
        let ids = node.terminal_group_ids.as_ref()?;
        let mut found: Groups = ids
            .iter()
            .filter_map(|&id| self.groups.get(id).cloned())
            .collect();

        let has_generated = found.iter().any(|g| g.is_generated);
        let has_primary = found.iter().any(|g| !g.is_generated);
        if has_generated && has_primary {
            found.retain(|g| !g.is_generated);
        }

        if !lang.is_undefined() {
            found.retain(|g| g.contains_word(word, lang));
        }

        if found.is_empty() {
            None
        } else {
            Some(found)
        }
    }
}

/// Monotonic counters over the lifetime of a [`Dictionary`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DictionaryStats {
    /// Resources fetched from the locator.
    pub resource_reads: u64,
    /// Trie nodes decoded after load.
    pub nodes_materialized: u64,
    /// Pending groups decoded after load.
    pub groups_materialized: u64,
}

/// Point-in-time shape of a loaded dictionary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DictionarySummary {
    pub language: Lang,
    pub lazy: bool,
    pub groups: usize,
    pub pending_groups: usize,
    pub materialized_nodes: usize,
    pub pending_nodes: usize,
    pub terminal_nodes: usize,
    pub max_depth: usize,
    /// Size of the retained decompressed body.
    pub buffer_bytes: usize,
}

/// A derivation dictionary for one language.
///
/// Cheap to create; nothing is read until [`Dictionary::init`] or
/// [`Dictionary::load`]. Share it between threads behind an `Arc`.
pub struct Dictionary {
    locator: Option<Arc<dyn ResourceLocator>>,
    state: RwLock<Option<Loaded>>,
    resource_reads: AtomicU64,
    nodes_materialized: AtomicU64,
    groups_materialized: AtomicU64,
}

impl Default for Dictionary {
    /// A dictionary without a resource locator. Only `load` can fill it.
    fn default() -> Self {
        Self {
            locator: None,
            state: RwLock::new(None),
            resource_reads: AtomicU64::new(0),
            nodes_materialized: AtomicU64::new(0),
            groups_materialized: AtomicU64::new(0),
        }
    }
}

impl fmt::Debug for Dictionary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dictionary")
            .field("language", &self.language())
            .field("initialized", &self.is_initialized())
            .field("stats", &self.stats())
            .finish()
    }
}

impl Dictionary {
    /// A dictionary that reads its resource from `locator` on `init`.
    pub fn new(locator: Arc<dyn ResourceLocator>) -> Self {
        Self {
            locator: Some(locator),
            ..Self::default()
        }
    }

    pub fn is_initialized(&self) -> bool {
        self.state.read().is_some()
    }

    /// Language of the loaded resource; undefined when not loaded or when
    /// loaded from raw bytes.
    pub fn language(&self) -> Lang {
        self.state
            .read()
            .as_ref()
            .map_or(Lang::UNDEFINED, |loaded| loaded.language)
    }

    /// Load the resource for `lang` unless already initialized.
    ///
    /// Returns `Ok(false)` when the locator has no resource for `lang`. The
    /// resource is read at most once however many threads race here.
    pub fn init(&self, lang: Lang, lazy: bool) -> Result<bool> {
        if self.is_initialized() {
            return Ok(true);
        }
        let mut state = self.state.write();
        if state.is_some() {
            return Ok(true);
        }

        let Some(raw) = self.read_resource(lang)? else {
            return Ok(false);
        };
        let buffer = decompress(&raw)?;
        *state = Some(Loaded::parse(lang, buffer, lazy)?);
        Ok(true)
    }

    /// Like [`Dictionary::init`], but a missing resource is an error.
    pub fn load_resource(&self, lang: Lang, lazy: bool) -> Result<()> {
        if self.init(lang, lazy)? {
            Ok(())
        } else {
            Err(DictionaryError::ResourceNotFound(lang))
        }
    }

    fn read_resource(&self, lang: Lang) -> Result<Option<Vec<u8>>> {
        let name = resource_name(lang);
        let Some(locator) = &self.locator else {
            log::warn!("no resource locator; cannot read {}", name);
            return Ok(None);
        };
        match locator.find(&name)? {
            Some(raw) => {
                self.resource_reads.fetch_add(1, Ordering::Relaxed);
                log::debug!("read {} ({} bytes)", name, raw.len());
                Ok(Some(raw))
            }
            None => {
                log::warn!("dictionary resource {} not found", name);
                Ok(None)
            }
        }
    }

    /// Decompress and load a container, replacing whatever was loaded.
    ///
    /// On error the dictionary is left uninitialized.
    pub fn load(&self, raw: &[u8], lazy: bool) -> Result<()> {
        match decompress(raw) {
            Ok(buffer) => self.load_body(buffer, lazy),
            Err(err) => {
                self.discard_after_failure();
                Err(err)
            }
        }
    }

    /// Load an already decompressed body.
    pub fn load_body(&self, body: Vec<u8>, lazy: bool) -> Result<()> {
        match Loaded::parse(Lang::UNDEFINED, body, lazy) {
            Ok(loaded) => {
                *self.state.write() = Some(loaded);
                Ok(())
            }
            Err(err) => {
                self.discard_after_failure();
                Err(err)
            }
        }
    }

    fn discard_after_failure(&self) {
        if let Some(previous) = self.state.write().take() {
            log::warn!(
                "load failed; dropped the previously loaded {} dictionary",
                previous.language
            );
        }
    }

    /// Drop the trie, the groups and the buffer. Safe to call repeatedly.
    pub fn unload(&self) {
        if let Some(loaded) = self.state.write().take() {
            log::debug!(
                "unloaded {} dictionary ({} groups)",
                loaded.language,
                loaded.groups.len()
            );
        }
    }

    /// Groups for `word`, falling back to suffix rewrites on a miss.
    ///
    /// `word` is expected upper-case. `lang` narrows the result to groups
    /// holding the word in that language; `Lang::UNDEFINED` keeps all.
    /// `try_create` enables the most speculative rewrites.
    pub fn find(&self, word: &str, try_create: bool, lang: Lang) -> Result<Option<Groups>> {
        if word.is_empty() || !self.is_initialized() {
            return Ok(None);
        }
        self.find_at_depth(word, try_create, lang, 0)
    }

    fn find_at_depth(
        &self,
        word: &str,
        try_create: bool,
        lang: Lang,
        depth: usize,
    ) -> Result<Option<Groups>> {
        if let Some(found) = self.lookup_exact(word, lang)? {
            return Ok(Some(found));
        }
        if depth >= MAX_HEURISTIC_DEPTH {
            return Ok(None);
        }
        for rewrite in heuristics::rewrites(word, try_create) {
            if let Some(found) = self.find_at_depth(&rewrite.candidate, false, lang, depth + 1)? {
                log::trace!("{} resolved as {} ({:?})", word, rewrite.candidate, rewrite.rule);
                return Ok(Some(found));
            }
        }
        Ok(None)
    }

    fn lookup_exact(&self, word: &str, lang: Lang) -> Result<Option<Groups>> {
        let units: Vec<u16> = word.encode_utf16().collect();
        loop {
            {
                let state = self.state.read();
                let Some(loaded) = state.as_ref() else {
                    return Ok(None);
                };
                match loaded.root.descend(&units) {
                    Descent::Reached { consumed, node } => {
                        if consumed < units.len() {
                            return Ok(None);
                        }
                        return Ok(loaded.terminal_groups(node, word, lang));
                    }
                    Descent::Pending { .. } => {}
                }
            }
            self.materialize_path(&units)?;
        }
    }

    fn materialize_path(&self, units: &[u16]) -> Result<()> {
        let mut state = self.state.write();
        let Some(loaded) = state.as_mut() else {
            return Ok(());
        };
        let Loaded {
            buffer,
            groups,
            root,
            ..
        } = loaded;
        let groups_before = groups.lazily_materialized();
        let decoded = root.materialize_path(units, buffer, groups)?;
        self.record_materialized(decoded, groups.lazily_materialized() - groups_before);
        Ok(())
    }

    fn record_materialized(&self, nodes: u64, groups: u64) {
        if nodes > 0 || groups > 0 {
            log::trace!("materialized {} nodes, {} groups", nodes, groups);
        }
        self.nodes_materialized.fetch_add(nodes, Ordering::Relaxed);
        self.groups_materialized.fetch_add(groups, Ordering::Relaxed);
    }

    /// Words spelled `word` in the groups an exact (`try_create = false`)
    /// lookup returns.
    pub fn find_words(&self, word: &str, lang: Lang) -> Result<Vec<DerivateWord>> {
        let Some(groups) = self.find(word, false, lang)? else {
            return Ok(Vec::new());
        };
        Ok(groups
            .iter()
            .flat_map(|g| g.words_spelled(word, lang).cloned())
            .collect())
    }

    /// Decode everything still pending, then release the buffer.
    pub fn materialize_all(&self) -> Result<()> {
        let mut state = self.state.write();
        let Some(loaded) = state.as_mut() else {
            return Ok(());
        };
        let Loaded {
            buffer,
            groups,
            root,
            ..
        } = loaded;
        let groups_before = groups.lazily_materialized();
        let decoded = root.materialize_all(buffer, groups)?;
        groups.materialize_all(buffer)?;
        self.record_materialized(decoded, groups.lazily_materialized() - groups_before);
        *buffer = Vec::new();
        Ok(())
    }

    /// The groups decoded so far, in id order. Pending slots are skipped, so
    /// call [`Dictionary::materialize_all`] first for the full table.
    pub fn groups(&self) -> Option<Groups> {
        let state = self.state.read();
        let loaded = state.as_ref()?;
        Some(
            loaded
                .groups
                .iter()
                .filter_map(|slot| match slot {
                    GroupSlot::Materialized(group) => Some(Arc::clone(group)),
                    GroupSlot::Pending(_) => None,
                })
                .collect(),
        )
    }

    /// `None` when nothing is loaded.
    pub fn summary(&self) -> Option<DictionarySummary> {
        let state = self.state.read();
        let loaded = state.as_ref()?;
        let trie = loaded.root.summarize();
        Some(DictionarySummary {
            language: loaded.language,
            lazy: loaded.lazy,
            groups: loaded.groups.len(),
            pending_groups: loaded.groups.pending_count(),
            materialized_nodes: trie.materialized_nodes,
            pending_nodes: trie.pending_nodes,
            terminal_nodes: trie.terminal_nodes,
            max_depth: trie.max_depth,
            buffer_bytes: loaded.buffer.len(),
        })
    }

    pub fn stats(&self) -> DictionaryStats {
        DictionaryStats {
            resource_reads: self.resource_reads.load(Ordering::Relaxed),
            nodes_materialized: self.nodes_materialized.load(Ordering::Relaxed),
            groups_materialized: self.groups_materialized.load(Ordering::Relaxed),
        }
    }
}

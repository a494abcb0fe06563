// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The derivate group table.
//!
//! Groups live in one contiguous `Vec` addressed by 1-based id. Under lazy
//! loading most slots start out as `Pending(offset)`: the load recorded where
//! the record starts and skipped it. The first `resolve` decodes the record in
//! place and the offset is dropped. A slot never goes back to pending.
//!
//! Ids are positional. The id of a slot is fixed when it is pushed
//! (`len() + 1`), whether or not the record has been decoded yet, so trie nodes
//! can refer to groups that haven't been materialized.

use std::sync::Arc;

use crate::binary::{read_count_u16, read_string, read_u16, write_string, write_u16};
use crate::error::{DictionaryError, Result};
use crate::types::{DerivateGroup, DerivateWord, Lang, WordAttrs, WordClass};

/// Group attribute bits.
pub const ATTR_DUMMY: u16 = 0x01;
pub const ATTR_NOT_GENERATE: u16 = 0x02;
pub const ATTR_GENERATED: u16 = 0x04;

/// Smallest serialized word: empty spelling + class + lang + attrs.
const MIN_WORD_SIZE: usize = 1 + 2 + 2 + 2;

// ============================================================================
// RECORD CODEC
// ============================================================================

/// Decode one group record at `pos`, advancing `pos` past it.
pub fn decode_group(buf: &[u8], pos: &mut usize, id: u32) -> Result<DerivateGroup> {
    let start = *pos;
    let attrs = read_u16(buf, pos)?;
    let lang = Lang(read_u16(buf, pos)?);
    let prefix = read_string(buf, pos)?;

    let word_count = read_count_u16(buf, pos, MIN_WORD_SIZE)?;
    let mut words = Vec::with_capacity(word_count);
    for i in 0..word_count {
        let at = *pos;
        let spelling = read_string(buf, pos)?.ok_or_else(|| {
            DictionaryError::corrupt(at, format!("group {} word {} has no spelling", id, i))
        })?;
        let class = WordClass(read_u16(buf, pos)?);
        let word_lang = Lang(read_u16(buf, pos)?);
        let word_attrs = WordAttrs(read_u16(buf, pos)?);
        words.push(DerivateWord {
            spelling,
            class,
            lang: word_lang,
            attrs: word_attrs,
        });
    }

    log::trace!("decoded group {} at {} ({} words)", id, start, words.len());

    Ok(DerivateGroup {
        id,
        is_generated: attrs & ATTR_GENERATED != 0,
        is_dummy: attrs & ATTR_DUMMY != 0,
        not_generate: attrs & ATTR_NOT_GENERATE != 0,
        prefix,
        lang,
        words,
    })
}

/// Encode one group record (without the entry-end pointer).
pub fn encode_group(group: &DerivateGroup, buf: &mut Vec<u8>) -> Result<()> {
    let mut attrs = 0u16;
    if group.is_dummy {
        attrs |= ATTR_DUMMY;
    }
    if group.not_generate {
        attrs |= ATTR_NOT_GENERATE;
    }
    if group.is_generated {
        attrs |= ATTR_GENERATED;
    }
    write_u16(buf, attrs);
    write_u16(buf, group.lang.bits());
    write_string(buf, group.prefix.as_deref())?;

    let word_count = u16::try_from(group.words.len()).map_err(|_| {
        DictionaryError::InvalidEntry(format!("group has {} words", group.words.len()))
    })?;
    write_u16(buf, word_count);
    for word in &group.words {
        write_string(buf, Some(&word.spelling))?;
        write_u16(buf, word.class.bits());
        write_u16(buf, word.lang.bits());
        write_u16(buf, word.attrs.bits());
    }
    Ok(())
}

// ============================================================================
// STORE
// ============================================================================

/// A group table slot.
#[derive(Debug, Clone)]
pub enum GroupSlot {
    /// Not decoded yet; the record starts at this offset.
    Pending(usize),
    Materialized(Arc<DerivateGroup>),
}

#[derive(Debug, Default)]
pub struct GroupStore {
    slots: Vec<GroupSlot>,
    pending: usize,
    lazily_materialized: u64,
}

impl GroupStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            ..Self::default()
        }
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Number of slots still pending.
    pub fn pending_count(&self) -> usize {
        self.pending
    }

    /// Number of pending slots decoded by `resolve` so far.
    pub fn lazily_materialized(&self) -> u64 {
        self.lazily_materialized
    }

    /// Id the next pushed slot will get.
    fn next_id(&self) -> u32 {
        self.slots.len() as u32 + 1
    }

    /// Record a group whose body starts at `offset`. Returns its id.
    pub fn push_pending(&mut self, offset: usize) -> u32 {
        let id = self.next_id();
        self.slots.push(GroupSlot::Pending(offset));
        self.pending += 1;
        id
    }

    /// Insert an already decoded group. Its `id` is overwritten with the
    /// positional id, which is returned.
    pub fn push_materialized(&mut self, mut group: DerivateGroup) -> u32 {
        let id = self.next_id();
        group.id = id;
        self.slots.push(GroupSlot::Materialized(Arc::new(group)));
        id
    }

    /// True for ids in `1..=len()`.
    pub fn contains_id(&self, id: u32) -> bool {
        id >= 1 && (id as usize) <= self.slots.len()
    }

    pub fn slot(&self, id: u32) -> Option<&GroupSlot> {
        if !self.contains_id(id) {
            return None;
        }
        self.slots.get(id as usize - 1)
    }

    pub fn is_pending(&self, id: u32) -> bool {
        matches!(self.slot(id), Some(GroupSlot::Pending(_)))
    }

    /// The group if it has been materialized.
    pub fn get(&self, id: u32) -> Option<&Arc<DerivateGroup>> {
        match self.slot(id) {
            Some(GroupSlot::Materialized(group)) => Some(group),
            _ => None,
        }
    }

    /// Materialize the group in place if needed and return it.
    ///
    /// # Panics
    ///
    /// Panics if `id` is not in `1..=len()`. Callers validate ids read from a
    /// buffer before resolving them.
    pub fn resolve(&mut self, buf: &[u8], id: u32) -> Result<&Arc<DerivateGroup>> {
        assert!(
            self.contains_id(id),
            "group id {} outside 1..={}",
            id,
            self.slots.len()
        );
        let slot = &mut self.slots[id as usize - 1];
        if let GroupSlot::Pending(offset) = *slot {
            let mut pos = offset;
            let group = decode_group(buf, &mut pos, id)?;
            *slot = GroupSlot::Materialized(Arc::new(group));
            self.pending -= 1;
            self.lazily_materialized += 1;
        }
        match slot {
            GroupSlot::Materialized(group) => Ok(group),
            GroupSlot::Pending(offset) => Err(DictionaryError::corrupt(
                *offset,
                format!("group {} left pending", id),
            )),
        }
    }

    /// Resolve every pending slot.
    pub fn materialize_all(&mut self, buf: &[u8]) -> Result<()> {
        for id in 1..=self.slots.len() as u32 {
            self.resolve(buf, id)?;
        }
        Ok(())
    }

    pub fn iter(&self) -> impl Iterator<Item = &GroupSlot> {
        self.slots.iter()
    }
}

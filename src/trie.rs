// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The word-form trie.
//!
//! One edge per UTF-16 code unit. A node owns its children by value in a
//! `BTreeMap`, so the whole tree is a plain owned value with no back pointers.
//! Nodes that haven't been expanded yet are `TrieNode::Pending`: the parent
//! recorded where the child body starts, and how deep it sits, then skipped to
//! the end of its subtree. The depth travels with the pending node so lazy and
//! eager decoding enforce the same [`MAX_TRIE_DEPTH`].
//!
//! Terminal group ids are always resolved when a node body is decoded, even
//! under lazy loading. Any group reachable from a materialized node is
//! therefore materialized too, and the read path never has to touch the group
//! table's pending slots.

use std::collections::BTreeMap;

use crate::binary::{read_count_u16, read_i16, read_i32, read_offset};
use crate::error::{DictionaryError, Result};
use crate::group::GroupStore;

/// Deepest node either decode path will accept. Words are at most 254 UTF-8
/// bytes, so real resources never come close.
pub const MAX_TRIE_DEPTH: usize = 512;

/// Bytes per child edge header: code unit + end offset.
const EDGE_HEADER_SIZE: usize = 2 + 4;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrieNode {
    /// Not decoded yet. The body starts at `offset`; the root is depth 0.
    Pending { offset: usize, depth: usize },
    Materialized(NodeBody),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NodeBody {
    /// Groups whose words end exactly at this node, in serialized order.
    pub terminal_group_ids: Option<Vec<u32>>,
    pub children: BTreeMap<u16, TrieNode>,
}

/// Where a read-only walk stopped.
#[derive(Debug)]
pub enum Descent<'a> {
    /// Walked `consumed` code units and stopped at `node`, either because the
    /// word ended or because the next edge doesn't exist.
    Reached { consumed: usize, node: &'a NodeBody },
    /// The edge for unit `consumed` leads to a pending node.
    Pending { consumed: usize },
}

/// Node counts gathered by [`NodeBody::summarize`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TrieSummary {
    pub materialized_nodes: usize,
    pub pending_nodes: usize,
    /// Materialized nodes with at least one terminal group.
    pub terminal_nodes: usize,
    pub max_depth: usize,
}

impl TrieNode {
    pub fn is_pending(&self) -> bool {
        matches!(self, TrieNode::Pending { .. })
    }

    pub fn body(&self) -> Option<&NodeBody> {
        match self {
            TrieNode::Materialized(body) => Some(body),
            TrieNode::Pending { .. } => None,
        }
    }

    /// Decode the node if it is pending and return its body. The flag is true
    /// when this call did the decoding.
    pub fn materialize(
        &mut self,
        buf: &[u8],
        groups: &mut GroupStore,
    ) -> Result<(&mut NodeBody, bool)> {
        let mut fresh = false;
        if let TrieNode::Pending { offset, depth } = *self {
            let mut pos = offset;
            let body = decode_node_at_depth(buf, groups, true, &mut pos, depth)?;
            *self = TrieNode::Materialized(body);
            fresh = true;
        }
        match self {
            TrieNode::Materialized(body) => Ok((body, fresh)),
            TrieNode::Pending { offset, .. } => {
                Err(DictionaryError::corrupt(*offset, "node left pending"))
            }
        }
    }
}

impl NodeBody {
    pub fn child(&self, unit: u16) -> Option<&TrieNode> {
        self.children.get(&unit)
    }

    /// Expand the child under `unit` if it is pending. Returns true when this
    /// call decoded it; false when it was already materialized or absent.
    pub fn materialize_child(
        &mut self,
        unit: u16,
        buf: &[u8],
        groups: &mut GroupStore,
    ) -> Result<bool> {
        match self.children.get_mut(&unit) {
            Some(child) => Ok(child.materialize(buf, groups)?.1),
            None => Ok(false),
        }
    }

    /// Follow `units` without mutating anything.
    pub fn descend(&self, units: &[u16]) -> Descent<'_> {
        let mut node = self;
        for (i, unit) in units.iter().enumerate() {
            match node.children.get(unit) {
                None => return Descent::Reached { consumed: i, node },
                Some(TrieNode::Pending { .. }) => return Descent::Pending { consumed: i },
                Some(TrieNode::Materialized(body)) => node = body,
            }
        }
        Descent::Reached {
            consumed: units.len(),
            node,
        }
    }

    /// Materialize every pending node along `units`, stopping at the first
    /// missing edge. Returns how many nodes were decoded.
    pub fn materialize_path(
        &mut self,
        units: &[u16],
        buf: &[u8],
        groups: &mut GroupStore,
    ) -> Result<u64> {
        let mut decoded = 0;
        let mut node = self;
        for unit in units {
            if node.materialize_child(*unit, buf, groups)? {
                decoded += 1;
            }
            match node.children.get_mut(unit) {
                Some(TrieNode::Materialized(body)) => node = body,
                _ => break,
            }
        }
        Ok(decoded)
    }

    /// Materialize the whole subtree. Returns how many nodes were decoded.
    pub fn materialize_all(&mut self, buf: &[u8], groups: &mut GroupStore) -> Result<u64> {
        let mut decoded = 0;
        let mut stack: Vec<&mut TrieNode> = self.children.values_mut().collect();
        while let Some(node) = stack.pop() {
            let (body, fresh) = node.materialize(buf, groups)?;
            if fresh {
                decoded += 1;
            }
            stack.extend(body.children.values_mut());
        }
        Ok(decoded)
    }

    /// Count nodes without expanding anything. `self` counts as depth 0.
    pub fn summarize(&self) -> TrieSummary {
        let mut summary = TrieSummary::default();
        let mut stack: Vec<(&NodeBody, usize)> = vec![(self, 0)];
        while let Some((body, depth)) = stack.pop() {
            summary.materialized_nodes += 1;
            summary.max_depth = summary.max_depth.max(depth);
            if body.terminal_group_ids.is_some() {
                summary.terminal_nodes += 1;
            }
            for child in body.children.values() {
                match child {
                    TrieNode::Pending { .. } => summary.pending_nodes += 1,
                    TrieNode::Materialized(b) => stack.push((b, depth + 1)),
                }
            }
        }
        summary
    }
}

// ============================================================================
// DECODING
// ============================================================================

/// Decode a node body at `pos`, advancing `pos` past the whole subtree.
///
/// With `lazy` set, children become `Pending` and their subtrees are skipped.
/// Otherwise the whole subtree is decoded now.
pub fn decode_node(
    buf: &[u8],
    groups: &mut GroupStore,
    lazy: bool,
    pos: &mut usize,
) -> Result<NodeBody> {
    decode_node_at_depth(buf, groups, lazy, pos, 0)
}

fn decode_node_at_depth(
    buf: &[u8],
    groups: &mut GroupStore,
    lazy: bool,
    pos: &mut usize,
    depth: usize,
) -> Result<NodeBody> {
    if depth > MAX_TRIE_DEPTH {
        return Err(DictionaryError::corrupt(
            *pos,
            format!("trie deeper than {} levels", MAX_TRIE_DEPTH),
        ));
    }

    let group_count = read_count_u16(buf, pos, 4)?;
    let terminal_group_ids = if group_count == 0 {
        None
    } else {
        let mut ids = Vec::with_capacity(group_count);
        for _ in 0..group_count {
            let at = *pos;
            let raw = read_i32(buf, pos)?;
            let id = u32::try_from(raw).ok().filter(|&id| groups.contains_id(id));
            let Some(id) = id else {
                return Err(DictionaryError::corrupt(
                    at,
                    format!("group id {} outside 1..={}", raw, groups.len()),
                ));
            };
            groups.resolve(buf, id)?;
            ids.push(id);
        }
        Some(ids)
    };

    let child_count = read_count_u16(buf, pos, EDGE_HEADER_SIZE)?;
    let mut children = BTreeMap::new();
    for _ in 0..child_count {
        let unit = read_i16(buf, pos)? as u16;
        let at = *pos;
        let end = read_offset(buf, pos)?;
        let body_at = *pos;
        if end < body_at {
            return Err(DictionaryError::corrupt(
                at,
                format!("child end {} precedes its body at {}", end, body_at),
            ));
        }

        let child = if lazy {
            *pos = end;
            TrieNode::Pending {
                offset: body_at,
                depth: depth + 1,
            }
        } else {
            let body = decode_node_at_depth(buf, groups, false, pos, depth + 1)?;
            if *pos != end {
                return Err(DictionaryError::corrupt(
                    at,
                    format!("child subtree ends at {} but header says {}", *pos, end),
                ));
            }
            TrieNode::Materialized(body)
        };

        // Duplicate keys: the first edge wins.
        children.entry(unit).or_insert(child);
    }

    Ok(NodeBody {
        terminal_group_ids,
        children,
    })
}

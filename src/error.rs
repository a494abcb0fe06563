// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Error taxonomy for dictionary decoding and lookup.
//!
//! Only decode failures are errors. A word that is not in the dictionary, or an
//! empty word, is an `Ok(None)` from `find`, never an `Err`. A language without
//! a resource is `Ok(false)` from `init`.

use std::io;

use thiserror::Error;

use crate::types::Lang;

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, DictionaryError>;

#[derive(Debug, Error)]
pub enum DictionaryError {
    /// The serialized buffer is malformed. Fatal to the `load` or
    /// materialization in progress.
    #[error("corrupt dictionary data at offset {offset}: {reason}")]
    CorruptData { offset: usize, reason: String },

    /// No resource exists for the language.
    #[error("no dictionary resource for language {0}")]
    ResourceNotFound(Lang),

    /// The resource locator failed to read a resource.
    #[error("failed to read dictionary resource: {0}")]
    Io(#[from] io::Error),

    #[error("invalid configuration: {0}")]
    Config(String),

    /// Builder input rejected.
    #[error("invalid dictionary entry: {0}")]
    InvalidEntry(String),
}

impl DictionaryError {
    pub(crate) fn corrupt(offset: usize, reason: impl Into<String>) -> Self {
        DictionaryError::CorruptData {
            offset,
            reason: reason.into(),
        }
    }

    /// True for [`DictionaryError::CorruptData`].
    pub fn is_corrupt(&self) -> bool {
        matches!(self, DictionaryError::CorruptData { .. })
    }
}

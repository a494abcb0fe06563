// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Where dictionary resources come from.
//!
//! A dictionary for language `xx` is the resource named `d_xx.dat`. Lookup is
//! by case-insensitive name suffix, so a resource set may carry a package
//! prefix (`Pkg.Resources.d_ru.dat`) and still be found.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::types::Lang;

/// Resource name for a single language.
pub fn resource_name(lang: Lang) -> String {
    format!("d_{}.dat", lang)
}

/// Source of raw (still compressed) resources.
pub trait ResourceLocator: Send + Sync {
    /// Names of every available resource.
    fn names(&self) -> Result<Vec<String>>;

    /// Bytes of the named resource, `None` if it doesn't exist.
    fn open(&self, name: &str) -> Result<Option<Vec<u8>>>;

    /// Find the resource whose name ends with `name`, ignoring case.
    fn find(&self, name: &str) -> Result<Option<Vec<u8>>> {
        let suffix = name.to_lowercase();
        for candidate in self.names()? {
            if candidate.to_lowercase().ends_with(&suffix) {
                return self.open(&candidate);
            }
        }
        Ok(None)
    }
}

/// Resources as files in one directory.
#[derive(Debug, Clone)]
pub struct DirectoryResources {
    root: PathBuf,
}

impl DirectoryResources {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl ResourceLocator for DirectoryResources {
    fn names(&self) -> Result<Vec<String>> {
        if !self.root.is_dir() {
            log::warn!("resource directory {} does not exist", self.root.display());
            return Ok(Vec::new());
        }
        let mut names = Vec::new();
        for entry in fs::read_dir(&self.root)? {
            let entry = entry?;
            if entry.file_type()?.is_file() {
                if let Some(name) = entry.file_name().to_str() {
                    names.push(name.to_string());
                }
            }
        }
        names.sort();
        Ok(names)
    }

    fn open(&self, name: &str) -> Result<Option<Vec<u8>>> {
        let path = self.root.join(name);
        if !path.is_file() {
            return Ok(None);
        }
        log::debug!("reading dictionary resource {}", path.display());
        Ok(Some(fs::read(path)?))
    }
}

/// Resources held in memory, keyed by name.
#[derive(Debug, Clone, Default)]
pub struct MemoryResources {
    entries: BTreeMap<String, Vec<u8>>,
}

impl MemoryResources {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, bytes: Vec<u8>) {
        self.entries.insert(name.into(), bytes);
    }

    /// Builder-style [`MemoryResources::insert`].
    pub fn with(mut self, name: impl Into<String>, bytes: Vec<u8>) -> Self {
        self.insert(name, bytes);
        self
    }
}

impl ResourceLocator for MemoryResources {
    fn names(&self) -> Result<Vec<String>> {
        Ok(self.entries.keys().cloned().collect())
    }

    fn open(&self, name: &str) -> Result<Option<Vec<u8>>> {
        Ok(self.entries.get(name).cloned())
    }
}

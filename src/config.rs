// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Service configuration.
//!
//! ```json
//! { "resourceDir": "resources", "languages": ["ru", "ua"], "lazy": true }
//! ```
//!
//! Missing fields take their defaults. `DERIVATE_RESOURCE_DIR`, when set and
//! non-empty, replaces `resourceDir`.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::{DictionaryError, Result};
use crate::resources::DirectoryResources;
use crate::service::DerivateService;
use crate::types::Lang;

/// Environment variable overriding [`DerivateConfig::resource_dir`].
pub const RESOURCE_DIR_ENV: &str = "DERIVATE_RESOURCE_DIR";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DerivateConfig {
    /// Directory holding the `d_<lang>.dat` files.
    pub resource_dir: PathBuf,
    pub languages: Lang,
    pub lazy: bool,
}

impl Default for DerivateConfig {
    fn default() -> Self {
        Self {
            resource_dir: PathBuf::from("resources"),
            languages: Lang::RU,
            lazy: true,
        }
    }
}

impl DerivateConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        if json.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Self =
            serde_json::from_str(json).map_err(|e| DictionaryError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Read a config file, then apply the environment override. Relative
    /// resource directories are taken relative to the file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let json = fs::read_to_string(path).map_err(|e| {
            DictionaryError::Config(format!("cannot read {}: {}", path.display(), e))
        })?;
        let mut config = Self::from_json(&json)?;
        if config.resource_dir.is_relative() {
            if let Some(parent) = path.parent() {
                config.resource_dir = parent.join(&config.resource_dir);
            }
        }
        config.apply_override(std::env::var(RESOURCE_DIR_ENV).ok());
        Ok(config)
    }

    /// Replace the resource directory with `dir` unless it is empty.
    pub fn apply_override(&mut self, dir: Option<String>) {
        if let Some(dir) = dir.filter(|d| !d.trim().is_empty()) {
            log::debug!("resource directory overridden by {}: {}", RESOURCE_DIR_ENV, dir);
            self.resource_dir = PathBuf::from(dir);
        }
    }

    fn validate(&self) -> Result<()> {
        if self.languages.is_undefined() {
            return Err(DictionaryError::Config(
                "at least one language is required".to_string(),
            ));
        }
        Ok(())
    }

    pub fn resources(&self) -> DirectoryResources {
        DirectoryResources::new(&self.resource_dir)
    }

    /// A service with every configured language initialized.
    pub fn open_service(&self) -> Result<DerivateService> {
        let service = DerivateService::new(Arc::new(self.resources()));
        let loaded = service.initialize(self.languages, self.lazy)?;
        log::debug!("derivation service ready for {}", loaded);
        Ok(service)
    }
}

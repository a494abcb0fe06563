//! Lazily materialized derivation dictionary for Russian word forms.
//!
//! A dictionary maps word forms to derivate groups (families of related words
//! such as КРАСНЫЙ / КРАСНОТА / КРАСНЕТЬ). The index is a trie over UTF-16 code
//! units, serialized so that any subtree can be skipped on load and decoded
//! the first time a lookup walks into it. Forms that are not indexed verbatim
//! go through a small table of suffix rewrites and are looked up again.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐     ┌──────────────┐     ┌──────────────┐
//! │  binary/     │────▶│  group.rs    │────▶│  trie.rs     │
//! │ (codec,      │     │ (GroupStore, │     │ (TrieNode,   │
//! │  container)  │     │  Pending)    │     │  descend)    │
//! └──────────────┘     └──────────────┘     └──────────────┘
//!                                                  │
//!        ┌──────────────┐     ┌──────────────┐     ▼
//!        │ heuristics.rs│────▶│ dictionary.rs│◀── resources.rs
//!        │ (rewrites)   │     │ (find, init) │
//!        └──────────────┘     └──────────────┘
//!                                    │
//!                                    ▼
//!                             ┌──────────────┐
//!                             │  service.rs  │◀── config.rs
//!                             │ (per-lang)   │
//!                             └──────────────┘
//! ```
//!
//! `builder.rs` writes the format the loaders read.
//!
//! # Usage
//!
//! ```ignore
//! use derivate::{Dictionary, DirectoryResources, Lang};
//!
//! let dict = Dictionary::new(Arc::new(DirectoryResources::new("resources")));
//! if dict.init(Lang::RU, true)? {
//!     let groups = dict.find("КРАСНОЙ", true, Lang::RU)?;
//! }
//! ```

// Module declarations
pub mod binary;
pub mod builder;
pub mod config;
pub mod dictionary;
pub mod error;
pub mod group;
pub mod heuristics;
pub mod resources;
pub mod service;
pub mod testing;
pub mod trie;
mod types;

// Re-exports for public API
pub use binary::Compression;
pub use builder::{DictionaryBuilder, GroupSpec, SourceDictionary};
pub use config::{DerivateConfig, RESOURCE_DIR_ENV};
pub use dictionary::{Dictionary, DictionaryStats, DictionarySummary, Groups};
pub use error::{DictionaryError, Result};
pub use resources::{resource_name, DirectoryResources, MemoryResources, ResourceLocator};
pub use service::DerivateService;
pub use types::{DerivateGroup, DerivateWord, Lang, WordAttrs, WordClass};

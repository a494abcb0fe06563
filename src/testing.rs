//! Test utilities shared across unit and integration tests.
//!
//! This module is always compiled but hidden from documentation.
//! It provides one canonical sample dictionary so tests agree on ids.

#![doc(hidden)]

use std::sync::Arc;

use crate::binary::Compression;
use crate::builder::{DictionaryBuilder, GroupSpec};
use crate::dictionary::Dictionary;
use crate::error::Result;
use crate::resources::{resource_name, MemoryResources};
use crate::types::{DerivateWord, Lang, WordClass};

/// Ids of the groups in [`sample_builder`].
pub mod ids {
    /// КРАСНЫЙ, КРАСНОТА, КРАСНЕТЬ
    pub const RED: u32 = 1;
    /// Generated group sharing КРАСНОТА with [`RED`].
    pub const RED_GENERATED: u32 = 2;
    /// БЫСТРЫЙ, БЫСТРОТА
    pub const FAST: u32 = 3;
    /// УЧИТЬ, УЧИТЕЛЬ, УЧЕНИЕ
    pub const TEACH: u32 = 4;
    /// ПЕРЕКРАСИТЬ, generated and alone at its terminal.
    pub const REPAINT: u32 = 5;
    /// ЧЕРВОНИЙ (Ukrainian words in a Russian resource)
    pub const RED_UA: u32 = 6;
    /// ДЛИННЫЙ, ДЛИНА
    pub const LONG: u32 = 7;
    /// ВЕСЕЛИЕ, ВЕСЕЛЫЙ
    pub const MERRY: u32 = 8;
    /// ДОМ, ДОМИК
    pub const HOUSE: u32 = 9;
}

pub fn ru(spelling: &str, class: WordClass) -> DerivateWord {
    DerivateWord::new(spelling, class, Lang::RU)
}

/// Builder for the sample Russian dictionary. Group ids are listed in [`ids`].
pub fn sample_builder() -> Result<DictionaryBuilder> {
    let mut builder = DictionaryBuilder::new(Lang::RU);
    builder.add_group(GroupSpec::new(vec![
        ru("КРАСНЫЙ", WordClass::ADJECTIVE),
        ru("КРАСНОТА", WordClass::NOUN),
        ru("КРАСНЕТЬ", WordClass::VERB),
    ]))?;
    builder.add_group(GroupSpec::new(vec![ru("КРАСНОТА", WordClass::NOUN)]).generated(true))?;
    builder.add_group(GroupSpec::new(vec![
        ru("БЫСТРЫЙ", WordClass::ADJECTIVE),
        ru("БЫСТРОТА", WordClass::NOUN),
    ]))?;
    builder.add_group(GroupSpec::new(vec![
        ru("УЧИТЬ", WordClass::VERB),
        ru("УЧИТЕЛЬ", WordClass::NOUN),
        ru("УЧЕНИЕ", WordClass::NOUN),
    ]))?;
    builder.add_group(
        GroupSpec::new(vec![ru("ПЕРЕКРАСИТЬ", WordClass::VERB)])
            .generated(true)
            .with_prefix("ПЕРЕ"),
    )?;
    builder.add_group(GroupSpec::new(vec![DerivateWord::new(
        "ЧЕРВОНИЙ",
        WordClass::ADJECTIVE,
        Lang::UA,
    )]))?;
    builder.add_group(GroupSpec::new(vec![
        ru("ДЛИННЫЙ", WordClass::ADJECTIVE),
        ru("ДЛИНА", WordClass::NOUN),
    ]))?;
    builder.add_group(GroupSpec::new(vec![
        ru("ВЕСЕЛИЕ", WordClass::NOUN),
        ru("ВЕСЕЛЫЙ", WordClass::ADJECTIVE),
    ]))?;
    builder.add_group(GroupSpec::new(vec![
        ru("ДОМ", WordClass::NOUN),
        ru("ДОМИК", WordClass::NOUN),
    ]))?;
    Ok(builder)
}

/// Decompressed body of the sample dictionary.
pub fn sample_body() -> Result<Vec<u8>> {
    sample_builder()?.to_bytes()
}

pub fn sample_container(kind: Compression) -> Result<Vec<u8>> {
    sample_builder()?.to_container(kind)
}

/// The sample dictionary, loaded without a locator.
pub fn sample_dictionary(lazy: bool) -> Result<Dictionary> {
    let dict = Dictionary::default();
    dict.load_body(sample_body()?, lazy)?;
    Ok(dict)
}

/// In-memory resources holding the sample dictionary as `d_ru.dat`.
pub fn sample_resources() -> Result<Arc<MemoryResources>> {
    Ok(Arc::new(MemoryResources::new().with(
        resource_name(Lang::RU),
        sample_container(Compression::Gzip)?,
    )))
}

/// Words worth looking up in the sample dictionary: exact hits, rewrites,
/// misses and short words.
pub const SAMPLE_QUERIES: &[&str] = &[
    "КРАСНЫЙ",
    "КРАСНОЙ",
    "КРАСНОТА",
    "КРАСНО",
    "БЫСТРО",
    "БЫСТРОЙ",
    "УЧИТЬСЯ",
    "ВЕСЕЛЬЕ",
    "ДЛИНЫЙ",
    "ПЕРЕКРАСИТЬ",
    "ПЕРЕКРАСИТЬСЯ",
    "ЧЕРВОНИЙ",
    "ДОМ",
    "ДОМА",
    "ЯТЬСЯ",
    "КОТ",
    "ЗЕЛЕНЫЙ",
];

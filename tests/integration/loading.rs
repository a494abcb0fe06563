//! Resource loading: init, unload, containers and lazy materialization.

use std::fs;
use std::sync::Arc;

use crate::common::{find_ids, ids, sample_body, sample_container, sample_resources};
use derivate::{
    Compression, Dictionary, DictionaryError, DirectoryResources, Lang, MemoryResources,
};

// ============================================================================
// INIT / UNLOAD
// ============================================================================

#[test]
fn test_init_twice_reads_resource_once() {
    let dict = Dictionary::new(sample_resources().unwrap());
    assert!(dict.init(Lang::RU, true).unwrap());
    assert!(dict.init(Lang::RU, true).unwrap());
    assert_eq!(dict.stats().resource_reads, 1);
    assert_eq!(dict.language(), Lang::RU);
}

#[test]
fn test_init_without_resource() {
    let dict = Dictionary::new(sample_resources().unwrap());
    assert!(!dict.init(Lang::EN, true).unwrap());
    assert!(!dict.is_initialized());
    assert_eq!(dict.stats().resource_reads, 0);

    let err = dict.load_resource(Lang::EN, true).unwrap_err();
    assert!(matches!(err, DictionaryError::ResourceNotFound(Lang::EN)));
}

#[test]
fn test_init_without_locator() {
    let dict = Dictionary::default();
    assert!(!dict.init(Lang::RU, true).unwrap());
}

#[test]
fn test_unload_then_init_reads_again() {
    let dict = Dictionary::new(sample_resources().unwrap());
    dict.init(Lang::RU, true).unwrap();
    let before = dict.find("КРАСНЫЙ", false, Lang::RU).unwrap().unwrap();

    dict.unload();
    dict.unload();
    assert!(!dict.is_initialized());
    assert_eq!(dict.language(), Lang::UNDEFINED);
    assert!(dict.find("КРАСНЫЙ", false, Lang::RU).unwrap().is_none());
    // Results handed out earlier stay usable.
    assert_eq!(before[0].words[0].spelling, "КРАСНЫЙ");

    assert!(dict.init(Lang::RU, false).unwrap());
    assert_eq!(dict.stats().resource_reads, 2);
    assert_eq!(find_ids(&dict, "КРАСНЫЙ", false, Lang::RU), vec![ids::RED]);
}

#[test]
fn test_init_from_directory() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("d_ru.dat"),
        sample_container(Compression::Gzip).unwrap(),
    )
    .unwrap();

    let dict = Dictionary::new(Arc::new(DirectoryResources::new(dir.path())));
    assert!(dict.init(Lang::RU, true).unwrap());
    assert_eq!(find_ids(&dict, "УЧИТЬСЯ", false, Lang::RU), vec![ids::TEACH]);
}

#[test]
fn test_directory_without_resource() {
    let dir = tempfile::tempdir().unwrap();
    let dict = Dictionary::new(Arc::new(DirectoryResources::new(dir.path())));
    assert!(!dict.init(Lang::RU, true).unwrap());
}

#[test]
fn test_resource_name_with_package_prefix() {
    let resources = MemoryResources::new().with(
        "Pullenti.Semantic.Utils.Properties.D_RU.DAT",
        sample_container(Compression::Gzip).unwrap(),
    );
    let dict = Dictionary::new(Arc::new(resources));
    assert!(dict.init(Lang::RU, true).unwrap());
}

// ============================================================================
// CONTAINERS
// ============================================================================

#[test]
fn test_gzip_and_brotli_containers_agree() {
    let gzip = Dictionary::default();
    gzip.load(&sample_container(Compression::Gzip).unwrap(), true)
        .unwrap();
    let brotli = Dictionary::default();
    brotli
        .load(&sample_container(Compression::Brotli).unwrap(), true)
        .unwrap();

    for word in ["КРАСНЫЙ", "КРАСНОЙ", "ВЕСЕЛЬЕ", "ЧЕРВОНИЙ"] {
        assert_eq!(
            find_ids(&gzip, word, true, Lang::UNDEFINED),
            find_ids(&brotli, word, true, Lang::UNDEFINED),
            "{}",
            word
        );
    }
}

// ============================================================================
// LAZY MATERIALIZATION
// ============================================================================

#[test]
fn test_lazy_load_starts_with_root_only() {
    let dict = Dictionary::default();
    dict.load_body(sample_body().unwrap(), true).unwrap();
    let summary = dict.summary().unwrap();
    assert!(summary.lazy);
    assert_eq!(summary.groups, 9);
    assert_eq!(summary.pending_groups, 9);
    assert_eq!(summary.materialized_nodes, 1);
    assert!(summary.pending_nodes > 0);
    assert!(summary.buffer_bytes > 0);
}

#[test]
fn test_eager_load_has_nothing_pending() {
    let dict = Dictionary::default();
    dict.load_body(sample_body().unwrap(), false).unwrap();
    let summary = dict.summary().unwrap();
    assert!(!summary.lazy);
    assert_eq!(summary.pending_groups, 0);
    assert_eq!(summary.pending_nodes, 0);
    assert_eq!(summary.buffer_bytes, 0);
    assert_eq!(dict.stats().nodes_materialized, 0);
}

#[test]
fn test_repeated_find_materializes_nothing_new() {
    let dict = Dictionary::default();
    dict.load_body(sample_body().unwrap(), true).unwrap();

    let first = find_ids(&dict, "КРАСНОЙ", true, Lang::RU);
    let after_first = dict.stats();
    assert!(after_first.nodes_materialized > 0);
    assert!(after_first.groups_materialized > 0);

    let second = find_ids(&dict, "КРАСНОЙ", true, Lang::RU);
    assert_eq!(first, second);
    assert_eq!(dict.stats(), after_first);
}

#[test]
fn test_lookup_materializes_only_its_groups() {
    let dict = Dictionary::default();
    dict.load_body(sample_body().unwrap(), true).unwrap();
    find_ids(&dict, "ДОМ", false, Lang::RU);
    let summary = dict.summary().unwrap();
    assert_eq!(summary.pending_groups, 8);
    assert_eq!(dict.stats().groups_materialized, 1);
}

#[test]
fn test_materialize_all_matches_eager() {
    let lazy = Dictionary::default();
    lazy.load_body(sample_body().unwrap(), true).unwrap();
    lazy.materialize_all().unwrap();

    let eager = Dictionary::default();
    eager.load_body(sample_body().unwrap(), false).unwrap();

    let a = lazy.summary().unwrap();
    let b = eager.summary().unwrap();
    assert_eq!(a.materialized_nodes, b.materialized_nodes);
    assert_eq!(a.terminal_nodes, b.terminal_nodes);
    assert_eq!(a.max_depth, b.max_depth);
    assert_eq!(a.pending_groups, 0);
    assert_eq!(a.buffer_bytes, 0);

    // Nothing left to decode.
    let stats = lazy.stats();
    lazy.materialize_all().unwrap();
    assert_eq!(lazy.stats(), stats);
}

//! Many threads looking words up in one lazily loaded dictionary.

use std::sync::{Arc, Barrier};
use std::thread;

use crate::common::{oracle, sample_body, sample_dictionary, sample_resources, SAMPLE_QUERIES};
use derivate::{Dictionary, Lang};

const THREADS: usize = 8;

#[test]
fn test_concurrent_find_agrees_with_oracle() {
    let expected = oracle(&sample_dictionary(false).unwrap(), Lang::UNDEFINED);

    let dict = Arc::new(Dictionary::default());
    dict.load_body(sample_body().unwrap(), true).unwrap();
    let barrier = Arc::new(Barrier::new(THREADS));

    let handles: Vec<_> = (0..THREADS)
        .map(|t| {
            let dict = Arc::clone(&dict);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                // Odd threads materialize in reverse order first.
                if t % 2 == 1 {
                    for word in SAMPLE_QUERIES.iter().rev() {
                        dict.find(word, true, Lang::RU).unwrap();
                    }
                }
                oracle(&dict, Lang::UNDEFINED)
            })
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), expected);
    }
}

#[test]
fn test_concurrent_materialization_decodes_each_node_once() {
    let reference = Dictionary::default();
    reference.load_body(sample_body().unwrap(), true).unwrap();
    oracle(&reference, Lang::UNDEFINED);
    let single = reference.stats();

    let dict = Arc::new(Dictionary::default());
    dict.load_body(sample_body().unwrap(), true).unwrap();
    let barrier = Arc::new(Barrier::new(THREADS));
    let handles: Vec<_> = (0..THREADS)
        .map(|_| {
            let dict = Arc::clone(&dict);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                for word in SAMPLE_QUERIES.iter().rev() {
                    dict.find(word, true, Lang::UNDEFINED).unwrap();
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    // Same set of paths walked, so the same nodes and groups got decoded.
    assert_eq!(dict.stats().nodes_materialized, single.nodes_materialized);
    assert_eq!(dict.stats().groups_materialized, single.groups_materialized);
}

#[test]
fn test_concurrent_init_reads_resource_once() {
    let dict = Arc::new(Dictionary::new(sample_resources().unwrap()));
    let barrier = Arc::new(Barrier::new(THREADS));
    let handles: Vec<_> = (0..THREADS)
        .map(|_| {
            let dict = Arc::clone(&dict);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                dict.init(Lang::RU, true).unwrap()
            })
        })
        .collect();
    for handle in handles {
        assert!(handle.join().unwrap());
    }
    assert_eq!(dict.stats().resource_reads, 1);
}

//! Property tests for P1-P9 (SPEC_FULL.md §8), run against `MemoryStore`.

use symspellrs::{distance, fingerprint, Index, MemoryStore, Verbosity};

fn sample_index() -> Index<MemoryStore> {
    let mut index = Index::new(MemoryStore::new()).unwrap();
    for (term, freq) in [
        ("hello", 1000),
        ("hallo", 300),
        ("hullo", 50),
        ("help", 200),
        ("world", 500),
        ("word", 400),
        ("work", 20),
        ("test", 150),
        ("tests", 75),
    ] {
        index.insert(term.as_bytes(), freq);
    }
    index
}

#[test]
fn p1_exact_match_is_first_and_correct() {
    let index = sample_index();
    for term in ["hello", "world", "test"] {
        let got = index.lookup(term.as_bytes(), Verbosity::Closest, -1);
        assert!(!got.is_empty());
        assert_eq!(got[0].term, term.as_bytes());
        assert_eq!(got[0].distance, 0);
    }
}

#[test]
fn p2_verbosity_monotonicity() {
    let index = sample_index();
    for query in ["helo", "wrd", "tst", "xxxx"] {
        let top = index.lookup(query.as_bytes(), Verbosity::Top, -1);
        let closest = index.lookup(query.as_bytes(), Verbosity::Closest, -1);
        let all = index.lookup(query.as_bytes(), Verbosity::All, -1);
        assert!(top.len() <= closest.len(), "query={query}");
        assert!(closest.len() <= all.len(), "query={query}");
    }
}

#[test]
fn p3_closest_results_share_one_distance() {
    let index = sample_index();
    for query in ["helo", "wrd", "tst"] {
        let got = index.lookup(query.as_bytes(), Verbosity::Closest, -1);
        if let Some(first) = got.first() {
            assert!(got.iter().all(|s| s.distance == first.distance));
        }
    }
}

#[test]
fn p4_top_and_closest_are_sorted() {
    let index = sample_index();
    for query in ["helo", "wrd", "tst"] {
        for verbosity in [Verbosity::Top, Verbosity::Closest] {
            let got = index.lookup(query.as_bytes(), verbosity, -1);
            for w in got.windows(2) {
                assert!(
                    w[0].distance < w[1].distance
                        || (w[0].distance == w[1].distance && w[0].frequency >= w[1].frequency)
                );
            }
        }
    }
}

#[test]
fn p5_bounded_distance() {
    let index = sample_index();
    for max_dist in [0i64, 1, 2] {
        let got = index.lookup(b"helo", Verbosity::All, max_dist);
        let bound = max_dist.clamp(0, index.max_edit_distance() as i64) as u8;
        for s in &got {
            assert!(s.distance <= bound);
        }
    }
}

#[test]
fn p6_no_ghosts_from_pending_buffer() {
    let mut index = Index::new(MemoryStore::new()).unwrap();
    index.set_count_threshold(100);
    // Below threshold: stays pending, must never be posted or returned.
    let promoted = index.insert(b"ghost", 5);
    assert!(!promoted);
    let got = index.lookup(b"ghost", Verbosity::All, 0);
    assert!(got.is_empty());
    let got_fuzzy = index.lookup(b"ghast", Verbosity::All, -1);
    assert!(got_fuzzy.iter().all(|s| s.term != b"ghost"));
}

#[test]
fn p7_frequency_accumulates_with_saturation() {
    let mut index = Index::new(MemoryStore::new()).unwrap();
    assert!(index.insert(b"cat", 10));
    assert!(!index.insert(b"cat", 5));
    let got = index.lookup(b"cat", Verbosity::Closest, -1);
    assert_eq!(got[0].frequency, 15);

    let mut saturating = Index::new(MemoryStore::new()).unwrap();
    saturating.insert(b"dog", i64::MAX - 1);
    saturating.insert(b"dog", 100);
    let got = saturating.lookup(b"dog", Verbosity::Closest, -1);
    assert_eq!(got[0].frequency, i64::MAX);
}

#[test]
fn p8_fingerprint_is_pure() {
    for s in ["", "a", "hello", "the quick brown fox"] {
        assert_eq!(fingerprint(s.as_bytes()), fingerprint(s.as_bytes()));
    }
}

#[test]
fn p9_distance_is_symmetric() {
    let pairs = [
        ("hello", "help"),
        ("kitten", "sitting"),
        ("ab", "ba"),
        ("", "abc"),
        ("symspell", "symspel"),
    ];
    for (a, b) in pairs {
        for k in [0u8, 1, 2, 5] {
            assert_eq!(
                distance(a.as_bytes(), b.as_bytes(), k),
                distance(b.as_bytes(), a.as_bytes(), k)
            );
        }
    }
}

#[test]
fn insert_rejects_nonpositive_count() {
    let mut index = Index::new(MemoryStore::new()).unwrap();
    assert!(!index.insert(b"cat", 0));
    assert!(!index.insert(b"cat", -5));
    assert!(index.lookup(b"cat", Verbosity::All, 0).is_empty());
}

#[test]
fn empty_query_short_circuits() {
    let index = sample_index();
    assert!(index.lookup(b"", Verbosity::All, -1).is_empty());
}

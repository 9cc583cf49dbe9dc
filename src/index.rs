//! The `Index`: owns a `Store`, exposes `insert`/`lookup`, and manages the
//! below-threshold pending buffer.

use std::collections::{HashMap, HashSet};

use tracing::{trace, trace_span, warn};

use crate::config::IndexConfig;
use crate::deletes::deletes_of;
use crate::distance::distance;
use crate::error::Result;
use crate::fingerprint::fingerprint;
use crate::store::Store;
use crate::suggestion::{Suggestion, Verbosity};

/// Literal prefix length used by the subsequence prefilter during lookup.
/// Distinct from the configurable `prefix_length`; see SPEC_FULL.md §9.
const SUBSEQUENCE_PREFILTER_LEN: usize = 7;

fn saturating_add(a: i64, b: i64) -> i64 {
    a.checked_add(b).unwrap_or(i64::MAX)
}

/// Returns true iff every byte of `needle` occurs, in order, somewhere
/// within `haystack` (not necessarily contiguously).
fn is_subsequence(needle: &[u8], haystack: &[u8]) -> bool {
    let mut it = haystack.iter();
    for &n in needle {
        match it.find(|&&h| h == n) {
            Some(_) => continue,
            None => return false,
        }
    }
    true
}

/// Owns a [`Store`] and implements the SymSpell insert/lookup algorithm
/// over it. Generic over the storage backend so the same code runs
/// against [`crate::store::MemoryStore`] or
/// [`crate::store::PersistentStore`].
pub struct Index<S: Store> {
    store: S,
    config: IndexConfig,
    pending: HashMap<Vec<u8>, i64>,
    max_dictionary_word_length: usize,
}

impl<S: Store> Index<S> {
    /// Builds an `Index` over `store` with default configuration (M=2,
    /// P=7, T=1).
    pub fn new(store: S) -> Result<Self> {
        Self::with_config(store, IndexConfig::default())
    }

    /// Builds an `Index` over `store` with an explicit [`IndexConfig`].
    /// Fails if the configuration is structurally invalid.
    pub fn with_config(store: S, config: IndexConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            store,
            config,
            pending: HashMap::new(),
            max_dictionary_word_length: 0,
        })
    }

    pub fn max_edit_distance(&self) -> u8 {
        self.config.max_edit_distance
    }

    pub fn prefix_length(&self) -> usize {
        self.config.prefix_length
    }

    pub fn max_word_length(&self) -> usize {
        self.max_dictionary_word_length
    }

    /// Informs the index of an already-observed maximum term length, e.g.
    /// after reopening a `PersistentStore` (see SPEC_FULL.md §9).
    pub fn set_max_word_length_hint(&mut self, len: usize) {
        self.max_dictionary_word_length = self.max_dictionary_word_length.max(len);
    }

    pub fn set_count_threshold(&mut self, t: i64) {
        self.config.count_threshold = t;
    }

    /// Inserts `key` with `count`. Returns `true` iff this call promoted
    /// `key` into the posted set. Store errors are logged and degrade to
    /// a no-op for the affected write; use [`Index::try_insert`] to
    /// observe them.
    pub fn insert(&mut self, key: &[u8], count: i64) -> bool {
        self.try_insert(key, count).unwrap_or_else(|e| {
            warn!(error = %e, "insert: store operation failed, degrading to no-op");
            false
        })
    }

    /// Fallible variant of [`Index::insert`] that surfaces the underlying
    /// `Store` error instead of swallowing it.
    pub fn try_insert(&mut self, key: &[u8], count: i64) -> Result<bool> {
        if count <= 0 {
            return Ok(false);
        }

        if let Some(pending_count) = self.pending.get(key).copied() {
            let total = saturating_add(pending_count, count);
            if total >= self.config.count_threshold {
                self.pending.remove(key);
                return self.post(key, total);
            }
            self.pending.insert(key.to_vec(), total);
            return Ok(false);
        }

        if let Some(existing) = self.store.get_frequency(key)? {
            let total = saturating_add(existing, count);
            self.store.set_frequency(key, total)?;
            return Ok(false);
        }

        if count < self.config.count_threshold {
            self.pending.insert(key.to_vec(), count);
            return Ok(false);
        }

        self.post(key, count)
    }

    fn post(&mut self, key: &[u8], total: i64) -> Result<bool> {
        self.store.set_frequency(key, total)?;
        if key.len() > self.max_dictionary_word_length {
            self.max_dictionary_word_length = key.len();
        }
        let prefix_len = key.len().min(self.config.prefix_length);
        let prefix = &key[..prefix_len];
        for variant in deletes_of(prefix, self.config.max_edit_distance) {
            // deletes_of decides the empty-string variant from `prefix`'s
            // (possibly truncated) length, not the untruncated key's; when
            // prefix_length == max_edit_distance that can admit an empty
            // posting for a key longer than max_edit_distance, which would
            // violate the "empty string iff |term| <= M" invariant.
            if variant.is_empty() && key.len() > self.config.max_edit_distance as usize {
                continue;
            }
            self.store.add_delete(fingerprint(&variant), key)?;
        }
        trace!(term_len = key.len(), frequency = total, "term promoted");
        Ok(true)
    }

    /// Looks up suggestions for `input`. Never fails: `Store` read errors
    /// are logged and treated as an empty posting for the affected
    /// fingerprint.
    pub fn lookup(&self, input: &[u8], verbosity: Verbosity, max_dist: i64) -> Vec<Suggestion> {
        if input.is_empty() {
            return Vec::new();
        }

        let d = if max_dist < 0 || max_dist > self.config.max_edit_distance as i64 {
            self.config.max_edit_distance
        } else {
            max_dist as u8
        };

        let span = trace_span!("symspell_lookup", input_len = input.len(), ?verbosity);
        let _enter = span.enter();

        let l = input.len();
        if self.max_dictionary_word_length > 0
            && (l as i64 - d as i64) > self.max_dictionary_word_length as i64
        {
            return Vec::new();
        }

        let mut results: Vec<Suggestion> = Vec::new();
        match self.store.get_frequency(input) {
            Ok(Some(f)) => {
                results.push(Suggestion {
                    term: input.to_vec(),
                    distance: 0,
                    frequency: f,
                });
                if verbosity != Verbosity::All {
                    return results;
                }
            }
            Ok(None) => {}
            Err(e) => {
                warn!(error = %e, "lookup: exact-match read failed");
            }
        }

        if d == 0 {
            return results;
        }

        let mut considered_deletes: HashSet<Vec<u8>> = HashSet::new();
        let mut considered_suggestions: HashSet<Vec<u8>> = HashSet::new();
        considered_suggestions.insert(input.to_vec());

        let mut d_prime = d;
        let input_prefix_len = l.min(self.config.prefix_length);
        let mut queue: Vec<Vec<u8>> = vec![input[..input_prefix_len].to_vec()];

        let mut p = 0;
        while p < queue.len() {
            let c = queue[p].clone();
            p += 1;

            let len_diff = input_prefix_len as i64 - c.len() as i64;
            if len_diff > d_prime as i64 {
                if verbosity == Verbosity::All {
                    continue;
                } else {
                    break;
                }
            }

            let postings = match self.store.get_terms(fingerprint(&c)) {
                Ok(terms) => terms,
                Err(e) => {
                    warn!(error = %e, candidate_len = c.len(), "lookup: get_terms failed");
                    Vec::new()
                }
            };

            for s in postings {
                if s == input {
                    continue;
                }
                if (s.len() as i64 - l as i64).abs() > d_prime as i64 {
                    continue;
                }
                if s.len() < c.len() {
                    continue;
                }
                if s.len() == c.len() && s != c {
                    continue;
                }
                let s_prefix_len = s.len().min(self.config.prefix_length);
                if s_prefix_len > input_prefix_len
                    && (s_prefix_len as i64 - c.len() as i64) > d_prime as i64
                {
                    continue;
                }
                let haystack_len = s.len().min(SUBSEQUENCE_PREFILTER_LEN);
                if !is_subsequence(&c, &s[..haystack_len]) {
                    continue;
                }
                if !considered_suggestions.insert(s.clone()) {
                    continue;
                }

                let dist = distance(input, &s, d_prime);
                if dist > d_prime {
                    continue;
                }

                let freq = match self.store.get_frequency(&s) {
                    Ok(f) => f.unwrap_or(0),
                    Err(e) => {
                        warn!(error = %e, "lookup: frequency read failed for candidate");
                        0
                    }
                };
                let suggestion = Suggestion {
                    term: s,
                    distance: dist,
                    frequency: freq,
                };

                match verbosity {
                    Verbosity::Top => {
                        let replace = match results.first() {
                            None => true,
                            Some(best) => {
                                suggestion.distance < best.distance
                                    || (suggestion.distance == best.distance
                                        && suggestion.frequency > best.frequency)
                            }
                        };
                        if replace {
                            results.clear();
                            results.push(suggestion);
                            d_prime = results[0].distance;
                        }
                    }
                    Verbosity::Closest => {
                        if results.is_empty() || suggestion.distance < results[0].distance {
                            results.clear();
                            results.push(suggestion);
                            d_prime = results[0].distance;
                        } else if suggestion.distance == results[0].distance {
                            results.push(suggestion);
                        }
                    }
                    Verbosity::All => {
                        results.push(suggestion);
                    }
                }
            }

            if len_diff < self.config.max_edit_distance as i64 && c.len() <= self.config.prefix_length {
                let skip_expansion = matches!(verbosity, Verbosity::Top | Verbosity::Closest)
                    && len_diff >= d_prime as i64;
                if !skip_expansion {
                    for i in 0..c.len() {
                        let mut variant = c.clone();
                        variant.remove(i);
                        if considered_deletes.insert(variant.clone()) {
                            queue.push(variant);
                        }
                    }
                }
            }
        }

        if verbosity != Verbosity::All {
            results.sort();
            if verbosity == Verbosity::Closest {
                if let Some(best) = results.first().map(|s| s.distance) {
                    results.retain(|s| s.distance == best);
                }
            }
        }

        results
    }
}

//! Trie-shaped `RuleStore` backend.
//!
//! A nested map walk `rules[w0][w1][lat] -> suffix path`. Lookup is
//! exact-prefix, not fuzzy, so a `BTreeMap` gives deterministic iteration
//! order for free (ties among equally long rules break on store order).

use std::collections::{BTreeMap, HashMap};

use super::RuleStore;
use crate::error::DocuScopeError;
use crate::rule::LongRule;

type Suffixes = BTreeMap<String, Vec<Vec<String>>>;

/// A dictionary held entirely in memory: no I/O, no network, one process's
/// heap. Suited to small-to-medium dictionaries; the graph backend exists
/// for dictionaries too large to hold this way.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    /// `w0 -> w1 -> lat -> [suffix paths]`, where a suffix path is
    /// `path[2..]` (possibly empty, for a rule whose path has length 2).
    long: BTreeMap<String, BTreeMap<String, Suffixes>>,
    /// `ds_word -> lat`.
    short: HashMap<String, String>,
}

impl InMemoryStore {
    /// Build the trie from a flat rule list and the short-rule map.
    ///
    /// Rules with `path.len() < 2` are rejected by [`crate::dictionary`]
    /// before reaching here; this constructor trusts its input.
    pub fn new(long_rules: Vec<LongRule>, short_rules: HashMap<String, String>) -> Self {
        let mut long: BTreeMap<String, BTreeMap<String, Suffixes>> = BTreeMap::new();
        for rule in long_rules {
            let w0 = rule.path[0].clone();
            let w1 = rule.path[1].clone();
            let suffix = rule.path[2..].to_vec();
            long.entry(w0).or_default().entry(w1).or_default().entry(rule.lat).or_default().push(suffix);
        }
        InMemoryStore { long, short: short_rules }
    }

    fn candidates_for(&self, w0: &str, w1: &str, word_sets: &[Vec<String>]) -> Vec<LongRule> {
        let mut out = Vec::new();
        let Some(by_w1) = self.long.get(w0) else { return out };
        let Some(by_lat) = by_w1.get(w1) else { return out };
        for (lat, suffixes) in by_lat {
            for suffix in suffixes {
                let mut path = Vec::with_capacity(2 + suffix.len());
                path.push(w0.to_string());
                path.push(w1.to_string());
                path.extend(suffix.iter().cloned());
                if path_matches_lookahead(&path, word_sets) {
                    out.push(LongRule { lat: lat.clone(), path });
                }
            }
        }
        out
    }
}

/// Whether `path[0..k]` is drawn respectively from `word_sets[0..k]`, for
/// `k = min(word_sets.len(), path.len())`. Positions beyond `word_sets` are
/// left for the engine to verify against tokens further ahead than the
/// initial lookahead window.
fn path_matches_lookahead(path: &[String], word_sets: &[Vec<String>]) -> bool {
    let k = word_sets.len().min(path.len());
    for i in 0..k {
        if !word_sets[i].contains(&path[i]) {
            return false;
        }
    }
    true
}

impl RuleStore for InMemoryStore {
    fn lookup_long(&self, word_sets: &[Vec<String>]) -> Result<Vec<LongRule>, DocuScopeError> {
        if word_sets.len() < 2 {
            return Ok(Vec::new());
        }
        let mut out = Vec::new();
        for w0 in &word_sets[0] {
            for w1 in &word_sets[1] {
                for candidate in self.candidates_for(w0, w1, word_sets) {
                    if !out.contains(&candidate) {
                        out.push(candidate);
                    }
                }
            }
        }
        Ok(out)
    }

    fn lookup_short(&self, ds_words: &[String]) -> Result<Option<(String, String)>, DocuScopeError> {
        for word in ds_words {
            if let Some(lat) = self.short.get(word) {
                return Ok(Some((lat.clone(), word.clone())));
            }
        }
        Ok(None)
    }
}

//! Category rollup and pattern counter: a post-processing pass over a
//! completed tagging run, downstream of the core pipeline but useful for
//! summarizing results at the category/cluster level rather than the raw
//! per-token LAT level.
//!
//! A `RollupTable` is a flattened `lat -> {category, subcategory, cluster}`
//! lookup; the full category/subcategory/cluster hierarchy isn't needed by
//! anything downstream of the rollup lookup, only the per-LAT leaf is.
//!
//! The pattern counter accumulates a multiset of tag surface text per
//! cluster, then sorts each cluster's patterns by descending count then
//! ascending text, and sorts clusters by descending total count then
//! ascending name. A cluster named `"Other"` (or whichever name is
//! configured as the catch-all) is dropped rather than reported.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::DocuScopeError;
use crate::rule::TagSpan;

/// Where one terminal LAT rolls up to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RollupEntry {
    pub category: String,
    pub subcategory: String,
    pub cluster: String,
}

/// Terminal LAT name -> category/subcategory/cluster. Entries absent from
/// the table (and entries explicitly mapped to the configured "other"
/// cluster) roll up to `other_cluster` and are dropped by
/// [`count_patterns`].
#[derive(Debug, Clone)]
pub struct RollupTable {
    entries: HashMap<String, RollupEntry>,
    other_cluster: String,
}

impl RollupTable {
    pub fn new(entries: HashMap<String, RollupEntry>) -> Self {
        RollupTable { entries, other_cluster: "Other".to_string() }
    }

    pub fn with_other_cluster(entries: HashMap<String, RollupEntry>, other_cluster: String) -> Self {
        RollupTable { entries, other_cluster }
    }

    pub fn lookup(&self, lat_short_name: &str) -> Option<&RollupEntry> {
        self.entries.get(lat_short_name)
    }

    pub fn from_json(bytes: &[u8]) -> Result<Self, DocuScopeError> {
        let entries: HashMap<String, RollupEntry> = serde_json::from_slice(bytes)
            .map_err(|e| DocuScopeError::DictionaryFormat { reason: format!("invalid rollup table JSON: {e}") })?;
        Ok(RollupTable::new(entries))
    }
}

impl Default for RollupTable {
    fn default() -> Self {
        RollupTable::new(HashMap::new())
    }
}

/// One pattern (a distinct surface string) and how many times it occurred
/// within its cluster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PatternCount {
    pub pattern: String,
    pub count: u64,
}

/// Patterns accumulated for one cluster, already sorted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryPatternData {
    pub cluster: String,
    pub patterns: Vec<PatternCount>,
}

/// Lowercase and collapse runs of whitespace to a single space, so two
/// occurrences of the same phrase with different incidental spacing count
/// as the same pattern.
fn normalize_pattern(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut last_was_space = false;
    for ch in raw.trim().chars() {
        if ch.is_whitespace() {
            if !last_was_space {
                out.push(' ');
            }
            last_was_space = true;
        } else {
            out.extend(ch.to_lowercase());
            last_was_space = false;
        }
    }
    out
}

/// Accumulate and sort pattern counts per cluster, over every non-synthetic
/// span (a span produced by an actual long or short rule match — recognized
/// here by a non-empty `path`, since the engine only ever attaches a path to
/// a real rule hit; `untagged`/`no_rules`/`excluded` spans always carry an
/// empty path).
pub fn count_patterns(spans: &[TagSpan], text: &str, rollup: &RollupTable) -> Vec<CategoryPatternData> {
    let mut by_cluster: HashMap<String, HashMap<String, u64>> = HashMap::new();

    for span in spans {
        if span.path.is_empty() {
            continue;
        }
        let short_name = span.lat_short_name();
        let cluster = match rollup.lookup(short_name) {
            Some(entry) => entry.cluster.clone(),
            None => rollup.other_cluster.clone(),
        };
        if cluster == rollup.other_cluster {
            continue;
        }

        let pattern = normalize_pattern(&text[span.pos_start..span.pos_end]);
        *by_cluster.entry(cluster).or_default().entry(pattern).or_insert(0) += 1;
    }

    let mut clusters: Vec<(String, Vec<PatternCount>, u64)> = by_cluster
        .into_iter()
        .map(|(cluster, counts)| {
            let mut patterns: Vec<PatternCount> =
                counts.into_iter().map(|(pattern, count)| PatternCount { pattern, count }).collect();
            patterns.sort_by(|a, b| a.pattern.cmp(&b.pattern));
            patterns.sort_by(|a, b| b.count.cmp(&a.count));
            let total: u64 = patterns.iter().map(|p| p.count).sum();
            (cluster, patterns, total)
        })
        .collect();

    clusters.sort_by(|a, b| a.0.cmp(&b.0));
    clusters.sort_by(|a, b| b.2.cmp(&a.2));

    clusters.into_iter().map(|(cluster, patterns, _total)| CategoryPatternData { cluster, patterns }).collect()
}

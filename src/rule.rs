//! Rule and tag records.

use serde::Serialize;

/// A long rule: fires when `path.len()` successive included tokens each
/// contain the corresponding ds-word. `path.len() >= 2` always holds for a
/// well-formed long rule (see [`crate::error::DocuScopeError::DictionaryFormat`]).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LongRule {
    pub lat: String,
    pub path: Vec<String>,
}

/// One accepted rule application over a contiguous token range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TagSpan {
    pub index_start: usize,
    pub index_end: usize,
    pub pos_start: usize,
    pub pos_end: usize,
    /// Number of tokens covered (`index_end - index_start + 1`).
    pub len: usize,
    /// Number of *included* (non-excluded-type) tokens covered.
    pub num_included_tokens: usize,
    /// Fully qualified LAT name, e.g. `"label.WE_THE_PEOPLE"`.
    pub lat_full_name: String,
    /// The ds-word path that matched, for provenance. Empty for
    /// untagged/no-rules/excluded synthetic spans.
    pub path: Vec<String>,
}

impl TagSpan {
    /// The terminal LAT name with the `label.` prefix stripped.
    pub fn lat_short_name(&self) -> &str {
        self.lat_full_name.rsplit('.').next().unwrap_or(&self.lat_full_name)
    }
}

/// Per-LAT aggregate statistics accumulated across all tag spans.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RuleStat {
    pub full_name: String,
    pub num_tags: usize,
    pub num_included_tokens: usize,
}

impl RuleStat {
    pub fn new(full_name: String) -> Self {
        RuleStat { full_name, num_tags: 0, num_included_tokens: 0 }
    }

    pub fn record(&mut self, num_included_tokens: usize) {
        self.num_tags += 1;
        self.num_included_tokens += num_included_tokens;
    }
}

//! The `RuleStore` abstraction: one contract, multiple backends.

mod cache;
mod fallback;
mod graph;
mod in_memory;

pub use cache::CachedStore;
pub use fallback::FallbackStore;
pub use graph::{GraphStore, GRAPH_BACKEND_MAX_PATH_LEN};
pub use in_memory::InMemoryStore;

use crate::error::DocuScopeError;
use crate::rule::LongRule;

/// A rule dictionary backend.
///
/// Both `lookup_long` and `lookup_short` are pure queries: implementations
/// must not mutate dictionary contents, only answer against whatever was
/// loaded at construction time. `Send + Sync` so a store can be shared
/// (typically behind an `Arc`) across concurrent tagging sessions.
pub trait RuleStore: Send + Sync {
    /// Candidate long rules whose path begins with a ds-word from
    /// `word_sets[0]`, followed by one from `word_sets[1]`, and so on for as
    /// many leading sets as `word_sets` provides (up to the first four
    /// included tokens from the current cursor position, the engine's
    /// lookahead window). A candidate with a path longer than `word_sets` is
    /// still returned; the engine verifies the remainder against later
    /// tokens itself. Order is not significant — the caller sorts by
    /// descending path length before applying the longest-match rule.
    fn lookup_long(&self, word_sets: &[Vec<String>]) -> Result<Vec<LongRule>, DocuScopeError>;

    /// The short rule for a single token's ds-words, if any. `ds_words` is
    /// searched in order; the first ds-word with a matching short rule wins
    /// (mirrors the overwrite-by-closest-to-original resolution already
    /// applied by [`crate::wordclass::WordclassMap::resolve`] — short rules
    /// only ever see the already-resolved list, so "first" here just means
    /// "only", since `resolve` already picked a winner).
    fn lookup_short(&self, ds_words: &[String]) -> Result<Option<(String, String)>, DocuScopeError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn in_memory_store_implements_rule_store() {
        fn assert_rule_store<T: RuleStore>() {}
        assert_rule_store::<InMemoryStore>();
    }

    #[test]
    fn empty_store_has_no_candidates() {
        let store = InMemoryStore::new(Vec::new(), HashMap::new());
        let hits = store.lookup_long(&[vec!["a".to_string()], vec!["b".to_string()]]).unwrap();
        assert!(hits.is_empty());
        assert!(store.lookup_short(&["a".to_string()]).unwrap().is_none());
    }
}

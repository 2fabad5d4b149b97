//! A `RuleStore` that falls back to a secondary backend on failure: the
//! driver may retry or fall back to a different in-memory backend.

use super::RuleStore;
use crate::error::DocuScopeError;
use crate::rule::LongRule;

/// Tries `primary` first; if it reports [`DocuScopeError::BackendUnavailable`],
/// falls back to `secondary` and logs a warning. Any other error from
/// `primary` is propagated without falling back — only unavailability, not
/// a bad answer, warrants a second opinion.
pub struct FallbackStore<P: RuleStore, S: RuleStore> {
    primary: P,
    secondary: S,
}

impl<P: RuleStore, S: RuleStore> FallbackStore<P, S> {
    pub fn new(primary: P, secondary: S) -> Self {
        FallbackStore { primary, secondary }
    }
}

impl<P: RuleStore, S: RuleStore> RuleStore for FallbackStore<P, S> {
    fn lookup_long(&self, word_sets: &[Vec<String>]) -> Result<Vec<LongRule>, DocuScopeError> {
        match self.primary.lookup_long(word_sets) {
            Ok(hits) => Ok(hits),
            Err(DocuScopeError::BackendUnavailable { reason }) => {
                log::warn!("primary rule store unavailable ({reason}), falling back");
                self.secondary.lookup_long(word_sets)
            }
            Err(other) => Err(other),
        }
    }

    fn lookup_short(&self, ds_words: &[String]) -> Result<Option<(String, String)>, DocuScopeError> {
        match self.primary.lookup_short(ds_words) {
            Ok(hit) => Ok(hit),
            Err(DocuScopeError::BackendUnavailable { reason }) => {
                log::warn!("primary rule store unavailable ({reason}), falling back");
                self.secondary.lookup_short(ds_words)
            }
            Err(other) => Err(other),
        }
    }
}

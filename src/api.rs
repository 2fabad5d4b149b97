//! Public entry point for the tagging pipeline.
//!
//! A small, cheaply constructed session type wired into the engine at call
//! time: a [`WordclassMap`] and a [`RuleStore`] are the two read-only
//! collaborators a tagging run needs, and both must be shareable across many
//! concurrent tagging sessions, so [`Tagger`] borrows them rather than owning
//! or rebuilding them per call.

pub use crate::config::Config;
pub use crate::engine::TagOutcome;
pub use crate::error::DocuScopeError;
pub use crate::formatter::format_html;
pub use crate::rollup::{count_patterns, CategoryPatternData, PatternCount, RollupEntry, RollupTable};
pub use crate::rule::{LongRule, RuleStat, TagSpan};
pub use crate::token::{Token, TokenType, TokenTypeSet};

use crate::engine::Engine;
use crate::store::RuleStore;
use crate::tokenizer::Tokenizer;
use crate::wordclass::WordclassMap;

/// A reusable tagging session: a read-only wordclass map, a read-only rule
/// store, and a config, bound once and reused across many documents.
///
/// Constructing a `Tagger` validates `config.excluded_token_types` eagerly
/// (excluding every `TokenType` is a [`DocuScopeError::Configuration`]
/// error) so that mistake surfaces before any document is tagged rather
/// than on the first call to [`Tagger::tag`].
pub struct Tagger<'a> {
    wordclass: &'a WordclassMap,
    store: &'a dyn RuleStore,
    config: Config,
    tokenizer: Tokenizer,
}

impl<'a> Tagger<'a> {
    pub fn new(wordclass: &'a WordclassMap, store: &'a dyn RuleStore, config: Config) -> Result<Self, DocuScopeError> {
        let tokenizer = Tokenizer::with_excluded_token_types(config.excluded_token_types)?;
        Ok(Tagger { wordclass, store, config, tokenizer })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Tag `text` in one pass, running to completion with no progress
    /// reporting or cancellation support.
    pub fn tag(&self, text: &str) -> Result<TagOutcome, DocuScopeError> {
        let tokens = self.tokenizer.tokenize(text);
        Engine::new(tokens, self.wordclass, self.store, &self.config).tag()
    }

    /// Tag `text`, sampling `on_progress(cursor, total_tokens)` after every
    /// accepted span and checking `is_cancelled` between spans. Returns
    /// `Ok(None)` if cancellation was observed before completion, discarding
    /// all accumulated state rather than returning a partial result or an
    /// error.
    pub fn tag_with_progress(
        &self,
        text: &str,
        on_progress: impl FnMut(usize, usize),
        is_cancelled: impl FnMut() -> bool,
    ) -> Result<Option<TagOutcome>, DocuScopeError> {
        let tokens = self.tokenizer.tokenize(text);
        Engine::new(tokens, self.wordclass, self.store, &self.config).tag_with_progress(on_progress, is_cancelled)
    }

    /// Convenience: tag `text` and render the result as HTML in one call.
    pub fn tag_to_html(&self, text: &str) -> Result<String, DocuScopeError> {
        let outcome = self.tag(text)?;
        Ok(format_html(text, &outcome.spans, &self.config))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rule::LongRule;
    use crate::store::InMemoryStore;
    use std::collections::HashMap;

    #[test]
    fn tagger_rejects_excluding_every_token_type() {
        let wordclass = WordclassMap::new();
        let store = InMemoryStore::new(Vec::new(), HashMap::new());
        let mut config = Config::default();
        config.excluded_token_types = TokenTypeSet::all();

        let err = Tagger::new(&wordclass, &store, config).unwrap_err();
        assert!(matches!(err, DocuScopeError::Configuration { .. }));
    }

    #[test]
    fn end_to_end_tag_and_render() {
        let mut words = HashMap::new();
        words.insert("we".to_string(), vec!["!WE".to_string()]);
        words.insert("the".to_string(), vec!["the".to_string()]);
        words.insert("people".to_string(), vec!["people".to_string()]);
        let wordclass = WordclassMap::from_map(words);

        let long_rules = vec![LongRule {
            lat: "WE_THE_PEOPLE".to_string(),
            path: vec!["!WE".to_string(), "the".to_string(), "people".to_string()],
        }];
        let store = InMemoryStore::new(long_rules, HashMap::new());
        let config = Config::default();
        let tagger = Tagger::new(&wordclass, &store, config).unwrap();

        let text = "We the people";
        let outcome = tagger.tag(text).unwrap();
        assert_eq!(outcome.spans.len(), 1);
        assert_eq!(outcome.stats.get("label.WE_THE_PEOPLE").unwrap().num_tags, 1);

        let html = tagger.tag_to_html(text).unwrap();
        assert_eq!(html, r#"<span data-key="label.WE_THE_PEOPLE">We the people</span>"#);
    }

    #[test]
    fn reused_across_multiple_documents() {
        let wordclass = WordclassMap::new();
        let store = InMemoryStore::new(Vec::new(), HashMap::new());
        let tagger = Tagger::new(&wordclass, &store, Config::default()).unwrap();

        let a = tagger.tag("first document").unwrap();
        let b = tagger.tag("second document, different shape").unwrap();
        assert_ne!(a.tokens.len(), b.tokens.len());
    }
}

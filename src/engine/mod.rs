//! The longest-match rule engine.
//!
//! Walks a token stream and emits a stream of [`TagSpan`]s that cover every
//! token exactly once (or, in overlapping mode, that may re-start inside a
//! prior span). At each cursor position the engine tries a long rule first,
//! then falls back to a short rule, then to one of three synthetic
//! fallback names (`excluded` / `no_rules` / `untagged`).
//!
//! Static structure (the wordclass map and rule store) is separated from
//! per-run mutable cursor state: the engine advances its cursor exactly once
//! per accepted span and never revisits a consumed token except in
//! overlapping-tags mode.

use std::collections::HashMap;

use crate::config::Config;
use crate::error::DocuScopeError;
use crate::rule::{LongRule, RuleStat, TagSpan};
use crate::store::RuleStore;
use crate::token::Token;
use crate::wordclass::WordclassMap;

/// How many included tokens' ds-word sets to hand a `RuleStore::lookup_long`
/// call at once. Rules longer than this are still found and verified by
/// [`Engine::applies_at`], which walks as far as the path requires
/// regardless of this window's width.
const LOOKAHEAD_WINDOW: usize = 4;

/// The final product of a completed tagging run.
#[derive(Debug, Clone)]
pub struct TagOutcome {
    pub spans: Vec<TagSpan>,
    pub stats: HashMap<String, RuleStat>,
    pub tokens: Vec<Token>,
}

/// Per-document tagging state. Not `Clone`: a tagging run consumes its token
/// stream and accumulates spans/stats that belong to exactly one document, so
/// sharing instances across documents would violate the engine's
/// single-threaded, non-shared cursor state.
pub struct Engine<'a> {
    tokens: Vec<Token>,
    wordclass: &'a WordclassMap,
    store: &'a dyn RuleStore,
    config: &'a Config,
    cursor: usize,
    spans: Vec<TagSpan>,
    stats: HashMap<String, RuleStat>,
}

impl<'a> Engine<'a> {
    pub fn new(tokens: Vec<Token>, wordclass: &'a WordclassMap, store: &'a dyn RuleStore, config: &'a Config) -> Self {
        Engine { tokens, wordclass, store, config, cursor: 0, spans: Vec::new(), stats: HashMap::new() }
    }

    /// The current cursor position, for progress reporting.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn total_tokens(&self) -> usize {
        self.tokens.len()
    }

    /// The smallest index `k > j` with an included token type, or `None` if
    /// no such token exists.
    fn next_included(&self, j: usize) -> Option<usize> {
        let mut k = j + 1;
        while k < self.tokens.len() {
            if !self.config.excluded_token_types.contains_type(self.tokens[k].ty) {
                return Some(k);
            }
            k += 1;
        }
        None
    }

    fn is_excluded(&self, i: usize) -> bool {
        self.config.excluded_token_types.contains_type(self.tokens[i].ty)
    }

    /// Whether `path` applies starting at token `i`: `path[0]` must already
    /// be known to match (callers only reach this after a store hit), but is
    /// reverified here along with every subsequent element, since the store
    /// is only required to honor as much of `word_sets` as it was given
    /// (up to [`LOOKAHEAD_WINDOW`] sets) — this is the one place that
    /// enforces "no partial match ever accepted" for paths longer than that
    /// window. Returns the ending token index on success.
    fn applies_at(&self, i: usize, path: &[String]) -> Option<usize> {
        let mut positions = Vec::with_capacity(path.len());
        positions.push(i);
        for _ in 1..path.len() {
            let next = self.next_included(*positions.last().unwrap())?;
            positions.push(next);
        }
        for (k, &pos) in positions.iter().enumerate() {
            let ds_words = self.wordclass.resolve(&self.tokens[pos]);
            if !ds_words.contains(&path[k]) {
                return None;
            }
        }
        positions.last().copied()
    }

    /// Collect the ds-word sets for up to [`LOOKAHEAD_WINDOW`] successive
    /// included tokens starting at `i`.
    fn lookahead_word_sets(&self, i: usize) -> Vec<Vec<String>> {
        let mut sets = Vec::with_capacity(LOOKAHEAD_WINDOW);
        sets.push(self.wordclass.resolve(&self.tokens[i]));
        let mut cursor = i;
        while sets.len() < LOOKAHEAD_WINDOW {
            match self.next_included(cursor) {
                Some(pos) => {
                    sets.push(self.wordclass.resolve(&self.tokens[pos]));
                    cursor = pos;
                }
                None => break,
            }
        }
        sets
    }

    /// Attempt a long rule at `i`. Returns the winning rule and the index of
    /// its last matched token.
    fn long_rule_attempt(&self, i: usize) -> Result<Option<(LongRule, usize)>, DocuScopeError> {
        if self.is_excluded(i) {
            return Ok(None);
        }
        if self.next_included(i).is_none() {
            return Ok(None);
        }

        let word_sets = self.lookahead_word_sets(i);
        if word_sets.len() < 2 {
            return Ok(None);
        }

        let mut candidates = self.store.lookup_long(&word_sets)?;
        candidates.sort_by(|a, b| b.path.len().cmp(&a.path.len()));

        for candidate in candidates {
            if let Some(end_idx) = self.applies_at(i, &candidate.path) {
                return Ok(Some((candidate, end_idx)));
            }
        }
        Ok(None)
    }

    /// Excluded / short-rule / no-rules / untagged fallback. Always
    /// produces a name — this chain cannot return "nothing" short of
    /// a bug, which would surface as [`DocuScopeError::Internal`] from
    /// [`Engine::step`].
    fn short_rule_or_fallback(&self, i: usize) -> Result<(String, Vec<String>), DocuScopeError> {
        if self.is_excluded(i) {
            return Ok((self.config.excluded_rule_name().to_string(), Vec::new()));
        }

        let ds_words = self.wordclass.resolve(&self.tokens[i]);
        if let Some((lat, matching_word)) = self.store.lookup_short(&ds_words)? {
            return Ok((self.config.full_name(&lat), vec![matching_word]));
        }
        if !ds_words.is_empty() {
            return Ok((self.config.no_rules_rule_name().to_string(), Vec::new()));
        }
        Ok((self.config.untagged_rule_name().to_string(), Vec::new()))
    }

    /// Advance the engine by exactly one accepted span. Returns the new
    /// cursor position, or `None` once every token has been covered.
    pub fn step(&mut self) -> Result<Option<usize>, DocuScopeError> {
        if self.cursor >= self.tokens.len() {
            return Ok(None);
        }
        let i = self.cursor;

        // `short_rule_or_fallback` always terminates with a name (short hit,
        // `no_rules`, or `untagged`) and `long_rule_attempt` only returns
        // `Some` for a verified match, so this match is exhaustive in
        // practice; there is no third "no rule at all" case to surface as
        // `DocuScopeError::Internal` short of a bug in one of those two
        // helpers. The debug assertion below backs that up.
        let (lat_name, path, index_end) = match self.long_rule_attempt(i)? {
            Some((rule, index_end)) => (self.config.full_name(&rule.lat), rule.path, index_end),
            None => {
                let (name, path) = self.short_rule_or_fallback(i)?;
                (name, path, i)
            }
        };
        debug_assert!(
            !lat_name.is_empty(),
            "cannot tag token at index {i}: fallback chain produced an empty rule name"
        );

        let num_included_tokens = if path.len() >= 2 { path.len() } else { 1 };
        let pos_start = self.tokens[i].position;
        let pos_end = self.tokens[index_end].end();

        let span = TagSpan {
            index_start: i,
            index_end,
            pos_start,
            pos_end,
            len: index_end - i + 1,
            num_included_tokens,
            lat_full_name: lat_name.clone(),
            path,
        };
        self.spans.push(span);

        self.stats
            .entry(lat_name.clone())
            .or_insert_with(|| RuleStat::new(lat_name))
            .record(num_included_tokens);

        self.cursor = if self.config.allow_overlapping_tags { i + 1 } else { index_end + 1 };
        Ok(Some(self.cursor))
    }

    fn into_outcome(self) -> TagOutcome {
        let config = self.config;
        let stats = self.stats.into_iter().filter(|(name, _)| config.should_return_rule(name)).collect();
        TagOutcome { spans: self.spans, stats, tokens: self.tokens }
    }

    /// Run to completion, ignoring progress and cancellation.
    pub fn tag(mut self) -> Result<TagOutcome, DocuScopeError> {
        while self.step()?.is_some() {}
        Ok(self.into_outcome())
    }

    /// Run to completion, sampling progress after each accepted span and
    /// checking `is_cancelled` between spans. Returns `Ok(None)` on
    /// cancellation rather than an error: all accumulated spans and stats
    /// are discarded, never returned partially.
    pub fn tag_with_progress(
        mut self,
        mut on_progress: impl FnMut(usize, usize),
        mut is_cancelled: impl FnMut() -> bool,
    ) -> Result<Option<TagOutcome>, DocuScopeError> {
        let total = self.total_tokens();
        loop {
            if is_cancelled() {
                return Ok(None);
            }
            match self.step()? {
                Some(cursor) => on_progress(cursor, total),
                None => break,
            }
        }
        Ok(Some(self.into_outcome()))
    }
}

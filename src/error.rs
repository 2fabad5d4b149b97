//! Crate error type.

use thiserror::Error;

/// Errors the tagging pipeline can return.
///
/// The tokenizer and formatter are infallible (they never produce this type);
/// only construction-time configuration, dictionary loading, and backend
/// lookups can fail.
#[derive(Debug, Error)]
pub enum DocuScopeError {
    /// Raised eagerly at construction, e.g. excluding all four token types,
    /// or configuring neither an in-memory nor a graph rule store.
    #[error("configuration error: {reason}")]
    Configuration { reason: String },

    /// A dictionary file was structurally invalid: a required field had the
    /// wrong shape, or a rule path had length < 2. Missing top-level keys are
    /// *not* an error (they are treated as empty).
    #[error("dictionary format error: {reason}")]
    DictionaryFormat { reason: String },

    /// The rule store backend could not answer a lookup (I/O failure,
    /// timeout, or similar). The driver may retry or fall back to another
    /// `RuleStore`.
    #[error("rule store backend unavailable: {reason}")]
    BackendUnavailable { reason: String },

    /// An internal invariant was violated: the fallback chain in the rule
    /// engine produced no rule at all for some token. This should be
    /// unreachable — `untagged`/`no_rules`/`excluded` always terminate the
    /// chain — and indicates a bug rather than bad input.
    #[error("cannot tag token at index {index}: {reason}")]
    Internal { index: usize, reason: String },
}

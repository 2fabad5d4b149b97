//! Regex-driven tokenizer.
//!
//! A single left-to-right scan with priority-ordered classifiers: newline
//! runs, then whitespace runs, then word runs, then punctuation runs. Runs of
//! the same excludable type collapse into a single token.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::DocuScopeError;
use crate::token::{Token, TokenType, TokenTypeSet};

/// `\n(\s*\n)*` — a newline, optionally followed by more whitespace-or-newline
/// runs that themselves end in a newline. Collapses "\n\n\n" and "\n  \n"
/// alike into one NEWLINE token.
static NEWLINE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\n(?:[^\S\n]*\n)*").unwrap());

/// A run of whitespace that contains no newline.
static WHITESPACE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[^\S\n]+").unwrap());

/// A word: a leading alphanumeric char, then any run of alphanumerics or
/// intra-word `'`/`-` that does not trail at the end (trailing apostrophes or
/// hyphens are backed off into the next punctuation token).
static WORD_RUN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[\p{L}\p{N}](?:[\p{L}\p{N}]|['\-](?=[\p{L}\p{N}]))*").unwrap());

/// One or more punctuation characters (anything not whitespace/newline/word).
static PUNCTUATION_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[^\s\p{L}\p{N}]+").unwrap());

/// Tokenizes UTF-8 text into a finite sequence of [`Token`]s.
///
/// A `Tokenizer` is immutable configuration; it carries the excluded-token
/// set forward so downstream consumers (the rule engine) don't need to be
/// told it again.
#[derive(Debug, Clone)]
pub struct Tokenizer {
    excluded_token_types: TokenTypeSet,
}

impl Tokenizer {
    /// Construct a tokenizer with the default excluded set
    /// (`{WHITESPACE, NEWLINE}`).
    pub fn new() -> Self {
        Tokenizer { excluded_token_types: TokenTypeSet::default_excluded() }
    }

    /// Construct a tokenizer with a custom excluded-token-type set.
    ///
    /// Errors if `excluded_token_types` covers all four `TokenType` variants
    /// — excluding everything leaves the rule engine nothing to tag.
    pub fn with_excluded_token_types(excluded_token_types: TokenTypeSet) -> Result<Self, DocuScopeError> {
        if excluded_token_types == TokenTypeSet::all() {
            return Err(DocuScopeError::Configuration {
                reason: "attempted to exclude all possible token types".to_string(),
            });
        }
        Ok(Tokenizer { excluded_token_types })
    }

    pub fn excluded_token_types(&self) -> TokenTypeSet {
        self.excluded_token_types
    }

    /// Tokenize `text` into a sequence of tokens. Empty input yields zero
    /// tokens. Concatenating every token's original substring, in order,
    /// reproduces `text` byte-for-byte.
    pub fn tokenize(&self, text: &str) -> Vec<Token> {
        let mut tokens = Vec::new();
        let mut pos = 0usize;

        while pos < text.len() {
            let rest = &text[pos..];

            let (matched, ty) = if let Some(m) = NEWLINE_RUN.find(rest) {
                (m.as_str(), TokenType::Newline)
            } else if let Some(m) = WHITESPACE_RUN.find(rest) {
                (m.as_str(), TokenType::Whitespace)
            } else if let Some(m) = WORD_RUN.find(rest) {
                (m.as_str(), TokenType::Word)
            } else if let Some(m) = PUNCTUATION_RUN.find(rest) {
                (m.as_str(), TokenType::Punctuation)
            } else {
                // A lone combining/unclassifiable char; consume one char as
                // punctuation rather than looping forever.
                let ch_len = rest.chars().next().map(char::len_utf8).unwrap_or(1);
                (&rest[..ch_len], TokenType::Punctuation)
            };

            let len = matched.len();
            let normalized = match ty {
                TokenType::Word => matched.to_lowercase(),
                _ => matched.to_string(),
            };
            tokens.push(Token::new(normalized, matched.to_string(), pos, len, ty));
            pos += len;
        }

        tokens
    }
}

impl Default for Tokenizer {
    fn default() -> Self {
        Tokenizer::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reconstruct(tokens: &[Token], text: &str) -> String {
        let mut out = String::new();
        for t in tokens {
            out.push_str(&text[t.position..t.position + t.length]);
        }
        out
    }

    #[test]
    fn empty_input_yields_no_tokens() {
        let tz = Tokenizer::new();
        assert!(tz.tokenize("").is_empty());
    }

    #[test]
    fn byte_roundtrip_holds() {
        let tz = Tokenizer::new();
        for text in ["We the people", "Hello, world!\n\n", "  leading  spaces\tand\ttabs", "don't stop-go"] {
            let tokens = tz.tokenize(text);
            assert_eq!(reconstruct(&tokens, text), text);
        }
    }

    #[test]
    fn collapses_whitespace_and_newline_runs() {
        let tz = Tokenizer::new();
        let tokens = tz.tokenize("a   \n\n\n b");
        let types: Vec<TokenType> = tokens.iter().map(|t| t.ty).collect();
        assert_eq!(types, vec![TokenType::Word, TokenType::Whitespace, TokenType::Newline, TokenType::Word]);
    }

    #[test]
    fn word_run_includes_intraword_punctuation() {
        let tz = Tokenizer::new();
        let tokens = tz.tokenize("don't");
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].ty, TokenType::Word);
        assert_eq!(tokens[0].original(), "don't");
        assert_eq!(tokens[0].normalized(), "don't");
    }

    #[test]
    fn trailing_apostrophe_is_not_part_of_word() {
        let tz = Tokenizer::new();
        let tokens = tz.tokenize("dogs'");
        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens[0].ty, TokenType::Word);
        assert_eq!(tokens[0].original(), "dogs");
        assert_eq!(tokens[1].ty, TokenType::Punctuation);
        assert_eq!(tokens[1].original(), "'");
    }

    #[test]
    fn punctuation_run_collapses() {
        let tz = Tokenizer::new();
        let tokens = tz.tokenize("wait...!?");
        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens[1].ty, TokenType::Punctuation);
        assert_eq!(tokens[1].original(), "...!?");
    }

    #[test]
    fn word_is_lowercased_but_original_preserved() {
        let tz = Tokenizer::new();
        let tokens = tz.tokenize("HELLO");
        assert_eq!(tokens[0].normalized(), "hello");
        assert_eq!(tokens[0].original(), "HELLO");
    }

    #[test]
    fn excluding_all_types_is_an_error() {
        let all = TokenTypeSet::all();
        assert!(Tokenizer::with_excluded_token_types(all).is_err());
    }

    #[test]
    fn excluding_fewer_than_all_is_ok() {
        let set = TokenTypeSet::WHITESPACE | TokenTypeSet::NEWLINE | TokenTypeSet::PUNCTUATION;
        assert!(Tokenizer::with_excluded_token_types(set).is_ok());
    }
}

//! Tokens produced by the tokenizer (see [`crate::tokenizer`]).

use bitflags::bitflags;

/// The four token classes the tokenizer can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenType {
    Word,
    Punctuation,
    Whitespace,
    Newline,
}

bitflags! {
    /// A set of [`TokenType`]s, used to configure which types the engine
    /// should skip when walking the token stream.
    ///
    /// A small fixed enum turned into bitflags instead of a
    /// `HashSet<TokenType>`.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct TokenTypeSet: u8 {
        const WORD        = 1 << 0;
        const PUNCTUATION = 1 << 1;
        const WHITESPACE  = 1 << 2;
        const NEWLINE     = 1 << 3;
    }
}

impl TokenTypeSet {
    /// The default excluded-token-type set: whitespace and newlines.
    pub fn default_excluded() -> Self {
        TokenTypeSet::WHITESPACE | TokenTypeSet::NEWLINE
    }

    pub fn contains_type(&self, ty: TokenType) -> bool {
        self.contains(TokenTypeSet::from_type(ty))
    }

    pub fn from_type(ty: TokenType) -> Self {
        match ty {
            TokenType::Word => TokenTypeSet::WORD,
            TokenType::Punctuation => TokenTypeSet::PUNCTUATION,
            TokenType::Whitespace => TokenTypeSet::WHITESPACE,
            TokenType::Newline => TokenTypeSet::NEWLINE,
        }
    }
}

/// One token produced by the tokenizer.
///
/// `strings[0]` is the normalised (lowercased) form; `strings[len - 1]` is
/// the original substring. Intermediate positions are reserved for future
/// transforms and are unused today, so `strings` always has length 2.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub strings: Vec<String>,
    pub position: usize,
    pub length: usize,
    pub ty: TokenType,
}

impl Token {
    pub fn new(normalized: String, original: String, position: usize, length: usize, ty: TokenType) -> Self {
        Token { strings: vec![normalized, original], position, length, ty }
    }

    /// The normalised (lowercased) form, used for dictionary lookups.
    pub fn normalized(&self) -> &str {
        self.strings.first().map(String::as_str).unwrap_or("")
    }

    /// The original substring as it appeared in the source text.
    pub fn original(&self) -> &str {
        self.strings.last().map(String::as_str).unwrap_or("")
    }

    pub fn end(&self) -> usize {
        self.position + self.length
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_excluded_is_whitespace_and_newline() {
        let set = TokenTypeSet::default_excluded();
        assert!(set.contains_type(TokenType::Whitespace));
        assert!(set.contains_type(TokenType::Newline));
        assert!(!set.contains_type(TokenType::Word));
        assert!(!set.contains_type(TokenType::Punctuation));
    }

    #[test]
    fn token_accessors() {
        let t = Token::new("hello".into(), "Hello".into(), 3, 5, TokenType::Word);
        assert_eq!(t.normalized(), "hello");
        assert_eq!(t.original(), "Hello");
        assert_eq!(t.end(), 8);
    }
}

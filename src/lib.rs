//! `docuscope_tagger`: a longest-match rhetorical-style tagger for English
//! prose.
//!
//! A document is tokenized, every token's surface string is resolved against
//! a dictionary into zero or more "ds-words", and a longest-match rule
//! engine walks the token stream looking for multi-word ("long") rules first,
//! falling back to single-word ("short") rules, and finally to one of three
//! synthetic names for tokens no rule covers. The result is a flat,
//! non-overlapping sequence of tagged spans that can be rendered as HTML or
//! rolled up into per-category pattern counts.
//!
//! ```text
//! text --[Tokenizer]--> tokens --[WordclassMap + RuleStore]--> Engine --> TagOutcome
//! ```
//!
//! The [`api`] module's [`Tagger`] ties these pieces together into the
//! crate's primary entry point.

pub mod config;
pub mod dictionary;
pub mod engine;
pub mod error;
pub mod formatter;
pub mod rollup;
pub mod rule;
pub mod store;
pub mod token;
pub mod tokenizer;
pub mod wordclass;

mod api;

pub use api::Tagger;
pub use config::Config;
pub use dictionary::Dictionary;
pub use engine::{Engine, TagOutcome};
pub use error::DocuScopeError;
pub use formatter::format_html;
pub use rollup::{count_patterns, CategoryPatternData, PatternCount, RollupEntry, RollupTable};
pub use rule::{LongRule, RuleStat, TagSpan};
pub use store::{CachedStore, FallbackStore, GraphStore, InMemoryStore, RuleStore, GRAPH_BACKEND_MAX_PATH_LEN};
pub use token::{Token, TokenType, TokenTypeSet};
pub use tokenizer::Tokenizer;
pub use wordclass::WordclassMap;

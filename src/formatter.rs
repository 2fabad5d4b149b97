//! Streaming HTML formatter.
//!
//! Renders `(text, spans)` into one HTML string: each non-synthetic
//! [`TagSpan`] becomes a `<span data-key="LAT">...</span>` wrapping the
//! original substring it covers (including any excluded whitespace/newline
//! tokens interleaved inside it, passed through verbatim); synthetic
//! (`untagged` / `no_rules` / `excluded`) spans are emitted unwrapped.
//! `data-key` carries the full dotted name; the shortened terminal name
//! (strip everything before the last `.`) is reserved for the pattern
//! counter, via [`crate::rule::TagSpan::lat_short_name`].
//!
//! Each span is rendered by slicing `text[pos_start..pos_end]` directly
//! rather than re-joining token substrings: that range is always exactly the
//! span's covered tokens (and any intervening excluded tokens) back-to-back,
//! so slicing is both simpler and allocation-free relative to a
//! token-by-token rebuild. This keeps output proportional to input size with
//! no lookback beyond the current span.

use crate::config::Config;
use crate::rule::TagSpan;

/// Render the tagged document as a single HTML string.
pub fn format_html(text: &str, spans: &[TagSpan], config: &Config) -> String {
    let mut out = String::with_capacity(text.len() + spans.len() * 24);
    for span in spans {
        let body = &text[span.pos_start..span.pos_end];
        if is_synthetic(span, config) {
            escape_html_into(body, &mut out);
        } else {
            out.push_str("<span data-key=\"");
            escape_attr_into(&span.lat_full_name, &mut out);
            out.push_str("\">");
            escape_html_into(body, &mut out);
            out.push_str("</span>");
        }
    }
    out
}

fn is_synthetic(span: &TagSpan, config: &Config) -> bool {
    span.lat_full_name == config.untagged_rule_name()
        || span.lat_full_name == config.no_rules_rule_name()
        || span.lat_full_name == config.excluded_rule_name()
}

/// Escape the five HTML-significant characters in text content.
fn escape_html_into(s: &str, out: &mut String) {
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
}

/// Escape for use inside a double-quoted attribute value; LAT names don't
/// contain `<`/`>` in practice, but the full set is escaped for safety since
/// this attribute is caller-controlled (the `label` config knob).
fn escape_attr_into(s: &str, out: &mut String) {
    escape_html_into(s, out);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::Engine;
    use crate::rule::LongRule;
    use crate::store::InMemoryStore;
    use crate::tokenizer::Tokenizer;
    use crate::wordclass::WordclassMap;
    use std::collections::HashMap;

    fn tag(text: &str, wordclass: &WordclassMap, store: &InMemoryStore, config: &Config) -> Vec<TagSpan> {
        let tokens = Tokenizer::new().tokenize(text);
        Engine::new(tokens, wordclass, store, config).tag().unwrap().spans
    }

    #[test]
    fn wraps_matched_span_in_data_key_span() {
        let mut words = HashMap::new();
        words.insert("hello".to_string(), vec!["hello".to_string()]);
        let wordclass = WordclassMap::from_map(words);
        let mut short = HashMap::new();
        short.insert("hello".to_string(), "GREETING".to_string());
        let store = InMemoryStore::new(Vec::new(), short);
        let config = Config::default();

        let text = "Hello.";
        let spans = tag(text, &wordclass, &store, &config);
        let html = format_html(text, &spans, &config);

        assert_eq!(html, r#"<span data-key="label.GREETING">Hello</span>."#);
    }

    #[test]
    fn untagged_span_is_not_wrapped() {
        let wordclass = WordclassMap::new();
        let store = InMemoryStore::new(Vec::new(), HashMap::new());
        let config = Config::default();

        let text = "Frobnicate";
        let spans = tag(text, &wordclass, &store, &config);
        let html = format_html(text, &spans, &config);

        assert_eq!(html, "Frobnicate");
    }

    #[test]
    fn escapes_html_significant_characters() {
        let wordclass = WordclassMap::new();
        let store = InMemoryStore::new(Vec::new(), HashMap::new());
        let config = Config::default();

        let text = "<b> & 'quote' \"double\"";
        let spans = tag(text, &wordclass, &store, &config);
        let html = format_html(text, &spans, &config);

        assert!(html.contains("&lt;b&gt;"));
        assert!(html.contains("&amp;"));
        assert!(html.contains("&#39;quote&#39;"));
        assert!(html.contains("&quot;double&quot;"));
    }

    #[test]
    fn whitespace_and_newlines_pass_through_verbatim() {
        let wordclass = WordclassMap::new();
        let store = InMemoryStore::new(Vec::new(), HashMap::new());
        let config = Config::default();

        let text = "a  \n  b";
        let spans = tag(text, &wordclass, &store, &config);
        let html = format_html(text, &spans, &config);

        assert_eq!(html, text);
    }

    #[test]
    fn long_match_wraps_whole_span_including_interior_excluded_tokens() {
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

        let text = "We the people";
        let spans = tag(text, &wordclass, &store, &config);
        let html = format_html(text, &spans, &config);

        assert_eq!(html, r#"<span data-key="label.WE_THE_PEOPLE">We the people</span>"#);
    }
}

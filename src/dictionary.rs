//! On-disk dictionary format: `{words, rules, shortRules}` JSON, optionally
//! gzip-compressed.
//!
//! `rules` is a trie keyed by the first two ds-words of the path:
//! `w0 -> w1 -> lat -> [suffix paths]`.

use std::collections::HashMap;
use std::io::Read;

use flate2::read::GzDecoder;
use serde::Deserialize;

use crate::error::DocuScopeError;
use crate::rule::LongRule;
use crate::wordclass::WordclassMap;

/// `lat -> [suffix paths]`, where a suffix path is `path[2..]` (possibly
/// empty, for a rule whose path has length exactly 2).
type LatSuffixes = HashMap<String, Vec<Vec<String>>>;

/// The raw on-disk shape. Every field is optional: a missing top-level key is
/// treated as empty — *not* a [`DocuScopeError::DictionaryFormat`].
#[derive(Debug, Deserialize, Default)]
struct DictionaryFile {
    #[serde(default)]
    words: HashMap<String, Vec<String>>,
    #[serde(default)]
    rules: HashMap<String, HashMap<String, LatSuffixes>>,
    #[serde(default, rename = "shortRules")]
    short_rules: HashMap<String, String>,
}

/// A dictionary parsed from its on-disk representation, split into the three
/// pieces the pipeline's collaborators need: the wordclass map, a flat list
/// of long rules (a `RuleStore` builds its own index from these), and the
/// short-rule map.
pub struct Dictionary {
    pub words: WordclassMap,
    pub long_rules: Vec<LongRule>,
    pub short_rules: HashMap<String, String>,
}

impl Dictionary {
    /// Parse `bytes` as dictionary JSON. `gzip` selects whether `bytes` is
    /// first gunzipped; both forms use the identical JSON shape underneath.
    pub fn from_bytes(bytes: &[u8], gzip: bool) -> Result<Self, DocuScopeError> {
        let json_bytes: Vec<u8>;
        let json_slice = if gzip {
            let mut decoder = GzDecoder::new(bytes);
            let mut out = Vec::new();
            decoder
                .read_to_end(&mut out)
                .map_err(|e| DocuScopeError::DictionaryFormat { reason: format!("gzip decode failed: {e}") })?;
            json_bytes = out;
            json_bytes.as_slice()
        } else {
            bytes
        };

        let raw: DictionaryFile = serde_json::from_slice(json_slice)
            .map_err(|e| DocuScopeError::DictionaryFormat { reason: format!("invalid dictionary JSON: {e}") })?;
        log::debug!(
            "parsed dictionary: {} words, {} short rules",
            raw.words.len(),
            raw.short_rules.len()
        );

        let mut long_rules = Vec::new();
        for (w0, by_w1) in raw.rules {
            for (w1, by_lat) in by_w1 {
                for (lat, suffixes) in by_lat {
                    for suffix in suffixes {
                        let mut path = Vec::with_capacity(2 + suffix.len());
                        path.push(w0.clone());
                        path.push(w1.clone());
                        path.extend(suffix);
                        if path.len() < 2 {
                            return Err(DocuScopeError::DictionaryFormat {
                                reason: format!("rule {lat:?} has path length {} (< 2)", path.len()),
                            });
                        }
                        long_rules.push(LongRule { lat: lat.clone(), path });
                    }
                }
            }
        }

        Ok(Dictionary { words: WordclassMap::from_map(raw.words), long_rules, short_rules: raw.short_rules })
    }
}

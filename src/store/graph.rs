//! In-process DAG `RuleStore` backend.
//!
//! Represents the rule dictionary as a `Start -NEXT-> ... -NEXT-> Lat` graph:
//! a path of ds-words ending in one or more terminal LAT names, walked
//! depth-first and pruned against the supplied lookahead word sets as it
//! goes. The `RuleStore` trait is the seam a network-backed graph-database
//! client would occupy instead of this in-process adjacency map.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use super::RuleStore;
use crate::error::DocuScopeError;
use crate::rule::LongRule;

/// The deepest rule path this backend will traverse.
pub const GRAPH_BACKEND_MAX_PATH_LEN: usize = 25;

#[derive(Debug, Clone, Default)]
struct GraphNode {
    next: BTreeMap<String, GraphNode>,
    lats: BTreeSet<String>,
}

/// An in-process DAG: `Start` is the implicit root, `NEXT` edges are the
/// `next` map on each node, and `LAT` edges are represented by a node's
/// `lats` set (a node reachable by a given path may terminate more than one
/// rule, since distinct LATs can share a path in principle).
#[derive(Debug, Clone, Default)]
pub struct GraphStore {
    root: GraphNode,
    short: HashMap<String, String>,
}

impl GraphStore {
    pub fn new(long_rules: Vec<LongRule>, short_rules: HashMap<String, String>) -> Self {
        let mut root = GraphNode::default();
        for rule in long_rules {
            let mut node = &mut root;
            for word in &rule.path {
                node = node.next.entry(word.clone()).or_default();
            }
            node.lats.insert(rule.lat);
        }
        GraphStore { root, short: short_rules }
    }

    fn walk(&self, node: &GraphNode, depth: usize, path: &mut Vec<String>, word_sets: &[Vec<String>], out: &mut Vec<LongRule>) {
        if path.len() >= 2 {
            for lat in &node.lats {
                out.push(LongRule { lat: lat.clone(), path: path.clone() });
            }
        }
        if depth >= GRAPH_BACKEND_MAX_PATH_LEN {
            return;
        }
        for (word, child) in &node.next {
            if depth < word_sets.len() && !word_sets[depth].contains(word) {
                continue;
            }
            path.push(word.clone());
            self.walk(child, depth + 1, path, word_sets, out);
            path.pop();
        }
    }
}

impl RuleStore for GraphStore {
    fn lookup_long(&self, word_sets: &[Vec<String>]) -> Result<Vec<LongRule>, DocuScopeError> {
        if word_sets.len() < 2 {
            return Ok(Vec::new());
        }
        let mut out = Vec::new();
        let mut path = Vec::new();
        self.walk(&self.root, 0, &mut path, word_sets, &mut out);
        Ok(out)
    }

    fn lookup_short(&self, ds_words: &[String]) -> Result<Option<(String, String)>, DocuScopeError> {
        for word in ds_words {
            if let Some(lat) = self.short.get(word) {
                return Ok(Some((lat.clone(), word.clone())));
            }
        }
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ws(words: &[&str]) -> Vec<String> {
        words.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn finds_rule_longer_than_lookahead_window() {
        let rules = vec![LongRule {
            lat: "LONG_CHAIN".to_string(),
            path: vec!["a", "b", "c", "d", "e"].into_iter().map(String::from).collect(),
        }];
        let store = GraphStore::new(rules, HashMap::new());
        // Only a 2-element lookahead supplied; the traversal keeps going
        // beyond it because nothing in word_sets[2..] rules it out.
        let hits = store.lookup_long(&[ws(&["a"]), ws(&["b"])]).unwrap();
        assert!(hits.iter().any(|r| r.lat == "LONG_CHAIN" && r.path.len() == 5));
    }

    #[test]
    fn prunes_branches_that_disagree_with_lookahead() {
        let rules = vec![
            LongRule { lat: "ONE".to_string(), path: vec!["a".to_string(), "b".to_string()] },
            LongRule { lat: "TWO".to_string(), path: vec!["a".to_string(), "x".to_string()] },
        ];
        let store = GraphStore::new(rules, HashMap::new());
        let hits = store.lookup_long(&[ws(&["a"]), ws(&["b"])]).unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].lat, "ONE");
    }

    #[test]
    fn shares_prefixes_across_rules() {
        let rules = vec![
            LongRule { lat: "SHORT".to_string(), path: vec!["a".to_string(), "b".to_string()] },
            LongRule { lat: "LONGER".to_string(), path: vec!["a".to_string(), "b".to_string(), "c".to_string()] },
        ];
        let store = GraphStore::new(rules, HashMap::new());
        let hits = store.lookup_long(&[ws(&["a"]), ws(&["b"]), ws(&["c"])]).unwrap();
        let lats: BTreeSet<_> = hits.iter().map(|r| r.lat.clone()).collect();
        assert_eq!(lats, BTreeSet::from(["SHORT".to_string(), "LONGER".to_string()]));
    }
}

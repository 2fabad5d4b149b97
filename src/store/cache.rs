//! LRU-memoized `RuleStore` wrapper.

use std::num::NonZeroUsize;
use std::sync::Mutex;

use lru::LruCache;

use super::RuleStore;
use crate::error::DocuScopeError;
use crate::rule::LongRule;

/// FNV-1a: a fast, deterministic, non-cryptographic hash. Cache keys only
/// need to distinguish queries within one process's lifetime, not resist
/// adversarial collisions, so this is preferred over pulling in a
/// cryptographic hash crate for a memoization key.
fn fnv1a(bytes: &[u8]) -> u64 {
    const OFFSET: u64 = 0xcbf29ce484222325;
    const PRIME: u64 = 0x100000001b3;
    let mut hash = OFFSET;
    for &b in bytes {
        hash ^= b as u64;
        hash = hash.wrapping_mul(PRIME);
    }
    hash
}

/// A stable digest of an ordered list of word sets: each set is sorted
/// independently (lookups are insensitive to the order ds-words appear
/// within a single token's resolution) before hashing, so two logically
/// identical queries always land on the same cache slot.
fn digest_sets(word_sets: &[Vec<String>]) -> u64 {
    let mut buf = String::new();
    for set in word_sets {
        let mut sorted: Vec<&str> = set.iter().map(String::as_str).collect();
        sorted.sort_unstable();
        for word in sorted {
            buf.push_str(word);
            buf.push('\u{1}');
        }
        buf.push('\u{2}');
    }
    fnv1a(buf.as_bytes())
}

fn digest_words(words: &[String]) -> u64 {
    digest_sets(&[words.to_vec()])
}

/// Wraps any [`RuleStore`] with a process-wide LRU cache over both query
/// kinds. Eviction mutates shared state, so each cache is guarded by its own
/// `Mutex` rather than requiring `&mut self` on the trait itself — callers
/// hold exclusivity only as long as a single lookup takes, not for the
/// store's whole lifetime.
pub struct CachedStore<S: RuleStore> {
    inner: S,
    long_cache: Mutex<LruCache<u64, Vec<LongRule>>>,
    short_cache: Mutex<LruCache<u64, Option<(String, String)>>>,
}

impl<S: RuleStore> CachedStore<S> {
    /// `capacity` bounds each of the two caches (long-rule lookups and
    /// short-rule lookups) independently.
    pub fn new(inner: S, capacity: NonZeroUsize) -> Self {
        CachedStore {
            inner,
            long_cache: Mutex::new(LruCache::new(capacity)),
            short_cache: Mutex::new(LruCache::new(capacity)),
        }
    }
}

impl<S: RuleStore> RuleStore for CachedStore<S> {
    fn lookup_long(&self, word_sets: &[Vec<String>]) -> Result<Vec<LongRule>, DocuScopeError> {
        let key = digest_sets(word_sets);
        if let Some(hit) = self.long_cache.lock().unwrap().get(&key) {
            return Ok(hit.clone());
        }
        let result = self.inner.lookup_long(word_sets)?;
        self.long_cache.lock().unwrap().put(key, result.clone());
        Ok(result)
    }

    fn lookup_short(&self, ds_words: &[String]) -> Result<Option<(String, String)>, DocuScopeError> {
        let key = digest_words(ds_words);
        if let Some(hit) = self.short_cache.lock().unwrap().get(&key) {
            return Ok(hit.clone());
        }
        let result = self.inner.lookup_short(ds_words)?;
        self.short_cache.lock().unwrap().put(key, result.clone());
        Ok(result)
    }
}

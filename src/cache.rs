//! A process-wide bounded cache of compiled patterns (spec.md §5).
//!
//! Compiling a pattern walks the full recursive-descent parser and then
//! asks the backend regex engine to build its automaton; for a CLI tool
//! that re-evaluates the same handful of patterns against thousands of
//! paths, that cost should be paid once. The cache is keyed on the
//! pattern text together with the flags it was compiled under, since
//! the same text compiles to different automata under different flags.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use once_cell::sync::Lazy;

use crate::flags::GlobFlags;

const CACHE_CAPACITY: usize = 256;

#[derive(Clone, PartialEq, Eq, Hash)]
struct CacheKey {
    pattern: String,
    flags: GlobFlags,
    is_bytes: bool,
}

struct LruCache {
    capacity: usize,
    entries: HashMap<CacheKey, (Arc<regex::Regex>, u64)>,
    clock: u64,
}

impl LruCache {
    fn new(capacity: usize) -> LruCache {
        LruCache { capacity, entries: HashMap::with_capacity(capacity), clock: 0 }
    }

    fn get(&mut self, key: &CacheKey) -> Option<Arc<regex::Regex>> {
        self.clock += 1;
        let clock = self.clock;
        if let Some((regex, last_used)) = self.entries.get_mut(key) {
            *last_used = clock;
            Some(Arc::clone(regex))
        } else {
            None
        }
    }

    fn insert(&mut self, key: CacheKey, regex: Arc<regex::Regex>) {
        if self.entries.len() >= self.capacity && !self.entries.contains_key(&key) {
            self.evict_oldest();
        }
        self.clock += 1;
        self.entries.insert(key, (regex, self.clock));
    }

    fn evict_oldest(&mut self) {
        if let Some(oldest) = self
            .entries
            .iter()
            .min_by_key(|(_, (_, last_used))| *last_used)
            .map(|(key, _)| key.clone())
        {
            self.entries.remove(&oldest);
            debug!("evicting cached pattern: {}", oldest.pattern);
        }
    }
}

static CACHE: Lazy<Mutex<LruCache>> = Lazy::new(|| Mutex::new(LruCache::new(CACHE_CAPACITY)));

/// Returns a cached [`regex::Regex`] for `(source, flags, is_bytes)`,
/// compiling and inserting it if absent. `source` is the already
/// translated regex source text (post [`crate::compiler::compile_pattern`]),
/// not the original glob pattern — two different glob patterns that
/// happen to translate to the same regex source share a cache slot,
/// which is correct since they'd behave identically.
pub fn get_or_compile(
    source: &str,
    flags: GlobFlags,
    is_bytes: bool,
) -> Result<Arc<regex::Regex>, regex::Error> {
    let key = CacheKey { pattern: source.to_string(), flags, is_bytes };

    if let Some(hit) = CACHE.lock().unwrap().get(&key) {
        return Ok(hit);
    }

    let compiled = Arc::new(regex::Regex::new(source)?);
    CACHE.lock().unwrap().insert(key, Arc::clone(&compiled));
    Ok(compiled)
}

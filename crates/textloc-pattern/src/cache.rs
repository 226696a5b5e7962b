//! Shared cache of compiled patterns.

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex, PoisonError};

use tracing::{debug, trace};

use crate::search_pattern::SearchPattern;

/// Hit/miss counters of a [`PatternCache`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Lookups answered from the cache
    pub hits: u64,
    /// Lookups that compiled a new pattern
    pub misses: u64,
    /// Patterns currently cached
    pub entries: usize,
}

#[derive(Debug, Default)]
struct CacheInner {
    patterns: HashMap<String, Arc<SearchPattern>>,
    order: VecDeque<String>,
    hits: u64,
    misses: u64,
}

/// Thread-safe, capacity-bounded cache of compiled [`SearchPattern`]s.
///
/// When full, the oldest entry is evicted. A capacity of 0 disables
/// caching; every lookup compiles.
#[derive(Debug)]
pub struct PatternCache {
    capacity: usize,
    inner: Mutex<CacheInner>,
}

impl PatternCache {
    /// Create a cache holding at most `capacity` patterns.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            inner: Mutex::new(CacheInner::default()),
        }
    }

    /// Return the compiled pattern for `source`, compiling it on a miss.
    pub fn get_or_compile(&self, source: &str) -> Arc<SearchPattern> {
        let mut inner = self.inner.lock().unwrap_or_else(PoisonError::into_inner);

        if let Some(pattern) = inner.patterns.get(source) {
            let pattern = Arc::clone(pattern);
            inner.hits += 1;
            return pattern;
        }

        inner.misses += 1;
        trace!("Compiling search pattern: '{}'", source);
        let pattern = Arc::new(SearchPattern::compile(source));
        if self.capacity == 0 {
            return pattern;
        }

        while inner.patterns.len() >= self.capacity {
            match inner.order.pop_front() {
                Some(oldest) => {
                    debug!("Evicting search pattern from cache: '{}'", oldest);
                    inner.patterns.remove(&oldest);
                }
                None => break,
            }
        }
        inner.order.push_back(source.to_string());
        inner
            .patterns
            .insert(source.to_string(), Arc::clone(&pattern));
        pattern
    }

    /// Current statistics.
    pub fn stats(&self) -> CacheStats {
        let inner = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        CacheStats {
            hits: inner.hits,
            misses: inner.misses,
            entries: inner.patterns.len(),
        }
    }

    /// Drop all cached patterns and reset the statistics.
    pub fn clear(&self) {
        let mut inner = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        *inner = CacheInner::default();
    }

    /// Configured capacity.
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Default for PatternCache {
    fn default() -> Self {
        Self::new(256)
    }
}

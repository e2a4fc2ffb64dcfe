//! Fetch bookkeeping shared by the consulta views: a results cache and
//! a request-generation counter.
//!
//! Both are cheap clonable handles around shared state and are provided
//! through context, never as module globals. The interiors are
//! thread-safe so the handles satisfy the context and callback bounds.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};

use contracts::tables::OrderDoc;

/// Identity of one full motorista fetch. A cache entry only answers
/// for the exact same token and filter parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CacheKey {
    pub token: String,
    pub datas: Vec<String>,
    pub incluir_nao_entregues: bool,
}

#[derive(Debug, Clone)]
pub struct CachedResults {
    pub docs: Vec<OrderDoc>,
    pub total: u64,
    pub stored_at: DateTime<Utc>,
}

/// Single-entry cache of the last full fetch. No TTL; writers that
/// change the collection invalidate explicitly.
#[derive(Clone, Default)]
pub struct ResultsCache {
    entry: Arc<Mutex<Option<(CacheKey, CachedResults)>>>,
}

impl ResultsCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// A poisoned lock reads as a miss.
    pub fn get(&self, key: &CacheKey) -> Option<CachedResults> {
        let entry = self.entry.lock().ok()?;
        entry
            .as_ref()
            .filter(|(cached_key, _)| cached_key == key)
            .map(|(_, cached)| cached.clone())
    }

    pub fn put(&self, key: CacheKey, docs: Vec<OrderDoc>, total: u64) {
        if let Ok(mut entry) = self.entry.lock() {
            *entry = Some((
                key,
                CachedResults {
                    docs,
                    total,
                    stored_at: Utc::now(),
                },
            ));
        }
    }

    pub fn invalidate(&self) {
        if let Ok(mut entry) = self.entry.lock() {
            *entry = None;
        }
    }
}

/// Monotonic fetch counter. A response is applied only while its
/// generation is still the latest one issued, so a slow earlier fetch
/// can never overwrite a newer one.
#[derive(Clone, Default)]
pub struct RequestGeneration {
    latest: Arc<AtomicU64>,
}

impl RequestGeneration {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin(&self) -> u64 {
        self.latest.fetch_add(1, Ordering::SeqCst) + 1
    }

    pub fn is_current(&self, generation: u64) -> bool {
        self.latest.load(Ordering::SeqCst) == generation
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(token: &str) -> CacheKey {
        CacheKey {
            token: token.into(),
            datas: Vec::new(),
            incluir_nao_entregues: false,
        }
    }

    #[test]
    fn test_handles_satisfy_context_bounds() {
        fn assert_context_safe<T: Clone + Send + Sync + 'static>() {}
        assert_context_safe::<ResultsCache>();
        assert_context_safe::<RequestGeneration>();
    }

    #[test]
    fn test_cache_hit_requires_exact_key() {
        let cache = ResultsCache::new();
        cache.put(key("t1"), vec![OrderDoc::default()], 1);
        assert!(cache.get(&key("t1")).is_some());
        assert!(cache.get(&key("t2")).is_none());

        let dated = CacheKey {
            datas: vec!["2026-08-27".into()],
            ..key("t1")
        };
        assert!(cache.get(&dated).is_none());
    }

    #[test]
    fn test_cache_invalidate() {
        let cache = ResultsCache::new();
        cache.put(key("t"), Vec::new(), 0);
        cache.invalidate();
        assert!(cache.get(&key("t")).is_none());
    }

    #[test]
    fn test_stale_generation_is_discarded() {
        let generation = RequestGeneration::new();
        let first = generation.begin();
        let second = generation.begin();
        assert!(!generation.is_current(first));
        assert!(generation.is_current(second));
    }

    #[test]
    fn test_clones_share_state() {
        let generation = RequestGeneration::new();
        let clone = generation.clone();
        let g = generation.begin();
        assert!(clone.is_current(g));
        clone.begin();
        assert!(!generation.is_current(g));
    }
}

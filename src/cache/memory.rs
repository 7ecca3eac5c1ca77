//! Bounded in-memory URL cache.

use dashmap::DashMap;
use std::collections::VecDeque;
use std::sync::Mutex;

use crate::cache::key::{GeneratedUrl, UrlCacheKey};
use crate::cache::ContentUrlCache;
use crate::catalog::types::ContentRef;
use crate::observability::metrics;
use crate::routing::context::RequestContext;

/// A thread-safe URL cache holding at most `max_entries` entries.
///
/// When full, the oldest inserted entry is evicted.
#[derive(Debug)]
pub struct InMemoryUrlCache {
    entries: DashMap<UrlCacheKey, GeneratedUrl>,
    /// Insertion order for eviction.
    order: Mutex<VecDeque<UrlCacheKey>>,
    max_entries: usize,
}

impl InMemoryUrlCache {
    pub fn new(max_entries: usize) -> Self {
        Self {
            entries: DashMap::new(),
            order: Mutex::new(VecDeque::new()),
            max_entries: max_entries.max(1),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl ContentUrlCache for InMemoryUrlCache {
    fn get(&self, _request: &RequestContext, key: &UrlCacheKey) -> Option<GeneratedUrl> {
        let hit = self.entries.get(key).map(|r| r.value().clone());
        metrics::record_cache_lookup(hit.is_some());
        hit
    }

    fn insert(&self, _request: &RequestContext, url: GeneratedUrl, key: UrlCacheKey) {
        let mut order = self.order.lock().expect("url cache order mutex poisoned");
        if self.entries.insert(key.clone(), url).is_none() {
            order.push_back(key);
        }
        while self.entries.len() > self.max_entries {
            match order.pop_front() {
                Some(oldest) => {
                    self.entries.remove(&oldest);
                }
                None => break,
            }
        }
        metrics::record_cache_size(self.entries.len());
    }

    fn remove(&self, content_link: &ContentRef) {
        let mut order = self.order.lock().expect("url cache order mutex poisoned");
        let before = self.entries.len();
        self.entries
            .retain(|key, _| !key.content_link().eq_ignore_work_id(content_link));
        order.retain(|key| !key.content_link().eq_ignore_work_id(content_link));

        let removed = before.saturating_sub(self.entries.len());
        tracing::debug!(content_id = %content_link, removed, "Invalidated cached URLs");
        metrics::record_cache_invalidation();
        metrics::record_cache_size(self.entries.len());
    }

    fn clear(&self) {
        let mut order = self.order.lock().expect("url cache order mutex poisoned");
        order.clear();
        self.entries.clear();
        tracing::debug!("Cleared URL cache");
        metrics::record_cache_invalidation();
        metrics::record_cache_size(0);
    }
}

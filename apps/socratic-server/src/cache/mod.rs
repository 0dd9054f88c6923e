//! Summary cache
//!
//! Process-wide, content-addressed cache of generated page summaries. Keys are
//! [`Fingerprint`]s over the page number and the exact page text, so identical
//! inputs always land on the same entry. Entries live until the process exits;
//! there is no eviction, expiry or size bound.
//!
//! Every fingerprint owns a `OnceCell`. Concurrent misses on the same key
//! therefore collapse into one call to the producer: the first caller runs it,
//! the rest await its result.

mod fingerprint;

pub use fingerprint::{fingerprint, Fingerprint};

use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;

use tokio::sync::{OnceCell, RwLock};

/// Namespace tag for page summary keys
pub const SUMMARY_PREFIX: &str = "sum";

/// Fingerprint for a page summary
pub fn summary_key(page_number: i64, text: &str) -> Fingerprint {
    fingerprint(SUMMARY_PREFIX, &[&page_number.to_string(), text])
}

/// Outcome of a read-through lookup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CachedSummary {
    pub summary: String,
    /// `false` only for the caller whose producer generated the value
    pub cached: bool,
}

/// Thread-safe, unbounded summary cache
#[derive(Clone, Default)]
pub struct SummaryCache {
    entries: Arc<RwLock<HashMap<Fingerprint, Arc<OnceCell<String>>>>>,
}

impl SummaryCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a stored summary
    pub async fn lookup(&self, key: &Fingerprint) -> Option<String> {
        let entries = self.entries.read().await;
        entries.get(key).and_then(|cell| cell.get().cloned())
    }

    /// Store a summary, replacing any previous value for the same key
    pub async fn store(&self, key: Fingerprint, summary: String) {
        let mut entries = self.entries.write().await;
        entries.insert(key, Arc::new(OnceCell::new_with(Some(summary))));
    }

    /// Return the cached summary for `key`, or run `produce` to generate it.
    ///
    /// Only one producer runs per key at a time. If it fails, nothing is stored
    /// and the error goes back to the caller that ran it; the next caller for
    /// the key starts a fresh attempt.
    pub async fn get_or_try_insert_with<F, Fut, E>(
        &self,
        key: Fingerprint,
        produce: F,
    ) -> Result<CachedSummary, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<String, E>>,
    {
        let cell = self.cell(key).await;

        if let Some(summary) = cell.get() {
            return Ok(CachedSummary {
                summary: summary.clone(),
                cached: true,
            });
        }

        let mut produced = false;
        let summary = cell
            .get_or_try_init(|| {
                produced = true;
                produce()
            })
            .await?
            .clone();

        Ok(CachedSummary {
            summary,
            cached: !produced,
        })
    }

    /// Number of stored summaries
    pub async fn len(&self) -> usize {
        let entries = self.entries.read().await;
        entries.values().filter(|cell| cell.initialized()).count()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    async fn cell(&self, key: Fingerprint) -> Arc<OnceCell<String>> {
        if let Some(cell) = self.entries.read().await.get(&key) {
            return cell.clone();
        }

        let mut entries = self.entries.write().await;
        entries.entry(key).or_default().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    #[tokio::test]
    async fn test_lookup_and_store() {
        let cache = SummaryCache::new();
        let key = summary_key(1, "Cells divide by mitosis.");

        assert!(cache.lookup(&key).await.is_none());
        assert!(cache.is_empty().await);

        cache.store(key.clone(), "Mitosis summary".to_string()).await;

        assert_eq!(cache.lookup(&key).await.as_deref(), Some("Mitosis summary"));
        assert_eq!(cache.len().await, 1);
    }

    #[tokio::test]
    async fn test_store_same_key_twice_keeps_one_entry() {
        let cache = SummaryCache::new();
        let key = summary_key(2, "text");

        cache.store(key.clone(), "first".to_string()).await;
        cache.store(key.clone(), "second".to_string()).await;

        assert_eq!(cache.len().await, 1);
        assert_eq!(cache.lookup(&key).await.as_deref(), Some("second"));
    }

    #[tokio::test]
    async fn test_read_through_reports_cached_on_second_call() {
        let cache = SummaryCache::new();
        let key = summary_key(1, "Newton's second law: F = ma.");

        let first = cache
            .get_or_try_insert_with(key.clone(), || async {
                Ok::<_, String>("F equals m times a".to_string())
            })
            .await
            .unwrap();
        assert!(!first.cached);

        let second = cache
            .get_or_try_insert_with(key, || async {
                Err::<String, _>("producer must not run on a hit".to_string())
            })
            .await
            .unwrap();
        assert!(second.cached);
        assert_eq!(first.summary, second.summary);
    }

    #[tokio::test]
    async fn test_failed_producer_is_not_cached() {
        let cache = SummaryCache::new();
        let key = summary_key(4, "text");

        let result = cache
            .get_or_try_insert_with(key.clone(), || async { Err::<String, _>("boom") })
            .await;
        assert_eq!(result, Err("boom"));
        assert!(cache.lookup(&key).await.is_none());
        assert!(cache.is_empty().await);

        let retry = cache
            .get_or_try_insert_with(key, || async { Ok::<_, &str>("ok".to_string()) })
            .await
            .unwrap();
        assert_eq!(retry.summary, "ok");
        assert!(!retry.cached);
    }

    #[tokio::test]
    async fn test_distinct_text_misses() {
        let cache = SummaryCache::new();
        let calls = AtomicUsize::new(0);

        for text in ["abc", "abd"] {
            let result = cache
                .get_or_try_insert_with(summary_key(1, text), || async {
                    calls.fetch_add(1, Ordering::SeqCst);
                    Ok::<_, ()>(format!("summary of {text}"))
                })
                .await
                .unwrap();
            assert!(!result.cached);
        }

        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert_eq!(cache.len().await, 2);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_misses_run_producer_once() {
        let cache = SummaryCache::new();
        let calls = Arc::new(AtomicUsize::new(0));
        let key = summary_key(9, "Concurrent page");

        let mut handles = Vec::new();
        for _ in 0..8 {
            let cache = cache.clone();
            let calls = calls.clone();
            let key = key.clone();
            handles.push(tokio::spawn(async move {
                cache
                    .get_or_try_insert_with(key, || async move {
                        calls.fetch_add(1, Ordering::SeqCst);
                        tokio::time::sleep(Duration::from_millis(50)).await;
                        Ok::<_, ()>("shared summary".to_string())
                    })
                    .await
                    .unwrap()
            }));
        }

        let mut fresh = 0;
        for handle in handles {
            let result = handle.await.unwrap();
            assert_eq!(result.summary, "shared summary");
            if !result.cached {
                fresh += 1;
            }
        }

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(fresh, 1);
    }
}

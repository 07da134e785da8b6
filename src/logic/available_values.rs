use futures::future::{BoxFuture, FutureExt, Shared};
use parking_lot::Mutex;
use std::future::Future;
use std::sync::Arc;

use crate::error::BoardActionError;
use crate::model::HalResource;

/// Snapshot of the values eligible for an action attribute, in load order
pub type AvailableValues = Arc<Vec<HalResource>>;

pub type LoadResult = Result<AvailableValues, BoardActionError>;

type PendingLoad = Shared<BoxFuture<'static, LoadResult>>;

enum CacheState {
    /// Nothing loaded yet, or the last load failed
    Empty,
    Loading { generation: u64, pending: PendingLoad },
    Ready(AvailableValues),
}

struct Inner {
    state: CacheState,
    generation: u64,
}

/// Single-flight cache of available values, owned by one board action service.
///
/// The first caller on an empty cache starts the load; callers arriving while
/// it runs await the same pending future. A successful load is kept for the
/// lifetime of the cache. A failed load moves the cache back to empty so the
/// next access retries. Callers that stop waiting do not abandon the load: the
/// pending future stays in the cache and the next caller resumes it.
pub struct AvailableValuesCache {
    inner: Mutex<Inner>,
}

impl AvailableValuesCache {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Inner {
                state: CacheState::Empty,
                generation: 0,
            }),
        }
    }

    /// Return the cached values, starting `load` only if nothing is cached or in flight
    pub async fn get_or_load<F, Fut>(&self, load: F) -> LoadResult
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = LoadResult> + Send + 'static,
    {
        let (generation, pending) = {
            let mut inner = self.inner.lock();
            match &inner.state {
                CacheState::Ready(values) => return Ok(values.clone()),
                CacheState::Loading {
                    generation,
                    pending,
                } => {
                    log::debug!("Joining in-flight load (generation {})", generation);
                    (*generation, pending.clone())
                }
                CacheState::Empty => {
                    inner.generation += 1;
                    let generation = inner.generation;
                    log::debug!("Loading available values (generation {})", generation);

                    let pending = load().boxed().shared();
                    inner.state = CacheState::Loading {
                        generation,
                        pending: pending.clone(),
                    };
                    (generation, pending)
                }
            }
        };

        let result = pending.await;

        let mut inner = self.inner.lock();
        let current = matches!(
            &inner.state,
            CacheState::Loading { generation: g, .. } if *g == generation
        );
        if current {
            inner.state = match &result {
                Ok(values) => CacheState::Ready(values.clone()),
                Err(err) => {
                    log::warn!("Available values load failed, cache reset: {}", err);
                    CacheState::Empty
                }
            };
        }

        result
    }

    /// True when nothing is cached and no load is running
    pub fn is_pristine(&self) -> bool {
        matches!(self.inner.lock().state, CacheState::Empty)
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.inner.lock().state, CacheState::Loading { .. })
    }

    /// Cached values without triggering a load
    pub fn snapshot(&self) -> Option<AvailableValues> {
        match &self.inner.lock().state {
            CacheState::Ready(values) => Some(values.clone()),
            _ => None,
        }
    }

    /// Drop cached values; a load still in flight no longer populates the cache
    pub fn clear(&self) {
        self.inner.lock().state = CacheState::Empty;
    }
}

impl Default for AvailableValuesCache {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ResourceKind;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    fn statuses() -> Vec<HalResource> {
        ["3", "5", "9"]
            .iter()
            .map(|id| {
                HalResource::new(
                    ResourceKind::Status,
                    *id,
                    format!("Status {}", id),
                    format!("/api/v3/statuses/{}", id),
                )
            })
            .collect()
    }

    fn slow_loader(calls: Arc<AtomicUsize>) -> impl Future<Output = LoadResult> + Send + 'static {
        async move {
            calls.fetch_add(1, Ordering::SeqCst);
            tokio::time::sleep(Duration::from_millis(20)).await;
            Ok(Arc::new(statuses()))
        }
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_callers_share_one_load() {
        let cache = Arc::new(AvailableValuesCache::new());
        let calls = Arc::new(AtomicUsize::new(0));

        let mut handles = Vec::new();
        for _ in 0..8 {
            let cache = cache.clone();
            let calls = calls.clone();
            handles.push(tokio::spawn(async move {
                cache.get_or_load(|| slow_loader(calls)).await
            }));
        }

        let mut results = Vec::new();
        for handle in handles {
            results.push(handle.await.unwrap().unwrap());
        }

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        for values in &results {
            assert!(Arc::ptr_eq(values, &results[0]));
        }
        assert_eq!(results[0].len(), 3);
    }

    #[tokio::test]
    async fn test_ready_cache_is_not_reloaded() {
        let cache = AvailableValuesCache::new();
        let calls = Arc::new(AtomicUsize::new(0));
        assert!(cache.is_pristine());

        let first = cache.get_or_load(|| slow_loader(calls.clone())).await.unwrap();
        let second = cache.get_or_load(|| slow_loader(calls.clone())).await.unwrap();

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(Arc::ptr_eq(&first, &second));
        assert!(cache.snapshot().is_some());
        assert!(!cache.is_pristine());
    }

    #[tokio::test]
    async fn test_failed_load_is_retried() {
        let cache = AvailableValuesCache::new();
        let calls = Arc::new(AtomicUsize::new(0));

        let failing = {
            let calls = calls.clone();
            async move {
                calls.fetch_add(1, Ordering::SeqCst);
                Err::<AvailableValues, _>(BoardActionError::LoadFailed {
                    attribute: "status".to_string(),
                    reason: "connection refused".to_string(),
                })
            }
        };
        let err = cache.get_or_load(|| failing).await.unwrap_err();
        assert!(matches!(err, BoardActionError::LoadFailed { .. }));
        assert!(cache.is_pristine());

        let values = cache.get_or_load(|| slow_loader(calls.clone())).await.unwrap();
        assert_eq!(values.len(), 3);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_concurrent_callers_share_a_failure() {
        let cache = Arc::new(AvailableValuesCache::new());
        let calls = Arc::new(AtomicUsize::new(0));

        let load = |calls: Arc<AtomicUsize>| async move {
            calls.fetch_add(1, Ordering::SeqCst);
            tokio::time::sleep(Duration::from_millis(20)).await;
            Err::<AvailableValues, _>(BoardActionError::LoadFailed {
                attribute: "status".to_string(),
                reason: "timeout".to_string(),
            })
        };

        let (a, b) = tokio::join!(
            cache.get_or_load(|| load(calls.clone())),
            cache.get_or_load(|| load(calls.clone()))
        );

        assert!(a.is_err());
        assert_eq!(a, b);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(cache.is_pristine());
    }

    #[tokio::test]
    async fn test_abandoned_waiter_does_not_wedge_the_cache() {
        let cache = AvailableValuesCache::new();
        let calls = Arc::new(AtomicUsize::new(0));

        let abandoned = tokio::time::timeout(
            Duration::from_millis(1),
            cache.get_or_load(|| slow_loader(calls.clone())),
        )
        .await;
        assert!(abandoned.is_err());
        assert!(cache.is_loading());

        // The next caller resumes the pending load instead of starting another
        let values = cache.get_or_load(|| slow_loader(calls.clone())).await.unwrap();
        assert_eq!(values.len(), 3);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_clear_discards_values() {
        let cache = AvailableValuesCache::new();
        let calls = Arc::new(AtomicUsize::new(0));

        cache.get_or_load(|| slow_loader(calls.clone())).await.unwrap();
        cache.clear();
        assert!(cache.snapshot().is_none());

        cache.get_or_load(|| slow_loader(calls.clone())).await.unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }
}

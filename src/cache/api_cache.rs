//! Populate-once snapshots of the pool metadata API.
//!
//! The CLMM pool-key list and the legacy liquidity file are each fetched
//! at most once per process (or once per [`ApiSnapshotCache::clear`]) and
//! shared by every route enumeration afterwards.

use std::future::Future;
use std::sync::Arc;

use crate::common::pool_api::PoolApiClient;
use crate::common::types::AnyResult;
use crate::sdk::engine::{ClmmPoolKeys, LiquidityFile, PoolDirectory};

/// One populate-once value. The value mutex is sync and held only for the
/// copy in or out; the fetch guard is an async mutex so exactly one
/// caller performs the fetch while the rest wait for it.
struct Slot<T> {
    value: parking_lot::Mutex<Option<Arc<T>>>,
    fetch_guard: tokio::sync::Mutex<()>,
}

impl<T> Slot<T> {
    fn new() -> Self {
        Self {
            value: parking_lot::Mutex::new(None),
            fetch_guard: tokio::sync::Mutex::new(()),
        }
    }

    fn clear(&self) {
        *self.value.lock() = None;
    }

    async fn get_or_fetch<Fut>(&self, fetch: impl FnOnce() -> Fut) -> AnyResult<Arc<T>>
    where
        Fut: Future<Output = AnyResult<T>>,
    {
        if let Some(value) = self.value.lock().clone() {
            return Ok(value);
        }

        let _guard = self.fetch_guard.lock().await;
        // A concurrent caller may have populated the slot while this one
        // waited on the guard.
        if let Some(value) = self.value.lock().clone() {
            return Ok(value);
        }

        let value = Arc::new(fetch().await?);
        *self.value.lock() = Some(Arc::clone(&value));
        Ok(value)
    }
}

/// Cached API snapshots backing [`PoolDirectory`] construction.
pub struct ApiSnapshotCache {
    clmm_pool_keys: Slot<Vec<ClmmPoolKeys>>,
    liquidity_file: Slot<LiquidityFile>,
}

impl Default for ApiSnapshotCache {
    fn default() -> Self {
        Self::new()
    }
}

impl ApiSnapshotCache {
    pub fn new() -> Self {
        Self {
            clmm_pool_keys: Slot::new(),
            liquidity_file: Slot::new(),
        }
    }

    /// Both pool lists, fetching whichever is missing. A failed fetch
    /// leaves its slot empty, so the next call retries.
    pub async fn pool_directory(&self, api: &PoolApiClient) -> AnyResult<PoolDirectory> {
        let (clmm_pool_keys, liquidity_file) = futures::future::try_join(
            self.clmm_pool_keys.get_or_fetch(|| api.fetch_clmm_pool_keys()),
            self.liquidity_file.get_or_fetch(|| api.fetch_liquidity_file()),
        )
        .await?;

        Ok(PoolDirectory {
            clmm_pool_keys,
            liquidity_file,
        })
    }

    /// Drops both snapshots; the next [`Self::pool_directory`] refetches.
    pub fn clear(&self) {
        self.clmm_pool_keys.clear();
        self.liquidity_file.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[tokio::test]
    async fn slot_fetches_once() {
        let slot = Slot::<u32>::new();
        let calls = AtomicUsize::new(0);

        for _ in 0..3 {
            let value = slot
                .get_or_fetch(|| async {
                    calls.fetch_add(1, Ordering::SeqCst);
                    Ok(7u32)
                })
                .await
                .unwrap();
            assert_eq!(*value, 7);
        }
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn failed_fetch_leaves_the_slot_empty() {
        let slot = Slot::<u32>::new();
        assert!(slot
            .get_or_fetch(|| async { Err(anyhow!("service unavailable")) })
            .await
            .is_err());

        let value = slot.get_or_fetch(|| async { Ok(9u32) }).await.unwrap();
        assert_eq!(*value, 9);
    }

    #[tokio::test]
    async fn clear_forces_a_refetch() {
        let slot = Slot::<u32>::new();
        let calls = AtomicUsize::new(0);
        let fetch = || async {
            calls.fetch_add(1, Ordering::SeqCst);
            Ok(1u32)
        };

        slot.get_or_fetch(fetch).await.unwrap();
        slot.clear();
        slot.get_or_fetch(fetch).await.unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }
}

//! Per-mint-pair route cache with background data fetches.
//!
//! The first request for a mint pair enumerates routes synchronously,
//! inserts the entry, and spawns the tick-array and pool-simulation
//! fetches; concurrent requests for the same pair share the entry and its
//! in-flight fetches. A failed fetch logs a warning, evicts the entry it
//! belongs to (so the next request retries), and resolves to `None`.
//!
//! Entries are never expired by time. A long-lived process sees pool data
//! as old as its first request for the pair until something calls
//! [`SwapRouteCache::clear`].

use std::collections::HashMap;
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use futures::future::{BoxFuture, FutureExt, Shared};
use parking_lot::Mutex;
use solana_sdk::pubkey::Pubkey;
use tracing::warn;

use crate::common::types::AnyResult;
use crate::sdk::engine::{
    PoolDirectory, PoolSimulationCache, RouteSet, SwapEngine, TickArrayCache,
};

/// A shared handle to a background fetch. Resolves to `None` when the
/// fetch failed or its task was cancelled.
pub type SharedFetch<T> = Shared<BoxFuture<'static, Option<Arc<T>>>>;

fn cache_key(input_mint: &Pubkey, output_mint: &Pubkey) -> String {
    format!("{input_mint}{output_mint}")
}

/// One cached mint pair: the enumerated routes plus the shared fetches
/// backing quote computation.
#[derive(Clone)]
pub struct RouteCacheEntry {
    pub routes: Arc<RouteSet>,
    pub tick_arrays: SharedFetch<TickArrayCache>,
    pub pool_simulations: SharedFetch<PoolSimulationCache>,
    generation: u64,
}

/// Route cache over ordered mint pairs.
pub struct SwapRouteCache {
    entries: Mutex<HashMap<String, RouteCacheEntry>>,
    next_generation: AtomicU64,
}

impl Default for SwapRouteCache {
    fn default() -> Self {
        Self::new()
    }
}

impl SwapRouteCache {
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            next_generation: AtomicU64::new(0),
        }
    }

    /// Returns the cached entry for `(input_mint, output_mint)`, creating
    /// it first when absent.
    ///
    /// Enumeration and insertion happen under the entry lock, so two
    /// concurrent calls for the same missing pair produce one entry and
    /// one set of fetches. The lock is never held across an await; the
    /// fetches run on spawned tasks. Must be called from within a tokio
    /// runtime.
    pub fn get_or_create(
        self: &Arc<Self>,
        engine: &Arc<dyn SwapEngine>,
        input_mint: &Pubkey,
        output_mint: &Pubkey,
        directory: &PoolDirectory,
    ) -> RouteCacheEntry {
        let key = cache_key(input_mint, output_mint);
        let mut entries = self.entries.lock();
        if let Some(entry) = entries.get(&key) {
            return entry.clone();
        }

        let routes = Arc::new(engine.enumerate_routes(input_mint, output_mint, directory));
        let generation = self.next_generation.fetch_add(1, Ordering::Relaxed);

        let tick_engine = Arc::clone(engine);
        let tick_routes = Arc::clone(&routes);
        let tick_arrays = self.spawn_fetch(key.clone(), generation, "tick_arrays", async move {
            tick_engine.fetch_tick_arrays(&tick_routes).await
        });

        let sim_engine = Arc::clone(engine);
        let sim_routes = Arc::clone(&routes);
        let pool_simulations =
            self.spawn_fetch(key.clone(), generation, "pool_simulations", async move {
                sim_engine.fetch_pool_simulations(&sim_routes).await
            });

        let entry = RouteCacheEntry {
            routes,
            tick_arrays,
            pool_simulations,
            generation,
        };
        entries.insert(key, entry.clone());
        entry
    }

    /// Drops the entry for one mint pair. In-flight fetches keep running
    /// but their results are no longer reachable through the cache.
    pub fn clear(&self, input_mint: &Pubkey, output_mint: &Pubkey) {
        self.entries.lock().remove(&cache_key(input_mint, output_mint));
    }

    /// Drops every entry.
    pub fn clear_all(&self) {
        self.entries.lock().clear();
    }

    fn spawn_fetch<T>(
        self: &Arc<Self>,
        key: String,
        generation: u64,
        what: &'static str,
        fetch: impl Future<Output = AnyResult<T>> + Send + 'static,
    ) -> SharedFetch<T>
    where
        T: Send + Sync + 'static,
    {
        let cache = Arc::clone(self);
        let handle = tokio::spawn(async move {
            match fetch.await {
                Ok(value) => Some(Arc::new(value)),
                Err(error) => {
                    warn!(%key, what, %error, "route data fetch failed, evicting entry");
                    cache.evict_if_generation(&key, generation);
                    None
                }
            }
        });
        async move { handle.await.ok().flatten() }.boxed().shared()
    }

    /// Removes `key` only when it still holds the entry the failed fetch
    /// belongs to. A newer entry for the same pair stays.
    fn evict_if_generation(&self, key: &str, generation: u64) {
        let mut entries = self.entries.lock();
        if entries.get(key).is_some_and(|entry| entry.generation == generation) {
            entries.remove(key);
        }
    }
}

//! Client-side quoting and liquidity toolkit for Solana DEX pools.
//!
//! The crate sits between a UI working in exact rationals and an external
//! swap engine working in decimals and base-58 strings. It provides:
//!
//! - deep conversion passes between the two domains ([`convert`]),
//! - CLMM price/tick and deposit sizing adapters ([`clmm`]),
//! - route enumeration over fetched pool lists ([`sdk::routes`]),
//! - a caching layer that deduplicates route enumeration and the slow
//!   engine fetches behind it ([`cache`]),
//! - [`QuoteClient`], which wires the caches, the metadata API, and a
//!   [`SwapEngine`] together.

pub mod cache;
pub mod clmm;
pub mod common;
pub mod constants;
pub mod convert;
pub mod sdk;
pub mod utils;

use std::collections::HashMap;
use std::sync::Arc;

use solana_sdk::pubkey::Pubkey;
use tracing::debug;

pub use crate::cache::{ApiSnapshotCache, ParsedPoolCache, SwapRouteCache};
pub use crate::common::{AnyResult, PoolApiClient, PoolApiConfig};
pub use crate::sdk::engine::{
    best_route_quote, ClmmPoolInfo, ParsedClmmPool, PoolDirectory, QuoteRequest, RoutePool,
    RouteQuote, RouteSet, SwapEngine,
};
pub use crate::sdk::{AddressParse, Percent, PriceValue, SdkValue, TokenAmount, TokenInfo};

/// Quoting facade: one engine, one metadata API client, and the caches
/// that make repeated requests cheap.
///
/// Cloneable via `Arc`; all methods take `&self` and are safe to call
/// concurrently.
pub struct QuoteClient {
    engine: Arc<dyn SwapEngine>,
    api: PoolApiClient,
    route_cache: Arc<SwapRouteCache>,
    snapshots: ApiSnapshotCache,
    parsed_pools: ParsedPoolCache,
}

impl QuoteClient {
    pub fn new(engine: Arc<dyn SwapEngine>, api: PoolApiClient) -> Self {
        Self {
            engine,
            api,
            route_cache: Arc::new(SwapRouteCache::new()),
            snapshots: ApiSnapshotCache::new(),
            parsed_pools: ParsedPoolCache::new(),
        }
    }

    /// The pool lists route enumeration runs over, fetched once and then
    /// served from the snapshot cache.
    pub async fn pool_directory(&self) -> AnyResult<PoolDirectory> {
        self.snapshots.pool_directory(&self.api).await
    }

    /// Routes for a mint pair, from cache when warm.
    pub async fn routes(
        &self,
        input_mint: &Pubkey,
        output_mint: &Pubkey,
    ) -> AnyResult<Arc<RouteSet>> {
        let directory = self.pool_directory().await?;
        let entry =
            self.route_cache
                .get_or_create(&self.engine, input_mint, output_mint, &directory);
        Ok(entry.routes)
    }

    /// Best quote for `request`, or `None` when no route data is
    /// available.
    ///
    /// Waits for the cached tick-array and pool-simulation fetches of the
    /// pair; if either failed (and evicted the entry for the next
    /// caller), this returns `Ok(None)` rather than an error.
    pub async fn quote_best_route(&self, request: &QuoteRequest) -> AnyResult<Option<RouteQuote>> {
        let directory = self.pool_directory().await?;
        let entry = self.route_cache.get_or_create(
            &self.engine,
            &request.input_mint,
            &request.output_mint,
            &directory,
        );
        if entry.routes.is_empty() {
            debug!(
                input = %request.input_mint,
                output = %request.output_mint,
                "no routes for mint pair"
            );
            return Ok(None);
        }

        let (ticks, simulations) =
            futures::join!(entry.tick_arrays.clone(), entry.pool_simulations.clone());
        let (Some(ticks), Some(simulations)) = (ticks, simulations) else {
            return Ok(None);
        };

        let quotes = self
            .engine
            .compute_route_quotes(request, &entry.routes, &ticks, &simulations)?;
        Ok(best_route_quote(&quotes).cloned())
    }

    /// Default pool for adding liquidity to a mint pair, per the engine's
    /// policy over the cached routes.
    pub async fn add_liquidity_default_pool(
        &self,
        input_mint: &Pubkey,
        output_mint: &Pubkey,
    ) -> AnyResult<Option<RoutePool>> {
        let directory = self.pool_directory().await?;
        let entry =
            self.route_cache
                .get_or_create(&self.engine, input_mint, output_mint, &directory);
        Ok(self.engine.add_liquidity_default_pool(&entry.routes))
    }

    /// Parsed CLMM pool state for `pool_ids`, fetched incrementally.
    pub async fn parsed_clmm_pools(
        &self,
        pool_ids: &[Pubkey],
        owner: Option<&Pubkey>,
    ) -> AnyResult<HashMap<String, Arc<ParsedClmmPool>>> {
        self.parsed_pools
            .get_or_fetch(&self.engine, pool_ids, owner)
            .await
    }

    /// Drops every cached snapshot, route entry, and parsed pool.
    pub fn clear_sdk_cache(&self) {
        self.snapshots.clear();
        self.route_cache.clear_all();
        self.parsed_pools.clear();
    }
}

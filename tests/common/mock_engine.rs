//! In-memory [`SwapEngine`] with call counters, for cache behavior tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::json;
use sol_quote_sdk::sdk::engine::{
    ParsedClmmPool, PoolDirectory, PoolSimulationCache, QuoteRequest, RoutePool, RouteQuote,
    RouteSet, SwapEngine, TickArrayCache,
};
use sol_quote_sdk::sdk::routes::find_all_routes;
use solana_sdk::pubkey::Pubkey;

#[derive(Default)]
pub struct MockEngine {
    pub enumerate_calls: AtomicUsize,
    pub tick_fetches: AtomicUsize,
    pub simulation_fetches: AtomicUsize,
    pub fail_tick_arrays: AtomicBool,
    /// Pool id batches passed to `fetch_clmm_pools`, in call order.
    pub fetched_pool_batches: Mutex<Vec<Vec<Pubkey>>>,
}

#[async_trait]
impl SwapEngine for MockEngine {
    fn enumerate_routes(
        &self,
        input_mint: &Pubkey,
        output_mint: &Pubkey,
        directory: &PoolDirectory,
    ) -> RouteSet {
        self.enumerate_calls.fetch_add(1, Ordering::SeqCst);
        find_all_routes(input_mint, output_mint, directory)
    }

    async fn fetch_tick_arrays(&self, routes: &RouteSet) -> Result<TickArrayCache> {
        self.tick_fetches.fetch_add(1, Ordering::SeqCst);
        tokio::task::yield_now().await;
        if self.fail_tick_arrays.load(Ordering::SeqCst) {
            return Err(anyhow!("tick array fetch refused"));
        }
        let by_pool = routes
            .direct_paths
            .iter()
            .map(|pool| (pool.id.to_string(), json!({ "ticks": [] })))
            .collect();
        Ok(TickArrayCache { by_pool })
    }

    async fn fetch_pool_simulations(&self, routes: &RouteSet) -> Result<PoolSimulationCache> {
        self.simulation_fetches.fetch_add(1, Ordering::SeqCst);
        tokio::task::yield_now().await;
        let by_pool = routes
            .direct_paths
            .iter()
            .map(|pool| (pool.id.to_string(), json!({ "status": 1 })))
            .collect();
        Ok(PoolSimulationCache { by_pool })
    }

    fn compute_route_quotes(
        &self,
        request: &QuoteRequest,
        routes: &RouteSet,
        _ticks: &TickArrayCache,
        _simulations: &PoolSimulationCache,
    ) -> Result<Vec<RouteQuote>> {
        Ok(routes
            .direct_paths
            .iter()
            .map(|pool| RouteQuote {
                pool_ids: vec![pool.id],
                amount_out: request.amount_in / 2,
                min_amount_out: request.amount_in / 2,
                pool_ready: true,
                price_impact_bps: None,
            })
            .collect())
    }

    fn add_liquidity_default_pool(&self, routes: &RouteSet) -> Option<RoutePool> {
        routes.add_liquidity_pools.first().cloned()
    }

    async fn fetch_clmm_pools(
        &self,
        pool_ids: &[Pubkey],
        _owner: Option<&Pubkey>,
    ) -> Result<HashMap<String, ParsedClmmPool>> {
        self.fetched_pool_batches.lock().push(pool_ids.to_vec());
        Ok(pool_ids
            .iter()
            .map(|id| {
                (
                    id.to_string(),
                    ParsedClmmPool {
                        state: json!({ "id": id.to_string() }),
                        positions: vec![],
                    },
                )
            })
            .collect())
    }
}

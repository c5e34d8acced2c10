//! The external swap-engine boundary.
//!
//! Everything that simulates pools or reads chain state lives behind
//! [`SwapEngine`]. Calls may be slow and may fail; this crate treats them
//! as opaque remote-ish operations even when they are CPU-bound.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use solana_sdk::pubkey::Pubkey;

use crate::common::types::AnyResult;
use crate::sdk::TokenInfo;

/// On-chain CLMM pool state needed by the tick and position adapters.
#[derive(Debug, Clone)]
pub struct ClmmPoolInfo {
    pub id: Pubkey,
    pub mint_a: TokenInfo,
    pub mint_b: TokenInfo,
    pub tick_spacing: u16,
    pub tick_current: i32,
    pub sqrt_price_x64: u128,
    pub liquidity: u128,
}

/// One entry of the CLMM pool-key list served by the metadata API.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClmmPoolKeys {
    pub id: String,
    pub mint_a: String,
    pub mint_b: String,
    pub mint_decimals_a: u8,
    pub mint_decimals_b: u8,
    #[serde(default)]
    pub open_time: u64,
    /// Remaining key material varies by pool version; kept raw.
    #[serde(flatten)]
    pub extra: HashMap<String, Value>,
}

/// The legacy liquidity pool JSON file. Entry shapes differ between the
/// official and unofficial lists, so entries stay raw.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LiquidityFile {
    #[serde(default)]
    pub official: Vec<Value>,
    #[serde(default, rename = "unOfficial")]
    pub un_official: Vec<Value>,
}

/// The two already-fetched pool lists route enumeration runs over.
#[derive(Debug, Clone)]
pub struct PoolDirectory {
    pub clmm_pool_keys: Arc<Vec<ClmmPoolKeys>>,
    pub liquidity_file: Arc<LiquidityFile>,
}

/// Which program a route pool belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PoolKind {
    AmmV4,
    Clmm,
}

/// One pool usable as a route leg.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutePool {
    pub id: Pubkey,
    pub kind: PoolKind,
    pub mint_a: Pubkey,
    pub mint_b: Pubkey,
}

impl RoutePool {
    pub fn contains(&self, mint: &Pubkey) -> bool {
        self.mint_a == *mint || self.mint_b == *mint
    }

    /// The pool's other mint, when `mint` is one of its two sides.
    pub fn other_mint(&self, mint: &Pubkey) -> Option<Pubkey> {
        if self.mint_a == *mint {
            Some(self.mint_b)
        } else if self.mint_b == *mint {
            Some(self.mint_a)
        } else {
            None
        }
    }
}

/// Enumerated swap routes for one ordered mint pair.
#[derive(Debug, Clone)]
pub struct RouteSet {
    pub input_mint: Pubkey,
    pub output_mint: Pubkey,
    /// Pools holding both mints directly.
    pub direct_paths: Vec<RoutePool>,
    /// Two-leg paths keyed by the middle mint.
    pub hop_paths: HashMap<Pubkey, Vec<(RoutePool, RoutePool)>>,
    /// Direct AMM pools usable as add-liquidity targets.
    pub add_liquidity_pools: Vec<RoutePool>,
}

impl RouteSet {
    pub fn is_empty(&self) -> bool {
        self.direct_paths.is_empty() && self.hop_paths.is_empty()
    }
}

/// Tick-array accounts fetched for the CLMM pools of a route set, keyed by
/// pool id. Payload layout is owned by the engine.
#[derive(Debug, Clone, Default)]
pub struct TickArrayCache {
    pub by_pool: HashMap<String, Value>,
}

/// Simulated pool state snapshots keyed by pool id.
#[derive(Debug, Clone, Default)]
pub struct PoolSimulationCache {
    pub by_pool: HashMap<String, Value>,
}

/// Parsed on-chain CLMM pool state plus the caller's position accounts.
#[derive(Debug, Clone)]
pub struct ParsedClmmPool {
    pub state: Value,
    pub positions: Vec<Value>,
}

/// What the caller wants quoted.
#[derive(Debug, Clone)]
pub struct QuoteRequest {
    pub input_mint: Pubkey,
    pub output_mint: Pubkey,
    /// Input amount in smallest units.
    pub amount_in: u64,
    /// Slippage tolerance in basis points.
    pub slippage_bps: u64,
}

/// One scored route candidate, in the engine's ranked order.
#[derive(Debug, Clone)]
pub struct RouteQuote {
    /// Pool ids along the path, input side first.
    pub pool_ids: Vec<Pubkey>,
    pub amount_out: u64,
    pub min_amount_out: u64,
    /// Whether every pool on the path is fully initialized on-chain.
    pub pool_ready: bool,
    pub price_impact_bps: Option<u64>,
}

/// First quote whose pools are confirmed ready; otherwise the first
/// candidate. A not-yet-ready pool may still be the best path once it
/// activates, so surfacing a quote beats surfacing none. No secondary
/// sort is applied beyond the engine's returned order.
pub fn best_route_quote(quotes: &[RouteQuote]) -> Option<&RouteQuote> {
    quotes
        .iter()
        .find(|quote| quote.pool_ready)
        .or_else(|| quotes.first())
}

/// External route/simulation engine.
///
/// Network-bound methods reject with ordinary errors; the cache layer
/// converts those into absent results and evicts.
#[async_trait]
pub trait SwapEngine: Send + Sync {
    /// Pure route enumeration over already-fetched pool lists. No I/O.
    fn enumerate_routes(
        &self,
        input_mint: &Pubkey,
        output_mint: &Pubkey,
        directory: &PoolDirectory,
    ) -> RouteSet {
        super::routes::find_all_routes(input_mint, output_mint, directory)
    }

    /// Fetch the tick arrays required to simulate `routes`.
    async fn fetch_tick_arrays(&self, routes: &RouteSet) -> AnyResult<TickArrayCache>;

    /// Fetch simulated state snapshots for every pool on `routes`.
    async fn fetch_pool_simulations(&self, routes: &RouteSet) -> AnyResult<PoolSimulationCache>;

    /// Score all routes for a request. CPU-bound; returns candidates in
    /// the engine's preferred order.
    fn compute_route_quotes(
        &self,
        request: &QuoteRequest,
        routes: &RouteSet,
        ticks: &TickArrayCache,
        simulations: &PoolSimulationCache,
    ) -> AnyResult<Vec<RouteQuote>>;

    /// Default pool for an add-liquidity flow over this mint pair.
    fn add_liquidity_default_pool(&self, routes: &RouteSet) -> Option<RoutePool>;

    /// Batch-parse CLMM pools (and the owner's positions, when given).
    async fn fetch_clmm_pools(
        &self,
        pool_ids: &[Pubkey],
        owner: Option<&Pubkey>,
    ) -> AnyResult<HashMap<String, ParsedClmmPool>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quote(ready: bool, amount_out: u64) -> RouteQuote {
        RouteQuote {
            pool_ids: vec![Pubkey::new_unique()],
            amount_out,
            min_amount_out: amount_out,
            pool_ready: ready,
            price_impact_bps: None,
        }
    }

    #[test]
    fn best_route_prefers_first_ready() {
        let quotes = vec![quote(false, 300), quote(true, 200), quote(true, 100)];
        let best = best_route_quote(&quotes).unwrap();
        assert_eq!(best.amount_out, 200);
    }

    #[test]
    fn best_route_falls_back_to_first_candidate() {
        let quotes = vec![quote(false, 300), quote(false, 200)];
        let best = best_route_quote(&quotes).unwrap();
        assert_eq!(best.amount_out, 300);
    }

    #[test]
    fn best_route_of_empty_list_is_none() {
        assert!(best_route_quote(&[]).is_none());
    }
}

//! Incrementally merged cache of parsed CLMM pool state.

use std::collections::HashMap;
use std::sync::Arc;

use dashmap::DashMap;
use solana_sdk::pubkey::Pubkey;

use crate::common::types::AnyResult;
use crate::sdk::engine::{ParsedClmmPool, SwapEngine};

/// Parsed pools keyed by pool id. Requests fetch only the ids not yet
/// present and merge the response in, so repeated lookups over
/// overlapping pool sets hit the network once per pool.
#[derive(Default)]
pub struct ParsedPoolCache {
    pools: DashMap<String, Arc<ParsedClmmPool>>,
}

impl ParsedPoolCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns parsed state for the requested pools, fetching the missing
    /// ones through `engine`. Ids the engine does not return are absent
    /// from the result rather than errors.
    pub async fn get_or_fetch(
        &self,
        engine: &Arc<dyn SwapEngine>,
        pool_ids: &[Pubkey],
        owner: Option<&Pubkey>,
    ) -> AnyResult<HashMap<String, Arc<ParsedClmmPool>>> {
        let missing: Vec<Pubkey> = pool_ids
            .iter()
            .filter(|id| !self.pools.contains_key(&id.to_string()))
            .copied()
            .collect();

        if !missing.is_empty() {
            let fetched = engine.fetch_clmm_pools(&missing, owner).await?;
            for (id, pool) in fetched {
                self.pools.insert(id, Arc::new(pool));
            }
        }

        let mut result = HashMap::with_capacity(pool_ids.len());
        for id in pool_ids {
            let key = id.to_string();
            if let Some(pool) = self.pools.get(&key) {
                result.insert(key, Arc::clone(pool.value()));
            }
        }
        Ok(result)
    }

    pub fn clear(&self) {
        self.pools.clear();
    }
}

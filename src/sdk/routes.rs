//! Route enumeration: a pure function over the two fetched pool lists.
//!
//! No I/O happens here; that is what lets the route cache compute this
//! step synchronously while holding its map lock.

use std::collections::{HashMap, HashSet};
use std::str::FromStr;

use serde_json::Value;
use solana_sdk::pubkey::Pubkey;

use super::engine::{PoolDirectory, PoolKind, RoutePool, RouteSet};

/// Enumerate every direct and one-hop path between the ordered mint pair.
pub fn find_all_routes(
    input_mint: &Pubkey,
    output_mint: &Pubkey,
    directory: &PoolDirectory,
) -> RouteSet {
    let pools = collect_route_pools(directory);

    let mut direct_paths = Vec::new();
    let mut add_liquidity_pools = Vec::new();
    let mut from_input: Vec<&RoutePool> = Vec::new();
    let mut from_output: Vec<&RoutePool> = Vec::new();

    for pool in &pools {
        let has_input = pool.contains(input_mint);
        let has_output = pool.contains(output_mint);
        match (has_input, has_output) {
            (true, true) => {
                direct_paths.push(pool.clone());
                if pool.kind == PoolKind::AmmV4 {
                    add_liquidity_pools.push(pool.clone());
                }
            }
            (true, false) => from_input.push(pool),
            (false, true) => from_output.push(pool),
            (false, false) => {}
        }
    }

    let mut hop_paths: HashMap<Pubkey, Vec<(RoutePool, RoutePool)>> = HashMap::new();
    let mut seen: HashSet<(Pubkey, Pubkey)> = HashSet::new();
    for first in &from_input {
        let Some(middle) = first.other_mint(input_mint) else {
            continue;
        };
        for second in &from_output {
            if second.contains(&middle) && seen.insert((first.id, second.id)) {
                hop_paths
                    .entry(middle)
                    .or_default()
                    .push(((*first).clone(), (*second).clone()));
            }
        }
    }

    RouteSet {
        input_mint: *input_mint,
        output_mint: *output_mint,
        direct_paths,
        hop_paths,
        add_liquidity_pools,
    }
}

fn collect_route_pools(directory: &PoolDirectory) -> Vec<RoutePool> {
    let mut pools = Vec::new();
    let mut seen: HashSet<Pubkey> = HashSet::new();

    for keys in directory.clmm_pool_keys.iter() {
        let (Ok(id), Ok(mint_a), Ok(mint_b)) = (
            Pubkey::from_str(&keys.id),
            Pubkey::from_str(&keys.mint_a),
            Pubkey::from_str(&keys.mint_b),
        ) else {
            continue;
        };
        if seen.insert(id) {
            pools.push(RoutePool { id, kind: PoolKind::Clmm, mint_a, mint_b });
        }
    }

    for entry in directory
        .liquidity_file
        .official
        .iter()
        .chain(directory.liquidity_file.un_official.iter())
    {
        if let Some(pool) = route_pool_from_legacy(entry) {
            if seen.insert(pool.id) {
                pools.push(pool);
            }
        }
    }

    pools
}

/// Legacy liquidity file entries are loosely shaped; anything without the
/// three address fields is skipped rather than rejected.
fn route_pool_from_legacy(entry: &Value) -> Option<RoutePool> {
    let id = pubkey_field(entry, "id")?;
    let mint_a = pubkey_field(entry, "baseMint")?;
    let mint_b = pubkey_field(entry, "quoteMint")?;
    Some(RoutePool { id, kind: PoolKind::AmmV4, mint_a, mint_b })
}

fn pubkey_field(entry: &Value, field: &str) -> Option<Pubkey> {
    Pubkey::from_str(entry.get(field)?.as_str()?).ok()
}

#![allow(dead_code)]

pub mod mock_engine;

use std::sync::Arc;

use serde_json::{json, Value};
use sol_quote_sdk::sdk::engine::{ClmmPoolKeys, LiquidityFile, PoolDirectory};
use solana_sdk::pubkey::Pubkey;

pub fn clmm_keys(id: Pubkey, mint_a: Pubkey, mint_b: Pubkey) -> ClmmPoolKeys {
    ClmmPoolKeys {
        id: id.to_string(),
        mint_a: mint_a.to_string(),
        mint_b: mint_b.to_string(),
        mint_decimals_a: 9,
        mint_decimals_b: 6,
        open_time: 0,
        extra: Default::default(),
    }
}

pub fn legacy_pool(id: Pubkey, base: Pubkey, quote: Pubkey) -> Value {
    json!({
        "id": id.to_string(),
        "baseMint": base.to_string(),
        "quoteMint": quote.to_string(),
        "version": 4,
    })
}

pub fn directory(clmm: Vec<ClmmPoolKeys>, official: Vec<Value>) -> PoolDirectory {
    PoolDirectory {
        clmm_pool_keys: Arc::new(clmm),
        liquidity_file: Arc::new(LiquidityFile {
            official,
            un_official: vec![],
        }),
    }
}

mod common;

use std::sync::Arc;

use common::mock_engine::MockEngine;
use sol_quote_sdk::cache::ParsedPoolCache;
use sol_quote_sdk::sdk::engine::SwapEngine;
use solana_sdk::pubkey::Pubkey;

#[tokio::test]
async fn only_missing_pools_are_fetched() {
    let mock = Arc::new(MockEngine::default());
    let engine: Arc<dyn SwapEngine> = mock.clone();
    let cache = ParsedPoolCache::new();

    let a = Pubkey::new_unique();
    let b = Pubkey::new_unique();
    let c = Pubkey::new_unique();

    let first = cache.get_or_fetch(&engine, &[a, b], None).await.unwrap();
    assert_eq!(first.len(), 2);

    let second = cache.get_or_fetch(&engine, &[b, c], None).await.unwrap();
    assert_eq!(second.len(), 2);
    assert!(second.contains_key(&b.to_string()));
    assert!(second.contains_key(&c.to_string()));

    let batches = mock.fetched_pool_batches.lock().clone();
    assert_eq!(batches.len(), 2);
    assert_eq!(batches[0], vec![a, b]);
    assert_eq!(batches[1], vec![c]);
}

#[tokio::test]
async fn fully_cached_requests_skip_the_engine() {
    let mock = Arc::new(MockEngine::default());
    let engine: Arc<dyn SwapEngine> = mock.clone();
    let cache = ParsedPoolCache::new();

    let a = Pubkey::new_unique();
    cache.get_or_fetch(&engine, &[a], None).await.unwrap();
    cache.get_or_fetch(&engine, &[a], None).await.unwrap();
    assert_eq!(mock.fetched_pool_batches.lock().len(), 1);
}

#[tokio::test]
async fn clear_drops_cached_pools() {
    let mock = Arc::new(MockEngine::default());
    let engine: Arc<dyn SwapEngine> = mock.clone();
    let cache = ParsedPoolCache::new();

    let a = Pubkey::new_unique();
    cache.get_or_fetch(&engine, &[a], None).await.unwrap();
    cache.clear();
    cache.get_or_fetch(&engine, &[a], None).await.unwrap();
    assert_eq!(mock.fetched_pool_batches.lock().len(), 2);
}

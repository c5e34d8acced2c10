//! Caching layer: route entries with shared background fetches, API
//! snapshots, and parsed pool state.

pub mod api_cache;
pub mod pool_cache;
pub mod route_cache;

pub use api_cache::ApiSnapshotCache;
pub use pool_cache::ParsedPoolCache;
pub use route_cache::{RouteCacheEntry, SharedFetch, SwapRouteCache};

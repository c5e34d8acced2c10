pub mod pool_api;
pub mod types;

pub use pool_api::{PoolApiClient, PoolApiConfig};
pub use types::AnyResult;

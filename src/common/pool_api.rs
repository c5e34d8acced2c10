//! HTTP client for the pool metadata service.
//!
//! Serves the two JSON blobs the quoting layer snapshots once per
//! process: the CLMM pool-key list and the legacy liquidity pool file.
//! REST only; no transaction building here.

use std::{env, time::Duration};

use anyhow::Result;
use reqwest::{Client, Proxy};
use serde::Deserialize;

use crate::sdk::engine::{ClmmPoolKeys, LiquidityFile};

/// Pool metadata API configuration.
#[derive(Debug, Clone)]
pub struct PoolApiConfig {
    /// Base host, e.g. `https://api.raydium.io`.
    pub base_host: String,
    /// Path of the CLMM pool-key list endpoint.
    pub clmm_pools_path: String,
    /// Path of the legacy liquidity pool JSON file.
    pub liquidity_file_path: String,
    /// Request timeout in milliseconds.
    pub timeout_millis: u64,
}

impl Default for PoolApiConfig {
    fn default() -> Self {
        Self {
            base_host: "https://api.raydium.io".to_string(),
            clmm_pools_path: "/v2/ammV3/ammPools".to_string(),
            liquidity_file_path: "/v2/sdk/liquidity/mainnet.json".to_string(),
            timeout_millis: 10_000,
        }
    }
}

/// Pool metadata HTTP client.
#[derive(Clone)]
pub struct PoolApiClient {
    http: Client,
    pub config: PoolApiConfig,
}

impl PoolApiClient {
    /// Create a new client with the given configuration.
    pub fn new(config: PoolApiConfig) -> Result<Self> {
        let timeout = Duration::from_millis(config.timeout_millis);
        let mut builder = Client::builder()
            .pool_idle_timeout(Duration::from_secs(60))
            .pool_max_idle_per_host(64)
            .tcp_nodelay(true)
            .timeout(timeout)
            .connect_timeout(Duration::from_secs(5));

        // HTTPS_PROXY wins over HTTP_PROXY, read from the process env.
        if let Ok(https_proxy) = env::var("HTTPS_PROXY").or_else(|_| env::var("https_proxy")) {
            builder = builder.proxy(Proxy::https(&https_proxy)?);
        } else if let Ok(http_proxy) = env::var("HTTP_PROXY").or_else(|_| env::var("http_proxy")) {
            builder = builder.proxy(Proxy::http(&http_proxy)?);
        }

        let http = builder.build()?;

        Ok(Self { http, config })
    }

    /// Client against the mainnet metadata service with default timeouts.
    pub fn mainnet_default() -> Result<Self> {
        Self::new(PoolApiConfig::default())
    }

    #[inline]
    fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.config.base_host.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    /// Fetch the full CLMM pool-key list.
    pub async fn fetch_clmm_pool_keys(&self) -> Result<Vec<ClmmPoolKeys>> {
        let url = self.endpoint(&self.config.clmm_pools_path);
        let resp = self.http.get(url).send().await?.error_for_status()?;
        let page = resp.json::<ClmmPoolListResponse>().await?;
        Ok(page.data)
    }

    /// Fetch the legacy liquidity pool JSON file.
    pub async fn fetch_liquidity_file(&self) -> Result<LiquidityFile> {
        let url = self.endpoint(&self.config.liquidity_file_path);
        let resp = self.http.get(url).send().await?.error_for_status()?;
        let file = resp.json::<LiquidityFile>().await?;
        Ok(file)
    }
}

#[derive(Debug, Deserialize)]
struct ClmmPoolListResponse {
    #[serde(default)]
    data: Vec<ClmmPoolKeys>,
}

// Copyright (c) The Starcoin Core Contributors
// SPDX-License-Identifier: Apache-2.0

use crate::types::Network;
use anyhow::Result;
use serde::Deserialize;
use std::env;
use std::time::Duration;

pub const DEFAULT_MAINNET_API_URL: &str = "https://api.mainnet.hiro.so";
pub const DEFAULT_TESTNET_API_URL: &str = "https://api.testnet.hiro.so";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub network: Network,
    pub mainnet_api_url: String,
    pub testnet_api_url: String,
    /// Freshness window for cached balances and transaction pages, in milliseconds.
    pub cache_ttl_ms: u64,
    pub http_timeout_secs: u64,
    pub transaction_limit: u32,
    pub analytics_limit: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            network: Network::Mainnet,
            mainnet_api_url: DEFAULT_MAINNET_API_URL.to_string(),
            testnet_api_url: DEFAULT_TESTNET_API_URL.to_string(),
            cache_ttl_ms: 30_000,
            http_timeout_secs: 15,
            transaction_limit: 20,
            analytics_limit: 1000,
        }
    }
}

fn env_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

impl Config {
    pub fn load() -> Result<Self> {
        dotenv::dotenv().ok();

        let defaults = Config::default();
        let network = match env::var("STACKS_NETWORK") {
            Ok(value) => value.parse()?,
            Err(_) => defaults.network,
        };

        let config = Config {
            network,
            mainnet_api_url: env::var("STACKS_MAINNET_API_URL")
                .unwrap_or_else(|_| DEFAULT_MAINNET_API_URL.to_string()),
            testnet_api_url: env::var("STACKS_TESTNET_API_URL")
                .unwrap_or_else(|_| DEFAULT_TESTNET_API_URL.to_string()),
            cache_ttl_ms: env_or("CACHE_TTL_MS", defaults.cache_ttl_ms),
            http_timeout_secs: env_or("HTTP_TIMEOUT_SECS", defaults.http_timeout_secs),
            transaction_limit: env_or("TRANSACTION_LIMIT", defaults.transaction_limit),
            analytics_limit: env_or("ANALYTICS_LIMIT", defaults.analytics_limit),
        };

        Ok(config)
    }

    /// Both networks served by a local devnet indexer.
    pub fn localhost() -> Self {
        Self {
            mainnet_api_url: "http://localhost:3999".to_string(),
            testnet_api_url: "http://localhost:3999".to_string(),
            ..Self::default()
        }
    }

    pub fn api_base(&self, network: Network) -> &str {
        match network {
            Network::Mainnet => self.mainnet_api_url.trim_end_matches('/'),
            Network::Testnet => self.testnet_api_url.trim_end_matches('/'),
        }
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_millis(self.cache_ttl_ms)
    }

    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs)
    }
}

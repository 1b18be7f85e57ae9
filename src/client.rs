// Copyright (c) The Starcoin Core Contributors
// SPDX-License-Identifier: Apache-2.0

use crate::cache::TtlCache;
use crate::config::Config;
use crate::error::{FetchError, IndexerError};
use crate::indexer::{HttpTransport, IndexerTransport};
use crate::normalizer::normalize;
use crate::raw::{RawBalanceResponse, RawTransactionsPage};
use crate::types::{AccountBalance, Network, Transaction};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, error, info};

type BalanceKey = (String, Network);
type TransactionsKey = (String, Network, u32);

/// Indexer client that memoizes balances and transaction pages.
///
/// Concurrent misses on the same key are not coalesced; each issues its own
/// request and the last one to finish owns the cache slot.
pub struct StacksClient {
    config: Arc<Config>,
    transport: Arc<dyn IndexerTransport>,
    balance_cache: TtlCache<BalanceKey, AccountBalance>,
    transaction_cache: TtlCache<TransactionsKey, Vec<Transaction>>,
}

fn decode<T: DeserializeOwned>(body: Value) -> Result<T, IndexerError> {
    serde_json::from_value(body).map_err(|e| IndexerError::Decode(e.to_string()))
}

impl StacksClient {
    pub fn new(config: Arc<Config>) -> Result<Self, IndexerError> {
        let transport = HttpTransport::new(config.http_timeout())?;
        Ok(Self::with_transport(config, Arc::new(transport)))
    }

    pub fn with_transport(config: Arc<Config>, transport: Arc<dyn IndexerTransport>) -> Self {
        let ttl = config.cache_ttl();
        Self {
            config,
            transport,
            balance_cache: TtlCache::new(ttl),
            transaction_cache: TtlCache::new(ttl),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn api_base(&self, network: Network) -> &str {
        self.config.api_base(network)
    }

    pub async fn fetch_balance(
        &self,
        address: &str,
        network: Network,
    ) -> Result<AccountBalance, FetchError> {
        let key = (address.to_string(), network);
        if let Some(cached) = self.balance_cache.get(&key) {
            info!("Using cached balance for {}", address);
            return Ok(cached);
        }

        let generation = self.balance_cache.generation();
        info!("Fetching balance for {} on {}", address, network);
        let url = format!(
            "{}/extended/v1/address/{}/balances",
            self.api_base(network),
            address
        );

        let balance = self
            .transport
            .get_json(&url)
            .await
            .and_then(decode::<RawBalanceResponse>)
            .map(RawBalanceResponse::into_balance)
            .map_err(|e| {
                error!("Error fetching balance for {}: {}", address, e);
                FetchError::Balance(e)
            })?;

        if !self
            .balance_cache
            .insert_if_current(key, balance.clone(), generation)
        {
            debug!("Balance cache cleared during fetch for {}, not storing", address);
        }
        info!("Successfully fetched balance for {}", address);
        Ok(balance)
    }

    pub async fn fetch_transactions(
        &self,
        address: &str,
        network: Network,
        limit: u32,
    ) -> Result<Vec<Transaction>, FetchError> {
        let key = (address.to_string(), network, limit);
        if let Some(cached) = self.transaction_cache.get(&key) {
            info!("Using cached transactions for {}", address);
            return Ok(cached);
        }

        let generation = self.transaction_cache.generation();
        info!(
            "Fetching transactions for {} on {} (limit {})",
            address, network, limit
        );
        let url = format!(
            "{}/extended/v1/address/{}/transactions?limit={}&order=desc",
            self.api_base(network),
            address,
            limit
        );

        let page = self
            .transport
            .get_json(&url)
            .await
            .and_then(decode::<RawTransactionsPage>)
            .map_err(|e| {
                error!("Error fetching transactions for {}: {}", address, e);
                FetchError::Transactions(e)
            })?;

        let transactions: Vec<Transaction> = page
            .results
            .iter()
            .map(|raw| normalize(raw, address))
            .collect();

        if !self
            .transaction_cache
            .insert_if_current(key, transactions.clone(), generation)
        {
            debug!("Transaction cache cleared during fetch for {}, not storing", address);
        }
        info!(
            "Fetched {} of {} transactions for {}",
            transactions.len(),
            page.total,
            address
        );
        Ok(transactions)
    }

    pub fn clear_balance_cache(&self) {
        self.balance_cache.clear();
        info!("Balance cache cleared");
    }

    pub fn clear_transaction_cache(&self) {
        self.transaction_cache.clear();
        info!("Transaction cache cleared");
    }
}

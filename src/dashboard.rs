// Copyright (c) The Starcoin Core Contributors
// SPDX-License-Identifier: Apache-2.0

use crate::analytics::{aggregate_at, filter_by_range, TimeRange};
use crate::client::StacksClient;
use crate::config::Config;
use crate::contracts::{contract_notes, contract_summary};
use crate::error::FetchError;
use crate::format::format_stx_balance;
use crate::indexer::IndexerTransport;
use crate::notes::NotesStore;
use crate::types::{AccountBalance, ContractSummary, Network, Transaction, WalletAnalytics};
use anyhow::Result;
use chrono::Utc;
use std::sync::Arc;
use tracing::info;

/// Wallet views derived from one indexer client: balance, history,
/// analytics and contract notes.
pub struct Dashboard {
    client: Arc<StacksClient>,
    notes: Arc<NotesStore>,
}

impl Dashboard {
    pub fn new(config: Arc<Config>) -> Result<Self> {
        let client = StacksClient::new(config)?;
        Ok(Self::with_client(Arc::new(client)))
    }

    pub fn with_transport(config: Arc<Config>, transport: Arc<dyn IndexerTransport>) -> Self {
        Self::with_client(Arc::new(StacksClient::with_transport(config, transport)))
    }

    pub fn with_client(client: Arc<StacksClient>) -> Self {
        Self {
            client,
            notes: Arc::new(NotesStore::new()),
        }
    }

    pub fn client(&self) -> &Arc<StacksClient> {
        &self.client
    }

    pub fn notes(&self) -> &Arc<NotesStore> {
        &self.notes
    }

    pub async fn balance(&self, address: &str, network: Network) -> Result<AccountBalance, FetchError> {
        self.client.fetch_balance(address, network).await
    }

    /// STX balance ready for display, e.g. `"1,234.57"`.
    pub async fn formatted_balance(&self, address: &str, network: Network) -> Result<String, FetchError> {
        let balance = self.balance(address, network).await?;
        Ok(format_stx_balance(&balance.stx.balance))
    }

    pub async fn transactions(
        &self,
        address: &str,
        network: Network,
        limit: Option<u32>,
    ) -> Result<Vec<Transaction>, FetchError> {
        let limit = limit.unwrap_or(self.client.config().transaction_limit);
        self.client.fetch_transactions(address, network, limit).await
    }

    /// `None` when nothing falls inside `range`.
    pub async fn analytics(
        &self,
        address: &str,
        network: Network,
        range: TimeRange,
    ) -> Result<Option<WalletAnalytics>, FetchError> {
        let limit = self.client.config().analytics_limit;
        let transactions = self.client.fetch_transactions(address, network, limit).await?;

        let now = Utc::now().timestamp_millis();
        let filtered = filter_by_range(&transactions, range, now);
        if filtered.is_empty() {
            info!("No transactions for {} in range {}", address, range);
            return Ok(None);
        }

        info!(
            "Computing analytics for {} transactions ({})",
            filtered.len(),
            range
        );
        Ok(Some(aggregate_at(&filtered, now)))
    }

    /// Contract view for `address`; also seeds the notes store with memos of
    /// contract transactions not annotated yet.
    pub async fn contracts(
        &self,
        address: &str,
        network: Network,
    ) -> Result<Option<ContractSummary>, FetchError> {
        let transactions = self.transactions(address, network, None).await?;
        self.notes.seed(contract_notes(&transactions));
        Ok(contract_summary(&transactions))
    }

    /// Drops both caches so the next call hits the indexer.
    pub fn refresh(&self) {
        self.client.clear_balance_cache();
        self.client.clear_transaction_cache();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indexer::mock::MockTransport;
    use serde_json::{json, Value};

    const ADDRESS: &str = "SP1234567890abcdefghijklmnopqrstuvwxyz";
    const PEER: &str = "SP0987654321zyxwvutsrqponmlkjihgfedcba";

    fn dashboard() -> (Dashboard, Arc<MockTransport>) {
        let transport = Arc::new(MockTransport::new());
        let dashboard = Dashboard::with_transport(Arc::new(Config::default()), transport.clone());
        (dashboard, transport)
    }

    fn recent_history() -> Value {
        let now_secs = Utc::now().timestamp();
        let day = 24 * 60 * 60;
        json!({
            "total": 4,
            "results": [
                { "tx_id": "0x1", "tx_type": "token_transfer", "tx_status": "success",
                  "block_time": now_secs - 2 * day, "fee_rate": "1000",
                  "sender_address": PEER, "recipient_address": ADDRESS, "amount": "2000000" },
                { "tx_id": "0x2", "tx_type": "token_transfer", "tx_status": "success",
                  "block_time": now_secs - 10 * day, "fee_rate": "1000",
                  "sender_address": ADDRESS, "recipient_address": PEER, "amount": "500000" },
                { "tx_id": "0x3", "tx_type": "smart_contract", "tx_status": "success",
                  "block_time": now_secs - 20 * day, "fee_rate": "3000",
                  "sender_address": ADDRESS, "memo": "notes contract" },
                { "tx_id": "0x4", "tx_type": "token_transfer", "tx_status": "success",
                  "block_time": now_secs - 90 * day, "fee_rate": "1000",
                  "sender_address": ADDRESS, "recipient_address": PEER, "amount": "9000000" }
            ]
        })
    }

    #[tokio::test]
    async fn test_formatted_balance() -> anyhow::Result<()> {
        let (dashboard, transport) = dashboard();
        transport.push_ok(json!({ "stx_balance": "1234567890" }));

        assert_eq!(dashboard.formatted_balance(ADDRESS, Network::Mainnet).await?, "1,234.57");
        Ok(())
    }

    #[tokio::test]
    async fn test_transactions_use_default_limit() -> anyhow::Result<()> {
        let (dashboard, transport) = dashboard();
        transport.push_ok(json!({ "total": 0, "results": [] }));

        dashboard.transactions(ADDRESS, Network::Mainnet, None).await?;
        assert!(transport.requests()[0].ends_with("transactions?limit=20&order=desc"));
        Ok(())
    }

    #[tokio::test]
    async fn test_analytics_by_range() -> anyhow::Result<()> {
        let (dashboard, transport) = dashboard();
        transport.push_ok(recent_history());

        let thirty = dashboard
            .analytics(ADDRESS, Network::Mainnet, TimeRange::ThirtyDays)
            .await?
            .unwrap();
        assert_eq!(thirty.transaction_count, 3);
        assert_eq!(thirty.total_received, "2000000");
        assert_eq!(thirty.total_sent, "500000");
        assert_eq!(thirty.total_fees_spent, "1000");

        let all = dashboard
            .analytics(ADDRESS, Network::Mainnet, TimeRange::All)
            .await?
            .unwrap();
        assert_eq!(all.transaction_count, 4);
        assert_eq!(all.net_balance, "-7500000");
        assert_eq!(all.largest_transaction.id, "0x4");

        // both ranges are served from one cached page
        assert_eq!(transport.request_count(), 1);
        assert!(transport.requests()[0].ends_with("transactions?limit=1000&order=desc"));
        Ok(())
    }

    #[tokio::test]
    async fn test_analytics_empty_range_is_none() -> anyhow::Result<()> {
        let (dashboard, transport) = dashboard();
        transport.push_ok(json!({ "total": 0, "results": [] }));

        let analytics = dashboard
            .analytics(ADDRESS, Network::Mainnet, TimeRange::SevenDays)
            .await?;
        assert!(analytics.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn test_contracts_seed_notes() -> anyhow::Result<()> {
        let (dashboard, transport) = dashboard();
        transport.push_ok(recent_history());

        let summary = dashboard.contracts(ADDRESS, Network::Mainnet).await?.unwrap();
        assert_eq!(summary.transaction_count, 1);
        assert_eq!(summary.contracts[0].id, "0x3");
        assert_eq!(summary.total_fees_spent, "3000");

        let note = dashboard.notes().get_by_id("0x3").unwrap();
        assert_eq!(note.note, "notes contract");
        assert!(dashboard.notes().update_note("0x3", "edited", 1));

        // re-deriving does not clobber the edit
        dashboard.contracts(ADDRESS, Network::Mainnet).await?;
        assert_eq!(dashboard.notes().get_by_id("0x3").unwrap().note, "edited");
        Ok(())
    }

    #[tokio::test]
    async fn test_refresh_clears_both_caches() -> anyhow::Result<()> {
        let (dashboard, transport) = dashboard();
        transport.push_ok(json!({ "stx_balance": "1" }));
        transport.push_ok(json!({ "total": 0, "results": [] }));
        transport.push_ok(json!({ "stx_balance": "2" }));
        transport.push_ok(json!({ "total": 0, "results": [] }));

        dashboard.balance(ADDRESS, Network::Mainnet).await?;
        dashboard.transactions(ADDRESS, Network::Mainnet, None).await?;
        dashboard.refresh();
        let balance = dashboard.balance(ADDRESS, Network::Mainnet).await?;
        dashboard.transactions(ADDRESS, Network::Mainnet, None).await?;

        assert_eq!(balance.stx.balance, "2");
        assert_eq!(transport.request_count(), 4);
        Ok(())
    }
}

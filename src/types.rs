// Copyright (c) The Starcoin Core Contributors
// SPDX-License-Identifier: Apache-2.0

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Network {
    Mainnet,
    Testnet,
}

#[derive(Debug, Error)]
#[error("unsupported network: {0}")]
pub struct UnknownNetwork(pub String);

impl FromStr for Network {
    type Err = UnknownNetwork;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mainnet" => Ok(Network::Mainnet),
            "testnet" => Ok(Network::Testnet),
            other => Err(UnknownNetwork(other.to_string())),
        }
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Network::Mainnet => write!(f, "mainnet"),
            Network::Testnet => write!(f, "testnet"),
        }
    }
}

/// Direction of a transaction relative to the queried address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionDirection {
    Send,
    Receive,
    Contract,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionStatus {
    Success,
    Pending,
    Failed,
}

/// A transaction after normalization. `amount` and `fee` are non-negative
/// integer strings in micro-STX.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: String,
    #[serde(rename = "type")]
    pub direction: TransactionDirection,
    pub amount: String,
    /// Epoch milliseconds.
    pub timestamp: i64,
    pub status: TransactionStatus,
    pub from: String,
    pub to: String,
    pub fee: String,
    pub memo: Option<String>,
    pub block_height: Option<u64>,
    pub tx_type: String,
}

impl Transaction {
    pub fn amount_micro(&self) -> u128 {
        parse_micro(&self.amount)
    }

    pub fn fee_micro(&self) -> u128 {
        parse_micro(&self.fee)
    }
}

pub(crate) fn parse_micro(value: &str) -> u128 {
    value.trim().parse().unwrap_or(0)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StxBalance {
    pub balance: String,
    pub total_sent: String,
    pub total_received: String,
    pub total_fees_spent: String,
    pub lock_height: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FungibleTokenBalance {
    pub balance: String,
    pub total_sent: String,
    pub total_received: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NonFungibleTokenBalance {
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountBalance {
    pub stx: StxBalance,
    pub fungible_tokens: HashMap<String, FungibleTokenBalance>,
    pub non_fungible_tokens: HashMap<String, NonFungibleTokenBalance>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LargestTransaction {
    pub amount: String,
    pub timestamp: i64,
    pub id: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WindowStats {
    pub sent: usize,
    pub received: usize,
    pub net_change: String,
    pub transaction_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WalletAnalytics {
    pub total_sent: String,
    pub total_received: String,
    /// `total_received - total_sent`, may be negative.
    pub net_balance: String,
    pub transaction_count: usize,
    pub total_fees_spent: String,
    pub largest_transaction: LargestTransaction,
    pub seven_day_stats: WindowStats,
    pub thirty_day_stats: WindowStats,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContractNote {
    pub id: String,
    pub note: String,
    pub owner: String,
    pub timestamp: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClarityContract {
    pub id: String,
    pub principal: String,
    pub code: String,
    pub description: String,
    pub balance: String,
    pub fee: String,
    pub owner: String,
    pub block_height: u64,
    pub timestamp: i64,
    pub status: TransactionStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContractSummary {
    pub contracts: Vec<ClarityContract>,
    pub transaction_count: usize,
    pub total_fees_spent: String,
    pub largest_contract: LargestTransaction,
}

// Copyright (c) The Starcoin Core Contributors
// SPDX-License-Identifier: Apache-2.0

use crate::types::{
    LargestTransaction, Transaction, TransactionDirection, WalletAnalytics, WindowStats,
};
use chrono::{Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

pub fn seven_days() -> Duration {
    Duration::days(7)
}

pub fn thirty_days() -> Duration {
    Duration::days(30)
}

/// Trailing window used to narrow the transaction set before aggregation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TimeRange {
    #[serde(rename = "7d")]
    SevenDays,
    #[default]
    #[serde(rename = "30d")]
    ThirtyDays,
    #[serde(rename = "all")]
    All,
}

#[derive(Debug, Error)]
#[error("unsupported time range: {0} (expected 7d, 30d or all)")]
pub struct UnknownTimeRange(pub String);

impl FromStr for TimeRange {
    type Err = UnknownTimeRange;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "7d" => Ok(TimeRange::SevenDays),
            "30d" => Ok(TimeRange::ThirtyDays),
            "all" => Ok(TimeRange::All),
            other => Err(UnknownTimeRange(other.to_string())),
        }
    }
}

impl fmt::Display for TimeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            TimeRange::SevenDays => "7d",
            TimeRange::ThirtyDays => "30d",
            TimeRange::All => "all",
        };
        f.write_str(label)
    }
}

impl TimeRange {
    pub fn window(&self) -> Option<Duration> {
        match self {
            TimeRange::SevenDays => Some(seven_days()),
            TimeRange::ThirtyDays => Some(thirty_days()),
            TimeRange::All => None,
        }
    }
}

pub fn filter_by_range(transactions: &[Transaction], range: TimeRange, now_ms: i64) -> Vec<Transaction> {
    match range.window() {
        Some(window) => in_window(transactions, window, now_ms).cloned().collect(),
        None => transactions.to_vec(),
    }
}

fn in_window(
    transactions: &[Transaction],
    window: Duration,
    now_ms: i64,
) -> impl Iterator<Item = &Transaction> {
    let cutoff = now_ms - window.num_milliseconds();
    transactions.iter().filter(move |tx| tx.timestamp >= cutoff)
}

/// `received - sent`, clamped to the `i128` range.
fn net_change(received: u128, sent: u128) -> i128 {
    if received >= sent {
        i128::try_from(received - sent).unwrap_or(i128::MAX)
    } else {
        i128::try_from(sent - received).map_or(i128::MIN, |d| -d)
    }
}

fn window_stats(transactions: &[Transaction], window: Duration, now_ms: i64) -> WindowStats {
    let mut stats = WindowStats::default();
    let mut sent_amount: u128 = 0;
    let mut received_amount: u128 = 0;

    for tx in in_window(transactions, window, now_ms) {
        stats.transaction_count += 1;
        match tx.direction {
            TransactionDirection::Send => {
                stats.sent += 1;
                sent_amount = sent_amount.saturating_add(tx.amount_micro());
            }
            TransactionDirection::Receive => {
                stats.received += 1;
                received_amount = received_amount.saturating_add(tx.amount_micro());
            }
            TransactionDirection::Contract | TransactionDirection::Other => {}
        }
    }

    stats.net_change = net_change(received_amount, sent_amount).to_string();
    stats
}

pub fn aggregate(transactions: &[Transaction]) -> WalletAnalytics {
    aggregate_at(transactions, Utc::now().timestamp_millis())
}

/// Summary statistics over `transactions`, with windows ending at `now_ms`.
///
/// Fees are charged to the wallet only for send-direction transactions.
/// Totals saturate at `u128::MAX` instead of overflowing.
pub fn aggregate_at(transactions: &[Transaction], now_ms: i64) -> WalletAnalytics {
    let mut total_sent: u128 = 0;
    let mut total_received: u128 = 0;
    let mut total_fees: u128 = 0;
    let mut largest: Option<&Transaction> = None;

    for tx in transactions {
        let amount = tx.amount_micro();
        match tx.direction {
            TransactionDirection::Send => {
                total_sent = total_sent.saturating_add(amount);
                total_fees = total_fees.saturating_add(tx.fee_micro());
            }
            TransactionDirection::Receive => total_received = total_received.saturating_add(amount),
            TransactionDirection::Contract | TransactionDirection::Other => {}
        }

        // strict comparison keeps the first of equal amounts
        if largest.map_or(true, |current| amount > current.amount_micro()) {
            largest = Some(tx);
        }
    }

    let largest_transaction = match largest {
        Some(tx) => LargestTransaction {
            amount: tx.amount_micro().to_string(),
            timestamp: tx.timestamp,
            id: tx.id.clone(),
        },
        None => LargestTransaction {
            amount: "0".to_string(),
            timestamp: now_ms,
            id: String::new(),
        },
    };

    let net_balance = net_change(total_received, total_sent);

    WalletAnalytics {
        total_sent: total_sent.to_string(),
        total_received: total_received.to_string(),
        net_balance: net_balance.to_string(),
        transaction_count: transactions.len(),
        total_fees_spent: total_fees.to_string(),
        largest_transaction,
        seven_day_stats: window_stats(transactions, seven_days(), now_ms),
        thirty_day_stats: window_stats(transactions, thirty_days(), now_ms),
    }
}

pub fn percentage_change(old_value: f64, new_value: f64) -> f64 {
    if old_value == 0.0 {
        return if new_value > 0.0 { 100.0 } else { 0.0 };
    }
    (new_value - old_value) / old_value.abs() * 100.0
}

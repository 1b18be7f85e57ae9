// Copyright (c) The Starcoin Core Contributors
// SPDX-License-Identifier: Apache-2.0

//! Wire shapes returned by the indexer API.
//!
//! Every field is optional here; defaults are applied when converting into
//! the domain records so a partial response never fails to decode.

use crate::types::{AccountBalance, FungibleTokenBalance, NonFungibleTokenBalance, StxBalance};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Numeric values arrive either as JSON strings or as JSON numbers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NumericField {
    Text(String),
    Number(serde_json::Number),
}

impl NumericField {
    /// Non-negative integer rendering, `None` for anything else.
    pub fn to_micro(&self) -> Option<String> {
        match self {
            NumericField::Text(s) => s.trim().parse::<u128>().ok().map(|n| n.to_string()),
            NumericField::Number(n) => n.as_u64().map(|n| n.to_string()),
        }
    }

    pub fn as_u64(&self) -> Option<u64> {
        match self {
            NumericField::Text(s) => s.trim().parse().ok(),
            NumericField::Number(n) => n.as_u64(),
        }
    }
}

pub(crate) fn micro_or_zero(field: Option<&NumericField>) -> String {
    field
        .and_then(NumericField::to_micro)
        .unwrap_or_else(|| "0".to_string())
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawStx {
    pub balance: Option<NumericField>,
    pub total_sent: Option<NumericField>,
    pub total_received: Option<NumericField>,
    pub total_fees_spent: Option<NumericField>,
    pub lock_height: Option<NumericField>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawFungibleToken {
    pub balance: Option<NumericField>,
    pub total_sent: Option<NumericField>,
    pub total_received: Option<NumericField>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawNonFungibleToken {
    pub count: Option<NumericField>,
}

/// `GET /extended/v1/address/{address}/balances`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawBalanceResponse {
    pub stx_balance: Option<NumericField>,
    pub total_sent: Option<NumericField>,
    pub total_received: Option<NumericField>,
    pub total_fees_spent: Option<NumericField>,
    pub lock_height: Option<NumericField>,
    /// Newer indexer releases nest the STX figures under `stx`.
    pub stx: Option<RawStx>,
    pub fungible_tokens: Option<HashMap<String, RawFungibleToken>>,
    pub non_fungible_tokens: Option<HashMap<String, RawNonFungibleToken>>,
}

impl RawBalanceResponse {
    pub fn into_balance(self) -> AccountBalance {
        let nested = self.stx.unwrap_or_default();
        let pick = |top: Option<NumericField>, inner: Option<NumericField>| {
            micro_or_zero(top.as_ref().or(inner.as_ref()))
        };

        let lock_height = self
            .lock_height
            .or(nested.lock_height)
            .and_then(|h| h.as_u64())
            .filter(|h| *h > 0);

        let stx = StxBalance {
            balance: pick(self.stx_balance, nested.balance),
            total_sent: pick(self.total_sent, nested.total_sent),
            total_received: pick(self.total_received, nested.total_received),
            total_fees_spent: pick(self.total_fees_spent, nested.total_fees_spent),
            lock_height,
        };

        let fungible_tokens = self
            .fungible_tokens
            .unwrap_or_default()
            .into_iter()
            .map(|(asset, token)| {
                (
                    asset,
                    FungibleTokenBalance {
                        balance: micro_or_zero(token.balance.as_ref()),
                        total_sent: micro_or_zero(token.total_sent.as_ref()),
                        total_received: micro_or_zero(token.total_received.as_ref()),
                    },
                )
            })
            .collect();

        let non_fungible_tokens = self
            .non_fungible_tokens
            .unwrap_or_default()
            .into_iter()
            .map(|(asset, nft)| {
                let count = nft.count.and_then(|c| c.as_u64()).unwrap_or(0);
                (asset, NonFungibleTokenBalance { count })
            })
            .collect();

        AccountBalance {
            stx,
            fungible_tokens,
            non_fungible_tokens,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawOperation {
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub address: Option<String>,
    pub amount: Option<NumericField>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawTokenTransfer {
    pub recipient_address: Option<String>,
    pub amount: Option<NumericField>,
    pub memo: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawTransaction {
    #[serde(default)]
    pub tx_id: String,
    #[serde(default)]
    pub tx_type: String,
    pub tx_status: Option<String>,
    pub block_height: Option<u64>,
    /// Seconds since the epoch.
    pub block_time: Option<i64>,
    pub fee_rate: Option<NumericField>,
    #[serde(default)]
    pub sender_address: String,
    pub recipient_address: Option<String>,
    pub amount: Option<NumericField>,
    pub memo: Option<String>,
    pub operations: Option<Vec<RawOperation>>,
    pub token_transfer: Option<RawTokenTransfer>,
}

/// `GET /extended/v1/address/{address}/transactions`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawTransactionsPage {
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub results: Vec<RawTransaction>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_balance_defaults_missing_fields() {
        let raw: RawBalanceResponse =
            serde_json::from_value(json!({ "stx_balance": "1000000" })).unwrap();
        let balance = raw.into_balance();

        assert_eq!(balance.stx.balance, "1000000");
        assert_eq!(balance.stx.total_sent, "0");
        assert_eq!(balance.stx.total_received, "0");
        assert_eq!(balance.stx.total_fees_spent, "0");
        assert_eq!(balance.stx.lock_height, None);
        assert!(balance.fungible_tokens.is_empty());
        assert!(balance.non_fungible_tokens.is_empty());
    }

    #[test]
    fn test_balance_tolerates_nulls_numbers_and_nesting() {
        let raw: RawBalanceResponse = serde_json::from_value(json!({
            "stx": { "balance": 42, "total_sent": "7", "lock_height": 0 },
            "total_received": null,
            "fungible_tokens": {
                "SP3K8BC0PPEVCV7NZ6QSRWPQ2JE9E5B6N3PA0KBR9.token::alex": { "balance": "12" }
            },
            "non_fungible_tokens": { "SP2X.nft::punk": { "count": "3" } }
        }))
        .unwrap();
        let balance = raw.into_balance();

        assert_eq!(balance.stx.balance, "42");
        assert_eq!(balance.stx.total_sent, "7");
        assert_eq!(balance.stx.total_received, "0");
        assert_eq!(balance.stx.lock_height, None);

        let token = &balance.fungible_tokens["SP3K8BC0PPEVCV7NZ6QSRWPQ2JE9E5B6N3PA0KBR9.token::alex"];
        assert_eq!(token.balance, "12");
        assert_eq!(token.total_sent, "0");
        assert_eq!(balance.non_fungible_tokens["SP2X.nft::punk"].count, 3);
    }

    #[test]
    fn test_non_numeric_amount_becomes_zero() {
        assert_eq!(micro_or_zero(Some(&NumericField::Text("abc".into()))), "0");
        assert_eq!(micro_or_zero(Some(&NumericField::Text("-5".into()))), "0");
        assert_eq!(micro_or_zero(None), "0");
    }

    #[test]
    fn test_transactions_page_defaults() {
        let page: RawTransactionsPage = serde_json::from_value(json!({})).unwrap();
        assert_eq!(page.total, 0);
        assert!(page.results.is_empty());
    }
}

// Copyright (c) The Starcoin Core Contributors
// SPDX-License-Identifier: Apache-2.0

use crate::raw::{micro_or_zero, RawTransaction};
use crate::types::{Transaction, TransactionDirection, TransactionStatus};
use chrono::Utc;
use tracing::debug;

const TOKEN_TRANSFER: &str = "token_transfer";
const SMART_CONTRACT: &str = "smart_contract";
const CONTRACT_CALL: &str = "contract_call";
const STX_TRANSFER_OPERATION: &str = "stx_transfer";

pub fn resolve_direction(raw: &RawTransaction, query_address: &str) -> TransactionDirection {
    match raw.tx_type.as_str() {
        TOKEN_TRANSFER if raw.sender_address == query_address => TransactionDirection::Send,
        TOKEN_TRANSFER => TransactionDirection::Receive,
        SMART_CONTRACT | CONTRACT_CALL => TransactionDirection::Contract,
        _ => TransactionDirection::Other,
    }
}

/// Anything other than the three known states is treated as a failure.
pub fn map_status(raw_status: Option<&str>) -> TransactionStatus {
    match raw_status {
        Some("success") => TransactionStatus::Success,
        Some("pending") => TransactionStatus::Pending,
        Some("failed") => TransactionStatus::Failed,
        other => {
            if let Some(status) = other {
                debug!("map_status | unrecognized status {:?}, treating as failed", status);
            }
            TransactionStatus::Failed
        }
    }
}

/// Top-level amount first, then the nested transfer payload, then the first
/// STX transfer operation.
pub fn extract_amount(raw: &RawTransaction) -> String {
    if let Some(amount) = raw.amount.as_ref() {
        return micro_or_zero(Some(amount));
    }

    if let Some(amount) = raw.token_transfer.as_ref().and_then(|t| t.amount.as_ref()) {
        return micro_or_zero(Some(amount));
    }

    let operation_amount = raw
        .operations
        .as_deref()
        .unwrap_or_default()
        .iter()
        .find(|op| op.kind.as_deref() == Some(STX_TRANSFER_OPERATION))
        .and_then(|op| op.amount.as_ref());

    micro_or_zero(operation_amount)
}

pub fn normalize(raw: &RawTransaction, query_address: &str) -> Transaction {
    normalize_at(raw, query_address, Utc::now().timestamp_millis())
}

/// Same as [`normalize`], with `now_ms` used for transactions not yet in a block.
pub fn normalize_at(raw: &RawTransaction, query_address: &str, now_ms: i64) -> Transaction {
    let transfer = raw.token_transfer.as_ref();

    let recipient = raw
        .recipient_address
        .clone()
        .or_else(|| transfer.and_then(|t| t.recipient_address.clone()))
        .unwrap_or_default();

    let memo = raw
        .memo
        .clone()
        .or_else(|| transfer.and_then(|t| t.memo.clone()));

    let timestamp = raw
        .block_time
        .map(|secs| secs.saturating_mul(1000))
        .unwrap_or(now_ms);

    Transaction {
        id: raw.tx_id.clone(),
        direction: resolve_direction(raw, query_address),
        amount: extract_amount(raw),
        timestamp,
        status: map_status(raw.tx_status.as_deref()),
        from: raw.sender_address.clone(),
        to: recipient,
        fee: micro_or_zero(raw.fee_rate.as_ref()),
        memo,
        block_height: raw.block_height,
        tx_type: raw.tx_type.clone(),
    }
}

// Copyright (c) The Starcoin Core Contributors
// SPDX-License-Identifier: Apache-2.0

use crate::types::{
    ClarityContract, ContractNote, ContractSummary, LargestTransaction, Transaction,
    TransactionDirection,
};
use std::collections::HashMap;

fn contract_transactions(transactions: &[Transaction]) -> impl Iterator<Item = &Transaction> {
    transactions
        .iter()
        .filter(|tx| tx.direction == TransactionDirection::Contract)
}

/// One note per contract transaction, seeded from its memo.
pub fn contract_notes(transactions: &[Transaction]) -> Vec<ContractNote> {
    contract_transactions(transactions)
        .map(|tx| ContractNote {
            id: tx.id.clone(),
            note: tx.memo.clone().unwrap_or_default(),
            owner: tx.from.clone(),
            timestamp: tx.timestamp,
        })
        .collect()
}

/// Groups contract transactions by id in first-seen order. A repeated id keeps
/// its identity fields from the first sighting while the later record's
/// balance, status, block height and timestamp replace the earlier ones.
pub fn group_contracts(transactions: &[Transaction]) -> Vec<ClarityContract> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut contracts: Vec<ClarityContract> = Vec::new();

    for tx in contract_transactions(transactions) {
        if let Some(&slot) = index.get(tx.id.as_str()) {
            let existing = &mut contracts[slot];
            existing.balance = tx.amount_micro().to_string();
            existing.status = tx.status;
            existing.block_height = tx.block_height.unwrap_or(0);
            existing.timestamp = tx.timestamp;
            continue;
        }

        index.insert(tx.id.as_str(), contracts.len());
        contracts.push(ClarityContract {
            id: tx.id.clone(),
            principal: tx.from.clone(),
            code: if tx.tx_type.is_empty() {
                "contract".to_string()
            } else {
                tx.tx_type.clone()
            },
            description: tx
                .memo
                .clone()
                .filter(|memo| !memo.is_empty())
                .unwrap_or_else(|| "Smart contract deployment".to_string()),
            balance: tx.amount_micro().to_string(),
            fee: tx.fee_micro().to_string(),
            owner: tx.from.clone(),
            block_height: tx.block_height.unwrap_or(0),
            timestamp: tx.timestamp,
            status: tx.status,
        });
    }

    contracts
}

pub fn contract_summary(transactions: &[Transaction]) -> Option<ContractSummary> {
    let transaction_count = contract_transactions(transactions).count();
    if transaction_count == 0 {
        return None;
    }

    let total_fees: u128 = contract_transactions(transactions)
        .map(Transaction::fee_micro)
        .sum();

    let mut contracts = group_contracts(transactions);

    let mut largest: Option<&ClarityContract> = None;
    for contract in &contracts {
        let balance: u128 = contract.balance.parse().unwrap_or(0);
        let current = largest.map(|c| c.balance.parse::<u128>().unwrap_or(0));
        if current.map_or(true, |current| balance > current) {
            largest = Some(contract);
        }
    }
    let largest_contract = match largest {
        Some(contract) => LargestTransaction {
            amount: contract.balance.clone(),
            timestamp: contract.timestamp,
            id: contract.id.clone(),
        },
        None => return None,
    };

    // sort_by_key is stable, equal balances keep first-seen order
    contracts.sort_by_key(|c| std::cmp::Reverse(c.balance.parse::<u128>().unwrap_or(0)));

    Some(ContractSummary {
        contracts,
        transaction_count,
        total_fees_spent: total_fees.to_string(),
        largest_contract,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TransactionStatus;

    const OWNER: &str = "SP1234567890abcdefghijklmnopqrstuvwxyz";

    fn contract_tx(id: &str, amount: &str, timestamp: i64, memo: Option<&str>) -> Transaction {
        Transaction {
            id: id.to_string(),
            direction: TransactionDirection::Contract,
            amount: amount.to_string(),
            timestamp,
            status: TransactionStatus::Success,
            from: OWNER.to_string(),
            to: String::new(),
            fee: "1000".to_string(),
            memo: memo.map(str::to_string),
            block_height: Some(1000),
            tx_type: "smart_contract".to_string(),
        }
    }

    fn transfer(id: &str) -> Transaction {
        Transaction {
            direction: TransactionDirection::Send,
            tx_type: "token_transfer".to_string(),
            ..contract_tx(id, "50", 0, None)
        }
    }

    #[test]
    fn test_contract_notes_from_memos() {
        let txs = vec![
            contract_tx("0x1234567890abcdef", "1000000", 1, Some("Contract deployment")),
            transfer("0xfeed"),
            contract_tx("0x0987654321fedcba", "2000000", 2, None),
        ];
        let notes = contract_notes(&txs);

        assert_eq!(notes.len(), 2);
        assert_eq!(notes[0].id, "0x1234567890abcdef");
        assert_eq!(notes[0].note, "Contract deployment");
        assert_eq!(notes[0].owner, OWNER);
        assert_eq!(notes[1].note, "");
    }

    #[test]
    fn test_contract_notes_empty_without_contracts() {
        assert!(contract_notes(&[transfer("0x1")]).is_empty());
    }

    #[test]
    fn test_group_contracts_last_write_wins() {
        let mut later = contract_tx("0xabc", "700", 20, Some("ignored description"));
        later.status = TransactionStatus::Failed;
        later.block_height = None;

        let txs = vec![
            contract_tx("0xabc", "100", 10, Some("first")),
            contract_tx("0xdef", "5", 15, None),
            later,
        ];
        let contracts = group_contracts(&txs);

        assert_eq!(contracts.len(), 2);
        assert_eq!(contracts[0].id, "0xabc");
        assert_eq!(contracts[0].balance, "700");
        assert_eq!(contracts[0].status, TransactionStatus::Failed);
        assert_eq!(contracts[0].block_height, 0);
        assert_eq!(contracts[0].timestamp, 20);
        assert_eq!(contracts[0].description, "first");
        assert_eq!(contracts[1].description, "Smart contract deployment");
        assert_eq!(contracts[1].code, "smart_contract");
    }

    #[test]
    fn test_contract_summary() {
        let txs = vec![
            contract_tx("0x1", "1000000", 1, None),
            contract_tx("0x2", "2000000", 2, None),
            contract_tx("0x3", "2000000", 3, None),
            transfer("0x4"),
        ];
        let summary = contract_summary(&txs).unwrap();

        assert_eq!(summary.transaction_count, 3);
        assert_eq!(summary.total_fees_spent, "3000");
        assert_eq!(summary.largest_contract.id, "0x2");
        let order: Vec<_> = summary.contracts.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(order, vec!["0x2", "0x3", "0x1"]);
    }

    #[test]
    fn test_contract_summary_none_without_contracts() {
        assert!(contract_summary(&[transfer("0x1")]).is_none());
        assert!(contract_summary(&[]).is_none());
    }
}

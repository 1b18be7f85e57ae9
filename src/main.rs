// Copyright (c) The Starcoin Core Contributors
// SPDX-License-Identifier: Apache-2.0

use anyhow::Result;
use chrono::Utc;
use clap::{Parser, Subcommand};
use serde::Serialize;
use stacks_scope::analytics::TimeRange;
use stacks_scope::config::Config;
use stacks_scope::format::{format_relative_time, format_stx_amount, format_stx_balance};
use stacks_scope::types::{Network, TransactionStatus, WindowStats};
use stacks_scope::Dashboard;
use std::sync::Arc;
use tracing::{info, Level};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Log level
    #[arg(short, long, default_value = "info")]
    log_level: Level,

    /// Network to query, defaults to STACKS_NETWORK
    #[arg(short, long, value_enum, global = true)]
    network: Option<Network>,

    /// Print raw JSON instead of a summary
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// STX balance and token holdings
    Balance { address: String },
    /// Recent transaction history
    Transactions {
        address: String,
        /// Page size, defaults to TRANSACTION_LIMIT
        #[arg(long)]
        limit: Option<u32>,
    },
    /// Totals, largest transaction and 7/30 day stats
    Analytics {
        address: String,
        /// 7d, 30d or all
        #[arg(short, long, default_value_t = TimeRange::ThirtyDays)]
        range: TimeRange,
    },
    /// Contract deployments and calls with their notes
    Contracts { address: String },
}

fn render_json<T: Serialize>(value: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", render_json(value)?);
    Ok(())
}

fn print_window(label: &str, stats: &WindowStats) {
    println!(
        "{:<8} {} txs, {} sent, {} received, net {} STX",
        label,
        stats.transaction_count,
        stats.sent,
        stats.received,
        format_stx_balance(&stats.net_change)
    );
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_max_level(args.log_level)
        .with_writer(std::io::stderr)
        .init();

    let config = Arc::new(Config::load()?);
    let network = args.network.unwrap_or(config.network);
    info!("Using {} indexer at {}", network, config.api_base(network));

    let dashboard = Dashboard::new(config.clone())?;

    match args.command {
        Command::Balance { address } => {
            let balance = dashboard.balance(&address, network).await?;
            if args.json {
                return print_json(&balance);
            }
            println!("Balance:   {} STX", format_stx_balance(&balance.stx.balance));
            println!("Sent:      {} STX", format_stx_balance(&balance.stx.total_sent));
            println!("Received:  {} STX", format_stx_balance(&balance.stx.total_received));
            println!("Fees:      {} STX", format_stx_balance(&balance.stx.total_fees_spent));
            if let Some(height) = balance.stx.lock_height {
                println!("Locked at: block {}", height);
            }
            for (asset, token) in &balance.fungible_tokens {
                println!("  {} {}", token.balance, asset);
            }
            for (asset, nft) in &balance.non_fungible_tokens {
                println!("  {} x {}", nft.count, asset);
            }
        }
        Command::Transactions { address, limit } => {
            let transactions = dashboard.transactions(&address, network, limit).await?;
            if args.json {
                return print_json(&transactions);
            }
            if transactions.is_empty() {
                println!("No transactions found for {}", address);
                return Ok(());
            }
            let now = Utc::now().timestamp_millis();
            for tx in &transactions {
                let status = match tx.status {
                    TransactionStatus::Success => "ok",
                    TransactionStatus::Pending => "pending",
                    TransactionStatus::Failed => "failed",
                };
                println!(
                    "{:<12} {:<8} {:>18} {:<8} {}",
                    format_relative_time(tx.timestamp, now),
                    format!("{:?}", tx.direction).to_lowercase(),
                    format_stx_amount(&tx.amount),
                    status,
                    tx.id
                );
            }
        }
        Command::Analytics { address, range } => {
            // balance and history are independent requests
            let (balance, analytics) = futures::try_join!(
                dashboard.formatted_balance(&address, network),
                dashboard.analytics(&address, network, range)
            )?;
            if args.json {
                return print_json(&analytics);
            }
            let Some(analytics) = analytics else {
                println!("No transactions for {} in range {}", address, range);
                return Ok(());
            };
            println!("Balance:      {} STX", balance);
            println!("Transactions: {}", analytics.transaction_count);
            println!("Sent:         {} STX", format_stx_balance(&analytics.total_sent));
            println!("Received:     {} STX", format_stx_balance(&analytics.total_received));
            println!("Net:          {} STX", format_stx_balance(&analytics.net_balance));
            println!("Fees:         {} STX", format_stx_balance(&analytics.total_fees_spent));
            println!(
                "Largest:      {} ({})",
                format_stx_amount(&analytics.largest_transaction.amount),
                analytics.largest_transaction.id
            );
            print_window("7 days", &analytics.seven_day_stats);
            print_window("30 days", &analytics.thirty_day_stats);
        }
        Command::Contracts { address } => {
            let summary = dashboard.contracts(&address, network).await?;
            if args.json {
                return print_json(&summary);
            }
            let Some(summary) = summary else {
                println!("No contract transactions for {}", address);
                return Ok(());
            };
            println!(
                "{} contract transactions, {} STX in fees",
                summary.transaction_count,
                format_stx_balance(&summary.total_fees_spent)
            );
            for contract in &summary.contracts {
                let note = dashboard
                    .notes()
                    .get_by_id(&contract.id)
                    .map(|n| n.note)
                    .unwrap_or_default();
                println!(
                    "{} {:>16} {:?} {}",
                    contract.id,
                    format_stx_amount(&contract.balance),
                    contract.status,
                    note
                );
            }
        }
    }

    Ok(())
}

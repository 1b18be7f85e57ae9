// Copyright (c) The Starcoin Core Contributors
// SPDX-License-Identifier: Apache-2.0

//! Display helpers for micro-STX amounts (1 STX = 1,000,000 micro-STX).

pub const MICRO_PER_STX: u128 = 1_000_000;

/// Splits a signed integer string into sign and magnitude; garbage is zero.
fn parse_signed(value: &str) -> (bool, u128) {
    let value = value.trim();
    match value.strip_prefix('-') {
        Some(rest) => {
            let magnitude = rest.parse().unwrap_or(0);
            (magnitude > 0, magnitude)
        }
        None => (false, value.parse().unwrap_or(0)),
    }
}

/// Rounds `micro` half-up to `decimals` fractional STX digits and returns
/// `(whole, fraction)`.
fn round_to(micro: u128, decimals: u32) -> (u128, u128) {
    let unit = 10u128.pow(6 - decimals);
    let scaled = micro.saturating_add(unit / 2) / unit;
    let base = 10u128.pow(decimals);
    (scaled / base, scaled % base)
}

fn group_thousands(value: u128) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

/// Balance rendering used on cards and analytics panels.
///
/// ```text
/// 0            -> "0"
/// < 0.001 STX  -> "<0.001"
/// < 1 STX      -> three decimals
/// < 1000 STX   -> two decimals
/// otherwise    -> grouped, at most two decimals ("1,000", "1,234.57")
/// ```
pub fn format_stx_balance(micro_stx: &str) -> String {
    let (negative, micro) = parse_signed(micro_stx);
    if micro == 0 {
        return "0".to_string();
    }

    let body = if micro < 1_000 {
        "<0.001".to_string()
    } else if micro < MICRO_PER_STX {
        let (whole, fraction) = round_to(micro, 3);
        format!("{}.{:03}", whole, fraction)
    } else if micro < 1_000 * MICRO_PER_STX {
        let (whole, fraction) = round_to(micro, 2);
        format!("{}.{:02}", whole, fraction)
    } else {
        let (whole, fraction) = round_to(micro, 2);
        match fraction {
            0 => group_thousands(whole),
            f if f % 10 == 0 => format!("{}.{}", group_thousands(whole), f / 10),
            f => format!("{}.{:02}", group_thousands(whole), f),
        }
    };

    if negative {
        format!("-{}", body)
    } else {
        body
    }
}

/// Amount rendering used in transaction lists: grouped, exactly two decimals.
pub fn format_stx_amount(micro_stx: &str) -> String {
    let (negative, micro) = parse_signed(micro_stx);
    if micro == 0 {
        return "0 STX".to_string();
    }
    let (whole, fraction) = round_to(micro, 2);
    let sign = if negative { "-" } else { "" };
    format!("{}{}.{:02} STX", sign, group_thousands(whole), fraction)
}

pub fn format_percentage_change(percentage: f64) -> String {
    if percentage == 0.0 {
        return "0%".to_string();
    }
    let sign = if percentage > 0.0 { "+" } else { "-" };
    format!("{}{:.1}%", sign, percentage.abs())
}

pub fn format_relative_time(timestamp_ms: i64, now_ms: i64) -> String {
    let diff = now_ms.saturating_sub(timestamp_ms).max(0);
    let minutes = diff / (1000 * 60);
    let hours = diff / (1000 * 60 * 60);
    let days = diff / (1000 * 60 * 60 * 24);

    if days > 0 {
        if days == 1 {
            "Yesterday".to_string()
        } else {
            format!("{} days ago", days)
        }
    } else if hours > 0 {
        format!("{}h ago", hours)
    } else if minutes > 0 {
        format!("{}m ago", minutes)
    } else {
        "Just now".to_string()
    }
}

// Copyright (c) The Starcoin Core Contributors
// SPDX-License-Identifier: Apache-2.0

use thiserror::Error;

/// Failure talking to the indexer API.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum IndexerError {
    #[error("API request failed: {status} {reason}")]
    Status { status: u16, reason: String },

    /// Connection refused, DNS failure, timeout or an unreadable body.
    #[error("{0}")]
    Transport(String),

    #[error("invalid response body: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for IndexerError {
    fn from(err: reqwest::Error) -> Self {
        IndexerError::Transport(err.to_string())
    }
}

#[derive(Debug, Clone, Error, PartialEq)]
pub enum FetchError {
    #[error("Failed to fetch balance: {0}")]
    Balance(#[source] IndexerError),

    #[error("Failed to fetch transactions: {0}")]
    Transactions(#[source] IndexerError),
}

impl FetchError {
    pub fn cause(&self) -> &IndexerError {
        match self {
            FetchError::Balance(e) | FetchError::Transactions(e) => e,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_error_messages() {
        let status = IndexerError::Status {
            status: 404,
            reason: "Not Found".to_string(),
        };
        assert_eq!(
            FetchError::Balance(status.clone()).to_string(),
            "Failed to fetch balance: API request failed: 404 Not Found"
        );

        let network = FetchError::Transactions(IndexerError::Transport("Network error".into()));
        assert_eq!(
            network.to_string(),
            "Failed to fetch transactions: Network error"
        );
        assert_eq!(network.cause(), &IndexerError::Transport("Network error".into()));
    }
}

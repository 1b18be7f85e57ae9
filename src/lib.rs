pub mod analytics;
pub mod cache;
pub mod client;
pub mod config;
pub mod contracts;
pub mod dashboard;
pub mod error;
pub mod format;
pub mod indexer;
pub mod normalizer;
pub mod notes;
pub mod raw;
pub mod types;

pub use client::StacksClient;
pub use dashboard::Dashboard;
pub use error::{FetchError, IndexerError};

//! HypIQ Markets: prediction markets display core
//!
//! This is the root crate that provides benchmark and integration-test access
//! to the workspace crates. For actual functionality, use them directly:
//!
//! - `market-core`: Market types, category styles, deterministic chart series,
//!   display formatting, title classification, mock catalog, configuration
//! - `wallet-session`: Wallet connection, mock betting and persisted state
//! - `market-snapshot`: CLI that prints the dashboard as JSON

pub use market_core as core;
pub use wallet_session as session;

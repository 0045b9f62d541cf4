//! Wallet Session
//!
//! Wallet connection through an identity provider, mock bet placement and
//! balance bookkeeping, persisted to a key-value store after every change.

pub mod identity;
pub mod session;
pub mod storage;

pub use identity::{select_provider, Identity, IdentityProvider, OfflineIdentity};
pub use session::{WalletSession, WalletSummary};
pub use storage::{FileStore, KeyValueStore, MemoryStore, WalletSnapshot};

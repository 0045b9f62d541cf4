//! Key-value storage for wallet state.
//!
//! Two entries are kept: `positions` holds a JSON array of position records
//! and `balance` holds the balance as a decimal string.

use dashmap::DashMap;
use market_core::types::Position;
use market_core::{Error, Result};
use rust_decimal::Decimal;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::{debug, warn};

pub const POSITIONS_KEY: &str = "positions";
pub const BALANCE_KEY: &str = "balance";

/// Durable string key-value store.
#[cfg_attr(test, mockall::automock)]
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>>;

    fn set(&self, key: &str, value: &str) -> Result<()>;

    fn remove(&self, key: &str) -> Result<()>;
}

/// In-memory store, for tests and sessions that need no durability.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: DashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).map(|v| v.value().clone()))
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.entries.remove(key);
        Ok(())
    }
}

/// Store keeping one file per key inside a directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> Result<PathBuf> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            return Err(Error::Storage {
                message: format!("invalid storage key: {:?}", key),
            });
        }
        Ok(self.dir.join(key))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        match fs::read_to_string(self.path_for(key)?) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let path = self.path_for(key)?;
        fs::create_dir_all(&self.dir)?;

        // Write then rename so a crash never leaves a half-written entry.
        let tmp = path.with_extension("tmp");
        fs::write(&tmp, value)?;
        fs::rename(&tmp, &path)?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        match fs::remove_file(self.path_for(key)?) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// Balance and positions as persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct WalletSnapshot {
    pub balance: Decimal,
    pub positions: Vec<Position>,
}

impl WalletSnapshot {
    /// Restore from `store`. Missing, unreadable or corrupt entries fall back
    /// to `default_balance` and an empty position list.
    pub fn load(store: &dyn KeyValueStore, default_balance: Decimal) -> Self {
        let positions = match store.get(POSITIONS_KEY) {
            Ok(Some(raw)) => serde_json::from_str::<Vec<Position>>(&raw).unwrap_or_else(|e| {
                warn!(error = %e, "Error parsing saved positions, starting empty");
                Vec::new()
            }),
            Ok(None) => Vec::new(),
            Err(e) => {
                warn!(error = %e, "Failed to read saved positions");
                Vec::new()
            }
        };

        let balance = match store.get(BALANCE_KEY) {
            Ok(Some(raw)) => parse_balance(&raw).unwrap_or_else(|| {
                warn!(raw = %raw.trim(), "Error parsing saved balance, using default");
                default_balance
            }),
            Ok(None) => default_balance,
            Err(e) => {
                warn!(error = %e, "Failed to read saved balance");
                default_balance
            }
        };

        debug!(
            balance = %balance,
            positions = positions.len(),
            "Loaded wallet state"
        );

        Self { balance, positions }
    }

    /// Write both entries.
    pub fn save(&self, store: &dyn KeyValueStore) -> Result<()> {
        store.set(POSITIONS_KEY, &serde_json::to_string(&self.positions)?)?;
        store.set(BALANCE_KEY, &self.balance.to_string())?;
        Ok(())
    }
}

/// Accepts plain decimals ("382.35") and exponent notation ("1e-7").
fn parse_balance(raw: &str) -> Option<Decimal> {
    let raw = raw.trim();
    Decimal::from_str(raw)
        .or_else(|_| Decimal::from_scientific(raw))
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use market_core::types::BetSide;

    fn default_balance() -> Decimal {
        Decimal::new(38235, 2)
    }

    fn temp_dir(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("wallet-session-{}-{}", name, std::process::id()))
    }

    #[test]
    fn test_memory_store_roundtrip() {
        let store = MemoryStore::new();
        assert!(store.get("balance").unwrap().is_none());

        store.set("balance", "10").unwrap();
        assert_eq!(store.get("balance").unwrap().as_deref(), Some("10"));
        assert_eq!(store.len(), 1);

        store.remove("balance").unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn test_file_store_roundtrip() {
        let dir = temp_dir("file-store");
        let store = FileStore::new(&dir);

        assert!(store.get("positions").unwrap().is_none());
        store.set("positions", "[]").unwrap();
        assert_eq!(store.get("positions").unwrap().as_deref(), Some("[]"));

        store.remove("positions").unwrap();
        store.remove("positions").unwrap();
        assert!(store.get("positions").unwrap().is_none());

        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_file_store_rejects_path_keys() {
        let store = FileStore::new(temp_dir("bad-keys"));
        assert!(matches!(store.get("../etc/passwd"), Err(Error::Storage { .. })));
        assert!(store.set("", "x").is_err());
    }

    #[test]
    fn test_snapshot_roundtrip() {
        let store = MemoryStore::new();
        let snapshot = WalletSnapshot {
            balance: Decimal::new(35735, 2),
            positions: vec![Position::new(
                "e4",
                "Will ETH be above $4k by year end?",
                BetSide::Profit,
                Decimal::new(25, 0),
                Decimal::new(27, 1),
            )
            .unwrap()],
        };

        snapshot.save(&store).unwrap();
        assert_eq!(store.get(BALANCE_KEY).unwrap().as_deref(), Some("357.35"));

        let loaded = WalletSnapshot::load(&store, default_balance());
        assert_eq!(loaded, snapshot);
    }

    #[test]
    fn test_missing_state_uses_defaults() {
        let loaded = WalletSnapshot::load(&MemoryStore::new(), default_balance());
        assert_eq!(loaded.balance, default_balance());
        assert!(loaded.positions.is_empty());
    }

    #[test]
    fn test_corrupt_state_uses_defaults() {
        let store = MemoryStore::new();
        store.set(POSITIONS_KEY, "[{not json").unwrap();
        store.set(BALANCE_KEY, "NaN").unwrap();

        let loaded = WalletSnapshot::load(&store, default_balance());
        assert_eq!(loaded.balance, default_balance());
        assert!(loaded.positions.is_empty());
    }

    #[test]
    fn test_balance_in_exponent_notation() {
        assert_eq!(parse_balance(" 1e-7 "), Some(Decimal::new(1, 7)));
        assert_eq!(parse_balance("382.35"), Some(default_balance()));
        assert_eq!(parse_balance(""), None);
    }

    #[test]
    fn test_read_errors_use_defaults() {
        let mut store = MockKeyValueStore::new();
        store.expect_get().returning(|_| {
            Err(Error::Storage {
                message: "quota exceeded".to_string(),
            })
        });

        let loaded = WalletSnapshot::load(&store, default_balance());
        assert_eq!(loaded.balance, default_balance());
        assert!(loaded.positions.is_empty());
    }
}

//! Configuration management for the prediction markets front-end.

use crate::series::DEFAULT_SEED;
use crate::{Error, Result};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::env;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Balance a fresh wallet starts with.
pub const DEFAULT_STARTING_BALANCE: Decimal = Decimal::from_parts(38235, 0, 0, false, 2); // 382.35

/// Directory used by the file-backed wallet store.
pub const DEFAULT_STATE_DIR: &str = ".wallet_state";

/// Application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub identity: IdentityConfig,
    #[serde(default)]
    pub wallet: WalletConfig,
    #[serde(default)]
    pub charts: ChartConfig,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct IdentityConfig {
    /// Identity-provider application key. Without it the offline provider is used.
    pub app_id: Option<String>,
}

impl IdentityConfig {
    /// The configured key, ignoring blank values.
    pub fn app_id(&self) -> Option<&str> {
        self.app_id.as_deref().map(str::trim).filter(|id| !id.is_empty())
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct WalletConfig {
    pub starting_balance: Decimal,
    pub state_dir: PathBuf,
}

impl Default for WalletConfig {
    fn default() -> Self {
        Self {
            starting_balance: DEFAULT_STARTING_BALANCE,
            state_dir: PathBuf::from(DEFAULT_STATE_DIR),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    pub seed: u32,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self { seed: DEFAULT_SEED }
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        if let Ok(path) = dotenvy::dotenv() {
            debug!(path = %path.display(), "Loaded environment file");
        }

        let starting_balance = match env::var("WALLET_STARTING_BALANCE") {
            Ok(raw) => raw.trim().parse::<Decimal>().map_err(|e| Error::Config {
                message: format!("WALLET_STARTING_BALANCE is not a number: {}", e),
            })?,
            Err(_) => DEFAULT_STARTING_BALANCE,
        };

        let seed = match env::var("CHART_SEED") {
            Ok(raw) => parse_seed(&raw)?,
            Err(_) => DEFAULT_SEED,
        };

        Ok(Self {
            identity: IdentityConfig {
                app_id: env::var("PRIVY_APP_ID").ok(),
            },
            wallet: WalletConfig {
                starting_balance,
                state_dir: env::var("WALLET_STATE_DIR")
                    .map(PathBuf::from)
                    .unwrap_or_else(|_| PathBuf::from(DEFAULT_STATE_DIR)),
            },
            charts: ChartConfig { seed },
        })
    }

    /// Load configuration from a TOML/JSON/YAML file, with `MARKETS__`
    /// environment variables layered on top (e.g. `MARKETS__WALLET__STATE_DIR`).
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        debug!(path = %path.as_ref().display(), "Loading configuration file");
        let settings = config::Config::builder()
            .add_source(config::File::from(path.as_ref()))
            .add_source(config::Environment::with_prefix("MARKETS").separator("__"))
            .build()?;

        Ok(settings.try_deserialize()?)
    }

    /// Whether a hosted identity provider should be used.
    pub fn use_hosted_identity(&self) -> bool {
        self.identity.app_id().is_some()
    }
}

/// Parse a seed written in decimal or as `0x`-prefixed hex.
pub fn parse_seed(raw: &str) -> Result<u32> {
    let raw = raw.trim();
    let parsed = match raw.strip_prefix("0x").or_else(|| raw.strip_prefix("0X")) {
        Some(hex) => u32::from_str_radix(&hex.replace('_', ""), 16),
        None => raw.replace('_', "").parse::<u32>(),
    };
    parsed.map_err(|e| Error::Config {
        message: format!("invalid chart seed {:?}: {}", raw, e),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.wallet.starting_balance, Decimal::new(38235, 2));
        assert_eq!(config.wallet.state_dir, PathBuf::from(".wallet_state"));
        assert_eq!(config.charts.seed, 0x9e37_79b1);
        assert!(!config.use_hosted_identity());
    }

    #[test]
    fn test_blank_app_id_means_offline() {
        let config = Config {
            identity: IdentityConfig {
                app_id: Some("   ".to_string()),
            },
            ..Default::default()
        };
        assert!(!config.use_hosted_identity());

        let config = Config {
            identity: IdentityConfig {
                app_id: Some("app-123".to_string()),
            },
            ..Default::default()
        };
        assert_eq!(config.identity.app_id(), Some("app-123"));
        assert!(config.use_hosted_identity());
    }

    #[test]
    fn test_parse_seed() {
        assert_eq!(parse_seed("0x9e3779b1").unwrap(), 0x9e37_79b1);
        assert_eq!(parse_seed("0X10").unwrap(), 16);
        assert_eq!(parse_seed(" 42 ").unwrap(), 42);
        assert_eq!(parse_seed("1_000").unwrap(), 1000);
        assert!(parse_seed("seed").is_err());
        assert!(parse_seed("0x1_0000_0000").is_err());
    }

    #[test]
    fn test_from_file() {
        let dir = std::env::temp_dir().join(format!("market-core-config-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("markets.toml");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(
            file,
            concat!(
                "[identity]\napp_id = \"app-xyz\"\n\n",
                "[wallet]\nstarting_balance = \"1000\"\nstate_dir = \"/tmp/wallet\"\n\n",
                "[charts]\nseed = 7",
            )
        )
        .unwrap();

        let config = Config::from_file(&path).unwrap();
        assert_eq!(config.identity.app_id(), Some("app-xyz"));
        assert_eq!(config.wallet.starting_balance, Decimal::new(1000, 0));
        assert_eq!(config.wallet.state_dir, PathBuf::from("/tmp/wallet"));
        assert_eq!(config.charts.seed, 7);

        std::fs::remove_dir_all(&dir).ok();
    }
}

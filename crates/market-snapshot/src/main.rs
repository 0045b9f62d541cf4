//! Market Snapshot
//!
//! Restores the wallet session from disk and prints the mock dashboard as JSON.

mod snapshot;

use anyhow::{Context, Result};
use clap::Parser;
use market_core::catalog::MarketCatalog;
use market_core::config::{parse_seed, Config};
use market_core::types::BetSide;
use rust_decimal::Decimal;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use wallet_session::{FileStore, WalletSession};

use crate::snapshot::DashboardSnapshot;

#[derive(Debug, Parser)]
#[command(name = "market-snapshot", about = "Print a JSON snapshot of the mock markets dashboard")]
struct Args {
    /// Config file (TOML, JSON or YAML). Defaults to environment variables.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the wallet state directory
    #[arg(long)]
    state_dir: Option<PathBuf>,

    /// Override the chart seed (decimal or 0x hex)
    #[arg(long, value_parser = parse_seed)]
    seed: Option<u32>,

    /// Place a mock bet on this market before printing
    #[arg(long)]
    bet: Option<String>,

    #[arg(long, default_value = "profit")]
    side: BetSide,

    #[arg(long, default_value = "10")]
    amount: Decimal,

    #[arg(long, default_value = "2")]
    odds: Decimal,

    /// Skip the login step
    #[arg(long)]
    offline: bool,

    #[arg(long)]
    pretty: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr so stdout stays valid JSON
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "market_snapshot=info,wallet_session=info,market_core=warn".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => Config::from_file(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => Config::from_env()?,
    };
    if let Some(dir) = args.state_dir {
        config.wallet.state_dir = dir;
    }
    if let Some(seed) = args.seed {
        config.charts.seed = seed;
    }

    info!(
        state_dir = %config.wallet.state_dir.display(),
        seed = config.charts.seed,
        "Starting market snapshot"
    );

    let store = Arc::new(FileStore::new(config.wallet.state_dir.clone()));
    // No hosted provider is linked into this binary.
    let mut session = WalletSession::from_config(&config, store, None);
    if !args.offline {
        session.connect().await;
    }

    let catalog = MarketCatalog::demo();

    if let Some(market_id) = &args.bet {
        let market = catalog
            .get(market_id)
            .with_context(|| format!("unknown market {}", market_id))?;
        match session.place_bet(&market.id, &market.title, args.side, args.amount, args.odds) {
            Ok(position) => info!(position_id = %position.id, "Placed mock bet"),
            Err(e) if e.is_user_facing() => warn!(error = %e, "Bet rejected"),
            Err(e) => return Err(e.into()),
        }
    }

    let snapshot = DashboardSnapshot::build(&catalog, &session, config.charts.seed);
    let json = if args.pretty {
        serde_json::to_string_pretty(&snapshot)?
    } else {
        serde_json::to_string(&snapshot)?
    };
    println!("{}", json);

    Ok(())
}

//! Wallet session: connection state, balance and mock positions.

use market_core::config::Config;
use market_core::types::{BetSide, Position};
use market_core::{Error, Result};
use rust_decimal::Decimal;
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

use crate::identity::{select_provider, IdentityProvider};
use crate::storage::{KeyValueStore, WalletSnapshot};

/// Page-wide wallet state, owned by the application root and passed down by
/// reference.
///
/// Every balance or position change is written to the store before the method
/// returns. Connection state is not persisted.
pub struct WalletSession {
    identity: Arc<dyn IdentityProvider>,
    store: Arc<dyn KeyValueStore>,
    connected: bool,
    address: Option<String>,
    balance: Decimal,
    positions: Vec<Position>,
}

/// Serializable overview for headers and snapshots.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WalletSummary {
    pub connected: bool,
    pub address: Option<String>,
    pub balance: Decimal,
    pub active_positions: usize,
    pub total_staked: Decimal,
    pub potential_payout: Decimal,
}

impl WalletSession {
    /// Create a session, restoring balance and positions from `store`.
    pub fn new(
        identity: Arc<dyn IdentityProvider>,
        store: Arc<dyn KeyValueStore>,
        starting_balance: Decimal,
    ) -> Self {
        let WalletSnapshot { balance, positions } =
            WalletSnapshot::load(store.as_ref(), starting_balance);

        Self {
            identity,
            store,
            connected: false,
            address: None,
            balance,
            positions,
        }
    }

    /// Create a session from configuration; see [`select_provider`].
    pub fn from_config(
        config: &Config,
        store: Arc<dyn KeyValueStore>,
        hosted: Option<Arc<dyn IdentityProvider>>,
    ) -> Self {
        let identity = select_provider(config, hosted);
        Self::new(identity, store, config.wallet.starting_balance)
    }

    pub fn is_connected(&self) -> bool {
        self.connected
    }

    pub fn address(&self) -> Option<&str> {
        self.address.as_deref()
    }

    pub fn balance(&self) -> Decimal {
        self.balance
    }

    /// Positions, newest first.
    pub fn positions(&self) -> &[Position] {
        &self.positions
    }

    /// Run the provider's login flow. Failures are logged and leave the
    /// session disconnected.
    pub async fn connect(&mut self) {
        match self.identity.login().await {
            Ok(identity) => match identity.address {
                Some(address) => {
                    info!(
                        provider = self.identity.name(),
                        address = %address,
                        "Wallet connected"
                    );
                    self.address = Some(address);
                    self.connected = true;
                }
                None => {
                    warn!(
                        provider = self.identity.name(),
                        "Authenticated without a linked wallet"
                    );
                }
            },
            Err(e) => {
                error!(provider = self.identity.name(), error = %e, "Failed to connect wallet");
            }
        }
    }

    /// Log out and forget the address. Balance and positions stay.
    pub fn disconnect(&mut self) {
        self.identity.logout();
        self.connected = false;
        self.address = None;
        info!("Wallet disconnected");
    }

    /// Place a mock bet, deducting `amount` and recording a new position at
    /// the front of the list.
    ///
    /// Fails without touching state when the amount or odds are not positive,
    /// when the payout does not fit in a `Decimal`, or when the amount exceeds
    /// the balance.
    pub fn place_bet(
        &mut self,
        market_id: &str,
        market_title: &str,
        side: BetSide,
        amount: Decimal,
        odds: Decimal,
    ) -> Result<Position> {
        if amount <= Decimal::ZERO {
            return Err(Error::InvalidAmount(format!(
                "stake must be positive, got {}",
                amount
            )));
        }
        if odds <= Decimal::ZERO {
            return Err(Error::InvalidAmount(format!(
                "odds must be positive, got {}",
                odds
            )));
        }
        if amount > self.balance {
            return Err(Error::InsufficientBalance {
                requested: amount,
                available: self.balance,
            });
        }

        let position = Position::new(market_id, market_title, side, amount, odds)?;
        self.balance -= amount;
        self.positions.insert(0, position.clone());

        info!(
            position_id = %position.id,
            market = %position.market_id,
            side = %side,
            amount = %amount,
            payout = %position.potential_payout,
            "Bet placed"
        );

        self.persist();
        Ok(position)
    }

    /// Deduct `amount` if the balance covers it. Returns false, leaving the
    /// balance unchanged, when it does not or when `amount` is negative.
    pub fn deduct_balance(&mut self, amount: Decimal) -> bool {
        if amount < Decimal::ZERO || self.balance < amount {
            debug!(amount = %amount, balance = %self.balance, "Deduction refused");
            return false;
        }
        self.balance -= amount;
        self.persist();
        true
    }

    /// Credit `amount`. Fails, leaving the balance unchanged, when the result
    /// does not fit in a `Decimal`.
    pub fn add_balance(&mut self, amount: Decimal) -> Result<()> {
        self.balance = self.balance.checked_add(amount).ok_or_else(|| {
            Error::InvalidAmount(format!(
                "adding {} to {} overflows the balance",
                amount, self.balance
            ))
        })?;
        self.persist();
        Ok(())
    }

    pub fn summary(&self) -> WalletSummary {
        let active: Vec<&Position> = self.positions.iter().filter(|p| p.is_active()).collect();
        WalletSummary {
            connected: self.connected,
            address: self.address.clone(),
            balance: self.balance,
            active_positions: active.len(),
            total_staked: active
                .iter()
                .fold(Decimal::ZERO, |acc, p| acc.saturating_add(p.amount)),
            potential_payout: active
                .iter()
                .fold(Decimal::ZERO, |acc, p| acc.saturating_add(p.potential_payout)),
        }
    }

    fn persist(&self) {
        let snapshot = WalletSnapshot {
            balance: self.balance,
            positions: self.positions.clone(),
        };
        match snapshot.save(self.store.as_ref()) {
            Ok(()) => debug!(
                balance = %self.balance,
                positions = self.positions.len(),
                "Wallet state saved"
            ),
            Err(e) => error!(error = %e, "Failed to save wallet state"),
        }
    }
}

impl std::fmt::Debug for WalletSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WalletSession")
            .field("provider", &self.identity.name())
            .field("connected", &self.connected)
            .field("address", &self.address)
            .field("balance", &self.balance)
            .field("positions", &self.positions.len())
            .finish()
    }
}

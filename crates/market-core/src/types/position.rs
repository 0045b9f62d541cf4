//! Position types for mock bets placed from the wallet.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{Error, Result};

/// Which side of a profit/loss market a bet backs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BetSide {
    Profit,
    Loss,
}

impl std::fmt::Display for BetSide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Profit => write!(f, "profit"),
            Self::Loss => write!(f, "loss"),
        }
    }
}

impl std::str::FromStr for BetSide {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "profit" => Ok(Self::Profit),
            "loss" => Ok(Self::Loss),
            _ => Err(format!("Invalid bet side: {}", s)),
        }
    }
}

/// Lifecycle status of a position. Nothing in the demo settles positions, so
/// they stay `Active`; `Won` and `Lost` exist for stored records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PositionStatus {
    #[default]
    Active,
    Won,
    Lost,
}

/// Direction of a whale position as read from a market title.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PositionType {
    Long,
    Short,
}

impl PositionType {
    /// Color family used for badges and chart strokes.
    pub fn tone(&self) -> &'static str {
        match self {
            Self::Long => "emerald",
            Self::Short => "red",
        }
    }

    /// Sign applied to a price move when computing profit odds.
    pub fn direction(&self) -> f64 {
        match self {
            Self::Long => 1.0,
            Self::Short => -1.0,
        }
    }
}

impl std::fmt::Display for PositionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Long => write!(f, "LONG"),
            Self::Short => write!(f, "SHORT"),
        }
    }
}

/// A recorded mock bet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Position {
    /// Unique identifier (`pos_<millis>_<suffix>`).
    pub id: String,
    pub market_id: String,
    pub market_title: String,
    pub side: BetSide,
    /// Stake deducted from the balance.
    pub amount: Decimal,
    /// Decimal odds.
    pub odds: Decimal,
    /// `amount * odds`.
    pub potential_payout: Decimal,
    /// When the bet was placed.
    pub timestamp: DateTime<Utc>,
    pub status: PositionStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_pnl: Option<Decimal>,
}

impl Position {
    /// Create a new active position stamped with the current time.
    ///
    /// Fails when `amount * odds` does not fit in a `Decimal`.
    pub fn new(
        market_id: impl Into<String>,
        market_title: impl Into<String>,
        side: BetSide,
        amount: Decimal,
        odds: Decimal,
    ) -> Result<Self> {
        let potential_payout = amount.checked_mul(odds).ok_or_else(|| {
            Error::InvalidAmount(format!("payout overflows for stake {} at odds {}", amount, odds))
        })?;
        let timestamp = Utc::now();
        let suffix = Uuid::new_v4().simple().to_string();
        Ok(Self {
            id: format!("pos_{}_{}", timestamp.timestamp_millis(), &suffix[..9]),
            market_id: market_id.into(),
            market_title: market_title.into(),
            side,
            amount,
            odds,
            potential_payout,
            timestamp,
            status: PositionStatus::Active,
            current_pnl: Some(Decimal::ZERO),
        })
    }

    pub fn is_active(&self) -> bool {
        self.status == PositionStatus::Active
    }

    /// Payout minus stake if the bet wins.
    pub fn potential_profit(&self) -> Decimal {
        self.potential_payout - self.amount
    }
}

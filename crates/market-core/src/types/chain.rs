//! Chained predictions: several legs that all have to resolve for the chain
//! reward to pay out.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use super::position::PositionType;
use crate::display::{normalize_split, PositionSplit, VolumeFormat};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ChainStatus {
    #[default]
    Open,
    Pending,
    Resolved,
}

impl ChainStatus {
    /// Badge variant on the chain card.
    pub fn badge(&self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Pending => "secondary",
            Self::Resolved => "closed",
        }
    }
}

/// Outcome a leg is predicted to resolve to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Outcome {
    Yes,
    No,
}

/// A single prediction within a chain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChainLeg {
    pub id: String,
    pub title: String,
    pub description: String,
    /// Probability in `0..=1`.
    pub current_odds: Decimal,
    /// Payout multiple if the leg resolves as predicted.
    pub potential_reward: Decimal,
    pub end_date: String,
    pub participants: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outcome: Option<Outcome>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    pub profit_percentage: u8,
    pub loss_percentage: u8,
    pub entry_price: Decimal,
    pub position_type: PositionType,
}

impl ChainLeg {
    /// Odds as a percentage with one decimal, e.g. `35.0%`.
    pub fn odds_label(&self) -> String {
        let mut pct = self
            .current_odds
            .saturating_mul(Decimal::ONE_HUNDRED)
            .round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero);
        pct.rescale(1);
        format!("{}%", pct)
    }

    pub fn reward_label(&self) -> String {
        format!("{}x", self.potential_reward.normalize())
    }

    /// Participant count with thousands separators.
    pub fn participants_label(&self) -> String {
        let digits = self.participants.to_string();
        let mut out = String::with_capacity(digits.len() + digits.len() / 3);
        for (i, c) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                out.push(',');
            }
            out.push(c);
        }
        out
    }

    /// Badge variant for the predicted outcome.
    pub fn outcome_badge(&self) -> &'static str {
        match self.outcome {
            Some(Outcome::Yes) => "profit",
            Some(Outcome::No) => "loss",
            None => "secondary",
        }
    }

    /// First word of the title, used as the chart's asset label.
    pub fn coin_symbol(&self) -> &str {
        self.title.split(' ').next().unwrap_or_default()
    }

    pub fn split(&self) -> PositionSplit {
        normalize_split(
            Decimal::from(self.profit_percentage),
            Decimal::from(self.loss_percentage),
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChainedPrediction {
    pub id: String,
    #[serde(rename = "predictions")]
    pub legs: Vec<ChainLeg>,
    pub total_volume: Decimal,
    /// Payout multiple for the whole chain.
    pub chain_reward: Decimal,
    pub status: ChainStatus,
}

impl ChainedPrediction {
    pub fn formatted_volume(&self) -> String {
        VolumeFormat::CHAIN.format(self.total_volume)
    }

    pub fn participants(&self) -> u32 {
        self.legs
            .iter()
            .fold(0u32, |acc, leg| acc.saturating_add(leg.participants))
    }
}

//! Display derivations: compact volume strings and profit/loss splits.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;

/// Per call site formatting of volume figures.
///
/// Precision may differ between call sites but is fixed for each one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VolumeFormat {
    pub prefix: &'static str,
    /// Decimal places for the `M` suffix.
    pub millions_dp: u32,
    /// Decimal places for the `K` suffix.
    pub thousands_dp: u32,
}

impl VolumeFormat {
    /// Market cards and featured event panels: `$5.3M`, `$83K`, `$500`.
    pub const CARD: VolumeFormat = VolumeFormat {
        prefix: "$",
        millions_dp: 1,
        thousands_dp: 0,
    };

    /// Chained prediction cards: `$4.3M`, `$2.5K`, `$500`.
    pub const CHAIN: VolumeFormat = VolumeFormat {
        prefix: "$",
        millions_dp: 1,
        thousands_dp: 1,
    };

    /// Radial volume chart label: `2.0M`, `2.5K`, `500`.
    pub const RADIAL: VolumeFormat = VolumeFormat {
        prefix: "",
        millions_dp: 1,
        thousands_dp: 1,
    };

    pub fn format(&self, volume: Decimal) -> String {
        let million = Decimal::new(1_000_000, 0);
        let thousand = Decimal::ONE_THOUSAND;

        if volume >= million {
            format!("{}{}M", self.prefix, fixed(volume / million, self.millions_dp))
        } else if volume >= thousand {
            format!("{}{}K", self.prefix, fixed(volume / thousand, self.thousands_dp))
        } else {
            format!("{}{}", self.prefix, fixed(volume, 0))
        }
    }
}

/// Round half away from zero and render with exactly `dp` decimal places.
fn fixed(value: Decimal, dp: u32) -> String {
    let mut rounded = value.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(dp);
    rounded.to_string()
}

/// Format a volume the way market cards do.
pub fn format_volume(volume: Decimal) -> String {
    VolumeFormat::CARD.format(volume)
}

/// Profit/loss share of a two-sided market, in percent of the combined total.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PositionSplit {
    pub profit: Decimal,
    pub loss: Decimal,
}

impl PositionSplit {
    pub const EVEN: PositionSplit = PositionSplit {
        profit: Decimal::from_parts(50, 0, 0, false, 0),
        loss: Decimal::from_parts(50, 0, 0, false, 0),
    };

    /// Whole percentages for display.
    ///
    /// Each side is rounded on its own, so the pair can total 99 or 101.
    pub fn rounded(&self) -> (u32, u32) {
        (round_percent(self.profit), round_percent(self.loss))
    }
}

fn round_percent(value: Decimal) -> u32 {
    value
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_u32()
        .unwrap_or(0)
}

/// Convert two raw magnitudes into percentages of their sum.
///
/// A non-positive total yields an even 50/50 split.
pub fn normalize_split(profit: Decimal, loss: Decimal) -> PositionSplit {
    let total = profit + loss;
    if total <= Decimal::ZERO {
        return PositionSplit::EVEN;
    }

    PositionSplit {
        profit: profit / total * Decimal::ONE_HUNDRED,
        loss: loss / total * Decimal::ONE_HUNDRED,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(v: i64) -> Decimal {
        Decimal::new(v, 0)
    }

    #[test]
    fn test_card_volume_format() {
        assert_eq!(format_volume(d(1_500_000)), "$1.5M");
        assert_eq!(format_volume(d(2_500)), "$3K");
        assert_eq!(format_volume(d(500)), "$500");
        assert_eq!(format_volume(d(16_901_170)), "$16.9M");
        assert_eq!(format_volume(d(82_503)), "$83K");
        assert_eq!(format_volume(d(1_000_000)), "$1.0M");
        assert_eq!(format_volume(Decimal::ZERO), "$0");
    }

    #[test]
    fn test_radial_volume_format() {
        assert_eq!(VolumeFormat::RADIAL.format(d(2_500)), "2.5K");
        assert_eq!(VolumeFormat::RADIAL.format(d(2_010_000)), "2.0M");
        assert_eq!(VolumeFormat::RADIAL.format(d(999)), "999");
    }

    #[test]
    fn test_chain_volume_format() {
        assert_eq!(VolumeFormat::CHAIN.format(d(4_300_000)), "$4.3M");
        assert_eq!(VolumeFormat::CHAIN.format(d(2_500)), "$2.5K");
        assert_eq!(VolumeFormat::CHAIN.format(d(500)), "$500");
    }

    #[test]
    fn test_sub_thousand_rounds_to_integer() {
        assert_eq!(format_volume(Decimal::new(4995, 1)), "$500"); // 499.5
        assert_eq!(format_volume(Decimal::new(4994, 1)), "$499");
    }

    #[test]
    fn test_normalize_split() {
        assert_eq!(normalize_split(d(0), d(0)).rounded(), (50, 50));
        assert_eq!(normalize_split(d(30), d(70)).rounded(), (30, 70));
        assert_eq!(normalize_split(d(1), d(0)).rounded(), (100, 0));
    }

    #[test]
    fn test_normalize_split_keeps_rounding_slack() {
        // 12.5 / 87.5 rounds to 13 / 88
        let (profit, loss) = normalize_split(d(1), d(7)).rounded();
        assert_eq!((profit, loss), (13, 88));
        assert_eq!(profit + loss, 101);
    }

    #[test]
    fn test_normalize_split_exact_values() {
        let split = normalize_split(d(63), d(18));
        assert!(split.profit > d(77) && split.profit < d(78));
        assert_eq!(split.rounded(), (78, 22));
    }
}

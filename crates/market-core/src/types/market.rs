//! Market-related types for the event market views.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::category::MarketCategory;
use crate::display::format_volume;

/// Image shown when a market has none of its own.
pub const PLACEHOLDER_IMAGE_URL: &str = "https://picsum.photos/seed/placeholder/96/96";

/// A named outcome within an event market.
///
/// `percent` is a standalone display value; the options of a market are not
/// required to add up to 100.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarketOption {
    pub name: String,
    pub percent: u8,
}

impl MarketOption {
    pub fn new(name: impl Into<String>, percent: u8) -> Self {
        Self {
            name: name.into(),
            percent: percent.min(100),
        }
    }
}

/// An event market as displayed on cards and featured panels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventMarket {
    pub id: String,
    pub title: String,
    pub options: Vec<MarketOption>,
    pub volume: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<MarketCategory>,
}

impl EventMarket {
    pub fn new(id: impl Into<String>, title: impl Into<String>, volume: Decimal) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            options: Vec::new(),
            volume,
            image_url: None,
            category: None,
        }
    }

    pub fn with_option(mut self, name: impl Into<String>, percent: u8) -> Self {
        self.options.push(MarketOption::new(name, percent));
        self
    }

    pub fn with_image(mut self, url: impl Into<String>) -> Self {
        self.image_url = Some(url.into());
        self
    }

    pub fn with_category(mut self, category: MarketCategory) -> Self {
        self.category = Some(category);
        self
    }

    /// Category used for badge styling (`Other` when unset).
    pub fn category(&self) -> MarketCategory {
        self.category.unwrap_or_default()
    }

    pub fn image_or_placeholder(&self) -> &str {
        self.image_url.as_deref().unwrap_or(PLACEHOLDER_IMAGE_URL)
    }

    /// Option with the highest percentage (first one wins on ties).
    pub fn leading_option(&self) -> Option<&MarketOption> {
        self.options
            .iter()
            .reduce(|best, opt| if opt.percent > best.percent { opt } else { best })
    }

    /// Up to `n` options, highest percentage first.
    pub fn top_options(&self, n: usize) -> Vec<&MarketOption> {
        let mut sorted: Vec<&MarketOption> = self.options.iter().collect();
        sorted.sort_by(|a, b| b.percent.cmp(&a.percent));
        sorted.truncate(n);
        sorted
    }

    /// Targets for the first two options, used to steer the convergent chart.
    /// A missing or zero percentage falls back to 50.
    pub fn chart_targets(&self) -> (f64, f64) {
        let target = |idx: usize| {
            self.options
                .get(idx)
                .map(|o| o.percent)
                .filter(|p| *p > 0)
                .map_or(50.0, f64::from)
        };
        (target(0), target(1))
    }

    pub fn formatted_volume(&self) -> String {
        format_volume(self.volume)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> EventMarket {
        EventMarket::new("e4", "Ethereum above $4,000 on Friday?", Decimal::new(5_300_000, 0))
            .with_option("Yes", 37)
            .with_option("No", 63)
            .with_category(MarketCategory::Crypto)
    }

    #[test]
    fn test_leading_option() {
        let market = sample();
        assert_eq!(market.leading_option().unwrap().name, "No");

        let empty = EventMarket::new("x", "Empty", Decimal::ZERO);
        assert!(empty.leading_option().is_none());
    }

    #[test]
    fn test_top_options_sorted() {
        let market = EventMarket::new("w", "Whale", Decimal::ZERO)
            .with_option("Lose", 30)
            .with_option("Profit", 62)
            .with_option("Liquidated", 8);

        let names: Vec<&str> = market.top_options(2).iter().map(|o| o.name.as_str()).collect();
        assert_eq!(names, vec!["Profit", "Lose"]);
        assert_eq!(market.top_options(10).len(), 3);
    }

    #[test]
    fn test_chart_targets_default_to_fifty() {
        assert_eq!(sample().chart_targets(), (37.0, 63.0));

        let single = EventMarket::new("x", "Single", Decimal::ZERO).with_option("Yes", 0);
        assert_eq!(single.chart_targets(), (50.0, 50.0));
    }

    #[test]
    fn test_percent_is_capped() {
        assert_eq!(MarketOption::new("Yes", 140).percent, 100);
    }

    #[test]
    fn test_placeholder_image_and_category() {
        let market = EventMarket::new("x", "No image", Decimal::ZERO);
        assert_eq!(market.image_or_placeholder(), PLACEHOLDER_IMAGE_URL);
        assert_eq!(market.category(), MarketCategory::Other);
        assert_eq!(sample().formatted_volume(), "$5.3M");
    }

    #[test]
    fn test_serde_uses_camel_case() {
        let market = sample().with_image("https://picsum.photos/seed/e4/96/96");
        let json = serde_json::to_value(&market).unwrap();
        assert_eq!(json["imageUrl"], "https://picsum.photos/seed/e4/96/96");
        assert_eq!(json["category"], "crypto");

        let back: EventMarket = serde_json::from_value(json).unwrap();
        assert_eq!(back, market);
    }
}

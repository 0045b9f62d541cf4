//! Mock market catalog backing the demo pages.
//!
//! The data is fixed; nothing here talks to an exchange.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::classify::{classify_title, coin_from_title, Coin, TitleClassification};
use crate::display::{normalize_split, PositionSplit, VolumeFormat};
use crate::types::{
    ChainLeg, ChainStatus, ChainedPrediction, EventMarket, HeatCategory, MarketCategory,
    MarketOption, Outcome, PositionType,
};

/// Whale markets open for betting; the rest render as "coming soon".
pub const ACTIVE_WHALE_IDS: [&str; 3] = ["w1", "w2", "w3"];

fn picsum(seed: &str) -> String {
    format!("https://picsum.photos/seed/{}/96/96", seed)
}

/// Markets on the event grid.
pub fn event_markets() -> Vec<EventMarket> {
    vec![
        EventMarket::new("e1", "Next US Presidential Election Winner?", Decimal::new(1_262_355, 0))
            .with_option("J.D. Vance", 27)
            .with_option("Gavin Newsom", 13)
            .with_image(picsum("e1"))
            .with_category(MarketCategory::Politics),
        EventMarket::new("e2", "New York City Mayor Election", Decimal::new(16_901_170, 0))
            .with_option("Zohran Mamdani", 80)
            .with_option("Andrew Cuomo", 10)
            .with_image(picsum("e2"))
            .with_category(MarketCategory::Politics),
        EventMarket::new("e3", "CPI in July 2025 above 0.2%?", Decimal::new(12_551_160, 0))
            .with_option("Above 0.2%", 54)
            .with_option("Above 0.1%", 89)
            .with_image(picsum("e3"))
            .with_category(MarketCategory::Economics),
        EventMarket::new("e4", "Will ETH be above $4k by year end?", Decimal::new(5_300_000, 0))
            .with_option("Yes", 37)
            .with_option("No", 63)
            .with_image(picsum("e4"))
            .with_category(MarketCategory::Crypto),
        EventMarket::new(
            "e5",
            "Trump, Putin, and Zelenskyy meet before year end?",
            Decimal::new(82_503, 0),
        )
        .with_option("Yes", 8)
        .with_option("No", 92)
        .with_image(picsum("e5"))
        .with_category(MarketCategory::Politics),
        EventMarket::new("e6", "Who will win the Nobel Peace Prize?", Decimal::new(2_729_187, 0))
            .with_option("Yulia Navalnaya", 19)
            .with_option("Donald Trump", 12)
            .with_image(picsum("e6"))
            .with_category(MarketCategory::Politics),
        EventMarket::new("e7", "Will Bitcoin reach $150k before 2026?", Decimal::new(254_539, 0))
            .with_option("Yes", 48)
            .with_option("No", 52)
            .with_image(picsum("e7"))
            .with_category(MarketCategory::Crypto),
        EventMarket::new("e8", "Fed funds rate in September?", Decimal::new(36_642_739, 0))
            .with_option("Above 4.25%", 17)
            .with_option("Above 4.00%", 94)
            .with_image(picsum("e8"))
            .with_category(MarketCategory::Finance),
        EventMarket::new(
            "e9",
            "Will Taylor Swift and Travis Kelce be engaged this year?",
            Decimal::new(99_877, 0),
        )
        .with_option("Yes", 51)
        .with_option("No", 45)
        .with_image(picsum("e9")),
    ]
}

/// Markets rotating through the featured panel.
pub fn featured_events() -> Vec<EventMarket> {
    vec![
        EventMarket::new("1", "Will ETH be above $4k by year end?", Decimal::new(5_300_000, 0))
            .with_option("Yes", 37)
            .with_option("No", 63)
            .with_image(picsum("eth"))
            .with_category(MarketCategory::Crypto),
        EventMarket::new("2", "Will Bitcoin reach $150k before 2026?", Decimal::new(254_539, 0))
            .with_option("Yes", 48)
            .with_option("No", 52)
            .with_image(picsum("btc"))
            .with_category(MarketCategory::Crypto),
        EventMarket::new("3", "Next US Presidential Election Winner?", Decimal::new(1_262_355, 0))
            .with_option("J.D. Vance", 27)
            .with_option("Gavin Newsom", 13)
            .with_image(picsum("politics"))
            .with_category(MarketCategory::Politics),
    ]
}

/// Markets on whale positions; subject, size and direction live in the title.
pub fn whale_markets() -> Vec<EventMarket> {
    vec![
        EventMarket::new(
            "w1",
            "Will the 50M$ LONG on BTC close in profit?",
            Decimal::new(2_010_000, 0),
        )
        .with_option("Profit", 63)
        .with_option("Lose", 37)
        .with_category(MarketCategory::Crypto),
        EventMarket::new(
            "w2",
            "Will the 120M$ SHORT on ETH close in profit?",
            Decimal::new(845_200, 0),
        )
        .with_option("Profit", 41)
        .with_option("Lose", 59)
        .with_category(MarketCategory::Crypto),
        EventMarket::new(
            "w3",
            "Will the 30M$ LONG on HYPE close in profit?",
            Decimal::new(312_750, 0),
        )
        .with_option("Profit", 55)
        .with_option("Lose", 45)
        .with_category(MarketCategory::Crypto),
        EventMarket::new(
            "w4",
            "Will the 75M$ SHORT on BITCOIN close in profit?",
            Decimal::new(96_400, 0),
        )
        .with_option("Profit", 28)
        .with_option("Lose", 72)
        .with_category(MarketCategory::Crypto),
    ]
}

/// The inflation bet on the featured panel; its chart is [`FEATURED_LINES`].
///
/// [`FEATURED_LINES`]: crate::series::FEATURED_LINES
pub fn inflation_outlook() -> EventMarket {
    EventMarket::new("cpi", "INFLATION OUTLOOK", Decimal::new(2_010_000, 0))
        .with_option("Above 2.7%", 63)
        .with_option("Above 2.8%", 18)
        .with_image(picsum("cpi"))
        .with_category(MarketCategory::Economics)
}

/// The chain on the chained predictions page.
pub fn chained_prediction() -> ChainedPrediction {
    ChainedPrediction {
        id: "btc-war-chain".to_string(),
        legs: vec![
            ChainLeg {
                id: "btc-200k".to_string(),
                title: "Bitcoin hits $200K".to_string(),
                description: "Bitcoin reaches $200,000 USD before the end of 2025".to_string(),
                current_odds: Decimal::new(35, 2),
                potential_reward: Decimal::new(286, 2),
                end_date: "Dec 31, 2025".to_string(),
                participants: 1247,
                outcome: Some(Outcome::Yes),
                image_url: Some("/coin-logos/bitcoin.png".to_string()),
                profit_percentage: 67,
                loss_percentage: 33,
                entry_price: Decimal::new(120_000, 0),
                position_type: PositionType::Long,
            },
            ChainLeg {
                id: "ukraine-russia-war".to_string(),
                title: "Ukraine - Russia war ends".to_string(),
                description: "The war between Ukraine and Russia ends before 2026".to_string(),
                current_odds: Decimal::new(28, 2),
                potential_reward: Decimal::new(357, 2),
                end_date: "Dec 31, 2026".to_string(),
                participants: 892,
                outcome: Some(Outcome::Yes),
                image_url: Some("/coin-logos/ethereum.png".to_string()),
                profit_percentage: 72,
                loss_percentage: 28,
                entry_price: Decimal::new(1_800_000, 0),
                position_type: PositionType::Long,
            },
        ],
        total_volume: Decimal::new(4_300_000, 0),
        chain_reward: Decimal::new(102, 1),
        status: ChainStatus::Open,
    }
}

/// Heatmap tiles in display order.
pub fn heat_categories() -> Vec<HeatCategory> {
    [
        (MarketCategory::Economics, 59),
        (MarketCategory::Sports, 50),
        (MarketCategory::Crypto, 55),
        (MarketCategory::Tech, 55),
        (MarketCategory::Health, 30),
        (MarketCategory::Science, 64),
        (MarketCategory::Music, 74),
        (MarketCategory::Esports, 69),
    ]
    .into_iter()
    .map(|(category, percentage)| HeatCategory {
        category,
        percentage,
    })
    .collect()
}

/// A list of markets with the filters the pages need.
#[derive(Debug, Clone, Default)]
pub struct MarketCatalog {
    markets: Vec<EventMarket>,
}

impl MarketCatalog {
    pub fn new(markets: Vec<EventMarket>) -> Self {
        Self { markets }
    }

    /// Catalog of the event grid markets.
    pub fn demo() -> Self {
        Self::new(event_markets())
    }

    pub fn markets(&self) -> &[EventMarket] {
        &self.markets
    }

    pub fn len(&self) -> usize {
        self.markets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.markets.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&EventMarket> {
        self.markets.iter().find(|m| m.id == id)
    }

    /// The `n` highest-volume markets, largest first.
    pub fn top_by_volume(&self, n: usize) -> Vec<&EventMarket> {
        let mut sorted: Vec<&EventMarket> = self.markets.iter().collect();
        sorted.sort_by(|a, b| b.volume.cmp(&a.volume));
        sorted.truncate(n);
        sorted
    }

    pub fn by_category(&self, category: MarketCategory) -> Vec<&EventMarket> {
        self.markets
            .iter()
            .filter(|m| m.category() == category)
            .collect()
    }

    /// Markets whose title refers to `coin`.
    pub fn by_coin(&self, coin: Coin) -> Vec<&EventMarket> {
        self.markets
            .iter()
            .filter(|m| coin_from_title(&m.title) == Some(coin))
            .collect()
    }

    /// Case-insensitive title search. An empty query matches everything.
    pub fn search(&self, query: &str) -> Vec<&EventMarket> {
        let needle = query.trim().to_lowercase();
        self.markets
            .iter()
            .filter(|m| needle.is_empty() || m.title.to_lowercase().contains(&needle))
            .collect()
    }

    pub fn total_volume(&self) -> Decimal {
        self.markets.iter().map(|m| m.volume).sum()
    }
}

/// Headline odds indicator on a whale card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OddsIndicator {
    /// The leading option is "Profit" with more than half the odds.
    pub is_positive: bool,
    /// Price in cents, scaled so 100% maps to 50 cents.
    pub cents: u32,
    pub percentage: u8,
}

impl OddsIndicator {
    pub fn from_leading(option: &MarketOption) -> Self {
        let is_positive = option.name.contains("Profit") && option.percent > 50;
        let cents = (Decimal::from(option.percent) / Decimal::ONE_HUNDRED * Decimal::new(50, 0))
            .round_dp_with_strategy(0, rust_decimal::RoundingStrategy::MidpointAwayFromZero)
            .to_u32()
            .unwrap_or(0);
        Self {
            is_positive,
            cents,
            percentage: option.percent,
        }
    }

    pub fn symbol(&self) -> &'static str {
        if self.is_positive {
            "+"
        } else {
            ""
        }
    }

    pub fn tone(&self) -> &'static str {
        if self.is_positive {
            "emerald"
        } else {
            "red"
        }
    }
}

/// Everything a whale card derives from its market.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WhaleCard {
    pub market_id: String,
    pub title: TitleClassification,
    pub logo_key: Option<&'static str>,
    pub top_options: Vec<MarketOption>,
    /// Total volume in the radial chart's format, e.g. `2.0M`.
    pub volume: String,
    pub profit_volume: Decimal,
    pub loss_volume: Decimal,
    pub split: PositionSplit,
    pub indicator: Option<OddsIndicator>,
    pub active: bool,
}

impl WhaleCard {
    pub fn from_market(market: &EventMarket) -> Self {
        let top: Vec<MarketOption> = market.top_options(2).into_iter().cloned().collect();

        let share = |label: &str| {
            top.iter()
                .find(|o| o.name.contains(label))
                .map_or(Decimal::ZERO, |o| {
                    market.volume.saturating_mul(Decimal::from(o.percent)) / Decimal::ONE_HUNDRED
                })
        };
        let profit_volume = share("Profit");
        let loss_volume = share("Lose");

        let title = classify_title(&market.title);
        Self {
            market_id: market.id.clone(),
            logo_key: title.coin.map(|c| c.logo_key()),
            title,
            indicator: top.first().map(OddsIndicator::from_leading),
            top_options: top,
            volume: VolumeFormat::RADIAL.format(market.volume),
            split: normalize_split(profit_volume, loss_volume),
            profit_volume,
            loss_volume,
            active: ACTIVE_WHALE_IDS.contains(&market.id.as_str()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PositionType;

    #[test]
    fn test_demo_catalog_contents() {
        let catalog = MarketCatalog::demo();
        assert_eq!(catalog.len(), 9);
        assert_eq!(catalog.get("e4").unwrap().formatted_volume(), "$5.3M");
        assert!(catalog.get("missing").is_none());
    }

    #[test]
    fn test_top_by_volume() {
        let catalog = MarketCatalog::demo();
        let ids: Vec<&str> = catalog
            .top_by_volume(3)
            .iter()
            .map(|m| m.id.as_str())
            .collect();
        assert_eq!(ids, vec!["e8", "e2", "e3"]);
    }

    #[test]
    fn test_filters() {
        let catalog = MarketCatalog::demo();
        assert_eq!(catalog.by_category(MarketCategory::Crypto).len(), 2);
        assert_eq!(catalog.by_category(MarketCategory::Other).len(), 1);
        assert_eq!(catalog.by_coin(Coin::Bitcoin)[0].id, "e7");
        assert_eq!(catalog.search("ELECTION").len(), 2);
        assert_eq!(catalog.search("  ").len(), 9);
    }

    #[test]
    fn test_total_volume() {
        let catalog = MarketCatalog::new(featured_events());
        assert_eq!(catalog.total_volume(), Decimal::new(6_816_894, 0));
        assert_eq!(MarketCatalog::default().total_volume(), Decimal::ZERO);
    }

    #[test]
    fn test_heat_categories() {
        let tiles = heat_categories();
        assert_eq!(tiles.len(), 8);
        assert_eq!(tiles[0].style().label, "Economics");
        assert_eq!(tiles[6].percentage, 74);
    }

    #[test]
    fn test_whale_card() {
        let market = &whale_markets()[0];
        let card = WhaleCard::from_market(market);

        assert_eq!(card.title.coin, Some(Coin::Bitcoin));
        assert_eq!(card.title.position, Some(PositionType::Long));
        assert_eq!(card.logo_key, Some("bitcoin"));
        assert_eq!(card.volume, "2.0M");
        assert_eq!(card.profit_volume, Decimal::new(1_266_300, 0));
        assert_eq!(card.loss_volume, Decimal::new(743_700, 0));
        assert_eq!(card.split.rounded(), (63, 37));
        assert!(card.active);

        let indicator = card.indicator.unwrap();
        assert!(indicator.is_positive);
        assert_eq!(indicator.cents, 32); // 31.5 rounds up
        assert_eq!(indicator.symbol(), "+");
    }

    #[test]
    fn test_inactive_whale_card() {
        let markets = whale_markets();
        let card = WhaleCard::from_market(&markets[3]);
        assert!(!card.active);
        assert_eq!(card.title.coin, Some(Coin::Bitcoin));
        assert_eq!(card.title.position, Some(PositionType::Short));
        assert_eq!(card.volume, "96.4K");

        let indicator = card.indicator.unwrap();
        assert!(!indicator.is_positive);
        assert_eq!(indicator.tone(), "red");
    }

    #[test]
    fn test_whale_card_without_profit_options() {
        let market = &event_markets()[3];
        let card = WhaleCard::from_market(market);
        assert_eq!(card.profit_volume, Decimal::ZERO);
        assert_eq!(card.split, PositionSplit::EVEN);
    }

    #[test]
    fn test_inflation_outlook() {
        let market = inflation_outlook();
        assert_eq!(market.category, Some(MarketCategory::Economics));
        assert_eq!(market.leading_option().unwrap().name, "Above 2.7%");
        assert_eq!(VolumeFormat::RADIAL.format(market.volume), "2.0M");
    }

    #[test]
    fn test_chained_prediction() {
        let chain = chained_prediction();
        assert_eq!(chain.legs.len(), 2);
        assert_eq!(chain.formatted_volume(), "$4.3M");
        assert_eq!(chain.participants(), 2139);
        assert_eq!(chain.status, ChainStatus::Open);

        let war = &chain.legs[1];
        assert_eq!(war.odds_label(), "28.0%");
        assert_eq!(war.reward_label(), "3.57x");
        assert_eq!(war.split().rounded(), (72, 28));
    }
}

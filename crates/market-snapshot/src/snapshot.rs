//! Dashboard snapshot assembly.

use market_core::catalog::{
    chained_prediction, featured_events, heat_categories, inflation_outlook, whale_markets,
    MarketCatalog, WhaleCard,
};
use market_core::classify::position_from_title;
use market_core::display::{PositionSplit, VolumeFormat};
use market_core::series::{
    convergent_series, heat_trends, oscillating_series, profit_probability_path, simulated_price,
    sparkline_color, HeatPoint, ProbabilityPoint, SeededRng, FEATURED_LINES,
};
use market_core::types::{
    BetSide, ChainLeg, ChainedPrediction, EventMarket, MarketOption, Position, PositionType,
};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::Serialize;
use serde_json::Value;
use wallet_session::{WalletSession, WalletSummary};

/// Everything the dashboard renders, as one serializable value.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSnapshot {
    pub seed: u32,
    pub total_volume: String,
    pub markets: Vec<MarketCard>,
    pub featured: Vec<FeaturedPanel>,
    pub featured_bet: FeaturedBetPanel,
    pub whales: Vec<WhaleCard>,
    pub heatmap: Vec<HeatTile>,
    pub chains: Vec<ChainCard>,
    pub wallet: WalletSummary,
    pub positions: Vec<PositionRow>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketCard {
    pub id: String,
    pub title: String,
    pub badge: String,
    pub badge_classes: String,
    pub image_url: String,
    pub volume: String,
    pub leading: Option<MarketOption>,
    pub chart: Vec<Value>,
}

/// Featured event panel; the chart converges on the two leading options.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeaturedPanel {
    pub id: String,
    pub title: String,
    pub volume: String,
    pub options: Vec<MarketOption>,
    pub chart: Vec<Value>,
}

/// The single featured bet with odds bars, a radial volume and an
/// oscillating chart.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeaturedBetPanel {
    pub id: String,
    pub title: String,
    pub badge: String,
    pub image_url: String,
    pub volume: String,
    pub profit_volume: Decimal,
    pub loss_volume: Decimal,
    pub options: Vec<MarketOption>,
    pub chart: Vec<Value>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HeatTile {
    pub label: &'static str,
    pub emoji: &'static str,
    pub classes: String,
    pub percentage: u8,
    pub trend: Vec<HeatPoint>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChainCard {
    pub id: String,
    pub volume: String,
    pub reward: String,
    pub status: &'static str,
    pub participants: u32,
    pub legs: Vec<ChainLegRow>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChainLegRow {
    pub id: String,
    pub title: String,
    pub description: String,
    pub end_date: String,
    pub odds: String,
    pub reward: String,
    pub participants: String,
    pub outcome: &'static str,
    pub coin: String,
    pub split: PositionSplit,
    pub sparkline: Vec<ProbabilityPoint>,
    pub color: &'static str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PositionRow {
    pub id: String,
    pub market_title: String,
    pub side: BetSide,
    pub amount: Decimal,
    pub potential_payout: Decimal,
    pub sparkline: Vec<ProbabilityPoint>,
    pub color: &'static str,
}

impl DashboardSnapshot {
    /// Build the snapshot. Every chart starts from a fresh generator on
    /// `seed`, so repeated runs print identical output. Heatmap trends use
    /// their own fixed seed.
    pub fn build(catalog: &MarketCatalog, session: &WalletSession, seed: u32) -> Self {
        let tiles = heat_categories();
        let trends = heat_trends(&tiles);

        Self {
            seed,
            total_volume: VolumeFormat::CARD.format(catalog.total_volume()),
            markets: catalog
                .markets()
                .iter()
                .map(|market| market_card(market, seed))
                .collect(),
            featured: featured_events()
                .iter()
                .map(|market| featured_panel(market, seed))
                .collect(),
            featured_bet: featured_bet_panel(&inflation_outlook(), seed),
            whales: whale_markets().iter().map(WhaleCard::from_market).collect(),
            heatmap: tiles
                .iter()
                .zip(trends)
                .map(|(tile, trend)| {
                    let style = tile.style();
                    HeatTile {
                        label: style.label,
                        emoji: style.emoji,
                        classes: style.classes(),
                        percentage: tile.percentage,
                        trend,
                    }
                })
                .collect(),
            chains: vec![chain_card(&chained_prediction(), seed)],
            wallet: session.summary(),
            positions: session
                .positions()
                .iter()
                .map(|position| position_row(position, seed))
                .collect(),
        }
    }
}

fn market_card(market: &EventMarket, seed: u32) -> MarketCard {
    let style = market.category().style();
    let (yes, no) = market.chart_targets();
    MarketCard {
        id: market.id.clone(),
        title: market.title.clone(),
        badge: format!("{} {}", style.emoji, style.label),
        badge_classes: style.classes(),
        image_url: market.image_or_placeholder().to_string(),
        volume: market.formatted_volume(),
        leading: market.leading_option().cloned(),
        chart: convergent_series(yes, no, &mut SeededRng::new(seed)).records(),
    }
}

fn featured_panel(market: &EventMarket, seed: u32) -> FeaturedPanel {
    let (yes, no) = market.chart_targets();
    FeaturedPanel {
        id: market.id.clone(),
        title: market.title.clone(),
        volume: market.formatted_volume(),
        options: market.top_options(2).into_iter().cloned().collect(),
        chart: convergent_series(yes, no, &mut SeededRng::new(seed)).records(),
    }
}

/// Profit and loss volumes are the first and second odds bar's share of the
/// total.
fn featured_bet_panel(market: &EventMarket, seed: u32) -> FeaturedBetPanel {
    let style = market.category().style();
    let options: Vec<MarketOption> = market.options.iter().take(2).cloned().collect();
    let share = |index: usize| {
        options.get(index).map_or(Decimal::ZERO, |o| {
            market.volume.saturating_mul(Decimal::from(o.percent)) / Decimal::ONE_HUNDRED
        })
    };

    FeaturedBetPanel {
        id: market.id.clone(),
        title: market.title.clone(),
        badge: format!("{} {}", style.emoji, style.label),
        image_url: market.image_or_placeholder().to_string(),
        volume: VolumeFormat::RADIAL.format(market.volume),
        profit_volume: share(0),
        loss_volume: share(1),
        chart: oscillating_series(&FEATURED_LINES, &mut SeededRng::new(seed)).records(),
        options,
    }
}

fn chain_card(chain: &ChainedPrediction, seed: u32) -> ChainCard {
    ChainCard {
        id: chain.id.clone(),
        volume: chain.formatted_volume(),
        reward: format!("{}x", chain.chain_reward.normalize()),
        status: chain.status.badge(),
        participants: chain.participants(),
        legs: chain.legs.iter().map(|leg| chain_leg_row(leg, seed)).collect(),
    }
}

fn chain_leg_row(leg: &ChainLeg, seed: u32) -> ChainLegRow {
    let mut rng = SeededRng::new(seed);
    let entry = leg.entry_price.to_f64().unwrap_or(0.0);
    let current = simulated_price(entry, &mut rng);
    let sparkline = profit_probability_path(entry, current, leg.position_type, &mut rng);

    ChainLegRow {
        id: leg.id.clone(),
        title: leg.title.clone(),
        description: leg.description.clone(),
        end_date: leg.end_date.clone(),
        odds: leg.odds_label(),
        reward: leg.reward_label(),
        participants: leg.participants_label(),
        outcome: leg.outcome_badge(),
        coin: leg.coin_symbol().to_string(),
        split: leg.split(),
        color: sparkline_color(&sparkline),
        sparkline,
    }
}

/// The odds stand in for the entry price; direction comes from the title
/// when it names one.
fn position_row(position: &Position, seed: u32) -> PositionRow {
    let mut rng = SeededRng::new(seed);
    let entry = position.odds.to_f64().unwrap_or(0.0);
    let current = simulated_price(entry, &mut rng);
    let direction = position_from_title(&position.market_title).unwrap_or(PositionType::Long);
    let sparkline = profit_probability_path(entry, current, direction, &mut rng);

    PositionRow {
        id: position.id.clone(),
        market_title: position.market_title.clone(),
        side: position.side,
        amount: position.amount,
        potential_payout: position.potential_payout,
        color: sparkline_color(&sparkline),
        sparkline,
    }
}

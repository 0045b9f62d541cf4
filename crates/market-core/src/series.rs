//! Deterministic chart series.
//!
//! Charts are rendered once on the server and again on the client, so every
//! "random" wiggle comes from a seeded xorshift32 generator: the same seed
//! always produces the same sequence.

use serde::Serialize;
use serde_json::{Map, Value};
use std::f64::consts::PI;

use crate::types::{HeatCategory, PositionType};

/// Seed used by every chart unless configured otherwise.
pub const DEFAULT_SEED: u32 = 0x9e37_79b1;

/// Number of points in a market chart.
pub const SERIES_LENGTH: usize = 50;

/// Number of points in a profit-probability sparkline.
pub const PROBABILITY_POINTS: usize = 15;

/// X-axis labels; each covers ten points.
pub const TIME_LABELS: [&str; 5] = ["3:26am", "4:58am", "6:31am", "8:04am", "2:36pm"];

/// Seeded xorshift32 generator yielding values in `[0, 1)`.
///
/// Cloning a generator forks it: both copies continue with the same sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeededRng {
    seed: u32,
    state: u32,
}

impl SeededRng {
    pub fn new(seed: u32) -> Self {
        Self { seed, state: seed }
    }

    pub fn seed(&self) -> u32 {
        self.seed
    }

    /// Advance the state (shifts 13, 17, 5) and return the raw 32-bit value.
    pub fn next_u32(&mut self) -> u32 {
        let mut s = self.state;
        s ^= s << 13;
        s ^= s >> 17;
        s ^= s << 5;
        self.state = s;
        s
    }

    /// Next value in `[0, 1)`, with six decimal digits of resolution.
    pub fn next_unit(&mut self) -> f64 {
        f64::from(self.next_u32() % 1_000_000) / 1_000_000.0
    }

    /// Rewind to the initial seed.
    pub fn reset(&mut self) {
        self.state = self.seed;
    }
}

impl Default for SeededRng {
    fn default() -> Self {
        Self::new(DEFAULT_SEED)
    }
}

impl Iterator for SeededRng {
    type Item = f64;

    fn next(&mut self) -> Option<f64> {
        Some(self.next_unit())
    }
}

/// Label for point `i` on the x-axis.
pub fn time_label(i: usize) -> String {
    TIME_LABELS
        .get(i / 10)
        .map(|label| label.to_string())
        .unwrap_or_else(|| format!("{}h", i))
}

/// A single x position with one value per series key.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartPoint {
    pub time: String,
    pub values: Vec<f64>,
}

/// A multi-line chart: `values[k]` of each point belongs to `keys[k]`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSeries {
    pub keys: Vec<String>,
    pub points: Vec<ChartPoint>,
}

impl ChartSeries {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// All values of one line.
    pub fn column(&self, key: &str) -> Option<Vec<f64>> {
        let idx = self.keys.iter().position(|k| k == key)?;
        Some(self.points.iter().map(|p| p.values[idx]).collect())
    }

    /// Last value of one line.
    pub fn last(&self, key: &str) -> Option<f64> {
        let idx = self.keys.iter().position(|k| k == key)?;
        self.points.last().map(|p| p.values[idx])
    }

    /// Row records keyed by line name, the shape chart components consume.
    pub fn records(&self) -> Vec<Value> {
        self.points
            .iter()
            .map(|point| {
                let mut row = Map::new();
                row.insert("time".to_string(), Value::from(point.time.clone()));
                for (key, value) in self.keys.iter().zip(&point.values) {
                    row.insert(key.clone(), Value::from(*value));
                }
                Value::Object(row)
            })
            .collect()
    }
}

/// Generic market chart: a slow sine around 50 plus ±5 noise, kept in 5..=95.
pub fn ambient_series(keys: &[&str], rng: &mut SeededRng) -> ChartSeries {
    let points = (0..SERIES_LENGTH)
        .map(|i| {
            let values = keys
                .iter()
                .map(|_| {
                    let noise = rng.next_unit() * 10.0 - 5.0;
                    let base = 50.0 + (i as f64 / 8.0).sin() * 20.0 + noise;
                    base.clamp(5.0, 95.0)
                })
                .collect();
            ChartPoint {
                time: time_label(i),
                values,
            }
        })
        .collect();

    ChartSeries {
        keys: keys.iter().map(|k| k.to_string()).collect(),
        points,
    }
}

/// Yes/no chart that wanders early and settles on the current percentages.
///
/// Convergence grows as `t^1.5`; noise shrinks to a fifth by the end.
pub fn convergent_series(yes_target: f64, no_target: f64, rng: &mut SeededRng) -> ChartSeries {
    let points = (0..SERIES_LENGTH)
        .map(|i| {
            let progress = i as f64 / SERIES_LENGTH as f64;
            let convergence = progress.powf(1.5);
            let drift = 1.0 - convergence;

            let start_yes = yes_target + (rng.next_unit() - 0.5) * 20.0;
            let start_no = no_target + (rng.next_unit() - 0.5) * 20.0;

            let movement_yes = (progress * PI * 3.0).sin() * 8.0 * drift;
            let movement_no = (progress * PI * 2.5).cos() * 8.0 * drift;

            let noise_scale = 1.0 - convergence * 0.8;
            let noise_yes = (rng.next_unit() - 0.5) * 6.0 * noise_scale;
            let noise_no = (rng.next_unit() - 0.5) * 6.0 * noise_scale;

            let yes = start_yes * drift + yes_target * convergence + movement_yes + noise_yes;
            let no = start_no * drift + no_target * convergence + movement_no + noise_no;

            ChartPoint {
                time: time_label(i),
                values: vec![yes.clamp(5.0, 95.0), no.clamp(5.0, 95.0)],
            }
        })
        .collect();

    ChartSeries {
        keys: vec!["yes".to_string(), "no".to_string()],
        points,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Wave {
    Sin,
    Cos,
}

impl Wave {
    fn at(&self, x: f64) -> f64 {
        match self {
            Self::Sin => x.sin(),
            Self::Cos => x.cos(),
        }
    }
}

/// One line of an oscillating chart:
/// `base + wave(i / period) * amplitude` plus noise spanning `noise_span`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TrendLine {
    pub key: &'static str,
    pub base: f64,
    pub amplitude: f64,
    pub period: f64,
    pub wave: Wave,
    pub noise_span: f64,
}

/// Lines of the featured CPI bet chart.
pub const FEATURED_LINES: [TrendLine; 2] = [
    TrendLine {
        key: "above27",
        base: 63.0,
        amplitude: 5.0,
        period: 8.0,
        wave: Wave::Sin,
        noise_span: 6.0,
    },
    TrendLine {
        key: "above28",
        base: 18.0,
        amplitude: 3.0,
        period: 6.0,
        wave: Wave::Cos,
        noise_span: 4.0,
    },
];

/// Unclamped oscillating lines; one draw per line per point, in line order.
pub fn oscillating_series(lines: &[TrendLine], rng: &mut SeededRng) -> ChartSeries {
    let points = (0..SERIES_LENGTH)
        .map(|i| {
            let values = lines
                .iter()
                .map(|line| {
                    let noise = rng.next_unit() * line.noise_span - line.noise_span / 2.0;
                    line.base + line.wave.at(i as f64 / line.period) * line.amplitude + noise
                })
                .collect();
            ChartPoint {
                time: time_label(i),
                values,
            }
        })
        .collect();

    ChartSeries {
        keys: lines.iter().map(|l| l.key.to_string()).collect(),
        points,
    }
}

/// Seed of the heatmap tile trends.
pub const HEAT_SEED: u32 = 0x1234_5678;

/// Points in a heatmap tile trend.
pub const HEAT_POINTS: usize = 16;

/// One point of a heatmap tile trend.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HeatPoint {
    pub x: usize,
    pub y: f64,
}

/// Trend of the tile at position `index` around `base` percent, kept in
/// 0..=100. Phase shifts with `index` so neighbouring tiles differ.
pub fn heat_trend(base: f64, index: usize, rng: &mut SeededRng) -> Vec<HeatPoint> {
    (0..HEAT_POINTS)
        .map(|i| {
            let wave = (i as f64 / 2.0 + index as f64).sin() * 8.0;
            let noise = rng.next_unit() * 6.0 - 3.0;
            HeatPoint {
                x: i,
                y: (base + (wave + noise)).clamp(0.0, 100.0),
            }
        })
        .collect()
}

/// Trends for every tile, drawn from one generator on [`HEAT_SEED`] in
/// display order.
pub fn heat_trends(tiles: &[HeatCategory]) -> Vec<Vec<HeatPoint>> {
    let mut rng = SeededRng::new(HEAT_SEED);
    tiles
        .iter()
        .enumerate()
        .map(|(index, tile)| heat_trend(f64::from(tile.percentage), index, &mut rng))
        .collect()
}

/// One step of a simulated position sparkline.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProbabilityPoint {
    pub time: usize,
    pub profit_probability: f64,
    pub price: f64,
    pub price_change: f64,
}

/// Stand-in current price within ±1% of entry, used until a live price arrives.
pub fn simulated_price(entry_price: f64, rng: &mut SeededRng) -> f64 {
    entry_price * (1.0 + (rng.next_unit() - 0.5) * 0.02)
}

/// Simulated path from entry to current price, mapped to the odds that the
/// position ends in profit. Odds move three times the price change, in the
/// position's direction, and stay within 0.15..=0.85.
///
/// Returns an empty path for a non-positive entry price.
pub fn profit_probability_path(
    entry_price: f64,
    current_price: f64,
    position: PositionType,
    rng: &mut SeededRng,
) -> Vec<ProbabilityPoint> {
    if entry_price <= 0.0 {
        return Vec::new();
    }

    let total_change = current_price - entry_price;
    let volatility = (total_change / entry_price).abs() * 0.5;

    (0..PROBABILITY_POINTS)
        .map(|i| {
            let x = i as f64;
            let progress = x / (PROBABILITY_POINTS - 1) as f64;
            let noise = ((x * 0.8).sin() + (x * 1.2).cos()) * volatility * entry_price;
            let base = entry_price + total_change * progress;
            let price = base + noise * (0.3 + 0.7 * rng.next_unit());
            let price_change = (price - entry_price) / entry_price;
            let profit_probability =
                (0.5 + position.direction() * price_change * 3.0).clamp(0.15, 0.85);

            ProbabilityPoint {
                time: i,
                profit_probability,
                price,
                price_change,
            }
        })
        .collect()
}

/// Stroke color for a sparkline: green when the last point favors profit.
pub fn sparkline_color(path: &[ProbabilityPoint]) -> &'static str {
    match path.last() {
        Some(p) if p.profit_probability > 0.5 => "#10b981",
        _ => "#ef4444",
    }
}

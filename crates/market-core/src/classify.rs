//! Classification of free-text market titles into coin and direction.
//!
//! Whale markets carry their subject only in the title ("Will the 50M$ LONG
//! on BTC get liquidated?"), so cards recover the coin logo, the position
//! direction and the size token by keyword matching.

use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;

use crate::types::PositionType;

/// Coins with a dedicated logo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Coin {
    Hype,
    Bitcoin,
    Ethereum,
    Xrp,
    Bnb,
    Solana,
    Doge,
}

impl Coin {
    /// Key of the logo asset.
    pub fn logo_key(&self) -> &'static str {
        match self {
            Self::Hype => "hype",
            Self::Bitcoin => "bitcoin",
            Self::Ethereum => "ethereum",
            Self::Xrp => "xrp",
            Self::Bnb => "bnb",
            Self::Solana => "solana",
            Self::Doge => "doge",
        }
    }

    /// Ticker symbol, also used to subscribe to a price feed.
    pub fn symbol(&self) -> &'static str {
        match self {
            Self::Hype => "HYPE",
            Self::Bitcoin => "BTC",
            Self::Ethereum => "ETH",
            Self::Xrp => "XRP",
            Self::Bnb => "BNB",
            Self::Solana => "SOL",
            Self::Doge => "DOGE",
        }
    }
}

// Checked in order; the first match wins.
static COIN_PATTERNS: LazyLock<[(Coin, Regex); 7]> = LazyLock::new(|| {
    [
        (Coin::Hype, word_pattern("hyperliquid|hype")),
        (Coin::Bitcoin, word_pattern("bitcoin|btc")),
        (Coin::Ethereum, word_pattern("ethereum|eth")),
        (Coin::Xrp, word_pattern("xrp")),
        (Coin::Bnb, word_pattern("binance|bnb")),
        (Coin::Solana, word_pattern("solana|sol")),
        (Coin::Doge, word_pattern("doge")),
    ]
});

static LONG_PATTERN: LazyLock<Regex> = LazyLock::new(|| literal_pattern(r"(?i)long"));
static SHORT_PATTERN: LazyLock<Regex> = LazyLock::new(|| literal_pattern(r"(?i)short"));
static AMOUNT_PATTERN: LazyLock<Regex> = LazyLock::new(|| literal_pattern(r"(\d+M\$)"));

fn word_pattern(alternatives: &str) -> Regex {
    literal_pattern(&format!(r"\b({})\b", alternatives))
}

// Constant patterns only. The unit tests force every static.
fn literal_pattern(pattern: &str) -> Regex {
    Regex::new(pattern).unwrap_or_else(|e| panic!("invalid title pattern {:?}: {}", pattern, e))
}

/// What a title says about the whale position behind it.
///
/// Every field is optional; a title with no recognizable tokens yields the
/// empty classification.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TitleClassification {
    pub coin: Option<Coin>,
    pub position: Option<PositionType>,
    /// Size token such as `"50M$"`.
    pub amount: Option<String>,
}

impl TitleClassification {
    pub fn is_empty(&self) -> bool {
        self.coin.is_none() && self.position.is_none() && self.amount.is_none()
    }
}

/// Detect the coin a title refers to.
pub fn coin_from_title(title: &str) -> Option<Coin> {
    let lowered = title.to_lowercase();
    COIN_PATTERNS
        .iter()
        .find(|(_, re)| re.is_match(&lowered))
        .map(|(coin, _)| *coin)
}

/// Detect the position direction; `LONG` wins when both words appear.
pub fn position_from_title(title: &str) -> Option<PositionType> {
    if LONG_PATTERN.is_match(title) {
        Some(PositionType::Long)
    } else if SHORT_PATTERN.is_match(title) {
        Some(PositionType::Short)
    } else {
        None
    }
}

pub fn classify_title(title: &str) -> TitleClassification {
    let amount = AMOUNT_PATTERN
        .captures(title)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string());

    TitleClassification {
        coin: coin_from_title(title),
        position: position_from_title(title),
        amount,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_patterns_compile() {
        assert_eq!(COIN_PATTERNS.len(), 7);
        assert!(LONG_PATTERN.is_match("LONG"));
        assert!(SHORT_PATTERN.is_match("short"));
        assert!(AMOUNT_PATTERN.is_match("75M$"));
    }

    #[test]
    fn test_whale_title() {
        let info = classify_title("Will the 50M$ LONG on BTC get liquidated this week?");
        assert_eq!(info.coin, Some(Coin::Bitcoin));
        assert_eq!(info.position, Some(PositionType::Long));
        assert_eq!(info.amount.as_deref(), Some("50M$"));
    }

    #[test]
    fn test_short_and_coin_names() {
        let info = classify_title("120M$ short on Ethereum closes in profit?");
        assert_eq!(info.coin, Some(Coin::Ethereum));
        assert_eq!(info.position, Some(PositionType::Short));
        assert_eq!(info.coin.unwrap().symbol(), "ETH");
    }

    #[test]
    fn test_first_matching_coin_wins() {
        assert_eq!(coin_from_title("HYPE flips BTC?"), Some(Coin::Hype));
        assert_eq!(coin_from_title("Binance lists DOGE"), Some(Coin::Bnb));
        let solana = coin_from_title("Solana ETF approved?").unwrap();
        assert_eq!(solana.logo_key(), "solana");
    }

    #[test]
    fn test_tokens_need_word_boundaries() {
        assert_eq!(coin_from_title("Will the Fed solve inflation?"), None);
        assert_eq!(coin_from_title("Hyperloop opens in 2026?"), None);
        assert_eq!(coin_from_title("Will Beth win the final?"), None);
    }

    #[test]
    fn test_no_match_is_empty() {
        let info = classify_title("Who will win the 2028 election?");
        assert!(info.is_empty());
        assert_eq!(info, TitleClassification::default());
    }
}

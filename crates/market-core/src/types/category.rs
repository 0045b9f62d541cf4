//! Market categories and their display styles.

use serde::{Deserialize, Serialize};

/// Topic a market belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum MarketCategory {
    Finance,
    Economics,
    Sports,
    Crypto,
    Politics,
    Tech,
    Health,
    Science,
    Music,
    Esports,
    /// Anything without a dedicated style.
    #[default]
    Other,
}

/// Badge styling for a category (utility class names).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CategoryStyle {
    pub label: &'static str,
    pub emoji: &'static str,
    pub bg: &'static str,
    pub text: &'static str,
    pub border: &'static str,
}

impl CategoryStyle {
    /// Combined class string as used on badges.
    pub fn classes(&self) -> String {
        format!("{} {} {}", self.bg, self.text, self.border)
    }
}

const fn style(
    label: &'static str,
    emoji: &'static str,
    color: Palette,
) -> CategoryStyle {
    CategoryStyle {
        label,
        emoji,
        bg: color.bg,
        text: color.text,
        border: color.border,
    }
}

#[derive(Clone, Copy)]
struct Palette {
    bg: &'static str,
    text: &'static str,
    border: &'static str,
}

const BLUE: Palette = Palette {
    bg: "bg-blue-100",
    text: "text-blue-800",
    border: "border-blue-200",
};
const GREEN: Palette = Palette {
    bg: "bg-green-100",
    text: "text-green-800",
    border: "border-green-200",
};
const ORANGE: Palette = Palette {
    bg: "bg-orange-100",
    text: "text-orange-800",
    border: "border-orange-200",
};
const PURPLE: Palette = Palette {
    bg: "bg-purple-100",
    text: "text-purple-800",
    border: "border-purple-200",
};
const RED: Palette = Palette {
    bg: "bg-red-100",
    text: "text-red-800",
    border: "border-red-200",
};
const CYAN: Palette = Palette {
    bg: "bg-cyan-100",
    text: "text-cyan-800",
    border: "border-cyan-200",
};
const PINK: Palette = Palette {
    bg: "bg-pink-100",
    text: "text-pink-800",
    border: "border-pink-200",
};
const INDIGO: Palette = Palette {
    bg: "bg-indigo-100",
    text: "text-indigo-800",
    border: "border-indigo-200",
};
const GRAY: Palette = Palette {
    bg: "bg-gray-100",
    text: "text-gray-800",
    border: "border-gray-200",
};

/// Category to style mapping. Every variant has exactly one entry.
pub const CATEGORY_STYLES: &[(MarketCategory, CategoryStyle)] = &[
    (MarketCategory::Finance, style("Finance", "💵", BLUE)),
    (MarketCategory::Economics, style("Economics", "📊", BLUE)),
    (MarketCategory::Sports, style("Sports", "⚽", GREEN)),
    (MarketCategory::Crypto, style("Crypto", "₿", ORANGE)),
    (MarketCategory::Politics, style("Politics", "🗳️", GRAY)),
    (MarketCategory::Tech, style("Tech", "💻", PURPLE)),
    (MarketCategory::Health, style("Health", "🏥", RED)),
    (MarketCategory::Science, style("Science", "🔬", CYAN)),
    (MarketCategory::Music, style("Music", "🎵", PINK)),
    (MarketCategory::Esports, style("Esports", "🎮", INDIGO)),
    (MarketCategory::Other, style("Market", "📈", GRAY)),
];

impl MarketCategory {
    pub const ALL: [MarketCategory; 11] = [
        MarketCategory::Finance,
        MarketCategory::Economics,
        MarketCategory::Sports,
        MarketCategory::Crypto,
        MarketCategory::Politics,
        MarketCategory::Tech,
        MarketCategory::Health,
        MarketCategory::Science,
        MarketCategory::Music,
        MarketCategory::Esports,
        MarketCategory::Other,
    ];

    /// Look up the badge style for this category.
    pub fn style(&self) -> CategoryStyle {
        CATEGORY_STYLES
            .iter()
            .find(|(category, _)| category == self)
            .map(|(_, style)| *style)
            .unwrap_or(CATEGORY_STYLES[CATEGORY_STYLES.len() - 1].1)
    }

    /// Parse a category key, falling back to `Other` for unknown keys.
    pub fn from_key(key: &str) -> Self {
        key.parse().unwrap_or_default()
    }

    pub fn key(&self) -> &'static str {
        match self {
            Self::Finance => "finance",
            Self::Economics => "economics",
            Self::Sports => "sports",
            Self::Crypto => "crypto",
            Self::Politics => "politics",
            Self::Tech => "tech",
            Self::Health => "health",
            Self::Science => "science",
            Self::Music => "music",
            Self::Esports => "esports",
            Self::Other => "other",
        }
    }
}

impl std::fmt::Display for MarketCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.key())
    }
}

impl std::str::FromStr for MarketCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .find(|category| category.key() == s.trim().to_lowercase())
            .copied()
            .ok_or_else(|| format!("Invalid market category: {}", s))
    }
}

/// A heatmap tile: category plus the share of bettors leaning "yes".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HeatCategory {
    pub category: MarketCategory,
    pub percentage: u8,
}

impl HeatCategory {
    pub fn style(&self) -> CategoryStyle {
        self.category.style()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_category_has_one_style() {
        for category in MarketCategory::ALL {
            let entries = CATEGORY_STYLES
                .iter()
                .filter(|(c, _)| *c == category)
                .count();
            assert_eq!(entries, 1, "{category} should have exactly one style");
        }
        assert_eq!(CATEGORY_STYLES.len(), MarketCategory::ALL.len());
    }

    #[test]
    fn test_known_styles() {
        let finance = MarketCategory::Finance.style();
        assert_eq!(finance.label, "Finance");
        assert_eq!(finance.classes(), "bg-blue-100 text-blue-800 border-blue-200");

        let crypto = MarketCategory::from_key("crypto").style();
        assert_eq!(crypto.label, "Crypto");
        assert_eq!(crypto.bg, "bg-orange-100");
    }

    #[test]
    fn test_unknown_key_falls_back_to_market() {
        let category = MarketCategory::from_key("weather");
        assert_eq!(category, MarketCategory::Other);
        assert_eq!(category.style().label, "Market");
        assert_eq!(category.style().bg, "bg-gray-100");
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!("CRYPTO".parse::<MarketCategory>(), Ok(MarketCategory::Crypto));
        assert_eq!(" Politics ".parse::<MarketCategory>(), Ok(MarketCategory::Politics));
        assert!("".parse::<MarketCategory>().is_err());
    }
}

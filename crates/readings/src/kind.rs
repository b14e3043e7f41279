use std::fmt;
use std::str::FromStr;

use qimen::CivilInstant;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Assets the quantification reading forecasts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CryptoAsset {
    Btc,
    Eth,
}

impl CryptoAsset {
    /// Upper-case ticker symbol.
    pub fn symbol(self) -> &'static str {
        match self {
            Self::Btc => "BTC",
            Self::Eth => "ETH",
        }
    }
}

impl fmt::Display for CryptoAsset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unsupported asset '{0}': expected BTC or ETH")]
pub struct ParseAssetError(String);

impl FromStr for CryptoAsset {
    type Err = ParseAssetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "BTC" => Ok(Self::Btc),
            "ETH" => Ok(Self::Eth),
            _ => Err(ParseAssetError(s.to_string())),
        }
    }
}

/// What the querent is asking about.
///
/// Every kind except [`ReadingKind::Destiny`] is charted at the clock's
/// current instant; a destiny reading is charted at the birth instant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ReadingKind {
    /// A free-form question without extra context.
    Inquiry { question: String },
    /// Bullish or bearish outlook for one asset.
    Quantification { asset: CryptoAsset },
    /// General investment guidance.
    Finance,
    /// Life overview from the birth chart.
    Destiny { birth: CivilInstant },
}

impl ReadingKind {
    /// Short name used in logs.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Inquiry { .. } => "inquiry",
            Self::Quantification { .. } => "quantification",
            Self::Finance => "finance",
            Self::Destiny { .. } => "destiny",
        }
    }

    pub fn question(&self) -> String {
        match self {
            Self::Inquiry { question } => question.clone(),
            Self::Quantification { asset } => format!("What is the outlook for {asset}?"),
            Self::Finance => "What should I consider when investing today?".to_string(),
            Self::Destiny { .. } => "What does this chart suggest about my future?".to_string(),
        }
    }

    pub fn context(&self) -> Option<String> {
        match self {
            Self::Inquiry { .. } => None,
            Self::Quantification { asset } => Some(format!(
                "Provide a bullish or bearish forecast for {asset} based on current market sentiment and the Qimen chart."
            )),
            Self::Finance => Some(
                "Offer a summary of the current economic climate and suggest prudent investment actions."
                    .to_string(),
            ),
            Self::Destiny { .. } => Some(
                "Provide an overview of the querent's career, romance, wealth and health prospects based on the birth chart."
                    .to_string(),
            ),
        }
    }

    /// Instant to chart instead of "now", if any.
    pub fn fixed_instant(&self) -> Option<CivilInstant> {
        match self {
            Self::Destiny { birth } => Some(*birth),
            _ => None,
        }
    }
}

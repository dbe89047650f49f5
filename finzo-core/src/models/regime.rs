use serde::{Deserialize, Serialize};
use tracing::warn;

/// Income-tax regime selected by the taxpayer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Regime {
    Old,
    #[default]
    New,
}

impl Regime {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Old => "old",
            Self::New => "new",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Old => "Old Tax Regime",
            Self::New => "New Tax Regime",
        }
    }

    /// Parses a regime selector. Case-insensitive, surrounding whitespace ignored.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "old" => Some(Self::Old),
            "new" => Some(Self::New),
            _ => None,
        }
    }

    /// Parses a regime selector, falling back to [`Regime::New`] for
    /// anything unrecognised.
    pub fn parse_or_default(s: &str) -> Self {
        Self::parse(s).unwrap_or_else(|| {
            warn!(input = %s, "unrecognised regime, falling back to new regime");
            Self::default()
        })
    }
}

/// Age band of the taxpayer. Only the old regime distinguishes between bands.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AgeBand {
    #[default]
    #[serde(rename = "below60")]
    Below60,
    #[serde(rename = "60to80")]
    From60To80,
    #[serde(rename = "above80")]
    Above80,
}

impl AgeBand {
    pub fn all() -> &'static [AgeBand] {
        &[AgeBand::Below60, AgeBand::From60To80, AgeBand::Above80]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Below60 => "below60",
            Self::From60To80 => "60to80",
            Self::Above80 => "above80",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Below60 => "Below 60 years",
            Self::From60To80 => "60 to 80 years",
            Self::Above80 => "Above 80 years",
        }
    }

    /// Parses an age band. Accepts both the canonical codes (`below60`,
    /// `60to80`, `above80`) and the range spellings used by web forms
    /// (`0-60`, `60-80`, `80+`).
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "below60" | "0-60" => Some(Self::Below60),
            "60to80" | "60-80" => Some(Self::From60To80),
            "above80" | "80+" => Some(Self::Above80),
            _ => None,
        }
    }

    /// Parses an age band, falling back to [`AgeBand::Below60`] for anything
    /// unrecognised.
    pub fn parse_or_default(s: &str) -> Self {
        Self::parse(s).unwrap_or_else(|| {
            warn!(input = %s, "unrecognised age band, falling back to below60");
            Self::default()
        })
    }
}

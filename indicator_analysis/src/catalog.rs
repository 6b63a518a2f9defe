//! Well-known provider series and their reporting cadence

use crate::error::{AnalyticsError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Reporting cadence of a series
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    /// Business days; weekends are never observation dates
    Daily,
    Weekly,
    Monthly,
    Quarterly,
    Annual,
}

impl Frequency {
    /// Cadence of a series identifier, defaulting to monthly for series
    /// outside the catalog
    pub fn for_series(series_id: &str) -> Frequency {
        known_indicator(series_id)
            .map(|indicator| indicator.frequency)
            .unwrap_or(Frequency::Monthly)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Frequency::Daily => "daily",
            Frequency::Weekly => "weekly",
            Frequency::Monthly => "monthly",
            Frequency::Quarterly => "quarterly",
            Frequency::Annual => "annual",
        }
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Frequency {
    type Err = AnalyticsError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "daily" | "d" | "1d" => Ok(Frequency::Daily),
            "weekly" | "w" | "1w" => Ok(Frequency::Weekly),
            "monthly" | "m" | "1m" => Ok(Frequency::Monthly),
            "quarterly" | "q" | "3m" => Ok(Frequency::Quarterly),
            "annual" | "yearly" | "a" | "1y" => Ok(Frequency::Annual),
            other => Err(AnalyticsError::InvalidParameter(format!(
                "Unsupported frequency: {}",
                other
            ))),
        }
    }
}

/// A catalogued provider series
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KnownIndicator {
    pub symbol: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub frequency: Frequency,
    pub units: &'static str,
}

static KNOWN_INDICATORS: [KnownIndicator; 6] = [
    KnownIndicator {
        symbol: "GDP",
        name: "Gross Domestic Product",
        description: "Quarterly measure of US economic output",
        frequency: Frequency::Quarterly,
        units: "Billions of Dollars",
    },
    KnownIndicator {
        symbol: "UNRATE",
        name: "Unemployment Rate",
        description: "Civilian unemployment rate in the US",
        frequency: Frequency::Monthly,
        units: "Percent",
    },
    KnownIndicator {
        symbol: "CPIAUCSL",
        name: "Consumer Price Index",
        description: "Consumer price index for all urban consumers: all items",
        frequency: Frequency::Monthly,
        units: "Index 1982-1984=100",
    },
    KnownIndicator {
        symbol: "DGS10",
        name: "10-Year Treasury Rate",
        description: "Market yield on U.S. Treasury securities at 10-year constant maturity",
        frequency: Frequency::Daily,
        units: "Percent",
    },
    KnownIndicator {
        symbol: "SP500",
        name: "S&P 500",
        description: "Standard & Poor's 500 stock market index",
        frequency: Frequency::Daily,
        units: "Index",
    },
    KnownIndicator {
        symbol: "FEDFUNDS",
        name: "Federal Funds Rate",
        description: "Interest rate at which depository institutions trade federal funds",
        frequency: Frequency::Monthly,
        units: "Percent",
    },
];

/// Every catalogued series
pub fn known_indicators() -> &'static [KnownIndicator] {
    &KNOWN_INDICATORS
}

/// Look up a series identifier (case-insensitive)
pub fn known_indicator(series_id: &str) -> Option<&'static KnownIndicator> {
    KNOWN_INDICATORS
        .iter()
        .find(|indicator| indicator.symbol.eq_ignore_ascii_case(series_id.trim()))
}

/// Descriptive metadata attached to analysis output.
///
/// The analyses never interpret these fields; they are passed through as
/// supplied by the caller or the catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeriesInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frequency: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub units: Option<String>,
}

impl From<&KnownIndicator> for SeriesInfo {
    fn from(indicator: &KnownIndicator) -> Self {
        Self {
            name: Some(indicator.name.to_string()),
            description: Some(indicator.description.to_string()),
            frequency: Some(indicator.frequency.to_string()),
            units: Some(indicator.units.to_string()),
        }
    }
}

/// Catalog metadata for a series, if it is a known one
pub fn known_info(series_id: &str) -> Option<SeriesInfo> {
    known_indicator(series_id).map(SeriesInfo::from)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frequency_for_known_series() {
        assert_eq!(Frequency::for_series("DGS10"), Frequency::Daily);
        assert_eq!(Frequency::for_series("sp500"), Frequency::Daily);
        assert_eq!(Frequency::for_series("GDP"), Frequency::Quarterly);
        assert_eq!(Frequency::for_series("UNRATE"), Frequency::Monthly);
    }

    #[test]
    fn test_unknown_series_defaults_to_monthly() {
        assert_eq!(Frequency::for_series("T10Y2Y"), Frequency::Monthly);
        assert_eq!(Frequency::for_series(""), Frequency::Monthly);
    }

    #[test]
    fn test_frequency_parsing() {
        assert_eq!("Daily".parse::<Frequency>().unwrap(), Frequency::Daily);
        assert_eq!("q".parse::<Frequency>().unwrap(), Frequency::Quarterly);
        assert_eq!("yearly".parse::<Frequency>().unwrap(), Frequency::Annual);
        assert!("fortnightly".parse::<Frequency>().is_err());
    }

    #[test]
    fn test_known_info() {
        let info = known_info("UNRATE").unwrap();
        assert_eq!(info.name.as_deref(), Some("Unemployment Rate"));
        assert_eq!(info.frequency.as_deref(), Some("monthly"));
        assert!(known_info("NOPE").is_none());
        assert_eq!(known_indicators().len(), 6);
    }
}

//! Provider response shapes as they arrive on the wire.
//!
//! The provider omits empty fields, so every container defaults to empty and
//! every scalar to its zero value. Numeric fields use [`WireNumber`] because
//! int64 values are encoded as JSON strings while smaller ints may arrive as
//! numbers.

use serde::{Deserialize, Deserializer};

/// Raw text of a numeric field, whatever JSON type carried it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WireNumber(String);

impl WireNumber {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<'de> Deserialize<'de> for WireNumber {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Text(String),
            Int(i64),
            Float(f64),
            Flag(bool),
        }

        Ok(match Option::<Raw>::deserialize(deserializer)? {
            Some(Raw::Text(text)) => Self(text),
            Some(Raw::Int(value)) => Self(value.to_string()),
            Some(Raw::Float(value)) => Self(value.to_string()),
            Some(Raw::Flag(value)) => Self(value.to_string()),
            None => Self::default(),
        })
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GenerateKeywordIdeasResponse {
    pub results: Vec<KeywordIdeaResult>,
    /// Provider-reported total; never used as the result count.
    pub total_size: WireNumber,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct KeywordIdeaResult {
    pub text: String,
    pub keyword_idea_metrics: RawKeywordMetrics,
}

/// Shared by idea results (`keywordIdeaMetrics`) and historical results
/// (`keywordMetrics`).
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawKeywordMetrics {
    pub avg_monthly_searches: WireNumber,
    pub competition: String,
    pub competition_index: WireNumber,
    pub low_top_of_page_bid_micros: WireNumber,
    pub high_top_of_page_bid_micros: WireNumber,
    pub monthly_search_volumes: Vec<RawMonthlySearchVolume>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawMonthlySearchVolume {
    pub year: WireNumber,
    pub month: String,
    pub monthly_searches: WireNumber,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GenerateHistoricalMetricsResponse {
    pub results: Vec<HistoricalMetricsResult>,
    pub metrics: Vec<HistoricalMetricsResult>,
}

impl GenerateHistoricalMetricsResponse {
    /// Current API versions answer under `results`; older payloads used `metrics`.
    pub fn into_rows(self) -> Vec<HistoricalMetricsResult> {
        if self.results.is_empty() {
            self.metrics
        } else {
            self.results
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HistoricalMetricsResult {
    pub text: String,
    pub keyword_metrics: RawKeywordMetrics,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GenerateForecastMetricsResponse {
    pub ad_group_forecast_metrics: Vec<RawAdGroupForecastMetrics>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawAdGroupForecastMetrics {
    pub keyword_forecast_metrics: Vec<RawKeywordForecastMetric>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawKeywordForecastMetric {
    pub keyword: RawForecastKeyword,
    pub metrics: RawForecastMetrics,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawForecastKeyword {
    pub text: String,
    pub match_type: String,
}

/// Forecast values are doubles, except that int64 fields such as
/// `costMicros` may also arrive string-encoded.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawForecastMetrics {
    #[serde(deserialize_with = "float_or_string")]
    pub impressions: Option<f64>,
    #[serde(deserialize_with = "float_or_string")]
    pub clicks: Option<f64>,
    #[serde(deserialize_with = "float_or_string")]
    pub cost_micros: Option<f64>,
    #[serde(deserialize_with = "float_or_string")]
    pub ctr: Option<f64>,
}

fn float_or_string<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = WireNumber::deserialize(deserializer)?;
    Ok(raw.as_str().trim().parse().ok())
}

//! Outbound request shapes and the builders that choose between them.

use serde::Serialize;
use time::{Date, Duration};

/// Forecast length used when the caller passes zero or a negative count.
pub const DEFAULT_FORECAST_DAYS: i32 = 30;

time::serde::format_description!(wire_date, Date, "[year]-[month]-[day]");

/// Idea-generation seed. Exactly one variant is sent per request, so the
/// provider's three mutually exclusive seed objects can never collide.
///
/// Flattened into [`KeywordIdeasRequest`] it serializes as one of
/// `keywordSeed`, `urlSeed` or `keywordAndUrlSeed`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum SeedSpec {
    #[serde(rename = "keywordSeed")]
    Keywords { keywords: Vec<String> },

    #[serde(rename = "urlSeed")]
    Url { url: String },

    #[serde(rename = "keywordAndUrlSeed")]
    KeywordsAndUrl { url: String, keywords: Vec<String> },
}

impl SeedSpec {
    /// Keywords and URL → combined; URL alone → URL-only; anything else →
    /// keyword-only, including an empty keyword list (the provider rejects it).
    pub fn select(keywords: &[String], url: &str) -> Self {
        let url = url.trim();
        match (keywords.is_empty(), url.is_empty()) {
            (false, false) => Self::KeywordsAndUrl {
                url: url.to_string(),
                keywords: keywords.to_vec(),
            },
            (true, false) => Self::Url {
                url: url.to_string(),
            },
            _ => Self::Keywords {
                keywords: keywords.to_vec(),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KeywordIdeasRequest {
    /// Language resource name, e.g. `languageConstants/1000`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(flatten)]
    pub seed: SeedSpec,
}

pub fn build_keyword_ideas_request(
    seed_keywords: &[String],
    url: &str,
    language: &str,
) -> KeywordIdeasRequest {
    let language = language.trim();
    KeywordIdeasRequest {
        language: (!language.is_empty()).then(|| language.to_string()),
        seed: SeedSpec::select(seed_keywords, url),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HistoricalMetricsRequest {
    pub keywords: Vec<String>,
}

pub fn build_historical_metrics_request(keywords: &[String]) -> HistoricalMetricsRequest {
    HistoricalMetricsRequest {
        keywords: keywords.to_vec(),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum KeywordMatchType {
    Broad,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastKeyword {
    pub text: String,
    pub match_type: KeywordMatchType,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BiddableKeyword {
    pub keyword: ForecastKeyword,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdGroupForecast {
    pub biddable_keywords: Vec<BiddableKeyword>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ManualCpcBiddingStrategy {
    /// Micros as a decimal string (int64 on the wire).
    pub max_cpc_bid_micros: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BiddingStrategy {
    pub manual_cpc_bidding_strategy: ManualCpcBiddingStrategy,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CampaignForecastSpec {
    pub bidding_strategy: BiddingStrategy,
    #[serde(with = "wire_date")]
    pub start_date: Date,
    #[serde(with = "wire_date")]
    pub end_date: Date,
    pub ad_groups: Vec<AdGroupForecast>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KeywordForecastRequest {
    pub campaign_forecast_spec: CampaignForecastSpec,
}

/// Calendar span of a forecast.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ForecastWindow {
    pub start: Date,
    pub end: Date,
    pub days: i32,
}

pub const fn effective_forecast_days(forecast_days: i32) -> i32 {
    if forecast_days <= 0 {
        DEFAULT_FORECAST_DAYS
    } else {
        forecast_days
    }
}

/// `start` is `today`; `end` is `days` calendar days later, rolling over
/// month and year boundaries. Saturates at the latest representable date.
pub fn forecast_window(today: Date, forecast_days: i32) -> ForecastWindow {
    let days = effective_forecast_days(forecast_days);
    let end = today
        .checked_add(Duration::days(i64::from(days)))
        .unwrap_or(Date::MAX);

    ForecastWindow {
        start: today,
        end,
        days,
    }
}

pub fn build_keyword_forecast_request(
    keywords: &[String],
    max_cpc_micros: i64,
    window: &ForecastWindow,
) -> KeywordForecastRequest {
    let biddable_keywords = keywords
        .iter()
        .map(|text| BiddableKeyword {
            keyword: ForecastKeyword {
                text: text.clone(),
                match_type: KeywordMatchType::Broad,
            },
        })
        .collect();

    KeywordForecastRequest {
        campaign_forecast_spec: CampaignForecastSpec {
            bidding_strategy: BiddingStrategy {
                manual_cpc_bidding_strategy: ManualCpcBiddingStrategy {
                    max_cpc_bid_micros: max_cpc_micros.to_string(),
                },
            },
            start_date: window.start,
            end_date: window.end,
            ad_groups: vec![AdGroupForecast { biddable_keywords }],
        },
    }
}

use serde::Serialize;

const fn is_zero(value: &i64) -> bool {
    *value == 0
}

/// Competition bucket reported when the provider has no estimate.
pub const COMPETITION_UNKNOWN: &str = "UNKNOWN";

/// Keyword suggestion with search volume and bid range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KeywordIdea {
    pub text: String,
    pub avg_monthly_searches: i64,
    /// `LOW`, `MEDIUM`, `HIGH` or `UNKNOWN`.
    pub competition: String,
    #[serde(skip_serializing_if = "is_zero")]
    pub low_top_of_page_bid_micros: i64,
    #[serde(skip_serializing_if = "is_zero")]
    pub high_top_of_page_bid_micros: i64,
}

/// Search volume for one calendar month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyVolume {
    pub year: i32,
    /// 1-12, or 0 when the provider sent an unrecognized month name.
    pub month: u8,
    pub monthly_searches: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KeywordMetrics {
    pub text: String,
    pub avg_monthly_searches: i64,
    pub competition: String,
    pub competition_index: i64,
    #[serde(skip_serializing_if = "is_zero")]
    pub low_top_of_page_bid_micros: i64,
    #[serde(skip_serializing_if = "is_zero")]
    pub high_top_of_page_bid_micros: i64,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub monthly_search_volumes: Vec<MonthlyVolume>,
}

/// Projected performance; values are passed through as the provider reports them.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KeywordForecast {
    pub text: String,
    pub impressions: f64,
    pub clicks: f64,
    pub cost_micros: f64,
    pub ctr: f64,
}

/// Ideas plus the seeds that produced them. `count` is derived from the
/// normalized ideas at construction and cannot drift from them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KeywordIdeasResult {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    seed_keywords: Vec<String>,
    #[serde(skip_serializing_if = "String::is_empty")]
    url: String,
    ideas: Vec<KeywordIdea>,
    count: usize,
}

impl KeywordIdeasResult {
    pub fn new(seed_keywords: Vec<String>, url: impl Into<String>, ideas: Vec<KeywordIdea>) -> Self {
        Self {
            seed_keywords,
            url: url.into(),
            count: ideas.len(),
            ideas,
        }
    }

    pub fn seed_keywords(&self) -> &[String] {
        &self.seed_keywords
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn ideas(&self) -> &[KeywordIdea] {
        &self.ideas
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn into_ideas(self) -> Vec<KeywordIdea> {
        self.ideas
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HistoricalMetricsResult {
    keywords: Vec<KeywordMetrics>,
    count: usize,
}

impl HistoricalMetricsResult {
    pub fn new(keywords: Vec<KeywordMetrics>) -> Self {
        Self {
            count: keywords.len(),
            keywords,
        }
    }

    pub fn keywords(&self) -> &[KeywordMetrics] {
        &self.keywords
    }

    pub fn count(&self) -> usize {
        self.count
    }
}

/// Forecast rows plus the effective parameters they were computed with.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastResult {
    keywords: Vec<KeywordForecast>,
    count: usize,
    forecast_days: i32,
    max_cpc_micros: i64,
}

impl ForecastResult {
    pub fn new(keywords: Vec<KeywordForecast>, forecast_days: i32, max_cpc_micros: i64) -> Self {
        Self {
            count: keywords.len(),
            keywords,
            forecast_days,
            max_cpc_micros,
        }
    }

    pub fn keywords(&self) -> &[KeywordForecast] {
        &self.keywords
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub const fn forecast_days(&self) -> i32 {
        self.forecast_days
    }

    pub const fn max_cpc_micros(&self) -> i64 {
        self.max_cpc_micros
    }
}

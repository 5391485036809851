//! # Domain Models
//!
//! Typed results returned by [`KeywordPlannerClient`](crate::KeywordPlannerClient).
//!
//! | Type | Description |
//! |------|-------------|
//! | [`KeywordIdea`] | Suggested keyword with volume, competition and bid range |
//! | [`KeywordIdeasResult`] | Ideas plus echoed seed keywords / URL |
//! | [`KeywordMetrics`] | Historical metrics for one keyword |
//! | [`MonthlyVolume`] | Searches in one calendar month |
//! | [`HistoricalMetricsResult`] | Metrics for every requested keyword |
//! | [`KeywordForecast`] | Projected impressions, clicks, cost and CTR |
//! | [`ForecastResult`] | Forecast rows plus echoed days / max CPC |
//!
//! All money is in micros (1,000,000 micros = one currency unit) and is
//! never converted to floating currency here.

mod models;

pub use models::{
    ForecastResult, HistoricalMetricsResult, KeywordForecast, KeywordIdea, KeywordIdeasResult,
    KeywordMetrics, MonthlyVolume, COMPETITION_UNKNOWN,
};

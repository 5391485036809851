//! Converts provider payloads into the typed domain results.
//!
//! Numeric strings that fail to parse become `0` and month names that are
//! not recognized become `0`. Neither ever fails a response. The
//! [`Normalizer`] counts coercion failures so callers can log them.

use crate::domain::{
    KeywordForecast, KeywordIdea, KeywordMetrics, MonthlyVolume, COMPETITION_UNKNOWN,
};
use crate::response::{
    GenerateForecastMetricsResponse, GenerateHistoricalMetricsResponse,
    GenerateKeywordIdeasResponse, RawKeywordMetrics, RawMonthlySearchVolume, WireNumber,
};

const MONTHS: [&str; 12] = [
    "JANUARY",
    "FEBRUARY",
    "MARCH",
    "APRIL",
    "MAY",
    "JUNE",
    "JULY",
    "AUGUST",
    "SEPTEMBER",
    "OCTOBER",
    "NOVEMBER",
    "DECEMBER",
];

/// `""` and anything that is not an integer give `0`.
pub fn lenient_i64(raw: &str) -> i64 {
    parse_wire_int(raw).unwrap_or(0)
}

/// Blank input reads as `Ok(0)`; only non-empty garbage is an error.
fn parse_wire_int(raw: &str) -> Result<i64, std::num::ParseIntError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(0);
    }
    raw.parse()
}

/// `JANUARY`..`DECEMBER` in any case to `1..=12`; everything else to `0`.
pub fn month_number(name: &str) -> u8 {
    let name = name.trim();
    MONTHS
        .iter()
        .zip(1u8..)
        .find_map(|(month, number)| month.eq_ignore_ascii_case(name).then_some(number))
        .unwrap_or(0)
}

pub fn normalize_competition(raw: &str) -> String {
    match raw.trim() {
        "" | "COMPETITION_UNSPECIFIED" => COMPETITION_UNKNOWN.to_string(),
        other => other.to_string(),
    }
}

/// Stateful only in its failure counter; create one per response.
#[derive(Debug, Default)]
pub struct Normalizer {
    failed_fields: usize,
}

impl Normalizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of non-empty numeric fields that were coerced to zero.
    pub const fn failed_fields(&self) -> usize {
        self.failed_fields
    }

    fn int(&mut self, value: &WireNumber) -> i64 {
        match parse_wire_int(value.as_str()) {
            Ok(parsed) => parsed,
            Err(_) => {
                self.failed_fields += 1;
                0
            }
        }
    }

    pub fn keyword_ideas(&mut self, raw: GenerateKeywordIdeasResponse) -> Vec<KeywordIdea> {
        raw.results
            .into_iter()
            .map(|row| {
                let metrics = row.keyword_idea_metrics;
                KeywordIdea {
                    text: row.text,
                    avg_monthly_searches: self.int(&metrics.avg_monthly_searches),
                    competition: normalize_competition(&metrics.competition),
                    low_top_of_page_bid_micros: self.int(&metrics.low_top_of_page_bid_micros),
                    high_top_of_page_bid_micros: self.int(&metrics.high_top_of_page_bid_micros),
                }
            })
            .collect()
    }

    pub fn historical_metrics(
        &mut self,
        raw: GenerateHistoricalMetricsResponse,
    ) -> Vec<KeywordMetrics> {
        raw.into_rows()
            .into_iter()
            .map(|row| self.keyword_metrics(row.text, row.keyword_metrics))
            .collect()
    }

    /// Forecast values are already native numbers; absent ones become `0.0`.
    pub fn forecast_metrics(&self, raw: GenerateForecastMetricsResponse) -> Vec<KeywordForecast> {
        raw.ad_group_forecast_metrics
            .into_iter()
            .flat_map(|group| group.keyword_forecast_metrics)
            .map(|row| KeywordForecast {
                text: row.keyword.text,
                impressions: row.metrics.impressions.unwrap_or_default(),
                clicks: row.metrics.clicks.unwrap_or_default(),
                cost_micros: row.metrics.cost_micros.unwrap_or_default(),
                ctr: row.metrics.ctr.unwrap_or_default(),
            })
            .collect()
    }

    fn keyword_metrics(&mut self, text: String, metrics: RawKeywordMetrics) -> KeywordMetrics {
        let monthly_search_volumes = metrics
            .monthly_search_volumes
            .iter()
            .map(|volume| self.monthly_volume(volume))
            .collect();

        KeywordMetrics {
            text,
            avg_monthly_searches: self.int(&metrics.avg_monthly_searches),
            competition: normalize_competition(&metrics.competition),
            competition_index: self.int(&metrics.competition_index),
            low_top_of_page_bid_micros: self.int(&metrics.low_top_of_page_bid_micros),
            high_top_of_page_bid_micros: self.int(&metrics.high_top_of_page_bid_micros),
            monthly_search_volumes,
        }
    }

    fn monthly_volume(&mut self, raw: &RawMonthlySearchVolume) -> MonthlyVolume {
        let year = self.int(&raw.year);
        MonthlyVolume {
            year: i32::try_from(year).unwrap_or(0),
            month: month_number(&raw.month),
            monthly_searches: self.int(&raw.monthly_searches),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_strings_are_coerced_leniently() {
        assert_eq!(lenient_i64(""), 0);
        assert_eq!(lenient_i64("12345"), 12345);
        assert_eq!(lenient_i64("not-a-number"), 0);
        assert_eq!(lenient_i64(" 42 "), 42);
    }

    #[test]
    fn counted_and_uncounted_coercions_agree_on_values() {
        for raw in ["", "   ", " 42 ", "-7", "not-a-number", "1.5"] {
            let mut normalizer = Normalizer::new();
            assert_eq!(
                normalizer.int(&WireNumber::new(raw)),
                lenient_i64(raw),
                "input {raw:?}"
            );
        }

        let mut normalizer = Normalizer::new();
        for raw in ["", "  ", "12", "x", "9.9"] {
            normalizer.int(&WireNumber::new(raw));
        }
        assert_eq!(normalizer.failed_fields(), 2);
    }

    #[test]
    fn month_names_decode_case_insensitively() {
        assert_eq!(month_number("JANUARY"), 1);
        assert_eq!(month_number("december"), 12);
        assert_eq!(month_number("Sept"), 0);
        assert_eq!(month_number("FOO"), 0);
    }

    #[test]
    fn unspecified_competition_becomes_unknown() {
        assert_eq!(normalize_competition(""), "UNKNOWN");
        assert_eq!(normalize_competition("COMPETITION_UNSPECIFIED"), "UNKNOWN");
        assert_eq!(normalize_competition("HIGH"), "HIGH");
    }

    #[test]
    fn idea_rows_are_normalized_and_failures_counted() {
        let raw: GenerateKeywordIdeasResponse = serde_json::from_str(
            r#"{
                "results": [
                    {
                        "text": "rust web framework",
                        "keywordIdeaMetrics": {
                            "avgMonthlySearches": "1900",
                            "competition": "MEDIUM",
                            "competitionIndex": "51",
                            "lowTopOfPageBidMicros": "850000",
                            "highTopOfPageBidMicros": "garbage"
                        }
                    },
                    { "text": "axum" }
                ],
                "totalSize": "99"
            }"#,
        )
        .expect("fixture should decode");

        let mut normalizer = Normalizer::new();
        let ideas = normalizer.keyword_ideas(raw);

        assert_eq!(ideas.len(), 2);
        assert_eq!(ideas[0].avg_monthly_searches, 1900);
        assert_eq!(ideas[0].competition, "MEDIUM");
        assert_eq!(ideas[0].low_top_of_page_bid_micros, 850_000);
        assert_eq!(ideas[0].high_top_of_page_bid_micros, 0);
        assert_eq!(ideas[1].avg_monthly_searches, 0);
        assert_eq!(ideas[1].competition, "UNKNOWN");
        assert_eq!(normalizer.failed_fields(), 1);
    }

    #[test]
    fn historical_rows_keep_monthly_order() {
        let raw: GenerateHistoricalMetricsResponse = serde_json::from_str(
            r#"{
                "results": [{
                    "text": "tokio",
                    "keywordMetrics": {
                        "avgMonthlySearches": "720",
                        "competition": "LOW",
                        "competitionIndex": 7,
                        "monthlySearchVolumes": [
                            { "year": "2024", "month": "NOVEMBER", "monthlySearches": "700" },
                            { "year": "2024", "month": "DECEMBER", "monthlySearches": "650" },
                            { "year": "2025", "month": "SMARCH", "monthlySearches": "810" }
                        ]
                    }
                }]
            }"#,
        )
        .expect("fixture should decode");

        let mut normalizer = Normalizer::new();
        let rows = normalizer.historical_metrics(raw);

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].competition_index, 7);
        let volumes = &rows[0].monthly_search_volumes;
        assert_eq!(
            volumes
                .iter()
                .map(|v| (v.year, v.month, v.monthly_searches))
                .collect::<Vec<_>>(),
            vec![(2024, 11, 700), (2024, 12, 650), (2025, 0, 810)]
        );
        assert_eq!(normalizer.failed_fields(), 0);
    }

    #[test]
    fn forecast_rows_flatten_ad_groups() {
        let raw: GenerateForecastMetricsResponse = serde_json::from_str(
            r#"{
                "adGroupForecastMetrics": [{
                    "keywordForecastMetrics": [
                        { "keyword": { "text": "a", "matchType": "BROAD" },
                          "metrics": { "impressions": 120.5, "clicks": 8.2, "costMicros": 4100000, "ctr": 0.068 } },
                        { "keyword": { "text": "b", "matchType": "BROAD" } }
                    ]
                }]
            }"#,
        )
        .expect("fixture should decode");

        let rows = Normalizer::new().forecast_metrics(raw);

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].text, "a");
        assert!((rows[0].impressions - 120.5).abs() < f64::EPSILON);
        assert!((rows[0].cost_micros - 4_100_000.0).abs() < f64::EPSILON);
        assert_eq!(rows[1].clicks, 0.0);
    }
}

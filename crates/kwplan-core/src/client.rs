use std::sync::Arc;

use time::{Date, OffsetDateTime};
use tokio_util::sync::CancellationToken;

use crate::config::ClientOptions;
use crate::credentials::CredentialSet;
use crate::domain::{ForecastResult, HistoricalMetricsResult, KeywordIdeasResult};
use crate::error::KeywordPlannerError;
use crate::http_client::{HttpClient, ReqwestHttpClient};
use crate::normalize::Normalizer;
use crate::oauth::{RefreshTokenSource, TokenSource};
use crate::request::{
    build_historical_metrics_request, build_keyword_forecast_request, build_keyword_ideas_request,
    forecast_window,
};
use crate::response::{
    GenerateForecastMetricsResponse, GenerateHistoricalMetricsResponse,
    GenerateKeywordIdeasResponse,
};
use crate::transport::AdsTransport;

pub const GENERATE_KEYWORD_IDEAS: &str = "generateKeywordIdeas";
pub const GENERATE_KEYWORD_HISTORICAL_METRICS: &str = "generateKeywordHistoricalMetrics";
pub const GENERATE_KEYWORD_FORECAST_METRICS: &str = "generateKeywordForecastMetrics";

/// Keyword Planner operations for one customer account.
///
/// Cheap to share behind an `Arc`; holds no per-call state.
#[derive(Debug, Clone)]
pub struct KeywordPlannerClient {
    transport: AdsTransport,
    options: ClientOptions,
    customer_id: String,
}

impl KeywordPlannerClient {
    /// Production client: reqwest transport and refresh-token OAuth2.
    pub fn new(credentials: &CredentialSet, options: ClientOptions) -> Self {
        let http_client: Arc<dyn HttpClient> = Arc::new(ReqwestHttpClient::new());
        let tokens = Arc::new(
            RefreshTokenSource::new(
                Arc::clone(&http_client),
                options.token_url.clone(),
                credentials.client_id.clone(),
                credentials.client_secret.clone(),
                credentials.refresh_token.clone(),
            )
            .with_timeout(options.timeout),
        );
        Self::with_parts(credentials, options, http_client, tokens)
    }

    pub fn with_parts(
        credentials: &CredentialSet,
        options: ClientOptions,
        http_client: Arc<dyn HttpClient>,
        tokens: Arc<dyn TokenSource>,
    ) -> Self {
        let transport = AdsTransport::new(
            http_client,
            tokens,
            credentials.developer_token.clone(),
            credentials.login_customer_id(),
        )
        .with_timeout(options.timeout);

        Self {
            transport,
            customer_id: credentials.customer_id.clone(),
            options,
        }
    }

    pub fn customer_id(&self) -> &str {
        &self.customer_id
    }

    fn endpoint(&self, method: &str) -> String {
        self.options.customer_endpoint(&self.customer_id, method)
    }

    pub async fn generate_keyword_ideas(
        &self,
        seed_keywords: &[String],
        url: &str,
        language: &str,
        cancel: &CancellationToken,
    ) -> Result<KeywordIdeasResult, KeywordPlannerError> {
        let request = build_keyword_ideas_request(seed_keywords, url, language);
        let raw: GenerateKeywordIdeasResponse = self
            .transport
            .post(&self.endpoint(GENERATE_KEYWORD_IDEAS), &request, cancel)
            .await?;

        let mut normalizer = Normalizer::new();
        let ideas = normalizer.keyword_ideas(raw);
        report_coercions(GENERATE_KEYWORD_IDEAS, &normalizer);

        Ok(KeywordIdeasResult::new(
            seed_keywords.to_vec(),
            url.trim(),
            ideas,
        ))
    }

    pub async fn historical_metrics(
        &self,
        keywords: &[String],
        cancel: &CancellationToken,
    ) -> Result<HistoricalMetricsResult, KeywordPlannerError> {
        let request = build_historical_metrics_request(keywords);
        let raw: GenerateHistoricalMetricsResponse = self
            .transport
            .post(
                &self.endpoint(GENERATE_KEYWORD_HISTORICAL_METRICS),
                &request,
                cancel,
            )
            .await?;

        let mut normalizer = Normalizer::new();
        let rows = normalizer.historical_metrics(raw);
        report_coercions(GENERATE_KEYWORD_HISTORICAL_METRICS, &normalizer);

        Ok(HistoricalMetricsResult::new(rows))
    }

    /// Forecast starting today (UTC). `forecast_days <= 0` means 30.
    pub async fn keyword_forecast(
        &self,
        keywords: &[String],
        max_cpc_micros: i64,
        forecast_days: i32,
        cancel: &CancellationToken,
    ) -> Result<ForecastResult, KeywordPlannerError> {
        let today = OffsetDateTime::now_utc().date();
        self.keyword_forecast_from(today, keywords, max_cpc_micros, forecast_days, cancel)
            .await
    }

    /// Same as [`keyword_forecast`](Self::keyword_forecast) with an explicit start date.
    pub async fn keyword_forecast_from(
        &self,
        start: Date,
        keywords: &[String],
        max_cpc_micros: i64,
        forecast_days: i32,
        cancel: &CancellationToken,
    ) -> Result<ForecastResult, KeywordPlannerError> {
        let window = forecast_window(start, forecast_days);
        let request = build_keyword_forecast_request(keywords, max_cpc_micros, &window);
        let raw: GenerateForecastMetricsResponse = self
            .transport
            .post(
                &self.endpoint(GENERATE_KEYWORD_FORECAST_METRICS),
                &request,
                cancel,
            )
            .await?;

        let rows = Normalizer::new().forecast_metrics(raw);
        Ok(ForecastResult::new(rows, window.days, max_cpc_micros))
    }
}

fn report_coercions(operation: &str, normalizer: &Normalizer) {
    let failed_fields = normalizer.failed_fields();
    if failed_fields > 0 {
        tracing::warn!(
            operation,
            failed_fields,
            "non-numeric values in numeric fields were read as zero"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::oauth::StaticTokenSource;
    use crate::test_support::ScriptedHttpClient;
    use time::Month;

    fn credentials() -> CredentialSet {
        CredentialSet {
            developer_token: String::from("dev"),
            client_id: String::from("cid"),
            client_secret: String::from("secret"),
            refresh_token: String::from("refresh"),
            customer_id: String::from("1234567890"),
            login_customer_id: String::new(),
        }
    }

    fn client(http: Arc<ScriptedHttpClient>) -> KeywordPlannerClient {
        KeywordPlannerClient::with_parts(
            &credentials(),
            ClientOptions::default().with_base_url("https://ads.test/v23"),
            http,
            Arc::new(StaticTokenSource::new("tok")),
        )
    }

    fn words(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[tokio::test]
    async fn ideas_echo_seeds_and_count_normalized_rows() {
        let http = Arc::new(ScriptedHttpClient::replying(
            200,
            r#"{"results":[{"text":"a"},{"text":"b"}],"totalSize":"500"}"#,
        ));
        let result = client(http.clone())
            .generate_keyword_ideas(
                &words(&["seed"]),
                "https://example.com",
                "",
                &CancellationToken::new(),
            )
            .await
            .expect("ideas");

        assert_eq!(result.count(), 2);
        assert_eq!(result.seed_keywords(), ["seed"]);
        assert_eq!(result.url(), "https://example.com");
        assert_eq!(
            http.recorded_requests()[0].url,
            "https://ads.test/v23/customers/1234567890:generateKeywordIdeas"
        );
    }

    #[tokio::test]
    async fn blank_url_is_echoed_empty_and_sends_keyword_seed() {
        let http = Arc::new(ScriptedHttpClient::replying(200, "{}"));
        let result = client(http.clone())
            .generate_keyword_ideas(&words(&["seed"]), "   ", "", &CancellationToken::new())
            .await
            .expect("ideas");

        assert_eq!(result.url(), "");
        let echoed = serde_json::to_value(&result).expect("serializable");
        assert!(echoed.get("url").is_none());

        let body = &http.recorded_requests()[0].body;
        assert!(body.contains("keywordSeed"));
        assert!(!body.contains("urlSeed"));
    }

    #[tokio::test]
    async fn forecast_posts_window_and_echoes_effective_days() {
        let http = Arc::new(ScriptedHttpClient::replying(200, "{}"));
        let start = Date::from_calendar_date(2024, Month::December, 15).expect("valid date");
        let result = client(http.clone())
            .keyword_forecast_from(start, &words(&["a"]), 2_000_000, 0, &CancellationToken::new())
            .await
            .expect("forecast");

        assert_eq!(result.forecast_days(), 30);
        assert_eq!(result.max_cpc_micros(), 2_000_000);
        assert_eq!(result.count(), 0);

        let request = &http.recorded_requests()[0];
        assert!(request.url.ends_with(":generateKeywordForecastMetrics"));
        assert!(request.body.contains(r#""startDate":"2024-12-15""#));
        assert!(request.body.contains(r#""endDate":"2025-01-14""#));
    }
}

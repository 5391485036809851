//! Tool-server boundary.
//!
//! Every call produces determinate text: the JSON result on success, or
//! `{"error": "<operation>: <message>"}` when the client call fails or the
//! input does not decode. Only a failure to serialize a successful result is
//! returned as `Err`.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio_util::sync::CancellationToken;

use crate::client::KeywordPlannerClient;
use crate::request::DEFAULT_FORECAST_DAYS;

pub const GENERATE_KEYWORD_IDEAS_TOOL: &str = "generate_keyword_ideas";
pub const GET_HISTORICAL_METRICS_TOOL: &str = "get_historical_metrics";
pub const GET_KEYWORD_FORECAST_TOOL: &str = "get_keyword_forecast";

pub const TOOL_NAMES: [&str; 3] = [
    GENERATE_KEYWORD_IDEAS_TOOL,
    GET_HISTORICAL_METRICS_TOOL,
    GET_KEYWORD_FORECAST_TOOL,
];

/// Prefixes of the `error` message, one per operation.
pub const IDEAS_FAILURE: &str = "generating keyword ideas";
pub const HISTORICAL_FAILURE: &str = "getting historical metrics";
pub const FORECAST_FAILURE: &str = "getting keyword forecast";

/// One currency unit.
pub const DEFAULT_MAX_CPC_MICROS: i64 = 1_000_000;

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct KeywordIdeasInput {
    pub seed_keywords: Vec<String>,
    pub url: String,
    /// e.g. `languageConstants/1000` for English.
    pub language: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct HistoricalMetricsInput {
    pub keywords: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct KeywordForecastInput {
    pub keywords: Vec<String>,
    pub max_cpc_micros: i64,
    pub forecast_days: i32,
}

impl Default for KeywordForecastInput {
    fn default() -> Self {
        Self {
            keywords: Vec::new(),
            max_cpc_micros: DEFAULT_MAX_CPC_MICROS,
            forecast_days: DEFAULT_FORECAST_DAYS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ErrorPayload {
    pub error: String,
}

impl ErrorPayload {
    pub fn new(operation: &str, error: impl std::fmt::Display) -> Self {
        Self {
            error: format!("{operation}: {error}"),
        }
    }

    pub fn into_text(self) -> String {
        serde_json::json!({ "error": self.error }).to_string()
    }

    /// Recognizes tool output that is an error payload. Result payloads
    /// never carry an `error` key, so they yield `None`.
    pub fn from_text(text: &str) -> Option<Self> {
        serde_json::from_str(text).ok()
    }
}

#[derive(Debug, Clone)]
pub struct KeywordTools {
    client: Arc<KeywordPlannerClient>,
    pretty: bool,
}

impl KeywordTools {
    pub fn new(client: Arc<KeywordPlannerClient>) -> Self {
        Self {
            client,
            pretty: false,
        }
    }

    /// Indent success payloads; error payloads stay compact.
    pub fn with_pretty_output(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    pub async fn generate_keyword_ideas(
        &self,
        input: KeywordIdeasInput,
        cancel: &CancellationToken,
    ) -> Result<String, serde_json::Error> {
        match self
            .client
            .generate_keyword_ideas(&input.seed_keywords, &input.url, &input.language, cancel)
            .await
        {
            Ok(result) => self.render(&result),
            Err(error) => Ok(failure(IDEAS_FAILURE, error)),
        }
    }

    pub async fn get_historical_metrics(
        &self,
        input: HistoricalMetricsInput,
        cancel: &CancellationToken,
    ) -> Result<String, serde_json::Error> {
        match self.client.historical_metrics(&input.keywords, cancel).await {
            Ok(result) => self.render(&result),
            Err(error) => Ok(failure(HISTORICAL_FAILURE, error)),
        }
    }

    pub async fn get_keyword_forecast(
        &self,
        input: KeywordForecastInput,
        cancel: &CancellationToken,
    ) -> Result<String, serde_json::Error> {
        match self
            .client
            .keyword_forecast(
                &input.keywords,
                input.max_cpc_micros,
                input.forecast_days,
                cancel,
            )
            .await
        {
            Ok(result) => self.render(&result),
            Err(error) => Ok(failure(FORECAST_FAILURE, error)),
        }
    }

    /// Dispatches by tool name with untyped JSON arguments.
    pub async fn call(
        &self,
        name: &str,
        arguments: Value,
        cancel: &CancellationToken,
    ) -> Result<String, serde_json::Error> {
        match name {
            GENERATE_KEYWORD_IDEAS_TOOL => match serde_json::from_value(arguments) {
                Ok(input) => self.generate_keyword_ideas(input, cancel).await,
                Err(error) => Ok(failure("decoding input", error)),
            },
            GET_HISTORICAL_METRICS_TOOL => match serde_json::from_value(arguments) {
                Ok(input) => self.get_historical_metrics(input, cancel).await,
                Err(error) => Ok(failure("decoding input", error)),
            },
            GET_KEYWORD_FORECAST_TOOL => match serde_json::from_value(arguments) {
                Ok(input) => self.get_keyword_forecast(input, cancel).await,
                Err(error) => Ok(failure("decoding input", error)),
            },
            other => Ok(failure("calling tool", format!("unknown tool '{other}'"))),
        }
    }

    fn render<T: Serialize>(&self, value: &T) -> Result<String, serde_json::Error> {
        if self.pretty {
            serde_json::to_string_pretty(value)
        } else {
            serde_json::to_string(value)
        }
    }
}

fn failure(operation: &str, error: impl std::fmt::Display) -> String {
    tracing::warn!(operation, error = %error, "tool call failed");
    ErrorPayload::new(operation, error).into_text()
}

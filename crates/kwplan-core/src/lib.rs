//! # Kwplan Core
//!
//! Client for the Google Ads Keyword Planner REST API.
//!
//! ## Overview
//!
//! This crate turns three keyword-research operations into Ads API calls and
//! reshapes the string-encoded responses into typed results:
//!
//! - **Credential resolution** from flags, environment and a `.env` dotfile
//! - **Request building** with mutually exclusive seed variants
//! - **Authenticated transport** with a fixed per-call timeout
//! - **Lenient normalization** of numeric strings and month names
//! - **Tool surface** that always answers with determinate JSON text
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`client`] | `KeywordPlannerClient`, the three public operations |
//! | [`config`] | Base URL, token URL and timeout settings |
//! | [`credentials`] | Per-field credential resolution and completeness |
//! | [`domain`] | Result models (ideas, historical metrics, forecasts) |
//! | [`dotenv`] | `key=value` dotfile reader |
//! | [`error`] | Call and token error types |
//! | [`http_client`] | HTTP client abstraction |
//! | [`normalize`] | Wire-to-domain conversion |
//! | [`oauth`] | Bearer token sources |
//! | [`request`] | Outbound request shapes and builders |
//! | [`response`] | Inbound wire shapes |
//! | [`tools`] | Tool-server boundary |
//! | [`transport`] | Authenticated JSON POST |
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use std::path::Path;
//!
//! use kwplan_core::{resolve_from_process, ClientOptions, CredentialFlags, KeywordPlannerClient};
//! use tokio_util::sync::CancellationToken;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let credentials = resolve_from_process(&CredentialFlags::default(), Path::new(".env"));
//!     let client = KeywordPlannerClient::new(&credentials, ClientOptions::default());
//!
//!     let seeds = vec![String::from("rust programming")];
//!     let result = client
//!         .generate_keyword_ideas(&seeds, "", "languageConstants/1000", &CancellationToken::new())
//!         .await?;
//!
//!     for idea in result.ideas() {
//!         println!("{} {}", idea.text, idea.avg_monthly_searches);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │  KeywordTools   │
//! └────────┬────────┘
//!          │
//!          ▼
//! ┌─────────────────┐     ┌──────────────────┐
//! │ KeywordPlanner  │────▶│ Request builders │
//! │ Client          │     └──────────────────┘
//! └────────┬────────┘
//!          │
//!          ▼
//! ┌─────────────────┐     ┌──────────────────┐
//! │ AdsTransport    │────▶│ TokenSource      │
//! └────────┬────────┘     └──────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐     ┌──────────────────┐
//! │ HttpClient      │     │ Normalizer       │
//! │ (reqwest)       │     └──────────────────┘
//! └─────────────────┘
//! ```

pub mod client;
pub mod config;
pub mod credentials;
pub mod domain;
pub mod dotenv;
pub mod error;
pub mod http_client;
pub mod normalize;
pub mod oauth;
pub mod request;
pub mod response;
pub mod tools;
pub mod transport;

#[cfg(test)]
mod test_support;

pub use client::KeywordPlannerClient;
pub use config::{ClientOptions, DEFAULT_BASE_URL, DEFAULT_TOKEN_URL};
pub use credentials::{
    normalize_customer_id, resolve, resolve_from_process, CredentialField, CredentialFlags,
    CredentialSet, CredentialSource, Environment, ProcessEnvironment, ResolutionSink, TracingSink,
};
pub use domain::{
    ForecastResult, HistoricalMetricsResult, KeywordForecast, KeywordIdea, KeywordIdeasResult,
    KeywordMetrics, MonthlyVolume,
};
pub use dotenv::{DotEnv, DEFAULT_DOTENV_FILE};
pub use error::{KeywordPlannerError, TokenError};
pub use http_client::{HttpClient, HttpError, HttpRequest, HttpResponse, ReqwestHttpClient};
pub use oauth::{RefreshTokenSource, StaticTokenSource, TokenSource};
pub use request::{SeedSpec, DEFAULT_FORECAST_DAYS};
pub use tools::{
    ErrorPayload, HistoricalMetricsInput, KeywordForecastInput, KeywordIdeasInput, KeywordTools,
};
pub use transport::AdsTransport;

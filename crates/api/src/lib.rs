//! Suggestion source for the Quill input.
//!
//! Candidates are owned by the surrounding application, not by the input
//! components. This crate provides the [`SuggestionSource`] seam plus two
//! implementations:
//!
//! - [`HttpSuggestionSource`] fetches `<base>actionSuggestion`, which answers
//!   with `{"suggestions": ["...", ...]}`
//! - [`StaticSuggestionSource`] serves a fixed list (offline use and tests)
//!
//! # Example
//!
//! ```ignore
//! use quill_api::{HttpSuggestionSource, SuggestionSource};
//!
//! let base = url::Url::parse("http://localhost:3000/")?;
//! let source = HttpSuggestionSource::new(&base)?;
//! let candidates = source.fetch().await?;
//! ```

use std::{env, time::Duration};

use async_trait::async_trait;
use reqwest::{Client, Url, header};
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

/// Endpoint, relative to the configured base URL, serving suggestions.
pub const SUGGESTION_ENDPOINT: &str = "actionSuggestion";

/// Failure to obtain suggestions.
#[derive(Debug, Error)]
pub enum SuggestionSourceError {
    #[error("suggestion request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("invalid suggestion endpoint: {0}")]
    Url(#[from] url::ParseError),
}

/// Response body of the suggestion endpoint.
#[derive(Debug, Default, Deserialize)]
pub struct SuggestionPayload {
    #[serde(default)]
    pub suggestions: Vec<String>,
}

/// Supplies the candidate strings offered by the suggestion overlay.
#[async_trait]
pub trait SuggestionSource: Send + Sync {
    async fn fetch(&self) -> Result<Vec<String>, SuggestionSourceError>;
}

/// Thin wrapper around a configured `reqwest::Client`.
#[derive(Debug, Clone)]
pub struct HttpSuggestionSource {
    endpoint: Url,
    http: Client,
}

impl HttpSuggestionSource {
    /// Build a source for an already validated base URL (ending in `/`).
    pub fn new(base: &Url) -> Result<Self, SuggestionSourceError> {
        let endpoint = suggestion_endpoint(base)?;
        let mut default_headers = header::HeaderMap::new();
        default_headers.insert(header::ACCEPT, header::HeaderValue::from_static("application/json"));

        let http = Client::builder()
            .default_headers(default_headers)
            .user_agent(format!("quill/0.1; {}", env::consts::OS))
            .timeout(Duration::from_secs(30))
            .build()?;
        Ok(Self { endpoint, http })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl SuggestionSource for HttpSuggestionSource {
    async fn fetch(&self) -> Result<Vec<String>, SuggestionSourceError> {
        debug!(url = %self.endpoint, "fetching suggestions");
        let payload: SuggestionPayload = self
            .http
            .get(self.endpoint.clone())
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        debug!(count = payload.suggestions.len(), "received suggestions");
        Ok(payload.suggestions)
    }
}

/// Serves a fixed candidate list.
#[derive(Debug, Clone, Default)]
pub struct StaticSuggestionSource {
    suggestions: Vec<String>,
}

impl StaticSuggestionSource {
    pub fn new(suggestions: Vec<String>) -> Self {
        Self { suggestions }
    }
}

#[async_trait]
impl SuggestionSource for StaticSuggestionSource {
    async fn fetch(&self) -> Result<Vec<String>, SuggestionSourceError> {
        Ok(self.suggestions.clone())
    }
}

/// `<base>actionSuggestion`.
pub fn suggestion_endpoint(base: &Url) -> Result<Url, url::ParseError> {
    base.join(SUGGESTION_ENDPOINT)
}

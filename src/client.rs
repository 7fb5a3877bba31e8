//! Search backend abstraction and HTTP implementation.

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use crate::config::SearchConfig;
use crate::result::{SearchResponse, SearchResult, TimeTaken};
use crate::{Result, SearchError};

/// Literal the API uses to report a rejected verification token.
const INVALID_TOKEN_ERROR: &str = "Invalid Turnstile token";

/// Trait for executing a search against the remote API.
///
/// The search service is opaque: given a query and a verification token it
/// answers with a JSON result set. Implementations may use real HTTP or an
/// in-memory stub for tests.
#[async_trait]
pub trait SearchBackend: Send + Sync {
    /// Executes the search and returns the decoded response payload.
    async fn search(&self, query: &str, token: &str) -> Result<SearchResponse>;
}

/// Wire envelope for the search endpoint: either a result set or an
/// `error` string, never both meaningfully.
#[derive(Debug, Deserialize)]
struct ApiEnvelope {
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    results: Vec<SearchResult>,
    #[serde(default)]
    matching_webpages: u64,
    #[serde(default)]
    time_taken: TimeTaken,
}

/// A search backend that talks to the HTTP endpoint via reqwest.
pub struct HttpBackend {
    client: Client,
    config: SearchConfig,
}

impl HttpBackend {
    /// Creates a backend for the configured endpoint.
    pub fn new(config: SearchConfig) -> Self {
        Self {
            client: Client::builder()
                .user_agent(concat!("gated-search/", env!("CARGO_PKG_VERSION")))
                .build()
                .expect("Failed to create HTTP client"),
            config,
        }
    }

    /// Creates a backend with a custom reqwest client.
    pub fn with_client(client: Client, config: SearchConfig) -> Self {
        Self { client, config }
    }

    fn request_url(&self, query: &str, token: &str) -> String {
        format!(
            "{}?q={}&results={}&token={}&links=true",
            self.config.base_url,
            urlencoding::encode(query),
            self.config.result_cap,
            urlencoding::encode(token),
        )
    }
}

#[async_trait]
impl SearchBackend for HttpBackend {
    async fn search(&self, query: &str, token: &str) -> Result<SearchResponse> {
        let url = self.request_url(query, token);
        debug!(query, "issuing search request");

        let response = self
            .client
            .get(&url)
            .header(CONTENT_TYPE, "application/json")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(SearchError::Status(status.as_u16()));
        }

        let envelope: ApiEnvelope = response
            .json()
            .await
            .map_err(|e| SearchError::Parse(e.to_string()))?;

        if let Some(message) = envelope.error {
            if message == INVALID_TOKEN_ERROR {
                return Err(SearchError::InvalidToken);
            }
            return Err(SearchError::Api(message));
        }

        Ok(SearchResponse {
            results: envelope.results,
            matching_webpages: envelope.matching_webpages,
            time_taken: envelope.time_taken,
        })
    }
}

//! Client configuration.

use serde::{Deserialize, Serialize};

/// Environment variable naming the search endpoint.
pub const ENV_BASE_URL: &str = "GATED_SEARCH_BASE_URL";
/// Environment variable naming the challenge-widget site key.
pub const ENV_SITE_KEY: &str = "GATED_SEARCH_SITE_KEY";

/// Configuration for the search client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Base URL of the search endpoint.
    pub base_url: String,
    /// Site key handed to the challenge provider when rendering a widget.
    #[serde(default)]
    pub site_key: String,
    /// Maximum number of results requested from the API.
    #[serde(default = "default_result_cap")]
    pub result_cap: u32,
    /// Number of results per display page.
    #[serde(default = "default_page_size")]
    pub page_size: usize,
}

fn default_result_cap() -> u32 {
    200
}

fn default_page_size() -> usize {
    10
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            site_key: String::new(),
            result_cap: default_result_cap(),
            page_size: default_page_size(),
        }
    }
}

impl SearchConfig {
    /// Creates a configuration for the given endpoint with defaults.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    /// Sets the challenge-widget site key.
    pub fn with_site_key(mut self, site_key: impl Into<String>) -> Self {
        self.site_key = site_key.into();
        self
    }

    /// Sets the result cap requested from the API.
    pub fn with_result_cap(mut self, cap: u32) -> Self {
        self.result_cap = cap;
        self
    }

    /// Sets the display page size.
    pub fn with_page_size(mut self, size: usize) -> Self {
        self.page_size = size;
        self
    }

    /// Loads endpoint and site key from the environment, with defaults for
    /// everything else. Unset variables yield empty strings.
    pub fn from_env() -> Self {
        Self {
            base_url: std::env::var(ENV_BASE_URL).unwrap_or_default(),
            site_key: std::env::var(ENV_SITE_KEY).unwrap_or_default(),
            ..Default::default()
        }
    }
}

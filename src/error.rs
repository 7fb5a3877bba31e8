//! Error types for the search client.

use thiserror::Error;

/// Result type alias for search operations.
pub type Result<T> = std::result::Result<T, SearchError>;

/// Errors that can occur while executing a gated search.
#[derive(Error, Debug)]
pub enum SearchError {
    /// No verification token was available when the search was attempted.
    #[error("no verification token available")]
    MissingToken,

    /// HTTP request failed at the transport level.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The search endpoint answered with a non-success status.
    #[error("search endpoint returned HTTP status {0}")]
    Status(u16),

    /// The API rejected the verification token.
    #[error("verification token rejected by the search API")]
    InvalidToken,

    /// Any other error reported in the API payload.
    #[error("search API error: {0}")]
    Api(String),

    /// Failed to parse the response body.
    #[error("failed to parse response: {0}")]
    Parse(String),

    /// URL parsing error.
    #[error("URL parsing error: {0}")]
    UrlParse(#[from] url::ParseError),
}

impl SearchError {
    /// Message shown to the person searching.
    ///
    /// Token problems get a "confirm you are human" wording; API-reported
    /// errors are surfaced verbatim; everything else collapses into a
    /// generic fetch-failure message carrying the cause.
    pub fn user_message(&self) -> String {
        match self {
            Self::MissingToken => {
                "We couldn't confirm if you were human. Please try searching again from the home page."
                    .to_string()
            }
            Self::InvalidToken => {
                "We couldn't confirm if you were human. Please try again.".to_string()
            }
            Self::Api(message) => message.clone(),
            other => format!("An error occurred while fetching search results: {}", other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_missing_token() {
        let err = SearchError::MissingToken;
        assert_eq!(err.to_string(), "no verification token available");
    }

    #[test]
    fn test_error_display_status() {
        let err = SearchError::Status(503);
        assert_eq!(err.to_string(), "search endpoint returned HTTP status 503");
    }

    #[test]
    fn test_error_display_api() {
        let err = SearchError::Api("rate limit exceeded".to_string());
        assert_eq!(err.to_string(), "search API error: rate limit exceeded");
    }

    #[test]
    fn test_error_display_parse() {
        let err = SearchError::Parse("invalid JSON".to_string());
        assert_eq!(err.to_string(), "failed to parse response: invalid JSON");
    }

    #[test]
    fn test_user_message_missing_token() {
        let msg = SearchError::MissingToken.user_message();
        assert!(msg.contains("home page"));
    }

    #[test]
    fn test_user_message_invalid_token() {
        let msg = SearchError::InvalidToken.user_message();
        assert!(msg.contains("try again"));
        assert!(!msg.contains("home page"));
    }

    #[test]
    fn test_user_message_api_verbatim() {
        let msg = SearchError::Api("quota exhausted".to_string()).user_message();
        assert_eq!(msg, "quota exhausted");
    }

    #[test]
    fn test_user_message_status_generic() {
        let msg = SearchError::Status(500).user_message();
        assert!(msg.starts_with("An error occurred while fetching search results"));
        assert!(msg.contains("500"));
    }

    #[test]
    fn test_error_debug() {
        let err = SearchError::InvalidToken;
        let debug_str = format!("{:?}", err);
        assert!(debug_str.contains("InvalidToken"));
    }
}

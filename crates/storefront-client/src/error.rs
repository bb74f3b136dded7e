//! # Client Error Types
//!
//! Error types for Product Store calls.
//!
//! ## Error Categories
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Client Error Categories                           │
//! │                                                                         │
//! │  ┌─────────────────┐  ┌─────────────────┐  ┌─────────────────────────┐ │
//! │  │  Configuration  │  │   Transport     │  │     Response            │ │
//! │  │                 │  │                 │  │                         │ │
//! │  │  InvalidConfig  │  │  Connection     │  │  HttpStatus (non-2xx)   │ │
//! │  │  InvalidUrl     │  │  Timeout        │  │  DecodeFailed           │ │
//! │  │                 │  │  Request        │  │                         │ │
//! │  └─────────────────┘  └─────────────────┘  └─────────────────────────┘ │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The `Display` text of these errors carries transport detail and is meant
//! for logs. Anything shown to a shopper goes through a generic message
//! chosen by the caller.

use thiserror::Error;

/// Result type alias for Product Store calls.
pub type ClientResult<T> = Result<T, ClientError>;

/// Every way a Product Store call can fail.
#[derive(Debug, Error)]
pub enum ClientError {
    // =========================================================================
    // Configuration Errors
    // =========================================================================
    /// Invalid client configuration.
    #[error("Invalid client configuration: {0}")]
    InvalidConfig(String),

    /// Base URL could not be parsed or cannot carry a path.
    #[error("Invalid API URL: {0}")]
    InvalidUrl(String),

    // =========================================================================
    // Transport Errors
    // =========================================================================
    /// No response: DNS, refused connection, TLS, reset.
    #[error("Connection to {url} failed: {reason}")]
    ConnectionFailed { url: String, reason: String },

    /// Configured request timeout elapsed.
    #[error("Request to {url} timed out")]
    Timeout { url: String },

    /// Any other request-level failure.
    #[error("Request to {url} failed: {reason}")]
    Request { url: String, reason: String },

    // =========================================================================
    // Response Errors
    // =========================================================================
    /// Server answered with a non-2xx status.
    #[error("{url} returned HTTP {status}")]
    HttpStatus { url: String, status: u16 },

    /// Body was not the expected JSON shape.
    #[error("Failed to decode response from {url}: {reason}")]
    DecodeFailed { url: String, reason: String },
}

impl ClientError {
    /// Maps a reqwest transport error, keeping the request URL for logs.
    pub(crate) fn from_transport(url: &str, err: reqwest::Error) -> Self {
        let url = url.to_string();
        if err.is_timeout() {
            ClientError::Timeout { url }
        } else if err.is_connect() {
            ClientError::ConnectionFailed {
                url,
                reason: err.to_string(),
            }
        } else if err.is_decode() {
            ClientError::DecodeFailed {
                url,
                reason: err.to_string(),
            }
        } else {
            ClientError::Request {
                url,
                reason: err.to_string(),
            }
        }
    }

    /// True if no HTTP response was received at all.
    pub fn is_network_error(&self) -> bool {
        matches!(
            self,
            ClientError::ConnectionFailed { .. }
                | ClientError::Timeout { .. }
                | ClientError::Request { .. }
        )
    }

    /// True if the server answered but the answer was unusable.
    pub fn is_response_error(&self) -> bool {
        matches!(
            self,
            ClientError::HttpStatus { .. } | ClientError::DecodeFailed { .. }
        )
    }

    /// True if this error indicates a configuration problem.
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            ClientError::InvalidConfig(_) | ClientError::InvalidUrl(_)
        )
    }
}

impl From<url::ParseError> for ClientError {
    fn from(err: url::ParseError) -> Self {
        ClientError::InvalidUrl(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_categories() {
        let status = ClientError::HttpStatus {
            url: "https://fakestoreapi.com/products".into(),
            status: 503,
        };
        assert!(status.is_response_error());
        assert!(!status.is_network_error());

        let refused = ClientError::ConnectionFailed {
            url: "http://127.0.0.1:1/products".into(),
            reason: "connection refused".into(),
        };
        assert!(refused.is_network_error());
        assert!(!refused.is_config_error());

        assert!(ClientError::InvalidUrl("nope".into()).is_config_error());
    }

    #[test]
    fn test_error_display_keeps_detail_for_logs() {
        let err = ClientError::HttpStatus {
            url: "https://fakestoreapi.com/products".into(),
            status: 404,
        };
        assert_eq!(
            err.to_string(),
            "https://fakestoreapi.com/products returned HTTP 404"
        );
    }

    #[test]
    fn test_url_parse_error_converts() {
        let err: ClientError = url::Url::parse("not a url").unwrap_err().into();
        assert!(matches!(err, ClientError::InvalidUrl(_)));
    }
}

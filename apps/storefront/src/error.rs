//! # App Error Types
//!
//! `AppError` for the application layer and `UserError`, the sanitized
//! form that reaches the presentational layer.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in the Storefront                         │
//! │                                                                         │
//! │  ProductStore call fails                                                │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ClientError::HttpStatus { url, status: 503 }                           │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  UserError::from(err) ── tracing::error!(raw error) ──► log             │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  { code: "FETCH_FAILED", message: "Failed to fetch products" }          │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  view.error ──► presentational layer                                    │
//! │                                                                         │
//! │  URLs, status codes and transport detail stay in the log.              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;
use thiserror::Error;
use ts_rs::TS;

use storefront_client::ClientError;
use storefront_core::PRODUCT_FETCH_FAILED;

/// Result type alias for application operations.
pub type AppResult<T> = Result<T, AppError>;

/// Application-level errors.
#[derive(Debug, Error)]
pub enum AppError {
    // =========================================================================
    // Configuration Errors
    // =========================================================================
    /// Config file exists but could not be parsed.
    #[error("Failed to parse config: {0}")]
    ConfigParse(String),

    /// Config could not be written.
    #[error("Failed to save config: {0}")]
    ConfigSave(String),

    /// Config parsed but is not usable.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    // =========================================================================
    // Downstream Errors
    // =========================================================================
    #[error(transparent)]
    Client(#[from] ClientError),

    // =========================================================================
    // Controller Errors
    // =========================================================================
    /// The controller task is gone; the handle can no longer deliver actions.
    #[error("Storefront controller has stopped")]
    ControllerStopped,
}

impl From<toml::de::Error> for AppError {
    fn from(err: toml::de::Error) -> Self {
        AppError::ConfigParse(err.to_string())
    }
}

impl From<toml::ser::Error> for AppError {
    fn from(err: toml::ser::Error) -> Self {
        AppError::ConfigSave(err.to_string())
    }
}

impl AppError {
    /// True if this error indicates a configuration problem.
    pub fn is_config_error(&self) -> bool {
        match self {
            AppError::ConfigParse(_) | AppError::ConfigSave(_) | AppError::InvalidConfig(_) => {
                true
            }
            AppError::Client(e) => e.is_config_error(),
            _ => false,
        }
    }
}

// =============================================================================
// User-Facing Error
// =============================================================================

/// Error as shown to a shopper.
///
/// ## Serialization
/// ```json
/// {
///   "code": "FETCH_FAILED",
///   "message": "Failed to fetch products"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct UserError {
    /// Machine-readable error code
    pub code: ErrorCode,

    /// Generic, display-safe message
    pub message: String,
}

/// Error codes for the presentational layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Catalog could not be fetched
    FetchFailed,

    /// Storefront is misconfigured
    ConfigError,
}

impl UserError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        UserError {
            code,
            message: message.into(),
        }
    }

    /// The catalog fetch failure shown over the product grid.
    pub fn fetch_failed() -> Self {
        UserError::new(ErrorCode::FetchFailed, PRODUCT_FETCH_FAILED)
    }
}

/// Converts client errors, logging the transport detail.
impl From<ClientError> for UserError {
    fn from(err: ClientError) -> Self {
        if err.is_config_error() {
            tracing::error!("Product store misconfigured: {}", err);
            return UserError::new(ErrorCode::ConfigError, "Storefront is misconfigured");
        }

        // Log the actual error but return a generic message
        tracing::error!("Product fetch failed: {}", err);
        UserError::fetch_failed()
    }
}

impl std::fmt::Display for UserError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for UserError {}

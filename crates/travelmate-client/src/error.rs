//! # Client Error Types
//!
//! Errors raised at the I/O boundary: configuration, transport, and the
//! REST responses themselves.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Client Error Categories                            │
//! │                                                                         │
//! │  ┌─────────────────┐  ┌─────────────────┐  ┌─────────────────────────┐ │
//! │  │  Configuration  │  │   Transport     │  │     Response            │ │
//! │  │                 │  │                 │  │                         │ │
//! │  │  InvalidConfig  │  │  Network        │  │  Rejected (non-2xx)     │ │
//! │  │  InvalidUrl     │  │  Timeout        │  │  UnexpectedShape        │ │
//! │  │  ConfigLoad/Save│  │                 │  │  Decode                 │ │
//! │  └─────────────────┘  └─────────────────┘  └─────────────────────────┘ │
//! │                                                                         │
//! │  ┌─────────────────┐  ┌─────────────────┐                              │
//! │  │    Session      │  │     Core        │                              │
//! │  │  MissingSession │  │  CoreError      │                              │
//! │  └─────────────────┘  └─────────────────┘                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;
use travelmate_core::CoreError;

/// Result type alias for client operations.
pub type ClientResult<T> = Result<T, ClientError>;

/// Shown for every failure that never got a usable answer from the server.
pub const NETWORK_RETRY_MESSAGE: &str =
    "Could not reach TravelMate. Check your connection and try again.";

/// Shown when the server answered with something we cannot read.
pub const UNREADABLE_RESPONSE_MESSAGE: &str =
    "TravelMate sent a response we could not understand. Please try again.";

#[derive(Debug, Error)]
pub enum ClientError {
    // =========================================================================
    // Configuration Errors
    // =========================================================================
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Invalid API URL: {0}")]
    InvalidUrl(String),

    #[error("Failed to load config: {0}")]
    ConfigLoadFailed(String),

    #[error("Failed to save config: {0}")]
    ConfigSaveFailed(String),

    // =========================================================================
    // Transport Errors
    // =========================================================================
    /// Connection refused, DNS failure, reset, ...
    #[error("Network error: {0}")]
    Network(String),

    #[error("Request timed out")]
    Timeout,

    // =========================================================================
    // Response Errors
    // =========================================================================
    /// The server answered with a non-2xx status.
    ///
    /// `message` is the server's own `{ "message": ... }` text when present.
    #[error("Server rejected the request ({status}): {message}")]
    Rejected { status: u16, message: String },

    /// The body parsed as JSON but matched none of the known envelopes.
    #[error("Unexpected response shape: {0}")]
    UnexpectedShape(String),

    #[error("Failed to decode response: {0}")]
    Decode(String),

    // =========================================================================
    // Session / Domain Errors
    // =========================================================================
    #[error("No signed-in user. Set a user name before booking.")]
    MissingSession,

    #[error(transparent)]
    Core(#[from] CoreError),
}

// =============================================================================
// Error Conversions
// =============================================================================

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ClientError::Timeout
        } else if err.is_decode() {
            ClientError::Decode(err.to_string())
        } else {
            ClientError::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        ClientError::Decode(err.to_string())
    }
}

impl From<url::ParseError> for ClientError {
    fn from(err: url::ParseError) -> Self {
        ClientError::InvalidUrl(err.to_string())
    }
}

impl From<std::io::Error> for ClientError {
    fn from(err: std::io::Error) -> Self {
        ClientError::ConfigLoadFailed(err.to_string())
    }
}

impl From<toml::de::Error> for ClientError {
    fn from(err: toml::de::Error) -> Self {
        ClientError::ConfigLoadFailed(err.to_string())
    }
}

impl From<toml::ser::Error> for ClientError {
    fn from(err: toml::ser::Error) -> Self {
        ClientError::ConfigSaveFailed(err.to_string())
    }
}

// =============================================================================
// Error Categorization
// =============================================================================

impl ClientError {
    /// Text to put in front of the user.
    ///
    /// ## Mapping
    /// - server rejection → the server's message, verbatim
    /// - network / timeout → generic retry instruction
    /// - unreadable response → generic "could not understand" text
    /// - everything else → the error's own description
    pub fn user_message(&self) -> String {
        match self {
            ClientError::Rejected { message, .. } => message.clone(),
            ClientError::Network(_) | ClientError::Timeout => NETWORK_RETRY_MESSAGE.to_string(),
            ClientError::UnexpectedShape(_) | ClientError::Decode(_) => {
                UNREADABLE_RESPONSE_MESSAGE.to_string()
            }
            other => other.to_string(),
        }
    }

    /// Transport failures; the same request may succeed later.
    pub fn is_retryable(&self) -> bool {
        match self {
            ClientError::Network(_) | ClientError::Timeout => true,
            ClientError::Rejected { status, .. } => *status >= 500,
            _ => false,
        }
    }

    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            ClientError::InvalidConfig(_)
                | ClientError::InvalidUrl(_)
                | ClientError::ConfigLoadFailed(_)
                | ClientError::ConfigSaveFailed(_)
        )
    }
}

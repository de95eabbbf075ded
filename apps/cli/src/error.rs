//! # CLI Error Type
//!
//! Every command returns `CliResult<T>`. `main` turns the error into a
//! message on stderr (or a JSON object with `--json`) and an exit code.
//!
//! ```text
//! ┌───────────────────────┬────────────────────┬──────┐
//! │ Error                 │ code               │ exit │
//! ├───────────────────────┼────────────────────┼──────┤
//! │ form / input invalid  │ VALIDATION_ERROR   │  2   │
//! │ server said no        │ REJECTED           │  3   │
//! │ network / timeout     │ NETWORK_ERROR      │  4   │
//! │ bad config            │ CONFIG_ERROR       │  5   │
//! │ anything else         │ INTERNAL           │  1   │
//! └───────────────────────┴────────────────────┴──────┘
//! ```

use serde::Serialize;
use thiserror::Error;
use travelmate_client::ClientError;
use travelmate_core::CoreError;

pub type CliResult<T> = Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    /// Form validation failed; the message lists each field.
    #[error("{0}")]
    Invalid(String),

    #[error(transparent)]
    Client(#[from] ClientError),

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("No booking {0} found for this user")]
    BookingNotFound(String),

    #[error("Failed to initialise logging: {0}")]
    Logging(String),

    #[error("Failed to write output: {0}")]
    Output(#[from] serde_json::Error),
}

/// Machine-readable error code for `--json` output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    ValidationError,
    Rejected,
    NetworkError,
    ConfigError,
    NotFound,
    Internal,
}

/// What `--json` prints on failure.
#[derive(Debug, Serialize)]
pub struct ErrorReport {
    pub code: ErrorCode,
    pub message: String,
}

impl CliError {
    pub fn code(&self) -> ErrorCode {
        match self {
            CliError::Invalid(_) => ErrorCode::ValidationError,
            CliError::Core(CoreError::Validation(_))
            | CliError::Core(CoreError::NoRoomsAvailable)
            | CliError::Core(CoreError::RoomsExceedAvailability { .. })
            | CliError::Core(CoreError::NotCancellable { .. }) => ErrorCode::ValidationError,
            CliError::Client(ClientError::Core(_)) => ErrorCode::ValidationError,
            CliError::Client(ClientError::Rejected { status: 404, .. }) => ErrorCode::NotFound,
            CliError::Client(ClientError::Rejected { .. }) => ErrorCode::Rejected,
            CliError::Client(e) if e.is_config_error() => ErrorCode::ConfigError,
            CliError::Client(ClientError::MissingSession) => ErrorCode::ConfigError,
            CliError::Client(ClientError::Network(_)) | CliError::Client(ClientError::Timeout) => {
                ErrorCode::NetworkError
            }
            CliError::BookingNotFound(_) => ErrorCode::NotFound,
            _ => ErrorCode::Internal,
        }
    }

    pub fn exit_code(&self) -> u8 {
        match self.code() {
            ErrorCode::Internal => 1,
            ErrorCode::ValidationError => 2,
            ErrorCode::Rejected | ErrorCode::NotFound => 3,
            ErrorCode::NetworkError => 4,
            ErrorCode::ConfigError => 5,
        }
    }

    /// Text shown to the user.
    pub fn user_message(&self) -> String {
        match self {
            CliError::Client(e) => e.user_message(),
            other => other.to_string(),
        }
    }

    pub fn report(&self) -> ErrorReport {
        ErrorReport {
            code: self.code(),
            message: self.user_message(),
        }
    }
}

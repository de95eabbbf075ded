//! # Error Types
//!
//! Domain-specific error types for travelmate-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  travelmate-core errors (this file)                                     │
//! │  ├── CoreError        - Booking rule and workflow errors                │
//! │  └── ValidationError  - Single-field input failures                     │
//! │                                                                         │
//! │  travelmate-client errors (separate crate)                              │
//! │  └── ClientError      - Config, transport and server rejections         │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → ClientError → user notification   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (field, counts, ids)
//! 3. Errors are enum variants, never String
//! 4. Each variant's `Display` is the message shown next to the field

use thiserror::Error;

use crate::workflow::SubmissionState;

// =============================================================================
// Core Error
// =============================================================================

/// Booking rule violations and workflow misuse.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// The package has no rooms left at all.
    ///
    /// ## When This Occurs
    /// - `rooms_available == 0` on the offering snapshot, whatever was requested
    #[error("no rooms available")]
    NoRoomsAvailable,

    /// More rooms were requested than the package has left.
    ///
    /// ## User Workflow
    /// ```text
    /// User types rooms: 8
    ///      │
    ///      ▼
    /// check_availability(8, 5)
    ///      │
    ///      ▼
    /// RoomsExceedAvailability { requested: 8, available: 5 }
    ///      │
    ///      ▼
    /// Form clamps to 5, shows "only 5 rooms available"
    /// ```
    #[error("only {available} rooms available (requested {requested})")]
    RoomsExceedAvailability { requested: u32, available: u32 },

    /// A money calculation overflowed `i64` cents.
    #[error("amount too large to compute: {context}")]
    AmountOverflow { context: String },

    /// A submit was attempted while another one is still being processed.
    #[error("Processing Your Booking… please wait")]
    SubmissionInProgress,

    /// The submission state machine was driven along an edge it does not have.
    #[error("cannot move booking submission from {from} to {to}")]
    InvalidTransition {
        from: SubmissionState,
        to: SubmissionState,
    },

    /// A booking cannot be cancelled in its current status.
    #[error("booking {booking_id} is {status} and cannot be cancelled")]
    NotCancellable { booking_id: String, status: String },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when user input doesn't meet requirements.
/// The `Display` text is what the form renders under the field.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Value must contain exactly `expected` digits.
    #[error("{field} must be exactly {expected} digits")]
    DigitCount { field: String, expected: usize },

    /// Value must be positive.
    #[error("{field} must be at least {min}")]
    TooSmall { field: String, min: i64 },

    /// Value must be strictly greater than zero.
    #[error("{field} must be greater than zero")]
    NotPositive { field: String },

    /// Invalid format (e.g., not a number, not an email).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Card expiry is not `MM/YY` with a month between 01 and 12.
    #[error("expiry date must be in MM/YY format")]
    ExpiryFormat,

    /// Card expiry month lies before the current month.
    #[error("card has expired")]
    CardExpired,

    /// Card expiry lies more than `max_years` ahead of today.
    #[error("expiry date cannot be more than {max_years} years in the future")]
    ExpiryTooFar { max_years: u32 },

    /// Check-out is not strictly after check-in.
    #[error("check-out date must be after check-in date")]
    DateOrder,
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::RoomsExceedAvailability {
            requested: 8,
            available: 5,
        };
        assert_eq!(err.to_string(), "only 5 rooms available (requested 8)");
        assert_eq!(CoreError::NoRoomsAvailable.to_string(), "no rooms available");
    }

    #[test]
    fn test_expiry_messages_are_distinct() {
        let format = ValidationError::ExpiryFormat.to_string();
        let expired = ValidationError::CardExpired.to_string();
        let too_far = ValidationError::ExpiryTooFar { max_years: 10 }.to_string();

        assert_ne!(format, expired);
        assert_ne!(expired, too_far);
        assert_ne!(format, too_far);
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::DigitCount {
            field: "card number".to_string(),
            expected: 16,
        };
        assert_eq!(err.to_string(), "card number must be exactly 16 digits");

        let err = ValidationError::Required {
            field: "check-in date".to_string(),
        };
        assert_eq!(err.to_string(), "check-in date is required");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let core_err: CoreError = ValidationError::DateOrder.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }

    #[test]
    fn test_invalid_transition_message() {
        let err = CoreError::InvalidTransition {
            from: SubmissionState::Idle,
            to: SubmissionState::Confirmed,
        };
        assert_eq!(
            err.to_string(),
            "cannot move booking submission from idle to confirmed"
        );
    }
}

//! # Availability Guard
//!
//! Keeps the requested room count within what the package has left.
//!
//! ## Policy: clamp and warn
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  available == 0          ──► blocked, "no rooms available"             │
//! │                              (whatever was requested)                   │
//! │                                                                         │
//! │  requested > available   ──► clamp draft to `available`, show error,    │
//! │                              form stays editable                        │
//! │                                                                         │
//! │  otherwise               ──► allowed, value unchanged                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The check runs against the offering snapshot fetched with the page, so
//! it is optimistic. The backend remains the final judge.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::CoreError;

/// Outcome of [`check_availability`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct AvailabilityCheck {
    /// Whether the request can be submitted as is.
    pub allowed: bool,
    /// The room count the form should hold after this check.
    pub clamped_value: u32,
    /// Message to surface next to the room field, if any.
    pub message: Option<String>,
}

impl AvailabilityCheck {
    /// Converts a refused check into the matching domain error.
    pub fn into_result(self, requested: u32) -> Result<u32, CoreError> {
        if self.allowed {
            return Ok(self.clamped_value);
        }
        if self.clamped_value == 0 {
            return Err(CoreError::NoRoomsAvailable);
        }
        Err(CoreError::RoomsExceedAvailability {
            requested,
            available: self.clamped_value,
        })
    }
}

/// Checks `requested` rooms against `available` rooms.
///
/// ## Example
/// ```rust
/// use travelmate_core::availability::check_availability;
///
/// let check = check_availability(8, 5);
/// assert!(!check.allowed);
/// assert_eq!(check.clamped_value, 5);
///
/// let check = check_availability(2, 0);
/// assert_eq!(check.message.as_deref(), Some("no rooms available"));
/// ```
pub fn check_availability(requested: u32, available: u32) -> AvailabilityCheck {
    if available == 0 {
        return AvailabilityCheck {
            allowed: false,
            clamped_value: 0,
            message: Some(CoreError::NoRoomsAvailable.to_string()),
        };
    }

    if requested > available {
        return AvailabilityCheck {
            allowed: false,
            clamped_value: available,
            message: Some(format!("only {} rooms available", available)),
        };
    }

    AvailabilityCheck {
        allowed: true,
        clamped_value: requested,
        message: None,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

//! # travelmate-core: Pure Booking Logic for TravelMate
//!
//! This crate holds the booking rules of TravelMate as pure functions and
//! plain state types. It never touches the network, the file system or a
//! clock: "today" and "now" are always passed in.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        TravelMate Architecture                          │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 travelmate CLI / web frontend                   │   │
//! │  │    quote ──► check ──► book ──► bookings ──► cancel             │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │            travelmate-client (config, session, HTTP)            │   │
//! │  │        BookingSubmitter ──► BookingGateway ──► REST API         │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │             ★ travelmate-core (THIS CRATE) ★                    │   │
//! │  │                                                                 │   │
//! │  │  ┌────────────┐ ┌───────────┐ ┌──────────────┐ ┌────────────┐  │   │
//! │  │  │ validation │ │  pricing  │ │ availability │ │    form    │  │   │
//! │  │  └────────────┘ └───────────┘ └──────────────┘ └────────────┘  │   │
//! │  │  ┌────────────┐ ┌───────────┐ ┌──────────────┐ ┌────────────┐  │   │
//! │  │  │  workflow  │ │  receipt  │ │   history    │ │   money    │  │   │
//! │  │  └────────────┘ └───────────┘ └──────────────┘ └────────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO NETWORK • NO CLOCK • PURE FUNCTIONS               │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (PackageOffering, BookingRecord, CardType, ...)
//! - [`money`] - Money type with integer arithmetic
//! - [`error`] - Domain error types
//! - [`validation`] - Field validators
//! - [`pricing`] - Night count and totals
//! - [`availability`] - Room availability guard
//! - [`form`] - Booking form state with live validation
//! - [`workflow`] - Submission state machine
//! - [`receipt`] - Receipt projection
//! - [`history`] - Booking list filtering and sorting
//!
//! ## Example Usage
//!
//! ```rust
//! use chrono::NaiveDate;
//! use travelmate_core::{BookingForm, CardType, Money, PackageOffering};
//!
//! let today = NaiveDate::from_ymd_opt(2024, 5, 20).unwrap();
//! let mut form = BookingForm::new(PackageOffering {
//!     hotel_name: "Lagoon View".into(),
//!     package_name: "Deluxe".into(),
//!     unit_price: Money::from_cents(10000),
//!     rooms_available: 5,
//! });
//!
//! form.set_rooms("2");
//! form.set_check_in(NaiveDate::from_ymd_opt(2024, 6, 1));
//! form.set_check_out(NaiveDate::from_ymd_opt(2024, 6, 3));
//! form.set_card_type(Some(CardType::Visa));
//! form.set_card_number("4111 1111 1111 1111");
//! form.set_card_expiry("12/26", today);
//! form.set_cvv("123");
//!
//! let booking = form.validate_all(today).unwrap();
//! assert_eq!(booking.quote.total.to_string(), "$600.00");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod availability;
pub mod error;
pub mod form;
pub mod history;
pub mod money;
pub mod pricing;
pub mod receipt;
pub mod types;
pub mod validation;
pub mod workflow;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use availability::{check_availability, AvailabilityCheck};
pub use error::{CoreError, CoreResult, ValidationError};
pub use form::{BookingDraft, BookingForm, Field, FormErrors, ValidBooking};
pub use history::{BookingQuery, SortKey, SortOrder};
pub use money::Money;
pub use pricing::{compute_total, night_count, PriceQuote};
pub use receipt::{project, ReceiptView};
pub use types::*;
pub use validation::FieldStatus;
pub use workflow::{Submission, SubmissionState};

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Prefix of every client-generated booking id.
pub const BOOKING_ID_PREFIX: &str = "BK-";

/// Smallest bookable room count.
pub const MIN_ROOM_COUNT: u32 = 1;

/// Digits in a card number once whitespace is stripped.
pub const CARD_NUMBER_DIGITS: usize = 16;

pub const CVV_DIGITS: usize = 3;

/// Digits in a hotel contact number.
pub const CONTACT_NUMBER_DIGITS: usize = 10;

/// How far in the future a card expiry may lie.
///
/// ## Business Reason
/// Issuers do not print expiries beyond this, so anything later is a typo.
pub const MAX_CARD_VALIDITY_YEARS: u32 = 10;

//! # Domain Types
//!
//! Core domain types used throughout TravelMate bookings.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │ PackageOffering │   │  BookingRecord  │   │     Hotel       │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  hotel_name     │   │  booking_id     │   │  name           │       │
//! │  │  package_name   │   │  amount         │   │  location       │       │
//! │  │  unit_price     │   │  status         │   │  contact_number │       │
//! │  │  rooms_available│   │  dates, card    │   │  email, website │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    CardType     │   │  BookingStatus  │   │   CardExpiry    │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  Visa           │   │  Confirmed      │   │  month (1-12)   │       │
//! │  │  MasterCard     │   │  Cancelled      │   │  year           │       │
//! │  │  Amex           │   │  Completed      │   └─────────────────┘       │
//! │  └─────────────────┘   └─────────────────┘                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Ownership
//! - `PackageOffering` and `Hotel` are read-only snapshots owned by the catalog.
//! - `BookingRecord` is owned by the backend once created.
//! - The in-progress draft lives in [`crate::form`].

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::error::ValidationError;
use crate::money::Money;
use crate::BOOKING_ID_PREFIX;

// =============================================================================
// Card Type
// =============================================================================

/// Card brands accepted by the payment form.
///
/// Serialized exactly as the backend stores them: `"Visa"`, `"MasterCard"`, `"Amex"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum CardType {
    Visa,
    MasterCard,
    Amex,
}

impl CardType {
    /// Returns the wire / display label.
    pub const fn as_str(&self) -> &'static str {
        match self {
            CardType::Visa => "Visa",
            CardType::MasterCard => "MasterCard",
            CardType::Amex => "Amex",
        }
    }
}

impl fmt::Display for CardType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CardType {
    type Err = ValidationError;

    /// Case-insensitive; accepts `mastercard`, `master-card` and `master card`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| !matches!(c, ' ' | '-' | '_'))
            .collect::<String>()
            .to_lowercase();

        match normalized.as_str() {
            "visa" => Ok(CardType::Visa),
            "mastercard" => Ok(CardType::MasterCard),
            "amex" | "americanexpress" => Ok(CardType::Amex),
            "" => Err(ValidationError::Required {
                field: "card type".to_string(),
            }),
            _ => Err(ValidationError::InvalidFormat {
                field: "card type".to_string(),
                reason: "must be Visa, MasterCard or Amex".to_string(),
            }),
        }
    }
}

// =============================================================================
// Booking Status
// =============================================================================

/// The status of a persisted booking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum BookingStatus {
    /// Booking was accepted by the backend.
    Confirmed,
    /// Booking was cancelled through `DELETE /booking/:id`.
    Cancelled,
    /// Stay has taken place.
    Completed,
}

impl Default for BookingStatus {
    fn default() -> Self {
        BookingStatus::Confirmed
    }
}

impl BookingStatus {
    pub const fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Confirmed => "confirmed",
            BookingStatus::Cancelled => "cancelled",
            BookingStatus::Completed => "completed",
        }
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BookingStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "confirmed" => Ok(BookingStatus::Confirmed),
            "cancelled" | "canceled" => Ok(BookingStatus::Cancelled),
            "completed" => Ok(BookingStatus::Completed),
            _ => Err(ValidationError::InvalidFormat {
                field: "status".to_string(),
                reason: "must be confirmed, cancelled or completed".to_string(),
            }),
        }
    }
}

// =============================================================================
// Card Expiry
// =============================================================================

/// A parsed card expiry (`MM/YY` → month + four-digit year).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CardExpiry {
    /// Month, 1-12.
    pub month: u32,
    /// Four-digit year (`"27"` → 2027).
    pub year: i32,
}

impl CardExpiry {
    /// First day of the expiry month, which is what `card_validity` stores.
    ///
    /// Returns `None` only for a month outside 1-12, which the validator
    /// never produces.
    pub fn first_of_month(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
    }
}

impl fmt::Display for CardExpiry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}/{:02}", self.month, self.year.rem_euclid(100))
    }
}

// =============================================================================
// Package Offering
// =============================================================================

/// A bookable package as last fetched from the catalog.
///
/// The availability check runs against this snapshot, so it is optimistic:
/// another guest may take the rooms before submit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PackageOffering {
    pub hotel_name: String,
    pub package_name: String,
    /// Price per room per night.
    pub unit_price: Money,
    /// Rooms still free for this package.
    pub rooms_available: u32,
}

// =============================================================================
// Hotel
// =============================================================================

/// Hotel details shown on receipts and captured by the hotel form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Hotel {
    pub name: String,
    pub location: String,
    /// Ten-digit contact number.
    pub contact_number: String,
    pub email: String,
    /// Optional website.
    pub website: Option<String>,
}

// =============================================================================
// Booking Record
// =============================================================================

/// A booking as persisted by the backend.
///
/// Card data is stored verbatim, matching the existing backend. That is only
/// acceptable for a sample system; see the security note in DESIGN.md.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct BookingRecord {
    pub booking_id: String,
    pub user_name: String,
    pub hotel_name: String,
    pub package: String,
    /// Unit price per room per night.
    pub price: Money,
    /// `price × no_of_rooms × nights`, as computed at submit time.
    pub amount: Money,
    pub status: BookingStatus,
    #[ts(as = "String")]
    pub booking_from: NaiveDate,
    #[ts(as = "String")]
    pub booking_to: NaiveDate,
    pub no_of_rooms: u32,
    pub card_type: CardType,
    /// Digits only.
    pub card_number: String,
    pub cvv: String,
    /// First day of the card's expiry month.
    #[ts(as = "String")]
    pub card_validity: NaiveDate,
}

impl BookingRecord {
    /// Only confirmed bookings may be cancelled.
    pub fn can_cancel(&self) -> bool {
        self.status == BookingStatus::Confirmed
    }
}

// =============================================================================
// Booking ID
// =============================================================================

/// How the client generates `booking_id` before the backend assigns one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BookingIdScheme {
    /// `BK-<epoch millis>`. Compatible with existing data, but two bookings
    /// created in the same millisecond collide.
    #[default]
    Timestamp,
    /// `BK-<uuid v4>`. Collision free.
    Uuid,
}

impl BookingIdScheme {
    /// Generates a booking id for a submission happening at `now`.
    ///
    /// ## Example
    /// ```rust
    /// use chrono::{TimeZone, Utc};
    /// use travelmate_core::types::BookingIdScheme;
    ///
    /// let now = Utc.timestamp_millis_opt(1_717_200_000_000).unwrap();
    /// assert_eq!(BookingIdScheme::Timestamp.generate(now), "BK-1717200000000");
    /// assert!(BookingIdScheme::Uuid.generate(now).starts_with("BK-"));
    /// ```
    pub fn generate(&self, now: DateTime<Utc>) -> String {
        match self {
            BookingIdScheme::Timestamp => {
                format!("{}{}", BOOKING_ID_PREFIX, now.timestamp_millis())
            }
            BookingIdScheme::Uuid => format!(
                "{}{}",
                BOOKING_ID_PREFIX,
                Uuid::new_v4().simple().to_string().to_uppercase()
            ),
        }
    }
}

impl FromStr for BookingIdScheme {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "timestamp" => Ok(BookingIdScheme::Timestamp),
            "uuid" => Ok(BookingIdScheme::Uuid),
            _ => Err(ValidationError::InvalidFormat {
                field: "booking id scheme".to_string(),
                reason: "must be timestamp or uuid".to_string(),
            }),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

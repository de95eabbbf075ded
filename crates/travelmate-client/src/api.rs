//! # REST Wire Types
//!
//! The JSON the booking backend speaks, and the decoding of its responses.
//!
//! ## Response Envelopes
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  GET /booking/user/:username                                            │
//! │     [ {...}, {...} ]                 ──► Bare                           │
//! │     { "bookings": [ ... ] }          ──► Keyed("bookings")              │
//! │     { "data": [ ... ] }              ──► Keyed("data")                  │
//! │                                                                         │
//! │  POST /booking                                                          │
//! │     { "booking_id": ..., ... }       ──► Bare                           │
//! │     { "booking": { ... } }           ──► Keyed("booking")               │
//! │     { "data": { ... } }              ──► Keyed("data")                  │
//! │                                                                         │
//! │  non-2xx                                                                │
//! │     { "message": "..." }             ──► server message                 │
//! │                                                                         │
//! │  Anything else ──► ClientError::UnexpectedShape (never an empty list)   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Amounts travel as JSON numbers (`600` or `600.0`) and are read back
//! through [`Money`]'s decimal parser, so no float arithmetic touches them.
//! Dates are written as `YYYY-MM-DD`; full RFC 3339 timestamps are accepted
//! on the way back.

use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;
use travelmate_core::{BookingRecord, BookingStatus, CardType, Money};

use crate::error::{ClientError, ClientResult};

// =============================================================================
// Booking DTO
// =============================================================================

/// A booking as it appears on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingDto {
    pub booking_id: String,
    pub user_name: String,
    pub hotel_name: String,
    pub package: String,
    #[serde(with = "decimal")]
    pub price: Money,
    #[serde(with = "decimal")]
    pub amount: Money,
    #[serde(default = "default_status")]
    pub status: BookingStatus,
    #[serde(with = "iso_date")]
    pub booking_from: NaiveDate,
    #[serde(with = "iso_date")]
    pub booking_to: NaiveDate,
    pub no_of_rooms: u32,
    pub card_type: CardType,
    pub card_number: String,
    pub cvv: String,
    #[serde(with = "iso_date")]
    pub card_validity: NaiveDate,
}

fn default_status() -> BookingStatus {
    BookingStatus::Confirmed
}

impl From<&BookingRecord> for BookingDto {
    fn from(r: &BookingRecord) -> Self {
        BookingDto {
            booking_id: r.booking_id.clone(),
            user_name: r.user_name.clone(),
            hotel_name: r.hotel_name.clone(),
            package: r.package.clone(),
            price: r.price,
            amount: r.amount,
            status: r.status,
            booking_from: r.booking_from,
            booking_to: r.booking_to,
            no_of_rooms: r.no_of_rooms,
            card_type: r.card_type,
            card_number: r.card_number.clone(),
            cvv: r.cvv.clone(),
            card_validity: r.card_validity,
        }
    }
}

impl From<BookingDto> for BookingRecord {
    fn from(d: BookingDto) -> Self {
        BookingRecord {
            booking_id: d.booking_id,
            user_name: d.user_name,
            hotel_name: d.hotel_name,
            package: d.package,
            price: d.price,
            amount: d.amount,
            status: d.status,
            booking_from: d.booking_from,
            booking_to: d.booking_to,
            no_of_rooms: d.no_of_rooms,
            card_type: d.card_type,
            card_number: d.card_number,
            cvv: d.cvv,
            card_validity: d.card_validity,
        }
    }
}

/// Error body of a non-2xx response.
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorBody {
    pub message: String,
}

// =============================================================================
// Envelope Decoding
// =============================================================================

/// Which envelope a response arrived in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Envelope {
    Bare,
    Keyed(&'static str),
}

const LIST_KEYS: [&str; 2] = ["bookings", "data"];
const CREATED_KEYS: [&str; 2] = ["booking", "data"];

/// Decodes the body of `GET /booking/user/:username`.
pub fn decode_booking_list(body: &[u8]) -> ClientResult<Vec<BookingRecord>> {
    let value: Value = serde_json::from_slice(body)?;
    let (envelope, payload) = match value {
        Value::Array(_) => (Envelope::Bare, value),
        Value::Object(mut map) => {
            let key = LIST_KEYS
                .into_iter()
                .find(|k| map.get(*k).is_some_and(Value::is_array))
                .ok_or_else(|| ClientError::UnexpectedShape(describe_object(&map)))?;
            let payload = map.remove(key).unwrap_or(Value::Null);
            (Envelope::Keyed(key), payload)
        }
        other => return Err(ClientError::UnexpectedShape(describe(&other))),
    };

    let dtos: Vec<BookingDto> = serde_json::from_value(payload)?;
    debug!(?envelope, count = dtos.len(), "Decoded booking list");
    Ok(dtos.into_iter().map(BookingRecord::from).collect())
}

/// Decodes the body of a successful `POST /booking`.
pub fn decode_created_booking(body: &[u8]) -> ClientResult<BookingRecord> {
    let value: Value = serde_json::from_slice(body)?;
    let mut map = match value {
        Value::Object(map) => map,
        other => return Err(ClientError::UnexpectedShape(describe(&other))),
    };

    let (envelope, payload) = if map.contains_key("booking_id") {
        (Envelope::Bare, Value::Object(map))
    } else {
        let key = CREATED_KEYS
            .into_iter()
            .find(|k| map.get(*k).is_some_and(Value::is_object))
            .ok_or_else(|| ClientError::UnexpectedShape(describe_object(&map)))?;
        let payload = map.remove(key).unwrap_or(Value::Null);
        (Envelope::Keyed(key), payload)
    };

    let dto: BookingDto = serde_json::from_value(payload)?;
    debug!(?envelope, booking_id = %dto.booking_id, "Decoded created booking");
    Ok(dto.into())
}

/// Extracts `message` from an error body, if there is one.
pub fn decode_error_message(body: &[u8]) -> Option<String> {
    serde_json::from_slice::<ErrorBody>(body)
        .ok()
        .map(|b| b.message)
        .filter(|m| !m.trim().is_empty())
}

fn describe(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(_) => "a boolean".to_string(),
        Value::Number(_) => "a number".to_string(),
        Value::String(_) => "a string".to_string(),
        Value::Array(_) => "an array".to_string(),
        Value::Object(map) => describe_object(map),
    }
}

fn describe_object(map: &serde_json::Map<String, Value>) -> String {
    let keys: Vec<&str> = map.keys().map(String::as_str).collect();
    format!("object with keys [{}]", keys.join(", "))
}

// =============================================================================
// Field Codecs
// =============================================================================

/// `Money` ⇄ JSON number.
mod decimal {
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serializer};
    use serde_json::Value;
    use travelmate_core::Money;

    pub fn serialize<S: Serializer>(money: &Money, s: S) -> Result<S::Ok, S::Error> {
        if money.cents_part() == 0 {
            s.serialize_i64(money.dollars())
        } else {
            // exact for two decimals at any realistic booking amount
            s.serialize_f64(money.cents() as f64 / 100.0)
        }
    }

    /// Largest amount in cents that survives the trip through `f64` exactly.
    const MAX_EXACT_CENTS: f64 = 9_007_199_254_740_992.0;

    /// Numbers are rounded to the nearest cent: stored amounts may carry
    /// float noise such as `299.96999999999997`. Strings go through the
    /// strict decimal parser.
    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Money, D::Error> {
        match Value::deserialize(d)? {
            Value::Number(n) => {
                if let Some(whole) = n.as_i64() {
                    return whole
                        .checked_mul(100)
                        .map(Money::from_cents)
                        .ok_or_else(|| D::Error::custom(format!("amount out of range: {}", n)));
                }
                let cents = n
                    .as_f64()
                    .map(|v| (v * 100.0).round())
                    .filter(|c| c.is_finite() && c.abs() <= MAX_EXACT_CENTS)
                    .ok_or_else(|| D::Error::custom(format!("amount out of range: {}", n)))?;
                Ok(Money::from_cents(cents as i64))
            }
            Value::String(s) => s.parse::<Money>().map_err(D::Error::custom),
            other => Err(D::Error::custom(format!("expected an amount, got {}", other))),
        }
    }
}

/// `NaiveDate` ⇄ ISO-8601 string.
mod iso_date {
    use super::*;
    use serde::de::Error as _;
    use serde::{Deserializer, Serializer};

    pub fn serialize<S: Serializer>(date: &NaiveDate, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&date.format("%Y-%m-%d").to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<NaiveDate, D::Error> {
        let raw = String::deserialize(d)?;
        parse(&raw).ok_or_else(|| D::Error::custom(format!("invalid date: {}", raw)))
    }

    pub(super) fn parse(raw: &str) -> Option<NaiveDate> {
        let raw = raw.trim();
        NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .ok()
            .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.date_naive()))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

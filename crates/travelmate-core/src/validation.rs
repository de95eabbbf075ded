//! # Validation Module
//!
//! Field validators for the booking, payment and hotel forms.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: On change / blur (BookingForm setters)                       │
//! │  ├── THIS MODULE: one validator per field                              │
//! │  └── Result merged into the form's error map                           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: On submit (BookingForm::validate_all)                        │
//! │  ├── Every field touched, every validator re-run                       │
//! │  └── Availability guard against the offering snapshot                  │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Backend                                                      │
//! │  └── Duplicate ids, real inventory (message shown verbatim)            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Validators are pure: they take the raw value (and `today` where time
//! matters) and never touch form state.
//!
//! ## Usage
//! ```rust
//! use chrono::NaiveDate;
//! use travelmate_core::validation::{validate_card_expiry, validate_card_number};
//!
//! let today = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
//! assert_eq!(validate_card_number("4111 1111 1111 1111").unwrap(), "4111111111111111");
//! assert!(validate_card_expiry("12/26", today).is_ok());
//! ```

use chrono::{Datelike, Months, NaiveDate};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::ValidationError;
use crate::money::Money;
use crate::types::{CardExpiry, Hotel};
use crate::{
    CARD_NUMBER_DIGITS, CONTACT_NUMBER_DIGITS, CVV_DIGITS, MAX_CARD_VALIDITY_YEARS, MIN_ROOM_COUNT,
};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

static EXPIRY_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(0[1-9]|1[0-2])/(\d{2})$").expect("valid expiry pattern"));

static EMAIL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email pattern"));

static WEBSITE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(https?://)?([\w-]+\.)+[\w-]{2,}(:\d{1,5})?(/[\w\-./?%&=#~+]*)?$")
        .expect("valid website pattern")
});

// =============================================================================
// Field Status (UI merge shape)
// =============================================================================

/// The `{ valid, message }` pair a form renders next to a field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct FieldStatus {
    pub valid: bool,
    pub message: Option<String>,
}

impl FieldStatus {
    pub fn ok() -> Self {
        FieldStatus {
            valid: true,
            message: None,
        }
    }

    /// Collapses a validator result into what the UI shows.
    pub fn from_result<T>(result: &ValidationResult<T>) -> Self {
        match result {
            Ok(_) => FieldStatus::ok(),
            Err(e) => FieldStatus {
                valid: false,
                message: Some(e.to_string()),
            },
        }
    }
}

// =============================================================================
// Helpers
// =============================================================================

fn exact_digits(raw: &str, field: &str, expected: usize) -> ValidationResult<String> {
    if raw.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    if raw.len() != expected || !raw.chars().all(|c| c.is_ascii_digit()) {
        return Err(ValidationError::DigitCount {
            field: field.to_string(),
            expected,
        });
    }

    Ok(raw.to_string())
}

// =============================================================================
// Payment Validators
// =============================================================================

/// Validates a card number.
///
/// ## Rules
/// - All whitespace is stripped first (`"4111 1111 1111 1111"` is fine)
/// - What remains must be exactly 16 ASCII digits
///
/// ## Returns
/// The digits-only card number, ready for serialization.
///
/// ## Example
/// ```rust
/// use travelmate_core::validation::validate_card_number;
///
/// assert!(validate_card_number("4111111111111111").is_ok());
/// assert!(validate_card_number("411111111111111").is_err());   // 15 digits
/// assert!(validate_card_number("4111-1111-1111-1111").is_err()); // hyphens
/// ```
pub fn validate_card_number(raw: &str) -> ValidationResult<String> {
    let stripped: String = raw.chars().filter(|c| !c.is_whitespace()).collect();
    exact_digits(&stripped, "card number", CARD_NUMBER_DIGITS)
}

/// Validates a card expiry typed as `MM/YY`.
///
/// ## Rules
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  raw "MM/YY"                                                            │
/// │       │                                                                 │
/// │       ├── not MM/YY, month ∉ 01..12 ──► ExpiryFormat                   │
/// │       │                                                                 │
/// │       ├── first of month < first of current month ──► CardExpired      │
/// │       │                                                                 │
/// │       ├── first of month > today + 10 years ──► ExpiryTooFar           │
/// │       │                                                                 │
/// │       └── OK ──► CardExpiry { month, year: 2000 + YY }                 │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
///
/// A card expiring in the current month is still valid.
pub fn validate_card_expiry(raw: &str, today: NaiveDate) -> ValidationResult<CardExpiry> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(ValidationError::Required {
            field: "expiry date".to_string(),
        });
    }

    let captures = EXPIRY_PATTERN
        .captures(raw)
        .ok_or(ValidationError::ExpiryFormat)?;

    let month: u32 = captures[1]
        .parse()
        .map_err(|_| ValidationError::ExpiryFormat)?;
    let short_year: i32 = captures[2]
        .parse()
        .map_err(|_| ValidationError::ExpiryFormat)?;

    let expiry = CardExpiry {
        month,
        year: 2000 + short_year,
    };
    let expiry_start = expiry
        .first_of_month()
        .ok_or(ValidationError::ExpiryFormat)?;

    let current_month_start = today.with_day(1).unwrap_or(today);
    if expiry_start < current_month_start {
        return Err(ValidationError::CardExpired);
    }

    let limit = today
        .checked_add_months(Months::new(MAX_CARD_VALIDITY_YEARS * 12))
        .unwrap_or(NaiveDate::MAX);
    if expiry_start > limit {
        return Err(ValidationError::ExpiryTooFar {
            max_years: MAX_CARD_VALIDITY_YEARS,
        });
    }

    Ok(expiry)
}

/// Validates a CVV: exactly 3 digits.
pub fn validate_cvv(raw: &str) -> ValidationResult<String> {
    exact_digits(raw.trim(), "CVV", CVV_DIGITS)
}

// =============================================================================
// Booking Validators
// =============================================================================

/// Validates the room count typed into the form.
///
/// ## Rules
/// - Must parse as an integer
/// - Must be at least 1
///
/// The upper bound depends on the offering and is enforced by
/// [`crate::availability::check_availability`], not here.
pub fn validate_room_count(raw: &str) -> ValidationResult<u32> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(ValidationError::Required {
            field: "number of rooms".to_string(),
        });
    }

    let count: i64 = raw.parse().map_err(|_| ValidationError::InvalidFormat {
        field: "number of rooms".to_string(),
        reason: "must be a whole number".to_string(),
    })?;

    if count < i64::from(MIN_ROOM_COUNT) {
        return Err(ValidationError::TooSmall {
            field: "number of rooms".to_string(),
            min: i64::from(MIN_ROOM_COUNT),
        });
    }

    u32::try_from(count).map_err(|_| ValidationError::InvalidFormat {
        field: "number of rooms".to_string(),
        reason: "too many rooms".to_string(),
    })
}

/// Validates a package's price per room per night: must be above zero.
///
/// ## Example
/// ```rust
/// use travelmate_core::validation::validate_unit_price;
/// use travelmate_core::Money;
///
/// assert!(validate_unit_price(Money::from_cents(14950)).is_ok());
/// assert!(validate_unit_price(Money::zero()).is_err());
/// ```
pub fn validate_unit_price(price: Money) -> ValidationResult<Money> {
    if !price.is_positive() {
        return Err(ValidationError::NotPositive {
            field: "price per night".to_string(),
        });
    }
    Ok(price)
}

/// Validates a stay's date range: both dates present, check-out after check-in.
pub fn validate_date_range(
    check_in: Option<NaiveDate>,
    check_out: Option<NaiveDate>,
) -> ValidationResult<(NaiveDate, NaiveDate)> {
    let check_in = check_in.ok_or_else(|| ValidationError::Required {
        field: "check-in date".to_string(),
    })?;
    let check_out = check_out.ok_or_else(|| ValidationError::Required {
        field: "check-out date".to_string(),
    })?;

    if check_out <= check_in {
        return Err(ValidationError::DateOrder);
    }

    Ok((check_in, check_out))
}

// =============================================================================
// Contact Validators
// =============================================================================

/// Validates a phone / contact number: exactly 10 digits.
pub fn validate_contact_number(raw: &str) -> ValidationResult<String> {
    exact_digits(raw.trim(), "contact number", CONTACT_NUMBER_DIGITS)
}

/// Validates an email address against the `local@domain.tld` pattern.
///
/// ## Example
/// ```rust
/// use travelmate_core::validation::validate_email;
///
/// assert!(validate_email("guest@example.com").is_ok());
/// assert!(validate_email("guest@example").is_err());
/// ```
pub fn validate_email(raw: &str) -> ValidationResult<String> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(ValidationError::Required {
            field: "email".to_string(),
        });
    }

    if !EMAIL_PATTERN.is_match(raw) {
        return Err(ValidationError::InvalidFormat {
            field: "email".to_string(),
            reason: "must look like name@domain.tld".to_string(),
        });
    }

    Ok(raw.to_string())
}

/// Validates an optional website.
///
/// Empty input is fine and yields `None`.
pub fn validate_website(raw: &str) -> ValidationResult<Option<String>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }

    if !WEBSITE_PATTERN.is_match(raw) {
        return Err(ValidationError::InvalidFormat {
            field: "website".to_string(),
            reason: "must be a valid URL".to_string(),
        });
    }

    Ok(Some(raw.to_string()))
}

/// Validates every field of a hotel entry and returns all failures.
///
/// ## Returns
/// An empty vector when the hotel is valid, otherwise one
/// `(field, error)` pair per failing field in form order.
pub fn validate_hotel(hotel: &Hotel) -> Vec<(&'static str, ValidationError)> {
    let mut failures = Vec::new();

    if hotel.name.trim().is_empty() {
        failures.push((
            "name",
            ValidationError::Required {
                field: "hotel name".to_string(),
            },
        ));
    }
    if hotel.location.trim().is_empty() {
        failures.push((
            "location",
            ValidationError::Required {
                field: "location".to_string(),
            },
        ));
    }
    if let Err(e) = validate_contact_number(&hotel.contact_number) {
        failures.push(("contact_number", e));
    }
    if let Err(e) = validate_email(&hotel.email) {
        failures.push(("email", e));
    }
    if let Err(e) = validate_website(hotel.website.as_deref().unwrap_or_default()) {
        failures.push(("website", e));
    }

    failures
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

    #[test]
    fn test_validate_card_number() {
        assert_eq!(
            validate_card_number("4111111111111111").unwrap(),
            "4111111111111111"
        );
        assert_eq!(
            validate_card_number(" 4111 1111\t1111 1111 ").unwrap(),
            "4111111111111111"
        );

        assert!(validate_card_number("411111111111111").is_err()); // 15
        assert!(validate_card_number("41111111111111111").is_err()); // 17
        assert!(validate_card_number("4111a11111111111").is_err());
        assert!(matches!(
            validate_card_number("   "),
            Err(ValidationError::Required { .. })
        ));
    }

    #[test]
    fn test_validate_card_expiry_cases() {
        let today = date(2025, 3, 15);

        assert_eq!(
            validate_card_expiry("13/25", today),
            Err(ValidationError::ExpiryFormat)
        );
        assert_eq!(
            validate_card_expiry("1/25", today),
            Err(ValidationError::ExpiryFormat)
        );
        assert_eq!(
            validate_card_expiry("01/20", today),
            Err(ValidationError::CardExpired)
        );
        assert_eq!(
            validate_card_expiry("01/99", today),
            Err(ValidationError::ExpiryTooFar { max_years: 10 })
        );
        assert_eq!(
            validate_card_expiry("06/27", today),
            Ok(CardExpiry {
                month: 6,
                year: 2027
            })
        );
    }

    #[test]
    fn test_card_expiring_this_month_is_valid() {
        let today = date(2025, 3, 31);
        assert!(validate_card_expiry("03/25", today).is_ok());
        assert_eq!(
            validate_card_expiry("02/25", today),
            Err(ValidationError::CardExpired)
        );
    }

    #[test]
    fn test_ten_year_boundary() {
        let today = date(2025, 3, 15);
        // 2035-03-01 <= 2035-03-15
        assert!(validate_card_expiry("03/35", today).is_ok());
        // 2035-04-01 > 2035-03-15
        assert!(validate_card_expiry("04/35", today).is_err());
    }

    #[test]
    fn test_validate_cvv() {
        assert!(validate_cvv("123").is_ok());
        assert!(validate_cvv("12").is_err());
        assert!(validate_cvv("1234").is_err());
        assert!(validate_cvv("12a").is_err());
    }

    #[test]
    fn test_validate_room_count() {
        assert_eq!(validate_room_count("2").unwrap(), 2);
        assert_eq!(validate_room_count(" 10 ").unwrap(), 10);
        assert!(validate_room_count("0").is_err());
        assert!(validate_room_count("-1").is_err());
        assert!(validate_room_count("two").is_err());
        assert!(validate_room_count("").is_err());
    }

    #[test]
    fn test_validate_unit_price() {
        assert_eq!(
            validate_unit_price(Money::from_cents(1)),
            Ok(Money::from_cents(1))
        );
        assert_eq!(
            validate_unit_price(Money::zero()).unwrap_err().to_string(),
            "price per night must be greater than zero"
        );
        assert!(validate_unit_price(Money::from_cents(-10000)).is_err());
    }

    #[test]
    fn test_validate_date_range() {
        let a = date(2024, 6, 1);
        let b = date(2024, 6, 3);
        assert_eq!(validate_date_range(Some(a), Some(b)).unwrap(), (a, b));
        assert_eq!(
            validate_date_range(Some(b), Some(a)),
            Err(ValidationError::DateOrder)
        );
        assert_eq!(
            validate_date_range(Some(a), Some(a)),
            Err(ValidationError::DateOrder)
        );
        assert!(validate_date_range(None, Some(b)).is_err());
    }

    #[test]
    fn test_validate_contact_number() {
        assert!(validate_contact_number("0771234567").is_ok());
        assert!(validate_contact_number("077123456").is_err());
        assert!(validate_contact_number("07712345678").is_err());
        assert!(validate_contact_number("077-123-456").is_err());
    }

    #[test]
    fn test_validate_email() {
        assert!(validate_email("guest@example.com").is_ok());
        assert!(validate_email("first.last@mail.example.lk").is_ok());
        assert!(validate_email("guest@example").is_err());
        assert!(validate_email("guest example.com").is_err());
        assert!(validate_email("").is_err());
    }

    #[test]
    fn test_validate_website() {
        assert_eq!(validate_website("").unwrap(), None);
        assert!(validate_website("https://hotel.example.com").is_ok());
        assert!(validate_website("www.hotel-lanka.lk/rooms?view=sea").is_ok());
        assert!(validate_website("not a url").is_err());
        assert!(validate_website("http://").is_err());
    }

    #[test]
    fn test_field_status() {
        let status = FieldStatus::from_result(&validate_cvv("12"));
        assert!(!status.valid);
        assert_eq!(status.message.as_deref(), Some("CVV must be exactly 3 digits"));
        assert_eq!(FieldStatus::from_result(&validate_cvv("123")), FieldStatus::ok());
    }

    #[test]
    fn test_validate_hotel_collects_all_failures() {
        let hotel = Hotel {
            name: "".to_string(),
            location: "Galle".to_string(),
            contact_number: "123".to_string(),
            email: "bad".to_string(),
            website: Some("https://ok.example.com".to_string()),
        };
        let fields: Vec<&str> = validate_hotel(&hotel).into_iter().map(|(f, _)| f).collect();
        assert_eq!(fields, vec!["name", "contact_number", "email"]);
    }
}

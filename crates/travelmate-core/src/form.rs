//! # Booking Form
//!
//! The in-progress booking (draft), its per-field errors and its live quote.
//!
//! ## Form Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       BookingForm Lifecycle                             │
//! │                                                                         │
//! │  open(offering) ──► empty draft, no errors shown                        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  set_*(raw) ───────► field validator runs, error stored (hidden)       │
//! │       │              quote recomputed on every room/date change         │
//! │       ▼                                                                 │
//! │  touch(field) ─────► that field's error becomes visible (blur)         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  validate_all() ───► every field touched, every validator re-run,      │
//! │       │              availability guard applied                         │
//! │       ▼                                                                 │
//! │  ValidBooking ─────► submission; reset() after a confirmed booking     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A form belongs to exactly one user session and is never shared.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::availability::check_availability;
use crate::error::ValidationError;
use crate::pricing::{quote, PriceQuote};
use crate::types::{BookingRecord, BookingStatus, CardExpiry, CardType, PackageOffering};
use crate::validation::{
    validate_card_expiry, validate_card_number, validate_cvv, validate_date_range,
    validate_room_count, validate_unit_price, FieldStatus,
};

// =============================================================================
// Field
// =============================================================================

/// The inputs of the booking + payment form, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    UnitPrice,
    RoomCount,
    CheckIn,
    CheckOut,
    CardType,
    CardNumber,
    CardExpiry,
    Cvv,
}

impl Field {
    pub const ALL: [Field; 8] = [
        Field::UnitPrice,
        Field::RoomCount,
        Field::CheckIn,
        Field::CheckOut,
        Field::CardType,
        Field::CardNumber,
        Field::CardExpiry,
        Field::Cvv,
    ];

    pub const fn label(&self) -> &'static str {
        match self {
            Field::UnitPrice => "price per night",
            Field::RoomCount => "number of rooms",
            Field::CheckIn => "check-in date",
            Field::CheckOut => "check-out date",
            Field::CardType => "card type",
            Field::CardNumber => "card number",
            Field::CardExpiry => "expiry date",
            Field::Cvv => "CVV",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// =============================================================================
// Draft
// =============================================================================

/// Raw form values exactly as the user entered them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingDraft {
    /// Room count text; replaced by the clamped value when over-requested.
    pub rooms: String,
    pub check_in: Option<NaiveDate>,
    pub check_out: Option<NaiveDate>,
    pub card_type: Option<CardType>,
    pub card_number: String,
    /// `MM/YY`.
    pub card_expiry: String,
    pub cvv: String,
}

impl Default for BookingDraft {
    fn default() -> Self {
        BookingDraft {
            rooms: "1".to_string(),
            check_in: None,
            check_out: None,
            card_type: None,
            card_number: String::new(),
            card_expiry: String::new(),
            cvv: String::new(),
        }
    }
}

// =============================================================================
// Submit-time results
// =============================================================================

/// Every field that failed the full validation pass, keyed by field.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{} field(s) need attention", .errors.len())]
pub struct FormErrors {
    pub errors: BTreeMap<Field, String>,
}

impl FormErrors {
    pub fn get(&self, field: Field) -> Option<&str> {
        self.errors.get(&field).map(String::as_str)
    }
}

/// A draft that passed every validator and the availability guard.
///
/// Holds typed values only: digits-only card number, parsed expiry, dates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidBooking {
    pub offering: PackageOffering,
    pub room_count: u32,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub card_type: CardType,
    pub card_number: String,
    pub card_expiry: CardExpiry,
    /// First day of the expiry month.
    pub card_validity: NaiveDate,
    pub cvv: String,
    pub quote: PriceQuote,
}

impl ValidBooking {
    /// Builds the record to persist, with status `confirmed`.
    pub fn to_record(&self, booking_id: impl Into<String>, user_name: impl Into<String>) -> BookingRecord {
        BookingRecord {
            booking_id: booking_id.into(),
            user_name: user_name.into(),
            hotel_name: self.offering.hotel_name.clone(),
            package: self.offering.package_name.clone(),
            price: self.offering.unit_price,
            amount: self.quote.total,
            status: BookingStatus::Confirmed,
            booking_from: self.check_in,
            booking_to: self.check_out,
            no_of_rooms: self.room_count,
            card_type: self.card_type,
            card_number: self.card_number.clone(),
            cvv: self.cvv.clone(),
            card_validity: self.card_validity,
        }
    }
}

// =============================================================================
// Booking Form
// =============================================================================

/// Form state for booking one package.
#[derive(Debug, Clone)]
pub struct BookingForm {
    offering: PackageOffering,
    draft: BookingDraft,
    errors: BTreeMap<Field, String>,
    touched: BTreeSet<Field>,
    quote: Option<PriceQuote>,
}

impl BookingForm {
    /// Opens an empty form for `offering`.
    pub fn new(offering: PackageOffering) -> Self {
        let mut form = BookingForm {
            offering,
            draft: BookingDraft::default(),
            errors: BTreeMap::new(),
            touched: BTreeSet::new(),
            quote: None,
        };
        form.check_price();
        form.check_rooms();
        form
    }

    // -------------------------------------------------------------------------
    // Read access
    // -------------------------------------------------------------------------

    pub fn offering(&self) -> &PackageOffering {
        &self.offering
    }

    pub fn draft(&self) -> &BookingDraft {
        &self.draft
    }

    /// Live price, `None` until rooms and both dates are usable.
    pub fn quote(&self) -> Option<&PriceQuote> {
        self.quote.as_ref()
    }

    pub fn is_touched(&self, field: Field) -> bool {
        self.touched.contains(&field)
    }

    /// Errors of touched fields only: what the UI should render.
    pub fn visible_errors(&self) -> BTreeMap<Field, &str> {
        self.errors
            .iter()
            .filter(|(field, _)| self.touched.contains(field))
            .map(|(field, msg)| (*field, msg.as_str()))
            .collect()
    }

    /// Status of one field, whether or not it has been touched.
    pub fn field_status(&self, field: Field) -> FieldStatus {
        match self.errors.get(&field) {
            Some(msg) => FieldStatus {
                valid: false,
                message: Some(msg.clone()),
            },
            None => FieldStatus::ok(),
        }
    }

    /// True when submitting is pointless: the package is sold out.
    pub fn is_sold_out(&self) -> bool {
        self.offering.rooms_available == 0
    }

    // -------------------------------------------------------------------------
    // Field updates
    // -------------------------------------------------------------------------

    pub fn set_rooms(&mut self, raw: &str) {
        self.draft.rooms = raw.to_string();
        self.check_rooms();
        self.recompute_quote();
    }

    pub fn set_check_in(&mut self, date: Option<NaiveDate>) {
        self.draft.check_in = date;
        self.check_dates();
        self.recompute_quote();
    }

    pub fn set_check_out(&mut self, date: Option<NaiveDate>) {
        self.draft.check_out = date;
        self.check_dates();
        self.recompute_quote();
    }

    pub fn set_card_type(&mut self, card_type: Option<CardType>) {
        self.draft.card_type = card_type;
        self.check_card_type();
    }

    pub fn set_card_number(&mut self, raw: &str) {
        self.draft.card_number = raw.to_string();
        let result = validate_card_number(raw);
        self.record(Field::CardNumber, &result);
    }

    pub fn set_card_expiry(&mut self, raw: &str, today: NaiveDate) {
        self.draft.card_expiry = raw.to_string();
        let result = validate_card_expiry(raw, today);
        self.record(Field::CardExpiry, &result);
    }

    pub fn set_cvv(&mut self, raw: &str) {
        self.draft.cvv = raw.to_string();
        let result = validate_cvv(raw);
        self.record(Field::Cvv, &result);
    }

    /// Marks a field as visited (blur) so its error shows.
    pub fn touch(&mut self, field: Field) {
        self.touched.insert(field);
    }

    /// Replaces the offering snapshot (e.g. after a re-fetch) and re-checks rooms.
    pub fn refresh_offering(&mut self, offering: PackageOffering) {
        self.offering = offering;
        self.check_price();
        self.check_rooms();
        self.recompute_quote();
    }

    /// Discards the draft. Called after a confirmed booking.
    pub fn reset(&mut self) {
        self.draft = BookingDraft::default();
        self.errors.clear();
        self.touched.clear();
        self.quote = None;
        self.check_price();
        self.check_rooms();
    }

    // -------------------------------------------------------------------------
    // Full validation
    // -------------------------------------------------------------------------

    /// Runs the full validator set plus the availability guard.
    ///
    /// Every field is marked touched, so all messages become visible
    /// whether or not validation succeeds.
    pub fn validate_all(&mut self, today: NaiveDate) -> Result<ValidBooking, FormErrors> {
        self.touched.extend(Field::ALL);

        let card_number = validate_card_number(&self.draft.card_number);
        self.record(Field::CardNumber, &card_number);
        let card_expiry = validate_card_expiry(&self.draft.card_expiry, today);
        self.record(Field::CardExpiry, &card_expiry);
        let cvv = validate_cvv(&self.draft.cvv);
        self.record(Field::Cvv, &cvv);
        self.check_card_type();
        self.check_dates();
        self.check_price();
        let rooms = self.check_rooms();
        self.recompute_quote();

        let dates = validate_date_range(self.draft.check_in, self.draft.check_out);

        match (rooms, dates, self.draft.card_type, card_number, card_expiry, cvv) {
            (
                Some(room_count),
                Ok((check_in, check_out)),
                Some(card_type),
                Ok(card_number),
                Ok(card_expiry),
                Ok(cvv),
            ) if self.errors.is_empty() => {
                let quote = match quote(self.offering.unit_price, room_count, check_in, check_out) {
                    Ok(q) => q,
                    Err(e) => {
                        self.errors.insert(Field::RoomCount, e.to_string());
                        return Err(self.form_errors());
                    }
                };
                let card_validity = match card_expiry.first_of_month() {
                    Some(d) => d,
                    None => {
                        self.errors
                            .insert(Field::CardExpiry, ValidationError::ExpiryFormat.to_string());
                        return Err(self.form_errors());
                    }
                };

                Ok(ValidBooking {
                    offering: self.offering.clone(),
                    room_count,
                    check_in,
                    check_out,
                    card_type,
                    card_number,
                    card_expiry,
                    card_validity,
                    cvv,
                    quote,
                })
            }
            _ => Err(self.form_errors()),
        }
    }

    // -------------------------------------------------------------------------
    // Internals
    // -------------------------------------------------------------------------

    fn form_errors(&self) -> FormErrors {
        FormErrors {
            errors: self.errors.clone(),
        }
    }

    fn record<T>(&mut self, field: Field, result: &Result<T, ValidationError>) {
        match result {
            Ok(_) => {
                self.errors.remove(&field);
            }
            Err(e) => {
                self.errors.insert(field, e.to_string());
            }
        }
    }

    /// The price comes with the offering, not from the user, so a bad one
    /// is shown right away.
    fn check_price(&mut self) {
        let result = validate_unit_price(self.offering.unit_price);
        if result.is_err() {
            self.touched.insert(Field::UnitPrice);
        }
        self.record(Field::UnitPrice, &result);
    }

    /// Validates the room text and applies the clamp-and-warn policy.
    ///
    /// Returns the usable room count, if any.
    fn check_rooms(&mut self) -> Option<u32> {
        let requested = match validate_room_count(&self.draft.rooms) {
            Ok(n) => n,
            Err(e) => {
                self.errors.insert(Field::RoomCount, e.to_string());
                return None;
            }
        };

        let check = check_availability(requested, self.offering.rooms_available);
        match check.message {
            Some(message) => {
                self.errors.insert(Field::RoomCount, message);
                // A clamp must be visible right away, not only after blur.
                self.touched.insert(Field::RoomCount);
                if check.clamped_value == 0 {
                    return None;
                }
                self.draft.rooms = check.clamped_value.to_string();
                // The clamped value is bookable but the warning stays until the next edit.
                None
            }
            None => {
                self.errors.remove(&Field::RoomCount);
                Some(check.clamped_value)
            }
        }
    }

    fn check_dates(&mut self) {
        self.errors.remove(&Field::CheckIn);
        self.errors.remove(&Field::CheckOut);

        match validate_date_range(self.draft.check_in, self.draft.check_out) {
            Ok(_) => {}
            Err(ValidationError::DateOrder) => {
                self.errors
                    .insert(Field::CheckOut, ValidationError::DateOrder.to_string());
            }
            Err(e) => {
                if self.draft.check_in.is_none() {
                    self.errors.insert(Field::CheckIn, e.to_string());
                }
                if self.draft.check_out.is_none() {
                    self.errors.insert(
                        Field::CheckOut,
                        ValidationError::Required {
                            field: Field::CheckOut.label().to_string(),
                        }
                        .to_string(),
                    );
                }
            }
        }
    }

    fn check_card_type(&mut self) {
        if self.draft.card_type.is_some() {
            self.errors.remove(&Field::CardType);
        } else {
            self.errors.insert(
                Field::CardType,
                ValidationError::Required {
                    field: Field::CardType.label().to_string(),
                }
                .to_string(),
            );
        }
    }

    fn recompute_quote(&mut self) {
        if !self.offering.unit_price.is_positive() {
            self.quote = None;
            return;
        }
        let rooms = validate_room_count(&self.draft.rooms)
            .ok()
            .map(|n| n.min(self.offering.rooms_available))
            .filter(|n| *n > 0);

        self.quote = match (rooms, self.draft.check_in, self.draft.check_out) {
            (Some(rooms), Some(check_in), Some(check_out)) => {
                quote(self.offering.unit_price, rooms, check_in, check_out).ok()
            }
            _ => None,
        };
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Money;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn offering(rooms_available: u32) -> PackageOffering {
        PackageOffering {
            hotel_name: "Lagoon View".to_string(),
            package_name: "Deluxe".to_string(),
            unit_price: Money::from_cents(10000),
            rooms_available,
        }
    }

    fn filled_form(rooms_available: u32) -> BookingForm {
        let today = date(2024, 5, 20);
        let mut form = BookingForm::new(offering(rooms_available));
        form.set_rooms("2");
        form.set_check_in(Some(date(2024, 6, 1)));
        form.set_check_out(Some(date(2024, 6, 3)));
        form.set_card_type(Some(CardType::Visa));
        form.set_card_number("4111111111111111");
        form.set_card_expiry("12/26", today);
        form.set_cvv("123");
        form
    }

    #[test]
    fn test_errors_hidden_until_touched() {
        let mut form = BookingForm::new(offering(5));
        form.set_cvv("12");

        assert!(!form.field_status(Field::Cvv).valid);
        assert!(form.visible_errors().is_empty());

        form.touch(Field::Cvv);
        assert_eq!(
            form.visible_errors().get(&Field::Cvv).copied(),
            Some("CVV must be exactly 3 digits")
        );
    }

    #[test]
    fn test_quote_recomputed_on_every_change() {
        let mut form = BookingForm::new(offering(5));
        assert!(form.quote().is_none());

        form.set_check_in(Some(date(2024, 6, 1)));
        assert!(form.quote().is_none());

        form.set_check_out(Some(date(2024, 6, 3)));
        assert_eq!(form.quote().map(|q| q.total), Some(Money::from_cents(30000)));

        form.set_rooms("2");
        assert_eq!(form.quote().map(|q| q.total), Some(Money::from_cents(60000)));

        form.set_check_out(Some(date(2024, 6, 4)));
        assert_eq!(form.quote().map(|q| q.nights), Some(4));
    }

    #[test]
    fn test_over_request_clamps_and_stays_editable() {
        let mut form = BookingForm::new(offering(5));
        form.set_rooms("8");

        assert_eq!(form.draft().rooms, "5");
        assert_eq!(
            form.visible_errors().get(&Field::RoomCount).copied(),
            Some("only 5 rooms available")
        );

        form.set_rooms("3");
        assert!(form.field_status(Field::RoomCount).valid);
    }

    #[test]
    fn test_clamped_rooms_pass_full_validation() {
        let mut form = filled_form(5);
        form.set_rooms("8");
        let valid = form.validate_all(date(2024, 5, 20)).unwrap();
        assert_eq!(valid.room_count, 5);
        assert_eq!(valid.quote.total, Money::from_cents(150000));
    }

    #[test]
    fn test_sold_out_blocks_submit() {
        let mut form = filled_form(0);
        assert!(form.is_sold_out());

        let errors = form.validate_all(date(2024, 5, 20)).unwrap_err();
        assert_eq!(errors.get(Field::RoomCount), Some("no rooms available"));
    }

    #[test]
    fn test_validate_all_reveals_every_error() {
        let mut form = BookingForm::new(offering(5));
        let errors = form.validate_all(date(2024, 5, 20)).unwrap_err();

        for field in [
            Field::CheckIn,
            Field::CheckOut,
            Field::CardType,
            Field::CardNumber,
            Field::CardExpiry,
            Field::Cvv,
        ] {
            assert!(errors.get(field).is_some(), "expected error on {field}");
            assert!(form.is_touched(field));
        }
        assert_eq!(form.visible_errors().len(), errors.errors.len());
    }

    #[test]
    fn test_validate_all_success() {
        let mut form = filled_form(5);
        let valid = form.validate_all(date(2024, 5, 20)).unwrap();

        assert_eq!(valid.room_count, 2);
        assert_eq!(valid.quote.nights, 3);
        assert_eq!(valid.quote.total, Money::from_cents(60000));
        assert_eq!(valid.card_validity, date(2026, 12, 1));

        let record = valid.to_record("BK-1", "alice");
        assert_eq!(record.status, BookingStatus::Confirmed);
        assert_eq!(record.amount.to_string(), "$600.00");
        assert_eq!(record.no_of_rooms, 2);
    }

    #[test]
    fn test_reversed_dates_flag_check_out() {
        let mut form = filled_form(5);
        form.set_check_out(Some(date(2024, 5, 30)));
        let errors = form.validate_all(date(2024, 5, 20)).unwrap_err();
        assert_eq!(
            errors.get(Field::CheckOut),
            Some("check-out date must be after check-in date")
        );
    }

    #[test]
    fn test_reset_discards_draft() {
        let mut form = filled_form(5);
        form.touch(Field::Cvv);
        form.reset();

        assert_eq!(form.draft(), &BookingDraft::default());
        assert!(form.quote().is_none());
        assert!(form.visible_errors().is_empty());
    }

    #[test]
    fn test_non_positive_price_blocks_submit() {
        for cents in [0, -10000] {
            let mut form = BookingForm::new(PackageOffering {
                unit_price: Money::from_cents(cents),
                ..offering(5)
            });
            assert_eq!(
                form.visible_errors().get(&Field::UnitPrice).copied(),
                Some("price per night must be greater than zero")
            );

            form.set_rooms("2");
            form.set_check_in(Some(date(2024, 6, 1)));
            form.set_check_out(Some(date(2024, 6, 3)));
            form.set_card_type(Some(CardType::Visa));
            form.set_card_number("4111111111111111");
            form.set_card_expiry("12/26", date(2024, 5, 20));
            form.set_cvv("123");
            assert!(form.quote().is_none(), "no quote at {cents} cents");

            let errors = form.validate_all(date(2024, 5, 20)).unwrap_err();
            assert_eq!(errors.errors.len(), 1);
            assert!(errors.get(Field::UnitPrice).is_some());
        }
    }

    #[test]
    fn test_refresh_offering_fixes_price() {
        let mut form = BookingForm::new(PackageOffering {
            unit_price: Money::zero(),
            ..offering(5)
        });
        form.refresh_offering(offering(5));
        assert!(form.field_status(Field::UnitPrice).valid);
    }

    #[test]
    fn test_refresh_offering_rechecks_rooms() {
        let mut form = filled_form(5);
        form.refresh_offering(offering(1));
        assert_eq!(form.draft().rooms, "1");
        assert!(!form.field_status(Field::RoomCount).valid);
    }
}

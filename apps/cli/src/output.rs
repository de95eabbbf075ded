//! Text and JSON rendering of command results.

use std::collections::BTreeMap;
use std::fmt::Write as _;

use serde::Serialize;
use travelmate_core::{BookingRecord, Field, FieldStatus, PriceQuote, ReceiptView};

use crate::error::CliResult;

/// Pretty JSON on stdout.
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> CliResult<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

pub fn render_quote(quote: &PriceQuote) -> String {
    format!(
        "{} × {} room(s) × {} night(s) = {}",
        quote.unit_price, quote.room_count, quote.nights, quote.total
    )
}

/// One line per field: `✔ card number` or `✘ CVV: CVV must be exactly 3 digits`.
pub fn render_field_report(report: &BTreeMap<Field, FieldStatus>) -> String {
    let mut out = String::new();
    for (field, status) in report {
        match &status.message {
            None => {
                let _ = writeln!(out, "  ✔ {}", field);
            }
            Some(message) => {
                let _ = writeln!(out, "  ✘ {}: {}", field, message);
            }
        }
    }
    out
}

/// Joins visible form errors into one message.
pub fn render_errors<S: AsRef<str>>(errors: &BTreeMap<Field, S>) -> String {
    errors
        .iter()
        .map(|(field, message)| format!("{}: {}", field, message.as_ref()))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn render_booking_row(record: &BookingRecord) -> String {
    format!(
        "{:<18} {:<10} {:<24} {} → {}  {:>2} room(s)  {:>12}",
        record.booking_id,
        record.status.as_str(),
        record.hotel_name,
        record.booking_from,
        record.booking_to,
        record.no_of_rooms,
        record.amount.to_string()
    )
}

pub fn render_receipt(receipt: &ReceiptView) -> String {
    let mut out = String::new();
    let rule = "─".repeat(44);

    match &receipt.hotel {
        Some(hotel) => {
            let _ = writeln!(out, "{}", hotel.name);
            let _ = writeln!(out, "{}  {}", hotel.location, hotel.contact_number);
        }
        None => {
            let _ = writeln!(out, "{}", receipt.hotel_name);
        }
    }
    let _ = writeln!(out, "{}", rule);
    let _ = writeln!(out, "Booking   {}", receipt.booking_id);
    let _ = writeln!(out, "Auth      {}", receipt.auth_code);
    let _ = writeln!(out, "Guest     {}", receipt.user_name);
    let _ = writeln!(out, "Status    {}", receipt.status);
    let _ = writeln!(out, "Package   {} × {} room(s)", receipt.package, receipt.room_count);
    let _ = writeln!(out, "Stay      {} - {}", receipt.check_in, receipt.check_out);
    let _ = writeln!(out, "{}", rule);
    for line in &receipt.lines {
        let _ = writeln!(out, "{:<30}{:>14}", line.date, line.amount.to_string());
    }
    let _ = writeln!(out, "{}", rule);
    let _ = writeln!(
        out,
        "{:<30}{:>14}",
        format!("TOTAL ({} nights)", receipt.nights),
        receipt.total_display
    );
    if !receipt.amount_matches {
        let _ = writeln!(out, "(charged {})", receipt.recorded_amount);
    }
    let _ = writeln!(out, "{} {}", receipt.card_type, receipt.masked_card);
    out
}

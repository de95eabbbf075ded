//! `travelmate bookings`: the signed-in user's booking history.

use tracing::warn;
use travelmate_client::{load_bookings, BookingClient, ClientConfig};
use travelmate_core::{project, BookingQuery, SortOrder};

use super::session;
use crate::cli::{BookingsArgs, GlobalArgs};
use crate::error::CliResult;
use crate::output::{print_json, render_booking_row, render_receipt};

pub(crate) fn query(args: &BookingsArgs) -> BookingQuery {
    BookingQuery {
        status: args.status,
        hotel: args.hotel.clone(),
        from: args.from,
        to: args.to,
        sort: args.sort,
        order: if args.desc {
            SortOrder::Descending
        } else {
            SortOrder::Ascending
        },
    }
}

pub async fn run(args: BookingsArgs, config: &ClientConfig, global: &GlobalArgs) -> CliResult<()> {
    let session = session(config, None)?;
    let client = BookingClient::new(config)?;
    let records = load_bookings(&client, &session, &query(&args)).await?;

    if args.receipts {
        let mut receipts = Vec::with_capacity(records.len());
        for record in &records {
            match project(record, None, None) {
                Ok(receipt) => receipts.push(receipt),
                Err(e) => warn!(booking_id = %record.booking_id, error = %e, "Skipping receipt"),
            }
        }
        if global.json {
            return print_json(&receipts);
        }
        for receipt in &receipts {
            println!("{}", render_receipt(receipt));
        }
        return Ok(());
    }

    if global.json {
        // Card fields stay out of listings.
        let rows: Vec<_> = records
            .iter()
            .map(|r| {
                serde_json::json!({
                    "booking_id": r.booking_id,
                    "status": r.status,
                    "hotel_name": r.hotel_name,
                    "package": r.package,
                    "booking_from": r.booking_from,
                    "booking_to": r.booking_to,
                    "no_of_rooms": r.no_of_rooms,
                    "amount": r.amount,
                })
            })
            .collect();
        return print_json(&rows);
    }

    if records.is_empty() {
        println!("No bookings.");
    }
    for record in &records {
        println!("{}", render_booking_row(record));
    }
    Ok(())
}

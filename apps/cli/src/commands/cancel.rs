//! `travelmate cancel <booking-id>`.

use tracing::info;
use travelmate_client::{cancel_booking, load_bookings, BookingClient, ClientConfig};
use travelmate_core::BookingQuery;

use super::session;
use crate::cli::{CancelArgs, GlobalArgs};
use crate::error::{CliError, CliResult};
use crate::output::print_json;

pub async fn run(args: CancelArgs, config: &ClientConfig, global: &GlobalArgs) -> CliResult<()> {
    let session = session(config, None)?;
    let client = BookingClient::new(config)?;

    // Look the booking up first so the status gate runs before any DELETE.
    let records = load_bookings(&client, &session, &BookingQuery::default()).await?;
    let record = records
        .iter()
        .find(|r| r.booking_id == args.booking_id)
        .ok_or_else(|| CliError::BookingNotFound(args.booking_id.clone()))?;

    cancel_booking(&client, &session, record).await?;
    info!(booking_id = %record.booking_id, "Booking cancelled");

    if global.json {
        return print_json(&serde_json::json!({
            "booking_id": record.booking_id,
            "status": "cancelled",
        }));
    }
    println!("Cancelled {}.", record.booking_id);
    Ok(())
}

//! `travelmate book`: validate, submit and print the receipt.

use std::collections::BTreeMap;

use chrono::Local;
use tracing::{debug, info};
use travelmate_client::{BookingClient, BookingSubmitter, ClientConfig, Navigation, SubmitOutcome};
use travelmate_core::{Field, FieldStatus};

use super::{fill_card, session, stay_form};
use crate::cli::{BookArgs, GlobalArgs};
use crate::error::{CliError, CliResult};
use crate::output::{print_json, render_errors, render_field_report, render_receipt};

pub async fn run(args: BookArgs, config: &ClientConfig, global: &GlobalArgs) -> CliResult<()> {
    let session = session(config, args.user.as_deref())?;
    // Expiry is judged on the local date, as in `check`.
    let now = Local::now();

    let mut form = stay_form(&args.package, &args.stay);
    fill_card(&mut form, &args.card, now.date_naive());

    let client = BookingClient::new(config)?;
    debug!(base_url = %client.base_url(), "Booking API");
    let mut submitter = BookingSubmitter::new(client, config.id_scheme());

    match submitter.submit(&mut form, None, &session, now).await? {
        SubmitOutcome::Confirmed {
            receipt,
            navigate_to,
            ..
        } => {
            if global.json {
                print_json(&receipt)?;
            } else {
                print!("{}", render_receipt(&receipt));
                match navigate_to {
                    Navigation::BookingsList => println!("\nSee all bookings with `travelmate bookings`."),
                }
            }
            info!(booking_id = %receipt.booking_id, "Receipt printed");
            Ok(())
        }
        SubmitOutcome::Invalid(errors) => {
            if !global.json {
                let report: BTreeMap<Field, FieldStatus> = Field::ALL
                    .into_iter()
                    .map(|field| (field, form.field_status(field)))
                    .collect();
                eprint!("{}", render_field_report(&report));
            }
            Err(CliError::Invalid(render_errors(&errors.errors)))
        }
        SubmitOutcome::Failed { error, .. } => Err(error.into()),
    }
}

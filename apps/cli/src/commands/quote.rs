//! `travelmate quote`: price a stay offline.

use serde::Serialize;
use tracing::warn;
use travelmate_core::{Field, PriceQuote};

use super::stay_form;
use crate::cli::{GlobalArgs, QuoteArgs};
use crate::error::{CliError, CliResult};
use crate::output::{print_json, render_errors, render_quote};

#[derive(Debug, Serialize)]
struct QuoteOutput<'a> {
    hotel: &'a str,
    package: &'a str,
    #[serde(flatten)]
    quote: PriceQuote,
    /// Set when the requested room count was reduced to what is left.
    #[serde(skip_serializing_if = "Option::is_none")]
    warning: Option<String>,
}

pub fn run(args: QuoteArgs, global: &GlobalArgs) -> CliResult<()> {
    let mut form = stay_form(&args.package, &args.stay);

    // Accept a clamp the same way the booking screen does: keep the
    // reduced count and show the warning.
    let warning = form
        .visible_errors()
        .get(&Field::RoomCount)
        .map(|msg| msg.to_string());
    if warning.is_some() && !form.is_sold_out() {
        let clamped = form.draft().rooms.clone();
        warn!(rooms = %clamped, "Room count reduced to availability");
        form.set_rooms(&clamped);
    }

    for field in [Field::RoomCount, Field::CheckIn, Field::CheckOut] {
        form.touch(field);
    }
    let errors = form.visible_errors();
    let quote = match form.quote() {
        Some(quote) if errors.is_empty() => *quote,
        _ => return Err(CliError::Invalid(render_errors(&errors))),
    };

    if global.json {
        return print_json(&QuoteOutput {
            hotel: &args.package.hotel,
            package: &args.package.package,
            quote,
            warning,
        });
    }

    if let Some(warning) = &warning {
        eprintln!("note: {}", warning);
    }
    println!("{} / {}", args.package.hotel, args.package.package);
    println!("{}", render_quote(&quote));
    Ok(())
}

//! `travelmate check-hotel`: validate hotel registration details.

use std::collections::BTreeMap;

use travelmate_core::validation::validate_hotel;
use travelmate_core::{FieldStatus, Hotel};

use crate::cli::{GlobalArgs, HotelArgs};
use crate::error::{CliError, CliResult};
use crate::output::print_json;

const HOTEL_FIELDS: [&str; 5] = ["name", "location", "contact_number", "email", "website"];

pub fn run(args: HotelArgs, global: &GlobalArgs) -> CliResult<()> {
    let hotel = Hotel {
        name: args.name,
        location: args.location,
        contact_number: args.contact,
        email: args.email,
        website: args.website,
    };

    let failures = validate_hotel(&hotel);
    let mut report: BTreeMap<&str, FieldStatus> =
        HOTEL_FIELDS.iter().map(|f| (*f, FieldStatus::ok())).collect();
    for (field, error) in &failures {
        report.insert(
            *field,
            FieldStatus {
                valid: false,
                message: Some(error.to_string()),
            },
        );
    }

    if global.json {
        print_json(&report)?;
    } else {
        for field in HOTEL_FIELDS {
            match report.get(&field).and_then(|s| s.message.as_deref()) {
                None => println!("  ✔ {}", field),
                Some(message) => println!("  ✘ {}: {}", field, message),
            }
        }
    }

    if failures.is_empty() {
        return Ok(());
    }
    Err(CliError::Invalid(
        failures
            .iter()
            .map(|(field, error)| format!("{}: {}", field, error))
            .collect::<Vec<_>>()
            .join("\n"),
    ))
}

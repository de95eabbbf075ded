//! `travelmate check`: run the full booking form validation without
//! touching the network.

use std::collections::BTreeMap;

use chrono::Local;
use travelmate_core::{Field, FieldStatus};

use super::{fill_card, stay_form};
use crate::cli::{CheckArgs, GlobalArgs};
use crate::error::{CliError, CliResult};
use crate::output::{print_json, render_errors, render_field_report, render_quote};

pub fn run(args: CheckArgs, global: &GlobalArgs) -> CliResult<()> {
    let today = Local::now().date_naive();
    let mut form = stay_form(&args.package, &args.stay);
    fill_card(&mut form, &args.card, today);

    let result = form.validate_all(today);
    let report: BTreeMap<Field, FieldStatus> = Field::ALL
        .into_iter()
        .map(|field| (field, form.field_status(field)))
        .collect();

    if global.json {
        print_json(&report)?;
    } else {
        print!("{}", render_field_report(&report));
    }

    match result {
        Ok(valid) => {
            if !global.json {
                println!("{}", render_quote(&valid.quote));
            }
            Ok(())
        }
        Err(errors) => Err(CliError::Invalid(render_errors(&errors.errors))),
    }
}

//! # Command Handlers
//!
//! Each subcommand is a function taking its parsed args, the loaded
//! configuration and the global flags. Handlers print their own output
//! and return `CliResult<()>`.
//!
//! ```text
//! main ──► commands::run ──┬─► quote        (pricing only, offline)
//!                          ├─► check        (full form validation, offline)
//!                          ├─► check_hotel  (hotel registration, offline)
//!                          ├─► book         (BookingSubmitter over HTTP)
//!                          ├─► bookings     (history with filters)
//!                          ├─► cancel       (status-gated delete)
//!                          └─► config       (show / init config.toml)
//! ```

mod book;
mod bookings;
mod cancel;
mod check;
mod check_hotel;
mod config;
mod quote;

use chrono::NaiveDate;
use travelmate_client::{ClientConfig, ClientError, Session};
use travelmate_core::{BookingForm, PackageOffering};

use crate::cli::{CardArgs, Commands, GlobalArgs, PackageArgs, StayArgs};
use crate::error::CliResult;

/// Dispatches one parsed command.
pub async fn run(command: Commands, config: ClientConfig, global: &GlobalArgs) -> CliResult<()> {
    match command {
        Commands::Quote(args) => quote::run(args, global),
        Commands::Check(args) => check::run(args, global),
        Commands::CheckHotel(args) => check_hotel::run(args, global),
        Commands::Book(args) => book::run(args, &config, global).await,
        Commands::Bookings(args) => bookings::run(args, &config, global).await,
        Commands::Cancel(args) => cancel::run(args, &config, global).await,
        Commands::Config(args) => config::run(args, &config, global),
    }
}

// =============================================================================
// Shared helpers
// =============================================================================

pub(crate) fn offering(args: &PackageArgs) -> PackageOffering {
    PackageOffering {
        hotel_name: args.hotel.clone(),
        package_name: args.package.clone(),
        unit_price: args.price,
        rooms_available: args.available,
    }
}

/// Builds a form and feeds it the stay fields in the order a user would
/// fill them in.
pub(crate) fn stay_form(package: &PackageArgs, stay: &StayArgs) -> BookingForm {
    let mut form = BookingForm::new(offering(package));
    form.set_rooms(&stay.rooms);
    form.set_check_in(stay.check_in);
    form.set_check_out(stay.check_out);
    form
}

pub(crate) fn fill_card(form: &mut BookingForm, card: &CardArgs, today: NaiveDate) {
    form.set_card_type(card.card_type);
    form.set_card_number(&card.card_number);
    form.set_card_expiry(&card.expiry, today);
    form.set_cvv(&card.cvv);
}

/// `--user` wins over the configured user; the token only comes from config.
pub(crate) fn session(config: &ClientConfig, user: Option<&str>) -> CliResult<Session> {
    match (user.map(str::trim).filter(|u| !u.is_empty()), config.session()) {
        (Some(user), Some(configured)) if configured.user_name() == user => Ok(configured),
        (Some(user), _) => Ok(Session::anonymous(user)),
        (None, Some(configured)) => Ok(configured),
        (None, None) => Err(ClientError::MissingSession.into()),
    }
}

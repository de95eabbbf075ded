//! Command-line argument definitions (clap derive).
//!
//! Only argument shapes live here; the commands module does the work.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use travelmate_core::validation::validate_unit_price;
use travelmate_core::{BookingStatus, CardType, Money, SortKey, ValidationError};

/// TravelMate booking client.
#[derive(Debug, Parser)]
#[command(
    name = "travelmate",
    version,
    author,
    about = "Quote, validate and book TravelMate hotel packages"
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Commands,
}

/// Flags shared by every command.
#[derive(Debug, Clone, Args)]
pub struct GlobalArgs {
    /// Raise log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Config file (default: platform config dir / config.toml)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Print machine-readable JSON instead of text
    #[arg(long, global = true)]
    pub json: bool,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Price a stay without booking it
    Quote(QuoteArgs),
    /// Validate a full booking form without submitting it
    Check(CheckArgs),
    /// Validate hotel registration details
    CheckHotel(HotelArgs),
    /// Submit a booking
    Book(BookArgs),
    /// List your bookings
    Bookings(BookingsArgs),
    /// Cancel a confirmed booking
    Cancel(CancelArgs),
    /// Show or initialize the configuration file
    Config(ConfigArgs),
}

// =============================================================================
// Booking inputs
// =============================================================================

/// The package being booked.
#[derive(Debug, Clone, Args)]
pub struct PackageArgs {
    #[arg(long, default_value = "Hotel")]
    pub hotel: String,

    #[arg(long, default_value = "Standard")]
    pub package: String,

    /// Price per room per night, e.g. 100 or 149.50
    #[arg(long, value_parser = parse_unit_price)]
    pub price: Money,

    /// Rooms left in the package
    #[arg(long, default_value_t = u32::MAX)]
    pub available: u32,
}

fn parse_unit_price(raw: &str) -> Result<Money, String> {
    let price: Money = raw.parse().map_err(|e: ValidationError| e.to_string())?;
    validate_unit_price(price).map_err(|e| e.to_string())
}

/// The stay.
#[derive(Debug, Clone, Args)]
pub struct StayArgs {
    /// Number of rooms
    #[arg(long, default_value = "1")]
    pub rooms: String,

    /// Check-in date (YYYY-MM-DD)
    #[arg(long)]
    pub check_in: Option<NaiveDate>,

    /// Check-out date (YYYY-MM-DD)
    #[arg(long)]
    pub check_out: Option<NaiveDate>,
}

/// Payment card fields. Kept as raw text so the form reports every problem.
#[derive(Debug, Clone, Args)]
pub struct CardArgs {
    /// Visa, MasterCard or Amex
    #[arg(long)]
    pub card_type: Option<CardType>,

    /// 16 digits, spaces allowed
    #[arg(long, default_value = "")]
    pub card_number: String,

    /// MM/YY
    #[arg(long, default_value = "")]
    pub expiry: String,

    #[arg(long, default_value = "")]
    pub cvv: String,
}

#[derive(Debug, Args)]
pub struct QuoteArgs {
    #[command(flatten)]
    pub package: PackageArgs,

    #[command(flatten)]
    pub stay: StayArgs,
}

#[derive(Debug, Args)]
pub struct CheckArgs {
    #[command(flatten)]
    pub package: PackageArgs,

    #[command(flatten)]
    pub stay: StayArgs,

    #[command(flatten)]
    pub card: CardArgs,
}

#[derive(Debug, Args)]
pub struct BookArgs {
    #[command(flatten)]
    pub package: PackageArgs,

    #[command(flatten)]
    pub stay: StayArgs,

    #[command(flatten)]
    pub card: CardArgs,

    /// Book as this user instead of the configured one
    #[arg(long)]
    pub user: Option<String>,
}

#[derive(Debug, Args)]
pub struct HotelArgs {
    #[arg(long, default_value = "")]
    pub name: String,

    #[arg(long, default_value = "")]
    pub location: String,

    /// 10-digit contact number
    #[arg(long, default_value = "")]
    pub contact: String,

    #[arg(long, default_value = "")]
    pub email: String,

    #[arg(long)]
    pub website: Option<String>,
}

// =============================================================================
// History inputs
// =============================================================================

#[derive(Debug, Args)]
pub struct BookingsArgs {
    #[arg(long)]
    pub status: Option<BookingStatus>,

    /// Hotel name contains (case-insensitive)
    #[arg(long)]
    pub hotel: Option<String>,

    /// Stays ending on or after this date
    #[arg(long)]
    pub from: Option<NaiveDate>,

    /// Stays starting on or before this date
    #[arg(long)]
    pub to: Option<NaiveDate>,

    /// check_in, amount, hotel or booking_id
    #[arg(long, default_value = "check_in")]
    pub sort: SortKey,

    #[arg(long)]
    pub desc: bool,

    /// Print a full receipt for each booking
    #[arg(long)]
    pub receipts: bool,
}

#[derive(Debug, Args)]
pub struct CancelArgs {
    pub booking_id: String,
}

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

#[derive(Debug, Subcommand)]
pub enum ConfigAction {
    /// Print the effective configuration
    Show,
    /// Write the effective configuration to the config file
    Init,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_structure_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_book() {
        let cli = Cli::try_parse_from([
            "travelmate",
            "book",
            "--hotel",
            "Lagoon View",
            "--price",
            "100",
            "--available",
            "5",
            "--rooms",
            "2",
            "--check-in",
            "2024-06-01",
            "--check-out",
            "2024-06-03",
            "--card-type",
            "visa",
            "--card-number",
            "4111 1111 1111 1111",
            "--expiry",
            "12/26",
            "--cvv",
            "123",
        ])
        .unwrap();

        let Commands::Book(args) = cli.command else {
            panic!("expected book");
        };
        assert_eq!(args.package.price, Money::from_cents(10000));
        assert_eq!(args.card.card_type, Some(CardType::Visa));
        assert_eq!(args.stay.check_in, NaiveDate::from_ymd_opt(2024, 6, 1));
    }

    #[test]
    fn test_bad_price_is_a_parse_error() {
        let result = Cli::try_parse_from(["travelmate", "quote", "--price", "ten"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_price_must_be_positive() {
        for price in ["--price=0", "--price=-100", "--price=0.00"] {
            let result = Cli::try_parse_from(["travelmate", "quote", price]);
            let err = result.expect_err(price).to_string();
            assert!(err.contains("price per night must be greater than zero"), "{err}");
        }
        assert!(Cli::try_parse_from(["travelmate", "quote", "--price=0.01"]).is_ok());
    }

    #[test]
    fn test_bookings_filters_and_global_flags() {
        let cli = Cli::try_parse_from([
            "travelmate",
            "bookings",
            "--status",
            "canceled",
            "--sort",
            "amount",
            "--desc",
            "-vv",
            "--json",
        ])
        .unwrap();

        assert_eq!(cli.global.verbose, 2);
        assert!(cli.global.json);
        let Commands::Bookings(args) = cli.command else {
            panic!("expected bookings");
        };
        assert_eq!(args.status, Some(BookingStatus::Cancelled));
        assert_eq!(args.sort, SortKey::Amount);
        assert!(args.desc);
    }
}

//! Command-line argument parsing for Hotel Ledger
//!
//! This module defines the CLI structure using clap derive macros. Every
//! menu action is also available as a one-shot subcommand; with no
//! subcommand the interactive menu runs.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};

use crate::app::{BookingRequest, ReservationId};
use crate::cli::input::parse_date;
use crate::config::LoggingConfig;
use crate::constants::display;

/// Hotel Ledger - Room reservations for a small hotel
#[derive(Parser, Debug)]
#[command(
    name = "hotel_ledger",
    version,
    about = "Book, find and cancel hotel room reservations",
    long_about = "Keeps the reservation book of a small hotel.
Checks every booking against the room inventory for the requested nights and keeps the book safely on disk."
)]
pub struct Cli {
    /// Global options
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommands (interactive menu when omitted)
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Global arguments available to all subcommands
#[derive(Args, Debug, Clone, Default)]
pub struct GlobalArgs {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Very verbose logging (debug level)
    #[arg(long, global = true)]
    pub very_verbose: bool,

    /// Quiet mode - errors-only logging, no first-run notice
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Configuration file path
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Reservation data file path
    #[arg(long, global = true, value_name = "FILE")]
    pub data_file: Option<PathBuf>,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create a reservation
    Book(BookArgs),

    /// Find reservations by guest name
    Find {
        /// Guest name (case-insensitive)
        name: String,
    },

    /// List every active reservation
    List,

    /// Cancel a reservation by its code
    Cancel {
        /// Reservation code
        id: ReservationId,
    },

    /// Show reservation statistics
    Stats,

    /// Show free rooms per type for a period
    Availability(PeriodArgs),

    /// Run the interactive menu
    Menu,
}

/// Arguments for the book command
#[derive(Args, Debug, Clone)]
pub struct BookArgs {
    /// Guest responsible for the reservation
    #[arg(short, long)]
    pub guest: String,

    /// Check-in date (dd/mm/yyyy)
    #[arg(long, value_parser = date_arg)]
    pub check_in: NaiveDate,

    /// Check-out date (dd/mm/yyyy)
    #[arg(long, value_parser = date_arg)]
    pub check_out: NaiveDate,

    /// Room type (standard, premium, luxury)
    #[arg(short = 't', long)]
    pub room_type: String,

    /// Number of rooms
    #[arg(short, long, default_value = "1", allow_negative_numbers = true)]
    pub rooms: i64,

    /// Only show the price and availability, do not book
    #[arg(long)]
    pub dry_run: bool,
}

/// A date range
#[derive(Args, Debug, Clone)]
pub struct PeriodArgs {
    /// First night (dd/mm/yyyy)
    #[arg(long, value_parser = date_arg)]
    pub check_in: NaiveDate,

    /// Departure day (dd/mm/yyyy)
    #[arg(long, value_parser = date_arg)]
    pub check_out: NaiveDate,
}

fn date_arg(value: &str) -> std::result::Result<NaiveDate, String> {
    parse_date(value).ok_or_else(|| format!("expected a date as {}", display::DATE_HINT))
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Log filter level: command-line flags first, then the configured level
    pub fn log_level(&self, logging: &LoggingConfig) -> tracing::Level {
        if self.global.quiet {
            tracing::Level::ERROR
        } else if self.global.very_verbose {
            tracing::Level::DEBUG
        } else if self.global.verbose {
            tracing::Level::INFO
        } else {
            logging.level.parse().unwrap_or(tracing::Level::WARN)
        }
    }
}

impl BookArgs {
    /// Request handed to the ledger
    pub fn to_request(&self) -> BookingRequest {
        BookingRequest {
            guest_name: self.guest.clone(),
            check_in: self.check_in,
            check_out: self.check_out,
            room_type: self.room_type.clone(),
            room_count: self.rooms,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_book_command_parsing() {
        let cli = Cli::try_parse_from([
            "hotel_ledger",
            "book",
            "--guest",
            "ana souza",
            "--check-in",
            "01/01/2025",
            "--check-out",
            "05/01/2025",
            "-t",
            "premium",
            "-r",
            "2",
        ])
        .unwrap();

        let Some(Commands::Book(args)) = cli.command else {
            panic!("expected book command");
        };
        let request = args.to_request();
        assert_eq!(request.guest_name, "ana souza");
        assert_eq!(request.check_in, NaiveDate::from_ymd_opt(2025, 1, 1).unwrap());
        assert_eq!(request.room_type, "premium");
        assert_eq!(request.room_count, 2);
        assert!(!args.dry_run);
    }

    #[test]
    fn test_bad_date_is_rejected() {
        let result = Cli::try_parse_from([
            "hotel_ledger",
            "availability",
            "--check-in",
            "2025-01-01",
            "--check-out",
            "05/01/2025",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_no_subcommand_means_menu() {
        let cli = Cli::try_parse_from(["hotel_ledger", "--data-file", "book.json"]).unwrap();

        assert!(cli.command.is_none());
        assert_eq!(cli.global.data_file, Some(PathBuf::from("book.json")));
    }

    #[test]
    fn test_cancel_takes_numeric_code() {
        let cli = Cli::try_parse_from(["hotel_ledger", "cancel", "1004"]).unwrap();
        assert!(matches!(
            cli.command,
            Some(Commands::Cancel { id }) if id == ReservationId::new(1004)
        ));

        assert!(Cli::try_parse_from(["hotel_ledger", "cancel", "abc"]).is_err());
    }

    #[test]
    fn test_log_level() {
        let logging = LoggingConfig::default();
        let with = |global: GlobalArgs| Cli {
            global,
            command: Some(Commands::List),
        };

        let quiet = with(GlobalArgs {
            quiet: true,
            ..GlobalArgs::default()
        });
        let verbose = with(GlobalArgs {
            verbose: true,
            ..GlobalArgs::default()
        });
        let plain = with(GlobalArgs::default());

        assert_eq!(quiet.log_level(&logging), tracing::Level::ERROR);
        assert_eq!(verbose.log_level(&logging), tracing::Level::INFO);
        assert_eq!(plain.log_level(&logging), tracing::Level::WARN);

        let debug_config = LoggingConfig {
            level: "debug".to_string(),
        };
        assert_eq!(plain.log_level(&debug_config), tracing::Level::DEBUG);
    }
}

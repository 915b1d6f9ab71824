//! Hotel Ledger CLI application
//!
//! Command-line interface for the reservation book of a small hotel.
//! Runs the interactive menu by default, or a single command when given one.

use std::io;
use std::process;

use tracing::{error, info};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::{EnvFilter, fmt};

use hotel_ledger::app::{JsonFileStore, Ledger};
use hotel_ledger::cli::{
    Cli, Commands, Presenter, Prompter, handle_availability, handle_book, handle_cancel,
    handle_find, handle_list, handle_stats, run_menu,
};
use hotel_ledger::config::AppConfig;
use hotel_ledger::errors::Result;

#[tokio::main]
async fn main() {
    // Initialize program
    let result = run().await;

    // Refusals were already explained on screen
    if let Err(e) = result {
        if !e.is_recoverable() {
            eprintln!("Error: {}", e);
        }
        process::exit(1);
    }
}

/// Main application logic
async fn run() -> Result<()> {
    // Load environment variables from .env file if it exists
    dotenv::dotenv().ok();

    let cli = Cli::parse_args();

    if cli.global.config.is_none() {
        AppConfig::initialize_first_run(cli.global.quiet).await?;
    }
    let config = AppConfig::load(cli.global.config.clone()).await?;

    init_logging(&cli, &config);
    info!("Hotel Ledger v{} starting", env!("CARGO_PKG_VERSION"));

    let catalog = config.to_catalog()?;
    let data_file = config.data_file(cli.global.data_file.clone());
    info!("Using reservation file: {}", data_file.display());

    let mut ledger = Ledger::open(catalog, JsonFileStore::new(data_file))
        .await
        .map_err(|e| {
            error!("Could not load reservations: {}", e);
            e
        })?;
    let presenter = Presenter::new(&config.hotel);
    let mut out = io::stdout();

    match cli.command {
        Some(Commands::Book(args)) => {
            info!("Executing book command");
            handle_book(&mut ledger, &presenter, &args, &mut out).await
        }
        Some(Commands::Find { name }) => handle_find(&ledger, &presenter, &name, &mut out),
        Some(Commands::List) => handle_list(&ledger, &presenter, &mut out),
        Some(Commands::Cancel { id }) => {
            info!("Executing cancel command");
            handle_cancel(&mut ledger, &presenter, id, local_now(), &mut out).await
        }
        Some(Commands::Stats) => handle_stats(&ledger, &presenter, &mut out),
        Some(Commands::Availability(period)) => {
            handle_availability(&ledger, &presenter, &period, &mut out)
        }
        Some(Commands::Menu) | None => {
            let mut prompter = Prompter::stdio();
            run_menu(&mut ledger, &presenter, &mut prompter, local_now).await
        }
    }
}

/// Wall-clock time in the local timezone
fn local_now() -> chrono::NaiveDateTime {
    chrono::Local::now().naive_local()
}

/// Initialize logging based on CLI verbosity and the configured level
fn init_logging(cli: &Cli, config: &AppConfig) {
    let log_level = cli.log_level(&config.logging);

    // Create environment filter
    let filter = EnvFilter::from_default_env().add_directive(
        format!("hotel_ledger={}", log_level)
            .parse()
            .unwrap_or_else(|_| LevelFilter::WARN.into()),
    );

    // Screens own stdout, logs go to stderr
    fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .with_level(cli.global.very_verbose)
        .init();

    if cli.global.very_verbose {
        info!("Very verbose logging enabled");
    } else if cli.global.verbose {
        info!("Verbose logging enabled");
    }
}

//! Application constants for Hotel Ledger
//!
//! This module centralizes all constants used throughout the application,
//! organized by functional domain.

/// Environment variable names
pub mod env {
    /// Overrides the reservation data file location
    pub const DATA_FILE: &str = "HOTEL_LEDGER_DATA_FILE";
}

/// Default room catalog, used when no configuration file overrides it
pub mod rooms {
    /// Standard rooms in the building
    pub const STANDARD_COUNT: u32 = 10;

    /// Premium rooms in the building
    pub const PREMIUM_COUNT: u32 = 5;

    /// Luxury rooms in the building
    pub const LUXURY_COUNT: u32 = 3;

    /// Nightly rate of a standard room, in cents
    pub const STANDARD_RATE_CENTS: i64 = 10_000;

    /// Nightly rate of a premium room, in cents
    pub const PREMIUM_RATE_CENTS: i64 = 18_000;

    /// Nightly rate of a luxury room, in cents
    pub const LUXURY_RATE_CENTS: i64 = 25_000;
}

/// Reservation identifiers
pub mod ids {
    /// First reference code handed out on an empty ledger
    pub const FIRST_RESERVATION_ID: u64 = 1001;
}

/// File and directory names
pub mod files {
    /// Application directory under the user's config/data dirs
    pub const APP_DIR: &str = "hotel-ledger";

    /// Reservation data file name
    pub const DATA_FILE_NAME: &str = "reservations.json";

    /// Configuration file name inside the config directory
    pub const CONFIG_FILE_NAME: &str = "config.toml";

    /// Project-local configuration file name
    pub const LOCAL_CONFIG_FILE_NAME: &str = "hotel-ledger.toml";

    /// Suffix appended to the data file while it is being rewritten
    pub const TEMP_FILE_SUFFIX: &str = ".tmp";

    /// Version of the on-disk reservation format
    pub const DATA_FORMAT_VERSION: u32 = 1;
}

/// Display and input conventions
pub mod display {
    /// Date format used for input and output (day/month/year)
    pub const DATE_FORMAT: &str = "%d/%m/%Y";

    /// Hint shown next to date prompts
    pub const DATE_HINT: &str = "dd/mm/yyyy";

    /// Default hotel name shown in the menu banner
    pub const DEFAULT_HOTEL_NAME: &str = "Hotel Flor de Lotus";

    /// Default currency symbol
    pub const DEFAULT_CURRENCY_SYMBOL: &str = "R$";

    /// Width of banner separators
    pub const BANNER_WIDTH: usize = 60;
}

//! Configuration management for Hotel Ledger
//!
//! This module provides unified configuration management with automatic
//! first-run initialization, multi-source loading, and zero-config defaults.

use std::collections::BTreeMap;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::app::{JsonFileStore, Money, RoomCatalog, RoomSpec, RoomType};
use crate::constants::{display, env, files, rooms};
use crate::errors::{AppError, ConfigError, ConfigResult, Result};

/// Unified application configuration for TOML serialization
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Hotel presentation settings
    pub hotel: HotelConfig,
    /// Room inventory and rates, keyed by room type name
    pub rooms: BTreeMap<String, RoomConfigToml>,
    /// Reservation data file settings
    pub storage: StorageConfig,
    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Hotel presentation settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HotelConfig {
    /// Name shown in the banner
    pub name: String,
    /// Prefix shown before amounts
    pub currency_symbol: String,
}

impl Default for HotelConfig {
    fn default() -> Self {
        Self {
            name: display::DEFAULT_HOTEL_NAME.to_string(),
            currency_symbol: display::DEFAULT_CURRENCY_SYMBOL.to_string(),
        }
    }
}

/// TOML-friendly room type entry
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RoomConfigToml {
    /// Rooms of this type in the building
    pub count: u32,
    /// Price per room per night as a decimal string ("180.00")
    pub nightly_rate: String,
}

/// Reservation data file settings
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct StorageConfig {
    /// Data file path (None = user data directory)
    pub data_file: Option<PathBuf>,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default log level for the application
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
        }
    }
}

/// Catalog defaults in configuration form
fn default_rooms() -> BTreeMap<String, RoomConfigToml> {
    [
        (RoomType::Standard, rooms::STANDARD_COUNT, rooms::STANDARD_RATE_CENTS),
        (RoomType::Premium, rooms::PREMIUM_COUNT, rooms::PREMIUM_RATE_CENTS),
        (RoomType::Luxury, rooms::LUXURY_COUNT, rooms::LUXURY_RATE_CENTS),
    ]
    .into_iter()
    .map(|(room_type, count, cents)| {
        (
            room_type.as_str().to_string(),
            RoomConfigToml {
                count,
                nightly_rate: Money::from_cents(cents).to_string(),
            },
        )
    })
    .collect()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            hotel: HotelConfig::default(),
            rooms: default_rooms(),
            storage: StorageConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration with multi-source precedence:
    /// 1. Default values
    /// 2. Config file (explicit path, or the first one found)
    ///
    /// Environment and CLI overrides for the data file are applied by
    /// [`AppConfig::data_file`].
    pub async fn load(config_file_override: Option<PathBuf>) -> Result<Self> {
        let config_path = match config_file_override {
            Some(path) => {
                if !path.exists() {
                    return Err(ConfigError::NotFound { path }.into());
                }
                Some(path)
            }
            None => Self::find_config_file(),
        };

        match config_path {
            Some(path) => {
                debug!("Loading config from: {}", path.display());
                Self::load_from_file(&path).await
            }
            None => {
                debug!("No config file found, using built-in defaults");
                Ok(Self::default())
            }
        }
    }

    /// Initialize configuration on first run
    ///
    /// Creates a default config file if none exists and notifies the user,
    /// unless `quiet` is set
    pub async fn initialize_first_run(quiet: bool) -> Result<Option<PathBuf>> {
        let Some(config_path) = Self::get_default_config_path() else {
            debug!("No user config directory, skipping first-run setup");
            return Ok(None);
        };

        let path = if quiet {
            Self::initialize_at(config_path, &mut io::sink()).await?
        } else {
            Self::initialize_at(config_path, &mut io::stdout()).await?
        };
        Ok(Some(path))
    }

    /// Write the default config file at `config_path` unless one is already there
    async fn initialize_at(config_path: PathBuf, notice: &mut impl Write) -> Result<PathBuf> {
        if config_path.exists() {
            return Ok(config_path);
        }

        info!("Creating default configuration file...");

        if let Some(parent) = config_path.parent() {
            tokio::fs::create_dir_all(parent).await.map_err(|e| {
                AppError::generic(format!(
                    "Failed to create config directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }

        tokio::fs::write(&config_path, Self::generate_default_config_content())
            .await
            .map_err(|e| {
                AppError::generic(format!(
                    "Failed to write config file {}: {}",
                    config_path.display(),
                    e
                ))
            })?;

        writeln!(notice, "📁 Created default configuration file:")?;
        writeln!(notice, "   {}", config_path.display())?;
        writeln!(notice, "   You can customize rooms and rates by editing this file.")?;
        writeln!(notice)?;

        Ok(config_path)
    }

    /// Find configuration file in standard locations
    fn find_config_file() -> Option<PathBuf> {
        let search_paths = [
            Some(PathBuf::from(format!("./{}", files::LOCAL_CONFIG_FILE_NAME))),
            Self::get_default_config_path(),
        ];

        let found = search_paths.into_iter().flatten().find(|path| path.exists());
        match &found {
            Some(path) => debug!("Found config file: {}", path.display()),
            None => debug!("No config file found in standard locations"),
        }
        found
    }

    /// Get the default config file path for the current user
    fn get_default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(files::APP_DIR).join(files::CONFIG_FILE_NAME))
    }

    /// Load configuration from a TOML file
    async fn load_from_file(path: &Path) -> Result<Self> {
        let content = tokio::fs::read_to_string(path).await.map_err(|e| {
            AppError::generic(format!(
                "Failed to read config file {}: {}",
                path.display(),
                e
            ))
        })?;

        let mut config: AppConfig = toml::from_str(&content).map_err(ConfigError::from)?;
        if config.rooms.is_empty() {
            config.rooms = default_rooms();
        }

        info!("Loaded configuration from: {}", path.display());
        Ok(config)
    }

    /// Build the room catalog, checking every type is configured sensibly
    pub fn to_catalog(&self) -> ConfigResult<RoomCatalog> {
        for name in self.rooms.keys() {
            if name.parse::<RoomType>().is_err() {
                return Err(ConfigError::InvalidValue {
                    field: format!("rooms.{}", name),
                    value: name.clone(),
                    reason: format!("Room type must be one of: {}", RoomType::names()),
                });
            }
        }

        let mut entries = Vec::with_capacity(RoomType::ALL.len());
        for room_type in RoomType::ALL {
            let field = format!("rooms.{}", room_type);
            let entry = self
                .rooms
                .iter()
                .find(|(name, _)| name.parse::<RoomType>().ok() == Some(room_type))
                .map(|(_, entry)| entry)
                .ok_or_else(|| ConfigError::MissingField {
                    field: field.clone(),
                })?;

            if entry.count == 0 {
                return Err(ConfigError::InvalidValue {
                    field: format!("{}.count", field),
                    value: entry.count.to_string(),
                    reason: "Room count must be positive".to_string(),
                });
            }

            let nightly_rate = entry
                .nightly_rate
                .parse::<Money>()
                .ok()
                .filter(|rate| rate.is_positive())
                .ok_or_else(|| ConfigError::InvalidValue {
                    field: format!("{}.nightly_rate", field),
                    value: entry.nightly_rate.clone(),
                    reason: "Rate must be a positive amount with at most two decimals"
                        .to_string(),
                })?;

            entries.push((
                room_type,
                RoomSpec {
                    count: entry.count,
                    nightly_rate,
                },
            ));
        }

        Ok(RoomCatalog::new(entries))
    }

    /// Reservation data file: CLI flag, then environment, then config, then default
    pub fn data_file(&self, cli_override: Option<PathBuf>) -> PathBuf {
        let from_env = std::env::var_os(env::DATA_FILE)
            .filter(|value| !value.is_empty())
            .map(PathBuf::from);
        self.resolve_data_file(cli_override, from_env)
    }

    fn resolve_data_file(&self, cli_override: Option<PathBuf>, from_env: Option<PathBuf>) -> PathBuf {
        cli_override
            .or(from_env)
            .or_else(|| self.storage.data_file.clone())
            .unwrap_or_else(JsonFileStore::default_path)
    }

    /// Generate default configuration content with helpful comments
    fn generate_default_config_content() -> String {
        format!(
            r#"# Hotel Ledger Configuration
# This file was automatically generated on first run.
# You can customize any of these settings to suit your needs.

[hotel]
name = "{}"
currency_symbol = "{}"

# Rooms in the building and price per room per night
[rooms.standard]
count = {}
nightly_rate = "{}"

[rooms.premium]
count = {}
nightly_rate = "{}"

[rooms.luxury]
count = {}
nightly_rate = "{}"

[storage]
# Reservation data file (default: {})
# data_file = "/path/to/reservations.json"

[logging]
level = "warn"  # error, warn, info, debug, trace
"#,
            display::DEFAULT_HOTEL_NAME,
            display::DEFAULT_CURRENCY_SYMBOL,
            rooms::STANDARD_COUNT,
            Money::from_cents(rooms::STANDARD_RATE_CENTS),
            rooms::PREMIUM_COUNT,
            Money::from_cents(rooms::PREMIUM_RATE_CENTS),
            rooms::LUXURY_COUNT,
            Money::from_cents(rooms::LUXURY_RATE_CENTS),
            JsonFileStore::default_path().display()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config_builds_default_catalog() {
        let config = AppConfig::default();

        assert_eq!(config.logging.level, "warn");
        assert_eq!(config.hotel.currency_symbol, "R$");
        assert_eq!(config.to_catalog().unwrap(), RoomCatalog::default());
    }

    #[test]
    fn test_config_file_generation() {
        let content = AppConfig::generate_default_config_content();

        // Should be valid TOML
        let parsed: AppConfig = toml::from_str(&content).unwrap();

        assert_eq!(parsed.to_catalog().unwrap(), RoomCatalog::default());
        assert_eq!(parsed.hotel.name, display::DEFAULT_HOTEL_NAME);
        assert!(parsed.storage.data_file.is_none());
        assert!(content.contains("# Hotel Ledger Configuration"));
        assert!(content.contains("[rooms.premium]"));
    }

    #[tokio::test]
    async fn test_first_run_writes_default_file_once() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("hotel-ledger").join("config.toml");

        let mut notice = Vec::new();
        let created = AppConfig::initialize_at(config_path.clone(), &mut notice)
            .await
            .unwrap();
        assert_eq!(created, config_path);
        let notice = String::from_utf8(notice).unwrap();
        assert!(notice.contains("Created default configuration file"));
        assert!(notice.contains(&config_path.display().to_string()));

        let loaded = AppConfig::load(Some(config_path.clone())).await.unwrap();
        assert_eq!(loaded.to_catalog().unwrap(), RoomCatalog::default());

        // An existing file is left alone and nothing is announced
        tokio::fs::write(&config_path, "[hotel]\nname = \"Pousada\"\n")
            .await
            .unwrap();
        let mut notice = Vec::new();
        AppConfig::initialize_at(config_path.clone(), &mut notice)
            .await
            .unwrap();
        assert!(notice.is_empty());
        let content = tokio::fs::read_to_string(&config_path).await.unwrap();
        assert!(content.contains("Pousada"));
    }

    #[tokio::test]
    async fn test_config_loading_nonexistent_file() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("nonexistent.toml");

        // Should fail when explicitly specified
        let result = AppConfig::load(Some(config_path)).await;
        assert!(matches!(
            result,
            Err(AppError::Config(ConfigError::NotFound { .. }))
        ));
    }

    #[tokio::test]
    async fn test_config_loading_from_file() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("test_config.toml");

        let test_config = r#"
[hotel]
name = "Pousada Azul"

[rooms.standard]
count = 20
nightly_rate = "89.90"

[rooms.premium]
count = 4
nightly_rate = "150"

[rooms.luxury]
count = 1
nightly_rate = "420.00"

[storage]
data_file = "/var/lib/pousada/reservations.json"

[logging]
level = "debug"
"#;
        tokio::fs::write(&config_path, test_config).await.unwrap();

        let config = AppConfig::load(Some(config_path)).await.unwrap();
        let catalog = config.to_catalog().unwrap();

        assert_eq!(config.hotel.name, "Pousada Azul");
        // Unspecified values fall back to defaults
        assert_eq!(config.hotel.currency_symbol, "R$");
        assert_eq!(config.logging.level, "debug");
        assert_eq!(catalog.capacity(RoomType::Standard).unwrap(), 20);
        assert_eq!(
            catalog.rate(RoomType::Standard).unwrap(),
            Money::from_cents(8990)
        );
        assert_eq!(
            catalog.rate(RoomType::Premium).unwrap(),
            Money::from_cents(15000)
        );
        assert_eq!(
            config.resolve_data_file(None, None),
            PathBuf::from("/var/lib/pousada/reservations.json")
        );
    }

    #[tokio::test]
    async fn test_config_without_rooms_uses_default_catalog() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("minimal.toml");
        tokio::fs::write(&config_path, "[logging]\nlevel = \"info\"\n")
            .await
            .unwrap();

        let config = AppConfig::load(Some(config_path)).await.unwrap();
        assert_eq!(config.to_catalog().unwrap(), RoomCatalog::default());
    }

    #[tokio::test]
    async fn test_malformed_config_is_invalid_format() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("broken.toml");
        tokio::fs::write(&config_path, "[rooms.standard\ncount = ")
            .await
            .unwrap();

        let result = AppConfig::load(Some(config_path)).await;
        assert!(matches!(
            result,
            Err(AppError::Config(ConfigError::InvalidFormat(_)))
        ));
    }

    #[test]
    fn test_catalog_validation() {
        let mut missing = AppConfig::default();
        missing.rooms.remove("luxury");
        assert!(matches!(
            missing.to_catalog(),
            Err(ConfigError::MissingField { .. })
        ));

        let mut unknown = AppConfig::default();
        unknown.rooms.insert(
            "penthouse".to_string(),
            RoomConfigToml {
                count: 1,
                nightly_rate: "999.00".to_string(),
            },
        );
        assert!(matches!(
            unknown.to_catalog(),
            Err(ConfigError::InvalidValue { .. })
        ));

        for (count, rate) in [(0, "100.00"), (3, "0"), (3, "-10.00"), (3, "abc"), (3, "1.999")] {
            let mut bad = AppConfig::default();
            bad.rooms.insert(
                "standard".to_string(),
                RoomConfigToml {
                    count,
                    nightly_rate: rate.to_string(),
                },
            );
            assert!(
                matches!(bad.to_catalog(), Err(ConfigError::InvalidValue { .. })),
                "count {} rate {} should be rejected",
                count,
                rate
            );
        }
    }

    #[test]
    fn test_data_file_precedence() {
        let mut config = AppConfig::default();
        config.storage.data_file = Some(PathBuf::from("from-config.json"));

        let cli = Some(PathBuf::from("from-cli.json"));
        let env = Some(PathBuf::from("from-env.json"));

        assert_eq!(
            config.resolve_data_file(cli.clone(), env.clone()),
            PathBuf::from("from-cli.json")
        );
        assert_eq!(
            config.resolve_data_file(None, env),
            PathBuf::from("from-env.json")
        );
        assert_eq!(
            config.resolve_data_file(None, None),
            PathBuf::from("from-config.json")
        );

        config.storage.data_file = None;
        assert_eq!(
            config.resolve_data_file(None, None),
            JsonFileStore::default_path()
        );
    }
}

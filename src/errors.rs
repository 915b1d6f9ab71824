//! Error types for Hotel Ledger
//!
//! This module defines the error types for every layer of the application.
//! Reservation errors are all recoverable by the caller: the interactive loop
//! reports them and carries on, and the in-memory reservation set is always
//! rolled back to the last persisted state before one is returned.

use std::fmt;
use std::path::PathBuf;

use chrono::NaiveDate;
use thiserror::Error;

use crate::app::models::{ReservationId, RoomType};

/// A single reason why a booking request was rejected before any
/// availability check took place
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidReason {
    /// Guest name is empty after trimming
    EmptyGuestName,
    /// Check-out is not strictly after check-in
    NonPositiveStay,
    /// Room type is not one of the catalog's types
    UnknownRoomType,
    /// Zero or negative number of rooms requested
    NonPositiveRoomCount,
}

impl fmt::Display for InvalidReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            InvalidReason::EmptyGuestName => "guest name must not be empty",
            InvalidReason::NonPositiveStay => "check-out must be after check-in",
            InvalidReason::UnknownRoomType => "room type is not offered by this hotel",
            InvalidReason::NonPositiveRoomCount => "at least one room must be requested",
        };
        f.write_str(text)
    }
}

/// Reservation workflow errors
#[derive(Error, Debug)]
pub enum ReservationError {
    /// Request failed defensive validation
    #[error("Invalid reservation request: {}", join_reasons(.reasons))]
    InvalidRequest { reasons: Vec<InvalidReason> },

    /// Not enough rooms of the requested type for the period
    #[error(
        "Not enough {room_type} rooms for the requested period: {requested} requested, {available} available"
    )]
    CapacityExceeded {
        room_type: RoomType,
        requested: u32,
        available: i64,
    },

    /// The updated reservation set could not be persisted
    #[error("Failed to persist reservations")]
    Persistence(#[from] StorageError),

    /// No active reservation carries this id
    #[error("Reservation {id} not found")]
    NotFound { id: ReservationId },

    /// The stay has already ended and can no longer be cancelled
    #[error("Reservation {id} ended on {check_out} and can no longer be cancelled")]
    AlreadyCompleted {
        id: ReservationId,
        check_out: NaiveDate,
    },

    /// Room type outside the closed set
    #[error("Unknown room type: {value}")]
    UnknownRoomType { value: String },

    /// A price or revenue total does not fit in the money type
    #[error("Amount too large: the price exceeds what the ledger can record")]
    AmountOverflow,

    /// Statistics requested on an empty reservation set
    #[error("There are no reservations yet")]
    Empty,
}

impl ReservationError {
    /// Build an `InvalidRequest` error from a single reason
    pub fn invalid(reason: InvalidReason) -> Self {
        Self::InvalidRequest {
            reasons: vec![reason],
        }
    }

    /// Reasons carried by an `InvalidRequest`, empty for other variants
    pub fn reasons(&self) -> &[InvalidReason] {
        match self {
            ReservationError::InvalidRequest { reasons } => reasons,
            _ => &[],
        }
    }
}

fn join_reasons(reasons: &[InvalidReason]) -> String {
    reasons
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Persistence errors for the reservation data file
#[derive(Error, Debug)]
pub enum StorageError {
    /// I/O error reading or writing the data file
    #[error("I/O error on reservation file {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Data file exists but cannot be understood
    #[error("Reservation file {path} is corrupt: {reason}")]
    Corrupt { path: PathBuf, reason: String },

    /// Reservation set could not be encoded
    #[error("Failed to encode reservations")]
    Serialize(#[from] serde_json::Error),

    /// Atomic file operation failed
    #[error("Atomic file operation failed: could not rename {temp_path} to {final_path}")]
    AtomicWriteFailed {
        temp_path: PathBuf,
        final_path: PathBuf,
    },

}

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Configuration file not found
    #[error("Configuration file not found: {path}")]
    NotFound { path: PathBuf },

    /// Invalid configuration format
    #[error("Invalid configuration format")]
    InvalidFormat(#[from] toml::de::Error),

    /// Missing required configuration field
    #[error("Missing required configuration field: {field}")]
    MissingField { field: String },

    /// Invalid configuration value
    #[error("Invalid configuration value for {field}: {value}. {reason}")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },
}

/// Top-level application error that can represent any error type
#[derive(Error, Debug)]
pub enum AppError {
    /// Reservation workflow error
    #[error(transparent)]
    Reservation(#[from] ReservationError),

    /// Storage error outside a booking workflow (initial load)
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// Configuration error
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Generic I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Generic application error with context
    #[error("Application error: {message}")]
    Generic { message: String },
}

impl AppError {
    /// Create a generic application error with a message
    pub fn generic(message: impl Into<String>) -> Self {
        Self::Generic {
            message: message.into(),
        }
    }

    /// Check if the interactive loop can carry on after this error
    pub fn is_recoverable(&self) -> bool {
        match self {
            AppError::Reservation(_) => true,
            AppError::Storage(_)
            | AppError::Config(_)
            | AppError::Io(_)
            | AppError::Generic { .. } => false,
        }
    }

    /// Get error category for logging
    pub fn category(&self) -> &'static str {
        match self {
            AppError::Reservation(ReservationError::Persistence(_)) => "storage",
            AppError::Reservation(_) => "reservation",
            AppError::Storage(_) => "storage",
            AppError::Config(_) => "config",
            AppError::Io(_) => "io",
            AppError::Generic { .. } => "generic",
        }
    }
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, AppError>;

/// Reservation result type alias
pub type ReservationResult<T> = std::result::Result<T, ReservationError>;

/// Storage result type alias
pub type StorageResult<T> = std::result::Result<T, StorageError>;

/// Configuration result type alias
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

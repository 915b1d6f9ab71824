//! Reservation persistence
//!
//! The ledger always persists the complete reservation set; there are no
//! incremental writes. The file store writes the new snapshot to a temporary
//! file next to the data file and renames it into place, so a failed save
//! leaves the previous snapshot untouched.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tokio::fs;
use tracing::{debug, error, info};

use crate::app::models::{Reservation, ReservationId};
use crate::app::repository::ReservationSet;
use crate::constants::files;
use crate::errors::{StorageError, StorageResult};

/// Load/save contract the ledger needs from its persistence layer
///
/// `load_all` returns an empty set when nothing has been persisted yet and
/// fails only for unreadable or corrupt data. `save_all` replaces the stored
/// state as a whole; when it fails the previously stored state must still be
/// intact.
#[allow(async_fn_in_trait)]
pub trait ReservationStore {
    /// Read every persisted reservation
    async fn load_all(&self) -> StorageResult<ReservationSet>;

    /// Replace the persisted state with `reservations`
    async fn save_all(&self, reservations: &ReservationSet) -> StorageResult<()>;
}

/// On-disk layout, borrowed for writing
#[derive(Serialize)]
struct SnapshotRef<'a> {
    version: u32,
    last_issued_id: Option<ReservationId>,
    reservations: &'a [Reservation],
}

/// On-disk layout, owned for reading
#[derive(Deserialize)]
struct Snapshot {
    version: u32,
    #[serde(default)]
    last_issued_id: Option<ReservationId>,
    reservations: Vec<Reservation>,
}

/// JSON file store with atomic replace
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Store backed by the given data file
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Data file location
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Default data file under the user's data directory
    pub fn default_path() -> PathBuf {
        dirs::data_dir()
            .map(|dir| dir.join(files::APP_DIR))
            .unwrap_or_else(|| PathBuf::from("./data"))
            .join(files::DATA_FILE_NAME)
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| files::DATA_FILE_NAME.into());
        name.push(files::TEMP_FILE_SUFFIX);
        self.path.with_file_name(name)
    }

    fn io_error(&self, source: std::io::Error) -> StorageError {
        StorageError::Io {
            path: self.path.clone(),
            source,
        }
    }

    fn corrupt(&self, reason: impl Into<String>) -> StorageError {
        StorageError::Corrupt {
            path: self.path.clone(),
            reason: reason.into(),
        }
    }

    /// Decode and sanity check a snapshot
    fn decode(&self, bytes: &[u8]) -> StorageResult<ReservationSet> {
        let snapshot: Snapshot =
            serde_json::from_slice(bytes).map_err(|e| self.corrupt(e.to_string()))?;

        if snapshot.version != files::DATA_FORMAT_VERSION {
            return Err(self.corrupt(format!(
                "unsupported format version {} (expected {})",
                snapshot.version,
                files::DATA_FORMAT_VERSION
            )));
        }

        // The largest id would leave no successor to issue
        let exhausted = ReservationId::new(u64::MAX);
        if snapshot.last_issued_id == Some(exhausted) {
            return Err(self.corrupt(format!("last issued id {} is out of range", exhausted)));
        }

        let mut seen = std::collections::HashSet::new();
        for reservation in &snapshot.reservations {
            if !seen.insert(reservation.id) {
                return Err(self.corrupt(format!("duplicate reservation id {}", reservation.id)));
            }
            if reservation.id == exhausted {
                return Err(self.corrupt(format!("reservation id {} is out of range", exhausted)));
            }
            if reservation.check_out <= reservation.check_in || reservation.room_count == 0 {
                return Err(self.corrupt(format!(
                    "reservation {} has an empty stay or no rooms",
                    reservation.id
                )));
            }
            if reservation.total_price.cents() < 0 {
                return Err(self.corrupt(format!(
                    "reservation {} has a negative price",
                    reservation.id
                )));
            }
        }

        Ok(ReservationSet::from_parts(
            snapshot.reservations,
            snapshot.last_issued_id,
        ))
    }
}

impl ReservationStore for JsonFileStore {
    async fn load_all(&self) -> StorageResult<ReservationSet> {
        let bytes = match fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                info!(
                    "No reservation file at {}, starting with an empty ledger",
                    self.path.display()
                );
                return Ok(ReservationSet::new());
            }
            Err(e) => return Err(self.io_error(e)),
        };

        let reservations = self.decode(&bytes)?;
        debug!(
            "Loaded {} reservations from {}",
            reservations.len(),
            self.path.display()
        );
        Ok(reservations)
    }

    async fn save_all(&self, reservations: &ReservationSet) -> StorageResult<()> {
        let snapshot = SnapshotRef {
            version: files::DATA_FORMAT_VERSION,
            last_issued_id: reservations.last_issued_id(),
            reservations: reservations.as_slice(),
        };
        let content = serde_json::to_vec_pretty(&snapshot)?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| self.io_error(e))?;
        }

        let temp_path = self.temp_path();
        fs::write(&temp_path, &content).await.map_err(|e| {
            error!("Failed to write temporary reservation file: {}", e);
            self.io_error(e)
        })?;

        if let Err(e) = fs::rename(&temp_path, &self.path).await {
            error!("Failed to rename temporary reservation file: {}", e);
            let _ = fs::remove_file(&temp_path).await;
            return Err(StorageError::AtomicWriteFailed {
                temp_path,
                final_path: self.path.clone(),
            });
        }

        debug!(
            "Saved {} reservations to {}",
            reservations.len(),
            self.path.display()
        );
        Ok(())
    }
}

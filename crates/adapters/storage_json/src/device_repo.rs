//! JSON file implementation of [`DeviceRepository`].

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use homegate_app::ports::DeviceRepository;
use homegate_domain::error::{CatalogError, GatewayError};
use homegate_domain::id::DeviceId;
use homegate_domain::record::DeviceRecord;

use crate::error::StorageError;

/// Name of the database document inside the data directory.
pub const DATABASE_FILE: &str = "db.json";

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
struct Database {
    devices: Vec<DeviceRecord>,
}

/// Device repository persisted as one JSON document.
///
/// The whole document is held in memory and rewritten on every mutation.
/// All access goes through one async lock, so there is a single writer.
#[derive(Debug)]
pub struct JsonFileDeviceRepository {
    path: PathBuf,
    db: Mutex<Database>,
}

impl JsonFileDeviceRepository {
    /// Open the database in `data_dir`, creating it when missing.
    ///
    /// An unreadable or corrupt document is replaced by an empty one.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the directory cannot be created or the
    /// fresh document cannot be written.
    pub async fn open(data_dir: impl AsRef<Path>) -> Result<Self, StorageError> {
        let data_dir = data_dir.as_ref();
        tokio::fs::create_dir_all(data_dir)
            .await
            .map_err(|source| StorageError::Io {
                path: data_dir.to_path_buf(),
                source,
            })?;
        let path = data_dir.join(DATABASE_FILE);

        let db = match tokio::fs::read_to_string(&path).await {
            Ok(content) => match serde_json::from_str::<Database>(&content) {
                Ok(db) => {
                    tracing::debug!(path = %path.display(), devices = db.devices.len(), "database loaded");
                    return Ok(Self {
                        path,
                        db: Mutex::new(db),
                    });
                }
                Err(err) => {
                    tracing::warn!(path = %path.display(), error = %err, "corrupt database, reinitialising");
                    Database::default()
                }
            },
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!(path = %path.display(), "creating database");
                Database::default()
            }
            Err(err) => {
                tracing::warn!(path = %path.display(), error = %err, "unreadable database, reinitialising");
                Database::default()
            }
        };
        write(&path, &db).await?;
        Ok(Self {
            path,
            db: Mutex::new(db),
        })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Replace the document on disk through a sibling temporary file.
async fn write(path: &Path, db: &Database) -> Result<(), StorageError> {
    let content = serde_json::to_string_pretty(db)?;
    let staging = path.with_extension("json.tmp");
    let io_error = |source| StorageError::Io {
        path: path.to_path_buf(),
        source,
    };
    tokio::fs::write(&staging, content).await.map_err(io_error)?;
    tokio::fs::rename(&staging, path).await.map_err(io_error)
}

impl DeviceRepository for JsonFileDeviceRepository {
    async fn add(&self, record: DeviceRecord) -> Result<DeviceRecord, GatewayError> {
        let mut db = self.db.lock().await;
        if db.devices.iter().any(|r| r.id() == record.id()) {
            return Err(CatalogError::DeviceAlreadyAdded {
                id: record.id().to_string(),
            }
            .into());
        }
        if db.devices.iter().any(|r| r.name == record.name) {
            return Err(CatalogError::DuplicateDeviceName {
                name: record.name,
            }
            .into());
        }
        let mut next = db.clone();
        next.devices.push(record.clone());
        write(&self.path, &next).await?;
        *db = next;
        Ok(record)
    }

    async fn get_by_id(&self, id: DeviceId) -> Result<Option<DeviceRecord>, GatewayError> {
        let db = self.db.lock().await;
        Ok(db.devices.iter().find(|r| r.id() == id).cloned())
    }

    async fn get_by_name(&self, name: &str) -> Result<Option<DeviceRecord>, GatewayError> {
        let db = self.db.lock().await;
        Ok(db.devices.iter().find(|r| r.name == name).cloned())
    }

    async fn get_all(&self) -> Result<Vec<DeviceRecord>, GatewayError> {
        Ok(self.db.lock().await.devices.clone())
    }

    async fn remove(&self, id: DeviceId) -> Result<Option<DeviceRecord>, GatewayError> {
        let mut db = self.db.lock().await;
        let Some(index) = db.devices.iter().position(|r| r.id() == id) else {
            return Ok(None);
        };
        let mut next = db.clone();
        let removed = next.devices.remove(index);
        write(&self.path, &next).await?;
        *db = next;
        Ok(Some(removed))
    }
}

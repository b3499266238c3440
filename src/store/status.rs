//! File-backed status store
//!
//! Holds exactly one `StatusRecord` as a JSON file. Writes go to a temp file in
//! the same directory and are renamed over the target, so readers only ever see
//! a complete record.

use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::Mutex;
use tokio::fs;
use validator::Validate;

use crate::models::StatusRecord;
use super::StoreError;

pub struct StatusStore {
    path: PathBuf,
    // Held by the blocking writer itself, so a cancelled request can't release it early
    write_lock: Arc<Mutex<()>>,
}

impl StatusStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    /// Replace the persisted record
    ///
    /// The temp-write-fsync-rename sequence runs on the blocking pool and always
    /// completes, even if the calling future is dropped.
    pub async fn write(&self, record: &StatusRecord) -> Result<(), StoreError> {
        let json = serde_json::to_vec(record)?;
        let path = self.path.clone();
        let lock = Arc::clone(&self.write_lock);

        tokio::task::spawn_blocking(move || {
            let _guard = lock.lock();
            persist(&path, &json)
        })
        .await
        .map_err(|e| StoreError::Io(std::io::Error::new(ErrorKind::Other, e.to_string())))??;

        tracing::debug!(
            room = %record.room,
            people_count = record.people_count,
            door_state = record.door_state,
            "status record written"
        );
        Ok(())
    }

    /// Read the latest record
    pub async fn read(&self) -> Result<StatusRecord, StoreError> {
        let data = match fs::read(&self.path).await {
            Ok(data) => data,
            Err(e) if e.kind() == ErrorKind::NotFound => return Err(StoreError::NotFound),
            Err(e) => return Err(e.into()),
        };

        let record: StatusRecord = serde_json::from_slice(&data)
            .map_err(|e| StoreError::Corrupt(e.to_string()))?;

        record.validate()
            .map_err(|e| StoreError::Corrupt(e.to_string()))?;

        Ok(record)
    }
}

/// Write `data` to a temp file next to `path`, fsync it and rename it into place.
/// The temp file is removed on any failure.
fn persist(path: &Path, data: &[u8]) -> Result<(), StoreError> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(dir)?;

    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "status".to_string());

    let mut tmp = tempfile::Builder::new()
        .prefix(&format!(".{}.", name))
        .suffix(".tmp")
        .tempfile_in(dir)?;
    tmp.write_all(data)?;
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|e| StoreError::Io(e.error))?;
    Ok(())
}

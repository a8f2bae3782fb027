use std::collections::HashMap;
use std::ffi::OsString;
use std::fmt;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, LazyLock, Mutex};

use serde::Serialize;

use crate::model::Query;

#[derive(Debug)]
pub enum StorageError {
    Io(std::io::Error),
    Json(serde_json::Error),
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::Io(e) => write!(f, "I/O error: {e}"),
            StorageError::Json(e) => write!(f, "JSON error: {e}"),
        }
    }
}

impl std::error::Error for StorageError {}

impl From<std::io::Error> for StorageError {
    fn from(e: std::io::Error) -> Self {
        StorageError::Io(e)
    }
}

impl From<serde_json::Error> for StorageError {
    fn from(e: serde_json::Error) -> Self {
        StorageError::Json(e)
    }
}

static FILE_LOCKS: LazyLock<Mutex<HashMap<PathBuf, Arc<Mutex<()>>>>> =
    LazyLock::new(|| Mutex::new(HashMap::new()));

/// Replace `path` with `data` without ever leaving a half-written file.
///
/// Writes go to a `.tmp` sibling which is synced and renamed over the target.
/// The previous contents are kept as `.bak`. Writers to the same path are
/// serialized by a per-path lock.
pub fn atomic_write(path: &Path, data: &[u8]) -> Result<(), StorageError> {
    let lock = {
        let mut locks = FILE_LOCKS
            .lock()
            .map_err(|e| StorageError::Io(std::io::Error::other(e.to_string())))?;
        locks
            .entry(path.to_path_buf())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    };
    let _guard = lock
        .lock()
        .map_err(|e| StorageError::Io(std::io::Error::other(e.to_string())))?;

    let file_name = path.file_name().unwrap_or_default();
    let sibling = |suffix: &str| {
        let mut name = OsString::from(file_name);
        name.push(suffix);
        path.with_file_name(name)
    };
    let tmp_path = sibling(".tmp");
    let bak_path = sibling(".bak");

    let mut file = fs::File::create(&tmp_path)?;
    file.write_all(data)?;
    file.sync_all()?;
    drop(file);

    if path.exists() {
        let _ = fs::rename(path, &bak_path);
    }
    fs::rename(&tmp_path, path)?;
    Ok(())
}

pub(crate) fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<(), StorageError> {
    let json = serde_json::to_string_pretty(value)?;
    atomic_write(path, json.as_bytes())
}

pub(crate) fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, StorageError> {
    let data = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&data)?)
}

/// Parse a query document. Absent fields take their defaults.
pub fn parse_query(json: &str) -> Result<Query, StorageError> {
    Ok(serde_json::from_str(json)?)
}

pub fn load_query(path: &Path) -> Result<Query, StorageError> {
    let query: Query = read_json(path)?;
    tracing::debug!(path = %path.display(), ref_id = %query.ref_id, "loaded query");
    Ok(query)
}

pub fn save_query(path: &Path, query: &Query) -> Result<(), StorageError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    write_json(path, query)?;
    tracing::debug!(path = %path.display(), ref_id = %query.ref_id, "saved query");
    Ok(())
}

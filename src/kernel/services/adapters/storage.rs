//! Durable local state: one namespaced JSON blob holding the whole project
//! store, read at startup and overwritten after every mutating operation.

use std::io;
use std::path::{Path, PathBuf};

use crate::kernel::services::ports::{StorageError, StoreBlob};

const STORE_DIR: &str = "pindeck";
const STORE_FILE: &str = "projects.json";

pub fn store_path() -> Option<PathBuf> {
    cache_dir().map(|dir| dir.join(STORE_DIR).join(STORE_FILE))
}

pub fn ensure_log_dir() -> io::Result<PathBuf> {
    let dir = cache_dir()
        .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "cannot determine cache directory"))?
        .join(STORE_DIR)
        .join("logs");
    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}

pub fn load_blob() -> Option<StoreBlob> {
    load_blob_from(&store_path()?)
}

pub fn load_blob_from(path: &Path) -> Option<StoreBlob> {
    let data = std::fs::read_to_string(path).ok()?;
    match serde_json::from_str(&data) {
        Ok(blob) => Some(blob),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "store blob unreadable; starting empty");
            None
        }
    }
}

pub fn save_blob(blob: &StoreBlob) -> Result<(), StorageError> {
    let path = store_path().ok_or(StorageError::NoStorageDir)?;
    save_blob_to(&path, blob)
}

/// Write-then-rename so a crash mid-write never truncates the existing blob.
pub fn save_blob_to(path: &Path, blob: &StoreBlob) -> Result<(), StorageError> {
    if let Some(parent) = path.parent() {
        if !parent.exists() {
            std::fs::create_dir_all(parent)?;
        }
    }
    let json = serde_json::to_string_pretty(blob)?;
    let tmp = path.with_extension("json.tmp");
    std::fs::write(&tmp, json)?;
    std::fs::rename(&tmp, path)?;
    Ok(())
}

fn cache_dir() -> Option<PathBuf> {
    #[cfg(target_os = "macos")]
    {
        return std::env::var("HOME")
            .ok()
            .map(|home| PathBuf::from(home).join("Library/Caches"));
    }

    #[cfg(target_os = "linux")]
    {
        if let Ok(xdg) = std::env::var("XDG_CACHE_HOME") {
            return Some(PathBuf::from(xdg));
        }
        return std::env::var("HOME")
            .ok()
            .map(|home| PathBuf::from(home).join(".cache"));
    }

    #[cfg(target_os = "windows")]
    {
        if let Ok(local) = std::env::var("LOCALAPPDATA") {
            return Some(PathBuf::from(local));
        }
        return std::env::var("APPDATA").ok().map(PathBuf::from);
    }

    #[cfg(not(any(target_os = "macos", target_os = "linux", target_os = "windows")))]
    {
        None
    }
}

#[cfg(test)]
#[path = "../../../../tests/unit/kernel/services/adapters/storage.rs"]
mod tests;

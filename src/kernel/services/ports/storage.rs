use serde::{Deserialize, Serialize};
use std::io;
use thiserror::Error;

use crate::kernel::project::{Project, ProjectStore};

/// The single durable blob: everything the store holds, current project
/// included, so in-flight edits survive a restart. Overwritten after every
/// mutating store operation, read once at startup.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreBlob {
    pub current_project: Option<Project>,
    #[serde(default)]
    pub saved_projects: Vec<Project>,
}

impl StoreBlob {
    pub fn snapshot(store: &ProjectStore) -> Self {
        Self {
            current_project: store.current().cloned(),
            saved_projects: store.saved().to_vec(),
        }
    }
}

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("cannot determine storage directory")]
    NoStorageDir,

    #[error("storage I/O failed: {0}")]
    Io(#[from] io::Error),

    #[error("storage blob is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

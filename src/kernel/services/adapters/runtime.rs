//! Async runtime adapter: keeps durable-store writes off the interactive
//! thread. Mutations arrive as whole-store snapshots; a burst collapses to
//! the newest one before writing.

use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

use super::storage;
use crate::kernel::services::bus::KernelBusSender;
use crate::kernel::services::ports::{StorageError, StoreBlob};
use crate::kernel::Action;

pub struct AsyncRuntime {
    runtime: tokio::runtime::Runtime,
    persist_tx: UnboundedSender<StoreBlob>,
}

impl AsyncRuntime {
    pub fn new(bus: KernelBusSender) -> Self {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .enable_all()
            .build()
            .expect("Failed to create tokio runtime");

        let (persist_tx, persist_rx) = mpsc::unbounded_channel();
        runtime.spawn(persist_worker(persist_rx, bus));

        Self {
            runtime,
            persist_tx,
        }
    }

    pub fn tokio_handle(&self) -> tokio::runtime::Handle {
        self.runtime.handle().clone()
    }

    pub fn persist(&self, blob: StoreBlob) {
        if self.persist_tx.send(blob).is_err() {
            tracing::warn!("persist worker unavailable");
        }
    }
}

async fn persist_worker(mut rx: UnboundedReceiver<StoreBlob>, bus: KernelBusSender) {
    while let Some(mut blob) = rx.recv().await {
        // Latest snapshot wins; intermediate states are not worth a write.
        while let Ok(newer) = rx.try_recv() {
            blob = newer;
        }
        if let Err(e) = write_blob(&blob).await {
            tracing::error!(error = %e, "persist store failed");
            let _ = bus.send_action(Action::PersistFailed {
                message: e.to_string(),
            });
        }
    }
}

async fn write_blob(blob: &StoreBlob) -> Result<(), StorageError> {
    let path = storage::store_path().ok_or(StorageError::NoStorageDir)?;
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent).await?;
    }
    let json = serde_json::to_string_pretty(blob)?;
    let tmp = path.with_extension("json.tmp");
    tokio::fs::write(&tmp, json).await?;
    tokio::fs::rename(&tmp, &path).await?;
    Ok(())
}

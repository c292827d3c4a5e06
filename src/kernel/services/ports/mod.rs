//! Pure contracts/types shared between the kernel and the adapters.

pub mod serial;
pub mod storage;

pub use serial::{LinkState, SerialError, SerialEvent};
pub use storage::{StorageError, StoreBlob};

//! OS/runtime specific implementations (I/O, threads, async).

pub mod runtime;
pub mod serial;
pub mod storage;

pub use runtime::AsyncRuntime;
pub use serial::SerialLink;

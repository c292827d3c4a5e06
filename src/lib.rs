//! pindeck - terminal builder/runner for serial-controlled hardware dashboards.
//!
//! Module structure:
//! - kernel: headless application core (state/action/effect/store) plus the
//!   services layer (ports + adapters) for serial and durable storage
//! - app: terminal UI (workbench, rendering, input routing)
//! - logging: tracing initialization

pub mod app;
pub mod kernel;
pub mod logging;

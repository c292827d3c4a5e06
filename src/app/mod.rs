//! Terminal UI layer.

pub mod theme;
pub mod widget_view;
pub mod workbench;

pub use workbench::Workbench;

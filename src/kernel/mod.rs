//! Headless application core (state/action/effect) and the services layer.

pub mod action;
pub mod effect;
pub mod project;
pub mod protocol;
pub mod services;
pub mod state;
pub mod store;
pub mod widget;

pub use action::Action;
pub use effect::Effect;
pub use project::{Project, ProjectStore};
pub use state::{AppState, BuilderFocus, PropertyField, Screen, MONITOR_CAP};
pub use store::{DispatchResult, Store};
pub use widget::{Position, SendStrategy, Widget, WidgetKind, WidgetPatch};

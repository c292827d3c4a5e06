use rustc_hash::FxHashMap;
use std::collections::VecDeque;
use uuid::Uuid;

use super::project::ProjectStore;
use super::services::ports::{LinkState, StoreBlob};
use super::widget::Position;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Home,
    Builder,
    Runner,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuilderFocus {
    Canvas,
    Properties,
}

/// Editable property fields shown in the builder's properties panel, in
/// display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropertyField {
    Label,
    Pin,
    Value,
    Min,
    Max,
    Color,
    SendStrategy,
}

impl PropertyField {
    pub const ALL: [PropertyField; 7] = [
        PropertyField::Label,
        PropertyField::Pin,
        PropertyField::Value,
        PropertyField::Min,
        PropertyField::Max,
        PropertyField::Color,
        PropertyField::SendStrategy,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::Label => "Label",
            Self::Pin => "Pin",
            Self::Value => "Value",
            Self::Min => "Min",
            Self::Max => "Max",
            Self::Color => "Color",
            Self::SendStrategy => "Send strategy",
        }
    }

    pub fn from_index(i: usize) -> Self {
        Self::ALL[i % Self::ALL.len()]
    }
}

#[derive(Debug, Clone, Default)]
pub struct HomeState {
    pub selected: usize,
}

impl HomeState {
    pub fn clamp_selection(&mut self, len: usize) {
        self.selected = self.selected.min(len.saturating_sub(1));
    }

    pub fn move_selection(&mut self, delta: isize, len: usize) -> bool {
        if len == 0 {
            return false;
        }
        let prev = self.selected.min(len - 1);
        let next = if delta < 0 {
            prev.saturating_sub((-delta) as usize)
        } else {
            (prev + delta as usize).min(len - 1)
        };
        let changed = next != self.selected;
        self.selected = next;
        changed
    }
}

/// An in-flight canvas drag: the widget keeps its stored position until the
/// gesture ends, and the renderer offsets it by the hover cell meanwhile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DragState {
    pub id: Uuid,
    /// Offset of the grab point inside the widget's hit rect.
    pub grab_dx: u16,
    pub grab_dy: u16,
    /// Cell currently hovered, canvas-relative.
    pub at: Position,
}

#[derive(Debug, Clone, Default)]
pub struct BuilderState {
    pub selected: Option<Uuid>,
    pub focus: Option<BuilderFocus>,
    pub prop_selected: usize,
    pub drag: Option<DragState>,
}

impl BuilderState {
    pub fn focus(&self) -> BuilderFocus {
        self.focus.unwrap_or(BuilderFocus::Canvas)
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Most recent inbound lines retained for the serial monitor.
pub const MONITOR_CAP: usize = 20;

#[derive(Debug, Default)]
pub struct RunnerState {
    pub link: LinkState,
    /// Interactive widget holding keyboard focus in run mode.
    pub focus: Option<Uuid>,
    /// Rolling inbound log, oldest first, at most [`MONITOR_CAP`] entries.
    pub monitor: VecDeque<String>,
    /// Last inbound line, last-value-wins.
    pub last_line: Option<String>,
    /// Live widget values for the session: slider positions while adjusting,
    /// LED states driven by inbound data. Never persisted.
    pub live: FxHashMap<Uuid, String>,
    /// Slider value awaiting transmission under the onRelease strategy.
    pub pending_send: Option<(Uuid, i64)>,
}

impl RunnerState {
    pub fn push_line(&mut self, line: String) {
        if self.monitor.len() == MONITOR_CAP {
            self.monitor.pop_front();
        }
        self.monitor.push_back(line.clone());
        self.last_line = Some(line);
    }

    pub fn reset_session(&mut self) {
        self.link = LinkState::Disconnected;
        self.focus = None;
        self.monitor.clear();
        self.last_line = None;
        self.live.clear();
        self.pending_send = None;
    }
}

#[derive(Debug, Clone)]
pub enum InputDialogKind {
    NewProject,
    RenameProject { id: Uuid },
    EditProperty { id: Uuid, field: PropertyField },
}

#[derive(Debug, Clone, Default)]
pub struct InputDialogState {
    pub visible: bool,
    pub title: String,
    pub value: String,
    pub cursor: usize,
    pub error: Option<String>,
    pub kind: Option<InputDialogKind>,
}

impl InputDialogState {
    pub fn open(&mut self, title: impl Into<String>, value: impl Into<String>, kind: InputDialogKind) {
        self.visible = true;
        self.title = title.into();
        self.value = value.into();
        self.cursor = self.value.chars().count();
        self.error = None;
        self.kind = Some(kind);
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[derive(Debug, Clone)]
pub enum PendingAction {
    DeleteProject { id: Uuid },
}

#[derive(Debug, Clone, Default)]
pub struct ConfirmDialogState {
    pub visible: bool,
    pub message: String,
    pub on_confirm: Option<PendingAction>,
}

impl ConfirmDialogState {
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[derive(Debug, Clone, Default)]
pub struct PortPickerState {
    pub visible: bool,
    pub ports: Vec<String>,
    pub selected: usize,
}

impl PortPickerState {
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[derive(Debug)]
pub struct AppState {
    pub screen: Screen,
    pub projects: ProjectStore,
    pub home: HomeState,
    pub builder: BuilderState,
    pub runner: RunnerState,
    pub input_dialog: InputDialogState,
    pub confirm_dialog: ConfirmDialogState,
    pub port_picker: PortPickerState,
    /// One-line status notice (capability errors, redirects, persist
    /// failures). Cleared by the next notice-worthy event.
    pub notice: Option<String>,
    pub should_quit: bool,
}

impl AppState {
    pub fn new(blob: StoreBlob) -> Self {
        Self {
            screen: Screen::Home,
            projects: ProjectStore::new(blob.current_project, blob.saved_projects),
            home: HomeState::default(),
            builder: BuilderState::default(),
            runner: RunnerState::default(),
            input_dialog: InputDialogState::default(),
            confirm_dialog: ConfirmDialogState::default(),
            port_picker: PortPickerState::default(),
            notice: None,
            should_quit: false,
        }
    }

    pub fn any_dialog_open(&self) -> bool {
        self.input_dialog.visible || self.confirm_dialog.visible || self.port_picker.visible
    }
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/state.rs"]
mod tests;

use uuid::Uuid;

use super::services::ports::SerialEvent;
use super::widget::{Position, WidgetKind};

#[derive(Debug, Clone)]
pub enum Action {
    Quit,

    // Navigation
    GoHome,
    OpenBuilder { id: Uuid },
    OpenRunner { id: Uuid },

    // Home screen
    HomeMoveSelection { delta: isize },
    HomeCreateProject,
    HomeRenameSelected,
    HomeDeleteSelected,

    // Shared input dialog
    DialogInput(char),
    DialogBackspace,
    DialogConfirm,
    DialogCancel,

    // Confirm dialog
    ConfirmAccept,
    ConfirmCancel,

    // Builder
    BuilderAddWidget { kind: WidgetKind },
    BuilderSelect { id: Option<Uuid> },
    BuilderToggleFocus,
    BuilderNudgeSelected { dx: i16, dy: i16 },
    BuilderDeleteSelected,
    SaveProject,
    PropsMoveSelection { delta: isize },
    PropsEditSelected,

    // Canvas drag (mouse)
    DragStart { id: Uuid, grab_dx: u16, grab_dy: u16, at: Position },
    DragMove { at: Position },
    DragEnd { max: Position },

    // Runner
    ConnectRequested,
    DisconnectRequested,
    PortsListed { ports: Vec<String> },
    PortPickerMove { delta: isize },
    PortPickerConfirm,
    PortPickerCancel,
    RunnerFocusNext,
    RunnerFocusPrev,
    RunnerFocusWidget { id: Uuid },
    /// Press on a specific button widget (mouse) or the focused one (keys).
    RunnerPress { id: Option<Uuid> },
    RunnerAdjust { delta: i64 },
    /// Slider adjustment gesture ended; flushes an onRelease pending value.
    RunnerCommit,

    // Service results
    Serial(SerialEvent),
    SerialOpenFailed { message: String },
    SerialUnavailable { message: String },
    PersistFailed { message: String },
}

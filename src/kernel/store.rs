use uuid::Uuid;

use super::effect::DEFAULT_BAUD;
use super::project::default_project_name;
use super::protocol::{self, Interaction};
use super::services::ports::{LinkState, SerialEvent};
use super::state::{
    AppState, BuilderFocus, InputDialogKind, PendingAction, PropertyField, Screen,
};
use super::widget::{
    Position, SendStrategy, Widget, WidgetColor, WidgetKind, WidgetPatch,
};
use super::{Action, Effect};

pub struct DispatchResult {
    pub effects: Vec<Effect>,
    pub state_changed: bool,
}

impl DispatchResult {
    fn none() -> Self {
        Self {
            effects: Vec::new(),
            state_changed: false,
        }
    }

    fn changed() -> Self {
        Self {
            effects: Vec::new(),
            state_changed: true,
        }
    }

    fn with(effects: Vec<Effect>, state_changed: bool) -> Self {
        Self {
            effects,
            state_changed,
        }
    }
}

pub struct Store {
    state: AppState,
}

impl Store {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn dispatch(&mut self, action: Action) -> DispatchResult {
        match action {
            Action::Quit => {
                self.state.should_quit = true;
                DispatchResult::changed()
            }

            Action::GoHome => {
                self.state.screen = Screen::Home;
                self.state.builder.reset();
                self.state.runner.reset_session();
                self.state
                    .home
                    .clamp_selection(self.state.projects.saved().len());
                DispatchResult::with(vec![Effect::SerialDisconnect], true)
            }

            Action::OpenBuilder { id } => self.open_project(id, Screen::Builder),
            Action::OpenRunner { id } => self.open_project(id, Screen::Runner),

            Action::HomeMoveSelection { delta } => {
                let len = self.state.projects.saved().len();
                DispatchResult::with(Vec::new(), self.state.home.move_selection(delta, len))
            }

            Action::HomeCreateProject => {
                self.state.input_dialog.open(
                    "New project",
                    default_project_name(),
                    InputDialogKind::NewProject,
                );
                DispatchResult::changed()
            }

            Action::HomeRenameSelected => {
                let Some(project) = self
                    .state
                    .projects
                    .saved()
                    .get(self.state.home.selected)
                else {
                    return DispatchResult::none();
                };
                let (id, name) = (project.id, project.name.clone());
                self.state
                    .input_dialog
                    .open("Rename project", name, InputDialogKind::RenameProject { id });
                DispatchResult::changed()
            }

            Action::HomeDeleteSelected => {
                let Some(project) = self
                    .state
                    .projects
                    .saved()
                    .get(self.state.home.selected)
                else {
                    return DispatchResult::none();
                };
                self.state.confirm_dialog.visible = true;
                self.state.confirm_dialog.message =
                    format!("Delete project \"{}\"?", project.name);
                self.state.confirm_dialog.on_confirm =
                    Some(PendingAction::DeleteProject { id: project.id });
                DispatchResult::changed()
            }

            Action::DialogInput(ch) => {
                if !self.state.input_dialog.visible {
                    return DispatchResult::none();
                }
                let dialog = &mut self.state.input_dialog;
                let byte = char_to_byte_index(&dialog.value, dialog.cursor);
                dialog.value.insert(byte, ch);
                dialog.cursor += 1;
                dialog.error = None;
                DispatchResult::changed()
            }

            Action::DialogBackspace => {
                if !self.state.input_dialog.visible {
                    return DispatchResult::none();
                }
                let dialog = &mut self.state.input_dialog;
                if dialog.cursor == 0 {
                    return DispatchResult::none();
                }
                let byte = char_to_byte_index(&dialog.value, dialog.cursor - 1);
                dialog.value.remove(byte);
                dialog.cursor -= 1;
                dialog.error = None;
                DispatchResult::changed()
            }

            Action::DialogConfirm => self.confirm_input_dialog(),

            Action::DialogCancel => {
                if !self.state.input_dialog.visible {
                    return DispatchResult::none();
                }
                self.state.input_dialog.reset();
                DispatchResult::changed()
            }

            Action::ConfirmAccept => {
                if !self.state.confirm_dialog.visible {
                    return DispatchResult::none();
                }
                let pending = self.state.confirm_dialog.on_confirm.take();
                self.state.confirm_dialog.reset();
                match pending {
                    Some(PendingAction::DeleteProject { id }) => {
                        self.state.projects.delete_project(id);
                        self.state
                            .home
                            .clamp_selection(self.state.projects.saved().len());
                        DispatchResult::with(vec![Effect::PersistStore], true)
                    }
                    None => DispatchResult::changed(),
                }
            }

            Action::ConfirmCancel => {
                if !self.state.confirm_dialog.visible {
                    return DispatchResult::none();
                }
                self.state.confirm_dialog.reset();
                DispatchResult::changed()
            }

            Action::BuilderAddWidget { kind } => {
                let Some(current) = self.state.projects.current() else {
                    return DispatchResult::none();
                };
                let n = current.widgets.len() as u16;
                let position = Position::new(4 + (n % 4) * 8, 2 + (n % 6) * 3);
                let widget = Widget::new(kind, position);
                let id = widget.id;
                self.state.projects.add_widget(widget);
                self.state.builder.selected = Some(id);
                self.state.builder.focus = Some(BuilderFocus::Canvas);
                DispatchResult::with(vec![Effect::PersistStore], true)
            }

            Action::BuilderSelect { id } => {
                let changed = self.state.builder.selected != id;
                self.state.builder.selected = id;
                self.state.builder.focus = Some(BuilderFocus::Canvas);
                self.state.builder.prop_selected = 0;
                DispatchResult::with(Vec::new(), changed)
            }

            Action::BuilderToggleFocus => {
                if self.state.builder.selected.is_none() {
                    return DispatchResult::none();
                }
                self.state.builder.focus = Some(match self.state.builder.focus() {
                    BuilderFocus::Canvas => BuilderFocus::Properties,
                    BuilderFocus::Properties => BuilderFocus::Canvas,
                });
                DispatchResult::changed()
            }

            Action::BuilderNudgeSelected { dx, dy } => {
                let Some(id) = self.state.builder.selected else {
                    return DispatchResult::none();
                };
                let Some(widget) = self
                    .state
                    .projects
                    .current()
                    .and_then(|p| p.widget(id))
                else {
                    return DispatchResult::none();
                };
                let position = Position::new(
                    offset_coord(widget.position.x, dx),
                    offset_coord(widget.position.y, dy),
                );
                if self.state.projects.update_widget_position(id, position) {
                    DispatchResult::with(vec![Effect::PersistStore], true)
                } else {
                    DispatchResult::none()
                }
            }

            Action::BuilderDeleteSelected => {
                let Some(id) = self.state.builder.selected.take() else {
                    return DispatchResult::none();
                };
                if self.state.projects.remove_widget(id) {
                    self.state.builder.focus = Some(BuilderFocus::Canvas);
                    DispatchResult::with(vec![Effect::PersistStore], true)
                } else {
                    DispatchResult::changed()
                }
            }

            Action::SaveProject => {
                if self.state.projects.save_project() {
                    DispatchResult::with(vec![Effect::PersistStore], true)
                } else {
                    DispatchResult::none()
                }
            }

            Action::PropsMoveSelection { delta } => {
                let len = PropertyField::ALL.len();
                let prev = self.state.builder.prop_selected;
                let next = if delta < 0 {
                    prev.saturating_sub((-delta) as usize)
                } else {
                    (prev + delta as usize).min(len - 1)
                };
                self.state.builder.prop_selected = next;
                DispatchResult::with(Vec::new(), next != prev)
            }

            Action::PropsEditSelected => {
                let Some(id) = self.state.builder.selected else {
                    return DispatchResult::none();
                };
                let Some(widget) = self
                    .state
                    .projects
                    .current()
                    .and_then(|p| p.widget(id))
                else {
                    return DispatchResult::none();
                };
                let field = PropertyField::from_index(self.state.builder.prop_selected);
                let value = property_text(widget, field);
                self.state.input_dialog.open(
                    format!("Edit {}", field.label()),
                    value,
                    InputDialogKind::EditProperty { id, field },
                );
                DispatchResult::changed()
            }

            Action::DragStart {
                id,
                grab_dx,
                grab_dy,
                at,
            } => {
                self.state.builder.selected = Some(id);
                self.state.builder.focus = Some(BuilderFocus::Canvas);
                self.state.builder.drag = Some(super::state::DragState {
                    id,
                    grab_dx,
                    grab_dy,
                    at,
                });
                DispatchResult::changed()
            }

            Action::DragMove { at } => {
                let Some(drag) = self.state.builder.drag.as_mut() else {
                    return DispatchResult::none();
                };
                if drag.at == at {
                    return DispatchResult::none();
                }
                drag.at = at;
                DispatchResult::changed()
            }

            Action::DragEnd { max } => {
                let Some(drag) = self.state.builder.drag.take() else {
                    return DispatchResult::none();
                };
                let position = Position::new(
                    drag.at.x.saturating_sub(drag.grab_dx).min(max.x),
                    drag.at.y.saturating_sub(drag.grab_dy).min(max.y),
                );
                if self.state.projects.update_widget_position(drag.id, position) {
                    DispatchResult::with(vec![Effect::PersistStore], true)
                } else {
                    DispatchResult::changed()
                }
            }

            Action::ConnectRequested => {
                if self.state.runner.link != LinkState::Disconnected {
                    // One reader per port, always; a second connect is a no-op.
                    tracing::warn!(state = ?self.state.runner.link, "connect ignored");
                    return DispatchResult::none();
                }
                self.state.runner.link = LinkState::Connecting;
                DispatchResult::with(vec![Effect::ListPorts], true)
            }

            Action::DisconnectRequested => {
                self.state.runner.link = LinkState::Disconnected;
                self.state.runner.pending_send = None;
                DispatchResult::with(vec![Effect::SerialDisconnect], true)
            }

            Action::PortsListed { ports } => {
                self.state.port_picker.visible = true;
                self.state.port_picker.ports = ports;
                self.state.port_picker.selected = 0;
                DispatchResult::changed()
            }

            Action::PortPickerMove { delta } => {
                let len = self.state.port_picker.ports.len();
                if len == 0 {
                    return DispatchResult::none();
                }
                let prev = self.state.port_picker.selected;
                let next = if delta < 0 {
                    prev.saturating_sub((-delta) as usize)
                } else {
                    (prev + delta as usize).min(len - 1)
                };
                self.state.port_picker.selected = next;
                DispatchResult::with(Vec::new(), next != prev)
            }

            Action::PortPickerConfirm => {
                let Some(port) = self
                    .state
                    .port_picker
                    .ports
                    .get(self.state.port_picker.selected)
                    .cloned()
                else {
                    return DispatchResult::none();
                };
                self.state.port_picker.reset();
                DispatchResult::with(
                    vec![Effect::SerialConnect {
                        port,
                        baud: DEFAULT_BAUD,
                    }],
                    true,
                )
            }

            Action::PortPickerCancel => {
                // User backed out of device selection: silently Disconnected,
                // not an error.
                if !self.state.port_picker.visible {
                    return DispatchResult::none();
                }
                self.state.port_picker.reset();
                self.state.runner.link = LinkState::Disconnected;
                DispatchResult::changed()
            }

            Action::RunnerFocusNext => self.runner_cycle_focus(1),
            Action::RunnerFocusPrev => self.runner_cycle_focus(-1),

            Action::RunnerFocusWidget { id } => {
                let mut effects = Vec::new();
                if self.state.runner.focus != Some(id) {
                    if let Some(effect) = self.flush_pending_send() {
                        effects.push(effect);
                    }
                }
                let changed = self.state.runner.focus != Some(id);
                self.state.runner.focus = Some(id);
                DispatchResult::with(effects, changed)
            }

            Action::RunnerPress { id } => {
                let Some(id) = id.or(self.state.runner.focus) else {
                    return DispatchResult::none();
                };
                if self.state.runner.link != LinkState::Connected {
                    return DispatchResult::none();
                }
                let Some(widget) = self
                    .state
                    .projects
                    .current()
                    .and_then(|p| p.widget(id))
                else {
                    return DispatchResult::none();
                };
                match protocol::interaction_line(widget, Interaction::Pressed) {
                    Some(line) => {
                        DispatchResult::with(vec![Effect::SerialSend { line }], false)
                    }
                    None => DispatchResult::none(),
                }
            }

            Action::RunnerAdjust { delta } => self.runner_adjust(delta),

            Action::RunnerCommit => match self.flush_pending_send() {
                Some(effect) => DispatchResult::with(vec![effect], false),
                None => DispatchResult::none(),
            },

            Action::Serial(event) => self.apply_serial_event(event),

            Action::SerialOpenFailed { message } => {
                self.state.runner.link = LinkState::Disconnected;
                self.state.notice = Some(message);
                DispatchResult::changed()
            }

            Action::SerialUnavailable { message } => {
                self.state.runner.link = LinkState::Disconnected;
                self.state.port_picker.reset();
                self.state.notice = Some(message);
                DispatchResult::changed()
            }

            Action::PersistFailed { message } => {
                self.state.notice = Some(format!("save failed: {message}"));
                DispatchResult::changed()
            }
        }
    }

    fn open_project(&mut self, id: Uuid, screen: Screen) -> DispatchResult {
        // Any navigation away from a running session releases the port first.
        let effects = vec![Effect::SerialDisconnect, Effect::PersistStore];
        self.state.builder.reset();
        self.state.runner.reset_session();

        if !self.state.projects.load_project(id) {
            self.state.screen = Screen::Home;
            self.state
                .home
                .clamp_selection(self.state.projects.saved().len());
            self.state.notice = Some("project not found".to_string());
            return DispatchResult::with(effects, true);
        }

        self.state.screen = screen;
        self.state.notice = None;
        if screen == Screen::Runner {
            self.state.runner.focus = self
                .state
                .projects
                .current()
                .and_then(first_interactive_widget);
        }
        DispatchResult::with(effects, true)
    }

    fn confirm_input_dialog(&mut self) -> DispatchResult {
        if !self.state.input_dialog.visible {
            return DispatchResult::none();
        }
        let Some(kind) = self.state.input_dialog.kind.clone() else {
            self.state.input_dialog.reset();
            return DispatchResult::changed();
        };

        match kind {
            InputDialogKind::NewProject => {
                let name = self.state.input_dialog.value.trim().to_string();
                if name.is_empty() {
                    self.state.input_dialog.error = Some("name cannot be empty".to_string());
                    return DispatchResult::changed();
                }
                self.state.input_dialog.reset();
                self.state.projects.create_project(name);
                self.state.screen = Screen::Builder;
                self.state.builder.reset();
                self.state
                    .home
                    .clamp_selection(self.state.projects.saved().len());
                DispatchResult::with(vec![Effect::PersistStore], true)
            }

            InputDialogKind::RenameProject { id } => {
                let name = self.state.input_dialog.value.trim().to_string();
                if name.is_empty() {
                    self.state.input_dialog.error = Some("name cannot be empty".to_string());
                    return DispatchResult::changed();
                }
                self.state.input_dialog.reset();
                if self.state.projects.rename_project(id, name) {
                    DispatchResult::with(vec![Effect::PersistStore], true)
                } else {
                    DispatchResult::changed()
                }
            }

            InputDialogKind::EditProperty { id, field } => {
                let value = self.state.input_dialog.value.clone();
                let patch = match parse_property(field, &value) {
                    Ok(patch) => patch,
                    Err(message) => {
                        self.state.input_dialog.error = Some(message);
                        return DispatchResult::changed();
                    }
                };
                self.state.input_dialog.reset();
                if self.state.projects.update_widget(id, &patch) {
                    DispatchResult::with(vec![Effect::PersistStore], true)
                } else {
                    DispatchResult::changed()
                }
            }
        }
    }

    fn runner_cycle_focus(&mut self, direction: isize) -> DispatchResult {
        let Some(project) = self.state.projects.current() else {
            return DispatchResult::none();
        };
        let interactive: Vec<Uuid> = project
            .widgets
            .iter()
            .filter(|w| w.kind.is_interactive())
            .map(|w| w.id)
            .collect();
        if interactive.is_empty() {
            return DispatchResult::none();
        }

        let next = match self
            .state
            .runner
            .focus
            .and_then(|id| interactive.iter().position(|w| *w == id))
        {
            Some(pos) => {
                let len = interactive.len() as isize;
                let next = (pos as isize + direction).rem_euclid(len);
                interactive[next as usize]
            }
            None => interactive[0],
        };

        let mut effects = Vec::new();
        if self.state.runner.focus != Some(next) {
            if let Some(effect) = self.flush_pending_send() {
                effects.push(effect);
            }
        }
        let changed = self.state.runner.focus != Some(next);
        self.state.runner.focus = Some(next);
        DispatchResult::with(effects, changed)
    }

    fn runner_adjust(&mut self, delta: i64) -> DispatchResult {
        let Some(id) = self.state.runner.focus else {
            return DispatchResult::none();
        };
        let Some(widget) = self
            .state
            .projects
            .current()
            .and_then(|p| p.widget(id))
        else {
            return DispatchResult::none();
        };
        if widget.kind != WidgetKind::Slider {
            return DispatchResult::none();
        }

        let (min, max) = widget.slider_bounds();
        let current = self
            .state
            .runner
            .live
            .get(&id)
            .and_then(|v| v.trim().parse::<i64>().ok())
            .unwrap_or_else(|| widget.slider_value());
        let next = (current + delta).clamp(min, max);
        if next == current {
            return DispatchResult::none();
        }

        let strategy = widget.send_strategy();
        let line = protocol::interaction_line(widget, Interaction::SliderChanged(next));
        self.state.runner.live.insert(id, next.to_string());

        match strategy {
            // A slider has no press gesture in a terminal; onPress degrades
            // to per-step transmission.
            SendStrategy::OnChange | SendStrategy::OnPress => {
                let connected = self.state.runner.link == LinkState::Connected;
                match line {
                    Some(line) if connected => {
                        DispatchResult::with(vec![Effect::SerialSend { line }], true)
                    }
                    _ => DispatchResult::changed(),
                }
            }
            SendStrategy::OnRelease => {
                self.state.runner.pending_send = Some((id, next));
                DispatchResult::changed()
            }
        }
    }

    /// Transmits a deferred onRelease slider value, if any.
    fn flush_pending_send(&mut self) -> Option<Effect> {
        let (id, value) = self.state.runner.pending_send.take()?;
        if self.state.runner.link != LinkState::Connected {
            return None;
        }
        let widget = self.state.projects.current().and_then(|p| p.widget(id))?;
        let line = protocol::interaction_line(widget, Interaction::SliderChanged(value))?;
        Some(Effect::SerialSend { line })
    }

    fn apply_serial_event(&mut self, event: SerialEvent) -> DispatchResult {
        match event {
            SerialEvent::Opened { port } => {
                tracing::info!(port = %port, "serial connected");
                self.state.runner.link = LinkState::Connected;
                self.state.notice = None;
                DispatchResult::changed()
            }
            SerialEvent::Line(line) => {
                self.route_inbound_line(&line);
                self.state.runner.push_line(line);
                DispatchResult::changed()
            }
            SerialEvent::Closed => {
                if self.state.runner.link == LinkState::Disconnected {
                    return DispatchResult::none();
                }
                self.state.runner.link = LinkState::Disconnected;
                self.state.runner.pending_send = None;
                DispatchResult::changed()
            }
            SerialEvent::Fault { message } => {
                // A dead reader must not leave the link claiming Connected.
                self.state.runner.link = LinkState::Disconnected;
                self.state.runner.pending_send = None;
                self.state.notice = Some(message);
                DispatchResult::changed()
            }
        }
    }

    /// The explicit subscription routing inbound `pin:value` lines into LED
    /// live state. Display of the raw line happens regardless.
    fn route_inbound_line(&mut self, line: &str) {
        let Some((pin, value)) = protocol::parse_line(line) else {
            return;
        };
        let Some(project) = self.state.projects.current() else {
            return;
        };
        let targets: Vec<Uuid> = project
            .widgets
            .iter()
            .filter(|w| w.kind == WidgetKind::Led && w.props.pin == pin)
            .map(|w| w.id)
            .collect();
        for id in targets {
            self.state.runner.live.insert(id, value.to_string());
        }
    }
}

fn first_interactive_widget(project: &super::project::Project) -> Option<Uuid> {
    project
        .widgets
        .iter()
        .find(|w| w.kind.is_interactive())
        .map(|w| w.id)
}

fn offset_coord(value: u16, delta: i16) -> u16 {
    if delta < 0 {
        value.saturating_sub((-delta) as u16)
    } else {
        value.saturating_add(delta as u16)
    }
}

fn char_to_byte_index(value: &str, char_index: usize) -> usize {
    value
        .char_indices()
        .nth(char_index)
        .map(|(i, _)| i)
        .unwrap_or(value.len())
}

fn property_text(widget: &Widget, field: PropertyField) -> String {
    match field {
        PropertyField::Label => widget.props.label.clone(),
        PropertyField::Pin => widget.props.pin.clone(),
        PropertyField::Value => widget.props.value.clone(),
        PropertyField::Min => widget.props.min.map(|v| v.to_string()).unwrap_or_default(),
        PropertyField::Max => widget.props.max.map(|v| v.to_string()).unwrap_or_default(),
        PropertyField::Color => widget
            .props
            .color
            .map(|c| c.label().to_string())
            .unwrap_or_default(),
        PropertyField::SendStrategy => widget
            .props
            .send_strategy
            .map(|s| s.label().to_string())
            .unwrap_or_default(),
    }
}

fn parse_property(field: PropertyField, value: &str) -> Result<WidgetPatch, String> {
    match field {
        PropertyField::Label => Ok(WidgetPatch::label(value)),
        PropertyField::Pin => Ok(WidgetPatch::pin(value.trim())),
        PropertyField::Value => Ok(WidgetPatch::value(value.trim())),
        PropertyField::Min => parse_optional_int(value).map(WidgetPatch::min),
        PropertyField::Max => parse_optional_int(value).map(WidgetPatch::max),
        PropertyField::Color => {
            let value = value.trim();
            if value.is_empty() {
                return Ok(WidgetPatch::color(None));
            }
            match WidgetColor::parse(value) {
                Some(color) => Ok(WidgetPatch::color(Some(color))),
                None => Err("unknown color (red, green, blue, yellow, cyan, magenta, white)"
                    .to_string()),
            }
        }
        PropertyField::SendStrategy => {
            let value = value.trim();
            if value.is_empty() {
                return Ok(WidgetPatch::send_strategy(None));
            }
            match SendStrategy::parse(value) {
                Some(strategy) => Ok(WidgetPatch::send_strategy(Some(strategy))),
                None => Err("unknown strategy (onPress, onChange, onRelease)".to_string()),
            }
        }
    }
}

fn parse_optional_int(value: &str) -> Result<Option<i64>, String> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(None);
    }
    value
        .parse::<i64>()
        .map(Some)
        .map_err(|_| "enter an integer or leave empty".to_string())
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/store.rs"]
mod tests;

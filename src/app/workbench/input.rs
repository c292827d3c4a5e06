//! Keyboard routing: dialogs first, then per-screen key maps.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use super::Workbench;
use crate::kernel::{Action, BuilderFocus, Screen, WidgetKind};

pub(super) fn handle_key(wb: &mut Workbench, key: KeyEvent) {
    if key.kind == KeyEventKind::Release {
        return;
    }

    let state = wb.store().state();

    if state.input_dialog.visible {
        match key.code {
            KeyCode::Esc => wb.dispatch(Action::DialogCancel),
            KeyCode::Enter => wb.dispatch(Action::DialogConfirm),
            KeyCode::Backspace => wb.dispatch(Action::DialogBackspace),
            KeyCode::Char(ch) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                wb.dispatch(Action::DialogInput(ch));
            }
            _ => {}
        }
        return;
    }

    if state.confirm_dialog.visible {
        match key.code {
            KeyCode::Enter | KeyCode::Char('y') => wb.dispatch(Action::ConfirmAccept),
            KeyCode::Esc | KeyCode::Char('n') => wb.dispatch(Action::ConfirmCancel),
            _ => {}
        }
        return;
    }

    if state.port_picker.visible {
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => wb.dispatch(Action::PortPickerMove { delta: -1 }),
            KeyCode::Down | KeyCode::Char('j') => wb.dispatch(Action::PortPickerMove { delta: 1 }),
            KeyCode::Enter => wb.dispatch(Action::PortPickerConfirm),
            KeyCode::Esc => wb.dispatch(Action::PortPickerCancel),
            _ => {}
        }
        return;
    }

    match state.screen {
        Screen::Home => handle_home_key(wb, key),
        Screen::Builder => handle_builder_key(wb, key),
        Screen::Runner => handle_runner_key(wb, key),
    }
}

fn handle_home_key(wb: &mut Workbench, key: KeyEvent) {
    let state = wb.store().state();
    let selected_id = state.projects.saved().get(state.home.selected).map(|p| p.id);

    match key.code {
        KeyCode::Char('q') => wb.dispatch(Action::Quit),
        KeyCode::Up | KeyCode::Char('k') => wb.dispatch(Action::HomeMoveSelection { delta: -1 }),
        KeyCode::Down | KeyCode::Char('j') => wb.dispatch(Action::HomeMoveSelection { delta: 1 }),
        KeyCode::Enter => {
            if let Some(id) = selected_id {
                wb.dispatch(Action::OpenBuilder { id });
            }
        }
        KeyCode::Char('r') => {
            if let Some(id) = selected_id {
                wb.dispatch(Action::OpenRunner { id });
            }
        }
        KeyCode::Char('n') => wb.dispatch(Action::HomeCreateProject),
        KeyCode::Char('m') | KeyCode::F(2) => wb.dispatch(Action::HomeRenameSelected),
        KeyCode::Char('d') => wb.dispatch(Action::HomeDeleteSelected),
        _ => {}
    }
}

fn handle_builder_key(wb: &mut Workbench, key: KeyEvent) {
    let state = wb.store().state();
    let current_id = state.projects.current().map(|p| p.id);
    let has_selection = state.builder.selected.is_some();

    match state.builder.focus() {
        BuilderFocus::Canvas => match key.code {
            KeyCode::Esc => {
                if has_selection {
                    wb.dispatch(Action::BuilderSelect { id: None });
                } else {
                    wb.dispatch(Action::GoHome);
                }
            }
            KeyCode::Char('1') => wb.dispatch(Action::BuilderAddWidget {
                kind: WidgetKind::Button,
            }),
            KeyCode::Char('2') => wb.dispatch(Action::BuilderAddWidget {
                kind: WidgetKind::Slider,
            }),
            KeyCode::Char('3') => wb.dispatch(Action::BuilderAddWidget {
                kind: WidgetKind::Label,
            }),
            KeyCode::Char('4') => wb.dispatch(Action::BuilderAddWidget {
                kind: WidgetKind::Led,
            }),
            KeyCode::Tab => wb.dispatch(Action::BuilderToggleFocus),
            KeyCode::Up => wb.dispatch(Action::BuilderNudgeSelected { dx: 0, dy: -1 }),
            KeyCode::Down => wb.dispatch(Action::BuilderNudgeSelected { dx: 0, dy: 1 }),
            KeyCode::Left => wb.dispatch(Action::BuilderNudgeSelected { dx: -1, dy: 0 }),
            KeyCode::Right => wb.dispatch(Action::BuilderNudgeSelected { dx: 1, dy: 0 }),
            KeyCode::Delete | KeyCode::Backspace => wb.dispatch(Action::BuilderDeleteSelected),
            KeyCode::Char('s') => wb.dispatch(Action::SaveProject),
            KeyCode::Char('r') | KeyCode::F(5) => {
                if let Some(id) = current_id {
                    wb.dispatch(Action::OpenRunner { id });
                }
            }
            _ => {}
        },
        BuilderFocus::Properties => match key.code {
            KeyCode::Esc | KeyCode::Tab => wb.dispatch(Action::BuilderToggleFocus),
            KeyCode::Up | KeyCode::Char('k') => {
                wb.dispatch(Action::PropsMoveSelection { delta: -1 });
            }
            KeyCode::Down | KeyCode::Char('j') => {
                wb.dispatch(Action::PropsMoveSelection { delta: 1 });
            }
            KeyCode::Enter => wb.dispatch(Action::PropsEditSelected),
            _ => {}
        },
    }
}

fn handle_runner_key(wb: &mut Workbench, key: KeyEvent) {
    let state = wb.store().state();
    let current_id = state.projects.current().map(|p| p.id);
    let big_step = key.modifiers.contains(KeyModifiers::SHIFT);

    match key.code {
        KeyCode::Esc => match current_id {
            Some(id) => wb.dispatch(Action::OpenBuilder { id }),
            None => wb.dispatch(Action::GoHome),
        },
        KeyCode::Char('c') => wb.dispatch(Action::ConnectRequested),
        KeyCode::Char('x') => wb.dispatch(Action::DisconnectRequested),
        KeyCode::Tab => wb.dispatch(Action::RunnerFocusNext),
        KeyCode::BackTab => wb.dispatch(Action::RunnerFocusPrev),
        KeyCode::Char(' ') | KeyCode::Enter => {
            // Press if the focus is a button; flush a pending onRelease
            // slider value otherwise. Each no-ops for the other kind.
            wb.dispatch(Action::RunnerPress { id: None });
            wb.dispatch(Action::RunnerCommit);
        }
        KeyCode::Left => wb.dispatch(Action::RunnerAdjust {
            delta: if big_step { -10 } else { -1 },
        }),
        KeyCode::Right => wb.dispatch(Action::RunnerAdjust {
            delta: if big_step { 10 } else { 1 },
        }),
        _ => {}
    }
}

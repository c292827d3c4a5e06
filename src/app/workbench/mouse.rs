//! Mouse routing: canvas drag/selection in the builder, widget interaction
//! in the runner, row selection on the home list.

use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Rect;
use uuid::Uuid;

use super::Workbench;
use crate::app::widget_view;
use crate::kernel::protocol::Interaction;
use crate::kernel::widget::Position;
use crate::kernel::{Action, Screen, WidgetKind};

pub(super) fn handle_mouse(wb: &mut Workbench, mouse: MouseEvent) {
    if wb.store().state().any_dialog_open() {
        return;
    }

    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => on_down(wb, mouse.column, mouse.row),
        MouseEventKind::Drag(MouseButton::Left) => on_drag(wb, mouse.column, mouse.row),
        MouseEventKind::Up(MouseButton::Left) => on_up(wb),
        MouseEventKind::ScrollUp => on_scroll(wb, 1),
        MouseEventKind::ScrollDown => on_scroll(wb, -1),
        _ => {}
    }
}

fn on_down(wb: &mut Workbench, column: u16, row: u16) {
    match wb.store().state().screen {
        Screen::Home => {
            let Some(area) = wb.last_home_rows_area else {
                return;
            };
            if !contains(area, column, row) {
                return;
            }
            let index = (row - area.y) as usize;
            let len = wb.store().state().projects.saved().len();
            if index < len {
                let selected = wb.store().state().home.selected as isize;
                wb.dispatch(Action::HomeMoveSelection {
                    delta: index as isize - selected,
                });
            }
        }
        Screen::Builder => {
            let Some(canvas) = wb.last_canvas_area else {
                return;
            };
            if !contains(canvas, column, row) {
                return;
            }
            match hit_widget(wb, column, row) {
                Some((id, rect)) => {
                    let at = canvas_cell(canvas, column, row);
                    wb.dispatch(Action::DragStart {
                        id,
                        grab_dx: column - rect.x,
                        grab_dy: row - rect.y,
                        at,
                    });
                }
                None => wb.dispatch(Action::BuilderSelect { id: None }),
            }
        }
        Screen::Runner => {
            let Some((id, _)) = hit_widget(wb, column, row) else {
                return;
            };
            let Some(widget) = wb
                .store()
                .state()
                .projects
                .current()
                .and_then(|p| p.widget(id))
            else {
                return;
            };
            match widget_view::click_interaction(widget, true) {
                Some(Interaction::Pressed) => {
                    wb.dispatch(Action::RunnerPress { id: Some(id) });
                }
                _ => {
                    if widget.kind.is_interactive() {
                        wb.dispatch(Action::RunnerFocusWidget { id });
                    }
                }
            }
        }
    }
}

fn on_drag(wb: &mut Workbench, column: u16, row: u16) {
    if wb.store().state().screen != Screen::Builder {
        return;
    }
    if wb.store().state().builder.drag.is_none() {
        return;
    }
    let Some(canvas) = wb.last_canvas_area else {
        return;
    };
    let at = canvas_cell(canvas, column, row);
    wb.dispatch(Action::DragMove { at });
}

fn on_up(wb: &mut Workbench) {
    let state = wb.store().state();
    if state.screen != Screen::Builder {
        return;
    }
    let Some(drag) = state.builder.drag else {
        return;
    };
    let Some(canvas) = wb.last_canvas_area else {
        return;
    };
    let Some(widget) = state.projects.current().and_then(|p| p.widget(drag.id)) else {
        wb.dispatch(Action::DragEnd {
            max: Position::new(0, 0),
        });
        return;
    };

    let (w, h) = widget_view::size(widget);
    let max = Position::new(
        canvas.width.saturating_sub(w),
        canvas.height.saturating_sub(h),
    );
    wb.dispatch(Action::DragEnd { max });
}

fn on_scroll(wb: &mut Workbench, delta: i64) {
    if wb.store().state().screen != Screen::Runner {
        return;
    }
    // Wheel over the runner adjusts the focused slider.
    let focused_slider = wb
        .store()
        .state()
        .runner
        .focus
        .and_then(|id| wb.store().state().projects.current().and_then(|p| p.widget(id)))
        .is_some_and(|w| w.kind == WidgetKind::Slider);
    if focused_slider {
        wb.dispatch(Action::RunnerAdjust { delta });
    }
}

/// Topmost widget whose last-rendered rect contains the cell; later widgets
/// sit on top (insertion order is z-order).
fn hit_widget(wb: &Workbench, column: u16, row: u16) -> Option<(Uuid, Rect)> {
    wb.last_widget_rects
        .iter()
        .rev()
        .find(|(_, rect)| contains(*rect, column, row))
        .copied()
}

fn canvas_cell(canvas: Rect, column: u16, row: u16) -> Position {
    let x = column
        .saturating_sub(canvas.x)
        .min(canvas.width.saturating_sub(1));
    let y = row
        .saturating_sub(canvas.y)
        .min(canvas.height.saturating_sub(1));
    Position::new(x, y)
}

fn contains(rect: Rect, column: u16, row: u16) -> bool {
    column >= rect.x
        && column < rect.x + rect.width
        && row >= rect.y
        && row < rect.y + rect.height
}

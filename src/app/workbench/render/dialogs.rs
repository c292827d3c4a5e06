//! Modal dialogs: text input, confirm, and the serial port picker.

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};

use super::super::Workbench;
use crate::app::theme::UiTheme;

const DIALOG_WIDTH: u16 = 46;

pub(in crate::app::workbench) fn render(wb: &Workbench, area: Rect, buf: &mut Buffer) {
    let theme = &wb.theme;
    let state = wb.store.state();

    if state.input_dialog.visible {
        let dialog = &state.input_dialog;
        let height = if dialog.error.is_some() { 6 } else { 5 };
        let rect = centered(area, DIALOG_WIDTH, height);
        draw_box(buf, rect, &dialog.title, theme);

        let inner_width = rect.width.saturating_sub(4) as usize;
        buf.set_stringn(rect.x + 2, rect.y + 2, &dialog.value, inner_width, theme.label_text);

        // Block cursor on the edit position.
        let cursor_x = rect.x + 2 + (dialog.cursor as u16).min(rect.width.saturating_sub(5));
        if let Some(cell) = buf.cell_mut((cursor_x, rect.y + 2)) {
            cell.set_style(Style::new().add_modifier(Modifier::REVERSED));
        }

        let mut hint_y = rect.y + 3;
        if let Some(error) = &dialog.error {
            buf.set_stringn(rect.x + 2, hint_y, error, inner_width, theme.dialog_error);
            hint_y += 1;
        }
        buf.set_stringn(
            rect.x + 2,
            hint_y,
            "Enter confirm · Esc cancel",
            inner_width,
            theme.muted,
        );
        return;
    }

    if state.confirm_dialog.visible {
        let rect = centered(area, DIALOG_WIDTH, 5);
        draw_box(buf, rect, "Confirm", theme);
        let inner_width = rect.width.saturating_sub(4) as usize;
        buf.set_stringn(
            rect.x + 2,
            rect.y + 2,
            &state.confirm_dialog.message,
            inner_width,
            theme.label_text,
        );
        buf.set_stringn(
            rect.x + 2,
            rect.y + 3,
            "y confirm · n cancel",
            inner_width,
            theme.muted,
        );
        return;
    }

    if state.port_picker.visible {
        let rows = state.port_picker.ports.len().clamp(1, 8) as u16;
        let rect = centered(area, DIALOG_WIDTH, rows + 4);
        draw_box(buf, rect, "Connect device (9600 baud)", theme);
        let inner_width = rect.width.saturating_sub(4) as usize;

        for (i, port) in state.port_picker.ports.iter().take(rows as usize).enumerate() {
            let y = rect.y + 2 + i as u16;
            let style = if i == state.port_picker.selected {
                theme.table_selected
            } else {
                theme.label_text
            };
            buf.set_stringn(rect.x + 2, y, port, inner_width, style);
        }

        buf.set_stringn(
            rect.x + 2,
            rect.y + rect.height - 2,
            "Enter connect · Esc cancel",
            inner_width,
            theme.muted,
        );
    }
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}

fn draw_box(buf: &mut Buffer, rect: Rect, title: &str, theme: &UiTheme) {
    if rect.width < 2 || rect.height < 2 {
        return;
    }

    // Clear whatever is underneath.
    let bg = Style::new().bg(Color::Rgb(24, 24, 24)).fg(Color::Gray);
    for y in rect.y..rect.y + rect.height {
        for x in rect.x..rect.x + rect.width {
            if let Some(cell) = buf.cell_mut((x, y)) {
                cell.set_symbol(" ").set_style(bg);
            }
        }
    }

    let right = rect.x + rect.width - 1;
    let bottom = rect.y + rect.height - 1;
    for x in rect.x..=right {
        set_border(buf, x, rect.y, "─", theme);
        set_border(buf, x, bottom, "─", theme);
    }
    for y in rect.y..=bottom {
        set_border(buf, rect.x, y, "│", theme);
        set_border(buf, right, y, "│", theme);
    }
    set_border(buf, rect.x, rect.y, "┌", theme);
    set_border(buf, right, rect.y, "┐", theme);
    set_border(buf, rect.x, bottom, "└", theme);
    set_border(buf, right, bottom, "┘", theme);

    buf.set_stringn(
        rect.x + 2,
        rect.y,
        format!(" {title} "),
        rect.width.saturating_sub(4) as usize,
        theme.dialog_title,
    );
}

fn set_border(buf: &mut Buffer, x: u16, y: u16, glyph: &str, theme: &UiTheme) {
    if let Some(cell) = buf.cell_mut((x, y)) {
        cell.set_symbol(glyph).set_style(theme.dialog_border);
    }
}

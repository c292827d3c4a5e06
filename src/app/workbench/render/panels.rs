//! Side panels: builder toolbar and properties, runner serial monitor.

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;

use super::super::Workbench;
use crate::kernel::services::ports::LinkState;
use crate::kernel::widget::Widget;
use crate::kernel::{BuilderFocus, PropertyField, WidgetKind};

pub(in crate::app::workbench) fn render_toolbar(wb: &Workbench, area: Rect, buf: &mut Buffer) {
    if area.width < 4 {
        return;
    }
    let theme = &wb.theme;
    vline(buf, area.x + area.width - 1, area.y, area.height, theme);

    buf.set_stringn(
        area.x + 1,
        area.y,
        "WIDGETS",
        area.width.saturating_sub(2) as usize,
        theme.table_header,
    );

    for (i, kind) in WidgetKind::PLACEABLE.iter().enumerate() {
        let y = area.y + 2 + i as u16;
        if y >= area.y + area.height {
            break;
        }
        let text = format!("{} {}", i + 1, kind.label());
        buf.set_stringn(
            area.x + 1,
            y,
            text,
            area.width.saturating_sub(2) as usize,
            theme.label_text,
        );
    }
}

pub(in crate::app::workbench) fn render_properties(wb: &Workbench, area: Rect, buf: &mut Buffer) {
    if area.width < 6 {
        return;
    }
    let theme = &wb.theme;
    let state = wb.store.state();
    vline(buf, area.x, area.y, area.height, theme);

    buf.set_stringn(
        area.x + 2,
        area.y,
        "PROPERTIES",
        area.width.saturating_sub(3) as usize,
        theme.table_header,
    );

    let widget = state
        .builder
        .selected
        .and_then(|id| state.projects.current().and_then(|p| p.widget(id)));
    let Some(widget) = widget else {
        buf.set_stringn(
            area.x + 2,
            area.y + 2,
            "select a widget",
            area.width.saturating_sub(3) as usize,
            theme.muted,
        );
        return;
    };

    buf.set_stringn(
        area.x + 2,
        area.y + 2,
        format!("kind  {}", widget.kind.label()),
        area.width.saturating_sub(3) as usize,
        theme.muted,
    );

    let panel_focused = state.builder.focus() == BuilderFocus::Properties;
    for (i, field) in PropertyField::ALL.iter().enumerate() {
        let y = area.y + 4 + i as u16;
        if y >= area.y + area.height {
            break;
        }
        let text = format!("{:<13} {}", field.label(), field_text(widget, *field));
        let style = if panel_focused && i == state.builder.prop_selected {
            theme.table_selected
        } else {
            theme.label_text
        };
        buf.set_stringn(
            area.x + 2,
            y,
            text,
            area.width.saturating_sub(3) as usize,
            style,
        );
    }
}

pub(in crate::app::workbench) fn render_monitor(wb: &Workbench, area: Rect, buf: &mut Buffer) {
    if area.width < 6 {
        return;
    }
    let theme = &wb.theme;
    let state = wb.store.state();
    vline(buf, area.x, area.y, area.height, theme);

    buf.set_stringn(
        area.x + 2,
        area.y,
        "SERIAL MONITOR",
        area.width.saturating_sub(3) as usize,
        theme.table_header,
    );

    let link_style = match state.runner.link {
        LinkState::Connected => theme.link_connected,
        LinkState::Connecting => theme.link_connecting,
        LinkState::Disconnected => theme.link_disconnected,
    };
    buf.set_stringn(
        area.x + 2,
        area.y + 1,
        state.runner.link.label(),
        area.width.saturating_sub(3) as usize,
        link_style,
    );

    let log_area = Rect::new(
        area.x + 2,
        area.y + 3,
        area.width.saturating_sub(3),
        area.height.saturating_sub(3),
    );
    if log_area.height == 0 {
        return;
    }

    if state.runner.monitor.is_empty() {
        buf.set_stringn(
            log_area.x,
            log_area.y,
            "Waiting for data...",
            log_area.width as usize,
            theme.monitor_waiting,
        );
        return;
    }

    // Newest lines win the space, oldest-first within it.
    let visible = log_area.height as usize;
    let skip = state.runner.monitor.len().saturating_sub(visible);
    for (i, line) in state.runner.monitor.iter().skip(skip).enumerate() {
        buf.set_stringn(
            log_area.x,
            log_area.y + i as u16,
            line,
            log_area.width as usize,
            theme.monitor_text,
        );
    }
}

fn field_text(widget: &Widget, field: PropertyField) -> String {
    match field {
        PropertyField::Label => widget.props.label.clone(),
        PropertyField::Pin => widget.props.pin.clone(),
        PropertyField::Value => widget.props.value.clone(),
        PropertyField::Min => widget
            .props
            .min
            .map(|v| v.to_string())
            .unwrap_or_else(|| "0 (default)".to_string()),
        PropertyField::Max => widget
            .props
            .max
            .map(|v| v.to_string())
            .unwrap_or_else(|| "255 (default)".to_string()),
        PropertyField::Color => widget
            .props
            .color
            .map(|c| c.label().to_string())
            .unwrap_or_else(|| "-".to_string()),
        PropertyField::SendStrategy => widget
            .props
            .send_strategy
            .map(|s| s.label().to_string())
            .unwrap_or_else(|| "onChange (default)".to_string()),
    }
}

fn vline(buf: &mut Buffer, x: u16, y: u16, height: u16, theme: &crate::app::theme::UiTheme) {
    for dy in 0..height {
        if let Some(cell) = buf.cell_mut((x, y + dy)) {
            cell.set_symbol("│").set_style(theme.muted);
        }
    }
}

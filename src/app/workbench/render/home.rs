//! Home screen: the saved-projects table.

use chrono::TimeZone;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;

use super::super::Workbench;

pub(in crate::app::workbench) fn render(wb: &mut Workbench, area: Rect, buf: &mut Buffer) {
    let theme = &wb.theme;
    let state = wb.store.state();

    if state.projects.saved().is_empty() {
        buf.set_stringn(
            area.x + 2,
            area.y + 1,
            "no projects yet - press n to create one",
            area.width.saturating_sub(3) as usize,
            theme.muted,
        );
        return;
    }

    let name_width = area.width.saturating_sub(32) as usize;
    let header = format!("{:<name_width$}  {:>7}  {:<16}", "NAME", "WIDGETS", "MODIFIED");
    buf.set_stringn(
        area.x + 2,
        area.y,
        header,
        area.width.saturating_sub(3) as usize,
        theme.table_header,
    );

    let rows_area = Rect::new(
        area.x,
        area.y + 2,
        area.width,
        area.height.saturating_sub(2),
    );

    for (i, project) in state
        .projects
        .saved()
        .iter()
        .take(rows_area.height as usize)
        .enumerate()
    {
        let y = rows_area.y + i as u16;
        let row = format!(
            "{:<name_width$}  {:>7}  {:<16}",
            clip(&project.name, name_width),
            project.widgets.len(),
            format_ms(project.last_modified),
        );
        let style = if i == state.home.selected {
            theme.table_selected
        } else {
            theme.label_text
        };
        if i == state.home.selected {
            buf.set_style(Rect::new(rows_area.x, y, rows_area.width, 1), style);
        }
        buf.set_stringn(
            rows_area.x + 2,
            y,
            row,
            rows_area.width.saturating_sub(3) as usize,
            style,
        );
    }

    wb.last_home_rows_area = Some(rows_area);
}

fn format_ms(ms: i64) -> String {
    match chrono::Local.timestamp_millis_opt(ms).single() {
        Some(ts) => ts.format("%Y-%m-%d %H:%M").to_string(),
        None => "-".to_string(),
    }
}

fn clip(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        text.to_string()
    } else {
        let mut out: String = text.chars().take(width.saturating_sub(1)).collect();
        out.push('…');
        out
    }
}

//! Canvas painting, shared by builder (inert widgets, selection ring, drag
//! preview) and runner (live widgets, keyboard focus).

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;

use super::super::Workbench;
use crate::app::widget_view::{self, RenderCtx};
use crate::kernel::widget::Position;

pub(in crate::app::workbench) fn render_canvas(
    wb: &mut Workbench,
    area: Rect,
    buf: &mut Buffer,
    interactive: bool,
) {
    if area.width == 0 || area.height == 0 {
        return;
    }

    // Sparse dot grid, the canvas texture.
    for dy in (0..area.height).step_by(2) {
        for dx in (0..area.width).step_by(4) {
            if let Some(cell) = buf.cell_mut((area.x + dx, area.y + dy)) {
                cell.set_symbol("·").set_style(wb.theme.canvas_dot);
            }
        }
    }

    let mut rects = Vec::new();
    {
        let theme = &wb.theme;
        let state = wb.store.state();
        let Some(project) = state.projects.current() else {
            buf.set_stringn(
                area.x + 2,
                area.y + 1,
                "no project loaded",
                area.width.saturating_sub(3) as usize,
                theme.muted,
            );
            wb.last_canvas_area = Some(area);
            return;
        };

        for widget in &project.widgets {
            let (w, h) = widget_view::size(widget);

            // The dragged widget follows the cursor until the gesture ends.
            let pos = match state.builder.drag {
                Some(drag) if !interactive && drag.id == widget.id => Position::new(
                    drag.at.x.saturating_sub(drag.grab_dx),
                    drag.at.y.saturating_sub(drag.grab_dy),
                ),
                _ => widget.position,
            };

            let x = area.x + pos.x.min(area.width.saturating_sub(1));
            let y = area.y + pos.y.min(area.height.saturating_sub(1));
            let rect = Rect::new(
                x,
                y,
                w.min(area.x + area.width - x),
                h.min(area.y + area.height - y),
            );

            let ctx = RenderCtx {
                theme,
                interactive,
                selected: !interactive && state.builder.selected == Some(widget.id),
                focused: interactive && state.runner.focus == Some(widget.id),
            };
            let live = if interactive {
                state.runner.live.get(&widget.id).map(String::as_str)
            } else {
                None
            };
            widget_view::paint(widget, live, &ctx, rect, buf);
            rects.push((widget.id, rect));
        }

        if project.widgets.is_empty() && !interactive {
            buf.set_stringn(
                area.x + 2,
                area.y + 1,
                "empty canvas - press 1-4 to add a widget",
                area.width.saturating_sub(3) as usize,
                theme.muted,
            );
        }
    }

    wb.last_widget_rects = rects;
    wb.last_canvas_area = Some(area);
}

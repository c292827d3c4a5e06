//! Widget renderer: pure mapping from a widget's (kind, properties, live
//! value) to cell art and an interaction hook, shared by builder and runner.
//! The builder paints the same visuals with interaction disabled.

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use unicode_width::UnicodeWidthStr;

use super::theme::UiTheme;
use crate::kernel::protocol::Interaction;
use crate::kernel::widget::{value_is_on, Widget, WidgetColor, WidgetKind};

pub struct RenderCtx<'a> {
    pub theme: &'a UiTheme,
    /// Run mode: widgets are live. In builder mode every widget is inert.
    pub interactive: bool,
    /// Builder selection ring.
    pub selected: bool,
    /// Runner keyboard focus.
    pub focused: bool,
}

const SLIDER_WIDTH: u16 = 20;
const SLIDER_GAUGE: usize = 10;

/// Cell footprint of a widget.
pub fn size(widget: &Widget) -> (u16, u16) {
    let label_width = widget.props.label.width() as u16;
    match widget.kind {
        WidgetKind::Button => ((label_width + 4).clamp(6, 24), 1),
        WidgetKind::Slider => (SLIDER_WIDTH, 2),
        WidgetKind::Label => (label_width.clamp(1, 30), 1),
        WidgetKind::Led => (label_width.clamp(3, 16), 2),
        WidgetKind::Unknown => (9, 1),
    }
}

/// What a click on the widget means, if anything. Interaction events exist
/// only outside builder mode; labels and LEDs never interact.
pub fn click_interaction(widget: &Widget, interactive: bool) -> Option<Interaction> {
    if !interactive {
        return None;
    }
    match widget.kind {
        WidgetKind::Button => Some(Interaction::Pressed),
        _ => None,
    }
}

pub fn paint(widget: &Widget, live: Option<&str>, ctx: &RenderCtx, area: Rect, buf: &mut Buffer) {
    if area.width == 0 || area.height == 0 {
        return;
    }

    let value = live.unwrap_or(widget.props.value.as_str());

    match widget.kind {
        WidgetKind::Button => paint_button(widget, ctx, area, buf),
        WidgetKind::Slider => paint_slider(widget, value, ctx, area, buf),
        WidgetKind::Label => paint_label(widget, ctx, area, buf),
        WidgetKind::Led => paint_led(widget, value, ctx, area, buf),
        WidgetKind::Unknown => {
            buf.set_stringn(
                area.x,
                area.y,
                "?unknown?",
                area.width as usize,
                ctx.theme.unknown_widget,
            );
        }
    }

    if ctx.selected {
        mark_selected(ctx, area, buf);
    }
}

fn paint_button(widget: &Widget, ctx: &RenderCtx, area: Rect, buf: &mut Buffer) {
    let mut style = widget_style(widget, ctx.theme.button);
    if ctx.focused {
        style = style.add_modifier(Modifier::REVERSED);
    }
    let label = if widget.props.label.is_empty() {
        "Button"
    } else {
        widget.props.label.as_str()
    };
    let text = format!("[ {label} ]");
    buf.set_stringn(area.x, area.y, text, area.width as usize, style);
}

fn paint_slider(widget: &Widget, value: &str, ctx: &RenderCtx, area: Rect, buf: &mut Buffer) {
    let label = if widget.props.label.is_empty() {
        "Slider"
    } else {
        widget.props.label.as_str()
    };
    let mut label_style = ctx.theme.slider_label;
    if ctx.focused {
        label_style = label_style.add_modifier(Modifier::REVERSED);
    }
    buf.set_stringn(area.x, area.y, label, area.width as usize, label_style);

    if area.height < 2 {
        return;
    }

    let (min, max) = widget.slider_bounds();
    let current = value
        .trim()
        .parse::<i64>()
        .unwrap_or(min)
        .clamp(min, max);
    let span = (max - min).max(1);
    let filled = ((current - min) * SLIDER_GAUGE as i64 / span) as usize;
    let filled = filled.min(SLIDER_GAUGE);

    let mut gauge = String::with_capacity(SLIDER_GAUGE + 2);
    gauge.push('[');
    for i in 0..SLIDER_GAUGE {
        gauge.push(if i < filled { '#' } else { '·' });
    }
    gauge.push(']');
    let text = format!("{gauge} {current}");
    let style = widget_style(widget, ctx.theme.slider_gauge);
    buf.set_stringn(area.x, area.y + 1, text, area.width as usize, style);
}

fn paint_label(widget: &Widget, ctx: &RenderCtx, area: Rect, buf: &mut Buffer) {
    let text = if widget.props.label.is_empty() {
        "Label"
    } else {
        widget.props.label.as_str()
    };
    let style = widget_style(widget, ctx.theme.label_text);
    buf.set_stringn(area.x, area.y, text, area.width as usize, style);
}

fn paint_led(widget: &Widget, value: &str, ctx: &RenderCtx, area: Rect, buf: &mut Buffer) {
    // LED state comes purely from the (live) value; there is no interaction.
    let on = value_is_on(value);
    let (glyph, style) = if on {
        ("●", ctx.theme.led_on)
    } else {
        ("○", ctx.theme.led_off)
    };
    let cx = area.x + area.width / 2;
    buf.set_string(cx, area.y, glyph, style);

    if area.height >= 2 && !widget.props.label.is_empty() {
        buf.set_stringn(
            area.x,
            area.y + 1,
            widget.props.label.as_str(),
            area.width as usize,
            ctx.theme.muted,
        );
    }
}

/// Corner ticks around the hit rect, the builder's selection ring.
fn mark_selected(ctx: &RenderCtx, area: Rect, buf: &mut Buffer) {
    let style = ctx.theme.selection;
    let right = area.x + area.width.saturating_sub(1);
    let bottom = area.y + area.height.saturating_sub(1);
    for (x, y, glyph) in [
        (area.x, area.y, "⌜"),
        (right, area.y, "⌝"),
        (area.x, bottom, "⌞"),
        (right, bottom, "⌟"),
    ] {
        if let Some(cell) = buf.cell_mut((x, y)) {
            if cell.symbol() == " " || cell.symbol() == "·" {
                cell.set_symbol(glyph).set_style(style);
            } else {
                cell.set_style(style);
            }
        }
    }
}

fn widget_style(widget: &Widget, base: Style) -> Style {
    match widget.props.color {
        Some(color) => base.fg(widget_color(color)),
        None => base,
    }
}

fn widget_color(color: WidgetColor) -> Color {
    match color {
        WidgetColor::Red => Color::Red,
        WidgetColor::Green => Color::Green,
        WidgetColor::Blue => Color::Blue,
        WidgetColor::Yellow => Color::Yellow,
        WidgetColor::Cyan => Color::Cyan,
        WidgetColor::Magenta => Color::Magenta,
        WidgetColor::White => Color::White,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/app/widget_view.rs"]
mod tests;

//! Frame layout: one header row, a per-screen body, one status row, dialogs
//! on top.

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::Frame;

use super::Workbench;
use crate::kernel::services::ports::LinkState;
use crate::kernel::{BuilderFocus, Screen};

mod canvas;
mod dialogs;
mod home;
mod panels;

const TOOLBAR_WIDTH: u16 = 16;
const PROPERTIES_WIDTH: u16 = 28;
const MONITOR_WIDTH: u16 = 32;

pub(super) fn render(wb: &mut Workbench, frame: &mut Frame) {
    let area = frame.area();
    let buf = frame.buffer_mut();

    wb.last_canvas_area = None;
    wb.last_home_rows_area = None;
    wb.last_widget_rects.clear();

    if area.width < 40 || area.height < 8 {
        buf.set_stringn(
            area.x,
            area.y,
            "terminal too small",
            area.width as usize,
            wb.theme.muted,
        );
        return;
    }

    let header = Rect::new(area.x, area.y, area.width, 1);
    let status = Rect::new(area.x, area.y + area.height - 1, area.width, 1);
    let body = Rect::new(area.x, area.y + 1, area.width, area.height - 2);

    render_header(wb, header, buf);

    match wb.store().state().screen {
        Screen::Home => home::render(wb, body, buf),
        Screen::Builder => render_builder(wb, body, buf),
        Screen::Runner => render_runner(wb, body, buf),
    }

    render_status(wb, status, buf);
    dialogs::render(wb, area, buf);
}

fn render_builder(wb: &mut Workbench, body: Rect, buf: &mut Buffer) {
    let toolbar = Rect::new(body.x, body.y, TOOLBAR_WIDTH.min(body.width), body.height);
    let props_width = PROPERTIES_WIDTH.min(body.width.saturating_sub(TOOLBAR_WIDTH));
    let props = Rect::new(
        body.x + body.width - props_width,
        body.y,
        props_width,
        body.height,
    );
    let canvas = Rect::new(
        toolbar.x + toolbar.width,
        body.y,
        body.width.saturating_sub(toolbar.width + props.width),
        body.height,
    );

    panels::render_toolbar(wb, toolbar, buf);
    canvas::render_canvas(wb, canvas, buf, false);
    panels::render_properties(wb, props, buf);
}

fn render_runner(wb: &mut Workbench, body: Rect, buf: &mut Buffer) {
    let monitor_width = MONITOR_WIDTH.min(body.width / 2);
    let monitor = Rect::new(
        body.x + body.width - monitor_width,
        body.y,
        monitor_width,
        body.height,
    );
    let canvas = Rect::new(
        body.x,
        body.y,
        body.width.saturating_sub(monitor.width),
        body.height,
    );

    canvas::render_canvas(wb, canvas, buf, true);
    panels::render_monitor(wb, monitor, buf);
}

fn render_header(wb: &Workbench, area: Rect, buf: &mut Buffer) {
    let theme = &wb.theme;
    let state = wb.store().state();
    buf.set_style(area, theme.header);

    let title = match state.screen {
        Screen::Home => "pindeck - projects".to_string(),
        Screen::Builder => match state.projects.current() {
            Some(p) => format!("pindeck - {}", p.name),
            None => "pindeck".to_string(),
        },
        Screen::Runner => match state.projects.current() {
            Some(p) => format!("pindeck - {} (running)", p.name),
            None => "pindeck".to_string(),
        },
    };
    buf.set_stringn(
        area.x + 1,
        area.y,
        title,
        area.width.saturating_sub(2) as usize,
        theme.header_title,
    );

    if state.screen == Screen::Runner {
        let link = state.runner.link;
        let (dot, style) = match link {
            LinkState::Connected => ("●", theme.link_connected),
            LinkState::Connecting => ("●", theme.link_connecting),
            LinkState::Disconnected => ("●", theme.link_disconnected),
        };
        let text = format!("{dot} {}", link.label());
        let width = text.len() as u16;
        if area.width > width + 2 {
            buf.set_string(
                area.x + area.width - width - 1,
                area.y,
                text,
                style.bg(ratatui::style::Color::Rgb(38, 38, 38)),
            );
        }
    }
}

fn render_status(wb: &Workbench, area: Rect, buf: &mut Buffer) {
    let theme = &wb.theme;
    let state = wb.store().state();
    buf.set_style(area, theme.status);

    if let Some(notice) = &state.notice {
        buf.set_stringn(
            area.x + 1,
            area.y,
            notice,
            area.width.saturating_sub(2) as usize,
            theme.notice,
        );
        return;
    }

    let hints = match state.screen {
        Screen::Home => "n new · Enter open · r run · m rename · d delete · q quit",
        Screen::Builder => match state.builder.focus() {
            BuilderFocus::Canvas => {
                "1-4 add · drag/arrows move · Tab properties · s save · r run · Del remove · Esc home"
            }
            BuilderFocus::Properties => "↑↓ field · Enter edit · Tab canvas",
        },
        Screen::Runner => {
            "c connect · x disconnect · Tab focus · Space press · ←→ adjust · Esc builder"
        }
    };
    buf.set_stringn(
        area.x + 1,
        area.y,
        hints,
        area.width.saturating_sub(2) as usize,
        theme.status,
    );
}

//! UI theme: the palette lives here so colors are not scattered through the
//! render code.

use ratatui::style::{Color, Modifier, Style};

#[derive(Debug, Clone)]
pub struct UiTheme {
    pub header: Style,
    pub header_title: Style,
    pub status: Style,
    pub notice: Style,
    pub muted: Style,
    pub canvas_dot: Style,
    pub selection: Style,
    pub table_header: Style,
    pub table_selected: Style,
    pub dialog_border: Style,
    pub dialog_title: Style,
    pub dialog_error: Style,
    pub button: Style,
    pub slider_label: Style,
    pub slider_gauge: Style,
    pub label_text: Style,
    pub led_on: Style,
    pub led_off: Style,
    pub unknown_widget: Style,
    pub monitor_text: Style,
    pub monitor_waiting: Style,
    pub link_connected: Style,
    pub link_connecting: Style,
    pub link_disconnected: Style,
}

impl Default for UiTheme {
    fn default() -> Self {
        Self {
            header: Style::new().bg(Color::Rgb(38, 38, 38)).fg(Color::Gray),
            header_title: Style::new()
                .bg(Color::Rgb(38, 38, 38))
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
            status: Style::new().bg(Color::Rgb(28, 28, 28)).fg(Color::DarkGray),
            notice: Style::new().bg(Color::Rgb(28, 28, 28)).fg(Color::Yellow),
            muted: Style::new().fg(Color::DarkGray),
            canvas_dot: Style::new().fg(Color::Rgb(70, 75, 85)),
            selection: Style::new()
                .fg(Color::Rgb(59, 130, 246))
                .add_modifier(Modifier::BOLD),
            table_header: Style::new()
                .fg(Color::Gray)
                .add_modifier(Modifier::UNDERLINED),
            table_selected: Style::new().bg(Color::Rgb(45, 55, 75)).fg(Color::White),
            dialog_border: Style::new().fg(Color::Rgb(59, 130, 246)),
            dialog_title: Style::new().fg(Color::White).add_modifier(Modifier::BOLD),
            dialog_error: Style::new().fg(Color::Red),
            button: Style::new()
                .bg(Color::Rgb(37, 99, 235))
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
            slider_label: Style::new().fg(Color::Gray),
            slider_gauge: Style::new().fg(Color::Rgb(59, 130, 246)),
            label_text: Style::new().fg(Color::White),
            led_on: Style::new().fg(Color::Red).add_modifier(Modifier::BOLD),
            led_off: Style::new().fg(Color::Rgb(80, 80, 80)),
            unknown_widget: Style::new().fg(Color::Red),
            monitor_text: Style::new().fg(Color::Green),
            monitor_waiting: Style::new()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
            link_connected: Style::new().fg(Color::Green),
            link_connecting: Style::new().fg(Color::Yellow),
            link_disconnected: Style::new().fg(Color::Red),
        }
    }
}

//! Wire protocol between the runner and the device: newline-terminated ASCII
//! lines of the form `pin:value`. Acknowledgements coming back are free-form
//! text and are only ever displayed, never parsed for correlation.

use super::widget::{Widget, WidgetKind};

/// A user gesture on a live widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interaction {
    Pressed,
    SliderChanged(i64),
}

pub fn encode(pin: &str, value: impl std::fmt::Display) -> String {
    format!("{pin}:{value}\n")
}

/// Maps an interaction on a widget to the outbound wire line.
///
/// Only buttons and sliders transmit, and a widget with an empty pin is inert
/// regardless of interaction.
pub fn interaction_line(widget: &Widget, interaction: Interaction) -> Option<String> {
    let pin = widget.props.pin.as_str();
    if pin.is_empty() {
        return None;
    }

    match (widget.kind, interaction) {
        (WidgetKind::Button, Interaction::Pressed) => Some(encode(pin, 1)),
        (WidgetKind::Slider, Interaction::SliderChanged(value)) => Some(encode(pin, value)),
        _ => None,
    }
}

/// Splits an inbound `pin:value` line. Lines that do not match the shape
/// yield `None` and stay display-only.
pub fn parse_line(line: &str) -> Option<(&str, &str)> {
    let line = line.trim_end_matches(['\r', '\n']);
    let (pin, value) = line.split_once(':')?;
    if pin.is_empty() {
        return None;
    }
    Some((pin, value))
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/protocol.rs"]
mod tests;

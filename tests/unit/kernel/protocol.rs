use super::*;
use crate::kernel::widget::{Position, Widget};

fn widget_with_pin(kind: WidgetKind, pin: &str) -> Widget {
    let mut widget = Widget::new(kind, Position::new(0, 0));
    widget.props.pin = pin.to_string();
    widget
}

#[test]
fn button_press_encodes_pin_and_one() {
    let widget = widget_with_pin(WidgetKind::Button, "13");
    assert_eq!(
        interaction_line(&widget, Interaction::Pressed),
        Some("13:1\n".to_string())
    );
}

#[test]
fn slider_change_encodes_numeric_value() {
    let widget = widget_with_pin(WidgetKind::Slider, "6");
    assert_eq!(
        interaction_line(&widget, Interaction::SliderChanged(128)),
        Some("6:128\n".to_string())
    );
}

#[test]
fn empty_pin_never_transmits() {
    let button = widget_with_pin(WidgetKind::Button, "");
    let slider = widget_with_pin(WidgetKind::Slider, "");
    assert_eq!(interaction_line(&button, Interaction::Pressed), None);
    assert_eq!(interaction_line(&slider, Interaction::SliderChanged(1)), None);
}

#[test]
fn receive_only_widgets_never_transmit() {
    let label = widget_with_pin(WidgetKind::Label, "5");
    let led = widget_with_pin(WidgetKind::Led, "5");
    assert_eq!(interaction_line(&label, Interaction::Pressed), None);
    assert_eq!(interaction_line(&led, Interaction::SliderChanged(9)), None);
}

#[test]
fn mismatched_interactions_are_ignored() {
    let button = widget_with_pin(WidgetKind::Button, "13");
    let slider = widget_with_pin(WidgetKind::Slider, "6");
    assert_eq!(interaction_line(&button, Interaction::SliderChanged(3)), None);
    assert_eq!(interaction_line(&slider, Interaction::Pressed), None);
}

#[test]
fn free_form_pins_pass_through_verbatim() {
    let widget = widget_with_pin(WidgetKind::Button, "A0");
    assert_eq!(
        interaction_line(&widget, Interaction::Pressed),
        Some("A0:1\n".to_string())
    );
}

#[test]
fn parse_line_splits_pin_and_value() {
    assert_eq!(parse_line("7:1"), Some(("7", "1")));
    assert_eq!(parse_line("A0:128\r"), Some(("A0", "128")));
    assert_eq!(parse_line("ack:ok:extra"), Some(("ack", "ok:extra")));
}

#[test]
fn parse_line_rejects_shapeless_input() {
    assert_eq!(parse_line("hello"), None);
    assert_eq!(parse_line(":5"), None);
    assert_eq!(parse_line(""), None);
}

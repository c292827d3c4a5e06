use super::*;

fn button_at_origin() -> Widget {
    Widget::new(WidgetKind::Button, Position::new(0, 0))
}

#[test]
fn patch_overwrites_only_given_fields() {
    let mut widget = button_at_origin();
    widget.props.pin = "13".to_string();

    let changed = WidgetPatch::label("Fan").apply(&mut widget.props);
    assert!(changed);
    assert_eq!(widget.props.label, "Fan");
    assert_eq!(widget.props.pin, "13");
    assert_eq!(widget.props.value, "0");
}

#[test]
fn patch_last_write_wins_per_field() {
    let mut widget = button_at_origin();
    WidgetPatch::pin("7").apply(&mut widget.props);
    WidgetPatch::pin("A0").apply(&mut widget.props);
    WidgetPatch::value("1").apply(&mut widget.props);
    assert_eq!(widget.props.pin, "A0");
    assert_eq!(widget.props.value, "1");
}

#[test]
fn patch_clears_optional_fields() {
    let mut widget = Widget::new(WidgetKind::Slider, Position::new(0, 0));
    WidgetPatch::min(Some(10)).apply(&mut widget.props);
    WidgetPatch::max(Some(90)).apply(&mut widget.props);
    assert_eq!(widget.slider_bounds(), (10, 90));

    WidgetPatch::min(None).apply(&mut widget.props);
    WidgetPatch::max(None).apply(&mut widget.props);
    assert_eq!(widget.slider_bounds(), (0, 255));
}

#[test]
fn patch_without_changes_reports_unchanged() {
    let mut widget = button_at_origin();
    let label = widget.props.label.clone();
    assert!(!WidgetPatch::label(label).apply(&mut widget.props));
}

#[test]
fn slider_bounds_default_to_0_255() {
    let widget = Widget::new(WidgetKind::Slider, Position::new(0, 0));
    assert_eq!(widget.slider_bounds(), (0, 255));
}

#[test]
fn inverted_slider_bounds_collapse() {
    let mut widget = Widget::new(WidgetKind::Slider, Position::new(0, 0));
    widget.props.min = Some(100);
    widget.props.max = Some(10);
    assert_eq!(widget.slider_bounds(), (100, 100));
}

#[test]
fn slider_value_parses_and_clamps() {
    let mut widget = Widget::new(WidgetKind::Slider, Position::new(0, 0));
    widget.props.value = "300".to_string();
    assert_eq!(widget.slider_value(), 255);
    widget.props.value = "not a number".to_string();
    assert_eq!(widget.slider_value(), 0);
}

#[test]
fn led_truthiness_is_the_literal_one() {
    assert!(value_is_on("1"));
    assert!(value_is_on(" 1 "));
    assert!(!value_is_on("0"));
    assert!(!value_is_on("on"));
    assert!(!value_is_on(""));
}

#[test]
fn send_strategy_parses_known_names() {
    assert_eq!(SendStrategy::parse("onRelease"), Some(SendStrategy::OnRelease));
    assert_eq!(SendStrategy::parse("ONCHANGE"), Some(SendStrategy::OnChange));
    assert_eq!(SendStrategy::parse("press"), Some(SendStrategy::OnPress));
    assert_eq!(SendStrategy::parse("sometimes"), None);
}

#[test]
fn widget_serde_round_trips_with_camel_case_props() {
    let mut widget = Widget::new(WidgetKind::Slider, Position::new(3, 4));
    widget.props.send_strategy = Some(SendStrategy::OnRelease);
    widget.props.min = Some(5);

    let json = serde_json::to_string(&widget).unwrap();
    assert!(json.contains("\"type\":\"slider\""));
    assert!(json.contains("\"sendStrategy\":\"onRelease\""));

    let back: Widget = serde_json::from_str(&json).unwrap();
    assert_eq!(back, widget);
}

#[test]
fn unrecognized_kind_deserializes_to_placeholder() {
    let json = r#"{
        "id": "6a1bb0f8-9c5f-4a0e-8d55-111111111111",
        "type": "dial",
        "position": { "x": 1, "y": 2 },
        "properties": { "label": "Dial", "pin": "9", "value": "0" }
    }"#;
    let widget: Widget = serde_json::from_str(json).unwrap();
    assert_eq!(widget.kind, WidgetKind::Unknown);
    assert_eq!(widget.props.pin, "9");
}

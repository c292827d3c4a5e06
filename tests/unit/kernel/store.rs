use super::*;
use crate::kernel::project::Project;
use crate::kernel::services::ports::StoreBlob;
use crate::kernel::state::DragState;
use crate::kernel::widget::WidgetProps;

fn project_with(widgets: Vec<Widget>) -> Project {
    let mut project = Project::new("demo");
    project.widgets = widgets;
    project
}

fn store_for(project: Project) -> Store {
    let blob = StoreBlob {
        current_project: Some(project.clone()),
        saved_projects: vec![project],
    };
    Store::new(AppState::new(blob))
}

fn widget(kind: WidgetKind, pin: &str) -> Widget {
    let mut widget = Widget::new(kind, Position::new(2, 2));
    widget.props.pin = pin.to_string();
    widget
}

fn connect(store: &mut Store) {
    store.dispatch(Action::Serial(SerialEvent::Opened {
        port: "/dev/ttyUSB0".to_string(),
    }));
    assert_eq!(store.state().runner.link, LinkState::Connected);
}

#[test]
fn connect_requested_lists_ports_and_rejects_reentry() {
    let mut store = store_for(project_with(Vec::new()));

    let result = store.dispatch(Action::ConnectRequested);
    assert_eq!(result.effects, vec![Effect::ListPorts]);
    assert_eq!(store.state().runner.link, LinkState::Connecting);

    // A second connect while not Disconnected must never reach the adapter.
    let result = store.dispatch(Action::ConnectRequested);
    assert!(result.effects.is_empty());

    connect(&mut store);
    let result = store.dispatch(Action::ConnectRequested);
    assert!(result.effects.is_empty());
}

#[test]
fn cancelled_port_picker_returns_to_disconnected_silently() {
    let mut store = store_for(project_with(Vec::new()));
    store.dispatch(Action::ConnectRequested);
    store.dispatch(Action::PortsListed {
        ports: vec!["/dev/ttyUSB0".to_string()],
    });
    assert!(store.state().port_picker.visible);

    store.dispatch(Action::PortPickerCancel);
    assert!(!store.state().port_picker.visible);
    assert_eq!(store.state().runner.link, LinkState::Disconnected);
    assert!(store.state().notice.is_none());
}

#[test]
fn port_picker_confirm_connects_at_default_baud() {
    let mut store = store_for(project_with(Vec::new()));
    store.dispatch(Action::ConnectRequested);
    store.dispatch(Action::PortsListed {
        ports: vec!["/dev/ttyACM0".to_string(), "/dev/ttyUSB1".to_string()],
    });
    store.dispatch(Action::PortPickerMove { delta: 1 });

    let result = store.dispatch(Action::PortPickerConfirm);
    assert_eq!(
        result.effects,
        vec![Effect::SerialConnect {
            port: "/dev/ttyUSB1".to_string(),
            baud: 9600,
        }]
    );
}

#[test]
fn open_failure_surfaces_notice_and_disconnects() {
    let mut store = store_for(project_with(Vec::new()));
    store.dispatch(Action::ConnectRequested);
    store.dispatch(Action::SerialOpenFailed {
        message: "failed to open /dev/ttyUSB0: busy".to_string(),
    });
    assert_eq!(store.state().runner.link, LinkState::Disconnected);
    assert!(store.state().notice.as_deref().unwrap().contains("busy"));
}

#[test]
fn read_fault_forces_link_to_disconnected() {
    let mut store = store_for(project_with(Vec::new()));
    connect(&mut store);

    store.dispatch(Action::Serial(SerialEvent::Fault {
        message: "serial read failed: io".to_string(),
    }));
    assert_eq!(store.state().runner.link, LinkState::Disconnected);
    assert!(store.state().notice.is_some());
}

#[test]
fn inbound_lines_land_in_monitor_and_route_to_matching_leds() {
    let led_7 = widget(WidgetKind::Led, "7");
    let led_8 = widget(WidgetKind::Led, "8");
    let label_7 = widget(WidgetKind::Label, "7");
    let (led_7_id, led_8_id, label_7_id) = (led_7.id, led_8.id, label_7.id);
    let mut store = store_for(project_with(vec![led_7, led_8, label_7]));
    connect(&mut store);

    store.dispatch(Action::Serial(SerialEvent::Line("7:1".to_string())));

    let runner = &store.state().runner;
    assert_eq!(runner.monitor.back().map(String::as_str), Some("7:1"));
    assert_eq!(runner.last_line.as_deref(), Some("7:1"));
    assert_eq!(runner.live.get(&led_7_id).map(String::as_str), Some("1"));
    assert!(runner.live.get(&led_8_id).is_none());
    // Labels are display-only; inbound routing targets LEDs.
    assert!(runner.live.get(&label_7_id).is_none());
}

#[test]
fn non_protocol_lines_stay_display_only() {
    let led = widget(WidgetKind::Led, "7");
    let led_id = led.id;
    let mut store = store_for(project_with(vec![led]));
    connect(&mut store);

    store.dispatch(Action::Serial(SerialEvent::Line("hello there".to_string())));
    assert_eq!(
        store.state().runner.monitor.back().map(String::as_str),
        Some("hello there")
    );
    assert!(store.state().runner.live.get(&led_id).is_none());
}

#[test]
fn button_press_emits_exactly_the_wire_line() {
    let button = widget(WidgetKind::Button, "13");
    let button_id = button.id;
    let mut store = store_for(project_with(vec![button]));
    connect(&mut store);

    let result = store.dispatch(Action::RunnerPress {
        id: Some(button_id),
    });
    assert_eq!(
        result.effects,
        vec![Effect::SerialSend {
            line: "13:1\n".to_string()
        }]
    );
}

#[test]
fn press_without_connection_is_a_noop() {
    let button = widget(WidgetKind::Button, "13");
    let button_id = button.id;
    let mut store = store_for(project_with(vec![button]));

    let result = store.dispatch(Action::RunnerPress {
        id: Some(button_id),
    });
    assert!(result.effects.is_empty());
}

#[test]
fn empty_pin_widget_never_transmits() {
    let button = widget(WidgetKind::Button, "");
    let button_id = button.id;
    let mut store = store_for(project_with(vec![button]));
    connect(&mut store);

    let result = store.dispatch(Action::RunnerPress {
        id: Some(button_id),
    });
    assert!(result.effects.is_empty());
}

#[test]
fn slider_on_change_sends_every_step() {
    let mut slider = widget(WidgetKind::Slider, "6");
    slider.props.value = "127".to_string();
    let mut store = store_for(project_with(vec![slider]));
    connect(&mut store);
    store.dispatch(Action::RunnerFocusNext);

    let result = store.dispatch(Action::RunnerAdjust { delta: 1 });
    assert_eq!(
        result.effects,
        vec![Effect::SerialSend {
            line: "6:128\n".to_string()
        }]
    );

    let result = store.dispatch(Action::RunnerAdjust { delta: 10 });
    assert_eq!(
        result.effects,
        vec![Effect::SerialSend {
            line: "6:138\n".to_string()
        }]
    );
}

#[test]
fn slider_on_release_defers_until_commit() {
    let mut slider = widget(WidgetKind::Slider, "6");
    slider.props.value = "10".to_string();
    slider.props.send_strategy = Some(SendStrategy::OnRelease);
    let slider_id = slider.id;
    let mut store = store_for(project_with(vec![slider]));
    connect(&mut store);
    store.dispatch(Action::RunnerFocusNext);

    assert!(store.dispatch(Action::RunnerAdjust { delta: 1 }).effects.is_empty());
    assert!(store.dispatch(Action::RunnerAdjust { delta: 1 }).effects.is_empty());
    assert_eq!(store.state().runner.pending_send, Some((slider_id, 12)));

    let result = store.dispatch(Action::RunnerCommit);
    assert_eq!(
        result.effects,
        vec![Effect::SerialSend {
            line: "6:12\n".to_string()
        }]
    );
    assert!(store.state().runner.pending_send.is_none());

    // Nothing left to flush.
    assert!(store.dispatch(Action::RunnerCommit).effects.is_empty());
}

#[test]
fn slider_clamps_to_bounds() {
    let mut slider = widget(WidgetKind::Slider, "6");
    slider.props.value = "255".to_string();
    let mut store = store_for(project_with(vec![slider]));
    connect(&mut store);
    store.dispatch(Action::RunnerFocusNext);

    let result = store.dispatch(Action::RunnerAdjust { delta: 5 });
    assert!(result.effects.is_empty());
}

#[test]
fn focus_cycles_only_interactive_widgets() {
    let button = widget(WidgetKind::Button, "1");
    let label = widget(WidgetKind::Label, "");
    let slider = widget(WidgetKind::Slider, "2");
    let (button_id, slider_id) = (button.id, slider.id);
    let mut store = store_for(project_with(vec![button, label, slider]));

    store.dispatch(Action::RunnerFocusNext);
    assert_eq!(store.state().runner.focus, Some(button_id));
    store.dispatch(Action::RunnerFocusNext);
    assert_eq!(store.state().runner.focus, Some(slider_id));
    store.dispatch(Action::RunnerFocusNext);
    assert_eq!(store.state().runner.focus, Some(button_id));
    store.dispatch(Action::RunnerFocusPrev);
    assert_eq!(store.state().runner.focus, Some(slider_id));
}

#[test]
fn opening_unknown_project_redirects_home() {
    let mut store = store_for(project_with(Vec::new()));
    store.dispatch(Action::OpenBuilder {
        id: uuid::Uuid::new_v4(),
    });
    assert_eq!(store.state().screen, Screen::Home);
    assert!(store.state().projects.current().is_none());
    assert_eq!(store.state().notice.as_deref(), Some("project not found"));
}

#[test]
fn opening_runner_focuses_first_interactive_widget() {
    let label = widget(WidgetKind::Label, "");
    let slider = widget(WidgetKind::Slider, "6");
    let slider_id = slider.id;
    let project = project_with(vec![label, slider]);
    let id = project.id;
    let mut store = store_for(project);

    let result = store.dispatch(Action::OpenRunner { id });
    assert_eq!(store.state().screen, Screen::Runner);
    assert_eq!(store.state().runner.focus, Some(slider_id));
    assert!(result.effects.contains(&Effect::SerialDisconnect));
}

#[test]
fn delete_flow_requires_confirmation() {
    let project = project_with(Vec::new());
    let id = project.id;
    let mut store = store_for(project);

    store.dispatch(Action::HomeDeleteSelected);
    assert!(store.state().confirm_dialog.visible);
    assert_eq!(store.state().projects.saved().len(), 1);

    let result = store.dispatch(Action::ConfirmAccept);
    assert!(store.state().projects.saved().is_empty());
    assert!(store.state().projects.current().is_none());
    assert_eq!(result.effects, vec![Effect::PersistStore]);
    let _ = id;
}

#[test]
fn confirm_cancel_keeps_the_project() {
    let mut store = store_for(project_with(Vec::new()));
    store.dispatch(Action::HomeDeleteSelected);
    store.dispatch(Action::ConfirmCancel);
    assert!(!store.state().confirm_dialog.visible);
    assert_eq!(store.state().projects.saved().len(), 1);
}

#[test]
fn new_project_dialog_rejects_empty_names() {
    let mut store = Store::new(AppState::new(StoreBlob::default()));
    store.dispatch(Action::HomeCreateProject);
    assert!(store.state().input_dialog.visible);

    // Wipe the prefilled name.
    while store.state().input_dialog.cursor > 0 {
        store.dispatch(Action::DialogBackspace);
    }
    store.dispatch(Action::DialogConfirm);
    assert!(store.state().input_dialog.visible);
    assert!(store.state().input_dialog.error.is_some());

    store.dispatch(Action::DialogInput('x'));
    let result = store.dispatch(Action::DialogConfirm);
    assert!(!store.state().input_dialog.visible);
    assert_eq!(store.state().screen, Screen::Builder);
    assert_eq!(store.state().projects.current().map(|p| p.name.as_str()), Some("x"));
    assert_eq!(result.effects, vec![Effect::PersistStore]);
}

#[test]
fn property_edit_dialog_patches_the_widget() {
    let slider = widget(WidgetKind::Slider, "6");
    let slider_id = slider.id;
    let mut store = store_for(project_with(vec![slider]));

    store.dispatch(Action::BuilderSelect {
        id: Some(slider_id),
    });
    // Field 1 is the pin.
    store.dispatch(Action::PropsMoveSelection { delta: 1 });
    store.dispatch(Action::PropsEditSelected);
    assert_eq!(store.state().input_dialog.value, "6");

    store.dispatch(Action::DialogBackspace);
    store.dispatch(Action::DialogInput('A'));
    store.dispatch(Action::DialogInput('0'));
    let result = store.dispatch(Action::DialogConfirm);

    let props: &WidgetProps = &store
        .state()
        .projects
        .current()
        .unwrap()
        .widget(slider_id)
        .unwrap()
        .props;
    assert_eq!(props.pin, "A0");
    assert_eq!(result.effects, vec![Effect::PersistStore]);
}

#[test]
fn property_edit_rejects_bad_numbers() {
    let slider = widget(WidgetKind::Slider, "6");
    let slider_id = slider.id;
    let mut store = store_for(project_with(vec![slider]));

    store.dispatch(Action::BuilderSelect {
        id: Some(slider_id),
    });
    store.dispatch(Action::PropsMoveSelection { delta: 3 }); // min
    store.dispatch(Action::PropsEditSelected);
    store.dispatch(Action::DialogInput('x'));
    store.dispatch(Action::DialogConfirm);

    assert!(store.state().input_dialog.visible);
    assert!(store.state().input_dialog.error.is_some());
}

#[test]
fn drag_commits_clamped_position_on_release() {
    let button = widget(WidgetKind::Button, "13");
    let button_id = button.id;
    let mut store = store_for(project_with(vec![button]));

    store.dispatch(Action::DragStart {
        id: button_id,
        grab_dx: 1,
        grab_dy: 0,
        at: Position::new(3, 2),
    });
    store.dispatch(Action::DragMove {
        at: Position::new(60, 40),
    });
    assert_eq!(
        store.state().builder.drag,
        Some(DragState {
            id: button_id,
            grab_dx: 1,
            grab_dy: 0,
            at: Position::new(60, 40),
        })
    );

    let result = store.dispatch(Action::DragEnd {
        max: Position::new(30, 20),
    });
    assert!(store.state().builder.drag.is_none());
    let position = store
        .state()
        .projects
        .current()
        .unwrap()
        .widget(button_id)
        .unwrap()
        .position;
    assert_eq!(position, Position::new(30, 20));
    assert_eq!(result.effects, vec![Effect::PersistStore]);
}

#[test]
fn save_project_propagates_current_into_saved() {
    let project = project_with(Vec::new());
    let id = project.id;
    let mut store = store_for(project);

    store.dispatch(Action::BuilderAddWidget {
        kind: WidgetKind::Led,
    });
    assert!(store
        .state()
        .projects
        .saved_project(id)
        .unwrap()
        .widgets
        .is_empty());

    let result = store.dispatch(Action::SaveProject);
    assert_eq!(
        store
            .state()
            .projects
            .saved_project(id)
            .unwrap()
            .widgets
            .len(),
        1
    );
    assert_eq!(result.effects, vec![Effect::PersistStore]);
}

#[test]
fn disconnect_requested_always_reaches_the_adapter() {
    let mut store = store_for(project_with(Vec::new()));
    // Idempotent at the adapter; the reducer just forwards.
    let result = store.dispatch(Action::DisconnectRequested);
    assert_eq!(result.effects, vec![Effect::SerialDisconnect]);
    assert_eq!(store.state().runner.link, LinkState::Disconnected);

    let result = store.dispatch(Action::DisconnectRequested);
    assert_eq!(result.effects, vec![Effect::SerialDisconnect]);
    assert_eq!(store.state().runner.link, LinkState::Disconnected);
}

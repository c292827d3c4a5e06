use super::*;

#[test]
fn monitor_retains_exactly_the_last_20_lines_in_order() {
    let mut runner = RunnerState::default();
    for i in 0..25 {
        runner.push_line(format!("line{i}"));
    }

    assert_eq!(runner.monitor.len(), MONITOR_CAP);
    assert_eq!(runner.monitor.front().map(String::as_str), Some("line5"));
    assert_eq!(runner.monitor.back().map(String::as_str), Some("line24"));
    assert_eq!(runner.last_line.as_deref(), Some("line24"));

    let expected: Vec<String> = (5..25).map(|i| format!("line{i}")).collect();
    let got: Vec<String> = runner.monitor.iter().cloned().collect();
    assert_eq!(got, expected);
}

#[test]
fn reset_session_clears_runtime_state_only() {
    let mut runner = RunnerState::default();
    runner.link = LinkState::Connected;
    runner.push_line("7:1".to_string());
    runner.live.insert(uuid::Uuid::new_v4(), "1".to_string());
    runner.pending_send = Some((uuid::Uuid::new_v4(), 9));

    runner.reset_session();
    assert_eq!(runner.link, LinkState::Disconnected);
    assert!(runner.monitor.is_empty());
    assert!(runner.last_line.is_none());
    assert!(runner.live.is_empty());
    assert!(runner.pending_send.is_none());
}

#[test]
fn home_selection_moves_and_clamps() {
    let mut home = HomeState::default();
    assert!(!home.move_selection(1, 0));
    assert!(home.move_selection(10, 3));
    assert_eq!(home.selected, 2);
    assert!(home.move_selection(-10, 3));
    assert_eq!(home.selected, 0);

    home.selected = 5;
    home.clamp_selection(2);
    assert_eq!(home.selected, 1);
}

#[test]
fn input_dialog_opens_with_cursor_at_end() {
    let mut dialog = InputDialogState::default();
    dialog.open("Rename", "héllo", InputDialogKind::NewProject);
    assert!(dialog.visible);
    assert_eq!(dialog.cursor, 5);
    assert!(dialog.error.is_none());

    dialog.reset();
    assert!(!dialog.visible);
    assert!(dialog.value.is_empty());
}

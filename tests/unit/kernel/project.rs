use super::*;
use crate::kernel::widget::{Widget, WidgetKind, WidgetPatch};
use uuid::Uuid;

fn widget(kind: WidgetKind) -> Widget {
    Widget::new(kind, Position::new(4, 2))
}

#[test]
fn create_project_appends_and_becomes_current() {
    let mut store = ProjectStore::default();
    let id = store.create_project("demo");

    assert_eq!(store.saved().len(), 1);
    assert_eq!(store.current().map(|p| p.id), Some(id));
    assert_eq!(store.current().map(|p| p.name.as_str()), Some("demo"));
    assert!(store.current().unwrap().widgets.is_empty());
}

#[test]
fn edits_do_not_reach_saved_entry_before_save() {
    let mut store = ProjectStore::default();
    let id = store.create_project("demo");

    store.add_widget(widget(WidgetKind::Button));
    assert_eq!(store.current().unwrap().widgets.len(), 1);
    assert!(store.saved_project(id).unwrap().widgets.is_empty());

    assert!(store.save_project());
    assert_eq!(store.saved_project(id).unwrap().widgets.len(), 1);
    assert_eq!(store.saved_project(id), store.current());
}

#[test]
fn save_stamps_strictly_increasing_last_modified() {
    let mut store = ProjectStore::default();
    let id = store.create_project("demo");
    let created = store.saved_project(id).unwrap().last_modified;

    store.save_project();
    let first = store.saved_project(id).unwrap().last_modified;
    store.save_project();
    let second = store.saved_project(id).unwrap().last_modified;

    assert!(first > created);
    assert!(second > first);
}

#[test]
fn load_project_makes_an_independent_copy() {
    let mut store = ProjectStore::default();
    let id = store.create_project("demo");
    store.add_widget(widget(WidgetKind::Slider));
    store.save_project();

    assert!(store.load_project(id));
    let widget_id = store.current().unwrap().widgets[0].id;
    store.update_widget(widget_id, &WidgetPatch::pin("A0"));

    assert_eq!(store.current().unwrap().widgets[0].props.pin, "A0");
    assert_eq!(store.saved_project(id).unwrap().widgets[0].props.pin, "13");
}

#[test]
fn load_unknown_project_clears_current() {
    let mut store = ProjectStore::default();
    store.create_project("demo");

    assert!(!store.load_project(Uuid::new_v4()));
    assert!(store.current().is_none());
}

#[test]
fn delete_current_project_clears_current() {
    let mut store = ProjectStore::default();
    let id = store.create_project("demo");

    assert!(store.delete_project(id));
    assert!(store.current().is_none());
    assert!(store.saved().is_empty());
}

#[test]
fn delete_other_project_keeps_current() {
    let mut store = ProjectStore::default();
    let first = store.create_project("first");
    let second = store.create_project("second");

    assert!(store.delete_project(first));
    assert_eq!(store.current().map(|p| p.id), Some(second));
    assert_eq!(store.saved().len(), 1);
}

#[test]
fn widget_sequence_survives_mixed_operations_in_order() {
    let mut store = ProjectStore::default();
    store.create_project("demo");

    let a = widget(WidgetKind::Button);
    let b = widget(WidgetKind::Slider);
    let c = widget(WidgetKind::Led);
    let (a_id, b_id, c_id) = (a.id, b.id, c.id);
    store.add_widget(a);
    store.add_widget(b);
    store.add_widget(c);

    store.update_widget(b_id, &WidgetPatch::label("Brightness"));
    store.update_widget(b_id, &WidgetPatch::pin("6"));
    store.remove_widget(a_id);

    let widgets = &store.current().unwrap().widgets;
    assert_eq!(
        widgets.iter().map(|w| w.id).collect::<Vec<_>>(),
        vec![b_id, c_id]
    );
    assert_eq!(widgets[0].props.label, "Brightness");
    assert_eq!(widgets[0].props.pin, "6");
}

#[test]
fn update_widget_position_moves_only_the_target() {
    let mut store = ProjectStore::default();
    store.create_project("demo");
    let a = widget(WidgetKind::Button);
    let b = widget(WidgetKind::Label);
    let (a_id, b_id) = (a.id, b.id);
    store.add_widget(a);
    store.add_widget(b);

    assert!(store.update_widget_position(a_id, Position::new(20, 10)));
    let widgets = &store.current().unwrap().widgets;
    assert_eq!(widgets[0].position, Position::new(20, 10));
    assert_eq!(widgets[1].position, Position::new(4, 2));
    let _ = b_id;
}

#[test]
fn widget_operations_without_current_are_noops() {
    let mut store = ProjectStore::default();
    assert!(!store.add_widget(widget(WidgetKind::Button)));
    assert!(!store.update_widget(Uuid::new_v4(), &WidgetPatch::pin("1")));
    assert!(!store.remove_widget(Uuid::new_v4()));
    assert!(!store.update_widget_position(Uuid::new_v4(), Position::new(0, 0)));
    assert!(!store.save_project());
}

#[test]
fn rename_project_updates_saved_and_current() {
    let mut store = ProjectStore::default();
    let id = store.create_project("old");
    let before = store.saved_project(id).unwrap().last_modified;

    assert!(store.rename_project(id, "new"));
    assert_eq!(store.saved_project(id).unwrap().name, "new");
    assert_eq!(store.current().unwrap().name, "new");
    assert!(store.saved_project(id).unwrap().last_modified > before);
}

#[test]
fn default_project_name_carries_a_date() {
    let name = default_project_name();
    assert!(name.starts_with("Project "));
}

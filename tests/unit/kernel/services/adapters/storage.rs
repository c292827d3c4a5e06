use super::*;
use crate::kernel::project::Project;
use crate::kernel::widget::{Position, Widget, WidgetKind};

fn sample_blob() -> StoreBlob {
    let mut project = Project::new("demo");
    let mut widget = Widget::new(WidgetKind::Slider, Position::new(4, 2));
    widget.props.pin = "6".to_string();
    widget.props.min = Some(10);
    project.widgets.push(widget);

    StoreBlob {
        current_project: Some(project.clone()),
        saved_projects: vec![project],
    }
}

#[test]
fn blob_round_trips_through_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("projects.json");
    let blob = sample_blob();

    save_blob_to(&path, &blob).unwrap();
    let loaded = load_blob_from(&path).unwrap();

    assert_eq!(loaded.current_project, blob.current_project);
    assert_eq!(loaded.saved_projects, blob.saved_projects);
}

#[test]
fn save_creates_missing_parent_directories() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("deeper").join("projects.json");

    save_blob_to(&path, &sample_blob()).unwrap();
    assert!(path.exists());
    assert!(load_blob_from(&path).is_some());
}

#[test]
fn save_does_not_leave_the_temp_file_behind() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("projects.json");

    save_blob_to(&path, &sample_blob()).unwrap();
    assert!(!path.with_extension("json.tmp").exists());
}

#[test]
fn missing_blob_loads_as_none() {
    let dir = tempfile::tempdir().unwrap();
    assert!(load_blob_from(&dir.path().join("projects.json")).is_none());
}

#[test]
fn corrupt_blob_loads_as_none_instead_of_failing() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("projects.json");
    std::fs::write(&path, "{ not json").unwrap();
    assert!(load_blob_from(&path).is_none());
}

#[test]
fn unknown_widget_kind_in_blob_does_not_poison_the_load() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("projects.json");
    let json = r#"{
        "currentProject": null,
        "savedProjects": [{
            "id": "6a1bb0f8-9c5f-4a0e-8d55-222222222222",
            "name": "legacy",
            "createdAt": 1700000000000,
            "lastModified": 1700000000000,
            "widgets": [{
                "id": "6a1bb0f8-9c5f-4a0e-8d55-333333333333",
                "type": "knob",
                "position": { "x": 0, "y": 0 },
                "properties": { "label": "Knob", "pin": "3", "value": "0" }
            }]
        }]
    }"#;
    std::fs::write(&path, json).unwrap();

    let blob = load_blob_from(&path).unwrap();
    assert_eq!(blob.saved_projects.len(), 1);
    assert_eq!(blob.saved_projects[0].widgets[0].kind, WidgetKind::Unknown);
}

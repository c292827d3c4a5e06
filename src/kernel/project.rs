use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::widget::{Position, Widget, WidgetPatch};

/// A named, persisted collection of widgets; the unit of save/load.
/// `widgets` order is z-order: later entries render and hit-test on top.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: Uuid,
    pub name: String,
    pub created_at: i64,
    pub last_modified: i64,
    pub widgets: Vec<Widget>,
}

impl Project {
    pub fn new(name: impl Into<String>) -> Self {
        let now = now_ms();
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            created_at: now,
            last_modified: now,
            widgets: Vec::new(),
        }
    }

    pub fn widget(&self, id: Uuid) -> Option<&Widget> {
        self.widgets.iter().find(|w| w.id == id)
    }
}

pub fn now_ms() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Name a freshly created project gets, derived from the current date/time.
pub fn default_project_name() -> String {
    format!("Project {}", chrono::Local::now().format("%Y-%m-%d %H:%M"))
}

/// Owned container for all project state. One project at most is "current"
/// (being edited or run); the current project is a deep copy of its saved
/// entry, so edits never reach the saved collection before an explicit
/// [`ProjectStore::save_project`].
///
/// Widget operations act on the current project only and are silent no-ops
/// without one; resilience is preferred over strictness at this layer.
#[derive(Debug, Default)]
pub struct ProjectStore {
    current: Option<Project>,
    saved: Vec<Project>,
}

impl ProjectStore {
    pub fn new(current: Option<Project>, saved: Vec<Project>) -> Self {
        Self { current, saved }
    }

    pub fn current(&self) -> Option<&Project> {
        self.current.as_ref()
    }

    pub fn saved(&self) -> &[Project] {
        &self.saved
    }

    pub fn saved_project(&self, id: Uuid) -> Option<&Project> {
        self.saved.iter().find(|p| p.id == id)
    }

    /// Creates a project, appends it to the saved collection and makes it
    /// current. Returns the new id.
    pub fn create_project(&mut self, name: impl Into<String>) -> Uuid {
        let project = Project::new(name);
        let id = project.id;
        self.saved.push(project.clone());
        self.current = Some(project);
        id
    }

    /// Loads a saved project into the current slot as an independent deep
    /// copy. When the id is unknown the current slot is cleared and `false`
    /// is returned; callers redirect, this is never an error.
    pub fn load_project(&mut self, id: Uuid) -> bool {
        match self.saved.iter().find(|p| p.id == id) {
            Some(project) => {
                self.current = Some(project.clone());
                true
            }
            None => {
                self.current = None;
                false
            }
        }
    }

    /// Stamps `last_modified` and writes the current project back over its
    /// saved entry. No-op without a current project. The stamp strictly
    /// increases even when the clock did not advance between saves.
    pub fn save_project(&mut self) -> bool {
        let Some(current) = self.current.as_mut() else {
            return false;
        };

        current.last_modified = now_ms().max(current.last_modified + 1);
        let snapshot = current.clone();
        match self.saved.iter_mut().find(|p| p.id == snapshot.id) {
            Some(entry) => *entry = snapshot,
            // A current project whose saved entry was deleted re-enters the
            // collection on save.
            None => self.saved.push(snapshot),
        }
        true
    }

    /// Removes a project from the saved collection; clears the current slot
    /// iff it held the same id.
    pub fn delete_project(&mut self, id: Uuid) -> bool {
        let before = self.saved.len();
        self.saved.retain(|p| p.id != id);
        if self.current.as_ref().is_some_and(|p| p.id == id) {
            self.current = None;
        }
        self.saved.len() != before
    }

    /// Renames a saved project in place (and the current copy when it is the
    /// same project). Stamps `last_modified` like a save, since this edits
    /// the saved entry directly.
    pub fn rename_project(&mut self, id: Uuid, name: impl Into<String>) -> bool {
        let name = name.into();
        let Some(entry) = self.saved.iter_mut().find(|p| p.id == id) else {
            return false;
        };
        if entry.name == name {
            return false;
        }
        entry.name = name.clone();
        entry.last_modified = now_ms().max(entry.last_modified + 1);
        let stamp = entry.last_modified;
        if let Some(current) = self.current.as_mut() {
            if current.id == id {
                current.name = name;
                current.last_modified = stamp;
            }
        }
        true
    }

    pub fn add_widget(&mut self, widget: Widget) -> bool {
        let Some(current) = self.current.as_mut() else {
            return false;
        };
        current.widgets.push(widget);
        true
    }

    /// Applies a partial properties update to one widget (last write wins per
    /// field). The widget's kind is immutable and not part of the patch.
    pub fn update_widget(&mut self, id: Uuid, patch: &WidgetPatch) -> bool {
        let Some(current) = self.current.as_mut() else {
            return false;
        };
        let Some(widget) = current.widgets.iter_mut().find(|w| w.id == id) else {
            return false;
        };
        patch.apply(&mut widget.props)
    }

    pub fn remove_widget(&mut self, id: Uuid) -> bool {
        let Some(current) = self.current.as_mut() else {
            return false;
        };
        let before = current.widgets.len();
        current.widgets.retain(|w| w.id != id);
        current.widgets.len() != before
    }

    pub fn update_widget_position(&mut self, id: Uuid, position: Position) -> bool {
        let Some(current) = self.current.as_mut() else {
            return false;
        };
        let Some(widget) = current.widgets.iter_mut().find(|w| w.id == id) else {
            return false;
        };
        if widget.position == position {
            return false;
        }
        widget.position = position;
        true
    }
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/project.rs"]
mod tests;

//! Editor windows and the ordered window list

use crate::commands::CommandQueue;
use crate::gizmo::GizmoState;
use crate::layout::DockRegion;
use crate::settings::EditorSettings;
use engine::app::Application;
use engine::graphics::DebugLine;
use engine::prelude::Entity;
use engine::scene::Scene;
use imgui::{Ui, WindowFlags};

/// Stable identity of a window, assigned when it is added to a [`WindowList`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WindowId(u64);

/// State a window may read or change while it draws
pub struct EditorContext<'a> {
    pub app: &'a mut Application,
    pub selection: &'a mut Option<Entity>,
    pub commands: &'a mut CommandQueue,
    pub gizmo: &'a mut GizmoState,
    pub settings: &'a mut EditorSettings,
    /// Lines collected by the last debug-draw pass
    pub debug_lines: &'a [DebugLine],
    /// Entity whose camera the scene view looks through
    pub editor_camera: Option<Entity>,
    /// The window currently drawing
    pub window_id: WindowId,
}

/// A dockable panel
pub trait EditorWindow {
    /// Title shown in the tab, unique per window instance
    fn name(&self) -> String;

    /// Kind of window, shared by every instance of the same type
    fn simple_name(&self) -> &'static str;

    /// Where the window starts in the default layout
    fn default_region(&self) -> DockRegion {
        DockRegion::Middle
    }

    fn flags(&self) -> WindowFlags {
        WindowFlags::empty()
    }

    fn on_imgui(&mut self, ui: &Ui, ctx: &mut EditorContext<'_>);

    fn on_new_scene(&mut self, _scene: &Scene) {}
}

pub struct WindowEntry {
    pub id: WindowId,
    pub active: bool,
    pub window: Box<dyn EditorWindow>,
}

/// Windows in draw order
#[derive(Default)]
pub struct WindowList {
    entries: Vec<WindowEntry>,
    next_id: u64,
}

impl WindowList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, window: Box<dyn EditorWindow>) -> WindowId {
        let id = WindowId(self.next_id);
        self.next_id += 1;
        self.entries.push(WindowEntry {
            id,
            active: true,
            window,
        });
        id
    }

    /// Remove a window; unknown ids are ignored
    pub fn remove(&mut self, id: WindowId) -> bool {
        match self.entries.iter().position(|entry| entry.id == id) {
            Some(index) => {
                self.entries.remove(index);
                true
            }
            None => false,
        }
    }

    /// Remove every window of a kind
    pub fn remove_by_simple_name(&mut self, simple_name: &str) -> usize {
        let before = self.entries.len();
        self.entries
            .retain(|entry| entry.window.simple_name() != simple_name);
        before - self.entries.len()
    }

    pub fn find_by_simple_name(&self, simple_name: &str) -> Option<&WindowEntry> {
        self.entries
            .iter()
            .find(|entry| entry.window.simple_name() == simple_name)
    }

    pub fn count_by_simple_name(&self, simple_name: &str) -> usize {
        self.entries
            .iter()
            .filter(|entry| entry.window.simple_name() == simple_name)
            .count()
    }

    pub fn get_mut(&mut self, id: WindowId) -> Option<&mut WindowEntry> {
        self.entries.iter_mut().find(|entry| entry.id == id)
    }

    pub fn set_active(&mut self, id: WindowId, active: bool) {
        if let Some(entry) = self.get_mut(id) {
            entry.active = active;
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &WindowEntry> {
        self.entries.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut WindowEntry> {
        self.entries.iter_mut()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Dummy(&'static str);

    impl EditorWindow for Dummy {
        fn name(&self) -> String {
            self.0.to_string()
        }

        fn simple_name(&self) -> &'static str {
            self.0
        }

        fn on_imgui(&mut self, _ui: &Ui, _ctx: &mut EditorContext<'_>) {}
    }

    #[test]
    fn test_ids_are_unique_and_stable() {
        let mut list = WindowList::new();
        let a = list.add(Box::new(Dummy("A")));
        let b = list.add(Box::new(Dummy("B")));
        assert_ne!(a, b);

        list.remove(a);
        let c = list.add(Box::new(Dummy("C")));
        assert_ne!(c, a);
        assert_eq!(list.iter().map(|entry| entry.id).collect::<Vec<_>>(), vec![b, c]);
    }

    #[test]
    fn test_remove_is_idempotent() {
        let mut list = WindowList::new();
        let a = list.add(Box::new(Dummy("A")));
        list.add(Box::new(Dummy("B")));

        assert!(list.remove(a));
        assert!(!list.remove(a));
        assert_eq!(list.len(), 1);
        assert_eq!(list.find_by_simple_name("B").map(|entry| entry.active), Some(true));
    }

    #[test]
    fn test_set_active() {
        let mut list = WindowList::new();
        let a = list.add(Box::new(Dummy("A")));
        list.set_active(a, false);
        assert!(!list.iter().next().unwrap().active);
    }
}

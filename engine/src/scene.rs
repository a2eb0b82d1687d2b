//! Scenes and the scene manager
//!
//! A scene is a named [`World`] built by a registered factory. Switching is
//! queued and applied at the start of the next frame so that nothing holding
//! entity handles from the old world runs in the same frame as the new one.

use crate::core::entity::World;
use crate::core::object::GameObject;
use crate::core::time::TimeStep;
use tracing::{info, warn};

/// A populated scene registry
pub struct Scene {
    name: String,
    pub world: World,
    /// Objects whose components live outside the ECS registry
    pub objects: Vec<GameObject>,
}

impl Scene {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            world: World::new(),
            objects: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Fan the update out to every object and its children
    pub fn update_objects(&mut self, time: TimeStep) {
        fn update(object: &mut GameObject, time: TimeStep) {
            object.on_update(time);
            for child in object.children_mut() {
                update(child, time);
            }
        }
        for object in &mut self.objects {
            update(object, time);
        }
    }

    pub fn render_objects(&mut self) {
        fn render(object: &mut GameObject) {
            object.on_render();
            for child in object.children_mut() {
                render(child);
            }
        }
        for object in &mut self.objects {
            render(object);
        }
    }
}

type SceneFactory = Box<dyn Fn(&mut Scene)>;

struct SceneEntry {
    name: String,
    factory: SceneFactory,
}

/// Registered scenes plus the currently loaded one
pub struct SceneManager {
    entries: Vec<SceneEntry>,
    current: Scene,
    current_index: Option<usize>,
    pending: Option<usize>,
}

impl Default for SceneManager {
    fn default() -> Self {
        Self::new()
    }
}

impl SceneManager {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            current: Scene::new("Empty"),
            current_index: None,
            pending: None,
        }
    }

    /// Register a scene that only populates its world
    pub fn register(&mut self, name: impl Into<String>, factory: impl Fn(&mut World) + 'static) {
        self.register_scene(name, move |scene: &mut Scene| factory(&mut scene.world));
    }

    /// Register a scene; the first registered scene is queued as the initial one
    pub fn register_scene(
        &mut self,
        name: impl Into<String>,
        factory: impl Fn(&mut Scene) + 'static,
    ) {
        let name = name.into();
        if let Some(entry) = self.entries.iter_mut().find(|entry| entry.name == name) {
            warn!(scene = %name, "Scene registered twice, replacing factory");
            entry.factory = Box::new(factory);
            return;
        }
        self.entries.push(SceneEntry {
            name,
            factory: Box::new(factory),
        });
        if self.current_index.is_none() && self.pending.is_none() {
            self.pending = Some(0);
        }
    }

    pub fn scene_names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|entry| entry.name.as_str())
    }

    pub fn current(&self) -> &Scene {
        &self.current
    }

    pub fn current_mut(&mut self) -> &mut Scene {
        &mut self.current
    }

    pub fn current_name(&self) -> &str {
        self.current.name()
    }

    /// Queue a switch to the named scene. Returns false for unknown names.
    pub fn switch_scene(&mut self, name: &str) -> bool {
        match self.entries.iter().position(|entry| entry.name == name) {
            Some(index) => {
                self.pending = Some(index);
                true
            }
            None => {
                warn!(scene = name, "Unknown scene requested");
                false
            }
        }
    }

    /// Queue a reload of the current scene
    pub fn reload(&mut self) {
        if let Some(index) = self.current_index {
            self.pending = Some(index);
        }
    }

    pub fn has_pending_switch(&self) -> bool {
        self.pending.is_some()
    }

    /// Build the queued scene, if any. Returns true when the scene changed.
    pub fn apply_pending_switch(&mut self) -> bool {
        let Some(index) = self.pending.take() else {
            return false;
        };
        let Some(entry) = self.entries.get(index) else {
            return false;
        };

        let mut scene = Scene::new(entry.name.clone());
        (entry.factory)(&mut scene);
        info!(
            scene = %entry.name,
            entities = scene.world.len(),
            objects = scene.objects.len(),
            "Scene loaded"
        );

        self.current = scene;
        self.current_index = Some(index);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::entity::{Name, Transform};

    fn manager() -> SceneManager {
        let mut scenes = SceneManager::new();
        scenes.register("One", |world| {
            world.spawn((Name::new("a"), Transform::default()));
        });
        scenes.register("Two", |world| {
            world.spawn((Name::new("b"),));
            world.spawn((Name::new("c"),));
        });
        scenes
    }

    #[test]
    fn test_first_registered_scene_is_queued() {
        let mut scenes = manager();
        assert_eq!(scenes.current_name(), "Empty");
        assert!(scenes.apply_pending_switch());
        assert_eq!(scenes.current_name(), "One");
        assert_eq!(scenes.current().world.len(), 1);
        assert!(!scenes.apply_pending_switch());
    }

    #[test]
    fn test_switch_is_deferred() {
        let mut scenes = manager();
        scenes.apply_pending_switch();

        assert!(scenes.switch_scene("Two"));
        assert_eq!(scenes.current_name(), "One");
        assert!(scenes.apply_pending_switch());
        assert_eq!(scenes.current_name(), "Two");
        assert_eq!(scenes.current().world.len(), 2);
    }

    #[test]
    fn test_unknown_scene() {
        let mut scenes = manager();
        scenes.apply_pending_switch();
        assert!(!scenes.switch_scene("Three"));
        assert!(!scenes.has_pending_switch());
    }

    #[test]
    fn test_reload_rebuilds_world() {
        let mut scenes = manager();
        scenes.apply_pending_switch();
        scenes.current_mut().world.spawn((Name::new("extra"),));
        assert_eq!(scenes.current().world.len(), 2);

        scenes.reload();
        scenes.apply_pending_switch();
        assert_eq!(scenes.current().world.len(), 1);
    }

    #[test]
    fn test_scene_objects_are_built_and_updated() {
        use crate::core::object::ObjectComponent;
        use std::any::Any;

        #[derive(Default)]
        struct Ticks(u32);

        impl ObjectComponent for Ticks {
            fn on_update(&mut self, _time: TimeStep) {
                self.0 += 1;
            }

            fn as_any(&self) -> &dyn Any {
                self
            }

            fn as_any_mut(&mut self) -> &mut dyn Any {
                self
            }
        }

        let mut scenes = SceneManager::new();
        scenes.register_scene("Objects", |scene| {
            let mut parent = GameObject::new("parent");
            let mut child = GameObject::new("child");
            child.add_component(Ticks::default());
            parent.add_component(Ticks::default());
            parent.add_child(child);
            scene.objects.push(parent);
        });
        scenes.apply_pending_switch();

        let scene = scenes.current_mut();
        scene.update_objects(TimeStep::new(0.1, 0.1));
        scene.update_objects(TimeStep::new(0.1, 0.2));
        let parent = &scene.objects[0];
        assert_eq!(parent.get_component::<Ticks>().map(|t| t.0), Some(2));
        assert_eq!(parent.children()[0].get_component::<Ticks>().map(|t| t.0), Some(2));
    }

    #[test]
    fn test_names_in_registration_order() {
        let scenes = manager();
        assert_eq!(scenes.scene_names().collect::<Vec<_>>(), vec!["One", "Two"]);
    }
}

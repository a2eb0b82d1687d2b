//! Type-keyed component container for objects living outside the ECS registry
//!
//! A [`GameObject`] owns at most one component per concrete type. Components
//! are told who owns them and initialised when added, and receive update,
//! render and debug-draw callbacks fanned out by their owner.

use crate::core::time::TimeStep;
use crate::graphics::debug_draw::{DebugDrawFlags, DebugRenderer, COLOR_BOUNDING_RADIUS};
use glam::{Mat4, Vec3};
use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::trace;

static NEXT_OBJECT_ID: AtomicU64 = AtomicU64::new(1);

/// Identity of a [`GameObject`], handed to its components as their owner
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObjectId(u64);

impl ObjectId {
    fn next() -> Self {
        Self(NEXT_OBJECT_ID.fetch_add(1, Ordering::Relaxed))
    }
}

/// Behaviour attached to a [`GameObject`]
pub trait ObjectComponent: Any {
    /// Called once, after the owner has been set
    fn init(&mut self) {}

    fn set_owner(&mut self, _owner: ObjectId) {}

    fn on_update(&mut self, _time: TimeStep) {}

    /// Called after `on_update` when the owner propagates transforms
    fn on_update_transform(&mut self, _parent: Mat4) {}

    fn on_render(&mut self) {}

    fn debug_draw(&self, _flags: DebugDrawFlags, _renderer: &mut DebugRenderer) {}

    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;
}

pub struct GameObject {
    id: ObjectId,
    name: String,
    components: HashMap<TypeId, Box<dyn ObjectComponent>>,
    children: Vec<GameObject>,
    bounding_radius: f32,
    position: Vec3,
    update_transforms: bool,
}

impl Default for GameObject {
    fn default() -> Self {
        Self::new("Unnamed")
    }
}

impl GameObject {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: ObjectId::next(),
            name: name.into(),
            components: HashMap::new(),
            children: Vec::new(),
            bounding_radius: 1.0,
            position: Vec3::ZERO,
            update_transforms: false,
        }
    }

    pub fn id(&self) -> ObjectId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Add a component, replacing and dropping any existing one of the same type.
    ///
    /// The component's owner is set and `init` runs before it is stored.
    pub fn add_component<C: ObjectComponent>(&mut self, mut component: C) {
        component.set_owner(self.id);
        component.init();
        if self
            .components
            .insert(TypeId::of::<C>(), Box::new(component))
            .is_some()
        {
            trace!(
                object = %self.name,
                component = std::any::type_name::<C>(),
                "Replaced existing component"
            );
        }
    }

    pub fn get_component<C: ObjectComponent>(&self) -> Option<&C> {
        self.components
            .get(&TypeId::of::<C>())
            .and_then(|component| component.as_any().downcast_ref::<C>())
    }

    pub fn get_component_mut<C: ObjectComponent>(&mut self) -> Option<&mut C> {
        self.components
            .get_mut(&TypeId::of::<C>())
            .and_then(|component| component.as_any_mut().downcast_mut::<C>())
    }

    pub fn has_component<C: ObjectComponent>(&self) -> bool {
        self.components.contains_key(&TypeId::of::<C>())
    }

    pub fn remove_component<C: ObjectComponent>(&mut self) -> bool {
        self.components.remove(&TypeId::of::<C>()).is_some()
    }

    pub fn component_count(&self) -> usize {
        self.components.len()
    }

    pub fn add_child(&mut self, child: GameObject) {
        self.children.push(child);
    }

    pub fn children(&self) -> &[GameObject] {
        &self.children
    }

    pub fn children_mut(&mut self) -> &mut [GameObject] {
        &mut self.children
    }

    pub fn bounding_radius(&self) -> f32 {
        self.bounding_radius
    }

    pub fn set_bounding_radius(&mut self, radius: f32) {
        self.bounding_radius = radius;
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }

    pub fn set_update_transforms(&mut self, update: bool) {
        self.update_transforms = update;
    }

    pub fn on_update(&mut self, time: TimeStep) {
        for component in self.components.values_mut() {
            component.on_update(time);
            if self.update_transforms {
                component.on_update_transform(Mat4::IDENTITY);
            }
        }
    }

    pub fn on_render(&mut self) {
        for component in self.components.values_mut() {
            component.on_render();
        }
    }

    pub fn debug_draw(&self, flags: DebugDrawFlags, renderer: &mut DebugRenderer) {
        if flags.contains(DebugDrawFlags::BOUNDING_RADIUS) {
            renderer.sphere(self.position, self.bounding_radius, COLOR_BOUNDING_RADIUS);
        }
        for component in self.components.values() {
            component.debug_draw(flags, renderer);
        }
    }
}

impl std::fmt::Debug for GameObject {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameObject")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("components", &self.components.len())
            .field("children", &self.children.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    struct Counter {
        value: u32,
        owner: Option<ObjectId>,
        inits: Rc<Cell<u32>>,
        drops: Rc<Cell<u32>>,
        updates: u32,
    }

    impl Counter {
        fn new(value: u32, inits: &Rc<Cell<u32>>, drops: &Rc<Cell<u32>>) -> Self {
            Self {
                value,
                owner: None,
                inits: inits.clone(),
                drops: drops.clone(),
                updates: 0,
            }
        }
    }

    impl Drop for Counter {
        fn drop(&mut self) {
            self.drops.set(self.drops.get() + 1);
        }
    }

    impl ObjectComponent for Counter {
        fn init(&mut self) {
            self.inits.set(self.inits.get() + 1);
        }

        fn set_owner(&mut self, owner: ObjectId) {
            self.owner = Some(owner);
        }

        fn on_update(&mut self, _time: TimeStep) {
            self.updates += 1;
        }

        fn debug_draw(&self, _flags: DebugDrawFlags, renderer: &mut DebugRenderer) {
            renderer.line(Vec3::ZERO, Vec3::X, COLOR_BOUNDING_RADIUS);
        }

        fn as_any(&self) -> &dyn Any {
            self
        }

        fn as_any_mut(&mut self) -> &mut dyn Any {
            self
        }
    }

    struct Marker;

    impl ObjectComponent for Marker {
        fn as_any(&self) -> &dyn Any {
            self
        }

        fn as_any_mut(&mut self) -> &mut dyn Any {
            self
        }
    }

    #[test]
    fn test_add_component_sets_owner_and_inits() {
        let inits = Rc::new(Cell::new(0));
        let drops = Rc::new(Cell::new(0));
        let mut object = GameObject::new("player");

        object.add_component(Counter::new(7, &inits, &drops));

        let counter = object.get_component::<Counter>().unwrap();
        assert_eq!(counter.value, 7);
        assert_eq!(counter.owner, Some(object.id()));
        assert_eq!(inits.get(), 1);
    }

    #[test]
    fn test_add_component_replaces_previous_instance() {
        let inits = Rc::new(Cell::new(0));
        let drops = Rc::new(Cell::new(0));
        let mut object = GameObject::new("player");

        object.add_component(Counter::new(1, &inits, &drops));
        object.add_component(Counter::new(2, &inits, &drops));

        assert_eq!(object.component_count(), 1);
        assert_eq!(object.get_component::<Counter>().unwrap().value, 2);
        assert_eq!(drops.get(), 1);
        assert_eq!(inits.get(), 2);
    }

    #[test]
    fn test_update_fans_out() {
        let inits = Rc::new(Cell::new(0));
        let drops = Rc::new(Cell::new(0));
        let mut object = GameObject::new("player");
        object.add_component(Counter::new(0, &inits, &drops));
        object.add_component(Marker);

        object.on_update(TimeStep::new(0.016, 0.016));
        object.on_update(TimeStep::new(0.016, 0.032));

        assert_eq!(object.get_component::<Counter>().unwrap().updates, 2);
        assert!(object.has_component::<Marker>());
    }

    #[test]
    fn test_debug_draw_bounding_radius() {
        let mut object = GameObject::new("marker");
        object.set_bounding_radius(3.0);
        object.add_component(Marker);

        let mut renderer = DebugRenderer::new();
        object.debug_draw(DebugDrawFlags::empty(), &mut renderer);
        assert!(renderer.lines().is_empty());

        object.debug_draw(DebugDrawFlags::BOUNDING_RADIUS, &mut renderer);
        assert!(!renderer.lines().is_empty());
    }

    #[test]
    fn test_remove_and_children() {
        let mut object = GameObject::default();
        object.add_component(Marker);
        assert!(object.remove_component::<Marker>());
        assert!(!object.remove_component::<Marker>());

        object.add_child(GameObject::new("child"));
        assert_eq!(object.children().len(), 1);
        assert_eq!(object.children()[0].name(), "child");
        assert_ne!(object.children()[0].id(), object.id());
    }
}

//! World wrapper providing helper methods for entity management

use super::components::{GlobalTransform, Transform};
use glam::Mat4;
use hecs::Entity;
use tracing::debug;

/// Wrapper around hecs::World providing additional helper methods
pub struct World {
    inner: hecs::World,
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

impl World {
    /// Create a new empty world
    pub fn new() -> Self {
        Self {
            inner: hecs::World::new(),
        }
    }

    /// Spawn a new entity with the given components
    pub fn spawn(&mut self, components: impl hecs::DynamicBundle) -> Entity {
        self.inner.spawn(components)
    }

    /// Get a reference to a component on an entity
    pub fn get<T: hecs::Component>(
        &self,
        entity: Entity,
    ) -> Result<hecs::Ref<'_, T>, hecs::ComponentError> {
        self.inner.get::<&T>(entity)
    }

    /// Get a reference to an optional component, `None` when the entity lacks it
    pub fn try_get<T: hecs::Component>(&self, entity: Entity) -> Option<hecs::Ref<'_, T>> {
        self.inner.get::<&T>(entity).ok()
    }

    /// Get a mutable reference to an optional component
    pub fn try_get_mut<T: hecs::Component>(
        &mut self,
        entity: Entity,
    ) -> Option<&mut T> {
        self.inner.query_one_mut::<&mut T>(entity).ok()
    }

    /// Check whether an entity carries a component of type `T`
    pub fn has<T: hecs::Component>(&self, entity: Entity) -> bool {
        self.inner
            .entity(entity)
            .map(|entity_ref| entity_ref.has::<T>())
            .unwrap_or(false)
    }

    /// Query a single entity for a mutable component reference
    pub fn query_one_mut<Q: hecs::Query>(
        &mut self,
        entity: Entity,
    ) -> Result<Q::Item<'_>, hecs::QueryOneError> {
        self.inner.query_one_mut::<Q>(entity)
    }

    /// Insert a component into an entity, replacing any existing one of the same type
    pub fn insert_one(
        &mut self,
        entity: Entity,
        component: impl hecs::Component,
    ) -> Result<(), hecs::NoSuchEntity> {
        self.inner.insert_one(entity, component)
    }

    /// Remove a component from an entity
    pub fn remove_one<T: hecs::Component>(
        &mut self,
        entity: Entity,
    ) -> Result<T, hecs::ComponentError> {
        self.inner.remove_one::<T>(entity)
    }

    /// Query entities with specific components
    pub fn query<Q: hecs::Query>(&self) -> hecs::QueryBorrow<'_, Q> {
        self.inner.query()
    }

    /// Query entities with specific components (mutable)
    pub fn query_mut<Q: hecs::Query>(&mut self) -> hecs::QueryMut<'_, Q> {
        self.inner.query_mut()
    }

    /// Despawn an entity and all its components
    pub fn despawn(&mut self, entity: Entity) -> Result<(), hecs::NoSuchEntity> {
        self.inner.despawn(entity)
    }

    /// Check if an entity exists
    pub fn contains(&self, entity: Entity) -> bool {
        self.inner.contains(entity)
    }

    /// Number of live entities
    pub fn len(&self) -> u32 {
        self.inner.len()
    }

    /// Whether the world holds no entities
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Remove every entity
    pub fn clear(&mut self) {
        self.inner.clear();
    }

    /// Helper method to spawn an entity with required transform components
    /// This ensures that entities have both Transform and GlobalTransform
    pub fn spawn_with_transform(&mut self, components: impl hecs::DynamicBundle) -> Entity {
        let entity = self.spawn(components);

        if !self.has::<Transform>(entity) {
            let _ = self.insert_one(entity, Transform::default());
            debug!(entity = ?entity, "Auto-added Transform component");
        }

        if !self.has::<GlobalTransform>(entity) {
            let matrix = self.local_matrix(entity);
            let _ = self.insert_one(entity, GlobalTransform::from_matrix(matrix));
            debug!(entity = ?entity, "Auto-added GlobalTransform component");
        }

        entity
    }

    /// World matrix of an entity.
    ///
    /// Uses the propagated [`GlobalTransform`] when present and falls back to the
    /// local [`Transform`] (identity when neither exists).
    pub fn world_matrix(&self, entity: Entity) -> Mat4 {
        if let Some(global) = self.try_get::<GlobalTransform>(entity) {
            return global.matrix;
        }
        self.local_matrix(entity)
    }

    fn local_matrix(&self, entity: Entity) -> Mat4 {
        self.try_get::<Transform>(entity)
            .map(|transform| transform.to_matrix())
            .unwrap_or(Mat4::IDENTITY)
    }

    /// Get access to the inner hecs::World for advanced operations
    pub fn inner(&self) -> &hecs::World {
        &self.inner
    }

    /// Get mutable access to the inner hecs::World for advanced operations
    pub fn inner_mut(&mut self) -> &mut hecs::World {
        &mut self.inner
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::entity::components::{Name, Parent};
    use glam::Vec3;

    #[test]
    fn test_world_spawn() {
        let mut world = World::new();
        let entity = world.spawn((Transform::default(),));
        assert!(world.contains(entity));
        assert_eq!(world.len(), 1);
    }

    #[test]
    fn test_spawn_with_transform() {
        let mut world = World::new();

        let entity = world.spawn_with_transform((Name::new("empty"),));

        assert!(world.get::<Transform>(entity).is_ok());
        assert!(world.get::<GlobalTransform>(entity).is_ok());
    }

    #[test]
    fn test_spawn_with_transform_existing() {
        let mut world = World::new();

        let custom_transform = Transform::from_position(Vec3::new(1.0, 2.0, 3.0));
        let entity = world.spawn_with_transform((custom_transform,));

        let transform = world.get::<Transform>(entity).unwrap();
        assert_eq!(transform.position, Vec3::new(1.0, 2.0, 3.0));

        let global = world.get::<GlobalTransform>(entity).unwrap();
        assert_eq!(global.position(), Vec3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn test_try_get_missing_component() {
        let mut world = World::new();
        let entity = world.spawn((Transform::default(),));

        assert!(world.try_get::<Name>(entity).is_none());
        assert!(world.try_get::<Transform>(entity).is_some());
        assert!(!world.has::<Name>(entity));
    }

    #[test]
    fn test_try_get_on_despawned_entity() {
        let mut world = World::new();
        let entity = world.spawn((Transform::default(),));
        world.despawn(entity).unwrap();

        assert!(world.try_get::<Transform>(entity).is_none());
        assert!(!world.has::<Transform>(entity));
    }

    #[test]
    fn test_world_matrix_fallbacks() {
        let mut world = World::new();
        let local_only = world.spawn((Transform::from_position(Vec3::X),));
        let with_global = world.spawn((
            Transform::from_position(Vec3::X),
            GlobalTransform::from_matrix(Mat4::from_translation(Vec3::Y)),
        ));
        let bare = world.spawn((Name::new("bare"),));

        assert_eq!(world.world_matrix(local_only).w_axis.truncate(), Vec3::X);
        assert_eq!(world.world_matrix(with_global).w_axis.truncate(), Vec3::Y);
        assert_eq!(world.world_matrix(bare), Mat4::IDENTITY);
    }

    #[test]
    fn test_entity_hierarchy() {
        let mut world = World::new();

        let parent = world.spawn((Transform::default(), GlobalTransform::default()));
        let child = world.spawn((
            Transform::default(),
            GlobalTransform::default(),
            Parent(parent),
        ));

        let parent_ref = world.get::<Parent>(child).unwrap();
        assert_eq!(parent_ref.0, parent);
    }
}

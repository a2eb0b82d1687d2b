//! Scene operation handlers
//!
//! This module provides the actual implementation of scene operations
//! that are triggered from the editor's Entity menu and hierarchy.

use engine::audio::{Sound, SoundNode};
use engine::core::entity::despawn_recursive;
use engine::prelude::*;
use std::sync::Arc;
use tracing::info;

/// `base`, or `base (n)` with the smallest `n` not used by another entity
pub fn unique_name(world: &World, base: &str) -> String {
    let taken: Vec<String> = world
        .query::<&Name>()
        .iter()
        .map(|(_, name)| name.0.clone())
        .collect();

    if !taken.iter().any(|name| name == base) {
        return base.to_string();
    }
    (1..)
        .map(|n| format!("{base} ({n})"))
        .find(|candidate| !taken.contains(candidate))
        .unwrap_or_else(|| base.to_string())
}

/// Create an entity with only a name and a transform
pub fn spawn_empty(world: &mut World) -> Entity {
    let name = unique_name(world, "Empty");
    info!(name = %name, "Creating empty entity");
    world.spawn_with_transform((Name::new(name),))
}

/// Create an entity carrying a primitive mesh
pub fn spawn_primitive(world: &mut World, primitive: PrimitiveType) -> Entity {
    let name = unique_name(world, primitive.name());
    info!(name = %name, "Creating primitive");
    world.spawn_with_transform((Name::new(name), MeshComponent::new(primitive.create())))
}

/// Create an emitter for a freshly opened sound file
pub fn spawn_sound(world: &mut World, sound: Arc<Sound>) -> Entity {
    let name = unique_name(world, &sound.name);
    let node = SoundNode::for_opened_file(sound);
    let transform = Transform::from_position(node.position);
    info!(name = %name, "Creating sound entity");
    world.spawn_with_transform((Name::new(name), transform, node))
}

/// Delete an entity and everything parented to it
pub fn delete_entity(world: &mut World, entity: Entity) {
    info!(entity = ?entity, "Deleting entity");
    despawn_recursive(world, entity);
}

//! Hierarchy system for updating global transforms based on parent relationships

use super::components::{GlobalTransform, Parent, Transform};
use super::world::World;
use glam::Mat4;
use hecs::Entity;
use std::collections::HashSet;
use tracing::{error, trace};

/// Update the hierarchy, calculating global transforms from local transforms
/// and parent relationships using breadth-first traversal.
pub fn update_hierarchy_system(world: &mut World) {
    let mut visited = HashSet::new();
    let mut next_level = Vec::new();

    let inner = world.inner_mut();

    // Roots are entities with a Transform but no Parent
    let mut queue: Vec<(Entity, Mat4)> = inner
        .query::<&Transform>()
        .without::<&Parent>()
        .iter()
        .map(|(entity, transform)| (entity, transform.to_matrix()))
        .collect();

    for (entity, matrix) in &queue {
        visited.insert(*entity);
        write_global(inner, *entity, *matrix);
    }

    trace!(root_count = queue.len(), "Starting hierarchy update");

    while !queue.is_empty() {
        let mut child_updates = Vec::new();

        for (parent_entity, parent_matrix) in queue.drain(..) {
            for (child_entity, (parent, transform)) in
                inner.query::<(&Parent, Option<&Transform>)>().iter()
            {
                if parent.0 != parent_entity {
                    continue;
                }

                if !visited.insert(child_entity) {
                    error!(
                        parent = ?parent_entity,
                        child = ?child_entity,
                        "Cyclic parent-child relationship detected"
                    );
                    continue;
                }

                let child_matrix = match transform {
                    Some(local) => parent_matrix * local.to_matrix(),
                    None => parent_matrix,
                };
                child_updates.push((child_entity, child_matrix));
            }
        }

        for (child_entity, child_matrix) in &child_updates {
            write_global(inner, *child_entity, *child_matrix);
        }

        next_level.extend(child_updates);
        std::mem::swap(&mut queue, &mut next_level);
    }

    trace!(processed_count = visited.len(), "Hierarchy update completed");
}

fn write_global(inner: &mut hecs::World, entity: Entity, matrix: Mat4) {
    match inner.query_one_mut::<&mut GlobalTransform>(entity) {
        Ok(global) => global.matrix = matrix,
        Err(_) => {
            let _ = inner.insert_one(entity, GlobalTransform::from_matrix(matrix));
        }
    }
}

/// Direct children of `parent`, in storage order
pub fn children_of(world: &World, parent: Entity) -> Vec<Entity> {
    world
        .query::<&Parent>()
        .iter()
        .filter(|(_, p)| p.0 == parent)
        .map(|(entity, _)| entity)
        .collect()
}

/// Despawn an entity together with every descendant
pub fn despawn_recursive(world: &mut World, entity: Entity) {
    let mut stack = vec![entity];
    let mut doomed = Vec::new();
    while let Some(current) = stack.pop() {
        if doomed.contains(&current) {
            continue;
        }
        doomed.push(current);
        stack.extend(children_of(world, current));
    }
    for entity in doomed {
        let _ = world.despawn(entity);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::{Quat, Vec3};

    #[test]
    fn test_basic_hierarchy() {
        let mut world = World::new();

        let parent = world.spawn((
            Transform::from_position(Vec3::X),
            GlobalTransform::default(),
        ));
        let child = world.spawn((
            Transform::from_position(Vec3::Y),
            GlobalTransform::default(),
            Parent(parent),
        ));

        update_hierarchy_system(&mut world);

        let parent_global = world.get::<GlobalTransform>(parent).unwrap();
        assert_eq!(parent_global.position(), Vec3::X);

        let child_global = world.get::<GlobalTransform>(child).unwrap();
        assert_eq!(child_global.position(), Vec3::new(1.0, 1.0, 0.0));
    }

    #[test]
    fn test_multi_level_hierarchy() {
        let mut world = World::new();

        let grandparent = world.spawn((Transform::from_position(Vec3::X),));
        let parent = world.spawn((Transform::from_position(Vec3::Y), Parent(grandparent)));
        let child = world.spawn((Transform::from_position(Vec3::Z), Parent(parent)));

        update_hierarchy_system(&mut world);

        let child_global = world.get::<GlobalTransform>(child).unwrap();
        assert_eq!(child_global.position(), Vec3::new(1.0, 1.0, 1.0));
    }

    #[test]
    fn test_rotated_parent() {
        let mut world = World::new();

        let parent = world.spawn((Transform::from_position_rotation(
            Vec3::ZERO,
            Quat::from_rotation_z(std::f32::consts::FRAC_PI_2),
        ),));
        let child = world.spawn((Transform::from_position(Vec3::X), Parent(parent)));

        update_hierarchy_system(&mut world);

        let child_global = world.get::<GlobalTransform>(child).unwrap();
        assert!(child_global.position().abs_diff_eq(Vec3::Y, 1e-5));
    }

    #[test]
    fn test_cycle_is_skipped() {
        let mut world = World::new();
        let a = world.spawn((Transform::default(),));
        let b = world.spawn((Transform::default(),));
        world.insert_one(a, Parent(b)).unwrap();
        world.insert_one(b, Parent(a)).unwrap();

        // Neither is a root, nothing to propagate and no infinite loop
        update_hierarchy_system(&mut world);
        assert!(world.try_get::<GlobalTransform>(a).is_none());
    }

    #[test]
    fn test_despawn_recursive() {
        let mut world = World::new();
        let root = world.spawn((Transform::default(),));
        let child = world.spawn((Transform::default(), Parent(root)));
        let grandchild = world.spawn((Transform::default(), Parent(child)));
        let other = world.spawn((Transform::default(),));

        assert_eq!(children_of(&world, root), vec![child]);

        despawn_recursive(&mut world, root);

        assert!(!world.contains(root));
        assert!(!world.contains(child));
        assert!(!world.contains(grandchild));
        assert!(world.contains(other));
    }
}

//! Ray-cast selection
//!
//! Every entity with an active mesh or a sprite is tested against the pick ray
//! using its world-space bounding box. Meshes are scanned before sprites and
//! the closest hit wins; on equal distances the entity scanned first is kept.

use engine::core::bounds::{Aabb, Ray};
use engine::prelude::{Entity, MeshComponent, Sprite, Transform, Vec3, World};
use tracing::debug;

/// Two picks of the same entity closer together than this focus the camera on it
pub const DOUBLE_CLICK_SECONDS: f32 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PickHit {
    pub entity: Entity,
    pub distance: f32,
}

/// World-space bounds of an entity: its active mesh box, else its sprite rect
pub fn world_bounds(world: &World, entity: Entity) -> Option<Aabb> {
    let local = if let Some(mesh) = world
        .try_get::<MeshComponent>(entity)
        .and_then(|component| component.active_mesh().map(|mesh| mesh.bounding_box()))
    {
        mesh
    } else {
        world.try_get::<Sprite>(entity)?.bounding_box()
    };
    Some(local.transform(world.world_matrix(entity)))
}

/// Closest entity hit by `ray`, or `None` when nothing is hit
pub fn pick_entity(world: &World, ray: &Ray) -> Option<PickHit> {
    let mut closest: Option<PickHit> = None;
    let mut consider = |entity: Entity, local: Aabb| {
        let bounds = local.transform(world.world_matrix(entity));
        if let Some(distance) = ray.hit_distance(&bounds) {
            if closest.map_or(true, |hit| distance < hit.distance) {
                closest = Some(PickHit { entity, distance });
            }
        }
    };

    for (entity, (mesh, _)) in world.query::<(&MeshComponent, &Transform)>().iter() {
        if let Some(mesh) = mesh.active_mesh() {
            consider(entity, mesh.bounding_box());
        }
    }

    for (entity, (sprite, _)) in world.query::<(&Sprite, &Transform)>().iter() {
        consider(entity, sprite.bounding_box());
    }

    closest
}

/// Result of a selection click
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PickOutcome {
    pub selection: Option<Entity>,
    /// Set on a double click: focus point and distance for the editor camera
    pub focus: Option<(Vec3, f32)>,
}

/// Remembers when the previous pick happened for double-click detection
#[derive(Debug, Clone, Copy)]
pub struct PickTracker {
    last_pick_time: f32,
}

impl Default for PickTracker {
    fn default() -> Self {
        Self {
            last_pick_time: f32::NEG_INFINITY,
        }
    }
}

impl PickTracker {
    pub fn last_pick_time(&self) -> f32 {
        self.last_pick_time
    }

    /// Pick with `ray` at time `now` given the current selection
    pub fn select(
        &mut self,
        world: &World,
        ray: &Ray,
        current: Option<Entity>,
        now: f32,
    ) -> PickOutcome {
        let since_last = now - self.last_pick_time;
        self.last_pick_time = now;

        let Some(hit) = pick_entity(world, ray) else {
            return PickOutcome {
                selection: None,
                focus: None,
            };
        };

        let mut focus = None;
        if current == Some(hit.entity) && since_last < DOUBLE_CLICK_SECONDS {
            if let Some(bounds) = world_bounds(world, hit.entity) {
                let point = world.world_matrix(hit.entity).w_axis.truncate();
                focus = Some((point, bounds.diagonal()));
                debug!(entity = ?hit.entity, "Double click, focusing camera");
            }
        }

        PickOutcome {
            selection: Some(hit.entity),
            focus,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use engine::prelude::{Mesh, Vec2, Vec4};

    fn cube_at(world: &mut World, position: Vec3) -> Entity {
        world.spawn((Transform::from_position(position), MeshComponent::new(Mesh::cube(1.0))))
    }

    fn forward_ray() -> Ray {
        Ray::new(Vec3::new(0.0, 0.0, 10.0), Vec3::NEG_Z)
    }

    #[test]
    fn test_picks_closest_hit() {
        let mut world = World::new();
        let far = cube_at(&mut world, Vec3::new(0.0, 0.0, -5.0));
        let near = cube_at(&mut world, Vec3::new(0.0, 0.0, 2.0));
        let _off_axis = cube_at(&mut world, Vec3::new(5.0, 0.0, 8.0));

        let hit = pick_entity(&world, &forward_ray()).unwrap();
        assert_eq!(hit.entity, near);
        assert!((hit.distance - 7.5).abs() < 1e-4);
        assert_ne!(hit.entity, far);
    }

    #[test]
    fn test_no_hit() {
        let mut world = World::new();
        cube_at(&mut world, Vec3::new(5.0, 5.0, 0.0));
        assert!(pick_entity(&world, &forward_ray()).is_none());
    }

    #[test]
    fn test_inactive_mesh_is_ignored() {
        let mut world = World::new();
        let mut mesh = Mesh::cube(1.0);
        mesh.active = false;
        world.spawn((Transform::default(), MeshComponent::new(mesh)));
        let visible = cube_at(&mut world, Vec3::new(0.0, 0.0, -3.0));

        assert_eq!(pick_entity(&world, &forward_ray()).unwrap().entity, visible);
    }

    #[test]
    fn test_mesh_wins_tie_against_sprite() {
        let mut world = World::new();
        // Sprite facing the ray at z = 0.5, the cube's front face
        let sprite = world.spawn((
            Transform::from_position(Vec3::new(-0.5, -0.5, 0.5)),
            Sprite::new(Vec2::ZERO, Vec2::ONE, Vec4::ONE),
        ));
        let mesh = cube_at(&mut world, Vec3::ZERO);

        let hit = pick_entity(&world, &forward_ray()).unwrap();
        assert_eq!(hit.entity, mesh);
        assert_ne!(hit.entity, sprite);
    }

    #[test]
    fn test_sprite_pick_uses_world_transform() {
        let mut world = World::new();
        let sprite = world.spawn((
            Transform::from_position(Vec3::new(2.0, 0.0, 0.0)),
            Sprite::new(Vec2::ZERO, Vec2::ONE, Vec4::ONE),
        ));
        let ray = Ray::new(Vec3::new(2.5, 0.5, 10.0), Vec3::NEG_Z);
        assert_eq!(pick_entity(&world, &ray).unwrap().entity, sprite);
        assert!(pick_entity(&world, &forward_ray()).is_none());
    }

    #[test]
    fn test_double_click_focuses() {
        let mut world = World::new();
        let cube = cube_at(&mut world, Vec3::ZERO);
        let mut tracker = PickTracker::default();

        let first = tracker.select(&world, &forward_ray(), None, 1.0);
        assert_eq!(first.selection, Some(cube));
        assert!(first.focus.is_none());

        let second = tracker.select(&world, &forward_ray(), first.selection, 1.5);
        assert_eq!(second.selection, Some(cube));
        let (point, distance) = second.focus.unwrap();
        assert_eq!(point, Vec3::ZERO);
        assert!((distance - 3.0_f32.sqrt()).abs() < 1e-4);
    }

    #[test]
    fn test_slow_second_click_keeps_selection_without_focus() {
        let mut world = World::new();
        let cube = cube_at(&mut world, Vec3::ZERO);
        let mut tracker = PickTracker::default();

        tracker.select(&world, &forward_ray(), None, 1.0);
        let second = tracker.select(&world, &forward_ray(), Some(cube), 3.0);
        assert_eq!(second.selection, Some(cube));
        assert!(second.focus.is_none());
        assert_eq!(tracker.last_pick_time(), 3.0);
    }

    #[test]
    fn test_miss_clears_selection() {
        let mut world = World::new();
        let cube = cube_at(&mut world, Vec3::ZERO);
        let mut tracker = PickTracker::default();
        let miss = Ray::new(Vec3::new(10.0, 0.0, 10.0), Vec3::NEG_Z);

        let outcome = tracker.select(&world, &miss, Some(cube), 1.0);
        assert_eq!(outcome.selection, None);
    }
}

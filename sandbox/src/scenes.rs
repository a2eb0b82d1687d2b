//! Demo scenes registered with the editor

use engine::core::object::ObjectComponent;
use engine::prelude::*;
use engine::scene::Scene;
use std::any::Any;

/// Spins an entity around its local Y axis while the scene plays
#[derive(Debug, Clone, Copy)]
pub struct Spin(pub f32);

pub fn register(scenes: &mut SceneManager) {
    scenes.register_scene("Scene 3D", build_3d);
    scenes.register_scene("Scene 2D", build_2d);
}

/// Advance demo animation
pub fn animate(world: &mut World, time: TimeStep) {
    for (_entity, (transform, spin)) in world.query_mut::<(&mut Transform, &Spin)>() {
        transform.rotation *= Quat::from_rotation_y(spin.0 * time.dt);
    }
}

fn build_3d(scene: &mut Scene) {
    let world = &mut scene.world;

    world.spawn_with_transform((
        Name::new("Camera"),
        Camera::perspective(60.0, 16.0 / 9.0, 0.1, 1000.0),
        Transform::from_position(Vec3::new(0.0, 2.0, 5.0)).looking_at(Vec3::ZERO, Vec3::Y),
    ));

    world.spawn_with_transform((
        Name::new("Cube"),
        MeshComponent::new(Mesh::cube(1.0)),
        Transform::default(),
        Physics3D::new(RigidBody3D::kinematic(Vec3::ZERO)),
        Spin(1.0),
    ));

    world.spawn_with_transform((
        Name::new("Ground"),
        MeshComponent::new(Mesh::plane(10.0, 10.0)),
        Transform::from_position(Vec3::new(0.0, -1.0, 0.0)),
    ));

    world.spawn_with_transform((
        Name::new("Sun"),
        Light::directional(Vec3::ONE, 1.0),
        Transform::from_position(Vec3::new(4.0, 8.0, 4.0)).looking_at(Vec3::ZERO, Vec3::Y),
    ));
    world.spawn_with_transform((
        Name::new("Lamp"),
        Light::point(Vec3::new(1.0, 0.8, 0.6), 2.0, 6.0),
        Transform::from_position(Vec3::new(2.0, 2.0, 0.0)),
    ));

    // Smaller cubes parented to a spinning pivot
    let pivot = world.spawn_with_transform((Name::new("Orbit"), Transform::default(), Spin(0.5)));
    for i in 0..6 {
        let angle = (i as f32 / 6.0) * std::f32::consts::TAU;
        let primitive = PrimitiveType::ALL[i % PrimitiveType::ALL.len()];
        world.spawn_with_transform((
            Name::new(format!("Orbiter {i}")),
            MeshComponent::new(primitive.create()),
            Transform::from_position(Vec3::new(angle.cos() * 3.0, 0.0, angle.sin() * 3.0))
                .with_scale(Vec3::splat(0.5)),
            Parent(pivot),
        ));
    }

    let mut beacon = GameObject::new("Beacon");
    beacon.set_position(Vec3::new(0.0, 1.5, -3.0));
    beacon.set_bounding_radius(0.75);
    beacon.add_component(Pulse::new(Vec3::new(0.0, 1.5, -3.0)));
    scene.objects.push(beacon);
}

fn build_2d(scene: &mut Scene) {
    let world = &mut scene.world;

    world.spawn_with_transform((
        Name::new("Camera"),
        Camera::orthographic(10.0, 16.0 / 9.0, -100.0, 100.0),
        Transform::default(),
    ));

    let colors = [
        Vec4::new(0.9, 0.3, 0.3, 1.0),
        Vec4::new(0.3, 0.9, 0.3, 1.0),
        Vec4::new(0.3, 0.3, 0.9, 1.0),
    ];
    for (i, color) in colors.into_iter().enumerate() {
        let x = i as f32 * 2.0 - 2.0;
        world.spawn_with_transform((
            Name::new(format!("Sprite {i}")),
            Sprite::new(Vec2::new(-0.5, -0.5), Vec2::ONE, color),
            Transform::from_position(Vec3::new(x, 0.0, 0.0)),
        ));
    }

    world.spawn_with_transform((
        Name::new("Floor"),
        Sprite::new(Vec2::new(-4.0, -0.25), Vec2::new(8.0, 0.5), Vec4::splat(0.6)),
        Transform::from_position(Vec3::new(0.0, -2.5, 0.0)),
        Physics2D::new(RigidBody2D::fixed(Vec2::new(0.0, -2.5))),
    ));
}

/// Pulsing ring drawn around a scene object when bounding radii are shown
struct Pulse {
    center: Vec3,
    phase: f32,
}

impl Pulse {
    fn new(center: Vec3) -> Self {
        Self { center, phase: 0.0 }
    }
}

impl ObjectComponent for Pulse {
    fn on_update(&mut self, time: TimeStep) {
        self.phase = (self.phase + time.dt * 2.0) % std::f32::consts::TAU;
    }

    fn debug_draw(&self, flags: DebugDrawFlags, renderer: &mut DebugRenderer) {
        if flags.contains(DebugDrawFlags::BOUNDING_RADIUS) {
            let radius = 1.0 + 0.25 * self.phase.sin();
            renderer.circle(self.center, radius, Vec3::X, Vec3::Z, Vec4::new(1.0, 0.9, 0.2, 0.8));
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loaded(name: &str) -> SceneManager {
        let mut scenes = SceneManager::new();
        register(&mut scenes);
        scenes.switch_scene(name);
        scenes.apply_pending_switch();
        scenes
    }

    #[test]
    fn test_3d_scene_has_camera_and_beacon() {
        let scenes = loaded("Scene 3D");
        let scene = scenes.current();
        assert_eq!(scene.world.query::<&Camera>().iter().count(), 1);
        assert_eq!(scene.objects.len(), 1);
        assert!(scene.objects[0].get_component::<Pulse>().is_some());
    }

    #[test]
    fn test_2d_camera_is_orthographic() {
        let scenes = loaded("Scene 2D");
        let world = &scenes.current().world;
        let (_, camera) = world.query::<&Camera>().iter().next().map(|(e, c)| (e, *c)).unwrap();
        assert!(camera.is_orthographic());
        assert!(camera.z_near < 0.0);
    }

    #[test]
    fn test_animate_spins_entities() {
        let mut world = World::new();
        let entity = world.spawn((Transform::default(), Spin(1.0)));
        animate(&mut world, TimeStep::new(0.5, 0.5));
        let rotation = world.get::<Transform>(entity).unwrap().rotation;
        assert!(rotation.angle_between(Quat::IDENTITY) > 0.4);
    }
}

//! Component inspector panel
//!
//! Displays and allows editing of components for the selected entity.

use crate::component_icons::icon_for;
use crate::layout::DockRegion;
use crate::window::{EditorContext, EditorWindow};
use engine::audio::SoundNode;
use engine::graphics::LightKind;
use engine::prelude::*;
use glam::EulerRot;
use imgui::{Drag, TreeNodeFlags, Ui};
use std::sync::Arc;
use tracing::debug;

/// Components the Add Component popup can attach
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddableComponent {
    Camera,
    Light,
    Mesh,
    Sprite,
    Sound,
    Physics2D,
    Physics3D,
}

impl AddableComponent {
    pub const ALL: [AddableComponent; 7] = [
        AddableComponent::Camera,
        AddableComponent::Light,
        AddableComponent::Mesh,
        AddableComponent::Sprite,
        AddableComponent::Sound,
        AddableComponent::Physics2D,
        AddableComponent::Physics3D,
    ];

    /// Name matching the component icon table
    pub fn name(self) -> &'static str {
        match self {
            AddableComponent::Camera => "Camera",
            AddableComponent::Light => "Light",
            AddableComponent::Mesh => "Mesh",
            AddableComponent::Sprite => "Sprite",
            AddableComponent::Sound => "Sound",
            AddableComponent::Physics2D => "Physics2D",
            AddableComponent::Physics3D => "Physics3D",
        }
    }

    pub fn is_present(self, world: &World, entity: Entity) -> bool {
        match self {
            AddableComponent::Camera => world.has::<Camera>(entity),
            AddableComponent::Light => world.has::<Light>(entity),
            AddableComponent::Mesh => world.has::<MeshComponent>(entity),
            AddableComponent::Sprite => world.has::<Sprite>(entity),
            AddableComponent::Sound => world.has::<SoundNode>(entity),
            AddableComponent::Physics2D => world.has::<Physics2D>(entity),
            AddableComponent::Physics3D => world.has::<Physics3D>(entity),
        }
    }

    /// Attach a default instance; returns false when the entity is gone
    pub fn insert(self, world: &mut World, entity: Entity) -> bool {
        let result = match self {
            AddableComponent::Camera => world.insert_one(entity, Camera::default()),
            AddableComponent::Light => world.insert_one(entity, Light::default()),
            AddableComponent::Mesh => {
                world.insert_one(entity, MeshComponent::new(PrimitiveType::Cube.create()))
            }
            AddableComponent::Sprite => world.insert_one(entity, Sprite::default()),
            AddableComponent::Sound => world.insert_one(entity, SoundNode::default()),
            AddableComponent::Physics2D => {
                let position = world
                    .try_get::<Transform>(entity)
                    .map(|t| t.position.truncate())
                    .unwrap_or_default();
                world.insert_one(entity, Physics2D::new(RigidBody2D::fixed(position)))
            }
            AddableComponent::Physics3D => {
                let position = world
                    .try_get::<Transform>(entity)
                    .map(|t| t.position)
                    .unwrap_or_default();
                world.insert_one(entity, Physics3D::new(RigidBody3D::kinematic(position)))
            }
        };
        result.is_ok()
    }

    pub fn remove(self, world: &mut World, entity: Entity) {
        match self {
            AddableComponent::Camera => remove_component::<Camera>(world, entity),
            AddableComponent::Light => remove_component::<Light>(world, entity),
            AddableComponent::Mesh => remove_component::<MeshComponent>(world, entity),
            AddableComponent::Sprite => remove_component::<Sprite>(world, entity),
            AddableComponent::Sound => remove_component::<SoundNode>(world, entity),
            AddableComponent::Physics2D => remove_component::<Physics2D>(world, entity),
            AddableComponent::Physics3D => remove_component::<Physics3D>(world, entity),
        }
    }
}

fn remove_component<T: hecs::Component>(world: &mut World, entity: Entity) {
    let _ = world.remove_one::<T>(entity);
}

/// Components the entity does not carry yet
pub fn missing_components(world: &World, entity: Entity) -> Vec<AddableComponent> {
    AddableComponent::ALL
        .into_iter()
        .filter(|component| !component.is_present(world, entity))
        .collect()
}

fn drag_vec3(ui: &Ui, label: &str, value: &mut Vec3, speed: f32) -> bool {
    let mut array = value.to_array();
    let changed = Drag::new(label)
        .speed(speed)
        .display_format("%.3f")
        .build_array(ui, &mut array);
    if changed {
        *value = Vec3::from_array(array);
    }
    changed
}

fn drag_vec2(ui: &Ui, label: &str, value: &mut Vec2, speed: f32) -> bool {
    let mut array = value.to_array();
    let changed = Drag::new(label)
        .speed(speed)
        .display_format("%.3f")
        .build_array(ui, &mut array);
    if changed {
        *value = Vec2::from_array(array);
    }
    changed
}

/// Header with a trailing remove button; returns (open, remove requested)
fn component_header(ui: &Ui, component: &str) -> (bool, bool) {
    let open = ui.collapsing_header(
        format!("{} {component}", icon_for(component)),
        TreeNodeFlags::DEFAULT_OPEN,
    );
    let remove = open && ui.small_button(format!("Remove {component}"));
    (open, remove)
}

#[derive(Default)]
pub struct InspectorPanel;

impl InspectorPanel {
    pub fn new() -> Self {
        Self
    }

    fn transform(ui: &Ui, world: &mut World, entity: Entity) {
        let Some(transform) = world.try_get_mut::<Transform>(entity) else {
            return;
        };
        if !ui.collapsing_header("Transform", TreeNodeFlags::DEFAULT_OPEN) {
            return;
        }
        drag_vec3(ui, "Position", &mut transform.position, 0.05);

        let (x, y, z) = transform.rotation.to_euler(EulerRot::XYZ);
        let mut euler = Vec3::new(x, y, z) * (180.0 / std::f32::consts::PI);
        if drag_vec3(ui, "Rotation", &mut euler, 0.5) {
            let radians = euler * (std::f32::consts::PI / 180.0);
            transform.rotation = Quat::from_euler(EulerRot::XYZ, radians.x, radians.y, radians.z);
        }

        drag_vec3(ui, "Scale", &mut transform.scale, 0.01);
    }

    fn camera(ui: &Ui, world: &mut World, entity: Entity) -> bool {
        let Some(camera) = world.try_get_mut::<Camera>(entity) else {
            return false;
        };
        let (open, remove) = component_header(ui, "Camera");
        if !open {
            return false;
        }

        let mut mode = usize::from(camera.is_orthographic());
        if ui.combo_simple_string("Projection", &mut mode, &["Perspective", "Orthographic"]) {
            camera.projection_mode = if mode == 1 {
                ProjectionMode::Orthographic { height: 10.0 }
            } else {
                ProjectionMode::Perspective
            };
        }

        match camera.projection_mode {
            ProjectionMode::Perspective => {
                let mut fov = camera.fov_y_radians.to_degrees();
                if ui.slider("FOV", 10.0, 150.0, &mut fov) {
                    camera.fov_y_radians = fov.to_radians();
                }
            }
            ProjectionMode::Orthographic { mut height } => {
                if Drag::new("Height")
                    .speed(0.1)
                    .range(0.1, 10_000.0)
                    .build(ui, &mut height)
                {
                    camera.set_ortho_height(height);
                }
            }
        }
        Drag::new("Near")
            .speed(0.01)
            .range(0.001, camera.z_far)
            .build(ui, &mut camera.z_near);
        Drag::new("Far")
            .speed(1.0)
            .range(camera.z_near, 100_000.0)
            .build(ui, &mut camera.z_far);
        ui.text(format!("Aspect: {:.3}", camera.aspect_ratio));
        remove
    }

    fn mesh(ui: &Ui, world: &mut World, entity: Entity) -> bool {
        let Some(component) = world.try_get_mut::<MeshComponent>(entity) else {
            return false;
        };
        let (open, remove) = component_header(ui, "Mesh");
        if !open {
            return false;
        }
        match component.mesh.as_mut() {
            Some(mesh) => {
                ui.text(format!(
                    "Vertices: {}  Triangles: {}",
                    mesh.vertices.len(),
                    mesh.triangle_count()
                ));
                let mut active = mesh.active;
                if ui.checkbox("Active", &mut active) {
                    // Copy on write when the mesh is shared with other entities
                    Arc::make_mut(mesh).active = active;
                    debug!(entity = ?entity, active, "Toggled mesh");
                }
                let bounds = mesh.bounding_box();
                ui.text(format!("Bounds: {:.2} .. {:.2}", bounds.min, bounds.max));
            }
            None => ui.text_disabled("No mesh"),
        }
        remove
    }

    fn sprite(ui: &Ui, world: &mut World, entity: Entity) -> bool {
        let Some(sprite) = world.try_get_mut::<Sprite>(entity) else {
            return false;
        };
        let (open, remove) = component_header(ui, "Sprite");
        if !open {
            return false;
        }
        drag_vec2(ui, "Offset", &mut sprite.position, 0.05);
        drag_vec2(ui, "Size", &mut sprite.scale, 0.05);
        let mut color = sprite.color.to_array();
        if ui.color_edit4("Color", &mut color) {
            sprite.color = Vec4::from_array(color);
        }
        let mut texture = sprite.texture.clone().unwrap_or_default();
        if ui.input_text("Texture", &mut texture).build() {
            sprite.texture = (!texture.is_empty()).then_some(texture);
        }
        remove
    }

    fn light(ui: &Ui, world: &mut World, entity: Entity) -> bool {
        let Some(light) = world.try_get_mut::<Light>(entity) else {
            return false;
        };
        let (open, remove) = component_header(ui, "Light");
        if !open {
            return false;
        }
        const KINDS: [LightKind; 3] = [LightKind::Directional, LightKind::Point, LightKind::Spot];
        let mut kind = KINDS.iter().position(|k| *k == light.kind).unwrap_or(1);
        if ui.combo_simple_string("Type", &mut kind, &["Directional", "Point", "Spot"]) {
            light.kind = KINDS[kind];
        }
        let mut color = light.color.to_array();
        if ui.color_edit3("Color", &mut color) {
            light.color = Vec3::from_array(color);
        }
        Drag::new("Intensity")
            .speed(0.05)
            .range(0.0, 1000.0)
            .build(ui, &mut light.intensity);
        if light.kind != LightKind::Directional {
            Drag::new("Radius")
                .speed(0.1)
                .range(0.0, 10_000.0)
                .build(ui, &mut light.radius);
        }
        remove
    }

    fn sound(ui: &Ui, world: &mut World, entity: Entity) -> bool {
        let Some(node) = world.try_get_mut::<SoundNode>(entity) else {
            return false;
        };
        let (open, remove) = component_header(ui, "Sound");
        if !open {
            return false;
        }
        match &node.sound {
            Some(sound) => ui.text(format!("Clip: {} ({} bytes)", sound.name, sound.size_bytes())),
            None => ui.text_disabled("No clip"),
        }
        ui.slider("Volume", 0.0, 1.0, &mut node.volume);
        drag_vec3(ui, "Position", &mut node.position, 0.05);
        ui.checkbox("Looping", &mut node.looping);
        ui.same_line();
        ui.checkbox("Global", &mut node.is_global);
        ui.same_line();
        ui.checkbox("Paused", &mut node.paused);
        Drag::new("Reference Distance")
            .speed(0.05)
            .range(0.0, node.radius)
            .build(ui, &mut node.reference_distance);
        Drag::new("Radius")
            .speed(0.1)
            .range(node.reference_distance, 10_000.0)
            .build(ui, &mut node.radius);
        remove
    }

    fn physics(ui: &Ui, world: &mut World, entity: Entity) -> (bool, bool) {
        let mut remove_2d = false;
        if let Some(body) = world.try_get_mut::<Physics2D>(entity) {
            let (open, remove) = component_header(ui, "Physics2D");
            remove_2d = remove;
            if open {
                let mut position = body.object.position();
                if drag_vec2(ui, "Body Position", &mut position, 0.05) {
                    body.object.set_position(position);
                }
                let mut angle = body.object.angle().to_degrees();
                if Drag::new("Body Angle").speed(0.5).build(ui, &mut angle) {
                    body.object.set_angle(angle.to_radians());
                }
            }
        }

        let mut remove_3d = false;
        if let Some(body) = world.try_get_mut::<Physics3D>(entity) {
            let (open, remove) = component_header(ui, "Physics3D");
            remove_3d = remove;
            if open {
                let mut position = body.object.position();
                if drag_vec3(ui, "Body Position##3d", &mut position, 0.05) {
                    body.object.set_position(position);
                }
                let (x, y, z) = body.object.orientation().to_euler(EulerRot::XYZ);
                ui.text(format!(
                    "Orientation: {:.1} {:.1} {:.1}",
                    x.to_degrees(),
                    y.to_degrees(),
                    z.to_degrees()
                ));
            }
        }
        (remove_2d, remove_3d)
    }

    fn add_component_popup(ui: &Ui, world: &mut World, entity: Entity) {
        if ui.button("Add Component") {
            ui.open_popup("##add_component");
        }
        ui.popup("##add_component", || {
            for component in missing_components(world, entity) {
                let label = format!("{} {}", icon_for(component.name()), component.name());
                if ui.menu_item(label) && component.insert(world, entity) {
                    debug!(entity = ?entity, component = component.name(), "Added component");
                }
            }
        });
    }
}

impl EditorWindow for InspectorPanel {
    fn name(&self) -> String {
        "Inspector".to_string()
    }

    fn simple_name(&self) -> &'static str {
        "Inspector"
    }

    fn default_region(&self) -> DockRegion {
        DockRegion::Right
    }

    fn on_imgui(&mut self, ui: &Ui, ctx: &mut EditorContext<'_>) {
        let Some(entity) = *ctx.selection else {
            ui.text_disabled("No entity selected");
            return;
        };
        let world = &mut ctx.app.scenes.current_mut().world;
        if !world.contains(entity) {
            ui.text_disabled("No entity selected");
            return;
        }

        match world.try_get_mut::<Name>(entity) {
            Some(name) => {
                ui.input_text("Name", &mut name.0).build();
            }
            None => {
                ui.text(format!("Entity {entity:?}"));
                ui.same_line();
                if ui.small_button("Add Name") {
                    let _ = world.insert_one(entity, Name::new(format!("Entity {}", entity.id())));
                }
            }
        }
        if let Some(parent) = world.try_get::<Parent>(entity).map(|p| p.0) {
            ui.text(format!("Parent: {parent:?}"));
        }
        ui.separator();

        Self::transform(ui, world, entity);

        let mut removed = Vec::new();
        if Self::camera(ui, world, entity) {
            removed.push(AddableComponent::Camera);
        }
        if Self::mesh(ui, world, entity) {
            removed.push(AddableComponent::Mesh);
        }
        if Self::sprite(ui, world, entity) {
            removed.push(AddableComponent::Sprite);
        }
        if Self::light(ui, world, entity) {
            removed.push(AddableComponent::Light);
        }
        if Self::sound(ui, world, entity) {
            removed.push(AddableComponent::Sound);
        }
        let (remove_2d, remove_3d) = Self::physics(ui, world, entity);
        if remove_2d {
            removed.push(AddableComponent::Physics2D);
        }
        if remove_3d {
            removed.push(AddableComponent::Physics3D);
        }
        for component in removed {
            component.remove(world, entity);
            debug!(entity = ?entity, component = component.name(), "Removed component");
        }

        ui.separator();
        Self::add_component_popup(ui, world, entity);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component_icons::COMPONENT_ICONS;

    #[test]
    fn test_addable_names_have_icons() {
        for component in AddableComponent::ALL {
            assert!(COMPONENT_ICONS
                .iter()
                .any(|(name, _)| *name == component.name()));
        }
    }

    #[test]
    fn test_missing_components_shrink_as_added() {
        let mut world = World::new();
        let entity = world.spawn((
            Name::new("thing"),
            Transform::from_position(Vec3::new(1.0, 2.0, 3.0)),
        ));
        assert_eq!(missing_components(&world, entity).len(), AddableComponent::ALL.len());

        assert!(AddableComponent::Camera.insert(&mut world, entity));
        assert!(AddableComponent::Physics3D.insert(&mut world, entity));
        let missing = missing_components(&world, entity);
        assert!(!missing.contains(&AddableComponent::Camera));
        assert!(!missing.contains(&AddableComponent::Physics3D));
        assert_eq!(missing.len(), AddableComponent::ALL.len() - 2);

        let body = world.get::<Physics3D>(entity).unwrap();
        assert_eq!(body.object.position(), Vec3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn test_remove_component() {
        let mut world = World::new();
        let entity = world.spawn((Light::default(),));
        AddableComponent::Light.remove(&mut world, entity);
        assert!(!world.has::<Light>(entity));
        // Removing again is harmless
        AddableComponent::Light.remove(&mut world, entity);
    }

    #[test]
    fn test_insert_on_despawned_entity_fails() {
        let mut world = World::new();
        let entity = world.spawn((Name::new("gone"),));
        world.despawn(entity).unwrap();
        assert!(!AddableComponent::Sprite.insert(&mut world, entity));
    }
}

//! Short labels standing in for component icons in the hierarchy and inspector

use engine::audio::SoundNode;
use engine::prelude::*;

/// Component types with an icon, in display order
pub const COMPONENT_ICONS: &[(&str, &str)] = &[
    ("Camera", "[Cam]"),
    ("Light", "[Lgt]"),
    ("Mesh", "[Msh]"),
    ("Sprite", "[Spr]"),
    ("Sound", "[Snd]"),
    ("Physics2D", "[P2]"),
    ("Physics3D", "[P3]"),
];

/// Component names present on `entity`, among those with an icon
pub fn components_of(world: &World, entity: Entity) -> Vec<&'static str> {
    let present = [
        world.has::<Camera>(entity),
        world.has::<Light>(entity),
        world.has::<MeshComponent>(entity),
        world.has::<Sprite>(entity),
        world.has::<SoundNode>(entity),
        world.has::<Physics2D>(entity),
        world.has::<Physics3D>(entity),
    ];
    COMPONENT_ICONS
        .iter()
        .zip(present)
        .filter(|(_, present)| *present)
        .map(|((name, _), _)| *name)
        .collect()
}

pub fn icon_for(component: &str) -> &'static str {
    COMPONENT_ICONS
        .iter()
        .find(|(name, _)| *name == component)
        .map(|(_, icon)| *icon)
        .unwrap_or("[?]")
}

/// The icon shown before an entity's name: the first component with an icon
pub fn entity_icon(world: &World, entity: Entity) -> &'static str {
    components_of(world, entity)
        .first()
        .map(|component| icon_for(component))
        .unwrap_or("[Ent]")
}

/// Display name: the `Name` component, else the entity handle
pub fn entity_label(world: &World, entity: Entity) -> String {
    match world.try_get::<Name>(entity) {
        Some(name) => name.0.clone(),
        None => format!("Entity {entity:?}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_icon_follows_first_component() {
        let mut world = World::new();
        let camera = world.spawn((Name::new("cam"), Camera::default(), Light::default()));
        let plain = world.spawn((Transform::default(),));

        assert_eq!(components_of(&world, camera), vec!["Camera", "Light"]);
        assert_eq!(entity_icon(&world, camera), "[Cam]");
        assert_eq!(entity_icon(&world, plain), "[Ent]");
        assert_eq!(entity_label(&world, camera), "cam");
        assert!(entity_label(&world, plain).starts_with("Entity"));
    }
}

//! Scene hierarchy panel
//!
//! Displays all entities in the scene in a tree structure,
//! allowing selection and basic operations.

use crate::commands::{CommandQueue, EditorCommand};
use crate::component_icons::{entity_icon, entity_label};
use crate::layout::DockRegion;
use crate::window::{EditorContext, EditorWindow};
use engine::prelude::{Entity, Parent, PrimitiveType, World};
use imgui::{MouseButton, TreeNodeFlags, Ui};
use std::collections::HashMap;
use tracing::debug;

/// Parent to children relationships of a world, in storage order
#[derive(Debug, Default)]
pub struct HierarchyTree {
    pub roots: Vec<Entity>,
    pub children: HashMap<Entity, Vec<Entity>>,
}

impl HierarchyTree {
    /// Entities whose parent is missing or despawned count as roots
    pub fn build(world: &World) -> Self {
        let mut tree = Self::default();
        let entities: Vec<Entity> = world.query::<()>().iter().map(|(e, _)| e).collect();

        for entity in entities {
            let parent = world
                .try_get::<Parent>(entity)
                .map(|parent| parent.0)
                .filter(|parent| world.contains(*parent));
            match parent {
                Some(parent) => tree.children.entry(parent).or_default().push(entity),
                None => tree.roots.push(entity),
            }
        }
        tree
    }

    pub fn children_of(&self, entity: Entity) -> &[Entity] {
        self.children.get(&entity).map(Vec::as_slice).unwrap_or(&[])
    }
}

/// Entities whose label contains `filter`, ignoring case
pub fn filter_entities(world: &World, filter: &str) -> Vec<Entity> {
    let needle = filter.to_lowercase();
    world
        .query::<()>()
        .iter()
        .map(|(e, _)| e)
        .filter(|&e| entity_label(world, e).to_lowercase().contains(&needle))
        .collect()
}

#[derive(Default)]
pub struct HierarchyPanel {
    filter: String,
    context_entity: Option<Entity>,
}

/// The parts of the editor context rows may change
struct RowTargets<'a> {
    selection: &'a mut Option<Entity>,
    commands: &'a mut CommandQueue,
}

fn row_label(world: &World, entity: Entity) -> String {
    format!(
        "{} {}##{:?}",
        entity_icon(world, entity),
        entity_label(world, entity),
        entity
    )
}

impl HierarchyPanel {
    pub fn new() -> Self {
        Self::default()
    }

    fn entity_row(
        &mut self,
        ui: &Ui,
        world: &World,
        tree: &HierarchyTree,
        entity: Entity,
        targets: &mut RowTargets<'_>,
    ) {
        let children = tree.children_of(entity);
        let mut flags = TreeNodeFlags::OPEN_ON_ARROW | TreeNodeFlags::SPAN_AVAIL_WIDTH;
        if children.is_empty() {
            flags |= TreeNodeFlags::LEAF;
        }
        if *targets.selection == Some(entity) {
            flags |= TreeNodeFlags::SELECTED;
        }

        let node = ui
            .tree_node_config(row_label(world, entity))
            .flags(flags)
            .push();
        self.handle_row_input(ui, entity, targets);

        if let Some(_node) = node {
            for &child in children {
                self.entity_row(ui, world, tree, child, targets);
            }
        }
    }

    fn handle_row_input(&mut self, ui: &Ui, entity: Entity, targets: &mut RowTargets<'_>) {
        if ui.is_item_clicked() {
            *targets.selection = Some(entity);
            debug!("Selected entity: {:?}", entity);
            if ui.is_mouse_double_clicked(MouseButton::Left) {
                targets.commands.push(EditorCommand::FocusSelection);
            }
        }
        if ui.is_item_clicked_with_button(MouseButton::Right) {
            self.context_entity = Some(entity);
            ui.open_popup("##entity_context");
        }
    }

    fn create_menu(ui: &Ui, commands: &mut CommandQueue) {
        if ui.button("+ Create") {
            ui.open_popup("##create_entity");
        }
        ui.popup("##create_entity", || {
            if ui.menu_item("Empty") {
                commands.push(EditorCommand::SpawnEmpty);
            }
            ui.separator();
            for primitive in PrimitiveType::ALL {
                if ui.menu_item(primitive.name()) {
                    commands.push(EditorCommand::SpawnPrimitive(primitive));
                }
            }
        });
    }

    fn context_menu(&mut self, ui: &Ui, targets: &mut RowTargets<'_>) {
        ui.popup("##entity_context", || {
            let Some(entity) = self.context_entity else {
                return;
            };
            if ui.menu_item("Focus") {
                *targets.selection = Some(entity);
                targets.commands.push(EditorCommand::FocusSelection);
            }
            if ui.menu_item("Delete") {
                targets.commands.push(EditorCommand::DeleteEntity(entity));
                self.context_entity = None;
            }
        });
    }
}

impl EditorWindow for HierarchyPanel {
    fn name(&self) -> String {
        "Hierarchy".to_string()
    }

    fn simple_name(&self) -> &'static str {
        "Hierarchy"
    }

    fn default_region(&self) -> DockRegion {
        DockRegion::Left
    }

    fn on_imgui(&mut self, ui: &Ui, ctx: &mut EditorContext<'_>) {
        Self::create_menu(ui, ctx.commands);
        ui.same_line();
        ui.set_next_item_width(-1.0);
        ui.input_text("##hierarchy_filter", &mut self.filter)
            .hint("Filter")
            .build();
        ui.separator();

        // The world is only read here; edits go through the command queue
        let world = &ctx.app.scenes.current().world;
        let mut targets = RowTargets {
            selection: &mut *ctx.selection,
            commands: &mut *ctx.commands,
        };

        if self.filter.is_empty() {
            let tree = HierarchyTree::build(world);
            for &root in &tree.roots {
                self.entity_row(ui, world, &tree, root, &mut targets);
            }
        } else {
            for entity in filter_entities(world, &self.filter) {
                ui.selectable_config(row_label(world, entity))
                    .selected(*targets.selection == Some(entity))
                    .build();
                self.handle_row_input(ui, entity, &mut targets);
            }
        }

        self.context_menu(ui, &mut targets);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use engine::prelude::{Name, Transform};

    #[test]
    fn test_tree_nests_children() {
        let mut world = World::new();
        let root = world.spawn((Name::new("root"), Transform::default()));
        let child = world.spawn((Name::new("child"), Parent(root)));
        let grandchild = world.spawn((Name::new("grandchild"), Parent(child)));
        let loose = world.spawn((Name::new("loose"),));

        let tree = HierarchyTree::build(&world);
        assert_eq!(tree.roots.len(), 2);
        assert!(tree.roots.contains(&root) && tree.roots.contains(&loose));
        assert_eq!(tree.children_of(root), &[child]);
        assert_eq!(tree.children_of(child), &[grandchild]);
        assert!(tree.children_of(loose).is_empty());
    }

    #[test]
    fn test_orphan_becomes_root() {
        let mut world = World::new();
        let parent = world.spawn((Name::new("parent"),));
        let child = world.spawn((Name::new("child"), Parent(parent)));
        world.despawn(parent).unwrap();

        let tree = HierarchyTree::build(&world);
        assert_eq!(tree.roots, vec![child]);
    }

    #[test]
    fn test_filter_ignores_case() {
        let mut world = World::new();
        let cube = world.spawn((Name::new("Red Cube"),));
        world.spawn((Name::new("Light"),));

        assert_eq!(filter_entities(&world, "cube"), vec![cube]);
        assert!(filter_entities(&world, "camera").is_empty());
    }
}

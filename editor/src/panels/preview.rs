//! Summary of the selected entity

use crate::component_icons::{components_of, entity_icon, entity_label, icon_for};
use crate::layout::DockRegion;
use crate::picking::world_bounds;
use crate::window::{EditorContext, EditorWindow};
use engine::prelude::Transform;
use imgui::Ui;

#[derive(Default)]
pub struct PreviewPanel;

impl PreviewPanel {
    pub fn new() -> Self {
        Self
    }
}

impl EditorWindow for PreviewPanel {
    fn name(&self) -> String {
        "Preview".to_string()
    }

    fn simple_name(&self) -> &'static str {
        "Preview"
    }

    fn default_region(&self) -> DockRegion {
        DockRegion::Right
    }

    fn on_imgui(&mut self, ui: &Ui, ctx: &mut EditorContext<'_>) {
        let world = &ctx.app.scenes.current().world;
        let Some(entity) = ctx.selection.filter(|e| world.contains(*e)) else {
            ui.text_disabled("Nothing selected");
            return;
        };

        ui.text(format!(
            "{} {}",
            entity_icon(world, entity),
            entity_label(world, entity)
        ));
        ui.separator();
        for component in components_of(world, entity) {
            ui.bullet_text(format!("{} {component}", icon_for(component)));
        }
        if let Some(transform) = world.try_get::<Transform>(entity) {
            ui.text(format!("Local position: {:.2}", transform.position));
        }
        let world_position = world.world_matrix(entity).w_axis.truncate();
        ui.text(format!("World position: {world_position:.2}"));
        match world_bounds(world, entity) {
            Some(bounds) => ui.text(format!(
                "Bounds: {:.2} (diagonal {:.2})",
                bounds.size(),
                bounds.diagonal()
            )),
            None => ui.text_disabled("No bounds"),
        }
    }
}

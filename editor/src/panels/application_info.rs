//! Application state overview: scene, play state, mounts and loaded sounds

use crate::commands::EditorCommand;
use crate::layout::DockRegion;
use crate::window::{EditorContext, EditorWindow};
use imgui::{TreeNodeFlags, Ui};

#[derive(Default)]
pub struct ApplicationInfoPanel;

impl ApplicationInfoPanel {
    pub fn new() -> Self {
        Self
    }
}

impl EditorWindow for ApplicationInfoPanel {
    fn name(&self) -> String {
        "ApplicationInfo".to_string()
    }

    fn simple_name(&self) -> &'static str {
        "ApplicationInfo"
    }

    fn default_region(&self) -> DockRegion {
        DockRegion::Left
    }

    fn on_imgui(&mut self, ui: &Ui, ctx: &mut EditorContext<'_>) {
        let app = &*ctx.app;
        let names: Vec<String> = app.scenes.scene_names().map(str::to_string).collect();
        let current_name = app.scenes.current_name().to_string();
        let mut current = names.iter().position(|n| *n == current_name).unwrap_or(0);
        if !names.is_empty() && ui.combo_simple_string("Scene", &mut current, &names) {
            ctx.commands
                .push(EditorCommand::SwitchScene(names[current].clone()));
        }
        if ui.button("Reload Scene") {
            ctx.commands.push(EditorCommand::ReloadScene);
        }

        ui.text(format!("Entities: {}", app.scenes.current().world.len()));
        ui.text(format!("Play state: {:?}", app.play_state));
        ui.text(format!(
            "Scene view: {}x{}{}",
            app.scene_view_size.0,
            app.scene_view_size.1,
            if app.scene_view_active { " (active)" } else { "" }
        ));
        ui.text(format!(
            "Mouse: {:.0}, {:.0}",
            app.input.mouse_position.0, app.input.mouse_position.1
        ));

        if ui.collapsing_header("Virtual File System", TreeNodeFlags::empty()) {
            for (name, dirs) in app.vfs.mounts() {
                for dir in dirs {
                    ui.text(format!("/{name} -> {}", dir.display()));
                }
            }
        }
        if ui.collapsing_header("Sounds", TreeNodeFlags::empty()) {
            if app.sounds.is_empty() {
                ui.text_disabled("None loaded");
            }
            for name in app.sounds.names() {
                ui.bullet_text(name);
            }
        }
    }
}

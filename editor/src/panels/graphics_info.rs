//! Graphics adapter details

use crate::layout::DockRegion;
use crate::window::{EditorContext, EditorWindow};
use imgui::Ui;

#[derive(Default)]
pub struct GraphicsInfoPanel;

impl GraphicsInfoPanel {
    pub fn new() -> Self {
        Self
    }
}

impl EditorWindow for GraphicsInfoPanel {
    fn name(&self) -> String {
        "GraphicsInfo".to_string()
    }

    fn simple_name(&self) -> &'static str {
        "GraphicsInfo"
    }

    fn default_region(&self) -> DockRegion {
        DockRegion::Left
    }

    fn on_imgui(&mut self, ui: &Ui, ctx: &mut EditorContext<'_>) {
        ui.text(format!("Configured API: {}", ctx.app.config.render_api.label()));
        let Some(info) = &ctx.app.graphics_info else {
            ui.text_disabled("No graphics device");
            return;
        };
        ui.text(format!("Active API: {}", info.api.label()));
        ui.separator();
        ui.text(format!("Adapter: {}", info.adapter_name));
        ui.text(format!("Type: {}", info.device_type));
        ui.text(format!("Driver: {} {}", info.driver, info.driver_info));
        ui.separator();
        ui.text(format!("Max texture size: {}", info.max_texture_dimension_2d));
        ui.text(format!("Max bind groups: {}", info.max_bind_groups));
    }
}

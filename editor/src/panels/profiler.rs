//! Frame timing panel

use crate::layout::DockRegion;
use crate::window::{EditorContext, EditorWindow};
use imgui::Ui;

#[derive(Default)]
pub struct ProfilerPanel {
    paused: bool,
    frozen: Vec<f32>,
}

impl ProfilerPanel {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Largest value in `history`, at least `floor`, used as the plot ceiling
pub fn plot_ceiling(history: &[f32], floor: f32) -> f32 {
    history.iter().copied().fold(floor, f32::max)
}

impl EditorWindow for ProfilerPanel {
    fn name(&self) -> String {
        "Profiler".to_string()
    }

    fn simple_name(&self) -> &'static str {
        "Profiler"
    }

    fn default_region(&self) -> DockRegion {
        DockRegion::Bottom
    }

    fn on_imgui(&mut self, ui: &Ui, ctx: &mut EditorContext<'_>) {
        let stats = &ctx.app.frame_stats;
        ui.text(format!(
            "FPS: {:.1}  Frame: {:.2} ms  Frames: {}",
            stats.fps,
            stats.average_frame_ms(),
            stats.frame_count
        ));
        ui.text(format!(
            "Entities: {}  Play state: {:?}",
            ctx.app.scenes.current().world.len(),
            ctx.app.play_state
        ));
        if ui.checkbox("Pause graph", &mut self.paused) && self.paused {
            self.frozen = stats.history_ms();
        }

        let history = if self.paused {
            self.frozen.clone()
        } else {
            stats.history_ms()
        };
        let ceiling = plot_ceiling(&history, 33.3);
        let width = ui.content_region_avail()[0];
        ui.plot_lines("##frame_times", &history)
            .overlay_text("ms")
            .scale_min(0.0)
            .scale_max(ceiling)
            .graph_size([width, 80.0])
            .build();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plot_ceiling() {
        assert_eq!(plot_ceiling(&[], 16.0), 16.0);
        assert_eq!(plot_ceiling(&[4.0, 40.0, 8.0], 16.0), 40.0);
    }
}

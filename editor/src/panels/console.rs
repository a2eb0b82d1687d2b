//! Console panel
//!
//! Shows log output captured by [`ConsoleLayer`](crate::console_log::ConsoleLayer).

use crate::console_log::{with_console, LogMessage};
use crate::layout::DockRegion;
use crate::window::{EditorContext, EditorWindow};
use imgui::Ui;
use tracing::Level;

pub struct ConsolePanel {
    filter: String,
    show_levels: [bool; 5],
    auto_scroll: bool,
}

const LEVELS: [Level; 5] = [Level::ERROR, Level::WARN, Level::INFO, Level::DEBUG, Level::TRACE];

impl Default for ConsolePanel {
    fn default() -> Self {
        Self {
            filter: String::new(),
            show_levels: [true, true, true, true, false],
            auto_scroll: true,
        }
    }
}

impl ConsolePanel {
    pub fn new() -> Self {
        Self::default()
    }

    fn is_visible(&self, message: &LogMessage) -> bool {
        let level_shown = LEVELS
            .iter()
            .position(|level| *level == message.level)
            .map(|index| self.show_levels[index])
            .unwrap_or(true);
        level_shown && (self.filter.is_empty() || message.message.contains(&self.filter))
    }
}

impl EditorWindow for ConsolePanel {
    fn name(&self) -> String {
        "Console".to_string()
    }

    fn simple_name(&self) -> &'static str {
        "Console"
    }

    fn default_region(&self) -> DockRegion {
        DockRegion::Bottom
    }

    fn on_imgui(&mut self, ui: &Ui, _ctx: &mut EditorContext<'_>) {
        if ui.button("Clear") {
            with_console(|buffer| buffer.clear());
        }
        ui.same_line();
        ui.checkbox("Auto-scroll", &mut self.auto_scroll);
        for (index, level) in LEVELS.iter().enumerate() {
            ui.same_line();
            ui.checkbox(level.as_str(), &mut self.show_levels[index]);
        }
        ui.set_next_item_width(200.0);
        ui.input_text("Filter", &mut self.filter).build();
        ui.separator();

        ui.child_window("##console_scroll").build(|| {
            with_console(|buffer| {
                for message in buffer.messages().filter(|message| self.is_visible(message)) {
                    ui.text_colored(
                        message.color(),
                        format!("[{}] {}: {}", message.level, message.target, message.message),
                    );
                }
            });
            if self.auto_scroll && ui.scroll_y() >= ui.scroll_max_y() {
                ui.set_scroll_here_y_with_ratio(1.0);
            }
        });
    }
}

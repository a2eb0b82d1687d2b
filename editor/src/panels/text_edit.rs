//! Plain text editor for scripts and shaders

use crate::commands::EditorCommand;
use crate::layout::DockRegion;
use crate::window::{EditorContext, EditorWindow};
use imgui::{Key, Ui};
use std::io;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Simple name shared by every text editor window
pub const TEXT_EDIT_NAME: &str = "TextEdit";

pub struct TextEditPanel {
    path: PathBuf,
    buffer: String,
    dirty: bool,
}

impl TextEditPanel {
    /// Open `path`; an unreadable file starts as an empty buffer
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let buffer = match std::fs::read_to_string(&path) {
            Ok(text) => text,
            Err(e) => {
                warn!(path = %path.display(), "Could not read file, starting empty: {e}");
                String::new()
            }
        };
        Self {
            path,
            buffer,
            dirty: false,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn text(&self) -> &str {
        &self.buffer
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.buffer = text.into();
        self.dirty = true;
    }

    pub fn save(&mut self) -> io::Result<()> {
        std::fs::write(&self.path, &self.buffer)?;
        self.dirty = false;
        info!(path = %self.path.display(), "Saved file");
        Ok(())
    }

    fn save_logged(&mut self) {
        if let Err(e) = self.save() {
            warn!(path = %self.path.display(), "Failed to save file: {e}");
        }
    }
}

impl EditorWindow for TextEditPanel {
    fn name(&self) -> String {
        let file = self
            .path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        format!("{file}###{TEXT_EDIT_NAME}")
    }

    fn simple_name(&self) -> &'static str {
        TEXT_EDIT_NAME
    }

    fn default_region(&self) -> DockRegion {
        DockRegion::Middle
    }

    fn on_imgui(&mut self, ui: &Ui, ctx: &mut EditorContext<'_>) {
        if ui.button("Save") || (ui.io().key_ctrl && ui.is_key_pressed(Key::S)) {
            self.save_logged();
        }
        ui.same_line();
        if ui.button("Close") {
            ctx.commands.push(EditorCommand::CloseWindow(ctx.window_id));
        }
        ui.same_line();
        let marker = if self.dirty { " *" } else { "" };
        ui.text(format!("{}{marker}", self.path.display()));

        let size = ui.content_region_avail();
        if ui
            .input_text_multiline("##text_edit_buffer", &mut self.buffer, size)
            .allow_tab_input(true)
            .build()
        {
            self.dirty = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edit_and_save() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("shader.wgsl");
        std::fs::write(&path, "fn main() {}").unwrap();

        let mut panel = TextEditPanel::new(&path);
        assert_eq!(panel.text(), "fn main() {}");
        assert!(!panel.is_dirty());

        panel.set_text("// edited");
        assert!(panel.is_dirty());
        panel.save().unwrap();
        assert!(!panel.is_dirty());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "// edited");
    }

    #[test]
    fn test_missing_file_opens_empty() {
        let dir = tempfile::tempdir().unwrap();
        let panel = TextEditPanel::new(dir.path().join("new.txt"));
        assert_eq!(panel.text(), "");
        assert_eq!(panel.simple_name(), TEXT_EDIT_NAME);
        assert!(panel.name().starts_with("new.txt"));
    }
}

//! Asset browser panel
//!
//! Browses the directories mounted in the virtual file system. Double-clicking
//! a file opens it through the editor's file-open dispatch.

use crate::commands::EditorCommand;
use crate::file_types::FileKind;
use crate::layout::DockRegion;
use crate::window::{EditorContext, EditorWindow};
use imgui::{SelectableFlags, Ui};
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

#[derive(Debug, Clone, PartialEq)]
pub struct AssetEntry {
    pub name: String,
    pub path: PathBuf,
    pub is_dir: bool,
    pub kind: FileKind,
}

/// Directory contents, directories first, then by name. Hidden entries are skipped.
pub fn list_directory(dir: &Path) -> io::Result<Vec<AssetEntry>> {
    let mut entries = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        let name = entry.file_name().to_string_lossy().into_owned();
        if name.starts_with('.') {
            continue;
        }
        let path = entry.path();
        let is_dir = entry.file_type()?.is_dir();
        let kind = if is_dir {
            FileKind::Unknown
        } else {
            FileKind::from_path(&path.to_string_lossy())
        };
        entries.push(AssetEntry {
            name,
            path,
            is_dir,
            kind,
        });
    }
    entries.sort_by(|a, b| b.is_dir.cmp(&a.is_dir).then_with(|| a.name.cmp(&b.name)));
    Ok(entries)
}

#[derive(Default)]
pub struct AssetsPanel {
    current: Option<PathBuf>,
    /// Root of the mount being browsed; navigation stops here
    root: Option<PathBuf>,
    entries: Vec<AssetEntry>,
    listed: Option<PathBuf>,
}

impl AssetsPanel {
    pub fn new() -> Self {
        Self::default()
    }

    fn navigate(&mut self, dir: PathBuf) {
        debug!(dir = %dir.display(), "Browsing assets");
        self.current = Some(dir);
    }

    fn refresh(&mut self) {
        let Some(dir) = self.current.clone() else {
            self.entries.clear();
            return;
        };
        self.entries = match list_directory(&dir) {
            Ok(entries) => entries,
            Err(e) => {
                warn!(dir = %dir.display(), "Failed to list asset directory: {e}");
                Vec::new()
            }
        };
        self.listed = Some(dir);
    }

    fn mount_selector(&mut self, ui: &Ui, ctx: &EditorContext<'_>) {
        let mounts: Vec<(String, PathBuf)> = ctx
            .app
            .vfs
            .mounts()
            .flat_map(|(name, paths)| paths.iter().map(move |p| (name.to_string(), p.clone())))
            .collect();
        if mounts.is_empty() {
            ui.text_disabled("No mounted directories");
            return;
        }
        if self.root.is_none() {
            let (_, path) = &mounts[0];
            self.root = Some(path.clone());
            self.navigate(path.clone());
        }
        for (name, path) in &mounts {
            let selected = self.root.as_deref() == Some(path.as_path());
            if ui.radio_button_bool(format!("/{name}##{}", path.display()), selected) {
                self.root = Some(path.clone());
                self.navigate(path.clone());
            }
            ui.same_line();
        }
        if ui.button("Refresh") {
            self.listed = None;
        }
    }
}

impl EditorWindow for AssetsPanel {
    fn name(&self) -> String {
        "Assets".to_string()
    }

    fn simple_name(&self) -> &'static str {
        "Assets"
    }

    fn default_region(&self) -> DockRegion {
        DockRegion::Bottom
    }

    fn on_imgui(&mut self, ui: &Ui, ctx: &mut EditorContext<'_>) {
        self.mount_selector(ui, ctx);
        let Some(current) = self.current.clone() else {
            return;
        };
        if self.listed.as_ref() != Some(&current) {
            self.refresh();
        }

        let shown = ctx
            .app
            .vfs
            .to_virtual_path(&current)
            .unwrap_or_else(|| current.display().to_string());
        ui.text(shown);
        ui.separator();

        let at_root = self.root.as_deref() == Some(current.as_path());
        let mut next_dir = None;
        ui.child_window("##asset_entries").build(|| {
            if !at_root && ui.selectable("[..]") {
                next_dir = current.parent().map(Path::to_path_buf);
            }
            for entry in &self.entries {
                let icon = if entry.is_dir { "[Dir]" } else { entry.kind.icon() };
                let clicked = ui
                    .selectable_config(format!("{icon} {}", entry.name))
                    .flags(SelectableFlags::ALLOW_DOUBLE_CLICK)
                    .build();
                if !clicked || !ui.is_mouse_double_clicked(imgui::MouseButton::Left) {
                    continue;
                }
                if entry.is_dir {
                    next_dir = Some(entry.path.clone());
                } else {
                    let path = ctx
                        .app
                        .vfs
                        .to_virtual_path(&entry.path)
                        .unwrap_or_else(|| entry.path.display().to_string());
                    ctx.commands.push(EditorCommand::OpenFile(path));
                }
            }
        });

        if let Some(dir) = next_dir {
            self.navigate(dir);
        }
    }
}

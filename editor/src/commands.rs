//! Requests raised by editor windows
//!
//! Windows draw while the editor iterates its window list, so anything that
//! changes the list, the selection flow or the scene layout is queued here and
//! applied by the editor once every window has drawn.

use crate::theme::Theme;
use crate::window::WindowId;
use engine::core::bounds::Ray;
use engine::prelude::{Entity, PrimitiveType, RenderApi};

#[derive(Debug, Clone, PartialEq)]
pub enum EditorCommand {
    /// Dispatch a file by extension
    OpenFile(String),
    OpenTextFile(String),
    /// Pick along a ray from the scene view
    SelectRay(Ray),
    FocusSelection,
    SwitchScene(String),
    ReloadScene,
    SpawnEmpty,
    SpawnPrimitive(PrimitiveType),
    DeleteEntity(Entity),
    SetRenderApi(RenderApi),
    SetTheme(Theme),
    CloseWindow(WindowId),
}

#[derive(Debug, Default)]
pub struct CommandQueue {
    pending: Vec<EditorCommand>,
}

impl CommandQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, command: EditorCommand) {
        self.pending.push(command);
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Get and clear pending commands, oldest first
    pub fn take(&mut self) -> Vec<EditorCommand> {
        std::mem::take(&mut self.pending)
    }
}

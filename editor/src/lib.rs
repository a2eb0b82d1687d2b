//! ImGui-based scene editor for the engine
//!
//! The editor owns a list of dockable windows (scene view, hierarchy,
//! inspector, console and friends), the entity selection and the editor
//! camera. A host application drives it through [`Editor`] and renders its
//! ImGui frames with [`imgui_host::ImGuiHost`].

pub mod camera_controller;
pub mod camera_transition;
pub mod commands;
pub mod component_icons;
pub mod console_log;
pub mod editor;
pub mod file_types;
pub mod gizmo;
pub mod imgui_host;
pub mod layout;
pub mod panels;
pub mod picking;
pub mod scene_operations;
pub mod settings;
pub mod theme;
pub mod window;

pub use console_log::ConsoleLayer;
pub use editor::Editor;
pub use imgui_host::ImGuiHost;
pub use settings::EditorSettings;
pub use theme::Theme;

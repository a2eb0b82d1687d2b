//! Editor UI panels
//!
//! Each panel implements [`EditorWindow`](crate::window::EditorWindow) and
//! draws the contents of one dockable window.

pub mod application_info;
pub mod assets;
pub mod console;
pub mod graphics_info;
pub mod hierarchy;
pub mod inspector;
pub mod preview;
pub mod profiler;
pub mod scene;
pub mod text_edit;

pub use application_info::ApplicationInfoPanel;
pub use assets::AssetsPanel;
pub use console::ConsolePanel;
pub use graphics_info::GraphicsInfoPanel;
pub use hierarchy::HierarchyPanel;
pub use inspector::InspectorPanel;
pub use preview::PreviewPanel;
pub use profiler::ProfilerPanel;
pub use scene::ScenePanel;
pub use text_edit::{TextEditPanel, TEXT_EDIT_NAME};

//! Graphics module
//!
//! Provides the graphics context handle, mesh/sprite/light data, model
//! loading and debug line collection.

pub mod context;
pub mod debug_draw;
pub mod light;
pub mod mesh;
pub mod model_loader;
pub mod sprite;

// Re-export commonly used types
pub use context::{GraphicsContext, GraphicsError, GraphicsInfo, RenderApi};
pub use debug_draw::{DebugDrawFlags, DebugLine, DebugRenderer};
pub use light::{Light, LightKind};
pub use mesh::{Mesh, MeshComponent, PrimitiveType, Vertex};
pub use model_loader::{load_model, ModelLoadError};
pub use sprite::Sprite;

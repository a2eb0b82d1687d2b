//! Engine runtime driven by the scene editor
//!
//! This crate provides the scene registry, camera and picking maths, mesh and
//! sprite data, the graphics context handle, sound library, virtual file
//! system and the application state the editor operates on.

pub mod app;
pub mod audio;
pub mod config;
pub mod core;
pub mod graphics;
pub mod input;
pub mod io;
pub mod physics;
pub mod scene;
pub mod utils;

pub use glam;
pub use hecs;
pub use wgpu;
pub use winit;

// Re-export commonly used types
pub mod prelude {
    // Entity system types
    pub use crate::core::entity::{
        update_hierarchy_system, Entity, GlobalTransform, Name, Parent, Transform, World,
    };

    // Camera and picking types
    pub use crate::core::bounds::{Aabb, Ray};
    pub use crate::core::camera::{Camera, ProjectionMode};
    pub use crate::core::object::{GameObject, ObjectComponent};
    pub use crate::core::time::TimeStep;

    // Math types
    pub use glam::{Mat3, Mat4, Quat, Vec2, Vec3, Vec4};

    // Graphics types
    pub use crate::graphics::{
        DebugDrawFlags, DebugRenderer, GraphicsContext, Light, Mesh, MeshComponent,
        PrimitiveType, RenderApi, Sprite,
    };

    // Audio types
    pub use crate::audio::{SoundLibrary, SoundNode};

    // Physics types
    pub use crate::physics::{Physics2D, Physics3D, RigidBody2D, RigidBody3D};

    // App types
    pub use crate::app::{Application, PlayState};
    pub use crate::config::EngineConfig;
    pub use crate::io::Vfs;
    pub use crate::scene::SceneManager;

    // Input types
    pub use crate::input::InputState;

    pub use wgpu;
    pub use winit;
}

const DEFAULT_FILTER: &str = "info,wgpu_core=warn,wgpu_hal=warn";

/// Initialize logging for the engine
pub fn init_logging() {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| DEFAULT_FILTER.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Initialize logging with an extra layer, such as the editor console capture
pub fn init_logging_with<L>(layer: L)
where
    L: tracing_subscriber::Layer<tracing_subscriber::Registry> + Send + Sync + 'static,
{
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    tracing_subscriber::registry()
        .with(layer)
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| DEFAULT_FILTER.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

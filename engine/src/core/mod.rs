//! Core engine types: scene registry, camera, bounds and timing

pub mod bounds;
pub mod camera;
pub mod entity;
pub mod object;
pub mod time;

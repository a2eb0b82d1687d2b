//! Audio components for the ECS

use crate::audio::Sound;
use glam::Vec3;
use std::sync::Arc;

/// Positional sound emitter
#[derive(Debug, Clone)]
pub struct SoundNode {
    pub sound: Option<Arc<Sound>>,
    /// Volume (0.0 to 1.0)
    pub volume: f32,
    pub position: Vec3,
    pub looping: bool,
    /// Global sounds ignore distance attenuation
    pub is_global: bool,
    pub paused: bool,
    /// Distance at which attenuation starts
    pub reference_distance: f32,
    /// Maximum hearing distance
    pub radius: f32,
}

impl Default for SoundNode {
    fn default() -> Self {
        Self {
            sound: None,
            volume: 1.0,
            position: Vec3::ZERO,
            looping: false,
            is_global: false,
            paused: true,
            reference_distance: 1.0,
            radius: 30.0,
        }
    }
}

impl SoundNode {
    /// Emitter set up the way freshly opened audio files are placed in a scene
    pub fn for_opened_file(sound: Arc<Sound>) -> Self {
        Self {
            sound: Some(sound),
            volume: 1.0,
            position: Vec3::new(0.1, 10.0, 10.0),
            looping: true,
            is_global: false,
            paused: false,
            reference_distance: 1.0,
            radius: 30.0,
        }
    }
}

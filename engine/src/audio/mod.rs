//! Sound assets and emitters
//!
//! Sounds are loaded into a [`SoundLibrary`] by name; entities play them
//! through a [`SoundNode`]. Mixing and playback are left to the audio backend.

pub mod components;
pub mod sound;

pub use components::SoundNode;
pub use sound::{Sound, SoundError, SoundFormat, SoundLibrary};

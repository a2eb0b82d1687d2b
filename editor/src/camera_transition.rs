//! Editor camera focus
//!
//! Focusing an orthographic camera is immediate. A perspective camera glides
//! from where it is to a point `distance` behind the target along its look
//! direction, linearly over `1 / speed` seconds.

use engine::prelude::{Camera, Mat4, Vec3};

/// Distance used by the F key
pub const FOCUS_DISTANCE: f32 = 2.0;
/// Speed used by the F key and double clicks
pub const FOCUS_SPEED: f32 = 2.0;

/// An in-flight camera move
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraTransition {
    pub start: Vec3,
    pub destination: Vec3,
    pub start_time: f32,
    pub duration: f32,
}

impl CameraTransition {
    pub fn new(start: Vec3, destination: Vec3, start_time: f32, speed: f32) -> Self {
        Self {
            start,
            destination,
            start_time,
            duration: if speed > 0.0 { 1.0 / speed } else { 0.0 },
        }
    }

    /// Position at time `now`, and whether the transition has finished
    pub fn sample(&self, now: f32) -> (Vec3, bool) {
        if self.duration <= 0.0 {
            return (self.destination, true);
        }
        let progress = (now - self.start_time) / self.duration;
        if progress >= 1.0 {
            (self.destination, true)
        } else {
            (self.start.lerp(self.destination, progress.max(0.0)), false)
        }
    }
}

/// What focusing the camera should do
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Focus {
    /// Move there now and set the orthographic height
    Jump { position: Vec3, ortho_height: f32 },
    Transition(CameraTransition),
}

/// Plan a focus on `point` for a camera placed at `camera_world`
pub fn plan_focus(
    camera: &Camera,
    camera_world: Mat4,
    point: Vec3,
    distance: f32,
    speed: f32,
    now: f32,
) -> Focus {
    if camera.is_orthographic() {
        return Focus::Jump {
            position: point,
            ortho_height: distance,
        };
    }

    let start = camera_world.w_axis.truncate();
    let destination = point - Camera::look_direction(camera_world) * distance;
    Focus::Transition(CameraTransition::new(start, destination, now, speed))
}

//! Fly controller for the editor camera
//!
//! Perspective cameras look around while the right mouse button is held and
//! move with WASD (Q/E for down/up). Orthographic cameras pan with WASD while
//! the right mouse button is held and zoom with the scroll wheel.

use engine::prelude::{Camera, InputState, ProjectionMode, Quat, Transform, Vec3};
use engine::winit::event::MouseButton;
use engine::winit::keyboard::KeyCode;

const MAX_PITCH: f32 = 89.0;
const MIN_ORTHO_HEIGHT: f32 = 0.1;

#[derive(Debug, Clone)]
pub struct EditorCameraController {
    /// Units per second
    pub move_speed: f32,
    /// Degrees per pixel of mouse movement
    pub look_speed: f32,
    /// Units per scroll line
    pub zoom_speed: f32,
    yaw: f32,
    pitch: f32,
}

impl Default for EditorCameraController {
    fn default() -> Self {
        Self {
            move_speed: 5.0,
            look_speed: 0.15,
            zoom_speed: 1.0,
            yaw: 0.0,
            pitch: 0.0,
        }
    }
}

impl EditorCameraController {
    /// Take yaw and pitch from an existing camera orientation
    pub fn sync_from(&mut self, transform: &Transform) {
        let forward = transform.rotation * Vec3::NEG_Z;
        self.pitch = forward.y.clamp(-1.0, 1.0).asin().to_degrees();
        self.yaw = (-forward.x).atan2(-forward.z).to_degrees();
    }

    pub fn update(
        &mut self,
        transform: &mut Transform,
        camera: &mut Camera,
        input: &InputState,
        dt: f32,
    ) {
        if camera.is_orthographic() {
            self.update_orthographic(transform, camera, input, dt);
        } else {
            self.update_perspective(transform, input, dt);
        }
    }

    fn update_perspective(&mut self, transform: &mut Transform, input: &InputState, dt: f32) {
        let looking = input.is_mouse_button_pressed(MouseButton::Right);
        if looking {
            let (dx, dy) = input.mouse_delta;
            self.yaw -= dx * self.look_speed;
            self.pitch = (self.pitch - dy * self.look_speed).clamp(-MAX_PITCH, MAX_PITCH);
            transform.rotation = Quat::from_rotation_y(self.yaw.to_radians())
                * Quat::from_rotation_x(self.pitch.to_radians());
        }

        let forward = transform.rotation * Vec3::NEG_Z;
        let right = transform.rotation * Vec3::X;
        let mut direction = Vec3::ZERO;

        if looking {
            if input.is_key_pressed(KeyCode::KeyW) {
                direction += forward;
            }
            if input.is_key_pressed(KeyCode::KeyS) {
                direction -= forward;
            }
            if input.is_key_pressed(KeyCode::KeyD) {
                direction += right;
            }
            if input.is_key_pressed(KeyCode::KeyA) {
                direction -= right;
            }
            if input.is_key_pressed(KeyCode::KeyE) {
                direction += Vec3::Y;
            }
            if input.is_key_pressed(KeyCode::KeyQ) {
                direction -= Vec3::Y;
            }
        }

        let mut speed = self.move_speed;
        if input.is_key_pressed(KeyCode::ShiftLeft) {
            speed *= 4.0;
        }

        transform.position += direction.normalize_or_zero() * speed * dt;
        transform.position += forward * input.scroll_delta * self.zoom_speed;
    }

    fn update_orthographic(
        &mut self,
        transform: &mut Transform,
        camera: &mut Camera,
        input: &InputState,
        dt: f32,
    ) {
        // Without the right button WASD belong to the gizmo shortcuts
        if input.is_mouse_button_pressed(MouseButton::Right) {
            let mut direction = Vec3::ZERO;
            if input.is_key_pressed(KeyCode::KeyW) {
                direction += Vec3::Y;
            }
            if input.is_key_pressed(KeyCode::KeyS) {
                direction -= Vec3::Y;
            }
            if input.is_key_pressed(KeyCode::KeyD) {
                direction += Vec3::X;
            }
            if input.is_key_pressed(KeyCode::KeyA) {
                direction -= Vec3::X;
            }
            transform.position += direction.normalize_or_zero() * self.move_speed * dt;
        }

        if input.scroll_delta != 0.0 {
            if let ProjectionMode::Orthographic { height } = camera.projection_mode {
                let new_height =
                    (height - input.scroll_delta * self.zoom_speed).max(MIN_ORTHO_HEIGHT);
                camera.set_ortho_height(new_height);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use engine::winit::event::ElementState;

    #[test]
    fn test_keys_move_only_while_looking() {
        let mut controller = EditorCameraController::default();
        let mut camera = Camera::default();
        let mut transform = Transform::default();
        let mut input = InputState::new();

        input.handle_key(KeyCode::KeyW, ElementState::Pressed, false);
        controller.update(&mut transform, &mut camera, &input, 1.0);
        assert_eq!(transform.position, Vec3::ZERO);

        input.handle_mouse_button(MouseButton::Right, ElementState::Pressed);
        controller.update(&mut transform, &mut camera, &input, 1.0);
        assert!((transform.position - Vec3::new(0.0, 0.0, -5.0)).length() < 1e-4);
    }

    #[test]
    fn test_orthographic_scroll_zooms() {
        let mut controller = EditorCameraController::default();
        let mut camera = Camera::orthographic(10.0, 1.0, 0.1, 100.0);
        let mut transform = Transform::default();
        let mut input = InputState::new();
        input.add_scroll(2.0);

        controller.update(&mut transform, &mut camera, &input, 0.016);
        assert_eq!(
            camera.projection_mode,
            ProjectionMode::Orthographic { height: 8.0 }
        );
    }

    #[test]
    fn test_orthographic_pan_needs_right_button() {
        let mut controller = EditorCameraController::default();
        let mut camera = Camera::orthographic(10.0, 1.0, -100.0, 100.0);
        let mut transform = Transform::default();
        let mut input = InputState::new();

        input.handle_key(KeyCode::KeyW, ElementState::Pressed, false);
        controller.update(&mut transform, &mut camera, &input, 1.0);
        assert_eq!(transform.position, Vec3::ZERO);

        input.handle_mouse_button(MouseButton::Right, ElementState::Pressed);
        controller.update(&mut transform, &mut camera, &input, 1.0);
        assert!((transform.position - Vec3::new(0.0, 5.0, 0.0)).length() < 1e-4);
    }

    #[test]
    fn test_sync_from_round_trips_orientation() {
        let mut controller = EditorCameraController::default();
        let transform =
            Transform::from_position(Vec3::ZERO).looking_at(Vec3::new(1.0, 0.0, -1.0), Vec3::Y);
        controller.sync_from(&transform);
        assert!((controller.yaw - (-45.0)).abs() < 1e-3);
        assert!(controller.pitch.abs() < 1e-3);
    }
}

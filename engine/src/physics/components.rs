//! Physics body handles attached to entities
//!
//! The solver itself lives outside the editor; entities only carry a handle
//! to the body the solver owns. The editor talks to bodies through the
//! [`PhysicsObject2D`] and [`PhysicsObject3D`] setters, for example to keep a
//! body in sync after the gizmo moved its entity.

use glam::{Quat, Vec2, Vec3};
use serde::{Deserialize, Serialize};

/// Planar body as seen by the editor
pub trait PhysicsObject2D: Send + Sync {
    fn position(&self) -> Vec2;
    fn set_position(&mut self, position: Vec2);
    fn angle(&self) -> f32;
    fn set_angle(&mut self, angle: f32);
}

/// Spatial body as seen by the editor
pub trait PhysicsObject3D: Send + Sync {
    fn position(&self) -> Vec3;
    fn set_position(&mut self, position: Vec3);
    fn orientation(&self) -> Quat;
    fn set_orientation(&mut self, orientation: Quat);
}

/// Simple 2D body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RigidBody2D {
    pub position: Vec2,
    pub angle: f32,
    /// Mass in kilograms
    pub mass: f32,
    pub linear_velocity: Vec2,
    pub is_static: bool,
}

impl Default for RigidBody2D {
    fn default() -> Self {
        Self {
            position: Vec2::ZERO,
            angle: 0.0,
            mass: 1.0,
            linear_velocity: Vec2::ZERO,
            is_static: false,
        }
    }
}

impl RigidBody2D {
    pub fn dynamic(position: Vec2, mass: f32) -> Self {
        Self {
            position,
            mass,
            ..Default::default()
        }
    }

    pub fn fixed(position: Vec2) -> Self {
        Self {
            position,
            is_static: true,
            ..Default::default()
        }
    }
}

impl PhysicsObject2D for RigidBody2D {
    fn position(&self) -> Vec2 {
        self.position
    }

    fn set_position(&mut self, position: Vec2) {
        self.position = position;
    }

    fn angle(&self) -> f32 {
        self.angle
    }

    fn set_angle(&mut self, angle: f32) {
        self.angle = angle;
    }
}

/// Simple 3D body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RigidBody3D {
    pub position: Vec3,
    pub orientation: Quat,
    /// Mass in kilograms
    pub mass: f32,
    /// Linear damping coefficient
    pub linear_damping: f32,
    pub linear_velocity: Vec3,
    pub angular_velocity: Vec3,
    /// Kinematic bodies are not affected by forces
    pub is_kinematic: bool,
}

impl Default for RigidBody3D {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            orientation: Quat::IDENTITY,
            mass: 1.0,
            linear_damping: 0.0,
            linear_velocity: Vec3::ZERO,
            angular_velocity: Vec3::ZERO,
            is_kinematic: false,
        }
    }
}

impl RigidBody3D {
    /// Create a dynamic body with the given mass
    pub fn dynamic(position: Vec3, mass: f32) -> Self {
        Self {
            position,
            mass,
            ..Default::default()
        }
    }

    /// Create a kinematic body (not affected by forces)
    pub fn kinematic(position: Vec3) -> Self {
        Self {
            position,
            is_kinematic: true,
            ..Default::default()
        }
    }

    /// Apply a force to the body
    pub fn apply_force(&mut self, force: Vec3, dt: f32) {
        if !self.is_kinematic {
            self.linear_velocity += force / self.mass * dt;
        }
    }

    /// Apply damping to velocities
    pub fn apply_damping(&mut self, dt: f32) {
        self.linear_velocity *= (1.0 - self.linear_damping * dt).max(0.0);
    }
}

impl PhysicsObject3D for RigidBody3D {
    fn position(&self) -> Vec3 {
        self.position
    }

    fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }

    fn orientation(&self) -> Quat {
        self.orientation
    }

    fn set_orientation(&mut self, orientation: Quat) {
        self.orientation = orientation;
    }
}

/// Entity component holding a 2D body handle
pub struct Physics2D {
    pub object: Box<dyn PhysicsObject2D>,
}

impl Physics2D {
    pub fn new(object: impl PhysicsObject2D + 'static) -> Self {
        Self {
            object: Box::new(object),
        }
    }
}

/// Entity component holding a 3D body handle
pub struct Physics3D {
    pub object: Box<dyn PhysicsObject3D>,
}

impl Physics3D {
    pub fn new(object: impl PhysicsObject3D + 'static) -> Self {
        Self {
            object: Box::new(object),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_handles_forward_setters() {
        let mut body = Physics3D::new(RigidBody3D::default());
        body.object.set_position(Vec3::new(1.0, 2.0, 3.0));
        body.object.set_orientation(Quat::from_rotation_x(0.5));
        assert_eq!(body.object.position(), Vec3::new(1.0, 2.0, 3.0));
        assert!(body
            .object
            .orientation()
            .abs_diff_eq(Quat::from_rotation_x(0.5), 1e-6));

        let mut flat = Physics2D::new(RigidBody2D::fixed(Vec2::ONE));
        flat.object.set_position(Vec2::new(4.0, 5.0));
        assert_eq!(flat.object.position(), Vec2::new(4.0, 5.0));
    }

    #[test]
    fn test_kinematic_ignores_forces() {
        let mut body = RigidBody3D::kinematic(Vec3::ZERO);
        body.apply_force(Vec3::Y * 10.0, 1.0);
        assert_eq!(body.linear_velocity, Vec3::ZERO);

        let mut body = RigidBody3D::dynamic(Vec3::ZERO, 2.0);
        body.apply_force(Vec3::Y * 10.0, 1.0);
        assert_eq!(body.linear_velocity, Vec3::Y * 5.0);

        body.linear_damping = 0.5;
        body.apply_damping(1.0);
        assert_eq!(body.linear_velocity, Vec3::Y * 2.5);
    }
}

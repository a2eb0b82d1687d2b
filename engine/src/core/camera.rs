//! Camera component and utilities
//!
//! Provides camera functionality for the editor viewport, including perspective and
//! orthographic projections and screen-space picking rays.

use crate::core::bounds::Ray;
use glam::{Mat4, Vec3, Vec4};
use serde::{Deserialize, Serialize};

/// Camera component that defines projection parameters for rendering
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Camera {
    /// Field of view in radians (for perspective projection)
    pub fov_y_radians: f32,
    /// Aspect ratio (width / height)
    pub aspect_ratio: f32,
    /// Near clipping plane distance
    pub z_near: f32,
    /// Far clipping plane distance
    pub z_far: f32,
    /// Projection mode (perspective or orthographic)
    pub projection_mode: ProjectionMode,
}

/// Projection mode for the camera
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub enum ProjectionMode {
    /// Perspective projection with depth
    Perspective,
    /// Orthographic projection (parallel)
    Orthographic {
        /// Height of the orthographic view
        height: f32,
    },
}

impl Default for Camera {
    fn default() -> Self {
        Self::perspective(60.0, 16.0 / 9.0, 0.1, 1000.0)
    }
}

impl Camera {
    /// Create a perspective camera
    ///
    /// # Arguments
    /// * `fov_y_degrees` - Vertical field of view in degrees
    /// * `aspect_ratio` - Width divided by height
    /// * `z_near` - Near clipping plane distance
    /// * `z_far` - Far clipping plane distance
    pub fn perspective(fov_y_degrees: f32, aspect_ratio: f32, z_near: f32, z_far: f32) -> Self {
        Self {
            fov_y_radians: fov_y_degrees.to_radians(),
            aspect_ratio,
            z_near,
            z_far,
            projection_mode: ProjectionMode::Perspective,
        }
    }

    /// Create an orthographic camera
    pub fn orthographic(height: f32, aspect_ratio: f32, z_near: f32, z_far: f32) -> Self {
        Self {
            fov_y_radians: 0.0, // Not used for orthographic
            aspect_ratio,
            z_near,
            z_far,
            projection_mode: ProjectionMode::Orthographic { height },
        }
    }

    pub fn is_orthographic(&self) -> bool {
        matches!(self.projection_mode, ProjectionMode::Orthographic { .. })
    }

    /// Set the orthographic view height; ignored for perspective cameras
    pub fn set_ortho_height(&mut self, new_height: f32) {
        if let ProjectionMode::Orthographic { height } = &mut self.projection_mode {
            *height = new_height;
        }
    }

    /// Calculate the projection matrix for this camera
    pub fn projection_matrix(&self) -> Mat4 {
        match self.projection_mode {
            ProjectionMode::Perspective => Mat4::perspective_rh(
                self.fov_y_radians,
                self.aspect_ratio,
                self.z_near,
                self.z_far,
            ),
            ProjectionMode::Orthographic { height } => {
                let half_height = height * 0.5;
                let half_width = half_height * self.aspect_ratio;
                Mat4::orthographic_rh(
                    -half_width,
                    half_width,
                    -half_height,
                    half_height,
                    self.z_near,
                    self.z_far,
                )
            }
        }
    }

    /// Direction the camera looks in world space (local -Z)
    pub fn look_direction(camera_world: Mat4) -> Vec3 {
        camera_world.transform_vector3(Vec3::NEG_Z).normalize_or_zero()
    }

    /// Update the aspect ratio (useful when window resizes)
    pub fn set_aspect_ratio(&mut self, aspect_ratio: f32) {
        self.aspect_ratio = aspect_ratio;
    }

    /// Build a world-space ray through a point of the viewport.
    ///
    /// `x` and `y` are normalised viewport coordinates in `[0, 1]` with the
    /// origin at the top-left corner.
    pub fn screen_ray(&self, x: f32, y: f32, camera_world: Mat4) -> Ray {
        let ndc_x = x * 2.0 - 1.0;
        let ndc_y = 1.0 - y * 2.0;

        let inverse = (self.projection_matrix() * camera_world.inverse()).inverse();
        // glam projections map near to z = 0 and far to z = 1
        let near = inverse.project_point3(Vec3::new(ndc_x, ndc_y, 0.0));
        let far = inverse.project_point3(Vec3::new(ndc_x, ndc_y, 1.0));

        Ray::new(near, far - near)
    }

    /// World-space corners of the view frustum, near plane first
    pub fn frustum_corners(&self, camera_world: Mat4) -> [Vec3; 8] {
        let inverse = (self.projection_matrix() * camera_world.inverse()).inverse();
        let ndc = [
            Vec4::new(-1.0, -1.0, 0.0, 1.0),
            Vec4::new(1.0, -1.0, 0.0, 1.0),
            Vec4::new(1.0, 1.0, 0.0, 1.0),
            Vec4::new(-1.0, 1.0, 0.0, 1.0),
            Vec4::new(-1.0, -1.0, 1.0, 1.0),
            Vec4::new(1.0, -1.0, 1.0, 1.0),
            Vec4::new(1.0, 1.0, 1.0, 1.0),
            Vec4::new(-1.0, 1.0, 1.0, 1.0),
        ];
        ndc.map(|corner| {
            let world = inverse * corner;
            world.truncate() / world.w
        })
    }
}

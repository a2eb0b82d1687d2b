//! Immediate-mode debug line collection
//!
//! Systems push world-space line segments into a [`DebugRenderer`] during a frame;
//! the editor projects them through the active camera and draws them over the
//! scene view, then clears the list.

use crate::core::bounds::Aabb;
use bitflags::bitflags;
use glam::{Vec3, Vec4};
use serde::{Deserialize, Serialize};

bitflags! {
    /// Which debug overlays are drawn for every object in the scene
    #[derive(Debug, Serialize, Deserialize, Copy, Clone, Hash, PartialEq, Eq, Default)]
    pub struct DebugDrawFlags: u32 {
        const MESH_BOUNDING_BOXES = 0b0000_0001;
        const SPRITE_BOXES = 0b0000_0010;
        const CAMERA_FRUSTUM = 0b0000_0100;
        const BOUNDING_RADIUS = 0b0000_1000;
    }
}

pub const COLOR_BOUNDS: Vec4 = Vec4::new(0.8, 0.8, 0.8, 0.2);
pub const COLOR_SELECTED: Vec4 = Vec4::new(0.1, 0.9, 0.1, 0.6);
pub const COLOR_FRUSTUM: Vec4 = Vec4::new(0.9, 0.9, 0.9, 1.0);
pub const COLOR_BOUNDING_RADIUS: Vec4 = Vec4::new(0.3, 0.6, 0.4, 0.2);

/// A single world-space line segment
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DebugLine {
    pub start: Vec3,
    pub end: Vec3,
    pub color: Vec4,
}

/// Per-frame list of debug lines
#[derive(Debug, Default)]
pub struct DebugRenderer {
    lines: Vec<DebugLine>,
}

const CIRCLE_SEGMENTS: usize = 32;

impl DebugRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn line(&mut self, start: Vec3, end: Vec3, color: Vec4) {
        self.lines.push(DebugLine { start, end, color });
    }

    /// Twelve edges of a box
    pub fn aabb(&mut self, aabb: &Aabb, color: Vec4) {
        let c = aabb.corners();
        for i in 0..4 {
            let j = (i + 1) % 4;
            self.line(c[i], c[j], color);
            self.line(c[i + 4], c[j + 4], color);
            self.line(c[i], c[i + 4], color);
        }
    }

    /// Frustum from the 8 corners returned by `Camera::frustum_corners`
    pub fn frustum(&mut self, corners: &[Vec3; 8], color: Vec4) {
        for i in 0..4 {
            let j = (i + 1) % 4;
            self.line(corners[i], corners[j], color);
            self.line(corners[i + 4], corners[j + 4], color);
            self.line(corners[i], corners[i + 4], color);
        }
    }

    /// Circle in the plane spanned by `axis_a` and `axis_b`
    pub fn circle(&mut self, center: Vec3, radius: f32, axis_a: Vec3, axis_b: Vec3, color: Vec4) {
        let point = |i: usize| {
            let angle = i as f32 / CIRCLE_SEGMENTS as f32 * std::f32::consts::TAU;
            center + (axis_a * angle.cos() + axis_b * angle.sin()) * radius
        };
        for i in 0..CIRCLE_SEGMENTS {
            self.line(point(i), point(i + 1), color);
        }
    }

    /// Three great circles approximating a sphere
    pub fn sphere(&mut self, center: Vec3, radius: f32, color: Vec4) {
        self.circle(center, radius, Vec3::X, Vec3::Y, color);
        self.circle(center, radius, Vec3::X, Vec3::Z, color);
        self.circle(center, radius, Vec3::Y, Vec3::Z, color);
    }

    pub fn lines(&self) -> &[DebugLine] {
        &self.lines
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aabb_has_twelve_edges() {
        let mut renderer = DebugRenderer::new();
        renderer.aabb(&Aabb::new(Vec3::ZERO, Vec3::ONE), COLOR_BOUNDS);
        assert_eq!(renderer.lines().len(), 12);

        renderer.clear();
        assert!(renderer.lines().is_empty());
    }

    #[test]
    fn test_circle_points_lie_on_radius() {
        let mut renderer = DebugRenderer::new();
        renderer.sphere(Vec3::new(1.0, 2.0, 3.0), 2.0, COLOR_BOUNDING_RADIUS);
        assert_eq!(renderer.lines().len(), CIRCLE_SEGMENTS * 3);
        for line in renderer.lines() {
            let distance = (line.start - Vec3::new(1.0, 2.0, 3.0)).length();
            assert!((distance - 2.0).abs() < 1e-4);
        }
    }

    #[test]
    fn test_flags_toggle() {
        let mut flags = DebugDrawFlags::default();
        flags.toggle(DebugDrawFlags::CAMERA_FRUSTUM);
        assert!(flags.contains(DebugDrawFlags::CAMERA_FRUSTUM));
        assert!(!flags.contains(DebugDrawFlags::SPRITE_BOXES));

        let json = serde_json::to_string(&flags).unwrap();
        let back: DebugDrawFlags = serde_json::from_str(&json).unwrap();
        assert_eq!(back, flags);
    }
}

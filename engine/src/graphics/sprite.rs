//! 2D sprite component

use crate::core::bounds::Aabb;
use glam::{Vec2, Vec4};
use serde::{Deserialize, Serialize};

/// Textured or flat-coloured quad in the XY plane of its entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sprite {
    /// Bottom-left corner in local space
    pub position: Vec2,
    /// Extent of the quad
    pub scale: Vec2,
    pub color: Vec4,
    /// Virtual path of the texture, if any
    pub texture: Option<String>,
}

impl Default for Sprite {
    fn default() -> Self {
        Self {
            position: Vec2::ZERO,
            scale: Vec2::ONE,
            color: Vec4::ONE,
            texture: None,
        }
    }
}

impl Sprite {
    pub fn new(position: Vec2, scale: Vec2, color: Vec4) -> Self {
        Self {
            position,
            scale,
            color,
            texture: None,
        }
    }

    /// Local bounds: the rectangle `[position, position + scale]`
    pub fn bounding_box(&self) -> Aabb {
        Aabb::from_rect(self.position, self.scale)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    #[test]
    fn test_sprite_bounds() {
        let sprite = Sprite::new(Vec2::new(-1.0, 2.0), Vec2::new(2.0, 1.0), Vec4::ONE);
        let bounds = sprite.bounding_box();
        assert_eq!(bounds.min, Vec3::new(-1.0, 2.0, 0.0));
        assert_eq!(bounds.max, Vec3::new(1.0, 3.0, 0.0));
    }
}

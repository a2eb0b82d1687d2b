//! Mesh component and vertex data structures
//!
//! Provides mesh data structures and primitive generation functions
//! for the shapes the editor can create: cube, sphere, pyramid, plane,
//! cylinder and capsule.

use crate::core::bounds::Aabb;
use bytemuck::{Pod, Zeroable};
use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::f32::consts::{FRAC_PI_2, PI, TAU};
use std::sync::Arc;

/// Vertex data structure for GPU upload
///
/// This struct is tightly packed for efficient GPU transfer using bytemuck.
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct Vertex {
    /// Position in 3D space
    pub position: [f32; 3],
    /// Surface normal vector (normalized)
    pub normal: [f32; 3],
    /// Texture coordinates (UV mapping)
    pub uv: [f32; 2],
}

impl Vertex {
    /// Create a new vertex with the given attributes
    pub const fn new(position: [f32; 3], normal: [f32; 3], uv: [f32; 2]) -> Self {
        Self {
            position,
            normal,
            uv,
        }
    }
}

/// Geometry plus the flag telling pickers and renderers whether to consider it
#[derive(Debug, Clone)]
pub struct Mesh {
    /// Vertex data for the mesh
    pub vertices: Vec<Vertex>,
    /// Index data for triangle assembly
    pub indices: Vec<u32>,
    /// Inactive meshes are skipped by picking and debug drawing
    pub active: bool,
    bounds: Aabb,
}

impl Mesh {
    /// Create a new mesh from vertices and indices
    pub fn new(vertices: Vec<Vertex>, indices: Vec<u32>) -> Self {
        let positions: Vec<Vec3> = vertices.iter().map(|v| Vec3::from(v.position)).collect();
        Self {
            vertices,
            indices,
            active: true,
            bounds: Aabb::from_points(&positions),
        }
    }

    /// Local-space bounding box, computed at construction
    pub fn bounding_box(&self) -> Aabb {
        self.bounds
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Create a cube mesh with the given size
    ///
    /// The cube is centered at the origin with each side having length `size`.
    pub fn cube(size: f32) -> Self {
        let half = size * 0.5;

        let positions = [
            [-half, -half, -half], // 0: left bottom back
            [half, -half, -half],  // 1: right bottom back
            [half, half, -half],   // 2: right top back
            [-half, half, -half],  // 3: left top back
            [-half, -half, half],  // 4: left bottom front
            [half, -half, half],   // 5: right bottom front
            [half, half, half],    // 6: right top front
            [-half, half, half],   // 7: left top front
        ];

        // (corner indices, normal) per face
        let faces: [([usize; 4], [f32; 3]); 6] = [
            ([4, 5, 6, 7], [0.0, 0.0, 1.0]),
            ([1, 0, 3, 2], [0.0, 0.0, -1.0]),
            ([7, 6, 2, 3], [0.0, 1.0, 0.0]),
            ([0, 1, 5, 4], [0.0, -1.0, 0.0]),
            ([5, 1, 2, 6], [1.0, 0.0, 0.0]),
            ([0, 4, 7, 3], [-1.0, 0.0, 0.0]),
        ];
        let uvs = [[0.0, 1.0], [1.0, 1.0], [1.0, 0.0], [0.0, 0.0]];

        let mut vertices = Vec::with_capacity(24);
        let mut indices = Vec::with_capacity(36);
        for (corners, normal) in faces {
            let base = vertices.len() as u32;
            for (corner, uv) in corners.iter().zip(uvs) {
                vertices.push(Vertex::new(positions[*corner], normal, uv));
            }
            indices.extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
        }

        Self::new(vertices, indices)
    }

    /// Create a plane mesh on the XZ plane
    ///
    /// The plane is centered at the origin with the given width and depth.
    pub fn plane(width: f32, depth: f32) -> Self {
        let half_width = width * 0.5;
        let half_depth = depth * 0.5;

        let vertices = vec![
            Vertex::new([-half_width, 0.0, -half_depth], [0.0, 1.0, 0.0], [0.0, 0.0]),
            Vertex::new([half_width, 0.0, -half_depth], [0.0, 1.0, 0.0], [1.0, 0.0]),
            Vertex::new([half_width, 0.0, half_depth], [0.0, 1.0, 0.0], [1.0, 1.0]),
            Vertex::new([-half_width, 0.0, half_depth], [0.0, 1.0, 0.0], [0.0, 1.0]),
        ];

        // Double sided
        let indices = vec![0, 1, 2, 0, 2, 3, 0, 2, 1, 0, 3, 2];

        Self::new(vertices, indices)
    }

    /// Create a UV sphere mesh
    ///
    /// # Arguments
    /// * `radius` - Radius of the sphere
    /// * `sectors` - Number of longitude divisions (minimum 3)
    /// * `stacks` - Number of latitude divisions (minimum 2)
    pub fn sphere(radius: f32, sectors: u32, stacks: u32) -> Self {
        let sectors = sectors.max(3);
        let stacks = stacks.max(2);

        let mut vertices = Vec::new();
        let sector_step = TAU / sectors as f32;
        let stack_step = PI / stacks as f32;

        for i in 0..=stacks {
            let stack_angle = FRAC_PI_2 - i as f32 * stack_step;
            let xy = radius * stack_angle.cos();
            let z = radius * stack_angle.sin();

            for j in 0..=sectors {
                let sector_angle = j as f32 * sector_step;
                let x = xy * sector_angle.cos();
                let y = xy * sector_angle.sin();

                let position = [x, z, y];
                let normal = [x / radius, z / radius, y / radius];
                let uv = [j as f32 / sectors as f32, i as f32 / stacks as f32];
                vertices.push(Vertex::new(position, normal, uv));
            }
        }

        let indices = grid_indices(stacks, sectors);
        Self::new(vertices, indices)
    }

    /// Square-based pyramid with its base on y = 0 and apex at `height`
    pub fn pyramid(base: f32, height: f32) -> Self {
        let h = base * 0.5;
        let apex = Vec3::new(0.0, height, 0.0);
        let corners = [
            Vec3::new(-h, 0.0, h),
            Vec3::new(h, 0.0, h),
            Vec3::new(h, 0.0, -h),
            Vec3::new(-h, 0.0, -h),
        ];

        let mut vertices = Vec::with_capacity(16);
        let mut indices = Vec::with_capacity(18);

        for i in 0..4 {
            let a = corners[i];
            let b = corners[(i + 1) % 4];
            let normal = (b - a).cross(apex - a).normalize_or_zero().to_array();
            let base_index = vertices.len() as u32;
            vertices.push(Vertex::new(a.to_array(), normal, [0.0, 1.0]));
            vertices.push(Vertex::new(b.to_array(), normal, [1.0, 1.0]));
            vertices.push(Vertex::new(apex.to_array(), normal, [0.5, 0.0]));
            indices.extend_from_slice(&[base_index, base_index + 1, base_index + 2]);
        }

        let base_index = vertices.len() as u32;
        for (corner, uv) in corners.iter().zip([[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]]) {
            vertices.push(Vertex::new(corner.to_array(), [0.0, -1.0, 0.0], uv));
        }
        indices.extend_from_slice(&[
            base_index,
            base_index + 2,
            base_index + 1,
            base_index,
            base_index + 3,
            base_index + 2,
        ]);

        Self::new(vertices, indices)
    }

    /// Capped cylinder centered at the origin along Y
    pub fn cylinder(radius: f32, height: f32, segments: u32) -> Self {
        let segments = segments.max(3);
        let half = height * 0.5;
        let mut vertices = Vec::new();
        let mut indices = Vec::new();

        // Side: two rings
        for ring in 0..2 {
            let y = if ring == 0 { half } else { -half };
            for j in 0..=segments {
                let angle = j as f32 / segments as f32 * TAU;
                let (sin, cos) = angle.sin_cos();
                vertices.push(Vertex::new(
                    [radius * cos, y, radius * sin],
                    [cos, 0.0, sin],
                    [j as f32 / segments as f32, ring as f32],
                ));
            }
        }
        indices.extend(grid_indices(1, segments));

        // Caps: center plus a ring each
        for (y, ny) in [(half, 1.0), (-half, -1.0)] {
            let center = vertices.len() as u32;
            vertices.push(Vertex::new([0.0, y, 0.0], [0.0, ny, 0.0], [0.5, 0.5]));
            for j in 0..=segments {
                let angle = j as f32 / segments as f32 * TAU;
                let (sin, cos) = angle.sin_cos();
                vertices.push(Vertex::new(
                    [radius * cos, y, radius * sin],
                    [0.0, ny, 0.0],
                    [0.5 + cos * 0.5, 0.5 + sin * 0.5],
                ));
            }
            for j in 0..segments {
                let a = center + 1 + j;
                if ny > 0.0 {
                    indices.extend_from_slice(&[center, a + 1, a]);
                } else {
                    indices.extend_from_slice(&[center, a, a + 1]);
                }
            }
        }

        Self::new(vertices, indices)
    }

    /// Capsule along Y: a cylinder of `height` with hemispherical ends
    pub fn capsule(radius: f32, height: f32, segments: u32, rings: u32) -> Self {
        let segments = segments.max(3);
        // Rings per hemisphere
        let rings = rings.max(1);
        let half = height * 0.5;
        let stacks = rings * 2 + 1;

        let mut vertices = Vec::new();
        for i in 0..=stacks {
            // Latitude angle from +pi/2 at the top to -pi/2 at the bottom; the
            // middle stack is the cylindrical section with a repeated equator.
            let (phi, offset) = if i <= rings {
                (FRAC_PI_2 - i as f32 / rings as f32 * FRAC_PI_2, half)
            } else {
                (-((i - rings - 1) as f32 / rings as f32) * FRAC_PI_2, -half)
            };
            let ring_radius = radius * phi.cos();
            let y = radius * phi.sin() + offset;

            for j in 0..=segments {
                let theta = j as f32 / segments as f32 * TAU;
                let (sin, cos) = theta.sin_cos();
                let normal = Vec3::new(phi.cos() * cos, phi.sin(), phi.cos() * sin);
                vertices.push(Vertex::new(
                    [ring_radius * cos, y, ring_radius * sin],
                    normal.to_array(),
                    [j as f32 / segments as f32, i as f32 / stacks as f32],
                ));
            }
        }

        let indices = grid_indices(stacks, segments);
        Self::new(vertices, indices)
    }
}

/// Triangle indices for a `(rows + 1) x (columns + 1)` vertex grid
fn grid_indices(rows: u32, columns: u32) -> Vec<u32> {
    let mut indices = Vec::with_capacity((rows * columns * 6) as usize);
    for i in 0..rows {
        for j in 0..columns {
            let first = i * (columns + 1) + j;
            let second = first + columns + 1;
            indices.extend_from_slice(&[first, second, first + 1, second, second + 1, first + 1]);
        }
    }
    indices
}

/// Shapes the editor's Entity menu can spawn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PrimitiveType {
    Cube,
    Sphere,
    Pyramid,
    Plane,
    Cylinder,
    Capsule,
}

impl PrimitiveType {
    pub const ALL: [PrimitiveType; 6] = [
        PrimitiveType::Cube,
        PrimitiveType::Sphere,
        PrimitiveType::Pyramid,
        PrimitiveType::Plane,
        PrimitiveType::Cylinder,
        PrimitiveType::Capsule,
    ];

    pub fn name(self) -> &'static str {
        match self {
            PrimitiveType::Cube => "Cube",
            PrimitiveType::Sphere => "Sphere",
            PrimitiveType::Pyramid => "Pyramid",
            PrimitiveType::Plane => "Plane",
            PrimitiveType::Cylinder => "Cylinder",
            PrimitiveType::Capsule => "Capsule",
        }
    }

    /// Unit-sized mesh of this shape
    pub fn create(self) -> Mesh {
        match self {
            PrimitiveType::Cube => Mesh::cube(1.0),
            PrimitiveType::Sphere => Mesh::sphere(0.5, 32, 16),
            PrimitiveType::Pyramid => Mesh::pyramid(1.0, 1.0),
            PrimitiveType::Plane => Mesh::plane(10.0, 10.0),
            PrimitiveType::Cylinder => Mesh::cylinder(0.5, 1.0, 32),
            PrimitiveType::Capsule => Mesh::capsule(0.5, 1.0, 32, 8),
        }
    }
}

/// ECS component pointing at shared mesh data
#[derive(Debug, Clone, Default)]
pub struct MeshComponent {
    pub mesh: Option<Arc<Mesh>>,
}

impl MeshComponent {
    pub fn new(mesh: Mesh) -> Self {
        Self {
            mesh: Some(Arc::new(mesh)),
        }
    }

    /// The mesh when present and active
    pub fn active_mesh(&self) -> Option<&Mesh> {
        self.mesh.as_deref().filter(|mesh| mesh.active)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_indices_in_range(mesh: &Mesh) {
        let count = mesh.vertices.len() as u32;
        assert!(mesh.indices.iter().all(|&i| i < count));
        assert_eq!(mesh.indices.len() % 3, 0);
    }

    #[test]
    fn test_vertex_size() {
        use std::mem;
        // Ensure vertex is tightly packed for GPU
        assert_eq!(mem::size_of::<Vertex>(), 32);
    }

    #[test]
    fn test_mesh_cube_vertices() {
        let cube = Mesh::cube(1.0);
        assert_eq!(cube.vertices.len(), 24);
        assert_eq!(cube.indices.len(), 36);
        assert_eq!(cube.bounding_box(), Aabb::new(Vec3::splat(-0.5), Vec3::splat(0.5)));
        for vertex in &cube.vertices[..4] {
            assert_eq!(vertex.normal, [0.0, 0.0, 1.0]);
        }
    }

    #[test]
    fn test_mesh_plane() {
        let plane = Mesh::plane(10.0, 10.0);
        assert_eq!(plane.vertices.len(), 4);
        assert_eq!(plane.indices.len(), 12);
        for vertex in &plane.vertices {
            assert_eq!(vertex.position[1], 0.0);
        }
    }

    #[test]
    fn test_mesh_sphere() {
        let sphere = Mesh::sphere(1.0, 16, 8);
        assert_eq!(sphere.vertices.len(), (16 + 1) * (8 + 1));
        assert_eq!(sphere.indices.len(), 16 * 8 * 6);
        assert!(sphere.bounding_box().max.abs_diff_eq(Vec3::ONE, 1e-5));
    }

    #[test]
    fn test_pyramid() {
        let pyramid = Mesh::pyramid(2.0, 3.0);
        assert_eq!(pyramid.triangle_count(), 6);
        assert_indices_in_range(&pyramid);
        let bounds = pyramid.bounding_box();
        assert_eq!(bounds.min, Vec3::new(-1.0, 0.0, -1.0));
        assert_eq!(bounds.max, Vec3::new(1.0, 3.0, 1.0));
    }

    #[test]
    fn test_cylinder() {
        let cylinder = Mesh::cylinder(1.0, 2.0, 12);
        assert_indices_in_range(&cylinder);
        // Side quads plus two cap fans
        assert_eq!(cylinder.triangle_count(), 12 * 2 + 12 * 2);
        let bounds = cylinder.bounding_box();
        assert!((bounds.max.y - 1.0).abs() < 1e-5);
        assert!((bounds.min.y + 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_capsule_extends_past_cylinder() {
        let capsule = Mesh::capsule(0.5, 1.0, 16, 4);
        assert_indices_in_range(&capsule);
        let bounds = capsule.bounding_box();
        assert!((bounds.max.y - 1.0).abs() < 1e-5);
        assert!((bounds.min.y + 1.0).abs() < 1e-5);
        assert!((bounds.max.x - 0.5).abs() < 1e-5);
    }

    #[test]
    fn test_every_primitive_is_valid() {
        for primitive in PrimitiveType::ALL {
            let mesh = primitive.create();
            assert!(!mesh.vertices.is_empty(), "{}", primitive.name());
            assert_indices_in_range(&mesh);
        }
    }

    #[test]
    fn test_inactive_mesh_is_hidden() {
        let mut mesh = Mesh::cube(1.0);
        mesh.active = false;
        let component = MeshComponent {
            mesh: Some(Arc::new(mesh)),
        };
        assert!(component.active_mesh().is_none());
        assert!(MeshComponent::default().active_mesh().is_none());
        assert!(MeshComponent::new(Mesh::cube(1.0)).active_mesh().is_some());
    }
}

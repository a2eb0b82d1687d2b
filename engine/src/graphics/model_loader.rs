//! Model file loading
//!
//! Loads OBJ files with `tobj` and spawns them into the scene registry as a
//! root entity with one child per sub-mesh.

use crate::core::entity::{Entity, Name, Parent, Transform, World};
use crate::graphics::mesh::{Mesh, MeshComponent, Vertex};
use glam::Vec3;
use std::path::Path;
use tracing::{debug, info, warn};

/// Errors that can occur during model loading
#[derive(Debug, thiserror::Error)]
pub enum ModelLoadError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("OBJ loading error: {0}")]
    ObjLoad(#[from] tobj::LoadError),

    #[error("Unsupported model format: {0} (supported: obj)")]
    UnsupportedFormat(String),

    #[error("No mesh data found in {0}")]
    NoMeshData(String),
}

/// Load every mesh of a model file
pub fn load_meshes(path: &Path) -> Result<Vec<(String, Mesh)>, ModelLoadError> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|s| s.to_lowercase())
        .unwrap_or_default();

    match extension.as_str() {
        "obj" => load_obj(path),
        ext => {
            warn!(path = ?path, format = ext, "Only OBJ models can be loaded");
            Err(ModelLoadError::UnsupportedFormat(ext.to_string()))
        }
    }
}

/// Load a model file and spawn it into `world`.
///
/// Returns the root entity, which carries the mesh directly when the file
/// contains a single mesh.
pub fn load_model(world: &mut World, path: &Path) -> Result<Entity, ModelLoadError> {
    let meshes = load_meshes(path)?;
    let model_name = path
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or("Model")
        .to_string();

    let root = match meshes.len() {
        1 => {
            let (_, mesh) = meshes.into_iter().next().ok_or_else(|| {
                ModelLoadError::NoMeshData(path.display().to_string())
            })?;
            world.spawn_with_transform((
                Name::new(model_name.clone()),
                MeshComponent::new(mesh),
            ))
        }
        _ => {
            let root = world.spawn_with_transform((Name::new(model_name.clone()),));
            for (name, mesh) in meshes {
                world.spawn_with_transform((
                    Name::new(name),
                    Transform::default(),
                    MeshComponent::new(mesh),
                    Parent(root),
                ));
            }
            root
        }
    };

    info!(entity = ?root, model = %model_name, "Model loaded into scene");
    Ok(root)
}

fn load_obj(path: &Path) -> Result<Vec<(String, Mesh)>, ModelLoadError> {
    info!("Loading OBJ file: {:?}", path);

    let (models, materials) = tobj::load_obj(
        path,
        &tobj::LoadOptions {
            triangulate: true,
            single_index: true,
            ..Default::default()
        },
    )?;

    if let Err(error) = materials {
        warn!(path = ?path, %error, "Ignoring OBJ materials");
    }

    if models.is_empty() {
        return Err(ModelLoadError::NoMeshData(path.display().to_string()));
    }

    Ok(models
        .into_iter()
        .map(|model| {
            debug!(
                "Loaded OBJ model '{}' with {} vertices and {} indices",
                model.name,
                model.mesh.positions.len() / 3,
                model.mesh.indices.len()
            );
            let mesh = convert_obj_mesh(&model.mesh);
            (model.name, mesh)
        })
        .collect())
}

fn convert_obj_mesh(mesh: &tobj::Mesh) -> Mesh {
    let num_vertices = mesh.positions.len() / 3;
    let mut vertices = Vec::with_capacity(num_vertices);

    for i in 0..num_vertices {
        let pos_offset = i * 3;
        let position = [
            mesh.positions[pos_offset],
            mesh.positions[pos_offset + 1],
            mesh.positions[pos_offset + 2],
        ];

        let uv = if i * 2 + 1 < mesh.texcoords.len() {
            [mesh.texcoords[i * 2], mesh.texcoords[i * 2 + 1]]
        } else {
            [0.0, 0.0]
        };

        let normal = if pos_offset + 2 < mesh.normals.len() {
            [
                mesh.normals[pos_offset],
                mesh.normals[pos_offset + 1],
                mesh.normals[pos_offset + 2],
            ]
        } else {
            [0.0, 1.0, 0.0]
        };

        vertices.push(Vertex {
            position,
            normal,
            uv,
        });
    }

    if mesh.normals.is_empty() {
        calculate_normals(&mut vertices, &mesh.indices);
    }

    Mesh::new(vertices, mesh.indices.clone())
}

/// Calculate smooth normals from face geometry
fn calculate_normals(vertices: &mut [Vertex], indices: &[u32]) {
    for vertex in vertices.iter_mut() {
        vertex.normal = [0.0, 0.0, 0.0];
    }

    for chunk in indices.chunks_exact(3) {
        let [i0, i1, i2] = [chunk[0] as usize, chunk[1] as usize, chunk[2] as usize];
        if i0 >= vertices.len() || i1 >= vertices.len() || i2 >= vertices.len() {
            continue;
        }

        let v0 = Vec3::from(vertices[i0].position);
        let v1 = Vec3::from(vertices[i1].position);
        let v2 = Vec3::from(vertices[i2].position);
        let face_normal = (v1 - v0).cross(v2 - v0).normalize_or_zero();

        for i in [i0, i1, i2] {
            vertices[i].normal = (Vec3::from(vertices[i].normal) + face_normal).to_array();
        }
    }

    for vertex in vertices.iter_mut() {
        vertex.normal = Vec3::from(vertex.normal).normalize_or_zero().to_array();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::entity::children_of;

    const TRIANGLE_OBJ: &str = "o tri\nv 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\n";

    const TWO_OBJECTS: &str = "o first\nv 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\n\
                               o second\nv 0 0 1\nv 1 0 1\nv 0 1 1\nf 4 5 6\n";

    #[test]
    fn test_unsupported_format() {
        let result = load_meshes(Path::new("test.fbx"));
        assert!(matches!(result, Err(ModelLoadError::UnsupportedFormat(_))));
    }

    #[test]
    fn test_gltf_and_fbx_report_obj_as_supported() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["scene.gltf", "scene.glb", "Hero.FBX"] {
            let path = dir.path().join(name);
            std::fs::write(&path, b"not a model").unwrap();

            let mut world = World::new();
            let error = load_model(&mut world, &path).unwrap_err();

            let ext = name.rsplit('.').next().unwrap().to_lowercase();
            assert!(matches!(&error, ModelLoadError::UnsupportedFormat(e) if *e == ext));
            assert!(error.to_string().contains("supported: obj"));
            assert!(world.is_empty());
        }
    }

    #[test]
    fn test_load_single_mesh_model() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tri.obj");
        std::fs::write(&path, TRIANGLE_OBJ).unwrap();

        let mut world = World::new();
        let root = load_model(&mut world, &path).unwrap();

        assert_eq!(world.get::<Name>(root).unwrap().0, "tri");
        let mesh = world.get::<MeshComponent>(root).unwrap();
        let mesh = mesh.active_mesh().unwrap();
        assert_eq!(mesh.triangle_count(), 1);
        // Computed normal faces +Z
        assert!(Vec3::from(mesh.vertices[0].normal).abs_diff_eq(Vec3::Z, 1e-5));
    }

    #[test]
    fn test_load_multi_mesh_model_creates_children() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pair.obj");
        std::fs::write(&path, TWO_OBJECTS).unwrap();

        let mut world = World::new();
        let root = load_model(&mut world, &path).unwrap();

        assert!(world.try_get::<MeshComponent>(root).is_none());
        assert_eq!(children_of(&world, root).len(), 2);
    }

    #[test]
    fn test_missing_file() {
        let mut world = World::new();
        let result = load_model(&mut world, Path::new("/definitely/missing.obj"));
        assert!(result.is_err());
        assert!(world.is_empty());
    }
}

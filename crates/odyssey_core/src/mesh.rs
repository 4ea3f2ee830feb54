//! Mesh geometry for placed objects.
//!
//! Meshes are loaded from Wavefront OBJ files via `tobj`. All models in a
//! file are merged into one triangle mesh, since each file holds a single
//! placeable asset.

use std::path::{Path, PathBuf};

use odyssey_math::Vec3;
use thiserror::Error;

/// Errors that can occur while loading a mesh.
#[derive(Error, Debug)]
pub enum MeshError {
    #[error("OBJ load error in {}: {source}", .path.display())]
    Obj {
        path: PathBuf,
        #[source]
        source: tobj::LoadError,
    },

    #[error("No geometry found in {}", .0.display())]
    Empty(PathBuf),
}

/// A triangle mesh with positions, optional normals, and indices.
#[derive(Clone, Debug)]
pub struct Mesh {
    /// Vertex positions (one Vec3 per vertex)
    pub positions: Vec<Vec3>,

    /// Vertex normals (optional - will be computed if not provided)
    pub normals: Option<Vec<Vec3>>,

    /// Triangle indices (every 3 indices form a triangle)
    pub indices: Vec<u32>,
}

impl Mesh {
    /// Create a new mesh from positions and indices, optionally with normals.
    pub fn new(positions: Vec<Vec3>, indices: Vec<u32>, normals: Option<Vec<Vec3>>) -> Self {
        Self {
            positions,
            normals,
            indices,
        }
    }

    /// Load and triangulate an OBJ file.
    ///
    /// Normals are taken from the file when every model provides them and
    /// computed otherwise.
    pub fn load_obj<P: AsRef<Path>>(path: P) -> Result<Self, MeshError> {
        let path = path.as_ref();
        let (models, _materials) = tobj::load_obj(
            path,
            &tobj::LoadOptions {
                single_index: true,
                triangulate: true,
                ..Default::default()
            },
        )
        .map_err(|source| MeshError::Obj {
            path: path.to_path_buf(),
            source,
        })?;

        let mut positions = Vec::new();
        let mut normals = Vec::new();
        let mut indices = Vec::new();
        let mut has_normals = true;

        for model in &models {
            let mesh = &model.mesh;
            let offset = positions.len() as u32;

            positions.extend(mesh.positions.chunks_exact(3).map(|p| Vec3::new(p[0], p[1], p[2])));
            normals.extend(mesh.normals.chunks_exact(3).map(|n| Vec3::new(n[0], n[1], n[2])));
            has_normals &= mesh.normals.len() == mesh.positions.len();
            indices.extend(mesh.indices.iter().map(|i| i + offset));
        }

        if indices.is_empty() {
            return Err(MeshError::Empty(path.to_path_buf()));
        }

        let mut mesh = Mesh::new(positions, indices, has_normals.then_some(normals));
        mesh.ensure_normals();

        log::debug!(
            "Loaded {}: {} vertices, {} triangles",
            path.display(),
            mesh.vertex_count(),
            mesh.triangle_count()
        );

        Ok(mesh)
    }

    /// Compute smooth vertex normals by averaging face normals.
    ///
    /// Faces are assumed counter-clockwise, as OBJ files store them.
    pub fn compute_normals(&mut self) {
        let vertex_count = self.positions.len();
        let mut normals = vec![Vec3::ZERO; vertex_count];

        for face in self.indices.chunks_exact(3) {
            let i0 = face[0] as usize;
            let i1 = face[1] as usize;
            let i2 = face[2] as usize;

            if i0 >= vertex_count || i1 >= vertex_count || i2 >= vertex_count {
                continue;
            }

            let edge1 = self.positions[i1] - self.positions[i0];
            let edge2 = self.positions[i2] - self.positions[i0];
            let face_normal = edge1.cross(edge2);

            normals[i0] += face_normal;
            normals[i1] += face_normal;
            normals[i2] += face_normal;
        }

        for normal in &mut normals {
            *normal = normal.try_normalize().unwrap_or(Vec3::Y);
        }

        self.normals = Some(normals);
    }

    /// Ensure the mesh has one normal per vertex, computing them if necessary.
    pub fn ensure_normals(&mut self) {
        let should_compute = match &self.normals {
            None => true,
            Some(normals) => normals.len() != self.positions.len(),
        };

        if should_compute {
            self.compute_normals();
        }
    }

    /// Check if the mesh has normals.
    pub fn has_normals(&self) -> bool {
        self.normals.is_some()
    }

    /// Get the number of triangles in the mesh.
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Get the number of vertices in the mesh.
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }
}

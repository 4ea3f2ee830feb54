//! Scene graph types for imported scenarios.
//!
//! A scene holds one prototype per distinct mesh file and one instance per
//! placed object, so objects sharing a model share geometry.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use odyssey_math::{EulerDegrees, Mat4, Quat, Vec3};

use crate::byml::ResolvedObject;
use crate::mesh::Mesh;

/// A shared mesh that can be instanced.
#[derive(Clone, Debug)]
pub struct Prototype {
    /// Unique identifier within the scene
    pub id: usize,

    /// Prototype name (mesh file stem)
    pub name: String,

    /// File the mesh was loaded from
    pub source: PathBuf,

    /// Shared mesh geometry
    pub mesh: Arc<Mesh>,
}

impl Prototype {
    /// Create a new prototype from a mesh.
    pub fn new(id: usize, name: String, source: PathBuf, mesh: Arc<Mesh>) -> Self {
        Self {
            id,
            name,
            source,
            mesh,
        }
    }
}

/// Transform components that can be composed into a matrix.
#[derive(Clone, Debug, PartialEq)]
pub struct Transform {
    /// Translation
    pub translation: Vec3,

    /// Rotation (as quaternion)
    pub rotation: Quat,

    /// Scale
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            translation: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
        }
    }
}

impl Transform {
    /// Build the placement transform of a resolved object.
    ///
    /// Rotation degrees are applied as XYZ Euler angles.
    pub fn from_resolved(object: &ResolvedObject) -> Self {
        Self {
            translation: object.translate.as_vec3(),
            rotation: object.rotate_degrees.euler_xyz_quat(),
            scale: object.scale.as_vec3(),
        }
    }

    /// Convert to a 4x4 transformation matrix.
    ///
    /// Order: Scale -> Rotate -> Translate (SRT)
    pub fn to_matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.rotation, self.translation)
    }
}

/// A placed object referencing a prototype.
#[derive(Clone, Debug)]
pub struct Instance {
    /// Index of the prototype this instance references
    pub prototype_id: usize,

    /// Display name (the object's model name)
    pub name: String,

    /// Object list the instance came from
    pub list_name: String,

    /// Scenario object `Id`
    pub object_id: String,

    /// Instance transform
    pub transform: Transform,
}

impl Instance {
    /// Create an instance of a prototype placed like `object`.
    pub fn from_resolved(prototype_id: usize, object: &ResolvedObject) -> Self {
        Self {
            prototype_id,
            name: object.model_name.clone(),
            list_name: object.list_name.clone(),
            object_id: object.id.clone(),
            transform: Transform::from_resolved(object),
        }
    }

    /// Get the 4x4 model matrix for this instance.
    pub fn model_matrix(&self) -> Mat4 {
        self.transform.to_matrix()
    }
}

/// A complete imported scene.
#[derive(Clone, Debug, Default)]
pub struct Scene {
    /// Shared prototype definitions (meshes)
    pub prototypes: Vec<Arc<Prototype>>,

    /// Instances referencing prototypes
    pub instances: Vec<Instance>,

    /// Scene name (usually from filename)
    pub name: String,
}

impl Scene {
    /// Create an empty scene.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Add a prototype to the scene and return its ID.
    pub fn add_prototype(&mut self, mesh: Arc<Mesh>, source: &Path) -> usize {
        let id = self.prototypes.len();
        let name = source
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        let prototype = Arc::new(Prototype::new(id, name, source.to_path_buf(), mesh));
        self.prototypes.push(prototype);
        id
    }

    /// Place a resolved object as an instance of a prototype.
    pub fn place(&mut self, prototype_id: usize, object: &ResolvedObject) {
        self.instances.push(Instance::from_resolved(prototype_id, object));
    }

    /// Instances that came from the named object list.
    pub fn instances_in_list<'a>(&'a self, list_name: &'a str) -> impl Iterator<Item = &'a Instance> + 'a {
        self.instances.iter().filter(move |i| i.list_name == list_name)
    }

    /// Get total triangle count across all instances.
    pub fn total_triangle_count(&self) -> usize {
        self.instances
            .iter()
            .filter_map(|instance| self.prototypes.get(instance.prototype_id))
            .map(|proto| proto.mesh.triangle_count())
            .sum()
    }

    /// Get total instance count.
    pub fn instance_count(&self) -> usize {
        self.instances.len()
    }

    /// Get prototype count.
    pub fn prototype_count(&self) -> usize {
        self.prototypes.len()
    }
}

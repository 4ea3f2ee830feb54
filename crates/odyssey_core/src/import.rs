//! High-level scenario import.
//!
//! Ties the pipeline together: check the config, decode the file, walk the
//! scenario, find each object's mesh, load it once per file, and place an
//! instance for every object.
//!
//! Only configuration, I/O on the scenario file, decoding and a missing
//! scenario root abort an import. Everything that goes wrong with a single
//! object is collected in [`ImportReport::skipped`].

use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use thiserror::Error;

use crate::byml::{decode, walk, DecodeError, ResolvedObject, SkippedObject, StructureError};
use crate::config::{ConfigError, ImportConfig};
use crate::mesh::{Mesh, MeshError};
use crate::mesh_path::{resolve_mesh_path_with_extension, MeshPathError};
use crate::scene::Scene;

/// Errors that abort an import.
#[derive(Error, Debug)]
pub enum ImportError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to decode scenario: {0}")]
    Decode(#[from] DecodeError),

    #[error("Invalid scenario structure: {0}")]
    Structure(#[from] StructureError),
}

/// Result type for import operations.
pub type ImportResult<T> = Result<T, ImportError>;

/// An object that was not placed.
#[derive(Debug)]
pub enum ImportSkip {
    /// The object node could not be resolved
    Unresolved(SkippedObject),

    /// No mesh file exists for the object
    MeshNotFound {
        list_name: String,
        id: String,
        error: MeshPathError,
    },

    /// The mesh file exists but could not be loaded
    MeshLoad {
        list_name: String,
        id: String,
        path: PathBuf,
        error: MeshError,
    },
}

impl fmt::Display for ImportSkip {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImportSkip::Unresolved(skipped) => write!(f, "{}", skipped),
            ImportSkip::MeshNotFound {
                list_name,
                id,
                error,
            } => write!(f, "{} object {}: {}", list_name, id, error),
            ImportSkip::MeshLoad {
                list_name, id, error, ..
            } => write!(f, "{} object {}: {}", list_name, id, error),
        }
    }
}

/// Result of a completed import.
#[derive(Debug)]
pub struct ImportReport {
    /// The populated scene
    pub scene: Scene,

    /// Objects that were not placed, in document order
    pub skipped: Vec<ImportSkip>,
}

impl ImportReport {
    /// Number of placed objects.
    pub fn imported(&self) -> usize {
        self.scene.instance_count()
    }

    /// Number of skipped objects.
    pub fn skipped_count(&self) -> usize {
        self.skipped.len()
    }
}

impl fmt::Display for ImportReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Imported {} objects, skipped {}",
            self.imported(),
            self.skipped_count()
        )
    }
}

/// Import a scenario XML file.
///
/// The config is validated before the file is read.
///
/// # Example
///
/// ```ignore
/// use odyssey_core::{import_scene, ImportConfig};
///
/// let report = import_scene("scenario.xml", &ImportConfig::new("/assets/obj"))?;
/// println!("{}", report);
/// ```
pub fn import_scene<P: AsRef<Path>>(path: P, config: &ImportConfig) -> ImportResult<ImportReport> {
    config.validate()?;

    let path = path.as_ref();
    let name = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("unnamed");

    let bytes = std::fs::read(path)?;
    import_bytes(&bytes, name, config)
}

/// Import a scenario from raw file bytes (useful for testing).
pub fn import_bytes(bytes: &[u8], name: &str, config: &ImportConfig) -> ImportResult<ImportReport> {
    let mesh_dir = config.validate()?;
    log::info!("Importing scenario {} (meshes from {})", name, mesh_dir.display());

    let document = decode(bytes)?;
    let mut importer = SceneImporter::new(name, mesh_dir, config.extension());

    for item in walk(&document)? {
        match item {
            Ok(object) => importer.place(&object),
            Err(skipped) => importer.skipped.push(ImportSkip::Unresolved(skipped)),
        }
    }

    let report = importer.finish();
    log::info!("{}", report);
    Ok(report)
}

/// Internal builder that places resolved objects into a scene.
struct SceneImporter<'a> {
    scene: Scene,
    mesh_dir: &'a Path,
    extension: &'a str,
    /// Map from mesh file to prototype ID
    prototype_map: HashMap<PathBuf, usize>,
    skipped: Vec<ImportSkip>,
}

impl<'a> SceneImporter<'a> {
    fn new(name: &str, mesh_dir: &'a Path, extension: &'a str) -> Self {
        Self {
            scene: Scene::new(name),
            mesh_dir,
            extension,
            prototype_map: HashMap::new(),
            skipped: Vec::new(),
        }
    }

    /// Find the object's mesh and place an instance of it.
    fn place(&mut self, object: &ResolvedObject) {
        let path = match resolve_mesh_path_with_extension(
            self.mesh_dir,
            &object.unit_config_name,
            &object.model_name,
            self.extension,
        ) {
            Ok(path) => path,
            Err(error) => {
                log::warn!("Skipping {} object {}: {}", object.list_name, object.id, error);
                self.skipped.push(ImportSkip::MeshNotFound {
                    list_name: object.list_name.clone(),
                    id: object.id.clone(),
                    error,
                });
                return;
            }
        };

        match self.prototype_for(&path) {
            Ok(proto_id) => {
                log::debug!(
                    "Placing {} object {} with {}",
                    object.list_name,
                    object.id,
                    path.display()
                );
                self.scene.place(proto_id, object);
            }
            Err(error) => {
                log::warn!("Skipping {} object {}: {}", object.list_name, object.id, error);
                self.skipped.push(ImportSkip::MeshLoad {
                    list_name: object.list_name.clone(),
                    id: object.id.clone(),
                    path,
                    error,
                });
            }
        }
    }

    /// Prototype for a mesh file, loading it on first use.
    fn prototype_for(&mut self, path: &Path) -> Result<usize, MeshError> {
        if let Some(&id) = self.prototype_map.get(path) {
            return Ok(id);
        }

        let mesh = Arc::new(Mesh::load_obj(path)?);
        let id = self.scene.add_prototype(mesh, path);
        self.prototype_map.insert(path.to_path_buf(), id);
        Ok(id)
    }

    fn finish(self) -> ImportReport {
        ImportReport {
            scene: self.scene,
            skipped: self.skipped,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    const TRIANGLE_OBJ: &str = "v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\n";

    fn object(id: &str, model: &str, unit: Option<&str>) -> String {
        let unit = unit
            .map(|u| format!(r#"<T160 N="UnitConfigName" V="{}"/>"#, u))
            .unwrap_or_default();
        format!(
            r#"<T193><T160 N="Id" V="{id}"/><T160 N="ModelName" V="{model}"/>{unit}
<T193 N="Translate"><T210 N="X" V="1"/><T210 N="Y" V="2"/><T210 N="Z" V="3"/></T193>
<T193 N="Scale"><T210 N="X" V="1"/><T210 N="Y" V="1"/><T210 N="Z" V="1"/></T193>
<T193 N="Rotate"><T210 N="X" V="0"/><T210 N="Y" V="0"/><T210 N="Z" V="45"/></T193></T193>"#
        )
    }

    fn scenario(objects: &[String]) -> String {
        format!(
            r#"<Root><BymlRoot><T192><T192><T192 N="ObjectList">{}</T192></T192></T192></BymlRoot></Root>"#,
            objects.concat()
        )
    }

    #[test]
    fn test_import_shares_prototypes() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("Kuribo.obj"), TRIANGLE_OBJ).unwrap();
        fs::write(dir.path().join("KuriboTower.obj"), TRIANGLE_OBJ).unwrap();

        let xml = scenario(&[
            object("a", "Kuribo", None),
            object("b", "Kuribo", Some("KuriboTower")),
            object("c", "Kuribo", Some("NoSuchConfig")),
        ]);

        let report = import_bytes(xml.as_bytes(), "test", &ImportConfig::new(dir.path())).unwrap();

        assert_eq!(report.imported(), 3);
        assert_eq!(report.skipped_count(), 0);
        // a and c share Kuribo.obj
        assert_eq!(report.scene.prototype_count(), 2);
        assert_eq!(report.scene.instances[0].prototype_id, report.scene.instances[2].prototype_id);
        assert_eq!(report.scene.prototypes[1].name, "KuriboTower");
        assert_eq!(report.to_string(), "Imported 3 objects, skipped 0");
    }

    #[test]
    fn test_import_reports_missing_meshes() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("Kuribo.obj"), TRIANGLE_OBJ).unwrap();

        let xml = scenario(&[object("a", "Kuribo", None), object("b", "Killer", None)]);
        let report = import_bytes(xml.as_bytes(), "test", &ImportConfig::new(dir.path())).unwrap();

        assert_eq!(report.imported(), 1);
        assert_eq!(report.skipped_count(), 1);
        match &report.skipped[0] {
            ImportSkip::MeshNotFound { id, .. } => assert_eq!(id, "b"),
            other => panic!("Expected MeshNotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_import_reports_broken_meshes() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("Kuribo.obj"), "v 0 0 0\n").unwrap();

        let xml = scenario(&[object("a", "Kuribo", None)]);
        let report = import_bytes(xml.as_bytes(), "test", &ImportConfig::new(dir.path())).unwrap();

        assert_eq!(report.imported(), 0);
        assert!(matches!(report.skipped[0], ImportSkip::MeshLoad { .. }));
    }

    #[test]
    fn test_config_checked_before_decoding() {
        let result = import_bytes(b"not xml", "test", &ImportConfig::default());
        assert!(matches!(
            result,
            Err(ImportError::Config(ConfigError::MissingMeshDir))
        ));
    }

    #[test]
    fn test_config_checked_before_reading_file() {
        let result = import_scene("/does/not/exist.xml", &ImportConfig::new(""));
        assert!(matches!(result, Err(ImportError::Config(_))));
    }

    #[test]
    fn test_fatal_errors() {
        let dir = tempfile::tempdir().unwrap();
        let config = ImportConfig::new(dir.path());

        assert!(matches!(
            import_bytes(b"<Root><BymlRoot>", "test", &config),
            Err(ImportError::Decode(_))
        ));
        assert!(matches!(
            import_bytes(b"<Root><BymlRoot/></Root>", "test", &config),
            Err(ImportError::Structure(StructureError::MissingScenarioRoot))
        ));
        assert!(matches!(
            import_scene(dir.path().join("missing.xml"), &config),
            Err(ImportError::Io(_))
        ));
    }
}

//! Mesh file lookup for resolved objects.
//!
//! An object's `UnitConfigName` names its exact per-instance asset, while
//! `ModelName` names the shared model. The exact asset is preferred when a
//! file for it exists.

use std::path::{Component, Path, PathBuf};

use thiserror::Error;

/// Extension used when none is configured.
pub const DEFAULT_MESH_EXTENSION: &str = "obj";

/// Mesh lookup failures.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MeshPathError {
    #[error("Neither {} nor {} exists", .preferred.display(), .fallback.display())]
    NotFound { preferred: PathBuf, fallback: PathBuf },
}

/// Resolve the `.obj` file for an object.
///
/// Tries `<search_dir>/<unit_config_name>.obj`, then
/// `<search_dir>/<model_name>.obj`.
pub fn resolve_mesh_path(
    search_dir: &Path,
    unit_config_name: &str,
    model_name: &str,
) -> Result<PathBuf, MeshPathError> {
    resolve_mesh_path_with_extension(search_dir, unit_config_name, model_name, DEFAULT_MESH_EXTENSION)
}

/// Resolve the mesh file for an object using a custom file extension.
///
/// Names that are not a plain file name (separators, `..`, absolute
/// paths) are never candidates, so the result always lies directly in
/// `search_dir`.
pub fn resolve_mesh_path_with_extension(
    search_dir: &Path,
    unit_config_name: &str,
    model_name: &str,
    extension: &str,
) -> Result<PathBuf, MeshPathError> {
    let preferred = search_dir.join(mesh_file_name(unit_config_name, extension));
    if is_candidate(unit_config_name, extension, &preferred) {
        return Ok(preferred);
    }

    let fallback = search_dir.join(mesh_file_name(model_name, extension));
    log::debug!(
        "{} not found, falling back to {}",
        preferred.display(),
        fallback.display()
    );
    if is_candidate(model_name, extension, &fallback) {
        return Ok(fallback);
    }

    Err(MeshPathError::NotFound {
        preferred,
        fallback,
    })
}

/// File name for an asset name and extension (e.g., "Kuribo.obj").
pub fn mesh_file_name(name: &str, extension: &str) -> String {
    format!("{}.{}", name, extension.trim_start_matches('.'))
}

/// True if `file_name` is a single normal path component.
fn is_plain_file_name(file_name: &str) -> bool {
    let mut components = Path::new(file_name).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    )
}

fn is_candidate(name: &str, extension: &str, path: &Path) -> bool {
    if !is_plain_file_name(&mesh_file_name(name, extension)) {
        log::warn!("Ignoring mesh name {:?}: not a plain file name", name);
        return false;
    }
    path.is_file()
}

//! Import configuration.
//!
//! The only required setting is the mesh search directory. Settings can be
//! read from a JSON file and overridden by the caller:
//!
//! ```json
//! { "mesh_dir": "/assets/obj", "mesh_extension": "obj" }
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::mesh_path::DEFAULT_MESH_EXTENSION;

/// Errors in the import configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("No mesh search directory configured")]
    MissingMeshDir,

    #[error("Mesh file extension must not be empty")]
    EmptyExtension,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid config file: {0}")]
    Json(#[from] serde_json::Error),
}

/// Settings for a scenario import.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ImportConfig {
    /// Directory searched for mesh files
    pub mesh_dir: Option<PathBuf>,

    /// Mesh file extension, without the dot
    pub mesh_extension: String,
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            mesh_dir: None,
            mesh_extension: DEFAULT_MESH_EXTENSION.to_string(),
        }
    }
}

impl ImportConfig {
    /// Create a config with a mesh search directory.
    pub fn new(mesh_dir: impl Into<PathBuf>) -> Self {
        Self::default().with_mesh_dir(mesh_dir)
    }

    /// Parse a config from JSON text.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a config from a JSON file.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    /// Replace the mesh search directory.
    pub fn with_mesh_dir(mut self, mesh_dir: impl Into<PathBuf>) -> Self {
        self.mesh_dir = Some(mesh_dir.into());
        self
    }

    /// Replace the mesh file extension.
    pub fn with_mesh_extension(mut self, extension: impl Into<String>) -> Self {
        self.mesh_extension = extension.into();
        self
    }

    /// Mesh extension with any leading dot removed.
    pub fn extension(&self) -> &str {
        self.mesh_extension.trim_start_matches('.')
    }

    /// Check the config and return the mesh search directory.
    pub fn validate(&self) -> Result<&Path, ConfigError> {
        let mesh_dir = self
            .mesh_dir
            .as_deref()
            .filter(|dir| !dir.as_os_str().is_empty())
            .ok_or(ConfigError::MissingMeshDir)?;

        if self.extension().is_empty() {
            return Err(ConfigError::EmptyExtension);
        }

        if !mesh_dir.is_dir() {
            log::warn!("Mesh directory {} does not exist", mesh_dir.display());
        }

        Ok(mesh_dir)
    }
}

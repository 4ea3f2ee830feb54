//! Odyssey Core - Scenario import for BYML-XML scene dumps.
//!
//! This crate provides:
//!
//! - **Scenario decoding**: BOM-aware XML ingestion and resolution of placed
//!   objects (`byml`)
//! - **Mesh lookup**: `UnitConfigName` → `ModelName` file fallback (`mesh_path`)
//! - **Scene graph types**: `Scene`, `Prototype`, `Instance`, `Mesh`
//! - **Import**: the full pipeline from file to populated scene (`import`)
//!
//! # Example
//!
//! ```ignore
//! use odyssey_core::{import_scene, ImportConfig};
//!
//! let config = ImportConfig::new("/assets/obj");
//! let report = import_scene("scenario.xml", &config)?;
//! println!("Loaded {} prototypes, {} instances",
//!     report.scene.prototype_count(),
//!     report.scene.instance_count());
//! ```

pub mod byml;
pub mod config;
pub mod import;
pub mod mesh;
pub mod mesh_path;
pub mod scene;

// Re-export commonly used types
pub use byml::{decode, walk, walk_all, ResolvedObject, SkippedObject};
pub use config::{ConfigError, ImportConfig};
pub use import::{import_bytes, import_scene, ImportError, ImportReport, ImportSkip};
pub use mesh::Mesh;
pub use mesh_path::resolve_mesh_path;
pub use scene::{Instance, Prototype, Scene, Transform};

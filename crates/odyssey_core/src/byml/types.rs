//! Resolved scenario records.
//!
//! These are the outputs of a scenario walk, handed to whatever places
//! objects in a scene.

use std::fmt;

use odyssey_math::DVec3;

use super::object::ResolveError;

/// One placed object read from a scenario file.
#[derive(Clone, Debug, PartialEq)]
pub struct ResolvedObject {
    /// Name of the object list the object came from (e.g., "ObjectList")
    pub list_name: String,

    /// Object identifier (`Id`)
    pub id: String,

    /// Shared model asset name (`ModelName`)
    pub model_name: String,

    /// Per-instance configuration name (`UnitConfigName`).
    /// Equal to `model_name` when the file does not set one.
    pub unit_config_name: String,

    /// Position
    pub translate: DVec3,

    /// Per-axis scale
    pub scale: DVec3,

    /// Euler rotation in degrees
    pub rotate_degrees: DVec3,
}

/// Location of an object node within the scenario hierarchy.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ObjectPosition {
    /// Index of the scenario entry
    pub scenario: usize,

    /// Index of the object list within the entry
    pub list: usize,

    /// Index of the object within the list
    pub object: usize,
}

impl fmt::Display for ObjectPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.scenario, self.list, self.object)
    }
}

/// An object node that could not be resolved.
#[derive(Clone, Debug, PartialEq)]
pub struct SkippedObject {
    /// Name of the containing object list
    pub list_name: String,

    /// Object `Id`, if the node had one
    pub id: Option<String>,

    /// Where the node sits in the document
    pub position: ObjectPosition,

    /// Why it was skipped
    pub error: ResolveError,
}

impl fmt::Display for SkippedObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} object at {} (id {}): {}",
            self.list_name,
            self.position,
            self.id.as_deref().unwrap_or("<none>"),
            self.error
        )
    }
}

//! Vector dictionaries (`Translate`, `Scale`, `Rotate`).

use std::fmt;

use odyssey_math::DVec3;
use thiserror::Error;

use super::document::XmlNode;
use super::schema::{FLOAT_FIELD, NAME_ATTR, VALUE_ATTR};

/// A vector component key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    /// Axes in read order.
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    /// The `N` key of this component.
    pub fn key(self) -> &'static str {
        match self {
            Axis::X => "X",
            Axis::Y => "Y",
            Axis::Z => "Z",
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Errors reading a single vector component.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ComponentError {
    #[error("missing {0} component")]
    Missing(Axis),

    #[error("{axis} component is not a number: {value:?}")]
    NotNumeric { axis: Axis, value: String },
}

impl ComponentError {
    /// The axis that failed.
    pub fn axis(&self) -> Axis {
        match self {
            ComponentError::Missing(axis) => *axis,
            ComponentError::NotNumeric { axis, .. } => *axis,
        }
    }
}

/// Read an X/Y/Z vector from a vector dictionary node.
///
/// Components are looked up by key, so child order does not matter.
/// Reading stops at the first missing or unparsable axis.
pub fn read_vector3(container: &XmlNode) -> Result<DVec3, ComponentError> {
    let mut components = [0.0; 3];
    for (component, axis) in components.iter_mut().zip(Axis::ALL) {
        *component = read_component(container, axis)?;
    }
    Ok(DVec3::from_array(components))
}

fn read_component(container: &XmlNode, axis: Axis) -> Result<f64, ComponentError> {
    let raw = container
        .find_keyed(FLOAT_FIELD, NAME_ATTR, axis.key())
        .and_then(|node| node.attr(VALUE_ATTR))
        .ok_or(ComponentError::Missing(axis))?;

    raw.trim()
        .parse::<f64>()
        .map_err(|_| ComponentError::NotNumeric {
            axis,
            value: raw.to_string(),
        })
}

//! Resolution of a single object node.

use odyssey_math::DVec3;
use thiserror::Error;

use super::document::XmlNode;
use super::schema::*;
use super::types::ResolvedObject;
use super::vector::{read_vector3, ComponentError};

/// Errors that make one object unusable.
///
/// These never abort a walk; the object is skipped instead.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    #[error("missing field {field}")]
    MissingField { field: &'static str },

    #[error("field {field} has no value")]
    MissingValue { field: &'static str },

    #[error("{vector}: {source}")]
    Component {
        vector: &'static str,
        #[source]
        source: ComponentError,
    },
}

impl ResolveError {
    /// The object field that failed.
    pub fn field(&self) -> &'static str {
        match self {
            ResolveError::MissingField { field } => *field,
            ResolveError::MissingValue { field } => *field,
            ResolveError::Component { vector, .. } => *vector,
        }
    }
}

/// Resolve an object node into a placement record.
///
/// `Id`, `ModelName` and the three vectors are required. A missing
/// `UnitConfigName` falls back to the model name; an empty one is kept.
pub fn resolve_object(object: &XmlNode, list_name: &str) -> Result<ResolvedObject, ResolveError> {
    let id = required_string(object, FIELD_ID)?;
    let model_name = required_string(object, FIELD_MODEL_NAME)?;
    let unit_config_name = string_field(object, FIELD_UNIT_CONFIG_NAME)
        .and_then(|node| node.attr(VALUE_ATTR))
        .unwrap_or(model_name);

    let translate = vector_field(object, FIELD_TRANSLATE)?;
    let scale = vector_field(object, FIELD_SCALE)?;
    let rotate_degrees = vector_field(object, FIELD_ROTATE)?;

    Ok(ResolvedObject {
        list_name: list_name.to_string(),
        id: id.to_string(),
        model_name: model_name.to_string(),
        unit_config_name: unit_config_name.to_string(),
        translate,
        scale,
        rotate_degrees,
    })
}

/// The object's `Id` value, if present.
///
/// Used to label objects that fail to resolve.
pub fn object_id(object: &XmlNode) -> Option<&str> {
    string_field(object, FIELD_ID).and_then(|node| node.attr(VALUE_ATTR))
}

fn string_field<'a>(object: &'a XmlNode, field: &str) -> Option<&'a XmlNode> {
    object.find_keyed(STRING_FIELD, NAME_ATTR, field)
}

fn required_string<'a>(object: &'a XmlNode, field: &'static str) -> Result<&'a str, ResolveError> {
    string_field(object, field)
        .ok_or(ResolveError::MissingField { field })?
        .attr(VALUE_ATTR)
        .ok_or(ResolveError::MissingValue { field })
}

fn vector_field(object: &XmlNode, field: &'static str) -> Result<DVec3, ResolveError> {
    let container = object
        .find_keyed(VECTOR_FIELD, NAME_ATTR, field)
        .ok_or(ResolveError::MissingField { field })?;

    read_vector3(container).map_err(|source| ResolveError::Component {
        vector: field,
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::byml::vector::Axis;

    fn string(name: &str, value: &str) -> XmlNode {
        XmlNode::new("T160").with_attr("N", name).with_attr("V", value)
    }

    fn vector(name: &str, v: [f64; 3]) -> XmlNode {
        XmlNode::new("T193")
            .with_attr("N", name)
            .with_child(XmlNode::new("T210").with_attr("N", "X").with_attr("V", v[0].to_string()))
            .with_child(XmlNode::new("T210").with_attr("N", "Y").with_attr("V", v[1].to_string()))
            .with_child(XmlNode::new("T210").with_attr("N", "Z").with_attr("V", v[2].to_string()))
    }

    fn object_without(skip: &str) -> XmlNode {
        let fields = [
            ("Id", string("Id", "obj12")),
            ("ModelName", string("ModelName", "Kuribo")),
            ("UnitConfigName", string("UnitConfigName", "KuriboTower")),
            ("Translate", vector("Translate", [10.0, -5.5, 300.0])),
            ("Scale", vector("Scale", [1.0, 1.0, 2.0])),
            ("Rotate", vector("Rotate", [0.0, 90.0, 0.0])),
        ];

        fields
            .into_iter()
            .filter(|(name, _)| *name != skip)
            .fold(XmlNode::new("T193"), |node, (_, child)| node.with_child(child))
    }

    #[test]
    fn test_resolve_full_object() {
        let object = resolve_object(&object_without(""), "ObjectList").unwrap();

        assert_eq!(object.list_name, "ObjectList");
        assert_eq!(object.id, "obj12");
        assert_eq!(object.model_name, "Kuribo");
        assert_eq!(object.unit_config_name, "KuriboTower");
        assert_eq!(object.translate, DVec3::new(10.0, -5.5, 300.0));
        assert_eq!(object.scale, DVec3::new(1.0, 1.0, 2.0));
        assert_eq!(object.rotate_degrees, DVec3::new(0.0, 90.0, 0.0));
    }

    #[test]
    fn test_unit_config_name_defaults_to_model_name() {
        let object = resolve_object(&object_without("UnitConfigName"), "ObjectList").unwrap();
        assert_eq!(object.unit_config_name, "Kuribo");
    }

    #[test]
    fn test_unit_config_name_without_value_defaults_to_model_name() {
        let node = object_without("UnitConfigName")
            .with_child(XmlNode::new("T160").with_attr("N", "UnitConfigName"));

        let object = resolve_object(&node, "ObjectList").unwrap();
        assert_eq!(object.unit_config_name, "Kuribo");
    }

    #[test]
    fn test_empty_unit_config_name_is_kept() {
        let node = object_without("UnitConfigName").with_child(string("UnitConfigName", ""));

        let object = resolve_object(&node, "ObjectList").unwrap();
        assert_eq!(object.unit_config_name, "");
    }

    #[test]
    fn test_required_fields() {
        for field in ["Id", "ModelName", "Translate", "Scale", "Rotate"] {
            let err = resolve_object(&object_without(field), "ObjectList").unwrap_err();
            assert_eq!(err, ResolveError::MissingField { field }, "field {}", field);
        }
    }

    #[test]
    fn test_required_field_without_value() {
        let node = object_without("Id").with_child(XmlNode::new("T160").with_attr("N", "Id"));

        let err = resolve_object(&node, "ObjectList").unwrap_err();
        assert_eq!(err, ResolveError::MissingValue { field: "Id" });
        assert_eq!(object_id(&node), None);
    }

    #[test]
    fn test_vector_error_names_vector_and_axis() {
        let broken = XmlNode::new("T193")
            .with_attr("N", "Scale")
            .with_child(XmlNode::new("T210").with_attr("N", "X").with_attr("V", "1"))
            .with_child(XmlNode::new("T210").with_attr("N", "Z").with_attr("V", "1"));
        let node = object_without("Scale").with_child(broken);

        let err = resolve_object(&node, "ObjectList").unwrap_err();
        assert_eq!(
            err,
            ResolveError::Component {
                vector: "Scale",
                source: ComponentError::Missing(Axis::Y),
            }
        );
        assert_eq!(err.field(), "Scale");
        assert_eq!(err.to_string(), "Scale: missing Y component");
    }

    #[test]
    fn test_vector_tag_must_match() {
        // A T160 named Translate is not a vector dictionary
        let node = object_without("Translate").with_child(string("Translate", "0 0 0"));

        let err = resolve_object(&node, "ObjectList").unwrap_err();
        assert_eq!(err, ResolveError::MissingField { field: "Translate" });
    }

    #[test]
    fn test_object_id() {
        assert_eq!(object_id(&object_without("")), Some("obj12"));
        assert_eq!(object_id(&object_without("Id")), None);
    }
}

//! Tag and attribute codes used by BYML-XML scenario dumps.

/// Wrapper element directly under the document root.
pub const BYML_ROOT: &str = "BymlRoot";

/// Container holding every scenario entry.
pub const SCENARIO_ROOT: &str = "T192";

/// Named string scalar (`Id`, `ModelName`, `UnitConfigName`).
pub const STRING_FIELD: &str = "T160";

/// Named dictionary used for `Translate`, `Scale` and `Rotate`.
pub const VECTOR_FIELD: &str = "T193";

/// Named float scalar inside a vector dictionary.
pub const FLOAT_FIELD: &str = "T210";

/// Key attribute.
pub const NAME_ATTR: &str = "N";

/// Value attribute.
pub const VALUE_ATTR: &str = "V";

// Object field keys
pub const FIELD_ID: &str = "Id";
pub const FIELD_MODEL_NAME: &str = "ModelName";
pub const FIELD_UNIT_CONFIG_NAME: &str = "UnitConfigName";
pub const FIELD_TRANSLATE: &str = "Translate";
pub const FIELD_SCALE: &str = "Scale";
pub const FIELD_ROTATE: &str = "Rotate";

//! Annotations attached to resolved declarations.
//!
//! Only the annotation name and its constant arguments survive resolution.
//! Arguments that were omitted at the use site are absent from the map, so
//! callers supply the annotation's declared default when reading them.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::QualifiedName;

// ============================================================================
// Registration annotations
// ============================================================================

pub const GODOT_BASE_TYPE: &str = "godot.annotation.GodotBaseType";
pub const REGISTER_CLASS: &str = "godot.annotation.RegisterClass";
pub const REGISTER_FUNCTION: &str = "godot.annotation.RegisterFunction";
pub const REGISTER_PROPERTY: &str = "godot.annotation.RegisterProperty";
pub const REGISTER_SIGNAL: &str = "godot.annotation.RegisterSignal";

pub const CLASS_NAME_ARGUMENT: &str = "className";
pub const IS_TOOL_ARGUMENT: &str = "isTool";
pub const RPC_MODE_ARGUMENT: &str = "rpcMode";
pub const VISIBLE_IN_EDITOR_ARGUMENT: &str = "visibleInEditor";

// ============================================================================
// Property hint annotations
// ============================================================================

pub const INT_FLAG: &str = "godot.annotation.IntFlag";
pub const MULTILINE_TEXT: &str = "godot.annotation.MultilineText";
pub const PLACEHOLDER_TEXT: &str = "godot.annotation.PlaceHolderText";
pub const INT_RANGE: &str = "godot.annotation.IntRange";
pub const DOUBLE_RANGE: &str = "godot.annotation.DoubleRange";
pub const EXP_EASING: &str = "godot.annotation.ExpEasing";
pub const FILE: &str = "godot.annotation.File";
pub const DIR: &str = "godot.annotation.Dir";
pub const COLOR_NO_ALPHA: &str = "godot.annotation.ColorNoAlpha";

/// Every annotation that selects a property type hint.
pub const PROPERTY_HINTS: &[&str] = &[
    INT_FLAG,
    MULTILINE_TEXT,
    PLACEHOLDER_TEXT,
    INT_RANGE,
    DOUBLE_RANGE,
    EXP_EASING,
    FILE,
    DIR,
    COLOR_NO_ALPHA,
];

pub const RANGE_START_ARGUMENT: &str = "start";
pub const RANGE_END_ARGUMENT: &str = "end";
pub const RANGE_STEP_ARGUMENT: &str = "step";
pub const RANGE_OR_ARGUMENT: &str = "or";
pub const EXP_EASING_ATTENUATION_ARGUMENT: &str = "attenuation";
pub const EXP_EASING_INOUT_ARGUMENT: &str = "inout";
pub const FILE_EXTENSIONS_ARGUMENT: &str = "extensions";
pub const FILE_GLOBAL_ARGUMENT: &str = "global";
pub const INT_FLAG_NAMES_ARGUMENT: &str = "names";

/// A constant annotation argument.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum AnnotationValue {
    Bool(bool),
    Int(i64),
    Double(f64),
    String(String),
    /// An enum entry such as `RPCMode.REMOTE`.
    EnumEntry {
        class: QualifiedName,
        entry: String,
    },
    Array(Vec<AnnotationValue>),
}

impl AnnotationValue {
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            AnnotationValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            AnnotationValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Render a numeric argument the way it appears in Kotlin source.
    pub fn as_number_text(&self) -> Option<String> {
        match self {
            AnnotationValue::Int(i) => Some(i.to_string()),
            AnnotationValue::Double(d) => Some(format_double(*d)),
            _ => None,
        }
    }

    pub fn as_enum_entry(&self) -> Option<(&QualifiedName, &str)> {
        match self {
            AnnotationValue::EnumEntry { class, entry } => Some((class, entry)),
            _ => None,
        }
    }

    /// String elements of an array argument. Non-string elements are skipped.
    pub fn as_string_array(&self) -> Vec<&str> {
        match self {
            AnnotationValue::Array(values) => {
                values.iter().filter_map(AnnotationValue::as_str).collect()
            }
            AnnotationValue::String(s) => vec![s.as_str()],
            _ => Vec::new(),
        }
    }
}

/// Doubles keep a fractional part so `1.0` does not collapse to `1`.
fn format_double(value: f64) -> String {
    if value.fract() == 0.0 && value.is_finite() {
        format!("{value:.1}")
    } else {
        value.to_string()
    }
}

/// A single annotation use.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Annotation {
    pub fq_name: QualifiedName,
    #[serde(default)]
    pub arguments: BTreeMap<String, AnnotationValue>,
}

impl Annotation {
    pub fn new(fq_name: impl Into<QualifiedName>) -> Self {
        Self {
            fq_name: fq_name.into(),
            arguments: BTreeMap::new(),
        }
    }

    /// Builder: set an argument.
    pub fn with_argument(mut self, name: impl Into<String>, value: AnnotationValue) -> Self {
        self.arguments.insert(name.into(), value);
        self
    }

    pub fn argument(&self, name: &str) -> Option<&AnnotationValue> {
        self.arguments.get(name)
    }
}

/// The annotation set of a declaration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Annotations(pub Vec<Annotation>);

impl Annotations {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: add an annotation.
    pub fn with(mut self, annotation: Annotation) -> Self {
        self.0.push(annotation);
        self
    }

    pub fn iter(&self) -> impl Iterator<Item = &Annotation> {
        self.0.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn has(&self, fq_name: &str) -> bool {
        self.get(fq_name).is_some()
    }

    pub fn get(&self, fq_name: &str) -> Option<&Annotation> {
        self.0.iter().find(|a| a.fq_name.is(fq_name))
    }

    /// Read an argument of the given annotation, if both are present.
    pub fn value(&self, fq_name: &str, argument: &str) -> Option<&AnnotationValue> {
        self.get(fq_name)?.argument(argument)
    }

    /// Read a boolean argument, falling back to the annotation's default.
    pub fn value_bool(&self, fq_name: &str, argument: &str, default: bool) -> bool {
        self.value(fq_name, argument)
            .and_then(AnnotationValue::as_bool)
            .unwrap_or(default)
    }

    /// Read a string argument, falling back to the annotation's default.
    pub fn value_str<'a>(&'a self, fq_name: &str, argument: &str, default: &'a str) -> &'a str {
        self.value(fq_name, argument)
            .and_then(AnnotationValue::as_str)
            .unwrap_or(default)
    }

    /// The first property hint annotation present, if any.
    pub fn property_hint(&self) -> Option<&Annotation> {
        self.0
            .iter()
            .find(|a| PROPERTY_HINTS.iter().any(|hint| a.fq_name.is(hint)))
    }
}

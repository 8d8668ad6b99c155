//! Type tag mapping.
//!
//! Every value crossing the engine boundary is tagged with one of the
//! engine's variant types. The mapping from resolved Kotlin types is closed:
//! a type that matches no rule cannot be registered at all.
//!
//! ## Rules (first match wins)
//!
//! | type | tag |
//! |---|---|
//! | `Unit` | `NIL` |
//! | `Int`, `Long` | `LONG` |
//! | `Float`, `Double` | `DOUBLE` |
//! | `String` | `STRING` |
//! | `Boolean` | `BOOL` |
//! | `godot.core.VariantArray` | `ARRAY` |
//! | `godot.core.RID` | `_RID` |
//! | core types (`Vector2`, `Color`, `PoolIntArray`, ...) | simple name upper-cased |
//! | `Any`, or anything with `Any` among its supertypes | `OBJECT` |
//!
//! Integral and floating types are matched without their nullable variants,
//! which fall through to `OBJECT`.

use std::fmt;

use godot_entry_codegen::{ClassName, CodeArg, CodeBlock, EmitError};
use godot_entry_core::{KotlinType, TypeMappingError};

const VARIANT_TYPE_PACKAGE: &str = "godot.core.VariantType";

/// Reference-counted engine base type.
pub const REFERENCE_TYPE: &str = "godot.Reference";

const GODOT_ARRAY: &str = "godot.core.GodotArray";
const VARIANT_ARRAY: &str = "godot.core.VariantArray";
const RID: &str = "godot.core.RID";

/// Engine variant type tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum VariantType {
    Nil,
    Long,
    Double,
    String,
    Bool,
    Array,
    Rid,
    Object,
    Vector2,
    Rect2,
    Vector3,
    Transform2D,
    Plane,
    Quat,
    Aabb,
    Basis,
    Transform,
    Color,
    NodePath,
    Dictionary,
    PoolByteArray,
    PoolIntArray,
    PoolRealArray,
    PoolStringArray,
    PoolColorArray,
    PoolVector2Array,
    PoolVector3Array,
    ObjectArray,
    EnumArray,
    BoolVariantArray,
    IntVariantArray,
    RealVariantArray,
    StringVariantArray,
    AabbArray,
    BasisArray,
    ColorArray,
    NodePathArray,
    PlaneArray,
    QuatArray,
    Rect2Array,
    RidArray,
    Transform2DArray,
    TransformArray,
    Vector2Array,
    Vector3Array,
}

/// Core types, tagged by their upper-cased simple name.
///
/// `VariantArray` and `RID` are listed for [`is_core_type`] but are matched
/// by their own rules first.
const CORE_TYPES: &[(&str, VariantType)] = &[
    ("godot.core.Vector2", VariantType::Vector2),
    ("godot.core.Rect2", VariantType::Rect2),
    ("godot.core.Vector3", VariantType::Vector3),
    ("godot.core.Transform2D", VariantType::Transform2D),
    ("godot.core.Plane", VariantType::Plane),
    ("godot.core.Quat", VariantType::Quat),
    ("godot.core.AABB", VariantType::Aabb),
    ("godot.core.Basis", VariantType::Basis),
    ("godot.core.Transform", VariantType::Transform),
    ("godot.core.Color", VariantType::Color),
    ("godot.core.NodePath", VariantType::NodePath),
    ("godot.core.RID", VariantType::Rid),
    ("godot.Object", VariantType::Object),
    ("godot.core.Dictionary", VariantType::Dictionary),
    ("godot.core.PoolByteArray", VariantType::PoolByteArray),
    ("godot.core.PoolIntArray", VariantType::PoolIntArray),
    ("godot.core.PoolRealArray", VariantType::PoolRealArray),
    ("godot.core.PoolStringArray", VariantType::PoolStringArray),
    ("godot.core.PoolColorArray", VariantType::PoolColorArray),
    ("godot.core.PoolVector2Array", VariantType::PoolVector2Array),
    ("godot.core.PoolVector3Array", VariantType::PoolVector3Array),
    ("godot.core.VariantArray", VariantType::Array),
    ("godot.core.ObjectArray", VariantType::ObjectArray),
    ("godot.core.EnumArray", VariantType::EnumArray),
    ("godot.core.BoolVariantArray", VariantType::BoolVariantArray),
    ("godot.core.IntVariantArray", VariantType::IntVariantArray),
    ("godot.core.RealVariantArray", VariantType::RealVariantArray),
    ("godot.core.StringVariantArray", VariantType::StringVariantArray),
    ("godot.core.AABBArray", VariantType::AabbArray),
    ("godot.core.BasisArray", VariantType::BasisArray),
    ("godot.core.ColorArray", VariantType::ColorArray),
    ("godot.core.NodePathArray", VariantType::NodePathArray),
    ("godot.core.PlaneArray", VariantType::PlaneArray),
    ("godot.core.QuatArray", VariantType::QuatArray),
    ("godot.core.Rect2Array", VariantType::Rect2Array),
    ("godot.core.RIDArray", VariantType::RidArray),
    ("godot.core.Transform2DArray", VariantType::Transform2DArray),
    ("godot.core.TransformArray", VariantType::TransformArray),
    ("godot.core.Vector2Array", VariantType::Vector2Array),
    ("godot.core.Vector3Array", VariantType::Vector3Array),
];

impl VariantType {
    /// Map a resolved type to its tag.
    pub fn of(ty: &KotlinType) -> Result<Self, TypeMappingError> {
        let tag = if ty.is_unit() {
            VariantType::Nil
        } else if ty.is_int() || ty.is_long() {
            VariantType::Long
        } else if ty.is_float() || ty.is_double() {
            VariantType::Double
        } else if ty.is_string() {
            VariantType::String
        } else if ty.is_boolean_or_nullable() {
            VariantType::Bool
        } else if ty.fq_name.is(VARIANT_ARRAY) {
            VariantType::Array
        } else if ty.fq_name.is(RID) {
            VariantType::Rid
        } else if let Some(core) = core_type(ty) {
            core
        } else if ty.is_any_or_nullable() || ty.has_any_supertype() {
            VariantType::Object
        } else {
            return Err(TypeMappingError::Unmappable {
                type_name: ty.to_string(),
            });
        };
        Ok(tag)
    }

    /// The engine's spelling of the tag (`LONG`, `_RID`, `TRANSFORM2D`).
    pub fn tag(self) -> &'static str {
        match self {
            VariantType::Nil => "NIL",
            VariantType::Long => "LONG",
            VariantType::Double => "DOUBLE",
            VariantType::String => "STRING",
            VariantType::Bool => "BOOL",
            VariantType::Array => "ARRAY",
            VariantType::Rid => "_RID",
            VariantType::Object => "OBJECT",
            VariantType::Vector2 => "VECTOR2",
            VariantType::Rect2 => "RECT2",
            VariantType::Vector3 => "VECTOR3",
            VariantType::Transform2D => "TRANSFORM2D",
            VariantType::Plane => "PLANE",
            VariantType::Quat => "QUAT",
            VariantType::Aabb => "AABB",
            VariantType::Basis => "BASIS",
            VariantType::Transform => "TRANSFORM",
            VariantType::Color => "COLOR",
            VariantType::NodePath => "NODEPATH",
            VariantType::Dictionary => "DICTIONARY",
            VariantType::PoolByteArray => "POOLBYTEARRAY",
            VariantType::PoolIntArray => "POOLINTARRAY",
            VariantType::PoolRealArray => "POOLREALARRAY",
            VariantType::PoolStringArray => "POOLSTRINGARRAY",
            VariantType::PoolColorArray => "POOLCOLORARRAY",
            VariantType::PoolVector2Array => "POOLVECTOR2ARRAY",
            VariantType::PoolVector3Array => "POOLVECTOR3ARRAY",
            VariantType::ObjectArray => "OBJECTARRAY",
            VariantType::EnumArray => "ENUMARRAY",
            VariantType::BoolVariantArray => "BOOLVARIANTARRAY",
            VariantType::IntVariantArray => "INTVARIANTARRAY",
            VariantType::RealVariantArray => "REALVARIANTARRAY",
            VariantType::StringVariantArray => "STRINGVARIANTARRAY",
            VariantType::AabbArray => "AABBARRAY",
            VariantType::BasisArray => "BASISARRAY",
            VariantType::ColorArray => "COLORARRAY",
            VariantType::NodePathArray => "NODEPATHARRAY",
            VariantType::PlaneArray => "PLANEARRAY",
            VariantType::QuatArray => "QUATARRAY",
            VariantType::Rect2Array => "RECT2ARRAY",
            VariantType::RidArray => "RIDARRAY",
            VariantType::Transform2DArray => "TRANSFORM2DARRAY",
            VariantType::TransformArray => "TRANSFORMARRAY",
            VariantType::Vector2Array => "VECTOR2ARRAY",
            VariantType::Vector3Array => "VECTOR3ARRAY",
        }
    }

    /// The tag as a `VariantType` enum entry for `%T`.
    pub fn class_name(self) -> ClassName {
        ClassName::new(VARIANT_TYPE_PACKAGE, self.tag())
    }
}

impl fmt::Display for VariantType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl From<VariantType> for CodeArg {
    fn from(tag: VariantType) -> Self {
        tag.class_name().into()
    }
}

fn core_type(ty: &KotlinType) -> Option<VariantType> {
    CORE_TYPES
        .iter()
        .find(|(name, _)| ty.fq_name.is(name))
        .map(|(_, tag)| *tag)
}

/// One of the engine's built-in geometry or collection types.
pub fn is_core_type(ty: &KotlinType) -> bool {
    core_type(ty).is_some()
}

/// `godot.Reference` or one of its subclasses.
pub fn is_reference(ty: &KotlinType) -> bool {
    ty.is_of_type(REFERENCE_TYPE)
}

/// An engine array type usable as a list property.
pub fn is_compatible_list(ty: &KotlinType) -> bool {
    ty.is_of_type(GODOT_ARRAY) || ty.is_of_type(VARIANT_ARRAY)
}

/// Lambda body converting the engine value back to the property type.
///
/// Engine integers and floats arrive widened, so `Int` and `Float` are cast
/// from `Long` and `Double` first.
pub fn cast_from_any(ty: &KotlinType) -> Result<CodeBlock, EmitError> {
    if ty.is_int() {
        CodeBlock::of("(any as %T).toInt()", vec![ClassName::new("kotlin", "Long").into()])
    } else if ty.is_float() {
        CodeBlock::of("(any as %T).toFloat()", vec![ClassName::new("kotlin", "Double").into()])
    } else {
        CodeBlock::of("any as %T", vec![ClassName::from_qualified(&ty.fq_name).into()])
    }
}

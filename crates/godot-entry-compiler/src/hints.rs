//! Editor type hints for plain properties.
//!
//! A hint tells the editor how to present a property (a slider for a range,
//! a file picker for a path). Hints come from optional annotations next to
//! `@RegisterProperty`, and each annotation is only valid on certain types.
//!
//! ## Accepted combinations
//!
//! | property type | annotations | hint |
//! |---|---|---|
//! | `Int` | `IntFlag`, `IntRange` | `FLAGS`, `RANGE` |
//! | `Long` | `IntRange` | `RANGE` |
//! | `Float`, `Double` | `DoubleRange`, `ExpEasing` | `RANGE`, `EXP_EASING` |
//! | `String` | `MultilineText`, `PlaceHolderText`, `File`, `Dir` | text and path hints |
//! | `Boolean` | none | `NONE` |
//! | `Color` | `ColorNoAlpha` | `COLOR_NO_ALPHA` |
//! | other core types | none | `NONE` |
//! | `Reference` subclasses | none | `RESOURCE_TYPE` |
//! | engine arrays | none | `NONE` |
//! | other engine objects | none | `NONE` |

use godot_entry_codegen::ClassName;
use godot_entry_core::annotations::{
    self, Annotation, COLOR_NO_ALPHA, DIR, DOUBLE_RANGE, EXP_EASING, FILE, INT_FLAG, INT_RANGE,
    MULTILINE_TEXT, PLACEHOLDER_TEXT,
};
use godot_entry_core::{DeclarationError, PropertyDeclaration};

use crate::runtime;
use crate::variant::{is_compatible_list, is_core_type, is_reference};

const COLOR: &str = "godot.core.Color";
const ENGINE_OBJECT: &str = "godot.Object";

/// Editor presentation hint of a property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PropertyHint {
    None,
    Range,
    ExpEasing,
    Flags,
    File,
    GlobalFile,
    Dir,
    GlobalDir,
    ResourceType,
    MultilineText,
    PlaceholderText,
    ColorNoAlpha,
}

impl PropertyHint {
    /// Suffix of the `GODOT_PROPERTY_HINT_*` constant.
    pub fn name(self) -> &'static str {
        match self {
            PropertyHint::None => "NONE",
            PropertyHint::Range => "RANGE",
            PropertyHint::ExpEasing => "EXP_EASING",
            PropertyHint::Flags => "FLAGS",
            PropertyHint::File => "FILE",
            PropertyHint::GlobalFile => "GLOBAL_FILE",
            PropertyHint::Dir => "DIR",
            PropertyHint::GlobalDir => "GLOBAL_DIR",
            PropertyHint::ResourceType => "RESOURCE_TYPE",
            PropertyHint::MultilineText => "MULTILINE_TEXT",
            PropertyHint::PlaceholderText => "PLACEHOLDER_TEXT",
            PropertyHint::ColorNoAlpha => "COLOR_NO_ALPHA",
        }
    }

    pub fn class_name(self) -> ClassName {
        runtime::property_hint(self.name())
    }
}

/// A resolved hint together with its hint string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeHint {
    pub hint: PropertyHint,
    pub hint_string: String,
}

/// Determine the editor hint of a property from its type and annotations.
pub fn type_hint(property: &PropertyDeclaration) -> Result<TypeHint, DeclarationError> {
    let annotation = property.annotations.property_hint();
    let hint = select_hint(property, annotation)?;
    let hint_string = hint_string(property, hint, annotation);
    Ok(TypeHint { hint, hint_string })
}

fn select_hint(
    property: &PropertyDeclaration,
    annotation: Option<&Annotation>,
) -> Result<PropertyHint, DeclarationError> {
    let ty = &property.ty;
    let name = annotation.map(|a| a.fq_name.to_string());
    let name = name.as_deref();
    let global = || {
        annotation
            .and_then(|a| a.argument(annotations::FILE_GLOBAL_ARGUMENT))
            .and_then(|v| v.as_bool())
            .unwrap_or(false)
    };

    let hint = if ty.is_int() {
        match name {
            None => Some(PropertyHint::None),
            Some(INT_FLAG) => Some(PropertyHint::Flags),
            Some(INT_RANGE) => Some(PropertyHint::Range),
            Some(_) => None,
        }
    } else if ty.is_long() {
        match name {
            None => Some(PropertyHint::None),
            Some(INT_RANGE) => Some(PropertyHint::Range),
            Some(_) => None,
        }
    } else if ty.is_float() || ty.is_double() {
        match name {
            None => Some(PropertyHint::None),
            Some(DOUBLE_RANGE) => Some(PropertyHint::Range),
            Some(EXP_EASING) => Some(PropertyHint::ExpEasing),
            Some(_) => None,
        }
    } else if ty.is_string() {
        match name {
            None => Some(PropertyHint::None),
            Some(MULTILINE_TEXT) => Some(PropertyHint::MultilineText),
            Some(PLACEHOLDER_TEXT) => Some(PropertyHint::PlaceholderText),
            Some(FILE) if global() => Some(PropertyHint::GlobalFile),
            Some(FILE) => Some(PropertyHint::File),
            Some(DIR) if global() => Some(PropertyHint::GlobalDir),
            Some(DIR) => Some(PropertyHint::Dir),
            Some(_) => None,
        }
    } else if ty.is_boolean_or_nullable() {
        name.is_none().then_some(PropertyHint::None)
    } else if is_core_type(ty) && !is_compatible_list(ty) {
        match name {
            None => Some(PropertyHint::None),
            Some(COLOR_NO_ALPHA) if ty.fq_name.is(COLOR) => Some(PropertyHint::ColorNoAlpha),
            Some(_) => None,
        }
    } else if is_reference(ty) {
        name.is_none().then_some(PropertyHint::ResourceType)
    } else if is_compatible_list(ty) || ty.is_of_type(ENGINE_OBJECT) {
        name.is_none().then_some(PropertyHint::None)
    } else {
        return Err(DeclarationError::NoTypeHint {
            property: property.qualified_name(),
            type_name: ty.to_string(),
        });
    };

    hint.ok_or_else(|| DeclarationError::WrongHintAnnotation {
        property: property.qualified_name(),
        hint: annotation
            .map(|a| a.fq_name.clone())
            .unwrap_or_else(|| ty.fq_name.clone()),
        type_name: ty.to_string(),
    })
}

/// The hint string passed next to the hint.
///
/// - range: `start,end,step[,or_greater|or_lesser]`
/// - easing: `attenuation`, `inout` or both, comma separated
/// - file: accepted extensions, comma separated
/// - flags: flag names, comma separated
/// - resource: simple name of the resource class
fn hint_string(
    property: &PropertyDeclaration,
    hint: PropertyHint,
    annotation: Option<&Annotation>,
) -> String {
    let argument = |name: &str| annotation.and_then(|a| a.argument(name));

    match hint {
        PropertyHint::Range => {
            let default_step = if property.ty.is_float() || property.ty.is_double() {
                "1.0"
            } else {
                "1"
            };
            let number = |name: &str, default: &str| {
                argument(name)
                    .and_then(|v| v.as_number_text())
                    .unwrap_or_else(|| default.to_string())
            };
            let mut parts = vec![
                number(annotations::RANGE_START_ARGUMENT, "0"),
                number(annotations::RANGE_END_ARGUMENT, "0"),
                number(annotations::RANGE_STEP_ARGUMENT, default_step),
            ];
            if let Some((_, entry)) =
                argument(annotations::RANGE_OR_ARGUMENT).and_then(|v| v.as_enum_entry())
                && entry != "NONE"
            {
                parts.push(entry.to_lowercase());
            }
            parts.join(",")
        }
        PropertyHint::ExpEasing => {
            let mut parts = Vec::new();
            for flag in [
                annotations::EXP_EASING_ATTENUATION_ARGUMENT,
                annotations::EXP_EASING_INOUT_ARGUMENT,
            ] {
                if argument(flag).and_then(|v| v.as_bool()).unwrap_or(false) {
                    parts.push(flag);
                }
            }
            parts.join(",")
        }
        PropertyHint::File | PropertyHint::GlobalFile => {
            argument(annotations::FILE_EXTENSIONS_ARGUMENT)
                .map(|v| v.as_string_array().join(","))
                .unwrap_or_default()
        }
        PropertyHint::Flags => argument(annotations::INT_FLAG_NAMES_ARGUMENT)
            .map(|v| v.as_string_array().join(","))
            .unwrap_or_default(),
        PropertyHint::ResourceType => property.ty.simple_name().to_string(),
        _ => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use godot_entry_core::types::{BOOLEAN, DOUBLE, INT, STRING};
    use godot_entry_core::{AnnotationValue, KotlinType};

    fn property(ty: KotlinType) -> PropertyDeclaration {
        PropertyDeclaration::new("game.Player", "value", ty).registered()
    }

    #[test]
    fn plain_types_without_annotations() {
        assert_eq!(type_hint(&property(KotlinType::simple(INT))).unwrap().hint, PropertyHint::None);
        assert_eq!(
            type_hint(&property(KotlinType::simple(BOOLEAN))).unwrap().hint,
            PropertyHint::None
        );
        assert_eq!(
            type_hint(&property(KotlinType::simple("godot.core.Vector2"))).unwrap().hint,
            PropertyHint::None
        );
    }

    #[test]
    fn int_range_with_or_greater() {
        let p = property(KotlinType::simple(INT)).with_annotation(
            Annotation::new(INT_RANGE)
                .with_argument("start", AnnotationValue::Int(0))
                .with_argument("end", AnnotationValue::Int(100))
                .with_argument("step", AnnotationValue::Int(5))
                .with_argument(
                    "or",
                    AnnotationValue::EnumEntry {
                        class: "godot.annotation.Range".into(),
                        entry: "OR_GREATER".into(),
                    },
                ),
        );
        let hint = type_hint(&p).unwrap();
        assert_eq!(hint.hint, PropertyHint::Range);
        assert_eq!(hint.hint_string, "0,100,5,or_greater");
    }

    #[test]
    fn double_range_defaults_step() {
        let p = property(KotlinType::simple(DOUBLE)).with_annotation(
            Annotation::new(DOUBLE_RANGE)
                .with_argument("start", AnnotationValue::Double(0.0))
                .with_argument("end", AnnotationValue::Double(2.5)),
        );
        assert_eq!(type_hint(&p).unwrap().hint_string, "0.0,2.5,1.0");
    }

    #[test]
    fn easing_and_flags() {
        let easing = property(KotlinType::simple(DOUBLE)).with_annotation(
            Annotation::new(EXP_EASING)
                .with_argument("attenuation", AnnotationValue::Bool(true))
                .with_argument("inout", AnnotationValue::Bool(true)),
        );
        let hint = type_hint(&easing).unwrap();
        assert_eq!(hint.hint, PropertyHint::ExpEasing);
        assert_eq!(hint.hint_string, "attenuation,inout");

        let flags = property(KotlinType::simple(INT)).with_annotation(
            Annotation::new(INT_FLAG).with_argument(
                "names",
                AnnotationValue::Array(vec![
                    AnnotationValue::String("Fire".into()),
                    AnnotationValue::String("Water".into()),
                ]),
            ),
        );
        let hint = type_hint(&flags).unwrap();
        assert_eq!(hint.hint, PropertyHint::Flags);
        assert_eq!(hint.hint_string, "Fire,Water");
    }

    #[test]
    fn global_file_with_extensions() {
        let p = property(KotlinType::simple(STRING)).with_annotation(
            Annotation::new(FILE)
                .with_argument("global", AnnotationValue::Bool(true))
                .with_argument(
                    "extensions",
                    AnnotationValue::Array(vec![
                        AnnotationValue::String("*.png".into()),
                        AnnotationValue::String("*.jpg".into()),
                    ]),
                ),
        );
        let hint = type_hint(&p).unwrap();
        assert_eq!(hint.hint, PropertyHint::GlobalFile);
        assert_eq!(hint.hint_string, "*.png,*.jpg");
        assert_eq!(
            hint.hint.class_name().canonical(),
            "godot.gdnative.godot_property_hint.GODOT_PROPERTY_HINT_GLOBAL_FILE"
        );
    }

    #[test]
    fn color_no_alpha_only_on_color() {
        let color =
            property(KotlinType::simple(COLOR)).with_annotation(Annotation::new(COLOR_NO_ALPHA));
        assert_eq!(type_hint(&color).unwrap().hint, PropertyHint::ColorNoAlpha);

        let vector = property(KotlinType::simple("godot.core.Vector2"))
            .with_annotation(Annotation::new(COLOR_NO_ALPHA));
        assert!(matches!(
            type_hint(&vector),
            Err(DeclarationError::WrongHintAnnotation { .. })
        ));
    }

    #[test]
    fn wrong_annotation_on_bool() {
        let p =
            property(KotlinType::simple(BOOLEAN)).with_annotation(Annotation::new(MULTILINE_TEXT));
        let err = type_hint(&p).unwrap_err();
        assert_eq!(
            err.to_string(),
            "The annotation godot.annotation.MultilineText cannot be used on the property game.Player.value of type kotlin.Boolean"
        );
    }

    #[test]
    fn references_carry_resource_type() {
        let texture = KotlinType::simple("godot.Texture").with_supertype("godot.Reference");
        let hint = type_hint(&property(texture)).unwrap();
        assert_eq!(hint.hint, PropertyHint::ResourceType);
        assert_eq!(hint.hint_string, "Texture");
    }

    #[test]
    fn unknown_types_have_no_hint() {
        let err = type_hint(&property(KotlinType::simple("kotlin.collections.List"))).unwrap_err();
        assert!(matches!(err, DeclarationError::NoTypeHint { .. }));
    }
}

//! Resolved Kotlin types.
//!
//! A [`KotlinType`] is what the compiler front-end hands us after type
//! inference: a fully qualified class name plus nullability, type arguments
//! and the transitive supertype closure. The generator never resolves types
//! itself; it only asks questions about their shape.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::QualifiedName;

// ============================================================================
// Well-known type names
// ============================================================================

pub const UNIT: &str = "kotlin.Unit";
pub const INT: &str = "kotlin.Int";
pub const LONG: &str = "kotlin.Long";
pub const FLOAT: &str = "kotlin.Float";
pub const DOUBLE: &str = "kotlin.Double";
pub const STRING: &str = "kotlin.String";
pub const BOOLEAN: &str = "kotlin.Boolean";
pub const ANY: &str = "kotlin.Any";
pub const SET: &str = "kotlin.collections.Set";
pub const MUTABLE_SET: &str = "kotlin.collections.MutableSet";

/// A resolved type as produced by the compiler front-end.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct KotlinType {
    /// Fully qualified name of the type's class.
    pub fq_name: QualifiedName,
    /// Whether the type is marked nullable (`T?`).
    #[serde(default)]
    pub nullable: bool,
    /// Type arguments, in declaration order.
    #[serde(default)]
    pub arguments: Vec<KotlinType>,
    /// Transitive supertypes, nearest first. Does not include the type itself.
    #[serde(default)]
    pub supertypes: Vec<QualifiedName>,
    /// Whether the type's class is an enum class.
    #[serde(default)]
    pub is_enum: bool,
}

impl KotlinType {
    /// Create a non-nullable type without arguments or supertypes.
    pub fn simple(fq_name: impl Into<QualifiedName>) -> Self {
        Self {
            fq_name: fq_name.into(),
            nullable: false,
            arguments: Vec::new(),
            supertypes: Vec::new(),
            is_enum: false,
        }
    }

    /// Builder: mark the type nullable.
    pub fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    /// Builder: add a type argument.
    pub fn with_argument(mut self, argument: KotlinType) -> Self {
        self.arguments.push(argument);
        self
    }

    /// Builder: add a supertype.
    pub fn with_supertype(mut self, supertype: impl Into<QualifiedName>) -> Self {
        self.supertypes.push(supertype.into());
        self
    }

    /// Builder: mark the type as an enum class.
    pub fn as_enum(mut self) -> Self {
        self.is_enum = true;
        self
    }

    // ==========================================================================
    // Shape queries
    // ==========================================================================

    /// The fully qualified name as a dotted string.
    pub fn fq_name_string(&self) -> String {
        self.fq_name.to_string()
    }

    /// The simple (unqualified) class name.
    pub fn simple_name(&self) -> &str {
        self.fq_name.short_name()
    }

    /// Check whether this type, or one of its supertypes, is the given class.
    pub fn is_of_type(&self, fq_name: &str) -> bool {
        self.fq_name.is(fq_name) || self.supertypes.iter().any(|s| s.is(fq_name))
    }

    pub fn is_unit(&self) -> bool {
        self.fq_name.is(UNIT)
    }

    pub fn is_int(&self) -> bool {
        !self.nullable && self.fq_name.is(INT)
    }

    pub fn is_long(&self) -> bool {
        !self.nullable && self.fq_name.is(LONG)
    }

    pub fn is_float(&self) -> bool {
        !self.nullable && self.fq_name.is(FLOAT)
    }

    pub fn is_double(&self) -> bool {
        !self.nullable && self.fq_name.is(DOUBLE)
    }

    /// `kotlin.String`, nullable or not.
    pub fn is_string(&self) -> bool {
        self.fq_name.is(STRING)
    }

    /// `kotlin.Boolean` or `kotlin.Boolean?`.
    pub fn is_boolean_or_nullable(&self) -> bool {
        self.fq_name.is(BOOLEAN)
    }

    /// `kotlin.Any` or `kotlin.Any?`.
    pub fn is_any_or_nullable(&self) -> bool {
        self.fq_name.is(ANY)
    }

    /// Check whether `kotlin.Any` is among the supertypes.
    pub fn has_any_supertype(&self) -> bool {
        self.supertypes.iter().any(|s| s.is(ANY))
    }

    /// `Set<T>`, `MutableSet<T>` or their nullable variants.
    pub fn is_set_or_nullable_set(&self) -> bool {
        self.fq_name.is(SET) || self.fq_name.is(MUTABLE_SET)
    }

    /// The first type argument, if any.
    pub fn first_argument(&self) -> Option<&KotlinType> {
        self.arguments.first()
    }

    /// Check whether the first type argument is an enum.
    pub fn first_argument_is_enum(&self) -> bool {
        self.first_argument().is_some_and(|arg| arg.is_enum)
    }

    /// Render the type the way the compiler prints it in diagnostics.
    ///
    /// Simple names only: `Signal2<String, Int>`, `Vector2?`.
    pub fn display_name(&self) -> String {
        let mut out = self.simple_name().to_string();
        if !self.arguments.is_empty() {
            let args: Vec<String> = self.arguments.iter().map(KotlinType::display_name).collect();
            out.push('<');
            out.push_str(&args.join(", "));
            out.push('>');
        }
        if self.nullable {
            out.push('?');
        }
        out
    }
}

impl fmt::Display for KotlinType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.fq_name)?;
        if !self.arguments.is_empty() {
            let args: Vec<String> = self.arguments.iter().map(ToString::to_string).collect();
            write!(f, "<{}>", args.join(", "))?;
        }
        if self.nullable {
            write!(f, "?")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn primitive_predicates() {
        assert!(KotlinType::simple(INT).is_int());
        assert!(!KotlinType::simple(INT).nullable().is_int());
        assert!(KotlinType::simple(BOOLEAN).nullable().is_boolean_or_nullable());
        assert!(KotlinType::simple(STRING).is_string());
        assert!(KotlinType::simple(UNIT).is_unit());
    }

    #[test]
    fn is_of_type_checks_supertypes() {
        let texture = KotlinType::simple("godot.Texture")
            .with_supertype("godot.Resource")
            .with_supertype("godot.Reference")
            .with_supertype(ANY);
        assert!(texture.is_of_type("godot.Texture"));
        assert!(texture.is_of_type("godot.Reference"));
        assert!(!texture.is_of_type("godot.Node"));
        assert!(texture.has_any_supertype());
    }

    #[test]
    fn set_of_enum() {
        let flags = KotlinType::simple(SET)
            .nullable()
            .with_argument(KotlinType::simple("game.Flag").as_enum());
        assert!(flags.is_set_or_nullable_set());
        assert!(flags.first_argument_is_enum());
    }

    #[test]
    fn display_name_uses_simple_names() {
        let signal = KotlinType::simple("godot.signals.Signal2")
            .with_argument(KotlinType::simple(STRING))
            .with_argument(KotlinType::simple(INT).nullable());
        assert_eq!(signal.display_name(), "Signal2<String, Int?>");
        assert_eq!(
            signal.to_string(),
            "godot.signals.Signal2<kotlin.String, kotlin.Int?>"
        );
    }
}

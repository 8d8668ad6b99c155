//! Class declarations.

use serde::{Deserialize, Serialize};

use super::{ClassMembers, MemberDeclaration, MemberScope, MemberSource, ValueParameter};
use super::{FunctionDeclaration, PropertyDeclaration};
use crate::annotations::{self, Annotation, AnnotationValue, Annotations};
use crate::{KotlinType, QualifiedName};

/// A class constructor.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConstructorDeclaration {
    #[serde(default)]
    pub parameters: Vec<ValueParameter>,
    /// Declaration source text, for diagnostics.
    #[serde(default)]
    pub source_text: Option<String>,
}

impl ConstructorDeclaration {
    /// The no-argument constructor.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Builder: add a parameter.
    pub fn with_parameter(mut self, name: impl Into<String>, ty: KotlinType) -> Self {
        self.parameters.push(ValueParameter::new(name, ty));
        self
    }

    /// Source text for diagnostics, reconstructed when missing.
    pub fn describe_source(&self) -> String {
        if let Some(text) = &self.source_text {
            return text.clone();
        }
        let params: Vec<String> = self
            .parameters
            .iter()
            .map(|p| format!("{}: {}", p.name, p.ty.display_name()))
            .collect();
        format!("constructor({})", params.join(", "))
    }
}

/// A resolved class, from the current compilation or from a dependency.
///
/// # Example
///
/// ```
/// use godot_entry_core::{ClassDeclaration, KotlinType, PropertyDeclaration};
///
/// let player = ClassDeclaration::new("game.Player")
///     .with_super_class("godot.Node")
///     .registered()
///     .with_property(
///         PropertyDeclaration::new("game.Player", "health", KotlinType::simple("kotlin.Int"))
///             .registered(),
///     );
///
/// assert!(player.is_registered());
/// assert_eq!(player.members.as_source().registered_properties().len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassDeclaration {
    pub fq_name: QualifiedName,
    /// Direct superclass. `None` only for roots (`kotlin.Any` subclasses
    /// without an explicit superclass).
    #[serde(default)]
    pub super_class: Option<QualifiedName>,
    #[serde(default)]
    pub interfaces: Vec<QualifiedName>,
    #[serde(default)]
    pub annotations: Annotations,
    #[serde(default)]
    pub constructors: Vec<ConstructorDeclaration>,
    #[serde(default)]
    pub members: ClassMembers,
}

impl ClassDeclaration {
    /// Create a source class with no members or constructors.
    pub fn new(fq_name: impl Into<QualifiedName>) -> Self {
        Self {
            fq_name: fq_name.into(),
            super_class: None,
            interfaces: Vec::new(),
            annotations: Annotations::new(),
            constructors: Vec::new(),
            members: ClassMembers::default(),
        }
    }

    /// Create a class read from a compiled dependency.
    pub fn compiled(fq_name: impl Into<QualifiedName>) -> Self {
        Self {
            members: ClassMembers::Compiled {
                scope: MemberScope::new(),
            },
            ..Self::new(fq_name)
        }
    }

    // ==========================================================================
    // Builder methods
    // ==========================================================================

    pub fn with_super_class(mut self, super_class: impl Into<QualifiedName>) -> Self {
        self.super_class = Some(super_class.into());
        self
    }

    pub fn with_interface(mut self, interface: impl Into<QualifiedName>) -> Self {
        self.interfaces.push(interface.into());
        self
    }

    pub fn with_annotation(mut self, annotation: Annotation) -> Self {
        self.annotations.0.push(annotation);
        self
    }

    /// Mark the class `@RegisterClass`.
    pub fn registered(self) -> Self {
        self.with_annotation(Annotation::new(annotations::REGISTER_CLASS))
    }

    /// Mark the class `@RegisterClass(className = name)`.
    pub fn registered_as(self, name: impl Into<String>) -> Self {
        self.with_annotation(
            Annotation::new(annotations::REGISTER_CLASS).with_argument(
                annotations::CLASS_NAME_ARGUMENT,
                AnnotationValue::String(name.into()),
            ),
        )
    }

    /// Mark the class as an engine base type (`@GodotBaseType`).
    pub fn engine_base_type(self) -> Self {
        self.with_annotation(Annotation::new(annotations::GODOT_BASE_TYPE))
    }

    pub fn with_constructor(mut self, constructor: ConstructorDeclaration) -> Self {
        self.constructors.push(constructor);
        self
    }

    /// Add a function in whichever representation the class uses.
    pub fn with_function(mut self, function: FunctionDeclaration) -> Self {
        self.members = match self.members {
            ClassMembers::Source { mut declarations } => {
                declarations.push(MemberDeclaration::Function(function));
                ClassMembers::Source { declarations }
            }
            ClassMembers::Compiled { scope } => ClassMembers::Compiled {
                scope: scope.with_function(function),
            },
        };
        self
    }

    /// Add a property in whichever representation the class uses.
    pub fn with_property(mut self, property: PropertyDeclaration) -> Self {
        self.members = match self.members {
            ClassMembers::Source { mut declarations } => {
                declarations.push(MemberDeclaration::Property(property));
                ClassMembers::Source { declarations }
            }
            ClassMembers::Compiled { scope } => ClassMembers::Compiled {
                scope: scope.with_property(property),
            },
        };
        self
    }

    // ==========================================================================
    // Query methods
    // ==========================================================================

    /// Whether the class carries `@RegisterClass`.
    pub fn is_registered(&self) -> bool {
        self.annotations.has(annotations::REGISTER_CLASS)
    }

    /// Whether the class is a native engine type (`@GodotBaseType`).
    pub fn is_engine_base_type(&self) -> bool {
        self.annotations.has(annotations::GODOT_BASE_TYPE)
    }

    /// `isTool` of `@RegisterClass`, default false.
    pub fn is_tool(&self) -> bool {
        self.annotations
            .value_bool(annotations::REGISTER_CLASS, annotations::IS_TOOL_ARGUMENT, false)
    }

    /// Name the class is registered under in the engine.
    ///
    /// The `className` argument when non-empty, otherwise the fully qualified
    /// name with `.` replaced by `_` (`game.Player` -> `game_Player`).
    pub fn registered_name(&self) -> String {
        let custom = self.annotations.value_str(
            annotations::REGISTER_CLASS,
            annotations::CLASS_NAME_ARGUMENT,
            "",
        );
        if !custom.is_empty() {
            return custom.to_string();
        }
        let package = self.fq_name.package_string().replace('.', "_");
        let joined = format!("{package}_{}", self.fq_name.short_name());
        joined.strip_prefix('_').unwrap_or(&joined).to_string()
    }

    pub fn simple_name(&self) -> &str {
        self.fq_name.short_name()
    }

    /// Whether any member carries a registration annotation.
    pub fn has_annotated_members(&self) -> bool {
        let members = self.members.as_source();
        !members.registered_functions().is_empty()
            || !members.registered_properties().is_empty()
            || !members.registered_signals().is_empty()
    }
}

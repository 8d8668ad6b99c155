//! Error types for entry generation.
//!
//! ## Error Hierarchy
//!
//! ```text
//! GenerationError (top-level wrapper)
//! ├── DeclarationError  - Mistakes in the user's annotated Kotlin code
//! ├── InternalError     - Generator invariant violations ("please report")
//! ├── TypeMappingError  - A type with no engine variant type
//! ├── Emit              - Code emission failures (codegen crate)
//! └── Io                - Filesystem failures while writing output
//! ```
//!
//! Every error aborts the whole pass. There is no partial-success mode, so
//! these types carry enough context (qualified names, source text) for the
//! user to find and fix the declaration.

use std::path::PathBuf;

use thiserror::Error;

use crate::QualifiedName;

/// Maximum number of constructor parameters the engine binding supports.
pub const MAX_CONSTRUCTOR_PARAMETERS: usize = 5;

// ============================================================================
// Declaration Errors
// ============================================================================

/// Errors in the user's annotated declarations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DeclarationError {
    /// A signal property is not prefixed with `signal`.
    #[error(
        "All signals must be prefixed with \"signal\"! Ex: signalButtonPressed. The signal {signal} does not fulfill this criteria."
    )]
    InvalidSignalName { signal: QualifiedName },

    /// A `@RegisterSignal` property is not typed `SignalN<...>`.
    #[error(
        "You annotated {property} with @RegisterSignal but its type {type_name} is no signal! Use \"by signal\" to define signals."
    )]
    NotASignal {
        property: QualifiedName,
        type_name: String,
    },

    /// A `val` annotated with `@RegisterProperty`.
    #[error(
        "You try to register the immutable property {property} with @RegisterProperty. This is not supported! Each property that you register has to be mutable. Use var or lateinit var."
    )]
    ImmutableProperty { property: QualifiedName },

    /// A type hint annotation on a property hidden from the editor.
    #[error(
        "You added the type hint annotation {hint} to the property {property}. But the @RegisterProperty annotation is either not present or the visibleInEditor flag is not set to true"
    )]
    HintWithoutEditorVisibility {
        property: QualifiedName,
        hint: QualifiedName,
    },

    /// A type hint annotation that does not fit the property's type.
    #[error("The annotation {hint} cannot be used on the property {property} of type {type_name}")]
    WrongHintAnnotation {
        property: QualifiedName,
        hint: QualifiedName,
        type_name: String,
    },

    /// A reference-typed property declared without the required delegate.
    #[error(
        "The reference property {property} must be declared with a delegate (`by {delegate}(...)`) so the engine can manage its reference count:\n{source_text}"
    )]
    MissingReferenceDelegate {
        property: QualifiedName,
        delegate: String,
        source_text: String,
    },

    /// A constructor with more parameters than the binding supports.
    #[error(
        "A constructor cannot have more than 5 params in Godot! Reduce the param count for constructor of {class}:\n{source_text}"
    )]
    ConstructorArity {
        class: QualifiedName,
        count: usize,
        source_text: String,
    },

    /// Several classes registered under the same engine name.
    ///
    /// Each group lists `(fq name, registered name)` pairs sharing one name.
    #[error("{}", format_duplicates(.groups))]
    DuplicateClassNames {
        groups: Vec<Vec<(QualifiedName, String)>>,
    },

    /// A default value expression outside the supported grammar.
    #[error(
        "No default value could be extracted for the property {property} with the expression:\n{source_text}\nOnly constants, constructor and function calls, enum entries, flag combinations and const references are supported."
    )]
    UnsupportedDefaultValue {
        property: QualifiedName,
        source_text: String,
    },

    /// A registered class that does not extend any engine type.
    #[error("The registered class {class} does not inherit from any Godot type")]
    MissingEngineBaseClass { class: QualifiedName },

    /// A property type with no editor type hint.
    #[error("There is no type hint for the property {property} of type {type_name}")]
    NoTypeHint {
        property: QualifiedName,
        type_name: String,
    },
}

fn format_duplicates(groups: &[Vec<(QualifiedName, String)>]) -> String {
    let mut out = String::from(
        "There are classes registered with the same name. Check your className argument for the annotation @RegisterClass:\n",
    );
    for (index, group) in groups.iter().enumerate() {
        if index != 0 {
            out.push_str("---\n");
        }
        for (fq_name, registered) in group {
            out.push_str(&format!("RegisteredName: {registered}, ActualClass: {fq_name}\n"));
        }
    }
    out
}

// ============================================================================
// Internal Errors
// ============================================================================

/// Generator invariant violations. These should never happen.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InternalError {
    /// More than one unannotated override of an inherited registered property.
    #[error(
        "Found multiple candidates of overridden but not annotated properties named {property} in {class}! This should never happen! To work around this, register the overridden property explicitly in the child class and please report it."
    )]
    AmbiguousOverride {
        class: QualifiedName,
        property: String,
    },

    /// Signal type arguments and argument name literals differ in count.
    #[error(
        "Signal type arguments count ({type_arguments}) does not match signal argument name count ({names}) for {signal}! This should never happen! Please report it with a minimal reproduction sample."
    )]
    SignalArgumentCount {
        signal: QualifiedName,
        type_arguments: usize,
        names: usize,
    },

    /// A function without a resolved return type.
    #[error(
        "Return type of {function} cannot be null. Usually this means there was an error in the kotlin compilation. Try a clean build and please report it if this does not help."
    )]
    MissingReturnType { function: QualifiedName },

    /// A superclass name the binding context cannot resolve.
    #[error("Superclass {super_class} of {class} is not part of the declaration graph. This should never happen! Please report it.")]
    UnresolvedSuperclass {
        class: QualifiedName,
        super_class: QualifiedName,
    },
}

// ============================================================================
// Type Mapping Errors
// ============================================================================

/// A type outside the closed set of engine variant types.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TypeMappingError {
    #[error("Type {type_name} cannot be handled by godot")]
    Unmappable { type_name: String },
}

// ============================================================================
// Top-level Error
// ============================================================================

/// Any error that aborts a generation pass.
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error(transparent)]
    Declaration(#[from] DeclarationError),

    #[error(transparent)]
    Internal(#[from] InternalError),

    #[error(transparent)]
    TypeMapping(#[from] TypeMappingError),

    /// Code emission failed.
    #[error("code emission failed: {0}")]
    Emit(#[source] Box<dyn std::error::Error + Send + Sync>),

    #[error("failed to write {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl GenerationError {
    /// Wrap an I/O error with the path it happened on.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        GenerationError::Io {
            path: path.into(),
            source,
        }
    }

    /// Whether the user can fix this by changing their code.
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            GenerationError::Declaration(_) | GenerationError::TypeMapping(_)
        )
    }
}

//! Core model for the Godot Kotlin entry generator.
//!
//! This crate holds the read-only view of the compiler front-end's output
//! that every later stage works on, plus the error hierarchy shared by the
//! whole pipeline.
//!
//! ## Modules
//!
//! - [`qualified_name`]: Dotted Kotlin names (`godot.core.Vector2`)
//! - [`types`]: Resolved types and shape predicates
//! - [`annotations`]: Annotation sets and the registration annotation names
//! - [`expr`]: Resolved initializer expressions
//! - [`entries`]: Class, function, property and constructor declarations
//! - [`graph`]: The declaration graph and its binding context
//! - [`error`]: Error types

pub mod annotations;
pub mod entries;
pub mod error;
pub mod expr;
pub mod graph;
pub mod qualified_name;
pub mod types;

pub use annotations::{Annotation, AnnotationValue, Annotations};
pub use entries::{
    ClassDeclaration, ClassMembers, ConstructorDeclaration, FunctionDeclaration,
    MemberDeclaration, MemberScope, MemberSource, PropertyDeclaration, ValueParameter,
};
pub use error::{
    DeclarationError, GenerationError, InternalError, MAX_CONSTRUCTOR_PARAMETERS,
    TypeMappingError,
};
pub use expr::{CallKind, ConstantValue, Expr, ReferenceKind, ResolvedReference, TemplateEntry};
pub use graph::{BindingContext, DeclarationGraph};
pub use qualified_name::QualifiedName;
pub use types::KotlinType;

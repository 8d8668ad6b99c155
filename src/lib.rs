//! Registration entry generator for Godot Kotlin classes.
//!
//! Reads the resolved declarations of a Kotlin compilation and writes the
//! Kotlin code that registers every `@RegisterClass` class, with its
//! constructors, functions, signals and properties, with the Godot Kotlin
//! runtime.
//!
//! ```no_run
//! use godot_entry::prelude::*;
//!
//! # fn main() -> Result<(), GenerationError> {
//! let graph = DeclarationGraph::new()
//!     .with_dependency(ClassDeclaration::compiled("godot.Node").engine_base_type())
//!     .with_class(ClassDeclaration::new("game.Player").with_super_class("godot.Node").registered());
//!
//! let report = EntryGenerator::new(GeneratorConfig::new("build/generated/entry")).generate(&graph)?;
//! assert_eq!(report.classes, 1);
//! # Ok(())
//! # }
//! ```

pub use godot_entry_codegen as codegen;
pub use godot_entry_compiler as compiler;
pub use godot_entry_core as core;

pub mod prelude {
    pub use godot_entry_compiler::{
        EntryGenerator, GdnsConfig, GenerationReport, GeneratorConfig, VariantType,
    };
    pub use godot_entry_core::{
        Annotation, AnnotationValue, CallKind, ClassDeclaration, ConstantValue,
        ConstructorDeclaration, DeclarationError, DeclarationGraph, Expr, FunctionDeclaration,
        GenerationError, InternalError, KotlinType, PropertyDeclaration, QualifiedName,
        ReferenceKind, ResolvedReference, TypeMappingError,
    };
}

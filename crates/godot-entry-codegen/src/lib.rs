//! Kotlin source emission.
//!
//! A small builder layer in the spirit of KotlinPoet: statements are
//! described as format strings with typed arguments, and the file writer
//! decides imports once it has seen every name the file mentions.
//!
//! ## Architecture
//!
//! ```text
//! FileSpec ── TypeSpec ── FunSpec ── CodeBlock ("%T(%S)", [ClassName, "x"])
//!    │
//!    └─ render(): collect names → ImportSet → text
//! ```
//!
//! ## Modules
//!
//! - [`names`]: Class, member and type names
//! - [`code_block`]: Format-string fragments
//! - [`imports`]: Import resolution
//! - [`fun_spec`], [`type_spec`], [`file_spec`]: Declarations
//! - [`modifiers`]: Declaration modifiers

pub mod code_block;
pub mod error;
pub mod file_spec;
pub mod fun_spec;
pub mod imports;
pub mod modifiers;
pub mod names;
pub mod type_spec;

pub use code_block::{CodeArg, CodeBlock, string_literal};
pub use error::EmitError;
pub use file_spec::{FileSpec, RenderedFile};
pub use fun_spec::FunSpec;
pub use imports::ImportSet;
pub use modifiers::Modifiers;
pub use names::{ClassName, MemberName, TypeName};
pub use type_spec::TypeSpec;

//! Godot Kotlin entry generation.
//!
//! Turns a resolved [`DeclarationGraph`] into the Kotlin registration code
//! the Godot Kotlin runtime loads at startup.
//!
//! ## Architecture
//!
//! - **Per class**: flatten inherited members, classify every member, emit
//!   one `<Simple>Entry.kt` registrar file
//! - **Per pass**: validate registered names, reconcile with the registrars
//!   already on disk, emit the main `Entry.kt`, the service file and
//!   optional `.gdns` resources
//!
//! ## Modules
//!
//! - [`variant`]: Type tag mapping (`kotlin.Int` → `VariantType.LONG`)
//! - [`default_value`]: Initializer reconstruction
//! - [`hints`]: Editor property hints
//! - [`property`], [`signal`], [`function`]: Member registration statements
//! - [`hierarchy`]: Inherited member flattening
//! - [`class`]: Per-class registrar files
//! - [`entry`]: Main entry, stale file cleanup, service file
//! - [`gdns`]: NativeScript resources
//! - [`sanity`]: Constructor arity and duplicate name checks
//! - [`pipeline`]: The pass driver
//!
//! [`DeclarationGraph`]: godot_entry_core::DeclarationGraph

pub mod class;
pub mod config;
pub mod default_value;
pub mod entry;
pub mod function;
pub mod gdns;
pub mod hierarchy;
pub mod hints;
pub mod pipeline;
pub mod property;
pub mod runtime;
pub mod sanity;
pub mod signal;
pub mod variant;

pub use class::{ClassRegistration, generate_class, registrar_name};
pub use config::{GdnsConfig, GeneratorConfig};
pub use default_value::default_value;
pub use entry::{EntryPlan, ExistingEntry, main_entry_file, scan_entry_files};
pub use hierarchy::{ClassWithMembers, flatten};
pub use hints::{PropertyHint, TypeHint, type_hint};
pub use pipeline::{EntryGenerator, GenerationReport};
pub use property::{RegistrationStrategy, register_property};
pub use sanity::RegisteredClassNames;
pub use signal::register_signal;
pub use function::register_function;
pub use variant::VariantType;

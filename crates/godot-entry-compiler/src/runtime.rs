//! Names from the Godot Kotlin runtime that generated code refers to.

use godot_entry_codegen::{ClassName, MemberName};
use godot_entry_core::annotations::RPC_MODE_ARGUMENT;
use godot_entry_core::{AnnotationValue, Annotations};

pub const GENERATED_COMMENT: &str =
    "THIS FILE IS GENERATED! DO NOT EDIT IT MANUALLY! ALL CHANGES TO IT WILL BE OVERWRITTEN ON EACH BUILD";

/// Package every generated file lives under.
pub const GENERATED_ROOT_PACKAGE: &str = "godot";

/// Suffix of per-class entry files (`PlayerEntry.kt`).
pub const ENTRY_FILE_SUFFIX: &str = "Entry";

/// Suffix of per-class registrar classes (`PlayerRegistrar`).
pub const REGISTRAR_SUFFIX: &str = "Registrar";

/// Delegate function reference properties must be declared with.
pub const REFERENCE_DELEGATE: &str = "godot.core.ref";

const RUNTIME_PACKAGE: &str = "godot.runtime";
const PROPERTY_HINT_PACKAGE: &str = "godot.gdnative.godot_property_hint";

pub fn class_registrar() -> ClassName {
    ClassName::new(RUNTIME_PACKAGE, "ClassRegistrar")
}

pub fn class_registry() -> ClassName {
    ClassName::new(RUNTIME_PACKAGE, "ClassRegistry")
}

pub fn runtime_entry() -> ClassName {
    ClassName::new(RUNTIME_PACKAGE, "Entry")
}

pub fn entry_context() -> ClassName {
    runtime_entry().nested("Context")
}

pub fn kt_function_argument() -> ClassName {
    ClassName::new(RUNTIME_PACKAGE, "KtFunctionArgument")
}

/// `KtConstructor0` .. `KtConstructor5`.
pub fn kt_constructor(arity: usize) -> ClassName {
    ClassName::new("godot.core", format!("KtConstructor{arity}"))
}

pub fn get_variant_type() -> MemberName {
    MemberName::top_level("godot.core", "getVariantType")
}

/// Engine bootstrap calls made from `initEngineTypes`.
pub fn engine_bootstrap_calls() -> [MemberName; 3] {
    [
        MemberName::top_level(GENERATED_ROOT_PACKAGE, "registerVariantMapping"),
        MemberName::top_level(GENERATED_ROOT_PACKAGE, "registerEngineTypes"),
        MemberName::top_level(GENERATED_ROOT_PACKAGE, "registerEngineTypeMethods"),
    ]
}

/// `GODOT_PROPERTY_HINT_<name>`.
pub fn property_hint(name: &str) -> ClassName {
    ClassName::new(PROPERTY_HINT_PACKAGE, format!("GODOT_PROPERTY_HINT_{name}"))
}

/// `RPCMode.DISABLED`, used when no `rpcMode` argument is given.
pub fn default_rpc_mode() -> ClassName {
    ClassName::new("godot.MultiplayerAPI.RPCMode", "DISABLED")
}

/// The `rpcMode` argument of a registration annotation as an enum entry.
pub fn rpc_mode(annotations: &Annotations, annotation: &str) -> ClassName {
    annotations
        .value(annotation, RPC_MODE_ARGUMENT)
        .and_then(AnnotationValue::as_enum_entry)
        .map(|(class, entry)| ClassName::new(class.to_string(), entry))
        .unwrap_or_else(default_rpc_mode)
}

//! Property registration.
//!
//! Each registered property gets exactly one registration strategy, chosen
//! from the shape of its resolved type. The strategy decides which registry
//! call is emitted and which data travels with it.
//!
//! ## Precedence (first match wins)
//!
//! 1. `godot.Reference` or a subclass: [`RegistrationStrategy::Reference`]
//! 2. an enum: [`RegistrationStrategy::Enum`]
//! 3. an engine array of enums: [`RegistrationStrategy::EnumList`]
//! 4. a `Set` of enums: [`RegistrationStrategy::EnumFlagSet`]
//! 5. anything else: [`RegistrationStrategy::Plain`]

use godot_entry_codegen::{ClassName, CodeArg, CodeBlock, EmitError};
use godot_entry_core::annotations::REGISTER_PROPERTY;
use godot_entry_core::{
    DeclarationError, Expr, GenerationError, KotlinType, PropertyDeclaration, QualifiedName,
};
use tracing::trace;

use crate::default_value::{check_usage, default_value};
use crate::hints::type_hint;
use crate::runtime::{self, REFERENCE_DELEGATE};
use crate::variant::{VariantType, cast_from_any, is_compatible_list, is_reference};

/// How a property is handed to the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RegistrationStrategy {
    Plain,
    Enum,
    EnumList,
    EnumFlagSet,
    Reference,
}

impl RegistrationStrategy {
    pub fn of(ty: &KotlinType) -> Self {
        if is_reference(ty) {
            RegistrationStrategy::Reference
        } else if ty.is_enum {
            RegistrationStrategy::Enum
        } else if is_compatible_list(ty) && ty.first_argument_is_enum() {
            RegistrationStrategy::EnumList
        } else if ty.is_set_or_nullable_set() && ty.first_argument_is_enum() {
            RegistrationStrategy::EnumFlagSet
        } else {
            RegistrationStrategy::Plain
        }
    }

    /// The registry function the strategy calls.
    pub fn registry_function(self) -> &'static str {
        match self {
            RegistrationStrategy::Plain => "property",
            RegistrationStrategy::Enum => "enumProperty",
            RegistrationStrategy::EnumList => "enumListProperty",
            RegistrationStrategy::EnumFlagSet => "enumFlagProperty",
            RegistrationStrategy::Reference => "referenceProperty",
        }
    }
}

/// `Owner::member`, a callable reference to a member of its declaring class.
pub(crate) fn member_reference(owner: &QualifiedName, name: &str) -> Result<CodeBlock, EmitError> {
    CodeBlock::of(
        "%T::%L",
        vec![ClassName::from_qualified(owner).into(), CodeArg::literal(name)],
    )
}

/// Build the registration statement of one property.
#[cfg_attr(feature = "profiling", profiling::function)]
pub fn register_property(property: &PropertyDeclaration) -> Result<CodeBlock, GenerationError> {
    let strategy = RegistrationStrategy::of(&property.ty);
    trace!(
        target: "pipeline",
        property = %property.qualified_name(),
        strategy = ?strategy,
        "registering property"
    );

    let reference = member_reference(&property.owner, &property.name)?;
    let visible = property.is_visible_in_editor();
    let rpc_mode = runtime::rpc_mode(&property.annotations, REGISTER_PROPERTY);

    let statement = match strategy {
        RegistrationStrategy::Plain => {
            let hint = type_hint(property)?;
            CodeBlock::of(
                "property(%L, ::%M, { any: Any -> %L }, %T, %S, %T, %S, %L, %L, %T)",
                vec![
                    reference.into(),
                    runtime::get_variant_type().into(),
                    cast_from_any(&property.ty)?.into(),
                    VariantType::of(&property.ty)?.into(),
                    CodeArg::string(property.ty.fq_name_string()),
                    hint.hint.class_name().into(),
                    CodeArg::string(hint.hint_string),
                    default_value(property)?.into(),
                    CodeArg::literal(visible),
                    rpc_mode.into(),
                ],
            )?
        }
        RegistrationStrategy::Enum
        | RegistrationStrategy::EnumList
        | RegistrationStrategy::EnumFlagSet => CodeBlock::of(
            &format!("{}(%L, %L, %L, %T)", strategy.registry_function()),
            vec![
                reference.into(),
                default_value(property)?.into(),
                CodeArg::literal(visible),
                rpc_mode.into(),
            ],
        )?,
        RegistrationStrategy::Reference => {
            check_usage(property)?;
            check_reference_delegate(property)?;
            let hint = type_hint(property)?;
            CodeBlock::of(
                "referenceProperty(%L, %T, %S, %T, %S, %L, %T)",
                vec![
                    reference.into(),
                    VariantType::Object.into(),
                    CodeArg::string(property.ty.fq_name_string()),
                    hint.hint.class_name().into(),
                    CodeArg::string(hint.hint_string),
                    CodeArg::literal(visible),
                    rpc_mode.into(),
                ],
            )?
        }
    };

    Ok(statement)
}

/// Reference properties must be declared `by ref(...)`.
fn check_reference_delegate(property: &PropertyDeclaration) -> Result<(), DeclarationError> {
    match &property.delegate {
        Some(Expr::Call { callee, .. }) if callee.is(REFERENCE_DELEGATE) => Ok(()),
        _ => Err(DeclarationError::MissingReferenceDelegate {
            property: property.qualified_name(),
            delegate: QualifiedName::from(REFERENCE_DELEGATE).short_name().to_string(),
            source_text: property.describe_source(),
        }),
    }
}

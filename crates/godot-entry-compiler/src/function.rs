//! Function registration.

use godot_entry_codegen::{CodeArg, CodeBlock};
use godot_entry_core::annotations::REGISTER_FUNCTION;
use godot_entry_core::{FunctionDeclaration, GenerationError, InternalError};
use tracing::trace;

use crate::property::member_reference;
use crate::runtime;
use crate::variant::VariantType;

/// Build the registration statement of one function.
///
/// The statement carries the return tag, one tag per parameter, a
/// `KtFunctionArgument` per parameter, a `KtFunctionArgument` for the return
/// value and the RPC mode:
///
/// ```text
/// function(Player::hit, VariantType.NIL, VariantType.LONG,
///     KtFunctionArgument(VariantType.LONG, "kotlin.Int", "amount"),
///     KtFunctionArgument(VariantType.NIL, "kotlin.Unit"), RPCMode.DISABLED)
/// ```
pub fn register_function(function: &FunctionDeclaration) -> Result<CodeBlock, GenerationError> {
    let Some(return_type) = &function.return_type else {
        return Err(InternalError::MissingReturnType {
            function: function.qualified_name(),
        }
        .into());
    };
    trace!(target: "pipeline", function = %function.qualified_name(), "registering function");

    let return_tag = VariantType::of(return_type)?;
    let parameter_tags = function
        .parameters
        .iter()
        .map(|parameter| VariantType::of(&parameter.ty))
        .collect::<Result<Vec<_>, _>>()?;

    let mut format = String::from("function(%L, %T");
    let mut args: Vec<CodeArg> = vec![
        member_reference(&function.owner, &function.name)?.into(),
        return_tag.into(),
    ];

    for tag in &parameter_tags {
        format.push_str(", %T");
        args.push((*tag).into());
    }
    for (parameter, tag) in function.parameters.iter().zip(&parameter_tags) {
        format.push_str(", %T(%T, %S, %S)");
        args.push(runtime::kt_function_argument().into());
        args.push((*tag).into());
        args.push(CodeArg::string(parameter.ty.fq_name_string()));
        args.push(CodeArg::string(&parameter.name));
    }

    format.push_str(", %T(%T, %S), %T)");
    args.push(runtime::kt_function_argument().into());
    args.push(return_tag.into());
    args.push(CodeArg::string(return_type.fq_name_string()));
    args.push(runtime::rpc_mode(&function.annotations, REGISTER_FUNCTION).into());

    Ok(CodeBlock::of(&format, args)?)
}

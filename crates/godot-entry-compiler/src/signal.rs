//! Signal registration.
//!
//! Signals are properties declared `by signal("arg0", ...)` with a
//! `SignalN<A0, ...>` type. The type arguments give the argument types and
//! the delegate call's string literals give the argument names.

use godot_entry_codegen::{CodeArg, CodeBlock};
use godot_entry_core::{
    DeclarationError, Expr, GenerationError, InternalError, PropertyDeclaration, TemplateEntry,
};
use tracing::trace;

use crate::property::member_reference;
use crate::runtime;
use crate::variant::VariantType;

const SIGNAL_NAME_PREFIX: &str = "signal";
const SIGNAL_TYPE_PREFIX: &str = "Signal";

/// Validate the name and type of a signal property.
pub fn check_signal(signal: &PropertyDeclaration) -> Result<(), DeclarationError> {
    if !signal.name.starts_with(SIGNAL_NAME_PREFIX) {
        return Err(DeclarationError::InvalidSignalName {
            signal: signal.qualified_name(),
        });
    }

    let type_name = signal.ty.display_name();
    let arity = type_name
        .strip_prefix(SIGNAL_TYPE_PREFIX)
        .and_then(|rest| rest.split('<').next())
        .and_then(|count| count.parse::<u32>().ok());
    if arity.is_none() {
        return Err(DeclarationError::NotASignal {
            property: signal.qualified_name(),
            type_name,
        });
    }
    Ok(())
}

/// Build the registration statement of one signal.
///
/// ```text
/// signal(Player::signalHit, KtFunctionArgument(VariantType.LONG, "Int", "damage"))
/// ```
pub fn register_signal(signal: &PropertyDeclaration) -> Result<CodeBlock, GenerationError> {
    check_signal(signal)?;

    let names: Vec<CodeArg> = signal
        .assignment()
        .map(|expr| expr.call_arguments().iter().map(argument_name).collect())
        .unwrap_or_default();
    let arguments = &signal.ty.arguments;

    if arguments.len() != names.len() {
        return Err(InternalError::SignalArgumentCount {
            signal: signal.qualified_name(),
            type_arguments: arguments.len(),
            names: names.len(),
        }
        .into());
    }

    trace!(
        target: "pipeline",
        signal = %signal.qualified_name(),
        arguments = arguments.len(),
        "registering signal"
    );

    let mut format = String::from("signal(%L");
    let mut args: Vec<CodeArg> = vec![member_reference(&signal.owner, &signal.name)?.into()];
    for (ty, name) in arguments.iter().zip(names) {
        let name_placeholder = match name {
            CodeArg::Str(_) => "%S",
            _ => "%L",
        };
        format.push_str(&format!(", %T(%T, %S, {name_placeholder})"));
        args.push(runtime::kt_function_argument().into());
        args.push(VariantType::of(ty)?.into());
        args.push(CodeArg::string(ty.simple_name()));
        args.push(name);
    }
    format.push(')');

    Ok(CodeBlock::of(&format, args)?)
}

/// A plain string literal is re-emitted escaped; any other argument keeps
/// its source text.
fn argument_name(expr: &Expr) -> CodeArg {
    match expr {
        Expr::StringTemplate { entries } => {
            let mut text = String::new();
            for entry in entries {
                match entry {
                    TemplateEntry::Literal(part) => text.push_str(part),
                    TemplateEntry::Interpolation(_) => return CodeArg::literal(expr),
                }
            }
            CodeArg::string(text)
        }
        other => CodeArg::literal(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use godot_entry_core::types::{INT, STRING};
    use godot_entry_core::{CallKind, KotlinType};

    fn signal_type(arity: usize, arguments: &[&str]) -> KotlinType {
        arguments.iter().fold(
            KotlinType::simple(format!("godot.signals.Signal{arity}")),
            |ty, arg| ty.with_argument(KotlinType::simple(*arg)),
        )
    }

    fn signal_decl(name: &str, ty: KotlinType, names: &[&str]) -> PropertyDeclaration {
        let delegate = Expr::call(
            "godot.signals.signal",
            CallKind::Function,
            names.iter().map(|n| Expr::string(*n)).collect(),
        );
        PropertyDeclaration::new("game.Player", name, ty)
            .val()
            .registered_signal()
            .with_delegate(delegate)
    }

    #[test]
    fn registers_arguments_in_order() {
        let signal = signal_decl(
            "signalHit",
            signal_type(2, &[STRING, INT]),
            &["source", "damage"],
        );
        assert_eq!(
            register_signal(&signal).unwrap().to_string(),
            "signal(game.Player::signalHit, \
             godot.runtime.KtFunctionArgument(godot.core.VariantType.STRING, \"String\", \"source\"), \
             godot.runtime.KtFunctionArgument(godot.core.VariantType.LONG, \"Int\", \"damage\"))"
        );
    }

    #[test]
    fn argument_names_are_escaped() {
        let signal = signal_decl(
            "signalPaid",
            signal_type(2, &[INT, STRING]),
            &["cost$", "say \"hi\""],
        );
        assert_eq!(
            register_signal(&signal).unwrap().to_string(),
            "signal(game.Player::signalPaid, \
             godot.runtime.KtFunctionArgument(godot.core.VariantType.LONG, \"Int\", \"cost\\$\"), \
             godot.runtime.KtFunctionArgument(godot.core.VariantType.STRING, \"String\", \"say \\\"hi\\\"\"))"
        );
    }

    #[test]
    fn signal_without_arguments() {
        let signal = signal_decl("signalReady", signal_type(0, &[]), &[]);
        assert_eq!(
            register_signal(&signal).unwrap().to_string(),
            "signal(game.Player::signalReady)"
        );
    }

    #[test]
    fn names_must_be_prefixed() {
        let signal = signal_decl("onHit", signal_type(0, &[]), &[]);
        let err = register_signal(&signal).unwrap_err();
        assert_eq!(
            err.to_string(),
            "All signals must be prefixed with \"signal\"! Ex: signalButtonPressed. The signal game.Player.onHit does not fulfill this criteria."
        );
    }

    #[test]
    fn type_must_be_a_signal() {
        let signal = signal_decl("signalHit", KotlinType::simple(INT), &[]);
        assert!(matches!(
            check_signal(&signal),
            Err(DeclarationError::NotASignal { ref type_name, .. }) if type_name == "Int"
        ));

        let signal = signal_decl("signalHit", KotlinType::simple("game.SignalBus"), &[]);
        assert!(matches!(check_signal(&signal), Err(DeclarationError::NotASignal { .. })));
    }

    #[test]
    fn argument_count_mismatch_is_internal() {
        let signal = signal_decl("signalHit", signal_type(1, &[INT]), &[]);
        assert!(matches!(
            register_signal(&signal),
            Err(GenerationError::Internal(InternalError::SignalArgumentCount {
                type_arguments: 1,
                names: 0,
                ..
            }))
        ));
    }
}

//! Default value reconstruction.
//!
//! The editor shows a registered property's initial value, so the generator
//! re-emits the initializer as a Kotlin expression. Only a closed grammar is
//! understood; anything else stops the pass with the property's source text.
//!
//! ```text
//! 100              constant
//! -1.5             prefix of a supported expression
//! "text"           string template without interpolation
//! Color.red        dot-qualified constant or class member
//! Vector2(1, 2)    constructor or function call, arguments recursed
//! A or B           binary expression, both sides recursed
//! MAX_HEALTH       name resolving to a constant
//! { E.values()[it] }  int-to-enum lambda inside a call
//! ```

use godot_entry_codegen::{ClassName, CodeArg, CodeBlock, MemberName};
use godot_entry_core::{
    CallKind, DeclarationError, Expr, GenerationError, PropertyDeclaration, ReferenceKind,
    ResolvedReference, TemplateEntry,
};

/// Validate how a property uses the registration annotations.
///
/// Hint annotations require editor visibility, and only mutable properties
/// can be registered.
pub fn check_usage(property: &PropertyDeclaration) -> Result<(), DeclarationError> {
    if !property.is_visible_in_editor()
        && let Some(hint) = property.annotations.property_hint()
    {
        return Err(DeclarationError::HintWithoutEditorVisibility {
            property: property.qualified_name(),
            hint: hint.fq_name.clone(),
        });
    }
    if !property.is_var {
        return Err(DeclarationError::ImmutableProperty {
            property: property.qualified_name(),
        });
    }
    Ok(())
}

/// The default value expression of a registered property.
///
/// `lateinit` properties and properties hidden from the editor get `null`.
#[cfg_attr(feature = "profiling", profiling::function)]
pub fn default_value(property: &PropertyDeclaration) -> Result<CodeBlock, GenerationError> {
    check_usage(property)?;

    if property.is_lateinit || !property.is_visible_in_editor() {
        return Ok(CodeBlock::literal("null"));
    }

    let extractor = Extractor { property };
    match property.assignment() {
        Some(expr) => extractor.extract(expr, false),
        None => Err(extractor.unsupported()),
    }
}

struct Extractor<'p> {
    property: &'p PropertyDeclaration,
}

impl Extractor<'_> {
    fn unsupported(&self) -> GenerationError {
        DeclarationError::UnsupportedDefaultValue {
            property: self.property.qualified_name(),
            source_text: self.property.describe_source(),
        }
        .into()
    }

    /// `in_call` is set for call arguments and trailing lambdas, the only
    /// places an int-to-enum lambda may appear.
    fn extract(&self, expr: &Expr, in_call: bool) -> Result<CodeBlock, GenerationError> {
        match expr {
            Expr::Constant { value } => Ok(CodeBlock::of("%L", vec![CodeArg::literal(value)])?),

            Expr::Prefix { operator, operand } => {
                let inner = self.extract(operand, in_call)?;
                Ok(CodeBlock::of("%L%L", vec![CodeArg::literal(operator), inner.into()])?)
            }

            Expr::StringTemplate { entries } => {
                let mut text = String::new();
                for entry in entries {
                    match entry {
                        TemplateEntry::Literal(part) => text.push_str(part),
                        TemplateEntry::Interpolation(_) => return Err(self.unsupported()),
                    }
                }
                Ok(CodeBlock::of("%S", vec![CodeArg::string(text)])?)
            }

            Expr::DotQualified {
                receiver,
                selector,
                resolved,
            } => {
                if let Some(reference) = resolved
                    && reference.is_constant()
                {
                    return self.reference(reference);
                }
                if let Expr::NameReference {
                    resolved: Some(class),
                    ..
                } = receiver.as_ref()
                    && class.kind == ReferenceKind::Class
                    && let Expr::NameReference { name, .. } = selector.as_ref()
                {
                    let owner = ClassName::new(class.container.to_string(), class.name.clone());
                    return Ok(CodeBlock::of("%T.%L", vec![owner.into(), CodeArg::literal(name)])?);
                }
                Err(self.unsupported())
            }

            Expr::Call {
                callee,
                call_kind,
                type_arguments,
                arguments,
                trailing_lambda,
            } => {
                let mut block = match call_kind {
                    CallKind::Constructor => {
                        CodeBlock::of("%T", vec![ClassName::from_qualified(callee).into()])?
                    }
                    CallKind::Function => CodeBlock::of(
                        "%M",
                        vec![
                            MemberName::top_level(callee.package_string(), callee.short_name())
                                .into(),
                        ],
                    )?,
                };

                if !type_arguments.is_empty() {
                    let types = type_arguments
                        .iter()
                        .map(|ty| CodeBlock::of("%T", vec![ClassName::from_qualified(ty).into()]))
                        .collect::<Result<Vec<_>, _>>()?;
                    block.add("<%L>", vec![CodeBlock::join(types, ", ").into()])?;
                }

                let arguments = arguments
                    .iter()
                    .map(|argument| self.extract(argument, true))
                    .collect::<Result<Vec<_>, _>>()?;
                block.add("(%L)", vec![CodeBlock::join(arguments, ", ").into()])?;

                if let Some(lambda) = trailing_lambda {
                    let lambda = self.extract(lambda, true)?;
                    block.add(" %L", vec![lambda.into()])?;
                }
                Ok(block)
            }

            Expr::Binary {
                left,
                operator,
                right,
            } => {
                let left = self.extract(left, in_call)?;
                let operator = self.extract(operator, in_call)?;
                let right = self.extract(right, in_call)?;
                Ok(CodeBlock::of(
                    "%L %L %L",
                    vec![left.into(), operator.into(), right.into()],
                )?)
            }

            Expr::NameReference {
                resolved: Some(reference),
                ..
            } => self.reference(reference),

            Expr::OperationReference { token } => Ok(CodeBlock::literal(token.clone())),

            Expr::Lambda {
                mapped_enum: Some(enum_class),
                ..
            } if in_call => Ok(CodeBlock::of(
                "{ %T.values()[it] }",
                vec![ClassName::from_qualified(enum_class).into()],
            )?),

            _ => Err(self.unsupported()),
        }
    }

    fn reference(&self, reference: &ResolvedReference) -> Result<CodeBlock, GenerationError> {
        let block = match reference.kind {
            ReferenceKind::TopLevelConstant => CodeBlock::of(
                "%M",
                vec![
                    MemberName::top_level(reference.container.to_string(), reference.name.clone())
                        .into(),
                ],
            )?,
            ReferenceKind::ObjectConstant | ReferenceKind::EnumEntry => CodeBlock::of(
                "%T.%L",
                vec![
                    ClassName::from_qualified(&reference.container).into(),
                    CodeArg::literal(&reference.name),
                ],
            )?,
            ReferenceKind::Class => CodeBlock::of(
                "%T",
                vec![
                    ClassName::new(reference.container.to_string(), reference.name.clone()).into(),
                ],
            )?,
            ReferenceKind::Other => return Err(self.unsupported()),
        };
        Ok(block)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use godot_entry_core::annotations::{
        MULTILINE_TEXT, REGISTER_PROPERTY, VISIBLE_IN_EDITOR_ARGUMENT,
    };
    use godot_entry_core::types::{DOUBLE, INT, STRING};
    use godot_entry_core::{Annotation, AnnotationValue, ConstantValue, KotlinType};

    fn property(ty: &str, initializer: Expr) -> PropertyDeclaration {
        PropertyDeclaration::new("game.Player", "value", KotlinType::simple(ty))
            .registered()
            .with_initializer(initializer)
    }

    fn hidden(ty: &str) -> PropertyDeclaration {
        PropertyDeclaration::new("game.Player", "value", KotlinType::simple(ty)).with_annotation(
            Annotation::new(REGISTER_PROPERTY)
                .with_argument(VISIBLE_IN_EDITOR_ARGUMENT, AnnotationValue::Bool(false)),
        )
    }

    fn text(property: &PropertyDeclaration) -> String {
        default_value(property).unwrap().to_string()
    }

    fn double(value: f64) -> Expr {
        Expr::constant(ConstantValue::Double(value))
    }

    #[test]
    fn constants_and_prefixes() {
        assert_eq!(text(&property(INT, Expr::int(100))), "100");
        let negative = Expr::Prefix {
            operator: "-".into(),
            operand: Box::new(double(1.5)),
        };
        assert_eq!(text(&property(DOUBLE, negative)), "-1.5");
    }

    #[test]
    fn plain_strings_are_quoted() {
        assert_eq!(text(&property(STRING, Expr::string("Hero $1"))), "\"Hero \\$1\"");
    }

    #[test]
    fn interpolated_strings_are_rejected() {
        let template = Expr::StringTemplate {
            entries: vec![
                TemplateEntry::Literal("Hero ".into()),
                TemplateEntry::Interpolation("${name}".into()),
            ],
        };
        let err = default_value(&property(STRING, template)).unwrap_err();
        assert_eq!(
            err.to_string(),
            "No default value could be extracted for the property game.Player.value with the expression:\nvar value: String = \"Hero ${name}\"\nOnly constants, constructor and function calls, enum entries, flag combinations and const references are supported."
        );
    }

    #[test]
    fn constructor_calls_recurse_into_arguments() {
        let call = Expr::call(
            "godot.core.Vector2",
            CallKind::Constructor,
            vec![
                double(1.0),
                Expr::Prefix {
                    operator: "-".into(),
                    operand: Box::new(double(2.0)),
                },
            ],
        );
        assert_eq!(
            text(&property("godot.core.Vector2", call)),
            "godot.core.Vector2(1.0, -2.0)"
        );
    }

    #[test]
    fn function_calls_with_type_arguments() {
        let entry = Expr::DotQualified {
            receiver: Box::new(Expr::name("Element", None)),
            selector: Box::new(Expr::name("FIRE", None)),
            resolved: Some(ResolvedReference::new(
                "game.Element",
                "FIRE",
                ReferenceKind::EnumEntry,
            )),
        };
        let call = Expr::Call {
            callee: "kotlin.collections.mutableSetOf".into(),
            call_kind: CallKind::Function,
            type_arguments: vec!["game.Element".into()],
            arguments: vec![entry],
            trailing_lambda: None,
        };
        assert_eq!(
            text(&property("kotlin.collections.MutableSet", call)),
            "kotlin.collections.mutableSetOf<game.Element>(game.Element.FIRE)"
        );
    }

    #[test]
    fn flag_combinations() {
        let flag = |name: &str| {
            Expr::name(
                name,
                Some(ResolvedReference::new("game", name, ReferenceKind::TopLevelConstant)),
            )
        };
        let expr = Expr::Binary {
            left: Box::new(flag("FLAG_A")),
            operator: Box::new(Expr::OperationReference { token: "or".into() }),
            right: Box::new(flag("FLAG_B")),
        };
        assert_eq!(text(&property(INT, expr)), "game.FLAG_A or game.FLAG_B");
    }

    #[test]
    fn class_member_access() {
        let expr = Expr::DotQualified {
            receiver: Box::new(Expr::name(
                "Color",
                Some(ResolvedReference::new("godot.core", "Color", ReferenceKind::Class)),
            )),
            selector: Box::new(Expr::name("red", None)),
            resolved: None,
        };
        assert_eq!(text(&property("godot.core.Color", expr)), "godot.core.Color.red");
    }

    #[test]
    fn enum_lambda_only_inside_calls() {
        let lambda = Expr::Lambda {
            mapped_enum: Some("game.Element".into()),
            text: "{ Element.values()[it] }".into(),
        };
        let call = Expr::Call {
            callee: "godot.core.EnumArray".into(),
            call_kind: CallKind::Constructor,
            type_arguments: Vec::new(),
            arguments: Vec::new(),
            trailing_lambda: Some(Box::new(lambda.clone())),
        };
        assert_eq!(
            text(&property("godot.core.EnumArray", call)),
            "godot.core.EnumArray() { game.Element.values()[it] }"
        );
        assert!(default_value(&property("godot.core.EnumArray", lambda)).is_err());
    }

    #[test]
    fn unresolved_names_are_rejected() {
        let expr = Expr::name(
            "local",
            Some(ResolvedReference::new("game.Player", "local", ReferenceKind::Other)),
        );
        assert!(matches!(
            default_value(&property(INT, expr)),
            Err(GenerationError::Declaration(DeclarationError::UnsupportedDefaultValue { .. }))
        ));
    }

    #[test]
    fn lateinit_and_hidden_are_null() {
        let late =
            PropertyDeclaration::new("game.Player", "target", KotlinType::simple("godot.Node"))
                .lateinit()
                .registered();
        assert_eq!(text(&late), "null");
        assert_eq!(text(&hidden(INT)), "null");
    }

    #[test]
    fn immutable_properties_are_rejected() {
        let p = property(INT, Expr::int(1)).val();
        let err = default_value(&p).unwrap_err();
        assert!(matches!(
            err,
            GenerationError::Declaration(DeclarationError::ImmutableProperty { .. })
        ));
    }

    #[test]
    fn hints_require_editor_visibility() {
        let p = hidden(STRING).with_annotation(Annotation::new(MULTILINE_TEXT));
        let err = check_usage(&p).unwrap_err();
        assert_eq!(
            err,
            DeclarationError::HintWithoutEditorVisibility {
                property: "game.Player.value".into(),
                hint: MULTILINE_TEXT.into(),
            }
        );
    }
}

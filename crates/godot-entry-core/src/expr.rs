//! Resolved initializer expressions.
//!
//! Property initializers and delegates are delivered as a small closed
//! expression tree. Every reference node carries what the front-end resolved
//! it to, so the generator can re-emit it with proper imports instead of
//! copying raw source text.
//!
//! ## Grammar
//!
//! ```text
//! Expr ::= Constant
//!        | Prefix          "-" Expr | "!" Expr
//!        | StringTemplate  "..." (literal and interpolated entries)
//!        | DotQualified    Expr "." Expr
//!        | Call            callee<TypeArgs>(Expr, ...)
//!        | Binary          Expr OperationReference Expr
//!        | NameReference   identifier
//!        | OperationReference  or, and, +, ...
//!        | Lambda          { ... }
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::QualifiedName;

/// A literal constant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum ConstantValue {
    Int(i64),
    Long(i64),
    Float(f64),
    Double(f64),
    Bool(bool),
    Char(char),
    Null,
}

impl fmt::Display for ConstantValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConstantValue::Int(v) => write!(f, "{v}"),
            ConstantValue::Long(v) => write!(f, "{v}L"),
            ConstantValue::Float(v) => write!(f, "{}f", float_text(*v)),
            ConstantValue::Double(v) => write!(f, "{}", float_text(*v)),
            ConstantValue::Bool(v) => write!(f, "{v}"),
            ConstantValue::Char(c) => match c {
                '\'' => write!(f, "'\\''"),
                '\\' => write!(f, "'\\\\'"),
                '\n' => write!(f, "'\\n'"),
                '\t' => write!(f, "'\\t'"),
                c => write!(f, "'{c}'"),
            },
            ConstantValue::Null => write!(f, "null"),
        }
    }
}

fn float_text(value: f64) -> String {
    if value.fract() == 0.0 && value.is_finite() {
        format!("{value:.1}")
    } else {
        value.to_string()
    }
}

/// One piece of a string template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum TemplateEntry {
    Literal(String),
    /// `${...}` or `$name` inside the string. Kept as source text.
    Interpolation(String),
}

/// What a reference resolved to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReferenceKind {
    /// `const val` at package level.
    TopLevelConstant,
    /// Constant inside an object or companion object.
    ObjectConstant,
    /// An entry of an enum class.
    EnumEntry,
    /// A class or object used as a value (e.g. `Color` in `Color.red`).
    Class,
    /// Anything else: a local, a non-const property, a member of an instance.
    Other,
}

/// Resolution of a name or dotted reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedReference {
    /// Package for top-level declarations, owning class otherwise.
    pub container: QualifiedName,
    pub name: String,
    pub kind: ReferenceKind,
}

impl ResolvedReference {
    pub fn new(
        container: impl Into<QualifiedName>,
        name: impl Into<String>,
        kind: ReferenceKind,
    ) -> Self {
        Self {
            container: container.into(),
            name: name.into(),
            kind,
        }
    }

    /// Whether the reference is a compile-time constant usable as a default.
    pub fn is_constant(&self) -> bool {
        matches!(
            self.kind,
            ReferenceKind::TopLevelConstant
                | ReferenceKind::ObjectConstant
                | ReferenceKind::EnumEntry
        )
    }
}

/// How a call's callee resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CallKind {
    /// `Vector2(1.0, 2.0)`: callee is the class.
    Constructor,
    /// `setOf(...)`: callee is a top-level function, container is its package.
    Function,
}

/// An initializer expression node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Expr {
    Constant {
        value: ConstantValue,
    },
    Prefix {
        operator: String,
        operand: Box<Expr>,
    },
    StringTemplate {
        entries: Vec<TemplateEntry>,
    },
    DotQualified {
        receiver: Box<Expr>,
        selector: Box<Expr>,
        #[serde(default)]
        resolved: Option<ResolvedReference>,
    },
    Call {
        callee: QualifiedName,
        call_kind: CallKind,
        #[serde(default)]
        type_arguments: Vec<QualifiedName>,
        #[serde(default)]
        arguments: Vec<Expr>,
        /// Trailing lambda, passed after the parentheses.
        #[serde(default)]
        trailing_lambda: Option<Box<Expr>>,
    },
    Binary {
        left: Box<Expr>,
        operator: Box<Expr>,
        right: Box<Expr>,
    },
    NameReference {
        name: String,
        #[serde(default)]
        resolved: Option<ResolvedReference>,
    },
    OperationReference {
        token: String,
    },
    /// A lambda. Only the int-to-enum mapping form (`{ Enum.values()[it] }`)
    /// is understood; `mapped_enum` names that enum when the front-end
    /// recognised it.
    Lambda {
        #[serde(default)]
        mapped_enum: Option<QualifiedName>,
        text: String,
    },
}

impl Expr {
    pub fn constant(value: ConstantValue) -> Self {
        Expr::Constant { value }
    }

    pub fn int(value: i64) -> Self {
        Expr::constant(ConstantValue::Int(value))
    }

    pub fn string(value: impl Into<String>) -> Self {
        Expr::StringTemplate {
            entries: vec![TemplateEntry::Literal(value.into())],
        }
    }

    pub fn call(
        callee: impl Into<QualifiedName>,
        call_kind: CallKind,
        arguments: Vec<Expr>,
    ) -> Self {
        Expr::Call {
            callee: callee.into(),
            call_kind,
            type_arguments: Vec::new(),
            arguments,
            trailing_lambda: None,
        }
    }

    pub fn name(name: impl Into<String>, resolved: Option<ResolvedReference>) -> Self {
        Expr::NameReference {
            name: name.into(),
            resolved,
        }
    }

    /// Arguments of a call expression, empty for anything else.
    pub fn call_arguments(&self) -> &[Expr] {
        match self {
            Expr::Call { arguments, .. } => arguments,
            _ => &[],
        }
    }
}

/// Reconstructs Kotlin-like source text. Used in diagnostics and for signal
/// argument names, which are emitted verbatim.
impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Constant { value } => write!(f, "{value}"),
            Expr::Prefix { operator, operand } => write!(f, "{operator}{operand}"),
            Expr::StringTemplate { entries } => {
                write!(f, "\"")?;
                for entry in entries {
                    match entry {
                        TemplateEntry::Literal(text) => {
                            write!(f, "{}", text.replace('\\', "\\\\").replace('"', "\\\""))?
                        }
                        TemplateEntry::Interpolation(text) => write!(f, "{text}")?,
                    }
                }
                write!(f, "\"")
            }
            Expr::DotQualified {
                receiver, selector, ..
            } => write!(f, "{receiver}.{selector}"),
            Expr::Call {
                callee,
                type_arguments,
                arguments,
                trailing_lambda,
                ..
            } => {
                write!(f, "{}", callee.short_name())?;
                if !type_arguments.is_empty() {
                    let names: Vec<&str> = type_arguments.iter().map(|t| t.short_name()).collect();
                    write!(f, "<{}>", names.join(", "))?;
                }
                let args: Vec<String> = arguments.iter().map(ToString::to_string).collect();
                write!(f, "({})", args.join(", "))?;
                if let Some(lambda) = trailing_lambda {
                    write!(f, " {lambda}")?;
                }
                Ok(())
            }
            Expr::Binary {
                left,
                operator,
                right,
            } => write!(f, "{left} {operator} {right}"),
            Expr::NameReference { name, .. } => write!(f, "{name}"),
            Expr::OperationReference { token } => write!(f, "{token}"),
            Expr::Lambda { text, .. } => write!(f, "{text}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constant_text() {
        assert_eq!(ConstantValue::Int(100).to_string(), "100");
        assert_eq!(ConstantValue::Long(7).to_string(), "7L");
        assert_eq!(ConstantValue::Float(1.0).to_string(), "1.0f");
        assert_eq!(ConstantValue::Double(2.5).to_string(), "2.5");
        assert_eq!(ConstantValue::Char('\'').to_string(), "'\\''");
        assert_eq!(ConstantValue::Null.to_string(), "null");
    }

    #[test]
    fn call_source_text() {
        let expr = Expr::call(
            "godot.core.Vector2",
            CallKind::Constructor,
            vec![
                Expr::constant(ConstantValue::Double(1.0)),
                Expr::Prefix {
                    operator: "-".into(),
                    operand: Box::new(Expr::constant(ConstantValue::Double(2.0))),
                },
            ],
        );
        assert_eq!(expr.to_string(), "Vector2(1.0, -2.0)");
    }

    #[test]
    fn string_template_escapes_quotes() {
        assert_eq!(Expr::string("say \"hi\"").to_string(), "\"say \\\"hi\\\"\"");
    }

    #[test]
    fn call_arguments_of_non_call_is_empty() {
        assert!(Expr::int(1).call_arguments().is_empty());
    }

    #[test]
    fn deserializes_nested_tree() {
        let json = r#"{
            "kind": "binary",
            "left": {"kind": "constant", "value": {"kind": "int", "value": 1}},
            "operator": {"kind": "operation_reference", "token": "or"},
            "right": {"kind": "name_reference", "name": "FLAG",
                      "resolved": {"container": "game", "name": "FLAG", "kind": "top_level_constant"}}
        }"#;
        let expr: Expr = serde_json::from_str(json).unwrap();
        assert_eq!(expr.to_string(), "1 or FLAG");
    }
}

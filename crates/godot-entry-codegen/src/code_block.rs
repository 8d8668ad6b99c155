//! Format-string code fragments.
//!
//! A [`CodeBlock`] is built from a format string and a list of arguments,
//! KotlinPoet style:
//!
//! | placeholder | argument | emits |
//! |---|---|---|
//! | `%T` | [`CodeArg::Type`] | type name, imported when possible |
//! | `%M` | [`CodeArg::Member`] | member name, imported when possible |
//! | `%S` | [`CodeArg::Str`] | escaped Kotlin string literal |
//! | `%L` | [`CodeArg::Literal`] / [`CodeArg::Code`] | the text or nested block as-is |
//! | `%%` | none | a literal `%` |
//!
//! Arguments are checked when the block is built, so a block that exists is
//! always renderable.

use std::fmt;

use crate::error::EmitError;
use crate::imports::ImportSet;
use crate::names::{ClassName, MemberName, TypeName};

/// One template argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CodeArg {
    Type(TypeName),
    Member(MemberName),
    Str(String),
    Literal(String),
    Code(CodeBlock),
}

impl CodeArg {
    /// A `%S` argument.
    pub fn string(value: impl Into<String>) -> Self {
        CodeArg::Str(value.into())
    }

    /// A `%L` argument.
    pub fn literal(value: impl ToString) -> Self {
        CodeArg::Literal(value.to_string())
    }

    fn kind(&self) -> &'static str {
        match self {
            CodeArg::Type(_) => "type",
            CodeArg::Member(_) => "member",
            CodeArg::Str(_) => "string",
            CodeArg::Literal(_) => "literal",
            CodeArg::Code(_) => "code",
        }
    }
}

impl From<ClassName> for CodeArg {
    fn from(name: ClassName) -> Self {
        CodeArg::Type(TypeName::Class(name))
    }
}

impl From<TypeName> for CodeArg {
    fn from(name: TypeName) -> Self {
        CodeArg::Type(name)
    }
}

impl From<MemberName> for CodeArg {
    fn from(name: MemberName) -> Self {
        CodeArg::Member(name)
    }
}

impl From<CodeBlock> for CodeArg {
    fn from(block: CodeBlock) -> Self {
        CodeArg::Code(block)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Part {
    Text(String),
    Type(TypeName),
    Member(MemberName),
    Str(String),
    Code(CodeBlock),
}

/// A fragment of Kotlin code with typed references.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CodeBlock {
    parts: Vec<Part>,
}

impl CodeBlock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a block from a format string and its arguments.
    pub fn of(format: &str, args: Vec<CodeArg>) -> Result<Self, EmitError> {
        let mut block = Self::new();
        block.add(format, args)?;
        Ok(block)
    }

    /// A block holding plain text.
    pub fn literal(text: impl Into<String>) -> Self {
        Self {
            parts: vec![Part::Text(text.into())],
        }
    }

    /// Join blocks with a separator.
    pub fn join(blocks: impl IntoIterator<Item = CodeBlock>, separator: &str) -> Self {
        let mut joined = Self::new();
        for (index, block) in blocks.into_iter().enumerate() {
            if index > 0 {
                joined.push_text(separator);
            }
            joined.parts.extend(block.parts);
        }
        joined
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    /// Append a formatted fragment.
    pub fn add(&mut self, format: &str, args: Vec<CodeArg>) -> Result<&mut Self, EmitError> {
        let mut args = args.into_iter().enumerate();
        let mut text = String::new();
        let mut chars = format.char_indices();

        while let Some((position, c)) = chars.next() {
            if c != '%' {
                text.push(c);
                continue;
            }
            let Some((_, placeholder)) = chars.next() else {
                return Err(EmitError::InvalidPlaceholder {
                    format: format.to_string(),
                    position,
                });
            };
            if placeholder == '%' {
                text.push('%');
                continue;
            }
            if !matches!(placeholder, 'T' | 'M' | 'S' | 'L') {
                return Err(EmitError::InvalidPlaceholder {
                    format: format.to_string(),
                    position,
                });
            }

            let Some((index, arg)) = args.next() else {
                return Err(EmitError::MissingArgument {
                    format: format.to_string(),
                    index: self.count_placeholders(format, position),
                });
            };

            if !text.is_empty() {
                self.push_text(&std::mem::take(&mut text));
            }

            let part = match (placeholder, arg) {
                ('T', CodeArg::Type(name)) => Part::Type(name),
                ('M', CodeArg::Member(name)) => Part::Member(name),
                ('S', CodeArg::Str(value)) => Part::Str(value),
                ('L', CodeArg::Literal(value)) => Part::Text(value),
                ('L', CodeArg::Code(block)) => Part::Code(block),
                (placeholder, other) => {
                    return Err(EmitError::WrongArgumentKind {
                        format: format.to_string(),
                        placeholder,
                        index,
                        found: other.kind(),
                    });
                }
            };
            match part {
                Part::Text(value) => self.push_text(&value),
                part => self.parts.push(part),
            }
        }

        if !text.is_empty() {
            self.push_text(&text);
        }

        let unused = args.count();
        if unused > 0 {
            return Err(EmitError::UnusedArguments {
                format: format.to_string(),
                unused,
            });
        }

        Ok(self)
    }

    fn count_placeholders(&self, format: &str, end: usize) -> usize {
        let prefix = &format[..end];
        prefix.matches('%').count() - 2 * prefix.matches("%%").count()
    }

    fn push_text(&mut self, text: &str) {
        if let Some(Part::Text(last)) = self.parts.last_mut() {
            last.push_str(text);
        } else {
            self.parts.push(Part::Text(text.to_string()));
        }
    }

    /// Every class and member referenced, nested blocks included.
    pub(crate) fn collect_references<'a>(
        &'a self,
        classes: &mut Vec<&'a ClassName>,
        members: &mut Vec<&'a MemberName>,
    ) {
        for part in &self.parts {
            match part {
                Part::Type(name) => classes.extend(name.class_names()),
                Part::Member(name) => match name.enclosing() {
                    Some(class) => classes.push(class),
                    None => members.push(name),
                },
                Part::Code(block) => block.collect_references(classes, members),
                Part::Text(_) | Part::Str(_) => {}
            }
        }
    }

    /// Render with the given import decisions.
    pub fn render(&self, imports: &ImportSet) -> String {
        let mut out = String::new();
        for part in &self.parts {
            match part {
                Part::Text(text) => out.push_str(text),
                Part::Type(name) => out.push_str(&imports.type_text(name)),
                Part::Member(name) => out.push_str(&imports.member_text(name)),
                Part::Str(value) => out.push_str(&string_literal(value)),
                Part::Code(block) => out.push_str(&block.render(imports)),
            }
        }
        out
    }
}

/// Renders with fully qualified names.
impl fmt::Display for CodeBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.render(&ImportSet::qualified()))
    }
}

/// Quote and escape a Kotlin string literal.
pub fn string_literal(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            '$' => out.push_str("\\$"),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn variant(tag: &str) -> ClassName {
        ClassName::new("godot.core.VariantType", tag)
    }

    #[test]
    fn substitutes_each_placeholder_kind() {
        let block = CodeBlock::of(
            "%M(%T, %S, %L) // 100%%",
            vec![
                MemberName::top_level("godot", "register").into(),
                variant("LONG").into(),
                CodeArg::string("health"),
                CodeArg::literal(100),
            ],
        )
        .unwrap();
        assert_eq!(
            block.to_string(),
            "godot.register(godot.core.VariantType.LONG, \"health\", 100) // 100%"
        );
    }

    #[test]
    fn nests_blocks() {
        let inner =
            CodeBlock::of("%T(1.0, 2.0)", vec![ClassName::new("godot.core", "Vector2").into()])
                .unwrap();
        let outer = CodeBlock::of("listOf(%L)", vec![inner.into()]).unwrap();
        assert_eq!(outer.to_string(), "listOf(godot.core.Vector2(1.0, 2.0))");
    }

    #[test]
    fn rejects_missing_arguments() {
        let err = CodeBlock::of("%T and %T", vec![variant("NIL").into()]).unwrap_err();
        assert_eq!(
            err,
            EmitError::MissingArgument {
                format: "%T and %T".into(),
                index: 1
            }
        );
    }

    #[test]
    fn rejects_unused_arguments() {
        let err = CodeBlock::of("none", vec![CodeArg::literal("x")]).unwrap_err();
        assert!(matches!(err, EmitError::UnusedArguments { unused: 1, .. }));
    }

    #[test]
    fn rejects_wrong_kind() {
        let err = CodeBlock::of("%T", vec![CodeArg::string("oops")]).unwrap_err();
        assert!(matches!(
            err,
            EmitError::WrongArgumentKind {
                placeholder: 'T',
                found: "string",
                ..
            }
        ));
    }

    #[test]
    fn rejects_unknown_placeholder() {
        assert!(matches!(
            CodeBlock::of("50%", vec![]),
            Err(EmitError::InvalidPlaceholder { position: 2, .. })
        ));
        assert!(matches!(
            CodeBlock::of("%Q", vec![]),
            Err(EmitError::InvalidPlaceholder { position: 0, .. })
        ));
    }

    #[test]
    fn escapes_string_literals() {
        assert_eq!(string_literal("a\"b\\c\n$x"), "\"a\\\"b\\\\c\\n\\$x\"");
    }

    #[test]
    fn join_uses_separator() {
        let joined = CodeBlock::join(
            vec![CodeBlock::literal("a"), CodeBlock::literal("b"), CodeBlock::literal("c")],
            ", ",
        );
        assert_eq!(joined.to_string(), "a, b, c");
    }
}

//! Function declarations.

use crate::code_block::{CodeArg, CodeBlock};
use crate::error::EmitError;
use crate::imports::ImportSet;
use crate::modifiers::Modifiers;
use crate::names::{ClassName, MemberName, TypeName};

#[derive(Debug, Clone, PartialEq, Eq)]
enum BodyLine {
    Statement(CodeBlock),
    BeginFlow(CodeBlock),
    EndFlow,
}

/// A Kotlin function with a statement body.
///
/// # Example
///
/// ```
/// use godot_entry_codegen::{ClassName, CodeArg, FunSpec, Modifiers};
///
/// let mut register = FunSpec::builder("register")
///     .with_modifiers(Modifiers::OVERRIDE)
///     .with_parameter("registry", ClassName::new("godot.runtime", "ClassRegistry"));
/// register.begin_control_flow("with(registry)", vec![]).unwrap();
/// register.add_statement("println(%S)", vec![CodeArg::string("hi")]).unwrap();
/// register.end_control_flow().unwrap();
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunSpec {
    name: String,
    modifiers: Modifiers,
    receiver: Option<TypeName>,
    parameters: Vec<(String, TypeName)>,
    returns: Option<TypeName>,
    body: Vec<BodyLine>,
    open_flows: usize,
}

impl FunSpec {
    pub fn builder(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            modifiers: Modifiers::empty(),
            receiver: None,
            parameters: Vec::new(),
            returns: None,
            body: Vec::new(),
            open_flows: 0,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers |= modifiers;
        self
    }

    /// Extension receiver (`fun Entry.Context.init()`).
    pub fn with_receiver(mut self, receiver: impl Into<TypeName>) -> Self {
        self.receiver = Some(receiver.into());
        self
    }

    pub fn with_parameter(mut self, name: impl Into<String>, ty: impl Into<TypeName>) -> Self {
        self.parameters.push((name.into(), ty.into()));
        self
    }

    pub fn with_returns(mut self, ty: impl Into<TypeName>) -> Self {
        self.returns = Some(ty.into());
        self
    }

    /// Add one statement line.
    pub fn add_statement(
        &mut self,
        format: &str,
        args: Vec<CodeArg>,
    ) -> Result<&mut Self, EmitError> {
        self.body.push(BodyLine::Statement(CodeBlock::of(format, args)?));
        Ok(self)
    }

    /// Add a prebuilt statement.
    pub fn add_code(&mut self, code: CodeBlock) -> &mut Self {
        self.body.push(BodyLine::Statement(code));
        self
    }

    /// Open a `... {` block; statements until the matching
    /// [`end_control_flow`](Self::end_control_flow) are indented.
    pub fn begin_control_flow(
        &mut self,
        format: &str,
        args: Vec<CodeArg>,
    ) -> Result<&mut Self, EmitError> {
        self.body.push(BodyLine::BeginFlow(CodeBlock::of(format, args)?));
        self.open_flows += 1;
        Ok(self)
    }

    pub fn end_control_flow(&mut self) -> Result<&mut Self, EmitError> {
        if self.open_flows == 0 {
            return Err(EmitError::UnbalancedControlFlow {
                function: self.name.clone(),
            });
        }
        self.open_flows -= 1;
        self.body.push(BodyLine::EndFlow);
        Ok(self)
    }

    /// Number of statement lines, control flow lines excluded.
    pub fn statement_count(&self) -> usize {
        self.body
            .iter()
            .filter(|line| matches!(line, BodyLine::Statement(_)))
            .count()
    }

    pub(crate) fn collect_references<'a>(
        &'a self,
        classes: &mut Vec<&'a ClassName>,
        members: &mut Vec<&'a MemberName>,
    ) {
        let signature_types = self
            .receiver
            .iter()
            .chain(self.parameters.iter().map(|(_, ty)| ty))
            .chain(self.returns.iter());
        for ty in signature_types {
            classes.extend(ty.class_names());
        }
        for line in &self.body {
            match line {
                BodyLine::Statement(code) | BodyLine::BeginFlow(code) => {
                    code.collect_references(classes, members)
                }
                BodyLine::EndFlow => {}
            }
        }
    }

    /// Render at the given indent level (two spaces per level).
    pub(crate) fn render(&self, imports: &ImportSet, level: usize) -> Result<String, EmitError> {
        if self.open_flows != 0 {
            return Err(EmitError::UnbalancedControlFlow {
                function: self.name.clone(),
            });
        }

        let indent = |level: usize| "  ".repeat(level);
        let mut out = String::new();

        out.push_str(&indent(level));
        out.push_str(&self.modifiers.keywords());
        out.push_str("fun ");
        if let Some(receiver) = &self.receiver {
            out.push_str(&imports.type_text(receiver));
            out.push('.');
        }
        out.push_str(&self.name);
        let parameters: Vec<String> = self
            .parameters
            .iter()
            .map(|(name, ty)| format!("{name}: {}", imports.type_text(ty)))
            .collect();
        out.push('(');
        out.push_str(&parameters.join(", "));
        out.push(')');
        if let Some(returns) = &self.returns {
            out.push_str(": ");
            out.push_str(&imports.type_text(returns));
        }
        out.push_str(" {\n");

        let mut depth = level + 1;
        for line in &self.body {
            match line {
                BodyLine::Statement(code) => {
                    out.push_str(&indent(depth));
                    out.push_str(&code.render(imports));
                    out.push('\n');
                }
                BodyLine::BeginFlow(code) => {
                    out.push_str(&indent(depth));
                    out.push_str(&code.render(imports));
                    out.push_str(" {\n");
                    depth += 1;
                }
                BodyLine::EndFlow => {
                    depth -= 1;
                    out.push_str(&indent(depth));
                    out.push_str("}\n");
                }
            }
        }

        out.push_str(&indent(level));
        out.push_str("}\n");
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_nested_control_flow() {
        let mut fun = FunSpec::builder("register")
            .with_modifiers(Modifiers::OVERRIDE)
            .with_parameter("registry", ClassName::new("godot.runtime", "ClassRegistry"));
        fun.begin_control_flow("with(registry)", vec![]).unwrap();
        fun.add_statement("%L()", vec![CodeArg::literal("doIt")]).unwrap();
        fun.end_control_flow().unwrap();

        let rendered = fun.render(&ImportSet::qualified(), 1).unwrap();
        assert_eq!(
            rendered,
            "  override fun register(registry: godot.runtime.ClassRegistry) {\n    with(registry) {\n      doIt()\n    }\n  }\n"
        );
        assert_eq!(fun.statement_count(), 1);
    }

    #[test]
    fn receiver_and_return_type() {
        let fun = FunSpec::builder("init")
            .with_receiver(ClassName::new("godot.runtime", "Entry").nested("Context"))
            .with_returns(ClassName::new("kotlin", "Unit"));
        let rendered = fun.render(&ImportSet::qualified(), 0).unwrap();
        assert!(rendered.starts_with("fun godot.runtime.Entry.Context.init(): kotlin.Unit {"));
    }

    #[test]
    fn unbalanced_flow_is_an_error() {
        let mut fun = FunSpec::builder("f");
        assert!(fun.end_control_flow().is_err());
        fun.begin_control_flow("if (x)", vec![]).unwrap();
        assert!(matches!(
            fun.render(&ImportSet::qualified(), 0),
            Err(EmitError::UnbalancedControlFlow { .. })
        ));
    }
}

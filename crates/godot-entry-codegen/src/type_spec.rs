//! Class declarations.

use crate::error::EmitError;
use crate::fun_spec::FunSpec;
use crate::imports::ImportSet;
use crate::modifiers::Modifiers;
use crate::names::{ClassName, MemberName, TypeName};

/// A Kotlin class holding functions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeSpec {
    name: String,
    modifiers: Modifiers,
    superclass: Option<TypeName>,
    superinterfaces: Vec<TypeName>,
    functions: Vec<FunSpec>,
}

impl TypeSpec {
    pub fn class_builder(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            modifiers: Modifiers::empty(),
            superclass: None,
            superinterfaces: Vec::new(),
            functions: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers |= modifiers;
        self
    }

    /// Superclass, invoked with its no-argument constructor (`: Base()`).
    pub fn with_superclass(mut self, superclass: impl Into<TypeName>) -> Self {
        self.superclass = Some(superclass.into());
        self
    }

    pub fn with_superinterface(mut self, interface: impl Into<TypeName>) -> Self {
        self.superinterfaces.push(interface.into());
        self
    }

    pub fn with_function(mut self, function: FunSpec) -> Self {
        self.functions.push(function);
        self
    }

    pub fn functions(&self) -> &[FunSpec] {
        &self.functions
    }

    pub(crate) fn collect_references<'a>(
        &'a self,
        classes: &mut Vec<&'a ClassName>,
        members: &mut Vec<&'a MemberName>,
    ) {
        for ty in self.superclass.iter().chain(&self.superinterfaces) {
            classes.extend(ty.class_names());
        }
        for function in &self.functions {
            function.collect_references(classes, members);
        }
    }

    pub(crate) fn render(&self, imports: &ImportSet) -> Result<String, EmitError> {
        let mut out = String::new();
        out.push_str(&self.modifiers.keywords());
        out.push_str("class ");
        out.push_str(&self.name);

        let mut supertypes = Vec::new();
        if let Some(superclass) = &self.superclass {
            supertypes.push(format!("{}()", imports.type_text(superclass)));
        }
        supertypes.extend(self.superinterfaces.iter().map(|i| imports.type_text(i)));
        if !supertypes.is_empty() {
            out.push_str(" : ");
            out.push_str(&supertypes.join(", "));
        }
        out.push_str(" {\n");

        for (index, function) in self.functions.iter().enumerate() {
            if index > 0 {
                out.push('\n');
            }
            out.push_str(&function.render(imports, 1)?);
        }

        out.push_str("}\n");
        Ok(out)
    }
}

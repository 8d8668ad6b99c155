//! The resolved declaration graph and its lookup context.
//!
//! [`DeclarationGraph`] is the serialized output of the compiler front-end.
//! [`BindingContext`] indexes it by fully qualified name and answers the
//! secondary lookups the generator needs (superclass resolution, engine base
//! class discovery).

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::{ClassDeclaration, QualifiedName};

/// Everything one generation pass reads.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DeclarationGraph {
    /// Classes of the current compilation.
    #[serde(default)]
    pub classes: Vec<ClassDeclaration>,
    /// Classes from compiled dependencies, including engine base types.
    #[serde(default)]
    pub dependencies: Vec<ClassDeclaration>,
    /// Every user class in the source set. Empty means "the registered classes".
    #[serde(default)]
    pub source_classes: Vec<QualifiedName>,
}

impl DeclarationGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: add a class of the current compilation.
    pub fn with_class(mut self, class: ClassDeclaration) -> Self {
        self.classes.push(class);
        self
    }

    /// Builder: add a dependency class.
    pub fn with_dependency(mut self, class: ClassDeclaration) -> Self {
        self.dependencies.push(class);
        self
    }

    /// Builder: add a source-set class name.
    pub fn with_source_class(mut self, name: impl Into<QualifiedName>) -> Self {
        self.source_classes.push(name.into());
        self
    }

    /// Registered classes of the current compilation, sorted by name.
    pub fn registered_classes(&self) -> Vec<&ClassDeclaration> {
        let mut classes: Vec<&ClassDeclaration> =
            self.classes.iter().filter(|c| c.is_registered()).collect();
        classes.sort_by(|a, b| a.fq_name.cmp(&b.fq_name));
        classes
    }

    /// Source-set class names, falling back to the registered classes.
    pub fn source_class_names(&self) -> Vec<QualifiedName> {
        if self.source_classes.is_empty() {
            self.registered_classes()
                .into_iter()
                .map(|c| c.fq_name.clone())
                .collect()
        } else {
            self.source_classes.clone()
        }
    }
}

/// Name-indexed view over a [`DeclarationGraph`].
///
/// Classes of the current compilation shadow dependency classes with the same
/// name.
#[derive(Debug)]
pub struct BindingContext<'g> {
    classes: FxHashMap<QualifiedName, &'g ClassDeclaration>,
}

impl<'g> BindingContext<'g> {
    pub fn new(graph: &'g DeclarationGraph) -> Self {
        let mut classes = FxHashMap::default();
        for class in &graph.dependencies {
            classes.insert(class.fq_name.clone(), class);
        }
        for class in &graph.classes {
            classes.insert(class.fq_name.clone(), class);
        }
        Self { classes }
    }

    pub fn class(&self, name: &QualifiedName) -> Option<&'g ClassDeclaration> {
        self.classes.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    /// The direct superclass, if it is known to the context.
    pub fn super_class_of(&self, class: &ClassDeclaration) -> Option<&'g ClassDeclaration> {
        class.super_class.as_ref().and_then(|name| self.class(name))
    }

    /// Walk the superclass chain starting at the direct superclass.
    ///
    /// Stops at the first class the context does not know. Guards against
    /// cycles in malformed input.
    pub fn superclass_chain(&self, class: &ClassDeclaration) -> Vec<&'g ClassDeclaration> {
        let mut chain: Vec<&'g ClassDeclaration> = Vec::new();
        let mut current = self.super_class_of(class);

        while let Some(super_class) = current
            && !chain.iter().any(|c| c.fq_name == super_class.fq_name)
            && super_class.fq_name != class.fq_name
        {
            chain.push(super_class);
            current = self.super_class_of(super_class);
        }

        chain
    }

    /// The nearest ancestor annotated `@GodotBaseType`.
    pub fn engine_base_class(&self, class: &ClassDeclaration) -> Option<&'g ClassDeclaration> {
        self.superclass_chain(class)
            .into_iter()
            .find(|c| c.is_engine_base_type())
    }

    /// The nearest user-defined ancestor that is itself registered.
    ///
    /// Unregistered user classes in between are skipped. The walk stops at
    /// the engine base type.
    pub fn registered_super_class(&self, class: &ClassDeclaration) -> Option<&'g ClassDeclaration> {
        self.superclass_chain(class)
            .into_iter()
            .take_while(|c| !c.is_engine_base_type())
            .find(|c| c.is_registered())
    }
}

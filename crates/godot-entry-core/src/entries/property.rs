//! Property declarations.
//!
//! Signals are properties too: a property typed `SignalN<...>` and annotated
//! `@RegisterSignal`, usually declared `val signalFoo by signal("a", "b")`.

use serde::{Deserialize, Serialize};

use crate::annotations::{self, Annotations};
use crate::{Annotation, Expr, KotlinType, QualifiedName};

/// A resolved member property.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyDeclaration {
    /// Class the property is declared in.
    pub owner: QualifiedName,
    pub name: String,
    #[serde(rename = "type")]
    pub ty: KotlinType,
    #[serde(default)]
    pub annotations: Annotations,
    /// `var` (true) or `val` (false).
    #[serde(default)]
    pub is_var: bool,
    #[serde(default)]
    pub is_lateinit: bool,
    /// `= <expr>` initializer.
    #[serde(default)]
    pub initializer: Option<Expr>,
    /// `by <expr>` delegate.
    #[serde(default)]
    pub delegate: Option<Expr>,
    /// Declaration source text, for diagnostics.
    #[serde(default)]
    pub source_text: Option<String>,
}

impl PropertyDeclaration {
    /// Create a `var` property without initializer.
    pub fn new(owner: impl Into<QualifiedName>, name: impl Into<String>, ty: KotlinType) -> Self {
        Self {
            owner: owner.into(),
            name: name.into(),
            ty,
            annotations: Annotations::new(),
            is_var: true,
            is_lateinit: false,
            initializer: None,
            delegate: None,
            source_text: None,
        }
    }

    /// Builder: make the property read-only.
    pub fn val(mut self) -> Self {
        self.is_var = false;
        self
    }

    /// Builder: make the property `lateinit`.
    pub fn lateinit(mut self) -> Self {
        self.is_lateinit = true;
        self
    }

    /// Builder: set the initializer.
    pub fn with_initializer(mut self, expr: Expr) -> Self {
        self.initializer = Some(expr);
        self
    }

    /// Builder: set the delegate.
    pub fn with_delegate(mut self, expr: Expr) -> Self {
        self.delegate = Some(expr);
        self
    }

    /// Builder: set the declaration source text.
    pub fn with_source_text(mut self, text: impl Into<String>) -> Self {
        self.source_text = Some(text.into());
        self
    }

    /// Builder: add an annotation.
    pub fn with_annotation(mut self, annotation: Annotation) -> Self {
        self.annotations.0.push(annotation);
        self
    }

    /// Builder: mark the property `@RegisterProperty`.
    pub fn registered(self) -> Self {
        self.with_annotation(Annotation::new(annotations::REGISTER_PROPERTY))
    }

    /// Builder: mark the property `@RegisterSignal`.
    pub fn registered_signal(self) -> Self {
        self.with_annotation(Annotation::new(annotations::REGISTER_SIGNAL))
    }

    pub fn is_registered_property(&self) -> bool {
        self.annotations.has(annotations::REGISTER_PROPERTY)
    }

    pub fn is_registered_signal(&self) -> bool {
        self.annotations.has(annotations::REGISTER_SIGNAL)
    }

    /// `visibleInEditor` of `@RegisterProperty`, default true.
    pub fn is_visible_in_editor(&self) -> bool {
        self.annotations.value_bool(
            annotations::REGISTER_PROPERTY,
            annotations::VISIBLE_IN_EDITOR_ARGUMENT,
            true,
        )
    }

    /// Same name and same resolved type.
    pub fn has_same_signature(&self, other: &PropertyDeclaration) -> bool {
        self.name == other.name && self.ty == other.ty
    }

    /// The expression the property value comes from: initializer, else delegate.
    pub fn assignment(&self) -> Option<&Expr> {
        self.initializer.as_ref().or(self.delegate.as_ref())
    }

    /// `owner.name`, for diagnostics.
    pub fn qualified_name(&self) -> QualifiedName {
        self.owner.child(self.name.clone())
    }

    /// Source text for diagnostics, reconstructed when the front-end did not
    /// provide it.
    pub fn describe_source(&self) -> String {
        if let Some(text) = &self.source_text {
            return text.clone();
        }
        let keyword = if self.is_var { "var" } else { "val" };
        let mut out = format!("{keyword} {}: {}", self.name, self.ty.display_name());
        if let Some(init) = &self.initializer {
            out.push_str(&format!(" = {init}"));
        } else if let Some(delegate) = &self.delegate {
            out.push_str(&format!(" by {delegate}"));
        }
        out
    }
}

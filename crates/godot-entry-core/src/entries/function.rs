//! Function declarations.

use serde::{Deserialize, Serialize};

use crate::annotations::{self, Annotations};
use crate::{KotlinType, QualifiedName};

/// A value parameter of a function or constructor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValueParameter {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: KotlinType,
}

impl ValueParameter {
    pub fn new(name: impl Into<String>, ty: KotlinType) -> Self {
        Self {
            name: name.into(),
            ty,
        }
    }
}

/// A resolved member function.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionDeclaration {
    /// Class the function is declared in.
    pub owner: QualifiedName,
    pub name: String,
    #[serde(default)]
    pub parameters: Vec<ValueParameter>,
    /// Resolved return type. Only missing when the front-end failed to infer it.
    #[serde(default)]
    pub return_type: Option<KotlinType>,
    #[serde(default)]
    pub annotations: Annotations,
}

impl FunctionDeclaration {
    /// Create a function returning `Unit`.
    pub fn new(owner: impl Into<QualifiedName>, name: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            name: name.into(),
            parameters: Vec::new(),
            return_type: Some(KotlinType::simple(crate::types::UNIT)),
            annotations: Annotations::new(),
        }
    }

    /// Builder: add a parameter.
    pub fn with_parameter(mut self, name: impl Into<String>, ty: KotlinType) -> Self {
        self.parameters.push(ValueParameter::new(name, ty));
        self
    }

    /// Builder: set the return type.
    pub fn with_return_type(mut self, ty: KotlinType) -> Self {
        self.return_type = Some(ty);
        self
    }

    /// Builder: mark the function `@RegisterFunction`.
    pub fn registered(mut self) -> Self {
        self.annotations.0.push(crate::Annotation::new(annotations::REGISTER_FUNCTION));
        self
    }

    /// Builder: add an annotation.
    pub fn with_annotation(mut self, annotation: crate::Annotation) -> Self {
        self.annotations.0.push(annotation);
        self
    }

    pub fn is_registered(&self) -> bool {
        self.annotations.has(annotations::REGISTER_FUNCTION)
    }

    /// Same name, same parameter count and pairwise equal parameter types.
    pub fn has_same_signature(&self, other: &FunctionDeclaration) -> bool {
        self.name == other.name
            && self.parameters.len() == other.parameters.len()
            && self
                .parameters
                .iter()
                .zip(&other.parameters)
                .all(|(a, b)| a.ty == b.ty)
    }

    /// `owner.name`, for diagnostics.
    pub fn qualified_name(&self) -> QualifiedName {
        self.owner.child(self.name.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{INT, STRING};

    #[test]
    fn signature_compares_parameter_types() {
        let a = FunctionDeclaration::new("game.Player", "hit")
            .with_parameter("amount", KotlinType::simple(INT));
        let b = FunctionDeclaration::new("game.Boss", "hit")
            .with_parameter("value", KotlinType::simple(INT));
        let c = FunctionDeclaration::new("game.Boss", "hit")
            .with_parameter("value", KotlinType::simple(STRING));
        let d = FunctionDeclaration::new("game.Boss", "hit");

        assert!(a.has_same_signature(&b));
        assert!(!a.has_same_signature(&c));
        assert!(!a.has_same_signature(&d));
    }

    #[test]
    fn registered_marker() {
        let f = FunctionDeclaration::new("game.Player", "_ready").registered();
        assert!(f.is_registered());
        assert_eq!(f.qualified_name().to_string(), "game.Player._ready");
    }
}

//! Member representations and uniform access to them.
//!
//! A class coming from the current compilation lists its members directly,
//! in declaration order. A class read back from a compiled dependency only
//! exposes a name-indexed member scope. Both implement [`MemberSource`], so
//! inheritance walking never needs to know which one it is looking at.
//!
//! ```text
//!                  ┌──────────────────────┐
//!                  │  dyn MemberSource    │  functions() / properties()
//!                  └──────────┬───────────┘
//!               ┌─────────────┴─────────────┐
//!   ┌───────────▼──────────┐    ┌───────────▼──────────┐
//!   │ Vec<MemberDeclaration>│    │     MemberScope      │
//!   │ (source, in order)   │    │ (compiled, by name)  │
//!   └──────────────────────┘    └──────────────────────┘
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::{FunctionDeclaration, PropertyDeclaration};

/// Read access to a class's declared members.
pub trait MemberSource {
    /// All declared functions, annotated or not.
    fn functions(&self) -> Vec<&FunctionDeclaration>;

    /// All declared properties, annotated or not (signals included).
    fn properties(&self) -> Vec<&PropertyDeclaration>;

    /// Functions carrying `@RegisterFunction`.
    fn registered_functions(&self) -> Vec<&FunctionDeclaration> {
        self.functions()
            .into_iter()
            .filter(|f| f.is_registered())
            .collect()
    }

    /// Properties carrying `@RegisterProperty`.
    fn registered_properties(&self) -> Vec<&PropertyDeclaration> {
        self.properties()
            .into_iter()
            .filter(|p| p.is_registered_property())
            .collect()
    }

    /// Properties carrying `@RegisterSignal`.
    fn registered_signals(&self) -> Vec<&PropertyDeclaration> {
        self.properties()
            .into_iter()
            .filter(|p| p.is_registered_signal())
            .collect()
    }
}

/// A member as listed in a source class body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "member", rename_all = "snake_case")]
pub enum MemberDeclaration {
    Function(FunctionDeclaration),
    Property(PropertyDeclaration),
}

impl MemberSource for Vec<MemberDeclaration> {
    fn functions(&self) -> Vec<&FunctionDeclaration> {
        self.iter()
            .filter_map(|m| match m {
                MemberDeclaration::Function(f) => Some(f),
                MemberDeclaration::Property(_) => None,
            })
            .collect()
    }

    fn properties(&self) -> Vec<&PropertyDeclaration> {
        self.iter()
            .filter_map(|m| match m {
                MemberDeclaration::Property(p) => Some(p),
                MemberDeclaration::Function(_) => None,
            })
            .collect()
    }
}

/// Name-indexed member scope of a compiled class.
///
/// Iteration is in name order, then overload order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MemberScope {
    #[serde(default)]
    pub functions: BTreeMap<String, Vec<FunctionDeclaration>>,
    #[serde(default)]
    pub properties: BTreeMap<String, Vec<PropertyDeclaration>>,
}

impl MemberScope {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: add a function under its name.
    pub fn with_function(mut self, function: FunctionDeclaration) -> Self {
        self.functions
            .entry(function.name.clone())
            .or_default()
            .push(function);
        self
    }

    /// Builder: add a property under its name.
    pub fn with_property(mut self, property: PropertyDeclaration) -> Self {
        self.properties
            .entry(property.name.clone())
            .or_default()
            .push(property);
        self
    }

    /// Look up functions by name.
    pub fn functions_named(&self, name: &str) -> &[FunctionDeclaration] {
        self.functions.get(name).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Look up properties by name.
    pub fn properties_named(&self, name: &str) -> &[PropertyDeclaration] {
        self.properties.get(name).map(Vec::as_slice).unwrap_or(&[])
    }
}

impl MemberSource for MemberScope {
    fn functions(&self) -> Vec<&FunctionDeclaration> {
        self.functions.values().flatten().collect()
    }

    fn properties(&self) -> Vec<&PropertyDeclaration> {
        self.properties.values().flatten().collect()
    }
}

/// The members of a class in whichever representation the front-end had.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "representation", rename_all = "snake_case")]
pub enum ClassMembers {
    /// Class of the current compilation.
    Source { declarations: Vec<MemberDeclaration> },
    /// Class from a compiled dependency.
    Compiled { scope: MemberScope },
}

impl Default for ClassMembers {
    fn default() -> Self {
        ClassMembers::Source {
            declarations: Vec::new(),
        }
    }
}

impl ClassMembers {
    /// View the members through the uniform accessor.
    pub fn as_source(&self) -> &dyn MemberSource {
        match self {
            ClassMembers::Source { declarations } => declarations,
            ClassMembers::Compiled { scope } => scope,
        }
    }

    pub fn is_compiled(&self) -> bool {
        matches!(self, ClassMembers::Compiled { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::KotlinType;
    use crate::types::{INT, STRING};

    fn health() -> PropertyDeclaration {
        PropertyDeclaration::new("game.Player", "health", KotlinType::simple(INT)).registered()
    }

    fn name() -> PropertyDeclaration {
        PropertyDeclaration::new("game.Player", "name", KotlinType::simple(STRING))
    }

    fn jump() -> FunctionDeclaration {
        FunctionDeclaration::new("game.Player", "jump").registered()
    }

    #[test]
    fn both_representations_expose_the_same_members() {
        let source = ClassMembers::Source {
            declarations: vec![
                MemberDeclaration::Property(health()),
                MemberDeclaration::Function(jump()),
                MemberDeclaration::Property(name()),
            ],
        };
        let compiled = ClassMembers::Compiled {
            scope: MemberScope::new()
                .with_property(name())
                .with_function(jump())
                .with_property(health()),
        };

        for members in [&source, &compiled] {
            let view = members.as_source();
            assert_eq!(view.functions().len(), 1);
            assert_eq!(view.properties().len(), 2);
            assert_eq!(view.registered_properties().len(), 1);
            assert_eq!(view.registered_properties()[0].name, "health");
            assert_eq!(view.registered_functions()[0].name, "jump");
            assert!(view.registered_signals().is_empty());
        }
        assert!(compiled.is_compiled());
        assert!(!source.is_compiled());
    }

    #[test]
    fn scope_iterates_in_name_order() {
        let scope = MemberScope::new().with_property(name()).with_property(health());
        let names: Vec<&str> = scope.properties().iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["health", "name"]);
        assert_eq!(scope.properties_named("health").len(), 1);
        assert!(scope.functions_named("missing").is_empty());
    }
}

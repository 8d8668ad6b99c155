//! Whole-pass and per-class validation.

use std::collections::BTreeMap;

use godot_entry_core::{
    ClassDeclaration, DeclarationError, MAX_CONSTRUCTOR_PARAMETERS, QualifiedName,
};

/// Registered engine names seen during a pass.
///
/// Names are recorded per class while generating and checked once, before
/// anything is written.
#[derive(Debug, Default)]
pub struct RegisteredClassNames {
    entries: Vec<(QualifiedName, String)>,
}

impl RegisteredClassNames {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, fq_name: QualifiedName, registered_name: impl Into<String>) {
        self.entries.push((fq_name, registered_name.into()));
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Fail when two or more classes share a registered name.
    ///
    /// Every clashing group is reported, ordered by registered name, each
    /// group ordered by fully qualified class name.
    pub fn validate(&self) -> Result<(), DeclarationError> {
        let mut by_name: BTreeMap<&str, Vec<(QualifiedName, String)>> = BTreeMap::new();
        for (fq_name, registered) in &self.entries {
            by_name
                .entry(registered.as_str())
                .or_default()
                .push((fq_name.clone(), registered.clone()));
        }

        let groups: Vec<Vec<(QualifiedName, String)>> = by_name
            .into_values()
            .filter(|group| group.len() > 1)
            .map(|mut group| {
                group.sort_by(|a, b| a.0.cmp(&b.0));
                group
            })
            .collect();

        if groups.is_empty() {
            Ok(())
        } else {
            Err(DeclarationError::DuplicateClassNames { groups })
        }
    }
}

/// Every constructor must fit the engine binding's parameter limit.
pub fn check_constructors(class: &ClassDeclaration) -> Result<(), DeclarationError> {
    match class
        .constructors
        .iter()
        .find(|c| c.parameters.len() > MAX_CONSTRUCTOR_PARAMETERS)
    {
        Some(constructor) => Err(DeclarationError::ConstructorArity {
            class: class.fq_name.clone(),
            count: constructor.parameters.len(),
            source_text: constructor.describe_source(),
        }),
        None => Ok(()),
    }
}

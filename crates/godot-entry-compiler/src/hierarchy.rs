//! Hierarchy flattening.
//!
//! Script inheritance is emulated by the engine: a registered class only
//! exposes the members registered for it directly. A child class therefore
//! has to re-register everything its user-defined ancestors registered.
//!
//! ```text
//! godot.Node        @GodotBaseType       <- walk stops here
//!   └── game.Player   health, hit()      <- collected
//!         └── game.Boss  rage            <- flattened: rage, health, hit()
//! ```
//!
//! Ancestors may come from the current compilation or from a precompiled
//! dependency. Both are read through [`MemberSource`], so the walk does not
//! care which representation it meets.
//!
//! [`MemberSource`]: godot_entry_core::MemberSource

use std::ptr;

use godot_entry_core::{
    BindingContext, ClassDeclaration, FunctionDeclaration, GenerationError, InternalError,
    PropertyDeclaration,
};
use tracing::trace;

/// A class and the members that get registered for it.
#[derive(Debug, Clone)]
pub struct ClassWithMembers<'a> {
    pub class: &'a ClassDeclaration,
    pub functions: Vec<&'a FunctionDeclaration>,
    pub signals: Vec<&'a PropertyDeclaration>,
    pub properties: Vec<&'a PropertyDeclaration>,
}

impl<'a> ClassWithMembers<'a> {
    /// The members the class registers itself.
    pub fn collect(class: &'a ClassDeclaration) -> Self {
        let members = class.members.as_source();
        Self {
            class,
            functions: members.registered_functions(),
            signals: members.registered_signals(),
            properties: members.registered_properties(),
        }
    }

    pub fn member_count(&self) -> usize {
        self.functions.len() + self.signals.len() + self.properties.len()
    }
}

#[derive(Default)]
struct Inherited<'a> {
    functions: Vec<&'a FunctionDeclaration>,
    signals: Vec<&'a PropertyDeclaration>,
    properties: Vec<&'a PropertyDeclaration>,
}

/// Merge the registered members of every user-defined ancestor into a copy
/// of `class`.
///
/// Members the class already registers under the same signature are kept as
/// they are. An inherited property the class overrides without annotating
/// is replaced by the override. Flattening an already flattened class
/// returns it unchanged.
#[cfg_attr(feature = "profiling", profiling::function)]
pub fn flatten<'a>(
    class: &ClassWithMembers<'a>,
    ctx: &BindingContext<'a>,
) -> Result<ClassWithMembers<'a>, GenerationError> {
    let inherited = collect_inherited(class.class, ctx)?;
    let mut flattened = class.clone();

    for function in inherited.functions {
        if !flattened.functions.iter().any(|f| f.has_same_signature(function)) {
            flattened.functions.push(function);
        }
    }

    for signal in inherited.signals {
        if !flattened.signals.iter().any(|s| s.has_same_signature(signal)) {
            flattened.signals.push(signal);
        }
    }

    for property in inherited.properties {
        if flattened.properties.iter().any(|p| p.has_same_signature(property)) {
            continue;
        }
        let registered = match unannotated_override(&flattened, property)? {
            Some(shadow) => shadow,
            None => property,
        };
        flattened.properties.push(registered);
    }

    trace!(
        target: "pipeline",
        class = %class.class.fq_name,
        own = class.member_count(),
        flattened = flattened.member_count(),
        "flattened hierarchy"
    );
    Ok(flattened)
}

/// Walk from the direct superclass up to the first engine base type,
/// nearest ancestor first.
fn collect_inherited<'a>(
    class: &'a ClassDeclaration,
    ctx: &BindingContext<'a>,
) -> Result<Inherited<'a>, GenerationError> {
    let mut inherited = Inherited::default();
    let mut last = class;

    for ancestor in ctx.superclass_chain(class) {
        if ancestor.is_engine_base_type() {
            return Ok(inherited);
        }
        let members = ancestor.members.as_source();
        inherited.functions.extend(members.registered_functions());
        inherited.signals.extend(members.registered_signals());
        inherited.properties.extend(members.registered_properties());
        last = ancestor;
    }

    // No engine type reached: either a cycle or a name the context lacks.
    match &last.super_class {
        Some(super_class) if ctx.class(super_class).is_none() => {
            Err(InternalError::UnresolvedSuperclass {
                class: last.fq_name.clone(),
                super_class: super_class.clone(),
            }
            .into())
        }
        _ => Ok(inherited),
    }
}

/// The class's own, unannotated override of an inherited property.
fn unannotated_override<'a>(
    class: &ClassWithMembers<'a>,
    inherited: &PropertyDeclaration,
) -> Result<Option<&'a PropertyDeclaration>, InternalError> {
    let candidates: Vec<&'a PropertyDeclaration> = class
        .class
        .members
        .as_source()
        .properties()
        .into_iter()
        .filter(|p| !p.is_registered_signal())
        .filter(|p| !class.properties.iter().any(|q| ptr::eq(*q, *p)))
        .filter(|p| p.has_same_signature(inherited))
        .collect();

    match candidates.as_slice() {
        [] => Ok(None),
        [single] => Ok(Some(*single)),
        _ => Err(InternalError::AmbiguousOverride {
            class: class.class.fq_name.clone(),
            property: inherited.name.clone(),
        }),
    }
}

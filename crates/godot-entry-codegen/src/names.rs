//! Names of Kotlin types and members as they appear in generated code.
//!
//! A [`ClassName`] is split into its package and its chain of simple names
//! (`godot.runtime` + `Entry.Context`), because only the outermost simple
//! name can be imported. Enum entries are modelled the way KotlinPoet does
//! it: `VariantType.LONG` is a class name whose package is
//! `godot.core.VariantType`.

use std::fmt;

use godot_entry_core::QualifiedName;

/// A (possibly nested) class name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClassName {
    package: String,
    simple_names: Vec<String>,
}

impl ClassName {
    /// A top-level class.
    pub fn new(package: impl Into<String>, simple_name: impl Into<String>) -> Self {
        Self {
            package: package.into(),
            simple_names: vec![simple_name.into()],
        }
    }

    /// A top-level class from a qualified name: last segment is the class.
    pub fn from_qualified(name: &QualifiedName) -> Self {
        Self::new(name.package_string(), name.short_name())
    }

    /// A class nested in this one.
    pub fn nested(&self, simple_name: impl Into<String>) -> Self {
        let mut simple_names = self.simple_names.clone();
        simple_names.push(simple_name.into());
        Self {
            package: self.package.clone(),
            simple_names,
        }
    }

    pub fn package(&self) -> &str {
        &self.package
    }

    /// Innermost simple name.
    pub fn simple_name(&self) -> &str {
        self.simple_names.last().map(String::as_str).unwrap_or_default()
    }

    /// Outermost simple name; the part that gets imported.
    pub fn top_level_name(&self) -> &str {
        self.simple_names.first().map(String::as_str).unwrap_or_default()
    }

    /// Simple names joined with `.` (`Entry.Context`).
    pub fn relative_name(&self) -> String {
        self.simple_names.join(".")
    }

    /// The fully qualified form (`godot.runtime.Entry.Context`).
    pub fn canonical(&self) -> String {
        if self.package.is_empty() {
            self.relative_name()
        } else {
            format!("{}.{}", self.package, self.relative_name())
        }
    }
}

impl fmt::Display for ClassName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.canonical())
    }
}

/// A type as written in a signature.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeName {
    Class(ClassName),
    /// `List<String>`
    Parameterized {
        raw: ClassName,
        arguments: Vec<TypeName>,
    },
}

impl TypeName {
    pub fn parameterized(raw: ClassName, arguments: Vec<TypeName>) -> Self {
        TypeName::Parameterized { raw, arguments }
    }

    /// Every class name mentioned, outermost first.
    pub fn class_names(&self) -> Vec<&ClassName> {
        match self {
            TypeName::Class(name) => vec![name],
            TypeName::Parameterized { raw, arguments } => {
                let mut names = vec![raw];
                for argument in arguments {
                    names.extend(argument.class_names());
                }
                names
            }
        }
    }
}

impl From<ClassName> for TypeName {
    fn from(name: ClassName) -> Self {
        TypeName::Class(name)
    }
}

/// A function or property, top-level or inside a class.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MemberName {
    package: String,
    enclosing: Option<ClassName>,
    name: String,
}

impl MemberName {
    /// A top-level member (`godot.registerEngineTypes`).
    pub fn top_level(package: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            package: package.into(),
            enclosing: None,
            name: name.into(),
        }
    }

    /// A member of a class (`Player.health`).
    pub fn member(enclosing: ClassName, name: impl Into<String>) -> Self {
        Self {
            package: enclosing.package().to_string(),
            enclosing: Some(enclosing),
            name: name.into(),
        }
    }

    pub fn package(&self) -> &str {
        &self.package
    }

    pub fn enclosing(&self) -> Option<&ClassName> {
        self.enclosing.as_ref()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn canonical(&self) -> String {
        match &self.enclosing {
            Some(class) => format!("{}.{}", class.canonical(), self.name),
            None if self.package.is_empty() => self.name.clone(),
            None => format!("{}.{}", self.package, self.name),
        }
    }
}

impl fmt::Display for MemberName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.canonical())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nested_class_names() {
        let context = ClassName::new("godot.runtime", "Entry").nested("Context");
        assert_eq!(context.canonical(), "godot.runtime.Entry.Context");
        assert_eq!(context.relative_name(), "Entry.Context");
        assert_eq!(context.top_level_name(), "Entry");
        assert_eq!(context.simple_name(), "Context");
    }

    #[test]
    fn default_package_class() {
        let player = ClassName::from_qualified(&QualifiedName::parse("Player"));
        assert_eq!(player.package(), "");
        assert_eq!(player.canonical(), "Player");
    }

    #[test]
    fn member_canonical_names() {
        let health = MemberName::member(ClassName::new("game", "Player"), "health");
        assert_eq!(health.canonical(), "game.Player.health");
        assert_eq!(health.package(), "game");

        let top = MemberName::top_level("godot", "registerEngineTypes");
        assert_eq!(top.canonical(), "godot.registerEngineTypes");
    }

    #[test]
    fn parameterized_lists_all_classes() {
        let list = TypeName::parameterized(
            ClassName::new("kotlin.collections", "List"),
            vec![ClassName::new("kotlin", "String").into()],
        );
        let names: Vec<String> = list.class_names().iter().map(|c| c.canonical()).collect();
        assert_eq!(names, vec!["kotlin.collections.List", "kotlin.String"]);
    }
}

//! Import resolution for a generated file.
//!
//! Every class and top-level member a file mentions is either imported and
//! written by its simple name, or written fully qualified. A name is written
//! fully qualified when:
//!
//! - two different packages contribute the same simple name, or
//! - the simple name is taken by a type declared in the file itself
//!   (`godot.runtime.Entry` inside `godot.Entry`).
//!
//! Names from the file's own package and from Kotlin's default imports are
//! written short without an import line.

use std::collections::{BTreeMap, BTreeSet};

use crate::names::{ClassName, MemberName, TypeName};

/// Packages every Kotlin file imports implicitly.
const DEFAULT_IMPORTS: &[&str] = &[
    "kotlin",
    "kotlin.annotation",
    "kotlin.collections",
    "kotlin.comparisons",
    "kotlin.io",
    "kotlin.ranges",
    "kotlin.sequences",
    "kotlin.text",
];

/// Import decisions for one file.
#[derive(Debug, Clone, Default)]
pub struct ImportSet {
    qualify_all: bool,
    /// `(package, simple name)` pairs written in short form.
    short: BTreeSet<(String, String)>,
    /// Import lines, sorted.
    imports: BTreeSet<String>,
}

impl ImportSet {
    /// Write everything fully qualified, import nothing.
    pub fn qualified() -> Self {
        Self {
            qualify_all: true,
            ..Self::default()
        }
    }

    /// Decide imports for a file in `file_package` declaring `declared` types.
    pub fn resolve(
        file_package: &str,
        declared: &[&str],
        classes: &[&ClassName],
        members: &[&MemberName],
    ) -> Self {
        let mut by_name: BTreeMap<&str, BTreeSet<&str>> = BTreeMap::new();
        for class in classes {
            by_name
                .entry(class.top_level_name())
                .or_default()
                .insert(class.package());
        }
        for member in members {
            by_name.entry(member.name()).or_default().insert(member.package());
        }

        let mut set = Self::default();
        for (name, packages) in by_name {
            if packages.len() > 1 {
                continue;
            }
            let Some(package) = packages.into_iter().next() else {
                continue;
            };
            let own_package = package == file_package;
            if declared.contains(&name) && !own_package {
                continue;
            }

            set.short.insert((package.to_string(), name.to_string()));
            if !own_package && !DEFAULT_IMPORTS.contains(&package) {
                let line = if package.is_empty() {
                    name.to_string()
                } else {
                    format!("{package}.{name}")
                };
                set.imports.insert(line);
            }
        }
        set
    }

    /// Import lines in sorted order, without the `import ` keyword.
    pub fn imports(&self) -> impl Iterator<Item = &str> {
        self.imports.iter().map(String::as_str)
    }

    fn is_short(&self, package: &str, name: &str) -> bool {
        !self.qualify_all
            && self
                .short
                .contains(&(package.to_string(), name.to_string()))
    }

    pub fn class_text(&self, class: &ClassName) -> String {
        if self.is_short(class.package(), class.top_level_name()) {
            class.relative_name()
        } else {
            class.canonical()
        }
    }

    pub fn type_text(&self, ty: &TypeName) -> String {
        match ty {
            TypeName::Class(class) => self.class_text(class),
            TypeName::Parameterized { raw, arguments } => {
                let arguments: Vec<String> = arguments.iter().map(|a| self.type_text(a)).collect();
                format!("{}<{}>", self.class_text(raw), arguments.join(", "))
            }
        }
    }

    pub fn member_text(&self, member: &MemberName) -> String {
        match member.enclosing() {
            Some(class) => format!("{}.{}", self.class_text(class), member.name()),
            None if self.is_short(member.package(), member.name()) => member.name().to_string(),
            None => member.canonical(),
        }
    }
}

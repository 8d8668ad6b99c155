use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Fully qualified name of a Kotlin declaration.
///
/// Used as primary key for class and member lookups. Kotlin separates
/// package segments with `.`.
///
/// # Examples
///
/// ```
/// use godot_entry_core::QualifiedName;
///
/// // Default package
/// let player = QualifiedName::top_level("Player");
/// assert_eq!(player.to_string(), "Player");
///
/// // With package
/// let entity = QualifiedName::new("Entity", vec!["game".into(), "core".into()]);
/// assert_eq!(entity.to_string(), "game.core.Entity");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct QualifiedName {
    /// Simple name (e.g., "Player", "health")
    pub name: String,
    /// Package path (e.g., ["godot", "core"])
    /// Empty for the default package
    pub package: Vec<String>,
}

impl QualifiedName {
    /// Create a new qualified name with package.
    pub fn new(name: impl Into<String>, package: Vec<String>) -> Self {
        Self {
            name: name.into(),
            package,
        }
    }

    /// Create a qualified name in the default package.
    pub fn top_level(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            package: Vec::new(),
        }
    }

    /// Create from a dotted string (e.g., "godot.core.Vector2").
    ///
    /// Splits on "." - the last segment is the name, rest is the package.
    /// Empty segments are dropped: ".godot.Node" == "godot.Node".
    pub fn parse(s: &str) -> Self {
        let mut parts: Vec<String> = s
            .split('.')
            .filter(|p| !p.is_empty())
            .map(str::to_string)
            .collect();
        match parts.pop() {
            Some(name) => Self {
                name,
                package: parts,
            },
            None => Self::top_level(""),
        }
    }

    /// Check if this is in the default package.
    pub fn is_top_level(&self) -> bool {
        self.package.is_empty()
    }

    /// Get the simple (unqualified) name.
    pub fn short_name(&self) -> &str {
        &self.name
    }

    /// Get the package path.
    pub fn package_path(&self) -> &[String] {
        &self.package
    }

    /// Get the package as a dotted string ("" for the default package).
    pub fn package_string(&self) -> String {
        self.package.join(".")
    }

    /// Create a child name within this name.
    ///
    /// Example: `godot.core` + `Vector2` = `godot.core.Vector2`
    pub fn child(&self, name: impl Into<String>) -> Self {
        let mut child_package = self.package.clone();
        child_package.push(self.name.clone());
        Self {
            name: name.into(),
            package: child_package,
        }
    }

    /// Get the parent as a QualifiedName (if any).
    ///
    /// Example: `godot.core.Vector2` -> Some(`godot.core`)
    pub fn parent(&self) -> Option<Self> {
        let (name, package) = self.package.split_last()?;
        Some(Self {
            name: name.clone(),
            package: package.to_vec(),
        })
    }

    /// Check whether this name equals the given dotted string.
    pub fn is(&self, dotted: &str) -> bool {
        match dotted.rsplit_once('.') {
            Some((package, name)) => {
                self.name == name
                    && self.package.len() == package.split('.').count()
                    && self.package.iter().zip(package.split('.')).all(|(a, b)| a == b)
            }
            None => self.package.is_empty() && self.name == dotted,
        }
    }
}

impl Ord for QualifiedName {
    fn cmp(&self, other: &Self) -> Ordering {
        self.package
            .cmp(&other.package)
            .then_with(|| self.name.cmp(&other.name))
    }
}

impl PartialOrd for QualifiedName {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for QualifiedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.package.is_empty() {
            write!(f, "{}", self.name)
        } else {
            write!(f, "{}.{}", self.package.join("."), self.name)
        }
    }
}

impl From<&str> for QualifiedName {
    fn from(s: &str) -> Self {
        Self::parse(s)
    }
}

impl From<String> for QualifiedName {
    fn from(s: String) -> Self {
        Self::parse(&s)
    }
}

impl From<QualifiedName> for String {
    fn from(name: QualifiedName) -> Self {
        name.to_string()
    }
}

//! Kotlin source files.

use std::fs;
use std::path::{Path, PathBuf};

use godot_entry_core::GenerationError;

use crate::error::EmitError;
use crate::imports::ImportSet;
use crate::type_spec::TypeSpec;

/// A Kotlin source file: header comment, package, imports and types.
///
/// # Example
///
/// ```
/// use godot_entry_codegen::{FileSpec, TypeSpec};
///
/// let file = FileSpec::builder("godot.game", "PlayerEntry")
///     .with_comment("generated")
///     .with_type(TypeSpec::class_builder("PlayerRegistrar"));
///
/// assert_eq!(file.relative_path().to_str(), Some("godot/game/PlayerEntry.kt"));
/// assert!(file.render().unwrap().starts_with("// generated\n\npackage godot.game\n"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileSpec {
    package: String,
    name: String,
    comment: Vec<String>,
    types: Vec<TypeSpec>,
}

impl FileSpec {
    pub fn builder(package: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            package: package.into(),
            name: name.into(),
            comment: Vec::new(),
            types: Vec::new(),
        }
    }

    /// Add a line to the header comment.
    pub fn with_comment(mut self, line: impl Into<String>) -> Self {
        self.comment.push(line.into());
        self
    }

    pub fn with_type(mut self, spec: TypeSpec) -> Self {
        self.types.push(spec);
        self
    }

    pub fn package(&self) -> &str {
        &self.package
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn types(&self) -> &[TypeSpec] {
        &self.types
    }

    /// `<package as directories>/<name>.kt`
    pub fn relative_path(&self) -> PathBuf {
        let mut path = PathBuf::new();
        for segment in self.package.split('.').filter(|s| !s.is_empty()) {
            path.push(segment);
        }
        path.push(format!("{}.kt", self.name));
        path
    }

    /// Render the whole file.
    pub fn render(&self) -> Result<String, EmitError> {
        let mut classes = Vec::new();
        let mut members = Vec::new();
        for spec in &self.types {
            spec.collect_references(&mut classes, &mut members);
        }
        let declared: Vec<&str> = self.types.iter().map(TypeSpec::name).collect();
        let imports = ImportSet::resolve(&self.package, &declared, &classes, &members);

        let mut out = String::new();
        for line in &self.comment {
            out.push_str("// ");
            out.push_str(line);
            out.push('\n');
        }
        if !self.comment.is_empty() {
            out.push('\n');
        }

        if !self.package.is_empty() {
            out.push_str("package ");
            out.push_str(&self.package);
            out.push_str("\n\n");
        }

        let mut has_imports = false;
        for import in imports.imports() {
            out.push_str("import ");
            out.push_str(import);
            out.push('\n');
            has_imports = true;
        }
        if has_imports {
            out.push('\n');
        }

        for (index, spec) in self.types.iter().enumerate() {
            if index > 0 {
                out.push('\n');
            }
            out.push_str(&spec.render(&imports)?);
        }

        Ok(out)
    }

    /// Render into a file that is not yet written anywhere.
    pub fn to_rendered(&self) -> Result<RenderedFile, EmitError> {
        Ok(RenderedFile {
            relative_path: self.relative_path(),
            contents: self.render()?,
        })
    }

    /// Render and write under `directory`, creating package directories.
    ///
    /// Returns the written path.
    pub fn write_to(&self, directory: &Path) -> Result<PathBuf, GenerationError> {
        self.to_rendered()?.write_to(directory)
    }
}

/// File contents together with the path they belong at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedFile {
    pub relative_path: PathBuf,
    pub contents: String,
}

impl RenderedFile {
    pub fn new(relative_path: impl Into<PathBuf>, contents: impl Into<String>) -> Self {
        Self {
            relative_path: relative_path.into(),
            contents: contents.into(),
        }
    }

    /// Write under `directory`, creating parent directories.
    pub fn write_to(&self, directory: &Path) -> Result<PathBuf, GenerationError> {
        let path = directory.join(&self.relative_path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| GenerationError::io(parent, e))?;
        }
        fs::write(&path, &self.contents).map_err(|e| GenerationError::io(&path, e))?;
        tracing::debug!(
            target: "codegen",
            path = %path.display(),
            bytes = self.contents.len(),
            "wrote file"
        );
        Ok(path)
    }
}

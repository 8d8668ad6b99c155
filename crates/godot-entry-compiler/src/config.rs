//! Generation pass configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Where a pass writes and what it reports to the runtime.
///
/// # Example
///
/// ```
/// use godot_entry_compiler::GeneratorConfig;
///
/// let config = GeneratorConfig::new("build/generated/entry")
///     .with_project_root(".")
///     .with_src_dir("src/main/kotlin");
/// assert_eq!(config.src_dirs, vec!["src/main/kotlin".to_string()]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratorConfig {
    /// Root of the generated Kotlin sources.
    pub output_dir: PathBuf,
    /// Project root; the service file goes under its `src/main/resources`.
    #[serde(default)]
    pub project_root: Option<PathBuf>,
    /// Source directories returned by `Entry.provideSrcDirs()`.
    #[serde(default)]
    pub src_dirs: Vec<String>,
    #[serde(default)]
    pub gdns: Option<GdnsConfig>,
}

impl GeneratorConfig {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            project_root: None,
            src_dirs: Vec::new(),
            gdns: None,
        }
    }

    pub fn with_project_root(mut self, project_root: impl Into<PathBuf>) -> Self {
        self.project_root = Some(project_root.into());
        self
    }

    pub fn with_src_dir(mut self, src_dir: impl Into<String>) -> Self {
        self.src_dirs.push(src_dir.into());
        self
    }

    pub fn with_gdns(mut self, gdns: GdnsConfig) -> Self {
        self.gdns = Some(gdns);
        self
    }
}

/// NativeScript resource generation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GdnsConfig {
    /// Resource path of the `.gdnlib` library descriptor (`res://...`).
    pub gdnlib_path: String,
    pub output_dir: PathBuf,
    /// Delete existing `.gdns` files under `output_dir` first.
    #[serde(default)]
    pub clean: bool,
}

impl GdnsConfig {
    pub fn new(gdnlib_path: impl Into<String>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            gdnlib_path: gdnlib_path.into(),
            output_dir: output_dir.into(),
            clean: false,
        }
    }

    pub fn with_clean(mut self, clean: bool) -> Self {
        self.clean = clean;
        self
    }
}

//! NativeScript (`.gdns`) resources for the cross-language target.
//!
//! One resource per registered class binds the engine-side script name to
//! the native library descriptor.

use std::fs;
use std::path::{Path, PathBuf};

use godot_entry_codegen::RenderedFile;
use godot_entry_core::{ClassDeclaration, GenerationError};
use tracing::debug;
use walkdir::WalkDir;

pub const GDNS_EXTENSION: &str = "gdns";

/// Build the `.gdns` resource of one class.
///
/// Written to `<package path>/<Simple>.gdns` relative to the GDNS directory.
pub fn gdns_file(class: &ClassDeclaration, gdnlib_path: &str) -> RenderedFile {
    let mut relative_path = PathBuf::new();
    for segment in class.fq_name.package_path() {
        relative_path.push(segment);
    }
    relative_path.push(format!("{}.{GDNS_EXTENSION}", class.simple_name()));

    let contents = format!(
        "[gd_resource type=\"NativeScript\" load_steps=2 format=2]\n\
         \n\
         [ext_resource path=\"{gdnlib_path}\" type=\"GDNativeLibrary\" id=1]\n\
         \n\
         [resource]\n\
         \n\
         resource_name = \"{simple}\"\n\
         class_name = \"{registered}\"\n\
         library = ExtResource( 1 )\n",
        simple = class.simple_name(),
        registered = class.registered_name(),
    );
    RenderedFile::new(relative_path, contents)
}

/// Delete every `.gdns` file under `directory`. Returns the deleted paths.
pub fn clean_gdns_files(directory: &Path) -> Result<Vec<PathBuf>, GenerationError> {
    if !directory.is_dir() {
        return Ok(Vec::new());
    }

    let mut deleted = Vec::new();
    for entry in WalkDir::new(directory).sort_by_file_name() {
        let entry = entry.map_err(|e| {
            let path = e.path().unwrap_or(directory).to_path_buf();
            GenerationError::io(path, e.into())
        })?;
        let is_gdns = entry.file_type().is_file()
            && entry.path().extension().is_some_and(|ext| ext == GDNS_EXTENSION);
        if !is_gdns {
            continue;
        }
        fs::remove_file(entry.path()).map_err(|e| GenerationError::io(entry.path(), e))?;
        debug!(target: "pipeline", path = %entry.path().display(), "deleted gdns file");
        deleted.push(entry.into_path());
    }
    Ok(deleted)
}

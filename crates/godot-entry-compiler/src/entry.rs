//! The main `Entry.kt` file, stale registrar cleanup and the service file.
//!
//! Per-class registrar files survive between passes. Each pass rescans the
//! output directory so the main entry keeps calling registrars that were not
//! regenerated, and drops files whose class left the source set.

use std::path::{Path, PathBuf};

use godot_entry_codegen::{
    ClassName, CodeArg, FileSpec, FunSpec, Modifiers, RenderedFile, TypeName, TypeSpec,
};
use godot_entry_core::{GenerationError, QualifiedName};
use rustc_hash::FxHashSet;
use walkdir::WalkDir;

use crate::class::registrar_name;
use crate::runtime::{self, ENTRY_FILE_SUFFIX, GENERATED_COMMENT, GENERATED_ROOT_PACKAGE};

/// Name of the main entry file and class.
pub const MAIN_ENTRY_NAME: &str = "Entry";

/// Service file location, relative to the project root.
pub const SERVICE_FILE_PATH: &str = "src/main/resources/META-INF/services/godot.runtime.Entry";

/// Service file contents: the generated entry class.
pub const SERVICE_FILE_CONTENTS: &str = "godot.Entry";

/// A registrar file found on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExistingEntry {
    pub fq_name: QualifiedName,
    pub path: PathBuf,
}

/// What to do with the registrar files already on disk.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntryPlan {
    /// Files of classes no longer in the source set.
    pub stale: Vec<ExistingEntry>,
    /// Classes whose registrar stays on disk untouched this pass.
    pub survivors: Vec<QualifiedName>,
}

/// Find every `<Simple>Entry.kt` under `<output_dir>/godot`.
///
/// The class name is recovered from the path:
/// `godot/game/PlayerEntry.kt` belongs to `game.Player`.
pub fn scan_entry_files(output_dir: &Path) -> Result<Vec<ExistingEntry>, GenerationError> {
    let root = output_dir.join(GENERATED_ROOT_PACKAGE);
    if !root.is_dir() {
        return Ok(Vec::new());
    }

    let suffix = format!("{ENTRY_FILE_SUFFIX}.kt");
    let main_entry = format!("{MAIN_ENTRY_NAME}.kt");
    let mut found = Vec::new();

    for entry in WalkDir::new(&root).sort_by_file_name() {
        let entry = entry.map_err(|e| walk_error(&root, e))?;
        if !entry.file_type().is_file() {
            continue;
        }
        let file_name = entry.file_name().to_string_lossy();
        if file_name == main_entry {
            continue;
        }
        let Some(simple_name) = file_name.strip_suffix(suffix.as_str()) else {
            continue;
        };

        let Ok(relative) = entry.path().strip_prefix(&root) else {
            continue;
        };
        let mut segments: Vec<String> = relative
            .parent()
            .into_iter()
            .flat_map(Path::components)
            .map(|c| c.as_os_str().to_string_lossy().into_owned())
            .collect();
        segments.push(simple_name.to_string());

        found.push(ExistingEntry {
            fq_name: QualifiedName::from(segments.join(".")),
            path: entry.into_path(),
        });
    }

    found.sort_by(|a, b| a.fq_name.cmp(&b.fq_name));
    Ok(found)
}

fn walk_error(root: &Path, err: walkdir::Error) -> GenerationError {
    let path = err.path().unwrap_or(root).to_path_buf();
    GenerationError::io(path, err.into())
}

/// Split the files on disk into stale files and surviving registrars.
pub fn plan_entries(
    existing: Vec<ExistingEntry>,
    source_classes: &[QualifiedName],
    regenerated: &[QualifiedName],
) -> EntryPlan {
    let sources: FxHashSet<&QualifiedName> = source_classes.iter().collect();
    let regenerated: FxHashSet<&QualifiedName> = regenerated.iter().collect();

    let mut plan = EntryPlan::default();
    for entry in existing {
        if !sources.contains(&entry.fq_name) {
            plan.stale.push(entry);
        } else if !regenerated.contains(&entry.fq_name) {
            plan.survivors.push(entry.fq_name);
        }
    }
    plan
}

/// Build `godot/Entry.kt`.
///
/// `registrars` are the classes whose registrars get called; calls are
/// emitted in qualified name order.
pub fn main_entry_file(
    registrars: &[QualifiedName],
    src_dirs: &[String],
) -> Result<FileSpec, GenerationError> {
    let mut classes: Vec<&QualifiedName> = registrars.iter().collect();
    classes.sort();
    classes.dedup();

    let mut init = FunSpec::builder("init")
        .with_modifiers(Modifiers::OVERRIDE)
        .with_receiver(runtime::entry_context());
    init.begin_control_flow("with(registry)", vec![])?;
    for class in classes {
        init.add_statement("%T().register(registry)", vec![registrar_name(class).into()])?;
    }
    init.end_control_flow()?;

    let mut init_engine_types = FunSpec::builder("initEngineTypes")
        .with_modifiers(Modifiers::OVERRIDE)
        .with_receiver(runtime::entry_context());
    for call in runtime::engine_bootstrap_calls() {
        init_engine_types.add_statement("%M()", vec![call.into()])?;
    }

    let string = ClassName::new("kotlin", "String");
    let mut provide_src_dirs = FunSpec::builder("provideSrcDirs")
        .with_modifiers(Modifiers::OVERRIDE)
        .with_returns(TypeName::parameterized(
            ClassName::new("kotlin.collections", "List"),
            vec![string.clone().into()],
        ));
    let placeholders = vec!["%S"; src_dirs.len()].join(", ");
    let mut args: Vec<CodeArg> = vec![string.into()];
    args.extend(src_dirs.iter().map(CodeArg::string));
    provide_src_dirs.add_statement(&format!("return listOf<%T>({placeholders})"), args)?;

    let entry = TypeSpec::class_builder(MAIN_ENTRY_NAME)
        .with_superclass(runtime::runtime_entry())
        .with_function(init)
        .with_function(init_engine_types)
        .with_function(provide_src_dirs);

    Ok(FileSpec::builder(GENERATED_ROOT_PACKAGE, MAIN_ENTRY_NAME)
        .with_comment(GENERATED_COMMENT)
        .with_type(entry))
}

/// The `META-INF/services` file naming the generated entry.
pub fn service_file() -> RenderedFile {
    RenderedFile::new(SERVICE_FILE_PATH, SERVICE_FILE_CONTENTS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn touch(root: &Path, relative: &str) {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "").unwrap();
    }

    #[test]
    fn scan_recovers_class_names() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "godot/Entry.kt");
        touch(dir.path(), "godot/GizmoEntry.kt");
        touch(dir.path(), "godot/game/PlayerEntry.kt");
        touch(dir.path(), "godot/game/boss/BossEntry.kt");
        touch(dir.path(), "godot/game/notes.txt");

        let found = scan_entry_files(dir.path()).unwrap();
        let mut names: Vec<String> = found.iter().map(|e| e.fq_name.to_string()).collect();
        names.sort();
        assert_eq!(names, vec!["Gizmo", "game.Player", "game.boss.Boss"]);

        let player = found.iter().find(|e| e.fq_name.is("game.Player")).unwrap();
        assert_eq!(player.path, dir.path().join("godot/game/PlayerEntry.kt"));
    }

    #[test]
    fn scan_of_missing_directory_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        assert!(scan_entry_files(&dir.path().join("nowhere")).unwrap().is_empty());
    }

    #[test]
    fn plan_separates_stale_and_surviving_files() {
        let existing = vec![
            ExistingEntry {
                fq_name: "game.Player".into(),
                path: PathBuf::from("godot/game/PlayerEntry.kt"),
            },
            ExistingEntry {
                fq_name: "game.Removed".into(),
                path: PathBuf::from("godot/game/RemovedEntry.kt"),
            },
            ExistingEntry {
                fq_name: "game.Boss".into(),
                path: PathBuf::from("godot/game/BossEntry.kt"),
            },
        ];
        let sources: Vec<QualifiedName> = vec!["game.Player".into(), "game.Boss".into()];
        let regenerated: Vec<QualifiedName> = vec!["game.Player".into()];

        let plan = plan_entries(existing, &sources, &regenerated);
        assert_eq!(plan.stale.len(), 1);
        assert!(plan.stale[0].fq_name.is("game.Removed"));
        assert_eq!(plan.survivors, vec![QualifiedName::from("game.Boss")]);
    }

    #[test]
    fn main_entry_contents() {
        let registrars: Vec<QualifiedName> = vec!["game.boss.Boss".into(), "game.Player".into()];
        let file = main_entry_file(&registrars, &["src/main/kotlin".to_string()]).unwrap();
        assert_eq!(file.relative_path(), PathBuf::from("godot/Entry.kt"));

        let expected = "\
// THIS FILE IS GENERATED! DO NOT EDIT IT MANUALLY! ALL CHANGES TO IT WILL BE OVERWRITTEN ON EACH BUILD

package godot

import godot.game.PlayerRegistrar
import godot.game.boss.BossRegistrar

class Entry : godot.runtime.Entry() {
  override fun godot.runtime.Entry.Context.init() {
    with(registry) {
      PlayerRegistrar().register(registry)
      BossRegistrar().register(registry)
    }
  }

  override fun godot.runtime.Entry.Context.initEngineTypes() {
    registerVariantMapping()
    registerEngineTypes()
    registerEngineTypeMethods()
  }

  override fun provideSrcDirs(): List<String> {
    return listOf<String>(\"src/main/kotlin\")
  }
}
";
        assert_eq!(file.render().unwrap(), expected);
    }

    #[test]
    fn service_file_names_the_entry() {
        let dir = tempfile::tempdir().unwrap();
        let path = service_file().write_to(dir.path()).unwrap();
        assert_eq!(
            path,
            dir.path().join("src/main/resources/META-INF/services/godot.runtime.Entry")
        );
        assert_eq!(fs::read_to_string(path).unwrap(), "godot.Entry");
    }
}

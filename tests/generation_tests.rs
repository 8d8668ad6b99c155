//! End-to-end generation passes over temporary output directories.

use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

use godot_entry::core::types::{INT, STRING};
use godot_entry::prelude::*;
use tempfile::TempDir;
use walkdir::WalkDir;

/// One generation setup: a fixture or built graph plus scratch directories.
struct Harness {
    out: TempDir,
    project: TempDir,
}

impl Harness {
    fn new() -> Self {
        Self {
            out: tempfile::tempdir().unwrap(),
            project: tempfile::tempdir().unwrap(),
        }
    }

    fn generator(&self) -> EntryGenerator {
        EntryGenerator::new(
            GeneratorConfig::new(self.out.path())
                .with_project_root(self.project.path())
                .with_src_dir("src/main/kotlin"),
        )
    }

    fn fixture(name: &str) -> DeclarationGraph {
        let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
            .join("tests/fixtures")
            .join(name);
        let text = fs::read_to_string(&path)
            .unwrap_or_else(|e| panic!("Failed to read {}: {}", path.display(), e));
        serde_json::from_str(&text)
            .unwrap_or_else(|e| panic!("Failed to parse {}: {}", path.display(), e))
    }

    fn read(&self, relative: &str) -> String {
        fs::read_to_string(self.out.path().join(relative)).unwrap()
    }

    /// Every file under the output directory, keyed by relative path.
    fn snapshot(&self) -> BTreeMap<PathBuf, String> {
        let root = self.out.path();
        WalkDir::new(root)
            .into_iter()
            .map(|entry| entry.unwrap())
            .filter(|entry| entry.file_type().is_file())
            .map(|entry| {
                let relative = entry.path().strip_prefix(root).unwrap().to_path_buf();
                (relative, fs::read_to_string(entry.path()).unwrap())
            })
            .collect()
    }
}

fn engine_types(graph: DeclarationGraph) -> DeclarationGraph {
    graph
        .with_dependency(ClassDeclaration::compiled("godot.Object").engine_base_type())
        .with_dependency(
            ClassDeclaration::compiled("godot.Node")
                .with_super_class("godot.Object")
                .engine_base_type(),
        )
}

fn node(fq_name: &str) -> ClassDeclaration {
    ClassDeclaration::new(fq_name)
        .with_super_class("godot.Node")
        .with_constructor(ConstructorDeclaration::empty())
}

// ============================================================================
// Full pass
// ============================================================================

#[test]
fn fixture_pass_writes_every_file() {
    let harness = Harness::new();
    let report = harness
        .generator()
        .generate(&Harness::fixture("game.json"))
        .unwrap();

    assert_eq!(report.classes, 2);
    assert_eq!(report.surviving, 0);
    assert!(report.deleted.is_empty());

    let files: Vec<PathBuf> = harness.snapshot().into_keys().collect();
    assert_eq!(
        files,
        vec![
            PathBuf::from("godot/Entry.kt"),
            PathBuf::from("godot/game/BossEntry.kt"),
            PathBuf::from("godot/game/PlayerEntry.kt"),
        ]
    );

    let service = harness
        .project
        .path()
        .join("src/main/resources/META-INF/services/godot.runtime.Entry");
    assert_eq!(fs::read_to_string(service).unwrap(), "godot.Entry");
}

#[test]
fn player_health_is_a_plain_long_property() {
    let harness = Harness::new();
    harness
        .generator()
        .generate(&Harness::fixture("game.json"))
        .unwrap();

    let player = harness.read("godot/game/PlayerEntry.kt");
    assert!(player.contains(
        "property(Player::health, ::getVariantType, { any: Any -> (any as Long).toInt() }, \
         LONG, \"kotlin.Int\", GODOT_PROPERTY_HINT_NONE, \"\", 100, true, DISABLED)"
    ));
    assert!(player.contains("open class PlayerRegistrar : ClassRegistrar {"));
}

#[test]
fn boss_inherits_player_members() {
    let harness = Harness::new();
    harness
        .generator()
        .generate(&Harness::fixture("game.json"))
        .unwrap();

    let expected = "\
// THIS FILE IS GENERATED! DO NOT EDIT IT MANUALLY! ALL CHANGES TO IT WILL BE OVERWRITTEN ON EACH BUILD

package godot.game

import game.Boss
import game.Element
import game.Player
import godot.MultiplayerAPI.RPCMode.DISABLED
import godot.MultiplayerAPI.RPCMode.REMOTE
import godot.core.EnumArray
import godot.core.KtConstructor0
import godot.core.VariantType.LONG
import godot.core.VariantType.NIL
import godot.core.getVariantType
import godot.gdnative.godot_property_hint.GODOT_PROPERTY_HINT_NONE
import godot.runtime.ClassRegistry
import godot.runtime.KtFunctionArgument

open class BossRegistrar : PlayerRegistrar() {
  override fun register(registry: ClassRegistry) {
    with(registry) {
      registerClass<Boss>(Boss::class.qualifiedName!!, \"game.Player\", false, \"Node\", \"game_Boss\") {
        constructor(KtConstructor0(::Boss))
        function(Player::hit, NIL, LONG, KtFunctionArgument(LONG, \"kotlin.Int\", \"amount\"), KtFunctionArgument(NIL, \"kotlin.Unit\"), REMOTE)
        signal(Player::signalHit, KtFunctionArgument(LONG, \"Int\", \"damage\"))
        property(Player::health, ::getVariantType, { any: Any -> (any as Long).toInt() }, LONG, \"kotlin.Int\", GODOT_PROPERTY_HINT_NONE, \"\", 100, true, DISABLED)
        enumListProperty(Player::elements, EnumArray() { Element.values()[it] }, true, DISABLED)
      }
    }
  }
}
";
    assert_eq!(harness.read("godot/game/BossEntry.kt"), expected);
}

#[test]
fn main_entry_calls_registrars_in_name_order() {
    let harness = Harness::new();
    harness
        .generator()
        .generate(&Harness::fixture("game.json"))
        .unwrap();

    let entry = harness.read("godot/Entry.kt");
    let boss = entry.find("BossRegistrar().register(registry)").unwrap();
    let player = entry.find("PlayerRegistrar().register(registry)").unwrap();
    assert!(boss < player);
    assert!(entry.contains("class Entry : godot.runtime.Entry() {"));
    assert!(entry.contains("return listOf<String>(\"src/main/kotlin\")"));
}

#[test]
fn rerun_is_byte_identical() {
    let harness = Harness::new();
    let graph = Harness::fixture("game.json");

    harness.generator().generate(&graph).unwrap();
    let first = harness.snapshot();
    let report = harness.generator().generate(&graph).unwrap();
    let second = harness.snapshot();

    assert_eq!(first, second);
    assert!(report.deleted.is_empty());
    assert_eq!(report.surviving, 0);
}

#[test]
fn unregistered_parent_members_flatten_into_the_child() {
    let harness = Harness::new();
    let base = node("game.Base").with_property(
        PropertyDeclaration::new("game.Base", "health", KotlinType::simple(INT))
            .registered()
            .with_initializer(Expr::int(100)),
    );
    let boss = ClassDeclaration::new("game.Boss")
        .with_super_class("game.Base")
        .registered()
        .with_constructor(ConstructorDeclaration::empty());
    let graph = engine_types(DeclarationGraph::new().with_class(base).with_class(boss));

    let report = harness.generator().generate(&graph).unwrap();
    assert_eq!(report.classes, 1);

    let files: Vec<PathBuf> = harness.snapshot().into_keys().collect();
    assert_eq!(
        files,
        vec![
            PathBuf::from("godot/Entry.kt"),
            PathBuf::from("godot/game/BossEntry.kt"),
        ]
    );
    let boss = harness.read("godot/game/BossEntry.kt");
    assert!(boss.contains("open class BossRegistrar : ClassRegistrar {"));
    assert!(!boss.contains("BaseRegistrar"));
    assert!(boss.contains("property(Base::health,"));
}

// ============================================================================
// Failing passes write nothing
// ============================================================================

#[test]
fn duplicate_registered_names_fail_before_writing() {
    let harness = Harness::new();
    let graph = engine_types(
        DeclarationGraph::new()
            .with_class(node("ui.Foo").registered_as("Foo"))
            .with_class(node("game.Foo").registered_as("Foo")),
    );

    let err = harness.generator().generate(&graph).unwrap_err();
    assert_eq!(
        err.to_string(),
        "There are classes registered with the same name. Check your className argument for the annotation @RegisterClass:\n\
         RegisteredName: Foo, ActualClass: game.Foo\n\
         RegisteredName: Foo, ActualClass: ui.Foo\n"
    );
    assert!(harness.snapshot().is_empty());
}

#[test]
fn bad_signal_name_fails_before_writing() {
    let harness = Harness::new();
    let signal = PropertyDeclaration::new(
        "game.Player",
        "onHit",
        KotlinType::simple("godot.signals.Signal0"),
    )
    .val()
    .registered_signal()
    .with_delegate(Expr::call("godot.signals.signal", CallKind::Function, vec![]));
    let graph = engine_types(
        DeclarationGraph::new().with_class(node("game.Player").registered().with_property(signal)),
    );

    let err = harness.generator().generate(&graph).unwrap_err();
    assert!(matches!(
        err,
        GenerationError::Declaration(DeclarationError::InvalidSignalName { .. })
    ));
    assert!(harness.snapshot().is_empty());
}

#[test]
fn constructor_over_five_parameters_fails() {
    let harness = Harness::new();
    let constructor = (0..6).fold(ConstructorDeclaration::empty(), |c, i| {
        c.with_parameter(format!("p{i}"), KotlinType::simple(INT))
    });
    let graph = engine_types(
        DeclarationGraph::new()
            .with_class(node("game.Player").registered().with_constructor(constructor)),
    );

    let err = harness.generator().generate(&graph).unwrap_err();
    assert!(matches!(
        err,
        GenerationError::Declaration(DeclarationError::ConstructorArity { count: 6, .. })
    ));
    assert!(err.is_user_error());
    assert!(harness.snapshot().is_empty());
}

#[test]
fn unmappable_type_names_the_type() {
    let harness = Harness::new();
    let load = FunctionDeclaration::new("game.Player", "load")
        .with_parameter("path", KotlinType::simple("java.io.File"))
        .registered();
    let graph = engine_types(
        DeclarationGraph::new().with_class(node("game.Player").registered().with_function(load)),
    );

    let err = harness.generator().generate(&graph).unwrap_err();
    assert_eq!(err.to_string(), "Type java.io.File cannot be handled by godot");
    assert!(harness.snapshot().is_empty());
}

// ============================================================================
// Incremental passes
// ============================================================================

#[test]
fn stale_registrars_are_deleted() {
    let harness = Harness::new();
    let stale = harness.out.path().join("godot/game/GoneEntry.kt");
    fs::create_dir_all(stale.parent().unwrap()).unwrap();
    fs::write(&stale, "open class GoneRegistrar").unwrap();

    let report = harness
        .generator()
        .generate(&Harness::fixture("game.json"))
        .unwrap();

    assert_eq!(report.deleted, vec![stale.clone()]);
    assert!(!stale.exists());
    assert!(!harness.read("godot/Entry.kt").contains("GoneRegistrar"));
}

#[test]
fn registrars_of_unchanged_classes_survive() {
    let harness = Harness::new();
    let kept = harness.out.path().join("godot/game/KeptEntry.kt");
    fs::create_dir_all(kept.parent().unwrap()).unwrap();
    fs::write(&kept, "open class KeptRegistrar").unwrap();

    let graph = engine_types(
        DeclarationGraph::new()
            .with_class(node("game.Player").registered())
            .with_source_class("game.Player")
            .with_source_class("game.Kept"),
    );
    let report = harness.generator().generate(&graph).unwrap();

    assert_eq!(report.classes, 1);
    assert_eq!(report.surviving, 1);
    assert_eq!(harness.read("godot/game/KeptEntry.kt"), "open class KeptRegistrar");
    let entry = harness.read("godot/Entry.kt");
    assert!(entry.contains("KeptRegistrar().register(registry)"));
    assert!(entry.contains("PlayerRegistrar().register(registry)"));
}

#[test]
fn new_class_cannot_take_a_surviving_class_name() {
    let harness = Harness::new();
    let kept = harness.out.path().join("godot/game/KeptEntry.kt");
    fs::create_dir_all(kept.parent().unwrap()).unwrap();
    fs::write(&kept, "open class KeptRegistrar").unwrap();

    let graph = engine_types(
        DeclarationGraph::new()
            .with_dependency(
                ClassDeclaration::compiled("game.Kept")
                    .with_super_class("godot.Node")
                    .registered_as("Shared"),
            )
            .with_class(node("game.Player").registered_as("Shared"))
            .with_source_class("game.Player")
            .with_source_class("game.Kept"),
    );

    let err = harness.generator().generate(&graph).unwrap_err();
    assert_eq!(
        err.to_string(),
        "There are classes registered with the same name. Check your className argument for the annotation @RegisterClass:\n\
         RegisteredName: Shared, ActualClass: game.Kept\n\
         RegisteredName: Shared, ActualClass: game.Player\n"
    );
    let files: Vec<PathBuf> = harness.snapshot().into_keys().collect();
    assert_eq!(files, vec![PathBuf::from("godot/game/KeptEntry.kt")]);
}

#[test]
fn unregistered_class_alone_generates_no_registrar() {
    let harness = Harness::new();
    let graph = engine_types(
        DeclarationGraph::new().with_class(node("game.Helper").with_property(
            PropertyDeclaration::new("game.Helper", "label", KotlinType::simple(STRING))
                .registered()
                .with_initializer(Expr::string("x")),
        )),
    );

    let report = harness.generator().generate(&graph).unwrap();
    assert_eq!(report.classes, 0);
    let files: Vec<PathBuf> = harness.snapshot().into_keys().collect();
    assert_eq!(files, vec![PathBuf::from("godot/Entry.kt")]);
}

//! Class registration.
//!
//! One registered class becomes one `<Simple>Entry.kt` file holding an open
//! `<Simple>Registrar` class. Its `register` function declares the class,
//! its constructors and every flattened member:
//!
//! ```kotlin
//! open class PlayerRegistrar : ClassRegistrar {
//!   override fun register(registry: ClassRegistry) {
//!     with(registry) {
//!       registerClass<Player>(Player::class.qualifiedName!!, "godot.Node", false, "Node", "game_Player") {
//!         constructor(KtConstructor0(::Player))
//!         function(...)
//!         signal(...)
//!         property(...)
//!       }
//!     }
//!   }
//! }
//! ```

use godot_entry_codegen::{ClassName, CodeArg, FileSpec, FunSpec, Modifiers, TypeSpec};
use godot_entry_core::types::ANY;
use godot_entry_core::{
    BindingContext, ClassDeclaration, ConstructorDeclaration, DeclarationError, GenerationError,
    QualifiedName,
};
use tracing::debug;

use crate::function::register_function;
use crate::hierarchy::{ClassWithMembers, flatten};
use crate::property::register_property;
use crate::runtime::{
    self, ENTRY_FILE_SUFFIX, GENERATED_COMMENT, GENERATED_ROOT_PACKAGE, REGISTRAR_SUFFIX,
};
use crate::sanity::{RegisteredClassNames, check_constructors};
use crate::signal::register_signal;
use crate::variant::VariantType;

/// The generated registrar file of one class.
#[derive(Debug, Clone)]
pub struct ClassRegistration {
    pub fq_name: QualifiedName,
    pub registered_name: String,
    pub registrar: ClassName,
    pub file: FileSpec,
}

/// Package of the generated code for a class (`game.Player` -> `godot.game`).
pub fn generated_package(fq_name: &QualifiedName) -> String {
    let package = fq_name.package_string();
    if package.is_empty() {
        GENERATED_ROOT_PACKAGE.to_string()
    } else {
        format!("{GENERATED_ROOT_PACKAGE}.{package}")
    }
}

/// `godot.game.PlayerRegistrar` for `game.Player`.
pub fn registrar_name(fq_name: &QualifiedName) -> ClassName {
    ClassName::new(
        generated_package(fq_name),
        format!("{}{REGISTRAR_SUFFIX}", fq_name.short_name()),
    )
}

/// `PlayerEntry` for `game.Player`.
pub fn entry_file_name(fq_name: &QualifiedName) -> String {
    format!("{}{ENTRY_FILE_SUFFIX}", fq_name.short_name())
}

/// Build the registrar file of one registered class.
///
/// The class's registered name is recorded in `names`; duplicates are
/// reported once all classes are generated.
#[cfg_attr(feature = "profiling", profiling::function)]
pub fn generate_class<'a>(
    class: &'a ClassDeclaration,
    ctx: &BindingContext<'a>,
    names: &mut RegisteredClassNames,
) -> Result<ClassRegistration, GenerationError> {
    let Some(engine_base) = ctx.engine_base_class(class) else {
        return Err(DeclarationError::MissingEngineBaseClass {
            class: class.fq_name.clone(),
        }
        .into());
    };
    check_constructors(class)?;

    let members = flatten(&ClassWithMembers::collect(class), ctx)?;
    let registered_name = class.registered_name();
    names.record(class.fq_name.clone(), registered_name.clone());

    let class_name = ClassName::from_qualified(&class.fq_name);
    let super_class = class
        .super_class
        .as_ref()
        .map(ToString::to_string)
        .unwrap_or_else(|| ANY.to_string());

    let mut register = FunSpec::builder("register")
        .with_modifiers(Modifiers::OVERRIDE)
        .with_parameter("registry", runtime::class_registry());
    register.begin_control_flow("with(registry)", vec![])?;
    register.begin_control_flow(
        "registerClass<%T>(%T::class.qualifiedName!!, %S, %L, %S, %S)",
        vec![
            class_name.clone().into(),
            class_name.clone().into(),
            CodeArg::string(super_class),
            CodeArg::literal(class.is_tool()),
            CodeArg::string(engine_base.simple_name()),
            CodeArg::string(&registered_name),
        ],
    )?;

    for constructor in &class.constructors {
        register_constructor(&mut register, &class_name, constructor)?;
    }
    for function in &members.functions {
        register.add_code(register_function(function)?);
    }
    for signal in &members.signals {
        register.add_code(register_signal(signal)?);
    }
    for property in &members.properties {
        register.add_code(register_property(property)?);
    }

    register.end_control_flow()?;
    register.end_control_flow()?;

    let registrar = registrar_name(&class.fq_name);
    let mut registrar_type = TypeSpec::class_builder(registrar.simple_name())
        .with_modifiers(Modifiers::OPEN)
        .with_function(register);
    registrar_type = match ctx.registered_super_class(class) {
        Some(parent) => registrar_type.with_superclass(registrar_name(&parent.fq_name)),
        None => registrar_type.with_superinterface(runtime::class_registrar()),
    };

    let file = FileSpec::builder(generated_package(&class.fq_name), entry_file_name(&class.fq_name))
        .with_comment(GENERATED_COMMENT)
        .with_type(registrar_type);

    debug!(
        target: "pipeline",
        class = %class.fq_name,
        registered_name = %registered_name,
        functions = members.functions.len(),
        signals = members.signals.len(),
        properties = members.properties.len(),
        "generated registrar"
    );

    Ok(ClassRegistration {
        fq_name: class.fq_name.clone(),
        registered_name,
        registrar,
        file,
    })
}

/// `constructor(KtConstructorN(::Class, VariantType.X, ...))`
fn register_constructor(
    register: &mut FunSpec,
    class_name: &ClassName,
    constructor: &ConstructorDeclaration,
) -> Result<(), GenerationError> {
    let mut format = String::from("constructor(%T(::%T");
    let mut args: Vec<CodeArg> = vec![
        runtime::kt_constructor(constructor.parameters.len()).into(),
        class_name.clone().into(),
    ];
    for parameter in &constructor.parameters {
        format.push_str(", %T");
        args.push(VariantType::of(&parameter.ty)?.into());
    }
    format.push_str("))");
    register.add_statement(&format, args)?;
    Ok(())
}

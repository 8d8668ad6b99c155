//! `godot-entry`: run the Godot Kotlin entry generator on a declaration graph.
//!
//! The compiler front-end writes the resolved declarations as JSON; this
//! binary reads them and runs one generation pass.

mod logging;

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use godot_entry_compiler::{EntryGenerator, GdnsConfig, GeneratorConfig, GenerationReport};
use godot_entry_core::{DeclarationGraph, QualifiedName};

use crate::logging::{LogFormat, LogLevel, LogOptions, init_logging};

#[derive(Debug, Parser)]
#[command(name = "godot-entry")]
#[command(about = "Generate Godot Kotlin registration entry files", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Log verbosity (overrides GODOT_ENTRY_LOG_LEVEL)
    #[arg(long, global = true, value_enum)]
    log_level: Option<LogLevel>,

    /// Log output format (overrides GODOT_ENTRY_LOG_FORMAT)
    #[arg(long, global = true, value_enum)]
    log_format: Option<LogFormat>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Generate registrars, the main entry and the service file
    Generate {
        /// Declaration graph written by the compiler front-end (JSON)
        input: PathBuf,
        #[command(flatten)]
        output: OutputArgs,
    },

    /// Rebuild the main entry from registrars already on disk
    Refresh {
        /// Fully qualified name of a class still in the source set
        #[arg(long = "class", value_name = "FQ_NAME")]
        classes: Vec<String>,
        #[command(flatten)]
        output: OutputArgs,
    },
}

#[derive(Debug, Default, Args)]
struct OutputArgs {
    /// Generator configuration file (JSON); flags override its values
    #[arg(long)]
    config: Option<PathBuf>,

    /// Directory for generated Kotlin sources
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Project root; the service file is written below it
    #[arg(long)]
    project_root: Option<PathBuf>,

    /// Source directory reported by Entry.provideSrcDirs (repeatable)
    #[arg(long = "src-dir", value_name = "DIR")]
    src_dirs: Vec<String>,

    /// Resource path of the .gdnlib library; enables .gdns generation
    #[arg(long, requires = "gdns_dir")]
    gdnlib: Option<String>,

    /// Directory for generated .gdns resources
    #[arg(long, requires = "gdnlib")]
    gdns_dir: Option<PathBuf>,

    /// Delete existing .gdns files before writing new ones
    #[arg(long)]
    clean_gdns: bool,
}

impl OutputArgs {
    fn resolve(&self) -> Result<GeneratorConfig> {
        let mut config = match (&self.config, &self.output) {
            (Some(path), _) => read_config(path)?,
            (None, Some(output)) => GeneratorConfig::new(output),
            (None, None) => anyhow::bail!("either --output or --config is required"),
        };

        if let Some(output) = &self.output {
            config.output_dir = output.clone();
        }
        if let Some(root) = &self.project_root {
            config.project_root = Some(root.clone());
        }
        config.src_dirs.extend(self.src_dirs.iter().cloned());

        if let (Some(gdnlib), Some(dir)) = (&self.gdnlib, &self.gdns_dir) {
            config.gdns = Some(GdnsConfig::new(gdnlib, dir).with_clean(self.clean_gdns));
        } else if self.clean_gdns
            && let Some(gdns) = config.gdns.as_mut()
        {
            gdns.clean = true;
        }
        Ok(config)
    }
}

fn read_config(path: &Path) -> Result<GeneratorConfig> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("invalid config {}", path.display()))
}

fn read_graph(path: &Path) -> Result<DeclarationGraph> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read declarations {}", path.display()))?;
    serde_json::from_str(&text)
        .with_context(|| format!("invalid declaration graph {}", path.display()))
}

fn run(command: Command) -> Result<GenerationReport> {
    match command {
        Command::Generate { input, output } => {
            let config = output.resolve()?;
            let graph = read_graph(&input)?;
            let report = EntryGenerator::new(config).generate(&graph)?;
            Ok(report)
        }
        Command::Refresh { classes, output } => {
            let config = output.resolve()?;
            let classes: Vec<QualifiedName> =
                classes.into_iter().map(QualifiedName::from).collect();
            let report = EntryGenerator::new(config).refresh_main_entry(&classes)?;
            Ok(report)
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let options = LogOptions::from_env().with_overrides(cli.log_format, cli.log_level);
    init_logging(&options);

    match run(cli.command) {
        Ok(report) => {
            println!(
                "{} registrar(s) generated, {} kept, {} file(s) written, {} deleted",
                report.classes,
                report.surviving,
                report.written.len(),
                report.deleted.len()
            );
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

//! The generation pass driver.
//!
//! A pass has two phases. Everything is generated and validated in memory
//! first; files are touched only once the whole pass has succeeded:
//!
//! ```text
//! DeclarationGraph
//!   → generate_class (per registered class, fq name order)
//!   → scan output dir → plan stale / surviving registrars
//!   → RegisteredClassNames::validate (regenerated and surviving classes)
//!   → main Entry.kt
//!   ───────────── nothing written before this line ─────────────
//!   → delete stale registrars → write files → service file → .gdns
//! ```

use std::fs;
use std::path::PathBuf;

use godot_entry_codegen::RenderedFile;
use godot_entry_core::{BindingContext, DeclarationGraph, GenerationError, QualifiedName};
use tracing::{debug, info, warn};

use crate::class::generate_class;
use crate::config::GeneratorConfig;
use crate::entry::{EntryPlan, main_entry_file, plan_entries, scan_entry_files, service_file};
use crate::gdns::{clean_gdns_files, gdns_file};
use crate::sanity::RegisteredClassNames;

/// Files touched by a pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerationReport {
    /// Registrars generated in this pass.
    pub classes: usize,
    /// Registrars kept from earlier passes.
    pub surviving: usize,
    pub written: Vec<PathBuf>,
    pub deleted: Vec<PathBuf>,
}

/// Runs generation passes for one configuration.
#[derive(Debug, Clone)]
pub struct EntryGenerator {
    config: GeneratorConfig,
}

impl EntryGenerator {
    pub fn new(config: GeneratorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Run one full pass over `graph`.
    ///
    /// Any error aborts the pass. Errors raised while generating leave the
    /// output directory untouched.
    #[cfg_attr(feature = "profiling", profiling::function)]
    pub fn generate(&self, graph: &DeclarationGraph) -> Result<GenerationReport, GenerationError> {
        info!(
            target: "pipeline",
            classes = graph.classes.len(),
            dependencies = graph.dependencies.len(),
            output = %self.config.output_dir.display(),
            "starting generation pass"
        );

        let ctx = BindingContext::new(graph);
        for class in graph
            .classes
            .iter()
            .filter(|c| !c.is_registered() && c.has_annotated_members())
        {
            warn!(
                target: "pipeline",
                class = %class.fq_name,
                "class is not registered; its annotated members are only registered through registered subclasses"
            );
        }

        let registered = graph.registered_classes();
        let mut names = RegisteredClassNames::new();
        let mut files = Vec::with_capacity(registered.len() + 1);
        let mut regenerated = Vec::with_capacity(registered.len());
        for &class in &registered {
            let registration = generate_class(class, &ctx, &mut names)?;
            files.push(registration.file.to_rendered()?);
            regenerated.push(registration.fq_name);
        }

        let plan = self.plan(&graph.source_class_names(), &regenerated)?;
        for survivor in &plan.survivors {
            if let Some(class) = ctx.class(survivor)
                && class.is_registered()
            {
                names.record(survivor.clone(), class.registered_name());
            }
        }
        names.validate()?;

        files.push(self.main_entry(&regenerated, &plan)?);

        let gdns_files: Vec<RenderedFile> = match &self.config.gdns {
            Some(gdns) => registered
                .iter()
                .map(|&class| gdns_file(class, &gdns.gdnlib_path))
                .collect(),
            None => Vec::new(),
        };

        let mut report = GenerationReport {
            classes: regenerated.len(),
            surviving: plan.survivors.len(),
            ..GenerationReport::default()
        };
        self.delete_stale(&plan, &mut report)?;
        for file in &files {
            report.written.push(file.write_to(&self.config.output_dir)?);
        }
        self.write_service_file(&mut report)?;

        if let Some(gdns) = &self.config.gdns {
            if gdns.clean {
                report.deleted.extend(clean_gdns_files(&gdns.output_dir)?);
            }
            for file in &gdns_files {
                report.written.push(file.write_to(&gdns.output_dir)?);
            }
        }

        info!(
            target: "pipeline",
            classes = report.classes,
            surviving = report.surviving,
            written = report.written.len(),
            deleted = report.deleted.len(),
            "generation pass finished"
        );
        Ok(report)
    }

    /// Rebuild only the main entry from the registrars already on disk.
    ///
    /// Registrars of classes missing from `source_classes` are deleted
    /// first. Used when no class needed regenerating.
    pub fn refresh_main_entry(
        &self,
        source_classes: &[QualifiedName],
    ) -> Result<GenerationReport, GenerationError> {
        info!(
            target: "pipeline",
            sources = source_classes.len(),
            output = %self.config.output_dir.display(),
            "refreshing main entry"
        );

        let plan = self.plan(source_classes, &[])?;
        let entry = self.main_entry(&[], &plan)?;

        let mut report = GenerationReport {
            surviving: plan.survivors.len(),
            ..GenerationReport::default()
        };
        self.delete_stale(&plan, &mut report)?;
        report.written.push(entry.write_to(&self.config.output_dir)?);
        Ok(report)
    }

    fn plan(
        &self,
        source_classes: &[QualifiedName],
        regenerated: &[QualifiedName],
    ) -> Result<EntryPlan, GenerationError> {
        let existing = scan_entry_files(&self.config.output_dir)?;
        let plan = plan_entries(existing, source_classes, regenerated);
        debug!(
            target: "pipeline",
            stale = plan.stale.len(),
            surviving = plan.survivors.len(),
            "planned existing registrars"
        );
        Ok(plan)
    }

    fn main_entry(
        &self,
        regenerated: &[QualifiedName],
        plan: &EntryPlan,
    ) -> Result<RenderedFile, GenerationError> {
        let registrars: Vec<QualifiedName> = regenerated
            .iter()
            .chain(&plan.survivors)
            .cloned()
            .collect();
        Ok(main_entry_file(&registrars, &self.config.src_dirs)?.to_rendered()?)
    }

    fn delete_stale(
        &self,
        plan: &EntryPlan,
        report: &mut GenerationReport,
    ) -> Result<(), GenerationError> {
        for stale in &plan.stale {
            fs::remove_file(&stale.path).map_err(|e| GenerationError::io(&stale.path, e))?;
            warn!(
                target: "pipeline",
                class = %stale.fq_name,
                path = %stale.path.display(),
                "deleted registrar of a class that no longer exists"
            );
            report.deleted.push(stale.path.clone());
        }
        Ok(())
    }

    fn write_service_file(&self, report: &mut GenerationReport) -> Result<(), GenerationError> {
        match &self.config.project_root {
            Some(root) => report.written.push(service_file().write_to(root)?),
            None => debug!(target: "pipeline", "no project root configured; skipping service file"),
        }
        Ok(())
    }
}

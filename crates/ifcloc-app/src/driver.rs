use anyhow::{Context, Result};
use ifcloc_crowdin::{Paginator, Platform};
use ifcloc_types::SourceFile;

use crate::export;
use crate::pipeline::{FileReport, Pipeline, RunMode};

/// Scope of one run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    /// A single file, matched by exact name
    File(String),
    /// Every file of the project, in listing order
    Project,
}

#[derive(Debug, Default)]
pub struct RunSummary {
    pub files: Vec<FileReport>,
}

impl RunSummary {
    pub fn handled(&self) -> usize {
        self.files.iter().map(|f| f.handled).sum()
    }

    pub fn flagged(&self) -> usize {
        self.files.iter().map(|f| f.flagged).sum()
    }

    pub fn failed(&self) -> usize {
        self.files.iter().map(|f| f.failed).sum()
    }
}

/// Look a file up by exact name, stopping at the first match
pub async fn find_file(platform: &dyn Platform, name: &str) -> Result<SourceFile> {
    let mut files = Paginator::new(platform.page_size(), |page| platform.list_files(page));

    while let Some(file) = files.next().await.context("Failed to list project files")? {
        if file.name == name {
            return Ok(file);
        }
    }

    anyhow::bail!("File not found: {name}")
}

pub async fn run(pipeline: &Pipeline<'_>, target: &Target) -> Result<RunSummary> {
    let platform = pipeline.platform();
    let options = pipeline.options();
    let ai = if options.mode.uses_model() { "on" } else { "off" };
    let mut summary = RunSummary::default();

    match target {
        Target::File(name) => {
            let file = find_file(platform, name).await?;
            tracing::info!(
                "Targeting file: {} (id={}), max={}, AI={}",
                file.name,
                file.id,
                options.limit,
                ai
            );

            let report = pipeline.process_file(&file).await?;
            finish_file(pipeline, report, &mut summary)?;
        }
        Target::Project => {
            tracing::info!(
                "Targeting entire project (max={} per file), AI={}",
                options.limit,
                ai
            );

            let mut files = Paginator::new(platform.page_size(), |page| platform.list_files(page));
            while let Some(file) = files.next().await.context("Failed to list project files")? {
                let report = pipeline.process_file(&file).await?;
                finish_file(pipeline, report, &mut summary)?;
            }
        }
    }

    println!("Summary");
    println!("Submitted (or listed): {}", summary.handled());
    if summary.flagged() > 0 {
        println!("Flagged (missing protected tokens): {}", summary.flagged());
    }
    if summary.failed() > 0 {
        println!("Failed uploads: {}", summary.failed());
    }

    Ok(summary)
}

fn finish_file(pipeline: &Pipeline<'_>, report: FileReport, summary: &mut RunSummary) -> Result<()> {
    let options = pipeline.options();
    if let RunMode::ExportPo { dir } = &options.mode {
        export::write_po(dir, &report.file_name, &options.target_lang, &report.exported)?;
    }

    summary.files.push(report);
    Ok(())
}

use std::path::PathBuf;

use anyhow::{Context, Result};
use ifcloc_crowdin::{Paginator, Platform, UploadOutcome};
use ifcloc_types::{SourceFile, SourceString};
use ifcloc_translator::{CheckedTranslation, TokenSafeTranslator};

use crate::export::PoEntry;

/// What happens to each untranslated string
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunMode {
    /// Only list candidates; no model calls, no uploads
    DryRun,
    /// Translate and submit as unapproved suggestions
    Upload,
    /// Translate into a local PO file per source file
    ExportPo { dir: PathBuf },
}

impl RunMode {
    pub fn uses_model(&self) -> bool {
        !matches!(self, RunMode::DryRun)
    }
}

#[derive(Debug, Clone)]
pub struct RunOptions {
    /// Strings handled per file before moving on
    pub limit: usize,
    pub mode: RunMode,
    /// Drop translations that still miss protected tokens
    pub strict_tokens: bool,
    pub target_lang: String,
}

/// Counters for one processed file
#[derive(Debug, Default, Clone)]
pub struct FileReport {
    pub file_name: String,
    /// Listed (dry run), submitted, or exported
    pub handled: usize,
    pub skipped_existing: usize,
    pub skipped_plural: usize,
    /// Export only: source text already collected for this file
    pub skipped_duplicate: usize,
    pub already_exists: usize,
    pub failed: usize,
    /// Translations that lost protected tokens
    pub flagged: usize,
    pub exported: Vec<PoEntry>,
}

impl FileReport {
    fn new(file_name: &str) -> Self {
        Self {
            file_name: file_name.to_string(),
            ..Default::default()
        }
    }
}

pub struct Pipeline<'a> {
    platform: &'a dyn Platform,
    translator: Option<&'a TokenSafeTranslator>,
    options: RunOptions,
}

impl<'a> Pipeline<'a> {
    pub fn new(
        platform: &'a dyn Platform,
        translator: Option<&'a TokenSafeTranslator>,
        options: RunOptions,
    ) -> Self {
        Self {
            platform,
            translator,
            options,
        }
    }

    pub fn platform(&self) -> &'a dyn Platform {
        self.platform
    }

    pub fn options(&self) -> &RunOptions {
        &self.options
    }

    /// Walk the file's strings in listing order until `limit` strings are handled
    pub async fn process_file(&self, file: &SourceFile) -> Result<FileReport> {
        let translator = if self.options.mode.uses_model() {
            Some(
                self.translator
                    .context("A translator is required unless running with --dry-run")?,
            )
        } else {
            None
        };

        tracing::info!(
            "Processing {} (max={}, page_size={})",
            file.name,
            self.options.limit,
            self.platform.page_size()
        );

        let mut report = FileReport::new(&file.name);
        let mut strings = Paginator::new(self.platform.page_size(), |page| {
            self.platform.list_strings(file.id, page)
        });

        while report.handled < self.options.limit {
            let Some(string) = strings
                .next()
                .await
                .with_context(|| format!("Failed to list strings of {}", file.name))?
            else {
                break;
            };

            let translated = self
                .platform
                .has_translation(string.id)
                .await
                .with_context(|| format!("Failed to check translations of string {}", string.id))?;
            if translated {
                report.skipped_existing += 1;
                continue;
            }

            let Some(source) = string.text.as_plain() else {
                tracing::warn!("[{}:{}] plural string skipped", file.name, string.id);
                report.skipped_plural += 1;
                continue;
            };

            let Some(translator) = translator else {
                println!("[{}:{}] {}", file.name, string.id, source);
                report.handled += 1;
                continue;
            };

            if self.is_exported(&report, source) {
                tracing::debug!("[{}:{}] source text already exported", file.name, string.id);
                report.skipped_duplicate += 1;
                continue;
            }

            let checked = translator
                .translate(source)
                .await
                .with_context(|| format!("Failed to translate string {}", string.id))?;
            println!("[{}:{}] {} → {}", file.name, string.id, source, checked.text);

            if !checked.is_intact() {
                report.flagged += 1;
                tracing::warn!(
                    "[{}:{}] translation is missing protected tokens: {}",
                    file.name,
                    string.id,
                    checked.missing.join(", ")
                );
                if self.options.strict_tokens {
                    continue;
                }
            }

            self.submit(&mut report, &string, source, checked).await;
        }

        tracing::info!(
            "{}: {} translations submitted (or listed in dry-run)",
            file.name,
            report.handled
        );

        Ok(report)
    }

    /// A PO catalog holds each msgid once
    fn is_exported(&self, report: &FileReport, source: &str) -> bool {
        matches!(self.options.mode, RunMode::ExportPo { .. })
            && report.exported.iter().any(|entry| entry.source == source)
    }

    async fn submit(
        &self,
        report: &mut FileReport,
        string: &SourceString,
        source: &str,
        checked: CheckedTranslation,
    ) {
        if let RunMode::ExportPo { .. } = self.options.mode {
            report.exported.push(PoEntry {
                string_id: string.id,
                source: source.to_string(),
                translation: checked.text,
                fuzzy: !checked.missing.is_empty(),
            });
            report.handled += 1;
            return;
        }

        match self.platform.add_translation(string.id, &checked.text).await {
            Ok(UploadOutcome::Created) => {
                tracing::info!("added (unapproved) → {}", preview(&checked.text));
                report.handled += 1;
            }
            Ok(UploadOutcome::AlreadyExists) => {
                tracing::warn!("[{}] duplicate/exists, skipping", string.id);
                report.already_exists += 1;
            }
            Ok(UploadOutcome::Rejected(attempts)) => {
                let details = attempts
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join(" | ");
                tracing::error!("[{}] add failed: {}", string.id, details);
                report.failed += 1;
            }
            Err(e) => {
                tracing::error!("[{}] add failed: {:#}", string.id, e);
                report.failed += 1;
            }
        }
    }
}

fn preview(text: &str) -> String {
    const MAX_CHARS: usize = 80;
    if text.chars().count() <= MAX_CHARS {
        return text.to_string();
    }
    let cut: String = text.chars().take(MAX_CHARS).collect();
    format!("{cut}…")
}

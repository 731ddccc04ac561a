use std::path::PathBuf;

use clap::Parser;

use crate::driver::Target;
use crate::logging::LogFormat;
use crate::pipeline::{RunMode, RunOptions};

/// Extension of the source files this tool targets
pub const SOURCE_EXTENSION: &str = ".pot";

pub const DEFAULT_LIMIT: usize = 500;

/// Machine-translate untranslated Crowdin strings and submit them as suggestions
#[derive(Debug, Parser)]
#[command(name = "ifcloc", version)]
pub struct Cli {
    /// Only process this file (exact Crowdin name, e.g. IfcRailDomain.pot)
    #[arg(value_parser = parse_source_name)]
    pub file: Option<String>,

    /// Maximum strings handled per file
    #[arg(long, default_value_t = DEFAULT_LIMIT)]
    pub limit: usize,

    /// List untranslated strings without calling the model or uploading
    #[arg(long, conflicts_with = "export_po")]
    pub dry_run: bool,

    /// Write translations to <DIR>/<file>.<lang>.po instead of uploading
    #[arg(long, value_name = "DIR")]
    pub export_po: Option<PathBuf>,

    /// Skip translations that still lack protected [[...]] tokens
    #[arg(long)]
    pub strict_tokens: bool,

    #[arg(long, value_enum, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,
}

impl Cli {
    pub fn target(&self) -> Target {
        match &self.file {
            Some(name) => Target::File(name.clone()),
            None => Target::Project,
        }
    }

    pub fn mode(&self) -> RunMode {
        if self.dry_run {
            RunMode::DryRun
        } else if let Some(dir) = &self.export_po {
            RunMode::ExportPo { dir: dir.clone() }
        } else {
            RunMode::Upload
        }
    }

    pub fn run_options(&self, target_lang: &str) -> RunOptions {
        RunOptions {
            limit: self.limit,
            mode: self.mode(),
            strict_tokens: self.strict_tokens,
            target_lang: target_lang.to_string(),
        }
    }
}

fn parse_source_name(value: &str) -> Result<String, String> {
    if value.ends_with(SOURCE_EXTENSION) {
        Ok(value.to_string())
    } else {
        Err(format!("expected a file name ending in {SOURCE_EXTENSION}"))
    }
}

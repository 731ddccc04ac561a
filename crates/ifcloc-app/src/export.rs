//! Gettext PO output for `--export-po`.

use std::collections::HashSet;
use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoEntry {
    pub string_id: u64,
    pub source: String,
    pub translation: String,
    /// Written with `#, fuzzy` so a reviewer looks at it first
    pub fuzzy: bool,
}

/// `IfcKernel.pot` + `tr` -> `<dir>/IfcKernel.tr.po`
pub fn po_path(dir: &Path, file_name: &str, language: &str) -> PathBuf {
    let stem = Path::new(file_name)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(file_name);
    dir.join(format!("{stem}.{language}.po"))
}

/// Render a catalog. Entries repeating an earlier msgid are left out,
/// a PO file may hold each msgid once.
pub fn render_po(file_name: &str, language: &str, entries: &[PoEntry]) -> String {
    let mut out = String::new();
    out.push_str("msgid \"\"\nmsgstr \"\"\n");
    out.push_str("\"Content-Type: text/plain; charset=UTF-8\\n\"\n");
    out.push_str("\"Content-Transfer-Encoding: 8bit\\n\"\n");
    let _ = writeln!(out, "\"Language: {}\\n\"", escape(language));
    let _ = writeln!(out, "\"X-Source-File: {}\\n\"", escape(file_name));

    for entry in unique_entries(entries) {
        out.push('\n');
        let _ = writeln!(out, "#: crowdin:{}", entry.string_id);
        if entry.fuzzy {
            out.push_str("#, fuzzy\n");
        }
        let _ = writeln!(out, "msgid \"{}\"", escape(&entry.source));
        let _ = writeln!(out, "msgstr \"{}\"", escape(&entry.translation));
    }

    out
}

/// Entries in order, without those repeating an earlier msgid
pub fn unique_entries(entries: &[PoEntry]) -> Vec<&PoEntry> {
    let mut seen = HashSet::new();
    entries
        .iter()
        .filter(|entry| seen.insert(entry.source.as_str()))
        .collect()
}

/// Write the catalog for one source file; nothing is written for an empty one
pub fn write_po(
    dir: &Path,
    file_name: &str,
    language: &str,
    entries: &[PoEntry],
) -> Result<Option<PathBuf>> {
    if entries.is_empty() {
        return Ok(None);
    }

    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create export directory {}", dir.display()))?;

    let path = po_path(dir, file_name, language);
    fs::write(&path, render_po(file_name, language, entries))
        .with_context(|| format!("Failed to write {}", path.display()))?;

    tracing::info!(
        "Exported {} entries to {}",
        unique_entries(entries).len(),
        path.display()
    );
    Ok(Some(path))
}

fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' => escaped.push_str("\\\\"),
            '"' => escaped.push_str("\\\""),
            '\n' => escaped.push_str("\\n"),
            '\r' => escaped.push_str("\\r"),
            '\t' => escaped.push_str("\\t"),
            other => escaped.push(other),
        }
    }
    escaped
}

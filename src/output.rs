//! Writing generated files to disk.
//!
//! Only files whose contents changed are rewritten, so timestamps of
//! untouched documents are preserved. With `clean`, files matching the
//! output's clean patterns that this run did not produce are removed, but
//! only when they carry the generated-file marker.

use anyhow::Context;
use std::collections::HashSet;
use std::fs;
use std::path::{Component, Path, PathBuf};

use crate::generator::{CleanPattern, CodeGenOutput};

/// How [`write_output`] treats the output directory.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WriteOptions {
    /// Report what would change without touching the disk.
    pub dry_run: bool,
    /// Fail if anything would change; implies `dry_run`.
    pub verify: bool,
    /// Remove stale generated files.
    pub clean: bool,
}

/// What a write pass did (or would do, for dry runs).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WriteSummary {
    /// Files created or rewritten.
    pub updated: Vec<PathBuf>,
    /// Stale files removed.
    pub removed: Vec<PathBuf>,
}

impl WriteSummary {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.updated.is_empty() && self.removed.is_empty()
    }
}

/// Join a generated file name onto the output directory.
///
/// Returns `None` for absolute names and names escaping the directory.
fn map_path(base: &Path, name: &str) -> Option<PathBuf> {
    let mut pb = base.to_path_buf();
    let mut pushed = false;
    for comp in Path::new(name).components() {
        match comp {
            Component::Normal(s) => {
                pb.push(s);
                pushed = true;
            }
            Component::CurDir => {}
            _ => return None,
        }
    }
    pushed.then_some(pb)
}

/// Write `output` under `dir`.
///
/// # Errors
///
/// Fails on file names that are absolute or leave `dir`, on I/O errors and,
/// in verify mode, when the directory is not up to date.
pub fn write_output(
    output: &CodeGenOutput,
    dir: &Path,
    options: &WriteOptions,
) -> anyhow::Result<WriteSummary> {
    let dry_run = options.dry_run || options.verify;
    let mut summary = WriteSummary::default();
    let mut generated = HashSet::new();

    for file in &output.files {
        let path = map_path(dir, file.name())
            .with_context(|| format!("Invalid output file name: {:?}", file.name()))?;
        generated.insert(path.clone());

        let unchanged = fs::read_to_string(&path).is_ok_and(|existing| existing == file.text());
        if unchanged {
            tracing::debug!(path = %path.display(), "unchanged");
            continue;
        }

        if !dry_run {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
            }
            fs::write(&path, file.text())
                .with_context(|| format!("Failed to write file: {}", path.display()))?;
        }
        tracing::info!(path = %path.display(), dry_run, "updated");
        summary.updated.push(path);
    }

    if options.clean {
        for pattern in &output.patterns_to_clean {
            for path in stale_files(dir, pattern, &generated)? {
                if !dry_run {
                    fs::remove_file(&path)
                        .with_context(|| format!("Failed to remove file: {}", path.display()))?;
                }
                tracing::warn!(path = %path.display(), dry_run, "removed stale generated file");
                summary.removed.push(path);
            }
        }
    }

    if options.verify && !summary.is_empty() {
        anyhow::bail!(
            "Output directory {} is out of date: {} file(s) would be updated, {} removed",
            dir.display(),
            summary.updated.len(),
            summary.removed.len()
        );
    }

    Ok(summary)
}

/// Files matching `pattern` that were not generated and contain the marker.
fn stale_files(
    dir: &Path,
    pattern: &CleanPattern,
    generated: &HashSet<PathBuf>,
) -> anyhow::Result<Vec<PathBuf>> {
    let full = format!(
        "{}/{}",
        glob::Pattern::escape(&dir.to_string_lossy()),
        pattern.pattern
    );
    let mut stale = Vec::new();
    for entry in glob::glob(&full).with_context(|| format!("Invalid clean pattern: {full}"))? {
        let path = entry?;
        if !path.is_file() || generated.contains(&path) {
            continue;
        }
        let is_generated = fs::read_to_string(&path)
            .is_ok_and(|text| text.contains(&pattern.required_text));
        if is_generated {
            stale.push(path);
        }
    }
    Ok(stale)
}

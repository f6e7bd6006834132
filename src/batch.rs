//! Renaming every PDF in a directory.

use crate::filename;
use crate::reconcile::ResolvedMeta;
use crate::{MetaError, PdfSource, RenameConfig, Result};
use std::ffi::OsStr;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

// ── BatchReport ──────────────────────────────────────────────────────────────

/// Outcome counters for one [`BatchRenamer::run`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchReport {
    /// Candidate files found in the directory.
    pub processed: usize,
    /// Files renamed in place.
    pub renamed: usize,
    /// Files skipped because neither a title nor an author was found.
    pub missing_metadata: usize,
    /// Renamed files moved to the destination.
    pub filed: usize,
    /// Failed renames and failed moves.
    pub errors: usize,
}

impl fmt::Display for BatchReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Processed {} files:", self.processed)?;
        writeln!(f, " - Renamed: {}", self.renamed)?;
        writeln!(f, " - Missing metadata: {}", self.missing_metadata)?;
        write!(f, " - Errors: {}", self.errors)
    }
}

// ── BatchRenamer ─────────────────────────────────────────────────────────────

/// Renames PDFs after their metadata, one file at a time.
///
/// ```no_run
/// use pdftitlerename::{BatchRenamer, RenameConfig};
///
/// let config = RenameConfig { use_author: true, ..Default::default() };
/// let report = BatchRenamer::new(config).run("./papers").unwrap();
/// println!("{report}");
/// ```
pub struct BatchRenamer {
    config: RenameConfig,
}

impl BatchRenamer {
    pub fn new(config: RenameConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RenameConfig {
        &self.config
    }

    /// Process every candidate in `dir`.
    ///
    /// Only a directory that cannot be listed is an error; anything that goes
    /// wrong with an individual file is logged and counted.
    pub fn run<P: AsRef<Path>>(&self, dir: P) -> Result<BatchReport> {
        let files = candidates(dir.as_ref())?;
        let mut report = BatchReport {
            processed: files.len(),
            ..Default::default()
        };

        for path in &files {
            self.process_file(path, &mut report);
        }

        Ok(report)
    }

    fn process_file(&self, path: &Path, report: &mut BatchReport) {
        info!("{}", path.display());

        let stem = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        let ResolvedMeta { title, author } = read_metadata(path);

        let title = match (title, &author) {
            (Some(title), _) => title,
            (None, Some(_)) => stem,
            (None, None) => {
                warn!(" -- Could not find metadata in '{}'", path.display());
                report.missing_metadata += 1;
                return;
            }
        };

        let author = if self.config.use_author { author.as_deref() } else { None };
        let new_name = filename::synthesize_with(&title, author, self.config.sanitize);
        let renamed = path.with_file_name(&new_name);

        let outcome = check_plain_name(path, &renamed, &new_name).and_then(|_| rename(path, &renamed));
        if let Err(e) = outcome {
            warn!(" -- {e}");
            report.errors += 1;
            return;
        }
        report.renamed += 1;

        if let Some(destination) = &self.config.destination {
            match move_into(&renamed, destination) {
                Ok(filed) => {
                    info!(" -- Filed to {}", filed.display());
                    report.filed += 1;
                }
                Err(e) => {
                    warn!(" -- {e}");
                    report.errors += 1;
                }
            }
        }
    }
}

/// Title and author of the PDF at `path`.
///
/// A file that cannot be read or parsed yields an empty [`ResolvedMeta`].
pub fn read_metadata(path: &Path) -> ResolvedMeta {
    match PdfSource::from_path(path) {
        Ok(source) => source.resolved_meta(),
        Err(e) => {
            warn!(" -- Could not read '{}': {e}", path.display());
            ResolvedMeta::default()
        }
    }
}

/// Regular, non-hidden `*.pdf` files directly inside `dir`, sorted.
pub fn candidates(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let name = entry.file_name();
        let name = name.to_string_lossy();
        if name.starts_with('.') || !name.ends_with(".pdf") {
            continue;
        }
        let path = entry.path();
        if path.is_file() {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// A title can carry `/` or `..` into the synthesized name; such a name would
/// rename the file out of its directory.
fn check_plain_name(from: &Path, to: &Path, name: &str) -> Result<()> {
    let plain = !name.contains(['/', std::path::MAIN_SEPARATOR])
        && Path::new(name).file_name() == Some(OsStr::new(name));
    if plain {
        return Ok(());
    }
    Err(MetaError::RenameFailure {
        from: from.to_path_buf(),
        to: to.to_path_buf(),
        source: io::Error::new(io::ErrorKind::InvalidInput, "new name is not a plain file name"),
    })
}

fn rename(from: &Path, to: &Path) -> Result<()> {
    fs::rename(from, to).map_err(|source| MetaError::RenameFailure {
        from: from.to_path_buf(),
        to: to.to_path_buf(),
        source,
    })
}

/// Move `file` into `destination` (or onto it, when it is not a directory).
/// Falls back to copy-and-delete when a plain rename fails, e.g. across
/// filesystems.
fn move_into(file: &Path, destination: &Path) -> Result<PathBuf> {
    let target = match file.file_name() {
        Some(name) if destination.is_dir() => destination.join(name),
        _ => destination.to_path_buf(),
    };

    if fs::rename(file, &target).is_ok() {
        return Ok(target);
    }

    if let Err(source) = fs::copy(file, &target).and_then(|_| fs::remove_file(file)) {
        // Drop a partial or duplicate copy; the renamed file stays where it is.
        if target.is_file() {
            let _ = fs::remove_file(&target);
        }
        return Err(MetaError::MoveFailure {
            from: file.to_path_buf(),
            to: target,
            source,
        });
    }
    Ok(target)
}

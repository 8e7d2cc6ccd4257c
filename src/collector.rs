//! Bundle manifest files into a single text document.
//!
//! Each file that exists becomes one block:
//!
//! ```text
//! === <entry> ===
//! <content, verbatim>
//!
//! ```
//!
//! Missing files are reported and skipped. Any other I/O failure aborts the
//! pass and is returned to the caller.

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::config::CollectorConfig;
use crate::report::StatusReporter;
use crate::types::{Summary, WriteMode};
use crate::utils::{delimiter, resolve};

#[derive(Debug, thiserror::Error)]
pub enum CollectError {
    #[error("cannot open output {}", path.display())]
    CreateOutput {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("cannot read {}", path.display())]
    ReadSource {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("cannot write output {}", path.display())]
    WriteOutput {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Run one collection pass as described by `cfg`.
pub fn collect(
    cfg: &CollectorConfig,
    reporter: &mut dyn StatusReporter,
) -> Result<Summary, CollectError> {
    let summary = match cfg.write_mode {
        WriteMode::Streaming => collect_streaming(&cfg.root, &cfg.files, &cfg.output, reporter)?,
        WriteMode::Atomic => collect_atomic(&cfg.root, &cfg.files, &cfg.output, reporter)?,
    };
    reporter.finished(&cfg.output);
    Ok(summary)
}

/// Truncate `output` and write blocks as they are read.
///
/// The writer is flushed even when a source read fails, so the document
/// holds every block up to the failing entry.
fn collect_streaming(
    root: &Path,
    manifest: &[String],
    output: &Path,
    reporter: &mut dyn StatusReporter,
) -> Result<Summary, CollectError> {
    let file = File::create(output).map_err(|source| CollectError::CreateOutput {
        path: output.to_path_buf(),
        source,
    })?;
    let mut out = BufWriter::new(file);

    let written = write_blocks(root, manifest, &mut out, output, reporter);
    let flushed = out.flush().map_err(|source| CollectError::WriteOutput {
        path: output.to_path_buf(),
        source,
    });

    let summary = written?;
    flushed?;
    Ok(summary)
}

/// Write into a temp file next to the output, then rename it into place.
///
/// The temp file is created before any source is read, so a bad destination
/// fails ahead of the first notice. On a failed read the temp file is
/// dropped and the existing output is left untouched.
fn collect_atomic(
    root: &Path,
    manifest: &[String],
    output: &Path,
    reporter: &mut dyn StatusReporter,
) -> Result<Summary, CollectError> {
    let create_err = |source: io::Error| CollectError::CreateOutput {
        path: output.to_path_buf(),
        source,
    };
    let write_err = |source: io::Error| CollectError::WriteOutput {
        path: output.to_path_buf(),
        source,
    };

    let target = persist_target(output);
    let dir = match target.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let mut tmp = temp_builder().tempfile_in(dir).map_err(create_err)?;
    // Keep the mode of an output that already exists.
    if let Ok(meta) = fs::metadata(&target) {
        tmp.as_file()
            .set_permissions(meta.permissions())
            .map_err(create_err)?;
    }

    let summary = {
        let mut out = BufWriter::new(&mut tmp);
        let summary = write_blocks(root, manifest, &mut out, output, reporter)?;
        out.flush().map_err(write_err)?;
        summary
    };

    tmp.persist(&target).map_err(|e| write_err(e.error))?;
    Ok(summary)
}

/// Rename target for atomic mode. A symlinked output is written through to
/// the file it points at; a dangling link is replaced.
fn persist_target(output: &Path) -> PathBuf {
    match fs::symlink_metadata(output) {
        Ok(meta) if meta.file_type().is_symlink() => {
            fs::canonicalize(output).unwrap_or_else(|_| output.to_path_buf())
        }
        _ => output.to_path_buf(),
    }
}

/// Temp files default to 0600; ask for 0666 so the umask applies the same
/// way it does for `File::create`.
#[cfg(unix)]
fn temp_builder() -> tempfile::Builder<'static, 'static> {
    use std::os::unix::fs::PermissionsExt;

    let mut builder = tempfile::Builder::new();
    builder.permissions(fs::Permissions::from_mode(0o666));
    builder
}

#[cfg(not(unix))]
fn temp_builder() -> tempfile::Builder<'static, 'static> {
    tempfile::Builder::new()
}

fn write_blocks<W: Write>(
    root: &Path,
    manifest: &[String],
    out: &mut W,
    output: &Path,
    reporter: &mut dyn StatusReporter,
) -> Result<Summary, CollectError> {
    let write_err = |source: io::Error| CollectError::WriteOutput {
        path: output.to_path_buf(),
        source,
    };
    let mut summary = Summary::default();

    for entry in manifest {
        let path = resolve(root, entry);
        if !path.exists() {
            debug!(entry = %entry, path = %path.display(), "source not found");
            reporter.skipped(entry);
            summary.skipped.push(entry.clone());
            continue;
        }

        let content = fs::read_to_string(&path)
            .map_err(|source| CollectError::ReadSource { path: path.clone(), source })?;

        writeln!(out, "{}", delimiter(entry)).map_err(write_err)?;
        out.write_all(content.as_bytes()).map_err(write_err)?;
        out.write_all(b"\n\n").map_err(write_err)?;

        debug!(entry = %entry, bytes = content.len(), "collected");
        reporter.collected(entry);
        summary.collected.push(entry.clone());
        summary.bytes += content.len();
    }

    Ok(summary)
}

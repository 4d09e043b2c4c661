//! Whole-archive and whole-package check orchestration.

use std::path::Path;
use std::path::PathBuf;

use tracing::debug;
use tracing::warn;

use crate::ArchiveFamily;
use crate::ArchiveHandle;
use crate::CheckConfig;
use crate::CheckError;
use crate::Result;
use crate::finding::Finding;
use crate::finding::FindingCollector;
use crate::finding::FindingKind;
use crate::inspection::inspect_java_archive;
use crate::inspection::is_any_entry_compressed;
use crate::inspection::verify_entries;

/// Outcome of checking one package's candidate files.
///
/// Findings flow to the collector as they are discovered; this report
/// only carries the bookkeeping a host needs afterwards.
#[derive(Debug, Default)]
pub struct CheckReport {
    /// Archives that were opened and fully checked.
    pub archives_checked: usize,

    /// Candidate files skipped: wrong extension, not a regular file, or
    /// structurally not an archive.
    pub skipped: usize,

    /// Archives whose byte source failed with a hard error. The rest of
    /// the package is still checked.
    pub failures: Vec<(PathBuf, CheckError)>,
}

impl CheckReport {
    /// Returns whether any archive failed with a hard error.
    #[must_use]
    pub fn has_failures(&self) -> bool {
        !self.failures.is_empty()
    }
}

/// Runs every structural check on one archive file.
///
/// The archive is opened once; integrity verification, compression
/// classification and (for the Java family) the metadata checks all run
/// over the same structural model. A bad entry stops entry scanning but
/// not the remaining structural checks. The underlying source is
/// released when this function returns, on every path.
///
/// # Errors
///
/// [`CheckError::NotAnArchive`] if the file has no valid central
/// directory (callers should skip it), [`CheckError::Io`] if the byte
/// source itself cannot be read.
pub fn check_archive<C>(
    path: &Path,
    family: ArchiveFamily,
    config: &CheckConfig,
    collector: &mut C,
) -> Result<()>
where
    C: FindingCollector + ?Sized,
{
    let mut handle = ArchiveHandle::open(path)?;

    if let Some(bad) = verify_entries(&mut handle, config) {
        warn!(path = %path.display(), entry = %bad.name, "archive fails integrity check");
        collector.report(Finding::new(
            FindingKind::BadCrcInZip,
            path,
            format!("{}: {}", bad.name, bad.reason),
        ));
    }

    if !is_any_entry_compressed(&handle) {
        collector.report(Finding::new(
            FindingKind::UncompressedZip,
            path,
            "no entry uses compression",
        ));
    }

    if family.is_java() {
        inspect_java_archive(&mut handle, path, config, collector);
    }

    Ok(())
}

/// Checks every candidate file of one package, in order.
///
/// Files whose name is outside the ZIP family, files that are not
/// regular files, and files that fail structural detection are skipped.
/// A hard I/O failure on one archive is recorded in the report and the
/// scan moves on to the next file; nothing here aborts the host's run.
pub fn check_package<I, P, C>(paths: I, config: &CheckConfig, collector: &mut C) -> CheckReport
where
    I: IntoIterator<Item = P>,
    P: AsRef<Path>,
    C: FindingCollector + ?Sized,
{
    let mut report = CheckReport::default();

    for path in paths {
        let path = path.as_ref();

        let Some(family) = ArchiveFamily::from_path(path) else {
            report.skipped += 1;
            continue;
        };
        if !path.is_file() {
            report.skipped += 1;
            continue;
        }

        match check_archive(path, family, config, collector) {
            Ok(()) => report.archives_checked += 1,
            Err(err) if err.is_skippable() => {
                debug!(path = %path.display(), %err, "skipping non-archive");
                report.skipped += 1;
            }
            Err(err) => report.failures.push((path.to_path_buf(), err)),
        }
    }

    report
}

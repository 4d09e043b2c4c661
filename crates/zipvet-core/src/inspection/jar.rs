//! Java archive metadata checks.
//!
//! Two well-known entries are located by exact path: the manifest and
//! the class index. The manifest's content is treated as opaque text
//! searched for one header pattern; nothing here understands Java
//! bytecode.

use std::io::Read;
use std::io::Seek;
use std::path::Path;
use std::sync::OnceLock;

use regex::Regex;
use tracing::debug;

use crate::CheckConfig;
use crate::archive::ArchiveHandle;
use crate::finding::Finding;
use crate::finding::FindingCollector;
use crate::finding::FindingKind;

/// Exact archive-internal path of the Java manifest entry.
pub const MANIFEST_PATH: &str = "META-INF/MANIFEST.MF";

/// Exact archive-internal path of the class index entry.
pub const INDEX_PATH: &str = "META-INF/INDEX.LIST";

fn class_path_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"(?im)^\s*Class-Path\s*:").expect("valid pattern"))
}

/// Returns `true` if the manifest text hardcodes a `Class-Path:` header.
///
/// The match is case-insensitive and anchored at the start of a line;
/// leading whitespace is permitted. A header like `X-Class-Path:` does
/// not match.
#[must_use]
pub fn manifest_declares_class_path(manifest: &str) -> bool {
    class_path_pattern().is_match(manifest)
}

/// Runs the Java-archive metadata checks on an opened archive.
///
/// Callers decide whether a file belongs to the Java archive family
/// (jar/war/ear) before invoking this; the checks themselves never look
/// at the archive's file name.
///
/// Manifest check: a missing `META-INF/MANIFEST.MF` is an error-level
/// structural problem. A present manifest is decoded as UTF-8 text and
/// scanned for a hardcoded `Class-Path:` header; a manifest that cannot
/// be decoded is reported as unreadable rather than silently skipped.
///
/// Index check: `META-INF/INDEX.LIST` presence is compared against the
/// `prefer_indexed_jars` policy. Only the two mismatching combinations
/// produce a finding; present-and-wanted and absent-and-unwanted are
/// both silent.
pub fn inspect_java_archive<R, C>(
    handle: &mut ArchiveHandle<R>,
    archive_path: &Path,
    config: &CheckConfig,
    collector: &mut C,
) where
    R: Read + Seek,
    C: FindingCollector + ?Sized,
{
    match handle.lookup(MANIFEST_PATH).cloned() {
        None => {
            collector.report(Finding::new(
                FindingKind::NoJarManifest,
                archive_path,
                format!("missing {MANIFEST_PATH}"),
            ));
        }
        Some(record) => match handle.read_entry(&record, config.max_entry_size) {
            Err(err) => {
                collector.report(Finding::new(
                    FindingKind::ManifestUnreadable,
                    archive_path,
                    format!("{MANIFEST_PATH}: {err}"),
                ));
            }
            Ok(content) => match String::from_utf8(content) {
                Err(_) => {
                    collector.report(Finding::new(
                        FindingKind::ManifestUnreadable,
                        archive_path,
                        format!("{MANIFEST_PATH}: not valid UTF-8 text"),
                    ));
                }
                Ok(manifest) => {
                    if manifest_declares_class_path(&manifest) {
                        collector.report(Finding::new(
                            FindingKind::ClassPathInManifest,
                            archive_path,
                            format!("{MANIFEST_PATH} hardcodes a Class-Path header"),
                        ));
                    }
                }
            },
        },
    }

    let indexed = handle.lookup(INDEX_PATH).is_some();
    debug!(indexed, wanted = config.prefer_indexed_jars, "class index state");
    match (indexed, config.prefer_indexed_jars) {
        (true, false) => {
            collector.report(Finding::new(
                FindingKind::JarIndexed,
                archive_path,
                format!("{INDEX_PATH} present but indexing is not wanted"),
            ));
        }
        (false, true) => {
            collector.report(Finding::new(
                FindingKind::JarNotIndexed,
                archive_path,
                format!("missing {INDEX_PATH}"),
            ));
        }
        // Present-and-wanted and absent-and-unwanted are both fine.
        (true, true) | (false, false) => {}
    }
}

//! End-to-end checks over on-disk archives.

#![allow(clippy::unwrap_used)]

use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;
use tempfile::TempDir;

use zipvet_core::ArchiveFamily;
use zipvet_core::CheckConfig;
use zipvet_core::FindingKind;
use zipvet_core::MemoryCollector;
use zipvet_core::check_archive;
use zipvet_core::check_package;
use zipvet_core::test_utils::ZipTestBuilder;
use zipvet_core::test_utils::corrupt_central_crc;
use zipvet_core::test_utils::with_junk_prefix;

fn write_temp(data: &[u8], suffix: &str) -> NamedTempFile {
    let mut file = NamedTempFile::with_suffix(suffix).unwrap();
    file.write_all(data).unwrap();
    file.flush().unwrap();
    file
}

fn run(path: &Path, family: ArchiveFamily, config: &CheckConfig) -> MemoryCollector {
    let mut collector = MemoryCollector::new();
    check_archive(path, family, config, &mut collector).unwrap();
    collector
}

#[test]
fn stored_only_archive_warns_uncompressed_and_nothing_else() {
    let data = ZipTestBuilder::new()
        .stored_file("a.txt", b"alpha")
        .stored_file("b.txt", b"beta")
        .build();
    let file = write_temp(&data, ".zip");

    let collector = run(file.path(), ArchiveFamily::Zip, &CheckConfig::default());
    assert_eq!(collector.kinds(), vec![FindingKind::UncompressedZip]);
}

#[test]
fn empty_archive_warns_uncompressed_without_crc_findings() {
    let data = ZipTestBuilder::new().build();
    let file = write_temp(&data, ".zip");

    let collector = run(file.path(), ArchiveFamily::Zip, &CheckConfig::default());
    assert_eq!(collector.kinds(), vec![FindingKind::UncompressedZip]);
}

#[test]
fn valid_deflated_archive_is_clean() {
    let data = ZipTestBuilder::new()
        .deflated_file("a.txt", b"alpha alpha alpha alpha")
        .build();
    let file = write_temp(&data, ".zip");

    let collector = run(file.path(), ArchiveFamily::Zip, &CheckConfig::default());
    assert!(collector.findings.is_empty());
}

#[test]
fn corrupted_crc_yields_one_finding_naming_first_offender() {
    let mut data = ZipTestBuilder::new()
        .deflated_file("first.txt", b"first entry content here")
        .deflated_file("second.txt", b"second entry content here")
        .build();
    corrupt_central_crc(&mut data, "first.txt");
    corrupt_central_crc(&mut data, "second.txt");
    let file = write_temp(&data, ".zip");

    let collector = run(file.path(), ArchiveFamily::Zip, &CheckConfig::default());
    assert_eq!(collector.kinds(), vec![FindingKind::BadCrcInZip]);
    assert!(collector.findings[0].detail.contains("first.txt"));
    assert!(!collector.findings[0].detail.contains("second.txt"));
}

#[test]
fn bad_crc_does_not_suppress_remaining_structural_checks() {
    let mut data = ZipTestBuilder::new()
        .stored_file("payload.txt", b"payload bytes")
        .build();
    corrupt_central_crc(&mut data, "payload.txt");
    let file = write_temp(&data, ".jar");

    let config = CheckConfig {
        prefer_indexed_jars: false,
        ..Default::default()
    };
    let collector = run(file.path(), ArchiveFamily::Jar, &config);
    assert_eq!(
        collector.kinds(),
        vec![
            FindingKind::BadCrcInZip,
            FindingKind::UncompressedZip,
            FindingKind::NoJarManifest,
        ]
    );
}

#[test]
fn well_formed_jar_reports_only_the_classpath() {
    let data = ZipTestBuilder::new()
        .deflated_file(
            "META-INF/MANIFEST.MF",
            b"Manifest-Version: 1.0\n  Class-Path: lib/foo.jar\n",
        )
        .stored_file("META-INF/INDEX.LIST", b"JarIndex-Version: 1.0\n")
        .build();
    let file = write_temp(&data, ".jar");

    let collector = run(file.path(), ArchiveFamily::Jar, &CheckConfig::default());
    assert_eq!(collector.kinds(), vec![FindingKind::ClassPathInManifest]);
}

#[test]
fn unindexed_jar_with_plain_manifest_warns_about_indexing_only() {
    let data = ZipTestBuilder::new()
        .deflated_file("META-INF/MANIFEST.MF", b"Manifest-Version: 1.0\n")
        .build();
    let file = write_temp(&data, ".jar");

    let collector = run(file.path(), ArchiveFamily::Jar, &CheckConfig::default());
    assert_eq!(collector.kinds(), vec![FindingKind::JarNotIndexed]);
}

#[test]
fn archive_with_prepended_stub_is_still_checked() {
    let data = ZipTestBuilder::new()
        .deflated_file("a.txt", b"alpha alpha alpha alpha")
        .build();
    let stubbed = with_junk_prefix(b"#!/bin/sh\nexec unzip \"$0\"\n", &data);
    let file = write_temp(&stubbed, ".zip");

    let collector = run(file.path(), ArchiveFamily::Zip, &CheckConfig::default());
    assert!(collector.findings.is_empty());
}

#[test]
fn package_walk_checks_skips_and_records_failures_independently() {
    let dir = TempDir::new().unwrap();
    let root = dir.path();

    // A real archive with a finding.
    let good = root.join("good.zip");
    std::fs::write(
        &good,
        ZipTestBuilder::new().stored_file("a.txt", b"alpha").build(),
    )
    .unwrap();

    // Right extension, but not an archive at all.
    let fake = root.join("fake.jar");
    std::fs::write(&fake, b"not a zip archive").unwrap();

    // Wrong extension: never opened.
    let notes = root.join("notes.txt");
    std::fs::write(&notes, b"plain text").unwrap();

    // Archive-looking name on a directory: not a regular file.
    let dir_entry = root.join("bundle.zip.d.zip");
    std::fs::create_dir(&dir_entry).unwrap();

    let mut collector = MemoryCollector::new();
    let report = check_package(
        [&good, &fake, &notes, &dir_entry],
        &CheckConfig::default(),
        &mut collector,
    );

    assert_eq!(report.archives_checked, 1);
    assert_eq!(report.skipped, 3);
    assert!(!report.has_failures());
    assert_eq!(collector.kinds(), vec![FindingKind::UncompressedZip]);
}

#[test]
fn package_walk_keeps_finding_order_across_archives() {
    let dir = TempDir::new().unwrap();
    let root = dir.path();

    let first = root.join("first.zip");
    std::fs::write(
        &first,
        ZipTestBuilder::new().stored_file("a.txt", b"alpha").build(),
    )
    .unwrap();

    let second = root.join("second.jar");
    std::fs::write(
        &second,
        ZipTestBuilder::new()
            .deflated_file("META-INF/MANIFEST.MF", b"Manifest-Version: 1.0\n")
            .build(),
    )
    .unwrap();

    let mut collector = MemoryCollector::new();
    let report = check_package([&first, &second], &CheckConfig::default(), &mut collector);

    assert_eq!(report.archives_checked, 2);
    assert_eq!(
        collector.kinds(),
        vec![FindingKind::UncompressedZip, FindingKind::JarNotIndexed]
    );
    assert!(collector.findings[0].path.ends_with("first.zip"));
    assert!(collector.findings[1].path.ends_with("second.jar"));
}

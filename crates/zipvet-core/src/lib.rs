//! Structural validation for ZIP-family archive files.
//!
//! `zipvet-core` inspects archives shipped inside software packages (ZIP,
//! JAR, WAR, EAR) and reports structural defects as typed findings:
//! corrupted entries, archives that forgo compression entirely, and
//! Java-archive metadata problems. It never extracts payloads to disk;
//! it only validates structure.
//!
//! # Examples
//!
//! ```no_run
//! use zipvet_core::CheckConfig;
//! use zipvet_core::MemoryCollector;
//! use zipvet_core::check_package;
//!
//! let config = CheckConfig::default();
//! let mut collector = MemoryCollector::new();
//! let report = check_package(["lib/app.jar", "data/assets.zip"], &config, &mut collector);
//!
//! for finding in &collector.findings {
//!     eprintln!("{finding}");
//! }
//! println!("checked {} archives", report.archives_checked);
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod api;
pub mod archive;
pub mod config;
pub mod error;
pub mod family;
pub mod finding;
pub mod inspection;
pub mod test_utils;

// Re-export main API types
pub use api::CheckReport;
pub use api::check_archive;
pub use api::check_package;
pub use archive::ArchiveHandle;
pub use archive::EntryCompression;
pub use archive::EntryRecord;
pub use config::CheckConfig;
pub use error::CheckError;
pub use error::Result;
pub use family::ArchiveFamily;
pub use finding::Finding;
pub use finding::FindingCollector;
pub use finding::FindingKind;
pub use finding::MemoryCollector;
pub use finding::Severity;

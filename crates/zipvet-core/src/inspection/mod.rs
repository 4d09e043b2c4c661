//! Structural inspection passes over an opened archive.
//!
//! Each pass is a stateless predicate or scan over the
//! [`ArchiveHandle`](crate::ArchiveHandle)'s entry table; the only
//! state is the open handle's lifetime.

pub mod compression;
pub mod integrity;
pub mod jar;

pub use compression::is_any_entry_compressed;
pub use integrity::BadEntry;
pub use integrity::BadEntryReason;
pub use integrity::verify_entries;
pub use jar::INDEX_PATH;
pub use jar::MANIFEST_PATH;
pub use jar::inspect_java_archive;
pub use jar::manifest_declares_class_path;

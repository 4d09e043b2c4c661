//! Whole-archive compression classification.

use std::io::Read;
use std::io::Seek;

use crate::archive::ArchiveHandle;
use crate::archive::EntryCompression;

/// Returns `true` if at least one entry uses a non-STORED method.
///
/// This is an existence test, not a ratio: a single compressed member
/// is enough for the archive to count as compressed. An empty archive
/// counts as not compressed.
#[must_use]
pub fn is_any_entry_compressed<R: Read + Seek>(handle: &ArchiveHandle<R>) -> bool {
    handle
        .entries()
        .iter()
        .any(|record| record.method != EntryCompression::Stored)
}

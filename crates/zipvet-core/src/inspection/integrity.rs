//! Per-entry integrity verification.

use std::fmt;
use std::io::Read;
use std::io::Seek;

use flate2::Crc;

use crate::CheckConfig;
use crate::archive::ArchiveHandle;

/// Why a single entry failed verification.
#[derive(Debug)]
pub enum BadEntryReason {
    /// Content decompressed cleanly but its CRC-32 does not match the
    /// value stored in the central directory.
    ChecksumMismatch {
        /// CRC-32 recorded in the central directory.
        stored: u32,
        /// CRC-32 computed over the decompressed content.
        computed: u32,
    },
    /// Content could not be decompressed at all.
    Decode(String),
}

impl fmt::Display for BadEntryReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ChecksumMismatch { stored, computed } => {
                write!(f, "checksum mismatch (stored {stored:#010x}, computed {computed:#010x})")
            }
            Self::Decode(reason) => write!(f, "{reason}"),
        }
    }
}

/// The first entry that failed verification.
#[derive(Debug)]
pub struct BadEntry {
    /// Archive-internal path of the failing entry.
    pub name: String,
    /// Why it failed.
    pub reason: BadEntryReason,
}

/// Verifies every entry's content against its stored CRC-32.
///
/// Entries are processed in central directory order. Each one is fully
/// decompressed and a CRC-32 is recomputed over the result; the first
/// entry that fails (mismatch or decode error alike) stops the scan.
/// A single corrupt entry already condemns the archive, so there is no
/// value in accumulating further offenders.
///
/// Directory markers and other entries with zero compressed size and a
/// zero stored checksum carry nothing to verify and are skipped.
///
/// Returns `None` when every entry checks out.
pub fn verify_entries<R: Read + Seek>(
    handle: &mut ArchiveHandle<R>,
    config: &CheckConfig,
) -> Option<BadEntry> {
    for index in 0..handle.entries().len() {
        let record = handle.entries()[index].clone();
        if record.compressed_size == 0 && record.crc32 == 0 {
            continue;
        }

        match handle.read_entry(&record, config.max_entry_size) {
            Ok(content) => {
                let mut crc = Crc::new();
                crc.update(&content);
                let computed = crc.sum();
                if computed != record.crc32 {
                    return Some(BadEntry {
                        name: record.name,
                        reason: BadEntryReason::ChecksumMismatch {
                            stored: record.crc32,
                            computed,
                        },
                    });
                }
            }
            Err(err) => {
                return Some(BadEntry {
                    name: record.name,
                    reason: BadEntryReason::Decode(err.reason),
                });
            }
        }
    }
    None
}

//! Archive handle and central directory model.
//!
//! [`ArchiveHandle`] opens a byte source, locates the central directory
//! (tolerating prepended junk such as self-extracting stubs) and
//! snapshots one [`EntryRecord`] per member in physical central
//! directory order. The handle keeps the source open for the lifetime
//! of the scope; dropping it releases the source on every exit path.

use std::fs::File;
use std::io::BufReader;
use std::io::Read;
use std::io::Seek;
use std::path::Path;

use flate2::read::DeflateDecoder;
use tracing::debug;
use zip::ZipArchive;

use crate::CheckError;
use crate::Result;
use crate::error::EntryDecodeError;

/// Compression method recorded for an entry in the central directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryCompression {
    /// No compression applied.
    Stored,
    /// DEFLATE compression.
    Deflated,
    /// Any method this check cannot decode (bzip2, LZMA, AES, ...).
    Unsupported,
}

impl EntryCompression {
    fn from_zip(method: zip::CompressionMethod) -> Self {
        match method {
            zip::CompressionMethod::Stored => Self::Stored,
            zip::CompressionMethod::Deflated => Self::Deflated,
            _ => Self::Unsupported,
        }
    }
}

/// Metadata for one archive member, as recorded in the central directory.
#[derive(Debug, Clone)]
pub struct EntryRecord {
    /// Archive-internal relative path, may contain `/` separators.
    pub name: String,
    /// Declared compression method.
    pub method: EntryCompression,
    /// Size of the stored (possibly compressed) data in bytes.
    pub compressed_size: u64,
    /// Declared decompressed size in bytes.
    pub size: u64,
    /// CRC-32 over the decompressed content, as stored in the directory.
    pub crc32: u32,
    /// Byte offset where the entry's data begins in the source.
    pub data_start: u64,
    /// Whether this is a directory marker entry.
    pub is_dir: bool,
    pub(crate) index: usize,
}

/// An opened archive: the byte source plus its parsed central directory.
///
/// Creation performs structural detection; a source without a valid
/// central directory never yields a handle. The entry table is
/// snapshotted eagerly so the structural checks can run without
/// re-reading directory headers.
pub struct ArchiveHandle<R: Read + Seek = BufReader<File>> {
    archive: ZipArchive<R>,
    records: Vec<EntryRecord>,
}

impl ArchiveHandle<BufReader<File>> {
    /// Opens an archive file.
    ///
    /// # Errors
    ///
    /// [`CheckError::Io`] if the file cannot be opened or read;
    /// [`CheckError::NotAnArchive`] if it has no valid central directory.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let handle = Self::from_reader(BufReader::new(file))?;
        debug!(
            path = %path.display(),
            entries = handle.records.len(),
            "opened archive"
        );
        Ok(handle)
    }
}

impl<R: Read + Seek> ArchiveHandle<R> {
    /// Opens an archive from any seekable byte source.
    ///
    /// # Errors
    ///
    /// Same contract as [`ArchiveHandle::open`].
    pub fn from_reader(reader: R) -> Result<Self> {
        let mut archive = ZipArchive::new(reader).map_err(|err| match err {
            zip::result::ZipError::Io(io) => CheckError::Io(io),
            other => CheckError::NotAnArchive(other.to_string()),
        })?;

        let mut records = Vec::with_capacity(archive.len());
        for index in 0..archive.len() {
            let entry = archive.by_index_raw(index).map_err(|err| {
                CheckError::InvalidArchive(format!("cannot read entry header {index}: {err}"))
            })?;
            records.push(EntryRecord {
                name: entry.name().to_string(),
                method: EntryCompression::from_zip(entry.compression()),
                compressed_size: entry.compressed_size(),
                size: entry.size(),
                crc32: entry.crc32(),
                data_start: entry.data_start(),
                is_dir: entry.is_dir(),
                index,
            });
        }

        Ok(Self { archive, records })
    }

    /// All entries, in physical central directory order. Includes
    /// zero-length and directory-marker entries.
    #[must_use]
    pub fn entries(&self) -> &[EntryRecord] {
        &self.records
    }

    /// Number of entries in the archive.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the archive has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Finds an entry by exact, case-sensitive archive-internal path.
    #[must_use]
    pub fn lookup(&self, exact_path: &str) -> Option<&EntryRecord> {
        self.records.iter().find(|r| r.name == exact_path)
    }

    /// Reads and decompresses one entry's content.
    ///
    /// Stored entries are passed through unchanged; deflated entries
    /// are inflated with `flate2`. Output is bounded by `limit` bytes.
    ///
    /// # Errors
    ///
    /// [`EntryDecodeError`] on a truncated or corrupt stream, an
    /// unsupported compression method, or output exceeding `limit`.
    pub fn read_entry(
        &mut self,
        record: &EntryRecord,
        limit: u64,
    ) -> std::result::Result<Vec<u8>, EntryDecodeError> {
        if record.size > limit {
            return Err(EntryDecodeError::new(format!(
                "declared size {} exceeds limit {limit}",
                record.size
            )));
        }

        let mut raw = Vec::new();
        let mut entry = self
            .archive
            .by_index_raw(record.index)
            .map_err(|err| EntryDecodeError::new(format!("cannot read entry data: {err}")))?;
        entry
            .read_to_end(&mut raw)
            .map_err(|err| EntryDecodeError::new(format!("cannot read entry data: {err}")))?;
        drop(entry);

        let content = match record.method {
            EntryCompression::Stored => raw,
            EntryCompression::Deflated => {
                let mut inflated = Vec::new();
                let mut decoder = DeflateDecoder::new(raw.as_slice()).take(limit.saturating_add(1));
                decoder.read_to_end(&mut inflated).map_err(|err| {
                    EntryDecodeError::new(format!("corrupt deflate stream: {err}"))
                })?;
                inflated
            }
            EntryCompression::Unsupported => {
                return Err(EntryDecodeError::new("unsupported compression method"));
            }
        };

        if content.len() as u64 > limit {
            return Err(EntryDecodeError::new(format!(
                "decompressed content exceeds limit {limit}"
            )));
        }
        Ok(content)
    }
}

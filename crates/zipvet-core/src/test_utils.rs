//! Test utilities for building and corrupting in-memory archives.
//!
//! These helpers exist so tests can construct well-formed zips and then
//! damage specific central directory fields without shipping binary
//! fixtures.
//!
//! # Panics
//!
//! All functions in this module may panic on I/O errors since they are
//! designed for test use only where panics are acceptable.

#![allow(clippy::unwrap_used, clippy::missing_panics_doc)]

use std::io::Cursor;
use std::io::Write;

use zip::write::SimpleFileOptions;
use zip::write::ZipWriter;

/// Builder for in-memory ZIP test archives.
///
/// # Examples
///
/// ```
/// use zipvet_core::test_utils::ZipTestBuilder;
///
/// let data = ZipTestBuilder::new()
///     .stored_file("readme.txt", b"hello")
///     .deflated_file("data.bin", &[0u8; 256])
///     .directory("docs/")
///     .build();
/// ```
pub struct ZipTestBuilder {
    writer: ZipWriter<Cursor<Vec<u8>>>,
}

impl ZipTestBuilder {
    /// Creates a new builder.
    #[must_use]
    pub fn new() -> Self {
        Self {
            writer: ZipWriter::new(Cursor::new(Vec::new())),
        }
    }

    /// Adds a file stored without compression.
    #[must_use]
    pub fn stored_file(mut self, path: &str, data: &[u8]) -> Self {
        let options = SimpleFileOptions::default()
            .compression_method(zip::CompressionMethod::Stored)
            .unix_permissions(0o644);
        self.writer.start_file(path, options).unwrap();
        self.writer.write_all(data).unwrap();
        self
    }

    /// Adds a DEFLATE-compressed file.
    #[must_use]
    pub fn deflated_file(mut self, path: &str, data: &[u8]) -> Self {
        let options = SimpleFileOptions::default()
            .compression_method(zip::CompressionMethod::Deflated)
            .unix_permissions(0o644);
        self.writer.start_file(path, options).unwrap();
        self.writer.write_all(data).unwrap();
        self
    }

    /// Adds a directory marker entry.
    #[must_use]
    pub fn directory(mut self, path: &str) -> Self {
        self.writer
            .add_directory(path, SimpleFileOptions::default())
            .unwrap();
        self
    }

    /// Finishes the archive and returns its bytes.
    #[must_use]
    pub fn build(self) -> Vec<u8> {
        self.writer.finish().unwrap().into_inner()
    }
}

impl Default for ZipTestBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Prepends arbitrary junk (e.g. a self-extracting stub) to a zip.
#[must_use]
pub fn with_junk_prefix(junk: &[u8], zip_data: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(junk.len() + zip_data.len());
    out.extend_from_slice(junk);
    out.extend_from_slice(zip_data);
    out
}

/// Central directory file header signature `PK\x01\x02`.
const CENTRAL_HEADER_SIG: [u8; 4] = [0x50, 0x4b, 0x01, 0x02];

/// Byte offset of the CRC-32 field within a central directory header.
const CENTRAL_CRC_OFFSET: usize = 16;

/// Byte offset of the compression method field within a central
/// directory header.
const CENTRAL_METHOD_OFFSET: usize = 10;

/// Byte offset of the file name length field within a central directory
/// header.
const CENTRAL_NAME_LEN_OFFSET: usize = 28;

/// Fixed size of a central directory header before the variable fields.
const CENTRAL_HEADER_LEN: usize = 46;

fn central_header_offset(data: &[u8], name: &str) -> usize {
    let name_bytes = name.as_bytes();
    let mut i = 0;
    while i + CENTRAL_HEADER_LEN <= data.len() {
        if data[i..i + 4] == CENTRAL_HEADER_SIG {
            let name_len = u16::from_le_bytes([
                data[i + CENTRAL_NAME_LEN_OFFSET],
                data[i + CENTRAL_NAME_LEN_OFFSET + 1],
            ]) as usize;
            let name_start = i + CENTRAL_HEADER_LEN;
            if name_start + name_len <= data.len()
                && &data[name_start..name_start + name_len] == name_bytes
            {
                return i;
            }
        }
        i += 1;
    }
    panic!("no central directory header for entry {name}");
}

/// Flips the stored CRC-32 of one entry in the central directory,
/// leaving the entry's content untouched.
pub fn corrupt_central_crc(data: &mut [u8], name: &str) {
    let offset = central_header_offset(data, name);
    data[offset + CENTRAL_CRC_OFFSET] ^= 0xFF;
}

/// Overwrites the compression method field of one entry in the central
/// directory with an arbitrary method id.
pub fn patch_central_method(data: &mut [u8], name: &str, method: u16) {
    let offset = central_header_offset(data, name);
    data[offset + CENTRAL_METHOD_OFFSET..offset + CENTRAL_METHOD_OFFSET + 2]
        .copy_from_slice(&method.to_le_bytes());
}

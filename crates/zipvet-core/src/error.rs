//! Error types for archive checking operations.

use thiserror::Error;

/// Result type alias using `CheckError`.
pub type Result<T> = std::result::Result<T, CheckError>;

/// Errors that can occur while checking an archive.
#[derive(Error, Debug)]
pub enum CheckError {
    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Input fails structural detection: no valid central directory.
    ///
    /// Callers iterating over candidate files should skip the file,
    /// not abort the run.
    #[error("not a zip archive: {0}")]
    NotAnArchive(String),

    /// The central directory exists but an entry header cannot be read.
    #[error("invalid archive: {0}")]
    InvalidArchive(String),
}

impl CheckError {
    /// Returns `true` if this error means "skip this file and move on".
    ///
    /// Only structural-detection failures are skippable; I/O errors on
    /// an opened source are a hard failure for that one archive.
    #[must_use]
    pub const fn is_skippable(&self) -> bool {
        matches!(self, Self::NotAnArchive(_))
    }
}

/// Why an entry's decompressed content could not be produced.
///
/// Covers truncated or corrupt compressed streams, unsupported
/// compression methods, and oversized output. Integrity checking treats
/// all of these the same way as a checksum mismatch, but the reason
/// stays visible in the finding detail.
#[derive(Debug, Error)]
#[error("{reason}")]
pub struct EntryDecodeError {
    /// Human-readable reason the entry could not be decoded.
    pub reason: String,
}

impl EntryDecodeError {
    pub(crate) fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CheckError::NotAnArchive("missing end of central directory".to_string());
        assert_eq!(
            err.to_string(),
            "not a zip archive: missing end of central directory"
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: CheckError = io_err.into();
        assert!(matches!(err, CheckError::Io(_)));
    }

    #[test]
    fn test_is_skippable() {
        let err = CheckError::NotAnArchive("bad".into());
        assert!(err.is_skippable());

        let err = CheckError::InvalidArchive("bad entry header".into());
        assert!(!err.is_skippable());

        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: CheckError = io_err.into();
        assert!(!err.is_skippable());
    }

    #[test]
    fn test_entry_decode_error_display() {
        let err = EntryDecodeError::new("corrupt deflate stream");
        assert_eq!(err.to_string(), "corrupt deflate stream");
    }
}

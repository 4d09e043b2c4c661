//! Archive family classification from file names.
//!
//! Classification is a filename policy decision made before any I/O:
//! the structural checks themselves never look at the file name.

use std::path::Path;

/// Archive families recognized by the checker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArchiveFamily {
    /// Plain ZIP archive.
    Zip,
    /// Java archive.
    Jar,
    /// Java web application archive.
    War,
    /// Java enterprise application archive.
    Ear,
}

impl ArchiveFamily {
    /// Classifies a file path by extension, ASCII case-insensitive.
    ///
    /// Returns `None` for anything outside the ZIP family; such files
    /// are not candidates for checking at all.
    #[must_use]
    pub fn from_path(path: &Path) -> Option<Self> {
        let extension = path.extension().and_then(|e| e.to_str())?;

        match extension.to_ascii_lowercase().as_str() {
            "zip" => Some(Self::Zip),
            "jar" => Some(Self::Jar),
            "war" => Some(Self::War),
            "ear" => Some(Self::Ear),
            _ => None,
        }
    }

    /// Returns `true` for the Java archive family (jar/war/ear), which
    /// gets the additional manifest and class-index checks.
    #[must_use]
    pub const fn is_java(self) -> bool {
        matches!(self, Self::Jar | Self::War | Self::Ear)
    }
}

//! Typed findings produced by archive checks.

use std::fmt;
use std::path::Path;
use std::path::PathBuf;

/// Severity of a finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Structural problem; the archive is broken or unusable for tooling.
    Error,
    /// Quality or policy problem; the archive still works.
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Error => write!(f, "error"),
            Self::Warning => write!(f, "warning"),
        }
    }
}

/// The kinds of defect an archive check can report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FindingKind {
    /// An entry's decompressed content fails its stored CRC, or cannot
    /// be decompressed at all.
    BadCrcInZip,
    /// No entry in the archive uses a compression method.
    UncompressedZip,
    /// A Java archive has no `META-INF/MANIFEST.MF` entry.
    NoJarManifest,
    /// The manifest hardcodes a `Class-Path:` header.
    ClassPathInManifest,
    /// `META-INF/INDEX.LIST` is present but indexing is not wanted.
    JarIndexed,
    /// `META-INF/INDEX.LIST` is absent but indexing is wanted.
    JarNotIndexed,
    /// The manifest entry exists but cannot be decoded as text.
    ManifestUnreadable,
}

impl FindingKind {
    /// Stable identifier used when findings are rendered for humans.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::BadCrcInZip => "bad-crc-in-zip",
            Self::UncompressedZip => "uncompressed-zip",
            Self::NoJarManifest => "no-jar-manifest",
            Self::ClassPathInManifest => "class-path-in-manifest",
            Self::JarIndexed => "jar-indexed",
            Self::JarNotIndexed => "jar-not-indexed",
            Self::ManifestUnreadable => "manifest-unreadable",
        }
    }

    /// Severity associated with this kind of finding.
    #[must_use]
    pub const fn severity(self) -> Severity {
        match self {
            Self::BadCrcInZip | Self::NoJarManifest => Severity::Error,
            Self::UncompressedZip
            | Self::ClassPathInManifest
            | Self::JarIndexed
            | Self::JarNotIndexed
            | Self::ManifestUnreadable => Severity::Warning,
        }
    }

    /// Long-form explanation suitable for end-user documentation.
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::BadCrcInZip => {
                "The reported entry in the zip fails the CRC check. Usually this is a \
                 sign of a corrupt zip file."
            }
            Self::UncompressedZip => "The zip file is not compressed.",
            Self::NoJarManifest => "The jar file does not contain a META-INF/MANIFEST.MF file.",
            Self::ClassPathInManifest => {
                "The META-INF/MANIFEST.MF file in the jar contains a hardcoded Class-Path. \
                 These entries do not work with older Java versions and even if they do \
                 work, they are inflexible and usually cause nasty surprises."
            }
            Self::JarIndexed => {
                "The jar file is indexed, i.e. it contains the META-INF/INDEX.LIST file. \
                 These files are known to cause problems with some older Java versions."
            }
            Self::JarNotIndexed => {
                "The jar file is not indexed, i.e. it does not contain the \
                 META-INF/INDEX.LIST file. Indexed jars speed up the class searching \
                 process of classloaders in some situations."
            }
            Self::ManifestUnreadable => {
                "The jar file has a META-INF/MANIFEST.MF entry whose content cannot be \
                 decoded as text."
            }
        }
    }
}

/// One defect found in one archive.
///
/// Immutable once produced; handed to the [`FindingCollector`] right
/// away rather than accumulated inside the checks.
#[derive(Debug, Clone)]
pub struct Finding {
    /// What kind of defect was found.
    pub kind: FindingKind,
    /// The archive file this finding concerns, as given by the caller.
    pub path: PathBuf,
    /// Human-readable detail, e.g. the offending entry name.
    pub detail: String,
}

impl Finding {
    /// Creates a new finding.
    #[must_use]
    pub fn new(kind: FindingKind, path: &Path, detail: impl Into<String>) -> Self {
        Self {
            kind,
            path: path.to_path_buf(),
            detail: detail.into(),
        }
    }

    /// Severity of this finding, derived from its kind.
    #[must_use]
    pub const fn severity(&self) -> Severity {
        self.kind.severity()
    }
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} {}: {}",
            self.severity(),
            self.kind.name(),
            self.path.display(),
            self.detail
        )
    }
}

/// Receiver for findings as they are produced.
///
/// The checks emit findings one by one and never look back at them;
/// hosts decide whether to print, persist, or filter. Implementations
/// must be `Send` so whole-archive checks can run one task per archive.
pub trait FindingCollector: Send {
    /// Called once per finding, in the order findings are discovered.
    fn report(&mut self, finding: Finding);
}

/// A [`FindingCollector`] that keeps every finding in memory.
///
/// Useful for tests and for hosts that post-process findings in bulk.
#[derive(Debug, Default)]
pub struct MemoryCollector {
    /// All findings reported so far, in discovery order.
    pub findings: Vec<Finding>,
}

impl MemoryCollector {
    /// Creates an empty collector.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Kinds of all collected findings, in discovery order.
    #[must_use]
    pub fn kinds(&self) -> Vec<FindingKind> {
        self.findings.iter().map(|f| f.kind).collect()
    }
}

impl FindingCollector for MemoryCollector {
    fn report(&mut self, finding: Finding) {
        self.findings.push(finding);
    }
}

//! Configuration for archive checks.

/// Configuration controlling archive checks.
///
/// Pass by reference (`&CheckConfig`); the struct is cheap but there is
/// no reason to clone it per archive.
///
/// # Examples
///
/// ```
/// use zipvet_core::CheckConfig;
///
/// // Use defaults
/// let config = CheckConfig::default();
///
/// // Customize for sites that do not want indexed jars
/// let custom = CheckConfig {
///     prefer_indexed_jars: false,
///     ..Default::default()
/// };
/// ```
#[derive(Debug, Clone)]
pub struct CheckConfig {
    /// Whether Java archives are expected to carry a `META-INF/INDEX.LIST`
    /// class index. Only mismatches between this preference and the
    /// archive's actual state are reported.
    pub prefer_indexed_jars: bool,

    /// Upper bound on a single entry's decompressed size in bytes.
    /// Entries declaring or producing more are reported as undecodable.
    pub max_entry_size: u64,
}

impl Default for CheckConfig {
    /// Creates a `CheckConfig` with default settings.
    ///
    /// Default values:
    /// - `prefer_indexed_jars`: true
    /// - `max_entry_size`: 512 MiB
    fn default() -> Self {
        Self {
            prefer_indexed_jars: true,
            max_entry_size: 512 * 1024 * 1024,
        }
    }
}

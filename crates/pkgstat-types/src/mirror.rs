//! Mirror URL templates.

use serde::{Deserialize, Serialize};

use crate::Architecture;

/// Default Debian mirror template.
pub const DEFAULT_MIRROR_URL: &str =
    "http://ftp.uk.debian.org/debian/dists/stable/main/Contents-{arch}.gz";

/// Placeholders replaced by the architecture token.
const PLACEHOLDERS: [&str; 2] = ["{arch}", "{architecture}"];

/// A mirror URL template containing an architecture placeholder.
///
/// Both `{arch}` and `{architecture}` are recognised. A template without a
/// placeholder resolves to itself.
///
/// # Example
///
/// ```
/// use pkgstat_types::{Architecture, MirrorTemplate};
///
/// let template = MirrorTemplate::new("http://deb.example/dists/stable/Contents-{arch}.gz");
/// let arch = Architecture::new("arm64").unwrap();
/// assert_eq!(template.resolve(&arch), "http://deb.example/dists/stable/Contents-arm64.gz");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MirrorTemplate(String);

impl MirrorTemplate {
    /// Creates a new template.
    #[must_use]
    pub fn new(template: impl Into<String>) -> Self {
        Self(template.into())
    }

    /// Returns the raw template string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true if the template contains a recognised placeholder.
    #[must_use]
    pub fn has_placeholder(&self) -> bool {
        PLACEHOLDERS.iter().any(|p| self.0.contains(p))
    }

    /// Resolves the template for an architecture, replacing every placeholder.
    #[must_use]
    pub fn resolve(&self, arch: &Architecture) -> String {
        PLACEHOLDERS
            .iter()
            .fold(self.0.clone(), |url, placeholder| {
                url.replace(placeholder, arch.as_str())
            })
    }
}

impl Default for MirrorTemplate {
    fn default() -> Self {
        Self::new(DEFAULT_MIRROR_URL)
    }
}

impl std::fmt::Display for MirrorTemplate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

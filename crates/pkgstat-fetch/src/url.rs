//! Contents file URL construction.

use pkgstat_types::{Architecture, MirrorTemplate};

/// Name used when a URL has no usable final path segment.
pub const FALLBACK_FILE_NAME: &str = "Contents.gz";

/// Builds the Contents file URL for an architecture.
///
/// # Example
///
/// ```
/// use pkgstat_fetch::url::contents_url;
/// use pkgstat_types::{Architecture, MirrorTemplate};
///
/// let template = MirrorTemplate::new("http://deb.debian.org/debian/dists/stable/main/Contents-{arch}.gz");
/// let url = contents_url(&template, &Architecture::new("amd64").unwrap());
/// assert_eq!(url, "http://deb.debian.org/debian/dists/stable/main/Contents-amd64.gz");
/// ```
#[must_use]
pub fn contents_url(template: &MirrorTemplate, arch: &Architecture) -> String {
    template.resolve(arch)
}

/// Returns the final path segment of a URL, used to name the local copy.
///
/// Query strings and fragments are ignored. Falls back to
/// [`FALLBACK_FILE_NAME`] when the URL has no non-empty final segment.
#[must_use]
pub fn file_name(url: &str) -> String {
    reqwest::Url::parse(url)
        .ok()
        .and_then(|parsed| {
            parsed
                .path_segments()
                .and_then(|mut segments| segments.next_back().map(str::to_string))
        })
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| FALLBACK_FILE_NAME.to_string())
}

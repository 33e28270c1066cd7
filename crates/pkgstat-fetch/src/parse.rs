//! Contents line parsing.
//!
//! A Contents line is a file path followed by whitespace and a
//! comma-separated list of `section/package` qualifiers:
//!
//! ```text
//! usr/bin/python3.11                      python/python3.11-minimal
//! usr/share/doc/README                    doc/foo,admin/bar
//! ```
//!
//! Extraction is deliberately lenient. Without validation a malformed line is
//! parsed best-effort: a line with no whitespace is treated as its own last
//! field, and a trailing comma yields an empty package name. Callers that
//! want to drop such lines enable validation via [`parse_line`].

use regex::Regex;
use std::sync::LazyLock;
use thiserror::Error;

/// A line must start with something other than `/` and contain whitespace
/// after its first character.
static LINE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^/].*\s+.*").expect("valid line pattern"));

/// Errors that can occur during line parsing.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// The line does not have the `<path> <packages>` shape.
    #[error("Invalid format detected in line: {0}")]
    InvalidFormat(String),
}

/// Returns true if the line has the `<path> <packages>` shape.
#[must_use]
pub fn is_valid_line(line: &str) -> bool {
    LINE_PATTERN.is_match(line)
}

/// Extracts the package names referenced by a line.
///
/// Takes the last whitespace-separated field, splits it on commas and keeps
/// the part of each token after its final `/`. A blank line yields nothing.
///
/// # Example
///
/// ```
/// use pkgstat_fetch::extract_package_names;
///
/// let names: Vec<_> = extract_package_names("usr/bin/foo admin/pkg1,net/pkg2").collect();
/// assert_eq!(names, ["pkg1", "pkg2"]);
/// ```
pub fn extract_package_names(line: &str) -> impl Iterator<Item = &str> + '_ {
    line.split_whitespace()
        .next_back()
        .into_iter()
        .flat_map(|field| field.split(','))
        .map(|token| token.rsplit('/').next().unwrap_or(token))
}

/// Extracts package names, optionally validating the line shape first.
///
/// # Errors
///
/// Returns [`ParseError::InvalidFormat`] when `validate` is set and the line
/// does not match [`is_valid_line`].
pub fn parse_line(
    line: &str,
    validate: bool,
) -> Result<impl Iterator<Item = &str> + '_, ParseError> {
    if validate && !is_valid_line(line) {
        return Err(ParseError::InvalidFormat(line.trim().to_string()));
    }
    Ok(extract_package_names(line))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(line: &str) -> Vec<&str> {
        extract_package_names(line).collect()
    }

    #[test]
    fn test_single_package() {
        assert_eq!(names("usr/bin/foo admin/foo-pkg"), ["foo-pkg"]);
    }

    #[test]
    fn test_multiple_packages() {
        assert_eq!(names("usr/share/doc/x a/pkg1,b/pkg2"), ["pkg1", "pkg2"]);
    }

    #[test]
    fn test_wide_column_padding() {
        assert_eq!(
            names("usr/lib/python3/dist-packages/foo.py                    python/python3-foo"),
            ["python3-foo"]
        );
    }

    #[test]
    fn test_nested_section() {
        assert_eq!(names("usr/bin/qt non-free/libs/libqt"), ["libqt"]);
    }

    #[test]
    fn test_trailing_comma_yields_empty_name() {
        assert_eq!(names("usr/bin/foo a/pkg1,"), ["pkg1", ""]);
    }

    #[test]
    fn test_token_without_section() {
        assert_eq!(names("usr/bin/foo pkg1,b/pkg2"), ["pkg1", "pkg2"]);
    }

    #[test]
    fn test_no_whitespace_uses_whole_line() {
        assert_eq!(names("usr/bin/foo"), ["foo"]);
    }

    #[test]
    fn test_path_with_spaces_uses_last_field() {
        assert_eq!(names("usr/share/My Documents/a b admin/pkg"), ["pkg"]);
    }

    #[test]
    fn test_blank_line_yields_nothing() {
        assert!(names("").is_empty());
        assert!(names("   \t").is_empty());
    }

    #[test]
    fn test_trailing_whitespace_ignored() {
        assert_eq!(names("usr/bin/foo admin/pkg \t"), ["pkg"]);
    }

    #[test]
    fn test_valid_lines() {
        assert!(is_valid_line("usr/bin/foo admin/foo"));
        assert!(is_valid_line("etc/passwd\tadmin/base-files"));
    }

    #[test]
    fn test_invalid_lines() {
        assert!(!is_valid_line("/etc/passwd base-files"));
        assert!(!is_valid_line("nowhitespace"));
        assert!(!is_valid_line(""));
    }

    #[test]
    fn test_parse_line_without_validation_is_lenient() {
        let parsed: Vec<_> = parse_line("/etc/passwd base-files", false).unwrap().collect();
        assert_eq!(parsed, ["base-files"]);
    }

    #[test]
    fn test_parse_line_with_validation_rejects() {
        let err = parse_line("/etc/passwd base-files", true).err();
        assert_eq!(
            err,
            Some(ParseError::InvalidFormat("/etc/passwd base-files".to_string()))
        );
    }

    #[test]
    fn test_parse_line_with_validation_accepts() {
        let parsed: Vec<_> = parse_line("usr/bin/bar admin/foo-pkg,util/bar-pkg", true)
            .unwrap()
            .collect();
        assert_eq!(parsed, ["foo-pkg", "bar-pkg"]);
    }
}

//! Architecture identifiers.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::ArchitectureError;

/// An architecture token such as `amd64` or `arm64`.
///
/// The token is opaque. The only guarantee is that it can be embedded in a
/// URL path segment: it is non-empty and contains no `/`, whitespace, `?`,
/// `#` or `%`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Architecture(String);

impl Architecture {
    /// Creates a new architecture after validating the token.
    ///
    /// # Errors
    ///
    /// Returns an error if the token is empty or not path-segment safe.
    pub fn new(token: impl Into<String>) -> Result<Self, ArchitectureError> {
        let token = token.into();
        if token.is_empty() {
            return Err(ArchitectureError::Empty);
        }
        if let Some(ch) = token
            .chars()
            .find(|c| c.is_whitespace() || c.is_control() || matches!(c, '/' | '?' | '#' | '%'))
        {
            return Err(ArchitectureError::InvalidChar { token, ch });
        }
        Ok(Self(token))
    }

    /// Returns the token as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for Architecture {
    type Err = ArchitectureError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for Architecture {
    type Error = ArchitectureError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Architecture> for String {
    fn from(arch: Architecture) -> Self {
        arch.0
    }
}

impl std::fmt::Display for Architecture {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

//! Ranked package counts.

use serde::{Deserialize, Serialize};

/// A package identifier together with the number of files it ships.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PackageCount {
    /// Package identifier (case-sensitive, may be empty).
    pub name: String,
    /// Number of files attributed to the package.
    pub count: u64,
}

impl PackageCount {
    /// Creates a new package count.
    #[must_use]
    pub fn new(name: impl Into<String>, count: u64) -> Self {
        Self {
            name: name.into(),
            count,
        }
    }
}

//! CLI command implementations.

pub(crate) mod analyze;
